use clap::{App, Arg};
use dpllsat::formula::dimacs;
use dpllsat::{SatResult, Solver};
use std::fs::File;
use std::io;

fn main() {
    env_logger::init();

    let matches = App::new("dpllsat")
        .arg(
            Arg::with_name("INPUT")
                .help("input file (in DIMACS CNF); stdin if omitted")
                .index(1),
        )
        .arg(
            Arg::with_name("OUTPUT")
                .help("output file for the result; stdout if omitted")
                .index(2),
        )
        .get_matches();

    let f = if let Some(path) = matches.value_of("INPUT") {
        dimacs::parse_file(path)
    } else {
        dimacs::parse(io::stdin())
    };

    let f = match f {
        Ok(f) => f,
        Err(e) => {
            eprintln!("parse error: {}", e);
            std::process::exit(-1);
        }
    };

    let mut solver = Solver::new(f);
    let result = solver.solve();

    let written = match matches.value_of("OUTPUT") {
        Some(path) => File::create(path).and_then(|file| dimacs::write_result(file, &result)),
        None => {
            let stdout = io::stdout();
            dimacs::write_result(stdout.lock(), &result)
        }
    };
    if let Err(e) = written {
        eprintln!("write error: {}", e);
        std::process::exit(-1);
    }

    let exit_code = match result {
        SatResult::Satisfiable(_) => 0,
        SatResult::Unsatisfiable => 1,
    };
    std::process::exit(exit_code);
}
