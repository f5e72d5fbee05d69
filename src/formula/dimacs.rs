use crate::formula::{Clause, Formula, FormulaError, Literal, Value, Variable};
use crate::SatResult;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::Path;

pub fn parse<R: Read>(reader: R) -> Result<Formula, DimacsParseError> {
    let reader = BufReader::new(reader);

    let mut clauses = vec![];
    let mut header = None;

    for line in reader.lines() {
        let line = line?;
        let mut line = line.split_whitespace().peekable();

        match line.peek() {
            Some(&"c") | None => continue,
            Some(&"p") => {
                let _ = line.next();

                if line.next() != Some("cnf") {
                    return Err(DimacsParseError::Format("missing 'cnf'".into()));
                }

                let num_variables = line
                    .next()
                    .and_then(|c| usize::from_str_radix(c, 10).ok())
                    .ok_or_else(|| DimacsParseError::Format("invalid num_variables".into()))?;

                let num_clauses = line
                    .next()
                    .and_then(|c| usize::from_str_radix(c, 10).ok())
                    .ok_or_else(|| DimacsParseError::Format("invalid num_clauses".into()))?;

                header = Some((num_variables, num_clauses));
            }
            Some(_) => {
                let (num_variables, num_clauses) = match header {
                    Some(h) => h,
                    None => {
                        return Err(DimacsParseError::Format(
                            "missing 'p' line before clauses".into(),
                        ))
                    }
                };

                let mut clause = vec![];
                for x in line {
                    match parse_literal(x)? {
                        Some(l) => clause.push(l),
                        None => break,
                    }
                }
                clauses.push(Clause::new(num_variables, clause)?);

                if clauses.len() >= num_clauses {
                    break;
                }
            }
        }
    }

    match header {
        Some((num_variables, _)) => Ok(Formula::new(num_variables, clauses)?),
        None => Err(DimacsParseError::Format(
            "missing 'p' line before clauses".into(),
        )),
    }
}

pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Formula, DimacsParseError> {
    let file = File::open(path)?;
    parse(file)
}

fn parse_literal(s: &str) -> Result<Option<Literal>, DimacsParseError> {
    let l = isize::from_str_radix(s, 10).map_err(|_| DimacsParseError::Format("invalid literal".into()))?;
    if l > 0 {
        Ok(Some(Literal::Positive(Variable(l as usize - 1))))
    } else if l < 0 {
        Ok(Some(Literal::Negative(Variable(-l as usize - 1))))
    } else {
        Ok(None)
    }
}

// `s`/`v` lines as DIMACS consumers expect: 1-based literals, negative when
// the variable is false, terminated by 0. A variable the search never had to
// constrain is reported positive.
pub fn write_result<W: Write>(mut writer: W, result: &SatResult) -> io::Result<()> {
    match result {
        SatResult::Satisfiable(assignment) => {
            writeln!(writer, "s SATISFIABLE")?;
            write!(writer, "v ")?;
            for (i, value) in assignment.values().enumerate() {
                match value {
                    Value::False => write!(writer, "{} ", -((i + 1) as isize))?,
                    _ => write!(writer, "{} ", i + 1)?,
                }
            }
            writeln!(writer, "0")
        }
        SatResult::Unsatisfiable => writeln!(writer, "s UNSATISFIABLE"),
    }
}

#[derive(Debug)]
pub enum DimacsParseError {
    Io(std::io::Error),
    Format(String),
    Formula(FormulaError),
}

impl From<std::io::Error> for DimacsParseError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<FormulaError> for DimacsParseError {
    fn from(e: FormulaError) -> Self {
        Self::Formula(e)
    }
}

impl std::fmt::Display for DimacsParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DimacsParseError::Io(e) => write!(f, "io error: {}", e),
            DimacsParseError::Format(msg) => write!(f, "malformed DIMACS input: {}", msg),
            DimacsParseError::Formula(e) => write!(f, "malformed formula: {}", e),
        }
    }
}

impl std::error::Error for DimacsParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DimacsParseError::Io(e) => Some(e),
            DimacsParseError::Formula(e) => Some(e),
            DimacsParseError::Format(_) => None,
        }
    }
}
