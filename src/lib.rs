pub mod formula;
mod solver;

#[cfg(test)]
mod brute_force;

#[derive(PartialEq, Clone, Debug)]
pub enum SatResult {
    Satisfiable(Assignment),
    Unsatisfiable,
}

impl SatResult {
    pub fn is_satisfiable(&self) -> bool {
        match self {
            SatResult::Satisfiable(_) => true,
            SatResult::Unsatisfiable => false,
        }
    }

    pub fn model(&self) -> Option<&Assignment> {
        match self {
            SatResult::Satisfiable(assignment) => Some(assignment),
            SatResult::Unsatisfiable => None,
        }
    }
}

pub use formula::{Assignment, Clause, Formula, FormulaError, Literal, Polarity, Value, Variable};
pub use solver::Solver;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brute_force::solve_brute_force;
    use crate::formula::{n, p};

    #[test]
    fn single_positive_unit() {
        let c1 = Clause::new(1, vec![p(0)]).unwrap();
        let f = Formula::new(1, vec![c1]).unwrap();

        match Solver::new(f).solve() {
            SatResult::Satisfiable(model) => assert_eq!(model.value(Variable(0)), Value::True),
            SatResult::Unsatisfiable => panic!("expected satisfiable"),
        }
    }

    #[test]
    fn contradictory_units() {
        let c1 = Clause::new(1, vec![p(0)]).unwrap();
        let c2 = Clause::new(1, vec![n(0)]).unwrap();
        let f = Formula::new(1, vec![c1, c2]).unwrap();

        assert_eq!(Solver::new(f).solve(), SatResult::Unsatisfiable);
    }

    #[test]
    fn three_clauses_over_two_variables() {
        let c1 = Clause::new(2, vec![p(0), p(1)]).unwrap();
        let c2 = Clause::new(2, vec![n(0), p(1)]).unwrap();
        let c3 = Clause::new(2, vec![p(0), n(1)]).unwrap();
        let f = Formula::new(2, vec![c1, c2, c3]).unwrap();

        let result = Solver::new(f.clone()).solve();
        assert!(result.is_satisfiable());
        let model = result.model().expect("expected a model");
        assert!(f.is_satisfied_by(model));
    }

    #[test]
    fn implication_chain_into_contradiction() {
        // forcing 0 true chains through 1 and 2, which clause {!2} refuses
        let c1 = Clause::new(3, vec![p(0)]).unwrap();
        let c2 = Clause::new(3, vec![n(0), p(1)]).unwrap();
        let c3 = Clause::new(3, vec![n(1), p(2)]).unwrap();
        let c4 = Clause::new(3, vec![n(2)]).unwrap();
        let f = Formula::new(3, vec![c1, c2, c3, c4]).unwrap();

        assert_eq!(Solver::new(f).solve(), SatResult::Unsatisfiable);
    }

    #[test]
    fn end_to_end_dimacs_unsat() {
        let cnf = "p cnf 3 4
1 0
-1 2 0
-2 3 0
-3 0
";
        let f = formula::dimacs::parse(cnf.as_bytes()).expect("failed to parse");
        let result = Solver::new(f).solve();

        let mut out = Vec::new();
        formula::dimacs::write_result(&mut out, &result).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "s UNSATISFIABLE\n");
    }

    #[test]
    fn random_formulas_agree_with_brute_force() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let variable_count = rng.gen_range(1usize, 7);
            let clause_count = rng.gen_range(1usize, 10);
            let clauses: Vec<Clause> = (0..clause_count)
                .map(|_| {
                    let width = rng.gen_range(1usize, 4);
                    let literals: Vec<Literal> = (0..width)
                        .map(|_| {
                            let x = Variable(rng.gen_range(0, variable_count));
                            if rng.gen::<bool>() {
                                Literal::Positive(x)
                            } else {
                                Literal::Negative(x)
                            }
                        })
                        .collect();
                    Clause::new(variable_count, literals).unwrap()
                })
                .collect();
            let f = Formula::new(variable_count, clauses).unwrap();

            let brute_force = solve_brute_force(&f);
            match Solver::new(f.clone()).solve() {
                SatResult::Satisfiable(model) => {
                    assert!(brute_force, "brute force disagrees with sat verdict for {:?}", f);
                    assert!(f.is_satisfied_by(&model), "bogus model for {:?}", f);
                }
                SatResult::Unsatisfiable => {
                    assert!(!brute_force, "solver missed a model for {:?}", f)
                }
            }
        }
    }
}
