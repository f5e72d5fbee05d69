use crate::formula::{Assignment, Formula, Literal, Value, Variable};
use crate::SatResult;
use log::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ClauseIdx(usize);

#[derive(PartialEq, Eq, Clone, Debug)]
enum PropagationResult {
    Conflict(ClauseIdx),
    NoConflict,
}

// What a single scan of a clause against the current assignment found
#[derive(PartialEq, Eq, Clone, Debug)]
enum ClauseStatus {
    Satisfied,
    Open,
    Unit(Literal),
    Falsified,
}

pub struct Solver {
    formula: Formula,
    assignment: Assignment,
}

impl Solver {
    pub fn new(formula: Formula) -> Self {
        let assignment = Assignment::unassigned(formula.variable_count());
        Self {
            formula,
            assignment,
        }
    }

    pub fn solve(&mut self) -> SatResult {
        trace!("solving {:?}", self.formula);
        self.assignment = Assignment::unassigned(self.formula.variable_count());
        if self.search(0) {
            SatResult::Satisfiable(self.assignment.clone())
        } else {
            SatResult::Unsatisfiable
        }
    }

    // Recursive backtracking over variables from `from` upward. On failure the
    // assignment is left exactly as it was at entry.
    fn search(&mut self, from: usize) -> bool {
        let pivot = match self.assignment.first_unassigned(from) {
            Some(v) => v,
            None => return self.formula.is_satisfied_by(&self.assignment),
        };

        // both branches must start from the same pre-decision state, and
        // propagate mutates it in place
        let snapshot = self.assignment.clone();

        trace!("decision {}", Literal::Positive(pivot));
        self.assignment.assign(pivot, Value::True);
        if let PropagationResult::NoConflict = self.propagate() {
            if self.search(pivot.0 + 1) {
                return true;
            }
        }
        self.assignment.clone_from(&snapshot);

        trace!("decision {}", Literal::Negative(pivot));
        self.assignment.assign(pivot, Value::False);
        if let PropagationResult::NoConflict = self.propagate() {
            if self.search(pivot.0 + 1) {
                return true;
            }
        }
        self.assignment.clone_from(&snapshot);

        trace!("exhausted variable {}", pivot.0);
        false
    }

    // Force every unit clause until there are none left, or some clause has
    // all its literals assigned the wrong way.
    fn propagate(&mut self) -> PropagationResult {
        let mut worklist: Vec<ClauseIdx> = (0..self.formula.clause_count()).map(ClauseIdx).collect();

        while let Some(idx) = worklist.pop() {
            match self.classify(idx) {
                ClauseStatus::Satisfied | ClauseStatus::Open => {}
                ClauseStatus::Unit(literal) => {
                    trace!("implied {} by clause {}", literal, idx.0);
                    self.assignment.assign(literal.variable(), literal.forces());
                    // this assignment can turn any clause into a unit, so
                    // requeue everything still unsatisfied
                    // TODO replace the full rescan with a per-variable clause
                    // index if large instances ever matter
                    worklist.clear();
                    worklist.extend(
                        self.formula
                            .clauses()
                            .enumerate()
                            .filter(|(_, clause)| !clause.is_satisfied_by(&self.assignment))
                            .map(|(i, _)| ClauseIdx(i)),
                    );
                }
                ClauseStatus::Falsified => {
                    trace!("conflict at clause {}", idx.0);
                    return PropagationResult::Conflict(idx);
                }
            }
        }
        PropagationResult::NoConflict
    }

    fn classify(&self, idx: ClauseIdx) -> ClauseStatus {
        let mut unresolved_count = 0;
        let mut unit = None;
        for literal in self.formula.clause(idx.0).literals() {
            match self.assignment.literal_value(literal) {
                // true => this clause is satisfied, nothing to force
                Value::True => return ClauseStatus::Satisfied,
                // false => keep scanning for an unassigned literal
                Value::False => {}
                // unassigned => forced if it turns out to be the only one
                Value::Unassigned => {
                    unresolved_count += 1;
                    unit = Some(literal);
                }
            }
        }
        match (unresolved_count, unit) {
            // every literal assigned the opposite of what the clause needs
            (0, _) => ClauseStatus::Falsified,
            (1, Some(literal)) => ClauseStatus::Unit(literal),
            _ => ClauseStatus::Open,
        }
    }
}
