pub mod dimacs;

use std::fmt::Debug;
use std::fmt::{self, Display, Formatter};

#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Debug)]
pub struct Variable(pub usize);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Literal {
    Positive(Variable),
    Negative(Variable),
}

impl Literal {
    pub fn variable(&self) -> Variable {
        match self {
            Literal::Positive(v) => *v,
            Literal::Negative(v) => *v,
        }
    }

    pub fn is_positive(&self) -> bool {
        match self {
            Literal::Positive(_) => true,
            Literal::Negative(_) => false,
        }
    }

    pub fn idx(&self) -> usize {
        self.variable().0
    }

    // the assignment value this literal needs to come out true
    pub(crate) fn forces(&self) -> Value {
        if self.is_positive() {
            Value::True
        } else {
            Value::False
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        match self {
            Literal::Positive(Variable(x)) => f.write_fmt(format_args!("{}", x)),
            Literal::Negative(Variable(x)) => f.write_fmt(format_args!("!{}", x)),
        }
    }
}

// How a variable occurs in a clause, if at all
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Polarity {
    Absent,
    Positive,
    Negative,
}

// Truth value of a variable under a (possibly partial) assignment
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Value {
    Unassigned,
    True,
    False,
}

impl Value {
    pub fn is_assigned(self) -> bool {
        self != Value::Unassigned
    }

    pub fn negated(self) -> Self {
        match self {
            Value::Unassigned => Value::Unassigned,
            Value::True => Value::False,
            Value::False => Value::True,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormulaError {
    EmptyClause,
    VariableOutOfRange { variable: usize, variable_count: usize },
    WrongClauseWidth { expected: usize, found: usize },
}

impl Display for FormulaError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        match self {
            FormulaError::EmptyClause => write!(f, "clause has no literals"),
            FormulaError::VariableOutOfRange { variable, variable_count } => write!(
                f,
                "variable {} out of range for a formula over {} variables",
                variable, variable_count
            ),
            FormulaError::WrongClauseWidth { expected, found } => write!(
                f,
                "clause built over {} variables, formula expects {}",
                found, expected
            ),
        }
    }
}

impl std::error::Error for FormulaError {}

// A disjunction of literals, stored as one polarity per variable
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Clause {
    polarity: Vec<Polarity>,
}

impl Clause {
    pub fn new(
        variable_count: usize,
        disjuncts: impl IntoIterator<Item = Literal>,
    ) -> Result<Self, FormulaError> {
        let mut polarity = vec![Polarity::Absent; variable_count];
        let mut width = 0;
        for literal in disjuncts {
            let x = literal.idx();
            if x >= variable_count {
                return Err(FormulaError::VariableOutOfRange {
                    variable: x,
                    variable_count,
                });
            }
            // a variable listed twice keeps the sign seen last
            polarity[x] = if literal.is_positive() {
                Polarity::Positive
            } else {
                Polarity::Negative
            };
            width += 1;
        }
        if width == 0 {
            return Err(FormulaError::EmptyClause);
        }
        Ok(Self { polarity })
    }

    pub fn variable_count(&self) -> usize {
        self.polarity.len()
    }

    pub fn polarity(&self, variable: Variable) -> Polarity {
        self.polarity[variable.0]
    }

    pub fn literals(&self) -> impl Iterator<Item = Literal> + '_ {
        self.polarity
            .iter()
            .enumerate()
            .filter_map(|(x, polarity)| match polarity {
                Polarity::Absent => None,
                Polarity::Positive => Some(Literal::Positive(Variable(x))),
                Polarity::Negative => Some(Literal::Negative(Variable(x))),
            })
    }

    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        self.literals()
            .any(|literal| assignment.literal_value(literal) == Value::True)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Formula {
    variable_count: usize,
    clauses: Vec<Clause>,
}

impl Formula {
    pub fn new(
        variable_count: usize,
        conjuncts: impl IntoIterator<Item = Clause>,
    ) -> Result<Self, FormulaError> {
        let clauses: Vec<Clause> = conjuncts.into_iter().collect();
        for clause in &clauses {
            if clause.variable_count() != variable_count {
                return Err(FormulaError::WrongClauseWidth {
                    expected: variable_count,
                    found: clause.variable_count(),
                });
            }
        }
        Ok(Self {
            variable_count,
            clauses,
        })
    }

    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }

    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    pub(crate) fn clause(&self, index: usize) -> &Clause {
        &self.clauses[index]
    }

    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        self.clauses
            .iter()
            .all(|clause| clause.is_satisfied_by(assignment))
    }
}

impl Debug for Formula {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        let mut first_clause = true;
        for clause in &self.clauses {
            if first_clause {
                first_clause = false;
            } else {
                f.write_str(" & ")?;
            }
            let parenthesize = clause.literals().count() > 1;
            if parenthesize {
                f.write_str("(")?;
            }
            let mut first_literal = true;
            for literal in clause.literals() {
                if first_literal {
                    first_literal = false;
                } else {
                    f.write_str(" | ")?;
                }
                Display::fmt(&literal, f)?;
            }
            if parenthesize {
                f.write_str(")")?;
            }
        }
        Ok(())
    }
}

// One truth value per variable, mutated in place by the solver
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Assignment {
    values: Vec<Value>,
}

impl Assignment {
    pub(crate) fn unassigned(variable_count: usize) -> Self {
        Self {
            values: vec![Value::Unassigned; variable_count],
        }
    }

    pub fn variable_count(&self) -> usize {
        self.values.len()
    }

    pub fn value(&self, variable: Variable) -> Value {
        self.values[variable.0]
    }

    // Truth value of the literal itself: a negative literal over a false
    // variable evaluates to true
    pub fn literal_value(&self, literal: Literal) -> Value {
        match self.values[literal.idx()] {
            Value::Unassigned => Value::Unassigned,
            value if literal.is_positive() => value,
            value => value.negated(),
        }
    }

    pub fn values(&self) -> impl Iterator<Item = Value> + '_ {
        self.values.iter().copied()
    }

    pub(crate) fn assign(&mut self, variable: Variable, value: Value) {
        self.values[variable.0] = value;
    }

    pub(crate) fn first_unassigned(&self, from: usize) -> Option<Variable> {
        (from..self.values.len())
            .find(|&x| !self.values[x].is_assigned())
            .map(Variable)
    }
}

#[cfg(test)]
pub(crate) fn p(x: usize) -> Literal {
    Literal::Positive(Variable(x))
}

#[cfg(test)]
pub(crate) fn n(x: usize) -> Literal {
    Literal::Negative(Variable(x))
}

#[cfg(test)]
pub(crate) fn formula_strategy() -> impl proptest::strategy::Strategy<Value = Formula> {
    use proptest::collection::vec;
    use proptest::prelude::*;

    (1usize..=8).prop_flat_map(|variable_count| {
        let literal = (0..variable_count, any::<bool>()).prop_map(|(x, positive)| {
            if positive {
                Literal::Positive(Variable(x))
            } else {
                Literal::Negative(Variable(x))
            }
        });
        let clause = vec(literal, 1..=3)
            .prop_map(move |lits| Clause::new(variable_count, lits).expect("clause in range"));
        vec(clause, 1..=12)
            .prop_map(move |clauses| Formula::new(variable_count, clauses).expect("widths match"))
    })
}
