use crate::{Constraint, VariableId};
use std::fmt::{Display, Error, Formatter};

impl Display for Constraint {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.name)
    }
}

impl Constraint {
    /// Human-readable name of this constraint.
    pub fn get_name(&self) -> &String {
        &self.name
    }

    /// The variables this constraint references, in declaration order and
    /// without duplicates.
    pub fn get_variables(&self) -> &[VariableId] {
        &self.variables
    }

    /// The number of distinct variables this constraint references.
    pub fn arity(&self) -> usize {
        self.variables.len()
    }
}
