use crate::ConstraintId;
use std::fmt::{Display, Error, Formatter};

impl ConstraintId {
    /// Convert this id into a raw index usable for direct indexing of
    /// constraint-keyed tables.
    pub fn to_index(self) -> usize {
        self.0
    }
}

impl From<usize> for ConstraintId {
    fn from(val: usize) -> Self {
        ConstraintId(val)
    }
}

impl From<ConstraintId> for usize {
    fn from(value: ConstraintId) -> Self {
        value.0
    }
}

impl Display for ConstraintId {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "Constraint({})", self.0)
    }
}
