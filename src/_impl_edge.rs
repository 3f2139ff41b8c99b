use crate::{ConstraintId, Edge, VariableId};

impl Edge {
    /// The constraint endpoint of this edge.
    pub fn get_constraint(&self) -> ConstraintId {
        self.constraint
    }

    /// The variable endpoint of this edge.
    pub fn get_variable(&self) -> VariableId {
        self.variable
    }
}
