use crate::{ConstraintVariableGraph, VariableKind};
use std::fmt::{Display, Error, Formatter};

impl Display for ConstraintVariableGraph {
    /// Write this graph in the plain-text model format: one declaration per
    /// unknown variable, one per known variable, then one line per constraint.
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        for variable in self.variables() {
            let keyword = match self.get_variable_kind(variable) {
                VariableKind::Unknown => "unknown",
                VariableKind::Known => "known",
            };
            writeln!(f, "{} {}", keyword, self.get_variable_name(variable))?;
        }
        for constraint in self.constraints() {
            let variables: Vec<&str> = self
                .constraint_variables(constraint)
                .iter()
                .map(|it| self.get_variable_name(*it).as_str())
                .collect();
            writeln!(
                f,
                "{}: {}",
                self.get_constraint_name(constraint),
                variables.join(", ")
            )?;
        }
        Ok(())
    }
}
