use crate::{ConstraintVariableGraph, VariableKind};
use std::io::Write;

impl ConstraintVariableGraph {
    /// Export this graph to a `.dot` format.
    ///
    /// Variables are drawn as ellipses, green for known and red for unknown;
    /// constraints are drawn as blue boxes. Edges carry no direction.
    pub fn to_dot(&self) -> String {
        let mut buffer: Vec<u8> = Vec::new();
        self.write_as_dot(&mut buffer)
            .expect("I/O error converting `ConstraintVariableGraph` to `.dot`.");
        String::from_utf8(buffer).expect("Invalid UTF formatting in .dot string.")
    }

    pub fn write_as_dot(&self, output: &mut dyn Write) -> Result<(), std::io::Error> {
        writeln!(output, "graph G {{")?;
        for variable in self.variables() {
            let color = match self.get_variable_kind(variable) {
                VariableKind::Known => "#4abd73",
                VariableKind::Unknown => "#d05d5d",
            };
            writeln!(
                output,
                "v{} [shape=ellipse, label=\"{}\", style=filled, fillcolor=\"{}\"];",
                variable.to_index(),
                self.get_variable_name(variable),
                color
            )?;
        }
        for constraint in self.constraints() {
            writeln!(
                output,
                "c{} [shape=box, label=\"{}\", style=filled, fillcolor=\"#97b9e0\"];",
                constraint.to_index(),
                self.get_constraint_name(constraint)
            )?;
        }
        for edge in self.edges() {
            writeln!(
                output,
                "c{} -- v{};",
                edge.get_constraint().to_index(),
                edge.get_variable().to_index()
            )?;
        }
        writeln!(output, "}}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::_impl_constraint_variable_graph::tests::build_tank_model;

    #[test]
    pub fn test_graph_to_dot() {
        let graph = build_tank_model();
        let dot = graph.to_dot();
        assert!(dot.starts_with("graph G {"));
        assert!(dot.contains("label=\"h_dot\""));
        println!("{}", dot);
    }
}
