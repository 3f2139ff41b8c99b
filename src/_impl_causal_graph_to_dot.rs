use crate::{CausalGraph, CausalNode, ConstraintVariableGraph, VariableKind};
use std::io::Write;

impl CausalGraph {
    /// Export this causal graph to a `.dot` format, taking node labels from the
    /// bipartite graph it was built from.
    ///
    /// Variables are drawn as ellipses, green for known and red for unknown;
    /// constraints are drawn as blue boxes. The sink appears only when some
    /// constraint is redundant, as a green terminal labelled `0`.
    pub fn to_dot(&self, graph: &ConstraintVariableGraph) -> String {
        let mut buffer: Vec<u8> = Vec::new();
        self.write_as_dot(graph, &mut buffer)
            .expect("I/O error converting `CausalGraph` to `.dot`.");
        String::from_utf8(buffer).expect("Invalid UTF formatting in .dot string.")
    }

    pub fn write_as_dot(
        &self,
        graph: &ConstraintVariableGraph,
        output: &mut dyn Write,
    ) -> Result<(), std::io::Error> {
        writeln!(output, "digraph G {{")?;
        for variable in graph.variables() {
            let color = match graph.get_variable_kind(variable) {
                VariableKind::Known => "#4abd73",
                VariableKind::Unknown => "#d05d5d",
            };
            writeln!(
                output,
                "v{} [shape=ellipse, label=\"{}\", style=filled, fillcolor=\"{}\"];",
                variable.to_index(),
                graph.get_variable_name(variable),
                color
            )?;
        }
        for constraint in graph.constraints() {
            writeln!(
                output,
                "c{} [shape=box, label=\"{}\", style=filled, fillcolor=\"#97b9e0\"];",
                constraint.to_index(),
                graph.get_constraint_name(constraint)
            )?;
        }
        if !self.redundant_constraints().is_empty() {
            writeln!(
                output,
                "zero [shape=doublecircle, label=\"0\", style=filled, fillcolor=\"#4abd73\"];"
            )?;
        }
        for (source, target) in self.edges() {
            writeln!(output, "{} -> {};", dot_id(source), dot_id(target))?;
        }
        writeln!(output, "}}")?;
        Ok(())
    }
}

/// **(internal)** The `.dot` node identifier of a causal node.
fn dot_id(node: &CausalNode) -> String {
    match node {
        CausalNode::Variable(variable) => format!("v{}", variable.to_index()),
        CausalNode::Constraint(constraint) => format!("c{}", constraint.to_index()),
        CausalNode::Sink => "zero".to_string(),
    }
}
