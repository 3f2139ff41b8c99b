use crate::ConstraintVariableGraph;
use lazy_static::lazy_static;
use regex::Regex;
use std::convert::TryFrom;

lazy_static! {
    static ref VARIABLE_DECL_REGEX: Regex =
        Regex::new(r"^(?P<kind>known|unknown)\s+(?P<name>[a-zA-Z0-9_]+)$").unwrap();
    static ref CONSTRAINT_REGEX: Regex =
        Regex::new(r"^(?P<name>[a-zA-Z0-9_]+)\s*:\s*(?P<variables>.+)$").unwrap();
}

/// **(internal)** A parsed model line that has not been integrated into a
/// `ConstraintVariableGraph` yet.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
enum ModelLine {
    Unknown(String),
    Known(String),
    Constraint(String, Vec<String>),
}

impl TryFrom<&str> for ModelLine {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if let Some(captures) = VARIABLE_DECL_REGEX.captures(value) {
            let name = captures["name"].to_string();
            return Ok(match &captures["kind"] {
                "known" => ModelLine::Known(name),
                _ => ModelLine::Unknown(name),
            });
        }
        if let Some(captures) = CONSTRAINT_REGEX.captures(value) {
            let variables: Vec<String> = captures["variables"]
                .split(',')
                .map(|it| it.trim().to_string())
                .collect();
            if variables.iter().all(|it| !it.is_empty()) {
                return Ok(ModelLine::Constraint(
                    captures["name"].to_string(),
                    variables,
                ));
            }
        }
        Err(format!("String \"{}\" is not a valid model line.", value))
    }
}

/// Methods for parsing `ConstraintVariableGraph`s from string representations.
impl TryFrom<&str> for ConstraintVariableGraph {
    type Error = String;

    /// Read a graph from the plain-text model format. Lines are trimmed; empty
    /// lines and `#` comments are skipped. Declarations and constraints may
    /// appear in any order.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lines = value
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty() && !line.starts_with('#'));

        let mut unknown_variables = Vec::new();
        let mut known_variables = Vec::new();
        let mut constraints = Vec::new();
        for line in lines {
            match ModelLine::try_from(line)? {
                ModelLine::Unknown(name) => unknown_variables.push(name),
                ModelLine::Known(name) => known_variables.push(name),
                ModelLine::Constraint(name, variables) => constraints.push((name, variables)),
            }
        }

        ConstraintVariableGraph::from_parts(unknown_variables, known_variables, constraints)
            .map_err(|error| error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use crate::_impl_constraint_variable_graph::tests::build_tank_model;
    use crate::ConstraintVariableGraph;
    use std::convert::TryFrom;

    #[test]
    fn parse_model_valid() {
        let graph = ConstraintVariableGraph::try_from(
            "
            # The two-tank system, example 5.22.
            unknown h
            unknown h_dot
            unknown qi
            unknown qo
            known u
            known y

            c1: h_dot, qi, qo
            c2: qi, u
            c3: h, qo
            c4: h, y
            c5: u, y
            c6: h, h_dot
            ",
        )
        .unwrap();

        assert_eq!(build_tank_model(), graph);
    }

    #[test]
    fn parse_model_declarations_in_any_order() {
        let graph = ConstraintVariableGraph::try_from(
            "
            known u
            c1: a, u
            unknown a
            ",
        )
        .unwrap();
        assert_eq!(1, graph.num_constraints());
        assert_eq!(2, graph.num_variables());
    }

    #[test]
    fn parse_model_invalid() {
        assert!(ConstraintVariableGraph::try_from("c1 h").is_err());
        assert!(ConstraintVariableGraph::try_from("-> x").is_err());
        assert!(ConstraintVariableGraph::try_from("known").is_err());
        assert!(ConstraintVariableGraph::try_from("c1:").is_err());
        assert!(ConstraintVariableGraph::try_from("unknown a\nc1: a,,a").is_err());
        // Structurally invalid models are rejected too.
        assert!(ConstraintVariableGraph::try_from("unknown a\nc1: b").is_err());
        assert!(ConstraintVariableGraph::try_from("unknown a\nknown a\nc1: a").is_err());
    }
}
