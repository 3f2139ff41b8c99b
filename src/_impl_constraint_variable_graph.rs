use crate::util::build_index_map;
use crate::{
    Constraint, ConstraintId, ConstraintIdIterator, ConstraintVariableGraph, Edge, EdgeIterator,
    InvalidModelError, Node, Variable, VariableId, VariableIdIterator, VariableKind, ID_REGEX,
};
use std::collections::{HashMap, HashSet};
use std::ops::Index;

/// Methods for safely constructing new instances of `ConstraintVariableGraph`s.
impl ConstraintVariableGraph {
    /// Create a new `ConstraintVariableGraph` with the given unknown and known
    /// variables and no constraints.
    ///
    /// Unknown variables are indexed first; the ordering of both families is
    /// preserved. Returns `Err` when a name is not a valid identifier, when a
    /// name is declared twice, or when the two families overlap.
    pub fn new(
        unknown_variables: Vec<String>,
        known_variables: Vec<String>,
    ) -> Result<ConstraintVariableGraph, InvalidModelError> {
        {
            let mut seen_unknown: HashSet<&String> = HashSet::new();
            for name in &unknown_variables {
                if !ID_REGEX.is_match(name) {
                    return Err(InvalidModelError::InvalidName { name: name.clone() });
                }
                if !seen_unknown.insert(name) {
                    return Err(InvalidModelError::DuplicateVariable { name: name.clone() });
                }
            }
            let mut seen_known: HashSet<&String> = HashSet::new();
            for name in &known_variables {
                if !ID_REGEX.is_match(name) {
                    return Err(InvalidModelError::InvalidName { name: name.clone() });
                }
                if seen_unknown.contains(name) {
                    return Err(InvalidModelError::ConflictingKind { name: name.clone() });
                }
                if !seen_known.insert(name) {
                    return Err(InvalidModelError::DuplicateVariable { name: name.clone() });
                }
            }
        }

        let num_unknown = unknown_variables.len();
        let mut names = unknown_variables;
        names.extend(known_variables);

        Ok(ConstraintVariableGraph {
            variable_to_index: build_index_map(&names, |_, i| VariableId(i)),
            kinds: (0..names.len())
                .map(|i| {
                    if i < num_unknown {
                        VariableKind::Unknown
                    } else {
                        VariableKind::Known
                    }
                })
                .collect(),
            variables: names.into_iter().map(|name| Variable { name }).collect(),
            constraints: Vec::new(),
            edges: Vec::new(),
            constraint_to_index: HashMap::new(),
        })
    }

    /// Add a new `Constraint` with the given name and referenced variables.
    ///
    /// Repeated references to the same variable collapse into a single edge.
    /// Returns `Err` when the name is invalid or already used, when the variable
    /// list is empty, or when it mentions a variable this graph does not declare.
    pub fn add_constraint(
        &mut self,
        name: &str,
        variables: &[&str],
    ) -> Result<(), InvalidModelError> {
        if !ID_REGEX.is_match(name) {
            return Err(InvalidModelError::InvalidName {
                name: name.to_string(),
            });
        }
        if self.find_constraint(name).is_some() {
            return Err(InvalidModelError::DuplicateConstraint {
                name: name.to_string(),
            });
        }
        if variables.is_empty() {
            return Err(InvalidModelError::EmptyConstraint {
                name: name.to_string(),
            });
        }
        let mut resolved: Vec<VariableId> = Vec::with_capacity(variables.len());
        for variable in variables {
            let id = self.find_variable(variable).ok_or_else(|| {
                InvalidModelError::UndeclaredVariable {
                    constraint: name.to_string(),
                    variable: variable.to_string(),
                }
            })?;
            if !resolved.contains(&id) {
                resolved.push(id);
            }
        }

        let id = ConstraintId(self.constraints.len());
        self.constraint_to_index.insert(name.to_string(), id);
        for variable in &resolved {
            self.edges.push(Edge {
                constraint: id,
                variable: *variable,
            });
        }
        self.constraints.push(Constraint {
            name: name.to_string(),
            variables: resolved,
        });
        Ok(())
    }

    /// Create a `ConstraintVariableGraph` from complete variable and constraint
    /// lists. Equivalent to `new` followed by `add_constraint` for every entry.
    ///
    /// No partial graph escapes when any part of the model is invalid.
    pub fn from_parts(
        unknown_variables: Vec<String>,
        known_variables: Vec<String>,
        constraints: Vec<(String, Vec<String>)>,
    ) -> Result<ConstraintVariableGraph, InvalidModelError> {
        let mut graph = ConstraintVariableGraph::new(unknown_variables, known_variables)?;
        for (name, variables) in &constraints {
            let variables: Vec<&str> = variables.iter().map(|it| it.as_str()).collect();
            graph.add_constraint(name, &variables)?;
        }
        Ok(graph)
    }
}

/// Some basic utility methods for inspecting the `ConstraintVariableGraph`.
impl ConstraintVariableGraph {
    /// The number of variables in this graph.
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// The number of constraints in this graph.
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// The number of constraint-variable edges in this graph.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Find a `VariableId` for the given name, or `None` if the variable does not exist.
    pub fn find_variable(&self, name: &str) -> Option<VariableId> {
        self.variable_to_index.get(name).cloned()
    }

    /// Return a `Variable` corresponding to the given `VariableId`.
    pub fn get_variable(&self, id: VariableId) -> &Variable {
        &self.variables[id.0]
    }

    /// Shorthand for `self.get_variable(id).get_name()`.
    pub fn get_variable_name(&self, id: VariableId) -> &String {
        &self.variables[id.0].name
    }

    /// The known/unknown classification of the given variable.
    pub fn get_variable_kind(&self, id: VariableId) -> VariableKind {
        self.kinds[id.0]
    }

    /// True iff the given variable is known (measured or otherwise given).
    pub fn is_known(&self, id: VariableId) -> bool {
        self.kinds[id.0] == VariableKind::Known
    }

    /// Find a `ConstraintId` for the given name, or `None` if the constraint does not exist.
    pub fn find_constraint(&self, name: &str) -> Option<ConstraintId> {
        self.constraint_to_index.get(name).cloned()
    }

    /// Return a `Constraint` corresponding to the given `ConstraintId`.
    pub fn get_constraint(&self, id: ConstraintId) -> &Constraint {
        &self.constraints[id.0]
    }

    /// Shorthand for `self.get_constraint(id).get_name()`.
    pub fn get_constraint_name(&self, id: ConstraintId) -> &String {
        &self.constraints[id.0].name
    }

    /// The variables referenced by the given constraint, in declaration order.
    pub fn constraint_variables(&self, id: ConstraintId) -> &[VariableId] {
        &self.constraints[id.0].variables
    }

    /// Return a sorted list of constraints that reference the given variable.
    pub fn variable_constraints(&self, id: VariableId) -> Vec<ConstraintId> {
        let mut constraints: Vec<ConstraintId> = self
            .edges
            .iter()
            .filter(|edge| edge.variable == id)
            .map(|edge| edge.constraint)
            .collect();
        constraints.sort();
        constraints
    }

    /// Return an iterator over all variable ids of this graph.
    pub fn variables(&self) -> VariableIdIterator {
        (0..self.variables.len()).map(VariableId)
    }

    /// Return an iterator over all constraint ids of this graph.
    pub fn constraints(&self) -> ConstraintIdIterator {
        (0..self.constraints.len()).map(ConstraintId)
    }

    /// Ids of all unknown variables, in declaration order.
    pub fn unknown_variables(&self) -> Vec<VariableId> {
        self.variables().filter(|it| !self.is_known(*it)).collect()
    }

    /// Ids of all known variables, in declaration order.
    pub fn known_variables(&self) -> Vec<VariableId> {
        self.variables().filter(|it| self.is_known(*it)).collect()
    }

    /// The full node set of this graph: every variable followed by every constraint.
    pub fn nodes(&self) -> Vec<Node> {
        let mut nodes: Vec<Node> = Vec::with_capacity(self.num_variables() + self.num_constraints());
        nodes.extend(self.variables().map(Node::Variable));
        nodes.extend(self.constraints().map(Node::Constraint));
        nodes
    }

    /// Return an iterator over all edges of this graph, grouped by constraint.
    pub fn edges(&self) -> EdgeIterator {
        self.edges.iter()
    }

    /// A static check that allows to verify validity of a variable or constraint name.
    pub fn is_valid_name(name: &str) -> bool {
        ID_REGEX.is_match(name)
    }
}

/// Allow indexing `ConstraintVariableGraph` using `VariableId` objects.
impl Index<VariableId> for ConstraintVariableGraph {
    type Output = Variable;

    fn index(&self, index: VariableId) -> &Self::Output {
        self.get_variable(index)
    }
}

/// Allow indexing `ConstraintVariableGraph` using `ConstraintId` objects.
impl Index<ConstraintId> for ConstraintVariableGraph {
    type Output = Constraint;

    fn index(&self, index: ConstraintId) -> &Self::Output {
        self.get_constraint(index)
    }
}
