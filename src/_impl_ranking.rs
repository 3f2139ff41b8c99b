use crate::{ConstraintId, Node, Rank, Ranking, VariableId};

impl Ranking {
    /// **(internal)** A ranking where nothing has been resolved yet.
    pub(crate) fn new_unranked(num_variables: usize, num_constraints: usize) -> Ranking {
        Ranking {
            variables: vec![None; num_variables],
            constraints: vec![None; num_constraints],
        }
    }

    /// The rank of the given variable, or `None` when the algorithm terminated
    /// without resolving it.
    pub fn variable_rank(&self, variable: VariableId) -> Option<Rank> {
        self.variables[variable.to_index()]
    }

    /// The rank of the given constraint, or `None` when the algorithm terminated
    /// without resolving it.
    pub fn constraint_rank(&self, constraint: ConstraintId) -> Option<Rank> {
        self.constraints[constraint.to_index()]
    }

    /// The rank of the given node.
    pub fn rank_of(&self, node: Node) -> Option<Rank> {
        match node {
            Node::Variable(variable) => self.variable_rank(variable),
            Node::Constraint(constraint) => self.constraint_rank(constraint),
        }
    }

    /// True iff every variable has a rank.
    pub fn all_variables_ranked(&self) -> bool {
        self.variables.iter().all(|it| it.is_some())
    }

    /// True iff every constraint has a rank.
    pub fn all_constraints_ranked(&self) -> bool {
        self.constraints.iter().all(|it| it.is_some())
    }

    /// The number of variables without a rank.
    pub fn num_unranked_variables(&self) -> usize {
        self.variables.iter().filter(|it| it.is_none()).count()
    }

    /// The number of constraints without a rank.
    pub fn num_unranked_constraints(&self) -> usize {
        self.constraints.iter().filter(|it| it.is_none()).count()
    }

    /// **(internal)** Assign a rank to a variable. Ranks are write-once; panics
    /// on reassignment.
    pub(crate) fn set_variable_rank(&mut self, variable: VariableId, rank: Rank) {
        let slot = &mut self.variables[variable.to_index()];
        if slot.is_some() {
            panic!("Rank of {} is already assigned.", variable);
        }
        *slot = Some(rank);
    }

    /// **(internal)** Assign a rank to a constraint. Ranks are write-once; panics
    /// on reassignment.
    pub(crate) fn set_constraint_rank(&mut self, constraint: ConstraintId, rank: Rank) {
        let slot = &mut self.constraints[constraint.to_index()];
        if slot.is_some() {
            panic!("Rank of {} is already assigned.", constraint);
        }
        *slot = Some(rank);
    }
}
