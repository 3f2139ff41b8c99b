use crate::{ConstraintId, MatchTarget, Matching, VariableId};

impl Matching {
    /// **(internal)** A matching where no constraint has a target yet.
    pub(crate) fn new_unmatched(num_constraints: usize) -> Matching {
        Matching {
            targets: vec![None; num_constraints],
        }
    }

    /// The number of constraints this matching was built for.
    pub fn num_constraints(&self) -> usize {
        self.targets.len()
    }

    /// The target the given constraint was matched to, or `None` when the
    /// algorithm terminated before reaching it.
    pub fn get_target(&self, constraint: ConstraintId) -> Option<MatchTarget> {
        self.targets[constraint.to_index()]
    }

    /// The variable the given constraint computes, or `None` when the constraint
    /// is unmatched or redundant.
    pub fn matched_variable(&self, constraint: ConstraintId) -> Option<VariableId> {
        match self.targets[constraint.to_index()] {
            Some(MatchTarget::Variable(variable)) => Some(variable),
            _ => None,
        }
    }

    /// True iff the given constraint was matched as redundant (all of its
    /// variables were already determined elsewhere).
    pub fn is_redundant(&self, constraint: ConstraintId) -> bool {
        self.targets[constraint.to_index()] == Some(MatchTarget::Redundant)
    }

    /// True iff every constraint has a target.
    pub fn is_complete(&self) -> bool {
        self.targets.iter().all(|it| it.is_some())
    }

    /// All matched `(constraint, variable)` pairs, in constraint order.
    pub fn matched_pairs(&self) -> Vec<(ConstraintId, VariableId)> {
        self.targets
            .iter()
            .enumerate()
            .filter_map(|(i, target)| match target {
                Some(MatchTarget::Variable(variable)) => {
                    Some((ConstraintId::from(i), *variable))
                }
                _ => None,
            })
            .collect()
    }

    /// All constraints matched as redundant, in constraint order.
    pub fn redundant_constraints(&self) -> Vec<ConstraintId> {
        self.targets
            .iter()
            .enumerate()
            .filter_map(|(i, target)| match target {
                Some(MatchTarget::Redundant) => Some(ConstraintId::from(i)),
                _ => None,
            })
            .collect()
    }

    /// The constraint that computes the given variable, if any.
    pub fn computing_constraint(&self, variable: VariableId) -> Option<ConstraintId> {
        self.matched_pairs()
            .into_iter()
            .find(|(_, matched)| *matched == variable)
            .map(|(constraint, _)| constraint)
    }

    /// **(internal)** Record the target of a constraint. Targets are write-once;
    /// panics on reassignment.
    pub(crate) fn set_target(&mut self, constraint: ConstraintId, target: MatchTarget) {
        let slot = &mut self.targets[constraint.to_index()];
        if slot.is_some() {
            panic!("Match target of {} is already assigned.", constraint);
        }
        *slot = Some(target);
    }
}

#[cfg(test)]
mod tests {
    use crate::{ConstraintId, MatchTarget, Matching, VariableId};

    #[test]
    fn basic_matching_test() {
        let mut matching = Matching::new_unmatched(3);
        assert_eq!(3, matching.num_constraints());
        assert!(!matching.is_complete());

        let c0 = ConstraintId::from(0);
        let c1 = ConstraintId::from(1);
        let c2 = ConstraintId::from(2);
        let v0 = VariableId::from(0);

        matching.set_target(c0, MatchTarget::Variable(v0));
        matching.set_target(c1, MatchTarget::Redundant);

        assert_eq!(Some(MatchTarget::Variable(v0)), matching.get_target(c0));
        assert_eq!(Some(v0), matching.matched_variable(c0));
        assert_eq!(None, matching.matched_variable(c1));
        assert!(matching.is_redundant(c1));
        assert!(!matching.is_redundant(c2));
        assert_eq!(None, matching.get_target(c2));

        assert_eq!(vec![(c0, v0)], matching.matched_pairs());
        assert_eq!(vec![c1], matching.redundant_constraints());
        assert_eq!(Some(c0), matching.computing_constraint(v0));
        assert_eq!(None, matching.computing_constraint(VariableId::from(1)));
    }
}
