//! The ranking algorithm that matches each constraint of a diagnosis model to
//! the variable it can be used to compute.
//!
//! The algorithm (Blanke et al., *Diagnosis and Fault Tolerant Control*, p. 142)
//! propagates ranks outward from the known variables in rounds. In every round,
//! a constraint with exactly one unranked variable is solved for that variable,
//! and a constraint whose variables are all ranked is marked redundant: it
//! determines nothing new and only serves as a consistency check. Ranking stops
//! as soon as either every variable or every constraint is ranked.
//!
//! This is deliberately not a maximum-matching algorithm: it is the structured,
//! explainable greedy procedure used in fault-diagnosis structural analysis, and
//! there are graph topologies where it resolves fewer nodes than an
//! augmenting-path matcher would.

use crate::{ConstraintVariableGraph, MatchTarget, Matching, NoProgressError, Ranking};

/// Aggregates the ranking-based matching algorithm for constraint-variable
/// graphs.
pub struct RankingMatcher {
    _dummy: (),
}

impl RankingMatcher {
    /// Compute a `(Ranking, Matching)` pair for the given graph.
    ///
    /// Known variables are seeded at rank 0. Each round then performs two
    /// passes over the still-unranked constraints, in constraint order:
    ///
    ///  1. A constraint with exactly one variable that was unranked at the start
    ///     of the round receives the current rank together with that variable
    ///     and is matched to it. Rounds are evaluated simultaneously: an
    ///     assignment does not change what the other constraints of the same
    ///     round see. When two constraints claim the same variable, the first
    ///     one in constraint order wins and the other falls through to the
    ///     redundancy pass.
    ///  2. A constraint with no unranked variable left (now observing the
    ///     assignments of pass 1) receives the current rank and is matched as
    ///     [MatchTarget::Redundant].
    ///
    /// The rank increments between rounds. Ranking terminates once all variables
    /// *or* all constraints are ranked; the asymmetry is intentional, so an
    /// under-determined model simply leaves the surplus variables unresolved.
    ///
    /// The function is pure: calling it twice on the same graph yields identical
    /// results.
    ///
    /// Returns [NoProgressError] when a round assigns nothing while the
    /// termination condition is unmet (for example on a constraint cycle among
    /// unknown variables with no known anchor). The ranking state can never
    /// change once that happens, so waiting longer would not help.
    pub fn find_matching(
        graph: &ConstraintVariableGraph,
    ) -> Result<(Ranking, Matching), NoProgressError> {
        let mut ranking = Ranking::new_unranked(graph.num_variables(), graph.num_constraints());
        let mut matching = Matching::new_unmatched(graph.num_constraints());

        for variable in graph.known_variables() {
            ranking.set_variable_rank(variable, 0);
        }

        let adjacency = graph.reduced_adjacency();
        let mut rank = 0;
        loop {
            let mut progressed = false;

            let ranked_at_round_start: Vec<bool> = adjacency
                .columns()
                .iter()
                .map(|variable| ranking.variable_rank(*variable).is_some())
                .collect();

            // A constraint with exactly one unranked variable can be solved for it.
            for (i, constraint) in adjacency.rows().iter().enumerate() {
                if ranking.constraint_rank(*constraint).is_some() {
                    continue;
                }
                let mut unranked_count = 0;
                let mut unranked_variable = None;
                for (j, variable) in adjacency.columns().iter().enumerate() {
                    if adjacency.is_incident(i, j) && !ranked_at_round_start[j] {
                        unranked_count += 1;
                        unranked_variable = Some(*variable);
                    }
                }
                if unranked_count == 1 {
                    let variable = unranked_variable.unwrap();
                    // An earlier constraint of this round may have claimed the
                    // variable already; the claimant keeps it and this
                    // constraint falls through to the redundancy pass.
                    if ranking.variable_rank(variable).is_none() {
                        ranking.set_variable_rank(variable, rank);
                        ranking.set_constraint_rank(*constraint, rank);
                        matching.set_target(*constraint, MatchTarget::Variable(variable));
                        progressed = true;
                    }
                }
            }

            // A constraint with no unranked variable left determines nothing new.
            // This pass observes the assignments of the pass above.
            for (i, constraint) in adjacency.rows().iter().enumerate() {
                if ranking.constraint_rank(*constraint).is_some() {
                    continue;
                }
                let any_unranked = adjacency.columns().iter().enumerate().any(|(j, variable)| {
                    adjacency.is_incident(i, j) && ranking.variable_rank(*variable).is_none()
                });
                if !any_unranked {
                    ranking.set_constraint_rank(*constraint, rank);
                    matching.set_target(*constraint, MatchTarget::Redundant);
                    progressed = true;
                }
            }

            if cfg!(feature = "print-progress") {
                println!(
                    " > Round {}: {} constraints and {} variables still unranked.",
                    rank,
                    ranking.num_unranked_constraints(),
                    ranking.num_unranked_variables()
                );
            }

            if ranking.all_variables_ranked() || ranking.all_constraints_ranked() {
                return Ok((ranking, matching));
            }
            if !progressed {
                return Err(NoProgressError {
                    rounds: rank + 1,
                    unranked_variables: ranking.num_unranked_variables(),
                    unranked_constraints: ranking.num_unranked_constraints(),
                });
            }
            rank += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::_impl_constraint_variable_graph::tests::build_tank_model;
    use crate::{ConstraintVariableGraph, MatchTarget, NoProgressError, RankingMatcher};
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn test_tank_model_matching() {
        let graph = build_tank_model();
        let (ranking, matching) = RankingMatcher::find_matching(&graph).unwrap();

        let variable = |name: &str| graph.find_variable(name).unwrap();
        let constraint = |name: &str| graph.find_constraint(name).unwrap();

        // Round 0: u and y are known, c2 solves qi, c4 solves h, c5 is redundant.
        assert_eq!(Some(0), ranking.variable_rank(variable("u")));
        assert_eq!(Some(0), ranking.variable_rank(variable("y")));
        assert_eq!(Some(0), ranking.variable_rank(variable("qi")));
        assert_eq!(Some(0), ranking.variable_rank(variable("h")));
        assert_eq!(Some(0), ranking.constraint_rank(constraint("c2")));
        assert_eq!(Some(0), ranking.constraint_rank(constraint("c4")));
        assert_eq!(Some(0), ranking.constraint_rank(constraint("c5")));

        // Round 1: c3 solves qo, c6 solves h_dot, c1 is redundant.
        assert_eq!(Some(1), ranking.variable_rank(variable("qo")));
        assert_eq!(Some(1), ranking.variable_rank(variable("h_dot")));
        assert_eq!(Some(1), ranking.constraint_rank(constraint("c3")));
        assert_eq!(Some(1), ranking.constraint_rank(constraint("c6")));
        assert_eq!(Some(1), ranking.constraint_rank(constraint("c1")));

        assert_eq!(Some(variable("qi")), matching.matched_variable(constraint("c2")));
        assert_eq!(Some(variable("h")), matching.matched_variable(constraint("c4")));
        assert_eq!(Some(variable("qo")), matching.matched_variable(constraint("c3")));
        assert_eq!(
            Some(variable("h_dot")),
            matching.matched_variable(constraint("c6"))
        );
        assert_eq!(
            Some(MatchTarget::Redundant),
            matching.get_target(constraint("c5"))
        );
        assert_eq!(
            Some(MatchTarget::Redundant),
            matching.get_target(constraint("c1"))
        );

        // Every constraint is covered once the "all constraints ranked" branch fires.
        assert!(ranking.all_constraints_ranked());
        assert!(matching.is_complete());

        // No two constraints compute the same variable.
        let matched = matching.matched_pairs();
        let distinct: HashSet<_> = matched.iter().map(|(_, variable)| *variable).collect();
        assert_eq!(matched.len(), distinct.len());
    }

    #[test]
    fn test_matching_is_idempotent() {
        let graph = build_tank_model();
        let first = RankingMatcher::find_matching(&graph).unwrap();
        let second = RankingMatcher::find_matching(&graph).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_competing_constraints_tie_break() {
        // Both constraints could solve `a`; the first one in constraint order
        // wins and the other becomes redundant in the same round.
        let mut graph = ConstraintVariableGraph::new(
            vec!["a".to_string()],
            vec!["u".to_string(), "v".to_string()],
        )
        .unwrap();
        graph.add_constraint("ca", &["u", "a"]).unwrap();
        graph.add_constraint("cb", &["v", "a"]).unwrap();

        let (ranking, matching) = RankingMatcher::find_matching(&graph).unwrap();
        let a = graph.find_variable("a").unwrap();
        let ca = graph.find_constraint("ca").unwrap();
        let cb = graph.find_constraint("cb").unwrap();

        assert_eq!(Some(a), matching.matched_variable(ca));
        assert_eq!(Some(MatchTarget::Redundant), matching.get_target(cb));
        assert_eq!(Some(0), ranking.constraint_rank(ca));
        assert_eq!(Some(0), ranking.constraint_rank(cb));
    }

    #[test]
    fn test_assignments_do_not_cascade_within_a_round() {
        // `cb` could solve `b` once `ca` has solved `a`, but rounds are
        // evaluated simultaneously, so `b` only resolves one round later.
        let mut graph = ConstraintVariableGraph::new(
            vec!["a".to_string(), "b".to_string()],
            vec!["u".to_string()],
        )
        .unwrap();
        graph.add_constraint("ca", &["u", "a"]).unwrap();
        graph.add_constraint("cb", &["a", "b"]).unwrap();

        let (ranking, matching) = RankingMatcher::find_matching(&graph).unwrap();
        let a = graph.find_variable("a").unwrap();
        let b = graph.find_variable("b").unwrap();
        let ca = graph.find_constraint("ca").unwrap();
        let cb = graph.find_constraint("cb").unwrap();

        assert_eq!(Some(0), ranking.variable_rank(a));
        assert_eq!(Some(1), ranking.variable_rank(b));
        assert_eq!(Some(a), matching.matched_variable(ca));
        assert_eq!(Some(b), matching.matched_variable(cb));
    }

    #[test]
    fn test_surplus_variables_stay_unranked() {
        // `b` has no constraint of its own: ranking stops once every constraint
        // is ranked and leaves `b` unresolved.
        let mut graph = ConstraintVariableGraph::new(
            vec!["a".to_string(), "b".to_string()],
            vec!["u".to_string()],
        )
        .unwrap();
        graph.add_constraint("c1", &["u", "a"]).unwrap();

        let (ranking, matching) = RankingMatcher::find_matching(&graph).unwrap();
        let a = graph.find_variable("a").unwrap();
        let b = graph.find_variable("b").unwrap();
        let c1 = graph.find_constraint("c1").unwrap();

        assert_eq!(Some(0), ranking.variable_rank(a));
        assert_eq!(None, ranking.variable_rank(b));
        assert_eq!(Some(a), matching.matched_variable(c1));
        assert!(ranking.all_constraints_ranked());
        assert!(!ranking.all_variables_ranked());
    }

    #[test]
    fn test_unanchored_cycle_makes_no_progress() {
        // Two constraints over the same two unknowns, with no known variable to
        // anchor the ranking: every round sees two unranked variables per
        // constraint and assigns nothing.
        let mut graph = ConstraintVariableGraph::new(
            vec!["a".to_string(), "b".to_string()],
            Vec::new(),
        )
        .unwrap();
        graph.add_constraint("ca", &["a", "b"]).unwrap();
        graph.add_constraint("cb", &["a", "b"]).unwrap();

        assert_eq!(
            Err(NoProgressError {
                rounds: 1,
                unranked_variables: 2,
                unranked_constraints: 2,
            }),
            RankingMatcher::find_matching(&graph)
        );
    }

    #[test]
    fn test_empty_and_minimal_models() {
        // No constraints at all: terminates immediately with an empty matching.
        let graph = ConstraintVariableGraph::new(
            vec!["a".to_string()],
            vec!["u".to_string()],
        )
        .unwrap();
        let (ranking, matching) = RankingMatcher::find_matching(&graph).unwrap();
        assert_eq!(0, matching.num_constraints());
        assert_eq!(Some(0), ranking.variable_rank(graph.find_variable("u").unwrap()));
        assert_eq!(None, ranking.variable_rank(graph.find_variable("a").unwrap()));

        // A single constraint over a single unknown needs no known anchor.
        let mut graph = ConstraintVariableGraph::new(vec!["a".to_string()], Vec::new()).unwrap();
        graph.add_constraint("c1", &["a"]).unwrap();
        let (ranking, matching) = RankingMatcher::find_matching(&graph).unwrap();
        let a = graph.find_variable("a").unwrap();
        let c1 = graph.find_constraint("c1").unwrap();
        assert_eq!(Some(0), ranking.variable_rank(a));
        assert_eq!(Some(0), ranking.constraint_rank(c1));
        assert_eq!(Some(a), matching.matched_variable(c1));
    }
}
