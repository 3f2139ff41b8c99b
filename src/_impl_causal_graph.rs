use crate::{
    CausalEdgeIterator, CausalGraph, CausalNode, ConstraintId, ConstraintVariableGraph,
    Matching, VariableId,
};
use fxhash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

/// Methods for constructing a `CausalGraph` from a matching.
impl CausalGraph {
    /// Orient every edge of `graph` using `matching` (Blanke et al., p. 125).
    ///
    /// A matched `(constraint, variable)` pair becomes a directed
    /// constraint-to-variable edge; every other edge is oriented
    /// variable-to-constraint. Each redundant constraint additionally gains a
    /// synthesized edge into [CausalNode::Sink].
    ///
    /// Panics if the matching was produced for a different graph (the number of
    /// constraints differs).
    pub fn from_matching(graph: &ConstraintVariableGraph, matching: &Matching) -> CausalGraph {
        assert_eq!(
            graph.num_constraints(),
            matching.num_constraints(),
            "Matching does not belong to this graph."
        );

        let matched: FxHashSet<(ConstraintId, VariableId)> =
            matching.matched_pairs().into_iter().collect();

        let redundant = matching.redundant_constraints();
        let mut edges = Vec::with_capacity(graph.num_edges() + redundant.len());
        for edge in graph.edges() {
            let constraint = CausalNode::Constraint(edge.get_constraint());
            let variable = CausalNode::Variable(edge.get_variable());
            if matched.contains(&(edge.get_constraint(), edge.get_variable())) {
                edges.push((constraint, variable));
            } else {
                edges.push((variable, constraint));
            }
        }
        for constraint in redundant {
            edges.push((CausalNode::Constraint(constraint), CausalNode::Sink));
        }

        CausalGraph { edges }
    }
}

/// Some basic utility methods for inspecting the `CausalGraph`.
impl CausalGraph {
    /// The number of directed edges in this graph.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Return an iterator over all directed `(source, target)` edges.
    pub fn edges(&self) -> CausalEdgeIterator {
        self.edges.iter()
    }

    /// True iff this graph contains the directed edge `source -> target`.
    pub fn contains_edge(&self, source: CausalNode, target: CausalNode) -> bool {
        self.edges.contains(&(source, target))
    }

    /// All direct successors of the given node, in edge order.
    pub fn successors(&self, node: CausalNode) -> Vec<CausalNode> {
        self.edges
            .iter()
            .filter(|(source, _)| *source == node)
            .map(|(_, target)| *target)
            .collect()
    }

    /// All direct predecessors of the given node, in edge order.
    pub fn predecessors(&self, node: CausalNode) -> Vec<CausalNode> {
        self.edges
            .iter()
            .filter(|(_, target)| *target == node)
            .map(|(source, _)| *source)
            .collect()
    }

    /// Constraints that only check consistency: those pointing into the sink.
    pub fn redundant_constraints(&self) -> Vec<ConstraintId> {
        self.edges
            .iter()
            .filter_map(|(source, target)| match (source, target) {
                (CausalNode::Constraint(constraint), CausalNode::Sink) => Some(*constraint),
                _ => None,
            })
            .collect()
    }

    /// A topological order of every node touched by an edge: the order in which
    /// constraints can be evaluated and variables become available.
    ///
    /// Returns `Err` when the graph contains a cycle (possible when the matching
    /// was not produced by the ranking algorithm). Nodes with no incident edges
    /// do not appear in the result.
    pub fn computation_order(&self) -> Result<Vec<CausalNode>, String> {
        let mut nodes: Vec<CausalNode> = Vec::new();
        let mut index_of: FxHashMap<CausalNode, usize> = FxHashMap::default();
        for (source, target) in &self.edges {
            for node in [source, target] {
                if !index_of.contains_key(node) {
                    index_of.insert(*node, nodes.len());
                    nodes.push(*node);
                }
            }
        }

        let mut in_degree = vec![0usize; nodes.len()];
        let mut successors: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
        for (source, target) in &self.edges {
            let source = index_of[source];
            let target = index_of[target];
            successors[source].push(target);
            in_degree[target] += 1;
        }

        let mut queue: VecDeque<usize> = (0..nodes.len())
            .filter(|node| in_degree[*node] == 0)
            .collect();
        let mut order = Vec::with_capacity(nodes.len());
        while let Some(node) = queue.pop_front() {
            order.push(nodes[node]);
            for successor in &successors[node] {
                in_degree[*successor] -= 1;
                if in_degree[*successor] == 0 {
                    queue.push_back(*successor);
                }
            }
        }

        if order.len() != nodes.len() {
            return Err("Cycle detected in causal graph.".to_string());
        }
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use crate::_impl_constraint_variable_graph::tests::build_tank_model;
    use crate::{
        CausalGraph, CausalNode, ConstraintVariableGraph, MatchTarget, Matching, RankingMatcher,
    };

    #[test]
    fn test_tank_model_causal_graph() {
        let graph = build_tank_model();
        let (_, matching) = RankingMatcher::find_matching(&graph).unwrap();
        let causal = CausalGraph::from_matching(&graph, &matching);

        let variable = |name: &str| CausalNode::Variable(graph.find_variable(name).unwrap());
        let constraint = |name: &str| CausalNode::Constraint(graph.find_constraint(name).unwrap());

        // 13 oriented incidence edges plus two synthesized sink edges.
        assert_eq!(15, causal.num_edges());

        // Matched edges point from the constraint to the variable it computes.
        assert!(causal.contains_edge(constraint("c2"), variable("qi")));
        assert!(causal.contains_edge(constraint("c4"), variable("h")));
        assert!(causal.contains_edge(constraint("c3"), variable("qo")));
        assert!(causal.contains_edge(constraint("c6"), variable("h_dot")));

        // Unmatched edges point from the consumed variable to the constraint.
        assert!(causal.contains_edge(variable("u"), constraint("c2")));
        assert!(causal.contains_edge(variable("y"), constraint("c4")));
        assert!(causal.contains_edge(variable("h"), constraint("c3")));
        assert!(causal.contains_edge(variable("h"), constraint("c6")));
        assert!(causal.contains_edge(variable("h_dot"), constraint("c1")));
        assert!(causal.contains_edge(variable("qi"), constraint("c1")));
        assert!(causal.contains_edge(variable("qo"), constraint("c1")));

        // Redundant constraints terminate in the sink.
        assert!(causal.contains_edge(constraint("c1"), CausalNode::Sink));
        assert!(causal.contains_edge(constraint("c5"), CausalNode::Sink));
        assert_eq!(
            vec![
                graph.find_constraint("c1").unwrap(),
                graph.find_constraint("c5").unwrap()
            ],
            causal.redundant_constraints()
        );

        // Every undirected edge appears in exactly one orientation.
        for edge in graph.edges() {
            let c = CausalNode::Constraint(edge.get_constraint());
            let v = CausalNode::Variable(edge.get_variable());
            assert!(causal.contains_edge(c, v) != causal.contains_edge(v, c));
        }

        assert_eq!(
            vec![variable("u"), variable("y")],
            causal.predecessors(constraint("c5"))
        );
        assert_eq!(vec![CausalNode::Sink], causal.successors(constraint("c5")));
    }

    #[test]
    fn test_tank_model_computation_order() {
        let graph = build_tank_model();
        let (_, matching) = RankingMatcher::find_matching(&graph).unwrap();
        let causal = CausalGraph::from_matching(&graph, &matching);

        let order = causal.computation_order().unwrap();
        // All 12 graph nodes touch an edge, plus the sink.
        assert_eq!(13, order.len());

        let position = |node: CausalNode| order.iter().position(|it| *it == node).unwrap();
        let variable = |name: &str| CausalNode::Variable(graph.find_variable(name).unwrap());
        let constraint = |name: &str| CausalNode::Constraint(graph.find_constraint(name).unwrap());

        // Inputs precede the constraints that consume them, which precede the
        // variables they compute.
        assert!(position(variable("u")) < position(constraint("c2")));
        assert!(position(constraint("c2")) < position(variable("qi")));
        assert!(position(variable("y")) < position(constraint("c4")));
        assert!(position(constraint("c4")) < position(variable("h")));
        assert!(position(variable("h")) < position(constraint("c3")));
        assert!(position(constraint("c3")) < position(variable("qo")));
        assert!(position(variable("qo")) < position(constraint("c1")));
        assert!(position(constraint("c1")) < position(CausalNode::Sink));
    }

    #[test]
    fn test_cyclic_matching_is_reported() {
        // A hand-made matching that creates `a -> cb -> b -> ca -> a`. The
        // ranking algorithm never produces one, but `from_matching` accepts any
        // matching and the cycle must surface in `computation_order`.
        let mut graph = ConstraintVariableGraph::new(
            vec!["a".to_string(), "b".to_string()],
            Vec::new(),
        )
        .unwrap();
        graph.add_constraint("ca", &["a", "b"]).unwrap();
        graph.add_constraint("cb", &["a", "b"]).unwrap();

        let a = graph.find_variable("a").unwrap();
        let b = graph.find_variable("b").unwrap();
        let ca = graph.find_constraint("ca").unwrap();
        let cb = graph.find_constraint("cb").unwrap();

        let mut matching = Matching::new_unmatched(graph.num_constraints());
        matching.set_target(ca, MatchTarget::Variable(a));
        matching.set_target(cb, MatchTarget::Variable(b));

        let causal = CausalGraph::from_matching(&graph, &matching);
        assert_eq!(4, causal.num_edges());
        assert!(causal.contains_edge(CausalNode::Constraint(ca), CausalNode::Variable(a)));
        assert!(causal.contains_edge(CausalNode::Variable(b), CausalNode::Constraint(ca)));
        assert_eq!(
            Err("Cycle detected in causal graph.".to_string()),
            causal.computation_order()
        );
    }

    #[test]
    #[should_panic]
    fn test_foreign_matching_is_rejected() {
        let graph = build_tank_model();
        let matching = Matching::new_unmatched(2);
        CausalGraph::from_matching(&graph, &matching);
    }
}
