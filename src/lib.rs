//! Structural analysis toolkit for model-based fault diagnosis.
//!
//! A diagnosis model is viewed here purely through its structure: a bipartite graph
//! whose nodes are *constraints* (equations) and *variables*, with an edge wherever
//! a constraint references a variable. Structural analysis determines, from this
//! topology alone, which variable each constraint can be used to compute, and which
//! constraints are redundant and therefore usable as consistency checks (analytical
//! redundancy relations). The algorithms follow M. Blanke, M. Kinnaert, J. Lunze and
//! M. Staroswiecki, *Diagnosis and Fault Tolerant Control*, Springer, 2006.
//!
//! The crate is built from three pieces, in dependency order:
//!
//!  - [ConstraintVariableGraph] stores the bipartite constraint-variable graph
//!    together with the known/unknown classification of every variable.
//!  - [RankingMatcher] runs the ranking algorithm (Blanke et al., p. 142) and
//!    produces a [Ranking] plus a [Matching] of constraints to the variables they
//!    compute.
//!  - [CausalGraph] orients every edge of the bipartite graph using a matching
//!    (Blanke et al., p. 125), which yields a causal evaluation order and flags
//!    the redundant constraints.
//!
//! ```rust
//! use structural_fdi::{CausalGraph, ConstraintVariableGraph, RankingMatcher};
//! use std::convert::TryFrom;
//!
//! let model = ConstraintVariableGraph::try_from(
//!     "
//!     unknown h
//!     unknown qi
//!     known u
//!     known y
//!     c2: qi, u
//!     c4: h, y
//!     ",
//! )
//! .unwrap();
//!
//! let (ranking, matching) = RankingMatcher::find_matching(&model).unwrap();
//!
//! let qi = model.find_variable("qi").unwrap();
//! let c2 = model.find_constraint("c2").unwrap();
//! assert_eq!(Some(qi), matching.matched_variable(c2));
//! assert_eq!(Some(0), ranking.variable_rank(qi));
//!
//! let causal = CausalGraph::from_matching(&model, &matching);
//! assert_eq!(4, causal.num_edges());
//! ```

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use std::iter::Map;
use std::ops::Range;
use thiserror::Error;

pub mod ranking;

/// **(internal)** Utility methods shared by index-map construction.
mod util;

/// **(internal)** Utility methods for `CausalGraph`.
mod _impl_causal_graph;
/// **(internal)** `CausalGraph` to GraphViz `.dot` string.
mod _impl_causal_graph_to_dot;
/// **(internal)** Utility methods for `Constraint`.
mod _impl_constraint;
/// **(internal)** Utility methods for `ConstraintId`.
mod _impl_constraint_id;
/// **(internal)** Utility methods for `ConstraintVariableGraph`.
mod _impl_constraint_variable_graph;
/// **(internal)** `ConstraintVariableGraph` to plain-text model string.
mod _impl_constraint_variable_graph_display;
/// **(internal)** Plain-text model parser for `ConstraintVariableGraph`.
mod _impl_constraint_variable_graph_from_string;
/// **(internal)** `ConstraintVariableGraph` to GraphViz `.dot` string.
mod _impl_constraint_variable_graph_to_dot;
/// **(internal)** Utility methods for `Edge`.
mod _impl_edge;
/// **(internal)** Utility methods for `Matching`.
mod _impl_matching;
/// **(internal)** Utility methods for `Ranking`.
mod _impl_ranking;
/// **(internal)** Utility methods for `ReducedAdjacency`.
mod _impl_reduced_adjacency;
/// **(internal)** Utility methods for `Variable`.
mod _impl_variable;
/// **(internal)** Utility methods for `VariableId`.
mod _impl_variable_id;

pub use ranking::RankingMatcher;

/// A type-safe index of a `Variable` inside a `ConstraintVariableGraph`.
///
/// If needed, it can be converted into `usize` for serialisation purposes, but
/// note that such an index is only valid for the graph it came from.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct VariableId(usize);

/// A type-safe index of a `Constraint` inside a `ConstraintVariableGraph`.
///
/// The same caveats apply as for `VariableId`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ConstraintId(usize);

/// Classification of a variable inside a diagnosis model.
///
/// Known variables are measured signals or actuator inputs; unknown variables must
/// be computed from the constraints. The classification is carried by the
/// `ConstraintVariableGraph`, not by the `Variable` itself.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum VariableKind {
    Known,
    Unknown,
}

/// A variable of a diagnosis model.
///
/// Variable has a `name` which identifies it uniquely inside its model.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Variable {
    name: String,
}

/// A constraint (equation) of a diagnosis model together with the variables
/// it references.
///
/// The variable list preserves declaration order and contains no duplicates.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Constraint {
    name: String,
    variables: Vec<VariableId>,
}

/// A node of a `ConstraintVariableGraph`: the disjoint union of variables
/// and constraints.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Node {
    Variable(VariableId),
    Constraint(ConstraintId),
}

/// An undirected edge of a `ConstraintVariableGraph` connecting a constraint to
/// one variable it references.
///
/// Edges only ever connect a constraint to a variable, so the graph is bipartite
/// by construction.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Edge {
    constraint: ConstraintId,
    variable: VariableId,
}

/// A bipartite graph connecting the constraints of a diagnosis model to the
/// variables they reference.
///
/// The graph is created once from the lists of unknown variables, known variables
/// and constraints, and is read-only afterwards. Unknown variables are indexed
/// before known variables; both families keep their declaration order.
///
/// A graph can also be described using a plain-text format where each line is
/// either a variable declaration or a constraint (`#` starts a comment):
///
/// ```text
///  # Single-tank system.
///  unknown h
///  unknown qi
///  known u
///  known y
///  c2: qi, u
///  c4: h, y
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConstraintVariableGraph {
    variables: Vec<Variable>,
    kinds: Vec<VariableKind>,
    constraints: Vec<Constraint>,
    edges: Vec<Edge>,
    variable_to_index: HashMap<String, VariableId>,
    constraint_to_index: HashMap<String, ConstraintId>,
}

/// A reduced adjacency matrix of a `ConstraintVariableGraph`: rows are
/// constraints, columns are variables, and a bit is set iff the row constraint
/// references the column variable.
///
/// The companion `rows`/`columns` id lists are authoritative for interpreting
/// matrix indices; they follow the stable iteration order of the graph.
#[derive(Clone, PartialEq)]
pub struct ReducedAdjacency {
    rows: Vec<ConstraintId>,
    columns: Vec<VariableId>,
    matrix: Vec<bitvector::BitVector>,
}

/// The round of the ranking algorithm at which a node became resolvable.
///
/// Known variables always have rank 0. A rank is assigned at most once and never
/// changes afterwards.
pub type Rank = u32;

/// Rank assignment produced by `RankingMatcher`: for every variable and every
/// constraint, the round at which it was resolved, or `None` if the algorithm
/// terminated without resolving it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ranking {
    variables: Vec<Option<Rank>>,
    constraints: Vec<Option<Rank>>,
}

/// The variable a matched constraint is deemed to compute, or `Redundant` when
/// every variable of the constraint was already determined elsewhere.
///
/// A redundant constraint computes nothing new; it is an analytical redundancy
/// relation usable as a consistency check.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MatchTarget {
    Variable(VariableId),
    Redundant,
}

/// A matching produced by `RankingMatcher`: for every constraint, the target it
/// was matched to, or `None` if the algorithm terminated before reaching it.
///
/// No two constraints are ever matched to the same variable.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Matching {
    targets: Vec<Option<MatchTarget>>,
}

/// A node of a `CausalGraph`: a variable, a constraint, or the sink node that
/// terminates redundant constraints.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum CausalNode {
    Variable(VariableId),
    Constraint(ConstraintId),
    Sink,
}

/// A directed version of a `ConstraintVariableGraph` induced by a matching.
///
/// Every undirected edge appears exactly once: oriented constraint-to-variable
/// when the pair belongs to the matching (the constraint computes the variable),
/// and variable-to-constraint otherwise (the variable is an input the constraint
/// consumes). Every redundant constraint additionally gains a synthesized edge
/// into [CausalNode::Sink].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CausalGraph {
    edges: Vec<(CausalNode, CausalNode)>,
}

/// An error produced when the variable and constraint lists of a diagnosis model
/// are inconsistent. No graph is created when construction fails.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum InvalidModelError {
    #[error("Invalid model: `{name}` is not a valid identifier.")]
    InvalidName { name: String },
    #[error("Invalid model: Variable `{name}` is declared more than once.")]
    DuplicateVariable { name: String },
    #[error("Invalid model: Variable `{name}` is declared both known and unknown.")]
    ConflictingKind { name: String },
    #[error("Invalid model: Constraint `{name}` is declared more than once.")]
    DuplicateConstraint { name: String },
    #[error("Invalid model: Constraint `{constraint}` references undeclared variable `{variable}`.")]
    UndeclaredVariable { constraint: String, variable: String },
    #[error("Invalid model: Constraint `{name}` references no variables.")]
    EmptyConstraint { name: String },
}

/// An error produced when the ranking algorithm completes a round without
/// assigning any rank while unranked nodes remain on both sides.
///
/// The ranking state is a fixpoint at that point, so continuing could never
/// terminate. Typical cause is a constraint cycle among unknown variables with
/// no known-variable anchor.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("Ranking stalled after {rounds} rounds: {unranked_constraints} constraints and {unranked_variables} variables remain unranked.")]
pub struct NoProgressError {
    pub rounds: Rank,
    pub unranked_variables: usize,
    pub unranked_constraints: usize,
}

/// An iterator over all `VariableId`s of a `ConstraintVariableGraph`.
pub type VariableIdIterator = Map<Range<usize>, fn(usize) -> VariableId>;

/// An iterator over all `ConstraintId`s of a `ConstraintVariableGraph`.
pub type ConstraintIdIterator = Map<Range<usize>, fn(usize) -> ConstraintId>;

/// An iterator over all edges of a `ConstraintVariableGraph`.
pub type EdgeIterator<'a> = std::slice::Iter<'a, Edge>;

/// An iterator over all directed edges of a `CausalGraph`.
pub type CausalEdgeIterator<'a> = std::slice::Iter<'a, (CausalNode, CausalNode)>;

lazy_static! {
    /// A regular expression that describes the allowed format of variable and
    /// constraint identifiers.
    pub static ref ID_REGEX: Regex = Regex::new(r"^[a-zA-Z0-9_]+$").unwrap();
}
