//! Strongly connected components and the condensation DAG.
//!
//! Tarjan's algorithm driven by an explicit work stack instead of recursion
//! (the formulation in Knuth, *The Stanford GraphBase*, pp. 512-519), so
//! arbitrarily deep graphs never touch the native call stack.
//!
//! Components close in reverse topological order. Reversing the closing
//! sequence yields a topological order of the condensation directly; no
//! separate sort is performed.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::graph::{CsrDigraph, DirectedGraph, NodeId};

/// Rank of a node whose component has been closed.
const CLOSED: usize = usize::MAX;

/// Per-node DFS record.
#[derive(Debug, Clone)]
struct Element {
    id: NodeId,
    /// Record index of the DFS tree parent.
    parent: Option<usize>,
    rank: usize,
    /// Record index of the lowest-ranked node reachable in one non-tree step.
    min: usize,
    /// Next unconsumed position in `out_neighbors(id)`.
    cursor: usize,
    component: Option<NodeId>,
}

/// Iterative Tarjan SCC visitor over a borrowed [`DirectedGraph`].
///
/// A component is identified by its DFS root: the first node of the
/// component discovered by the search.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `perform_dfs` | \(O(n + m)\) | Expected, one hash lookup per edge |
/// | `cc_edges` | \(O(n + m)\) | Deduplicated per source component |
/// | `cc_sorted` | \(O(n)\) | Single scan of the membership list |
pub struct SccCondenser<'g, G: DirectedGraph + ?Sized> {
    graph: &'g G,
    rank: usize,
    slots: HashMap<NodeId, usize>,
    records: Vec<Element>,
    stack: Vec<usize>,
    /// `(component, node)` pairs, grouped by component, in topological order once the DFS completes.
    membership: Vec<(NodeId, NodeId)>,
    performed: bool,
}

impl<'g, G: DirectedGraph + ?Sized> SccCondenser<'g, G> {
    /// Creates a visitor; no work happens until [`perform_dfs`](Self::perform_dfs).
    pub fn new(graph: &'g G) -> Self {
        let n = graph.node_count();
        Self {
            graph,
            rank: 0,
            slots: HashMap::with_capacity(n),
            records: Vec::with_capacity(n),
            stack: Vec::new(),
            membership: Vec::with_capacity(n),
            performed: false,
        }
    }

    /// Runs the DFS from every unvisited node. Calling it again is a no-op.
    pub fn perform_dfs(&mut self) {
        if self.performed {
            return;
        }
        let graph = self.graph;
        for v in graph.nodes() {
            if self.slots.contains_key(&v) {
                continue;
            }
            let mut current = Some(self.make_active(v, None));
            while let Some(slot) = current {
                current = self.explore(slot);
            }
        }
        self.membership.reverse();
        self.performed = true;
    }

    /// Makes `v` active: assigns its rank and pushes it on the active stack.
    fn make_active(&mut self, v: NodeId, parent: Option<usize>) -> usize {
        self.rank += 1;
        let slot = self.records.len();
        self.records.push(Element {
            id: v,
            parent,
            rank: self.rank,
            min: slot,
            cursor: 0,
            component: None,
        });
        self.slots.insert(v, slot);
        self.stack.push(slot);
        slot
    }

    /// Explores one step from the current record and returns the next current record.
    fn explore(&mut self, v: usize) -> Option<usize> {
        let graph = self.graph;
        let out = graph.out_neighbors(self.records[v].id);
        let cursor = self.records[v].cursor;

        if let Some(&u) = out.get(cursor) {
            self.records[v].cursor += 1;
            return match self.slots.get(&u) {
                Some(&seen) => {
                    let v_min = self.records[v].min;
                    if self.records[seen].rank < self.records[v_min].rank {
                        self.records[v].min = seen;
                    }
                    Some(v)
                }
                None => Some(self.make_active(u, Some(v))),
            };
        }

        // Every edge of v is tagged, so v matures.
        let parent = self.records[v].parent;
        if self.records[v].min == v {
            self.finish(v);
        } else if let Some(p) = parent {
            // Make v.min visible from the parent.
            let v_min = self.records[v].min;
            let p_min = self.records[p].min;
            if self.records[v_min].rank < self.records[p_min].rank {
                self.records[p].min = v_min;
            }
        }
        parent
    }

    /// Pops `v` and everything above it off the active stack as one component.
    fn finish(&mut self, v: usize) {
        let root = self.records[v].id;
        while let Some(t) = self.stack.pop() {
            let record = &mut self.records[t];
            record.rank = CLOSED;
            record.component = Some(root);
            self.membership.push((root, record.id));
            if t == v {
                break;
            }
        }
    }

    /// `(component, node)` pairs grouped by component in topological order.
    ///
    /// Empty until [`perform_dfs`](Self::perform_dfs) has run.
    pub fn membership(&self) -> &[(NodeId, NodeId)] {
        &self.membership
    }

    /// Component (DFS root id) containing `node`, if the node was visited.
    pub fn component_of(&self, node: NodeId) -> Option<NodeId> {
        self.slots
            .get(&node)
            .and_then(|&slot| self.records[slot].component)
    }

    /// Condensation edges `(cc_from, cc_to)`, at most one per ordered pair.
    ///
    /// Relies on `membership` keeping each component contiguous: the
    /// per-source "seen" set is reset whenever the component changes.
    pub fn cc_edges(&self) -> Vec<(NodeId, NodeId)> {
        let mut edges = Vec::new();
        let mut discovered: HashSet<NodeId> = HashSet::new();
        let mut current = None;

        for &(cc_from, v) in &self.membership {
            if current != Some(cc_from) {
                current = Some(cc_from);
                discovered.clear();
                discovered.insert(cc_from);
            }
            for &u in self.graph.out_neighbors(v) {
                let Some(cc_to) = self.component_of(u) else {
                    continue;
                };
                if discovered.insert(cc_to) {
                    edges.push((cc_from, cc_to));
                }
            }
        }
        edges
    }

    /// Distinct components in topological order.
    pub fn cc_sorted(&self) -> Vec<NodeId> {
        let mut sorted = Vec::new();
        let mut current = None;
        for &(cc, _) in &self.membership {
            if current != Some(cc) {
                current = Some(cc);
                sorted.push(cc);
            }
        }
        sorted
    }

    /// Runs the DFS if needed and packs the result into a [`Condensation`].
    pub fn into_condensation(mut self) -> Condensation {
        self.perform_dfs();

        let representatives = self.cc_sorted();
        let index: HashMap<NodeId, usize> = representatives
            .iter()
            .enumerate()
            .map(|(i, &cc)| (cc, i))
            .collect();

        let mut member_offsets = Vec::with_capacity(representatives.len() + 1);
        let mut members = Vec::with_capacity(self.membership.len());
        let mut node_component = HashMap::with_capacity(self.membership.len());
        let mut current = None;
        for &(cc, v) in &self.membership {
            if current != Some(cc) {
                current = Some(cc);
                member_offsets.push(members.len());
            }
            members.push(v);
            node_component.insert(v, index[&cc]);
        }
        member_offsets.push(members.len());

        let dag_edges: Vec<(usize, usize)> = self
            .cc_edges()
            .into_iter()
            .map(|(from, to)| (index[&from], index[&to]))
            .collect();
        let dag = CsrDigraph::from_edges(representatives.len(), &dag_edges);

        debug!(
            nodes = members.len(),
            components = representatives.len(),
            dag_edges = dag.edge_count(),
            "condensed graph"
        );

        Condensation {
            representatives,
            member_offsets,
            members,
            node_component,
            dag,
        }
    }
}

/// The SCC partition of a graph and its condensation DAG.
///
/// Components are indexed `0..len()` in topological order, so every DAG edge
/// `i -> j` satisfies `i < j`.
#[derive(Debug, Clone)]
pub struct Condensation {
    representatives: Vec<NodeId>,
    member_offsets: Vec<usize>,
    members: Vec<NodeId>,
    node_component: HashMap<NodeId, usize>,
    dag: CsrDigraph,
}

impl Condensation {
    /// Condenses `graph`.
    pub fn from_graph<G: DirectedGraph + ?Sized>(graph: &G) -> Self {
        SccCondenser::new(graph).into_condensation()
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.representatives.len()
    }

    /// Returns `true` if the graph had no nodes.
    pub fn is_empty(&self) -> bool {
        self.representatives.is_empty()
    }

    /// Representative (DFS root) node ids in topological order.
    pub fn topological_order(&self) -> &[NodeId] {
        &self.representatives
    }

    /// Representative node of component `component`.
    ///
    /// # Panics
    ///
    /// Panics if `component >= len()`.
    pub fn representative(&self, component: usize) -> NodeId {
        self.representatives[component]
    }

    /// Member nodes of component `component`.
    ///
    /// # Panics
    ///
    /// Panics if `component >= len()`.
    pub fn members(&self, component: usize) -> &[NodeId] {
        &self.members[self.member_offsets[component]..self.member_offsets[component + 1]]
    }

    /// Component index of `node`.
    pub fn component_of(&self, node: NodeId) -> Option<usize> {
        self.node_component.get(&node).copied()
    }

    /// The condensation DAG over component indices.
    pub fn dag(&self) -> &CsrDigraph {
        &self.dag
    }

    /// Checks that every DAG edge points forward in the component order and
    /// that no component has an edge to itself.
    pub fn is_topologically_ordered(&self) -> bool {
        self.dag.edges().all(|(from, to)| from < to)
    }
}
