//! The directed procedure-call graph (§4.4) and its SCC/topological-order
//! analysis, which §4.3.2 uses to schedule inter-procedural extraction.
//!
//! Nodes are stored in a dense [`slotmap::SlotMap`] rather than a
//! pointer-owning tree, and edges are plain [`NodeId`] adjacency lists — the
//! "integer-indexed node storage... allocation-free" guidance in §9, so
//! Tarjan's algorithm below never has to chase anything but `Vec` indices.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// A procedure's identity inside a [`CallGraph`]. Stable for the
    /// lifetime of the graph; never reused after removal (the graph never
    /// removes nodes).
    pub struct NodeId;
}

#[derive(Debug, Default)]
struct ProcedureNode {
    callees: Vec<NodeId>,
    callers: Vec<NodeId>,
}

/// A directed multigraph of procedure-call references.
///
/// Generic over `Id`, the host's notion of procedure identity (§4.4:
/// "Equality of procedures uses the host's symbol identity"). The extractor
/// instantiates this with whatever key it derives from the host adapter —
/// typically `(file, line, name)` — so this module stays entirely
/// independent of any particular host-language binder.
#[derive(Debug, Default)]
pub struct CallGraph<Id: Eq + std::hash::Hash + Clone> {
    nodes: SlotMap<NodeId, ProcedureNode>,
    index: FxHashMap<Id, NodeId>,
}

impl<Id: Eq + std::hash::Hash + Clone> CallGraph<Id> {
    /// An empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            index: FxHashMap::default(),
        }
    }

    /// Register `id` as a procedure, returning its (possibly pre-existing)
    /// node. Calling this twice with the same `id` returns the same
    /// [`NodeId`] rather than creating a duplicate node.
    pub fn add_procedure(&mut self, id: Id) -> NodeId {
        if let Some(&existing) = self.index.get(&id) {
            return existing;
        }
        let node = self.nodes.insert(ProcedureNode::default());
        self.index.insert(id, node);
        node
    }

    /// Look up a previously registered procedure's node, if any.
    #[must_use]
    pub fn node_of(&self, id: &Id) -> Option<NodeId> {
        self.index.get(id).copied()
    }

    /// Record that `caller` invokes `callee`. Both must already be
    /// registered via [`Self::add_procedure`]. Duplicate edges are recorded
    /// once: the graph is a multigraph in principle (§4.4) but call-site
    /// multiplicity does not affect any SCC/topological-order query, so
    /// de-duplicating keeps traversal linear in edge count.
    pub fn add_edge(&mut self, caller: NodeId, callee: NodeId) {
        if let Some(node) = self.nodes.get_mut(caller) {
            if !node.callees.contains(&callee) {
                node.callees.push(callee);
            }
        }
        if let Some(node) = self.nodes.get_mut(callee) {
            if !node.callers.contains(&caller) {
                node.callers.push(caller);
            }
        }
    }

    /// All procedures that directly call `p`.
    #[must_use]
    pub fn callers(&self, p: NodeId) -> &[NodeId] {
        self.nodes.get(p).map_or(&[], |n| n.callers.as_slice())
    }

    /// All procedures `p` directly calls.
    #[must_use]
    pub fn callees(&self, p: NodeId) -> &[NodeId] {
        self.nodes.get(p).map_or(&[], |n| n.callees.as_slice())
    }

    /// All registered node ids, in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys()
    }

    /// `true` if `p` is directly or mutually recursive: either it has a
    /// self-loop, or it belongs to a strongly connected component of size
    /// greater than one (§4.3.2).
    #[must_use]
    pub fn is_recursive(&self, p: NodeId) -> bool {
        if self.callees(p).contains(&p) {
            return true;
        }
        self.find_sccs()
            .into_iter()
            .any(|scc| scc.len() > 1 && scc.contains(&p))
    }

    /// Nodes with no incoming edges.
    #[must_use]
    pub fn find_entry_points(&self) -> Vec<NodeId> {
        self.nodes
            .keys()
            .filter(|&id| self.callers(id).is_empty())
            .collect()
    }

    /// Nodes with no outgoing edges.
    #[must_use]
    pub fn find_leaves(&self) -> Vec<NodeId> {
        self.nodes
            .keys()
            .filter(|&id| self.callees(id).is_empty())
            .collect()
    }

    /// Partition the graph into strongly connected components via an
    /// iterative Tarjan's algorithm (§4.4, §9: "Tarjan's algorithm and
    /// subsequent SCC traversal are straightforward and allocation-free").
    ///
    /// Implemented with an explicit frame stack rather than recursion: call
    /// graphs built from real codebases can be deep enough (a long chain of
    /// thin wrapper methods) that a recursive walk risks overflowing the
    /// stack, which the design notes call out as the one spot worth taking
    /// seriously.
    #[must_use]
    pub fn find_sccs(&self) -> Vec<Vec<NodeId>> {
        let mut state = TarjanState::new(self.nodes.len());
        let mut sccs = Vec::new();

        for start in self.nodes.keys() {
            if state.index_of(start).is_some() {
                continue;
            }
            self.tarjan_from(start, &mut state, &mut sccs);
        }

        sccs
    }

    fn tarjan_from(&self, start: NodeId, state: &mut TarjanState, sccs: &mut Vec<Vec<NodeId>>) {
        let mut frames = vec![Frame { node: start, child_cursor: 0 }];
        state.visit(start);

        while let Some(frame) = frames.last_mut() {
            let node = frame.node;
            let children = self.callees(node);

            if frame.child_cursor < children.len() {
                let child = children[frame.child_cursor];
                frame.child_cursor += 1;

                if state.index_of(child).is_none() {
                    state.visit(child);
                    frames.push(Frame { node: child, child_cursor: 0 });
                } else if state.on_stack(child) {
                    state.lower_link(node, child);
                }
                continue;
            }

            // All children processed: this node is done.
            if state.low_link_of(node) == state.index_of(node) {
                sccs.push(state.pop_component(node));
            }
            frames.pop();

            if let Some(parent_frame) = frames.last() {
                state.lower_link(parent_frame.node, node);
            }
        }
    }

    /// A full topological order over every node, or `None` if the graph
    /// contains any cycle — including a single self-looping node (§4.4:
    /// "`topological_sort() → Option<order>` (none if cycles)").
    #[must_use]
    pub fn topological_sort(&self) -> Option<Vec<NodeId>> {
        let mut in_degree: FxHashMap<NodeId, usize> = self
            .nodes
            .keys()
            .map(|id| (id, self.callers(id).len()))
            .collect();

        let mut ready: Vec<NodeId> = in_degree
            .iter()
            .filter(|&(_, &deg)| deg == 0)
            .map(|(&id, _)| id)
            .collect();
        ready.sort_unstable_by_key(slotmap_sort_key);

        let mut order = Vec::with_capacity(self.nodes.len());
        let mut frontier = ready;

        while let Some(node) = frontier.pop() {
            order.push(node);
            let mut newly_ready = Vec::new();
            for &callee in self.callees(node) {
                if let Some(deg) = in_degree.get_mut(&callee) {
                    *deg -= 1;
                    if *deg == 0 {
                        newly_ready.push(callee);
                    }
                }
            }
            newly_ready.sort_unstable_by_key(slotmap_sort_key);
            frontier.extend(newly_ready);
        }

        if order.len() == self.nodes.len() {
            Some(order)
        } else {
            None
        }
    }

    /// Reverse topological order over the SCC condensation: callees (and
    /// whole cyclic components) appear before their callers, letting the
    /// extractor analyze dependencies first (§4.3.2). Unlike
    /// [`Self::topological_sort`], this always succeeds — a graph with
    /// cycles simply groups each cycle into one component.
    #[must_use]
    pub fn scc_analysis_order(&self) -> Vec<Vec<NodeId>> {
        let sccs = self.find_sccs();
        let mut scc_of: FxHashMap<NodeId, usize> = FxHashMap::default();
        for (i, scc) in sccs.iter().enumerate() {
            for &node in scc {
                scc_of.insert(node, i);
            }
        }

        let mut condensation_callees: Vec<Vec<usize>> = vec![Vec::new(); sccs.len()];
        for (i, scc) in sccs.iter().enumerate() {
            for &node in scc {
                for &callee in self.callees(node) {
                    if let Some(&j) = scc_of.get(&callee) {
                        if j != i && !condensation_callees[i].contains(&j) {
                            condensation_callees[i].push(j);
                        }
                    }
                }
            }
        }

        // Post-order DFS over the condensation gives callees before callers.
        let mut visited = vec![false; sccs.len()];
        let mut order = Vec::with_capacity(sccs.len());
        for i in 0..sccs.len() {
            if !visited[i] {
                condensation_postorder(i, &condensation_callees, &mut visited, &mut order);
            }
        }

        order.into_iter().map(|i| sccs[i].clone()).collect()
    }
}

fn condensation_postorder(i: usize, edges: &[Vec<usize>], visited: &mut [bool], order: &mut Vec<usize>) {
    visited[i] = true;
    for &j in &edges[i] {
        if !visited[j] {
            condensation_postorder(j, edges, visited, order);
        }
    }
    order.push(i);
}

fn slotmap_sort_key(id: &NodeId) -> slotmap::KeyData {
    use slotmap::Key;
    id.data()
}

struct Frame {
    node: NodeId,
    child_cursor: usize,
}

struct TarjanState {
    indices: FxHashMap<NodeId, usize>,
    low_links: FxHashMap<NodeId, usize>,
    on_stack: FxHashMap<NodeId, bool>,
    stack: Vec<NodeId>,
    next_index: usize,
}

impl TarjanState {
    fn new(capacity: usize) -> Self {
        Self {
            indices: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            low_links: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            on_stack: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            stack: Vec::new(),
            next_index: 0,
        }
    }

    fn visit(&mut self, node: NodeId) {
        self.indices.insert(node, self.next_index);
        self.low_links.insert(node, self.next_index);
        self.next_index += 1;
        self.stack.push(node);
        self.on_stack.insert(node, true);
    }

    fn index_of(&self, node: NodeId) -> Option<usize> {
        self.indices.get(&node).copied()
    }

    fn low_link_of(&self, node: NodeId) -> Option<usize> {
        self.low_links.get(&node).copied()
    }

    fn on_stack(&self, node: NodeId) -> bool {
        self.on_stack.get(&node).copied().unwrap_or(false)
    }

    fn lower_link(&mut self, node: NodeId, candidate: NodeId) {
        if let (Some(&candidate_low), Some(&candidate_index)) =
            (self.low_links.get(&candidate), self.indices.get(&candidate))
        {
            let from_low_link = if self.on_stack(candidate) { candidate_index } else { candidate_low };
            if let Some(current) = self.low_links.get_mut(&node) {
                *current = (*current).min(from_low_link.min(candidate_low));
            }
        }
    }

    fn pop_component(&mut self, root: NodeId) -> Vec<NodeId> {
        let mut component = Vec::new();
        while let Some(node) = self.stack.pop() {
            self.on_stack.insert(node, false);
            component.push(node);
            if node == root {
                break;
            }
        }
        component
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acyclic_graph_has_singleton_sccs_and_a_full_topo_order() {
        let mut graph: CallGraph<&str> = CallGraph::new();
        let a = graph.add_procedure("a");
        let b = graph.add_procedure("b");
        let c = graph.add_procedure("c");
        graph.add_edge(a, b);
        graph.add_edge(b, c);

        assert_eq!(graph.find_sccs().len(), 3);
        let order = graph.topological_sort().expect("acyclic graph sorts");
        let pos = |n: NodeId| order.iter().position(|&x| x == n).unwrap();
        assert!(pos(a) < pos(b));
        assert!(pos(b) < pos(c));
        assert!(!graph.is_recursive(a));
    }

    #[test]
    fn self_loop_blocks_a_full_topological_sort() {
        let mut graph: CallGraph<&str> = CallGraph::new();
        let a = graph.add_procedure("a");
        graph.add_edge(a, a);

        assert!(graph.topological_sort().is_none());
        assert!(graph.is_recursive(a));
    }

    #[test]
    fn mutual_recursion_forms_one_scc() {
        let mut graph: CallGraph<&str> = CallGraph::new();
        let a = graph.add_procedure("a");
        let b = graph.add_procedure("b");
        graph.add_edge(a, b);
        graph.add_edge(b, a);

        let sccs = graph.find_sccs();
        assert_eq!(sccs.len(), 1);
        assert_eq!(sccs[0].len(), 2);
        assert!(graph.is_recursive(a));
        assert!(graph.is_recursive(b));
    }

    #[test]
    fn analysis_order_puts_callees_before_callers() {
        let mut graph: CallGraph<&str> = CallGraph::new();
        let caller = graph.add_procedure("caller");
        let callee = graph.add_procedure("callee");
        graph.add_edge(caller, callee);

        let order = graph.scc_analysis_order();
        let flat: Vec<NodeId> = order.into_iter().flatten().collect();
        let pos = |n: NodeId| flat.iter().position(|&x| x == n).unwrap();
        assert!(pos(callee) < pos(caller));
    }

    #[test]
    fn entry_points_and_leaves_are_identified() {
        let mut graph: CallGraph<&str> = CallGraph::new();
        let a = graph.add_procedure("a");
        let b = graph.add_procedure("b");
        graph.add_edge(a, b);

        assert_eq!(graph.find_entry_points(), vec![a]);
        assert_eq!(graph.find_leaves(), vec![b]);
    }
}
