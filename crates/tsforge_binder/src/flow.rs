//! Control flow graph.
//!
//! Flow nodes are stored in an arena owned by [`FlowGraph`] and point
//! *backwards* at their antecedents. The binder records, for each
//! narrowable reference, the flow node that was current when the reference
//! was bound; a checker walks antecedents from there.
//!
//! Branch and loop labels are built through a [`FlowLabel`] handle:
//! antecedents are added while the label is open and the label is frozen by
//! [`FlowGraph::finish_flow_label`]. Loop labels are never frozen because
//! back edges are added after the loop body has already used the label as
//! its current flow.

use bitflags::bitflags;
use tsforge_ast::NodeId;

/// Index of a flow node in its [`FlowGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlowNodeId(pub u32);

impl FlowNodeId {
    /// The single unreachable node. Nothing flows out of it.
    pub const UNREACHABLE: FlowNodeId = FlowNodeId(0);
    /// Unreachable, and the unreachable-code diagnostic was already issued.
    pub const REPORTED_UNREACHABLE: FlowNodeId = FlowNodeId(1);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn is_unreachable(self) -> bool {
        self == Self::UNREACHABLE || self == Self::REPORTED_UNREACHABLE
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FlowNodeFlags: u8 {
        const NONE       = 0;
        /// Some label or node has this node as an antecedent.
        const REFERENCED = 1 << 0;
        /// Referenced more than once.
        const SHARED     = 1 << 1;
        /// A branch label that no longer accepts antecedents.
        const FROZEN     = 1 << 2;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowLabelKind {
    Branch,
    Loop,
}

/// A node of the control flow graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowNode {
    Unreachable,
    /// Entry of a function, source file or other control flow container.
    Start { container: Option<NodeId> },
    /// Join point of several paths.
    Label { kind: FlowLabelKind, antecedents: Vec<FlowNodeId> },
    /// An assignment to a reference, a variable initialization, or a
    /// `for-in`/`for-of` iteration variable.
    Assignment { node: NodeId, antecedent: FlowNodeId },
    /// The condition evaluated to `assume_true`.
    Condition { assume_true: bool, expression: NodeId, antecedent: FlowNodeId },
    /// Entry to the case clauses `clause_start..clause_end` of a switch.
    SwitchClause { switch_statement: NodeId, clause_start: u32, clause_end: u32, antecedent: FlowNodeId },
    /// `x.push(...)`, `x.unshift(...)` or `x[n] = ...` on an evolving array.
    ArrayMutation { node: NodeId, antecedent: FlowNodeId },
    /// A call that may narrow through an assertion signature.
    Call { node: NodeId, antecedent: FlowNodeId },
    /// Entry to a `finally` block.
    PreFinally { antecedent: FlowNodeId, lock: u32 },
    /// Exit from a `finally` block along one of the recorded edges.
    AfterFinally { antecedent: FlowNodeId, lock: u32 },
}

impl FlowNode {
    /// Direct predecessors.
    pub fn antecedents(&self) -> &[FlowNodeId] {
        match self {
            FlowNode::Unreachable | FlowNode::Start { .. } => &[],
            FlowNode::Label { antecedents, .. } => antecedents,
            FlowNode::Assignment { antecedent, .. }
            | FlowNode::Condition { antecedent, .. }
            | FlowNode::SwitchClause { antecedent, .. }
            | FlowNode::ArrayMutation { antecedent, .. }
            | FlowNode::Call { antecedent, .. }
            | FlowNode::PreFinally { antecedent, .. }
            | FlowNode::AfterFinally { antecedent, .. } => std::slice::from_ref(antecedent),
        }
    }
}

/// Handle to a label under construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowLabel {
    id: FlowNodeId,
    kind: FlowLabelKind,
}

impl FlowLabel {
    #[inline]
    pub fn id(self) -> FlowNodeId {
        self.id
    }

    #[inline]
    pub fn kind(self) -> FlowLabelKind {
        self.kind
    }
}

/// Arena of flow nodes for one source file.
#[derive(Debug, Clone)]
pub struct FlowGraph {
    nodes: Vec<FlowNode>,
    flags: Vec<FlowNodeFlags>,
    next_finally_lock: u32,
}

impl Default for FlowGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowGraph {
    pub fn new() -> Self {
        Self {
            nodes: vec![FlowNode::Unreachable, FlowNode::Unreachable],
            flags: vec![FlowNodeFlags::NONE, FlowNodeFlags::NONE],
            next_finally_lock: 0,
        }
    }

    fn push(&mut self, node: FlowNode) -> FlowNodeId {
        let id = FlowNodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        self.flags.push(FlowNodeFlags::NONE);
        id
    }

    /// Mark `id` as an antecedent of some other node.
    fn reference(&mut self, id: FlowNodeId) {
        let flags = &mut self.flags[id.index()];
        if flags.contains(FlowNodeFlags::REFERENCED) {
            flags.insert(FlowNodeFlags::SHARED);
        }
        flags.insert(FlowNodeFlags::REFERENCED);
    }

    #[inline]
    pub fn node(&self, id: FlowNodeId) -> &FlowNode {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn flags(&self, id: FlowNodeId) -> FlowNodeFlags {
        self.flags[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Every node except the two unreachable sentinels, in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = (FlowNodeId, &FlowNode)> + '_ {
        self.nodes.iter().enumerate().skip(2).map(|(i, node)| (FlowNodeId(i as u32), node))
    }

    pub fn is_empty(&self) -> bool {
        // The two unreachable sentinels are always present.
        self.nodes.len() <= 2
    }

    pub fn create_start(&mut self, container: Option<NodeId>) -> FlowNodeId {
        self.push(FlowNode::Start { container })
    }

    pub fn create_branch_label(&mut self) -> FlowLabel {
        let id = self.push(FlowNode::Label { kind: FlowLabelKind::Branch, antecedents: Vec::new() });
        FlowLabel { id, kind: FlowLabelKind::Branch }
    }

    pub fn create_loop_label(&mut self) -> FlowLabel {
        let id = self.push(FlowNode::Label { kind: FlowLabelKind::Loop, antecedents: Vec::new() });
        FlowLabel { id, kind: FlowLabelKind::Loop }
    }

    /// Add `antecedent` to an open label. Unreachable antecedents are
    /// dropped and duplicates are ignored.
    pub fn add_antecedent(&mut self, label: FlowLabel, antecedent: FlowNodeId) {
        if antecedent.is_unreachable() {
            return;
        }
        assert!(
            !self.flags[label.id.index()].contains(FlowNodeFlags::FROZEN),
            "antecedent added to a finished flow label"
        );
        let FlowNode::Label { antecedents, .. } = &mut self.nodes[label.id.index()] else {
            unreachable!("flow label handle points at a non-label node");
        };
        if antecedents.contains(&antecedent) {
            return;
        }
        antecedents.push(antecedent);
        self.reference(antecedent);
    }

    /// Antecedents added to a label so far.
    pub fn label_antecedents(&self, label: FlowLabel) -> &[FlowNodeId] {
        self.nodes[label.id.index()].antecedents()
    }

    /// Close a branch label and return the node that represents it: the
    /// unreachable node when nothing reaches it, the sole antecedent when
    /// there is exactly one, otherwise the label itself.
    pub fn finish_flow_label(&mut self, label: FlowLabel) -> FlowNodeId {
        let antecedents = self.label_antecedents(label);
        match antecedents.len() {
            0 => FlowNodeId::UNREACHABLE,
            1 => antecedents[0],
            _ => {
                if label.kind == FlowLabelKind::Branch {
                    self.flags[label.id.index()].insert(FlowNodeFlags::FROZEN);
                }
                label.id
            }
        }
    }

    pub fn create_condition(&mut self, assume_true: bool, expression: NodeId, antecedent: FlowNodeId) -> FlowNodeId {
        self.reference(antecedent);
        self.push(FlowNode::Condition { assume_true, expression, antecedent })
    }

    pub fn create_assignment(&mut self, node: NodeId, antecedent: FlowNodeId) -> FlowNodeId {
        self.reference(antecedent);
        self.push(FlowNode::Assignment { node, antecedent })
    }

    pub fn create_array_mutation(&mut self, node: NodeId, antecedent: FlowNodeId) -> FlowNodeId {
        self.reference(antecedent);
        self.push(FlowNode::ArrayMutation { node, antecedent })
    }

    pub fn create_call(&mut self, node: NodeId, antecedent: FlowNodeId) -> FlowNodeId {
        self.reference(antecedent);
        self.push(FlowNode::Call { node, antecedent })
    }

    pub fn create_switch_clause(
        &mut self,
        switch_statement: NodeId,
        clause_start: u32,
        clause_end: u32,
        antecedent: FlowNodeId,
    ) -> FlowNodeId {
        self.reference(antecedent);
        self.push(FlowNode::SwitchClause { switch_statement, clause_start, clause_end, antecedent })
    }

    /// A fresh lock shared by the pre-finally node and the after-finally
    /// nodes of one `try` statement.
    pub fn new_finally_lock(&mut self) -> u32 {
        let lock = self.next_finally_lock;
        self.next_finally_lock += 1;
        lock
    }

    pub fn create_pre_finally(&mut self, antecedent: FlowNodeId, lock: u32) -> FlowNodeId {
        self.reference(antecedent);
        self.push(FlowNode::PreFinally { antecedent, lock })
    }

    pub fn create_after_finally(&mut self, antecedent: FlowNodeId, lock: u32) -> FlowNodeId {
        self.reference(antecedent);
        self.push(FlowNode::AfterFinally { antecedent, lock })
    }

    /// Every node reachable backwards from `id`, including `id`, in
    /// depth-first discovery order.
    pub fn reachable_from(&self, id: FlowNodeId) -> Vec<FlowNodeId> {
        let mut seen = vec![false; self.nodes.len()];
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if seen[next.index()] {
                continue;
            }
            seen[next.index()] = true;
            order.push(next);
            stack.extend(self.node(next).antecedents().iter().rev().copied());
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_empty_label_is_unreachable() {
        let mut graph = FlowGraph::new();
        let label = graph.create_branch_label();
        assert_eq!(graph.finish_flow_label(label), FlowNodeId::UNREACHABLE);
    }

    #[test]
    fn test_finish_single_antecedent_collapses() {
        let mut graph = FlowGraph::new();
        let start = graph.create_start(None);
        let label = graph.create_branch_label();
        graph.add_antecedent(label, start);
        graph.add_antecedent(label, FlowNodeId::UNREACHABLE);
        graph.add_antecedent(label, start);
        assert_eq!(graph.finish_flow_label(label), start);
    }

    #[test]
    fn test_shared_flag_on_second_reference() {
        let mut graph = FlowGraph::new();
        let start = graph.create_start(None);
        let a = graph.create_branch_label();
        let b = graph.create_branch_label();
        graph.add_antecedent(a, start);
        assert!(!graph.flags(start).contains(FlowNodeFlags::SHARED));
        graph.add_antecedent(b, start);
        assert!(graph.flags(start).contains(FlowNodeFlags::SHARED));
    }

    #[test]
    #[should_panic(expected = "finished flow label")]
    fn test_add_to_finished_label_panics() {
        let mut graph = FlowGraph::new();
        let s1 = graph.create_start(None);
        let s2 = graph.create_start(None);
        let label = graph.create_branch_label();
        graph.add_antecedent(label, s1);
        graph.add_antecedent(label, s2);
        assert_eq!(graph.finish_flow_label(label), label.id());
        let s3 = graph.create_start(None);
        graph.add_antecedent(label, s3);
    }

    #[test]
    fn test_loop_label_accepts_back_edges_after_finish() {
        let mut graph = FlowGraph::new();
        let s1 = graph.create_start(None);
        let s2 = graph.create_start(None);
        let label = graph.create_loop_label();
        graph.add_antecedent(label, s1);
        graph.add_antecedent(label, s2);
        graph.finish_flow_label(label);
        let back = graph.create_assignment(NodeId(7), label.id());
        graph.add_antecedent(label, back);
        assert_eq!(graph.label_antecedents(label).len(), 3);
    }

    #[test]
    fn test_reachable_from_follows_antecedents() {
        let mut graph = FlowGraph::new();
        let start = graph.create_start(None);
        let assign = graph.create_assignment(NodeId(3), start);
        assert_eq!(graph.reachable_from(assign), vec![assign, start]);
    }
}
