//! Arena-backed syntax tree of a parsed script.
//!
//! Nodes live in one `Vec` and refer to their children by [`NodeId`]. The
//! parser grows the arena through [`AstBuilder`] and may truncate it while
//! backtracking; once finished, an [`Ast`] is immutable and can be resolved
//! any number of times.
//!
//! Binary constructs (commutation, conjugation, rotation) hold exactly two
//! children, each a `Sequence` node wrapping one operand.

mod error;
mod metrics;
mod moves;
mod permutation;
mod resolve;

pub use error::AstError;
pub use metrics::MoveMetrics;
pub use moves::{normalize_angle, MoveNode};
pub use permutation::{PermutationCycle, PermutationItem, PermutationSign};
pub use resolve::{Resolved, ResolvedOp};

use smol_str::SmolStr;
use text_size::TextRange;

use crate::cube::{CubeError, PermutationState};

/// Index of a node in its arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Sequence(Vec<NodeId>),
    Grouping(Vec<NodeId>),
    Macro { name: SmolStr, children: Vec<NodeId> },
    Inversion(Vec<NodeId>),
    Reflection(Vec<NodeId>),
    Repetition { count: u32, children: Vec<NodeId> },
    Commutation(Vec<NodeId>),
    Conjugation(Vec<NodeId>),
    Rotation(Vec<NodeId>),
    Move(MoveNode),
    Permutation(PermutationCycle),
    Nop,
}

impl NodeKind {
    pub fn children(&self) -> &[NodeId] {
        match self {
            Self::Sequence(children)
            | Self::Grouping(children)
            | Self::Inversion(children)
            | Self::Reflection(children)
            | Self::Commutation(children)
            | Self::Conjugation(children)
            | Self::Rotation(children)
            | Self::Macro { children, .. }
            | Self::Repetition { children, .. } => children,
            Self::Move(_) | Self::Permutation(_) | Self::Nop => &[],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sequence(_) => "sequence",
            Self::Grouping(_) => "grouping",
            Self::Macro { .. } => "macro",
            Self::Inversion(_) => "inversion",
            Self::Reflection(_) => "reflection",
            Self::Repetition { .. } => "repetition",
            Self::Commutation(_) => "commutation",
            Self::Conjugation(_) => "conjugation",
            Self::Rotation(_) => "rotation",
            Self::Move(_) => "move",
            Self::Permutation(_) => "permutation",
            Self::Nop => "nop",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    /// Source text this node was parsed from
    pub range: TextRange,
}

/// Growable arena used while parsing
#[derive(Debug, Default)]
pub struct AstBuilder {
    nodes: Vec<Node>,
}

impl AstBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: NodeKind, range: TextRange) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node { kind, range });
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop every node pushed after the arena had `len` nodes
    pub fn truncate(&mut self, len: usize) {
        self.nodes.truncate(len);
    }

    pub fn range(&self, id: NodeId) -> Option<TextRange> {
        self.nodes.get(id.index()).map(|node| node.range)
    }

    pub fn set_range(&mut self, id: NodeId, range: TextRange) {
        if let Some(node) = self.nodes.get_mut(id.index()) {
            node.range = range;
        }
    }

    /// Give every node from index `from` onwards the same range
    pub fn set_ranges_from(&mut self, from: usize, range: TextRange) {
        for node in self.nodes.iter_mut().skip(from) {
            node.range = range;
        }
    }

    pub fn finish(self, root: NodeId, layer_count: usize) -> Ast {
        Ast {
            nodes: self.nodes,
            root,
            layer_count,
        }
    }
}

/// A parsed script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ast {
    nodes: Vec<Node>,
    root: NodeId,
    layer_count: usize,
}

impl Ast {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn layer_count(&self) -> usize {
        self.layer_count
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map_or(&[][..], |node| node.kind.children())
    }

    /// Lazily resolve the whole script into primitive operations
    pub fn resolved(&self, inverse: bool) -> Resolved<'_> {
        Resolved::new(self, self.root, inverse)
    }

    /// Lazily resolve the subtree rooted at `id`
    pub fn resolved_node(&self, id: NodeId, inverse: bool) -> Resolved<'_> {
        Resolved::new(self, id, inverse)
    }

    /// Apply the script (or its inverse) to a state of the same layer count
    pub fn apply_to(&self, state: &mut PermutationState, inverse: bool) -> Result<(), CubeError> {
        if state.layer_count() != self.layer_count {
            return Err(CubeError::LayerCountMismatch {
                expected: self.layer_count,
                found: state.layer_count(),
            });
        }
        for op in self.resolved(inverse) {
            match op {
                ResolvedOp::Move(m) => m.apply_to(state)?,
                ResolvedOp::Permutation(cycle) => cycle.apply_to(state)?,
            }
        }
        Ok(())
    }

    /// Count primitive moves and turns of the resolved script
    pub fn metrics(&self) -> MoveMetrics {
        MoveMetrics::of(self)
    }
}
