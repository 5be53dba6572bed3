//! Lazy resolution of an [`Ast`] into primitive operations.
//!
//! Resolution walks the tree with an explicit work stack. Repetitions and
//! compound operators are expanded one step at a time, so nothing is
//! materialized no matter how deeply they nest.

use std::borrow::Cow;

use super::{Ast, MoveNode, NodeId, NodeKind, PermutationCycle};

/// A primitive operation produced by resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedOp<'a> {
    Move(MoveNode),
    /// Borrowed from the tree when resolved forwards, inverted otherwise
    Permutation(Cow<'a, PermutationCycle>),
}

/// Operand order of a binary construct: `(operand, inverted)` pairs
type Steps = &'static [(usize, bool)];

const COMMUTATION: Steps = &[(0, false), (1, false), (0, true), (1, true)];
const COMMUTATION_INVERSE: Steps = &[(1, false), (0, false), (1, true), (0, true)];
const CONJUGATION: Steps = &[(0, false), (1, false), (0, true)];
const CONJUGATION_INVERSE: Steps = &[(0, false), (1, true), (0, true)];
const ROTATION: Steps = &[(0, true), (1, false), (0, false)];
const ROTATION_INVERSE: Steps = &[(0, true), (1, true), (0, false)];

#[derive(Debug, Clone, Copy)]
enum Frame {
    Visit {
        id: NodeId,
        inverse: bool,
        reflect: bool,
    },
    Children {
        id: NodeId,
        next: usize,
        inverse: bool,
        reflect: bool,
    },
    Repeat {
        id: NodeId,
        remaining: u32,
        inverse: bool,
        reflect: bool,
    },
    Operands {
        id: NodeId,
        steps: Steps,
        next: usize,
        reflect: bool,
    },
}

/// Iterator returned by [`Ast::resolved`]
#[derive(Debug, Clone)]
pub struct Resolved<'a> {
    ast: &'a Ast,
    stack: Vec<Frame>,
}

impl<'a> Resolved<'a> {
    pub(crate) fn new(ast: &'a Ast, root: NodeId, inverse: bool) -> Self {
        Self {
            ast,
            stack: vec![Frame::Visit {
                id: root,
                inverse,
                reflect: false,
            }],
        }
    }

    fn visit(&mut self, id: NodeId, inverse: bool, reflect: bool) -> Option<ResolvedOp<'a>> {
        let ast = self.ast;
        let node = ast.node(id)?;
        match &node.kind {
            NodeKind::Nop => None,
            NodeKind::Move(m) => {
                let mut m = *m;
                if reflect {
                    m = m.reflected(ast.layer_count());
                }
                if inverse {
                    m = m.inverted();
                }
                Some(ResolvedOp::Move(m))
            }
            NodeKind::Permutation(cycle) => Some(ResolvedOp::Permutation(if inverse {
                Cow::Owned(cycle.inverted())
            } else {
                Cow::Borrowed(cycle)
            })),
            NodeKind::Sequence(_) | NodeKind::Grouping(_) | NodeKind::Macro { .. } => {
                self.push_children(id, inverse, reflect);
                None
            }
            NodeKind::Inversion(_) => {
                self.push_children(id, !inverse, reflect);
                None
            }
            NodeKind::Reflection(_) => {
                self.push_children(id, inverse, !reflect);
                None
            }
            NodeKind::Repetition { count, .. } => {
                self.stack.push(Frame::Repeat {
                    id,
                    remaining: *count,
                    inverse,
                    reflect,
                });
                None
            }
            NodeKind::Commutation(children)
            | NodeKind::Conjugation(children)
            | NodeKind::Rotation(children) => {
                if children.len() != 2 {
                    tracing::trace!(
                        kind = node.kind.name(),
                        children = children.len(),
                        "skipping malformed binary node"
                    );
                    return None;
                }
                let steps = match (&node.kind, inverse) {
                    (NodeKind::Commutation(_), false) => COMMUTATION,
                    (NodeKind::Commutation(_), true) => COMMUTATION_INVERSE,
                    (NodeKind::Conjugation(_), false) => CONJUGATION,
                    (NodeKind::Conjugation(_), true) => CONJUGATION_INVERSE,
                    (_, false) => ROTATION,
                    (_, true) => ROTATION_INVERSE,
                };
                self.stack.push(Frame::Operands {
                    id,
                    steps,
                    next: 0,
                    reflect,
                });
                None
            }
        }
    }

    fn push_children(&mut self, id: NodeId, inverse: bool, reflect: bool) {
        self.stack.push(Frame::Children {
            id,
            next: 0,
            inverse,
            reflect,
        });
    }
}

impl<'a> Iterator for Resolved<'a> {
    type Item = ResolvedOp<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let ast = self.ast;
        while let Some(frame) = self.stack.pop() {
            match frame {
                Frame::Visit {
                    id,
                    inverse,
                    reflect,
                } => {
                    if let Some(op) = self.visit(id, inverse, reflect) {
                        return Some(op);
                    }
                }
                Frame::Children {
                    id,
                    next,
                    inverse,
                    reflect,
                } => {
                    let children = ast.children(id);
                    if next < children.len() {
                        let child = if inverse {
                            children[children.len() - 1 - next]
                        } else {
                            children[next]
                        };
                        self.stack.push(Frame::Children {
                            id,
                            next: next + 1,
                            inverse,
                            reflect,
                        });
                        self.stack.push(Frame::Visit {
                            id: child,
                            inverse,
                            reflect,
                        });
                    }
                }
                Frame::Repeat {
                    id,
                    remaining,
                    inverse,
                    reflect,
                } => {
                    if remaining > 0 {
                        self.stack.push(Frame::Repeat {
                            id,
                            remaining: remaining - 1,
                            inverse,
                            reflect,
                        });
                        self.push_children(id, inverse, reflect);
                    }
                }
                Frame::Operands {
                    id,
                    steps,
                    next,
                    reflect,
                } => {
                    if let Some(&(operand, inverse)) = steps.get(next) {
                        self.stack.push(Frame::Operands {
                            id,
                            steps,
                            next: next + 1,
                            reflect,
                        });
                        if let Some(&child) = ast.children(id).get(operand) {
                            self.stack.push(Frame::Visit {
                                id: child,
                                inverse,
                                reflect,
                            });
                        }
                    }
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::super::{AstBuilder, NodeKind};
    use super::*;
    use text_size::TextRange;

    fn mv(builder: &mut AstBuilder, axis: usize, mask: u32) -> NodeId {
        let m = MoveNode::new(axis, mask, 1).unwrap();
        builder.push(NodeKind::Move(m), TextRange::default())
    }

    fn seq(builder: &mut AstBuilder, children: Vec<NodeId>) -> NodeId {
        builder.push(NodeKind::Sequence(children), TextRange::default())
    }

    fn angles(ast: &Ast, inverse: bool) -> Vec<(usize, i32)> {
        ast.resolved(inverse)
            .map(|op| match op {
                ResolvedOp::Move(m) => (m.axis(), m.angle()),
                ResolvedOp::Permutation(_) => (9, 0),
            })
            .collect()
    }

    #[test]
    fn test_commutation_order() {
        let mut b = AstBuilder::new();
        let a = mv(&mut b, 0, 0b100);
        let a = seq(&mut b, vec![a]);
        let c = mv(&mut b, 1, 0b100);
        let c = seq(&mut b, vec![c]);
        let comm = b.push(NodeKind::Commutation(vec![a, c]), TextRange::default());
        let root = seq(&mut b, vec![comm]);
        let ast = b.finish(root, 3);
        assert_eq!(angles(&ast, false), [(0, 1), (1, 1), (0, -1), (1, -1)]);
        assert_eq!(angles(&ast, true), [(1, 1), (0, 1), (1, -1), (0, -1)]);
    }

    #[test]
    fn test_repetition_is_lazy() {
        let mut b = AstBuilder::new();
        let a = mv(&mut b, 2, 0b1);
        let rep = b.push(
            NodeKind::Repetition {
                count: u32::MAX,
                children: vec![a],
            },
            TextRange::default(),
        );
        let outer = b.push(
            NodeKind::Repetition {
                count: u32::MAX,
                children: vec![rep],
            },
            TextRange::default(),
        );
        let ast = b.finish(outer, 3);
        assert_eq!(ast.resolved(false).take(5).count(), 5);
    }

    #[test]
    fn test_reflection_mirrors_layers() {
        let mut b = AstBuilder::new();
        let a = mv(&mut b, 0, 0b100);
        let refl = b.push(NodeKind::Reflection(vec![a]), TextRange::default());
        let ast = b.finish(refl, 3);
        let ops: Vec<_> = ast.resolved(false).collect();
        assert_eq!(ops, [ResolvedOp::Move(MoveNode::new(0, 0b001, 1).unwrap())]);
    }

    #[test]
    fn test_malformed_binary_node_resolves_to_nothing() {
        let mut b = AstBuilder::new();
        let a = mv(&mut b, 0, 0b100);
        let conj = b.push(NodeKind::Conjugation(vec![a]), TextRange::default());
        let ast = b.finish(conj, 3);
        assert_eq!(ast.resolved(false).count(), 0);
    }
}
