//! The bottom-up tree optimizer.
//!
//! Rewrites a template tree into an equivalent one that renders the same
//! bytes from as few nodes as possible: nested lists are flattened,
//! adjacent static fragments are concatenated into single literals, lazy
//! producers are resolved. A subtree that depends on the render context is
//! left in place and poisons folding for its ancestors.

use crate::node::{Modifier, Node};

/// The result of optimizing a subtree.
pub(crate) struct Optimized {
    pub(crate) node: Node,
    /// Whether the subtree is entirely context independent.
    pub(crate) optimizable: bool,
}

/// Optimize a tree.
pub(crate) fn tree(node: Node) -> Optimized {
    match node {
        Node::None => Optimized {
            node: Node::None,
            optimizable: true,
        },
        Node::Literal(s) => Optimized {
            node: Node::Literal(s),
            optimizable: true,
        },
        Node::Lazy(thunk) => tree(thunk()),
        Node::ContextValue(path) => Optimized {
            node: Node::ContextValue(path),
            optimizable: false,
        },
        Node::Tag {
            name,
            modifiers,
            content,
        } => tag(name, modifiers, *content),
        Node::List(children) => list(children),
    }
}

fn tag(name: &'static str, modifiers: Vec<Modifier>, content: Node) -> Optimized {
    let content = tree(content);
    let mut open = String::new();
    open_tag(&mut open, name, &modifiers);

    match content {
        // A fully static tag folds into one literal. An empty body counts
        // as an empty literal here, so static documents always collapse.
        Optimized {
            node: Node::None,
            optimizable: true,
        } => {
            close_tag(&mut open, name);
            Optimized {
                node: Node::Literal(open),
                optimizable: true,
            }
        }
        Optimized {
            node: Node::Literal(body),
            optimizable: true,
        } => {
            open.push_str(&body);
            close_tag(&mut open, name);
            Optimized {
                node: Node::Literal(open),
                optimizable: true,
            }
        }
        Optimized { node, .. } => {
            let mut close = String::new();
            close_tag(&mut close, name);
            Optimized {
                node: Node::List(vec![Node::Literal(open), node, Node::Literal(close)]),
                optimizable: false,
            }
        }
    }
}

fn list(children: Vec<Node>) -> Optimized {
    let mut out = Vec::new();
    let mut acc = String::new();
    let mut optimizable = true;
    let mut second_pass = false;

    for child in children {
        match child {
            Node::None => {}
            Node::Literal(s) => acc.push_str(&s),
            Node::ContextValue(path) => {
                flush(&mut out, &mut acc);
                out.push(Node::ContextValue(path));
                optimizable = false;
            }
            Node::Tag {
                name,
                modifiers,
                content,
            } => {
                // Inline the tag: the open and close markup always land in
                // the accumulator, only a dynamic body interrupts it.
                open_tag(&mut acc, name, &modifiers);
                let content = tree(*content);
                optimizable &= content.optimizable;
                match content.node {
                    Node::None => {}
                    Node::Literal(s) => acc.push_str(&s),
                    node => {
                        flush(&mut out, &mut acc);
                        out.push(node);
                    }
                }
                close_tag(&mut acc, name);
            }
            Node::List(inner) => {
                let inner = list(inner);
                optimizable &= inner.optimizable;
                match inner.node {
                    Node::None => {}
                    Node::Literal(s) => acc.push_str(&s),
                    Node::List(nodes) => {
                        flush(&mut out, &mut acc);
                        out.extend(nodes);
                        second_pass = true;
                    }
                    node => {
                        flush(&mut out, &mut acc);
                        out.push(node);
                    }
                }
            }
            Node::Lazy(thunk) => {
                let resolved = tree(thunk());
                optimizable &= resolved.optimizable;
                match resolved.node {
                    Node::None => {}
                    Node::Literal(s) => acc.push_str(&s),
                    node => {
                        flush(&mut out, &mut acc);
                        out.push(node);
                        second_pass = true;
                    }
                }
            }
        }
    }
    flush(&mut out, &mut acc);

    // A scheduled second pass merges literals around spliced elements.
    // Each pass strictly reduces the lazy and nested list counts, so this
    // terminates.
    if second_pass {
        let again = list(out);
        return Optimized {
            node: again.node,
            optimizable: optimizable && again.optimizable,
        };
    }

    let node = match out.len() {
        0 => Node::None,
        1 => match out.pop() {
            Some(node) => node,
            None => Node::None,
        },
        _ => Node::List(out),
    };
    Optimized { node, optimizable }
}

fn flush(out: &mut Vec<Node>, acc: &mut String) {
    if !acc.is_empty() {
        out.push(Node::Literal(std::mem::take(acc)));
    }
}

fn open_tag(out: &mut String, name: &str, modifiers: &[Modifier]) {
    out.push('<');
    out.push_str(name);
    for Modifier::Attribute { name, value } in modifiers {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
    out.push('>');
}

fn close_tag(out: &mut String, name: &str) {
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}
