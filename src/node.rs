//! Defines the template tree built by the element DSL.

use std::fmt;

/// A node in a template tree.
///
/// Trees are produced by the typed builders in [`html`][crate::html],
/// rewritten by the optimizer and serialized into bytecode. They are
/// ephemeral: a tree is consumed by [`compile`][crate::compile()].
pub enum Node {
    /// Contributes nothing to the output.
    None,
    /// UTF-8 text emitted verbatim.
    Literal(String),
    /// Children rendered in order.
    List(Vec<Node>),
    /// An element with its modifiers and a single content node.
    Tag {
        name: &'static str,
        modifiers: Vec<Modifier>,
        content: Box<Node>,
    },
    /// A value substituted from the render context by key path.
    ContextValue(Vec<String>),
    /// A deferred producer, resolved during optimization.
    Lazy(LazyFn),
}

/// The boxed producer stored in [`Node::Lazy`].
pub type LazyFn = Box<dyn FnOnce() -> Node>;

/// A modifier attached to a tag.
///
/// Attributes are the only modifier kind. The value is emitted between
/// double quotes without escaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modifier {
    Attribute { name: String, value: String },
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::None => f.write_str("None"),
            Node::Literal(s) => f.debug_tuple("Literal").field(s).finish(),
            Node::List(children) => f.debug_tuple("List").field(children).finish(),
            Node::Tag {
                name,
                modifiers,
                content,
            } => f
                .debug_struct("Tag")
                .field("name", name)
                .field("modifiers", modifiers)
                .field("content", content)
                .finish(),
            Node::ContextValue(path) => f.debug_tuple("ContextValue").field(path).finish(),
            Node::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::None, Node::None) => true,
            (Node::Literal(a), Node::Literal(b)) => a == b,
            (Node::List(a), Node::List(b)) => a == b,
            (
                Node::Tag {
                    name: a,
                    modifiers: am,
                    content: ac,
                },
                Node::Tag {
                    name: b,
                    modifiers: bm,
                    content: bc,
                },
            ) => a == b && am == bm && ac == bc,
            (Node::ContextValue(a), Node::ContextValue(b)) => a == b,
            // A thunk has no identity to compare.
            _ => false,
        }
    }
}

/// Renders a tree directly, without compiling it first.
///
/// This is the reference for what the optimizer and the bytecode pipeline
/// must preserve, byte for byte.
#[cfg(test)]
pub(crate) fn render_naive(node: &Node, ctx: &crate::Context) -> String {
    let mut out = String::new();
    naive(node, ctx, &mut out);
    out
}

#[cfg(test)]
fn naive(node: &Node, ctx: &crate::Context, out: &mut String) {
    match node {
        Node::None => {}
        Node::Literal(s) => out.push_str(s),
        Node::List(children) => {
            for child in children {
                naive(child, ctx, out);
            }
        }
        Node::Tag {
            name,
            modifiers,
            content,
        } => {
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
            naive(content, ctx, out);
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        Node::ContextValue(path) => {
            if let [key] = path.as_slice() {
                out.push_str(ctx.get(key).as_str());
            }
        }
        Node::Lazy(_) => panic!("lazy node in a naive render"),
    }
}
