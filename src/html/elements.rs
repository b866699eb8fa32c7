use std::marker::PhantomData;

use crate::html::{AnyBodyTag, AnyHtml, Content};
use crate::node::{Modifier, Node};

fn tag(name: &'static str, modifiers: Vec<Modifier>, content: Node) -> Node {
    Node::Tag {
        name,
        modifiers,
        content: Box::new(content),
    }
}

/// The document root.
///
/// A root is not itself a tag: it renders only its children. It is the
/// value handed to [`compile`][crate::compile()].
pub struct Root {
    node: Node,
}

impl Root {
    /// An empty document.
    pub fn empty() -> Self {
        Self { node: Node::None }
    }

    /// A document with the given block.
    pub fn new(content: impl Content<Root>) -> Self {
        Self {
            node: content.into_node(),
        }
    }

    pub(crate) fn into_node(self) -> Node {
        self.node
    }
}

impl Default for Root {
    fn default() -> Self {
        Self::empty()
    }
}

/// The `<head>` element. Appears only inside a [`Root`].
pub struct Head {
    modifiers: Vec<Modifier>,
    content: Node,
}

impl Head {
    /// An empty head.
    pub fn empty() -> Self {
        Self {
            modifiers: Vec::new(),
            content: Node::None,
        }
    }

    /// A head with the given block.
    pub fn new(content: impl Content<Head>) -> Self {
        Self {
            modifiers: Vec::new(),
            content: content.into_node(),
        }
    }

    /// Append an attribute.
    pub fn attr(self, name: impl Into<String>, value: impl Into<String>) -> Modified<Head> {
        Modified::new("head", self.modifiers, self.content).attr(name, value)
    }

    /// Type-erased view of this element.
    pub fn html(self) -> AnyHtml<Root> {
        AnyHtml::new(self.into_node())
    }
}

impl Default for Head {
    fn default() -> Self {
        Self::empty()
    }
}

impl Content<Root> for Head {
    fn into_node(self) -> Node {
        tag("head", self.modifiers, self.content)
    }
}

/// The `<body>` element. Appears only inside a [`Root`].
pub struct Body {
    modifiers: Vec<Modifier>,
    content: Node,
}

impl Body {
    /// An empty body.
    pub fn empty() -> Self {
        Self {
            modifiers: Vec::new(),
            content: Node::None,
        }
    }

    /// A body with the given block.
    pub fn new(content: impl Content<Body>) -> Self {
        Self {
            modifiers: Vec::new(),
            content: content.into_node(),
        }
    }

    /// Append an attribute.
    pub fn attr(self, name: impl Into<String>, value: impl Into<String>) -> Modified<Body> {
        Modified::new("body", self.modifiers, self.content).attr(name, value)
    }

    /// Type-erased view of this element.
    pub fn html(self) -> AnyHtml<Root> {
        AnyHtml::new(self.into_node())
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::empty()
    }
}

impl Content<Root> for Body {
    fn into_node(self) -> Node {
        tag("body", self.modifiers, self.content)
    }
}

/// The `<title>` element. Appears only inside a [`Head`].
pub struct Title {
    content: Node,
}

impl Title {
    /// An empty title.
    pub fn empty() -> Self {
        Self {
            content: Node::None,
        }
    }

    /// A title with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            content: Node::Literal(text.into()),
        }
    }

    /// Type-erased view of this element.
    pub fn html(self) -> AnyHtml<Head> {
        AnyHtml::new(self.into_node())
    }
}

impl Default for Title {
    fn default() -> Self {
        Self::empty()
    }
}

impl Content<Head> for Title {
    fn into_node(self) -> Node {
        tag("title", Vec::new(), self.content)
    }
}

/// An element with accumulated attribute modifiers.
///
/// Created by the elements' attribute methods. Further calls append, and
/// order is preserved through to the output. The wrapper composes exactly
/// like the element it wraps.
pub struct Modified<T> {
    name: &'static str,
    modifiers: Vec<Modifier>,
    content: Node,
    marker: PhantomData<T>,
}

impl<T> Modified<T> {
    pub(crate) fn new(name: &'static str, modifiers: Vec<Modifier>, content: Node) -> Self {
        Self {
            name,
            modifiers,
            content,
            marker: PhantomData,
        }
    }

    /// Append an attribute.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.modifiers.push(Modifier::Attribute {
            name: name.into(),
            value: value.into(),
        });
        self
    }
}

impl Modified<A> {
    /// Append a link target.
    pub fn href(self, value: impl Into<String>) -> Self {
        self.attr("href", value)
    }
}

impl<P, T> Content<P> for Modified<T>
where
    T: Content<P>,
{
    fn into_node(self) -> Node {
        tag(self.name, self.modifiers, self.content)
    }
}

macro_rules! body_elements {
    ($($(#[$docs:meta])* $ty:ident => $name:literal,)+) => {
        $(
            $(#[$docs])*
            pub struct $ty {
                modifiers: Vec<Modifier>,
                content: Node,
            }

            impl $ty {
                /// An empty element.
                pub fn empty() -> Self {
                    Self {
                        modifiers: Vec::new(),
                        content: Node::None,
                    }
                }

                /// An element with the given block.
                pub fn new(content: impl Content<Body>) -> Self {
                    Self {
                        modifiers: Vec::new(),
                        content: content.into_node(),
                    }
                }

                /// Append an attribute.
                pub fn attr(
                    self,
                    name: impl Into<String>,
                    value: impl Into<String>,
                ) -> Modified<$ty> {
                    Modified::new($name, self.modifiers, self.content).attr(name, value)
                }

                /// Type-erased view of this element.
                pub fn html(self) -> AnyBodyTag {
                    AnyHtml::new(self.into_node())
                }
            }

            impl Default for $ty {
                fn default() -> Self {
                    Self::empty()
                }
            }

            impl Content<Body> for $ty {
                fn into_node(self) -> Node {
                    tag($name, self.modifiers, self.content)
                }
            }
        )+
    };
}

body_elements! {
    /// The `<p>` element. Appears only inside a [`Body`].
    P => "p",
    /// The `<a>` element. Appears only inside a [`Body`].
    A => "a",
    /// The `<div>` element. Appears only inside a [`Body`].
    Div => "div",
    /// The `<h1>` element. Appears only inside a [`Body`].
    H1 => "h1",
    /// The `<span>` element. Appears only inside a [`Body`].
    Span => "span",
    /// The `<ul>` element. Appears only inside a [`Body`].
    Ul => "ul",
    /// The `<li>` element. Appears only inside a [`Body`].
    Li => "li",
}

impl A {
    /// Set the link target.
    pub fn href(self, value: impl Into<String>) -> Modified<A> {
        self.attr("href", value)
    }
}
