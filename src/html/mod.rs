//! The typed element library and its content combinators.
//!
//! A document is described by composing element values. Every piece of
//! content declares the element it may appear under through the [`Content`]
//! trait's parent parameter, so structural mistakes are type errors: a
//! [`Title`] composes only inside a [`Head`], body tags only inside a
//! [`Body`], and [`Head`] and [`Body`] only inside a [`Root`].
//!
//! Blocks of children are plain Rust values:
//!
//! - a tuple of up to eight children, all under the same parent,
//! - `Vec<T>` for homogeneous lists, or `Vec<AnyHtml<_>>` via the elements'
//!   `.html()` projections when the children are of mixed types,
//! - `Option<T>` for content that may be absent,
//! - [`Conditional`] for either of two branches,
//! - `&str` and `String` for text, accepted under any parent,
//! - [`ContextValue`] for values substituted at render time,
//! - [`lazy`] for blocks built only when the template is compiled.
//!
//! ```
//! use plume::html::{Body, Head, Root, Title, P};
//!
//! let page = Root::new((
//!     Head::new(Title::new("Hello, world!")),
//!     Body::new(P::new("hello")),
//! ));
//! ```
//!
//! The builders only construct a tree; they never escape, optimize or
//! render.

mod elements;

use std::marker::PhantomData;

use crate::node::{LazyFn, Node};

pub use crate::html::elements::{
    Body, Div, Head, Li, Modified, Root, Span, Title, Ul, A, H1, P,
};

/// Template content that may appear under the parent element `P`.
///
/// Element types implement this for their declared parent; the combinators
/// in this module implement it generically.
pub trait Content<P>: Sized {
    /// Collapse this content into a single template node.
    fn into_node(self) -> Node;
}

/// Type-erased content under the parent `P`.
///
/// Produced by the elements' `.html()` projections, or directly with
/// [`AnyHtml::of`]; lets heterogeneous children share a `Vec`.
pub struct AnyHtml<P> {
    node: Node,
    marker: PhantomData<P>,
}

/// Type-erased content that may appear in a `<body>`.
pub type AnyBodyTag = AnyHtml<Body>;

impl<P> AnyHtml<P> {
    pub(crate) fn new(node: Node) -> Self {
        Self {
            node,
            marker: PhantomData,
        }
    }

    /// Erase the concrete type of `content`.
    pub fn of(content: impl Content<P>) -> Self {
        Self::new(content.into_node())
    }
}

impl<P> Content<P> for AnyHtml<P> {
    fn into_node(self) -> Node {
        self.node
    }
}

/// A value substituted from the render [`Context`][crate::Context] by key.
///
/// A single-key path resolves the key and emits the value's string form;
/// unknown keys emit nothing. Paths of two or more keys emit nothing: the
/// context is a flat table, so no deeper value can exist.
pub struct ContextValue {
    path: Vec<String>,
}

impl ContextValue {
    /// A substitution for the given context key.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            path: vec![key.into()],
        }
    }

    /// Extend the key path.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.path.push(key.into());
        self
    }
}

impl<P> Content<P> for ContextValue {
    fn into_node(self) -> Node {
        Node::ContextValue(self.path)
    }
}

/// Content deferred until the template is compiled.
///
/// Created by [`lazy`]; the optimizer invokes the producer exactly once.
pub struct Lazy<P> {
    thunk: LazyFn,
    marker: PhantomData<P>,
}

/// Defer construction of a block until the template is compiled.
///
/// ```
/// use plume::html::{lazy, Body, Root, P};
///
/// let page = Root::new(lazy(|| Body::new(P::new("built at compile time"))));
/// ```
pub fn lazy<P, C, F>(f: F) -> Lazy<P>
where
    C: Content<P>,
    F: FnOnce() -> C + 'static,
{
    Lazy {
        thunk: Box::new(move || f().into_node()),
        marker: PhantomData,
    }
}

impl<P> Content<P> for Lazy<P> {
    fn into_node(self) -> Node {
        Node::Lazy(self.thunk)
    }
}

/// Either of two content branches, both under the same parent.
pub enum Conditional<T, F> {
    True(T),
    False(F),
}

impl<T, F> Conditional<T, F> {
    /// Pick the branch matching `cond`.
    pub fn new(cond: bool, when_true: T, when_false: F) -> Self {
        if cond {
            Self::True(when_true)
        } else {
            Self::False(when_false)
        }
    }
}

impl<P, T, F> Content<P> for Conditional<T, F>
where
    T: Content<P>,
    F: Content<P>,
{
    fn into_node(self) -> Node {
        match self {
            Self::True(content) => content.into_node(),
            Self::False(content) => content.into_node(),
        }
    }
}

impl<P> Content<P> for &str {
    fn into_node(self) -> Node {
        Node::Literal(String::from(self))
    }
}

impl<P> Content<P> for String {
    fn into_node(self) -> Node {
        Node::Literal(self)
    }
}

impl<P, C> Content<P> for Option<C>
where
    C: Content<P>,
{
    fn into_node(self) -> Node {
        match self {
            Some(content) => content.into_node(),
            None => Node::None,
        }
    }
}

impl<P, C> Content<P> for Vec<C>
where
    C: Content<P>,
{
    fn into_node(self) -> Node {
        Node::List(self.into_iter().map(Content::into_node).collect())
    }
}

impl<P> Content<P> for () {
    fn into_node(self) -> Node {
        Node::None
    }
}

macro_rules! impl_content_for_tuple {
    ($($child:ident)+) => {
        #[allow(non_snake_case)]
        impl<P, $($child),+> Content<P> for ($($child,)+)
        where
            $($child: Content<P>),+
        {
            fn into_node(self) -> Node {
                let ($($child,)+) = self;
                Node::List(vec![$($child.into_node()),+])
            }
        }
    };
}

impl_content_for_tuple! { C1 }
impl_content_for_tuple! { C1 C2 }
impl_content_for_tuple! { C1 C2 C3 }
impl_content_for_tuple! { C1 C2 C3 C4 }
impl_content_for_tuple! { C1 C2 C3 C4 C5 }
impl_content_for_tuple! { C1 C2 C3 C4 C5 C6 }
impl_content_for_tuple! { C1 C2 C3 C4 C5 C6 C7 }
impl_content_for_tuple! { C1 C2 C3 C4 C5 C6 C7 C8 }
