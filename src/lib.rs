//! A typed HTML template engine with a compact compiled representation.
//!
//! Templates are described in Rust with a typed element DSL, compiled once
//! into a small bytecode program, and rendered many times by appending
//! bytes straight into a caller's buffer.
//!
//! # Introduction
//!
//! A document is built from typed elements. Parent rules are enforced by
//! the type system: a [`Title`][html::Title] composes only inside a
//! [`Head`][html::Head], body tags only inside a [`Body`][html::Body].
//!
//! ```
//! use plume::html::{Body, Head, Root, Title, P};
//!
//! let page = Root::new((
//!     Head::new(Title::new("Hello, world!")),
//!     Body::new(P::new("hello")),
//! ));
//!
//! let template = plume::compile(page)?;
//! let html = template.render(&plume::Context::new())?;
//! assert_eq!(
//!     html,
//!     "<head><title>Hello, world!</title></head><body><p>hello</p></body>"
//! );
//! # Ok::<(), plume::Error>(())
//! ```
//!
//! Compilation folds everything static into single literal records, so a
//! fully static page renders as one append. Values that are only known at
//! render time come from a [`Context`]:
//!
//! ```
//! use plume::html::{Body, ContextValue, Root, P};
//!
//! let template = plume::compile(Root::new(Body::new(P::new(ContextValue::new("name")))))?;
//!
//! let html = template.render(&plume::context! { name: "nea" })?;
//! assert_eq!(html, "<body><p>nea</p></body>");
//! # Ok::<(), plume::Error>(())
//! ```
//!
//! Rendering never mutates the template, so one compiled template can be
//! shared and rendered concurrently.
//!
//! # Escaping
//!
//! There is none, by policy. Literals are emitted verbatim and attribute
//! values are emitted between double quotes exactly as given. Templates and
//! context values are trusted input; escape them beforehand if they are
//! not.

mod compile;
mod error;
pub mod html;
mod macros;
mod node;
mod program;
mod render;
mod value;

use std::fmt;
use std::io;

pub use crate::error::Error;
pub use crate::node::{LazyFn, Modifier, Node};
#[cfg(feature = "serde")]
pub use crate::value::to_context;
pub use crate::value::{Context, Value};

/// A type alias for results in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// A compiled template: an immutable bytecode region.
///
/// Construct with [`compile()`] or [`compile_document()`], render as many
/// times as needed.
pub struct Template {
    bytecode: Vec<u8>,
}

/// A type that describes a complete document.
///
/// Lets a template be compiled from a plain type instead of a value.
///
/// ```
/// use plume::html::{Body, Root, P};
///
/// struct Index;
///
/// impl plume::Document for Index {
///     fn document() -> Root {
///         Root::new(Body::new(P::new("hi")))
///     }
/// }
///
/// let template = plume::compile_document::<Index>()?;
/// # Ok::<(), plume::Error>(())
/// ```
pub trait Document {
    /// Build the document tree.
    fn document() -> html::Root;
}

/// Compile a document tree into a [`Template`].
#[inline]
pub fn compile(root: html::Root) -> Result<Template> {
    compile::template(root)
}

/// Compile the document described by `D` into a [`Template`].
#[inline]
pub fn compile_document<D: Document>() -> Result<Template> {
    compile(D::document())
}

impl Template {
    /// A template over previously produced bytecode.
    ///
    /// The bytes are not validated here; a malformed region fails at render
    /// time.
    #[inline]
    pub fn from_bytes(bytecode: Vec<u8>) -> Self {
        Self { bytecode }
    }

    /// The raw bytecode.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytecode
    }

    /// Render the template to a string.
    pub fn render(&self, ctx: &Context) -> Result<String> {
        let mut buf = Vec::with_capacity(self.bytecode.len());
        self.render_to(&mut buf, ctx)?;
        String::from_utf8(buf).map_err(|_| Error::new("rendered output is not valid utf-8"))
    }

    /// Render the template by appending to `buf`.
    ///
    /// Existing contents are preserved. On error the buffer keeps whatever
    /// partial output was produced before the failure.
    #[inline]
    pub fn render_to(&self, buf: &mut Vec<u8>, ctx: &Context) -> Result<()> {
        render::template(&self.bytecode, buf, ctx)
    }

    /// Render the template to a writer.
    ///
    /// The output is buffered and written once at the end, so nothing is
    /// written on error.
    pub fn render_to_writer<W>(&self, mut writer: W, ctx: &Context) -> Result<()>
    where
        W: io::Write,
    {
        let mut buf = Vec::with_capacity(self.bytecode.len());
        self.render_to(&mut buf, ctx)?;
        writer.write_all(&buf)?;
        Ok(())
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<compiled template>")
    }
}
