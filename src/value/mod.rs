//! The render context and its values.

mod from;
#[cfg(feature = "serde")]
mod ser;

#[cfg(feature = "serde")]
pub use crate::value::ser::to_context;

/// A value in a render [`Context`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// The absence of a value, rendered as nothing.
    Null,
    /// A borrowed string literal.
    Static(&'static str),
    /// An owned string.
    String(String),
}

/// An ordered key to value table consulted by the renderer.
///
/// Keys are looked up by linear scan. [`get`][Context::get] resolves unknown
/// keys to [`Value::Null`] and [`set`][Context::set] inserts or replaces. A
/// context is never mutated during a render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    entries: Vec<(String, Value)>,
}

static NULL: Value = Value::Null;

impl Value {
    pub(crate) fn as_str(&self) -> &str {
        match self {
            Value::Null => "",
            Value::Static(s) => s,
            Value::String(s) => s,
        }
    }
}

impl Context {
    /// Construct an empty context.
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Lookup the value for a key.
    pub fn get(&self, key: &str) -> &Value {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
            .unwrap_or(&NULL)
    }

    /// Insert the value for a key, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.entries.push((key, value)),
        }
    }

    /// The number of keys in the context.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn get_unknown_key_is_null() {
        let ctx = Context::new();
        assert_eq!(*ctx.get("missing"), Value::Null);
    }

    #[test]
    fn set_inserts() {
        let mut ctx = Context::new();
        ctx.set("name", "nea");
        assert_eq!(*ctx.get("name"), Value::Static("nea"));
        assert_eq!(ctx.len(), 1);
    }

    #[test]
    fn set_replaces() {
        let mut ctx = Context::new();
        ctx.set("name", "before");
        ctx.set("name", String::from("after"));
        assert_eq!(*ctx.get("name"), Value::String(String::from("after")));
        assert_eq!(ctx.len(), 1);
    }

    #[test]
    fn value_conversions() {
        assert_eq!(Value::from(()), Value::Null);
        assert_eq!(Value::from("s"), Value::Static("s"));
        assert_eq!(Value::from(String::from("s")), Value::String(String::from("s")));
        assert_eq!(Value::from(None::<&str>), Value::Null);
        assert_eq!(Value::from(Some("s")), Value::Static("s"));
    }
}
