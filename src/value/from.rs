use crate::value::Value;

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Self::Null
    }
}

impl From<&'static str> for Value {
    fn from(s: &'static str) -> Self {
        Self::Static(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl<V> From<Option<V>> for Value
where
    V: Into<Value>,
{
    fn from(opt: Option<V>) -> Self {
        match opt {
            None => Self::Null,
            Some(value) => value.into(),
        }
    }
}
