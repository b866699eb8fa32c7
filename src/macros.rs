/// Construct a [`Context`][crate::Context] from `key: value` pairs.
///
/// Keys are identifiers; values are anything convertible into a
/// [`Value`][crate::Value]. Later pairs replace earlier ones with the same
/// key.
///
/// ```
/// let ctx = plume::context! {
///     title: "Hello, world!",
///     author: String::from("nea"),
/// };
/// ```
#[macro_export]
macro_rules! context {
    () => {
        $crate::Context::new()
    };
    ($($key:ident : $value:expr),+ $(,)?) => {{
        let mut ctx = $crate::Context::new();
        $(ctx.set(stringify!($key), $value);)+
        ctx
    }};
}
