//! A renderer that interprets compiled bytecode.
//!
//! Rendering is one forward pass over the byte stream: read an opcode,
//! append its record's HTML to the output, recurse for nested records. The
//! static paths read borrowed slices straight out of the bytecode and into
//! the output buffer, no heap allocation happens per render.

mod cursor;

use crate::program::Opcode;
use crate::render::cursor::Cursor;
use crate::value::Context;
use crate::{Error, Result};

/// Render a bytecode program, appending to `out`.
pub(crate) fn template(bytecode: &[u8], out: &mut Vec<u8>, ctx: &Context) -> Result<()> {
    RendererImpl {
        cursor: Cursor::new(bytecode),
        ctx,
    }
    .render(out)
}

struct RendererImpl<'render> {
    cursor: Cursor<'render>,
    ctx: &'render Context,
}

impl<'render> RendererImpl<'render> {
    fn render(mut self, out: &mut Vec<u8>) -> Result<()> {
        self.cursor.seek(0);
        while !self.cursor.is_empty() {
            self.record(out)?;
        }
        Ok(())
    }

    /// Render the record at the cursor.
    fn record(&mut self, out: &mut Vec<u8>) -> Result<()> {
        let offset = self.cursor.position();
        let byte = self.cursor.read_u8().ok_or_else(|| truncated(offset))?;
        match Opcode::from_u8(byte) {
            Some(Opcode::Literal) => {
                let text = self.string()?;
                out.extend_from_slice(text);
            }
            Some(Opcode::Tag) => {
                let name = self.string()?;
                out.push(b'<');
                out.extend_from_slice(name);
                let modifiers = self.count()?;
                for _ in 0..modifiers {
                    let key = self.string()?;
                    let value = self.string()?;
                    out.push(b' ');
                    out.extend_from_slice(key);
                    out.extend_from_slice(b"=\"");
                    out.extend_from_slice(value);
                    out.push(b'"');
                }
                out.push(b'>');
                self.record(out)?;
                out.extend_from_slice(b"</");
                out.extend_from_slice(name);
                out.push(b'>');
            }
            Some(Opcode::List) => {
                let children = self.count()?;
                for _ in 0..children {
                    self.record(out)?;
                }
            }
            Some(Opcode::ContextValue) => {
                let keys = self.count()?;
                let mut value = None;
                for i in 0..keys {
                    let offset = self.cursor.position();
                    let key = self.string()?;
                    if i == 0 {
                        let key = std::str::from_utf8(key)
                            .map_err(|_| Error::render("context key is not valid utf-8", offset))?;
                        value = Some(self.ctx.get(key));
                    }
                }
                // The context is a flat table: only a single-key path can
                // resolve to a value, deeper paths emit nothing.
                if keys == 1 {
                    if let Some(value) = value {
                        out.extend_from_slice(value.as_str().as_bytes());
                    }
                }
            }
            None => {
                return Err(Error::render(format!("unknown opcode {byte:#04x}"), offset));
            }
        }
        Ok(())
    }

    /// Read a length-prefixed string, borrowed from the bytecode.
    fn string(&mut self) -> Result<&'render [u8]> {
        let offset = self.cursor.position();
        let len = self.cursor.read_u32_le().ok_or_else(|| truncated(offset))?;
        self.cursor
            .read_slice(len as usize)
            .ok_or_else(|| truncated(offset))
    }

    fn count(&mut self) -> Result<u8> {
        let offset = self.cursor.position();
        self.cursor.read_u8().ok_or_else(|| truncated(offset))
    }
}

fn truncated(offset: usize) -> Error {
    Error::render("unexpected end of bytecode", offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn render(bytecode: &[u8], ctx: &Context) -> Result<String> {
        let mut out = Vec::new();
        template(bytecode, &mut out, ctx)?;
        Ok(String::from_utf8(out).expect("rendered utf-8"))
    }

    fn string(buf: &mut Vec<u8>, s: &str) {
        buf.extend_from_slice(&(s.len() as u32).to_le_bytes());
        buf.extend_from_slice(s.as_bytes());
    }

    #[test]
    fn empty_program_renders_nothing() {
        assert_eq!(render(&[], &Context::new()).unwrap(), "");
    }

    #[test]
    fn literal_record_is_appended_verbatim() {
        let mut bytecode = vec![0x02];
        string(&mut bytecode, "a <b> &amp;");
        assert_eq!(render(&bytecode, &Context::new()).unwrap(), "a <b> &amp;");
    }

    #[test]
    fn tag_record_renders_name_modifiers_and_content() {
        let mut bytecode = vec![0x01];
        string(&mut bytecode, "a");
        bytecode.push(2);
        string(&mut bytecode, "href");
        string(&mut bytecode, "https://example.com");
        string(&mut bytecode, "class");
        string(&mut bytecode, "nav");
        bytecode.push(0x02);
        string(&mut bytecode, "Example");
        assert_eq!(
            render(&bytecode, &Context::new()).unwrap(),
            "<a href=\"https://example.com\" class=\"nav\">Example</a>"
        );
    }

    #[test]
    fn list_record_renders_each_child_in_order() {
        let mut bytecode = vec![0x03, 2];
        bytecode.push(0x02);
        string(&mut bytecode, "a");
        bytecode.push(0x02);
        string(&mut bytecode, "b");
        assert_eq!(render(&bytecode, &Context::new()).unwrap(), "ab");
    }

    #[test]
    fn context_value_resolves_a_single_key() {
        let mut bytecode = vec![0x04, 1];
        string(&mut bytecode, "user");
        let ctx = crate::context! { user: "nea" };
        assert_eq!(render(&bytecode, &ctx).unwrap(), "nea");
        assert_eq!(render(&bytecode, &Context::new()).unwrap(), "");
    }

    #[test]
    fn context_value_deep_path_renders_nothing() {
        let mut bytecode = vec![0x04, 2];
        string(&mut bytecode, "user");
        string(&mut bytecode, "name");
        let ctx = crate::context! { user: "nea" };
        assert_eq!(render(&bytecode, &ctx).unwrap(), "");
    }

    #[test]
    fn unknown_opcode_fails_with_its_offset() {
        let mut bytecode = vec![0x03, 2];
        bytecode.push(0x02);
        string(&mut bytecode, "a");
        bytecode.push(0x00);
        let err = render(&bytecode, &Context::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "internal compiler error: unknown opcode 0x00 (bytecode offset 8)"
        );
    }

    #[test]
    fn truncated_literal_fails() {
        // Declares four bytes but carries one.
        let bytecode = [0x02, 4, 0, 0, 0, b'a'];
        let err = render(&bytecode, &Context::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "internal compiler error: unexpected end of bytecode (bytecode offset 1)"
        );
    }

    #[test]
    fn missing_list_children_fail() {
        let mut bytecode = vec![0x03, 2];
        bytecode.push(0x02);
        string(&mut bytecode, "a");
        let err = render(&bytecode, &Context::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "internal compiler error: unexpected end of bytecode (bytecode offset 8)"
        );
    }

    #[test]
    fn partial_output_remains_on_failure() {
        let mut bytecode = vec![0x02];
        string(&mut bytecode, "kept");
        bytecode.push(0xff);
        let mut out = Vec::new();
        assert!(template(&bytecode, &mut out, &Context::new()).is_err());
        assert_eq!(out, b"kept");
    }
}
