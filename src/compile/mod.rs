//! Compile a document tree into bytecode.
//!
//! This process has two stages:
//! - The optimizer folds the static parts of the tree into as few nodes as
//!   possible.
//! - The writer serializes the optimized tree into the byte stream that the
//!   renderer walks.

mod optimize;

use crate::html::Root;
use crate::node::{Modifier, Node};
use crate::program::Opcode;
use crate::{Error, Result, Template};

/// Compile a document into a template.
pub(crate) fn template(root: Root) -> Result<Template> {
    let optimize::Optimized { node, .. } = optimize::tree(root.into_node());
    let mut writer = Writer::new();
    match node {
        // An empty document compiles to an empty program.
        Node::None => {}
        node => writer.write(&node)?,
    }
    Ok(Template::from_bytes(writer.finish()))
}

/// Serializes nodes into the byte stream.
struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    fn new() -> Self {
        Self { buf: Vec::new() }
    }

    fn finish(self) -> Vec<u8> {
        self.buf
    }

    fn write(&mut self, node: &Node) -> Result<()> {
        match node {
            Node::None => Err(Error::new("cannot serialize an empty node")),
            Node::Lazy(_) => Err(Error::new("cannot serialize an unresolved lazy node")),
            Node::Literal(s) => {
                self.opcode(Opcode::Literal);
                self.string(s)
            }
            Node::List(children) => {
                self.opcode(Opcode::List);
                self.count(children.len(), "list child")?;
                for child in children {
                    self.write(child)?;
                }
                Ok(())
            }
            Node::Tag {
                name,
                modifiers,
                content,
            } => {
                self.opcode(Opcode::Tag);
                self.string(name)?;
                self.count(modifiers.len(), "modifier")?;
                for Modifier::Attribute { name, value } in modifiers {
                    self.string(name)?;
                    self.string(value)?;
                }
                self.write(content)
            }
            Node::ContextValue(path) => {
                if path.is_empty() {
                    return Err(Error::new("context value with an empty key path"));
                }
                self.opcode(Opcode::ContextValue);
                self.count(path.len(), "context key")?;
                for key in path {
                    self.string(key)?;
                }
                Ok(())
            }
        }
    }

    fn opcode(&mut self, opcode: Opcode) {
        self.buf.push(opcode as u8);
    }

    /// A string is a `u32` little-endian length and the UTF-8 bytes.
    fn string(&mut self, s: &str) -> Result<()> {
        let len = u32::try_from(s.len())
            .map_err(|_| Error::new("string length exceeds the u32 range"))?;
        self.buf.extend_from_slice(&len.to_le_bytes());
        self.buf.extend_from_slice(s.as_bytes());
        Ok(())
    }

    /// Counts are one byte; larger trees are a precondition violation.
    fn count(&mut self, len: usize, what: &str) -> Result<()> {
        let count = u8::try_from(len)
            .map_err(|_| Error::new(format!("{what} count {len} exceeds 255")))?;
        self.buf.push(count);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::node::render_naive;
    use crate::Context;

    use pretty_assertions::assert_eq;

    fn write(node: &Node) -> Result<Vec<u8>> {
        let mut writer = Writer::new();
        writer.write(node)?;
        Ok(writer.finish())
    }

    fn lit(s: &str) -> Node {
        Node::Literal(String::from(s))
    }

    #[test]
    fn literal_record() {
        let bytes = write(&lit("hi")).unwrap();
        assert_eq!(bytes, [0x02, 2, 0, 0, 0, b'h', b'i']);
    }

    #[test]
    fn empty_literal_record() {
        let bytes = write(&lit("")).unwrap();
        assert_eq!(bytes, [0x02, 0, 0, 0, 0]);
    }

    #[test]
    fn tag_record() {
        let node = Node::Tag {
            name: "a",
            modifiers: vec![Modifier::Attribute {
                name: String::from("href"),
                value: String::from("/"),
            }],
            content: Box::new(lit("x")),
        };
        let bytes = write(&node).unwrap();
        #[rustfmt::skip]
        assert_eq!(
            bytes,
            [
                0x01,                               // tag
                1, 0, 0, 0, b'a',                   // name
                1,                                  // one modifier
                4, 0, 0, 0, b'h', b'r', b'e', b'f', // key
                1, 0, 0, 0, b'/',                   // value
                0x02, 1, 0, 0, 0, b'x',             // content
            ]
        );
    }

    #[test]
    fn list_record() {
        let node = Node::List(vec![lit("a"), lit("b")]);
        let bytes = write(&node).unwrap();
        #[rustfmt::skip]
        assert_eq!(
            bytes,
            [
                0x03, 2,                 // list of two
                0x02, 1, 0, 0, 0, b'a',
                0x02, 1, 0, 0, 0, b'b',
            ]
        );
    }

    #[test]
    fn context_value_record() {
        let node = Node::ContextValue(vec![String::from("user"), String::from("name")]);
        let bytes = write(&node).unwrap();
        #[rustfmt::skip]
        assert_eq!(
            bytes,
            [
                0x04, 2,                               // two keys
                4, 0, 0, 0, b'u', b's', b'e', b'r',
                4, 0, 0, 0, b'n', b'a', b'm', b'e',
            ]
        );
    }

    #[test]
    fn empty_context_path_is_rejected() {
        let err = write(&Node::ContextValue(Vec::new())).unwrap_err();
        assert_eq!(
            err.to_string(),
            "internal compiler error: context value with an empty key path"
        );
    }

    #[test]
    fn none_is_never_serialized() {
        let err = write(&Node::None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "internal compiler error: cannot serialize an empty node"
        );
    }

    #[test]
    fn unresolved_lazy_is_rejected() {
        let err = write(&Node::Lazy(Box::new(|| Node::None))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "internal compiler error: cannot serialize an unresolved lazy node"
        );
    }

    #[test]
    fn count_boundaries() {
        let children: Vec<Node> = (0..255)
            .map(|_| Node::ContextValue(vec![String::from("k")]))
            .collect();
        assert!(write(&Node::List(children)).is_ok());

        let children: Vec<Node> = (0..256)
            .map(|_| Node::ContextValue(vec![String::from("k")]))
            .collect();
        let err = write(&Node::List(children)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "internal compiler error: list child count 256 exceeds 255"
        );
    }

    #[test]
    fn modifier_count_over_255_is_rejected() {
        let modifiers = (0..256)
            .map(|i| Modifier::Attribute {
                name: format!("data-{i}"),
                value: String::new(),
            })
            .collect();
        let node = Node::Tag {
            name: "p",
            modifiers,
            content: Box::new(Node::None),
        };
        let err = write(&node).unwrap_err();
        assert_eq!(
            err.to_string(),
            "internal compiler error: modifier count 256 exceeds 255"
        );
    }

    #[test]
    fn write_then_render_matches_naive_render() {
        let tree = Node::List(vec![
            lit("a"),
            Node::ContextValue(vec![String::from("user")]),
            Node::Tag {
                name: "p",
                modifiers: Vec::new(),
                content: Box::new(lit("b")),
            },
        ]);
        let ctx = crate::context! { user: "nea" };

        let bytes = write(&tree).unwrap();
        let mut out = Vec::new();
        crate::render::template(&bytes, &mut out, &ctx).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), render_naive(&tree, &ctx));
    }

    #[test]
    fn optimized_write_then_render_matches_naive_render() {
        let make = || {
            Node::List(vec![
                Node::Tag {
                    name: "p",
                    modifiers: Vec::new(),
                    content: Box::new(lit("a")),
                },
                Node::ContextValue(vec![String::from("user")]),
                lit("tail"),
            ])
        };
        let ctx = crate::context! { user: "nea" };

        let optimized = optimize::tree(make()).node;
        let bytes = write(&optimized).unwrap();
        let mut out = Vec::new();
        crate::render::template(&bytes, &mut out, &ctx).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), render_naive(&make(), &ctx));
    }

    #[test]
    fn compiled_template_renders_like_the_tree() {
        use crate::html::{Body, ContextValue, Root, P};

        let template = template(Root::new(Body::new((
            P::new("a"),
            ContextValue::new("user"),
        ))))
        .unwrap();

        let ctx = crate::context! { user: "nea" };
        let mut out = Vec::new();
        crate::render::template(template.as_bytes(), &mut out, &ctx).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "<body><p>a</p>nea</body>"
        );
    }

    #[test]
    fn fully_static_document_is_one_literal_record() {
        use crate::html::{Body, Root, P};

        let template = template(Root::new(Body::new(P::new("hello")))).unwrap();
        let bytes = template.as_bytes();
        assert_eq!(bytes[0], Opcode::Literal as u8);
        let body = "<body><p>hello</p></body>";
        assert_eq!(&bytes[1..5], (body.len() as u32).to_le_bytes().as_slice());
        assert_eq!(&bytes[5..], body.as_bytes());
    }

    #[test]
    fn empty_document_has_empty_bytecode() {
        use crate::html::Root;

        let template = template(Root::empty()).unwrap();
        assert!(template.as_bytes().is_empty());
        let mut out = Vec::new();
        crate::render::template(template.as_bytes(), &mut out, &Context::new()).unwrap();
        assert!(out.is_empty());
    }
}
