//! Defines the compiled bytecode format walked by the renderer.
//!
//! A program is a contiguous stream of records. Every record starts with a
//! one-byte [`Opcode`] followed by its payload; strings are a `u32`
//! little-endian length and exactly that many UTF-8 bytes, counts are a
//! single byte. The stream parses in one forward pass, no backtracking.

/// The record kinds of the bytecode stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Opcode {
    /// name string; modifier count; per modifier a key and value string;
    /// one nested record of content.
    Tag = 0x01,
    /// A string emitted verbatim.
    Literal = 0x02,
    /// Child count; that many nested records.
    List = 0x03,
    /// Key count; that many key strings, resolved against the context.
    ContextValue = 0x04,
}

impl Opcode {
    pub(crate) fn from_u8(byte: u8) -> Option<Opcode> {
        match byte {
            0x01 => Some(Opcode::Tag),
            0x02 => Some(Opcode::Literal),
            0x03 => Some(Opcode::List),
            0x04 => Some(Opcode::ContextValue),
            _ => None,
        }
    }
}
