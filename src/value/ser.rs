//! Build a [`Context`] from serializable data.

use serde::ser::{Impossible, Serialize, Serializer};

use crate::value::{Context, Value};
use crate::{Error, Result};

/// Convert serializable data into a [`Context`].
///
/// The data must serialize as a map or struct, and its values must be
/// scalars: strings are taken verbatim, booleans, integers and floats use
/// their display form, unit and `None` become [`Value::Null`]. Nested lists
/// and maps are rejected, this engine's context is a flat table.
pub fn to_context<T>(value: T) -> Result<Context>
where
    T: Serialize,
{
    value.serialize(ContextSerializer)
}

/// Serializer whose output is a [`Context`].
///
/// Accepts only a map or struct at the top level.
struct ContextSerializer;

/// Serializer whose output is a single [`Value`].
struct ValueSerializer;

/// In-progress map or struct serialization.
struct ContextState {
    ctx: Context,
    key: Option<String>,
}

fn top_level(found: &str) -> Error {
    Error::new(format!(
        "expected a map or struct at the top level, found {found}"
    ))
}

fn nested(found: &str) -> Error {
    Error::new(format!("context values must be scalars, found {found}"))
}

impl Serializer for ContextSerializer {
    type Ok = Context;
    type Error = Error;

    type SerializeSeq = Impossible<Context, Error>;
    type SerializeTuple = Impossible<Context, Error>;
    type SerializeTupleStruct = Impossible<Context, Error>;
    type SerializeTupleVariant = Impossible<Context, Error>;
    type SerializeMap = ContextState;
    type SerializeStruct = ContextState;
    type SerializeStructVariant = Impossible<Context, Error>;

    fn serialize_bool(self, _: bool) -> Result<Context> {
        Err(top_level("a boolean"))
    }

    fn serialize_i8(self, v: i8) -> Result<Context> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Context> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Context> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, _: i64) -> Result<Context> {
        Err(top_level("an integer"))
    }

    fn serialize_u8(self, v: u8) -> Result<Context> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Context> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Context> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u64(self, _: u64) -> Result<Context> {
        Err(top_level("an integer"))
    }

    fn serialize_f32(self, _: f32) -> Result<Context> {
        Err(top_level("a float"))
    }

    fn serialize_f64(self, _: f64) -> Result<Context> {
        Err(top_level("a float"))
    }

    fn serialize_char(self, _: char) -> Result<Context> {
        Err(top_level("a character"))
    }

    fn serialize_str(self, _: &str) -> Result<Context> {
        Err(top_level("a string"))
    }

    fn serialize_bytes(self, _: &[u8]) -> Result<Context> {
        Err(top_level("a byte string"))
    }

    fn serialize_none(self) -> Result<Context> {
        Err(top_level("none"))
    }

    fn serialize_some<T: ?Sized>(self, value: &T) -> Result<Context>
    where
        T: Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Context> {
        Err(top_level("a unit"))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Context> {
        Err(top_level("a unit struct"))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<Context> {
        Err(top_level("a unit variant"))
    }

    fn serialize_newtype_struct<T: ?Sized>(self, _name: &'static str, value: &T) -> Result<Context>
    where
        T: Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Context>
    where
        T: Serialize,
    {
        Err(top_level("a newtype variant"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(top_level("a sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(top_level("a tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(top_level("a tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(top_level("a tuple variant"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(ContextState {
            ctx: Context::new(),
            key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Ok(ContextState {
            ctx: Context::new(),
            key: None,
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(top_level("a struct variant"))
    }
}

impl serde::ser::SerializeMap for ContextState {
    type Ok = Context;
    type Error = Error;

    fn serialize_key<T: ?Sized>(&mut self, key: &T) -> Result<()>
    where
        T: Serialize,
    {
        match key.serialize(ValueSerializer)? {
            Value::String(s) => {
                self.key = Some(s);
                Ok(())
            }
            _ => Err(Error::new("context keys must be strings")),
        }
    }

    fn serialize_value<T: ?Sized>(&mut self, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        let key = self
            .key
            .take()
            .ok_or_else(|| Error::new("context value serialized before its key"))?;
        let value = value.serialize(ValueSerializer)?;
        self.ctx.set(key, value);
        Ok(())
    }

    fn end(self) -> Result<Context> {
        Ok(self.ctx)
    }
}

impl serde::ser::SerializeStruct for ContextState {
    type Ok = Context;
    type Error = Error;

    fn serialize_field<T: ?Sized>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        let value = value.serialize(ValueSerializer)?;
        self.ctx.set(key, value);
        Ok(())
    }

    fn end(self) -> Result<Context> {
        Ok(self.ctx)
    }
}

impl Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = Impossible<Value, Error>;
    type SerializeTuple = Impossible<Value, Error>;
    type SerializeTupleStruct = Impossible<Value, Error>;
    type SerializeTupleVariant = Impossible<Value, Error>;
    type SerializeMap = Impossible<Value, Error>;
    type SerializeStruct = Impossible<Value, Error>;
    type SerializeStructVariant = Impossible<Value, Error>;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(String::from(v)))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(String::from(v)))
    }

    fn serialize_bytes(self, _: &[u8]) -> Result<Value> {
        Err(nested("a byte string"))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T: ?Sized>(self, value: &T) -> Result<Value>
    where
        T: Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::Static(variant))
    }

    fn serialize_newtype_struct<T: ?Sized>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Value>
    where
        T: Serialize,
    {
        Err(nested("a newtype variant"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(nested("a sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(nested("a tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(nested("a tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(nested("a tuple variant"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(nested("a map"))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(nested("a struct"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(nested("a struct variant"))
    }
}
