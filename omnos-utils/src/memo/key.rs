//! Canonical cache-key encoding.
//!
//! A `serde::Serializer` that renders an argument list as compact text. The
//! output looks like JSON for plain data (`[1,"a"]`, `{"a":1,"b":2}`) but
//! differs where JSON would merge distinct values:
//!
//! | value                      | key                    |
//! |----------------------------|------------------------|
//! | `None` / `Some(x)`         | `none` / `some(x)`     |
//! | `()`                       | `unit`                 |
//! | unit struct `Marker`       | `Marker`               |
//! | `Enum::A`, `Enum::B(x)`    | `Enum::A`, `Enum::B(x)`|
//! | floats                     | `1.0`, `-0.0`, `2.5e-8`|
//!
//! Map entries and struct fields are sorted by their encoded key, so maps
//! encode the same regardless of iteration order. Map keys may be any
//! serializable type. NaN and the infinities have no canonical form and are
//! rejected.

use std::fmt::Display;

use serde::Serialize;
use serde::ser;

use crate::error::{Result, UtilError};

/// Encode `value` as a canonical key.
///
/// # Errors
/// `UtilError::Serialization` for non-finite floats or a failing
/// `Serialize` impl.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    value.serialize(KeySerializer)
}

impl ser::Error for UtilError {
    fn custom<T: Display>(msg: T) -> Self {
        UtilError::Serialization(msg.to_string())
    }
}

struct KeySerializer;

fn float(v: f64) -> Result<String> {
    if v.is_finite() {
        Ok(format!("{v:?}"))
    } else {
        Err(UtilError::Serialization(format!("non-finite float {v} has no canonical key")))
    }
}

impl ser::Serializer for KeySerializer {
    type Ok = String;
    type Error = UtilError;
    type SerializeSeq = SeqKey;
    type SerializeTuple = SeqKey;
    type SerializeTupleStruct = SeqKey;
    type SerializeTupleVariant = SeqKey;
    type SerializeMap = MapKey;
    type SerializeStruct = MapKey;
    type SerializeStructVariant = MapKey;

    fn serialize_bool(self, v: bool) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i8(self, v: i8) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i16(self, v: i16) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i32(self, v: i32) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i64(self, v: i64) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i128(self, v: i128) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u8(self, v: u8) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u16(self, v: u16) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u32(self, v: u32) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u64(self, v: u64) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u128(self, v: u128) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_f32(self, v: f32) -> Result<String> {
        if v.is_finite() {
            Ok(format!("{v:?}"))
        } else {
            float(f64::from(v))
        }
    }

    fn serialize_f64(self, v: f64) -> Result<String> {
        float(v)
    }

    fn serialize_char(self, v: char) -> Result<String> {
        Ok(serde_json::to_string(&v)?)
    }

    fn serialize_str(self, v: &str) -> Result<String> {
        Ok(serde_json::to_string(v)?)
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<String> {
        let items: Vec<String> = v.iter().map(u8::to_string).collect();
        Ok(format!("[{}]", items.join(",")))
    }

    fn serialize_none(self) -> Result<String> {
        Ok("none".to_string())
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<String> {
        Ok(format!("some({})", encode(value)?))
    }

    fn serialize_unit(self) -> Result<String> {
        Ok("unit".to_string())
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<String> {
        Ok(name.to_string())
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        _index: u32,
        variant: &'static str,
    ) -> Result<String> {
        Ok(format!("{name}::{variant}"))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<String> {
        encode(value)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        name: &'static str,
        _index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<String> {
        Ok(format!("{name}::{variant}({})", encode(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqKey> {
        Ok(SeqKey::new(String::new(), len))
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqKey> {
        Ok(SeqKey::new(String::new(), Some(len)))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SeqKey> {
        Ok(SeqKey::new(String::new(), Some(len)))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SeqKey> {
        Ok(SeqKey::new(format!("{name}::{variant}"), Some(len)))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<MapKey> {
        Ok(MapKey::new(String::new(), len))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<MapKey> {
        Ok(MapKey::new(String::new(), Some(len)))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<MapKey> {
        Ok(MapKey::new(format!("{name}::{variant}"), Some(len)))
    }
}

/// Sequences, tuples and tuple structs/variants: `prefix[a,b,c]`.
struct SeqKey {
    prefix: String,
    items: Vec<String>,
}

impl SeqKey {
    fn new(prefix: String, len: Option<usize>) -> Self {
        Self {
            prefix,
            items: Vec::with_capacity(len.unwrap_or(0)),
        }
    }

    fn push<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.items.push(encode(value)?);
        Ok(())
    }

    fn finish(self) -> String {
        format!("{}[{}]", self.prefix, self.items.join(","))
    }
}

impl ser::SerializeSeq for SeqKey {
    type Ok = String;
    type Error = UtilError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<String> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SeqKey {
    type Ok = String;
    type Error = UtilError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<String> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SeqKey {
    type Ok = String;
    type Error = UtilError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<String> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SeqKey {
    type Ok = String;
    type Error = UtilError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<String> {
        Ok(self.finish())
    }
}

/// Maps, structs and struct variants: `prefix{k:v,...}`, sorted by `k`.
struct MapKey {
    prefix: String,
    entries: Vec<(String, String)>,
    pending: Option<String>,
}

impl MapKey {
    fn new(prefix: String, len: Option<usize>) -> Self {
        Self {
            prefix,
            entries: Vec::with_capacity(len.unwrap_or(0)),
            pending: None,
        }
    }

    fn field<T: Serialize + ?Sized>(&mut self, name: &'static str, value: &T) -> Result<()> {
        self.entries.push((serde_json::to_string(name)?, encode(value)?));
        Ok(())
    }

    fn finish(mut self) -> String {
        self.entries.sort_unstable();
        let body: Vec<String> = self
            .entries
            .into_iter()
            .map(|(k, v)| format!("{k}:{v}"))
            .collect();
        format!("{}{{{}}}", self.prefix, body.join(","))
    }
}

impl ser::SerializeMap for MapKey {
    type Ok = String;
    type Error = UtilError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<()> {
        self.pending = Some(encode(key)?);
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        let key = self
            .pending
            .take()
            .ok_or_else(|| UtilError::Serialization("map value without a key".to_string()))?;
        self.entries.push((key, encode(value)?));
        Ok(())
    }

    fn end(self) -> Result<String> {
        Ok(self.finish())
    }
}

impl ser::SerializeStruct for MapKey {
    type Ok = String;
    type Error = UtilError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        name: &'static str,
        value: &T,
    ) -> Result<()> {
        self.field(name, value)
    }

    fn end(self) -> Result<String> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for MapKey {
    type Ok = String;
    type Error = UtilError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        name: &'static str,
        value: &T,
    ) -> Result<()> {
        self.field(name, value)
    }

    fn end(self) -> Result<String> {
        Ok(self.finish())
    }
}
