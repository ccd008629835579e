//! Serialization of Rust values into the intermediate [`Value`] tree.
//!
//! [`ValueSerializer`] is the property-introspection half of marshalling: it turns any
//! `T: Serialize` into a [`Value`] whose shape tells the marshaller how each property
//! maps onto INI. Scalars are rendered to strings here, so the marshaller only ever
//! handles strings.
//!
//! ```rust
//! use serde::Serialize;
//! use serde_inibean::{ValueSerializer, Value};
//!
//! let value = vec![1, 2, 3].serialize(ValueSerializer).unwrap();
//! assert_eq!(
//!     value,
//!     Value::Collection(vec![Value::from("1"), Value::from("2"), Value::from("3")])
//! );
//! ```

use crate::value::Bean;
use crate::{Error, Result, Value};
use indexmap::IndexMap;
use serde::{ser, Serialize};

/// Serializer producing a [`Value`].
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
    fixed: bool,
}

pub struct SerializeMap {
    map: IndexMap<String, Value>,
    current_key: Option<String>,
}

pub struct SerializeBean {
    bean: Bean,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = ser::Impossible<Value, Error>;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeBean;
    type SerializeStructVariant = ser::Impossible<Value, Error>;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Scalar(v.to_string()))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Scalar(v.to_string()))
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        Ok(Value::Scalar(v.to_string()))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::Scalar(v.to_string()))
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        Ok(Value::Scalar(v.to_string()))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        // f32's own Display keeps the shortest representation that parses back exactly
        Ok(Value::Scalar(v.to_string()))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Scalar(v.to_string()))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::Scalar(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::Scalar(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        let vec = v.iter().map(|b| Value::Scalar(b.to_string())).collect();
        Ok(Value::Collection(vec))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    // `()` and unit structs have no INI form
    fn serialize_unit(self) -> Result<Value> {
        Err(Error::unrecognized_kind("unit value `()`"))
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Value> {
        Err(Error::unrecognized_kind(&format!("unit struct {}", name)))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::Scalar(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::unrecognized_kind(&format!(
            "newtype variant {}::{}",
            name, variant
        )))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0), false))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, true))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, true))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::unrecognized_kind(&format!(
            "tuple variant {}::{}",
            name, variant
        )))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap {
            map: IndexMap::with_capacity(len.unwrap_or(0)),
            current_key: None,
        })
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<SerializeBean> {
        Ok(SerializeBean {
            bean: Bean::new(name),
        })
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::unrecognized_kind(&format!(
            "struct variant {}::{}",
            name, variant
        )))
    }
}

impl SerializeVec {
    fn new(capacity: usize, fixed: bool) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
            fixed,
        }
    }

    fn finish(self) -> Value {
        if self.fixed {
            Value::Array(self.vec)
        } else {
            Value::Collection(self.vec)
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_value(key)? {
            Value::Scalar(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            other => Err(Error::unsupported_structure(&format!(
                "map keys must be scalars, found {}",
                other.describe()
            ))),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Map(self.map))
    }
}

impl ser::SerializeStruct for SerializeBean {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.bean.push(key, to_value(value)?);
        Ok(())
    }

    fn skip_field(&mut self, _key: &'static str) -> Result<()> {
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Bean(self.bean))
    }
}

/// Convert any `T: Serialize` into a [`Value`].
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}
