//! Deserialization of beans from a [`Document`].
//!
//! This is the unmarshalling half of the crate. The root struct reads its own properties
//! from the keys of the global section and from the named sections; every key and
//! section is matched to a field by its exact name first and by its plural second, so
//! repeated `[dog]` sections fill a `dogs` field.
//!
//! Fields are resolved against the field list serde hands to `deserialize_struct`, which
//! means the root type (and every nested type) must be a struct with named fields.
//!
//! ## Example
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_inibean::{Deserializer, Document};
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Dog { name: String }
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Kennel { owner: String, dogs: Vec<Dog> }
//!
//! let doc: Document = "owner = bob\n[dog]\nname = rex\n[dog]\nname = fido\n".parse().unwrap();
//! let kennel = Kennel::deserialize(Deserializer::new(&doc)).unwrap();
//! assert_eq!(kennel.dogs.len(), 2);
//! assert_eq!(kennel.dogs[1].name, "fido");
//! ```

use crate::document::{Document, Section};
use crate::inflect::pluralize;
use crate::{Error, Result};
use log::debug;
use serde::de::{self, value::BorrowedStrDeserializer, Deserializer as _};
use serde::forward_to_deserialize_any;
use std::str::FromStr;

/// Deserializes the root bean of a [`Document`].
#[derive(Clone, Copy)]
pub struct Deserializer<'de> {
    doc: &'de Document,
}

impl<'de> Deserializer<'de> {
    pub fn new(doc: &'de Document) -> Self {
        Deserializer { doc }
    }
}

impl<'de> de::Deserializer<'de> for Deserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::unsupported_structure(
            "the top-level type must be a struct with named fields",
        ))
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let global = self.doc.global();
        let sections = self
            .doc
            .section_names()
            .into_iter()
            .map(|name| (name, self.doc.get_all(name)))
            .collect();
        visitor.visit_map(BeanAccess::new(global, fields, sections))
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map enum identifier ignored_any
    }
}

/// Finds the field for a key or section name: exact match, then the plural form.
fn resolve(fields: &'static [&'static str], name: &str, what: &str) -> Option<&'static str> {
    if let Some(field) = fields.iter().copied().find(|field| *field == name) {
        return Some(field);
    }
    let plural = pluralize(name);
    let field = fields.iter().copied().find(|field| *field == plural)?;
    debug!("matched {} `{}` to property `{}`", what, name, field);
    Some(field)
}

fn count(n: usize, unit: &str) -> String {
    match n {
        0 => format!("no {}s", unit),
        1 => format!("1 {}", unit),
        _ => format!("{} {}s", n, unit),
    }
}

enum Pending<'de> {
    Values(&'de str, &'de [String]),
    Sections(&'de str, Vec<&'de Section>),
}

/// Struct fields read from the keys of one section, then from named sections (root only).
struct BeanAccess<'de> {
    section: &'de Section,
    fields: &'static [&'static str],
    keys: std::vec::IntoIter<(&'de str, &'de [String])>,
    sections: std::vec::IntoIter<(&'de str, Vec<&'de Section>)>,
    pending: Option<Pending<'de>>,
}

impl<'de> BeanAccess<'de> {
    fn new(
        section: &'de Section,
        fields: &'static [&'static str],
        sections: Vec<(&'de str, Vec<&'de Section>)>,
    ) -> Self {
        let keys: Vec<_> = section
            .entries()
            .map(|(key, entry)| (key, entry.values()))
            .collect();
        BeanAccess {
            section,
            fields,
            keys: keys.into_iter(),
            sections: sections.into_iter(),
            pending: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for BeanAccess<'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        let field = if let Some((key, values)) = self.keys.next() {
            let field = resolve(self.fields, key, "key")
                .ok_or_else(|| Error::unmapped_key(self.section.name(), key))?;
            self.pending = Some(Pending::Values(field, values));
            field
        } else if let Some((name, sections)) = self.sections.next() {
            let field = resolve(self.fields, name, "section")
                .ok_or_else(|| Error::unmapped_section(name))?;
            self.pending = Some(Pending::Sections(field, sections));
            field
        } else {
            return Ok(None);
        };

        seed.deserialize(BorrowedStrDeserializer::new(field)).map(Some)
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.pending.take() {
            Some(Pending::Values(property, values)) => {
                seed.deserialize(ValuesDeserializer::new(property, values))
            }
            Some(Pending::Sections(property, sections)) => {
                seed.deserialize(SectionsDeserializer { property, sections })
            }
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.keys.len() + self.sections.len())
    }
}

macro_rules! forward_to_single_value {
    ($($method:ident)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                self.single()?.$method(visitor)
            }
        )*
    };
}

/// The values of one key: a scalar, a list, or (inside a map section) an optional scalar.
struct ValuesDeserializer<'de> {
    property: &'de str,
    values: &'de [String],
    /// The map property when this key is one entry of a map section.
    map: Option<&'de str>,
}

impl<'de> ValuesDeserializer<'de> {
    fn new(property: &'de str, values: &'de [String]) -> Self {
        ValuesDeserializer {
            property,
            values,
            map: None,
        }
    }

    fn map_value(map: &'de str, key: &'de str, values: &'de [String]) -> Self {
        ValuesDeserializer {
            property: key,
            values,
            map: Some(map),
        }
    }

    fn single(&self) -> Result<ScalarDeserializer<'de>> {
        match self.values {
            [value] => Ok(ScalarDeserializer::new(self.property, value)),
            other => Err(Error::shape_mismatch(
                self.property,
                "exactly one value",
                count(other.len(), "value"),
            )),
        }
    }

    fn section_expected(&self) -> Error {
        match self.map {
            Some(map) => Error::unsupported_structure(&format!(
                "map `{}` can only hold scalar values, but entry `{}` asks for a nested structure",
                map, self.property
            )),
            None => Error::shape_mismatch(self.property, "a section", "a key"),
        }
    }
}

impl<'de> de::Deserializer<'de> for ValuesDeserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match (self.values, self.map) {
            ([value], _) => visitor.visit_borrowed_str(value),
            ([], Some(_)) => visitor.visit_none(),
            (_, Some(_)) => self.single()?.deserialize_any(visitor),
            _ => self.deserialize_seq(visitor),
        }
    }

    forward_to_single_value! {
        deserialize_bool deserialize_i8 deserialize_i16 deserialize_i32 deserialize_i64
        deserialize_i128 deserialize_u8 deserialize_u16 deserialize_u32 deserialize_u64
        deserialize_u128 deserialize_f32 deserialize_f64 deserialize_char deserialize_str
        deserialize_string deserialize_identifier
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.map.is_some() && self.values.is_empty() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.map.is_some() {
            return Err(self.section_expected());
        }
        visitor.visit_seq(ValuesSeq {
            property: self.property,
            values: self.values.iter(),
        })
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.section_expected())
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.section_expected())
    }

    fn deserialize_enum<V>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.single()?.deserialize_enum(name, variants, visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }
}

struct ValuesSeq<'de> {
    property: &'de str,
    values: std::slice::Iter<'de, String>,
}

impl<'de> de::SeqAccess<'de> for ValuesSeq<'de> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.values.next() {
            Some(value) => seed
                .deserialize(ScalarDeserializer::new(self.property, value))
                .map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.values.len())
    }
}

/// All same-named sections backing one property.
struct SectionsDeserializer<'de> {
    property: &'de str,
    sections: Vec<&'de Section>,
}

impl<'de> SectionsDeserializer<'de> {
    fn only_section(&self) -> Result<&'de Section> {
        match self.sections.as_slice() {
            [section] => Ok(*section),
            other => Err(Error::shape_mismatch(
                self.property,
                "exactly one section",
                count(other.len(), "section"),
            )),
        }
    }
}

impl<'de> de::Deserializer<'de> for SectionsDeserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::shape_mismatch(self.property, "a key", "a section"))
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_seq(SectionsSeq {
            property: self.property,
            sections: self.sections.into_iter(),
        })
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let section = self.only_section()?;
        visitor.visit_map(MapSectionAccess::new(self.property, section))
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let section = self.only_section()?;
        visitor.visit_map(BeanAccess::new(section, fields, Vec::new()))
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct enum identifier
    }
}

struct SectionsSeq<'de> {
    property: &'de str,
    sections: std::vec::IntoIter<&'de Section>,
}

impl<'de> de::SeqAccess<'de> for SectionsSeq<'de> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.sections.next() {
            Some(section) => seed
                .deserialize(ElementDeserializer {
                    property: self.property,
                    section,
                })
                .map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.sections.len())
    }
}

/// One section standing for one list element. An empty section is a `None` element.
struct ElementDeserializer<'de> {
    property: &'de str,
    section: &'de Section,
}

impl<'de> ElementDeserializer<'de> {
    fn key_expected(&self) -> Error {
        Error::shape_mismatch(self.property, "a key", "a section")
    }
}

impl<'de> de::Deserializer<'de> for ElementDeserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(self.key_expected())
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.section.is_empty() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_map(BeanAccess::new(self.section, fields, Vec::new()))
    }

    fn deserialize_map<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::unsupported_structure(&format!(
            "`{}` is a list of maps, which would need sections inside a section",
            self.property
        )))
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct enum identifier
    }
}

/// A map property: one section, one key per entry.
struct MapSectionAccess<'de> {
    property: &'de str,
    entries: std::vec::IntoIter<(&'de str, &'de [String])>,
    pending: Option<(&'de str, &'de [String])>,
}

impl<'de> MapSectionAccess<'de> {
    fn new(property: &'de str, section: &'de Section) -> Self {
        let entries: Vec<_> = section
            .entries()
            .map(|(key, entry)| (key, entry.values()))
            .collect();
        MapSectionAccess {
            property,
            entries: entries.into_iter(),
            pending: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapSectionAccess<'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.entries.next() {
            Some((key, values)) => {
                self.pending = Some((key, values));
                seed.deserialize(ScalarDeserializer::new(key, key)).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.pending.take() {
            Some((key, values)) => {
                seed.deserialize(ValuesDeserializer::map_value(self.property, key, values))
            }
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.entries.len())
    }
}

macro_rules! parse_scalar {
    ($($method:ident => $visit:ident($ty:ty))*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                visitor.$visit(self.parse::<$ty>()?)
            }
        )*
    };
}

/// One string value converted through serde's primitive visitors.
struct ScalarDeserializer<'de> {
    property: &'de str,
    value: &'de str,
}

impl<'de> ScalarDeserializer<'de> {
    fn new(property: &'de str, value: &'de str) -> Self {
        ScalarDeserializer { property, value }
    }

    fn parse<T: FromStr>(&self) -> Result<T> {
        self.value
            .parse()
            .map_err(|_| Error::invalid_value(self.property, self.value, std::any::type_name::<T>()))
    }
}

impl<'de> de::Deserializer<'de> for ScalarDeserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.value)
    }

    parse_scalar! {
        deserialize_bool => visit_bool(bool)
        deserialize_i8 => visit_i8(i8)
        deserialize_i16 => visit_i16(i16)
        deserialize_i32 => visit_i32(i32)
        deserialize_i64 => visit_i64(i64)
        deserialize_i128 => visit_i128(i128)
        deserialize_u8 => visit_u8(u8)
        deserialize_u16 => visit_u16(u16)
        deserialize_u32 => visit_u32(u32)
        deserialize_u64 => visit_u64(u64)
        deserialize_u128 => visit_u128(u128)
        deserialize_f32 => visit_f32(f32)
        deserialize_f64 => visit_f64(f64)
        deserialize_char => visit_char(char)
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_bytes(self.value.as_bytes())
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_bytes(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if !variants.contains(&self.value) {
            return Err(Error::invalid_value(
                self.property,
                self.value,
                &format!("one of {}", variants.join(", ")),
            ));
        }
        visitor.visit_enum(BorrowedStrDeserializer::new(self.value))
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    forward_to_deserialize_any! {
        str string unit_struct seq tuple tuple_struct map struct identifier
    }
}
