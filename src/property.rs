//! Property descriptors: how one named property of a bean maps onto INI.
//!
//! A descriptor is derived from the serialized [`Value`] of a property. Its
//! [`PropertyKind`] and `has_scalar_codec` flag pick one row of the mapping table:
//!
//! | kind | scalar codec | written as |
//! |---|---|---|
//! | Scalar | yes | one `key = value` |
//! | Scalar | no | one `[property]` section |
//! | Array / Collection | yes | repeated `key` under the singular name |
//! | Array / Collection | no | one section per element under the singular name |
//! | Map | yes | one `[property]` section, one key per entry |
//! | Map | no | unsupported |

use crate::documentation::TypeDoc;
use crate::{Error, Result, Value};

/// The four shapes a property can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Scalar,
    Array,
    Collection,
    Map,
}

/// Capability view over one named property of a bean.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor<'a> {
    pub name: &'a str,
    pub kind: PropertyKind,
    /// True if the value (or each element/map value) renders as a single string;
    /// false if it is a struct that needs its own section.
    pub has_scalar_codec: bool,
    pub documentation: Option<&'a str>,
}

impl<'a> PropertyDescriptor<'a> {
    /// Describes the property `name` holding `value`, taking its documentation from
    /// `owner`, the documentation of the bean that declares it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedStructure`] for lists that INI cannot hold: lists or maps
    /// nested inside a list, lists mixing scalars and structs, and scalar lists containing
    /// null elements.
    pub fn describe(name: &'a str, value: &Value, owner: Option<&'a TypeDoc>) -> Result<Self> {
        let (kind, has_scalar_codec) = match value {
            Value::Null | Value::Scalar(_) => (PropertyKind::Scalar, true),
            Value::Bean(_) => (PropertyKind::Scalar, false),
            Value::Array(items) => (PropertyKind::Array, elements_have_codec(name, items)?),
            Value::Collection(items) => {
                (PropertyKind::Collection, elements_have_codec(name, items)?)
            }
            Value::Map(entries) => (
                PropertyKind::Map,
                entries.values().all(|v| v.is_null() || v.is_scalar()),
            ),
        };

        Ok(PropertyDescriptor {
            name,
            kind,
            has_scalar_codec,
            documentation: owner.and_then(|doc| doc.property_comment(name)),
        })
    }
}

fn elements_have_codec(name: &str, items: &[Value]) -> Result<bool> {
    if items.iter().any(Value::is_container) {
        return Err(Error::unsupported_structure(&format!(
            "`{}` nests a list or map inside a list",
            name
        )));
    }

    let scalars = items.iter().any(Value::is_scalar);
    let beans = items.iter().any(Value::is_bean);
    let nulls = items.iter().any(Value::is_null);

    match (scalars, beans) {
        (true, true) => Err(Error::unsupported_structure(&format!(
            "`{}` mixes scalars and structs",
            name
        ))),
        (true, false) if nulls => Err(Error::unsupported_structure(&format!(
            "`{}` has null elements, which a list of keys cannot represent",
            name
        ))),
        (true, false) => Ok(true),
        (false, true) => Ok(false),
        // empty lists are written as a key with no values, all-null lists as empty sections
        (false, false) => Ok(!nulls),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Bean;
    use indexmap::IndexMap;

    fn describe(value: &Value) -> Result<(PropertyKind, bool)> {
        PropertyDescriptor::describe("prop", value, None).map(|d| (d.kind, d.has_scalar_codec))
    }

    #[test]
    fn test_scalar_and_bean() {
        assert_eq!(describe(&Value::from("x")).unwrap(), (PropertyKind::Scalar, true));
        assert_eq!(describe(&Value::Null).unwrap(), (PropertyKind::Scalar, true));
        assert_eq!(
            describe(&Value::Bean(Bean::new("Inner"))).unwrap(),
            (PropertyKind::Scalar, false)
        );
    }

    #[test]
    fn test_lists() {
        let scalars = Value::Collection(vec![Value::from("a")]);
        assert_eq!(describe(&scalars).unwrap(), (PropertyKind::Collection, true));

        let beans = Value::Array(vec![Value::Bean(Bean::new("Inner")), Value::Null]);
        assert_eq!(describe(&beans).unwrap(), (PropertyKind::Array, false));

        assert_eq!(
            describe(&Value::Collection(vec![])).unwrap(),
            (PropertyKind::Collection, true)
        );
        assert_eq!(
            describe(&Value::Collection(vec![Value::Null])).unwrap(),
            (PropertyKind::Collection, false)
        );
    }

    #[test]
    fn test_unsupported_lists() {
        let nested = Value::Collection(vec![Value::Collection(vec![])]);
        assert!(matches!(describe(&nested), Err(Error::UnsupportedStructure(_))));

        let mixed = Value::Collection(vec![Value::from("a"), Value::Bean(Bean::new("B"))]);
        assert!(matches!(describe(&mixed), Err(Error::UnsupportedStructure(_))));

        let holes = Value::Collection(vec![Value::from("a"), Value::Null]);
        assert!(matches!(describe(&holes), Err(Error::UnsupportedStructure(_))));
    }

    #[test]
    fn test_maps() {
        let mut map = IndexMap::new();
        map.insert("a".to_string(), Value::from("1"));
        map.insert("b".to_string(), Value::Null);
        assert_eq!(describe(&Value::Map(map.clone())).unwrap(), (PropertyKind::Map, true));

        map.insert("c".to_string(), Value::Bean(Bean::new("B")));
        assert_eq!(describe(&Value::Map(map)).unwrap(), (PropertyKind::Map, false));
    }

    #[test]
    fn test_documentation_lookup() {
        let doc = TypeDoc::new("Outer").property("prop", "about prop");
        let descriptor = PropertyDescriptor::describe("prop", &Value::Null, Some(&doc)).unwrap();
        assert_eq!(descriptor.documentation, Some("about prop"));

        let descriptor = PropertyDescriptor::describe("other", &Value::Null, Some(&doc)).unwrap();
        assert_eq!(descriptor.documentation, None);
    }
}
