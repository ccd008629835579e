//! Bean to [`Document`] mapping.
//!
//! The root bean's own properties go to the global section. Each property is routed by
//! its [`PropertyDescriptor`]:
//!
//! - codec scalars become `key = value`
//! - nested structs become a `[property]` section
//! - codec lists become a repeated key under the singular property name
//! - struct lists become one section per element under the singular name, with a `None`
//!   element written as an empty section
//! - codec maps become a `[property]` section with one key per entry
//!
//! Sections cannot nest, so a nested struct may only hold scalars and scalar lists.

use crate::document::{Document, Section};
use crate::documentation::{Documentation, TypeDoc};
use crate::inflect::singularize;
use crate::property::{PropertyDescriptor, PropertyKind};
use crate::value::{Bean, Value};
use crate::{Error, Result};
use log::warn;

/// Maps a serialized root bean onto a fresh document.
///
/// # Errors
///
/// Returns [`Error::UnsupportedStructure`] when the root is not a struct, when a map holds
/// structs, or when a nested struct needs a section of its own.
pub(crate) fn marshal(root: &Value, docs: &Documentation) -> Result<Document> {
    let bean = match root {
        Value::Bean(bean) => bean,
        other => {
            return Err(Error::unsupported_structure(&format!(
                "the top-level value must be a struct, found {}",
                other.describe()
            )))
        }
    };

    let mut doc = Document::new();
    let owner = docs.for_type(bean.name());
    if let Some(comment) = owner.and_then(TypeDoc::type_comment) {
        doc.global_mut().set_comment(comment);
    }

    for (name, value) in bean.properties() {
        let property = PropertyDescriptor::describe(name, value, owner)?;
        match (property.kind, property.has_scalar_codec) {
            (PropertyKind::Scalar, true) => {
                if let Value::Scalar(text) = value {
                    let global = doc.global_mut();
                    global.put(name, text.as_str());
                    if let Some(comment) = property.documentation {
                        global.put_comment(name, comment);
                    }
                }
            }
            (PropertyKind::Scalar, false) => {
                if let Value::Bean(inner) = value {
                    let comment = property
                        .documentation
                        .or_else(|| docs.type_comment(inner.name()));
                    let section = doc.add_section(name);
                    if let Some(comment) = comment {
                        section.set_comment(comment);
                    }
                    write_bean_section(section, inner, docs)?;
                    warn_if_empty(section, inner);
                }
            }
            (PropertyKind::Array | PropertyKind::Collection, true) => {
                let key = singularize(name);
                let values = value.as_elements().unwrap_or_default();
                let global = doc.global_mut();
                global.put_all(key.as_str(), values.iter().filter_map(Value::as_str));
                if let Some(comment) = property.documentation {
                    global.put_comment(&key, comment);
                }
            }
            (PropertyKind::Array | PropertyKind::Collection, false) => {
                let section_name = singularize(name);
                let elements = value.as_elements().unwrap_or_default();
                let comment = property.documentation.or_else(|| {
                    elements
                        .iter()
                        .find_map(Value::as_bean)
                        .and_then(|inner| docs.type_comment(inner.name()))
                });
                for (index, element) in elements.iter().enumerate() {
                    let section = doc.add_section(section_name.as_str());
                    if index == 0 {
                        if let Some(comment) = comment {
                            section.set_comment(comment);
                        }
                    }
                    if let Value::Bean(inner) = element {
                        write_bean_section(section, inner, docs)?;
                        warn_if_empty(section, inner);
                    }
                }
            }
            (PropertyKind::Map, true) => {
                let section = doc.add_section(name);
                if let Some(comment) = property.documentation {
                    section.set_comment(comment);
                }
                for (key, entry) in value.as_map().into_iter().flatten() {
                    match entry {
                        Value::Scalar(text) => section.put(key.as_str(), text.as_str()),
                        _ => section.put_all(key.as_str(), Vec::<String>::new()),
                    }
                }
            }
            (PropertyKind::Map, false) => {
                return Err(Error::unsupported_structure(&format!(
                    "map `{}` has struct values, which would need sections inside a section",
                    name
                )))
            }
        }
    }

    Ok(doc)
}

/// Writes the properties of a nested struct into its own section.
fn write_bean_section(section: &mut Section, bean: &Bean, docs: &Documentation) -> Result<()> {
    let owner = docs.for_type(bean.name());

    for (name, value) in bean.properties() {
        let property = PropertyDescriptor::describe(name, value, owner)?;
        if !property.has_scalar_codec || property.kind == PropertyKind::Map {
            return Err(Error::unsupported_structure(&format!(
                "`{}.{}` is {}, but INI sections cannot nest",
                section.name(),
                name,
                value.describe()
            )));
        }

        let key = match (property.kind, value) {
            (PropertyKind::Scalar, Value::Scalar(text)) => {
                section.put(name, text.as_str());
                name.to_string()
            }
            (PropertyKind::Array | PropertyKind::Collection, _) => {
                let key = singularize(name);
                let values = value.as_elements().unwrap_or_default();
                section.put_all(key.as_str(), values.iter().filter_map(Value::as_str));
                key
            }
            _ => continue,
        };

        if let Some(comment) = property.documentation {
            section.put_comment(&key, comment);
        }
    }

    Ok(())
}

/// Logs a warning when a non-null bean produced an empty section, since it reads back as
/// null. Returns whether the warning fired.
fn warn_if_empty(section: &Section, bean: &Bean) -> bool {
    let empty = section.is_empty();
    if empty {
        warn!(
            "non-null `{}` was written as the empty section [{}], which reads back as null",
            bean.name(),
            section.name()
        );
    }
    empty
}
