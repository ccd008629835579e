//! # serde_inibean
//!
//! A Serde-compatible mapping between typed structs ("beans") and INI documents.
//!
//! ## How a bean maps onto INI
//!
//! INI has a much weaker data model than Rust: flat `key = value` lines, repeatable
//! sections, no nesting. This crate decides, for every property of a struct, whether it
//! becomes a flat key, a repeated key, a section or a repeated section:
//!
//! - scalars (numbers, strings, booleans, unit enum variants) become `key = value`
//! - lists of scalars become one `key = value` line per element, under the singular name
//! - nested structs become a `[property]` section
//! - lists of structs become one section per element, under the singular name
//! - string-keyed maps of scalars become a `[property]` section with one key per entry
//!
//! Reading goes the other way, matching each key and section to a property by its exact
//! name, then by its plural, so repeated `[dog]` sections fill a `dogs` list.
//!
//! The mapping keeps `None` and empty apart: a `None` field writes nothing, an empty list
//! writes its key with no value, and an empty string writes `key = `. See [`format`] for
//! the full dialect.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! serde_inibean = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_inibean::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Dog {
//!     name: String,
//! }
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Kennel {
//!     owner: String,
//!     tags: Vec<String>,
//!     dogs: Vec<Dog>,
//! }
//!
//! let kennel = Kennel {
//!     owner: "bob".to_string(),
//!     tags: vec!["north".to_string(), "south".to_string()],
//!     dogs: vec![Dog { name: "rex".to_string() }, Dog { name: "fido".to_string() }],
//! };
//!
//! let ini = to_string(&kennel).unwrap();
//! assert_eq!(
//!     ini,
//!     "owner = bob\ntag = north\ntag = south\n\n[dog]\nname = rex\n\n[dog]\nname = fido\n"
//! );
//!
//! let back: Kennel = from_str(&ini).unwrap();
//! assert_eq!(kennel, back);
//! ```
//!
//! ## Documentation comments
//!
//! Types implementing [`Documented`] get their comments written above the keys and
//! sections they describe; see [`documentation`].
//!
//! ## Limits
//!
//! INI sections cannot nest. A struct inside a nested struct, a list of lists and a map
//! of structs are rejected with [`Error::UnsupportedStructure`]. An element of a struct
//! list that serializes to no keys at all is written as an empty section, which reads
//! back as `None`; a warning is logged through the `log` facade when that happens.

pub mod de;
pub mod document;
pub mod documentation;
pub mod error;
pub mod format;
pub mod inflect;
mod marshal;
pub mod options;
pub mod property;
mod reader;
pub mod ser;
pub mod value;
mod writer;

pub use de::Deserializer;
pub use document::{Document, Entry, Section, GLOBAL_SECTION};
pub use documentation::{Documentation, Documented, TypeDoc};
pub use error::{Error, Result};
pub use options::{CommentMarker, Dialect};
pub use property::{PropertyDescriptor, PropertyKind};
pub use ser::{to_value, ValueSerializer};
pub use value::{Bean, Value};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io;

/// Serialize a struct to an INI string.
///
/// # Examples
///
/// ```rust
/// use serde_inibean::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Server { host: String, port: u16 }
///
/// let ini = to_string(&Server { host: "localhost".into(), port: 8080 }).unwrap();
/// assert_eq!(ini, "host = localhost\nport = 8080\n");
/// ```
///
/// # Errors
///
/// Returns an error if the value is not a struct or holds a shape INI cannot express.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &Documentation::new(), &Dialect::default())
}

/// Serialize a documented struct to an INI string, with its comments.
///
/// # Errors
///
/// Returns an error if the value is not a struct or holds a shape INI cannot express.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_documented<T>(value: &T) -> Result<String>
where
    T: Serialize + Documented,
{
    to_string_with_options(value, &Documentation::of::<T>(), &Dialect::default())
}

/// Serialize a struct to an INI string with explicit documentation and formatting.
///
/// # Examples
///
/// ```rust
/// use serde_inibean::{to_string_with_options, CommentMarker, Dialect, Documentation, TypeDoc};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Server { port: u16 }
///
/// let docs = Documentation::new().with(TypeDoc::new("Server").property("port", "listen port"));
/// let dialect = Dialect::new().with_comment_marker(CommentMarker::Semicolon);
/// let ini = to_string_with_options(&Server { port: 80 }, &docs, &dialect).unwrap();
/// assert_eq!(ini, ";listen port\nport = 80\n");
/// ```
///
/// # Errors
///
/// Returns an error if the value is not a struct or holds a shape INI cannot express.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(
    value: &T,
    docs: &Documentation,
    dialect: &Dialect,
) -> Result<String>
where
    T: ?Sized + Serialize,
{
    Ok(to_document(value, docs)?.to_ini_string(dialect))
}

/// Map a struct onto a [`Document`] without rendering it.
///
/// # Errors
///
/// Returns an error if the value is not a struct or holds a shape INI cannot express.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_document<T>(value: &T, docs: &Documentation) -> Result<Document>
where
    T: ?Sized + Serialize,
{
    marshal::marshal(&to_value(value)?, docs)
}

/// Serialize a struct as INI text into a writer.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let ini = to_string(value)?;
    writer
        .write_all(ini.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize a struct from INI text.
///
/// # Examples
///
/// ```rust
/// use serde_inibean::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Server { host: String, port: u16 }
///
/// let server: Server = from_str("host = localhost\nport = 8080\n").unwrap();
/// assert_eq!(server, Server { host: "localhost".into(), port: 8080 });
/// ```
///
/// # Errors
///
/// Returns an error if the text is not valid INI (with line and column), or if a key or
/// section does not fit the target type.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let doc = Document::parse(s)?;
    from_document(&doc)
}

/// Deserialize a struct from INI text that may be absent. Absent text gives `Ok(None)`.
///
/// ```rust
/// use serde_inibean::from_optional_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, Debug)]
/// struct Server { port: u16 }
///
/// assert!(from_optional_str::<Server>(None).unwrap().is_none());
/// assert_eq!(from_optional_str::<Server>(Some("port = 1")).unwrap().map(|s| s.port), Some(1));
/// ```
///
/// # Errors
///
/// Same as [`from_str`] when text is present.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_optional_str<T>(s: Option<&str>) -> Result<Option<T>>
where
    T: DeserializeOwned,
{
    s.map(from_str::<T>).transpose()
}

/// Deserialize a struct from a parsed [`Document`]. Strings may borrow from the document.
///
/// # Errors
///
/// Returns an error if a key or section does not fit the target type.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_document<'de, T>(doc: &'de Document) -> Result<T>
where
    T: Deserialize<'de>,
{
    T::deserialize(Deserializer::new(doc))
}

/// Deserialize a struct from an I/O stream of INI text.
///
/// # Errors
///
/// Returns an error if reading fails, or for any reason [`from_str`] fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Deserialize a struct from bytes of INI text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, or for any reason [`from_str`] fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}
