//! INI Dialect and Mapping Reference
//!
//! This module documents the INI dialect read and written by this library, and how
//! struct properties map onto it. It contains no code.
//!
//! # Lines
//!
//! | Line | Meaning |
//! |------|---------|
//! | `[name]` | Starts a section. The same name may appear any number of times. |
//! | `key = value` | Adds `value` to `key` in the current section. |
//! | `key =` | Adds one empty string to `key`. |
//! | `key` | Declares `key` with no values at all (an "empty option"). |
//! | `# text`, `; text` | Comment, attached to the next key or section header. |
//! | blank | Ignored. |
//!
//! Keys before the first header belong to the nameless global section. Repeating a key
//! appends to its list of values, so
//!
//! ```text
//! port = 80
//! port = 443
//! ```
//!
//! is one key with two values. Repeating a header starts a new section; the order of
//! same-named sections is kept.
//!
//! A header may be followed by a comment on the same line. A value runs to the end of
//! the line, so `#` and `;` inside a value are part of it:
//!
//! ```text
//! url = http://example.org/#top
//! ```
//!
//! # Quoting and Escapes
//!
//! Values are written bare unless they start or end with whitespace or start with `"`.
//! Such values are wrapped in double quotes. Keys are also quoted when empty, when they
//! contain `=`, or when they start with `[`, `#` or `;`.
//!
//! ```text
//! \\  - backslash
//! \n  - newline
//! \r  - carriage return
//! \t  - tab
//! \0  - null character
//! \"  - quote
//! \]  - closing bracket (section names)
//! ```
//!
//! Any other backslash sequence is kept as written, so `path = C:\dir` reads back as
//! `C:\dir`.
//!
//! # Mapping Table
//!
//! Each property of a struct is routed by its kind and by whether its values render as a
//! single string:
//!
//! | Property | Written as | Read from |
//! |----------|------------|-----------|
//! | scalar | `name = value` | a key with exactly one value |
//! | `None` | nothing | absence |
//! | list of scalars | one `singular = value` per element | a key with any number of values |
//! | empty list | `singular` | a key with no values |
//! | struct | `[name]` | exactly one section |
//! | list of structs | one `[singular]` per element | one section per element |
//! | `None` list element | an empty `[singular]` | an empty section |
//! | map of scalars | `[name]` with one key per entry | exactly one section |
//! | `None` map value | a key with no values | a key with no values |
//! | map of structs | rejected | - |
//! | `()` or unit struct | rejected | - |
//!
//! The singular and plural names come from [`crate::inflect`]. When reading, a key or
//! section is matched to the property with the same name first, then to the property
//! named by its plural.
//!
//! ## Example
//!
//! ```text
//! #kennel settings
//! owner = bob
//! tag = north
//! tag = south
//!
//! [dog]
//! name = rex
//!
//! [dog]
//!
//! [env]
//! HOME = /home/bob
//! ```
//!
//! reads into
//!
//! ```rust,ignore
//! Kennel {
//!     owner: "bob",
//!     tags: vec!["north", "south"],
//!     dogs: vec![Some(Dog { name: "rex" }), None],
//!     env: {"HOME": "/home/bob"},
//! }
//! ```
//!
//! # Ambiguity
//!
//! A struct list element whose fields are all `None` serializes to an empty section,
//! which reads back as `None`. The library logs a warning when it writes one.
//!
//! # Errors
//!
//! | Condition | Error |
//! |-----------|-------|
//! | malformed line | [`crate::Error::Syntax`] |
//! | key with no matching property | [`crate::Error::UnmappedKey`] |
//! | section with no matching property | [`crate::Error::UnmappedSection`] |
//! | wrong number of values or sections | [`crate::Error::ShapeMismatch`] |
//! | sections inside sections | [`crate::Error::UnsupportedStructure`] |
//! | enum variant with data | [`crate::Error::UnrecognizedPropertyKind`] |
//! | unparseable scalar | [`crate::Error::InvalidValue`] |
