//! Error types for INI marshalling and unmarshalling.
//!
//! Every failure is fatal for the call that produced it: a marshal or unmarshal either
//! returns a complete result or an [`Error`], never a partial document or bean.
//!
//! ## Error Categories
//!
//! - **Syntax Errors**: the INI text itself is malformed (line/column information included)
//! - **Mapping Errors**: a section or key has no matching property ([`Error::UnmappedSection`],
//!   [`Error::UnmappedKey`])
//! - **Shape Errors**: the number of values or sections does not fit the property
//!   ([`Error::ShapeMismatch`])
//! - **Structural Errors**: the Rust type cannot be expressed in INI at all
//!   ([`Error::UnsupportedStructure`], [`Error::UnrecognizedPropertyKind`])
//! - **Value Errors**: a string could not be converted into the property's type
//!
//! ## Examples
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_inibean::{from_str, Error};
//!
//! #[derive(Deserialize, Debug)]
//! struct Server { port: u16 }
//!
//! let result: Result<Server, Error> = from_str("host = example.org\n");
//! assert!(matches!(result, Err(Error::UnmappedKey { .. })));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while mapping between beans and INI.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Malformed INI text
    #[error("Syntax error at line {line}, column {col}: {msg}")]
    Syntax { line: usize, col: usize, msg: String },

    /// A section name matches no property, neither exactly nor by its plural form
    #[error("No property found for section [{section}]")]
    UnmappedSection { section: String },

    /// A key matches no property, neither exactly nor by its plural form
    #[error("No property found for key `{key}` in {section}")]
    UnmappedKey { section: String, key: String },

    /// Cardinality violation between a property and the values or sections backing it
    #[error("Shape mismatch for `{property}`: expected {expected}, found {found}")]
    ShapeMismatch {
        property: String,
        expected: String,
        found: String,
    },

    /// The value cannot be expressed in INI (for example sections nested in sections)
    #[error("Unsupported structure: {0}")]
    UnsupportedStructure(String),

    /// The value is none of scalar, array, collection or map
    #[error("Unrecognized property kind: {0}")]
    UnrecognizedPropertyKind(String),

    /// A string could not be converted into the property's type
    #[error("Invalid value {value:?} for `{property}`: expected {expected}")]
    InvalidValue {
        property: String,
        value: String,
        expected: String,
    },

    /// Custom error raised through serde
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a syntax error with line and column information.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_inibean::Error;
    ///
    /// let err = Error::syntax(10, 5, "unterminated section header");
    /// assert!(err.to_string().contains("line 10"));
    /// ```
    pub fn syntax(line: usize, col: usize, msg: &str) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates an error for a section that has no matching property.
    pub fn unmapped_section(section: &str) -> Self {
        Error::UnmappedSection {
            section: section.to_string(),
        }
    }

    /// Creates an error for a key that has no matching property.
    ///
    /// `section` is the section name, or [`crate::GLOBAL_SECTION`] for top-level keys.
    pub fn unmapped_key(section: &str, key: &str) -> Self {
        let section = if section == crate::GLOBAL_SECTION {
            "the global section".to_string()
        } else {
            format!("section [{}]", section)
        };
        Error::UnmappedKey {
            section,
            key: key.to_string(),
        }
    }

    /// Creates a cardinality error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_inibean::Error;
    ///
    /// let err = Error::shape_mismatch("port", "exactly one value", "2 values");
    /// assert!(err.to_string().contains("expected exactly one value"));
    /// ```
    pub fn shape_mismatch(
        property: &str,
        expected: impl fmt::Display,
        found: impl fmt::Display,
    ) -> Self {
        Error::ShapeMismatch {
            property: property.to_string(),
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates an error for values the INI format has no way to express.
    pub fn unsupported_structure(msg: &str) -> Self {
        Error::UnsupportedStructure(msg.to_string())
    }

    /// Creates an error for values that are not one of the four property kinds.
    pub fn unrecognized_kind(msg: &str) -> Self {
        Error::UnrecognizedPropertyKind(msg.to_string())
    }

    /// Creates an error for a string that does not parse as the expected type.
    pub fn invalid_value(property: &str, value: &str, expected: &str) -> Self {
        Error::InvalidValue {
            property: property.to_string(),
            value: value.to_string(),
            expected: expected.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmapped_key_names_global_section() {
        let err = Error::unmapped_key(crate::GLOBAL_SECTION, "host");
        assert_eq!(
            err.to_string(),
            "No property found for key `host` in the global section"
        );

        let err = Error::unmapped_key("server", "host");
        assert_eq!(
            err.to_string(),
            "No property found for key `host` in section [server]"
        );
    }

    #[test]
    fn test_serde_custom() {
        let err = <Error as serde::de::Error>::custom("missing field `port`");
        assert!(matches!(err, Error::Custom(ref msg) if msg == "missing field `port`"));
    }
}
