//! Documentation attached to beans and written as INI comments.
//!
//! Comments come from an explicit registry rather than from attributes: each documented
//! type implements [`Documented`] and returns a [`TypeDoc`] naming its serde type, an
//! optional type-level comment and per-property comments. Nested types are pulled in
//! with [`TypeDoc::include`].
//!
//! A property's own comment wins; a struct property without one falls back to the
//! comment of the struct's type.
//!
//! ```rust
//! use serde::Serialize;
//! use serde_inibean::{to_string_documented, Documented, TypeDoc};
//!
//! #[derive(Serialize)]
//! struct Server { host: String }
//!
//! impl Documented for Server {
//!     fn documentation() -> TypeDoc {
//!         TypeDoc::new("Server")
//!             .comment("server settings")
//!             .property("host", "name or address to bind")
//!     }
//! }
//!
//! let ini = to_string_documented(&Server { host: "localhost".into() }).unwrap();
//! assert_eq!(ini, "#server settings\n#name or address to bind\nhost = localhost\n");
//! ```

use indexmap::IndexMap;
use std::collections::HashMap;

/// Implemented by types that carry INI documentation.
pub trait Documented {
    fn documentation() -> TypeDoc;
}

/// Documentation of one type.
#[derive(Debug, Clone, Default)]
pub struct TypeDoc {
    name: &'static str,
    comment: Option<String>,
    properties: IndexMap<&'static str, String>,
    includes: Vec<fn() -> TypeDoc>,
}

impl TypeDoc {
    /// Starts the documentation of the type that serde names `name` (the struct name,
    /// or its `#[serde(rename)]`).
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        TypeDoc {
            name,
            ..Default::default()
        }
    }

    /// Sets the type-level comment.
    #[must_use]
    pub fn comment(mut self, text: impl Into<String>) -> Self {
        self.comment = Some(text.into());
        self
    }

    /// Sets the comment of the property `name` (its serialized field name).
    #[must_use]
    pub fn property(mut self, name: &'static str, text: impl Into<String>) -> Self {
        self.properties.insert(name, text.into());
        self
    }

    /// Registers the documentation of a nested type together with this one.
    #[must_use]
    pub fn include<T: Documented>(mut self) -> Self {
        self.includes.push(T::documentation);
        self
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn type_comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    #[must_use]
    pub fn property_comment(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }
}

/// Registry of type documentation, keyed by serde type name.
#[derive(Debug, Clone, Default)]
pub struct Documentation {
    types: HashMap<&'static str, TypeDoc>,
}

impl Documentation {
    /// An empty registry: marshalling with it writes no comments.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding `T`'s documentation and everything it includes.
    #[must_use]
    pub fn of<T: Documented>() -> Self {
        let mut docs = Self::new();
        docs.register(T::documentation());
        docs
    }

    /// Adds `doc` and, transitively, its includes. A type name already registered is
    /// left as is, so self-referencing includes terminate.
    pub fn register(&mut self, doc: TypeDoc) -> &mut Self {
        if self.types.contains_key(doc.name) {
            return self;
        }
        let includes = doc.includes.clone();
        self.types.insert(doc.name, doc);
        for include in includes {
            self.register(include());
        }
        self
    }

    #[must_use]
    pub fn with(mut self, doc: TypeDoc) -> Self {
        self.register(doc);
        self
    }

    #[must_use]
    pub fn for_type(&self, name: &str) -> Option<&TypeDoc> {
        self.types.get(name)
    }

    #[must_use]
    pub fn type_comment(&self, name: &str) -> Option<&str> {
        self.for_type(name).and_then(TypeDoc::type_comment)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
