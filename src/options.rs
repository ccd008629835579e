//! Output options for INI text.
//!
//! The structure of the dialect is fixed: sections may repeat, keys may repeat, a
//! nameless global section precedes the first header, a key may have no value and a
//! section may have no keys. What [`Dialect`] controls is only how the text looks.
//!
//! ## Examples
//!
//! ```rust
//! use serde_inibean::{CommentMarker, Dialect, Document};
//!
//! let mut doc = Document::new();
//! doc.global_mut().set_comment("generated");
//! doc.global_mut().put("port", "80");
//!
//! let dialect = Dialect::new().with_comment_marker(CommentMarker::Semicolon);
//! assert_eq!(doc.to_ini_string(&dialect), ";generated\nport = 80\n");
//! ```

/// Character that starts a comment line.
///
/// The reader accepts both markers; this only selects what the writer emits.
///
/// ```rust
/// use serde_inibean::CommentMarker;
///
/// assert_eq!(CommentMarker::Hash.as_char(), '#');
/// assert_eq!(CommentMarker::Semicolon.as_char(), ';');
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CommentMarker {
    #[default]
    Hash,
    Semicolon,
}

impl CommentMarker {
    #[must_use]
    pub const fn as_char(&self) -> char {
        match self {
            CommentMarker::Hash => '#',
            CommentMarker::Semicolon => ';',
        }
    }
}

/// Formatting options for writing INI text. Immutable once built; pass it by reference.
///
/// ```rust
/// use serde_inibean::Dialect;
///
/// let dialect = Dialect::new();
/// assert!(dialect.blank_line_between_sections);
///
/// let compact = Dialect::compact();
/// assert!(!compact.blank_line_between_sections);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dialect {
    pub comment_marker: CommentMarker,
    pub blank_line_between_sections: bool,
}

impl Default for Dialect {
    fn default() -> Self {
        Dialect {
            comment_marker: CommentMarker::default(),
            blank_line_between_sections: true,
        }
    }
}

impl Dialect {
    /// Default options: `#` comments and a blank line before each section header.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// No blank lines between sections.
    #[must_use]
    pub fn compact() -> Self {
        Dialect {
            blank_line_between_sections: false,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_comment_marker(mut self, marker: CommentMarker) -> Self {
        self.comment_marker = marker;
        self
    }

    #[must_use]
    pub fn with_blank_line_between_sections(mut self, blank: bool) -> Self {
        self.blank_line_between_sections = blank;
        self
    }
}
