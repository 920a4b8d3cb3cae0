/// Error types for WordprocessingML operations.
use thiserror::Error;

/// Result type for WordprocessingML operations.
pub type Result<T> = std::result::Result<T, WmlError>;

/// Error types for WordprocessingML operations.
///
/// Missing links during resolution (no properties, no styles table, no
/// numbering reference) are never errors; resolvers return `None` for
/// those. Errors are reserved for malformed XML and structural defects
/// in the source document.
#[derive(Error, Debug)]
pub enum WmlError {
    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// A style's `basedOn` chain loops back onto an already visited style
    #[error("style chain cycle at style '{style_id}'")]
    StyleCycle { style_id: String },

    /// Invalid format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

impl From<quick_xml::Error> for WmlError {
    fn from(err: quick_xml::Error) -> Self {
        WmlError::Xml(err.to_string())
    }
}
