/// The document context that supplies shared lookup tables to paragraphs.
use crate::wml::numbering::Numbering;
use crate::wml::style::Styles;

/// The lookup context a paragraph resolves against.
///
/// A paragraph never owns its style or numbering tables; it borrows a
/// `Container` at resolution time. Restricted contexts carry fewer
/// tables: from inside a footnote part neither the style definitions
/// nor the numbering definitions are reachable, and every resolver
/// treats that absence as a normal "no result", never an error.
#[derive(Debug, Default)]
pub struct Container {
    styles: Option<Styles>,
    numbering: Option<Numbering>,
}

impl Container {
    /// Create a container from its optional parts.
    pub fn new(styles: Option<Styles>, numbering: Option<Numbering>) -> Self {
        Self { styles, numbering }
    }

    /// Create the context of a footnote part, which has access to
    /// neither table.
    pub fn footnote() -> Self {
        Self::default()
    }

    /// Get the style definitions, when this context has them.
    #[inline]
    pub fn styles(&self) -> Option<&Styles> {
        self.styles.as_ref()
    }

    /// Get the numbering definitions, when this context has them.
    #[inline]
    pub fn numbering(&self) -> Option<&Numbering> {
        self.numbering.as_ref()
    }
}
