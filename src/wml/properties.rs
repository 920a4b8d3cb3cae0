/// Paragraph formatting properties.
use crate::wml::enums::Justification;

/// Reference from a paragraph to a numbering definition and level
/// (`<w:numPr>` with `<w:numId>` and `<w:ilvl>`).
///
/// Either id can be absent; resolution short-circuits to "not numbered"
/// for each missing link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NumberingProperties {
    num_id: Option<u32>,
    level_id: Option<u32>,
}

impl NumberingProperties {
    /// Create a numbering reference.
    pub fn new(num_id: Option<u32>, level_id: Option<u32>) -> Self {
        Self { num_id, level_id }
    }

    /// Get the numbering definition id (`w:numId`).
    #[inline]
    pub fn num_id(&self) -> Option<u32> {
        self.num_id
    }

    /// Get the level id (`w:ilvl`).
    #[inline]
    pub fn level_id(&self) -> Option<u32> {
        self.level_id
    }
}

/// Formatting properties of a paragraph (`<w:pPr>`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParagraphProperties {
    parent_style: Option<String>,
    numbering: Option<NumberingProperties>,
    justification: Option<Justification>,
    indentation_left: Option<i32>,
    indentation_first_line: Option<i32>,
}

impl ParagraphProperties {
    /// Create empty properties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the id of the referenced parent style (`w:pStyle`).
    #[inline]
    pub fn parent_style(&self) -> Option<&str> {
        self.parent_style.as_deref()
    }

    /// Set the referenced parent style.
    pub fn set_parent_style(&mut self, style_id: Option<String>) {
        self.parent_style = style_id;
    }

    /// Get the numbering reference, if the paragraph is numbered.
    #[inline]
    pub fn numbering(&self) -> Option<&NumberingProperties> {
        self.numbering.as_ref()
    }

    /// Set the numbering reference.
    pub fn set_numbering(&mut self, numbering: Option<NumberingProperties>) {
        self.numbering = numbering;
    }

    /// Get the justification (`w:jc`).
    #[inline]
    pub fn justification(&self) -> Option<Justification> {
        self.justification
    }

    /// Set the justification.
    pub fn set_justification(&mut self, justification: Option<Justification>) {
        self.justification = justification;
    }

    /// Get the left indentation in twentieths of a point (`w:ind w:left`).
    #[inline]
    pub fn indentation_left(&self) -> Option<i32> {
        self.indentation_left
    }

    /// Set the left indentation.
    pub fn set_indentation_left(&mut self, twips: Option<i32>) {
        self.indentation_left = twips;
    }

    /// Get the first-line indentation in twentieths of a point
    /// (`w:ind w:firstLine`).
    #[inline]
    pub fn indentation_first_line(&self) -> Option<i32> {
        self.indentation_first_line
    }

    /// Set the first-line indentation.
    pub fn set_indentation_first_line(&mut self, twips: Option<i32>) {
        self.indentation_first_line = twips;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_properties() {
        let props = ParagraphProperties::new();
        assert!(props.parent_style().is_none());
        assert!(props.numbering().is_none());
        assert!(props.justification().is_none());
    }

    #[test]
    fn test_numbering_reference_ids() {
        let numbering = NumberingProperties::new(Some(3), None);
        assert_eq!(numbering.num_id(), Some(3));
        assert_eq!(numbering.level_id(), None);
    }
}
