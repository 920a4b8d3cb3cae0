/// Enumerations for WordprocessingML elements.
use std::fmt;

/// Specifies the kind of definition a style applies to.
///
/// Corresponds to the `w:type` attribute of a `<w:style>` element.
///
/// # Examples
///
/// ```
/// use longan::wml::StyleType;
///
/// assert_eq!(StyleType::Paragraph.to_xml(), "paragraph");
/// assert_eq!(StyleType::from_xml("character"), Some(StyleType::Character));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StyleType {
    /// A paragraph style.
    Paragraph = 0,
    /// A character (run) style.
    Character = 1,
    /// A table style.
    Table = 2,
    /// A numbering (list) style.
    Numbering = 3,
}

impl StyleType {
    /// Convert the style type to its XML attribute value.
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Character => "character",
            Self::Table => "table",
            Self::Numbering => "numbering",
        }
    }

    /// Parse a style type from an XML attribute value.
    ///
    /// Returns `None` if the value is not recognized.
    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "paragraph" => Some(Self::Paragraph),
            "character" => Some(Self::Character),
            "table" => Some(Self::Table),
            "numbering" => Some(Self::Numbering),
            _ => None,
        }
    }
}

impl Default for StyleType {
    fn default() -> Self {
        Self::Paragraph
    }
}

impl fmt::Display for StyleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_xml())
    }
}

/// Specifies paragraph justification.
///
/// Corresponds to the `w:val` attribute of a `<w:jc>` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Justification {
    /// Left-aligned.
    Left = 0,
    /// Centered.
    Center = 1,
    /// Right-aligned.
    Right = 2,
    /// Justified on both edges.
    Both = 3,
}

impl Justification {
    /// Convert the justification to its XML attribute value.
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Both => "both",
        }
    }

    /// Parse a justification from an XML attribute value.
    ///
    /// `start`/`end` are accepted as aliases for `left`/`right`; returns
    /// `None` for unrecognized values.
    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "left" | "start" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" | "end" => Some(Self::Right),
            "both" | "justify" => Some(Self::Both),
            _ => None,
        }
    }
}

impl fmt::Display for Justification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_xml())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_type_default() {
        assert_eq!(StyleType::default(), StyleType::Paragraph);
    }

    #[test]
    fn test_style_type_round_trip() {
        for ty in [
            StyleType::Paragraph,
            StyleType::Character,
            StyleType::Table,
            StyleType::Numbering,
        ] {
            assert_eq!(StyleType::from_xml(ty.to_xml()), Some(ty));
        }
        assert_eq!(StyleType::from_xml("bogus"), None);
    }

    #[test]
    fn test_justification_aliases() {
        assert_eq!(Justification::from_xml("start"), Some(Justification::Left));
        assert_eq!(Justification::from_xml("end"), Some(Justification::Right));
        assert_eq!(Justification::from_xml("justify"), Some(Justification::Both));
    }
}
