/// Styles - style definitions and the inheritance chain walk.
use crate::error::{Result, WmlError};
use crate::wml::enums::StyleType;
use smallvec::SmallVec;

/// A single style definition (`<w:style>`).
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    /// Style identifier (required)
    style_id: String,
    /// UI-visible name
    name: Option<String>,
    /// Type of style (paragraph, character, table, or numbering)
    style_type: StyleType,
    /// ID of the style this is based on
    based_on: Option<String>,
    /// Whether this is the default style for its type
    is_default: bool,
    /// Whether this is a custom (user-defined) style
    is_custom: bool,
}

impl Style {
    /// Create a style with the given id and type.
    pub fn new(style_id: impl Into<String>, style_type: StyleType) -> Self {
        Self {
            style_id: style_id.into(),
            name: None,
            style_type,
            based_on: None,
            is_default: false,
            is_custom: false,
        }
    }

    /// Set the UI-visible name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the id of the style this one is based on.
    pub fn with_based_on(mut self, style_id: impl Into<String>) -> Self {
        self.based_on = Some(style_id.into());
        self
    }

    /// Mark whether this is the default style for its type.
    pub fn with_default(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }

    /// Mark whether this is a custom (user-defined) style.
    pub fn with_custom(mut self, is_custom: bool) -> Self {
        self.is_custom = is_custom;
        self
    }

    /// Get the style identifier.
    #[inline]
    pub fn style_id(&self) -> &str {
        &self.style_id
    }

    /// Get the style name.
    ///
    /// Returns `None` if no name is defined.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Get the style type.
    #[inline]
    pub fn style_type(&self) -> StyleType {
        self.style_type
    }

    /// Get the ID of the style this is based on.
    #[inline]
    pub fn based_on(&self) -> Option<&str> {
        self.based_on.as_deref()
    }

    /// Check if this is the default style for its type.
    #[inline]
    pub fn is_default(&self) -> bool {
        self.is_default
    }

    /// Check if this is a built-in style.
    #[inline]
    pub fn is_builtin(&self) -> bool {
        !self.is_custom
    }

    /// Check if this is a custom (user-defined) style.
    #[inline]
    pub fn is_custom(&self) -> bool {
        self.is_custom
    }

    /// Check whether this style marks a heading.
    ///
    /// A style is a heading when its display name starts with "heading",
    /// case-insensitively ("heading 1", "Heading 2", ...). Nameless
    /// styles are never headings.
    pub fn is_heading(&self) -> bool {
        self.name
            .as_deref()
            .and_then(|name| name.get(..7))
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("heading"))
    }
}

/// The style definitions of a document (a `styles.xml` part).
///
/// Supports lookup by style ID or name and walking inheritance chains.
///
/// # Examples
///
/// ```
/// use longan::wml::{Style, StyleType, Styles};
///
/// let mut styles = Styles::new();
/// styles.push(Style::new("Normal", StyleType::Paragraph).with_name("Normal"));
/// styles.push(
///     Style::new("Heading1", StyleType::Paragraph)
///         .with_name("heading 1")
///         .with_based_on("Normal"),
/// );
///
/// let chain: Vec<_> = styles
///     .style_chain(StyleType::Paragraph, "Heading1")
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(chain.len(), 2);
/// assert!(chain[0].is_heading());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Styles {
    style_list: SmallVec<[Style; 32]>,
}

impl Styles {
    /// Create an empty style table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a style to the table.
    pub fn push(&mut self, style: Style) {
        self.style_list.push(style);
    }

    /// Get the number of styles in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.style_list.len()
    }

    /// Check if there are no styles defined.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.style_list.is_empty()
    }

    /// Get an iterator over all styles.
    pub fn iter(&self) -> std::slice::Iter<'_, Style> {
        self.style_list.iter()
    }

    /// Get a style by its ID.
    ///
    /// Returns `None` if no style with the given ID is found.
    pub fn get_by_id(&self, style_id: &str) -> Option<&Style> {
        self.style_list.iter().find(|s| s.style_id == style_id)
    }

    /// Get a style by its name.
    ///
    /// Returns `None` if no style with the given name is found.
    pub fn get_by_name(&self, name: &str) -> Option<&Style> {
        self.style_list
            .iter()
            .find(|s| s.name.as_deref() == Some(name))
    }

    /// Get the default style for a given style type.
    ///
    /// Returns `None` if no default style is defined for that type.
    pub fn get_default(&self, style_type: StyleType) -> Option<&Style> {
        self.style_list
            .iter()
            .find(|s| s.is_default && s.style_type == style_type)
    }

    /// Walk the inheritance chain starting from `style_id`, nearest first.
    ///
    /// The returned iterator yields the named style itself, then each
    /// `basedOn` ancestor in turn. The walk is lazy: a link is only
    /// looked up when the next element is pulled.
    pub fn style_chain(&self, style_type: StyleType, style_id: &str) -> StyleChain<'_> {
        StyleChain {
            styles: Some(self),
            style_type,
            next_id: Some(style_id.to_string()),
            seen: SmallVec::new(),
        }
    }
}

/// Lazy iterator over a style inheritance chain, nearest first.
///
/// The chain ends when a referenced style is missing from the table.
/// A `basedOn` link that loops back onto an already visited style is a
/// data-integrity defect in the source document: the iterator yields a
/// single [`WmlError::StyleCycle`] and then ends, so consumers never
/// loop forever.
pub struct StyleChain<'a> {
    styles: Option<&'a Styles>,
    style_type: StyleType,
    next_id: Option<String>,
    seen: SmallVec<[String; 8]>,
}

impl StyleChain<'_> {
    /// An empty chain, used when a paragraph has no resolvable style.
    pub fn empty() -> StyleChain<'static> {
        StyleChain {
            styles: None,
            style_type: StyleType::default(),
            next_id: None,
            seen: SmallVec::new(),
        }
    }
}

impl<'a> Iterator for StyleChain<'a> {
    type Item = Result<&'a Style>;

    fn next(&mut self) -> Option<Self::Item> {
        let styles = self.styles?;
        let id = self.next_id.take()?;
        if self.seen.iter().any(|seen| *seen == id) {
            return Some(Err(WmlError::StyleCycle { style_id: id }));
        }
        let style = styles
            .iter()
            .find(|s| s.style_id == id && s.style_type == self.style_type)?;
        self.seen.push(id);
        self.next_id = style.based_on.clone();
        Some(Ok(style))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_styles() -> Styles {
        let mut styles = Styles::new();
        styles.push(
            Style::new("Normal", StyleType::Paragraph)
                .with_name("Normal")
                .with_default(true),
        );
        styles.push(
            Style::new("Heading1", StyleType::Paragraph)
                .with_name("heading 1")
                .with_based_on("Normal"),
        );
        styles.push(
            Style::new("Fancy", StyleType::Paragraph)
                .with_name("Fancy")
                .with_based_on("Heading1")
                .with_custom(true),
        );
        styles
    }

    #[test]
    fn test_lookup_by_id_and_name() {
        let styles = sample_styles();
        assert_eq!(styles.len(), 3);
        assert_eq!(styles.get_by_id("Heading1").unwrap().name(), Some("heading 1"));
        assert_eq!(styles.get_by_name("Fancy").unwrap().style_id(), "Fancy");
        assert!(styles.get_by_id("Missing").is_none());
        assert_eq!(
            styles.get_default(StyleType::Paragraph).unwrap().style_id(),
            "Normal"
        );
    }

    #[test]
    fn test_chain_nearest_first() {
        let styles = sample_styles();
        let chain: Vec<_> = styles
            .style_chain(StyleType::Paragraph, "Fancy")
            .map(|s| s.unwrap().style_id().to_string())
            .collect();
        assert_eq!(chain, vec!["Fancy", "Heading1", "Normal"]);
    }

    #[test]
    fn test_chain_ends_at_missing_style() {
        let styles = sample_styles();
        let chain: Vec<_> = styles
            .style_chain(StyleType::Paragraph, "Nope")
            .collect();
        assert!(chain.is_empty());
    }

    #[test]
    fn test_chain_type_mismatch_is_empty() {
        let styles = sample_styles();
        let chain: Vec<_> = styles
            .style_chain(StyleType::Character, "Fancy")
            .collect();
        assert!(chain.is_empty());
    }

    #[test]
    fn test_chain_cycle_is_an_error() {
        let mut styles = Styles::new();
        styles.push(Style::new("A", StyleType::Paragraph).with_based_on("B"));
        styles.push(Style::new("B", StyleType::Paragraph).with_based_on("A"));

        let mut chain = styles.style_chain(StyleType::Paragraph, "A");
        assert_eq!(chain.next().unwrap().unwrap().style_id(), "A");
        assert_eq!(chain.next().unwrap().unwrap().style_id(), "B");
        assert!(matches!(
            chain.next(),
            Some(Err(WmlError::StyleCycle { .. }))
        ));
        assert!(chain.next().is_none());
    }

    #[test]
    fn test_is_heading_case_insensitive() {
        let heading = Style::new("H9", StyleType::Paragraph).with_name("HEADING 9");
        assert!(heading.is_heading());

        let nameless = Style::new("X", StyleType::Paragraph);
        assert!(!nameless.is_heading());

        let other = Style::new("Body", StyleType::Paragraph).with_name("Body Text");
        assert!(!other.is_heading());
    }
}
