/// Paragraph structure and its resolution behaviors.
use crate::error::Result;
use crate::tree::{DocumentTree, NodeId, NodeKind};
use crate::wml::container::Container;
use crate::wml::enums::StyleType;
use crate::wml::numbering::{NumberingDefinition, NumberingLevel};
use crate::wml::properties::ParagraphProperties;
use crate::wml::run::{ParagraphChild, Run};
use crate::wml::style::{Style, StyleChain};
use crate::wml::text;
use once_cell::unsync::OnceCell;

/// A paragraph in a WordprocessingML document.
///
/// Represents a `<w:p>` element: optional formatting properties plus an
/// ordered sequence of typed inline children. The paragraph owns its
/// children exclusively; everything it needs from the wider document
/// (the style table, the numbering table, its block-level ancestors) is
/// borrowed at resolution time from a [`Container`] or a
/// [`DocumentTree`].
///
/// Derived results (`effective_properties`, `heading_style`, the
/// numbering lookups) are computed lazily and memoized per instance.
/// The caches hold clones of the resolved entities, so a result stays
/// stable even if the source tables change afterwards; they are cleared
/// only by [`set_properties`](Self::set_properties) or force-set via
/// [`set_heading_style`](Self::set_heading_style).
///
/// # Example
///
/// ```rust,ignore
/// let para = parse::parse_paragraph(xml)?;
/// println!("text: {}", para.text());
/// if let Some(definition) = para.numbering_definition(&container) {
///     println!("numbered with numId {}", definition.num_id());
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Paragraph {
    /// Paragraph formatting properties (`<w:pPr>`)
    properties: Option<ParagraphProperties>,
    /// Typed inline children, in document order
    children: Vec<ParagraphChild>,
    /// This paragraph's node in the block tree, when it has one
    node: Option<NodeId>,
    effective: OnceCell<Option<ParagraphProperties>>,
    heading: OnceCell<Option<Style>>,
    numbering_definition: OnceCell<Option<NumberingDefinition>>,
    numbering_level: OnceCell<Option<NumberingLevel>>,
}

impl Paragraph {
    /// Create a paragraph from its properties and children.
    pub fn new(properties: Option<ParagraphProperties>, children: Vec<ParagraphChild>) -> Self {
        Self {
            properties,
            children,
            ..Self::default()
        }
    }

    /// Create an unstyled paragraph holding the given runs.
    pub fn from_runs(runs: Vec<Run>) -> Self {
        Self::new(None, runs.into_iter().map(ParagraphChild::Run).collect())
    }

    /// Get this paragraph's node in the block tree, if it was placed in
    /// one.
    #[inline]
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    /// Record which block-tree node this paragraph occupies.
    pub fn set_node(&mut self, node: NodeId) {
        self.node = Some(node);
    }

    /// Get the paragraph's own formatting properties.
    #[inline]
    pub fn properties(&self) -> Option<&ParagraphProperties> {
        self.properties.as_ref()
    }

    /// Replace the paragraph's formatting properties.
    ///
    /// Clears every property-derived cache (`effective_properties`,
    /// `heading_style`, and the numbering lookups) so the next access
    /// recomputes from the new properties.
    pub fn set_properties(&mut self, properties: Option<ParagraphProperties>) {
        self.properties = properties;
        self.effective = OnceCell::new();
        self.heading = OnceCell::new();
        self.numbering_definition = OnceCell::new();
        self.numbering_level = OnceCell::new();
    }

    /// Get the ordered inline children of this paragraph.
    #[inline]
    pub fn children(&self) -> &[ParagraphChild] {
        &self.children
    }

    /// Get an iterator over the plain runs of this paragraph.
    ///
    /// Runs nested inside hyperlinks, tracked changes, and other
    /// wrapped children are not included.
    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.children.iter().filter_map(ParagraphChild::as_run)
    }

    /// Get the flattened text of this paragraph.
    ///
    /// Concatenates, in document order, every literal text fragment of
    /// every plain run child. Tabs, breaks, and non-run children
    /// contribute nothing.
    pub fn text(&self) -> String {
        text::paragraph_text(&self.children)
    }

    /// Remove `prefix` from the front of the paragraph's flattened
    /// text, editing the underlying fragments in place.
    ///
    /// Run boundaries and non-text content are preserved for whatever
    /// remains. `prefix` must be an exact prefix of
    /// [`text`](Self::text)'s result; on a mismatch the edit stops at
    /// the offending fragment and later fragments are left untouched.
    pub fn strip_text_from_left(&mut self, prefix: &str) {
        text::strip_text_from_left(&mut self.children, prefix);
    }

    /// Remove tab characters from the front of the paragraph, returning
    /// how many were removed.
    ///
    /// Tabs are popped from the front of each run until the first
    /// non-tab content is reached; from then on later tabs are kept
    /// even if a following run starts with one. A second call removes
    /// nothing.
    pub fn remove_initial_tabs(&mut self) -> usize {
        text::remove_initial_tabs(&mut self.children)
    }

    /// Count the leading tabs that [`Self::remove_initial_tabs`] would
    /// remove, without mutating.
    pub fn initial_tab_count(&self) -> usize {
        text::initial_tab_count(&self.children)
    }

    /// Get the effective formatting properties of this paragraph.
    ///
    /// Memoized on first access.
    // TODO: fold in formatting inherited through the style chain, the
    // way run formatting is resolved; for now this passes the
    // paragraph's own properties through unchanged.
    pub fn effective_properties(&self) -> Option<&ParagraphProperties> {
        self.effective
            .get_or_init(|| self.properties.clone())
            .as_ref()
    }

    /// Walk this paragraph's style inheritance chain, nearest first.
    ///
    /// The chain is empty when the paragraph has no properties, the
    /// properties name no parent style, or the container has no style
    /// table (as from inside a footnote). None of those are errors.
    pub fn style_chain<'a>(&self, container: &'a Container) -> StyleChain<'a> {
        let Some(properties) = self.properties.as_ref() else {
            return StyleChain::empty();
        };
        let Some(parent_style) = properties.parent_style() else {
            return StyleChain::empty();
        };
        let Some(styles) = container.styles() else {
            return StyleChain::empty();
        };
        styles.style_chain(StyleType::Paragraph, parent_style)
    }

    /// Get the first heading style in this paragraph's style chain, or
    /// `None` if the chain holds no heading.
    ///
    /// The result is cached on first access and stays stable across
    /// repeated reads even if the style table changes afterwards. A
    /// cyclic style chain surfaces as
    /// [`WmlError::StyleCycle`](crate::WmlError::StyleCycle).
    pub fn heading_style(&self, container: &Container) -> Result<Option<&Style>> {
        let cached = self.heading.get_or_try_init(|| -> Result<Option<Style>> {
            for style in self.style_chain(container) {
                let style = style?;
                if style.is_heading() {
                    return Ok(Some(style.clone()));
                }
            }
            Ok(None)
        })?;
        Ok(cached.as_ref())
    }

    /// Force the cached heading style to a given value, bypassing
    /// resolution.
    ///
    /// Forced values are never invalidated automatically; only another
    /// call to this method or to [`set_properties`](Self::set_properties)
    /// replaces them.
    pub fn set_heading_style(&mut self, style: Option<Style>) {
        self.heading = OnceCell::from(style);
    }

    /// Resolve the numbering definition this paragraph references.
    ///
    /// Requires, in order: a numbering table on the container, effective
    /// properties, a numbering reference with a definition id, and a
    /// definition under that id. Any missing link yields `None`; a
    /// paragraph that is simply not numbered is the common case, not an
    /// error. The result is memoized per instance.
    pub fn numbering_definition(&self, container: &Container) -> Option<&NumberingDefinition> {
        self.numbering_definition
            .get_or_init(|| {
                let numbering = container.numbering()?;
                let properties = self.effective_properties()?;
                let num_id = properties.numbering()?.num_id()?;
                numbering.get_numbering_definition(num_id).cloned()
            })
            .as_ref()
    }

    /// Resolve the numbering level this paragraph references.
    ///
    /// Requires a resolved [`Self::numbering_definition`] plus a
    /// numbering reference with a level id; short-circuits to `None`
    /// like the definition lookup. Memoized per instance.
    pub fn numbering_level(&self, container: &Container) -> Option<&NumberingLevel> {
        self.numbering_level
            .get_or_init(|| {
                let definition = self.numbering_definition(container)?;
                let properties = self.effective_properties()?;
                let level_id = properties.numbering()?.level_id()?;
                definition.get_level(level_id).cloned()
            })
            .as_ref()
    }

    /// Check whether this paragraph sits inside a block-level
    /// structured document tag.
    ///
    /// Peeks at the lazy ancestor walk: only the nearest matching
    /// ancestor is ever looked up, never the full chain. A paragraph
    /// that was never placed in a tree has no ancestors.
    pub fn has_structured_document_parent(&self, tree: &DocumentTree) -> bool {
        match self.node {
            Some(node) => tree
                .nearest_ancestors(node, NodeKind::StructuredDocumentBlock)
                .next()
                .is_some(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WmlError;
    use crate::wml::numbering::{Numbering, NumberingDefinition, NumberingLevel};
    use crate::wml::properties::NumberingProperties;
    use crate::wml::style::Styles;

    fn heading_container() -> Container {
        let mut styles = Styles::new();
        styles.push(
            Style::new("StyleA", StyleType::Paragraph)
                .with_name("Plain")
                .with_based_on("StyleB"),
        );
        styles.push(
            Style::new("StyleB", StyleType::Paragraph)
                .with_name("heading 2")
                .with_based_on("StyleC"),
        );
        styles.push(Style::new("StyleC", StyleType::Paragraph).with_name("heading 1"));
        Container::new(Some(styles), None)
    }

    fn styled_paragraph(style_id: &str) -> Paragraph {
        let mut properties = ParagraphProperties::new();
        properties.set_parent_style(Some(style_id.to_string()));
        Paragraph::new(Some(properties), Vec::new())
    }

    fn numbered_paragraph(num_id: Option<u32>, level_id: Option<u32>) -> Paragraph {
        let mut properties = ParagraphProperties::new();
        properties.set_numbering(Some(NumberingProperties::new(num_id, level_id)));
        Paragraph::new(Some(properties), Vec::new())
    }

    #[test]
    fn test_paragraph_without_properties_resolves_to_nothing() {
        let para = Paragraph::from_runs(vec![Run::from_text("plain")]);
        let container = heading_container();

        assert_eq!(para.style_chain(&container).count(), 0);
        assert!(para.heading_style(&container).unwrap().is_none());
        assert!(para.effective_properties().is_none());
    }

    #[test]
    fn test_style_chain_empty_in_footnote_context() {
        let para = styled_paragraph("StyleA");
        assert_eq!(para.style_chain(&Container::footnote()).count(), 0);
    }

    #[test]
    fn test_first_heading_in_chain_wins() {
        let para = styled_paragraph("StyleA");
        let container = heading_container();

        let heading = para.heading_style(&container).unwrap().unwrap();
        assert_eq!(heading.style_id(), "StyleB");
    }

    #[test]
    fn test_heading_style_stable_after_chain_source_changes() {
        let para = styled_paragraph("StyleA");
        let heading = para
            .heading_style(&heading_container())
            .unwrap()
            .map(|s| s.style_id().to_string());
        assert_eq!(heading.as_deref(), Some("StyleB"));

        // Re-resolving against an empty container must serve the cache.
        let cached = para.heading_style(&Container::footnote()).unwrap();
        assert_eq!(cached.map(Style::style_id), Some("StyleB"));
    }

    #[test]
    fn test_forced_heading_style_bypasses_resolution() {
        let mut para = Paragraph::from_runs(Vec::new());
        para.set_heading_style(Some(
            Style::new("Forced", StyleType::Paragraph).with_name("heading 9"),
        ));
        let style = para.heading_style(&Container::footnote()).unwrap().unwrap();
        assert_eq!(style.style_id(), "Forced");
    }

    #[test]
    fn test_cyclic_chain_surfaces_as_error() {
        let mut styles = Styles::new();
        styles.push(Style::new("A", StyleType::Paragraph).with_based_on("B"));
        styles.push(Style::new("B", StyleType::Paragraph).with_based_on("A"));
        let container = Container::new(Some(styles), None);

        let para = styled_paragraph("A");
        assert!(matches!(
            para.heading_style(&container),
            Err(WmlError::StyleCycle { .. })
        ));
    }

    #[test]
    fn test_effective_properties_pass_through() {
        let para = styled_paragraph("StyleA");
        let effective = para.effective_properties().unwrap();
        assert_eq!(effective.parent_style(), Some("StyleA"));
    }

    #[test]
    fn test_numbering_short_circuits_without_reference() {
        let mut numbering = Numbering::new();
        numbering.push(NumberingDefinition::new(1));
        let container = Container::new(None, Some(numbering));

        let mut properties = ParagraphProperties::new();
        properties.set_parent_style(Some("StyleA".to_string()));
        let para = Paragraph::new(Some(properties), Vec::new());

        assert!(para.numbering_definition(&container).is_none());
        assert!(para.numbering_level(&container).is_none());
    }

    #[test]
    fn test_numbering_resolution_through_both_indirections() {
        let mut numbering = Numbering::new();
        numbering.push(
            NumberingDefinition::new(5)
                .with_levels(vec![NumberingLevel::new(1).with_num_format("decimal")]),
        );
        let container = Container::new(None, Some(numbering));

        let para = numbered_paragraph(Some(5), Some(1));
        assert_eq!(para.numbering_definition(&container).unwrap().num_id(), 5);
        assert_eq!(
            para.numbering_level(&container).unwrap().num_format(),
            Some("decimal")
        );
    }

    #[test]
    fn test_numbering_missing_level_id_yields_definition_only() {
        let mut numbering = Numbering::new();
        numbering.push(NumberingDefinition::new(7));
        let container = Container::new(None, Some(numbering));

        let para = numbered_paragraph(Some(7), None);
        assert!(para.numbering_definition(&container).is_some());
        assert!(para.numbering_level(&container).is_none());
    }

    #[test]
    fn test_set_properties_clears_numbering_cache() {
        let mut numbering = Numbering::new();
        numbering.push(NumberingDefinition::new(2));
        let container = Container::new(None, Some(numbering));

        let mut para = numbered_paragraph(Some(2), None);
        assert!(para.numbering_definition(&container).is_some());

        para.set_properties(None);
        assert!(para.numbering_definition(&container).is_none());
        assert!(para.effective_properties().is_none());
    }

    #[test]
    fn test_structured_document_parent_detection() {
        let mut tree = DocumentTree::new();
        let body = tree.add_root(NodeKind::Body);
        let sdt = tree.add_child(body, NodeKind::StructuredDocumentBlock);

        let mut inside = Paragraph::from_runs(Vec::new());
        inside.set_node(tree.add_child(sdt, NodeKind::Paragraph));
        assert!(inside.has_structured_document_parent(&tree));

        let mut outside = Paragraph::from_runs(Vec::new());
        outside.set_node(tree.add_child(body, NodeKind::Paragraph));
        assert!(!outside.has_structured_document_parent(&tree));

        let detached = Paragraph::from_runs(Vec::new());
        assert!(!detached.has_structured_document_parent(&tree));
    }
}
