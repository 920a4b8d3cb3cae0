/// Runs and the other inline children of a paragraph.
use smallvec::SmallVec;

/// A single piece of inline content inside a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunContent {
    /// Literal text (`<w:t>`). May be empty.
    Text(String),
    /// A tab character (`<w:tab/>`).
    Tab,
    /// A line break (`<w:br/>`).
    Break,
    /// A non-breaking hyphen (`<w:noBreakHyphen/>`).
    NoBreakHyphen,
}

impl RunContent {
    /// Get the literal text of this content, if it is a text fragment.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Check whether this content is a tab character.
    #[inline]
    pub fn is_tab(&self) -> bool {
        matches!(self, Self::Tab)
    }
}

/// Formatting properties of a run (`<w:rPr>`).
///
/// Each flag is tri-state: `Some(true)` explicitly enabled,
/// `Some(false)` explicitly disabled, `None` inherits from the style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunProperties {
    /// Whether the run is bold
    pub bold: Option<bool>,
    /// Whether the run is italic
    pub italic: Option<bool>,
    /// Whether the run is strikethrough
    pub strikethrough: Option<bool>,
}

/// A run of inline content with a single set of formatting (`<w:r>`).
///
/// Runs produced by the parser always hold at least one content item;
/// text-mutating operations on the owning paragraph may leave a run
/// empty (for example when every leading tab is removed from it).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Run {
    contents: SmallVec<[RunContent; 4]>,
    properties: RunProperties,
}

impl Run {
    /// Create a run from its contents and formatting.
    pub fn new(contents: impl IntoIterator<Item = RunContent>, properties: RunProperties) -> Self {
        Self {
            contents: contents.into_iter().collect(),
            properties,
        }
    }

    /// Create a run holding a single text fragment with default formatting.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            contents: SmallVec::from_iter([RunContent::Text(text.into())]),
            properties: RunProperties::default(),
        }
    }

    /// Get the ordered inline contents of this run.
    #[inline]
    pub fn contents(&self) -> &[RunContent] {
        &self.contents
    }

    pub(crate) fn contents_mut(&mut self) -> &mut SmallVec<[RunContent; 4]> {
        &mut self.contents
    }

    /// Get the formatting properties of this run.
    #[inline]
    pub fn properties(&self) -> &RunProperties {
        &self.properties
    }

    /// Append a content item to this run.
    pub fn push(&mut self, content: RunContent) {
        self.contents.push(content);
    }

    /// Check whether this run holds no content at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Get the concatenated literal text of this run.
    ///
    /// Tabs, breaks, and other non-text content contribute nothing.
    pub fn text(&self) -> String {
        let mut result = String::new();
        for content in &self.contents {
            if let Some(text) = content.as_text() {
                result.push_str(text);
            }
        }
        result
    }
}

/// A hyperlink wrapping one or more runs (`<w:hyperlink>`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hyperlink {
    relationship_id: Option<String>,
    runs: Vec<Run>,
}

impl Hyperlink {
    /// Create a hyperlink from its relationship id and runs.
    pub fn new(relationship_id: Option<String>, runs: Vec<Run>) -> Self {
        Self {
            relationship_id,
            runs,
        }
    }

    /// Get the `r:id` relationship this hyperlink targets.
    #[inline]
    pub fn relationship_id(&self) -> Option<&str> {
        self.relationship_id.as_deref()
    }

    /// Get the runs inside this hyperlink.
    #[inline]
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }
}

/// A smart tag wrapping one or more runs (`<w:smartTag>`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SmartTagRun {
    element: Option<String>,
    runs: Vec<Run>,
}

impl SmartTagRun {
    /// Create a smart tag from its element name and runs.
    pub fn new(element: Option<String>, runs: Vec<Run>) -> Self {
        Self { element, runs }
    }

    /// Get the smart tag element name.
    #[inline]
    pub fn element(&self) -> Option<&str> {
        self.element.as_deref()
    }

    /// Get the runs inside this smart tag.
    #[inline]
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }
}

/// A tracked insertion wrapping one or more runs (`<w:ins>`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsertedRun {
    author: Option<String>,
    date: Option<String>,
    runs: Vec<Run>,
}

impl InsertedRun {
    /// Create a tracked insertion from its revision metadata and runs.
    pub fn new(author: Option<String>, date: Option<String>, runs: Vec<Run>) -> Self {
        Self { author, date, runs }
    }

    /// Get the author of the insertion.
    #[inline]
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// Get the timestamp of the insertion.
    #[inline]
    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    /// Get the inserted runs.
    #[inline]
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }
}

/// A tracked deletion wrapping one or more runs (`<w:del>`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeletedRun {
    author: Option<String>,
    date: Option<String>,
    runs: Vec<Run>,
}

impl DeletedRun {
    /// Create a tracked deletion from its revision metadata and runs.
    pub fn new(author: Option<String>, date: Option<String>, runs: Vec<Run>) -> Self {
        Self { author, date, runs }
    }

    /// Get the author of the deletion.
    #[inline]
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// Get the timestamp of the deletion.
    #[inline]
    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    /// Get the deleted runs.
    #[inline]
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }
}

/// An inline structured document tag wrapping runs (`<w:sdt>`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuredRun {
    runs: Vec<Run>,
}

impl StructuredRun {
    /// Create an inline structured document tag from its runs.
    pub fn new(runs: Vec<Run>) -> Self {
        Self { runs }
    }

    /// Get the runs inside the tag's content.
    #[inline]
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }
}

/// An inline child of a paragraph.
///
/// Only the `Run` arm participates in the paragraph's flattened text
/// view; the wrapped kinds carry their own runs and are handled by
/// richer consumers.
#[derive(Debug, Clone, PartialEq)]
pub enum ParagraphChild {
    /// A plain run.
    Run(Run),
    /// A hyperlink.
    Hyperlink(Hyperlink),
    /// A smart tag.
    SmartTag(SmartTagRun),
    /// A tracked insertion.
    Inserted(InsertedRun),
    /// A tracked deletion.
    Deleted(DeletedRun),
    /// An inline structured document tag.
    Structured(StructuredRun),
}

impl ParagraphChild {
    /// Get the plain run, if this child is one.
    #[inline]
    pub fn as_run(&self) -> Option<&Run> {
        match self {
            Self::Run(run) => Some(run),
            _ => None,
        }
    }

    pub(crate) fn as_run_mut(&mut self) -> Option<&mut Run> {
        match self {
            Self::Run(run) => Some(run),
            _ => None,
        }
    }
}

impl From<Run> for ParagraphChild {
    fn from(run: Run) -> Self {
        Self::Run(run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_text_skips_non_text_content() {
        let run = Run::new(
            [
                RunContent::Text("a".to_string()),
                RunContent::Tab,
                RunContent::Text("b".to_string()),
                RunContent::Break,
            ],
            RunProperties::default(),
        );
        assert_eq!(run.text(), "ab");
    }

    #[test]
    fn test_child_as_run() {
        let child = ParagraphChild::from(Run::from_text("x"));
        assert!(child.as_run().is_some());

        let link = ParagraphChild::Hyperlink(Hyperlink::new(
            Some("rId1".to_string()),
            vec![Run::from_text("y")],
        ));
        assert!(link.as_run().is_none());
    }
}
