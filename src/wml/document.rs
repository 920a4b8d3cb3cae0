/// Document - a parsed body with its block tree and lookup context.
use crate::tree::DocumentTree;
use crate::wml::container::Container;
use crate::wml::paragraph::Paragraph;

/// A parsed WordprocessingML body.
///
/// Owns the block-level [`DocumentTree`], the paragraphs placed in it,
/// and the [`Container`] the paragraphs resolve against.
///
/// # Examples
///
/// ```rust,ignore
/// use longan::wml::parse;
///
/// let doc = parse::parse_document(&body_xml, Some(&styles_xml), None)?;
/// println!("{} paragraphs", doc.paragraph_count());
/// for para in doc.paragraphs() {
///     if para.heading_style(doc.container())?.is_some() {
///         println!("heading: {}", para.text());
///     }
/// }
/// ```
#[derive(Debug, Default)]
pub struct Document {
    tree: DocumentTree,
    paragraphs: Vec<Paragraph>,
    container: Container,
}

impl Document {
    pub(crate) fn new(
        tree: DocumentTree,
        paragraphs: Vec<Paragraph>,
        container: Container,
    ) -> Self {
        Self {
            tree,
            paragraphs,
            container,
        }
    }

    /// Get all text content of the document, one line per paragraph.
    pub fn text(&self) -> String {
        let mut result = String::new();
        for (index, para) in self.paragraphs.iter().enumerate() {
            if index > 0 {
                result.push('\n');
            }
            result.push_str(&para.text());
        }
        result
    }

    /// Get all paragraphs of the document, in document order.
    ///
    /// Includes paragraphs nested inside tables and structured blocks;
    /// use the block tree to tell them apart.
    #[inline]
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Get mutable access to the paragraphs, for in-place text edits.
    #[inline]
    pub fn paragraphs_mut(&mut self) -> &mut [Paragraph] {
        &mut self.paragraphs
    }

    /// Get the number of paragraphs in the document.
    #[inline]
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Get the block-level tree of the document.
    #[inline]
    pub fn tree(&self) -> &DocumentTree {
        &self.tree
    }

    /// Get the lookup context of the document.
    #[inline]
    pub fn container(&self) -> &Container {
        &self.container
    }
}
