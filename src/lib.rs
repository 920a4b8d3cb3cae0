//! Longan - paragraph resolution for WordprocessingML documents
//!
//! This library resolves the effective, rendered form of paragraphs in
//! WordprocessingML (.docx body XML) content: it walks multi-level style
//! inheritance chains, maps numbering references through the numbering
//! tables, and gives character-exact access to text that is fragmented
//! across inline runs.
//!
//! # Features
//!
//! - **Typed paragraph model**: runs, hyperlinks, smart tags, tracked
//!   insertions/deletions, and inline structured document tags
//! - **Style chains**: lazy walk from a paragraph's style through its
//!   `basedOn` ancestors, with cycle detection and heading classification
//! - **Numbering resolution**: two-step `numId`/`ilvl` indirection with
//!   every missing link treated as a normal "not numbered" outcome
//! - **Text manipulation**: flatten, strip a prefix, or remove leading
//!   tabs across run boundaries without disturbing formatting
//! - **Streaming parsers**: `quick-xml` based readers for paragraph,
//!   styles, and numbering parts
//!
//! # Example - resolving a paragraph
//!
//! ```no_run
//! use longan::wml::{Container, parse};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let styles = parse::parse_styles(&std::fs::read("styles.xml")?)?;
//! let numbering = parse::parse_numbering(&std::fs::read("numbering.xml")?)?;
//! let container = Container::new(Some(styles), Some(numbering));
//!
//! let paragraph = parse::parse_paragraph(br#"<w:p><w:r><w:t>Hi</w:t></w:r></w:p>"#)?;
//! println!("text: {}", paragraph.text());
//! if let Some(style) = paragraph.heading_style(&container)? {
//!     println!("heading: {}", style.style_id());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - whole document bodies
//!
//! ```no_run
//! use longan::wml::parse;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let body = std::fs::read("document.xml")?;
//! let doc = parse::parse_document(&body, None, None)?;
//! for para in doc.paragraphs() {
//!     println!("{}", para.text());
//! }
//! # Ok(())
//! # }
//! ```

/// Error types shared across the crate.
pub mod error;

/// Block-level document tree with parent links and lazy ancestor walks.
pub mod tree;

/// WordprocessingML content model: paragraphs, runs, styles, numbering.
pub mod wml;

// Re-export commonly used types for convenience
pub use error::{Result, WmlError};
pub use wml::{Container, Document, Paragraph, Run};
