/// WordprocessingML content model.
///
/// This module is organized around these key types:
/// - `Paragraph`: a paragraph with its typed inline children
/// - `Run`: a text run with formatting
/// - `Styles` / `Style`: the style table and the inheritance chain walk
/// - `Numbering`: numbering definitions and their levels
/// - `Container`: the lookup context a paragraph resolves against
/// - `Document`: a parsed body plus its block tree and container
///
/// # Example
///
/// ```rust,ignore
/// use longan::wml::{Container, parse};
///
/// let para = parse::parse_paragraph(xml)?;
/// let container = Container::new(Some(styles), Some(numbering));
///
/// println!("{}", para.text());
/// if let Some(level) = para.numbering_level(&container) {
///     println!("list level {}", level.level_id());
/// }
/// ```
pub mod container;
pub mod document;
pub mod enums;
pub mod numbering;
pub mod paragraph;
pub mod parse;
pub mod properties;
pub mod run;
pub mod style;

mod text;

pub use container::Container;
pub use document::Document;
pub use enums::{Justification, StyleType};
pub use numbering::{Numbering, NumberingDefinition, NumberingLevel};
pub use paragraph::Paragraph;
pub use properties::{NumberingProperties, ParagraphProperties};
pub use run::{
    DeletedRun, Hyperlink, InsertedRun, ParagraphChild, Run, RunContent, RunProperties,
    SmartTagRun, StructuredRun,
};
pub use style::{Style, StyleChain, Styles};
