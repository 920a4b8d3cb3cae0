/// Numbering support - list numbering definitions and their levels.
///
/// Numbering in WordprocessingML is a two-step indirection: a paragraph
/// names a definition by `numId`, the definition names its levels by
/// `ilvl`. Abstract templates from the part are resolved into concrete
/// definitions at parse time, so lookups here are single table scans.

/// A single level within a numbering definition (`<w:lvl>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberingLevel {
    /// Level id (`w:ilvl`)
    level_id: u32,
    /// Number format (e.g. "decimal", "bullet", "lowerRoman")
    num_format: Option<String>,
    /// Level text template (e.g. "%1.")
    level_text: Option<String>,
    /// Starting value
    start: Option<u32>,
}

impl NumberingLevel {
    /// Create a level with the given id.
    pub fn new(level_id: u32) -> Self {
        Self {
            level_id,
            num_format: None,
            level_text: None,
            start: None,
        }
    }

    /// Set the number format.
    pub fn with_num_format(mut self, num_format: impl Into<String>) -> Self {
        self.num_format = Some(num_format.into());
        self
    }

    /// Set the level text template.
    pub fn with_level_text(mut self, level_text: impl Into<String>) -> Self {
        self.level_text = Some(level_text.into());
        self
    }

    /// Set the starting value.
    pub fn with_start(mut self, start: u32) -> Self {
        self.start = Some(start);
        self
    }

    /// Get the level id.
    #[inline]
    pub fn level_id(&self) -> u32 {
        self.level_id
    }

    /// Get the number format (e.g. "decimal", "bullet").
    #[inline]
    pub fn num_format(&self) -> Option<&str> {
        self.num_format.as_deref()
    }

    /// Get the level text template (e.g. "%1.").
    #[inline]
    pub fn level_text(&self) -> Option<&str> {
        self.level_text.as_deref()
    }

    /// Get the starting value.
    #[inline]
    pub fn start(&self) -> Option<u32> {
        self.start
    }

    /// Check whether this level renders as a bullet rather than a number.
    #[inline]
    pub fn is_bullet(&self) -> bool {
        self.num_format.as_deref() == Some("bullet")
    }
}

/// A concrete numbering definition: a `<w:num>` instance resolved
/// through its `<w:abstractNum>` template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberingDefinition {
    /// Numbering ID (`w:numId`)
    num_id: u32,
    /// The abstract template this instance referenced
    abstract_num_id: Option<u32>,
    /// Levels, keyed by their level id
    levels: Vec<NumberingLevel>,
}

impl NumberingDefinition {
    /// Create a definition with the given id and no levels.
    pub fn new(num_id: u32) -> Self {
        Self {
            num_id,
            abstract_num_id: None,
            levels: Vec::new(),
        }
    }

    /// Set the abstract template id this instance references.
    pub fn with_abstract_num_id(mut self, abstract_num_id: u32) -> Self {
        self.abstract_num_id = Some(abstract_num_id);
        self
    }

    /// Set the levels of this definition.
    pub fn with_levels(mut self, levels: Vec<NumberingLevel>) -> Self {
        self.levels = levels;
        self
    }

    /// Get the numbering ID.
    #[inline]
    pub fn num_id(&self) -> u32 {
        self.num_id
    }

    /// Get the abstract template id this instance references.
    #[inline]
    pub fn abstract_num_id(&self) -> Option<u32> {
        self.abstract_num_id
    }

    /// Get all levels of this definition.
    #[inline]
    pub fn levels(&self) -> &[NumberingLevel] {
        &self.levels
    }

    /// Get a level by its id.
    ///
    /// Returns `None` if the definition has no such level.
    pub fn get_level(&self, level_id: u32) -> Option<&NumberingLevel> {
        self.levels.iter().find(|level| level.level_id == level_id)
    }
}

/// The numbering definitions of a document (a `numbering.xml` part).
#[derive(Debug, Clone, Default)]
pub struct Numbering {
    definitions: Vec<NumberingDefinition>,
}

impl Numbering {
    /// Create an empty numbering table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition to the table.
    pub fn push(&mut self, definition: NumberingDefinition) {
        self.definitions.push(definition);
    }

    /// Get the count of numbering definitions.
    #[inline]
    pub fn num_count(&self) -> usize {
        self.definitions.len()
    }

    /// Get an iterator over all definitions.
    pub fn iter(&self) -> std::slice::Iter<'_, NumberingDefinition> {
        self.definitions.iter()
    }

    /// Get a numbering definition by its id.
    ///
    /// Returns `None` if no definition with the given id exists.
    pub fn get_numbering_definition(&self, num_id: u32) -> Option<&NumberingDefinition> {
        self.definitions.iter().find(|d| d.num_id == num_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_numbering() {
        let numbering = Numbering::new();
        assert_eq!(numbering.num_count(), 0);
        assert!(numbering.get_numbering_definition(1).is_none());
    }

    #[test]
    fn test_definition_and_level_lookup() {
        let mut numbering = Numbering::new();
        numbering.push(
            NumberingDefinition::new(2)
                .with_abstract_num_id(0)
                .with_levels(vec![
                    NumberingLevel::new(0)
                        .with_num_format("decimal")
                        .with_level_text("%1.")
                        .with_start(1),
                    NumberingLevel::new(1).with_num_format("bullet"),
                ]),
        );

        let definition = numbering.get_numbering_definition(2).unwrap();
        assert_eq!(definition.abstract_num_id(), Some(0));

        let level = definition.get_level(0).unwrap();
        assert_eq!(level.num_format(), Some("decimal"));
        assert_eq!(level.level_text(), Some("%1."));
        assert_eq!(level.start(), Some(1));
        assert!(!level.is_bullet());

        assert!(definition.get_level(1).unwrap().is_bullet());
        assert!(definition.get_level(5).is_none());
    }
}
