/// Streaming parsers for WordprocessingML parts.
///
/// Every parser works on raw XML bytes of a single part; none of them
/// touch the package layer. Element matching is on local names, with
/// the `w:` prefix checked only where another namespace uses the same
/// local name (math runs).
use crate::error::{Result, WmlError};
use crate::tree::{DocumentTree, NodeId, NodeKind};
use crate::wml::container::Container;
use crate::wml::document::Document;
use crate::wml::enums::{Justification, StyleType};
use crate::wml::numbering::{Numbering, NumberingDefinition, NumberingLevel};
use crate::wml::paragraph::Paragraph;
use crate::wml::properties::{NumberingProperties, ParagraphProperties};
use crate::wml::run::{
    DeletedRun, Hyperlink, InsertedRun, ParagraphChild, Run, RunContent, RunProperties,
    SmartTagRun, StructuredRun,
};
use crate::wml::style::{Style, Styles};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use smallvec::SmallVec;

/// Get a decoded, unescaped attribute value by its local name.
fn attr_string(e: &BytesStart, name: &[u8], reader: &Reader<&[u8]>) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == name
            && let Ok(value) = attr.decode_and_unescape_value(reader.decoder())
        {
            return Some(value.into_owned());
        }
    }
    None
}

/// Get an unsigned integer attribute value by its local name.
///
/// Values that fail to parse are treated as absent.
fn attr_u32(e: &BytesStart, name: &[u8]) -> Option<u32> {
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == name {
            return atoi_simd::parse::<u32>(attr.value.as_ref()).ok();
        }
    }
    None
}

/// Get a signed integer attribute value by its local name.
fn attr_i32(e: &BytesStart, name: &[u8]) -> Option<i32> {
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == name {
            return atoi_simd::parse::<i32>(attr.value.as_ref()).ok();
        }
    }
    None
}

/// Read a toggle property (`w:b`, `w:i`, `w:strike`).
///
/// The element being present without a `val` attribute means enabled;
/// `val` of `true`/`1`/`on` enables, anything else disables.
fn toggle_attr(e: &BytesStart) -> bool {
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == b"val" {
            let value = attr.value.as_ref();
            return value == b"true" || value == b"1" || value == b"on";
        }
    }
    true
}

/// Resolve a general entity reference (`&amp;`, `&#169;`, `&#x2014;`,
/// ...) to its character.
///
/// Unknown named entities resolve to `None` and contribute nothing.
fn resolve_general_ref(name: &[u8]) -> Option<char> {
    match name {
        b"amp" => Some('&'),
        b"lt" => Some('<'),
        b"gt" => Some('>'),
        b"quot" => Some('"'),
        b"apos" => Some('\''),
        _ => {
            let reference = name.strip_prefix(b"#")?;
            let code = match reference
                .strip_prefix(b"x")
                .or_else(|| reference.strip_prefix(b"X"))
            {
                Some(hex) => u32::from_str_radix(std::str::from_utf8(hex).ok()?, 16).ok()?,
                None => atoi_simd::parse::<u32>(reference).ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Check for `w:p` / `w:r` specifically using the full name, so that
/// the math namespace equivalents (`m:r` in OMML formulas) are not
/// mistaken for Word elements.
fn is_word_name(name: &[u8], local: &[u8]) -> bool {
    name == local || (name.len() == local.len() + 2 && name.starts_with(b"w:") && &name[2..] == local)
}

#[derive(Default)]
struct RunBuilder {
    contents: SmallVec<[RunContent; 4]>,
    properties: RunProperties,
}

impl RunBuilder {
    fn finish(self) -> Run {
        Run::new(self.contents, self.properties)
    }
}

enum WrapperKind {
    Hyperlink,
    SmartTag,
    Inserted,
    Deleted,
    Structured,
}

/// Builder for the non-run paragraph children that wrap runs.
struct WrapperBuilder {
    kind: WrapperKind,
    relationship_id: Option<String>,
    element: Option<String>,
    author: Option<String>,
    date: Option<String>,
    runs: Vec<Run>,
}

impl WrapperBuilder {
    fn start(e: &BytesStart, reader: &Reader<&[u8]>) -> Self {
        let (kind, relationship_id, element, author, date) = match e.local_name().as_ref() {
            b"hyperlink" => (
                WrapperKind::Hyperlink,
                attr_string(e, b"id", reader),
                None,
                None,
                None,
            ),
            b"smartTag" => (
                WrapperKind::SmartTag,
                None,
                attr_string(e, b"element", reader),
                None,
                None,
            ),
            b"ins" => (
                WrapperKind::Inserted,
                None,
                None,
                attr_string(e, b"author", reader),
                attr_string(e, b"date", reader),
            ),
            b"del" => (
                WrapperKind::Deleted,
                None,
                None,
                attr_string(e, b"author", reader),
                attr_string(e, b"date", reader),
            ),
            _ => (WrapperKind::Structured, None, None, None, None),
        };
        Self {
            kind,
            relationship_id,
            element,
            author,
            date,
            runs: Vec::new(),
        }
    }

    fn finish(self) -> ParagraphChild {
        match self.kind {
            WrapperKind::Hyperlink => {
                ParagraphChild::Hyperlink(Hyperlink::new(self.relationship_id, self.runs))
            }
            WrapperKind::SmartTag => {
                ParagraphChild::SmartTag(SmartTagRun::new(self.element, self.runs))
            }
            WrapperKind::Inserted => {
                ParagraphChild::Inserted(InsertedRun::new(self.author, self.date, self.runs))
            }
            WrapperKind::Deleted => {
                ParagraphChild::Deleted(DeletedRun::new(self.author, self.date, self.runs))
            }
            WrapperKind::Structured => ParagraphChild::Structured(StructuredRun::new(self.runs)),
        }
    }
}

/// Parse a `<w:p>` fragment into a typed [`Paragraph`].
///
/// Text inside `<w:t>` is taken verbatim, whitespace included, with
/// character entity references resolved. Wrapped children may nest in
/// the source (a hyperlink inside a tracked insertion); each wrapper
/// becomes its own paragraph child, innermost first, so the inner
/// wrapper's identity (a hyperlink's relationship id, a revision's
/// author) is never lost to the outer one.
///
/// # Examples
///
/// ```
/// let para = longan::wml::parse::parse_paragraph(
///     br#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Title</w:t></w:r></w:p>"#,
/// )
/// .unwrap();
/// assert_eq!(para.text(), "Title");
/// assert_eq!(para.properties().unwrap().parent_style(), Some("Heading1"));
/// ```
pub fn parse_paragraph(xml: &[u8]) -> Result<Paragraph> {
    // No whitespace trimming: text inside <w:t> is significant, and
    // text between tags is only consumed while inside one.
    let mut reader = Reader::from_reader(xml);

    let mut properties: Option<ParagraphProperties> = None;
    let mut children: Vec<ParagraphChild> = Vec::new();

    let mut in_ppr = false;
    let mut in_numpr = false;
    let mut num_id: Option<u32> = None;
    let mut level_id: Option<u32> = None;

    let mut wrappers: Vec<WrapperBuilder> = Vec::new();
    let mut in_sdt_pr = false;

    let mut current_run: Option<RunBuilder> = None;
    let mut in_rpr = false;
    let mut in_text = false;
    let mut current_text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"pPr" if current_run.is_none() && wrappers.is_empty() => {
                    in_ppr = true;
                    properties.get_or_insert_with(ParagraphProperties::new);
                }
                b"numPr" if in_ppr => in_numpr = true,
                b"r" if is_word_name(e.name().as_ref(), b"r")
                    && current_run.is_none()
                    && !in_sdt_pr =>
                {
                    current_run = Some(RunBuilder::default());
                }
                b"rPr" if current_run.is_some() => in_rpr = true,
                b"t" if current_run.is_some() => {
                    in_text = true;
                    current_text.clear();
                }
                b"hyperlink" | b"smartTag" | b"ins" | b"del" | b"sdt" if !in_ppr => {
                    wrappers.push(WrapperBuilder::start(&e, &reader));
                }
                b"sdtPr" => in_sdt_pr = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"pStyle" if in_ppr => {
                    if let Some(props) = properties.as_mut() {
                        props.set_parent_style(attr_string(&e, b"val", &reader));
                    }
                }
                b"numId" if in_numpr => num_id = attr_u32(&e, b"val"),
                b"ilvl" if in_numpr => level_id = attr_u32(&e, b"val"),
                b"jc" if in_ppr => {
                    if let Some(props) = properties.as_mut() {
                        props.set_justification(
                            attr_string(&e, b"val", &reader)
                                .as_deref()
                                .and_then(Justification::from_xml),
                        );
                    }
                }
                b"ind" if in_ppr => {
                    if let Some(props) = properties.as_mut() {
                        props.set_indentation_left(attr_i32(&e, b"left"));
                        props.set_indentation_first_line(attr_i32(&e, b"firstLine"));
                    }
                }
                b"b" if in_rpr => {
                    if let Some(run) = current_run.as_mut() {
                        run.properties.bold = Some(toggle_attr(&e));
                    }
                }
                b"i" if in_rpr => {
                    if let Some(run) = current_run.as_mut() {
                        run.properties.italic = Some(toggle_attr(&e));
                    }
                }
                b"strike" if in_rpr => {
                    if let Some(run) = current_run.as_mut() {
                        run.properties.strikethrough = Some(toggle_attr(&e));
                    }
                }
                b"tab" if current_run.is_some() && !in_rpr => {
                    if let Some(run) = current_run.as_mut() {
                        run.contents.push(RunContent::Tab);
                    }
                }
                b"br" if current_run.is_some() && !in_rpr => {
                    if let Some(run) = current_run.as_mut() {
                        run.contents.push(RunContent::Break);
                    }
                }
                b"noBreakHyphen" if current_run.is_some() => {
                    if let Some(run) = current_run.as_mut() {
                        run.contents.push(RunContent::NoBreakHyphen);
                    }
                }
                b"t" if current_run.is_some() => {
                    if let Some(run) = current_run.as_mut() {
                        run.contents.push(RunContent::Text(String::new()));
                    }
                }
                _ => {}
            },
            Ok(Event::Text(e)) if in_text => {
                let text = std::str::from_utf8(e.as_ref())
                    .map_err(|_| WmlError::Xml("invalid UTF-8 in text content".to_string()))?;
                current_text.push_str(text);
            }
            Ok(Event::GeneralRef(e)) if in_text => {
                if let Some(ch) = resolve_general_ref(e.as_ref()) {
                    current_text.push(ch);
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" if in_text => {
                    in_text = false;
                    if let Some(run) = current_run.as_mut() {
                        run.contents
                            .push(RunContent::Text(std::mem::take(&mut current_text)));
                    }
                }
                b"r" if is_word_name(e.name().as_ref(), b"r") => {
                    if let Some(run) = current_run.take() {
                        let run = run.finish();
                        match wrappers.last_mut() {
                            Some(wrapper) => wrapper.runs.push(run),
                            None => children.push(ParagraphChild::Run(run)),
                        }
                    }
                }
                b"rPr" => in_rpr = false,
                b"numPr" if in_numpr => {
                    in_numpr = false;
                    if (num_id.is_some() || level_id.is_some())
                        && let Some(props) = properties.as_mut()
                    {
                        props.set_numbering(Some(NumberingProperties::new(
                            num_id.take(),
                            level_id.take(),
                        )));
                    }
                }
                b"pPr" => in_ppr = false,
                b"sdtPr" => in_sdt_pr = false,
                b"hyperlink" | b"smartTag" | b"ins" | b"del" | b"sdt" => {
                    if let Some(wrapper) = wrappers.pop() {
                        children.push(wrapper.finish());
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(WmlError::Xml(e.to_string())),
            _ => {}
        }
    }

    Ok(Paragraph::new(properties, children))
}

/// Builder for constructing Style objects during XML parsing.
#[derive(Debug, Default)]
struct StyleBuilder {
    style_id: Option<String>,
    name: Option<String>,
    style_type: StyleType,
    based_on: Option<String>,
    is_default: bool,
    is_custom: bool,
}

/// Parse a `styles.xml` part into a [`Styles`] table.
///
/// Styles without a `styleId` are skipped; they can never be referenced
/// by a paragraph.
pub fn parse_styles(xml: &[u8]) -> Result<Styles> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut styles = Styles::new();
    let mut current: Option<StyleBuilder> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"style" => {
                let mut builder = StyleBuilder::default();
                for attr in e.attributes().flatten() {
                    match attr.key.local_name().as_ref() {
                        b"type" => {
                            if let Ok(value) = attr.decode_and_unescape_value(reader.decoder()) {
                                builder.style_type =
                                    StyleType::from_xml(&value).unwrap_or_default();
                            }
                        }
                        b"styleId" => {
                            if let Ok(value) = attr.decode_and_unescape_value(reader.decoder()) {
                                builder.style_id = Some(value.into_owned());
                            }
                        }
                        b"default" => {
                            if let Ok(value) = attr.decode_and_unescape_value(reader.decoder()) {
                                builder.is_default = value == "1" || value == "true";
                            }
                        }
                        b"customStyle" => {
                            if let Ok(value) = attr.decode_and_unescape_value(reader.decoder()) {
                                builder.is_custom = value == "1" || value == "true";
                            }
                        }
                        _ => {}
                    }
                }
                current = Some(builder);
            }
            Ok(Event::Empty(e)) if current.is_some() => {
                let builder = current.as_mut().unwrap();
                match e.local_name().as_ref() {
                    b"name" => builder.name = attr_string(&e, b"val", &reader),
                    b"basedOn" => builder.based_on = attr_string(&e, b"val", &reader),
                    _ => {}
                }
            }
            Ok(Event::End(e)) if e.local_name().as_ref() == b"style" => {
                if let Some(builder) = current.take()
                    && let Some(style_id) = builder.style_id
                {
                    let mut style = Style::new(style_id, builder.style_type)
                        .with_default(builder.is_default)
                        .with_custom(builder.is_custom);
                    if let Some(name) = builder.name {
                        style = style.with_name(name);
                    }
                    if let Some(based_on) = builder.based_on {
                        style = style.with_based_on(based_on);
                    }
                    styles.push(style);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(WmlError::Xml(e.to_string())),
            _ => {}
        }
    }

    Ok(styles)
}

/// Parse a `numbering.xml` part into a [`Numbering`] table.
///
/// Abstract numbering templates (`<w:abstractNum>`) are resolved into
/// the concrete `<w:num>` instances that reference them, so the result
/// holds each definition's levels directly.
pub fn parse_numbering(xml: &[u8]) -> Result<Numbering> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    // (abstract id, levels)
    let mut abstract_nums: Vec<(u32, Vec<NumberingLevel>)> = Vec::new();
    // (num id, abstract id)
    let mut nums: Vec<(u32, u32)> = Vec::new();

    let mut in_abstract = false;
    let mut current_abstract_id: Option<u32> = None;
    let mut current_levels: Vec<NumberingLevel> = Vec::new();

    let mut in_level = false;
    let mut current_level_id: Option<u32> = None;
    let mut current_num_format: Option<String> = None;
    let mut current_level_text: Option<String> = None;
    let mut current_start: Option<u32> = None;

    let mut in_num = false;
    let mut current_num_id: Option<u32> = None;
    let mut current_abstract_ref: Option<u32> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"abstractNum" => {
                    in_abstract = true;
                    current_abstract_id = attr_u32(&e, b"abstractNumId");
                    current_levels.clear();
                }
                b"lvl" if in_abstract => {
                    in_level = true;
                    current_level_id = attr_u32(&e, b"ilvl");
                    current_num_format = None;
                    current_level_text = None;
                    current_start = None;
                }
                b"num" if !in_abstract => {
                    in_num = true;
                    current_num_id = attr_u32(&e, b"numId");
                    current_abstract_ref = None;
                }
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"numFmt" if in_level => current_num_format = attr_string(&e, b"val", &reader),
                b"lvlText" if in_level => current_level_text = attr_string(&e, b"val", &reader),
                b"start" if in_level => current_start = attr_u32(&e, b"val"),
                b"abstractNumId" if in_num => current_abstract_ref = attr_u32(&e, b"val"),
                _ => {}
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"lvl" if in_level => {
                    in_level = false;
                    if let Some(level_id) = current_level_id.take() {
                        let mut level = NumberingLevel::new(level_id);
                        if let Some(num_format) = current_num_format.take() {
                            level = level.with_num_format(num_format);
                        }
                        if let Some(level_text) = current_level_text.take() {
                            level = level.with_level_text(level_text);
                        }
                        if let Some(start) = current_start.take() {
                            level = level.with_start(start);
                        }
                        current_levels.push(level);
                    }
                }
                b"abstractNum" => {
                    in_abstract = false;
                    if let Some(id) = current_abstract_id.take() {
                        abstract_nums.push((id, std::mem::take(&mut current_levels)));
                    }
                }
                b"num" => {
                    in_num = false;
                    if let (Some(num_id), Some(abstract_id)) =
                        (current_num_id.take(), current_abstract_ref.take())
                    {
                        nums.push((num_id, abstract_id));
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(WmlError::Xml(e.to_string())),
            _ => {}
        }
    }

    let mut numbering = Numbering::new();
    for (num_id, abstract_id) in nums {
        let levels = abstract_nums
            .iter()
            .find(|(id, _)| *id == abstract_id)
            .map(|(_, levels)| levels.clone())
            .unwrap_or_default();
        numbering.push(
            NumberingDefinition::new(num_id)
                .with_abstract_num_id(abstract_id)
                .with_levels(levels),
        );
    }
    Ok(numbering)
}

fn write_open_tag(buf: &mut Vec<u8>, e: &BytesStart, empty: bool) {
    buf.push(b'<');
    buf.extend_from_slice(e.name().as_ref());
    for attr in e.attributes().flatten() {
        buf.push(b' ');
        buf.extend_from_slice(attr.key.as_ref());
        buf.extend_from_slice(b"=\"");
        buf.extend_from_slice(&attr.value);
        buf.push(b'"');
    }
    if empty {
        buf.extend_from_slice(b"/>");
    } else {
        buf.push(b'>');
    }
}

fn write_end_tag(buf: &mut Vec<u8>, name: &[u8]) {
    buf.extend_from_slice(b"</");
    buf.extend_from_slice(name);
    buf.push(b'>');
}

/// Parse a `document.xml` body into a [`Document`] resolving against
/// the given container.
///
/// Each `<w:p>` subtree is captured as a fragment and parsed with
/// [`parse_paragraph`]; block structure around the paragraphs (`w:sdt`
/// blocks, tables) is threaded through a [`DocumentTree`] so ancestry
/// queries work on the result.
pub fn parse_document_body(xml: &[u8], container: Container) -> Result<Document> {
    // Untrimmed, so captured fragments keep significant whitespace.
    let mut reader = Reader::from_reader(xml);

    let mut tree = DocumentTree::new();
    let root = tree.add_root(NodeKind::Body);
    let mut stack: Vec<NodeId> = vec![root];
    let mut paragraphs: Vec<Paragraph> = Vec::new();

    let mut capturing = false;
    let mut depth = 0usize;
    let mut fragment: Vec<u8> = Vec::with_capacity(2048);

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if capturing => {
                if is_word_name(e.name().as_ref(), b"p") {
                    depth += 1;
                }
                write_open_tag(&mut fragment, &e, false);
            }
            Ok(Event::Empty(e)) if capturing => write_open_tag(&mut fragment, &e, true),
            Ok(Event::Text(e)) if capturing => fragment.extend_from_slice(e.as_ref()),
            Ok(Event::GeneralRef(e)) if capturing => {
                fragment.push(b'&');
                fragment.extend_from_slice(e.as_ref());
                fragment.push(b';');
            }
            Ok(Event::End(e)) if capturing => {
                write_end_tag(&mut fragment, e.name().as_ref());
                if is_word_name(e.name().as_ref(), b"p") {
                    depth -= 1;
                    if depth == 0 {
                        capturing = false;
                        let mut para = parse_paragraph(&fragment)?;
                        let parent = *stack.last().unwrap_or(&root);
                        para.set_node(tree.add_child(parent, NodeKind::Paragraph));
                        paragraphs.push(para);
                    }
                }
            }
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"p" if is_word_name(e.name().as_ref(), b"p") => {
                    capturing = true;
                    depth = 1;
                    fragment.clear();
                    write_open_tag(&mut fragment, &e, false);
                }
                b"sdt" => {
                    let parent = *stack.last().unwrap_or(&root);
                    stack.push(tree.add_child(parent, NodeKind::StructuredDocumentBlock));
                }
                b"tbl" => {
                    let parent = *stack.last().unwrap_or(&root);
                    stack.push(tree.add_child(parent, NodeKind::Table));
                }
                b"tr" => {
                    let parent = *stack.last().unwrap_or(&root);
                    stack.push(tree.add_child(parent, NodeKind::TableRow));
                }
                b"tc" => {
                    let parent = *stack.last().unwrap_or(&root);
                    stack.push(tree.add_child(parent, NodeKind::TableCell));
                }
                _ => {}
            },
            Ok(Event::Empty(e)) if is_word_name(e.name().as_ref(), b"p") => {
                // An empty <w:p/> still counts as a paragraph.
                let mut para = Paragraph::new(None, Vec::new());
                let parent = *stack.last().unwrap_or(&root);
                para.set_node(tree.add_child(parent, NodeKind::Paragraph));
                paragraphs.push(para);
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"sdt" | b"tbl" | b"tr" | b"tc" => {
                    if stack.len() > 1 {
                        stack.pop();
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(WmlError::Xml(e.to_string())),
            _ => {}
        }
    }

    Ok(Document::new(tree, paragraphs, container))
}

/// Parse a body plus its optional styles and numbering parts into a
/// [`Document`].
pub fn parse_document(
    body_xml: &[u8],
    styles_xml: Option<&[u8]>,
    numbering_xml: Option<&[u8]>,
) -> Result<Document> {
    let styles = styles_xml.map(parse_styles).transpose()?;
    let numbering = numbering_xml.map(parse_numbering).transpose()?;
    parse_document_body(body_xml, Container::new(styles, numbering))
}
