use std::io;
use std::io::ErrorKind;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;

const EXPORT_NS: &str = "http://wordpress.org/export/";
const EXCERPT_NS_SUFFIX: &str = "/excerpt/";
const CONTENT_NS: &str = "http://purl.org/rss/1.0/modules/content/";
const DUBLIN_CORE_NS: &str = "http://purl.org/dc/elements/1.1/";

/// Vocabularies an export mixes together. The export namespace carries a
/// version (`.../export/1.2/`), so it is matched by prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vocabulary {
    /// Plain RSS elements, no namespace
    Rss,
    Export,
    Content,
    DublinCore,
    Excerpt,
    Other,
}

impl Vocabulary {
    fn from_resolved(resolved: &ResolveResult) -> Vocabulary {
        match resolved {
            ResolveResult::Unbound => Vocabulary::Rss,
            ResolveResult::Bound(Namespace(uri)) => Self::from_uri(&String::from_utf8_lossy(uri)),
            ResolveResult::Unknown(_) => Vocabulary::Other,
        }
    }

    fn from_uri(uri: &str) -> Vocabulary {
        match uri {
            x if x.starts_with(EXPORT_NS) && x.ends_with(EXCERPT_NS_SUFFIX) => Vocabulary::Excerpt,
            x if x.starts_with(EXPORT_NS) => Vocabulary::Export,
            CONTENT_NS => Vocabulary::Content,
            DUBLIN_CORE_NS => Vocabulary::DublinCore,
            _ => Vocabulary::Other,
        }
    }
}

/// Small owned element tree, enough to query an export the way one walks a DOM.
#[derive(Debug, Clone)]
pub struct Element {
    pub vocabulary: Vocabulary,
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    fn from_start(vocabulary: Vocabulary, start: &BytesStart) -> io::Result<Element> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();

        let mut attributes = vec![];
        for attr in start.attributes() {
            let attr = attr.map_err(invalid_data)?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr.unescape_value().map_err(invalid_data)?.into_owned();
            attributes.push((key, value));
        }

        Ok(Element {
            vocabulary,
            name,
            attributes,
            text: String::new(),
            children: vec![],
        })
    }

    pub fn child(&self, vocabulary: Vocabulary, name: &str) -> Option<&Element> {
        self.children.iter()
            .find(|c| c.vocabulary == vocabulary && c.name == name)
    }

    pub fn children_named<'a>(&'a self, vocabulary: Vocabulary, name: &'a str) -> impl Iterator<Item=&'a Element> + 'a {
        self.children.iter()
            .filter(move |c| c.vocabulary == vocabulary && c.name == name)
    }

    /// Text of a child element, `None` when the child is absent or blank.
    pub fn child_text(&self, vocabulary: Vocabulary, name: &str) -> Option<&str> {
        self.child(vocabulary, name)
            .map(|c| c.text.as_str())
            .filter(|t| !t.trim().is_empty())
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

fn invalid_data<E: std::fmt::Display>(e: E) -> io::Error {
    io::Error::new(ErrorKind::InvalidData, format!("Error parsing export: {}", e))
}

/// Parses a whole document into its root element.
pub fn parse_document(xml: &str) -> io::Result<Element> {
    let mut reader = NsReader::from_str(xml);
    let mut stack: Vec<Element> = vec![];
    let mut root: Option<Element> = None;

    loop {
        let (resolved, event) = reader.read_resolved_event().map_err(invalid_data)?;
        let vocabulary = Vocabulary::from_resolved(&resolved);

        match event {
            Event::Start(start) => {
                if root.is_some() {
                    return Err(invalid_data("content after the root element"));
                }
                stack.push(Element::from_start(vocabulary, &start)?);
            }
            Event::Empty(start) => {
                let element = Element::from_start(vocabulary, &start)?;
                close_element(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let Some(element) = stack.pop() else {
                    return Err(invalid_data("unexpected closing tag"));
                };
                close_element(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    // unknown entities are kept as written
                    match text.unescape() {
                        Ok(unescaped) => current.text.push_str(&unescaped),
                        Err(_) => current.text.push_str(&String::from_utf8_lossy(&text)),
                    }
                }
            }
            Event::CData(cdata) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&cdata));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(invalid_data(format!("element <{}> is never closed", open.name)));
    }

    root.ok_or_else(|| invalid_data("document has no root element"))
}

fn close_element(stack: &mut Vec<Element>, root: &mut Option<Element>, element: Element) -> io::Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(invalid_data("document has more than one root element")),
    }
    Ok(())
}
