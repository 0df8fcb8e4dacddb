//! Namespace-tolerant XML reading.
//!
//! The wire documents are small (a few hundred kilobytes at most), so they
//! are read into an owned [`Element`] tree first. Element names are kept
//! exactly as they appear on the wire (`siri:ServiceDelivery`); every lookup
//! on the tree compares local names only, see [`namespace`].
//!
//! Decoders for concrete wire types implement [`FromXml`] and use the
//! accessors on [`Element`] plus [`Choice`] for polymorphic elements.

mod choice;
mod error;
pub mod namespace;

use std::str::FromStr;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

pub use choice::Choice;
pub use error::DecodeError;
pub use namespace::{local_name, resolve, same_local_name};

/// A wire type that can be decoded from an XML element.
pub trait FromXml: Sized {
    /// Decode `element` into `Self`.
    fn from_xml(element: &Element) -> Result<Self, DecodeError>;
}

/// An XML element with its raw (possibly prefixed) name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    /// The element name as written on the wire, prefix included.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The element name without namespace prefix.
    pub fn local_name(&self) -> &str {
        local_name(&self.name)
    }

    /// Returns true if this element's local name matches `tag`.
    pub fn is(&self, tag: &str) -> bool {
        same_local_name(&self.name, tag)
    }

    /// Character content of this element, trimmed.
    pub fn text(&self) -> &str {
        self.text.trim()
    }

    /// All child elements in document order.
    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter()
    }

    /// First child whose local name matches `tag`.
    pub fn child(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.is(tag))
    }

    /// Returns true if a child named `tag` is present.
    pub fn has_child(&self, tag: &str) -> bool {
        self.child(tag).is_some()
    }

    /// All children whose local name matches `tag`, in document order.
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.is(tag))
    }

    /// Attribute value by local name (`lang` finds `xml:lang`).
    pub fn attribute(&self, name: &str) -> Option<&str> {
        let key = resolve(name, self.attributes.iter().map(|(k, _)| k.as_str()))?;
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First child named `tag`, or a `MissingElement` error.
    pub fn required(&self, tag: &'static str) -> Result<&Element, DecodeError> {
        self.child(tag).ok_or_else(|| DecodeError::MissingElement {
            parent: self.name.clone(),
            element: tag,
        })
    }

    /// Text of the first child named `tag`, if present.
    pub fn child_text(&self, tag: &str) -> Option<&str> {
        self.child(tag).map(Element::text)
    }

    /// Text of a required child.
    pub fn required_text(&self, tag: &'static str) -> Result<&str, DecodeError> {
        self.required(tag).map(Element::text)
    }

    /// Parse the text of an optional child with `parse`.
    ///
    /// An absent child is `Ok(None)`; a present child that fails to parse is
    /// an error, never silently dropped.
    pub fn parse_child_with<T>(
        &self,
        tag: &'static str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<Option<T>, DecodeError> {
        match self.child_text(tag) {
            None => Ok(None),
            Some(raw) => parse(raw).map(Some).ok_or_else(|| DecodeError::InvalidValue {
                element: tag,
                value: raw.to_string(),
            }),
        }
    }

    /// Parse the text of a required child with `parse`.
    pub fn parse_required_with<T>(
        &self,
        tag: &'static str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<T, DecodeError> {
        let raw = self.required_text(tag)?;
        parse(raw).ok_or_else(|| DecodeError::InvalidValue {
            element: tag,
            value: raw.to_string(),
        })
    }

    /// Parse an optional child via `FromStr`.
    pub fn parse_child<T: FromStr>(&self, tag: &'static str) -> Result<Option<T>, DecodeError> {
        self.parse_child_with(tag, |s| s.parse().ok())
    }

    /// Parse a required child via `FromStr`.
    pub fn parse_required<T: FromStr>(&self, tag: &'static str) -> Result<T, DecodeError> {
        self.parse_required_with(tag, |s| s.parse().ok())
    }

    /// Parse an optional `xs:boolean` child (`true`, `false`, `1`, `0`).
    pub fn flag(&self, tag: &'static str) -> Result<Option<bool>, DecodeError> {
        self.parse_child_with(tag, parse_xs_boolean)
    }

    /// Decode an optional child.
    pub fn decode_child<T: FromXml>(&self, tag: &str) -> Result<Option<T>, DecodeError> {
        self.child(tag).map(T::from_xml).transpose()
    }

    /// Decode a required child.
    pub fn decode_required<T: FromXml>(&self, tag: &'static str) -> Result<T, DecodeError> {
        T::from_xml(self.required(tag)?)
    }

    /// Decode every child named `tag`.
    pub fn decode_all<T: FromXml>(&self, tag: &str) -> Result<Vec<T>, DecodeError> {
        self.children_named(tag).map(T::from_xml).collect()
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self, DecodeError> {
        let name = utf8(start.name().as_ref())?;

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| DecodeError::Malformed(e.to_string()))?;
            let key = utf8(attr.key.as_ref())?;
            // Namespace declarations are not data.
            if key == "xmlns" || key.starts_with("xmlns:") {
                continue;
            }
            let value = attr.unescape_value()?.into_owned();
            attributes.push((key, value));
        }

        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
            text: String::new(),
        })
    }
}

/// Parse raw bytes into an element tree.
///
/// Fails with [`DecodeError::Malformed`] unless the input is a single
/// well-formed root element (declarations, comments and whitespace around it
/// are allowed).
pub fn parse_document(bytes: &[u8]) -> Result<Element, DecodeError> {
    let mut reader = Reader::from_reader(bytes);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(Element::from_start(&start)?),
            Event::Empty(start) => {
                let element = Element::from_start(&start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| DecodeError::Malformed("unexpected closing tag".into()))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                let text = text.unescape()?;
                append_text(&mut stack, &text)?;
            }
            Event::CData(data) => {
                let text = utf8(&data)?;
                append_text(&mut stack, &text)?;
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype.
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(DecodeError::Malformed(format!(
            "unclosed element {}",
            open.name
        )));
    }

    root.ok_or_else(|| DecodeError::Malformed("document has no root element".into()))
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), DecodeError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(element);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(DecodeError::Malformed("multiple root elements".into())),
    }
}

fn append_text(stack: &mut [Element], text: &str) -> Result<(), DecodeError> {
    match stack.last_mut() {
        Some(current) => {
            current.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(DecodeError::Malformed("text outside of root element".into())),
    }
}

fn utf8(bytes: &[u8]) -> Result<String, DecodeError> {
    String::from_utf8(bytes.to_vec()).map_err(|e| DecodeError::Malformed(e.to_string()))
}

fn parse_xs_boolean(s: &str) -> Option<bool> {
    match s {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
