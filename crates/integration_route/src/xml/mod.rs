//! XML documents and route reader strategies
//!
//! [`XmlDocument::parse`] turns response text into a small element tree;
//! [`RouteReader`] implementations map that tree onto the route model, one
//! per API family ([`RestRouteReader`], [`OlsRouteReader`]).

mod ols;
mod rest;

pub use ols::{OlsRouteReader, parse_iso8601_duration};
pub use rest::RestRouteReader;

use std::str::FromStr;

use domain::DomainError;
#[cfg(test)]
use mockall::automock;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;
use tracing::debug;

use crate::models::{ExceptionReport, ParsedRoute};
use crate::wkt::GeometryError;

/// Deepest element nesting a document may have
///
/// The element tree is walked recursively, so depth is bounded at load time.
pub const MAX_DEPTH: usize = 256;

/// Errors that can occur while loading an XML document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XmlError {
    /// The XML is not well-formed
    #[error("Malformed XML: {0}")]
    Malformed(String),

    /// An element is still open at the end of input
    #[error("Unclosed element: {0}")]
    Unclosed(String),

    /// The input holds no element
    #[error("Document has no root element")]
    NoRoot,

    /// Elements or text follow the root element
    #[error("Content after the root element")]
    TrailingContent,

    /// Elements are nested deeper than [`MAX_DEPTH`]
    #[error("Elements nested deeper than {0} levels")]
    TooDeep(usize),
}

/// Errors a reader raises on a document it recognizes but cannot map
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReaderError {
    /// An element holds a value of the wrong shape
    #[error("Invalid value for {element}: {value}")]
    InvalidValue {
        /// Element or attribute name
        element: String,
        /// The offending text
        value: String,
    },

    /// The route geometry could not be converted
    #[error("Geometry conversion failed: {0}")]
    Geometry(#[from] GeometryError),

    /// A model rule was violated
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ReaderError {
    pub(crate) fn invalid(element: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            element: element.into(),
            value: value.into(),
        }
    }
}

/// Maps an XML document of one API family onto a route candidate
///
/// `Ok(None)` means the document is not a route response of this family.
#[cfg_attr(test, automock)]
pub trait RouteReader: Send + Sync {
    /// Read a document
    fn read(&self, document: &XmlDocument) -> Result<Option<ParsedRoute>, ReaderError>;
}

/// An XML element with its attributes, text and children
///
/// Names are local names: namespace prefixes (`gml:`, `xls:`, `ows:`) are
/// dropped while loading.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<XmlElement>,
}

impl XmlElement {
    /// Create an empty element
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the text content
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Add an attribute
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Add a child element
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Local name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Concatenated, trimmed text content
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Attribute value by local name
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Child elements in document order
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// First direct child with the given name
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Direct children with the given name
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Self> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Non-empty text of the first direct child with the given name
    #[must_use]
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name)
            .map(Self::text)
            .filter(|text| !text.is_empty())
    }

    /// First descendant with the given name, depth first
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Self> {
        self.children
            .iter()
            .find_map(|c| if c.name == name { Some(c) } else { c.find(name) })
    }
}

/// A loaded XML document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    root: XmlElement,
}

impl XmlDocument {
    /// Wrap an already-built element tree
    #[must_use]
    pub const fn new(root: XmlElement) -> Self {
        Self { root }
    }

    /// The root element
    #[must_use]
    pub const fn root(&self) -> &XmlElement {
        &self.root
    }

    /// Load a document from text
    pub fn parse(xml: &str) -> Result<Self, XmlError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    if stack.is_empty() && root.is_some() {
                        return Err(XmlError::TrailingContent);
                    }
                    check_depth(&stack)?;
                    stack.push(element_from_start(&e)?);
                },
                Ok(Event::Empty(e)) => {
                    check_depth(&stack)?;
                    let element = element_from_start(&e)?;
                    attach(element, &mut stack, &mut root)?;
                },
                Ok(Event::End(_)) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| XmlError::Malformed("unexpected end tag".to_string()))?;
                    attach(element, &mut stack, &mut root)?;
                },
                Ok(Event::Text(e)) => {
                    let text = e
                        .unescape()
                        .map_err(|err| XmlError::Malformed(err.to_string()))?;
                    push_text(&text, &mut stack, root.is_some())?;
                },
                Ok(Event::CData(e)) => {
                    let text = std::str::from_utf8(e.as_ref())
                        .map_err(|err| XmlError::Malformed(err.to_string()))?;
                    push_text(text.trim(), &mut stack, root.is_some())?;
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    debug!(error = ?e, "XML parsing error in route response");
                    return Err(XmlError::Malformed(e.to_string()));
                },
                _ => {},
            }
            buf.clear();
        }

        if let Some(open) = stack.last() {
            return Err(XmlError::Unclosed(open.name.clone()));
        }

        root.map(Self::new).ok_or(XmlError::NoRoot)
    }
}

impl FromStr for XmlDocument {
    type Err = XmlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<XmlElement, XmlError> {
    let name = utf8(start.local_name().as_ref())?;
    let mut element = XmlElement::new(name);

    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| XmlError::Malformed(e.to_string()))?;
        if attribute.key.as_namespace_binding().is_some() {
            continue;
        }
        let key = utf8(attribute.key.local_name().as_ref())?;
        let value = attribute
            .unescape_value()
            .map_err(|e| XmlError::Malformed(e.to_string()))?;
        element.attributes.push((key, value.into_owned()));
    }

    Ok(element)
}

fn check_depth(open: &[XmlElement]) -> Result<(), XmlError> {
    if open.len() >= MAX_DEPTH {
        debug!(limit = MAX_DEPTH, "XML route response nested too deeply");
        return Err(XmlError::TooDeep(MAX_DEPTH));
    }
    Ok(())
}

fn attach(
    element: XmlElement,
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
) -> Result<(), XmlError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
    } else if root.is_none() {
        *root = Some(element);
    } else {
        return Err(XmlError::TrailingContent);
    }
    Ok(())
}

fn push_text(text: &str, stack: &mut [XmlElement], has_root: bool) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(current) => current.text.push_str(text),
        None if text.is_empty() => {},
        None if has_root => return Err(XmlError::TrailingContent),
        None => return Err(XmlError::Malformed("text outside the root element".to_string())),
    }
    Ok(())
}

fn utf8(bytes: &[u8]) -> Result<String, XmlError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| XmlError::Malformed(e.to_string()))
}

/// Read an OWS `ExceptionReport` element
pub(crate) fn ows_exception_report(report: &XmlElement) -> ExceptionReport {
    ExceptionReport {
        code: report
            .find("Exception")
            .and_then(|e| e.attribute("exceptionCode"))
            .map(str::to_string),
        text: report
            .find("ExceptionText")
            .map(XmlElement::text)
            .filter(|t| !t.is_empty())
            .map(str::to_string),
    }
}
