//! Documents: the rows everything else is derived from
use std::fmt;
use std::rc::Rc;

/// Identifies a work (book, poem, author...) that several documents belong to
///
/// Cloning is cheap since every token row carries one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(Rc<str>);

impl SourceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'a> From<&'a str> for SourceId {
    fn from(name: &'a str) -> Self {
        SourceId(Rc::from(name))
    }
}

impl From<String> for SourceId {
    fn from(name: String) -> Self {
        SourceId(Rc::from(name))
    }
}

impl From<u32> for SourceId {
    fn from(id: u32) -> Self {
        SourceId::from(id.to_string())
    }
}

/// One line (or paragraph, or whole text) of a work
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub source_id: Option<SourceId>,
    pub text: String,
    /// Chapter number, only known after `sections::number_sections`
    pub section: Option<u32>,
}

impl Document {
    pub fn new<S: Into<String>>(source_id: Option<SourceId>, text: S) -> Self {
        Document { source_id: source_id, text: text.into(), section: None }
    }

    /// A document with no source, as for a bare string literal
    pub fn anonymous<S: Into<String>>(text: S) -> Self {
        Document::new(None, text)
    }

    /// Same document, placed in a section
    pub fn in_section(self, section: u32) -> Self {
        Document { section: Some(section), ..self }
    }
}
