//! Project Gutenberg texts
//!
//! A Gutenberg download wraps the work in a header (`Title: ...`, `Author: ...`) and a licence,
//! with `*** START OF ...` / `*** END OF ...` lines marking where the work itself is. `strip` keeps
//! what is between the markers; `Archive` fetches downloads by their numeric id.
use std::env;
use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::{tag, tag_no_case, take_while1};
use nom::character::complete::{char, space0};
use nom::combinator::{rest, value};
use nom::sequence::{pair, preceded};
use ureq;

use document::{Document, SourceId};
use errors::*;

/// Environment variable overriding where works are downloaded from
pub const MIRROR_VAR: &'static str = "TIDYTEXT_GUTENBERG_MIRROR";
pub const DEFAULT_MIRROR: &'static str = "https://www.gutenberg.org/cache/epub";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Start,
    End,
}

fn marker(line: &str) -> IResult<&str, Marker> {
    alt((
        preceded(pair(tag("***"), space0), alt((
            value(Marker::Start, tag_no_case("start of")),
            value(Marker::End, tag_no_case("end of")),
        ))),
        // Older downloads end with a plain sentence instead
        value(Marker::End, tag_no_case("end of the project gutenberg")),
        value(Marker::End, tag_no_case("end of project gutenberg")),
    ))(line.trim_start())
}

fn header_field(line: &str) -> IResult<&str, (&str, &str)> {
    let (input, key) = take_while1(|c: char| c.is_alphanumeric() || c == ' ' || c == '-')(line)?;
    let (input, _) = char(':')(input)?;
    let (input, _) = space0(input)?;
    let (input, value) = rest(input)?;
    Ok((input, (key.trim(), value.trim())))
}

/// A Gutenberg download, split into its metadata and the work itself
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GutenbergText {
    /// `Key: value` lines of the header, in order
    pub fields: Vec<(String, String)>,
    /// Lines of the work, without leading or trailing blank lines
    pub body: Vec<String>,
}

impl GutenbergText {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.iter()
            .find(|&&(ref k, _)| k.eq_ignore_ascii_case(key))
            .map(|&(_, ref v)| v.as_str())
    }

    pub fn title(&self) -> Option<&str> {
        self.field("Title")
    }

    pub fn author(&self) -> Option<&str> {
        self.field("Author")
    }
}

/// Separate the header and licence from the work. Text without a start marker is all body.
pub fn strip(raw: &str) -> GutenbergText {
    let lines: Vec<&str> = raw.lines().collect();
    let start = lines.iter().position(|l| marker(l).map(|(_, m)| m == Marker::Start).unwrap_or(false));
    let (fields, body_from) = match start {
        Some(at) => {
            let fields = lines[..at].iter()
                .filter_map(|l| header_field(l).ok())
                .filter(|&(_, (key, _))| key.chars().next().map_or(false, char::is_alphabetic))
                .map(|(_, (key, value))| (key.to_string(), value.to_string()))
                .collect();
            (fields, at + 1)
        }
        None => (vec![], 0),
    };
    let body_to = lines[body_from..].iter()
        .position(|l| marker(l).map(|(_, m)| m == Marker::End).unwrap_or(false))
        .map_or(lines.len(), |at| body_from + at);
    let mut body = &lines[body_from..body_to];
    while body.first().map_or(false, |l| l.trim().is_empty()) {
        body = &body[1..];
    }
    while body.last().map_or(false, |l| l.trim().is_empty()) {
        body = &body[..body.len() - 1];
    }
    GutenbergText { fields: fields, body: body.iter().map(|l| l.to_string()).collect() }
}

/// A retrieved work
#[derive(Debug, Clone, PartialEq)]
pub struct Work {
    pub id: u32,
    pub text: GutenbergText,
}

impl Work {
    /// One document per line, with the work id as source
    pub fn documents(&self) -> Vec<Document> {
        self.documents_as(SourceId::from(self.id))
    }

    /// One document per line, under another source id (a title, an author...)
    pub fn documents_as(&self, source_id: SourceId) -> Vec<Document> {
        self.text.body.iter()
            .map(|line| Document::new(Some(source_id.clone()), line.as_str()))
            .collect()
    }
}

/// Somewhere works can be fetched from by id
pub trait Archive {
    /// The raw download of one work
    fn fetch_raw(&self, id: u32) -> Result<String>;

    /// Fetch several works, failing on the first id that cannot be resolved
    fn fetch(&self, ids: &[u32]) -> Result<Vec<Work>> {
        let mut works = Vec::with_capacity(ids.len());
        for &id in ids {
            let text = strip(&self.fetch_raw(id)?);
            info!("Fetched #{} ({}), {} lines",
                  id, text.title().unwrap_or("untitled"), text.body.len());
            works.push(Work { id: id, text: text });
        }
        Ok(works)
    }

    /// Fetch works straight into documents, one source per id
    fn fetch_documents(&self, ids: &[u32]) -> Result<Vec<Document>> {
        Ok(self.fetch(ids)?.iter().flat_map(|work| work.documents()).collect())
    }
}

/// An HTTP mirror laid out like gutenberg.org's cache: `{base}/{id}/pg{id}.txt`
#[derive(Debug, Clone, PartialEq)]
pub struct HttpMirror {
    base: String,
}

impl HttpMirror {
    pub fn new<S: Into<String>>(base: S) -> Self {
        HttpMirror { base: base.into().trim_end_matches('/').to_string() }
    }

    /// The mirror named by `TIDYTEXT_GUTENBERG_MIRROR`, or gutenberg.org
    pub fn from_env() -> Self {
        match env::var(MIRROR_VAR) {
            Ok(ref value) if !value.trim().is_empty() => HttpMirror::new(value.trim()),
            _ => HttpMirror::new(DEFAULT_MIRROR),
        }
    }

    pub fn url(&self, id: u32) -> String {
        format!("{}/{}/pg{}.txt", self.base, id, id)
    }
}

impl Archive for HttpMirror {
    fn fetch_raw(&self, id: u32) -> Result<String> {
        let url = self.url(id);
        debug!("Downloading {}", url);
        let response = ureq::get(&url)
            .call()
            .map_err(|err| Error::DataRetrieval {
                id: id,
                reason: format!("request to {} failed: {}", url, err),
            })?;
        response.into_body().read_to_string().map_err(|err| Error::DataRetrieval {
            id: id,
            reason: format!("could not read the body from {}: {}", url, err),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const DOWNLOAD: &'static str = "\
The Project Gutenberg eBook of Emma, by Jane Austen

This eBook is for the use of anyone anywhere.

Title: Emma

Author: Jane Austen

Release Date: August, 1994 [eBook #158]

*** START OF THE PROJECT GUTENBERG EBOOK EMMA ***


EMMA

CHAPTER I

Emma Woodhouse, handsome, clever, and rich

*** END OF THE PROJECT GUTENBERG EBOOK EMMA ***

Updated editions will replace the previous one.
";

    struct Shelf(HashMap<u32, &'static str>);

    impl Archive for Shelf {
        fn fetch_raw(&self, id: u32) -> Result<String> {
            self.0.get(&id)
                .map(|raw| raw.to_string())
                .ok_or(Error::DataRetrieval { id: id, reason: "not on the shelf".into() })
        }
    }

    #[test]
    fn markers_are_recognized() {
        assert_eq!(marker("*** START OF THE PROJECT GUTENBERG EBOOK EMMA ***").unwrap().1, Marker::Start);
        assert_eq!(marker("***END OF THIS PROJECT GUTENBERG EBOOK").unwrap().1, Marker::End);
        assert_eq!(marker("End of the Project Gutenberg EBook of Emma").unwrap().1, Marker::End);
        assert!(marker("CHAPTER I").is_err());
    }

    #[test]
    fn strips_header_and_licence() {
        let text = strip(DOWNLOAD);
        assert_eq!(text.title(), Some("Emma"));
        assert_eq!(text.author(), Some("Jane Austen"));
        assert_eq!(text.field("release date"), Some("August, 1994 [eBook #158]"));
        assert_eq!(text.body, vec!["EMMA", "", "CHAPTER I", "", "Emma Woodhouse, handsome, clever, and rich"]);
    }

    #[test]
    fn plain_text_is_all_body() {
        let text = strip("\nTitle: not a header\nsecond\n\n");
        assert!(text.fields.is_empty());
        assert_eq!(text.body, vec!["Title: not a header", "second"]);
    }

    #[test]
    fn fetched_works_become_documents() {
        let shelf = Shelf(vec![(158, DOWNLOAD)].into_iter().collect());
        let docs = shelf.fetch_documents(&[158]).unwrap();
        assert_eq!(docs.len(), 5);
        assert_eq!(docs[0].source_id, Some(SourceId::from("158")));
    }

    #[test]
    fn unresolved_ids_are_reported() {
        let shelf = Shelf(vec![(158, DOWNLOAD)].into_iter().collect());
        match shelf.fetch(&[158, 9999]) {
            Err(Error::DataRetrieval { id, .. }) => assert_eq!(id, 9999),
            other => panic!("expected a retrieval error, got {:?}", other),
        }
    }

    #[test]
    fn mirror_urls() {
        assert_eq!(HttpMirror::new("http://mirror.example/epub/").url(1342),
                   "http://mirror.example/epub/1342/pg1342.txt");
    }
}
