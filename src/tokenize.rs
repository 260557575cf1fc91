//! Split documents into one row per sentence, word or n-gram
//!
//! Boundaries come from unicode segmentation (UAX #29). What this module adds on top is the
//! bookkeeping: every token keeps the source it came from, the document it came from, and an
//! index that increases through all of that source's documents.
use std::fmt;
use std::str::FromStr;
use std::vec;
use std::iter::Enumerate;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use document::{Document, SourceId};
use errors::*;
use farm::{FarmMap, new_farm};

/// Number of words in an n-gram; never zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Width(usize);

impl Width {
    pub fn new(n: i64) -> Result<Width> {
        if n < 1 {
            return Err(Error::configuration(format!(
                "n-gram width must be at least 1, but it was {}", n)));
        }
        Ok(Width(n as usize))
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

/// What a single token is
#[derive(Debug, Clone)]
pub enum Unit {
    Word,
    Sentence,
    /// Runs of `n` consecutive words, joined by a space
    Ngram(Width),
    /// Grapheme clusters, skipping whitespace and punctuation
    Character,
    Line,
    /// Pieces between matches of a pattern
    Regex(Regex),
}

impl Unit {
    /// N-grams need a width of at least one
    pub fn ngram(n: i64) -> Result<Unit> {
        Ok(Unit::Ngram(Width::new(n)?))
    }

    /// Whether tokens of this kind are lower-cased unless asked otherwise
    pub fn lowercase_by_default(&self) -> bool {
        match *self {
            Unit::Sentence | Unit::Line => false,
            _ => true,
        }
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Unit) -> bool {
        match (self, other) {
            (&Unit::Word, &Unit::Word)
            | (&Unit::Sentence, &Unit::Sentence)
            | (&Unit::Character, &Unit::Character)
            | (&Unit::Line, &Unit::Line) => true,
            (&Unit::Ngram(a), &Unit::Ngram(b)) => a == b,
            (&Unit::Regex(ref a), &Unit::Regex(ref b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Unit::Word => write!(f, "word"),
            Unit::Sentence => write!(f, "sentence"),
            Unit::Ngram(n) => write!(f, "ngram:{}", n.get()),
            Unit::Character => write!(f, "character"),
            Unit::Line => write!(f, "line"),
            Unit::Regex(ref re) => write!(f, "regex:{}", re.as_str()),
        }
    }
}

impl FromStr for Unit {
    type Err = Error;

    /// Accepts `word`, `sentence`, `ngram:N`, `character`, `line` and `regex:PATTERN`,
    /// optionally pluralized.
    fn from_str(spec: &str) -> Result<Unit> {
        let (name, arg) = match spec.find(':') {
            Some(colon) => (&spec[..colon], Some(&spec[colon + 1..])),
            None => (spec, None),
        };
        let name = name.trim().to_lowercase();
        let name = name.trim_end_matches('s');
        match (name, arg) {
            ("word", None) => Ok(Unit::Word),
            ("sentence", None) => Ok(Unit::Sentence),
            ("character", None) => Ok(Unit::Character),
            ("line", None) => Ok(Unit::Line),
            ("ngram", Some(n)) => {
                let n = n.trim().parse::<i64>().map_err(|_| Error::configuration(format!(
                    "n-gram width should be a whole number, not {:?}", n)))?;
                Unit::ngram(n)
            }
            ("ngram", None) => Err(Error::configuration("n-grams need a width, as in ngram:2")),
            ("regex", Some(pattern)) => Ok(Unit::Regex(Regex::new(pattern).map_err(|e| {
                Error::configuration(format!("bad tokenizing pattern: {}", e))
            })?)),
            _ => Err(Error::configuration(format!("unknown tokenization unit {:?}", spec))),
        }
    }
}

/// A single token, tied back to where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct TokenRow {
    pub source_id: Option<SourceId>,
    /// Position of the originating document in the input
    pub document: usize,
    /// Order of this token among all tokens of the same source
    pub sequence_index: usize,
    pub token: String,
}

/// Splits documents into tokens of one kind
#[derive(Debug, Clone)]
pub struct Tokenizer {
    unit: Unit,
    lowercase: bool,
}

impl Tokenizer {
    pub fn new(unit: Unit) -> Self {
        let lowercase = unit.lowercase_by_default();
        Tokenizer { unit: unit, lowercase: lowercase }
    }

    pub fn lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    /// Tokens of one text, in order, without any bookkeeping
    pub fn split(&self, text: &str) -> Vec<String> {
        match self.unit {
            Unit::Word => text.unicode_words().map(|w| self.normalize(w)).collect(),
            Unit::Sentence => text.unicode_sentences()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| self.normalize(s))
                .collect(),
            Unit::Ngram(width) => {
                let n = width.get();
                let words: Vec<String> = text.unicode_words().map(|w| self.normalize(w)).collect();
                if words.len() < n {
                    return vec![];
                }
                words.windows(n).map(|gram| gram.join(" ")).collect()
            }
            Unit::Character => text.graphemes(true)
                .filter(|g| g.chars().any(char::is_alphanumeric))
                .map(|g| self.normalize(g))
                .collect(),
            Unit::Line => text.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(|l| self.normalize(l))
                .collect(),
            Unit::Regex(ref re) => re.split(text)
                .map(str::trim)
                .filter(|piece| !piece.is_empty())
                .map(|piece| self.normalize(piece))
                .collect(),
        }
    }

    fn normalize(&self, token: &str) -> String {
        if self.lowercase { token.to_lowercase() } else { token.to_string() }
    }

    /// Lazily tokenize a sequence of documents
    pub fn tokenize<'t, 'd, I>(&'t self, documents: I) -> Tokens<'t, I::IntoIter>
        where I: IntoIterator<Item = &'d Document> {
        Tokens {
            tokenizer: self,
            documents: documents.into_iter().enumerate(),
            source_id: None,
            document: 0,
            next_index: 0,
            pending: vec![].into_iter(),
            counters: new_farm(),
        }
    }
}

/// Iterator of token rows, see `Tokenizer::tokenize`
pub struct Tokens<'t, I> {
    tokenizer: &'t Tokenizer,
    documents: Enumerate<I>,
    source_id: Option<SourceId>,
    document: usize,
    next_index: usize,
    pending: vec::IntoIter<String>,
    /// Next sequence index of every source we have left behind
    counters: FarmMap<Option<SourceId>, usize>,
}

impl<'t, 'd, I> Iterator for Tokens<'t, I> where I: Iterator<Item = &'d Document> {
    type Item = TokenRow;

    fn next(&mut self) -> Option<TokenRow> {
        loop {
            if let Some(token) = self.pending.next() {
                let row = TokenRow {
                    source_id: self.source_id.clone(),
                    document: self.document,
                    sequence_index: self.next_index,
                    token: token,
                };
                self.next_index += 1;
                return Some(row);
            }
            let (document, doc) = self.documents.next()?;
            if doc.source_id != self.source_id {
                let previous = doc.source_id.clone();
                let left = ::std::mem::replace(&mut self.source_id, previous);
                self.counters.insert(left, self.next_index);
                self.next_index = self.counters.get(&self.source_id).cloned().unwrap_or(0);
            }
            self.document = document;
            self.pending = self.tokenizer.split(&doc.text).into_iter();
        }
    }
}
