//! Stop word lexicons
//!
//! The lists are compiled into the library. A `StopWords` value is built once and then only read;
//! pass it by reference to whatever filters tokens.
use std::fmt;
use std::str::FromStr;

use errors::*;
use farm::{FarmMap, new_farm};

/// Where a stop word came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lexicon {
    /// The Snowball stemmer's English list, with contractions
    Snowball,
    /// The SMART information retrieval system's list
    Smart,
    /// Words supplied by the caller
    Custom,
}

impl Lexicon {
    /// Bundled lexicons
    pub fn all() -> &'static [Lexicon] {
        &[Lexicon::Snowball, Lexicon::Smart]
    }

    fn words(&self) -> &'static str {
        match *self {
            Lexicon::Snowball => include_str!("lexicons/snowball.txt"),
            Lexicon::Smart => include_str!("lexicons/smart.txt"),
            Lexicon::Custom => "",
        }
    }
}

impl fmt::Display for Lexicon {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Lexicon::Snowball => write!(f, "snowball"),
            Lexicon::Smart => write!(f, "SMART"),
            Lexicon::Custom => write!(f, "custom"),
        }
    }
}

impl FromStr for Lexicon {
    type Err = Error;

    fn from_str(name: &str) -> Result<Lexicon> {
        match name.trim().to_lowercase().as_str() {
            "snowball" => Ok(Lexicon::Snowball),
            "smart" => Ok(Lexicon::Smart),
            _ => Err(Error::configuration(format!(
                "unknown stop word lexicon {:?}; try snowball or smart", name))),
        }
    }
}

/// A set of lower-case stop words, each tagged with the lexicons listing it
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: FarmMap<String, Vec<Lexicon>>,
}

impl StopWords {
    /// No stop words at all
    pub fn empty() -> Self {
        StopWords { words: new_farm() }
    }

    /// The union of the given bundled lexicons
    pub fn load(lexicons: &[Lexicon]) -> Self {
        let mut stop_words = StopWords::empty();
        for &lexicon in lexicons {
            for word in lexicon.words().lines().map(str::trim).filter(|w| !w.is_empty()) {
                stop_words.insert(word, lexicon);
            }
        }
        debug!("Loaded {} stop words from {:?}", stop_words.len(), lexicons);
        stop_words
    }

    /// Every bundled lexicon, unioned
    pub fn english() -> Self {
        StopWords::load(Lexicon::all())
    }

    /// A custom list. Words are lower-cased to match what the tokenizer produces.
    pub fn from_list<S: AsRef<str>>(words: &[S]) -> Self {
        let mut stop_words = StopWords::empty();
        stop_words.extend(words);
        stop_words
    }

    /// Add custom words, as when a corpus has its own junk ("chapter", page headers...)
    pub fn extend<S: AsRef<str>>(&mut self, words: &[S]) {
        for word in words {
            self.insert(word.as_ref(), Lexicon::Custom);
        }
    }

    fn insert(&mut self, word: &str, lexicon: Lexicon) {
        let tags = self.words.entry(word.to_lowercase()).or_insert_with(Vec::new);
        if !tags.contains(&lexicon) {
            tags.push(lexicon);
        }
    }

    /// Exact membership, after whatever normalization the tokenizer did
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains_key(token)
    }

    /// Lexicons that list this word (empty if it is not a stop word)
    pub fn lexicons_of(&self, token: &str) -> &[Lexicon] {
        self.words.get(token).map(|tags| tags.as_slice()).unwrap_or(&[])
    }

    /// Just the words one lexicon contributed
    pub fn only(&self, lexicon: Lexicon) -> StopWords {
        StopWords {
            words: self.words.iter()
                .filter(|&(_, tags)| tags.contains(&lexicon))
                .map(|(word, _)| (word.clone(), vec![lexicon]))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_lexicons_load() {
        let snowball = StopWords::load(&[Lexicon::Snowball]);
        assert_eq!(snowball.len(), 174);
        assert!(snowball.contains("the"));
        assert!(snowball.contains("don't"));
        assert!(!snowball.contains("The"));
        assert!(!snowball.contains("whale"));
    }

    #[test]
    fn union_keeps_tags() {
        let both = StopWords::english();
        assert!(both.len() > StopWords::load(&[Lexicon::Smart]).len());
        assert_eq!(both.lexicons_of("the"), &[Lexicon::Snowball, Lexicon::Smart]);
        assert_eq!(both.lexicons_of("whale"), &[] as &[Lexicon]);
        assert_eq!(both.only(Lexicon::Snowball).len(), 174);
    }

    #[test]
    fn custom_words_are_lowercased() {
        let mut custom = StopWords::from_list(&["Chapter"]);
        custom.extend(&["MISS".to_string()]);
        assert!(custom.contains("chapter"));
        assert!(custom.contains("miss"));
        assert_eq!(custom.lexicons_of("miss"), &[Lexicon::Custom]);
    }

    #[test]
    fn lexicon_names_parse() {
        assert_eq!("SMART".parse::<Lexicon>().unwrap(), Lexicon::Smart);
        assert!("onix".parse::<Lexicon>().is_err());
    }
}
