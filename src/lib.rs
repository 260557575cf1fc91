//! Tidy text mining: one row per token
//!
//! Documents are split into sentences, words or n-grams (`tokenize`), stop words are dropped
//! (`filter`), what remains is counted (`count`), and counts of different works are compared as
//! proportions (`compare`). Every stage takes its input by value or by shared reference and hands
//! back a new table; nothing is changed in place.
//!
//! The included binaries (tt-count, tt-compare) run this over files, bundled texts, or works
//! downloaded from Project Gutenberg.


#[macro_use] extern crate log;
extern crate nom;
extern crate regex;
extern crate farmhash;
extern crate unicode_segmentation;
extern crate ureq;
#[cfg(test)] extern crate tempfile;

pub mod errors;
pub mod farm;
pub mod document;
pub mod tokenize;
pub mod stopwords;
pub mod filter;
pub mod count;
pub mod compare;
pub mod sections;
pub mod corpus;
pub mod pipeline;

pub use document::{Document, SourceId};
pub use errors::{Error, Result, Warning};
