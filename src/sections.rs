//! Numbering chapters from heading lines
use regex::{Regex, RegexBuilder};

use document::{Document, SourceId};
use errors::*;
use farm::{FarmMap, new_farm};

/// Headings like "Chapter 1" or "CHAPTER XIV", matched case-insensitively
pub const CHAPTER_HEADING: &'static str = r"^chapter [\divxlc]";

/// Compile a heading pattern the way `number_sections` expects: case-insensitive
pub fn heading(pattern: &str) -> Result<Regex> {
    Ok(RegexBuilder::new(pattern).case_insensitive(true).build()?)
}

/// Give every line the number of headings seen so far in its source (the heading line itself
/// included). Lines before the first heading are in section 0.
pub fn number_sections<I>(documents: I, heading: &Regex) -> Vec<Document>
    where I: IntoIterator<Item = Document> {
    let mut seen: FarmMap<Option<SourceId>, u32> = new_farm();
    documents.into_iter()
        .map(|doc| {
            let section = seen.entry(doc.source_id.clone()).or_insert(0);
            if heading.is_match(&doc.text) {
                *section += 1;
            }
            let section = *section;
            doc.in_section(section)
        })
        .collect()
}
