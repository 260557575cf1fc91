//! Token frequency tables
use std::io::{self, Write};

use document::SourceId;
use farm::{FarmMap, new_farm};
use tokenize::TokenRow;

/// Whether counts are kept apart per source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    Overall,
    BySource,
}

/// How often one token occurs (within one group)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyRow {
    pub group: Option<SourceId>,
    pub token: String,
    pub count: usize,
}

/// Frequency rows, most frequent first. Ties stay in the order the tokens were first seen.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrequencyTable {
    rows: Vec<FrequencyRow>,
}

/// Count every token. The input is consumed completely.
pub fn count<I>(tokens: I, grouping: Grouping) -> FrequencyTable
    where I: IntoIterator<Item = TokenRow> {
    // Position in `rows` of every (group, token) seen so far
    let mut positions: FarmMap<(Option<SourceId>, String), usize> = new_farm();
    let mut rows: Vec<FrequencyRow> = vec![];
    for row in tokens {
        let group = match grouping {
            Grouping::Overall => None,
            Grouping::BySource => row.source_id,
        };
        let key = (group, row.token);
        if let Some(&at) = positions.get(&key) {
            rows[at].count += 1;
            continue;
        }
        positions.insert(key.clone(), rows.len());
        rows.push(FrequencyRow { group: key.0, token: key.1, count: 1 });
    }
    // Stable, so first-seen order breaks ties
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    debug!("Counted {} distinct tokens", rows.len());
    FrequencyTable { rows: rows }
}

/// Limits applied to a table before it is plotted or printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cutoff {
    /// Drop rows counted fewer times than this
    pub min_count: Option<usize>,
    /// Keep at most this many rows
    pub max_rows: Option<usize>,
    /// Apply `max_rows` within each group instead of to the whole table
    pub per_group: bool,
}

impl FrequencyTable {
    pub fn rows(&self) -> &[FrequencyRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<FrequencyRow> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of all counts, i.e. the number of tokens that were counted
    pub fn total(&self) -> usize {
        self.rows.iter().map(|r| r.count).sum()
    }

    /// Distinct groups, in order of first appearance in the table
    pub fn groups(&self) -> Vec<Option<SourceId>> {
        let mut groups: Vec<Option<SourceId>> = vec![];
        for row in &self.rows {
            if !groups.contains(&row.group) {
                groups.push(row.group.clone());
            }
        }
        groups
    }

    /// The rows of one group, as a table of their own
    pub fn for_group(&self, group: Option<&SourceId>) -> FrequencyTable {
        FrequencyTable {
            rows: self.rows.iter()
                .filter(|r| r.group.as_ref() == group)
                .cloned()
                .collect(),
        }
    }

    /// Count of a token within a group
    pub fn get(&self, group: Option<&SourceId>, token: &str) -> Option<usize> {
        self.rows.iter()
            .find(|r| r.group.as_ref() == group && r.token == token)
            .map(|r| r.count)
    }

    /// A new table with the cutoff applied
    pub fn cut(&self, cutoff: &Cutoff) -> FrequencyTable {
        let min_count = cutoff.min_count.unwrap_or(0);
        let mut taken: FarmMap<Option<SourceId>, usize> = new_farm();
        let mut total_taken = 0;
        let mut rows = vec![];
        for row in self.rows.iter().filter(|r| r.count >= min_count) {
            if let Some(max_rows) = cutoff.max_rows {
                let so_far = if cutoff.per_group {
                    taken.entry(row.group.clone()).or_insert(0)
                } else {
                    &mut total_taken
                };
                if *so_far >= max_rows {
                    continue;
                }
                *so_far += 1;
            }
            rows.push(row.clone());
        }
        FrequencyTable { rows: rows }
    }

    /// Tab separated, with a header line
    pub fn write_tsv<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "group\ttoken\tcount")?;
        for row in &self.rows {
            let group = row.group.as_ref().map(|g| g.as_str()).unwrap_or("");
            writeln!(out, "{}\t{}\t{}", group, row.token, row.count)?;
        }
        Ok(())
    }
}
