//! Tokenize, filter and count in one pass
use compare::{compare, ComparisonTable};
use count::{count, Cutoff, FrequencyTable, Grouping};
use document::Document;
use errors::Warning;
use filter::remove_stop_words;
use stopwords::StopWords;
use tokenize::{Tokenizer, Unit};

/// Everything that decides what a run computes, except the stop words themselves
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub unit: Unit,
    /// None means the unit's own default
    pub lowercase: Option<bool>,
    pub grouping: Grouping,
    pub cutoff: Cutoff,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            unit: Unit::Word,
            lowercase: None,
            grouping: Grouping::Overall,
            cutoff: Cutoff::default(),
        }
    }
}

impl PipelineConfig {
    pub fn tokenizer(&self) -> Tokenizer {
        let tokenizer = Tokenizer::new(self.unit.clone());
        match self.lowercase {
            Some(lowercase) => tokenizer.lowercase(lowercase),
            None => tokenizer,
        }
    }
}

/// What a run produced
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// All counts, before any cutoff
    pub frequencies: FrequencyTable,
    /// `frequencies` with the configured cutoff applied
    pub top: FrequencyTable,
    /// Tokens produced by the tokenizer
    pub tokens: usize,
    /// Tokens left after removing stop words
    pub kept: usize,
    pub warnings: Vec<Warning>,
}

/// Run the documents through every stage
pub fn run(documents: &[Document], config: &PipelineConfig, stop_words: &StopWords) -> Report {
    let mut warnings = vec![];
    if documents.is_empty() {
        warn!("{}", Warning::EmptyInput);
        warnings.push(Warning::EmptyInput);
    }
    let tokenizer = config.tokenizer();
    let mut tokens = 0;
    let frequencies = {
        let all_tokens = tokenizer.tokenize(documents).inspect(|_| tokens += 1);
        count(remove_stop_words(all_tokens, stop_words), config.grouping)
    };
    let kept = frequencies.total();
    info!("{} documents, {} {} tokens, {} after removing {} stop words, {} distinct",
          documents.len(), tokens, config.unit, kept, stop_words.len(), frequencies.len());
    let top = frequencies.cut(&config.cutoff);
    Report {
        frequencies: frequencies,
        top: top,
        tokens: tokens,
        kept: kept,
        warnings: warnings,
    }
}

/// Compare every source of a grouped table, labelled by source id (or "all" for ungrouped rows)
pub fn compare_sources(table: &FrequencyTable) -> ComparisonTable {
    let groups: Vec<(String, FrequencyTable)> = table.groups().into_iter()
        .map(|group| {
            let label = group.as_ref().map(|g| g.to_string()).unwrap_or_else(|| "all".to_string());
            (label, table.for_group(group.as_ref()))
        })
        .collect();
    let borrowed: Vec<(&str, &FrequencyTable)> = groups.iter()
        .map(|&(ref label, ref table)| (label.as_str(), table))
        .collect();
    compare(&borrowed)
}
