//! Compare word use
//!
//! Each input becomes its own group. Word counts are turned into proportions and every other
//! input is set beside the reference (the first input), one row per word. Words missing from one
//! side are written as NA. The correlation of each pair is printed to stderr.

// argument parsing
#[macro_use] extern crate clap;
// logging
#[macro_use] extern crate log;
extern crate env_logger;
// lastly, this library
extern crate tidytext;

use std::io;

use tidytext::compare::write_paired_tsv;
use tidytext::corpus;
use tidytext::corpus::gutenberg::HttpMirror;
use tidytext::count::{Cutoff, Grouping};
use tidytext::document::Document;
use tidytext::errors::*;
use tidytext::pipeline::{self, PipelineConfig};
use tidytext::stopwords::StopWords;
use tidytext::tokenize::Unit;

pub fn main() {
    // Main can't return a Result, and the ? operator needs the enclosing function to return Result
    inner_main().expect("Could not recover. Exiting.");
}
pub fn inner_main() -> Result<()> {
    env_logger::init();
    let args = app_from_crate!()
        .args_from_usage(
            "--keep-stop-words 'do not remove snowball and SMART stop words'
            <reference> 'text file, bundled:NAME or gutenberg:ID to compare against'
            <others>... 'inputs to set beside the reference'")
        .get_matches();

    let stop_words = if args.is_present("keep-stop-words") {
        StopWords::empty()
    } else {
        StopWords::english()
    };
    let archive = HttpMirror::from_env();

    let mut inputs: Vec<&str> = args.value_of("reference").into_iter().collect();
    inputs.extend(args.values_of("others").into_iter().flat_map(|others| others));
    let groups = corpus::open_distinct(&inputs[..], &archive)?;
    let reference_label = groups.first()
        .and_then(|reference| reference.iter().filter_map(|doc| doc.source_id.as_ref()).next())
        .map(|id| id.to_string())
        .ok_or_else(|| Error::Other("The reference input is empty".to_string()))?;
    let documents: Vec<Document> = groups.into_iter().flat_map(|docs| docs).collect();

    let config = PipelineConfig {
        unit: Unit::Word,
        lowercase: None,
        grouping: Grouping::BySource,
        cutoff: Cutoff::default(),
    };
    let report = pipeline::run(&documents, &config, &stop_words);
    let comparison = pipeline::compare_sources(&report.frequencies);
    info!("Comparing {:?} against {}", comparison.labels(), reference_label);
    if comparison.labels().len() < 2 {
        return Err(Error::Other("Nothing to compare the reference with; the other inputs are empty".to_string()));
    }

    for label in comparison.labels().iter().filter(|label| label.as_str() != reference_label) {
        match comparison.correlation(&reference_label, label) {
            Some(cor) => eprintln!("{} ~ {}: r = {:.3} over {} shared words",
                                   reference_label, label, cor.r, cor.n),
            None => eprintln!("{} ~ {}: too few shared words to correlate", reference_label, label),
        }
    }

    let paired = comparison.against(&reference_label).unwrap_or_default();
    let stdout = io::stdout();
    write_paired_tsv(&paired, stdout.lock())?;
    Ok(())
}
