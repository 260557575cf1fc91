//! Count tokens
//!
//! Reads the inputs named on the command line (files, `bundled:NAME` or `gutenberg:ID`), splits
//! them into tokens, optionally removes stop words, and prints a tab separated frequency table
//! with the most frequent tokens first.

// argument parsing
#[macro_use] extern crate clap;
// logging
#[macro_use] extern crate log;
extern crate env_logger;
// lastly, this library
extern crate tidytext;

use std::io;

use clap::{App, Arg};

use tidytext::corpus;
use tidytext::corpus::gutenberg::HttpMirror;
use tidytext::count::{Cutoff, Grouping};
use tidytext::document::{Document, SourceId};
use tidytext::errors::*;
use tidytext::pipeline::{self, PipelineConfig};
use tidytext::sections;
use tidytext::stopwords::{Lexicon, StopWords};
use tidytext::tokenize::Unit;

pub fn main() {
    // Main can't return a Result, and the ? operator needs the enclosing function to return Result
    inner_main().expect("Could not recover. Exiting.");
}

/// `--stop-words` and `--exclude` repeat, taking one value per flag
fn app<'a, 'b>() -> App<'a, 'b> {
    app_from_crate!()
        .args_from_usage(
            "-u, --unit=[UNIT] 'word (default), sentence, ngram:N, character, line or regex:PATTERN'
            --keep-case 'do not lower-case tokens'
            -m, --min-count=[N] 'leave out tokens seen fewer than N times'
            -t, --top=[N] 'print at most N rows (per source with --by-source)'
            -b, --by-source 'count every input separately'
            --chapters 'count every chapter separately'
            --heading=[PATTERN] 'chapter heading pattern, implies --chapters'")
        .arg(Arg::from_usage("-s, --stop-words=[LEXICON]... 'remove stop words listed by snowball and/or smart'")
            .number_of_values(1))
        .arg(Arg::from_usage("-x, --exclude=[WORD]... 'also remove these words'")
            .number_of_values(1))
        .arg(Arg::from_usage("<inputs>... 'text files, bundled:NAME or gutenberg:ID'"))
}

pub fn inner_main() -> Result<()> {
    env_logger::init();
    let args = app().get_matches();

    let unit = args.value_of("unit").unwrap_or("word").parse::<Unit>()?;
    let mut stop_words = StopWords::load(&args.values_of("stop-words")
        .map(|names| names.map(|name| name.parse::<Lexicon>()).collect::<Result<Vec<Lexicon>>>())
        .unwrap_or_else(|| Ok(vec![]))?);
    if let Some(words) = args.values_of("exclude") {
        stop_words.extend(&words.collect::<Vec<&str>>());
    }

    let whole_number = |name: &str| -> Result<Option<usize>> {
        match args.value_of(name) {
            Some(n) => n.parse::<usize>().map(Some).map_err(|_| Error::configuration(format!(
                "--{} takes a whole number, not {:?}", name, n))),
            None => Ok(None),
        }
    };
    let chapters = args.is_present("chapters") || args.is_present("heading");
    let by_source = args.is_present("by-source") || chapters;
    let config = PipelineConfig {
        unit: unit,
        lowercase: if args.is_present("keep-case") { Some(false) } else { None },
        grouping: if by_source { Grouping::BySource } else { Grouping::Overall },
        cutoff: Cutoff {
            min_count: whole_number("min-count")?,
            max_rows: whole_number("top")?,
            per_group: by_source,
        },
    };

    let archive = HttpMirror::from_env();
    let inputs: Vec<&str> = args.values_of("inputs").map(|inputs| inputs.collect()).unwrap_or_default();
    let mut documents: Vec<Document> = corpus::open_distinct(&inputs[..], &archive)?
        .into_iter()
        .flat_map(|docs| docs)
        .collect();
    if chapters {
        let heading = sections::heading(args.value_of("heading").unwrap_or(sections::CHAPTER_HEADING))?;
        documents = sections::number_sections(documents, &heading).into_iter()
            .map(|doc| {
                let source = doc.source_id.as_ref().map(|s| s.to_string()).unwrap_or_default();
                let label = format!("{} #{}", source, doc.section.unwrap_or(0));
                Document::new(Some(SourceId::from(label)), doc.text)
            })
            .collect();
    }

    let report = pipeline::run(&documents, &config, &stop_words);
    for warning in &report.warnings {
        warn!("{}", warning);
    }
    let stdout = io::stdout();
    report.top.write_tsv(stdout.lock())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<'a>(args: &'a clap::ArgMatches<'a>, name: &str) -> Vec<&'a str> {
        args.values_of(name).map(|v| v.collect()).unwrap_or_default()
    }

    #[test]
    fn a_lexicon_does_not_swallow_the_inputs() {
        let args = app().get_matches_from_safe(vec!["tt-count", "-s", "snowball", "bundled:austen"]).unwrap();
        assert_eq!(values(&args, "stop-words"), vec!["snowball"]);
        assert_eq!(values(&args, "inputs"), vec!["bundled:austen"]);
    }

    #[test]
    fn an_excluded_word_does_not_swallow_the_inputs() {
        let args = app().get_matches_from_safe(vec!["tt-count", "-x", "miss", "bundled:austen"]).unwrap();
        assert_eq!(values(&args, "exclude"), vec!["miss"]);
        assert_eq!(values(&args, "inputs"), vec!["bundled:austen"]);
    }

    #[test]
    fn lists_repeat_one_value_at_a_time() {
        let args = app().get_matches_from_safe(vec![
            "tt-count", "-s", "snowball", "--stop-words", "smart", "-x", "miss", "-x", "lady",
            "one.txt", "two.txt",
        ]).unwrap();
        assert_eq!(values(&args, "stop-words"), vec!["snowball", "smart"]);
        assert_eq!(values(&args, "exclude"), vec!["miss", "lady"]);
        assert_eq!(values(&args, "inputs"), vec!["one.txt", "two.txt"]);
        assert!(app().get_matches_from_safe(vec!["tt-count", "-s", "snowball"]).is_err());
    }
}
