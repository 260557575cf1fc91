//! Getting documents into the pipeline
//!
//! Documents come from string literals, from the short texts bundled with the library, from
//! local files, or from a Project Gutenberg archive (see `gutenberg`). Every loader returns one
//! document per line.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use document::{Document, SourceId};
use errors::*;
use self::gutenberg::Archive;

pub mod gutenberg;

/// Load what an input spec names:
///
/// - `bundled:NAME` for a text bundled with the library,
/// - `gutenberg:ID` for a work fetched from `archive`, labelled with its title,
/// - anything else is a path, labelled with the file name without extension.
pub fn open<A: Archive>(spec: &str, archive: &A) -> Result<Vec<Document>> {
    if spec.starts_with("bundled:") {
        let name = &spec["bundled:".len()..];
        return bundled::by_name(name).ok_or_else(|| Error::configuration(format!(
            "there is no bundled text called {:?}; try dickinson, austen or wells", name)));
    }
    if spec.starts_with("gutenberg:") {
        let id = &spec["gutenberg:".len()..];
        let id = id.trim().parse::<u32>().map_err(|_| Error::configuration(format!(
            "Gutenberg ids are whole numbers, not {:?}", id)))?;
        let mut works = archive.fetch(&[id])?;
        return Ok(match works.pop() {
            Some(work) => {
                let label = work.text.title().map(SourceId::from).unwrap_or_else(|| SourceId::from(id));
                work.documents_as(label)
            }
            None => vec![],
        });
    }
    let path = Path::new(spec);
    let label = path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| spec.to_string());
    read_text(path, Some(SourceId::from(label)))
}

/// Load several inputs, one group of documents each, so that no two inputs share a label.
///
/// An input whose label was already taken by an earlier one is labelled with its spec instead,
/// and failing that with its spec and position (`book.txt #2`).
pub fn open_distinct<A: Archive, S: AsRef<str>>(specs: &[S], archive: &A) -> Result<Vec<Vec<Document>>> {
    let mut taken: Vec<SourceId> = vec![];
    let mut groups = vec![];
    for (position, spec) in specs.iter().enumerate() {
        let spec = spec.as_ref();
        let mut docs = open(spec, archive)?;
        let label = match docs.iter().filter_map(|doc| doc.source_id.clone()).next() {
            Some(label) => label,
            None => {
                groups.push(docs);
                continue;
            }
        };
        if taken.contains(&label) {
            let mut fresh = SourceId::from(spec);
            if taken.contains(&fresh) {
                fresh = SourceId::from(format!("{} #{}", spec, position + 1));
            }
            warn!("{} is also called {:?}; labelling it {:?} instead", spec, label.as_str(), fresh.as_str());
            for doc in &mut docs {
                doc.source_id = Some(fresh.clone());
            }
            taken.push(fresh);
        } else {
            taken.push(label);
        }
        groups.push(docs);
    }
    Ok(groups)
}

/// One document per line of a literal
pub fn from_lines<S: AsRef<str>>(source_id: Option<SourceId>, lines: &[S]) -> Vec<Document> {
    lines.iter()
        .map(|line| Document::new(source_id.clone(), line.as_ref()))
        .collect()
}

/// One document per line of any text
pub fn from_text(source_id: Option<SourceId>, text: &str) -> Vec<Document> {
    text.lines()
        .map(|line| Document::new(source_id.clone(), line))
        .collect()
}

/// One document per line of a local file.
///
/// Files that look like Project Gutenberg downloads have their licence boilerplate removed.
pub fn read_text<P: AsRef<Path>>(path: P, source_id: Option<SourceId>) -> Result<Vec<Document>> {
    let path = path.as_ref();
    let mut raw = String::new();
    for line in BufReader::new(File::open(path)?).lines() {
        raw.push_str(&line?);
        raw.push('\n');
    }
    let text = gutenberg::strip(&raw);
    info!("Read {} lines from {}", text.body.len(), path.display());
    Ok(text.body.into_iter().map(|line| Document::new(source_id.clone(), line)).collect())
}

/// Short public-domain texts compiled into the library, for trying things out
pub mod bundled {
    use super::from_text;
    use document::{Document, SourceId};

    /// The first stanza of Emily Dickinson's "Because I could not stop for Death"
    pub fn dickinson() -> Vec<Document> {
        from_text(Some(SourceId::from("Dickinson")), include_str!("texts/dickinson.txt"))
    }

    /// The first two chapters (abridged) of Pride and Prejudice
    pub fn pride_and_prejudice() -> Vec<Document> {
        from_text(Some(SourceId::from("Pride & Prejudice")), include_str!("texts/pride.txt"))
    }

    /// The opening of The Time Machine
    pub fn time_machine() -> Vec<Document> {
        from_text(Some(SourceId::from("The Time Machine")), include_str!("texts/time_machine.txt"))
    }

    /// Look a bundled text up by a short name
    pub fn by_name(name: &str) -> Option<Vec<Document>> {
        match name.to_lowercase().as_str() {
            "dickinson" => Some(dickinson()),
            "pride" | "austen" => Some(pride_and_prejudice()),
            "time-machine" | "wells" => Some(time_machine()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile;
    use std::io::Write;

    #[test]
    fn literal_lines_share_a_source() {
        let docs = from_lines(Some("poem".into()), &["a", "b"]);
        assert_eq!(docs.len(), 2);
        assert!(docs.iter().all(|d| d.source_id == Some(SourceId::from("poem"))));
    }

    #[test]
    fn bundled_texts_load() {
        let poem = bundled::dickinson();
        assert_eq!(poem.len(), 4);
        assert_eq!(poem[3].text, "and Immortality");
        assert!(bundled::by_name("austen").unwrap().iter().any(|d| d.text == "Chapter 2"));
        assert!(bundled::by_name("beowulf").is_none());
    }

    #[test]
    fn reads_files_line_by_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("poem.txt");
        File::create(&path).unwrap().write_all(b"one line\nanother line\n").unwrap();
        let docs = read_text(&path, Some("p".into())).unwrap();
        let texts: Vec<&str> = docs.iter().map(|d| d.text.as_str()).collect();
        assert_eq!(texts, vec!["one line", "another line"]);
    }

    struct NoArchive;

    impl Archive for NoArchive {
        fn fetch_raw(&self, id: u32) -> Result<String> {
            if id == 1 {
                Ok("Title: One\n*** START OF IT ***\nthe text\n*** END OF IT ***\n".to_string())
            } else {
                Err(Error::DataRetrieval { id: id, reason: "offline".into() })
            }
        }
    }

    #[test]
    fn input_specs() {
        let poem = open("bundled:dickinson", &NoArchive).unwrap();
        assert_eq!(poem.len(), 4);
        assert!(open("bundled:beowulf", &NoArchive).is_err());

        let work = open("gutenberg:1", &NoArchive).unwrap();
        assert_eq!(work, vec![Document::new(Some("One".into()), "the text")]);
        match open("gutenberg:2", &NoArchive) {
            Err(Error::DataRetrieval { id: 2, .. }) => {}
            other => panic!("expected a retrieval error, got {:?}", other),
        }
        assert!(open("gutenberg:two", &NoArchive).is_err());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sonnet.txt");
        File::create(&path).unwrap().write_all(b"Shall I compare thee\n").unwrap();
        let sonnet = open(path.to_str().unwrap(), &NoArchive).unwrap();
        assert_eq!(sonnet[0].source_id, Some(SourceId::from("sonnet")));
    }

    fn labels(groups: &[Vec<Document>]) -> Vec<String> {
        groups.iter()
            .map(|docs| docs[0].source_id.as_ref().unwrap().to_string())
            .collect()
    }

    #[test]
    fn files_with_the_same_name_stay_apart() {
        let (one, two) = (tempfile::tempdir().unwrap(), tempfile::tempdir().unwrap());
        let first = one.path().join("book.txt");
        let second = two.path().join("book.txt");
        File::create(&first).unwrap().write_all(b"call me ishmael\n").unwrap();
        File::create(&second).unwrap().write_all(b"it was a dark night\n").unwrap();
        let specs = vec![first.to_str().unwrap(), second.to_str().unwrap()];
        let groups = open_distinct(&specs[..], &NoArchive).unwrap();
        assert_eq!(labels(&groups), vec!["book".to_string(), specs[1].to_string()]);
        assert!(groups[1].iter().all(|d| d.source_id == Some(SourceId::from(specs[1]))));
    }

    #[test]
    fn aliases_of_one_bundled_text_stay_apart() {
        let groups = open_distinct(&["bundled:austen", "bundled:pride", "bundled:pride"], &NoArchive).unwrap();
        assert_eq!(labels(&groups), vec![
            "Pride & Prejudice".to_string(),
            "bundled:pride".to_string(),
            "bundled:pride #3".to_string(),
        ]);
        let distinct = open_distinct(&["bundled:austen", "bundled:wells"], &NoArchive).unwrap();
        assert_eq!(labels(&distinct), vec!["Pride & Prejudice".to_string(), "The Time Machine".to_string()]);
        assert!(open_distinct(&["bundled:austen", "gutenberg:2"], &NoArchive).is_err());
    }

    #[test]
    fn missing_files_are_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        match read_text(dir.path().join("nope.txt"), None) {
            Err(Error::IOError(_)) => {}
            other => panic!("expected an io error, got {:?}", other),
        }
    }
}
