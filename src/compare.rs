//! Comparing corpora by the share of their tokens each word makes up
//!
//! Counts are normalized per group, then joined on token. A token a group never used has no
//! proportion in that group: `None`, which is not the same as zero and is never turned into zero.
//! Metrics built on the comparison skip such tokens.
use std::io::{self, Write};

use count::FrequencyTable;
use farm::{FarmMap, new_farm};

/// Share of one group's tokens taken up by one token
#[derive(Debug, Clone, PartialEq)]
pub struct ProportionRow {
    pub token: String,
    pub proportion: f64,
    pub group_label: String,
}

/// Normalize counts by the table's total. An empty table has no proportions.
///
/// The table must hold a single group; split grouped tables with `FrequencyTable::for_group`
/// first, as `pipeline::compare_sources` does.
pub fn proportions(table: &FrequencyTable, label: &str) -> Vec<ProportionRow> {
    debug_assert!(table.groups().len() <= 1,
                  "proportions of {:?} mix {} groups", label, table.groups().len());
    let total = table.total() as f64;
    table.rows().iter()
        .map(|row| ProportionRow {
            token: row.token.clone(),
            proportion: row.count as f64 / total,
            group_label: label.to_string(),
        })
        .collect()
}

/// One token across every compared group
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub token: String,
    /// One entry per label, in the order of `ComparisonTable::labels`
    pub proportions: Vec<Option<f64>>,
}

impl ComparisonRow {
    /// |a - b|, or None if either group lacks the token
    pub fn abs_difference(&self, a: usize, b: usize) -> Option<f64> {
        match (self.proportions.get(a).cloned().and_then(|p| p),
               self.proportions.get(b).cloned().and_then(|p| p)) {
            (Some(pa), Some(pb)) => Some((pa - pb).abs()),
            _ => None,
        }
    }
}

/// A reference group against one other group, one row per token
#[derive(Debug, Clone, PartialEq)]
pub struct PairedRow {
    pub token: String,
    pub proportion_a: Option<f64>,
    pub proportion_b: Option<f64>,
    /// Label of the group `proportion_b` belongs to
    pub group_label: String,
}

/// Pearson correlation between two groups' proportions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correlation {
    pub r: f64,
    /// How many tokens both groups share, i.e. the sample size
    pub n: usize,
}

/// Proportions of every group, outer-joined on token
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComparisonTable {
    labels: Vec<String>,
    rows: Vec<ComparisonRow>,
}

/// Join the groups' proportions. Tokens are ordered by first appearance, scanning the groups in
/// the order given. Every table must hold a single group (see `proportions`).
pub fn compare(groups: &[(&str, &FrequencyTable)]) -> ComparisonTable {
    let width = groups.len();
    let mut positions: FarmMap<String, usize> = new_farm();
    let mut rows: Vec<ComparisonRow> = vec![];
    for (column, &(label, table)) in groups.iter().enumerate() {
        for prop in proportions(table, label) {
            let at = match positions.get(&prop.token) {
                Some(&at) => at,
                None => {
                    positions.insert(prop.token.clone(), rows.len());
                    rows.push(ComparisonRow { token: prop.token, proportions: vec![None; width] });
                    rows.len() - 1
                }
            };
            rows[at].proportions[column] = Some(prop.proportion);
        }
    }
    info!("Compared {} groups over {} tokens", width, rows.len());
    ComparisonTable {
        labels: groups.iter().map(|&(label, _)| label.to_string()).collect(),
        rows: rows,
    }
}

impl ComparisonTable {
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn rows(&self) -> &[ComparisonRow] {
        &self.rows
    }

    pub fn column(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    pub fn get(&self, token: &str) -> Option<&ComparisonRow> {
        self.rows.iter().find(|r| r.token == token)
    }

    /// Long form: the reference group beside each other group in turn. Rows where neither side
    /// has the token are left out.
    pub fn against(&self, reference: &str) -> Option<Vec<PairedRow>> {
        let a = self.column(reference)?;
        let mut paired = vec![];
        for (b, label) in self.labels.iter().enumerate().filter(|&(b, _)| b != a) {
            for row in &self.rows {
                let (pa, pb) = (row.proportions[a], row.proportions[b]);
                if pa.is_none() && pb.is_none() {
                    continue;
                }
                paired.push(PairedRow {
                    token: row.token.clone(),
                    proportion_a: pa,
                    proportion_b: pb,
                    group_label: label.clone(),
                });
            }
        }
        Some(paired)
    }

    /// Pearson's r over the tokens both groups have. None if a label is unknown, fewer than two
    /// tokens are shared, or either side has no variance.
    pub fn correlation(&self, a: &str, b: &str) -> Option<Correlation> {
        let (a, b) = (self.column(a)?, self.column(b)?);
        let pairs: Vec<(f64, f64)> = self.rows.iter()
            .filter_map(|row| match (row.proportions[a], row.proportions[b]) {
                (Some(x), Some(y)) => Some((x, y)),
                _ => None,
            })
            .collect();
        let n = pairs.len();
        if n < 2 {
            return None;
        }
        let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n as f64;
        let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n as f64;
        let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
        for &(x, y) in &pairs {
            cov += (x - mean_x) * (y - mean_y);
            var_x += (x - mean_x) * (x - mean_x);
            var_y += (y - mean_y) * (y - mean_y);
        }
        if var_x == 0.0 || var_y == 0.0 {
            return None;
        }
        Some(Correlation { r: cov / (var_x * var_y).sqrt(), n: n })
    }
}

/// Tab separated long form; missing proportions are written as `NA`
pub fn write_paired_tsv<W: Write>(rows: &[PairedRow], mut out: W) -> io::Result<()> {
    fn cell(p: Option<f64>) -> String {
        p.map(|p| p.to_string()).unwrap_or_else(|| "NA".to_string())
    }
    writeln!(out, "token\tproportion_a\tproportion_b\tgroup")?;
    for row in rows {
        writeln!(out, "{}\t{}\t{}\t{}",
                 row.token, cell(row.proportion_a), cell(row.proportion_b), row.group_label)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use count::{count, Grouping};
    use document::{Document, SourceId};
    use tokenize::{Tokenizer, Unit};

    fn table(text: &str) -> FrequencyTable {
        let docs = vec![Document::anonymous(text)];
        count(Tokenizer::new(Unit::Word).tokenize(&docs), Grouping::Overall)
    }

    #[test]
    fn proportions_sum_to_one() {
        let props = proportions(&table("a a b c"), "x");
        assert_eq!(props[0], ProportionRow { token: "a".into(), proportion: 0.5, group_label: "x".into() });
        let sum: f64 = props.iter().map(|p| p.proportion).sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn missing_is_not_zero() {
        let austen = table("miss miss lady");
        let wells = table("time miss");
        let both = compare(&[("austen", &austen), ("wells", &wells)]);
        assert_eq!(both.labels(), &["austen".to_string(), "wells".to_string()]);
        let miss = both.get("miss").unwrap();
        assert!(miss.proportions.iter().all(Option::is_some));
        let lady = both.get("lady").unwrap();
        assert_eq!(lady.proportions, vec![Some(1.0 / 3.0), None]);
        assert_eq!(lady.abs_difference(0, 1), None);
        assert_eq!(both.get("time").unwrap().proportions, vec![None, Some(0.5)]);
        let diff = miss.abs_difference(0, 1).unwrap();
        assert!((diff - (2.0 / 3.0 - 0.5)).abs() < 1e-12);
    }

    #[test]
    fn paired_rows_against_reference() {
        let a = table("x y");
        let b = table("y z");
        let c = table("x");
        let paired = compare(&[("a", &a), ("b", &b), ("c", &c)]).against("a").unwrap();
        let for_b: Vec<&PairedRow> = paired.iter().filter(|r| r.group_label == "b").collect();
        assert_eq!(for_b.len(), 3);
        assert_eq!(for_b[0].token, "x");
        assert_eq!(for_b[0].proportion_b, None);
        // neither a nor c has "z"
        let for_c: Vec<&str> = paired.iter()
            .filter(|r| r.group_label == "c")
            .map(|r| r.token.as_str())
            .collect();
        assert_eq!(for_c, vec!["x", "y"]);
        assert!(compare(&[("a", &a)]).against("nobody").is_none());
    }

    #[test]
    fn identical_distributions_correlate_perfectly() {
        let a = table("p p p q q r");
        let b = table("p p p q q r r r r");
        let both = compare(&[("a", &a), ("a2", &a), ("b", &b)]);
        let same = both.correlation("a", "a2").unwrap();
        assert!((same.r - 1.0).abs() < 1e-9);
        assert_eq!(same.n, 3);
        let other = both.correlation("a", "b").unwrap();
        assert!(other.r < 1.0);
        assert!(both.correlation("a", "zzz").is_none());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "mix 2 groups")]
    fn grouped_tables_must_be_split_first() {
        let docs = vec![
            Document::new(Some("a".into()), "whale sea"),
            Document::new(Some("b".into()), "whale"),
        ];
        let grouped = count(Tokenizer::new(Unit::Word).tokenize(&docs), Grouping::BySource);
        proportions(&grouped, "both");
    }

    #[test]
    fn split_groups_normalize_apart() {
        let docs = vec![
            Document::new(Some("a".into()), "whale sea"),
            Document::new(Some("b".into()), "whale"),
        ];
        let grouped = count(Tokenizer::new(Unit::Word).tokenize(&docs), Grouping::BySource);
        let a = grouped.for_group(Some(&SourceId::from("a")));
        let b = grouped.for_group(Some(&SourceId::from("b")));
        let both = compare(&[("a", &a), ("b", &b)]);
        assert_eq!(both.get("whale").unwrap().proportions, vec![Some(0.5), Some(1.0)]);
    }

    #[test]
    fn too_little_overlap_has_no_correlation() {
        let a = table("p q");
        let b = table("q r");
        assert!(compare(&[("a", &a), ("b", &b)]).correlation("a", "b").is_none());
    }

    #[test]
    fn tsv_marks_missing_values() {
        let rows = vec![PairedRow {
            token: "lady".into(),
            proportion_a: Some(0.25),
            proportion_b: None,
            group_label: "wells".into(),
        }];
        let mut out = vec![];
        write_paired_tsv(&rows, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(),
                   "token\tproportion_a\tproportion_b\tgroup\nlady\t0.25\tNA\twells\n");
    }
}
