//! University town list parsing.
//!
//! The list interleaves state headings, marked with `[edit]`, with the towns
//! of that state:
//!
//! ```text
//! Alabama[edit]
//! Auburn (Auburn University)[1]
//! Florence (University of North Alabama)
//! ```

use recession_core::{Result, UniversityTownSet};
use std::path::Path;
use tracing::{info, warn};

const STATE_MARKER: &str = "[edit]";

/// Parse a university town list into (state, region) pairs.
pub fn parse_university_towns(text: &str) -> UniversityTownSet {
    let mut towns = UniversityTownSet::new();
    let mut current_state: Option<&str> = None;
    let mut orphans = 0usize;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.contains(STATE_MARKER) {
            current_state = Some(clean_state(line));
            continue;
        }

        match current_state {
            Some(state) => {
                towns.insert(state, clean_region(line));
            }
            None => orphans += 1,
        }
    }

    if orphans > 0 {
        warn!(lines = orphans, "Skipped towns listed before any state heading");
    }
    info!(towns = towns.len(), "Parsed university towns");
    towns
}

/// Read and parse a university town list file.
pub fn read_university_towns_file(path: impl AsRef<Path>) -> Result<UniversityTownSet> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_university_towns(&text))
}

/// State name: everything before the first `[`.
fn clean_state(line: &str) -> &str {
    cut_at(line, '[').trim()
}

/// Region name: everything before the first `[` or `(`.
fn clean_region(line: &str) -> &str {
    cut_at(cut_at(line, '['), '(').trim_end()
}

fn cut_at(s: &str, delim: char) -> &str {
    s.split(delim).next().unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Alabama[edit]
Auburn (Auburn University)[1]
Florence (University of North Alabama)
Jacksonville (Jacksonville State University)[2]
Alaska[edit]
Fairbanks (University of Alaska Fairbanks)[2]

Michigan[edit]
Ann Arbor (University of Michigan)[1]
East Lansing[3]
Auburn (Auburn University)[1]
";

    #[test]
    fn test_parse_university_towns() {
        let towns = parse_university_towns(SAMPLE);

        assert_eq!(towns.len(), 7);
        assert!(towns.contains("Alabama", "Auburn"));
        assert!(towns.contains("Alabama", "Jacksonville"));
        assert!(towns.contains("Alaska", "Fairbanks"));
        assert!(towns.contains("Michigan", "East Lansing"));
        assert!(towns.contains("Michigan", "Auburn"));
        assert!(!towns.contains("Alaska", "Auburn"));
    }

    #[test]
    fn test_orphan_towns_skipped() {
        let towns = parse_university_towns("Nowhere (No University)\nOhio[edit]\nAthens\n");
        assert_eq!(towns.len(), 1);
        assert!(towns.contains("Ohio", "Athens"));
    }

    #[test]
    fn test_duplicate_towns_collapse() {
        let towns = parse_university_towns("Ohio[edit]\nAthens (Ohio University)\nAthens[4]\n");
        assert_eq!(towns.len(), 1);
    }

    #[test]
    fn test_clean_region() {
        assert_eq!(clean_region("Ann Arbor (University of Michigan)[1]"), "Ann Arbor");
        assert_eq!(clean_region("East Lansing[3]"), "East Lansing");
        assert_eq!(clean_region("Athens"), "Athens");
    }
}
