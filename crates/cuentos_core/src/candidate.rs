//! Candidate lists produced from newline-delimited generation output.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Which selection stage a list belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum CandidateKind {
    /// Villain selection
    #[strum(serialize = "villain")]
    Villain,
    /// Hero selection
    #[strum(serialize = "hero")]
    Hero,
}

impl CandidateKind {
    /// Heading shown above the rendered list.
    pub fn heading(self) -> &'static str {
        match self {
            CandidateKind::Villain => "Choose the villain:",
            CandidateKind::Hero => "Choose the hero:",
        }
    }
}

/// Whether blank lines survive parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateFilter {
    /// Every line is a candidate, blank ones included
    #[default]
    KeepAll,
    /// Lines that are empty or whitespace-only are dropped
    DropBlank,
}

/// Split a generated blob into candidate strings, one per line.
///
/// Nothing is trimmed, deduplicated or filtered: a trailing newline yields a
/// trailing empty candidate.
///
/// ```
/// use cuentos_core::parse_candidates;
///
/// assert_eq!(parse_candidates("A\nB\n"), vec!["A", "B", ""]);
/// ```
pub fn parse_candidates(raw: &str) -> Vec<String> {
    raw.split('\n').map(str::to_string).collect()
}

/// One selectable option, identified by its position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct Candidate {
    /// Position in the rendered list
    index: usize,
    /// Candidate text exactly as generated
    text: String,
}

/// A freshly rendered list of candidates.
///
/// `cycle` identifies the render; a pick stamped with an older cycle refers
/// to a list that has since been replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct CandidateList {
    /// Selection stage the list belongs to
    kind: CandidateKind,
    /// Render cycle number
    cycle: u64,
    /// Candidates in generated order
    items: Vec<Candidate>,
}

impl CandidateList {
    /// Parse `raw` into a list for the given stage and render cycle.
    pub fn parse(kind: CandidateKind, cycle: u64, raw: &str, filter: CandidateFilter) -> Self {
        let items = parse_candidates(raw)
            .into_iter()
            .filter(|line| filter == CandidateFilter::KeepAll || !line.trim().is_empty())
            .enumerate()
            .map(|(index, text)| Candidate { index, text })
            .collect();
        Self { kind, cycle, items }
    }

    /// Candidate at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.items.get(index)
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when there is nothing to pick.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Candidate texts in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|c| c.text.as_str())
    }
}
