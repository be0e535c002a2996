use crate::clue_ledger::ClueLedger;
use crate::evidence::{EvidenceLookup, SuspectTally};
use serde::Serialize;
use tracing::debug;

pub const DEFAULT_THRESHOLD: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerdictRules {
    /// Matching clues needed to uphold an accusation.
    pub threshold: usize,
}

impl Default for VerdictRules {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AccusationError {
    #[error("no name given")]
    Empty,
}

/// A non-empty suspect name typed by the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accusation(String);

impl Accusation {
    pub fn parse(line: &str) -> Result<Self, AccusationError> {
        let name = line.trim();
        if name.is_empty() {
            return Err(AccusationError::Empty);
        }
        Ok(Self(name.to_string()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// ASCII case-insensitive comparison; other characters must match exactly.
    pub fn names(&self, suspect: &str) -> bool {
        self.0.eq_ignore_ascii_case(suspect)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Verdict {
    /// Enough collected clues point at the accused.
    Upheld { accused: String, matching_clues: usize },
    Insufficient { accused: String, matching_clues: usize },
    /// No clue was collected, so nobody can be accused.
    NoEvidence,
}

impl Verdict {
    pub fn is_upheld(&self) -> bool {
        matches!(self, Verdict::Upheld { .. })
    }
}

pub fn evaluate(
    ledger: &ClueLedger,
    evidence: &impl EvidenceLookup,
    accusation: &Accusation,
    rules: VerdictRules,
) -> Verdict {
    if ledger.is_empty() {
        return Verdict::NoEvidence;
    }

    let matching_clues = ledger
        .in_order()
        .filter(|clue| match evidence.suspect_for(clue) {
            Some(suspect) => accusation.names(suspect),
            None => {
                debug!(clue, "no suspect on record");
                false
            }
        })
        .count();

    let accused = accusation.name().to_string();
    debug!(%accused, matching_clues, threshold = rules.threshold, "evaluated accusation");
    if matching_clues >= rules.threshold {
        Verdict::Upheld { accused, matching_clues }
    } else {
        Verdict::Insufficient { accused, matching_clues }
    }
}

/// Per-suspect count over the collected clues only, ordered by count
/// (descending) then name.
pub fn tally_collected(ledger: &ClueLedger, evidence: &impl EvidenceLookup) -> Vec<SuspectTally> {
    let mut tally: Vec<SuspectTally> = Vec::new();
    for suspect in ledger.in_order().filter_map(|clue| evidence.suspect_for(clue)) {
        match tally.iter_mut().find(|t| t.suspect == suspect) {
            Some(t) => t.count += 1,
            None => tally.push(SuspectTally {
                suspect: suspect.to_string(),
                count: 1,
            }),
        }
    }
    tally.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.suspect.cmp(&b.suspect)));
    tally
}
