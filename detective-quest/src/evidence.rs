use serde::Serialize;
use std::fmt;
use tracing::debug;

pub const DEFAULT_BUCKETS: usize = 10;

/// Maps a clue onto one of `buckets` chains. Implementations must be
/// deterministic; placement is otherwise free.
pub trait ClueHasher: fmt::Debug {
    fn bucket(&self, clue: &str, buckets: usize) -> usize;
}

/// Rolling `h * 33 + byte` hash starting from 5381.
#[derive(Debug, Clone, Copy, Default)]
pub struct Djb2;

impl ClueHasher for Djb2 {
    fn bucket(&self, clue: &str, buckets: usize) -> usize {
        let hash = clue
            .bytes()
            .fold(5381u64, |h, b| h.wrapping_mul(33).wrapping_add(u64::from(b)));
        (hash % buckets as u64) as usize
    }
}

/// Plain sum of the clue's bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharSum;

impl ClueHasher for CharSum {
    fn bucket(&self, clue: &str, buckets: usize) -> usize {
        let sum: u64 = clue.bytes().map(u64::from).sum();
        (sum % buckets as u64) as usize
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EvidenceError {
    #[error("evidence table needs at least one bucket")]
    NoBuckets,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvidenceEntry {
    pub clue: String,
    pub suspect: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuspectTally {
    pub suspect: String,
    pub count: usize,
}

/// Read side of the evidence, as the verdict needs it.
pub trait EvidenceLookup {
    fn suspect_for(&self, clue: &str) -> Option<&str>;
}

/// Separate-chaining hash table from clue text to suspect name.
/// Clue keys are compared exactly (case-sensitive).
#[derive(Debug)]
pub struct EvidenceTable {
    buckets: Vec<Vec<EvidenceEntry>>,
    hasher: Box<dyn ClueHasher>,
    len: usize,
}

impl EvidenceTable {
    pub fn new(bucket_count: usize, hasher: Box<dyn ClueHasher>) -> Result<Self, EvidenceError> {
        if bucket_count == 0 {
            return Err(EvidenceError::NoBuckets);
        }
        Ok(Self {
            buckets: vec![Vec::new(); bucket_count],
            hasher,
            len: 0,
        })
    }

    pub fn with_facts<'a>(
        bucket_count: usize,
        hasher: Box<dyn ClueHasher>,
        facts: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, EvidenceError> {
        let mut table = Self::new(bucket_count, hasher)?;
        for (clue, suspect) in facts {
            table.upsert(clue, suspect);
        }
        Ok(table)
    }

    fn index_of(&self, clue: &str) -> usize {
        // Reduce again in case a hasher ignores the bound it was given.
        self.hasher.bucket(clue, self.buckets.len()) % self.buckets.len()
    }

    pub fn upsert(&mut self, clue: impl Into<String>, suspect: impl Into<String>) {
        let clue = clue.into();
        let suspect = suspect.into();
        let index = self.index_of(&clue);
        let chain = &mut self.buckets[index];

        if let Some(entry) = chain.iter_mut().find(|e| e.clue == clue) {
            debug!(%clue, from = %entry.suspect, to = %suspect, "overwriting evidence");
            entry.suspect = suspect;
            return;
        }

        debug!(%clue, %suspect, bucket = index, "recording evidence");
        chain.push(EvidenceEntry { clue, suspect });
        self.len += 1;
    }

    pub fn lookup(&self, clue: &str) -> Option<&str> {
        self.buckets[self.index_of(clue)]
            .iter()
            .find(|e| e.clue == clue)
            .map(|e| e.suspect.as_str())
    }

    /// Entries in bucket order, each chain in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &EvidenceEntry> {
        self.buckets.iter().flatten()
    }

    /// Number of entries naming each suspect, in the order suspects are first
    /// met while scanning the buckets.
    pub fn tally_by_suspect(&self) -> Vec<SuspectTally> {
        let mut tally: Vec<SuspectTally> = Vec::new();
        for entry in self.entries() {
            match tally.iter_mut().find(|t| t.suspect == entry.suspect) {
                Some(t) => t.count += 1,
                None => tally.push(SuspectTally {
                    suspect: entry.suspect.clone(),
                    count: 1,
                }),
            }
        }
        tally
    }

    /// The suspect named by the most entries. Equal counts go to the
    /// alphabetically first name, so bucket placement never decides.
    pub fn most_cited(&self) -> Option<SuspectTally> {
        top_suspect(self.tally_by_suspect())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}

impl EvidenceLookup for EvidenceTable {
    fn suspect_for(&self, clue: &str) -> Option<&str> {
        self.lookup(clue)
    }
}

pub(crate) fn top_suspect(tally: Vec<SuspectTally>) -> Option<SuspectTally> {
    tally
        .into_iter()
        .max_by(|a, b| a.count.cmp(&b.count).then_with(|| b.suspect.cmp(&a.suspect)))
}
