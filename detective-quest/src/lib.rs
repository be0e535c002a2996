pub mod clue_ledger;
pub mod events;
pub mod evidence;
pub mod explorer;
pub mod input;
pub mod mansion;
pub mod room_map;
pub mod session;
pub mod verdict;

pub use clue_ledger::ClueLedger;
pub use evidence::{EvidenceLookup, EvidenceTable};
pub use explorer::{EndReason, ExplorationOutcome, explore};
pub use mansion::Scenario;
pub use room_map::{Direction, Room};
pub use session::{HashStrategy, SessionConfig, SessionReport, run_session};
pub use verdict::{Accusation, Verdict, VerdictRules, evaluate};
