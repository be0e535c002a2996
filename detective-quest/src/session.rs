use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use tracing::{info, warn};

use crate::clue_ledger::ClueLedger;
use crate::events::{Event, EventSink};
use crate::evidence::{
    CharSum, ClueHasher, DEFAULT_BUCKETS, Djb2, EvidenceTable, SuspectTally, top_suspect,
};
use crate::explorer::{ExplorationOutcome, explore};
use crate::input::{AccusationSource, CommandSource};
use crate::mansion::Scenario;
use crate::verdict::{Accusation, Verdict, VerdictRules, evaluate, tally_collected};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HashStrategy {
    Djb2,
    CharSum,
}

impl HashStrategy {
    pub fn hasher(self) -> Box<dyn ClueHasher> {
        match self {
            HashStrategy::Djb2 => Box::new(Djb2),
            HashStrategy::CharSum => Box::new(CharSum),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    pub scenario: Scenario,
    pub hash: HashStrategy,
    pub buckets: usize,
    pub rules: VerdictRules,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            scenario: Scenario::Master,
            hash: HashStrategy::Djb2,
            buckets: DEFAULT_BUCKETS,
            rules: VerdictRules::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub scenario: Scenario,
    pub exploration: ExplorationOutcome,
    pub clues: Vec<String>,
    pub tally: Vec<SuspectTally>,
    pub prime_suspect: Option<SuspectTally>,
    pub verdict: Option<Verdict>,
}

/// Plays one game from the entrance hall to the farewell line.
pub fn run_session<I>(
    config: &SessionConfig,
    input: &mut I,
    sink: &mut impl EventSink,
) -> Result<SessionReport>
where
    I: CommandSource + AccusationSource,
{
    let scenario = config.scenario;
    info!(?scenario, buckets = config.buckets, hash = ?config.hash, "starting session");

    let map = scenario.build();
    let evidence = EvidenceTable::with_facts(
        config.buckets,
        config.hash.hasher(),
        scenario.evidence().iter().copied(),
    )
    .context("Failed to build the evidence table")?;

    sink.emit(Event::Title(scenario.title().to_string()))?;

    let mut ledger = ClueLedger::new();
    let exploration = explore(&map, &mut ledger, input, sink)?;
    info!(
        reason = ?exploration.reason,
        room = %exploration.final_room,
        clues = ledger.len(),
        "exploration over"
    );

    let clues: Vec<String> = ledger.in_order().map(str::to_string).collect();
    sink.emit(Event::CluesListed { clues: clues.clone() })?;

    let tally = tally_collected(&ledger, &evidence);
    let mut prime_suspect = top_suspect(tally.clone());

    if scenario.shows_evidence() {
        let found = found_evidence(&ledger, &evidence, config)?;
        sink.emit(Event::EvidenceListed {
            entries: found.entries().cloned().collect(),
        })?;
        prime_suspect = found.most_cited();
        sink.emit(Event::PrimeSuspect {
            tally: prime_suspect.clone(),
        })?;
    }

    let verdict = if scenario.takes_accusation() {
        accuse(&ledger, &evidence, config.rules, input, sink)?
    } else {
        None
    };

    sink.emit(Event::Farewell)?;

    Ok(SessionReport {
        scenario,
        exploration,
        clues,
        tally,
        prime_suspect,
        verdict,
    })
}

/// The part of the evidence the player actually uncovered.
fn found_evidence(
    ledger: &ClueLedger,
    evidence: &EvidenceTable,
    config: &SessionConfig,
) -> Result<EvidenceTable> {
    let mut found = EvidenceTable::new(config.buckets, config.hash.hasher())?;
    for clue in ledger {
        if let Some(suspect) = evidence.lookup(clue) {
            found.upsert(clue, suspect);
        }
    }
    Ok(found)
}

fn accuse(
    ledger: &ClueLedger,
    evidence: &EvidenceTable,
    rules: VerdictRules,
    input: &mut impl AccusationSource,
    sink: &mut impl EventSink,
) -> Result<Option<Verdict>> {
    sink.emit(Event::AccusationPrompt)?;

    let Some(line) = input.read_accusation()? else {
        warn!("input closed before an accusation was made");
        return Ok(None);
    };

    match Accusation::parse(&line) {
        Ok(accusation) => {
            let verdict = evaluate(ledger, evidence, &accusation, rules);
            info!(accused = accusation.name(), upheld = verdict.is_upheld(), "verdict reached");
            sink.emit(Event::VerdictReached {
                verdict: verdict.clone(),
            })?;
            Ok(Some(verdict))
        }
        Err(e) => {
            warn!("accusation rejected: {}", e);
            sink.emit(Event::AccusationRejected)?;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::ConsoleRenderer;
    use crate::explorer::EndReason;
    use crate::input::ScriptedInput;

    fn play(config: SessionConfig, input: &mut ScriptedInput) -> (SessionReport, Vec<Event>) {
        let mut events = Vec::new();
        let report = run_session(&config, input, &mut events).unwrap();
        (report, events)
    }

    fn master() -> SessionConfig {
        SessionConfig::default()
    }

    #[test]
    fn master_game_upholds_accusation() {
        let mut input = ScriptedInput::new(["d", "d"]).with_accusation("sr. verde");
        let (report, events) = play(master(), &mut input);

        assert_eq!(report.exploration.reason, EndReason::DeadEnd);
        assert_eq!(report.exploration.final_room, "Jardim");
        assert_eq!(
            report.clues,
            vec![
                "Faca sumida do faqueiro",
                "Pegadas molhadas na entrada",
                "Terra revirada perto do portão",
            ]
        );
        assert_eq!(
            report.verdict,
            Some(Verdict::Upheld {
                accused: "sr. verde".into(),
                matching_clues: 2
            })
        );
        assert_eq!(report.prime_suspect.unwrap().suspect, "Sr. Verde");
        assert_eq!(events.first(), Some(&Event::Title(Scenario::Master.title().into())));
        assert_eq!(events.last(), Some(&Event::Farewell));
    }

    #[test]
    fn verdict_does_not_depend_on_hash_strategy() {
        for hash in [HashStrategy::Djb2, HashStrategy::CharSum] {
            for buckets in [1, 3, 10] {
                let config = SessionConfig { hash, buckets, ..master() };
                let mut input = ScriptedInput::new(["e", "d", "e"]).with_accusation("Sra. Rosa");
                let (report, _) = play(config, &mut input);
                assert_eq!(
                    report.verdict,
                    Some(Verdict::Upheld {
                        accused: "Sra. Rosa".into(),
                        matching_clues: 2
                    })
                );
            }
        }
    }

    #[test]
    fn quitting_at_once_leaves_one_clue_and_insufficient_evidence() {
        let mut input = ScriptedInput::new(["s"]).with_accusation("Sr. Verde");
        let (report, _) = play(master(), &mut input);
        assert_eq!(report.exploration.reason, EndReason::PlayerQuit);
        assert_eq!(report.clues, vec!["Pegadas molhadas na entrada"]);
        assert_eq!(
            report.verdict,
            Some(Verdict::Insufficient {
                accused: "Sr. Verde".into(),
                matching_clues: 1
            })
        );
    }

    #[test]
    fn empty_accusation_is_rejected_without_verdict() {
        let mut input = ScriptedInput::new(["d", "d"]).with_accusation("   ");
        let (report, events) = play(master(), &mut input);
        assert_eq!(report.verdict, None);
        assert!(events.contains(&Event::AccusationRejected));
        assert!(!events.iter().any(|e| matches!(e, Event::VerdictReached { .. })));
    }

    #[test]
    fn no_clues_means_no_accusation_possible() {
        let ledger = ClueLedger::new();
        let evidence = EvidenceTable::new(4, Box::new(Djb2)).unwrap();
        let mut input = ScriptedInput::default().with_accusation("Sr. Verde");
        let mut renderer = ConsoleRenderer::new(Vec::new());
        let rules = VerdictRules::default();
        let verdict = accuse(&ledger, &evidence, rules, &mut input, &mut renderer).unwrap();
        assert_eq!(verdict, Some(Verdict::NoEvidence));

        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(text.contains("Quem você acusa?"));
        assert!(text.contains("Impossível acusar: nenhuma pista foi coletada."));
    }

    #[test]
    fn advanced_game_reports_found_evidence() {
        let config = SessionConfig {
            scenario: Scenario::Advanced,
            ..master()
        };
        let mut input = ScriptedInput::new(["e", "e"]);
        let (report, events) = play(config, &mut input);

        assert_eq!(report.clues, vec!["Bilhete rasgado", "Luvas sujas"]);
        assert_eq!(report.verdict, None);
        // One clue each: the tie goes to the alphabetically first suspect.
        assert_eq!(
            report.prime_suspect,
            Some(SuspectTally {
                suspect: "Jardineiro".into(),
                count: 1
            })
        );

        let listed = events.iter().find_map(|e| match e {
            Event::EvidenceListed { entries } => Some(entries.len()),
            _ => None,
        });
        assert_eq!(listed, Some(2));
        assert!(!events.contains(&Event::AccusationPrompt));
    }

    #[test]
    fn novice_game_only_explores() {
        let config = SessionConfig {
            scenario: Scenario::Novice,
            ..master()
        };
        let mut input = ScriptedInput::new(["x", "d", "d"]);
        let (report, events) = play(config, &mut input);
        assert_eq!(report.exploration.final_room, "Escritório");
        assert_eq!(report.exploration.invalid_commands, 1);
        assert!(report.tally.is_empty());
        assert!(!events.iter().any(|e| matches!(e, Event::EvidenceListed { .. })));
    }

    #[test]
    fn console_transcript_reads_like_the_game() {
        let mut input = ScriptedInput::new(["d", "d"]).with_accusation("Coronel Mostarda");
        let mut renderer = ConsoleRenderer::new(Vec::new());
        run_session(&master(), &mut input, &mut renderer).unwrap();
        let text = String::from_utf8(renderer.into_inner()).unwrap();

        assert!(text.starts_with("===== Detective Quest: O Julgamento Final ====="));
        assert!(text.contains("Você entrou em: Cozinha"));
        assert!(text.contains("Você encontrou uma pista: Faca sumida do faqueiro"));
        assert!(text.contains("Não há mais caminhos. Fim da exploração!"));
        assert!(
            text.contains("Evidências insuficientes contra Coronel Mostarda: apenas 1 pista(s).")
        );
        assert!(text.ends_with("Obrigado por jogar!\n"));
    }

    #[test]
    fn report_serializes_to_json() {
        let mut input = ScriptedInput::new(["d", "d"]).with_accusation("Sr. Verde");
        let (report, _) = play(master(), &mut input);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["scenario"], "master");
        assert_eq!(json["exploration"]["reason"], "dead_end");
        assert_eq!(json["verdict"]["outcome"], "upheld");
        assert_eq!(json["verdict"]["matching_clues"], 2);
    }
}
