use anyhow::{Context, Result};
use std::io::Write;

use crate::evidence::{EvidenceEntry, SuspectTally};
use crate::explorer::EndReason;
use crate::verdict::Verdict;

/// Everything a session shows the player, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Title(String),
    EnteredRoom { room: String },
    ClueFound { clue: String, first_time: bool },
    PathsOffered { left: bool, right: bool },
    InvalidCommand { input: String },
    ExplorationEnded { reason: EndReason },
    CluesListed { clues: Vec<String> },
    EvidenceListed { entries: Vec<EvidenceEntry> },
    PrimeSuspect { tally: Option<SuspectTally> },
    AccusationPrompt,
    AccusationRejected,
    VerdictReached { verdict: Verdict },
    Farewell,
}

pub trait EventSink {
    fn emit(&mut self, event: Event) -> Result<()>;
}

impl EventSink for Vec<Event> {
    fn emit(&mut self, event: Event) -> Result<()> {
        self.push(event);
        Ok(())
    }
}

/// Writes events as the Portuguese console text of the game.
pub struct ConsoleRenderer<W> {
    out: W,
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&mut self, event: &Event) -> std::io::Result<()> {
        let out = &mut self.out;
        match event {
            Event::Title(title) => writeln!(out, "===== {title} =====")?,
            Event::EnteredRoom { room } => writeln!(out, "\nVocê entrou em: {room}")?,
            Event::ClueFound { clue, first_time: true } => {
                writeln!(out, "Você encontrou uma pista: {clue}")?
            }
            Event::ClueFound { clue, first_time: false } => {
                writeln!(out, "Pista já anotada: {clue}")?
            }
            Event::PathsOffered { left, right } => {
                writeln!(out, "Escolha um caminho:")?;
                if *left {
                    writeln!(out, "  (e) Ir para a esquerda")?;
                }
                if *right {
                    writeln!(out, "  (d) Ir para a direita")?;
                }
                write!(out, "  (s) Sair do jogo\n> ")?;
            }
            Event::InvalidCommand { input } if input.is_empty() => {
                writeln!(out, "\nCaminho inválido! Tente novamente.")?
            }
            Event::InvalidCommand { input } => {
                writeln!(out, "\nCaminho inválido ({input})! Tente novamente.")?
            }
            Event::ExplorationEnded { reason: EndReason::DeadEnd } => {
                writeln!(out, "Não há mais caminhos. Fim da exploração!")?
            }
            Event::ExplorationEnded { reason: EndReason::PlayerQuit } => {
                writeln!(out, "\nEncerrando exploração...")?
            }
            Event::CluesListed { clues } => {
                writeln!(out, "\n===== Pistas coletadas =====")?;
                if clues.is_empty() {
                    writeln!(out, "Nenhuma pista coletada.")?;
                }
                for clue in clues {
                    writeln!(out, "- {clue}")?;
                }
            }
            Event::EvidenceListed { entries } => {
                writeln!(out, "\n===== Associações Encontradas =====")?;
                for entry in entries {
                    writeln!(out, "Pista: {:<20} → Suspeito: {}", entry.clue, entry.suspect)?;
                }
            }
            Event::PrimeSuspect { tally: Some(top) } => {
                writeln!(out, "\nPrincipal suspeito: {} ({} pista(s))", top.suspect, top.count)?
            }
            Event::PrimeSuspect { tally: None } => {
                writeln!(out, "\nNenhum suspeito identificado.")?
            }
            Event::AccusationPrompt => write!(out, "\nQuem você acusa? > ")?,
            Event::AccusationRejected => {
                writeln!(out, "Nenhum nome informado. Acusação cancelada.")?
            }
            Event::VerdictReached { verdict } => match verdict {
                Verdict::Upheld { accused, matching_clues } => writeln!(
                    out,
                    "\nAcusação confirmada! {matching_clues} pistas apontam para {accused}. Caso encerrado."
                )?,
                Verdict::Insufficient { accused, matching_clues } => writeln!(
                    out,
                    "\nEvidências insuficientes contra {accused}: apenas {matching_clues} pista(s)."
                )?,
                Verdict::NoEvidence => {
                    writeln!(out, "\nImpossível acusar: nenhuma pista foi coletada.")?
                }
            },
            Event::Farewell => writeln!(out, "\nObrigado por jogar!")?,
        }
        out.flush()
    }
}

impl<W: Write> EventSink for ConsoleRenderer<W> {
    fn emit(&mut self, event: Event) -> Result<()> {
        self.render(&event).context("Failed to write to the console")
    }
}
