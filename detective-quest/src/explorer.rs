use anyhow::Result;
use serde::Serialize;
use tracing::{debug, warn};

use crate::clue_ledger::ClueLedger;
use crate::events::{Event, EventSink};
use crate::input::{Command, CommandSource};
use crate::room_map::{Direction, Room};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// Reached a room with no way onward.
    DeadEnd,
    PlayerQuit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplorationOutcome {
    pub reason: EndReason,
    pub final_room: String,
    pub moves: usize,
    pub invalid_commands: usize,
}

/// Walks the map from `root` until a leaf is reached or the player leaves,
/// filing every clue found on the way into `ledger`.
///
/// There is no way back up: once the player steps into a child, the parent is
/// gone for the rest of the walk.
pub fn explore(
    root: &Room,
    ledger: &mut ClueLedger,
    commands: &mut impl CommandSource,
    sink: &mut impl EventSink,
) -> Result<ExplorationOutcome> {
    let mut current = root;
    let mut moves = 0;
    let mut invalid_commands = 0;

    let reason = 'rooms: loop {
        sink.emit(Event::EnteredRoom {
            room: current.name().to_string(),
        })?;

        if let Some(clue) = current.clue() {
            let first_time = ledger.insert(clue);
            debug!(room = current.name(), clue, first_time, "clue collected");
            sink.emit(Event::ClueFound {
                clue: clue.to_string(),
                first_time,
            })?;
        }

        if current.is_leaf() {
            break EndReason::DeadEnd;
        }

        loop {
            sink.emit(Event::PathsOffered {
                left: current.child(Direction::Left).is_some(),
                right: current.child(Direction::Right).is_some(),
            })?;

            match commands.next_command()? {
                Command::Exit => break 'rooms EndReason::PlayerQuit,
                Command::Go(direction) => match current.child(direction) {
                    Some(next) => {
                        debug!(from = current.name(), to = next.name(), ?direction, "moving");
                        current = next;
                        moves += 1;
                        continue 'rooms;
                    }
                    None => {
                        warn!(room = current.name(), ?direction, "no path that way");
                        invalid_commands += 1;
                        sink.emit(Event::InvalidCommand {
                            input: String::new(),
                        })?;
                    }
                },
                Command::Unknown(input) => {
                    warn!(room = current.name(), %input, "unrecognised command");
                    invalid_commands += 1;
                    sink.emit(Event::InvalidCommand { input })?;
                }
            }
        }
    };

    debug!(?reason, room = current.name(), moves, "exploration finished");
    sink.emit(Event::ExplorationEnded { reason })?;

    Ok(ExplorationOutcome {
        reason,
        final_room: current.name().to_string(),
        moves,
        invalid_commands,
    })
}
