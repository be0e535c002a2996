use clap::ValueEnum;
use serde::Serialize;

use crate::room_map::Room;

/// The compiled-in game variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    /// Explore the mansion; no clues.
    Novice,
    /// Collect clues, then see who the evidence points at.
    Advanced,
    /// Collect clues and accuse a suspect.
    Master,
}

impl Scenario {
    pub fn title(self) -> &'static str {
        match self {
            Scenario::Novice => "Detective Quest: A Mansão Misteriosa",
            Scenario::Advanced => "Detective Quest: Missão Avançada",
            Scenario::Master => "Detective Quest: O Julgamento Final",
        }
    }

    pub fn build(self) -> Room {
        match self {
            Scenario::Novice => novice_map(),
            Scenario::Advanced => advanced_map(),
            Scenario::Master => master_map(),
        }
    }

    /// Clue → suspect facts loaded into the evidence table before play.
    pub fn evidence(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Scenario::Novice => &[],
            Scenario::Advanced => ADVANCED_EVIDENCE,
            Scenario::Master => MASTER_EVIDENCE,
        }
    }

    pub fn shows_evidence(self) -> bool {
        self == Scenario::Advanced
    }

    pub fn takes_accusation(self) -> bool {
        self == Scenario::Master
    }
}

const ADVANCED_EVIDENCE: &[(&str, &str)] = &[
    ("Luvas sujas", "Jardineiro"),
    ("Taça quebrada", "Mordomo"),
    ("Bilhete rasgado", "Sobrinha"),
];

const MASTER_EVIDENCE: &[(&str, &str)] = &[
    ("Pegadas molhadas na entrada", "Sr. Verde"),
    ("Terra revirada perto do portão", "Sr. Verde"),
    ("Luvas de jardinagem escondidas", "Sr. Verde"),
    ("Copo com batom vermelho", "Sra. Rosa"),
    ("Perfume floral no corredor", "Sra. Rosa"),
    ("Livro de venenos fora do lugar", "Coronel Mostarda"),
    ("Faca sumida do faqueiro", "Coronel Mostarda"),
];

fn novice_map() -> Room {
    Room::new("Hall de Entrada")
        .with_left(
            Room::new("Biblioteca")
                .with_left(Room::new("Jardim"))
                .with_right(Room::new("Porão")),
        )
        .with_right(Room::new("Cozinha").with_right(Room::new("Escritório")))
}

fn advanced_map() -> Room {
    Room::new("Hall de Entrada")
        .with_left(
            Room::new("Biblioteca")
                .with_clue("Bilhete rasgado")
                .with_left(Room::new("Jardim").with_clue("Luvas sujas")),
        )
        .with_right(
            Room::new("Cozinha")
                .with_clue("Taça quebrada")
                .with_right(Room::new("Porão")),
        )
}

fn master_map() -> Room {
    Room::new("Hall de Entrada")
        .with_clue("Pegadas molhadas na entrada")
        .with_left(
            Room::new("Sala de Estar")
                .with_clue("Copo com batom vermelho")
                .with_left(Room::new("Biblioteca").with_clue("Livro de venenos fora do lugar"))
                .with_right(
                    Room::new("Corredor")
                        .with_clue("Perfume floral no corredor")
                        .with_left(Room::new("Quarto de Hóspedes")),
                ),
        )
        .with_right(
            Room::new("Cozinha")
                .with_clue("Faca sumida do faqueiro")
                .with_left(Room::new("Despensa").with_clue("Luvas de jardinagem escondidas"))
                .with_right(Room::new("Jardim").with_clue("Terra revirada perto do portão")),
        )
}
