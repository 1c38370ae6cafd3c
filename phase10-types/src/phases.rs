use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 6;
pub const FINAL_PHASE: u32 = 10;

pub const QUICK_SCORES: [u32; 8] = [5, 10, 15, 20, 25, 50, 75, 100];

const PHASE_TABLE: [(&str, &str); FINAL_PHASE as usize] = [
    ("2 sets of 3", "Two groups of 3 cards with the same number"),
    ("1 set of 3 + 1 run of 4", "One group of 3 same numbers + 4 cards in sequence"),
    ("1 set of 4 + 1 run of 4", "One group of 4 same numbers + 4 cards in sequence"),
    ("1 run of 7", "Seven cards in sequence"),
    ("1 run of 8", "Eight cards in sequence"),
    ("1 run of 9", "Nine cards in sequence"),
    ("2 sets of 4", "Two groups of 4 cards with the same number"),
    ("7 cards of one color", "Seven cards of the same color"),
    ("1 set of 5 + 1 set of 2", "One group of 5 same numbers + one group of 2 same numbers"),
    ("1 set of 5 + 1 set of 3", "One group of 5 same numbers + one group of 3 same numbers"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PhaseInfo {
    pub number: u32,
    pub description: String,
    pub requirement: String,
}

/// All ten phases in play order.
pub fn phases() -> Vec<PhaseInfo> {
    (1..=FINAL_PHASE).filter_map(phase_info).collect()
}

/// Looks up a phase by its 1-based number.
pub fn phase_info(number: u32) -> Option<PhaseInfo> {
    let index = usize::try_from(number).ok()?.checked_sub(1)?;
    PHASE_TABLE
        .get(index)
        .map(|(description, requirement)| PhaseInfo {
            number,
            description: description.to_string(),
            requirement: requirement.to_string(),
        })
}
