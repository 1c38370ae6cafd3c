use phase10_types::{FINAL_PHASE, Player};

/// Scores below this are usually a hand that went out, so the phase is
/// probably done.
const AUTO_COMPLETE_THRESHOLD: u32 = 50;

pub struct RankingEngine;

impl RankingEngine {
    /// Display order: furthest phase first, then lowest total score.
    /// The sort is stable so tied players keep their seating order.
    pub fn rank_players(players: &[Player]) -> Vec<Player> {
        let mut ranked = players.to_vec();
        ranked.sort_by(|a, b| {
            b.current_phase
                .cmp(&a.current_phase)
                .then(a.total_score.cmp(&b.total_score))
        });
        ranked
    }

    /// First player in seating order who has finished the final phase.
    pub fn check_winner(players: &[Player]) -> Option<&Player> {
        players.iter().find(|p| p.current_phase > FINAL_PHASE)
    }

    /// Suggestion for pre-ticking "phase completed" while entering a score.
    pub fn should_auto_complete_phase(score: u32) -> bool {
        score < AUTO_COMPLETE_THRESHOLD
    }
}
