//! Final standings of a finished race.

use std::cmp::Ordering;

use time::OffsetDateTime;

/// What the ranking needs to know about one player.
#[derive(Debug, Clone, Copy)]
pub struct RankEntry<'a> {
    /// Player being ranked.
    pub player_id: &'a str,
    /// Whether the player guessed the answer.
    pub won: bool,
    /// Rounds consumed by the player's session.
    pub rounds: u32,
    /// When the player won or lost; `None` for players cut off while still playing.
    pub finish_time: Option<OffsetDateTime>,
}

/// Order players from best to worst and return their ids. The winner is the first entry.
///
/// Winners come first, fastest (fewest rounds) ahead. Everyone else is ordered by how far they
/// got, so *more* rounds rank higher. Within equal rounds the earlier finisher leads, players
/// without a finish time trail, and the player id settles anything left.
pub fn rank(mut entries: Vec<RankEntry<'_>>) -> Vec<String> {
    entries.sort_by(compare);
    entries
        .into_iter()
        .map(|entry| entry.player_id.to_string())
        .collect()
}

fn compare(a: &RankEntry<'_>, b: &RankEntry<'_>) -> Ordering {
    b.won
        .cmp(&a.won)
        .then_with(|| {
            if a.won {
                a.rounds.cmp(&b.rounds)
            } else {
                b.rounds.cmp(&a.rounds)
            }
        })
        .then_with(|| earlier_first(a.finish_time, b.finish_time))
        .then_with(|| a.player_id.cmp(b.player_id))
}

fn earlier_first(a: Option<OffsetDateTime>, b: Option<OffsetDateTime>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
