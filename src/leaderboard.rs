//! Ranked leaderboard over a persistent score table
//!
//! Ranking: higher score first; equal scores keep insertion order (earliest
//! first). Queries stream the table once or twice and keep at most `limit`
//! rows in memory.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LeaderboardError;
use crate::persistence::{ScoreStore, StoredRow};

/// A finished play: who, and how many points
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    name: String,
    score: u64,
}

impl Player {
    pub fn new(name: impl Into<String>, score: u64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> u64 {
        self.score
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.score)
    }
}

/// Position in the ranking. `Less` ranks ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RankKey {
    score: u64,
    seq: u64,
}

impl Ord for RankKey {
    fn cmp(&self, other: &Self) -> Ordering {
        other.score.cmp(&self.score).then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for RankKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug)]
struct Ranked {
    key: RankKey,
    player: Player,
}

impl From<StoredRow> for Ranked {
    fn from(row: StoredRow) -> Self {
        Self {
            key: RankKey {
                score: row.player.score(),
                seq: row.seq,
            },
            player: row.player,
        }
    }
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Ranked {}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Keep the `limit` best-ranked rows seen so far
fn push_best(heap: &mut BinaryHeap<Ranked>, ranked: Ranked, limit: usize) {
    heap.push(ranked);
    if heap.len() > limit {
        heap.pop();
    }
}

/// Ranked views over a `ScoreStore`
#[derive(Debug)]
pub struct Leaderboard<S: ScoreStore> {
    store: S,
}

impl<S: ScoreStore> Leaderboard<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Append a finished play
    pub fn add_score(&mut self, player: &Player) -> Result<(), LeaderboardError> {
        self.store.append(player)?;
        log::info!("Recorded score {}", player);
        Ok(())
    }

    /// Global top `limit` rows
    pub fn top_scores(&self, limit: usize) -> Result<Vec<Player>, LeaderboardError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let mut best = BinaryHeap::with_capacity(limit + 1);
        self.store
            .for_each_row(&mut |row: StoredRow| push_best(&mut best, row.into(), limit))?;
        Ok(best.into_sorted_vec().into_iter().map(|r| r.player).collect())
    }

    /// Best `limit` rows recorded under `name`
    pub fn player_scores(&self, name: &str, limit: usize) -> Result<Vec<Player>, LeaderboardError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let mut best = BinaryHeap::with_capacity(limit + 1);
        self.store.for_each_row(&mut |row: StoredRow| {
            if row.player.name() == name {
                push_best(&mut best, row.into(), limit);
            }
        })?;
        Ok(best.into_sorted_vec().into_iter().map(|r| r.player).collect())
    }

    /// Up to `limit` consecutive ranked rows around `player`
    ///
    /// The anchor is the most recently stored row equal to `player`. If there
    /// is none, `player` is ranked as if inserted now (last among equal
    /// scores) and appears in the window without being stored. The window
    /// puts `(limit - 1) / 2` rows ahead of the anchor when it can, shifting
    /// toward the anchor's side at either end of the ranking.
    pub fn scores_around(&self, player: &Player, limit: usize) -> Result<Vec<Player>, LeaderboardError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut anchor_seq = None;
        self.store.for_each_row(&mut |row: StoredRow| {
            if row.player == *player {
                anchor_seq = Some(row.seq);
            }
        })?;
        let anchor = RankKey {
            score: player.score(),
            seq: anchor_seq.unwrap_or(u64::MAX),
        };

        // Nearest `keep` rows on each side of the anchor
        let keep = limit - 1;
        let mut ahead: BinaryHeap<Reverse<Ranked>> = BinaryHeap::with_capacity(limit);
        let mut behind: BinaryHeap<Ranked> = BinaryHeap::with_capacity(limit);
        let (mut n_ahead, mut n_behind) = (0usize, 0usize);
        self.store.for_each_row(&mut |row: StoredRow| {
            let ranked = Ranked::from(row);
            match ranked.key.cmp(&anchor) {
                Ordering::Less => {
                    n_ahead += 1;
                    ahead.push(Reverse(ranked));
                    if ahead.len() > keep {
                        ahead.pop();
                    }
                }
                Ordering::Greater => {
                    n_behind += 1;
                    push_best(&mut behind, ranked, keep);
                }
                Ordering::Equal => {}
            }
        })?;

        let table_empty = anchor_seq.is_none() && n_ahead + n_behind == 0;
        debug_assert!(!table_empty, "scores_around queried on an empty leaderboard");
        if table_empty {
            return Ok(Vec::new());
        }

        let total = n_ahead + n_behind + 1;
        let position = n_ahead;
        let start = position
            .saturating_sub(keep / 2)
            .min(total.saturating_sub(limit));
        let end = (start + limit).min(total);
        let take_ahead = position - start;
        let take_behind = end - position - 1;

        let mut ahead: Vec<Ranked> = ahead.into_iter().map(|Reverse(r)| r).collect();
        ahead.sort();
        let behind = behind.into_sorted_vec();

        let skip = ahead.len() - take_ahead;
        let mut window = Vec::with_capacity(end - start);
        window.extend(ahead.into_iter().skip(skip).map(|r| r.player));
        window.push(player.clone());
        window.extend(behind.into_iter().take(take_behind).map(|r| r.player));

        log::debug!(
            "Window for {} at rank {} of {}: {} rows",
            player,
            position + 1,
            total,
            window.len()
        );
        Ok(window)
    }

    /// Drop every stored row
    pub fn clear(&mut self) -> Result<(), LeaderboardError> {
        self.store.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use proptest::prelude::*;

    fn board(scores: &[(&str, u64)]) -> Leaderboard<MemoryStore> {
        let mut board = Leaderboard::new(MemoryStore::new());
        for &(name, score) in scores {
            board.add_score(&Player::new(name, score)).unwrap();
        }
        board
    }

    fn scores(players: &[Player]) -> Vec<u64> {
        players.iter().map(|p| p.score()).collect()
    }

    #[test]
    fn test_round_trip_single_row() {
        let board = board(&[("Ada", 500)]);
        assert_eq!(board.top_scores(6).unwrap(), vec![Player::new("Ada", 500)]);
    }

    #[test]
    fn test_top_scores_order_and_limit() {
        let board = board(&[("a", 300), ("b", 900), ("c", 100), ("d", 700), ("e", 500)]);
        assert_eq!(scores(&board.top_scores(3).unwrap()), vec![900, 700, 500]);
        assert_eq!(board.top_scores(10).unwrap().len(), 5);
        assert!(board.top_scores(0).unwrap().is_empty());
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let board = board(&[("first", 500), ("second", 500), ("third", 500)]);
        let names: Vec<_> = board
            .top_scores(3)
            .unwrap()
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_top_scores_idempotent() {
        let board = board(&[("a", 3), ("b", 1), ("c", 2)]);
        assert_eq!(board.top_scores(2).unwrap(), board.top_scores(2).unwrap());
    }

    #[test]
    fn test_window_around_new_score() {
        let mut board = board(&[("a", 900), ("b", 700), ("c", 500), ("d", 300), ("e", 100)]);
        let bob = Player::new("Bob", 600);

        // Not stored yet: ranked virtually
        let window = board.scores_around(&bob, 3).unwrap();
        assert_eq!(scores(&window), vec![700, 600, 500]);
        assert_eq!(window[1], bob);

        // Stored: same window
        board.add_score(&bob).unwrap();
        let window = board.scores_around(&bob, 3).unwrap();
        assert_eq!(scores(&window), vec![700, 600, 500]);
        assert_eq!(window[1].name(), "Bob");
    }

    #[test]
    fn test_window_clamps_at_top() {
        let board = board(&[("a", 900), ("b", 700), ("c", 500), ("d", 300), ("e", 100)]);
        let window = board.scores_around(&Player::new("Top", 1000), 3).unwrap();
        assert_eq!(scores(&window), vec![1000, 900, 700]);
    }

    #[test]
    fn test_window_clamps_at_bottom() {
        let board = board(&[("a", 900), ("b", 700), ("c", 500), ("d", 300), ("e", 100), ("Low", 50)]);
        let window = board.scores_around(&Player::new("Low", 50), 3).unwrap();
        assert_eq!(scores(&window), vec![300, 100, 50]);
    }

    #[test]
    fn test_window_ties_rank_new_row_last() {
        let board = board(&[("a", 500), ("b", 500), ("c", 400)]);
        let window = board.scores_around(&Player::new("New", 500), 3).unwrap();
        // Ranked after both earlier 500s
        let names: Vec<_> = window.iter().map(|p| p.name().to_string()).collect();
        assert_eq!(names, vec!["b", "New", "c"]);
    }

    #[test]
    fn test_window_anchor_is_latest_matching_row() {
        let board = board(&[("Ada", 500), ("x", 800), ("y", 500), ("Ada", 500), ("z", 100)]);
        // Ranking: x, Ada(0), y, Ada(3), z
        let window = board.scores_around(&Player::new("Ada", 500), 1).unwrap();
        assert_eq!(window, vec![Player::new("Ada", 500)]);
        let window = board.scores_around(&Player::new("Ada", 500), 3).unwrap();
        let names: Vec<_> = window.iter().map(|p| p.name().to_string()).collect();
        assert_eq!(names, vec!["y", "Ada", "z"]);
    }

    #[test]
    fn test_window_smaller_table_than_limit() {
        let board = board(&[("a", 10), ("b", 5)]);
        let window = board.scores_around(&Player::new("c", 7), 6).unwrap();
        assert_eq!(scores(&window), vec![10, 7, 5]);
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "empty leaderboard"))]
    fn test_window_on_empty_table() {
        let board = board(&[]);
        assert!(board.scores_around(&Player::new("Ada", 1), 3).unwrap().is_empty());
    }

    #[test]
    fn test_player_scores() {
        let board = board(&[("Ada", 100), ("Bob", 900), ("Ada", 300), ("Ada", 200)]);
        assert_eq!(scores(&board.player_scores("Ada", 2).unwrap()), vec![300, 200]);
        assert!(board.player_scores("Nobody", 2).unwrap().is_empty());
    }

    #[test]
    fn test_clear() {
        let mut board = board(&[("Ada", 100)]);
        board.clear().unwrap();
        assert!(board.top_scores(6).unwrap().is_empty());
    }

    #[test]
    fn test_storage_unavailable() {
        let mut board = board(&[("Ada", 100)]);
        board.store_mut().set_available(false);
        assert!(matches!(
            board.add_score(&Player::new("Bob", 1)),
            Err(LeaderboardError::StorageUnavailable(_))
        ));
        assert!(board.top_scores(6).is_err());
        board.store_mut().set_available(true);
        assert_eq!(board.top_scores(6).unwrap().len(), 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(Player::new("Ada", 500).to_string(), "Ada - 500");
    }

    /// Full sort of every row, best first
    fn naive_ranking(rows: &[(u8, u64)]) -> Vec<(u64, u64, u8)> {
        let mut ranked: Vec<_> = rows
            .iter()
            .enumerate()
            .map(|(seq, &(name, score))| (score, seq as u64, name))
            .collect();
        ranked.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        ranked
    }

    fn build(rows: &[(u8, u64)]) -> Leaderboard<MemoryStore> {
        let mut board = Leaderboard::new(MemoryStore::new());
        for &(name, score) in rows {
            board.add_score(&Player::new(name.to_string(), score)).unwrap();
        }
        board
    }

    proptest! {
        #[test]
        fn prop_top_scores_match_full_sort(
            rows in proptest::collection::vec((0u8..4, 0u64..20), 0..40),
            limit in 0usize..10,
        ) {
            let board = build(&rows);
            let expected: Vec<_> = naive_ranking(&rows)
                .into_iter()
                .take(limit)
                .map(|(score, _, name)| Player::new(name.to_string(), score))
                .collect();
            prop_assert_eq!(board.top_scores(limit).unwrap(), expected);
        }

        #[test]
        fn prop_window_is_contiguous_slice(
            rows in proptest::collection::vec((0u8..4, 0u64..20), 1..40),
            probe in (0u8..6, 0u64..25),
            limit in 1usize..8,
        ) {
            let board = build(&rows);
            let player = Player::new(probe.0.to_string(), probe.1);

            // Ranking that includes the anchor exactly once
            let mut all = rows.clone();
            let stored = rows.iter().any(|&(n, s)| n == probe.0 && s == probe.1);
            let anchor_seq = if stored {
                rows.iter().rposition(|&(n, s)| n == probe.0 && s == probe.1).unwrap() as u64
            } else {
                all.push(probe);
                rows.len() as u64
            };
            let ranking = naive_ranking(&all);
            let position = ranking.iter().position(|r| r.1 == anchor_seq).unwrap();

            // As centred as the bounds allow
            let start = position
                .saturating_sub((limit - 1) / 2)
                .min(ranking.len().saturating_sub(limit));
            let end = (start + limit).min(ranking.len());
            let expected: Vec<_> = ranking[start..end]
                .iter()
                .map(|&(score, _, name)| Player::new(name.to_string(), score))
                .collect();

            let window = board.scores_around(&player, limit).unwrap();
            prop_assert_eq!(window.len(), limit.min(ranking.len()));
            prop_assert!(window.contains(&player));
            prop_assert_eq!(window, expected);
        }
    }
}
