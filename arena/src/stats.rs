//! Completed-game records and aggregate statistics.
//!
//! The aggregator keeps an append-only, in-memory history of
//! [`GameRecord`]s. Every ratio and average guards its denominator and reads
//! zero when there is nothing to average. Summaries can be written to JSON
//! for comparison between runs.

use engine_core::{Move, Outcome, Player};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::instrument::ResourceStats;
use crate::policy::{AiConfig, Algorithm};

/// Summary of one finished game, built when the game is reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_id: u32,
    pub algorithm: Algorithm,
    /// AI moves in the order they were played
    pub moves: Vec<Move>,
    /// Cost of each AI move, parallel to `moves`
    pub stats: Vec<ResourceStats>,
    /// Minimax depth ceiling; None for MCTS games
    pub depth: Option<u32>,
    /// MCTS simulation budget; None for minimax games
    pub simulations: Option<u32>,
    pub pruning: bool,
    pub ai_player: Player,
    pub outcome: Outcome,
    /// Aggregate AI win ratio including this game
    pub win_ratio: f64,
    /// Aggregate average time-to-move including this game
    pub avg_duration: Duration,
}

impl GameRecord {
    pub fn is_ai_win(&self) -> bool {
        self.outcome == Outcome::Win(self.ai_player)
    }

    pub fn is_ai_loss(&self) -> bool {
        self.outcome == Outcome::Win(self.ai_player.opponent())
    }

    pub fn total_time_to_move(&self) -> Duration {
        self.stats.iter().map(|s| s.time_to_move).sum()
    }

    /// Average time-to-move for this game alone.
    pub fn average_time_to_move(&self) -> Duration {
        average(self.total_time_to_move(), self.moves.len())
    }

    /// Search settings in words, e.g. "minimax depth 5, pruning on".
    pub fn describe(&self) -> String {
        match self.algorithm {
            Algorithm::Minimax => format!(
                "minimax depth {}, pruning {}",
                self.depth.unwrap_or_default(),
                if self.pruning { "on" } else { "off" }
            ),
            Algorithm::Mcts => format!(
                "mcts {} simulations",
                self.simulations.unwrap_or_default()
            ),
        }
    }
}

fn average(total: Duration, count: usize) -> Duration {
    if count == 0 {
        return Duration::ZERO;
    }
    Duration::from_nanos((total.as_nanos() / count as u128) as u64)
}

fn win_ratio<'a>(records: impl Iterator<Item = &'a GameRecord>) -> f64 {
    let (games, wins) = records.fold((0usize, 0usize), |(games, wins), r| {
        (games + 1, wins + usize::from(r.is_ai_win()))
    });
    if games == 0 {
        0.0
    } else {
        wins as f64 / games as f64
    }
}

fn average_duration<'a>(records: impl Iterator<Item = &'a GameRecord>) -> Duration {
    let (total, moves) = records.fold((Duration::ZERO, 0usize), |(total, moves), r| {
        (total + r.total_time_to_move(), moves + r.moves.len())
    });
    average(total, moves)
}

/// In-session history of completed games.
#[derive(Debug, Clone, Default)]
pub struct StatsAggregator {
    history: Vec<GameRecord>,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a finished game into the history and return its record.
    ///
    /// The record's derived fields are computed here, over the history
    /// with the new game included. `stats` must run parallel to `moves`.
    pub fn record_game_end(
        &mut self,
        game_id: u32,
        moves: Vec<Move>,
        stats: Vec<ResourceStats>,
        config: &AiConfig,
        outcome: Outcome,
    ) -> &GameRecord {
        debug_assert_eq!(
            moves.len(),
            stats.len(),
            "game {game_id}: move and stat logs differ in length"
        );

        let (depth, simulations) = match config.algorithm {
            Algorithm::Minimax => (Some(config.depth), None),
            Algorithm::Mcts => (None, Some(config.simulations())),
        };

        let mut record = GameRecord {
            game_id,
            algorithm: config.algorithm,
            moves,
            stats,
            depth,
            simulations,
            pruning: config.pruning,
            ai_player: config.ai_player,
            outcome,
            win_ratio: 0.0,
            avg_duration: Duration::ZERO,
        };
        record.win_ratio = win_ratio(self.history.iter().chain([&record]));
        record.avg_duration = average_duration(self.history.iter().chain([&record]));

        debug!(
            game_id,
            outcome = ?record.outcome,
            moves = record.moves.len(),
            win_ratio = record.win_ratio,
            "Recorded game"
        );

        self.history.push(record);
        &self.history[self.history.len() - 1]
    }

    /// Completed games in creation order.
    pub fn history(&self) -> &[GameRecord] {
        &self.history
    }

    pub fn games_played(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// AI wins divided by completed games; 0 with no games.
    pub fn win_loss_ratio(&self) -> f64 {
        win_ratio(self.history.iter())
    }

    /// Logged time-to-move over logged moves, across all games.
    pub fn average_duration(&self) -> Duration {
        average_duration(self.history.iter())
    }

    /// CPU time per AI move, across all games.
    pub fn average_cpu_time(&self) -> Duration {
        let samples = self.history.iter().flat_map(|r| r.stats.iter());
        let (total, count) = samples.fold((Duration::ZERO, 0usize), |(total, count), s| {
            (total + s.cpu_time, count + 1)
        });
        average(total, count)
    }

    /// Resident memory change per AI move in KB, across all games.
    pub fn average_memory_delta_kb(&self) -> f64 {
        let samples = self.history.iter().flat_map(|r| r.stats.iter());
        let (total, count) = samples.fold((0i64, 0usize), |(total, count), s| {
            (total + s.memory_delta_kb, count + 1)
        });
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Average time-to-move of each game, by game id.
    pub fn per_game_average_durations(&self) -> Vec<(u32, Duration)> {
        self.history
            .iter()
            .map(|r| (r.game_id, r.average_time_to_move()))
            .collect()
    }

    /// Forget every completed game.
    pub fn reset(&mut self) {
        self.history.clear();
    }

    pub fn summary(&self) -> StatsSummary {
        let ai_wins = self.history.iter().filter(|r| r.is_ai_win()).count();
        let ai_losses = self.history.iter().filter(|r| r.is_ai_loss()).count();
        let draws = self.history.iter().filter(|r| r.outcome == Outcome::Draw).count();

        StatsSummary {
            games_played: self.history.len(),
            ai_wins,
            ai_losses,
            draws,
            abandoned: self.history.len() - ai_wins - ai_losses - draws,
            win_ratio: self.win_loss_ratio(),
            avg_time_to_move_ms: self.average_duration().as_secs_f64() * 1000.0,
            avg_cpu_time_ms: self.average_cpu_time().as_secs_f64() * 1000.0,
            avg_memory_delta_kb: self.average_memory_delta_kb(),
            last_algorithm: self.history.last().map(|r| r.algorithm),
            games: self.history.iter().map(GameLine::from).collect(),
        }
    }
}

/// One row of the per-game listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameLine {
    pub game_id: u32,
    pub algorithm: Algorithm,
    pub settings: String,
    pub outcome: Outcome,
    pub moves: usize,
    pub avg_time_to_move_ms: f64,
}

impl From<&GameRecord> for GameLine {
    fn from(record: &GameRecord) -> Self {
        Self {
            game_id: record.game_id,
            algorithm: record.algorithm,
            settings: record.describe(),
            outcome: record.outcome,
            moves: record.moves.len(),
            avg_time_to_move_ms: record.average_time_to_move().as_secs_f64() * 1000.0,
        }
    }
}

/// Serializable view of the aggregate statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub games_played: usize,
    pub ai_wins: usize,
    pub ai_losses: usize,
    pub draws: usize,
    /// Games reset before they finished
    pub abandoned: usize,
    pub win_ratio: f64,
    pub avg_time_to_move_ms: f64,
    pub avg_cpu_time_ms: f64,
    pub avg_memory_delta_kb: f64,
    pub last_algorithm: Option<Algorithm>,
    pub games: Vec<GameLine>,
}

impl StatsSummary {
    pub fn log_summary(&self) {
        info!(
            games = self.games_played,
            wins = self.ai_wins,
            losses = self.ai_losses,
            draws = self.draws,
            abandoned = self.abandoned,
            "AI win ratio {:.3}, avg move {:.2} ms (cpu {:.2} ms, mem {:+.1} KB)",
            self.win_ratio,
            self.avg_time_to_move_ms,
            self.avg_cpu_time_ms,
            self.avg_memory_delta_kb
        );
    }
}

/// Write `summary` as pretty JSON (atomic write-then-rename).
pub fn write_report(path: &Path, summary: &StatsSummary) -> io::Result<()> {
    let json = serde_json::to_string_pretty(summary)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let mut temp_path = path.as_os_str().to_owned();
    temp_path.push(".tmp");

    let written = fs::File::create(&temp_path).and_then(|mut file| file.write_all(json.as_bytes()));
    if let Err(e) = written.and_then(|()| fs::rename(&temp_path, path)) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    debug!("Wrote stats report to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use minimax::Difficulty;
    use tempfile::tempdir;

    fn stat(ms: u64) -> ResourceStats {
        ResourceStats {
            cpu_time: Duration::from_millis(ms / 2),
            memory_delta_kb: ms as i64,
            time_to_move: Duration::from_millis(ms),
        }
    }

    fn minimax_config() -> AiConfig {
        AiConfig::minimax(Difficulty::Hard, true, Player::B)
    }

    fn record(agg: &mut StatsAggregator, id: u32, times: &[u64], outcome: Outcome) {
        let moves = (0..times.len()).map(|i| Move::new(0, i)).collect();
        let stats = times.iter().map(|&ms| stat(ms)).collect();
        agg.record_game_end(id, moves, stats, &minimax_config(), outcome);
    }

    #[test]
    fn test_empty_aggregates_are_zero() {
        let agg = StatsAggregator::new();
        assert_eq!(agg.win_loss_ratio(), 0.0);
        assert_eq!(agg.average_duration(), Duration::ZERO);
        assert_eq!(agg.average_cpu_time(), Duration::ZERO);
        assert_eq!(agg.average_memory_delta_kb(), 0.0);
        assert!(!agg.summary().win_ratio.is_nan());
    }

    #[test]
    fn test_single_ai_win_gives_ratio_one() {
        let mut agg = StatsAggregator::new();
        record(&mut agg, 1, &[10], Outcome::Win(Player::B));
        assert_eq!(agg.win_loss_ratio(), 1.0);
    }

    #[test]
    fn test_ratio_counts_only_ai_wins() {
        let mut agg = StatsAggregator::new();
        record(&mut agg, 1, &[10], Outcome::Win(Player::B));
        record(&mut agg, 2, &[10], Outcome::Win(Player::A));
        record(&mut agg, 3, &[10], Outcome::Draw);
        record(&mut agg, 4, &[10], Outcome::Win(Player::B));
        assert_eq!(agg.win_loss_ratio(), 0.5);

        let summary = agg.summary();
        assert_eq!(summary.ai_wins, 2);
        assert_eq!(summary.ai_losses, 1);
        assert_eq!(summary.draws, 1);
    }

    #[test]
    fn test_abandoned_game_is_not_a_draw() {
        let mut agg = StatsAggregator::new();
        record(&mut agg, 1, &[10], Outcome::InProgress);
        record(&mut agg, 2, &[10], Outcome::Draw);

        let summary = agg.summary();
        assert_eq!(summary.draws, 1);
        assert_eq!(summary.abandoned, 1);
        assert_eq!(summary.ai_wins + summary.ai_losses, 0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "move and stat logs differ in length")]
    fn test_mismatched_logs_are_rejected() {
        let mut agg = StatsAggregator::new();
        agg.record_game_end(1, vec![], vec![stat(5)], &minimax_config(), Outcome::Draw);
    }

    #[test]
    fn test_average_duration_is_per_move() {
        let mut agg = StatsAggregator::new();
        record(&mut agg, 1, &[10, 20, 30], Outcome::Draw);
        record(&mut agg, 2, &[40], Outcome::Draw);
        // 100 ms over 4 moves
        assert_eq!(agg.average_duration(), Duration::from_millis(25));
        assert_eq!(
            agg.per_game_average_durations(),
            vec![(1, Duration::from_millis(20)), (2, Duration::from_millis(40))]
        );
    }

    #[test]
    fn test_game_without_moves_does_not_divide_by_zero() {
        let mut agg = StatsAggregator::new();
        record(&mut agg, 1, &[], Outcome::Win(Player::A));
        assert_eq!(agg.average_duration(), Duration::ZERO);
        assert_eq!(agg.history()[0].average_time_to_move(), Duration::ZERO);
    }

    #[test]
    fn test_derived_fields_include_new_record() {
        let mut agg = StatsAggregator::new();
        record(&mut agg, 1, &[10], Outcome::Draw);
        record(&mut agg, 2, &[30], Outcome::Win(Player::B));

        let first = &agg.history()[0];
        assert_eq!(first.win_ratio, 0.0);
        assert_eq!(first.avg_duration, Duration::from_millis(10));

        let second = &agg.history()[1];
        assert_eq!(second.win_ratio, 0.5);
        assert_eq!(second.avg_duration, Duration::from_millis(20));
    }

    #[test]
    fn test_cpu_and_memory_averages() {
        let mut agg = StatsAggregator::new();
        record(&mut agg, 1, &[10, 30], Outcome::Draw);
        assert_eq!(agg.average_cpu_time(), Duration::from_millis(10));
        assert_eq!(agg.average_memory_delta_kb(), 20.0);
    }

    #[test]
    fn test_algorithm_metadata() {
        let mut agg = StatsAggregator::new();
        let mcts = AiConfig::mcts(800, Player::A);
        agg.record_game_end(1, vec![], vec![], &mcts, Outcome::Draw);
        record(&mut agg, 2, &[5], Outcome::Draw);

        let history = agg.history();
        assert_eq!(history[0].simulations, Some(800));
        assert_eq!(history[0].depth, None);
        assert_eq!(history[0].describe(), "mcts 800 simulations");
        assert_eq!(history[1].depth, Some(5));
        assert_eq!(history[1].describe(), "minimax depth 5, pruning on");
        assert_eq!(agg.summary().last_algorithm, Some(Algorithm::Minimax));
    }

    #[test]
    fn test_reset_clears_history() {
        let mut agg = StatsAggregator::new();
        record(&mut agg, 1, &[10], Outcome::Win(Player::B));
        agg.reset();
        assert!(agg.is_empty());
        assert_eq!(agg.win_loss_ratio(), 0.0);
    }

    #[test]
    fn test_write_report() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.json");

        let mut agg = StatsAggregator::new();
        record(&mut agg, 1, &[12, 8], Outcome::Win(Player::B));
        write_report(&path, &agg.summary()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let parsed: StatsSummary = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.games_played, 1);
        assert_eq!(parsed.games[0].moves, 2);
        assert!(!dir.path().join("report.json.tmp").exists());
    }

    #[test]
    fn test_write_report_to_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("report.json");
        assert!(write_report(&path, &StatsAggregator::new().summary()).is_err());
    }
}
