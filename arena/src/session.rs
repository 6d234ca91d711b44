//! A game in progress between the AI and an opponent.
//!
//! [`GameSession`] owns the board, whose turn it is, the AI configuration,
//! the current game's move and cost logs, and the statistics aggregator.
//! Opponent moves go through [`GameSession::play`]; AI moves through
//! [`GameSession::play_ai`], which is instrumented. [`GameSession::reset_game`]
//! folds the finished game into the statistics and starts the next one.

use engine_core::{Board, Cell, Geometry, IllegalMove, Move, Outcome, Player, SnapshotError};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info};

use crate::instrument::{ProcfsProbe, ResourceProbe, ResourceStats};
use crate::policy::{instrumented_decide_move, AiConfig, Algorithm, ConfigError};
use crate::stats::{GameRecord, StatsAggregator};

/// Id given to the first game of a session and after a stats reset.
pub const INITIAL_GAME_ID: u32 = 1;

/// Misuse of a session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("game is already over ({0:?})")]
    GameOver(Outcome),

    #[error("it is {0}'s turn, not the AI's")]
    NotAiTurn(Player),

    #[error("it is the AI's turn ({0})")]
    NotOpponentTurn(Player),

    #[error("AI found no legal move")]
    NoMove,

    #[error(transparent)]
    IllegalMove(#[from] IllegalMove),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),
}

impl From<SnapshotError> for SessionError {
    fn from(e: SnapshotError) -> Self {
        SessionError::MalformedSnapshot(e.to_string())
    }
}

/// Plain, serializable state of a session.
///
/// Holds everything needed to resume an interrupted game; completed-game
/// history is not part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Row-major board cells
    pub cells: Vec<Cell>,
    pub current_player: Player,
    pub game_id: u32,
    /// AI moves per game id
    pub moves: BTreeMap<u32, Vec<Move>>,
    /// AI move costs per game id
    pub stats: BTreeMap<u32, Vec<ResourceStats>>,
    /// Display names for players A and B
    pub player_names: [String; 2],
    pub algorithm: Algorithm,
}

/// One board, one AI, and the history of games played on them.
pub struct GameSession<G: Geometry, P: ResourceProbe = ProcfsProbe> {
    board: Board<G>,
    first_player: Player,
    current: Player,
    game_id: u32,
    moves: BTreeMap<u32, Vec<Move>>,
    stats: BTreeMap<u32, Vec<ResourceStats>>,
    player_names: [String; 2],
    config: AiConfig,
    self_play: bool,
    aggregator: StatsAggregator,
    probe: P,
    rng: ChaCha20Rng,
}

impl<G: Geometry> GameSession<G> {
    /// New session sampling resources from procfs.
    pub fn new(config: AiConfig, seed: u64) -> Self {
        Self::with_probe(config, seed, ProcfsProbe::new())
    }
}

impl<G: Geometry, P: ResourceProbe> GameSession<G, P> {
    pub fn with_probe(config: AiConfig, seed: u64, probe: P) -> Self {
        let player_names = G::metadata().player_names;
        let name = |i: usize| player_names.get(i).cloned().unwrap_or_default();

        Self {
            board: Board::new(),
            first_player: Player::A,
            current: Player::A,
            game_id: INITIAL_GAME_ID,
            moves: BTreeMap::new(),
            stats: BTreeMap::new(),
            player_names: [name(0), name(1)],
            config,
            self_play: false,
            aggregator: StatsAggregator::new(),
            probe,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Let the AI move for both sides.
    pub fn with_self_play(mut self, self_play: bool) -> Self {
        self.self_play = self_play;
        self
    }

    pub fn with_player_names(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        self.player_names = [a.into(), b.into()];
        self
    }

    /// Rebuild a session from a snapshot, keeping `config` apart from its
    /// algorithm, which the snapshot decides.
    pub fn restore(
        snapshot: SessionSnapshot,
        mut config: AiConfig,
        seed: u64,
        probe: P,
    ) -> Result<Self, SessionError> {
        let board = Board::<G>::from_cells(snapshot.cells)?;

        let expected = board.player_to_move(Player::A);
        if !board.is_terminal() && snapshot.current_player != expected {
            return Err(SessionError::MalformedSnapshot(format!(
                "current player {} does not match the board ({} to move)",
                snapshot.current_player, expected
            )));
        }
        if snapshot.game_id < INITIAL_GAME_ID {
            return Err(SessionError::MalformedSnapshot(format!(
                "game id {} is below {}",
                snapshot.game_id, INITIAL_GAME_ID
            )));
        }
        for id in snapshot.moves.keys().chain(snapshot.stats.keys()) {
            let moves = snapshot.moves.get(id).map_or(0, Vec::len);
            let logged = snapshot.stats.get(id).map_or(0, Vec::len);
            if logged != moves {
                return Err(SessionError::MalformedSnapshot(format!(
                    "game {id} has {moves} moves but {logged} stat entries"
                )));
            }
        }

        config.algorithm = snapshot.algorithm;
        let mut session = Self::with_probe(config, seed, probe);
        session.board = board;
        session.current = snapshot.current_player;
        session.game_id = snapshot.game_id;
        session.moves = snapshot.moves;
        session.stats = snapshot.stats;
        session.player_names = snapshot.player_names;

        debug!(game_id = session.game_id, "Restored session");
        Ok(session)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            cells: self.board.cells().to_vec(),
            current_player: self.current,
            game_id: self.game_id,
            moves: self.moves.clone(),
            stats: self.stats.clone(),
            player_names: self.player_names.clone(),
            algorithm: self.config.algorithm,
        }
    }

    pub fn board(&self) -> &Board<G> {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current
    }

    pub fn game_id(&self) -> u32 {
        self.game_id
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    pub fn player_name(&self, player: Player) -> &str {
        match player {
            Player::A => &self.player_names[0],
            Player::B => &self.player_names[1],
        }
    }

    pub fn aggregator(&self) -> &StatsAggregator {
        &self.aggregator
    }

    pub fn outcome(&self) -> Outcome {
        self.board.outcome()
    }

    pub fn is_over(&self) -> bool {
        self.board.is_terminal()
    }

    /// Whether the side to move is played by the AI.
    pub fn is_ai_turn(&self) -> bool {
        self.self_play || self.current == self.config.ai_player
    }

    /// AI moves logged so far in the current game.
    pub fn current_moves(&self) -> &[Move] {
        self.moves.get(&self.game_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// AI move costs logged so far in the current game.
    pub fn current_stats(&self) -> &[ResourceStats] {
        self.stats.get(&self.game_id).map(Vec::as_slice).unwrap_or(&[])
    }

    fn ensure_in_progress(&self) -> Result<(), SessionError> {
        match self.board.outcome() {
            Outcome::InProgress => Ok(()),
            finished => Err(SessionError::GameOver(finished)),
        }
    }

    /// Place the piece of the side to move and pass the turn unless the game
    /// just ended.
    fn commit(&mut self, mv: Move) -> Result<Outcome, SessionError> {
        self.board.apply(mv, self.current)?;
        let outcome = self.board.outcome();
        if !outcome.is_over() {
            self.current = self.current.opponent();
        }
        Ok(outcome)
    }

    /// Play the opponent's move.
    pub fn play(&mut self, mv: Move) -> Result<Outcome, SessionError> {
        self.ensure_in_progress()?;
        if self.is_ai_turn() {
            return Err(SessionError::NotOpponentTurn(self.current));
        }
        self.commit(mv)
    }

    /// Play the opponent's move by column (drop games).
    pub fn play_column(&mut self, col: usize) -> Result<Outcome, SessionError> {
        let mv = self.board.move_for_column(col)?;
        self.play(mv)
    }

    /// Let the AI choose and play a move for the side to move.
    ///
    /// The move and its cost are appended to the current game's logs.
    pub fn play_ai(&mut self) -> Result<Move, SessionError> {
        self.ensure_in_progress()?;
        if !self.is_ai_turn() {
            return Err(SessionError::NotAiTurn(self.current));
        }

        let config = self.config.clone().with_ai_player(self.current);
        let (decision, cost) =
            instrumented_decide_move(&self.board, &config, &mut self.rng, &mut self.probe)?;
        let mv = decision.ok_or(SessionError::NoMove)?;
        self.commit(mv)?;

        debug!(
            game_id = self.game_id,
            player = %config.ai_player,
            mv = %mv,
            time_to_move_ms = cost.time_to_move_ms(),
            cpu_time_ms = cost.cpu_time_ms(),
            memory_delta_kb = cost.memory_delta_kb,
            "AI moved"
        );

        self.moves.entry(self.game_id).or_default().push(mv);
        self.stats.entry(self.game_id).or_default().push(cost);
        Ok(mv)
    }

    /// Record the current game and start the next one.
    ///
    /// A game abandoned before it finished is recorded as in progress.
    pub fn reset_game(&mut self) -> &GameRecord {
        let outcome = self.board.outcome();
        let game_id = self.game_id;
        let moves = self.moves.remove(&game_id).unwrap_or_default();
        let stats = self.stats.remove(&game_id).unwrap_or_default();

        self.moves.clear();
        self.stats.clear();
        self.board.reset();
        self.current = self.first_player;
        self.game_id += 1;

        info!(game_id, outcome = ?outcome, ai_moves = moves.len(), "Game finished");
        self.aggregator.record_game_end(game_id, moves, stats, &self.config, outcome)
    }

    /// Forget every completed game and start again from the first game id.
    ///
    /// The game in progress is discarded.
    pub fn reset_stats(&mut self) {
        self.aggregator.reset();
        self.moves.clear();
        self.stats.clear();
        self.board.reset();
        self.current = self.first_player;
        self.game_id = INITIAL_GAME_ID;
        debug!("Session statistics reset");
    }

    /// Flip alpha-beta pruning and return the new setting.
    pub fn toggle_pruning(&mut self) -> bool {
        self.config.pruning = !self.config.pruning;
        self.config.pruning
    }

    pub fn win_loss_ratio(&self) -> f64 {
        self.aggregator.win_loss_ratio()
    }
}
