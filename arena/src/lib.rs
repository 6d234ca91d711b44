//! Arena - sessions, instrumentation and statistics for the game engines
//!
//! This crate sits between the search engines and whatever hosts a game:
//! - `policy`: AI configuration and the `decide_move` entry points
//! - `instrument`: per-decision CPU, memory and wall-clock sampling
//! - `session`: a game in progress with its move and cost logs
//! - `stats`: completed-game records and aggregate ratios
//! - `runner`: the match loop behind the `arena` binary

pub mod config;
pub mod instrument;
pub mod policy;
pub mod runner;
pub mod session;
pub mod stats;

pub use instrument::{measure, FakeProbe, ProcfsProbe, ResourceProbe, ResourceStats};
pub use policy::{decide_move, instrumented_decide_move, AiConfig, Algorithm, ConfigError};
pub use session::{GameSession, SessionError, SessionSnapshot};
pub use stats::{GameRecord, StatsAggregator, StatsSummary};
