//! Match loop: plays a series of games and aggregates their statistics.

use anyhow::{anyhow, Context, Result};
use engine_core::{Geometry, Outcome};
use games_connect4::Connect4;
use games_tictactoe::TicTacToe;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::config::{Config, GameKind};
use crate::instrument::{ProcfsProbe, ResourceProbe};
use crate::policy::RandomPolicy;
use crate::session::{GameSession, SessionError};
use crate::stats::{write_report, StatsSummary};

/// Play the configured match, write the report if one was asked for, and
/// return the summary.
pub fn run(config: &Config) -> Result<StatsSummary> {
    let kind = config.game_kind().map_err(|e| anyhow!(e))?;
    let summary = match kind {
        GameKind::TicTacToe => run_match::<TicTacToe>(config)?,
        GameKind::Connect4 => run_match::<Connect4>(config)?,
    };

    if let Some(path) = config.report_path() {
        write_report(&path, &summary)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        info!("Wrote report to {}", path.display());
    }

    Ok(summary)
}

/// Play `config.games` games on `G` and summarize them.
pub fn run_match<G: Geometry>(config: &Config) -> Result<StatsSummary> {
    let ai = config.ai_config()?;
    let metadata = G::metadata();
    let initial_rss = ProcfsProbe::new().resident_memory_kb().unwrap_or(0);

    info!(
        game = %metadata.display_name,
        games = config.games,
        algorithm = %ai.algorithm,
        ai_player = %ai.ai_player,
        self_play = config.self_play,
        seed = config.seed,
        "Match starting"
    );

    let mut session = GameSession::<G>::new(ai, config.seed).with_self_play(config.self_play);
    let mut opponent = RandomPolicy::with_seed(config.seed.wrapping_add(1));

    // Progress bar only when stderr is a TTY
    let progress = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        let pb = ProgressBar::new(u64::from(config.games));
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} games ({eta})")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        Some(pb)
    } else {
        None
    };

    for _ in 0..config.games {
        play_game(&mut session, &mut opponent)
            .with_context(|| format!("game {} failed", session.game_id()))?;
        debug!("Final board:\n{}", session.board());

        let record = session.reset_game();
        let line = format!(
            "Game {}: {:?} after {} AI moves ({}), win ratio {:.3}",
            record.game_id,
            record.outcome,
            record.moves.len(),
            record.describe(),
            record.win_ratio
        );

        // Suspend progress bar while logging to avoid visual glitches
        match progress {
            Some(ref pb) => {
                pb.suspend(|| info!("{}", line));
                pb.inc(1);
            }
            None => info!("{}", line),
        }
    }

    if let Some(pb) = progress {
        pb.finish_with_message("done");
    }

    let summary = session.aggregator().summary();
    summary.log_summary();

    let final_rss = ProcfsProbe::new().resident_memory_kb().unwrap_or(0);
    info!(
        "Match finished (final RSS: {} KB, growth: {} KB)",
        final_rss,
        final_rss as i64 - initial_rss as i64
    );

    Ok(summary)
}

/// Play one game to the end, the AI against `opponent` unless the session
/// is in self-play.
pub fn play_game<G, P>(
    session: &mut GameSession<G, P>,
    opponent: &mut RandomPolicy,
) -> Result<Outcome, SessionError>
where
    G: Geometry,
    P: ResourceProbe,
{
    while !session.is_over() {
        if session.is_ai_turn() {
            session.play_ai()?;
        } else {
            let mv = opponent.select_move(session.board()).ok_or(SessionError::NoMove)?;
            session.play(mv)?;
        }
    }
    Ok(session.outcome())
}
