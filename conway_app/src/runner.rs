// runner.rs - Periodic trigger driving a Session from a tokio interval

use conway::{Session, Step};
use std::io::Write;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

/// Totals reported when a run ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub reseeds: u64,
    pub population: usize,
}

/// Advances `session` once per `period` until `limit` generations have run
/// or Ctrl-C arrives. When `draw` is set each generation is written to `out`.
pub async fn run<W: Write>(
    mut session: Session,
    period: Duration,
    limit: Option<u64>,
    draw: bool,
    mut out: W,
) -> anyhow::Result<RunSummary> {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut ticks = 0;
    if draw {
        draw_frame(&mut out, &session, ticks)?;
    }

    while limit.is_none_or(|limit| ticks < limit) {
        tokio::select! {
            _ = ticker.tick() => {}
            result = &mut shutdown => {
                if let Err(err) = result {
                    warn!(?err, "failed to listen for Ctrl-C");
                }
                info!(ticks, "interrupted");
                break;
            }
        }

        if let Step::Reseeded { period } = session.advance() {
            info!(period, tick = ticks, "short cycle, reseeded");
        }
        ticks += 1;

        if draw {
            draw_frame(&mut out, &session, ticks)?;
        }
    }

    Ok(RunSummary {
        ticks,
        reseeds: session.reseeds(),
        population: session.board().population(),
    })
}

fn draw_frame<W: Write>(out: &mut W, session: &Session, tick: u64) -> std::io::Result<()> {
    let board = session.board();
    // Clear screen and home the cursor
    write!(out, "\x1b[2J\x1b[H{board}")?;
    writeln!(
        out,
        "tick {tick}  generation {}  live {}  reseeds {}",
        session.generation(),
        board.population(),
        session.reseeds()
    )?;
    out.flush()
}
