//! Terminal blockfall runner.
//!
//! Reads configuration from the environment, then drives one session with a
//! wall-clock scheduler: render, wait for input until the next descent tick
//! is due, apply the key, fire due ticks, and hand signals to the bell and
//! the event log.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::config::GameConfig;
use blockfall::core::{InstantScheduler, PieceGenerator, Session, Snapshot};
use blockfall::event_log::{EventLog, EventRecord};
use blockfall::input::{difficulty_for_key, handle_key_event, is_start_key, should_quit};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::{GameAction, Signal};

/// Upper bound on the input wait so resizes are picked up while idle.
const MAX_POLL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    let mut log = EventLog::from_config(&config);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, &mut log);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: &GameConfig, log: &mut EventLog) -> Result<()> {
    let generator = match config.seed {
        Some(seed) => PieceGenerator::new(seed),
        None => PieceGenerator::from_os_rng(),
    };
    let mut session = Session::with_generator(generator, InstantScheduler::new());
    let mut difficulty = config.difficulty;

    let view = GameView::default();
    let mut snap = Snapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        // Render.
        session.snapshot_into(&mut snap);
        if !session.is_active() {
            // Show the pick for the next game.
            snap.difficulty = difficulty;
        }
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        // Input with timeout until the next tick.
        let timeout = session
            .scheduler()
            .time_until_next()
            .map_or(MAX_POLL, |t| t.min(MAX_POLL));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        return Ok(());
                    }

                    if let Some(picked) = difficulty_for_key(key) {
                        difficulty = picked;
                    } else if is_start_key(key) {
                        if !session.is_active() {
                            session.start(&config.player, difficulty);
                            log_start(log, &session);
                        }
                    } else if let Some(action) = handle_key_event(key) {
                        if action == GameAction::Restart {
                            if session.restart_with(difficulty) {
                                log_start(log, &session);
                            }
                        } else {
                            session.apply_action(action);
                        }
                    }
                }
            }
        }

        // Ticks.
        session.pump();

        for signal in session.take_signals() {
            log.record(&EventRecord::signal(signal));
            match signal {
                Signal::LineClear { .. } => term.bell()?,
                Signal::GameOver => {
                    term.bell()?;
                    if let Some(score) = session.final_score() {
                        log.record(&EventRecord::session_end(&score));
                    }
                }
                Signal::Move | Signal::Rotate => {}
            }
        }
    }
}

fn log_start(log: &mut EventLog, session: &Session<InstantScheduler>) {
    log.record(&EventRecord::session_start(session.player(), session.difficulty()));
}
