//! Terminal Tetris runner.
//!
//! Polls the keyboard, applies actions, steps the game at 60 Hz and redraws
//! through the diffing framebuffer renderer.

use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::error;

use classic_tetris::core::ActionOutcome;
use classic_tetris::input::KeyboardInput;
use classic_tetris::store::FileHighScoreStore;
use classic_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use classic_tetris::types::TICKS_PER_SECOND;
use classic_tetris::{logging, App, AppConfig};

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    logging::init(&config)?;

    let store = FileHighScoreStore::new(config.high_score_path.clone());
    let mut app = App::new(config.seed_or_clock(), store);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut app);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = &result {
        error!(error = %format!("{e:#}"), "game loop failed");
    }
    result
}

fn run(term: &mut TerminalRenderer, app: &mut App<FileHighScoreStore>) -> Result<()> {
    let view = GameView::default();
    let mut input = KeyboardInput::new();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_secs(1) / TICKS_PER_SECOND;
    let mut last_tick = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(app.snapshot(), app.effects(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        let keys = input.poll(timeout)?;
        if input.take_resized() {
            term.invalidate();
        }

        for key in keys {
            if app.handle_key(key) == ActionOutcome::Exit {
                return Ok(());
            }
        }

        if last_tick.elapsed() >= tick_duration {
            app.tick();
            last_tick = Instant::now();
        }
    }
}
