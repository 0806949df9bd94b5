//! Terminal snake runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from `tui_snake::term`.
//! Settings come from `SNAKE_*` environment variables; see
//! [`DriverConfig`](tui_snake::engine::DriverConfig).

use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind, MouseEventKind};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tui_snake::engine::{Command, Driver, DriverConfig};
use tui_snake::input::{handle_key_event, handle_mouse_event, should_quit};
use tui_snake::term::{FrameBuffer, GameView, Hud, TerminalRenderer, Viewport};
use tui_snake::types::TICK_MS;

fn main() -> Result<()> {
    let config = DriverConfig::from_env();
    init_logging(config.log_path.as_deref())?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Logs only go to a file; stdout belongs to the game screen.
fn init_logging(path: Option<&str>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn wall_clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, config: DriverConfig) -> Result<()> {
    let seed = config.seed.unwrap_or_else(wall_clock_seed);
    info!(
        seed,
        width = config.board_width,
        height = config.board_height,
        speed = config.steps_per_second,
        "session started"
    );
    let mut driver = Driver::new(config, seed);

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut hover = None;

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        let hud = Hud {
            steps_per_second: driver.steps_per_second(),
            notice: driver.notice(),
            hover,
        };
        view.render_into_with_hud(driver.game(), &hud, viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        driver.apply(Command::Exit);
                    } else if let Some(command) = handle_key_event(key, driver.game().status()) {
                        driver.apply(command);
                    }
                }
                Event::Mouse(mouse) => {
                    let game = driver.game();
                    if let MouseEventKind::Moved | MouseEventKind::Drag(_) = mouse.kind {
                        hover = view.cell_at(game, viewport, mouse.column, mouse.row);
                    }
                    let command =
                        handle_mouse_event(mouse, |col, row| view.cell_at(game, viewport, col, row));
                    if let Some(command) = command {
                        driver.apply(command);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }

            if driver.exit_requested() {
                info!(score = driver.game().score(), "session ended");
                return Ok(());
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            driver.tick(elapsed.as_millis() as u32)?;
        }
    }
}
