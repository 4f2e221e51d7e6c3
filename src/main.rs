//! Terminal falling-block runner (default binary).
//!
//! Wires crossterm input and the framebuffer renderer around the simulation
//! core: one frame every `FRAME_MS`, inputs applied before the tick.

use std::fs::File;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use log::info;

use tui_blockfall::core::{EngineConfig, GameSnapshot, GameState};
use tui_blockfall::input::{should_quit, InputHandler};
use tui_blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_blockfall::types::{FAST_DROP_MS, FRAME_MS, NORMAL_DROP_MS};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed of the piece bag (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Gravity period in milliseconds
    #[arg(long, value_name = "MS", default_value_t = NORMAL_DROP_MS)]
    drop_ms: u32,

    /// Gravity period while soft drop is held
    #[arg(long, value_name = "MS", default_value_t = FAST_DROP_MS)]
    fast_drop_ms: u32,

    /// Write logs to this file (stderr is hidden behind the game screen)
    #[arg(long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;

    let seed = args.seed.unwrap_or_else(rand::random);
    info!("seed {seed}");

    let mut game = GameState::with_config(EngineConfig {
        seed,
        normal_drop_ms: args.drop_ms,
        fast_drop_ms: args.fast_drop_ms,
    })
    .context("invalid drop intervals")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let env = env_logger::Env::default();
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            env_logger::Builder::from_env(env.default_filter_or("debug"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        None => env_logger::Builder::from_env(env).init(),
    }
    Ok(())
}

fn run(term: &mut TerminalRenderer, game: &mut GameState) -> Result<()> {
    game.start();

    let view = GameView::default();
    let mut input = InputHandler::new();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let frame = Duration::from_millis(FRAME_MS as u64);
    let mut last_tick = Instant::now();
    let mut running = true;

    while running {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Collect input until the frame deadline.
        let deadline = last_tick + frame;
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        running = false;
                    } else {
                        input.handle_key(key);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        for event in input.drain() {
            game.process_input(event);
        }

        let now = Instant::now();
        let elapsed_ms = now.duration_since(last_tick).as_millis().min(u32::MAX as u128) as u32;
        last_tick = now;
        game.tick(elapsed_ms);
    }

    info!("quit after {} pieces", game.piece_id());
    Ok(())
}
