//! Terminal Light Em All runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from `term`. The
//! game has no clock: the loop blocks on terminal events and redraws only
//! when the board, the cursor or the terminal size changed.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info, trace};

use light_em_all::core::{GameConfig, GameEvent, GameSnapshot, GameState};
use light_em_all::input::{handle_key_event, handle_mouse_event, should_quit, Cursor, InputCommand};
use light_em_all::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use light_em_all::types::BoardLayout;

#[derive(Parser)]
#[command(name = "light-em-all")]
#[command(about = "Rotate the wires until every tile is lit", long_about = None)]
struct Cli {
    /// Board width in pieces
    #[arg(long)]
    width: Option<usize>,

    /// Board height in pieces
    #[arg(long)]
    height: Option<usize>,

    /// Starting row of the power source
    #[arg(long)]
    power_row: Option<usize>,

    /// Starting column of the power source
    #[arg(long)]
    power_col: Option<usize>,

    /// Seed for board generation (random when omitted)
    #[arg(short, long)]
    seed: Option<u32>,

    /// Board layout
    #[arg(short, long, value_enum)]
    layout: Option<LayoutArg>,

    /// Log file (the terminal is owned by the game)
    #[arg(
        long,
        value_name = "FILE",
        env = "LIGHTEMALL_LOG_PATH",
        default_value = "light-em-all.log"
    )]
    log_path: PathBuf,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum LayoutArg {
    Random,
    Fixed,
}

impl From<LayoutArg> for BoardLayout {
    fn from(value: LayoutArg) -> Self {
        match value {
            LayoutArg::Random => BoardLayout::Random,
            LayoutArg::Fixed => BoardLayout::Fixed,
        }
    }
}

impl Cli {
    /// Environment first, command line on top.
    fn game_config(&self) -> GameConfig {
        let mut cfg = GameConfig::from_env();
        if let Some(w) = self.width {
            cfg.width = w;
        }
        if let Some(h) = self.height {
            cfg.height = h;
        }
        if let Some(r) = self.power_row {
            cfg.power_row = r;
        }
        if let Some(c) = self.power_col {
            cfg.power_col = c;
        }
        if let Some(layout) = self.layout {
            cfg.layout = layout.into();
        }
        match self.seed {
            Some(seed) => cfg.seed = seed,
            None if std::env::var_os("LIGHTEMALL_SEED").is_none() => cfg.seed = random_seed(),
            None => {}
        }
        cfg
    }
}

fn random_seed() -> u32 {
    let mut bytes = [0u8; 4];
    match getrandom::getrandom(&mut bytes) {
        Ok(()) => u32::from_le_bytes(bytes),
        Err(_) => std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.subsec_nanos())
            .unwrap_or(1),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The game owns the terminal, so logs go to a file (RUST_LOG controls the level).
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&cli.log_path)
        .with_context(|| format!("opening log file {}", cli.log_path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();

    let config = cli.game_config();
    let game = GameState::new(&config).context("invalid board configuration")?;
    info!(
        width = config.width,
        height = config.height,
        seed = config.seed,
        layout = config.layout.as_str(),
        "starting game"
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, game);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, mut game: GameState) -> Result<()> {
    let view = GameView::default();
    let mut cursor = Cursor::new(game.width(), game.height());

    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut viewport = Viewport::new(w, h);
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);
    let mut snap = GameSnapshot::default();
    let mut dirty = true;

    loop {
        for ev in game.take_events() {
            match ev {
                GameEvent::PieceChanged(p) => {
                    trace!(row = p.row, col = p.col, power = p.power_amount, "piece changed")
                }
                GameEvent::Solved { moves } => info!(moves, "board solved"),
            }
            dirty = true;
        }

        if dirty {
            game.snapshot_into(&mut snap);
            let selected = (!snap.won).then(|| cursor.position());
            view.render_into(&snap, selected, viewport, &mut fb);
            term.draw_swap(&mut fb)?;
            dirty = false;
        }

        let command = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    debug!(moves = game.moves(), won = game.is_won(), "quit");
                    return Ok(());
                }
                handle_key_event(key)
            }
            Event::Mouse(mouse) => handle_mouse_event(mouse),
            Event::Resize(w, h) => {
                viewport = Viewport::new(w, h);
                term.invalidate();
                dirty = true;
                None
            }
            _ => None,
        };

        if let Some(command) = command {
            dirty |= apply_command(command, &mut game, &mut cursor, &view, &snap, viewport)?;
        }
    }
}

/// Apply one input command. Returns true when only the view (cursor) changed;
/// board changes are picked up from the game's event queue.
fn apply_command(
    command: InputCommand,
    game: &mut GameState,
    cursor: &mut Cursor,
    view: &GameView,
    snap: &GameSnapshot,
    viewport: Viewport,
) -> Result<bool> {
    match command {
        InputCommand::MovePower(dir) => {
            game.move_power(dir);
            Ok(false)
        }
        InputCommand::MoveCursor(dir) => Ok(cursor.step(dir)),
        InputCommand::RotateSelected => {
            let pos = cursor.position();
            game.rotate(pos.row, pos.col)?;
            Ok(false)
        }
        InputCommand::Click { x, y } => {
            let Some(pos) = view.cell_at(snap, viewport, x, y) else {
                return Ok(false);
            };
            let moved = cursor.select(pos);
            game.rotate(pos.row, pos.col)?;
            Ok(moved)
        }
    }
}
