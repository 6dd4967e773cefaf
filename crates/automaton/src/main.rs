//! Automaton command-line driver.
//!
//! Runs a single automation command against the dry-run [`TracingInputSink`],
//! so scripts can be rehearsed without taking over the desktop.  Every
//! injected event is visible with `RUST_LOG=automaton=debug` (pointer moves
//! at `trace`).
//!
//! ```text
//! automaton move 800 450 --speed 0.5
//! automaton click right
//! automaton type "hello world"
//! automaton chord s --with ctrl,shift
//! automaton key F5
//! automaton hotkey k --with ctrl --presses 3
//! ```
//!
//! # Startup
//!
//! 1. Parse arguments with `clap`.
//! 2. Load the TOML config (`--config` / `AUTOMATON_CONFIG`, else the
//!    platform path; a missing file means defaults).
//! 3. Initialise `tracing`; `RUST_LOG` wins over the configured level.
//! 4. Build the façade, run the command, report the result, close.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use automaton::infrastructure::input_sink::TracingInputSink;
use automaton::infrastructure::key_listener::{ChannelKeyListener, KeyEventFeed};
use automaton::infrastructure::screen_info::{primary_screen_metrics, MockScreenEnumerator};
use automaton::infrastructure::storage::config::{load_config, load_config_from, AutomatonConfig};
use automaton::{Automaton, GlobalKeyListener, InputSink};
use automaton_core::{ClickType, KeyCode, Modifier, ModifierSet, UsLayoutResolver};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Mouse and keyboard automation (dry run).
#[derive(Debug, Parser)]
#[command(name = "automaton", version)]
struct Cli {
    /// Path to a config file instead of the platform default.
    #[arg(long, env = "AUTOMATON_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Move the pointer to an absolute position.
    Move {
        #[arg(allow_negative_numbers = true)]
        x: i32,
        #[arg(allow_negative_numbers = true)]
        y: i32,
        /// Screen diagonals per second; 0 or less jumps instantly.
        #[arg(long, allow_negative_numbers = true)]
        speed: Option<f64>,
    },
    /// Click a mouse button.
    Click {
        #[arg(value_enum, default_value_t = ButtonArg::Left)]
        button: ButtonArg,
    },
    /// Type a string, reporting characters that could not be typed.
    Type { text: String },
    /// Type one character with modifiers held.
    Chord {
        character: char,
        #[arg(long = "with", value_enum, value_delimiter = ',')]
        modifiers: Vec<ModifierArg>,
    },
    /// Strike a key by name (`Enter`, `F5`) or code (`0x0D`, `13`).
    Key { code: KeyCode },
    /// Bind a hotkey, feed simulated presses to the listener and report how
    /// many fired.
    Hotkey {
        code: KeyCode,
        /// Modifiers the binding requires.
        #[arg(long = "with", value_enum, value_delimiter = ',')]
        modifiers: Vec<ModifierArg>,
        /// Modifiers held during the simulated presses; defaults to `--with`.
        #[arg(long = "press-with", value_enum, value_delimiter = ',')]
        press_with: Option<Vec<ModifierArg>>,
        #[arg(long, default_value_t = 1)]
        presses: u32,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ButtonArg {
    Left,
    Right,
    Middle,
}

impl From<ButtonArg> for ClickType {
    fn from(arg: ButtonArg) -> Self {
        match arg {
            ButtonArg::Left => ClickType::Left,
            ButtonArg::Right => ClickType::Right,
            ButtonArg::Middle => ClickType::Middle,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModifierArg {
    Ctrl,
    Shift,
    Alt,
    Altgr,
}

impl From<ModifierArg> for Modifier {
    fn from(arg: ModifierArg) -> Self {
        match arg {
            ModifierArg::Ctrl => Modifier::Ctrl,
            ModifierArg::Shift => Modifier::Shift,
            ModifierArg::Alt => Modifier::Alt,
            ModifierArg::Altgr => Modifier::AltGr,
        }
    }
}

fn modifier_set(args: Vec<ModifierArg>) -> ModifierSet {
    let held: Vec<Modifier> = args.into_iter().map(Modifier::from).collect();
    ModifierSet::new(&held)
}

/// Binds `code` + `binding`, posts `presses` presses with `pressed` held and
/// closes the façade so the dispatch thread drains.  Returns the fire count.
fn rehearse_hotkey(
    automaton: &Automaton,
    feed: &KeyEventFeed,
    code: KeyCode,
    binding: &ModifierSet,
    pressed: &ModifierSet,
    presses: u32,
) -> usize {
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fired);
    if !automaton.register_hotkey(code, binding, move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }) {
        warn!(%code, "hotkey could not be bound");
        return 0;
    }

    let mask = pressed.to_platform_mask();
    for _ in 0..presses {
        if !feed.press(code, mask) {
            break;
        }
    }
    automaton.close();
    fired.load(Ordering::SeqCst)
}

fn load(cli: &Cli) -> anyhow::Result<AutomatonConfig> {
    match &cli.config {
        Some(path) => load_config_from(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => load_config().context("failed to load config"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load(&cli)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level)),
        )
        .init();

    // ── Capabilities ──────────────────────────────────────────────────────────
    let metrics = primary_screen_metrics(
        &MockScreenEnumerator::single_1080p(),
        config.screen.fallback_metrics(),
    );
    let centre = (metrics.width() as i32 / 2, metrics.height() as i32 / 2);
    let sink: Arc<dyn InputSink> = Arc::new(TracingInputSink::new(centre));
    let listener = match ChannelKeyListener::start() {
        Ok(listener) => Some(Arc::new(listener)),
        Err(e) => {
            warn!("hotkeys unavailable: {e}");
            None
        }
    };
    let feed = listener.as_ref().and_then(|l| l.feed().ok());

    let automaton = Automaton::new(
        Some(sink),
        listener.map(|l| l as Arc<dyn GlobalKeyListener>),
        Arc::new(UsLayoutResolver::new()),
        metrics,
        config.motion.to_settings(),
    );

    // ── Command ───────────────────────────────────────────────────────────────
    match cli.command {
        Command::Move { x, y, speed } => {
            let speed = speed.unwrap_or(config.motion.default_speed);
            let ok = automaton.move_to(x, y, speed).wait().await;
            info!(x, y, speed, ok, "move finished");
        }
        Command::Click { button } => {
            let ok = automaton.click(button.into());
            info!(?button, ok, "click finished");
        }
        Command::Type { text } => {
            let failed = automaton.type_string(&text);
            if failed > 0 {
                warn!(failed, "some characters could not be typed");
            }
            info!(chars = text.chars().count(), failed, "type finished");
        }
        Command::Chord {
            character,
            modifiers,
        } => {
            let held = modifier_set(modifiers);
            let ok = automaton.type_char_with(character, &held);
            info!(?character, ?held, ok, "chord finished");
        }
        Command::Key { code } => {
            let ok = automaton.type_virtual_key(code);
            info!(%code, ok, "key finished");
        }
        Command::Hotkey {
            code,
            modifiers,
            press_with,
            presses,
        } => {
            let binding = modifier_set(modifiers);
            let pressed = press_with.map(modifier_set).unwrap_or(binding);
            let Some(feed) = feed else {
                anyhow::bail!("no key listener available");
            };
            let fired = rehearse_hotkey(&automaton, &feed, code, &binding, &pressed, presses);
            info!(%code, ?binding, ?pressed, presses, fired, "hotkey finished");
        }
    }

    automaton.close();
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
