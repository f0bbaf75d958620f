//! shortcut-palette - inspect and exercise a shortcut configuration
//!
//! # Usage
//!
//! ```bash
//! shortcut-palette slug "meta+k | ctrl+k"
//! shortcut-palette format "meta+shift+arrowup"
//! shortcut-palette list --pressed meta
//! shortcut-palette simulate --focus input:text meta k
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use shortcut_palette::config::{default_config_path, load_config, try_load_config};
use shortcut_palette::logging;
use shortcut_palette::shortcuts::{
    display_string, slugify, DispatchOutcome, FocusTarget, PressedKeys, ShortcutAction,
};
use shortcut_palette::{KeySpec, ShortcutRegistry};

#[derive(Parser, Debug)]
#[command(name = "shortcut-palette")]
#[command(about = "Keyboard shortcut registry inspector")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the identity slug of a key specification
    Slug {
        /// Keys such as "?", "meta+k" or "meta+k | ctrl+k"
        keys: String,
    },
    /// Render a key specification with display symbols
    Format { keys: String },
    /// List configured shortcuts, optionally filtered by held keys
    List {
        /// Config file (defaults to ~/.shortcut-palette/config.json)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Held keys used to filter the legend
        #[arg(short, long, num_args = 1..)]
        pressed: Vec<String>,
    },
    /// Press keys in order and report what the registry dispatches
    Simulate {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Focused element: none, textarea, contenteditable, input, input:<type> or a tag
        #[arg(short, long, default_value = "none")]
        focus: FocusTarget,
        /// Keys pressed in order, held until the end
        #[arg(required = true)]
        keys: Vec<String>,
    },
}

fn main() -> Result<()> {
    let _guard = logging::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Slug { keys } => {
            let spec = KeySpec::parse(&keys)?;
            println!("{}", slugify(spec)?);
        }
        Command::Format { keys } => {
            let spec = KeySpec::parse(&keys)?;
            println!("{}", display_string(&spec));
        }
        Command::List { config, pressed } => {
            let registry = build_registry(config, false)?;
            for shortcut in registry.filter_by_pressed_keys(pressed.as_slice()) {
                println!(
                    "{:<24} {:<16} {}{}",
                    shortcut.slug(),
                    display_string(shortcut.keys()),
                    shortcut.description().unwrap_or(""),
                    if shortcut.is_enabled() { "" } else { " (disabled)" }
                );
            }
        }
        Command::Simulate {
            config,
            focus,
            keys,
        } => {
            let registry = build_registry(config, true)?;
            for (held, outcome) in simulate(&registry, &focus, &keys) {
                logging::log_key_event(&held, &focus.to_string(), &format!("{:?}", outcome));
                println!("{:<24} {:?}", held, outcome);
            }
        }
    }

    Ok(())
}

/// Build a registry from the config file. With `strict`, a broken config is
/// an error instead of falling back to defaults.
fn build_registry(path: Option<PathBuf>, strict: bool) -> Result<ShortcutRegistry> {
    let path = path.unwrap_or_else(default_config_path);
    let config = if strict {
        try_load_config(&path).with_context(|| format!("loading {}", path.display()))?
    } else {
        load_config(&path)
    };

    let mut registry = ShortcutRegistry::from_config(&config);
    let results = registry.register_all(config.shortcuts, |shortcut| {
        let label = shortcut
            .description
            .clone()
            .unwrap_or_else(|| shortcut.keys.to_string());
        let action: ShortcutAction = Arc::new(move || println!("  -> {}", label));
        action
    });
    let registered = results.iter().filter(|result| result.is_ok()).count();
    info!(
        event_type = "config_applied",
        path = %path.display(),
        registered,
        skipped = results.len() - registered,
        "Shortcuts registered from config"
    );
    Ok(registry)
}

/// Press `keys` in order, holding each, and collect the held combo and the
/// dispatch decision after every new key. Repeats of a held key are skipped.
fn simulate(
    registry: &ShortcutRegistry,
    focus: &FocusTarget,
    keys: &[String],
) -> Vec<(String, DispatchOutcome)> {
    let mut pressed = PressedKeys::default();
    let mut steps = Vec::new();
    for key in keys {
        if !pressed.press(key) {
            continue;
        }
        let outcome = registry.handle_key_down(&pressed, focus);
        let held = pressed
            .as_combo()
            .map(|combo| combo.canonical())
            .unwrap_or_default();
        steps.push((held, outcome));
    }
    steps
}
