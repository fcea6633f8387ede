//! CLI entry point for shortcut-dispatch
//!
//! Provides command-line interface for checking manifest collisions,
//! listing shortcuts, and replaying timed event scripts.

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::*;
use serde::Serialize;
use shortcut_dispatch::config::Manifest;
use shortcut_dispatch::core::{
    format_display_chord, format_gesture, shared_action, Chord, Registry,
};
use shortcut_dispatch::replay::{parse_script, Effect, Replay};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shortcut-dispatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a manifest for chord, gesture and id collisions
    Check {
        /// Path to shortcut manifest
        #[arg(short, long)]
        manifest: PathBuf,
    },

    /// List all shortcuts
    List {
        /// Path to shortcut manifest
        #[arg(short, long)]
        manifest: PathBuf,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Replay a timed event script and print every effect
    Replay {
        /// Path to shortcut manifest
        #[arg(short, long)]
        manifest: PathBuf,

        /// Path to event script
        #[arg(short, long)]
        script: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { manifest } => check_collisions(&manifest)?,
        Commands::List { manifest, json } => list_shortcuts(&manifest, json)?,
        Commands::Replay { manifest, script } => replay_script(&manifest, &script)?,
    }

    Ok(())
}

/// Expand tilde in a command-line path
fn expand_path(path: &Path) -> anyhow::Result<PathBuf> {
    let expanded = shellexpand::tilde(
        path.to_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid path encoding"))?,
    );
    Ok(PathBuf::from(expanded.as_ref()))
}

fn load_manifest(path: &Path) -> anyhow::Result<(PathBuf, Manifest)> {
    let path = expand_path(path)?;
    let manifest = Manifest::load(path.clone())
        .with_context(|| format!("Failed to load manifest {}", path.display()))?;
    Ok((path, manifest))
}

/// Check manifest for shortcut collisions
fn check_collisions(manifest_path: &Path) -> anyhow::Result<()> {
    let (path, manifest) = load_manifest(manifest_path)?;

    println!("{} Parsing manifest: {}", "→".cyan(), path.display());
    println!("{} Found {} shortcuts\n", "✓".green(), manifest.entries.len());

    let registry = Registry::new(manifest.into_shortcuts(|_| shared_action(|_, _| {})));
    let collisions = registry.collisions();

    if collisions.is_empty() {
        println!("{} {}", "✓".green().bold(), "No collisions detected!".bold());
        return Ok(());
    }

    println!(
        "{} Found {} collision{}:\n",
        "✗".red().bold(),
        collisions.len(),
        if collisions.len() == 1 { "" } else { "s" }
    );

    for (i, collision) in collisions.iter().enumerate() {
        println!(
            "{} {}",
            format!("Collision {}", i + 1).yellow().bold(),
            format!("{} {}", collision.kind, collision.key).cyan()
        );

        for (idx, id) in collision.shortcut_ids.iter().enumerate() {
            let marker = if collision.winner() == Some(id.as_str()) {
                " (wins)".green().to_string()
            } else {
                String::new()
            };
            println!("  {} {}{}", format!("{}.", idx + 1).dimmed(), id.magenta(), marker);
        }
        println!();
    }

    println!("{}", "⚠ Only the last definition of each key will fire!".yellow());
    std::process::exit(1);
}

/// One row of `list --json`
#[derive(Serialize)]
struct ShortcutRow {
    id: String,
    name: String,
    chord: Option<Chord>,
    chord_label: Option<String>,
    gestures: Vec<String>,
    gesture_labels: Vec<String>,
}

/// List all shortcuts in the manifest
fn list_shortcuts(manifest_path: &Path, json: bool) -> anyhow::Result<()> {
    let (path, manifest) = load_manifest(manifest_path)?;
    let platform = manifest.settings.platform;

    let rows: Vec<ShortcutRow> = manifest
        .entries
        .into_iter()
        .map(|entry| ShortcutRow {
            chord_label: entry
                .chord
                .as_ref()
                .map(|chord| format_display_chord(chord, platform)),
            gesture_labels: entry.gestures.iter().map(|g| format_gesture(g)).collect(),
            id: entry.id,
            name: entry.name,
            chord: entry.chord,
            gestures: entry.gestures,
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{}", format!("Shortcuts from: {}\n", path.display()).bold());

    for row in &rows {
        let chord = row.chord_label.as_deref().unwrap_or("-").cyan().bold();
        let gestures = if row.gesture_labels.is_empty() {
            "-".to_string()
        } else {
            row.gesture_labels.join("  ")
        };

        println!("{} {} → {} {}", row.id.dimmed(), chord, row.name.green(), gestures);
    }

    println!("\n{} Total: {} shortcuts", "✓".green(), rows.len());

    Ok(())
}

/// Replay a script against the manifest's shortcuts
fn replay_script(manifest_path: &Path, script_path: &Path) -> anyhow::Result<()> {
    let (_, manifest) = load_manifest(manifest_path)?;

    let script_path = expand_path(script_path)?;
    let content = fs::read_to_string(&script_path)
        .map_err(|e| anyhow::anyhow!("Failed to read file: {}", e))?;
    let events = parse_script(&content)?;

    println!("{} Replaying {} events\n", "→".cyan(), events.len());

    for record in Replay::new(manifest).run(&events) {
        let line = record.to_string();
        let styled = match record.effect {
            Effect::Executed { .. } => line.green().bold(),
            Effect::Alert(_) => line.yellow(),
            Effect::Suppression(_) | Effect::CursorRefresh => line.magenta(),
            Effect::State(_) => line.dimmed(),
            _ => line.normal(),
        };
        println!("{}", styled);
    }

    Ok(())
}
