use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use scene_model::{EditOutcome, MoveDirection, ScenePath};
use scene_session::{project_relative_scene, EditSession, SaveMode};
use scene_store::{BuildSettingsStore, TomlFileStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;

use config::load_settings;

#[derive(Parser, Debug)]
#[command(about = "Inspect and edit a project's scene build list")]
struct Cli {
    /// Build settings file; overrides the config file.
    #[arg(long)]
    build_settings: Option<PathBuf>,
    /// Project root used to turn absolute scene paths into project paths.
    #[arg(long)]
    project_root: Option<PathBuf>,
    #[arg(long)]
    save_mode: Option<SaveMode>,
    /// Apply the edit in memory and print the result without saving.
    #[arg(long)]
    dry_run: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    List {
        #[arg(long)]
        json: bool,
    },
    Add {
        path: PathBuf,
    },
    Remove {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    Move {
        path: String,
        direction: Direction,
    },
    MoveBlock {
        direction: Direction,
        #[arg(required = true)]
        paths: Vec<String>,
    },
    Drop {
        #[arg(long, allow_hyphen_values = true)]
        at: isize,
        #[arg(required = true)]
        paths: Vec<String>,
    },
    Enable {
        path: String,
    },
    Disable {
        path: String,
    },
    Toggle {
        path: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Direction {
    Up,
    Down,
}

impl From<Direction> for MoveDirection {
    fn from(value: Direction) -> Self {
        match value {
            Direction::Up => MoveDirection::Up,
            Direction::Down => MoveDirection::Down,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (settings, config_warnings) = load_settings();
    init_tracing(&settings.log_filter);
    for warning in &config_warnings {
        warn!("{warning}");
    }

    let build_settings = cli.build_settings.unwrap_or(settings.build_settings_path);
    let project_root = cli.project_root.unwrap_or(settings.project_root);
    let save_mode = if cli.dry_run {
        SaveMode::Deferred
    } else {
        cli.save_mode.unwrap_or(settings.save_mode)
    };

    let store = TomlFileStore::new(&build_settings);
    let mut session = EditSession::open(store, save_mode)
        .with_context(|| format!("failed to open '{}'", build_settings.display()))?;

    let mut stdout = io::stdout().lock();
    execute(&mut session, cli.command, &project_root, &mut stdout)?;

    if session.is_dirty() {
        if cli.dry_run {
            writeln!(stdout, "dry run: build settings left untouched")?;
            print_list(&session, &mut stdout)?;
        } else {
            session.save()?;
        }
    }

    Ok(())
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn execute<S: BuildSettingsStore>(
    session: &mut EditSession<S>,
    command: Command,
    project_root: &Path,
    out: &mut impl Write,
) -> Result<()> {
    let outcome = match command {
        Command::List { json } => {
            if json {
                let records = session.scenes().flush();
                writeln!(out, "{}", serde_json::to_string_pretty(&records)?)?;
            } else {
                print_list(session, out)?;
            }
            return Ok(());
        }
        Command::Add { path } => {
            let path = project_relative_scene(project_root, &path)?;
            session.add(path.clone())?;
            info!(path = %path, "added scene");
            EditOutcome::Applied
        }
        Command::Remove { paths } => session.remove_many(&scene_paths(paths))?,
        Command::Move { path, direction } => {
            let direction = MoveDirection::from(direction);
            session.move_single(&ScenePath::new(path), direction.delta())?
        }
        Command::MoveBlock { direction, paths } => {
            session.move_selection_block(&scene_paths(paths), direction.into())?
        }
        Command::Drop { at, paths } => session.drop_paths(&scene_paths(paths), at)?,
        Command::Enable { path } => session.set_enabled(&ScenePath::new(path), true)?,
        Command::Disable { path } => session.set_enabled(&ScenePath::new(path), false)?,
        Command::Toggle { path } => session.toggle_enabled(&ScenePath::new(path))?,
    };

    match outcome {
        EditOutcome::Applied => writeln!(out, "updated ({} scenes)", session.scenes().len())?,
        EditOutcome::Unchanged => writeln!(out, "unchanged")?,
    }
    Ok(())
}

fn scene_paths(raw: Vec<String>) -> Vec<ScenePath> {
    raw.into_iter().map(ScenePath::from).collect()
}

fn print_list<S: BuildSettingsStore>(session: &EditSession<S>, out: &mut impl Write) -> Result<()> {
    if session.scenes().is_empty() {
        writeln!(out, "no scenes in build settings")?;
        return Ok(());
    }
    for (index, record) in session.scenes().iter().enumerate() {
        let mark = if record.enabled { 'x' } else { ' ' };
        writeln!(
            out,
            "{index:>3} [{mark}] {:<24} {}",
            record.path.display_name(),
            record.path
        )?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
