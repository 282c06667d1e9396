use anyhow::{Context, Result};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::StatsError;
use crate::model::{LaunchOptions, StatsOutput};
use crate::render::{print_result, TextPalette, TuiPalette};
use crate::repos::{scan_git_folders, RepoList};
use crate::stats::{launch, spinner};
use crate::tui::DashboardData;

/// Columns taken by the weekday gutter and margins besides the week columns.
const GRID_MARGIN: u32 = 16;
const COLUMN_WIDTH: u32 = 4;

#[derive(Parser)]
#[command(name = "gitcontrib")]
#[command(about = "Contribution statistics of git repositories as a calendar heatmap")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, env = "GITCONTRIB_REPOS", global = true, help = "Path to the repository list file")]
    pub repos_file: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Log debug diagnostics to stderr")]
    pub verbose: bool,
}

#[derive(Args, Clone)]
pub struct StatArgs {
    #[arg(help = "Folders to scan; any argument that is not an existing path is the identity")]
    pub targets: Vec<String>,

    #[arg(long, default_value = "", help = "Shift the end of the scan back: <int>[y/m/w/d]")]
    pub delta: String,

    #[arg(long, help = "Number of weeks to compute (default: fit the terminal width)")]
    pub weeks: Option<u32>,

    #[arg(long, help = "Merge all scanned repositories into one result")]
    pub merge: bool,

    #[arg(long, help = "Count the contributions of every author")]
    pub count_all: bool,

    #[arg(long, help = "Open the interactive dashboard")]
    pub dashboard: bool,

    #[arg(long, help = "Only count files matching this regex (repeatable)")]
    pub include: Vec<String>,

    #[arg(long, help = "Skip files matching this regex (repeatable)")]
    pub exclude: Vec<String>,

    #[arg(long, help = "Output as JSON")]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add folders holding git repositories to the scan list
    #[command(alias = "ar")]
    AddRepository { folders: Vec<PathBuf> },
    /// List repositories of the scan list
    #[command(alias = "lr")]
    ListRepositories,
    /// Show contribution statistics
    #[command(alias = "s")]
    Stat(StatArgs),
}

impl Cli {
    pub fn execute(self) -> Result<()> {
        let list = match &self.common.repos_file {
            Some(path) => RepoList::new(path.clone()),
            None => RepoList::new(RepoList::default_path().context("Failed to locate the repository list")?),
        };

        match self.command {
            Commands::AddRepository { folders } => add_repositories(&list, &folders),
            Commands::ListRepositories => list_repositories(&list),
            Commands::Stat(args) => stat(&list, args),
        }
    }
}

/// Week count for the grid: explicit counts must fit `width`, otherwise as
/// many weeks as fit. Zero selects the default window.
pub fn resolve_weeks(explicit: Option<u32>, width: Option<u16>) -> crate::error::Result<u32> {
    match (explicit, width) {
        (Some(weeks), Some(width)) => {
            let needed = COLUMN_WIDTH
                .checked_mul(weeks)
                .and_then(|columns| columns.checked_add(GRID_MARGIN))
                .unwrap_or(u32::MAX);
            if u32::from(width) < needed {
                return Err(StatsError::TerminalTooNarrow { weeks, needed, width });
            }
            Ok(weeks)
        }
        (Some(weeks), None) => Ok(weeks),
        (None, Some(width)) => {
            let weeks = u32::from(width).saturating_sub(GRID_MARGIN) / COLUMN_WIDTH;
            if weeks == 0 {
                return Err(StatsError::TerminalTooNarrow {
                    weeks: 1,
                    needed: COLUMN_WIDTH + GRID_MARGIN,
                    width,
                });
            }
            Ok(weeks)
        }
        (None, None) => Ok(0),
    }
}

/// Configuration errors stop the invocation as a whole; anything else means
/// the scan itself failed.
fn stat_failure(err: StatsError) -> anyhow::Error {
    if err.is_configuration() {
        anyhow::Error::new(err).context("Invalid stat configuration")
    } else {
        anyhow::Error::new(err).context("Failed to compute contribution statistics")
    }
}

fn add_repositories(list: &RepoList, folders: &[PathBuf]) -> Result<()> {
    for folder in folders {
        if !folder.exists() {
            println!("Repository {} does not exist", folder.display());
            continue;
        }
        let found = scan_git_folders(folder)
            .with_context(|| format!("Failed to scan {}", folder.display()))?;
        let found: Vec<String> = found.iter().map(|p| p.display().to_string()).collect();
        let added = list
            .add(&found)
            .with_context(|| format!("Failed to update {}", list.path().display()))?;
        for repo in added {
            println!("Folder {repo} added to scan list");
        }
    }
    Ok(())
}

fn list_repositories(list: &RepoList) -> Result<()> {
    let repos = list
        .load()
        .with_context(|| format!("Failed to read {}", list.path().display()))?;
    println!("Git folders:\n");
    for repo in repos {
        println!("- {repo}");
    }
    Ok(())
}

fn stat(list: &RepoList, args: StatArgs) -> Result<()> {
    let mut folders = Vec::new();
    let mut user = None;
    for target in &args.targets {
        if Path::new(target).exists() {
            folders.push(PathBuf::from(target));
        } else {
            user = Some(target.clone());
        }
    }
    if user.is_none() && !args.count_all {
        user = crate::identity::default_identity();
        if user.is_none() {
            warn!("no identity found in ~/.gitconfig, counting every author");
        }
    }
    if folders.is_empty() {
        folders = list
            .folders_to_scan()
            .with_context(|| format!("Failed to read {}", list.path().display()))?;
    }

    let width = crossterm::terminal::size().ok().map(|(width, _)| width);
    let duration_in_weeks = resolve_weeks(args.weeks, width).map_err(stat_failure)?;

    let opts = LaunchOptions {
        user,
        duration_in_weeks,
        folders,
        merge: args.merge,
        delta: args.delta.clone(),
        dashboard: args.dashboard || args.json,
        pattern_to_exclude: args.exclude.clone(),
        pattern_to_include: args.include.clone(),
    };

    let now = Local::now().fixed_offset();
    let today = now.date_naive();
    let palette = TextPalette::default();
    let progress = spinner();

    let results = launch(&opts, now, &progress, |result| {
        if let Err(e) = print_result(result, &palette, today) {
            warn!(error = %e, "failed to print result");
        }
    })
    .map_err(stat_failure)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&StatsOutput::new(&results))?);
        return Ok(());
    }

    if args.dashboard {
        let data = match DashboardData::from_results(&results) {
            Some(data) if data.total_commits > 0 => data,
            _ => {
                println!("\nNo commits found to parse");
                return Ok(());
            }
        };
        crate::tui::run(&data, &TuiPalette::default(), today).context("Dashboard failed")?;
    }

    Ok(())
}
