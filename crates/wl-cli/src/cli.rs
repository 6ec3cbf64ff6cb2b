//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use wl_core::{ProjectId, UserId, WorkEventType};

/// Work-time tracker.
///
/// Records start/resume/hold/end events for team members and reports
/// per-day work history and the current session.
#[derive(Debug, Parser)]
#[command(name = "wl", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record a work-time event.
    Record(RecordArgs),

    /// Import work-time events as JSON lines from stdin.
    Import(ImportArgs),

    /// Print a member's events as JSON lines.
    Events(MemberArgs),

    /// Show a member's work history, one line per day.
    History {
        #[command(flatten)]
        member: MemberArgs,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show a member's current session.
    Status {
        #[command(flatten)]
        member: MemberArgs,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List members who have recorded events.
    Members {
        /// Only list members with events on this project.
        #[arg(long)]
        project: Option<ProjectId>,
    },

    /// Summarize every member's work on a project.
    Summary {
        /// The project to summarize.
        #[arg(long)]
        project: ProjectId,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Selects a member and optionally narrows to one project.
#[derive(Debug, Clone, Args)]
pub struct MemberArgs {
    /// The member. Defaults to `user` from the config.
    #[arg(long)]
    pub user: Option<UserId>,

    /// Only include events recorded against this project.
    #[arg(long)]
    pub project: Option<ProjectId>,
}

#[derive(Debug, Args)]
pub struct RecordArgs {
    /// What happened: start, resume, hold or end.
    pub kind: WorkEventType,

    #[command(flatten)]
    pub member: MemberArgs,

    /// Note to attach (kept only on `end`).
    #[arg(long)]
    pub note: Option<String>,

    /// When it happened: RFC 3339 or e.g. "15 minutes ago". Defaults to now.
    #[arg(long)]
    pub at: Option<String>,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Member to apply when incoming events omit `user_id`.
    #[arg(long)]
    pub user: Option<UserId>,

    /// Project to apply when incoming events omit `project_id`.
    #[arg(long)]
    pub project: Option<ProjectId>,
}
