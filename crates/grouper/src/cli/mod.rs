//! CLI command definitions.

pub mod events;
pub mod groups;
pub mod relationships;
pub mod users;

use clap::{Parser, Subcommand};
use serde::Serialize;

use grouper_core::model::{Skill, SkillSet};
use grouper_core::outcome::{CascadeReport, Outcome};

use crate::coordinator::Coordinator;

/// Admin tool for grouper events, groups and users.
#[derive(Debug, Parser)]
#[command(name = "grouper")]
#[command(version, about)]
#[command(long_about = "Admin tool for grouper events, groups and users.

Prints each outcome, or the per-step report of a multi-entity change, as JSON
and exits non-zero when any step failed.

Storage: the default build keeps records in memory, so every invocation starts
empty and nothing created by an earlier run can be read back. Build with
`--no-default-features --features dynamodb` to persist to DynamoDB.")]
pub struct Cli {
    /// Tracing filter directives, e.g. `grouper=debug`.
    #[arg(long, env = "GROUPER_LOG")]
    pub log_filter: Option<String>,

    /// Emit logs as JSON lines.
    #[arg(long, env = "GROUPER_LOG_JSON")]
    pub log_json: bool,

    /// Print compact instead of indented JSON.
    #[arg(long)]
    pub compact: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Event records.
    Event(events::EventCommand),
    /// Group records.
    Group(groups::GroupCommand),
    /// User records.
    User(users::UserCommand),
    /// Membership changes between users, events and groups.
    Rel(relationships::RelCommand),
}

impl Commands {
    pub async fn run(self, coordinator: &Coordinator) -> anyhow::Result<Output> {
        match self {
            Commands::Event(cmd) => cmd.run(coordinator).await,
            Commands::Group(cmd) => cmd.run(coordinator).await,
            Commands::User(cmd) => cmd.run(coordinator).await,
            Commands::Rel(cmd) => Ok(cmd.run(coordinator).await),
        }
    }
}

/// What a command produced.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Output {
    Outcome(Outcome),
    Report(CascadeReport),
}

impl Output {
    pub fn is_success(&self) -> bool {
        match self {
            Output::Outcome(outcome) => outcome.is_success(),
            Output::Report(report) => report.all_succeeded(),
        }
    }

    pub fn to_json(&self, compact: bool) -> serde_json::Result<String> {
        if compact {
            serde_json::to_string(self)
        } else {
            serde_json::to_string_pretty(self)
        }
    }
}

impl From<Outcome> for Output {
    fn from(outcome: Outcome) -> Self {
        Output::Outcome(outcome)
    }
}

impl From<CascadeReport> for Output {
    fn from(report: CascadeReport) -> Self {
        Output::Report(report)
    }
}

/// Builds a skill set with exactly `skills` flagged.
fn skill_set(skills: Vec<Skill>) -> SkillSet {
    let mut set = SkillSet::new();
    for skill in skills {
        set.add(skill);
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "grouper",
            "--log-json",
            "--compact",
            "user",
            "get",
            "U1",
        ])
        .unwrap();

        assert!(cli.log_json);
        assert!(cli.compact);
        assert!(matches!(cli.command, Commands::User(_)));
    }

    #[test]
    fn test_long_help_warns_about_in_memory_storage() {
        use clap::CommandFactory;

        let command = Cli::command();
        let about = command.get_long_about().unwrap().to_string();

        assert!(about.contains("every invocation starts"));
        assert!(about.contains("--features dynamodb"));
    }

    #[test]
    fn test_skill_set_flags_only_given_skills() {
        let set = skill_set(vec![Skill::Python, Skill::Html]);

        assert!(set.has(Skill::Python));
        assert!(set.has(Skill::Html));
        assert!(!set.has(Skill::Java));
    }

    #[test]
    fn test_report_output_is_a_json_array() {
        let output = Output::from(CascadeReport::new());

        assert!(output.is_success());
        assert_eq!(output.to_json(true).unwrap(), "[]");
    }
}
