//! User CLI commands.

use clap::{Args, Parser, Subcommand};

use grouper_core::model::{EntityKind, Skill, User, UserDetails};

use super::{skill_set, Output};
use crate::coordinator::Coordinator;

/// User management commands.
#[derive(Debug, Parser)]
pub struct UserCommand {
    #[command(subcommand)]
    pub action: UserAction,
}

/// Descriptive user fields.
#[derive(Debug, Args)]
pub struct UserFields {
    /// User name.
    #[arg(long)]
    pub name: String,
    /// User occupation.
    #[arg(long, default_value = "")]
    pub occupation: String,
    /// Skill the user has; repeat for several.
    #[arg(long = "skill")]
    pub skills: Vec<Skill>,
}

impl From<UserFields> for UserDetails {
    fn from(fields: UserFields) -> Self {
        UserDetails::new(fields.name)
            .with_occupation(fields.occupation)
            .with_skills(skill_set(fields.skills))
    }
}

/// Available user actions.
#[derive(Debug, Subcommand)]
pub enum UserAction {
    /// Get user by ID.
    Get {
        /// User ID.
        id: String,
    },
    /// Create a new user.
    Create {
        /// User ID; generated when omitted.
        #[arg(long)]
        id: Option<String>,
        #[command(flatten)]
        fields: UserFields,
    },
    /// Replace a user's descriptive fields.
    Update {
        /// User ID.
        id: String,
        #[command(flatten)]
        fields: UserFields,
    },
    /// Delete a user, removing them from their events and groups.
    Delete {
        /// User ID.
        id: String,
    },
}

impl UserCommand {
    pub async fn run(self, coordinator: &Coordinator) -> anyhow::Result<Output> {
        let output = match self.action {
            UserAction::Get { id } => coordinator.user(&id).await.into(),
            UserAction::Create { id, fields } => {
                let id = id.unwrap_or_else(|| EntityKind::User.generate_id());
                let user = User::new(id, fields.into())?;
                coordinator.create_user(user).await.into()
            }
            UserAction::Update { id, fields } => coordinator
                .update_user_details(&id, fields.into())
                .await
                .into(),
            UserAction::Delete { id } => coordinator.delete_user(&id).await.into(),
        };
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use grouper_core::model::Entity;
    use grouper_core::outcome::{Category, OutcomeValue};

    use super::*;
    use crate::cli::{Cli, Commands};
    use crate::testing::Harness;

    fn parse(args: &[&str]) -> UserCommand {
        let cli = Cli::try_parse_from(std::iter::once("grouper").chain(args.iter().copied())).unwrap();
        match cli.command {
            Commands::User(cmd) => cmd,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_generates_prefixed_id() {
        let h = Harness::new();

        let output = parse(&["user", "create", "--name", "Ada", "--skill", "Swift"])
            .run(&h.coordinator)
            .await
            .unwrap();

        let Output::Outcome(outcome) = output else {
            panic!("expected a single outcome");
        };
        assert_eq!(outcome.category, Category::PutSucceeded);
        let OutcomeValue::User(user) = outcome.value else {
            panic!("expected a user");
        };
        assert!(user.id().starts_with('U'));
        assert!(user.details().skills.has(Skill::Swift));
    }

    #[tokio::test]
    async fn test_get_missing_user_reports_failure() {
        let h = Harness::new();

        let output = parse(&["user", "get", "U404"])
            .run(&h.coordinator)
            .await
            .unwrap();

        assert!(!output.is_success());
    }
}
