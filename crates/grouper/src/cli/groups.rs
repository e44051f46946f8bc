//! Group CLI commands.

use clap::{Args, Parser, Subcommand};

use grouper_core::model::{EntityKind, Group, GroupDetails, GroupType, NewGroup, Skill};

use super::{skill_set, Output};
use crate::coordinator::Coordinator;

/// Group management commands.
#[derive(Debug, Parser)]
pub struct GroupCommand {
    #[command(subcommand)]
    pub action: GroupAction,
}

/// Descriptive group fields.
#[derive(Debug, Args)]
pub struct GroupFields {
    /// Group name.
    #[arg(long)]
    pub name: String,
    /// Group type: project, hackathon or startup.
    #[arg(long = "type")]
    pub group_type: GroupType,
    /// Group description.
    #[arg(long, default_value = "")]
    pub description: String,
    /// Required skill; repeat for several.
    #[arg(long = "skill")]
    pub skills: Vec<Skill>,
}

impl From<GroupFields> for GroupDetails {
    fn from(fields: GroupFields) -> Self {
        GroupDetails::new(fields.name, fields.group_type)
            .with_description(fields.description)
            .with_skills(skill_set(fields.skills))
    }
}

/// Available group actions.
#[derive(Debug, Subcommand)]
pub enum GroupAction {
    /// Get group by ID.
    Get {
        /// Group ID.
        id: String,
    },
    /// Create a group under an event, owned by (and containing) a user.
    Create {
        /// Group ID; generated when omitted.
        #[arg(long)]
        id: Option<String>,
        /// Owning event ID.
        #[arg(long)]
        event: String,
        /// Owner user ID.
        #[arg(long)]
        owner: String,
        #[command(flatten)]
        fields: GroupFields,
    },
    /// Replace a group's descriptive fields.
    Update {
        /// Group ID.
        id: String,
        #[command(flatten)]
        fields: GroupFields,
    },
    /// Delete a group, detaching it from its event and members.
    Delete {
        /// Group ID.
        id: String,
    },
}

impl GroupCommand {
    pub async fn run(self, coordinator: &Coordinator) -> anyhow::Result<Output> {
        let output = match self.action {
            GroupAction::Get { id } => coordinator.group(&id).await.into(),
            GroupAction::Create {
                id,
                event,
                owner,
                fields,
            } => {
                let id = id.unwrap_or_else(|| EntityKind::Group.generate_id());
                let group = Group::new(
                    id,
                    NewGroup {
                        details: fields.into(),
                        event_id: event,
                        owner_id: owner,
                    },
                )?;
                coordinator.add_group(group).await.into()
            }
            GroupAction::Update { id, fields } => coordinator
                .update_group_details(&id, fields.into())
                .await
                .into(),
            GroupAction::Delete { id } => coordinator.delete_group(&id).await.into(),
        };
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::{Cli, Commands};
    use crate::testing::{sample_event, sample_user, Harness};

    fn parse(args: &[&str]) -> GroupCommand {
        let cli = Cli::try_parse_from(std::iter::once("grouper").chain(args.iter().copied())).unwrap();
        match cli.command {
            Commands::Group(cmd) => cmd,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_create_with_skills() {
        let cmd = parse(&[
            "group", "create", "--event", "E1", "--owner", "U1", "--name", "Rocket", "--type",
            "startup", "--skill", "C++", "--skill", "Obj-C",
        ]);

        let GroupAction::Create { fields, event, .. } = cmd.action else {
            panic!("expected create");
        };
        assert_eq!(event, "E1");
        assert_eq!(fields.group_type, GroupType::Startup);
        assert_eq!(fields.skills, vec![Skill::Cpp, Skill::ObjC]);
    }

    #[test]
    fn test_parse_rejects_unknown_skill() {
        let result = Cli::try_parse_from([
            "grouper", "group", "update", "G1", "--name", "x", "--type", "project", "--skill",
            "Cobol",
        ]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_create_registers_group_with_event_and_owner() {
        let h = Harness::new();
        h.events.seed(sample_event("E1")).await;
        h.users.seed(sample_user("U1")).await;

        let output = parse(&[
            "group", "create", "--id", "G1", "--event", "E1", "--owner", "U1", "--name", "Rocket",
            "--type", "hackathon",
        ])
        .run(&h.coordinator)
        .await
        .unwrap();

        assert!(output.is_success());
        assert!(h.events.record("E1").await.unwrap().has_group("G1"));
        assert!(h.groups.record("G1").await.unwrap().has_member("U1"));
    }
}
