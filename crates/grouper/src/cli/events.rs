//! Event CLI commands.

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};

use grouper_core::model::{EntityKind, Event, EventDetails};

use super::Output;
use crate::coordinator::Coordinator;

/// Event management commands.
#[derive(Debug, Parser)]
pub struct EventCommand {
    #[command(subcommand)]
    pub action: EventAction,
}

/// Descriptive event fields.
#[derive(Debug, Args)]
pub struct EventFields {
    /// Event name.
    #[arg(long)]
    pub name: String,
    /// Start time, RFC 3339 (e.g. 2024-04-06T09:00:00Z).
    #[arg(long)]
    pub date: DateTime<Utc>,
    /// Event location.
    #[arg(long, default_value = "")]
    pub location: String,
    /// Event description.
    #[arg(long, default_value = "")]
    pub description: String,
}

impl From<EventFields> for EventDetails {
    fn from(fields: EventFields) -> Self {
        EventDetails::new(fields.name, fields.date)
            .with_location(fields.location)
            .with_description(fields.description)
    }
}

/// Available event actions.
#[derive(Debug, Subcommand)]
pub enum EventAction {
    /// Get event by ID.
    Get {
        /// Event ID.
        id: String,
    },
    /// Create a new event.
    Create {
        /// Event ID; generated when omitted.
        #[arg(long)]
        id: Option<String>,
        #[command(flatten)]
        fields: EventFields,
    },
    /// Replace an event's descriptive fields.
    Update {
        /// Event ID.
        id: String,
        #[command(flatten)]
        fields: EventFields,
    },
    /// Delete an event, its groups and every user's enrollment in it.
    Delete {
        /// Event ID.
        id: String,
    },
}

impl EventCommand {
    pub async fn run(self, coordinator: &Coordinator) -> anyhow::Result<Output> {
        let output = match self.action {
            EventAction::Get { id } => coordinator.event(&id).await.into(),
            EventAction::Create { id, fields } => {
                let id = id.unwrap_or_else(|| EntityKind::Event.generate_id());
                let event = Event::new(id, fields.into())?;
                coordinator.create_event(event).await.into()
            }
            EventAction::Update { id, fields } => coordinator
                .update_event_details(&id, fields.into())
                .await
                .into(),
            EventAction::Delete { id } => coordinator.delete_event(&id).await.into(),
        };
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use grouper_core::outcome::Category;

    use super::*;
    use crate::cli::{Cli, Commands};
    use crate::testing::Harness;

    fn parse(args: &[&str]) -> EventCommand {
        let cli = Cli::try_parse_from(std::iter::once("grouper").chain(args.iter().copied())).unwrap();
        match cli.command {
            Commands::Event(cmd) => cmd,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_create() {
        let cmd = parse(&[
            "event",
            "create",
            "--name",
            "HackSC",
            "--date",
            "2024-04-06T09:00:00Z",
            "--location",
            "Los Angeles",
        ]);

        let EventAction::Create { id, fields } = cmd.action else {
            panic!("expected create");
        };
        assert_eq!(id, None);
        assert_eq!(fields.name, "HackSC");
        assert_eq!(fields.date.to_rfc3339(), "2024-04-06T09:00:00+00:00");
        assert_eq!(fields.description, "");
    }

    #[test]
    fn test_parse_rejects_bad_date() {
        let result = Cli::try_parse_from([
            "grouper", "event", "create", "--name", "x", "--date", "tomorrow",
        ]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let h = Harness::new();
        let create = parse(&[
            "event",
            "create",
            "--id",
            "E1",
            "--name",
            "HackSC",
            "--date",
            "2024-04-06T09:00:00Z",
        ]);

        let output = create.run(&h.coordinator).await.unwrap();
        assert!(output.is_success());

        let Output::Outcome(outcome) = parse(&["event", "get", "E1"])
            .run(&h.coordinator)
            .await
            .unwrap()
        else {
            panic!("expected a single outcome");
        };
        assert_eq!(outcome.category, Category::FetchSucceeded);
    }

    #[tokio::test]
    async fn test_create_with_blank_name_is_an_error() {
        let h = Harness::new();
        let create = parse(&[
            "event",
            "create",
            "--name",
            " ",
            "--date",
            "2024-04-06T09:00:00Z",
        ]);

        assert!(create.run(&h.coordinator).await.is_err());
    }
}
