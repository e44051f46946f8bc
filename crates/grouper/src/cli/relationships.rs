//! Membership CLI commands.

use clap::{Parser, Subcommand};

use super::Output;
use crate::coordinator::Coordinator;

/// Relationship commands.
#[derive(Debug, Parser)]
pub struct RelCommand {
    #[command(subcommand)]
    pub action: RelAction,
}

/// Available relationship actions.
#[derive(Debug, Subcommand)]
pub enum RelAction {
    /// Enroll a user in an event.
    AddUserToEvent {
        /// User ID.
        #[arg(long)]
        user: String,
        /// Event ID.
        #[arg(long)]
        event: String,
    },
    /// Withdraw a user from an event.
    RemoveUserFromEvent {
        /// User ID.
        #[arg(long)]
        user: String,
        /// Event ID.
        #[arg(long)]
        event: String,
    },
    /// Put a user in a group.
    AddUserToGroup {
        /// User ID.
        #[arg(long)]
        user: String,
        /// Group ID.
        #[arg(long)]
        group: String,
    },
    /// Take a user out of a group.
    RemoveUserFromGroup {
        /// User ID.
        #[arg(long)]
        user: String,
        /// Group ID.
        #[arg(long)]
        group: String,
    },
}

impl RelCommand {
    pub async fn run(self, coordinator: &Coordinator) -> Output {
        let report = match self.action {
            RelAction::AddUserToEvent { user, event } => {
                coordinator.add_user_to_event(&user, &event).await
            }
            RelAction::RemoveUserFromEvent { user, event } => {
                coordinator.remove_user_from_event(&user, &event).await
            }
            RelAction::AddUserToGroup { user, group } => {
                coordinator.add_user_to_group(&user, &group).await
            }
            RelAction::RemoveUserFromGroup { user, group } => {
                coordinator.remove_user_from_group(&user, &group).await
            }
        };
        report.into()
    }
}
