//! Event records and user↔event membership.

use grouper_core::model::{Event, EventDetails};
use grouper_core::outcome::{CascadeReport, Outcome};

use super::{require, update_details, Coordinator};

impl Coordinator {
    pub async fn create_event(&self, event: Event) -> Outcome {
        self.events().put(event).await
    }

    pub async fn event(&self, event_id: &str) -> Outcome {
        self.events().lookup(event_id).await
    }

    /// Replaces an event's descriptive fields, keeping its groups and users.
    pub async fn update_event_details(&self, event_id: &str, details: EventDetails) -> Outcome {
        update_details(self.events(), event_id, |event: &mut Event| {
            event.replace_details(details)
        })
        .await
    }

    /// Enrolls a user in an event, without a group.
    ///
    /// A user already in one of the event's groups keeps that assignment.
    pub async fn add_user_to_event(&self, user_id: &str, event_id: &str) -> CascadeReport {
        let mut report = CascadeReport::new();
        let (user, event) = tokio::join!(self.users().get(user_id), self.events().get(event_id));

        if let Some(mut user) = require(&mut report, user, user_id) {
            user.enroll(event_id);
            report.push(self.users().update(user).await);
        }
        if let Some(mut event) = require(&mut report, event, event_id) {
            event.add_user(user_id);
            report.push(self.events().update(event).await);
        }

        report
    }

    /// Withdraws a user from an event, leaving the event's group they were
    /// assigned to, if any.
    pub async fn remove_user_from_event(&self, user_id: &str, event_id: &str) -> CascadeReport {
        let mut report = CascadeReport::new();
        let (user, event) = tokio::join!(self.users().get(user_id), self.events().get(event_id));

        let mut assigned_group = None;
        if let Some(mut user) = require(&mut report, user, user_id) {
            assigned_group = user
                .withdraw(event_id)
                .and_then(|assignment| assignment.group_id().map(str::to_string));
            report.push(self.users().update(user).await);
        }
        if let Some(mut event) = require(&mut report, event, event_id) {
            event.remove_user(user_id);
            report.push(self.events().update(event).await);
        }
        if let Some(group_id) = assigned_group {
            let group = self.groups().get(&group_id).await;
            if let Some(mut group) = require(&mut report, group, &group_id) {
                group.remove_member(user_id);
                report.push(self.groups().update(group).await);
            }
        }

        report
    }

    /// Deletes an event with all of its groups, withdrawing every enrolled
    /// user first.
    ///
    /// The user and group lists come from the event record itself.
    pub async fn delete_event(&self, event_id: &str) -> CascadeReport {
        let mut report = CascadeReport::new();
        let event = self.events().get(event_id).await;

        if let Some(event) = require(&mut report, event, event_id) {
            for user_id in event.users() {
                let user = self.users().get(user_id).await;
                if let Some(mut user) = require(&mut report, user, user_id) {
                    user.withdraw(event_id);
                    report.push(self.users().update(user).await);
                }
            }
            for group_id in event.groups() {
                report.push(self.groups().delete(group_id).await);
            }
        }

        tracing::debug!(event_id = %event_id, steps = report.len(), "Deleting event");
        report.push(self.events().delete(event_id).await);
        report
    }
}
