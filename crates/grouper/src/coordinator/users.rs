//! User records and user deletion.

use grouper_core::model::{User, UserDetails};
use grouper_core::outcome::{CascadeReport, Outcome};

use super::{require, update_details, Coordinator};

impl Coordinator {
    pub async fn create_user(&self, user: User) -> Outcome {
        self.users().put(user).await
    }

    pub async fn user(&self, user_id: &str) -> Outcome {
        self.users().lookup(user_id).await
    }

    /// Replaces a user's descriptive fields, keeping their enrollments.
    pub async fn update_user_details(&self, user_id: &str, details: UserDetails) -> Outcome {
        update_details(self.users(), user_id, |user: &mut User| {
            user.replace_details(details)
        })
        .await
    }

    /// Deletes a user after removing them from every event they are enrolled
    /// in and from their group in each.
    ///
    /// Groups the user owns keep them as owner.
    pub async fn delete_user(&self, user_id: &str) -> CascadeReport {
        let mut report = CascadeReport::new();
        let user = self.users().get(user_id).await;

        if let Some(user) = require(&mut report, user, user_id) {
            for (event_id, assignment) in user.events() {
                let event = self.events().get(event_id).await;
                if let Some(mut event) = require(&mut report, event, event_id) {
                    event.remove_user(user_id);
                    report.push(self.events().update(event).await);
                }

                if let Some(group_id) = assignment.group_id() {
                    let group = self.groups().get(group_id).await;
                    if let Some(mut group) = require(&mut report, group, group_id) {
                        group.remove_member(user_id);
                        report.push(self.groups().update(group).await);
                    }
                }
            }
        }

        report.push(self.users().delete(user_id).await);
        report
    }
}

#[cfg(test)]
mod tests {
    use grouper_core::model::Entity;
    use grouper_core::outcome::{Category, OutcomeValue};

    use super::*;
    use crate::testing::{sample_event, sample_group, sample_user, Harness};

    #[tokio::test]
    async fn test_create_and_lookup_user() {
        let h = Harness::new();

        let created = h.coordinator.create_user(sample_user("U1")).await;
        assert_eq!(created.category, Category::PutSucceeded);
        assert_eq!(created.field, "User");

        let found = h.coordinator.user("U1").await;
        assert_eq!(found.category, Category::FetchSucceeded);
        assert!(matches!(found.value, OutcomeValue::User(ref u) if u.id() == "U1"));
        assert_eq!(h.users.fetch_calls(), 0);
    }

    #[tokio::test]
    async fn test_create_duplicate_user_fails() {
        let h = Harness::new();
        h.users.seed(sample_user("U1")).await;

        let outcome = h.coordinator.create_user(sample_user("U1")).await;

        assert_eq!(outcome.category, Category::PutFailed);
        assert_eq!(outcome.field, "userId");
        assert_eq!(outcome.id(), Some("U1"));
    }

    #[tokio::test]
    async fn test_update_user_details_keeps_enrollments() {
        let h = Harness::new();
        let mut user = sample_user("U1");
        user.enroll("E1");
        h.users.seed(user).await;

        let outcome = h
            .coordinator
            .update_user_details("U1", UserDetails::new("Grace").with_occupation("Admiral"))
            .await;

        assert!(outcome.is_success());
        let user = h.users.record("U1").await.unwrap();
        assert_eq!(user.name(), "Grace");
        assert!(user.is_enrolled("E1"));
    }

    #[tokio::test]
    async fn test_delete_user_cascades() {
        let h = Harness::new();
        let mut e1 = sample_event("E1");
        e1.add_user("U1");
        e1.add_group("G1");
        let mut e2 = sample_event("E2");
        e2.add_user("U1");
        let mut group = sample_group("G1", "E1", "U9");
        group.add_member("U1");
        let mut user = sample_user("U1");
        user.assign_group("E1", "G1");
        user.enroll("E2");
        h.events.seed(e1).await;
        h.events.seed(e2).await;
        h.groups.seed(group).await;
        h.users.seed(user).await;

        let report = h.coordinator.delete_user("U1").await;

        assert!(report.all_succeeded());
        assert_eq!(report.len(), 4);
        assert!(!h.events.record("E1").await.unwrap().has_user("U1"));
        assert!(!h.events.record("E2").await.unwrap().has_user("U1"));
        assert!(!h.groups.record("G1").await.unwrap().has_member("U1"));
        assert_eq!(h.users.record("U1").await, None);
        assert!(h.coordinator.caches().users.get("U1").await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_user_continues_past_missing_event() {
        let h = Harness::new();
        let mut e2 = sample_event("E2");
        e2.add_user("U1");
        let mut user = sample_user("U1");
        user.enroll("E1");
        user.enroll("E2");
        h.events.seed(e2).await;
        h.users.seed(user).await;

        let report = h.coordinator.delete_user("U1").await;

        let categories: Vec<_> = report.steps().iter().map(|o| o.category).collect();
        assert_eq!(
            categories,
            vec![
                Category::FetchFailed,
                Category::UpdateSucceeded,
                Category::DeleteSucceeded
            ]
        );
        assert!(!h.events.record("E2").await.unwrap().has_user("U1"));
    }
}
