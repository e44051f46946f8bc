//! Group lifecycle and user↔group membership.

use grouper_core::model::{Entity, Group, GroupDetails};
use grouper_core::outcome::{CascadeReport, Outcome};

use super::{fetch_failed, require, update_details, Coordinator};

impl Coordinator {
    pub async fn group(&self, group_id: &str) -> Outcome {
        self.groups().lookup(group_id).await
    }

    /// Replaces a group's descriptive fields, keeping event, owner and members.
    pub async fn update_group_details(&self, group_id: &str, details: GroupDetails) -> Outcome {
        update_details(self.groups(), group_id, |group: &mut Group| {
            group.replace_details(details)
        })
        .await
    }

    /// Registers a new group under its event and places its owner in it.
    ///
    /// The event gains the group (and the owner, if not yet enrolled), the
    /// owner's assignment for the event points at the group, and the group is
    /// stored with the owner as its first member. An owner already in another
    /// group of the event leaves it. Event and owner are written before the
    /// group itself; a missing owner is not recorded as a member.
    pub async fn add_group(&self, mut group: Group) -> CascadeReport {
        let mut report = CascadeReport::new();
        let group_id = group.id().to_string();
        let event_id = group.event_id().to_string();
        let owner_id = group.owner_id().to_string();

        let (event, owner) = tokio::join!(self.events().get(&event_id), self.users().get(&owner_id));
        let owner_found = !owner.is_empty();

        if let Some(mut event) = require(&mut report, event, &event_id) {
            event.add_group(group_id.as_str());
            if owner_found {
                event.add_user(owner_id.as_str());
            }
            report.push(self.events().update(event).await);
        }
        let mut previous_group = None;
        if let Some(mut owner) = require(&mut report, owner, &owner_id) {
            previous_group = owner
                .assign_group(event_id.as_str(), group_id.as_str())
                .and_then(|previous| previous.group_id().map(str::to_string))
                .filter(|previous| *previous != group_id);
            report.push(self.users().update(owner).await);
        }

        if let Some(previous_id) = previous_group {
            let previous = self.groups().get(&previous_id).await;
            if let Some(mut previous) = require(&mut report, previous, &previous_id) {
                previous.remove_member(&owner_id);
                report.push(self.groups().update(previous).await);
            }
        }

        if owner_found {
            group.add_member(owner_id.as_str());
        }
        tracing::debug!(group_id = %group_id, event_id = %event_id, "Storing new group");
        report.push(self.groups().put(group).await);
        report
    }

    /// Deletes a group, detaching it from its event and from each of
    /// `member_ids`.
    ///
    /// Members are reset to unassigned only if their assignment for the event
    /// still points at this group.
    pub async fn remove_group(
        &self,
        group_id: &str,
        event_id: &str,
        member_ids: &[String],
    ) -> CascadeReport {
        let mut report = CascadeReport::new();

        let event = self.events().get(event_id).await;
        if let Some(mut event) = require(&mut report, event, event_id) {
            event.remove_group(group_id);
            report.push(self.events().update(event).await);
        }

        for member_id in member_ids {
            let user = self.users().get(member_id).await;
            if let Some(mut user) = require(&mut report, user, member_id) {
                user.unassign_group(event_id, group_id);
                report.push(self.users().update(user).await);
            }
        }

        report.push(self.groups().delete(group_id).await);
        report
    }

    /// Deletes a group using the event and member list from its own record.
    pub async fn delete_group(&self, group_id: &str) -> CascadeReport {
        let group = self.groups().get(group_id).await;
        if group.is_empty() {
            let mut report = CascadeReport::new();
            report.push(fetch_failed::<Group>(group_id));
            report.push(self.groups().delete(group_id).await);
            return report;
        }

        let members: Vec<String> = group.members().iter().cloned().collect();
        self.remove_group(group_id, group.event_id(), &members).await
    }

    /// Puts a user in a group, enrolling them in the group's event when
    /// needed and taking them out of any other group of that event.
    ///
    /// Nothing else is attempted when the group itself cannot be loaded,
    /// since its event is unknown.
    pub async fn add_user_to_group(&self, user_id: &str, group_id: &str) -> CascadeReport {
        let mut report = CascadeReport::new();
        let (group, user) = tokio::join!(self.groups().get(group_id), self.users().get(user_id));

        let Some(mut group) = require(&mut report, group, group_id) else {
            return report;
        };
        let event_id = group.event_id().to_string();

        group.add_member(user_id);
        report.push(self.groups().update(group).await);

        let mut newly_enrolled = false;
        let mut previous_group = None;
        if let Some(mut user) = require(&mut report, user, user_id) {
            newly_enrolled = !user.is_enrolled(&event_id);
            previous_group = user
                .assign_group(event_id.as_str(), group_id)
                .and_then(|previous| previous.group_id().map(str::to_string))
                .filter(|previous| previous != group_id);
            report.push(self.users().update(user).await);
        }

        if newly_enrolled {
            let event = self.events().get(&event_id).await;
            if let Some(mut event) = require(&mut report, event, &event_id) {
                event.add_user(user_id);
                report.push(self.events().update(event).await);
            }
        }

        if let Some(previous_id) = previous_group {
            let previous = self.groups().get(&previous_id).await;
            if let Some(mut previous) = require(&mut report, previous, &previous_id) {
                previous.remove_member(user_id);
                report.push(self.groups().update(previous).await);
            }
        }

        report
    }

    /// Takes a user out of a group; they stay enrolled in its event.
    pub async fn remove_user_from_group(&self, user_id: &str, group_id: &str) -> CascadeReport {
        let mut report = CascadeReport::new();
        let (group, user) = tokio::join!(self.groups().get(group_id), self.users().get(user_id));

        let Some(mut group) = require(&mut report, group, group_id) else {
            return report;
        };
        let event_id = group.event_id().to_string();

        group.remove_member(user_id);
        report.push(self.groups().update(group).await);

        if let Some(mut user) = require(&mut report, user, user_id) {
            user.unassign_group(&event_id, group_id);
            report.push(self.users().update(user).await);
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use grouper_core::model::{GroupAssignment, GroupType};
    use grouper_core::outcome::{Category, OutcomeValue};

    use super::*;
    use crate::testing::{sample_event, sample_group, sample_user, Harness};

    /// E1 with group G1 owned by U1; U1 and U2 are members of G1.
    async fn seeded_group() -> Harness {
        let h = Harness::new();
        let mut event = sample_event("E1");
        event.add_group("G1");
        event.add_user("U1");
        event.add_user("U2");
        let mut group = sample_group("G1", "E1", "U1");
        group.add_member("U1");
        group.add_member("U2");
        let mut u1 = sample_user("U1");
        u1.assign_group("E1", "G1");
        let mut u2 = sample_user("U2");
        u2.assign_group("E1", "G1");

        h.events.seed(event).await;
        h.groups.seed(group).await;
        h.users.seed(u1).await;
        h.users.seed(u2).await;
        h
    }

    fn members(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[tokio::test]
    async fn test_add_group_assigns_owner() {
        let h = Harness::new();
        h.events.seed(sample_event("E1")).await;
        h.users.seed(sample_user("U1")).await;

        let report = h
            .coordinator
            .add_group(sample_group("G1", "E1", "U1"))
            .await;

        let categories: Vec<_> = report.steps().iter().map(|o| o.category).collect();
        assert_eq!(
            categories,
            vec![
                Category::UpdateSucceeded,
                Category::UpdateSucceeded,
                Category::PutSucceeded
            ]
        );

        let event = h.events.record("E1").await.unwrap();
        assert!(event.has_group("G1"));
        assert!(event.has_user("U1"));
        // The owner's group id must not leak into the user set or vice versa.
        assert!(!event.has_group("U1"));

        let owner = h.users.record("U1").await.unwrap();
        assert_eq!(
            owner.assignment("E1"),
            Some(&GroupAssignment::Assigned("G1".to_string()))
        );

        let group = h.groups.record("G1").await.unwrap();
        assert!(group.has_member("U1"));
        assert_eq!(group.event_id(), "E1");
    }

    #[tokio::test]
    async fn test_add_group_with_missing_owner_still_stores_group() {
        let h = Harness::new();
        h.events.seed(sample_event("E1")).await;

        let report = h
            .coordinator
            .add_group(sample_group("G1", "E1", "U404"))
            .await;

        let failures: Vec<_> = report.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].category, Category::FetchFailed);
        assert_eq!(failures[0].field, "userId");
        assert!(h.groups.record("G1").await.is_some());
        let event = h.events.record("E1").await.unwrap();
        assert!(event.has_group("G1"));
        assert!(!event.has_user("U404"));
        let group = h.groups.record("G1").await.unwrap();
        assert!(!group.has_member("U404"));
        assert!(group.members().is_empty());
    }

    #[tokio::test]
    async fn test_add_group_moves_owner_out_of_previous_group() {
        let h = Harness::new();
        let mut event = sample_event("E1");
        event.add_group("G1");
        event.add_user("U1");
        let mut g1 = sample_group("G1", "E1", "U9");
        g1.add_member("U1");
        let mut u1 = sample_user("U1");
        u1.assign_group("E1", "G1");
        h.events.seed(event).await;
        h.groups.seed(g1).await;
        h.users.seed(u1).await;

        let report = h
            .coordinator
            .add_group(sample_group("G2", "E1", "U1"))
            .await;

        assert!(report.all_succeeded());
        let categories: Vec<_> = report.steps().iter().map(|o| o.category).collect();
        assert_eq!(
            categories,
            vec![
                Category::UpdateSucceeded,
                Category::UpdateSucceeded,
                Category::UpdateSucceeded,
                Category::PutSucceeded
            ]
        );

        let owner = h.users.record("U1").await.unwrap();
        assert_eq!(
            owner.assignment("E1"),
            Some(&GroupAssignment::Assigned("G2".to_string()))
        );
        assert!(!h.groups.record("G1").await.unwrap().has_member("U1"));
        assert!(h.groups.record("G2").await.unwrap().has_member("U1"));
        let event = h.events.record("E1").await.unwrap();
        assert!(event.has_group("G1"));
        assert!(event.has_group("G2"));
    }

    #[tokio::test]
    async fn test_remove_group_cascades() {
        let h = seeded_group().await;

        let report = h
            .coordinator
            .remove_group("G1", "E1", &members(&["U1", "U2"]))
            .await;

        assert!(report.all_succeeded());
        assert_eq!(report.len(), 4);

        let caches = h.coordinator.caches();
        assert!(!caches.events.get("E1").await.has_group("G1"));
        for user_id in ["U1", "U2"] {
            let user = caches.users.get(user_id).await;
            assert_eq!(user.assignment("E1"), Some(&GroupAssignment::Unassigned));
        }
        assert!(caches.groups.get("G1").await.is_empty());
        assert_eq!(h.groups.fetch_calls(), 0);
    }

    #[tokio::test]
    async fn test_remove_group_member_failures_are_independent() {
        let h = seeded_group().await;
        h.users.fail_writes_for("U2").await;

        let report = h
            .coordinator
            .remove_group("G1", "E1", &members(&["U1", "U2"]))
            .await;

        let member_steps: Vec<_> = report
            .steps()
            .iter()
            .filter(|o| {
                matches!(&o.value, OutcomeValue::User(_)) || o.field == "userId"
            })
            .collect();
        assert_eq!(member_steps.len(), 2);
        assert!(member_steps[0].is_success());
        assert!(!member_steps[1].is_success());
        assert_eq!(member_steps[1].category, Category::UpdateFailed);
        assert_eq!(member_steps[1].id(), Some("U2"));

        let u1 = h.users.record("U1").await.unwrap();
        assert_eq!(u1.assignment("E1"), Some(&GroupAssignment::Unassigned));
        let u2 = h.users.record("U2").await.unwrap();
        assert!(u2.assignment("E1").unwrap().is_group("G1"));

        // The group is still deleted after the failed member step.
        assert_eq!(report.steps().last().unwrap().category, Category::DeleteSucceeded);
    }

    #[tokio::test]
    async fn test_remove_group_keeps_member_in_other_group() {
        let h = seeded_group().await;
        let mut moved = sample_user("U2");
        moved.assign_group("E1", "G2");
        h.users.seed(moved).await;

        h.coordinator
            .remove_group("G1", "E1", &members(&["U2"]))
            .await;

        let u2 = h.users.record("U2").await.unwrap();
        assert!(u2.assignment("E1").unwrap().is_group("G2"));
    }

    #[tokio::test]
    async fn test_delete_group_uses_stored_members() {
        let h = seeded_group().await;

        let report = h.coordinator.delete_group("G1").await;

        assert!(report.all_succeeded());
        assert!(!h.events.record("E1").await.unwrap().has_group("G1"));
        assert!(!h.users.record("U2").await.unwrap().assignment("E1").unwrap().is_group("G1"));
        assert_eq!(h.groups.record("G1").await, None);
    }

    #[tokio::test]
    async fn test_add_user_to_group_enrolls_and_moves() {
        let h = seeded_group().await;
        h.groups.seed(sample_group("G2", "E1", "U9")).await;
        h.users.seed(sample_user("U3")).await;

        // U3 is new to the event.
        let report = h.coordinator.add_user_to_group("U3", "G2").await;
        assert!(report.all_succeeded());
        assert_eq!(report.len(), 3);
        assert!(h.events.record("E1").await.unwrap().has_user("U3"));
        assert!(h.groups.record("G2").await.unwrap().has_member("U3"));

        // U2 leaves G1 for G2.
        let report = h.coordinator.add_user_to_group("U2", "G2").await;
        assert!(report.all_succeeded());
        assert_eq!(report.len(), 3);
        assert!(!h.groups.record("G1").await.unwrap().has_member("U2"));
        assert!(h.groups.record("G2").await.unwrap().has_member("U2"));
        let u2 = h.users.record("U2").await.unwrap();
        assert!(u2.assignment("E1").unwrap().is_group("G2"));
    }

    #[tokio::test]
    async fn test_add_user_to_missing_group_stops_early() {
        let h = Harness::new();
        h.users.seed(sample_user("U1")).await;

        let report = h.coordinator.add_user_to_group("U1", "G404").await;

        assert_eq!(report.len(), 1);
        assert_eq!(report.steps()[0].category, Category::FetchFailed);
        assert_eq!(h.users.write_calls(), 0);
    }

    #[tokio::test]
    async fn test_remove_user_from_group_keeps_enrollment() {
        let h = seeded_group().await;

        let report = h.coordinator.remove_user_from_group("U2", "G1").await;

        assert!(report.all_succeeded());
        assert!(!h.groups.record("G1").await.unwrap().has_member("U2"));
        let u2 = h.users.record("U2").await.unwrap();
        assert_eq!(u2.assignment("E1"), Some(&GroupAssignment::Unassigned));
        assert!(h.events.record("E1").await.unwrap().has_user("U2"));
    }

    #[tokio::test]
    async fn test_update_group_details() {
        let h = seeded_group().await;

        let details = GroupDetails::new("Renamed", GroupType::Project).with_description("new");
        let outcome = h.coordinator.update_group_details("G1", details).await;

        assert!(outcome.is_success());
        let group = h.groups.record("G1").await.unwrap();
        assert_eq!(group.name(), "Renamed");
        assert_eq!(group.members().len(), 2);
    }
}
