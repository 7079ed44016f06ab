// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

/// Represents the entity performing an action.
///
/// An actor is any identifiable entity that initiates a state change:
/// an operator acting through the API, or the system itself for
/// automated side effects such as distance enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "operator", "system").
    pub actor_type: String,
    /// Human-readable name for display in audit trails, when known.
    pub display_name: Option<String>,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    /// * `display_name` - Optional human-readable name
    #[must_use]
    pub const fn new(id: String, actor_type: String, display_name: Option<String>) -> Self {
        Self {
            id,
            actor_type,
            display_name,
        }
    }
}

/// Represents the reason or trigger for an action.
///
/// A cause describes why a state change was initiated, usually the
/// request that carried it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this cause
    /// * `description` - A description of what triggered this action
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
///
/// An action describes what state change occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`ConfirmRoster`", "`AcceptAssignment`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A snapshot of one scoped record at a point in time.
///
/// The payload is the JSON serialization of the roster document or
/// ledger entry the event touched, or `{}` when the record did not
/// exist on that side of the transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    /// JSON representation of the record.
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    ///
    /// # Arguments
    ///
    /// * `data` - JSON representation of the record
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }

    /// Snapshot for the absent side of a create or delete.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(String::from("{}"))
    }
}

/// An immutable audit event representing a state transition.
///
/// Every successful state change must produce exactly one audit event.
/// Audit events are immutable once created and capture:
/// - Who performed the action (actor)
/// - Why it was performed (cause)
/// - What action was performed (action)
/// - The record before the transition (before)
/// - The record after the transition (after)
/// - Which department and event the change was scoped to, when the
///   operation had such a scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The record before the transition.
    pub before: StateSnapshot,
    /// The record after the transition.
    pub after: StateSnapshot,
    /// Canonical department key, for department-scoped operations.
    pub department: Option<String>,
    /// Event id or business code the change concerned, when known.
    pub event_ref: Option<String>,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    ///
    /// Once created, an audit event is immutable.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `before` - The record before the transition
    /// * `after` - The record after the transition
    /// * `department` - Department scope, when the operation had one
    /// * `event_ref` - Event id or code, when the operation had one
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
        department: Option<String>,
        event_ref: Option<String>,
    ) -> Self {
        Self {
            actor,
            cause,
            action,
            before,
            after,
            department,
            event_ref,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_actor() -> Actor {
        Actor::new(
            String::from("op-123"),
            String::from("operator"),
            Some(String::from("Maria Soler")),
        )
    }

    fn test_cause() -> Cause {
        Cause::new(String::from("req-456"), String::from("Operator request"))
    }

    #[test]
    fn test_actor_creation_requires_all_fields() {
        let actor: Actor = test_actor();

        assert_eq!(actor.id, "op-123");
        assert_eq!(actor.actor_type, "operator");
        assert_eq!(actor.display_name, Some(String::from("Maria Soler")));
    }

    #[test]
    fn test_system_actor_has_no_display_name() {
        let actor: Actor = Actor::new(String::from("system"), String::from("system"), None);

        assert_eq!(actor.display_name, None);
    }

    #[test]
    fn test_cause_creation_requires_all_fields() {
        let cause: Cause = test_cause();

        assert_eq!(cause.id, "req-456");
        assert_eq!(cause.description, "Operator request");
    }

    #[test]
    fn test_action_creation_requires_name() {
        let action: Action = Action::new(String::from("ConfirmRoster"), None);

        assert_eq!(action.name, "ConfirmRoster");
        assert_eq!(action.details, None);
    }

    #[test]
    fn test_action_creation_with_details() {
        let action: Action = Action::new(
            String::from("AcceptAssignment"),
            Some(String::from("Accepted booking for plate 1234ABC")),
        );

        assert_eq!(action.name, "AcceptAssignment");
        assert_eq!(
            action.details,
            Some(String::from("Accepted booking for plate 1234ABC"))
        );
    }

    #[test]
    fn test_empty_snapshot_is_empty_json_object() {
        let snapshot: StateSnapshot = StateSnapshot::empty();

        assert_eq!(snapshot.data, "{}");
    }

    #[test]
    fn test_audit_event_creation_requires_all_fields() {
        let actor: Actor = test_actor();
        let cause: Cause = test_cause();
        let action: Action = Action::new(String::from("ConfirmRoster"), None);
        let before: StateSnapshot = StateSnapshot::new(String::from("{\"status\":\"draft\"}"));
        let after: StateSnapshot = StateSnapshot::new(String::from("{\"status\":\"confirmed\"}"));

        let event: AuditEvent = AuditEvent::new(
            actor.clone(),
            cause.clone(),
            action.clone(),
            before.clone(),
            after.clone(),
            Some(String::from("logistics")),
            Some(String::from("E1")),
        );

        assert_eq!(event.actor, actor);
        assert_eq!(event.cause, cause);
        assert_eq!(event.action, action);
        assert_eq!(event.before, before);
        assert_eq!(event.after, after);
        assert_eq!(event.department, Some(String::from("logistics")));
        assert_eq!(event.event_ref, Some(String::from("E1")));
    }

    #[test]
    fn test_unscoped_event_carries_no_department() {
        let event: AuditEvent = AuditEvent::new(
            test_actor(),
            test_cause(),
            Action::new(String::from("CreateOperator"), None),
            StateSnapshot::empty(),
            StateSnapshot::new(String::from("{\"loginName\":\"msoler\"}")),
            None,
            None,
        );

        assert_eq!(event.department, None);
        assert_eq!(event.event_ref, None);
    }

    #[test]
    fn test_audit_event_equality() {
        let actor: Actor = test_actor();
        let cause: Cause = test_cause();
        let action: Action = Action::new(String::from("ConfirmRoster"), None);
        let before: StateSnapshot = StateSnapshot::empty();
        let after: StateSnapshot = StateSnapshot::new(String::from("{\"status\":\"confirmed\"}"));

        let event1: AuditEvent = AuditEvent::new(
            actor.clone(),
            cause.clone(),
            action.clone(),
            before.clone(),
            after.clone(),
            Some(String::from("kitchen")),
            Some(String::from("E2")),
        );

        let event2: AuditEvent = AuditEvent::new(
            actor,
            cause,
            action,
            before,
            after,
            Some(String::from("kitchen")),
            Some(String::from("E2")),
        );

        assert_eq!(event1, event2);
    }
}
