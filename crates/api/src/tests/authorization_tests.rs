// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for role parsing and authorization rules.

use crewdesk_domain::Department;

use crate::auth::{AuthenticatedActor, AuthorizationService, Role};
use crate::error::AuthError;

use super::helpers::{
    create_test_admin, create_test_commercial, create_test_direction, create_test_head,
    create_test_worker,
};

fn create_test_unknown(department: Option<&str>) -> AuthenticatedActor {
    AuthenticatedActor::new(
        "legacy-1",
        "Legacy Operator",
        Role::Unknown,
        department.map(String::from),
    )
}

#[test]
fn test_role_parse_canonical_strings() {
    assert_eq!(Role::parse("admin"), Role::Admin);
    assert_eq!(Role::parse("direction"), Role::Direction);
    assert_eq!(Role::parse("department-head"), Role::DepartmentHead);
    assert_eq!(Role::parse("worker"), Role::Worker);
    assert_eq!(Role::parse("commercial"), Role::Commercial);
}

#[test]
fn test_role_parse_folds_legacy_spellings() {
    assert_eq!(Role::parse("Direcció"), Role::Direction);
    assert_eq!(Role::parse("direccion"), Role::Direction);
    assert_eq!(Role::parse("Cap Departament"), Role::DepartmentHead);
    assert_eq!(Role::parse("capdepartament"), Role::DepartmentHead);
    assert_eq!(Role::parse("cap"), Role::DepartmentHead);
    assert_eq!(Role::parse("Treballador"), Role::Worker);
    assert_eq!(Role::parse("Comercial"), Role::Commercial);
}

#[test]
fn test_role_parse_tolerates_whitespace_and_case() {
    assert_eq!(Role::parse("  ADMIN  "), Role::Admin);
    assert_eq!(Role::parse("Worker"), Role::Worker);
}

#[test]
fn test_role_parse_unrecognized_maps_to_unknown() {
    assert_eq!(Role::parse("chef"), Role::Unknown);
    assert_eq!(Role::parse(""), Role::Unknown);
    assert_eq!(Role::parse("superuser"), Role::Unknown);
}

#[test]
fn test_role_as_str_is_canonical() {
    assert_eq!(Role::Admin.as_str(), "admin");
    assert_eq!(Role::Direction.as_str(), "direction");
    assert_eq!(Role::DepartmentHead.as_str(), "department-head");
    assert_eq!(Role::Worker.as_str(), "worker");
    assert_eq!(Role::Commercial.as_str(), "commercial");
    assert_eq!(Role::Unknown.as_str(), "unknown");
}

#[test]
fn test_is_own_department_folds_both_sides() {
    let worker = create_test_worker("Logística");
    let department = Department::new("logistica").unwrap();
    assert!(worker.is_own_department(&department));

    let other = Department::new("cuina").unwrap();
    assert!(!worker.is_own_department(&other));
}

#[test]
fn test_actor_without_department_owns_nothing() {
    let admin = create_test_admin();
    let department = Department::new("logistica").unwrap();
    assert!(!admin.is_own_department(&department));
}

#[test]
fn test_to_audit_actor_carries_role_and_display_name() {
    let head = create_test_head("cuina");
    let audit_actor = head.to_audit_actor();
    assert_eq!(audit_actor.id, "head-1");
    assert_eq!(audit_actor.actor_type, "department-head");
    assert_eq!(audit_actor.display_name, Some(String::from("Test Head")));
}

#[test]
fn test_roster_write_admin_and_direction_reach_any_department() {
    let department = Department::new("cuina").unwrap();

    let result = AuthorizationService::authorize_roster_write(
        &create_test_admin(),
        &department,
        "upsert roster",
    );
    assert!(result.is_ok());

    let result = AuthorizationService::authorize_roster_write(
        &create_test_direction(),
        &department,
        "upsert roster",
    );
    assert!(result.is_ok());
}

#[test]
fn test_roster_write_head_limited_to_own_department() {
    let head = create_test_head("logistica");

    let own = Department::new("Logística").unwrap();
    assert!(AuthorizationService::authorize_roster_write(&head, &own, "upsert roster").is_ok());

    let other = Department::new("cuina").unwrap();
    let result = AuthorizationService::authorize_roster_write(&head, &other, "upsert roster");
    match result.unwrap_err() {
        AuthError::Unauthorized { action, .. } => {
            assert_eq!(action, "upsert roster");
        }
        other => panic!("Expected Unauthorized error, got: {other:?}"),
    }
}

#[test]
fn test_roster_write_worker_limited_to_own_department() {
    let worker = create_test_worker("logistica");

    let own = Department::new("logistica").unwrap();
    assert!(AuthorizationService::authorize_roster_write(&worker, &own, "save vehicle row").is_ok());

    let other = Department::new("sala").unwrap();
    let result = AuthorizationService::authorize_roster_write(&worker, &other, "save vehicle row");
    assert!(result.is_err());
}

#[test]
fn test_roster_write_rejects_commercial_and_unknown() {
    let department = Department::new("logistica").unwrap();

    let result = AuthorizationService::authorize_roster_write(
        &create_test_commercial(),
        &department,
        "upsert roster",
    );
    match result.unwrap_err() {
        AuthError::Unauthorized {
            action,
            required_role,
        } => {
            assert_eq!(action, "upsert roster");
            assert_eq!(required_role, "admin, direction, department-head, or worker");
        }
        other => panic!("Expected Unauthorized error, got: {other:?}"),
    }

    let unknown = create_test_unknown(Some("logistica"));
    let result =
        AuthorizationService::authorize_roster_write(&unknown, &department, "upsert roster");
    assert!(result.is_err());
}

#[test]
fn test_unconfirm_lets_unknown_role_correct_own_department() {
    let department = Department::new("logistica").unwrap();

    let unknown = create_test_unknown(Some("Logística"));
    assert!(AuthorizationService::authorize_unconfirm(&unknown, &department).is_ok());

    let stranger = create_test_unknown(Some("cuina"));
    assert!(AuthorizationService::authorize_unconfirm(&stranger, &department).is_err());
}

#[test]
fn test_unconfirm_does_not_widen_commercial() {
    let department = Department::new("logistica").unwrap();
    let commercial = create_test_commercial();
    assert!(AuthorizationService::authorize_unconfirm(&commercial, &department).is_err());
}

#[test]
fn test_close_head_reaches_any_department() {
    let head = create_test_head("logistica");
    let other = Department::new("cuina").unwrap();
    assert!(AuthorizationService::authorize_close(&head, &other).is_ok());
}

#[test]
fn test_close_worker_limited_to_own_department() {
    let worker = create_test_worker("logistica");

    let own = Department::new("logistica").unwrap();
    assert!(AuthorizationService::authorize_close(&worker, &own).is_ok());

    let other = Department::new("cuina").unwrap();
    let result = AuthorizationService::authorize_close(&worker, &other);
    match result.unwrap_err() {
        AuthError::Unauthorized { action, .. } => {
            assert_eq!(action, "close roster");
        }
        other => panic!("Expected Unauthorized error, got: {other:?}"),
    }
}

#[test]
fn test_close_rejects_commercial() {
    let department = Department::new("logistica").unwrap();
    let result = AuthorizationService::authorize_close(&create_test_commercial(), &department);
    assert!(result.is_err());
}

#[test]
fn test_ledger_write_open_to_all_staff_roles() {
    assert!(
        AuthorizationService::authorize_ledger_write(&create_test_admin(), "create assignment")
            .is_ok()
    );
    assert!(
        AuthorizationService::authorize_ledger_write(&create_test_direction(), "create assignment")
            .is_ok()
    );
    assert!(
        AuthorizationService::authorize_ledger_write(
            &create_test_head("logistica"),
            "accept assignment"
        )
        .is_ok()
    );
    assert!(
        AuthorizationService::authorize_ledger_write(
            &create_test_worker("logistica"),
            "accept assignment"
        )
        .is_ok()
    );
}

#[test]
fn test_ledger_write_rejects_commercial_and_unknown() {
    let result = AuthorizationService::authorize_ledger_write(
        &create_test_commercial(),
        "create assignment",
    );
    match result.unwrap_err() {
        AuthError::Unauthorized {
            action,
            required_role,
        } => {
            assert_eq!(action, "create assignment");
            assert_eq!(required_role, "admin, direction, department-head, or worker");
        }
        other => panic!("Expected Unauthorized error, got: {other:?}"),
    }

    let unknown = create_test_unknown(None);
    assert!(AuthorizationService::authorize_ledger_write(&unknown, "create assignment").is_err());
}

#[test]
fn test_create_operator_requires_admin() {
    assert!(AuthorizationService::authorize_create_operator(&create_test_admin()).is_ok());

    let result = AuthorizationService::authorize_create_operator(&create_test_direction());
    match result.unwrap_err() {
        AuthError::Unauthorized { required_role, .. } => {
            assert_eq!(required_role, "admin");
        }
        other => panic!("Expected Unauthorized error, got: {other:?}"),
    }
}

#[test]
fn test_event_create_requires_admin_or_direction() {
    assert!(AuthorizationService::authorize_event_create(&create_test_admin()).is_ok());
    assert!(AuthorizationService::authorize_event_create(&create_test_direction()).is_ok());
    assert!(AuthorizationService::authorize_event_create(&create_test_head("logistica")).is_err());
    assert!(AuthorizationService::authorize_event_create(&create_test_worker("cuina")).is_err());
}
