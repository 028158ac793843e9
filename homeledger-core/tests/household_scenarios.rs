//! End-to-end household scenarios
//!
//! Each test walks one story through the public API the way a front end
//! would: decide, apply, keep the returned entity as the new snapshot.
//!
//! Run with: cargo test --test household_scenarios -- --nocapture

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use homeledger_core::adapters::DigestCredentialStore;
use homeledger_core::ports::CredentialStore;
use homeledger_core::services::{
    authorize, filter_visibility, AccountService, Action, CredentialChange, Decision, DenialReason,
    NewAccount, Registration,
};
use homeledger_core::{Account, AccountStatus, Error, FinancialRecord, RecordKind, Role};

// ============================================================================
// Test Helpers
// ============================================================================

fn service() -> AccountService {
    AccountService::new(Arc::new(DigestCredentialStore::new()))
}

/// A super admin plus one administrator, as a fresh install would have
fn seeded(svc: &AccountService) -> (Account, Account) {
    let root = svc
        .bootstrap_super_admin(NewAccount::new("root", Role::SuperAdmin, "root-pw"), &[])
        .expect("bootstrap");
    let admin = svc
        .create_account(&root, NewAccount::new("carla", Role::Admin, "admin-pw"))
        .expect("super admin creates admin");
    (root, admin)
}

fn expense(owner: &Account, cents: i64, description: &str) -> FinancialRecord {
    FinancialRecord::new(
        owner.id,
        RecordKind::Expense,
        Decimal::new(cents, 2),
        description,
        NaiveDate::from_ymd_opt(2025, 6, 12).unwrap(),
    )
    .with_category("Groceries")
}

// ============================================================================
// Account creation
// ============================================================================

#[test]
fn test_super_admin_creates_admin_but_admin_cannot() {
    let svc = service();
    let (_root, admin) = seeded(&svc);

    assert_eq!(admin.role, Role::Admin);
    assert_eq!(admin.status, AccountStatus::Approved);

    let err = svc
        .create_account(&admin, NewAccount::new("dora", Role::Admin, "pw"))
        .unwrap_err();
    assert!(
        matches!(err, Error::InsufficientPrivilege(_)),
        "only a super admin may create administrators, got {:?}",
        err
    );
}

#[test]
fn test_family_bootstrap_through_admin_and_manager() {
    let svc = service();
    let (_root, admin) = seeded(&svc);

    let manager = svc
        .create_account(&admin, NewAccount::new("rita", Role::Manager, "pw").in_family("silva"))
        .unwrap();
    let kid = svc
        .create_account(&manager, NewAccount::new("ana", Role::Member, "pw").named("Ana"))
        .unwrap();

    assert_eq!(kid.family_id, manager.family_id);
    assert_eq!(kid.created_by, Some(manager.id));
    assert_eq!(kid.name, "Ana");
    assert!(kid.is_active());
}

// ============================================================================
// Review lifecycle
// ============================================================================

#[test]
fn test_registration_review_flow() {
    let svc = service();
    let (_root, admin) = seeded(&svc);

    let pending = svc
        .register(Registration {
            account: NewAccount::new("joao", Role::Member, "pw").in_family("souza"),
            allow_parent_view: false,
        })
        .unwrap();
    assert_eq!(pending.status, AccountStatus::Pending);
    assert_eq!(
        svc.sign_in(&pending, "pw"),
        Err(Error::AccountNotActive(AccountStatus::Pending))
    );

    let roster = vec![admin.clone(), pending.clone()];
    let queue = svc.pending_accounts(&admin, &roster);
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].id, pending.id);

    let approved = svc.request_approval(&admin, &pending).unwrap();
    assert!(svc.sign_in(&approved, "pw").is_ok());
}

#[test]
fn test_rejected_account_stays_rejected() {
    let svc = service();
    let (_root, admin) = seeded(&svc);

    let pending = svc
        .register(Registration {
            account: NewAccount::new("eve", Role::Manager, "pw").in_family("lima"),
            allow_parent_view: false,
        })
        .unwrap();

    let rejected = svc.request_rejection(&admin, &pending).unwrap();
    assert_eq!(rejected.status, AccountStatus::Rejected);

    let err = svc.request_approval(&admin, &rejected).unwrap_err();
    assert_eq!(
        err,
        Error::InvalidTransition {
            from: AccountStatus::Rejected,
            to: AccountStatus::Approved,
        }
    );
    // Rejecting again is not a silent no-op either
    assert!(svc.request_rejection(&admin, &rejected).is_err());
}

// ============================================================================
// Password reset
// ============================================================================

#[test]
fn test_manager_resets_members_of_own_family_only() {
    let svc = service();
    let (_root, admin) = seeded(&svc);
    let store = DigestCredentialStore::new();

    let m1 = svc
        .create_account(&admin, NewAccount::new("rita", Role::Manager, "pw").in_family("F1"))
        .unwrap();
    let m2 = svc
        .create_account(&admin, NewAccount::new("ana", Role::Member, "pw").in_family("F1"))
        .unwrap();
    let m3 = svc
        .create_account(&admin, NewAccount::new("joao", Role::Member, "pw").in_family("F2"))
        .unwrap();

    let reset = svc.reset_credential(&m1, &m2, "temporary").unwrap();
    assert!(store.verify(&reset.credential, "temporary"));

    assert_eq!(
        authorize(&m1, &m3, Action::ResetPassword).unwrap(),
        Decision::Denied(DenialReason::OutsideFamily)
    );
    assert!(matches!(
        svc.reset_credential(&m1, &m3, "temporary"),
        Err(Error::InsufficientPrivilege(_))
    ));

    // Administrators leave member resets to the manager
    assert_eq!(
        authorize(&admin, &m2, Action::ResetPassword).unwrap(),
        Decision::Denied(DenialReason::ResetDelegatedToManager)
    );
    assert!(authorize(&admin, &m1, Action::ResetPassword)
        .unwrap()
        .is_allowed());
}

#[test]
fn test_own_credential_change_is_self_service() {
    let svc = service();
    let (root, _admin) = seeded(&svc);
    let store = DigestCredentialStore::new();

    // Forced reset on oneself is refused...
    assert_eq!(
        authorize(&root, &root, Action::ResetPassword).unwrap(),
        Decision::Denied(DenialReason::SelfResetForbidden)
    );

    // ...but the credential change path works
    let changed = svc
        .change_own_credential(
            &root,
            CredentialChange {
                current: "root-pw".to_string(),
                new: "root-pw-2".to_string(),
                confirmation: Some("root-pw-2".to_string()),
                challenge: None,
            },
        )
        .unwrap();
    assert!(store.verify(&changed.credential, "root-pw-2"));
    assert!(svc.sign_in(&changed, "root-pw").is_err());
}

// ============================================================================
// Deletion
// ============================================================================

#[test]
fn test_nobody_deletes_themselves() {
    let svc = service();
    let (root, admin) = seeded(&svc);

    assert_eq!(svc.delete_account(&root, &root), Err(Error::SelfDeletionForbidden));
    assert_eq!(svc.delete_account(&admin, &admin), Err(Error::SelfDeletionForbidden));

    let deletion = svc.delete_account(&root, &admin).unwrap();
    assert_eq!(deletion.account_id, admin.id);
    assert_eq!(deletion.username, "carla");
}

// ============================================================================
// Visibility and masking
// ============================================================================

#[test]
fn test_consent_flip_unmasks_member_records() {
    let svc = service();
    let (_root, admin) = seeded(&svc);

    let manager = svc
        .create_account(&admin, NewAccount::new("rita", Role::Manager, "pw").in_family("silva"))
        .unwrap();
    let kid = svc
        .create_account(&manager, NewAccount::new("ana", Role::Member, "pw"))
        .unwrap();
    assert!(!kid.allow_parent_view);

    let records = vec![expense(&kid, 12_345, "Concert tickets")];
    let roster = vec![admin.clone(), manager.clone(), kid.clone()];

    let view = filter_visibility(&records, &manager, &roster).unwrap();
    assert_eq!(view.records.len(), 1);
    assert!(view.records[0].is_masked);
    assert_eq!(view.records[0].record.amount, Decimal::ZERO);
    assert_eq!(view.records[0].record.description, "Concert tickets");
    assert!(view.summary().any_masked);
    assert_eq!(view.summary().total_expense, Decimal::ZERO);

    let consenting = svc.set_parent_view_consent(&kid, true).unwrap();
    let roster = vec![admin, manager.clone(), consenting];

    let view = filter_visibility(&records, &manager, &roster).unwrap();
    assert!(!view.records[0].is_masked);
    assert_eq!(view.records[0].record.amount, Decimal::new(12_345, 2));
    assert_eq!(view.summary().total_expense, Decimal::new(12_345, 2));
    assert!(!view.summary().any_masked);
}

#[test]
fn test_demoted_manager_loses_visibility_immediately() {
    let svc = service();
    let (_root, admin) = seeded(&svc);

    let manager = svc
        .create_account(&admin, NewAccount::new("rita", Role::Manager, "pw").in_family("silva"))
        .unwrap();
    let kid = svc
        .create_account(&manager, NewAccount::new("ana", Role::Member, "pw"))
        .unwrap();
    let kid = svc.set_parent_view_consent(&kid, true).unwrap();
    assert!(authorize(&manager, &kid, Action::ViewFinancials)
        .unwrap()
        .is_allowed());

    let demoted = svc
        .update_account(
            &admin,
            &manager,
            homeledger_core::services::AccountUpdate {
                role: Some(Role::Member),
                ..Default::default()
            },
        )
        .unwrap();

    // The next decision uses the new snapshot, no stale privilege
    assert_eq!(
        authorize(&demoted, &kid, Action::ViewFinancials).unwrap(),
        Decision::Denied(DenialReason::NotVisible)
    );
    assert!(matches!(
        svc.reset_credential(&demoted, &kid, "x"),
        Err(Error::InsufficientPrivilege(_))
    ));
}
