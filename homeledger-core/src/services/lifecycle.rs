//! Account lifecycle service - creation, review, edits and credentials
//!
//! Every operation takes caller-supplied snapshots and returns the resulting
//! entity. Nothing is persisted here; the caller stores what comes back.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::result::{Error, Result};
use crate::domain::{Account, AccountStatus, FamilyId, RecoveryChallenge, Role};
use crate::ports::CredentialStore;

use super::permission::{authorize, Action};

/// Fields for a new account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub family_id: Option<FamilyId>,
    /// Initial secret, sealed before it reaches the account
    pub secret: String,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

impl NewAccount {
    pub fn new(username: impl Into<String>, role: Role, secret: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            name: None,
            role,
            family_id: None,
            secret: secret.into(),
            birth_date: None,
        }
    }

    pub fn in_family(mut self, family_id: impl Into<FamilyId>) -> Self {
        self.family_id = Some(family_id.into());
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Self-registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    #[serde(flatten)]
    pub account: NewAccount,
    #[serde(default)]
    pub allow_parent_view: bool,
}

/// Editable account fields; `None` leaves a field untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdate {
    pub name: Option<String>,
    pub username: Option<String>,
    pub role: Option<Role>,
    pub birth_date: Option<NaiveDate>,
    pub allow_parent_view: Option<bool>,
}

/// Self-service credential change
#[derive(Debug, Clone)]
pub struct CredentialChange {
    pub current: String,
    pub new: String,
    /// Second copy of `new`, when the form asked for one
    pub confirmation: Option<String>,
    pub challenge: Option<ChallengeInput>,
}

/// Raw recovery question and answer
#[derive(Debug, Clone)]
pub struct ChallengeInput {
    pub question: String,
    pub answer: String,
}

/// Result of a successful deletion; the caller removes the account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deletion {
    pub account_id: Uuid,
    pub username: String,
}

/// Account lifecycle service
pub struct AccountService {
    credentials: Arc<dyn CredentialStore>,
}

impl AccountService {
    pub fn new(credentials: Arc<dyn CredentialStore>) -> Self {
        Self { credentials }
    }

    /// Seed the first super admin of an empty installation
    pub fn bootstrap_super_admin(&self, fields: NewAccount, roster: &[Account]) -> Result<Account> {
        if roster.iter().any(|a| a.role.is_super_admin()) {
            return Err(Error::invalid_request("a super admin already exists"));
        }
        if fields.role != Role::SuperAdmin {
            return Err(Error::invalid_request("bootstrap creates a super admin only"));
        }

        let mut account = self.build(fields)?;
        account.status = AccountStatus::Approved;
        account.created_by = Some(account.id);
        account.validate()?;
        Ok(account)
    }

    /// Self-registration. The new account waits for administrator review.
    pub fn register(&self, registration: Registration) -> Result<Account> {
        let role = registration.account.role;
        if !role.is_family_scoped() {
            return Err(Error::forbidden_role(format!(
                "self-registration cannot request {}",
                role
            )));
        }

        let mut account = self.build(registration.account)?;
        account.allow_parent_view = registration.allow_parent_view;
        account.created_by = Some(account.id);
        account.validate()?;
        Ok(account)
    }

    /// Create an account on behalf of `actor`; it is approved immediately.
    pub fn create_account(&self, actor: &Account, mut fields: NewAccount) -> Result<Account> {
        ensure_active(actor)?;
        actor.validate()?;

        if fields.role.is_super_admin() {
            return Err(Error::forbidden_role("super admins cannot be created"));
        }
        if fields.role == Role::Admin && !actor.role.is_super_admin() {
            return Err(Error::insufficient_privilege(
                "only a super admin may create administrators",
            ));
        }

        if actor.role.is_member() {
            return Err(Error::insufficient_privilege("members cannot create accounts"));
        }
        // Administrators supply role and family together; validate() catches mismatches
        if actor.role.is_manager() {
            if fields.role != Role::Member {
                return Err(Error::forbidden_role(format!(
                    "managers may only create members, not {}",
                    fields.role
                )));
            }
            if fields.family_id.is_some() && fields.family_id != actor.family_id {
                return Err(Error::insufficient_privilege(
                    "managers create accounts inside their own family only",
                ));
            }
            fields.family_id = actor.family_id.clone();
        }

        let mut account = self.build(fields)?;
        account.status = AccountStatus::Approved;
        account.created_by = Some(actor.id);
        account.validate()?;
        Ok(account)
    }

    /// Edit another account (or oneself) within the actor's edit rights
    pub fn update_account(
        &self,
        actor: &Account,
        target: &Account,
        update: AccountUpdate,
    ) -> Result<Account> {
        ensure_active(actor)?;
        authorize(actor, target, Action::EditUser)?.into_result()?;

        let mut updated = target.clone();

        if let Some(role) = update.role {
            if role != target.role {
                check_role_change(actor, target, role)?;
                updated.role = role;
            }
        }

        if let Some(consent) = update.allow_parent_view {
            if consent != target.allow_parent_view && actor.id != target.id {
                return Err(Error::insufficient_privilege(
                    "only the account owner may change financial visibility consent",
                ));
            }
            updated.allow_parent_view = consent;
        }

        if let Some(name) = update.name {
            updated.name = non_blank(name, "name")?;
        }
        if let Some(username) = update.username {
            updated.username = non_blank(username, "username")?;
        }
        if update.birth_date.is_some() {
            updated.birth_date = update.birth_date;
        }

        updated.validate()?;
        updated.touch();
        Ok(updated)
    }

    /// Authorize removal of `target`. The caller deletes the returned id.
    pub fn delete_account(&self, actor: &Account, target: &Account) -> Result<Deletion> {
        if actor.id == target.id {
            return Err(Error::SelfDeletionForbidden);
        }
        ensure_active(actor)?;
        authorize(actor, target, Action::DeleteUser)?.into_result()?;

        Ok(Deletion {
            account_id: target.id,
            username: target.username.clone(),
        })
    }

    /// Approve a pending account
    pub fn request_approval(&self, actor: &Account, account: &Account) -> Result<Account> {
        self.review(actor, account, AccountStatus::Approved)
    }

    /// Reject a pending account
    pub fn request_rejection(&self, actor: &Account, account: &Account) -> Result<Account> {
        self.review(actor, account, AccountStatus::Rejected)
    }

    /// Pending accounts awaiting review, visible to administrators only
    pub fn pending_accounts<'a>(&self, actor: &Account, roster: &'a [Account]) -> Vec<&'a Account> {
        if !actor.role.is_admin() {
            return Vec::new();
        }
        roster
            .iter()
            .filter(|a| a.status == AccountStatus::Pending)
            .collect()
    }

    /// Force a new credential onto `target`
    pub fn reset_credential(
        &self,
        actor: &Account,
        target: &Account,
        new_secret: &str,
    ) -> Result<Account> {
        ensure_active(actor)?;
        authorize(actor, target, Action::ResetPassword)?.into_result()?;
        ensure_secret(new_secret, "new credential")?;

        let mut updated = target.clone();
        updated.credential = self.credentials.seal(new_secret);
        updated.touch();
        Ok(updated)
    }

    /// Self-service credential change. Never consults the reset rules.
    pub fn change_own_credential(
        &self,
        actor: &Account,
        change: CredentialChange,
    ) -> Result<Account> {
        if !self.credentials.verify(&actor.credential, &change.current) {
            return Err(Error::CredentialMismatch);
        }
        if let Some(confirmation) = &change.confirmation {
            if confirmation != &change.new {
                return Err(Error::ConfirmationMismatch);
            }
        }
        ensure_secret(&change.new, "new credential")?;

        let mut updated = actor.clone();
        updated.credential = self.credentials.seal(&change.new);

        if let Some(challenge) = change.challenge {
            if !challenge.question.trim().is_empty() && !challenge.answer.trim().is_empty() {
                updated.recovery_challenge = Some(RecoveryChallenge {
                    question: challenge.question.trim().to_string(),
                    answer: self.credentials.seal(&normalize_answer(&challenge.answer)),
                });
            }
        }

        updated.touch();
        Ok(updated)
    }

    /// Replace a forgotten credential by answering the recovery question
    pub fn recover_credential(
        &self,
        account: &Account,
        answer: &str,
        new_secret: &str,
    ) -> Result<Account> {
        let challenge = account
            .recovery_challenge
            .as_ref()
            .ok_or_else(|| Error::invalid_request("no recovery question is set"))?;
        if !self.credentials.verify(&challenge.answer, &normalize_answer(answer)) {
            return Err(Error::CredentialMismatch);
        }
        ensure_secret(new_secret, "new credential")?;

        let mut updated = account.clone();
        updated.credential = self.credentials.seal(new_secret);
        updated.touch();
        Ok(updated)
    }

    /// Toggle whether the family manager may see the actor's figures
    pub fn set_parent_view_consent(&self, actor: &Account, consent: bool) -> Result<Account> {
        if !actor.role.is_family_scoped() {
            return Err(Error::invalid_request(
                "visibility consent applies to family accounts only",
            ));
        }
        let mut updated = actor.clone();
        updated.allow_parent_view = consent;
        updated.touch();
        Ok(updated)
    }

    /// Check a sign-in attempt
    pub fn sign_in(&self, account: &Account, secret: &str) -> Result<()> {
        if !self.credentials.verify(&account.credential, secret) {
            return Err(Error::CredentialMismatch);
        }
        ensure_active(account)
    }

    fn review(&self, actor: &Account, account: &Account, next: AccountStatus) -> Result<Account> {
        ensure_active(actor)?;
        if !actor.role.is_admin() {
            return Err(Error::insufficient_privilege(
                "only administrators review registrations",
            ));
        }
        if !account.status.can_transition_to(next) {
            return Err(Error::InvalidTransition {
                from: account.status,
                to: next,
            });
        }

        let mut reviewed = account.clone();
        reviewed.status = next;
        reviewed.touch();
        Ok(reviewed)
    }

    fn build(&self, fields: NewAccount) -> Result<Account> {
        let username = non_blank(fields.username, "username")?;
        ensure_secret(&fields.secret, "credential")?;

        let mut account = Account::new(username, fields.role, fields.family_id);
        if let Some(name) = fields.name {
            account.name = non_blank(name, "name")?;
        }
        account.birth_date = fields.birth_date;
        account.credential = self.credentials.seal(&fields.secret);
        Ok(account)
    }
}

fn ensure_active(actor: &Account) -> Result<()> {
    if actor.is_active() {
        Ok(())
    } else {
        Err(Error::AccountNotActive(actor.status))
    }
}

fn check_role_change(actor: &Account, target: &Account, role: Role) -> Result<()> {
    if actor.id == target.id {
        return Err(Error::forbidden_role("an account cannot change its own role"));
    }
    if role.is_super_admin() {
        return Err(Error::forbidden_role("super admin cannot be assigned"));
    }
    if target.role.outranks(actor.role) {
        return Err(Error::forbidden_role(format!(
            "{} cannot change the role of a {}",
            actor.role, target.role
        )));
    }
    if role.outranks(actor.role) || (role == Role::Admin && !actor.role.is_super_admin()) {
        return Err(Error::forbidden_role(format!(
            "{} cannot assign {}",
            actor.role, role
        )));
    }
    // family_id is fixed, so a role change may not cross the family boundary
    if role.is_family_scoped() != target.role.is_family_scoped() {
        return Err(Error::forbidden_role(format!(
            "cannot move {} from {} to {}",
            target.username, target.role, role
        )));
    }
    Ok(())
}

fn non_blank(value: String, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(Error::invalid_request(format!("{} cannot be empty", field)))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Secrets are sealed exactly as typed; blank ones are refused
fn ensure_secret(secret: &str, field: &str) -> Result<()> {
    if secret.trim().is_empty() {
        return Err(Error::invalid_request(format!("{} cannot be empty", field)));
    }
    Ok(())
}

fn normalize_answer(answer: &str) -> String {
    answer.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::DigestCredentialStore;

    fn service() -> AccountService {
        AccountService::new(Arc::new(DigestCredentialStore::new()))
    }

    fn active(username: &str, role: Role, family: Option<&str>) -> Account {
        let mut account = Account::new(username, role, family.map(FamilyId::from));
        account.status = AccountStatus::Approved;
        account.credential = DigestCredentialStore::new().seal("secret");
        account
    }

    #[test]
    fn test_super_admin_creates_admin() {
        let root = active("root", Role::SuperAdmin, None);
        let admin = service()
            .create_account(&root, NewAccount::new("carla", Role::Admin, "pw"))
            .unwrap();

        assert_eq!(admin.role, Role::Admin);
        assert_eq!(admin.status, AccountStatus::Approved);
        assert_eq!(admin.created_by, Some(root.id));
        assert!(admin.family_id.is_none());
    }

    #[test]
    fn test_admin_cannot_create_admin() {
        let admin = active("carla", Role::Admin, None);
        let err = service()
            .create_account(&admin, NewAccount::new("dora", Role::Admin, "pw"))
            .unwrap_err();
        assert!(matches!(err, Error::InsufficientPrivilege(_)));
    }

    #[test]
    fn test_nobody_creates_super_admin() {
        let root = active("root", Role::SuperAdmin, None);
        let err = service()
            .create_account(&root, NewAccount::new("root2", Role::SuperAdmin, "pw"))
            .unwrap_err();
        assert!(matches!(err, Error::ForbiddenRoleAssignment(_)));
    }

    #[test]
    fn test_manager_creation_is_forced_into_family() {
        let manager = active("rita", Role::Manager, Some("silva"));
        let kid = service()
            .create_account(&manager, NewAccount::new("ana", Role::Member, "pw"))
            .unwrap();
        assert_eq!(kid.family_id, Some(FamilyId::from("silva")));

        let err = service()
            .create_account(&manager, NewAccount::new("rui", Role::Manager, "pw"))
            .unwrap_err();
        assert!(matches!(err, Error::ForbiddenRoleAssignment(_)));

        let err = service()
            .create_account(
                &manager,
                NewAccount::new("joao", Role::Member, "pw").in_family("souza"),
            )
            .unwrap_err();
        assert!(matches!(err, Error::InsufficientPrivilege(_)));
    }

    #[test]
    fn test_admin_member_creation_needs_family() {
        let admin = active("carla", Role::Admin, None);
        let err = service()
            .create_account(&admin, NewAccount::new("ana", Role::Member, "pw"))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));

        let manager = service()
            .create_account(&admin, NewAccount::new("rita", Role::Manager, "pw").in_family("silva"))
            .unwrap();
        assert_eq!(manager.role, Role::Manager);
    }

    #[test]
    fn test_member_cannot_create() {
        let kid = active("ana", Role::Member, Some("silva"));
        let err = service()
            .create_account(&kid, NewAccount::new("bia", Role::Member, "pw"))
            .unwrap_err();
        assert!(matches!(err, Error::InsufficientPrivilege(_)));
    }

    #[test]
    fn test_registration_is_pending() {
        let account = service()
            .register(Registration {
                account: NewAccount::new("ana", Role::Member, "pw").in_family("silva"),
                allow_parent_view: true,
            })
            .unwrap();
        assert_eq!(account.status, AccountStatus::Pending);
        assert_eq!(account.created_by, Some(account.id));
        assert!(account.allow_parent_view);

        let err = service()
            .register(Registration {
                account: NewAccount::new("eve", Role::Admin, "pw"),
                allow_parent_view: false,
            })
            .unwrap_err();
        assert!(matches!(err, Error::ForbiddenRoleAssignment(_)));
    }

    #[test]
    fn test_rejected_account_cannot_be_approved() {
        let admin = active("carla", Role::Admin, None);
        let pending = Account::new("ana", Role::Member, Some(FamilyId::from("silva")));

        let rejected = service().request_rejection(&admin, &pending).unwrap();
        assert_eq!(rejected.status, AccountStatus::Rejected);

        let err = service().request_approval(&admin, &rejected).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidTransition {
                from: AccountStatus::Rejected,
                to: AccountStatus::Approved
            }
        );
    }

    #[test]
    fn test_managers_cannot_review() {
        let manager = active("rita", Role::Manager, Some("silva"));
        let pending = Account::new("ana", Role::Member, Some(FamilyId::from("silva")));
        let err = service().request_approval(&manager, &pending).unwrap_err();
        assert!(matches!(err, Error::InsufficientPrivilege(_)));
    }

    #[test]
    fn test_pending_accounts_for_admins_only() {
        let admin = active("carla", Role::Admin, None);
        let manager = active("rita", Role::Manager, Some("silva"));
        let roster = vec![
            admin.clone(),
            manager.clone(),
            Account::new("ana", Role::Member, Some(FamilyId::from("silva"))),
        ];

        assert_eq!(service().pending_accounts(&admin, &roster).len(), 1);
        assert!(service().pending_accounts(&manager, &roster).is_empty());
    }

    #[test]
    fn test_role_escalation_rules() {
        let root = active("root", Role::SuperAdmin, None);
        let admin = active("carla", Role::Admin, None);
        let manager = active("rita", Role::Manager, Some("silva"));
        let kid = active("ana", Role::Member, Some("silva"));
        let svc = service();

        let promote = |role| AccountUpdate {
            role: Some(role),
            ..Default::default()
        };

        // Within the family boundary, up to the actor's own level
        let promoted = svc
            .update_account(&manager, &kid, promote(Role::Manager))
            .unwrap();
        assert_eq!(promoted.role, Role::Manager);
        // ...although a manager still cannot create another manager outright
        assert!(matches!(
            svc.create_account(&manager, NewAccount::new("joao", Role::Manager, "pw")),
            Err(Error::ForbiddenRoleAssignment(_))
        ));

        assert!(matches!(
            svc.update_account(&manager, &kid, promote(Role::Admin)),
            Err(Error::ForbiddenRoleAssignment(_))
        ));
        assert!(matches!(
            svc.update_account(&admin, &kid, promote(Role::Admin)),
            Err(Error::ForbiddenRoleAssignment(_))
        ));
        assert!(matches!(
            svc.update_account(&root, &admin, promote(Role::SuperAdmin)),
            Err(Error::ForbiddenRoleAssignment(_))
        ));
        assert!(matches!(
            svc.update_account(&admin, &root, promote(Role::Admin)),
            Err(Error::ForbiddenRoleAssignment(_))
        ));
        assert!(matches!(
            svc.update_account(&manager, &manager, promote(Role::Member)),
            Err(Error::ForbiddenRoleAssignment(_))
        ));
    }

    #[test]
    fn test_consent_changes_only_by_owner() {
        let manager = active("rita", Role::Manager, Some("silva"));
        let kid = active("ana", Role::Member, Some("silva"));
        let svc = service();

        let err = svc
            .update_account(
                &manager,
                &kid,
                AccountUpdate {
                    allow_parent_view: Some(true),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, Error::InsufficientPrivilege(_)));

        let consenting = svc.set_parent_view_consent(&kid, true).unwrap();
        assert!(consenting.allow_parent_view);
    }

    #[test]
    fn test_update_keeps_family() {
        let manager = active("rita", Role::Manager, Some("silva"));
        let kid = active("ana", Role::Member, Some("silva"));
        let renamed = service()
            .update_account(
                &manager,
                &kid,
                AccountUpdate {
                    name: Some("Ana Silva".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(renamed.name, "Ana Silva");
        assert_eq!(renamed.family_id, kid.family_id);
        assert_eq!(renamed.id, kid.id);
    }

    #[test]
    fn test_delete_rules() {
        let admin = active("carla", Role::Admin, None);
        let kid = active("ana", Role::Member, Some("silva"));
        let svc = service();

        assert_eq!(svc.delete_account(&admin, &admin), Err(Error::SelfDeletionForbidden));
        let deletion = svc.delete_account(&admin, &kid).unwrap();
        assert_eq!(deletion.account_id, kid.id);
        assert!(matches!(
            svc.delete_account(&kid, &admin),
            Err(Error::InsufficientPrivilege(_))
        ));
    }

    #[test]
    fn test_reset_credential() {
        let manager = active("rita", Role::Manager, Some("silva"));
        let kid = active("ana", Role::Member, Some("silva"));
        let store = DigestCredentialStore::new();
        let svc = service();

        let reset = svc.reset_credential(&manager, &kid, "fresh").unwrap();
        assert!(store.verify(&reset.credential, "fresh"));
        assert!(!store.verify(&reset.credential, "secret"));

        assert!(matches!(
            svc.reset_credential(&manager, &manager, "fresh"),
            Err(Error::InsufficientPrivilege(_))
        ));
    }

    #[test]
    fn test_change_own_credential() {
        let kid = active("ana", Role::Member, Some("silva"));
        let store = DigestCredentialStore::new();
        let svc = service();

        let wrong_current = CredentialChange {
            current: "guess".to_string(),
            new: "next".to_string(),
            confirmation: None,
            challenge: None,
        };
        assert_eq!(
            svc.change_own_credential(&kid, wrong_current).unwrap_err(),
            Error::CredentialMismatch
        );

        let bad_confirmation = CredentialChange {
            current: "secret".to_string(),
            new: "next".to_string(),
            confirmation: Some("nxet".to_string()),
            challenge: None,
        };
        assert_eq!(
            svc.change_own_credential(&kid, bad_confirmation).unwrap_err(),
            Error::ConfirmationMismatch
        );

        let changed = svc
            .change_own_credential(
                &kid,
                CredentialChange {
                    current: "secret".to_string(),
                    new: "next".to_string(),
                    confirmation: Some("next".to_string()),
                    challenge: Some(ChallengeInput {
                        question: "First pet?".to_string(),
                        answer: " Rex ".to_string(),
                    }),
                },
            )
            .unwrap();
        assert!(store.verify(&changed.credential, "next"));
        assert_eq!(changed.recovery_challenge.as_ref().unwrap().question, "First pet?");

        let recovered = svc.recover_credential(&changed, "rex", "third").unwrap();
        assert!(store.verify(&recovered.credential, "third"));
        assert_eq!(
            svc.recover_credential(&changed, "fido", "third").unwrap_err(),
            Error::CredentialMismatch
        );
    }

    #[test]
    fn test_sign_in_requires_approval() {
        let svc = service();
        let mut pending = Account::new("ana", Role::Member, Some(FamilyId::from("silva")));
        pending.credential = DigestCredentialStore::new().seal("pw");

        assert_eq!(svc.sign_in(&pending, "nope"), Err(Error::CredentialMismatch));
        assert_eq!(
            svc.sign_in(&pending, "pw"),
            Err(Error::AccountNotActive(AccountStatus::Pending))
        );

        pending.status = AccountStatus::Approved;
        assert!(svc.sign_in(&pending, "pw").is_ok());
    }

    #[test]
    fn test_secrets_are_sealed_as_typed() {
        let svc = service();
        let root = svc
            .bootstrap_super_admin(NewAccount::new("root", Role::SuperAdmin, " pass phrase "), &[])
            .unwrap();
        assert!(svc.sign_in(&root, " pass phrase ").is_ok());
        assert_eq!(svc.sign_in(&root, "pass phrase"), Err(Error::CredentialMismatch));

        let changed = svc
            .change_own_credential(
                &root,
                CredentialChange {
                    current: " pass phrase ".to_string(),
                    new: "new ".to_string(),
                    confirmation: Some("new ".to_string()),
                    challenge: None,
                },
            )
            .unwrap();
        assert!(svc.sign_in(&changed, "new ").is_ok());
        assert_eq!(svc.sign_in(&changed, "new"), Err(Error::CredentialMismatch));

        let manager = active("rita", Role::Manager, Some("silva"));
        let kid = active("ana", Role::Member, Some("silva"));
        let reset = svc.reset_credential(&manager, &kid, "  tab\t").unwrap();
        assert!(svc.sign_in(&reset, "  tab\t").is_ok());

        assert!(matches!(
            svc.reset_credential(&manager, &kid, "   "),
            Err(Error::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_bootstrap_only_once() {
        let svc = service();
        let root = svc
            .bootstrap_super_admin(NewAccount::new("root", Role::SuperAdmin, "pw"), &[])
            .unwrap();
        assert!(root.is_active());

        let err = svc
            .bootstrap_super_admin(NewAccount::new("root2", Role::SuperAdmin, "pw"), &[root])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }
}
