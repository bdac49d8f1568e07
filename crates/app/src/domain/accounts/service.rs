//! Accounts service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::accounts::{
        errors::AccountsServiceError,
        models::{Address, NewAddress, NewUser, User, UserId, UserKind},
        repository::PgAccountsRepository,
    },
    notifications::{Notification, Notifier},
};

#[derive(Clone)]
pub struct PgAccountsService {
    db: Db,
    repository: PgAccountsRepository,
    notifier: Arc<dyn Notifier>,
    admin_email: String,
}

impl PgAccountsService {
    #[must_use]
    pub fn new(db: Db, notifier: Arc<dyn Notifier>, admin_email: String) -> Self {
        Self {
            db,
            repository: PgAccountsRepository::new(),
            notifier,
            admin_email,
        }
    }
}

#[async_trait]
impl AccountsService for PgAccountsService {
    async fn register_user(&self, user: NewUser) -> Result<User, AccountsServiceError> {
        if !email_is_valid(&user.email) {
            return Err(AccountsServiceError::InvalidEmail);
        }

        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_user(&mut tx, &user).await?;

        tx.commit().await?;

        self.notifier.notify(Notification {
            title: "Registration successful".to_string(),
            body: "Your Tradepost account is ready.".to_string(),
            recipients: vec![created.email.clone()],
        });

        if created.kind == UserKind::Shop {
            self.notifier.notify(Notification {
                title: "New partner registered".to_string(),
                body: format!("Partner account {} awaits review.", created.email),
                recipients: vec![self.admin_email.clone()],
            });
        }

        Ok(created)
    }

    async fn create_address(
        &self,
        user: UserId,
        address: NewAddress,
    ) -> Result<Address, AccountsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_address(&mut tx, user, &address)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn list_addresses(&self, user: UserId) -> Result<Vec<Address>, AccountsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let addresses = self.repository.list_addresses(&mut tx, user).await?;

        tx.commit().await?;

        Ok(addresses)
    }
}

#[automock]
#[async_trait]
pub trait AccountsService: Send + Sync {
    /// Register a new account. Partner registrations are announced to the
    /// platform admin.
    async fn register_user(&self, user: NewUser) -> Result<User, AccountsServiceError>;

    /// Add a contact address to the user's address book.
    async fn create_address(
        &self,
        user: UserId,
        address: NewAddress,
    ) -> Result<Address, AccountsServiceError>;

    /// List the user's contact addresses.
    async fn list_addresses(&self, user: UserId) -> Result<Vec<Address>, AccountsServiceError>;
}

/// Minimal shape check: one `@` with non-empty local and domain parts and no
/// whitespace. Deliverability is the mail system's problem.
fn email_is_valid(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{
        TestContext,
        helpers::{new_address, new_user, register_buyer, register_partner},
    };

    use super::*;

    #[test]
    fn email_shape_check_accepts_plain_addresses() {
        assert!(email_is_valid("buyer@example.com"), "plain address");
        assert!(email_is_valid("admin@localhost"), "dotless domain");
    }

    #[test]
    fn email_shape_check_rejects_malformed_addresses() {
        assert!(!email_is_valid(""), "empty");
        assert!(!email_is_valid("no-at-sign"), "missing @");
        assert!(!email_is_valid("@example.com"), "empty local part");
        assert!(!email_is_valid("buyer@"), "empty domain");
        assert!(!email_is_valid("a b@example.com"), "whitespace");
        assert!(!email_is_valid("a@b@example.com"), "double @");
    }

    #[tokio::test]
    async fn register_user_returns_profile() -> TestResult {
        let ctx = TestContext::new().await;

        let user = register_buyer(&ctx, "buyer@example.com").await?;

        assert_eq!(user.email, "buyer@example.com");
        assert_eq!(user.kind, UserKind::Buyer);

        Ok(())
    }

    #[tokio::test]
    async fn register_user_duplicate_email_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        register_buyer(&ctx, "buyer@example.com").await?;

        let result = ctx
            .accounts
            .register_user(new_user("buyer@example.com", UserKind::Shop))
            .await;

        assert!(
            matches!(result, Err(AccountsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn register_user_rejects_malformed_email() {
        let ctx = TestContext::new().await;

        let result = ctx
            .accounts
            .register_user(new_user("not-an-email", UserKind::Buyer))
            .await;

        assert!(
            matches!(result, Err(AccountsServiceError::InvalidEmail)),
            "expected InvalidEmail, got {result:?}"
        );
    }

    #[tokio::test]
    async fn register_user_sends_welcome_notification() -> TestResult {
        let ctx = TestContext::new().await;

        register_buyer(&ctx, "buyer@example.com").await?;

        let sent = ctx.sent_notifications();

        assert!(
            sent.iter().any(|n| {
                n.title == "Registration successful"
                    && n.recipients == vec!["buyer@example.com".to_string()]
            }),
            "expected a welcome notification, got {sent:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn partner_registration_notifies_admin() -> TestResult {
        let ctx = TestContext::new().await;

        register_partner(&ctx, "shop@example.com").await?;

        let sent = ctx.sent_notifications();

        assert!(
            sent.iter().any(|n| {
                n.title == "New partner registered"
                    && n.recipients == vec![ctx.admin_email.clone()]
            }),
            "expected an admin notification, got {sent:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn buyer_registration_does_not_notify_admin() -> TestResult {
        let ctx = TestContext::new().await;

        register_buyer(&ctx, "buyer@example.com").await?;

        let sent = ctx.sent_notifications();

        assert!(
            !sent
                .iter()
                .any(|n| n.recipients.contains(&ctx.admin_email)),
            "buyer registration must not reach the admin, got {sent:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_address_then_list_returns_it() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_buyer(&ctx, "buyer@example.com").await?;

        let created = ctx.accounts.create_address(user.id, new_address()).await?;

        assert_eq!(created.user_id, user.id);
        assert_eq!(created.city, "Riga");

        let addresses = ctx.accounts.list_addresses(user.id).await?;

        assert_eq!(addresses, vec![created]);

        Ok(())
    }

    #[tokio::test]
    async fn create_address_unknown_user_returns_invalid_reference() {
        let ctx = TestContext::new().await;

        let result = ctx
            .accounts
            .create_address(UserId::from_i64(4096), new_address())
            .await;

        assert!(
            matches!(result, Err(AccountsServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_addresses_empty_for_new_user() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_buyer(&ctx, "buyer@example.com").await?;

        let addresses = ctx.accounts.list_addresses(user.id).await?;

        assert!(addresses.is_empty());

        Ok(())
    }
}
