//! Credential store: registration, login checks and credential updates.

use std::sync::OnceLock;

use tracing::{info, warn};

use super::password::{hash_password, verify_password, PasswordError};
use super::validation::{validate_email, validate_password, validate_username};
use crate::config::AdminConfig;
use crate::db::{Account, AccountRepository, AccountUpdate, DbPool, NewAccount};
use crate::{Result, SsisError};

/// Message for every failed login, whatever the cause.
pub const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Hash verified when the username is unknown, so both failure paths do the same work.
fn dummy_hash() -> &'static str {
    static DUMMY_HASH: OnceLock<String> = OnceLock::new();
    DUMMY_HASH.get_or_init(|| hash_password("ssis-dummy-password").unwrap_or_default())
}

/// Account operations that involve plaintext credentials.
pub struct CredentialStore<'a> {
    pool: &'a DbPool,
}

impl<'a> CredentialStore<'a> {
    /// Create a credential store over the given pool.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    fn accounts(&self) -> AccountRepository<'a> {
        AccountRepository::new(self.pool)
    }

    /// Register a new account.
    ///
    /// The password is hashed before the account row is written.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<Account> {
        let username = username.trim();
        let email = email.trim();
        validate_username(username)?;
        validate_email(email)?;
        validate_password(password)?;

        let password_hash = hash_password(password)?;
        let account = self
            .accounts()
            .create(&NewAccount::new(username, email, password_hash))
            .await?;

        info!(account_id = account.id, username = %account.username, "Account registered");
        Ok(account)
    }

    /// Check a username and password.
    ///
    /// Unknown usernames and wrong passwords fail identically.
    pub async fn verify(&self, username: &str, password: &str) -> Result<Account> {
        let Some(account) = self.accounts().get_by_username(username.trim()).await? else {
            let _ = verify_password(password, dummy_hash());
            return Err(SsisError::Auth(INVALID_CREDENTIALS.to_string()));
        };

        match verify_password(password, &account.password_hash) {
            Ok(()) => Ok(account),
            Err(PasswordError::InvalidHash) => {
                warn!(account_id = account.id, "Stored password hash is unreadable");
                Err(SsisError::Auth(INVALID_CREDENTIALS.to_string()))
            }
            Err(_) => Err(SsisError::Auth(INVALID_CREDENTIALS.to_string())),
        }
    }

    /// Get an account by ID.
    pub async fn get(&self, account_id: i64) -> Result<Account> {
        self.accounts()
            .get_by_id(account_id)
            .await?
            .ok_or_else(|| SsisError::NotFound("account".to_string()))
    }

    /// Replace an account's username and email, and its password if one is given.
    ///
    /// Without a new password the stored hash is kept unchanged.
    pub async fn update_credentials(
        &self,
        account_id: i64,
        username: &str,
        email: &str,
        password: Option<&str>,
    ) -> Result<Account> {
        let username = username.trim();
        let email = email.trim();
        validate_username(username)?;
        validate_email(email)?;

        let mut update = AccountUpdate::new().username(username).email(email);
        if let Some(password) = password.filter(|p| !p.is_empty()) {
            validate_password(password)?;
            update = update.password_hash(hash_password(password)?);
        }

        let account = self
            .accounts()
            .update(account_id, &update)
            .await?
            .ok_or_else(|| SsisError::NotFound("account".to_string()))?;

        info!(account_id, "Account credentials updated");
        Ok(account)
    }

    /// Delete an account.
    pub async fn delete(&self, account_id: i64) -> Result<()> {
        if !self.accounts().delete(account_id).await? {
            return Err(SsisError::NotFound("account".to_string()));
        }
        info!(account_id, "Account deleted");
        Ok(())
    }

    /// Number of registered accounts.
    pub async fn count(&self) -> Result<i64> {
        self.accounts().count().await
    }

    /// Create the configured initial account if no account exists yet.
    ///
    /// Returns the new account, or None when accounts already exist or no
    /// complete `[admin]` credentials are configured.
    pub async fn ensure_initial_account(&self, admin: &AdminConfig) -> Result<Option<Account>> {
        if self.count().await? > 0 {
            return Ok(None);
        }

        let Some((username, email, password)) = admin.credentials() else {
            warn!("No accounts exist and no [admin] credentials are configured");
            return Ok(None);
        };

        let account = self.register(username, email, password).await?;
        info!(username = %account.username, "Initial account created");
        Ok(Some(account))
    }
}
