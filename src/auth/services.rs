use lazy_static::lazy_static;
use regex::Regex;
use tracing::{error, info, warn};

use super::{
    password::{burn_verification, hash_password, verify_password},
    policy::AdminPolicy,
    repo::UserRepo,
};
use crate::error::StoreError;

pub(crate) const MIN_PASSWORD_LEN: usize = 8;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// True only when the email belongs to a stored user, the password matches
/// its hash, and the policy grants administrator capability.
///
/// All three checks cost one password verification, whichever one fails.
pub async fn verify_administrator(
    users: &dyn UserRepo,
    policy: &dyn AdminPolicy,
    email: &str,
    password: &str,
) -> Result<bool, StoreError> {
    let email = normalize_email(email);
    let Some(user) = users.find_by_email(&email).await? else {
        return Ok(burn_verification(password));
    };

    let password_ok = match verify_password(password, &user.password_hash) {
        Ok(ok) => ok,
        Err(e) => {
            error!(user_id = %user.id, error = %e, "administrator check: stored hash unreadable");
            false
        }
    };
    if !password_ok {
        warn!(user_id = %user.id, "administrator check: wrong password");
        return Ok(false);
    }
    if !policy.is_admin(&user) {
        warn!(user_id = %user.id, "administrator check: user is not an administrator");
        return Ok(false);
    }
    Ok(true)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
    Created,
    AlreadyPresent,
    PasswordReset,
}

/// Creates the administrator account. Re-running is harmless: an existing
/// account is left alone unless `reset_password` is set.
pub async fn provision_administrator(
    users: &dyn UserRepo,
    email: &str,
    password: &str,
    reset_password: bool,
) -> anyhow::Result<ProvisionOutcome> {
    let email = normalize_email(email);
    anyhow::ensure!(is_valid_email(&email), "invalid email: {email}");
    anyhow::ensure!(
        password.len() >= MIN_PASSWORD_LEN,
        "password must be at least {MIN_PASSWORD_LEN} characters"
    );

    match users.find_by_email(&email).await? {
        Some(existing) if reset_password => {
            let hash = hash_password(password)?;
            users.set_password_hash(existing.id, &hash).await?;
            info!(user_id = %existing.id, "administrator password reset");
            Ok(ProvisionOutcome::PasswordReset)
        }
        Some(existing) => {
            info!(user_id = %existing.id, "administrator already provisioned");
            Ok(ProvisionOutcome::AlreadyPresent)
        }
        None => {
            let hash = hash_password(password)?;
            let user = users.create(&email, &hash).await?;
            info!(user_id = %user.id, "administrator provisioned");
            Ok(ProvisionOutcome::Created)
        }
    }
}
