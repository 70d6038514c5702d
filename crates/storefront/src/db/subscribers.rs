//! Popup subscriber storage.
//!
//! Emails captured by the popup land in `storefront.popup_subscribers` for
//! the marketing export. Re-submitting the same email is a no-op.

use sqlx::PgPool;

use fernway_core::Email;

use super::RepositoryError;

/// Record a captured email. Idempotent per email address.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn record_subscriber(pool: &PgPool, email: &Email) -> Result<(), RepositoryError> {
    sqlx::query(
        r"
        INSERT INTO storefront.popup_subscribers (email)
        VALUES ($1)
        ON CONFLICT (email) DO NOTHING
        ",
    )
    .bind(email.as_str())
    .execute(pool)
    .await?;

    Ok(())
}
