use sea_orm::sea_query::{Index, PostgresQueryBuilder};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr};
use tracing::info;

use crate::config::BootstrapAdmin;
use crate::entity::url_submission;
use crate::error::AppError;
use crate::repository::{NewUser, UserRepository};
use crate::utils::hash;

/// Create secondary indexes that schema sync does not derive from the entities.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Duplicate check on submission create and update filters on both columns.
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_url_submission_url_match")
        .table(url_submission::Entity)
        .col(url_submission::Column::Url)
        .col(url_submission::Column::MatchId)
        .to_string(PostgresQueryBuilder);

    db.execute_unprepared(&stmt).await?;
    info!("Ensured index idx_url_submission_url_match exists");
    Ok(())
}

/// Create the configured admin account unless a user with that name exists.
///
/// Returns whether an account was created.
pub async fn seed_bootstrap_admin(
    users: &dyn UserRepository,
    admin: &BootstrapAdmin,
) -> Result<bool, AppError> {
    if users.get_by_username(&admin.username).await?.is_some() {
        return Ok(false);
    }

    let password = admin.password.clone();
    let password_hash = tokio::task::spawn_blocking(move || hash::hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(format!("Hash task failed: {e}")))?
        .map_err(|e| AppError::Internal(format!("Password hash error: {e}")))?;

    users
        .create(NewUser {
            username: admin.username.clone(),
            email: admin.email.clone(),
            password_hash,
            role: "admin".into(),
            is_active: true,
        })
        .await?;

    info!(username = %admin.username, "Seeded bootstrap admin account");
    Ok(true)
}
