use sea_orm::{Database, DatabaseConnection};

use crate::error::AppError;
use crate::state::app_state::AppState;

/// Connect to the database at `database_url`. Does NOT run migrations.
pub async fn connect_db(database_url: &str) -> Result<DatabaseConnection, AppError> {
    let conn = Database::connect(database_url).await?;
    Ok(conn)
}

/// Centralized helper to access the database connection from AppState.
///
/// Returns a borrowed reference to the DatabaseConnection if available,
/// or an AppError::DbUnavailable if the database is not configured.
pub fn require_db(state: &AppState) -> Result<&DatabaseConnection, AppError> {
    state.db.as_ref().ok_or(AppError::DbUnavailable)
}
