use crate::auth::AuthProvider;
use crate::error::AppError;
use crate::model::{ScoreRecord, is_save_eligible};
use crate::storage::{ScoreStore, StoredScore};

/// Persistence gate for a finalized record: requires an authenticated user
/// before any store attempt, then appends a new entry under that user's
/// namespace. On failure the caller's in-memory record is untouched so the
/// user can retry without re-entering data.
///
/// # Errors
///
/// `Unauthenticated` when no user is signed in (the store is never
/// contacted); `Persistence` when the backend write fails.
pub async fn persist_record(
    store: &dyn ScoreStore,
    auth: &dyn AuthProvider,
    record: &ScoreRecord,
) -> Result<i64, AppError> {
    let Some(user_id) = auth.user_id().filter(|id| !id.is_empty()) else {
        return Err(AppError::Unauthenticated);
    };

    let id = store.append_score(&user_id, record).await?;
    Ok(id)
}

/// A record may only be handed to `persist_record` when save-eligible; this
/// is the same gate the controller applies before entering `Saving`.
#[must_use]
pub fn can_persist(record: &ScoreRecord) -> bool {
    is_save_eligible(record)
}

/// The signed-in user's saved rounds, newest first.
///
/// # Errors
///
/// `Unauthenticated` when no user is signed in, `Persistence` on a backend
/// read failure.
pub async fn saved_rounds(
    store: &dyn ScoreStore,
    auth: &dyn AuthProvider,
) -> Result<Vec<StoredScore>, AppError> {
    let Some(user_id) = auth.user_id().filter(|id| !id.is_empty()) else {
        return Err(AppError::Unauthenticated);
    };
    let rounds = store.scores_for_user(&user_id).await?;
    Ok(rounds)
}
