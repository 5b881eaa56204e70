//! Session query actions

use crate::common::error::DomainError;
use crate::common::UserId;
use crate::domains::sessions::models::Session;
use crate::kernel::ServerDeps;

/// List a user's sessions, soonest first. The user may sit on either side
/// of the interview; candidate and interviewer bookings come back together.
pub async fn list_sessions(
    user_id: UserId,
    deps: &ServerDeps,
) -> Result<Vec<Session>, DomainError> {
    Ok(Session::find_for_user(user_id, &deps.db_pool).await?)
}
