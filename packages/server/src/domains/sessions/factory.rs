//! Session creation from an accepted reservation.

use sqlx::PgConnection;
use tracing::debug;

use crate::common::error::DomainError;
use crate::domains::booking::models::Reservation;
use crate::domains::scheduling::models::Slot;
use crate::domains::sessions::models::Session;

/// Materialize the session for a just-accepted reservation.
///
/// Runs inside the accept transaction: the reservation update and the
/// session insert commit or roll back together, so an accepted reservation
/// without a session cannot be observed. The date and time range are copied
/// from the reserved slot. A second session for the same reservation is an
/// invariant violation - unreachable while accept's pending-only guard
/// holds, caught by the unique constraint if it ever stops holding.
pub async fn create_session(
    reservation: &Reservation,
    conn: &mut PgConnection,
) -> Result<Session, DomainError> {
    let slot = sqlx::query_as::<_, Slot>("SELECT * FROM slots WHERE id = $1")
        .bind(reservation.slot_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| {
            DomainError::invariant(format!(
                "reservation {} references missing slot {}",
                reservation.id, reservation.slot_id
            ))
        })?;

    let session = Session::insert(
        reservation.candidate_id,
        reservation.interviewer_id,
        reservation.id,
        slot.date,
        slot.start_time,
        slot.end_time,
        conn,
    )
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            DomainError::invariant(format!(
                "session already exists for reservation {}",
                reservation.id
            ))
        }
        _ => DomainError::Database(e),
    })?;

    debug!(
        "Session {} materialized from reservation {}",
        session.id, reservation.id
    );

    Ok(session)
}
