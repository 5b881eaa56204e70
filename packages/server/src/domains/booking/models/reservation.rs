use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{ReservationId, SlotId, UserId};

/// Lifecycle state of a reservation.
///
/// `Pending` is the only non-terminal state: a reservation moves to
/// `Accepted` or `Rejected` exactly once and never transitions again.
/// Re-booking after a rejection creates a new record and purges the old one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "reservation_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Accepted,
    Rejected,
}

/// A candidate's request to book a slot, arbitrated by the interviewer.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Reservation {
    pub id: ReservationId,
    pub candidate_id: UserId,
    pub slot_id: SlotId,
    pub interviewer_id: UserId,
    pub status: ReservationStatus,
    pub note: Option<String>,
    pub rejection_reason: Option<String>,
    pub responded_at: Option<DateTime<Utc>>,
    pub responded_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

/// Optional filters for reservation listings.
#[derive(Debug, Clone, Default)]
pub struct ReservationFilter {
    pub candidate_id: Option<UserId>,
    pub interviewer_id: Option<UserId>,
    pub slot_id: Option<SlotId>,
    pub status: Option<ReservationStatus>,
}

impl Reservation {
    pub async fn find_by_id(
        id: ReservationId,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM reservations WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The candidate's active (pending or accepted) reservation with this
    /// interviewer, if any.
    pub async fn find_active_for_pair(
        candidate_id: UserId,
        interviewer_id: UserId,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM reservations
            WHERE candidate_id = $1 AND interviewer_id = $2
              AND status IN ('pending', 'accepted')
            "#,
        )
        .bind(candidate_id)
        .bind(interviewer_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn insert(
        candidate_id: UserId,
        slot_id: SlotId,
        interviewer_id: UserId,
        note: Option<&str>,
        conn: &mut PgConnection,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO reservations (id, candidate_id, slot_id, interviewer_id, note)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(ReservationId::new())
        .bind(candidate_id)
        .bind(slot_id)
        .bind(interviewer_id)
        .bind(note)
        .fetch_one(conn)
        .await
    }

    /// Remove a prior rejected reservation for this (candidate, slot) pair.
    ///
    /// Required before re-booking: the (candidate_id, slot_id) uniqueness
    /// constraint counts terminal records too, and a candidate rejected from
    /// a slot may book it again.
    pub async fn purge_rejected(
        candidate_id: UserId,
        slot_id: SlotId,
        conn: &mut PgConnection,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM reservations
            WHERE candidate_id = $1 AND slot_id = $2 AND status = 'rejected'
            "#,
        )
        .bind(candidate_id)
        .bind(slot_id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// pending -> accepted, conditionally.
    ///
    /// Returns `None` when the reservation is no longer pending; the guard
    /// and the transition are one statement so concurrent responses cannot
    /// both apply.
    pub async fn mark_accepted(
        id: ReservationId,
        responded_by: UserId,
        conn: &mut PgConnection,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE reservations
            SET status = 'accepted', responded_at = NOW(), responded_by = $2
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(responded_by)
        .fetch_optional(conn)
        .await
    }

    /// pending -> rejected, conditionally. Same single-statement guard as
    /// [`Reservation::mark_accepted`].
    pub async fn mark_rejected(
        id: ReservationId,
        responded_by: UserId,
        reason: Option<&str>,
        conn: &mut PgConnection,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE reservations
            SET status = 'rejected', responded_at = NOW(), responded_by = $2,
                rejection_reason = $3
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(responded_by)
        .bind(reason)
        .fetch_optional(conn)
        .await
    }

    pub async fn list(
        filter: &ReservationFilter,
        pool: &PgPool,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM reservations
            WHERE ($1::uuid IS NULL OR candidate_id = $1)
              AND ($2::uuid IS NULL OR interviewer_id = $2)
              AND ($3::uuid IS NULL OR slot_id = $3)
              AND ($4::reservation_status IS NULL OR status = $4)
            ORDER BY created_at ASC
            "#,
        )
        .bind(filter.candidate_id)
        .bind(filter.interviewer_id)
        .bind(filter.slot_id)
        .bind(filter.status)
        .fetch_all(pool)
        .await
    }
}
