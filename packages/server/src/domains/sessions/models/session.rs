use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{ReservationId, SessionId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "session_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

/// The materialized interview, one-to-one with its accepted reservation.
/// The time range is copied from the slot at acceptance time.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Session {
    pub id: SessionId,
    pub candidate_id: UserId,
    pub interviewer_id: UserId,
    pub reservation_id: ReservationId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub async fn find_by_reservation(
        reservation_id: ReservationId,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM sessions WHERE reservation_id = $1")
            .bind(reservation_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_for_user(user_id: UserId, pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM sessions
            WHERE candidate_id = $1 OR interviewer_id = $1
            ORDER BY date ASC, start_time ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    pub(crate) async fn insert(
        candidate_id: UserId,
        interviewer_id: UserId,
        reservation_id: ReservationId,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        conn: &mut PgConnection,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO sessions (
                id, candidate_id, interviewer_id, reservation_id,
                date, start_time, end_time
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(SessionId::new())
        .bind(candidate_id)
        .bind(interviewer_id)
        .bind(reservation_id)
        .bind(date)
        .bind(start_time)
        .bind(end_time)
        .fetch_one(conn)
        .await
    }
}
