use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};
use typed_builder::TypedBuilder;

use crate::common::{ScheduleId, UserId};

/// An interviewer's declared availability window for one calendar date.
///
/// At most one active schedule may exist per (owner, date); the partial
/// unique index `schedules_owner_date_active` backs the in-action check.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Schedule {
    pub id: ScheduleId,
    pub owner_id: UserId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub duration_minutes: i32,
    pub break_minutes: i32,
    pub title: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Creation / update parameter structs
// =============================================================================

#[derive(Debug, Clone, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct CreateScheduleParams {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub duration_minutes: i32,
    #[builder(default = 0)]
    pub break_minutes: i32,
    #[builder(default = String::new())]
    pub title: String,
}

/// Partial update. `None` fields are left untouched; any `Some` among the
/// window fields triggers slot regeneration.
#[derive(Debug, Clone, Default)]
pub struct UpdateScheduleParams {
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub duration_minutes: Option<i32>,
    pub break_minutes: Option<i32>,
    pub title: Option<String>,
}

impl UpdateScheduleParams {
    /// Whether this patch touches the slot-defining window fields.
    pub fn touches_window(&self) -> bool {
        self.start_time.is_some()
            || self.end_time.is_some()
            || self.duration_minutes.is_some()
            || self.break_minutes.is_some()
    }
}

impl Schedule {
    pub async fn find_by_id(id: ScheduleId, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM schedules WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The active schedule for an (owner, date) pair, if one exists.
    pub async fn find_active_for_owner_date(
        owner_id: UserId,
        date: NaiveDate,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM schedules WHERE owner_id = $1 AND date = $2 AND is_active",
        )
        .bind(owner_id)
        .bind(date)
        .fetch_optional(pool)
        .await
    }

    pub async fn insert(
        owner_id: UserId,
        params: &CreateScheduleParams,
        conn: &mut PgConnection,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO schedules (
                id, owner_id, date, start_time, end_time,
                duration_minutes, break_minutes, title
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(ScheduleId::new())
        .bind(owner_id)
        .bind(params.date)
        .bind(params.start_time)
        .bind(params.end_time)
        .bind(params.duration_minutes)
        .bind(params.break_minutes)
        .bind(&params.title)
        .fetch_one(conn)
        .await
    }

    pub async fn apply_patch(
        id: ScheduleId,
        params: &UpdateScheduleParams,
        conn: &mut PgConnection,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE schedules SET
                start_time = COALESCE($2, start_time),
                end_time = COALESCE($3, end_time),
                duration_minutes = COALESCE($4, duration_minutes),
                break_minutes = COALESCE($5, break_minutes),
                title = COALESCE($6, title),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(params.start_time)
        .bind(params.end_time)
        .bind(params.duration_minutes)
        .bind(params.break_minutes)
        .bind(params.title.as_deref())
        .fetch_one(conn)
        .await
    }

    pub async fn delete(id: ScheduleId, conn: &mut PgConnection) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM schedules WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(())
    }
}
