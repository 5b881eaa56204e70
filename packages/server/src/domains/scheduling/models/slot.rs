use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};
use typed_builder::TypedBuilder;

use crate::common::{ScheduleId, SlotId, UserId};

// =============================================================================
// Status
// =============================================================================

/// Occupancy state of a slot.
///
/// Never set directly: it is a pure function of `(current_count,
/// max_capacity)` and every statement that touches the count recomputes it
/// in the same SQL expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "slot_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    Available,
    Pending,
    Booked,
}

impl SlotStatus {
    /// The status implied by an occupancy pair.
    pub fn of(current_count: i32, max_capacity: i32) -> Self {
        if current_count <= 0 {
            SlotStatus::Available
        } else if current_count >= max_capacity {
            SlotStatus::Booked
        } else {
            SlotStatus::Pending
        }
    }
}

// =============================================================================
// Model
// =============================================================================

/// A fixed-duration bookable sub-interval of a schedule.
///
/// Slots are created in batch when their schedule is created or its window
/// regenerated. A slot that has ever left the available state is a
/// historical record and is never deleted; available slots are deleted on
/// schedule edit or delete.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Slot {
    pub id: SlotId,
    pub schedule_id: ScheduleId,
    pub owner_id: UserId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub max_capacity: i32,
    pub current_count: i32,
    pub status: SlotStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(TypedBuilder)]
pub struct NewSlot {
    pub schedule_id: ScheduleId,
    pub owner_id: UserId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[builder(default = 1)]
    pub max_capacity: i32,
}

/// Optional filters for slot listings.
#[derive(Debug, Clone, Default)]
pub struct SlotFilter {
    pub owner_id: Option<UserId>,
    pub schedule_id: Option<ScheduleId>,
    pub date: Option<NaiveDate>,
    pub status: Option<SlotStatus>,
}

impl Slot {
    pub async fn find_by_id(id: SlotId, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM slots WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert one freshly generated slot (available, zero occupancy).
    pub async fn insert(new: &NewSlot, conn: &mut PgConnection) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO slots (id, schedule_id, owner_id, date, start_time, end_time, max_capacity)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(SlotId::new())
        .bind(new.schedule_id)
        .bind(new.owner_id)
        .bind(new.date)
        .bind(new.start_time)
        .bind(new.end_time)
        .bind(new.max_capacity)
        .fetch_one(conn)
        .await
    }

    /// Atomically claim one seat.
    ///
    /// The capacity check and the increment are a single conditional UPDATE;
    /// under concurrent reserve calls on a nearly-full slot exactly the
    /// winners see a row come back and everyone else gets `None`. A separate
    /// read-then-write here would permit double booking.
    pub async fn try_claim_seat(
        id: SlotId,
        conn: &mut PgConnection,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE slots
            SET current_count = current_count + 1,
                status = CASE
                    WHEN current_count + 1 >= max_capacity THEN 'booked'::slot_status
                    ELSE 'pending'::slot_status
                END
            WHERE id = $1 AND current_count < max_capacity
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(conn)
        .await
        .map(|row| row.inspect(Self::assert_status_consistent))
    }

    /// Atomically release one seat (reservation rejected).
    pub async fn release_seat(
        id: SlotId,
        conn: &mut PgConnection,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE slots
            SET current_count = current_count - 1,
                status = CASE
                    WHEN current_count - 1 <= 0 THEN 'available'::slot_status
                    ELSE 'pending'::slot_status
                END
            WHERE id = $1 AND current_count > 0
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(conn)
        .await
        .map(|row| row.inspect(Self::assert_status_consistent))
    }

    fn assert_status_consistent(slot: &Self) {
        debug_assert_eq!(
            slot.status,
            SlotStatus::of(slot.current_count, slot.max_capacity),
            "slot {} status diverged from its occupancy",
            slot.id
        );
    }

    /// Load and row-lock every slot of a schedule.
    ///
    /// Window edits and schedule deletes lock the slots first so an in-flight
    /// reserve cannot slip a booking into a slot that is about to be deleted.
    pub async fn lock_for_schedule(
        schedule_id: ScheduleId,
        conn: &mut PgConnection,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM slots WHERE schedule_id = $1 ORDER BY start_time ASC FOR UPDATE",
        )
        .bind(schedule_id)
        .fetch_all(conn)
        .await
    }

    /// Delete the still-available slots of a schedule (window edit/delete).
    /// Slots with any booking history are untouched.
    pub async fn delete_available_for_schedule(
        schedule_id: ScheduleId,
        conn: &mut PgConnection,
    ) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM slots WHERE schedule_id = $1 AND status = 'available'")
                .bind(schedule_id)
                .execute(conn)
                .await?;
        Ok(result.rows_affected())
    }

    pub async fn list(filter: &SlotFilter, pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM slots
            WHERE ($1::uuid IS NULL OR owner_id = $1)
              AND ($2::uuid IS NULL OR schedule_id = $2)
              AND ($3::date IS NULL OR date = $3)
              AND ($4::slot_status IS NULL OR status = $4)
            ORDER BY date ASC, start_time ASC
            "#,
        )
        .bind(filter.owner_id)
        .bind(filter.schedule_id)
        .bind(filter.date)
        .bind(filter.status)
        .fetch_all(pool)
        .await
    }

    pub async fn find_for_schedule(
        schedule_id: ScheduleId,
        pool: &PgPool,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM slots WHERE schedule_id = $1 ORDER BY start_time ASC",
        )
        .bind(schedule_id)
        .fetch_all(pool)
        .await
    }
}
