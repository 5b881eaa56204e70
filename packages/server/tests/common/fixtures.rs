//! Test fixtures for creating test data.
//!
//! Users are inserted directly (identity is an external collaborator);
//! everything else goes through the domain actions under test.

use anyhow::Result;
use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use scheduling_core::common::{Actor, SlotId, UserId};
use scheduling_core::domains::scheduling::actions::{create_schedule, CreatedSchedule};
use scheduling_core::domains::scheduling::models::CreateScheduleParams;
use scheduling_core::kernel::ServerDeps;
use sqlx::PgPool;

async fn create_user(pool: &PgPool, role: &str, name: &str) -> Result<UserId> {
    let id = UserId::new();
    sqlx::query("INSERT INTO users (id, display_name, role) VALUES ($1, $2, $3::user_role)")
        .bind(id)
        .bind(name)
        .bind(role)
        .execute(pool)
        .await?;
    Ok(id)
}

pub async fn create_interviewer(pool: &PgPool) -> Result<Actor> {
    let id = create_user(pool, "interviewer", "Test Interviewer").await?;
    Ok(Actor::interviewer(id))
}

pub async fn create_candidate(pool: &PgPool) -> Result<Actor> {
    let id = create_user(pool, "candidate", "Test Candidate").await?;
    Ok(Actor::candidate(id))
}

pub fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// A date safely in the future; offset lets one owner hold many schedules.
pub fn future_date(days: i64) -> NaiveDate {
    Utc::now().date_naive() + Duration::days(days)
}

pub fn morning_window(duration: i32, brk: i32) -> CreateScheduleParams {
    CreateScheduleParams::builder()
        .date(future_date(7))
        .start_time(t(9, 0))
        .end_time(t(10, 0))
        .duration_minutes(duration)
        .break_minutes(brk)
        .title("Morning interviews")
        .build()
}

/// Create a 09:00-10:00 schedule of two 30-minute slots for a fresh
/// interviewer; the common starting point of booking tests.
pub async fn create_two_slot_schedule(
    pool: &PgPool,
    deps: &ServerDeps,
) -> Result<(Actor, CreatedSchedule)> {
    let interviewer = create_interviewer(pool).await?;
    let created = create_schedule(&interviewer, morning_window(30, 0), deps).await?;
    Ok((interviewer, created))
}

/// Widen a generated slot to the given capacity (fixtures only; generated
/// slots always start at capacity 1).
pub async fn widen_slot_capacity(pool: &PgPool, slot_id: SlotId, capacity: i32) -> Result<()> {
    sqlx::query("UPDATE slots SET max_capacity = $2 WHERE id = $1")
        .bind(slot_id)
        .bind(capacity)
        .execute(pool)
        .await?;
    Ok(())
}
