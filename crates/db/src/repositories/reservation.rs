use crate::models::DbSlotReservation;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Claims a slot with a single conditional insert.
///
/// Returns `true` for the one caller whose row was inserted; concurrent
/// callers hit the primary key conflict and get `false`.
pub async fn reserve_slot(
    pool: &Pool<Postgres>,
    doctor_id: Uuid,
    slot_start: DateTime<Utc>,
) -> Result<bool> {
    let now = Utc::now();

    let inserted = sqlx::query_as::<_, (Uuid,)>(
        r#"
        INSERT INTO slot_reservations (doctor_id, slot_start, reserved_at)
        VALUES ($1, $2, $3)
        ON CONFLICT (doctor_id, slot_start) DO NOTHING
        RETURNING doctor_id
        "#,
    )
    .bind(doctor_id)
    .bind(slot_start)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    tracing::debug!(
        "Reserve slot: doctor_id={}, slot_start={}, reserved={}",
        doctor_id,
        slot_start,
        inserted.is_some()
    );

    Ok(inserted.is_some())
}

pub async fn release_slot(
    pool: &Pool<Postgres>,
    doctor_id: Uuid,
    slot_start: DateTime<Utc>,
) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM slot_reservations
        WHERE doctor_id = $1 AND slot_start = $2
        "#,
    )
    .bind(doctor_id)
    .bind(slot_start)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn get_reserved_slots(
    pool: &Pool<Postgres>,
    doctor_id: Uuid,
    day: NaiveDate,
) -> Result<Vec<DbSlotReservation>> {
    let day_start = day.and_time(chrono::NaiveTime::MIN).and_utc();
    let day_end = day_start + Duration::days(1);

    let reservations = sqlx::query_as::<_, DbSlotReservation>(
        r#"
        SELECT doctor_id, slot_start
        FROM slot_reservations
        WHERE doctor_id = $1 AND slot_start >= $2 AND slot_start < $3
        ORDER BY slot_start ASC
        "#,
    )
    .bind(doctor_id)
    .bind(day_start)
    .bind(day_end)
    .fetch_all(pool)
    .await?;

    Ok(reservations)
}
