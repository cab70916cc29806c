use crate::models::{DbDoctor, weekday_index};
use chrono::Utc;
use eyre::Result;
use slotbook_core::models::doctor::Doctor;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Inserts a doctor, or refreshes every field of an existing one.
pub async fn upsert_doctor(pool: &Pool<Postgres>, doctor: &Doctor) -> Result<DbDoctor> {
    let now = Utc::now();
    let working_days: Vec<i16> = doctor
        .working_hours
        .days
        .iter()
        .map(|&day| weekday_index(day))
        .collect();

    tracing::debug!(
        "Upserting doctor: id={}, name={}, specialty={}",
        doctor.id,
        doctor.name,
        doctor.specialty.as_str()
    );

    let row = sqlx::query_as::<_, DbDoctor>(
        r#"
        INSERT INTO doctors (id, name, specialty, work_start, work_end, working_days,
                             consultation_minutes, fee, date_of_birth, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        ON CONFLICT (id)
        DO UPDATE SET name = $2, specialty = $3, work_start = $4, work_end = $5,
                      working_days = $6, consultation_minutes = $7, fee = $8,
                      date_of_birth = $9
        RETURNING id, name, specialty, work_start, work_end, working_days,
                  consultation_minutes, fee, date_of_birth, created_at
        "#,
    )
    .bind(doctor.id)
    .bind(&doctor.name)
    .bind(doctor.specialty.as_str())
    .bind(doctor.working_hours.start)
    .bind(doctor.working_hours.end)
    .bind(&working_days)
    .bind(doctor.consultation_minutes)
    .bind(doctor.fee)
    .bind(doctor.date_of_birth)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn get_doctor_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbDoctor>> {
    let doctor = sqlx::query_as::<_, DbDoctor>(
        r#"
        SELECT id, name, specialty, work_start, work_end, working_days,
               consultation_minutes, fee, date_of_birth, created_at
        FROM doctors
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(doctor)
}

pub async fn list_doctors(pool: &Pool<Postgres>) -> Result<Vec<DbDoctor>> {
    let doctors = sqlx::query_as::<_, DbDoctor>(
        r#"
        SELECT id, name, specialty, work_start, work_end, working_days,
               consultation_minutes, fee, date_of_birth, created_at
        FROM doctors
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(doctors)
}
