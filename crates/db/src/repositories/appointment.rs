use crate::models::DbAppointment;
use eyre::Result;
use slotbook_core::models::appointment::Appointment;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_appointment(
    pool: &Pool<Postgres>,
    appointment: &Appointment,
) -> Result<DbAppointment> {
    tracing::debug!(
        "Creating appointment: id={}, doctor_id={}, slot_start={}",
        appointment.id,
        appointment.doctor_id,
        appointment.slot_start
    );

    let row = sqlx::query_as::<_, DbAppointment>(
        r#"
        INSERT INTO appointments (id, patient_id, doctor_id, appointment_date, slot_start,
                                  slot_end, description, prescription, completed, fee, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING id, patient_id, doctor_id, appointment_date, slot_start, slot_end,
                  description, prescription, completed, fee, created_at
        "#,
    )
    .bind(appointment.id)
    .bind(&appointment.patient_id)
    .bind(appointment.doctor_id)
    .bind(appointment.date)
    .bind(appointment.slot_start)
    .bind(appointment.slot_end)
    .bind(appointment.description.as_deref())
    .bind(appointment.prescription.as_deref())
    .bind(appointment.completed)
    .bind(appointment.fee)
    .bind(appointment.created_at)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn get_appointment_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbAppointment>> {
    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, patient_id, doctor_id, appointment_date, slot_start, slot_end,
               description, prescription, completed, fee, created_at
        FROM appointments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}

pub async fn get_appointments_by_patient_id(
    pool: &Pool<Postgres>,
    patient_id: &str,
) -> Result<Vec<DbAppointment>> {
    let appointments = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, patient_id, doctor_id, appointment_date, slot_start, slot_end,
               description, prescription, completed, fee, created_at
        FROM appointments
        WHERE patient_id = $1
        ORDER BY slot_start ASC
        "#,
    )
    .bind(patient_id)
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}

/// Completes a pending appointment. Already completed rows are left untouched.
pub async fn complete_appointment(
    pool: &Pool<Postgres>,
    id: Uuid,
    prescription: Option<&str>,
) -> Result<Option<DbAppointment>> {
    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        UPDATE appointments
        SET completed = TRUE, prescription = COALESCE($2, prescription)
        WHERE id = $1 AND completed = FALSE
        RETURNING id, patient_id, doctor_id, appointment_date, slot_start, slot_end,
                  description, prescription, completed, fee, created_at
        "#,
    )
    .bind(id)
    .bind(prescription)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}
