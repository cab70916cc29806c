use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create doctors table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS doctors (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            specialty VARCHAR(64) NOT NULL,
            work_start TIME NOT NULL,
            work_end TIME NOT NULL,
            working_days SMALLINT[] NOT NULL DEFAULT '{0,1,2,3,4,5,6}',
            consultation_minutes BIGINT NOT NULL,
            fee DOUBLE PRECISION NOT NULL,
            date_of_birth DATE NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create slot_reservations table; the primary key is the atomic claim
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS slot_reservations (
            doctor_id UUID NOT NULL REFERENCES doctors(id),
            slot_start TIMESTAMP WITH TIME ZONE NOT NULL,
            reserved_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            PRIMARY KEY (doctor_id, slot_start)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create appointments table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            patient_id VARCHAR(255) NOT NULL,
            doctor_id UUID NOT NULL REFERENCES doctors(id),
            appointment_date DATE NOT NULL,
            slot_start TIMESTAMP WITH TIME ZONE NOT NULL,
            slot_end TIMESTAMP WITH TIME ZONE NOT NULL,
            description TEXT NULL,
            prescription TEXT NULL,
            completed BOOLEAN NOT NULL DEFAULT FALSE,
            fee DOUBLE PRECISION NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_slot_range CHECK (slot_end > slot_start)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    for statement in [
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_appointments_slot ON appointments(doctor_id, slot_start)",
        "CREATE INDEX IF NOT EXISTS idx_appointments_patient_id ON appointments(patient_id)",
        "CREATE INDEX IF NOT EXISTS idx_doctors_specialty ON doctors(specialty)",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
