use eyre::Result;
use sqlx::{Executor, Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create users table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            last_name VARCHAR(255) NOT NULL,
            phone VARCHAR(32) NOT NULL,
            email VARCHAR(255) NOT NULL UNIQUE,
            email_confirmed BOOLEAN NOT NULL DEFAULT FALSE,
            image VARCHAR(255) NOT NULL DEFAULT '',
            password_hash VARCHAR(255) NOT NULL,
            temp_token VARCHAR(64) NOT NULL DEFAULT '',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create hairdressers table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS hairdressers (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            phone VARCHAR(32) NOT NULL,
            address VARCHAR(255) NOT NULL,
            postal_code INTEGER NOT NULL,
            image VARCHAR(255) NOT NULL DEFAULT '',
            token VARCHAR(64) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create admins table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS admins (
            hairdresser_id UUID NOT NULL REFERENCES hairdressers(id),
            user_id UUID NOT NULL REFERENCES users(id),
            role SMALLINT NOT NULL,
            PRIMARY KEY (hairdresser_id, user_id),
            CONSTRAINT valid_admin_role CHECK (role BETWEEN 1 AND 4)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create schedules table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schedules (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            hairdresser_id UUID NOT NULL REFERENCES hairdressers(id),
            name VARCHAR(255) NOT NULL,
            active BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create schedule_rows table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schedule_rows (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            schedule_id UUID NOT NULL REFERENCES schedules(id),
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            monday BOOLEAN NOT NULL DEFAULT FALSE,
            tuesday BOOLEAN NOT NULL DEFAULT FALSE,
            wednesday BOOLEAN NOT NULL DEFAULT FALSE,
            thursday BOOLEAN NOT NULL DEFAULT FALSE,
            friday BOOLEAN NOT NULL DEFAULT FALSE,
            saturday BOOLEAN NOT NULL DEFAULT FALSE,
            sunday BOOLEAN NOT NULL DEFAULT FALSE,
            CONSTRAINT valid_row_range CHECK (end_time > start_time),
            CONSTRAINT unique_schedule_row UNIQUE (
                schedule_id, start_time, end_time,
                monday, tuesday, wednesday, thursday, friday, saturday, sunday
            )
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create services table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS services (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            hairdresser_id UUID NOT NULL REFERENCES hairdressers(id),
            name VARCHAR(255) NOT NULL,
            price_cents INTEGER NOT NULL,
            duration_minutes SMALLINT NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_service_price CHECK (price_cents >= 0),
            CONSTRAINT valid_service_duration CHECK (duration_minutes > 0)
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
            user_id UUID NOT NULL REFERENCES users(id),
            hairdresser_id UUID NOT NULL REFERENCES hairdressers(id),
            date DATE NOT NULL,
            time TIME NOT NULL,
            status SMALLINT NOT NULL DEFAULT 0,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create appointment_services table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointment_services (
            appointment_id UUID NOT NULL REFERENCES appointments(id),
            service_id UUID NOT NULL REFERENCES services(id),
            PRIMARY KEY (appointment_id, service_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes; several statements, so this runs over the simple protocol
    pool.execute(
        r#"
        CREATE INDEX IF NOT EXISTS idx_admins_user_id ON admins(user_id);
        CREATE INDEX IF NOT EXISTS idx_schedules_hairdresser_id ON schedules(hairdresser_id);
        CREATE UNIQUE INDEX IF NOT EXISTS idx_schedules_one_active
            ON schedules(hairdresser_id) WHERE active;
        CREATE UNIQUE INDEX IF NOT EXISTS idx_schedules_name
            ON schedules(hairdresser_id, LOWER(name));
        CREATE INDEX IF NOT EXISTS idx_schedule_rows_schedule_id ON schedule_rows(schedule_id);
        CREATE INDEX IF NOT EXISTS idx_services_hairdresser_id ON services(hairdresser_id);
        CREATE INDEX IF NOT EXISTS idx_appointments_user_id ON appointments(user_id);
        CREATE INDEX IF NOT EXISTS idx_appointments_hairdresser_id ON appointments(hairdresser_id);
        CREATE INDEX IF NOT EXISTS idx_appointment_services_service_id ON appointment_services(service_id);
        "#,
    )
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
