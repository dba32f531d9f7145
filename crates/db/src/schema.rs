use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create users table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id VARCHAR(255) PRIMARY KEY,
            email VARCHAR(320) NOT NULL UNIQUE,
            nickname VARCHAR(255) NOT NULL,
            password_hash VARCHAR(255) NOT NULL,
            friends TEXT[] NOT NULL DEFAULT '{}',
            blocked_users TEXT[] NOT NULL DEFAULT '{}',
            teams UUID[] NOT NULL DEFAULT '{}',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create profiles table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS profiles (
            user_id VARCHAR(255) PRIMARY KEY REFERENCES users(id),
            name VARCHAR(255) NOT NULL,
            email VARCHAR(320) NOT NULL DEFAULT '',
            bio TEXT NOT NULL DEFAULT '',
            major VARCHAR(255) NOT NULL DEFAULT '',
            student_id VARCHAR(64) NOT NULL DEFAULT '',
            image_url TEXT NOT NULL DEFAULT '',
            is_introvert BOOLEAN NOT NULL DEFAULT FALSE,
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create profile_images table, keyed by "profiles/{user_id}"
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS profile_images (
            path VARCHAR(512) PRIMARY KEY,
            user_id VARCHAR(255) NOT NULL REFERENCES users(id),
            content_type VARCHAR(255) NOT NULL,
            data BYTEA NOT NULL,
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create teams table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS teams (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            department VARCHAR(255) NOT NULL DEFAULT '',
            description TEXT NOT NULL DEFAULT '',
            members TEXT[] NOT NULL DEFAULT '{}',
            created_by VARCHAR(255) NOT NULL REFERENCES users(id),
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create meeting_reservations table, keyed by "{date}-{team_name}"
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS meeting_reservations (
            id VARCHAR(512) PRIMARY KEY,
            date DATE NOT NULL,
            team_id UUID NOT NULL,
            team_name VARCHAR(255) NOT NULL,
            members TEXT[] NOT NULL DEFAULT '{}',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create confirmed_meetings table, keyed by "{date}-{team}-{team}"
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS confirmed_meetings (
            id VARCHAR(768) PRIMARY KEY,
            meeting_date DATE NOT NULL,
            meeting_team_name VARCHAR(255) NOT NULL,
            members TEXT[] NOT NULL DEFAULT '{}',
            team_name VARCHAR(255) NOT NULL,
            user_id VARCHAR(255) NOT NULL,
            comments TEXT[] NOT NULL DEFAULT '{}',
            confirmed_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_teams_members ON teams USING GIN (members);
        CREATE INDEX IF NOT EXISTS idx_meeting_reservations_date ON meeting_reservations(date);
        CREATE INDEX IF NOT EXISTS idx_meeting_reservations_team_id ON meeting_reservations(team_id);
        CREATE INDEX IF NOT EXISTS idx_confirmed_meetings_user_id ON confirmed_meetings(user_id);
        CREATE INDEX IF NOT EXISTS idx_confirmed_meetings_members ON confirmed_meetings USING GIN (members);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
