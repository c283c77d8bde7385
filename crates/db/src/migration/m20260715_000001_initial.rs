//! Initial database migration.
//!
//! Creates the accounts, appointments, and articles tables plus the
//! appointment status enum.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(ACCOUNTS_SQL).await?;
        db.execute_unprepared(APPOINTMENTS_SQL).await?;
        db.execute_unprepared(ARTICLES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Appointment lifecycle states
CREATE TYPE appointment_status AS ENUM (
    'pending',
    'confirmed',
    'completed',
    'cancelled'
);
";

const ACCOUNTS_SQL: &str = r"
-- Registered users, patients, and administrators
CREATE TABLE accounts (
    id UUID PRIMARY KEY,
    email VARCHAR(100) NOT NULL UNIQUE,
    password_hash VARCHAR(200) NOT NULL,
    first_name VARCHAR(50) NOT NULL,
    last_name VARCHAR(50) NOT NULL,
    phone VARCHAR(20),
    patient_number VARCHAR(8) UNIQUE,
    date_of_birth DATE,
    address TEXT,
    emergency_contact VARCHAR(100),
    emergency_phone VARCHAR(20),
    is_admin BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Account listings are newest-first
CREATE INDEX idx_accounts_created ON accounts(created_at DESC);
";

const APPOINTMENTS_SQL: &str = r"
-- Service bookings, owned by one account
CREATE TABLE appointments (
    id UUID PRIMARY KEY,
    account_id UUID NOT NULL REFERENCES accounts(id),
    service VARCHAR(100) NOT NULL,
    scheduled_at TIMESTAMPTZ NOT NULL,
    notes TEXT,
    status appointment_status NOT NULL DEFAULT 'pending',
    attachment_url TEXT,
    attachment_filename VARCHAR(255),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ
);

-- Owner's dashboard view
CREATE INDEX idx_appointments_account ON appointments(account_id, scheduled_at DESC);

-- Admin dashboard counters
CREATE INDEX idx_appointments_status ON appointments(status);

-- Recent activity widget
CREATE INDEX idx_appointments_created ON appointments(created_at DESC);
";

const ARTICLES_SQL: &str = r"
-- Editorial articles and per-patient diagnosis notes
CREATE TABLE articles (
    id UUID PRIMARY KEY,
    title VARCHAR(200) NOT NULL,
    content TEXT NOT NULL,
    author_id UUID NOT NULL REFERENCES accounts(id),
    subject_account_id UUID REFERENCES accounts(id),
    published BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Public education page only sees published rows
CREATE INDEX idx_articles_published ON articles(created_at DESC) WHERE published;

-- Diagnosis notes for one patient
CREATE INDEX idx_articles_subject ON articles(subject_account_id) WHERE subject_account_id IS NOT NULL;
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS articles CASCADE;
DROP TABLE IF EXISTS appointments CASCADE;
DROP TABLE IF EXISTS accounts CASCADE;
DROP TYPE IF EXISTS appointment_status;
";
