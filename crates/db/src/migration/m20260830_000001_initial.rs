//! Initial database migration.
//!
//! Creates the enums, tables, and indexes for the event management schema.
//! Deleting an event cascades to its finances, tasks, and staff assignments;
//! deleting a catalog service or directory staff member only clears the link.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: ACCOUNTS
        // ============================================================
        db.execute_unprepared(PROFILES_SQL).await?;

        // ============================================================
        // PART 3: CATALOG & DIRECTORY
        // ============================================================
        db.execute_unprepared(SERVICES_SQL).await?;
        db.execute_unprepared(STAFF_SQL).await?;
        db.execute_unprepared(TASK_TEMPLATES_SQL).await?;

        // ============================================================
        // PART 4: EVENTS & CHILDREN
        // ============================================================
        db.execute_unprepared(EVENTS_SQL).await?;
        db.execute_unprepared(EVENT_FINANCES_SQL).await?;
        db.execute_unprepared(EVENT_TASKS_SQL).await?;
        db.execute_unprepared(EVENT_STAFF_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_SQL).await?;
        Ok(())
    }
}

const ENUMS_SQL: &str = r"
CREATE TYPE event_status AS ENUM ('planning', 'running', 'completed', 'canceled');
CREATE TYPE task_status AS ENUM ('pending', 'in_progress', 'done');
CREATE TYPE user_role AS ENUM ('super_admin', 'admin', 'staff');
";

const PROFILES_SQL: &str = r"
CREATE TABLE profiles (
    id UUID PRIMARY KEY,
    email VARCHAR(255) UNIQUE,
    full_name VARCHAR(255),
    role user_role NOT NULL DEFAULT 'staff',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const SERVICES_SQL: &str = r"
CREATE TABLE services (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    service_name VARCHAR(255) NOT NULL,
    base_price NUMERIC(18, 2) NOT NULL DEFAULT 0
);
";

const STAFF_SQL: &str = r"
CREATE TABLE staff (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    full_name VARCHAR(255) NOT NULL,
    staff_type VARCHAR(100),
    phone VARCHAR(50),
    department VARCHAR(100)
);
";

const TASK_TEMPLATES_SQL: &str = r"
CREATE TABLE task_templates (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    task_name VARCHAR(255) NOT NULL,
    description TEXT
);
";

const EVENTS_SQL: &str = r"
CREATE TABLE events (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    organizer VARCHAR(255),
    start_date TIMESTAMPTZ,
    location VARCHAR(255),
    format VARCHAR(100),
    script_link TEXT,
    timeline_link TEXT,
    status event_status NOT NULL DEFAULT 'planning',
    outcome_summary TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_events_start_date ON events(start_date);
CREATE INDEX idx_events_status ON events(status);
";

const EVENT_FINANCES_SQL: &str = r"
CREATE TABLE event_finances (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    event_id UUID NOT NULL REFERENCES events(id) ON DELETE CASCADE,
    service_id UUID REFERENCES services(id) ON DELETE SET NULL,
    service_name VARCHAR(255),
    estimated_amount NUMERIC(18, 2) NOT NULL DEFAULT 0,
    estimated_note TEXT,
    extra_amount NUMERIC(18, 2) NOT NULL DEFAULT 0,
    extra_note TEXT
);

CREATE INDEX idx_event_finances_event ON event_finances(event_id);
";

const EVENT_TASKS_SQL: &str = r"
CREATE TABLE event_tasks (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    event_id UUID NOT NULL REFERENCES events(id) ON DELETE CASCADE,
    task_id UUID REFERENCES task_templates(id) ON DELETE SET NULL,
    staff_id UUID REFERENCES staff(id) ON DELETE SET NULL,
    status task_status NOT NULL DEFAULT 'pending',
    note TEXT
);

CREATE INDEX idx_event_tasks_event ON event_tasks(event_id);
CREATE INDEX idx_event_tasks_staff ON event_tasks(staff_id);
";

const EVENT_STAFF_SQL: &str = r"
CREATE TABLE event_staff (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    event_id UUID NOT NULL REFERENCES events(id) ON DELETE CASCADE,
    full_name VARCHAR(255) NOT NULL,
    phone VARCHAR(50),
    department VARCHAR(100),
    staff_type VARCHAR(100),
    assigned_task TEXT,
    note TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_event_staff_event ON event_staff(event_id);
";

const DROP_SQL: &str = r"
DROP TABLE IF EXISTS event_staff;
DROP TABLE IF EXISTS event_tasks;
DROP TABLE IF EXISTS event_finances;
DROP TABLE IF EXISTS events;
DROP TABLE IF EXISTS task_templates;
DROP TABLE IF EXISTS staff;
DROP TABLE IF EXISTS services;
DROP TABLE IF EXISTS profiles;
DROP TYPE IF EXISTS user_role;
DROP TYPE IF EXISTS task_status;
DROP TYPE IF EXISTS event_status;
";
