//! Database schema and migrations for SSIS.
//!
//! Migrations are applied sequentially when the database is first opened
//! or upgraded.

/// Database migrations.
///
/// Each migration is a SQL script that will be executed in order.
/// The schema_version table tracks which migrations have been applied.
pub const MIGRATIONS: &[&str] = &[
    // v1: accounts
    r#"
CREATE TABLE users (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    username    TEXT NOT NULL,
    password_hash TEXT NOT NULL,         -- Argon2 PHC string
    email       TEXT NOT NULL,
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE UNIQUE INDEX idx_users_username_nocase ON users(username COLLATE NOCASE);
CREATE UNIQUE INDEX idx_users_email_nocase ON users(email COLLATE NOCASE);
"#,
    // v2: colleges
    r#"
CREATE TABLE colleges (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    code    TEXT NOT NULL UNIQUE,
    name    TEXT NOT NULL
);

CREATE UNIQUE INDEX idx_colleges_name_nocase ON colleges(name COLLATE NOCASE);
"#,
    // v3: programs
    r#"
CREATE TABLE programs (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    code        TEXT NOT NULL UNIQUE,
    name        TEXT NOT NULL,
    college_id  INTEGER REFERENCES colleges(id) ON DELETE SET NULL
);

CREATE UNIQUE INDEX idx_programs_name_nocase ON programs(name COLLATE NOCASE);
CREATE INDEX idx_programs_college_id ON programs(college_id);
"#,
    // v4: students
    r#"
CREATE TABLE students (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    id_number   TEXT NOT NULL UNIQUE
                CHECK (id_number GLOB '[0-9][0-9][0-9][0-9]-[0-9][0-9][0-9][0-9]'),
    last_name   TEXT NOT NULL,
    first_name  TEXT NOT NULL,
    gender      TEXT NOT NULL CHECK (gender IN ('Male', 'Female', 'Others')),
    year_level  TEXT NOT NULL CHECK (year_level IN ('1', '2', '3', '4', '4+')),
    college_id  INTEGER REFERENCES colleges(id) ON DELETE SET NULL,
    program_id  INTEGER REFERENCES programs(id) ON DELETE SET NULL,
    photo_url   TEXT
);

CREATE INDEX idx_students_college_id ON students(college_id);
CREATE INDEX idx_students_program_id ON students(program_id);
"#,
];
