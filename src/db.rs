use rusqlite::Connection;
use std::path::Path;

pub const DB_FILE: &str = "diary.sqlite3";

pub fn open_db(workspace: &Path) -> anyhow::Result<Connection> {
    std::fs::create_dir_all(workspace)?;
    let db_path = workspace.join(DB_FILE);
    let conn = Connection::open(db_path)?;
    conn.execute("PRAGMA foreign_keys = ON", [])?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS teachers(
            id TEXT PRIMARY KEY,
            full_name TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS subjects(
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            year_of_study INTEGER NOT NULL,
            UNIQUE(title, year_of_study)
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_subjects_year ON subjects(year_of_study)",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS schoolkids(
            id TEXT PRIMARY KEY,
            full_name TEXT NOT NULL,
            year_of_study INTEGER NOT NULL,
            group_letter TEXT NOT NULL,
            birthday TEXT,
            entry_year INTEGER
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_schoolkids_name ON schoolkids(full_name)",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS lessons(
            id TEXT PRIMARY KEY,
            year_of_study INTEGER NOT NULL,
            group_letter TEXT NOT NULL,
            subject_id TEXT NOT NULL,
            teacher_id TEXT NOT NULL,
            date TEXT NOT NULL,
            room TEXT,
            timeslot INTEGER,
            FOREIGN KEY(subject_id) REFERENCES subjects(id),
            FOREIGN KEY(teacher_id) REFERENCES teachers(id)
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_lessons_cohort ON lessons(year_of_study, group_letter, subject_id)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_lessons_teacher ON lessons(teacher_id)",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS marks(
            id TEXT PRIMARY KEY,
            schoolkid_id TEXT NOT NULL,
            lesson_id TEXT NOT NULL,
            points INTEGER NOT NULL,
            created TEXT,
            FOREIGN KEY(schoolkid_id) REFERENCES schoolkids(id),
            FOREIGN KEY(lesson_id) REFERENCES lessons(id)
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_marks_schoolkid ON marks(schoolkid_id)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_marks_lesson ON marks(lesson_id)",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS chastisements(
            id TEXT PRIMARY KEY,
            schoolkid_id TEXT NOT NULL,
            teacher_id TEXT,
            text TEXT NOT NULL,
            created TEXT,
            FOREIGN KEY(schoolkid_id) REFERENCES schoolkids(id),
            FOREIGN KEY(teacher_id) REFERENCES teachers(id)
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_chastisements_schoolkid ON chastisements(schoolkid_id)",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS commendations(
            id TEXT PRIMARY KEY,
            schoolkid_id TEXT NOT NULL,
            teacher_id TEXT NOT NULL,
            subject_id TEXT NOT NULL,
            text TEXT NOT NULL,
            created TEXT NOT NULL,
            FOREIGN KEY(schoolkid_id) REFERENCES schoolkids(id),
            FOREIGN KEY(teacher_id) REFERENCES teachers(id),
            FOREIGN KEY(subject_id) REFERENCES subjects(id)
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_commendations_schoolkid ON commendations(schoolkid_id)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_commendations_subject ON commendations(subject_id)",
        [],
    )?;

    Ok(conn)
}
