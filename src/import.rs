use anyhow::Context;
use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Deserialize;
use std::path::Path;
use uuid::Uuid;

/// JSON roster fixture. Ids are optional; missing ones are generated, but
/// rows referenced elsewhere in the file (teachers, subjects, lessons) need
/// explicit ids so the references can point at them.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Roster {
    #[serde(default)]
    pub teachers: Vec<TeacherRow>,
    #[serde(default)]
    pub subjects: Vec<SubjectRow>,
    #[serde(default)]
    pub schoolkids: Vec<SchoolkidRow>,
    #[serde(default)]
    pub lessons: Vec<LessonRow>,
    #[serde(default)]
    pub marks: Vec<MarkRow>,
    #[serde(default)]
    pub chastisements: Vec<ChastisementRow>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TeacherRow {
    pub id: Option<String>,
    pub full_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SubjectRow {
    pub id: Option<String>,
    pub title: String,
    pub year_of_study: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SchoolkidRow {
    pub id: Option<String>,
    pub full_name: String,
    pub year_of_study: i64,
    pub group_letter: String,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub entry_year: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LessonRow {
    pub id: Option<String>,
    pub year_of_study: i64,
    pub group_letter: String,
    pub subject_id: String,
    pub teacher_id: String,
    pub date: String,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub timeslot: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MarkRow {
    pub id: Option<String>,
    pub schoolkid_id: String,
    pub lesson_id: String,
    pub points: i64,
    #[serde(default)]
    pub created: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ChastisementRow {
    pub id: Option<String>,
    pub schoolkid_id: String,
    #[serde(default)]
    pub teacher_id: Option<String>,
    pub text: String,
    #[serde(default)]
    pub created: Option<String>,
}

fn row_id(id: &Option<String>) -> String {
    id.clone().unwrap_or_else(|| Uuid::new_v4().to_string())
}

pub struct ImportSummary {
    pub teachers: usize,
    pub subjects: usize,
    pub schoolkids: usize,
    pub lessons: usize,
    pub marks: usize,
    pub chastisements: usize,
}

/// Loads a roster file into the store. All rows go in inside one
/// transaction so a bad fixture leaves the store untouched.
pub fn import_roster(conn: &mut Connection, path: &Path) -> anyhow::Result<ImportSummary> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading roster file {}", path.display()))?;
    let roster: Roster = serde_json::from_str(&raw)
        .with_context(|| format!("parsing roster file {}", path.display()))?;

    for lesson in &roster.lessons {
        lesson
            .date
            .parse::<NaiveDate>()
            .with_context(|| format!("lesson date '{}' is not an ISO date", lesson.date))?;
    }

    let tx = conn.transaction()?;

    for t in &roster.teachers {
        tx.execute(
            "INSERT INTO teachers(id, full_name) VALUES(?, ?)",
            (row_id(&t.id), &t.full_name),
        )?;
    }
    for s in &roster.subjects {
        tx.execute(
            "INSERT INTO subjects(id, title, year_of_study) VALUES(?, ?, ?)",
            (row_id(&s.id), &s.title, s.year_of_study),
        )?;
    }
    for k in &roster.schoolkids {
        tx.execute(
            "INSERT INTO schoolkids(id, full_name, year_of_study, group_letter, birthday, entry_year)
             VALUES(?, ?, ?, ?, ?, ?)",
            (
                row_id(&k.id),
                &k.full_name,
                k.year_of_study,
                &k.group_letter,
                &k.birthday,
                k.entry_year,
            ),
        )?;
    }
    for l in &roster.lessons {
        tx.execute(
            "INSERT INTO lessons(id, year_of_study, group_letter, subject_id, teacher_id, date, room, timeslot)
             VALUES(?, ?, ?, ?, ?, ?, ?, ?)",
            (
                row_id(&l.id),
                l.year_of_study,
                &l.group_letter,
                &l.subject_id,
                &l.teacher_id,
                &l.date,
                &l.room,
                l.timeslot,
            ),
        )?;
    }
    for m in &roster.marks {
        tx.execute(
            "INSERT INTO marks(id, schoolkid_id, lesson_id, points, created)
             VALUES(?, ?, ?, ?, ?)",
            (
                row_id(&m.id),
                &m.schoolkid_id,
                &m.lesson_id,
                m.points,
                &m.created,
            ),
        )?;
    }
    for c in &roster.chastisements {
        tx.execute(
            "INSERT INTO chastisements(id, schoolkid_id, teacher_id, text, created)
             VALUES(?, ?, ?, ?, ?)",
            (
                row_id(&c.id),
                &c.schoolkid_id,
                &c.teacher_id,
                &c.text,
                &c.created,
            ),
        )?;
    }

    tx.commit()?;

    Ok(ImportSummary {
        teachers: roster.teachers.len(),
        subjects: roster.subjects.len(),
        schoolkids: roster.schoolkids.len(),
        lessons: roster.lessons.len(),
        marks: roster.marks.len(),
        chastisements: roster.chastisements.len(),
    })
}
