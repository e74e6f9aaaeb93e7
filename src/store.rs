use crate::error::RemedyError;
use chrono::NaiveDate;
use rusqlite::Connection;
use uuid::Uuid;

/// Marks strictly below this count as failing.
pub const PASSING_THRESHOLD: i64 = 4;
/// Failing marks are rewritten to this value.
pub const TARGET_POINTS: i64 = 5;

#[derive(Debug, Clone)]
pub struct Schoolkid {
    pub id: String,
    pub full_name: String,
    pub year_of_study: i64,
    pub group_letter: String,
}

/// The slice of a lesson row a commendation is attributed from.
#[derive(Debug, Clone)]
pub struct Lesson {
    pub date: NaiveDate,
    pub teacher_id: String,
    pub subject_id: String,
}

// LIKE metacharacters in the fragment must match literally.
fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Literal substring match on full name. Exactly one row must match; zero
/// and many are distinct errors so the caller can tell the user what to fix.
pub fn find_schoolkid(conn: &Connection, fragment: &str) -> Result<Schoolkid, RemedyError> {
    let pattern = format!("%{}%", escape_like(fragment));
    let mut stmt = conn.prepare(
        "SELECT id, full_name, year_of_study, group_letter
         FROM schoolkids
         WHERE full_name LIKE ? ESCAPE '\\'
         LIMIT 2",
    )?;
    let mut kids = stmt
        .query_map([&pattern], |r| {
            Ok(Schoolkid {
                id: r.get(0)?,
                full_name: r.get(1)?,
                year_of_study: r.get(2)?,
                group_letter: r.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    match kids.len() {
        0 => Err(RemedyError::StudentNotFound {
            name: fragment.to_string(),
        }),
        1 => Ok(kids.remove(0)),
        _ => Err(RemedyError::StudentAmbiguous {
            name: fragment.to_string(),
        }),
    }
}

/// Validation gate only; the commendation insert re-reads the subject id
/// from the chosen lesson.
pub fn subject_exists(
    conn: &Connection,
    title: &str,
    year_of_study: i64,
) -> Result<(), RemedyError> {
    let found: i64 = conn.query_row(
        "SELECT COUNT(*) FROM subjects WHERE title = ? AND year_of_study = ?",
        (title, year_of_study),
        |r| r.get(0),
    )?;
    if found == 0 {
        return Err(RemedyError::SubjectNotFound {
            title: title.to_string(),
            year_of_study,
        });
    }
    Ok(())
}

/// Raises every failing mark the student has, across all subjects.
/// Returns the number of marks rewritten; zero is a successful no-op.
pub fn fix_marks(conn: &Connection, schoolkid_id: &str) -> Result<usize, RemedyError> {
    let changed = conn.execute(
        "UPDATE marks SET points = ? WHERE schoolkid_id = ? AND points < ?",
        (TARGET_POINTS, schoolkid_id, PASSING_THRESHOLD),
    )?;
    Ok(changed)
}

/// Unconditional bulk delete. Returns the number of rows removed.
pub fn remove_chastisements(conn: &Connection, schoolkid_id: &str) -> Result<usize, RemedyError> {
    let removed = conn.execute(
        "DELETE FROM chastisements WHERE schoolkid_id = ?",
        [schoolkid_id],
    )?;
    Ok(removed)
}

/// All lessons of the given subject for the (year, group) cohort.
pub fn lessons_for(
    conn: &Connection,
    year_of_study: i64,
    group_letter: &str,
    subject_title: &str,
) -> Result<Vec<Lesson>, RemedyError> {
    let mut stmt = conn.prepare(
        "SELECT l.date, l.teacher_id, l.subject_id
         FROM lessons l
         JOIN subjects s ON s.id = l.subject_id
         WHERE l.year_of_study = ? AND l.group_letter = ? AND s.title = ?
         ORDER BY l.date",
    )?;
    let lessons = stmt
        .query_map((year_of_study, group_letter, subject_title), |r| {
            let date_text: String = r.get(0)?;
            let date = date_text.parse::<NaiveDate>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    0,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;
            Ok(Lesson {
                date,
                teacher_id: r.get(1)?,
                subject_id: r.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(lessons)
}

/// Inserts the commendation row. `created` is copied from the lesson the
/// praise is attributed to, never from the wall clock.
pub fn create_commendation(
    conn: &Connection,
    schoolkid: &Schoolkid,
    lesson: &Lesson,
    text: &str,
) -> Result<(), RemedyError> {
    conn.execute(
        "INSERT INTO commendations(id, schoolkid_id, teacher_id, subject_id, text, created)
         VALUES(?, ?, ?, ?, ?, ?)",
        (
            Uuid::new_v4().to_string(),
            &schoolkid.id,
            &lesson.teacher_id,
            &lesson.subject_id,
            text,
            lesson.date.to_string(),
        ),
    )?;
    Ok(())
}
