use crate::error::RemedyError;
use crate::store;
use rand::Rng;
use rusqlite::Connection;

/// Runs the whole remediation sequence for one student:
/// resolve -> fix marks -> clear chastisements -> validate subject ->
/// create commendation. Each step's failure aborts the rest; earlier
/// mutations are deliberately left in place (no transaction around the
/// sequence).
///
/// `on_step` receives one status line per completed step, in order, so a
/// late failure still reports the steps that did run.
pub fn run(
    conn: &Connection,
    rng: &mut impl Rng,
    name_fragment: &str,
    subject_title: &str,
    phrases: &[String],
    mut on_step: impl FnMut(&str),
) -> Result<(), RemedyError> {
    let kid = store::find_schoolkid(conn, name_fragment)?;
    on_step(&format!(
        "Student matched: {} (year {}, group {})",
        kid.full_name, kid.year_of_study, kid.group_letter
    ));

    let raised = store::fix_marks(conn, &kid.id)?;
    on_step(&format!(
        "Marks fixed for {}: {} raised to {}",
        kid.full_name,
        raised,
        store::TARGET_POINTS
    ));

    let removed = store::remove_chastisements(conn, &kid.id)?;
    on_step(&format!(
        "Chastisements cleared for {}: {} removed",
        kid.full_name, removed
    ));

    store::subject_exists(conn, subject_title, kid.year_of_study)?;

    let lessons = store::lessons_for(conn, kid.year_of_study, &kid.group_letter, subject_title)?;
    if lessons.is_empty() {
        return Err(RemedyError::NoLessonForSubject {
            title: subject_title.to_string(),
            year_of_study: kid.year_of_study,
            group_letter: kid.group_letter.clone(),
        });
    }
    let lesson = &lessons[rng.random_range(0..lessons.len())];
    let text = crate::phrases::pick(rng, phrases);
    store::create_commendation(conn, &kid, lesson, text)?;
    on_step(&format!(
        "Commendation in {} added for {} (year {}, group {})",
        subject_title, kid.full_name, kid.year_of_study, kid.group_letter
    ));

    Ok(())
}
