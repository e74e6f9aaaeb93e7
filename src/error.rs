use thiserror::Error;

/// Failures surfaced by the remediation sequence. The three lookup kinds map
/// to the lookups that detect them; `NoLessonForSubject` covers the case
/// where the subject exists but no lesson is scheduled for the student's
/// cohort, so there is nothing to attribute a commendation to.
#[derive(Debug, Error)]
pub enum RemedyError {
    #[error("no student matches name fragment '{name}'; fix the name and retry")]
    StudentNotFound { name: String },

    #[error("name fragment '{name}' matches more than one student; give a more specific name")]
    StudentAmbiguous { name: String },

    #[error("subject '{title}' is not taught in year {year_of_study}; fix the subject title")]
    SubjectNotFound { title: String, year_of_study: i64 },

    #[error("no '{title}' lesson is scheduled for year {year_of_study} group {group_letter}")]
    NoLessonForSubject {
        title: String,
        year_of_study: i64,
        group_letter: String,
    },

    #[error("record store error: {0}")]
    Db(#[from] rusqlite::Error),
}
