use rusqlite::Connection;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_workspace(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

fn run_cli(workspace: &PathBuf, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_diaryfix"))
        .arg("--workspace")
        .arg(workspace)
        .args(args)
        .output()
        .expect("run diaryfix")
}

fn open_store(workspace: &PathBuf) -> Connection {
    Connection::open(workspace.join("diary.sqlite3")).expect("open db")
}

fn seed(conn: &Connection) {
    conn.execute(
        "INSERT INTO teachers(id, full_name) VALUES('t1','Anna Sergeevna')",
        [],
    )
    .expect("teacher");
    // Music exists only at year 6, so a year-5 student fails validation.
    conn.execute(
        "INSERT INTO subjects(id, title, year_of_study) VALUES('sub-music','Music',6)",
        [],
    )
    .expect("subject");
    conn.execute(
        "INSERT INTO subjects(id, title, year_of_study) VALUES('sub-math','Math',5)",
        [],
    )
    .expect("subject");
    conn.execute(
        "INSERT INTO schoolkids(id, full_name, year_of_study, group_letter)
         VALUES('k1','Ivan Petrov',5,'A')",
        [],
    )
    .expect("schoolkid");
    conn.execute(
        "INSERT INTO lessons(id, year_of_study, group_letter, subject_id, teacher_id, date)
         VALUES('l1',5,'A','sub-math','t1','2026-03-01')",
        [],
    )
    .expect("lesson");
    conn.execute(
        "INSERT INTO marks(id, schoolkid_id, lesson_id, points) VALUES('m1','k1','l1',2)",
        [],
    )
    .expect("mark");
    conn.execute(
        "INSERT INTO chastisements(id, schoolkid_id, text) VALUES('c1','k1','Late')",
        [],
    )
    .expect("chastisement");
}

#[test]
fn missing_subject_halts_after_mutations_and_creates_no_commendation() {
    let workspace = temp_workspace("diaryfix-subject-missing");
    assert!(run_cli(&workspace, &["init"]).status.success());
    {
        let conn = open_store(&workspace);
        seed(&conn);
    }

    let out = run_cli(&workspace, &["fix", "--name", "Ivan", "--subject", "Music"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8(out.stderr).expect("utf8 stderr");
    assert!(
        stderr.contains("'Music' is not taught in year 5"),
        "unexpected stderr: {stderr}"
    );

    // The earlier steps completed and printed before the gate failed.
    let stdout = String::from_utf8(out.stdout).expect("utf8 stdout");
    assert!(stdout.contains("Marks fixed"));
    assert!(stdout.contains("Chastisements cleared"));
    assert!(!stdout.contains("Commendation"));

    // Partial-failure semantics: prior writes stay committed.
    let conn = open_store(&workspace);
    let points: i64 = conn
        .query_row("SELECT points FROM marks WHERE id = 'm1'", [], |r| r.get(0))
        .expect("mark");
    assert_eq!(points, 5);
    let chastisements: i64 = conn
        .query_row("SELECT COUNT(*) FROM chastisements", [], |r| r.get(0))
        .expect("chastisements");
    assert_eq!(chastisements, 0);
    let commendations: i64 = conn
        .query_row("SELECT COUNT(*) FROM commendations", [], |r| r.get(0))
        .expect("commendations");
    assert_eq!(commendations, 0);
}

#[test]
fn subject_title_match_is_exact() {
    let workspace = temp_workspace("diaryfix-subject-exact");
    assert!(run_cli(&workspace, &["init"]).status.success());
    {
        let conn = open_store(&workspace);
        seed(&conn);
    }

    let out = run_cli(&workspace, &["fix", "--name", "Ivan", "--subject", "math"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8(out.stderr).expect("utf8 stderr");
    assert!(stderr.contains("not taught"), "unexpected stderr: {stderr}");
}
