mod db;
mod error;
mod import;
mod phrases;
mod remedy;
mod store;

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "diaryfix", about = "Maintenance tool for an electronic school-diary store")]
struct Cli {
    /// Workspace directory holding diary.sqlite3.
    #[arg(long, default_value = ".")]
    workspace: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the record store schema and exit.
    Init,
    /// Load a JSON roster fixture into the store.
    Import {
        /// Roster file to load.
        #[arg(long)]
        file: PathBuf,
    },
    /// Fix marks, clear chastisements and add a commendation for one student.
    Fix {
        /// Name fragment matching exactly one student.
        #[arg(short, long)]
        name: String,
        /// Subject title, exact match, at the student's year of study.
        #[arg(short, long)]
        subject: String,
        /// Seed for phrase and lesson selection; omit for OS randomness.
        #[arg(long)]
        seed: Option<u64>,
        /// Phrase file (one phrase per line) replacing the built-in pool.
        #[arg(long)]
        phrases: Option<PathBuf>,
    },
}

fn run(cli: Cli) -> anyhow::Result<Result<(), error::RemedyError>> {
    let mut conn = db::open_db(&cli.workspace)?;

    match cli.command {
        Command::Init => {
            println!("Store ready at {}", cli.workspace.join(db::DB_FILE).display());
            Ok(Ok(()))
        }
        Command::Import { file } => {
            let summary = import::import_roster(&mut conn, &file)?;
            println!(
                "Imported {} teachers, {} subjects, {} schoolkids, {} lessons, {} marks, {} chastisements",
                summary.teachers,
                summary.subjects,
                summary.schoolkids,
                summary.lessons,
                summary.marks,
                summary.chastisements
            );
            Ok(Ok(()))
        }
        Command::Fix {
            name,
            subject,
            seed,
            phrases: phrase_file,
        } => {
            let pool: Vec<String> = match phrase_file {
                Some(path) => phrases::load(&path)?,
                None => phrases::DEFAULT_PHRASES.iter().map(|s| s.to_string()).collect(),
            };
            let mut rng = match seed {
                Some(s) => StdRng::seed_from_u64(s),
                None => StdRng::from_os_rng(),
            };
            let result = remedy::run(&conn, &mut rng, &name, &subject, &pool, |line| {
                println!("{}", line);
            });
            match result {
                Ok(()) => Ok(Ok(())),
                // Store-level failures are plumbing, not a user mistake.
                Err(error::RemedyError::Db(e)) => Err(e.into()),
                Err(e) => Ok(Err(e)),
            }
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(Ok(())) => ExitCode::SUCCESS,
        Ok(Err(domain)) => {
            eprintln!("error: {}", domain);
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}
