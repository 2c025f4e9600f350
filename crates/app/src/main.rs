use std::fmt;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;

use lingo_core::model::{
    AVATAR_OPTIONS, LANGUAGE_CATALOG, LanguageCode, ProfileUpdate, SettingsUpdate, UserProgress,
    VocabEntry,
};
use lingo_core::quiz::Question;
use services::{AppServices, Clock, ProgressConfig, QuizSession};

mod logging;

const DEFAULT_DB_URL: &str = "sqlite://lingo.sqlite3";

#[derive(Parser)]
#[command(name = "lingo")]
#[command(about = "Track language-learning progress and practice vocabulary")]
#[command(version)]
struct Cli {
    /// `SQLite` database URL or file path
    #[arg(long = "db", global = true, env = "LINGO_DB_URL", default_value = DEFAULT_DB_URL)]
    db_url: String,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show dashboard statistics
    Stats,

    /// Print the full stored progress record
    Show,

    /// List the offered languages and how far each one got
    Languages,

    /// Record a finished quiz
    RecordQuiz {
        language: LanguageCode,
        correct: u32,
        total: u32,
    },

    /// Record a finished flashcard session
    RecordFlashcards { language: LanguageCode, cards: u32 },

    /// Change the learner's name or avatar
    Profile {
        #[arg(long)]
        name: Option<String>,

        #[arg(long, value_parser = PossibleValuesParser::new(AVATAR_OPTIONS))]
        avatar: Option<String>,
    },

    /// Change learning preferences
    Settings {
        #[arg(long)]
        sound: Option<bool>,

        #[arg(long)]
        animations: Option<bool>,

        /// Daily goal in minutes
        #[arg(long)]
        daily_goal: Option<u32>,
    },

    /// Discard all stored progress
    Reset,

    /// Write the progress record as JSON
    Export {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a quiz from a vocabulary JSON file
    Quiz {
        language: LanguageCode,

        /// JSON array of `{ "word", "meaning", "pronunciation" }` objects
        vocab: PathBuf,

        /// Seed for a reproducible quiz
        #[arg(long)]
        seed: Option<u64>,

        /// Answer the questions on stdin and record the score
        #[arg(short, long)]
        interactive: bool,
    },
}

#[derive(Debug)]
enum ArgsError {
    InvalidDbUrl { raw: String },
    Vocab { path: PathBuf, reason: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::Vocab { path, reason } => {
                write!(f, "cannot read vocabulary {}: {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn normalize_sqlite_url(raw: &str) -> Result<String, ArgsError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ArgsError::InvalidDbUrl { raw: raw.to_owned() });
    }
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return Ok(trimmed.to_owned());
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    Ok(format!("sqlite://{}", absolute.display()))
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_owned(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_owned(),
        }
        .into());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn load_vocabulary(path: &Path) -> Result<Vec<VocabEntry>, ArgsError> {
    let vocab_error = |reason: String| ArgsError::Vocab {
        path: path.to_path_buf(),
        reason,
    };
    let raw = std::fs::read_to_string(path).map_err(|e| vocab_error(e.to_string()))?;
    serde_json::from_str(&raw).map_err(|e| vocab_error(e.to_string()))
}

fn print_json(value: &impl serde::Serialize) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_languages(progress: &UserProgress) {
    for entry in &LANGUAGE_CATALOG {
        let record = LanguageCode::new(entry.code)
            .ok()
            .and_then(|code| progress.language(&code).cloned());
        match record {
            Some(record) if record.completed => {
                println!(
                    "{:<10} {}  completed, best {}%",
                    entry.code, entry.label, record.best_score
                );
            }
            Some(record) => println!(
                "{:<10} {}  {}% through, best {}%",
                entry.code,
                entry.label,
                record.course_progress(),
                record.best_score
            ),
            None => println!("{:<10} {}  not started", entry.code, entry.label),
        }
    }
}

//
// ─── QUIZ ──────────────────────────────────────────────────────────────────────
//

fn print_question(number: usize, question: &Question) {
    println!();
    println!("{number}. {}", question.prompt());
    for (index, option) in question.options().iter().enumerate() {
        println!("   {}) {option}", index + 1);
    }
    print!("> ");
}

/// A typed number picks that option; anything else is taken as the answer text.
fn resolve_choice<'a>(question: &'a Question, input: &'a str) -> &'a str {
    input
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| question.options().get(i))
        .map_or(input, String::as_str)
}

fn run_interactive(session: &mut QuizSession) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    while let Some(question) = session.current() {
        let number = session.progress().answered + 1;
        print_question(number, question);
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let choice = resolve_choice(question, line.trim()).to_owned();

        let answer = session.answer_current(&choice)?;
        if answer.is_correct {
            println!("correct");
        } else {
            println!("wrong, the answer is {}", answer.expected);
        }
    }
    Ok(())
}

async fn run_quiz(
    services: &AppServices,
    language: LanguageCode,
    vocab: &Path,
    seed: Option<u64>,
    interactive: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let vocabulary = load_vocabulary(vocab)?;
    let quizzes = services.quizzes();
    let mut session = match seed {
        Some(seed) => {
            quizzes.start_quiz_with_rng(language, &vocabulary, &mut StdRng::seed_from_u64(seed))?
        }
        None => quizzes.start_quiz(language, &vocabulary)?,
    };

    if !interactive {
        return print_json(&session.questions());
    }

    run_interactive(&mut session)?;
    if !session.is_complete() {
        let progress = session.progress();
        println!();
        println!(
            "quiz abandoned after {} of {} questions ({} correct)",
            progress.answered,
            progress.total,
            session.correct_answers()
        );
        return Ok(());
    }

    let finished = quizzes.finish(&session).await?;
    let result = finished.result;
    println!();
    println!(
        "{} / {} correct ({}%): {}",
        result.correct(),
        result.total(),
        result.percentage(),
        result.performance().label()
    );
    println!("current streak: {} day(s)", finished.progress.profile.current_streak);
    Ok(())
}

//
// ─── ENTRY ─────────────────────────────────────────────────────────────────────
//

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let db_url = normalize_sqlite_url(&cli.db_url)?;
    prepare_sqlite_file(&db_url)?;

    let config = ProgressConfig::from_env();
    let services = AppServices::new_sqlite(&db_url, Clock::default_clock(), &config).await?;
    let progress = services.progress();

    match cli.command {
        Commands::Stats => print_json(&progress.compute_statistics().await)?,
        Commands::Show => print_json(&progress.load().await)?,
        Commands::Languages => print_languages(&progress.load().await),
        Commands::RecordQuiz {
            language,
            correct,
            total,
        } => {
            let updated = progress.record_quiz_result(&language, correct, total).await?;
            if let Some(record) = updated.language(&language) {
                println!(
                    "{language}: best {}%, {} attempt(s){}",
                    record.best_score,
                    record.attempts,
                    if record.completed { ", completed" } else { "" }
                );
            }
            println!("current streak: {} day(s)", updated.profile.current_streak);
        }
        Commands::RecordFlashcards { language, cards } => {
            let updated = progress.record_flashcard_session(&language, cards).await;
            println!(
                "{cards} card(s) recorded for {language}; {} in total",
                updated.statistics.total_flashcards_studied
            );
        }
        Commands::Profile { name, avatar } => {
            let update = ProfileUpdate { name, avatar };
            let updated = progress.update_profile(update).await;
            println!("{} {}", updated.profile.avatar, updated.profile.name);
        }
        Commands::Settings {
            sound,
            animations,
            daily_goal,
        } => {
            let update = SettingsUpdate {
                sound_enabled: sound,
                animations_enabled: animations,
                daily_goal_minutes: daily_goal,
            };
            let updated = progress.update_settings(update).await?;
            print_json(&updated.settings)?;
        }
        Commands::Reset => {
            progress.reset().await;
            println!("progress reset");
        }
        Commands::Export { output } => {
            let json = progress.export_json().await?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    tracing::info!(path = %path.display(), "progress exported");
                }
                None => println!("{json}"),
            }
        }
        Commands::Quiz {
            language,
            vocab,
            seed,
            interactive,
        } => run_quiz(&services, language, &vocab, seed, interactive).await?,
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_tracing(if cli.verbose { "debug" } else { "info" });

    if let Err(err) = run(cli).await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
