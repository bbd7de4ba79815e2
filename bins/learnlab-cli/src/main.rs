mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "learnlab-cli")]
#[command(about = "LearnLab CLI - Manage curriculum files and check learner output", long_about = None)]
struct Cli {
    /// Curriculum file to operate on
    #[arg(long, global = true, default_value = "config/curriculum.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a curriculum file with a starter chapter
    Init,

    /// Add a chapter to the curriculum
    AddChapter {
        /// Chapter id (e.g., python-basics)
        #[arg(long)]
        id: String,

        /// Language taught: python, sql or r
        #[arg(short, long)]
        language: String,

        #[arg(short, long)]
        title: String,

        #[arg(short, long, default_value = "")]
        description: String,

        /// Position in the chapter list (defaults to last)
        #[arg(short, long)]
        order: Option<u32>,
    },

    /// Add a lesson to an existing chapter
    AddLesson {
        /// Chapter the lesson belongs to
        #[arg(short, long)]
        chapter: String,

        /// Lesson id, unique across the curriculum
        #[arg(long)]
        id: String,

        #[arg(short, long)]
        title: String,

        /// Markdown file with the lesson text
        #[arg(long)]
        content_file: Option<PathBuf>,

        /// File with the code shown in the editor
        #[arg(long)]
        starter_file: Option<PathBuf>,

        /// File with the reference solution
        #[arg(long)]
        solution_file: Option<PathBuf>,

        /// Expected output (defaults to the "no specific output" placeholder)
        #[arg(short, long)]
        expected: Option<String>,
    },

    /// Remove a lesson from the curriculum
    RemoveLesson {
        #[arg(long)]
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long, default_value = "false")]
        yes: bool,
    },

    /// List chapters and lessons
    List {
        /// Only show chapters for this language
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Check the curriculum for content problems
    Audit {
        /// Replace blank expected outputs with the placeholder and save
        #[arg(long, default_value = "false")]
        fix: bool,
    },

    /// Verify captured output against an expected output
    Verify {
        #[arg(long)]
        expected_file: PathBuf,

        #[arg(long)]
        actual_file: PathBuf,

        #[arg(long)]
        code_file: PathBuf,

        /// Grade graph exercises on output only
        #[arg(long, default_value = "false")]
        no_graph_check: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            commands::init_curriculum(&cli.config)?;
        }
        Commands::AddChapter {
            id,
            language,
            title,
            description,
            order,
        } => {
            commands::add_chapter(&cli.config, &id, &language, &title, &description, order)?;
        }
        Commands::AddLesson {
            chapter,
            id,
            title,
            content_file,
            starter_file,
            solution_file,
            expected,
        } => {
            commands::add_lesson(
                &cli.config,
                &chapter,
                &id,
                &title,
                commands::LessonSources {
                    content_file: content_file.as_deref(),
                    starter_file: starter_file.as_deref(),
                    solution_file: solution_file.as_deref(),
                    expected: expected.as_deref(),
                },
            )?;
        }
        Commands::RemoveLesson { id, yes } => {
            commands::remove_lesson(&cli.config, &id, yes)?;
        }
        Commands::List { language } => {
            commands::list_curriculum(&cli.config, language.as_deref())?;
        }
        Commands::Audit { fix } => {
            if !commands::audit_curriculum(&cli.config, fix)? {
                std::process::exit(1);
            }
        }
        Commands::Verify {
            expected_file,
            actual_file,
            code_file,
            no_graph_check,
        } => {
            let correct =
                commands::verify_files(&expected_file, &actual_file, &code_file, !no_graph_check)?;
            if !correct {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
