use anyhow::{Context, Result, bail};
use catalog_client::tmdb::DEFAULT_BASE_URL;
use catalog_client::{CachedCatalog, TmdbClient};
use clap::{Parser, Subcommand};
use colored::Colorize;
use engine::{RecommendConfig, RecommendationOrchestrator, Recommendations, Session};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use taste_model::quiz::option_letter;
use taste_model::{QUESTIONS, parse_answer, parse_answers};
use tracing::{debug, warn};

type TmdbCatalog = CachedCatalog<TmdbClient>;

/// Overview length shown under `--explain`
const OVERVIEW_CHARS: usize = 180;

/// QuizRecs - Quiz-driven movie recommendations
#[derive(Parser)]
#[command(name = "quiz-recs")]
#[command(about = "Movie recommendations from a ten-question personality quiz", long_about = None)]
struct Cli {
    /// TMDB API key (v3)
    #[arg(long, env = "TMDB_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// TOML file with pipeline settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Catalog base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Catalog language tag, overrides the config file
    #[arg(long)]
    language: Option<String>,

    /// Number of recommendations, overrides the config file
    #[arg(long)]
    limit: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the quiz questions and their options
    Questions,

    /// Get recommendations for a finished answer sheet
    Recommend {
        /// Ten answers, letters A-D or digits 0-3 (e.g. "ABCDA BCDAB")
        #[arg(long)]
        answers: String,

        /// Show the score breakdown for each recommendation
        #[arg(long)]
        explain: bool,
    },

    /// Take the quiz, then refine the list with likes and dislikes
    Interactive {
        /// Show the score breakdown for each recommendation
        #[arg(long)]
        explain: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Questions => handle_questions(),
        Commands::Recommend { answers, explain } => {
            let session = build_session(&cli)?;
            handle_recommend(session, answers, *explain).await?
        }
        Commands::Interactive { explain } => {
            let session = build_session(&cli)?;
            handle_interactive(session, *explain).await?
        }
    }

    Ok(())
}

/// Load the config, apply flag overrides and wire up the catalog
fn build_session(cli: &Cli) -> Result<Session<TmdbCatalog>> {
    let mut config = match &cli.config {
        Some(path) => RecommendConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => RecommendConfig::default(),
    };
    if let Some(language) = &cli.language {
        config.language = language.clone();
    }
    if let Some(limit) = cli.limit {
        config.final_k = limit;
    }
    debug!(?config, "Effective configuration");

    let api_key = cli.api_key.clone().unwrap_or_default();
    let client = TmdbClient::with_base_url(api_key, cli.base_url.as_str())
        .context("Cannot create the TMDB client (set TMDB_API_KEY or pass --api-key)")?;
    let catalog = Arc::new(CachedCatalog::new(client));

    let orchestrator = RecommendationOrchestrator::new(catalog, config)
        .context("Invalid pipeline configuration")?;
    Ok(Session::new(orchestrator))
}

/// Handle the 'questions' command
fn handle_questions() {
    for (number, question) in QUESTIONS.iter().enumerate() {
        println!("{}", format!("Q{}. {}", number + 1, question.prompt).bold().blue());
        for (i, option) in question.options.iter().enumerate() {
            println!("  {}) {}", option_letter(i).to_string().green(), option);
        }
    }
}

/// Handle the 'recommend' command
async fn handle_recommend(
    mut session: Session<TmdbCatalog>,
    answers: &str,
    explain: bool,
) -> Result<()> {
    let answers = parse_answers(answers).context("Could not parse answers")?;
    session.submit_quiz(&answers).context("Quiz answers rejected")?;

    let start = Instant::now();
    let recommendations = session.refresh().await.context("Failed to get recommendations")?;
    print_recommendations(recommendations, explain);
    println!("{}", format!("Done in {:.2?}", start.elapsed()).dimmed());
    Ok(())
}

/// Handle the 'interactive' command
async fn handle_interactive(mut session: Session<TmdbCatalog>, explain: bool) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let answers = run_quiz(&mut lines)?;
    session.submit_quiz(&answers).context("Quiz answers rejected")?;
    refresh_and_print(&mut session, explain).await?;
    print_help();

    loop {
        let Some(line) = prompt(&mut lines, ">")? else {
            return Ok(());
        };
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };

        match command {
            "like" | "dislike" => {
                let liked = command == "like";
                let Some(rank) = words.next().and_then(|w| w.parse::<usize>().ok()) else {
                    println!("{}", format!("usage: {command} <rank>").yellow());
                    continue;
                };
                let movie_id = session
                    .last_recommendations()
                    .and_then(|recs| rank.checked_sub(1).and_then(|i| recs.items.get(i)))
                    .map(|item| item.movie().id);
                match movie_id {
                    Some(id) if session.record_feedback_for(id, liked)? => {
                        println!("{} Noted. Type 'refresh' to update the list.", "✓".green());
                    }
                    _ => println!("{}", format!("No recommendation at rank {rank}").yellow()),
                }
            }
            "refresh" => refresh_and_print(&mut session, explain).await?,
            "reset" => {
                session.reset_feedback();
                println!("{} Feedback cleared.", "✓".green());
            }
            "quiz" => {
                let answers = run_quiz(&mut lines)?;
                session.submit_quiz(&answers).context("Quiz answers rejected")?;
                refresh_and_print(&mut session, explain).await?;
            }
            "profile" => {
                if let Some(recs) = session.last_recommendations() {
                    println!("{}\n{}", recs.top_genre_label.bold(), recs.breakdown_text);
                }
            }
            "help" => print_help(),
            "quit" | "exit" => return Ok(()),
            other => println!("{}", format!("Unknown command '{other}', try 'help'").yellow()),
        }
    }
}

/// Ask all questions until each gets a valid answer
fn run_quiz(lines: &mut impl Iterator<Item = io::Result<String>>) -> Result<Vec<usize>> {
    let mut answers = Vec::with_capacity(QUESTIONS.len());

    for (number, question) in QUESTIONS.iter().enumerate() {
        println!("\n{}", format!("Q{}. {}", number + 1, question.prompt).bold().blue());
        for (i, option) in question.options.iter().enumerate() {
            println!("  {}) {}", option_letter(i).to_string().green(), option);
        }

        loop {
            let Some(line) = prompt(lines, "Your answer (A-D):")? else {
                bail!("Input closed before the quiz was finished");
            };
            match parse_answer(&line) {
                Ok(index) => {
                    answers.push(index);
                    break;
                }
                Err(e) => println!("{}", e.to_string().yellow()),
            }
        }
    }

    Ok(answers)
}

async fn refresh_and_print(session: &mut Session<TmdbCatalog>, explain: bool) -> Result<()> {
    match session.refresh().await {
        Ok(recommendations) => print_recommendations(recommendations, explain),
        // Keep the session alive; the user can retry with 'refresh'
        Err(e) => {
            warn!("Refresh failed: {e:#}");
            println!("{}", format!("Could not refresh: {e}").red());
        }
    }
    Ok(())
}

/// Print a prompt and read one line, `None` on end of input
fn prompt(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    label: &str,
) -> Result<Option<String>> {
    print!("{} ", label.bold());
    io::stdout().flush().context("Failed to flush stdout")?;
    match lines.next() {
        Some(line) => Ok(Some(line.context("Failed to read input")?)),
        None => Ok(None),
    }
}

fn print_help() {
    println!("\nCommands:");
    println!("  like <rank>     more like this");
    println!("  dislike <rank>  less like this");
    println!("  refresh         rerun with your feedback");
    println!("  reset           forget all feedback");
    println!("  quiz            take the quiz again");
    println!("  profile         show your taste profile");
    println!("  quit");
}

/// Helper function to format and print recommendations
fn print_recommendations(recommendations: &Recommendations, explain: bool) {
    println!("\n{}", recommendations.top_genre_label.bold().magenta());
    if explain {
        println!("{}", recommendations.breakdown_text.dimmed());
    }

    if recommendations.is_empty() {
        let hint = "No recommendations found. Try another language or retake the quiz.";
        println!("{}", hint.yellow());
        return;
    }

    println!("{}", "Movie Recommendations:".bold().blue());
    for (i, rec) in recommendations.items.iter().enumerate() {
        let movie = rec.movie();
        let year = movie
            .year()
            .map(|y| y.to_string())
            .unwrap_or_else(|| "n/a".to_string());
        let genres = movie
            .genres()
            .map(|g| g.label())
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{}. {} ({}) [{}] - {:.1}/10 from {} votes",
            (i + 1).to_string().green(),
            movie.title.bold(),
            year,
            genres,
            movie.vote_average,
            movie.vote_count
        );
        println!("   {}", rec.reason);
        if let Some(url) = movie.poster_url() {
            println!("   {}", url.dimmed());
        }

        if explain {
            if movie.has_overview() {
                println!("   {}", truncate(movie.overview.trim(), OVERVIEW_CHARS).italic());
            }
            let b = &rec.breakdown;
            println!(
                "   score {:.3} = genre {:.2} · alignment {:.2} · quality {:.2} · \
                 popularity {:.2} - penalty {:.2}",
                rec.score, b.genre_match, b.alignment, b.quality, b.popularity, b.penalty
            );
        }
    }

    if explain {
        let s = recommendations.stats;
        println!(
            "{}",
            format!(
                "collected {} · filtered {} · seeds {} · expanded {} · merged {} · ranked {}",
                s.collected, s.filtered, s.seeds, s.expanded, s.merged, s.ranked
            )
            .dimmed()
        );
    }
}

/// Cut `text` to at most `max` characters, marking the cut with an ellipsis
fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => format!("{}…", text[..end].trim_end()),
        None => text.to_string(),
    }
}
