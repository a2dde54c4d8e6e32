// src/main.rs
mod utils;
mod fetch;
mod extractors;
mod inference;
mod session;

use clap::Parser;
use std::io::{self, BufRead, Write};
use utils::AppError;
use fetch::{DocumentFetcher, HttpFetcher};
use extractors::{NodeTree, SectionExtractor};
use inference::client::{DEFAULT_QA_ENDPOINT, DEFAULT_QG_ENDPOINT};
use inference::{GenerationParams, HttpAnswerEngine, HttpQuestionGenerator};
use session::{Session, SessionConfig};

/// Ask questions about the sections of a web page
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Page to download (prompted for when omitted)
    url: Option<String>,

    /// 1-based number of the section to query (prompted for when omitted; empty means all)
    #[arg(short, long)]
    section: Option<String>,

    /// Text2text-generation endpoint used to generate questions
    #[arg(long, env = "PAGE_QA_QG_ENDPOINT", default_value = DEFAULT_QG_ENDPOINT)]
    qg_endpoint: String,

    /// Question-answering endpoint
    #[arg(long, env = "PAGE_QA_QA_ENDPOINT", default_value = DEFAULT_QA_ENDPOINT)]
    qa_endpoint: String,

    /// Bearer token for the inference endpoints
    #[arg(long, env = "HF_TOKEN", hide_env_values = true)]
    hf_token: Option<String>,

    /// Number of questions requested per section
    #[arg(long, default_value_t = 5)]
    max_questions: usize,

    /// Maximum length of a generated question, in model tokens
    #[arg(long, default_value_t = 64)]
    max_length: usize,

    /// Characters of section text sent to the question generator
    #[arg(long, default_value_t = 1000)]
    context_chars: usize,

    /// Disable sampling during question generation
    #[arg(long)]
    no_sample: bool,

    /// User-Agent header for the page download
    #[arg(long, default_value = fetch::DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

/// Prints `prompt` and reads one trimmed line from stdin.
fn prompt_line(prompt: &str) -> Result<String, AppError> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", prompt)?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Parse CLI Arguments and setup logging (reads RUST_LOG env var)
    let args = Args::parse();
    utils::logging::setup_logging(args.verbose);

    // 2. Download the page; this is the only failure that ends the run
    let url = match &args.url {
        Some(url) => url.trim().to_string(),
        None => prompt_line("Enter the page URL (non-image): ")?,
    };
    if url.is_empty() {
        return Err(AppError::Config("No URL given".to_string()));
    }

    tracing::info!("Starting session for {}", url);
    let fetcher = HttpFetcher::new(&args.user_agent)?;
    let html = fetcher.fetch(&url).await?;

    // 3. Extract sections
    let sections = {
        let tree = NodeTree::parse(&html);
        let sections = SectionExtractor::new().extract(&tree);
        if sections.is_empty() {
            println!("No sections detected. Using the full page text.");
            SectionExtractor::full_text(&tree)
        } else {
            sections
        }
    };

    // 4. Let the user narrow the working set
    let mut stdout = io::stdout();
    session::list_sections(&sections, &mut stdout)?;
    let choice = match &args.section {
        Some(choice) => choice.clone(),
        None => prompt_line("\nType the number of the section to ask questions about (or press Enter for all): ")?,
    };
    let sections = session::select(sections, Some(choice.as_str()), &mut stdout)?;

    // 5. Build the inference collaborators once and run the session
    let generator = HttpQuestionGenerator::new(&args.qg_endpoint, args.hf_token.clone())
        .map_err(|e| AppError::Config(format!("Question generator setup failed: {}", e)))?;
    let engine = HttpAnswerEngine::new(&args.qa_endpoint, args.hf_token.clone())
        .map_err(|e| AppError::Config(format!("Answer engine setup failed: {}", e)))?;

    let config = SessionConfig {
        context_chars: args.context_chars,
        generation: GenerationParams {
            max_questions: args.max_questions,
            max_length: args.max_length,
            sample: !args.no_sample,
        },
        ..SessionConfig::default()
    };
    let session = Session::new(generator, engine, config);

    let mut input = io::stdin().lock();
    let report = session.run(&sections, &mut input, &mut stdout).await?;

    tracing::info!(
        "Processing finished. Sections queried: {}, skipped: {}, answers: {}, failures: {}",
        report.sections_queried,
        report.sections_skipped,
        report.generated_answered + report.interactive_answered,
        report.generation_failures + report.answer_failures
    );

    Ok(())
}
