//! faqbot - answer questions from a fixed FAQ corpus
//!
//! ```bash
//! # Interactive session (default)
//! faqbot
//! faqbot --corpus faqs.json chat
//!
//! # One-shot question, with the matched entry and score
//! faqbot ask --verbose "How much water should I drink?"
//!
//! # Corpus and vocabulary sizes
//! faqbot stats
//! ```

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use faqbot_cli::chat::{run_chat, write_exit_notice};
use faqbot_core::config::Config;
use faqbot_core::corpus::JsonFileCorpus;
use faqbot_core::traits::{AnswerRetriever, Responder};
use faqbot_service::FaqService;

#[derive(Parser)]
#[command(name = "faqbot")]
#[command(about = "Answer questions by matching them against a fixed FAQ corpus")]
#[command(version)]
struct Cli {
    /// FAQ corpus: a JSON array of {"question", "answer"} objects
    #[arg(long, global = true)]
    corpus: Option<PathBuf>,

    /// Minimum similarity (exclusive) for a confident match
    #[arg(long, global = true)]
    threshold: Option<f64>,

    /// Match on raw tokens instead of stemmed ones
    #[arg(long, global = true)]
    no_stem: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive question/answer session
    Chat,

    /// Answer a single question
    Ask {
        question: String,

        /// Also print the matched entry and its score
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show corpus and vocabulary sizes
    Stats,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::load().context("loading configuration")?;
    let mut settings = config.settings()?;
    if let Some(threshold) = cli.threshold {
        settings.matcher.threshold = threshold;
    }
    if cli.no_stem {
        settings.matcher.stemming = false;
    }
    settings.validate()?;

    let corpus_path = match cli.corpus {
        Some(path) => path,
        None => config.corpus_path()?,
    };
    info!(corpus = %corpus_path.display(), stemming = settings.matcher.stemming, "starting faqbot");
    let service = FaqService::from_supplier(&JsonFileCorpus::new(corpus_path), &settings);

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            println!("FAQ chatbot ready ({} entries).", service.retriever().index().len());
            println!("Type your question or '{}' to quit\n", settings.chat.exit_command);
            ctrlc::set_handler(|| {
                let _ = write_exit_notice(&mut io::stdout());
                std::process::exit(0);
            })
            .context("installing Ctrl-C handler")?;
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            run_chat(&service, &settings.chat, stdin.lock(), &mut stdout)?;
        }

        Commands::Ask { question, verbose } => {
            if verbose {
                match service.retriever().retrieve(&question) {
                    Ok(Some(hit)) => println!("matched entry #{} (score: {:.4})", hit.position, hit.score),
                    Ok(None) => println!("no confident match (threshold: {})", settings.matcher.threshold),
                    Err(e) => println!("match failed: {e}"),
                }
            }
            println!("{}: {}", settings.chat.bot_label, service.answer(&question));
        }

        Commands::Stats => {
            let index = service.retriever().index();
            println!("Entries:    {}", index.len());
            println!("Vocabulary: {} terms", index.vocabulary().len());
            println!("Stemming:   {}", index.normalizer().is_stemming());
            println!("Threshold:  {}", service.retriever().matcher().threshold());
        }
    }

    Ok(())
}
