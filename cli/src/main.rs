//! CLI entry point for the hrdesk assistant (for dev and testing).
//!
//! Thin front end: delivers a question string to the pipeline and renders
//! the returned answer. No business logic lives here.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use hrdesk_assistant::{AssistantConfig, PolicyAssistant};
use hrdesk_embeddings::OllamaEmbedder;
use hrdesk_generation::OllamaGenerator;

#[derive(Parser)]
#[command(name = "hrdesk")]
#[command(about = "hrdesk: HR policy question answering over indexed documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Ollama API base URL.
    #[arg(long, default_value = "http://localhost:11434")]
    ollama_url: String,

    /// Embedding model identifier.
    #[arg(long, default_value = "all-minilm")]
    embed_model: String,

    /// Embedding dimension (must match the index).
    #[arg(long, default_value_t = 384)]
    dimension: usize,

    /// Generation model identifier.
    #[arg(long, default_value = "llama3")]
    gen_model: String,

    /// Path to the vector index file.
    #[arg(long, default_value = "data/embeddings/index.json")]
    index: PathBuf,

    /// Path to the id-to-chunk table file.
    #[arg(long, default_value = "data/embeddings/id_to_chunk.json")]
    chunks: PathBuf,

    /// Number of candidates to retrieve.
    #[arg(long, default_value_t = 4)]
    top_k: usize,

    /// Minimum similarity score to keep a candidate.
    #[arg(long, default_value_t = 0.3)]
    threshold: f32,

    /// Per-request provider timeout in seconds.
    #[arg(long, default_value_t = 120)]
    timeout: u64,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Answer a question from the indexed HR policies.
    Ask {
        /// The question to answer.
        question: String,
    },
    /// Show the raw top matches for a question, without generation.
    Search {
        /// The question to search for.
        question: String,
    },
    /// Show corpus statistics.
    Stats,
}

fn build_assistant(cli: &Cli) -> Result<PolicyAssistant> {
    let config = AssistantConfig {
        ollama_base_url: cli.ollama_url.clone(),
        embedding_model: cli.embed_model.clone(),
        embedding_dimension: cli.dimension,
        generation_model: cli.gen_model.clone(),
        index_path: cli.index.clone(),
        chunk_table_path: cli.chunks.clone(),
        top_k: cli.top_k,
        similarity_threshold: cli.threshold,
        request_timeout_secs: cli.timeout,
    };

    let timeout = Duration::from_secs(config.request_timeout_secs);
    let embedder = Arc::new(
        OllamaEmbedder::new(
            &config.ollama_base_url,
            &config.embedding_model,
            config.embedding_dimension,
        )
        .with_timeout(timeout),
    );
    let generator = Arc::new(
        OllamaGenerator::new(&config.ollama_base_url, &config.generation_model)
            .with_timeout(timeout),
    );

    Ok(PolicyAssistant::new(config, embedder, generator)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let assistant = build_assistant(&cli)?;

    match &cli.command {
        Commands::Ask { question } => {
            // Provider failures are logged with their kind but rendered as
            // one generic message; the "not available" sentence is reserved
            // for the genuine zero-context case.
            match assistant.answer_question(question).await {
                Ok(result) => {
                    println!("{}", result.text);
                    if result.sourced {
                        println!();
                        for source in &result.sources {
                            println!(
                                "  Source: {} (chunk_id: {}, similarity: {:.4})",
                                source.document_name, source.chunk_id, source.similarity
                            );
                        }
                    }
                }
                Err(err) => {
                    tracing::error!("Failed to answer question: {err}");
                    eprintln!("Could not process your question. Please try again later.");
                    std::process::exit(1);
                }
            }
        }
        Commands::Search { question } => {
            let records = assistant.search(question).await?;
            if records.is_empty() {
                println!("No relevant policy chunks found.");
            } else {
                for (i, record) in records.iter().enumerate() {
                    println!("{}. {}", i + 1, record.text);
                    println!(
                        "   Source: {} (chunk_id: {})",
                        record.document_name, record.chunk_id
                    );
                    println!("   Similarity: {:.4}", record.similarity);
                    println!();
                }
            }
        }
        Commands::Stats => {
            let stats = assistant.stats();
            println!("hrdesk corpus");
            println!("  vectors: {}", stats.indexed_vectors);
            println!("  chunks:  {}", stats.chunks);
            println!("  dimension: {}", stats.dimension);
        }
    }

    Ok(())
}
