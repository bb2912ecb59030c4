// src/main.rs

use ai_community::config::Config;
use ai_community::error::AppError;
use ai_community::parser::parse_transcript;
use ai_community::repository::Repository;
use ai_community::seed::initial_posts;
use ai_community::store::FileStore;
use dotenvy::dotenv;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let console_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    if let Err(e) = run(&config) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<(), AppError> {
    let store = FileStore::open(&config.data_dir)?;
    let mut repo = Repository::new(store);

    let seed = if config.seed_data { initial_posts()? } else { Vec::new() };
    repo.initialize(&seed)?;

    // With a transcript path: print its segments as JSON on stdout.
    if let Some(path) = std::env::args().nth(1) {
        let raw = std::fs::read_to_string(&path)?;
        let segments = parse_transcript(&raw);
        tracing::info!("Parsed {} into {} segments", path, segments.len());
        println!("{}", serde_json::to_string_pretty(&segments)?);
        return Ok(());
    }

    for post in repo.latest(10) {
        tracing::info!(
            "[{:?}] {} by {} ({} likes, {} comments)",
            post.kind(),
            post.title,
            post.author.name,
            post.likes,
            post.comments.len()
        );
    }

    Ok(())
}
