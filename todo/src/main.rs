//! Interactive todo list on stdin/stdout.
//!
//! Logs go to stderr so they never interleave with the rendered list.

use anyhow::Context;
use std::io::IsTerminal;
use std::sync::Arc;
use todo::cli::{self, Style, HELP};
use todo::{Config, FileStore, Outcome, Session};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo=info,composable_todo_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(data_file = %config.data_file.display(), "Starting todo");

    let storage = Arc::new(FileStore::new(&config.data_file));
    let session = Session::new(
        storage,
        config.preference().as_ref(),
        config.seed,
        config.id_strategy,
    )
    .await
    .context("Failed to start the session")?;

    let style = if std::io::stdout().is_terminal() {
        Style::Ansi
    } else {
        Style::Plain
    };

    print!("{}", cli::render(&session.view().await, style));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let command = match cli::parse(&line) {
            Ok(command) => command,
            Err(error) => {
                println!("{error}");
                continue;
            },
        };

        match session.execute(command).await {
            Ok(Outcome::Render(view)) => print!("{}", cli::render(&view, style)),
            Ok(Outcome::Help) => println!("{HELP}"),
            Ok(Outcome::Quit) => break,
            Err(error) => println!("{error}"),
        }
    }

    session.shutdown();
    Ok(())
}
