use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use publisher_reports::api::HttpReportsApi;
use publisher_reports::app::App;
use publisher_reports::cli::{self, Command};
use publisher_reports::config::ClientConfig;
use publisher_reports::state::Session;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "publisher_reports=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClientConfig::new_from_env()?;
    info!("using backend at {}", config.base_url);

    let export_dir = config.export_dir.clone();
    let api = Arc::new(HttpReportsApi::new(config)?);
    let mut app = App::new(api, Session::today(), export_dir);

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout
        .write_all(format!("{}\n{}\n", cli::render_text(&app.screen()), cli::HELP).as_bytes())
        .await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let command = match cli::parse_command(&line) {
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                warn!("bad command {:?}: {}", line, e);
                stdout.write_all(format!("{}\n", e).as_bytes()).await?;
                stdout.flush().await?;
                continue;
            }
        };

        let extra = cli::dispatch(&mut app, command).await;

        let mut out = cli::render_text(&app.screen());
        if let Some(extra) = extra {
            out.push_str(&extra);
            out.push('\n');
        }
        stdout.write_all(out.as_bytes()).await?;
        stdout.flush().await?;

        app.session_mut().dismiss_toast();
    }

    Ok(())
}
