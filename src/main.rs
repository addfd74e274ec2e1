use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "disklens-watch",
    version,
    about = "Live viewer for a disk usage scan running in a remote backend"
)]
struct Cli {
    /// Backend host
    #[arg(long)]
    host: Option<String>,

    /// Backend port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// WebSocket path on the backend
    #[arg(long)]
    path: Option<String>,

    /// Full WebSocket URL (overrides host, port and path)
    #[arg(long)]
    url: Option<String>,

    /// Delay between reconnect attempts, in milliseconds
    #[arg(long)]
    reconnect_delay_ms: Option<u64>,

    /// Do not acknowledge scan completion to the backend
    #[arg(long)]
    no_ack: bool,

    /// Print progress lines instead of running the terminal UI
    #[arg(long)]
    headless: bool,

    /// Write the completion report to this file once the scan is done, then exit
    #[arg(long)]
    export_json: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(short = 'l', long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing; the TUI owns the screen, so logs go to a file or stderr
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env());
    match &cli.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            subscriber
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        None => subscriber.with_writer(std::io::stderr).init(),
    }

    // Build settings
    let mut settings = disklens_watch::config::settings::Settings::default();
    if let Some(host) = cli.host {
        settings.host = host;
    }
    if let Some(port) = cli.port {
        settings.port = port;
    }
    if let Some(path) = cli.path {
        settings.path = path;
    }
    settings.url = cli.url;
    if let Some(delay) = cli.reconnect_delay_ms {
        settings.reconnect_delay_ms = delay;
    }
    settings.send_completion_ack = !cli.no_ack;

    let mut app = disklens_watch::app::App::new(settings);

    // Non-interactive mode: print progress, optionally export and exit
    if cli.headless || cli.export_json.is_some() {
        return app.run_headless(cli.export_json).await;
    }

    // Interactive mode: launch TUI
    app.run().await
}
