use clap::{
    Parser,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};

use campdl::{cli, config, error, management::IdentityManager, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Format to download (flac, mp3-v0, mp3-320, vorbis, aac-hi, alac, wav, aiff-lossless)
    #[clap(long, default_value = "flac")]
    format: String,

    /// Value of the "identity" cookie for bandcamp.com (raw or Base64)
    #[clap(long)]
    identity: Option<String>,

    /// Be verbose
    #[clap(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if cli.verbose { "info" } else { "warn" }),
    )
    .init();

    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }

    let identity = match IdentityManager::resolve(cli.identity) {
        Some(identity) => identity,
        None => {
            error!("Failed to load identity cookie for bandcamp.com");
        }
    };

    cli::sync_collection(&identity, &cli.format).await;
}
