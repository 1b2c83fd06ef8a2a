//! Bandcamp Collection Downloader CLI Library
//!
//! This library provides functionality for downloading the purchased digital
//! releases of a Bandcamp collection to local disk. It includes modules for
//! API communication, page-data extraction, download resolution, and the
//! local bookkeeping needed to skip releases that are already present.
//!
//! # Modules
//!
//! - `bandcamp` - Bandcamp platform client (API, pagination, downloads)
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - The fatal error taxonomy shared by the pipeline
//! - `management` - Credential normalization and local library inspection
//! - `pagedata` - Embedded page-data blob extraction
//! - `types` - Data structures and type definitions
//! - `utils` - URL and filename helpers
//!
//! # Example
//!
//! ```
//! use campdl::{cli, config};
//!
//! #[tokio::main]
//! async fn main() -> campdl::Res<()> {
//!     config::load_env().await?;
//!     cli::sync_collection("<identity cookie>", "flac").await;
//!     Ok(())
//! }
//! ```

pub mod bandcamp;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod pagedata;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern for glue code using a boxed
/// dynamic error trait object while maintaining Send + Sync bounds for
/// async contexts. The pipeline itself uses [`error::SyncError`].
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational status line with a blue bullet point.
///
/// Status lines go to the error stream so downloaded file output and shell
/// redirection of stdout stay clean.
///
/// # Example
///
/// ```
/// info!("Fetching collection summary...");
/// info!("{} - {} ({}): already downloaded", artist, title, id);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success line with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Collection synced: {} downloaded", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the
/// program with exit code 1.
///
/// There is no recovery tier in this tool: everything that is not the
/// normal "already downloaded" branch terminates the run, so this macro
/// should sit at the end of every fatal path.
///
/// # Example
///
/// ```
/// error!("Failed to load identity cookie for bandcamp.com");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("Cannot load environment. Err: {}", e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
