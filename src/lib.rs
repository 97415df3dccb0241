//! Music Catalog CLI Library
//!
//! Keeps a small catalog of users, albums, songs and playlists as four JSON
//! collections, maintains the likes between them by hand and computes
//! rankings and totals by joining the collections in memory.
//!
//! # Modules
//!
//! - `bootstrap` - Download of the public seed data
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Library error type
//! - `ids` - Identifier allocation
//! - `management` - The `Catalog` repository: users, library, likes, statistics
//! - `store` - Whole-collection persistence backends
//! - `types` - Data structures and type definitions
//! - `utils` - Ranking, parsing and table helpers
//!
//! # Example
//!
//! ```
//! use tunedex::{management::Catalog, store::Store, types::UserType};
//!
//! #[tokio::main]
//! async fn main() -> tunedex::error::Result<()> {
//!     let catalog = Catalog::new(Store::json_dir("db"));
//!     catalog.init_empty().await?;
//!     catalog.register_user("Ana", "ana@example.com", "ana", UserType::Musician).await?;
//!     Ok(())
//! }
//! ```

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod error;
pub mod ids;
pub mod management;
pub mod store;
pub mod types;
pub mod utils;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Loading catalog from {}", path.display());
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Created album {}", album.name);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for the command layer: library code returns errors instead.
///
/// # Example
///
/// ```
/// error!("Cannot load users. Err: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("{} dangling references found", count);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
