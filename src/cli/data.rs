use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{bootstrap, error, info, management::Catalog, success, warning};

/// Creates any missing collection as empty.
pub async fn init(catalog: &Catalog) {
    match catalog.init_empty().await {
        Ok(()) => success!("Catalog ready."),
        Err(e) => error!("Cannot initialize catalog. Err: {}", e),
    }
}

/// Replaces every collection with the seed data from `base_url`.
pub async fn restore(catalog: &Catalog, base_url: &str, yes: bool) {
    if !yes {
        warning!("Restoring replaces all current data. Re-run with --yes to confirm.");
        return;
    }

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching seed data...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let seed = match bootstrap::fetch_seed(base_url).await {
        Ok(seed) => seed,
        Err(e) => {
            pb.finish_and_clear();
            error!("Cannot fetch seed data from {}. Err: {}", base_url, e);
        }
    };

    pb.set_message("Writing collections...");
    if let Err(e) = catalog.replace_collections(&seed).await {
        pb.finish_and_clear();
        error!("Cannot store seed data. Err: {}", e);
    }
    pb.finish_and_clear();

    success!(
        "Restored {} users, {} albums, {} songs and {} playlists.",
        seed.users.len(),
        seed.albums.len(),
        seed.songs.len(),
        seed.playlists.len()
    );
}

/// Prints every reference that no longer resolves.
pub async fn audit(catalog: &Catalog) {
    let report = match catalog.audit().await {
        Ok(report) => report,
        Err(e) => error!("Cannot audit catalog. Err: {}", e),
    };

    if report.is_clean() {
        success!("All references resolve.");
        return;
    }

    warning!("{} dangling references found.", report.dangling.len());
    println!("{}", Table::new(&report.dangling));
    info!("Dangling references are reported only; nothing was changed.");
}
