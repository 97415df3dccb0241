mod audit;
mod catalog;
mod library;
mod social;
mod stats;
mod users;

pub use audit::DanglingReference;
pub use audit::IntegrityReport;
pub use audit::check_integrity;
pub use catalog::Catalog;
pub use stats::DEFAULT_LEADERBOARD_SIZE;
pub use stats::DEFAULT_TOP_SONGS;
pub use stats::Leaderboards;
pub use stats::album_streams;
pub use stats::leaderboards_from;
pub use stats::songs_by_artist;
pub use users::DeletedUser;
