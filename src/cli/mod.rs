//! # CLI Module
//!
//! Command implementations for the `tunedex` binary. Each command resolves its
//! scalar arguments (usernames, ids) through the [`crate::management::Catalog`],
//! calls one catalog operation and renders the result with the colored output
//! macros and `tabled` tables.
//!
//! ```text
//! CLI Layer (argument resolution, rendering)
//!     ↓
//! Management Layer (Catalog: users, library, likes, statistics)
//!     ↓
//! Store Layer (whole-collection JSON persistence)
//! ```
//!
//! Failures end the process through `error!`; recoverable conditions such as
//! empty search results or dangling references are reported with `warning!`.
//!
//! ## Usage Patterns
//!
//! ```bash
//! tunedex restore --yes                      # load the public seed data
//! tunedex user register --name Ana --email ana@example.com --username ana --type musician
//! tunedex album create --artist ana --name Debut --genre pop --track "Intro|1:30|https://..."
//! tunedex song play 1 --open
//! tunedex like bob song 1
//! tunedex stats --artist ana
//! ```

mod data;
mod library;
mod social;
mod stats;
mod users;

pub use data::audit;
pub use data::init;
pub use data::restore;
pub use library::AlbumDraft;
pub use library::create_album;
pub use library::create_playlist;
pub use library::play_song;
pub use library::search_albums;
pub use library::search_playlists;
pub use library::search_songs;
pub use library::show_album;
pub use library::show_playlist;
pub use library::show_song;
pub use social::TargetKind;
pub use social::dislike;
pub use social::like;
pub use stats::stats;
pub use users::delete_user;
pub use users::edit_user;
pub use users::register;
pub use users::search_users;
pub use users::show_user;
