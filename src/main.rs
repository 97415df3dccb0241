use clap::{
    ArgAction, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use tunedex::{
    cli, config, error,
    management::Catalog,
    store::Store,
    types::{NewSong, SongId, UserType},
    utils,
};

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
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create any missing collection as empty
    Init,

    /// Replace all data with the public seed data
    Restore(RestoreOptions),

    /// Report references that no longer resolve
    Audit,

    /// Handle user accounts
    #[command(subcommand)]
    User(UserCommand),

    /// Handle albums
    #[command(subcommand)]
    Album(AlbumCommand),

    /// Handle songs
    #[command(subcommand)]
    Song(SongCommand),

    /// Handle playlists
    #[command(subcommand)]
    Playlist(PlaylistCommand),

    /// Like an album, song or artist
    Like(LikeOptions),

    /// Remove a like from an album, song or artist
    Dislike(LikeOptions),

    /// Show leaderboards or the top songs of one artist
    Stats(StatsOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct RestoreOptions {
    /// Confirm that current data will be replaced
    #[clap(long)]
    pub yes: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum UserCommand {
    /// Register a new user
    Register {
        #[clap(long)]
        name: String,
        #[clap(long)]
        email: String,
        #[clap(long)]
        username: String,
        /// listener or musician
        #[clap(long = "type", default_value = "listener")]
        kind: UserType,
    },

    /// Show a user's profile
    Show { username: String },

    /// Edit profile fields
    Edit {
        username: String,
        #[clap(long)]
        name: Option<String>,
        #[clap(long)]
        email: Option<String>,
        #[clap(long = "new-username")]
        new_username: Option<String>,
    },

    /// Delete an account
    Delete {
        username: String,
        /// Confirm the deletion
        #[clap(long)]
        yes: bool,
    },

    /// Search users by name
    Search {
        query: String,
        /// Leave this username out of the results
        #[clap(long)]
        exclude: Option<String>,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum AlbumCommand {
    /// Create an album and its songs
    Create {
        /// Username of the musician
        #[clap(long)]
        artist: String,
        #[clap(long)]
        name: String,
        #[clap(long, default_value = "")]
        description: String,
        #[clap(long, default_value = "")]
        cover: String,
        /// Publication date, defaults to today
        #[clap(long)]
        published: Option<String>,
        #[clap(long, default_value = "")]
        genre: String,
        /// Track as NAME|DURATION|LINK; can be repeated
        #[clap(
            long = "track",
            value_parser = utils::parse_track_arg,
            action = ArgAction::Append,
            num_args = 1
        )]
        tracks: Vec<NewSong>,
    },

    /// Show an album with its songs
    Show { id: u32 },

    /// Search albums by name
    Search { query: String },
}

#[derive(Subcommand, Debug, Clone)]
pub enum SongCommand {
    /// Count a play of a song
    Play {
        id: SongId,
        /// Open the song link in the browser
        #[clap(long)]
        open: bool,
    },

    /// Show a song
    Show { id: SongId },

    /// Search songs by name
    Search { query: String },
}

#[derive(Subcommand, Debug, Clone)]
pub enum PlaylistCommand {
    /// Create a playlist from existing songs
    Create {
        /// Username of the creator
        #[clap(long)]
        user: String,
        #[clap(long)]
        name: String,
        #[clap(long, default_value = "")]
        description: String,
        /// Song id; can be repeated
        #[clap(long = "track", action = ArgAction::Append, num_args = 1)]
        tracks: Vec<SongId>,
    },

    /// Show a playlist with its tracks
    Show { id: u32 },

    /// Search playlists by name
    Search { query: String },
}

#[derive(Parser, Debug, Clone)]
pub struct LikeOptions {
    /// Username of the acting user
    username: String,
    /// What to like
    #[clap(value_enum)]
    kind: cli::TargetKind,
    /// Album or song id, or the artist's username
    target: String,
}

#[derive(Parser, Debug, Clone)]
pub struct StatsOptions {
    /// Show the top songs of this artist instead of the leaderboards
    #[clap(long)]
    artist: Option<String>,
    /// Number of entries per ranking
    #[clap(long)]
    limit: Option<usize>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();
    let catalog = Catalog::new(Store::json_dir(config::data_dir()));

    match cli.command {
        Command::Init => cli::init(&catalog).await,
        Command::Restore(opt) => cli::restore(&catalog, &config::bootstrap_url(), opt.yes).await,
        Command::Audit => cli::audit(&catalog).await,

        Command::User(cmd) => match cmd {
            UserCommand::Register {
                name,
                email,
                username,
                kind,
            } => cli::register(&catalog, &name, &email, &username, kind).await,
            UserCommand::Show { username } => cli::show_user(&catalog, &username).await,
            UserCommand::Edit {
                username,
                name,
                email,
                new_username,
            } => cli::edit_user(&catalog, &username, name, email, new_username).await,
            UserCommand::Delete { username, yes } => {
                cli::delete_user(&catalog, &username, yes).await
            }
            UserCommand::Search { query, exclude } => {
                cli::search_users(&catalog, &query, exclude).await
            }
        },

        Command::Album(cmd) => match cmd {
            AlbumCommand::Create {
                artist,
                name,
                description,
                cover,
                published,
                genre,
                tracks,
            } => {
                let draft = cli::AlbumDraft {
                    artist,
                    name,
                    description,
                    cover,
                    published,
                    genre,
                    tracks,
                };
                cli::create_album(&catalog, draft).await
            }
            AlbumCommand::Show { id } => cli::show_album(&catalog, id).await,
            AlbumCommand::Search { query } => cli::search_albums(&catalog, &query).await,
        },

        Command::Song(cmd) => match cmd {
            SongCommand::Play { id, open } => cli::play_song(&catalog, id, open).await,
            SongCommand::Show { id } => cli::show_song(&catalog, id).await,
            SongCommand::Search { query } => cli::search_songs(&catalog, &query).await,
        },

        Command::Playlist(cmd) => match cmd {
            PlaylistCommand::Create {
                user,
                name,
                description,
                tracks,
            } => cli::create_playlist(&catalog, &user, &name, &description, &tracks).await,
            PlaylistCommand::Show { id } => cli::show_playlist(&catalog, id).await,
            PlaylistCommand::Search { query } => cli::search_playlists(&catalog, &query).await,
        },

        Command::Like(opt) => cli::like(&catalog, &opt.username, opt.kind, &opt.target).await,
        Command::Dislike(opt) => {
            cli::dislike(&catalog, &opt.username, opt.kind, &opt.target).await
        }

        Command::Stats(opt) => cli::stats(&catalog, opt.artist, opt.limit).await,

        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
