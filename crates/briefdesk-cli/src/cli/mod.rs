//! CLI entry and dispatch.

use std::sync::Arc;

use anyhow::{Context, Result};
use briefdesk_core::api::ApiClient;
use briefdesk_core::auth::FileTokenStore;
use briefdesk_core::config::{self, API_URL_ENV};
use briefdesk_core::logging;
use briefdesk_core::models::BriefingFeedback;
use clap::Parser;

mod commands;

#[derive(Parser)]
#[command(name = "briefdesk")]
#[command(version)]
#[command(about = "Client meetings, notes and research briefings from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API server root (overrides config)
    #[arg(long, global = true, value_name = "URL", env = API_URL_ENV)]
    api_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    #[command(flatten)]
    Api(ApiCommands),

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Commands that talk to the API server.
#[derive(clap::Subcommand)]
enum ApiCommands {
    /// Log in with email and password (password is read from stdin)
    Login {
        #[arg(long)]
        email: String,
    },
    /// Forget the stored tokens
    Logout,
    /// Show the logged-in user
    Whoami,

    /// Manage meeting notes
    Notes {
        #[command(subcommand)]
        command: NoteCommands,
    },
    /// Manage clients
    Clients {
        #[command(subcommand)]
        command: ClientCommands,
    },
    /// Manage groups
    Groups {
        #[command(subcommand)]
        command: GroupCommands,
    },
    /// Browse and manage research briefings
    Briefings {
        #[command(subcommand)]
        command: BriefingCommands,
    },
    /// Google Calendar integration
    Calendar {
        #[command(subcommand)]
        command: CalendarCommands,
    },

    /// Check that the API server is up
    Health,
}

#[derive(clap::Subcommand)]
enum NoteCommands {
    /// Lists meeting notes
    List,
    /// Shows a single note
    Show {
        #[arg(value_name = "NOTE_ID")]
        id: String,
    },
    /// Creates a note
    Create {
        /// Client name
        #[arg(long)]
        client: String,
        /// Meeting date (YYYY-MM-DD or ISO datetime)
        #[arg(long)]
        date: String,
        #[arg(long)]
        content: String,
    },
    /// Updates the given fields of a note
    Update {
        #[arg(value_name = "NOTE_ID")]
        id: String,
        #[arg(long)]
        client: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Deletes a note
    Delete {
        #[arg(value_name = "NOTE_ID")]
        id: String,
    },
}

#[derive(clap::Subcommand)]
enum ClientCommands {
    /// Lists clients
    List,
    /// Shows a single client
    Show {
        #[arg(value_name = "CLIENT_ID")]
        id: String,
    },
    /// Creates a client
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        /// Free-form meeting notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// Updates the given fields of a client
    Update {
        #[arg(value_name = "CLIENT_ID")]
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Deletes a client
    Delete {
        #[arg(value_name = "CLIENT_ID")]
        id: String,
    },
}

#[derive(clap::Subcommand)]
enum GroupCommands {
    /// Lists groups
    List,
    /// Shows a single group
    Show {
        #[arg(value_name = "GROUP_ID")]
        id: String,
    },
    /// Creates a group
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
}

#[derive(clap::Subcommand)]
enum BriefingCommands {
    /// Lists briefings
    List {
        /// Only show briefings whose client name contains this text
        #[arg(long, value_name = "TERM")]
        search: Option<String>,
    },
    /// Shows a briefing in full
    Show {
        #[arg(value_name = "BRIEFING_ID")]
        id: String,
    },
    /// Deletes a briefing
    Delete {
        #[arg(value_name = "BRIEFING_ID")]
        id: String,
    },
    /// Rates a briefing
    Feedback {
        #[arg(value_name = "BRIEFING_ID")]
        id: String,
        #[arg(value_enum)]
        rating: Rating,
    },
    /// Regenerates briefings for upcoming meetings and lists them
    Update,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum Rating {
    Helpful,
    NotHelpful,
}

impl From<Rating> for BriefingFeedback {
    fn from(rating: Rating) -> Self {
        match rating {
            Rating::Helpful => BriefingFeedback::Helpful,
            Rating::NotHelpful => BriefingFeedback::NotHelpful,
        }
    }
}

#[derive(clap::Subcommand)]
enum CalendarCommands {
    /// Shows whether Google Calendar is connected
    Status,
    /// Starts the Google Calendar authorization flow
    Connect,
    /// Completes authorization with the code and state from the redirect
    Callback {
        #[arg(long)]
        code: String,
        #[arg(long)]
        state: String,
    },
    /// Lists upcoming calendar meetings
    Meetings,
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli { command, api_url } = cli;

    let command = match command {
        Commands::Config { command } => {
            return match command {
                ConfigCommands::Path => {
                    commands::config::path();
                    Ok(())
                }
                ConfigCommands::Init => commands::config::init(),
            };
        }
        Commands::Api(command) => command,
    };

    let config = config::Config::load().context("load config")?;
    logging::init(config.log_level.as_deref());

    let api = ApiClient::from_config(
        &config,
        api_url.as_deref(),
        Arc::new(FileTokenStore::open_default()),
    )?;
    tracing::debug!(base_url = api.base_url(), "using API server");

    match command {
        ApiCommands::Login { email } => commands::auth::login(&api, &email).await,
        ApiCommands::Logout => commands::auth::logout(&api),
        ApiCommands::Whoami => commands::auth::whoami(&api).await,

        ApiCommands::Notes { command } => match command {
            NoteCommands::List => commands::notes::list(&api).await,
            NoteCommands::Show { id } => commands::notes::show(&api, &id).await,
            NoteCommands::Create {
                client,
                date,
                content,
            } => commands::notes::create(&api, client, date, content).await,
            NoteCommands::Update {
                id,
                client,
                date,
                content,
            } => commands::notes::update(&api, &id, client, date, content).await,
            NoteCommands::Delete { id } => commands::notes::delete(&api, &id).await,
        },

        ApiCommands::Clients { command } => match command {
            ClientCommands::List => commands::clients::list(&api).await,
            ClientCommands::Show { id } => commands::clients::show(&api, &id).await,
            ClientCommands::Create {
                name,
                description,
                notes,
            } => commands::clients::create(&api, name, description, notes).await,
            ClientCommands::Update {
                id,
                name,
                description,
                notes,
            } => commands::clients::update(&api, &id, name, description, notes).await,
            ClientCommands::Delete { id } => commands::clients::delete(&api, &id).await,
        },

        ApiCommands::Groups { command } => match command {
            GroupCommands::List => commands::groups::list(&api).await,
            GroupCommands::Show { id } => commands::groups::show(&api, &id).await,
            GroupCommands::Create { name, description } => {
                commands::groups::create(&api, name, description).await
            }
        },

        ApiCommands::Briefings { command } => match command {
            BriefingCommands::List { search } => {
                commands::briefings::list(&api, search.as_deref()).await
            }
            BriefingCommands::Show { id } => commands::briefings::show(&api, &id).await,
            BriefingCommands::Delete { id } => commands::briefings::delete(&api, &id).await,
            BriefingCommands::Feedback { id, rating } => {
                commands::briefings::feedback(&api, &id, rating.into()).await
            }
            BriefingCommands::Update => commands::briefings::update(&api).await,
        },

        ApiCommands::Calendar { command } => match command {
            CalendarCommands::Status => commands::calendar::status(&api).await,
            CalendarCommands::Connect => commands::calendar::connect(&api).await,
            CalendarCommands::Callback { code, state } => {
                commands::calendar::callback(&api, &code, &state).await
            }
            CalendarCommands::Meetings => commands::calendar::meetings(&api).await,
        },

        ApiCommands::Health => commands::health::check(&api).await,
    }
}
