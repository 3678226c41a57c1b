//! BookMyEvent CLI - browse, book and manage events from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Create an account (password from --password or BOOKMYEVENT_PASSWORD)
//! bme signup -u ada -e ada@example.com
//!
//! # Log in and out
//! bme login -e ada@example.com
//! bme logout
//!
//! # Browse
//! bme events list --tag music
//! bme events list --near 51.5,-0.1 --radius-km 5
//! bme events list --upcoming
//!
//! # Book and review tickets
//! bme book 64f0c2...
//! bme tickets list
//! bme tickets cancel 6500aa...
//!
//! # Organizer tools
//! bme events create --title "Jazz Night" --date 2030-06-01 --venue "Blue Room" --price 12.50
//! bme events edit 64f0c2... --venue "Green Room"
//! bme events delete 64f0c2...
//! ```
//!
//! # Environment Variables
//!
//! - `BOOKMYEVENT_API_URL`, `BOOKMYEVENT_TIMEOUT_SECS`, `BOOKMYEVENT_SESSION_FILE` -
//!   see `bookmyevent_client::config`
//! - `BOOKMYEVENT_PASSWORD` - password for `signup` and `login`
//! - `BOOKMYEVENT_LOG_JSON` - emit JSON log lines instead of text
//! - `RUST_LOG` - log filter (default: `bookmyevent=info,bme=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::Context;

#[derive(Parser)]
#[command(name = "bme")]
#[command(author, version, about = "BookMyEvent command-line client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and log in
    Signup {
        /// Display name
        #[arg(short, long)]
        username: String,

        /// Login email address
        #[arg(short, long)]
        email: String,

        #[command(flatten)]
        password: PasswordArg,
    },
    /// Log in and remember the session
    Login {
        /// Login email address
        #[arg(short, long)]
        email: String,

        #[command(flatten)]
        password: PasswordArg,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user's profile
    Whoami,
    /// Browse and manage events
    Events {
        #[command(subcommand)]
        action: EventsAction,
    },
    /// Review and cancel booked tickets
    Tickets {
        #[command(subcommand)]
        action: TicketsAction,
    },
    /// Book a ticket for an event (no-op if already booked)
    Book {
        /// Event id
        event_id: String,
    },
}

#[derive(Args)]
struct PasswordArg {
    /// Account password
    #[arg(short, long, env = "BOOKMYEVENT_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Subcommand)]
enum EventsAction {
    /// List all events
    List(commands::events::ListArgs),
    /// List events you created
    Mine,
    /// Publish a new event
    Create(commands::events::CreateArgs),
    /// Change fields of an event you created
    Edit {
        /// Event id
        event_id: String,

        #[command(flatten)]
        changes: commands::events::EditArgs,
    },
    /// Delete an event you created
    Delete {
        /// Event id
        event_id: String,
    },
}

#[derive(Subcommand)]
enum TicketsAction {
    /// List your booked events
    List,
    /// Cancel a ticket
    Cancel {
        /// Ticket id
        ticket_id: String,
    },
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bookmyevent=info,bme=info".into());

    // JSON lines for log collectors, text for humans; both on stderr so stdout stays clean
    let json = std::env::var_os("BOOKMYEVENT_LOG_JSON").is_some();
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::from_env()?;

    match cli.command {
        Commands::Signup {
            username,
            email,
            password,
        } => commands::auth::signup(&ctx, &username, &email, password.password).await?,
        Commands::Login { email, password } => {
            commands::auth::login(&ctx, &email, password.password).await?;
        }
        Commands::Logout => commands::auth::logout(&ctx)?,
        Commands::Whoami => commands::auth::whoami(&ctx).await?,
        Commands::Events { action } => match action {
            EventsAction::List(args) => commands::events::list(&ctx, &args).await?,
            EventsAction::Mine => commands::events::mine(&ctx).await?,
            EventsAction::Create(args) => commands::events::create(&ctx, args).await?,
            EventsAction::Edit { event_id, changes } => {
                commands::events::edit(&ctx, &event_id, changes).await?;
            }
            EventsAction::Delete { event_id } => commands::events::delete(&ctx, &event_id).await?,
        },
        Commands::Tickets { action } => match action {
            TicketsAction::List => commands::tickets::list(&ctx).await?,
            TicketsAction::Cancel { ticket_id } => {
                commands::tickets::cancel(&ctx, &ticket_id).await?;
            }
        },
        Commands::Book { event_id } => commands::tickets::book(&ctx, &event_id).await?,
    }
    Ok(())
}
