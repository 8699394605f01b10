use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use dinewise_client::{
    ApiClient, ChatRequest, ClientSettings, DayHours, Feedback, FeedbackKind, SuggestionsRequest,
    WeeklySchedule,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "dinewise-cli")]
#[command(about = "Query the dinewise backend with endpoint failover")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve and print the active base URL
    Endpoint {
        /// Fail instead of falling back when no candidate answers /health
        #[arg(long)]
        strict: bool,
        /// Resolve the recommendation assistant instead of the backend
        #[arg(long)]
        assistant: bool,
    },
    /// Print the /health payload of the active endpoint
    Health {
        /// Query the recommendation assistant instead of the backend
        #[arg(long)]
        assistant: bool,
    },
    /// List locations
    Locations {
        /// Fetch a single page instead of the full list
        #[arg(long)]
        page: Option<u32>,
        /// Page size when --page is given
        #[arg(long, default_value = "20")]
        page_size: u32,
    },
    /// List events
    Events,
    /// List companies
    Companies,
    /// Show the weekly opening hours of a location
    Hours {
        location_id: i64,
        /// Print the merged schedule as JSON
        #[arg(long)]
        json: bool,
    },
    /// List reservations for a location
    Reservations { location_id: i64 },
    /// List reservations made by a user
    UserReservations { user_id: i64 },
    /// Ask the recommendation assistant
    Chat {
        message: String,
        #[arg(long, default_value = "anonymous")]
        user_id: String,
        /// Continue an existing conversation
        #[arg(long)]
        session_id: Option<String>,
    },
    /// Show the assistant's stored context for a chat session
    Conversation {
        session_id: String,
        #[arg(long, default_value = "anonymous")]
        user_id: String,
    },
    /// Suggest completions for a partially typed question
    Suggest {
        partial_query: String,
        #[arg(long, default_value = "anonymous")]
        user_id: String,
        #[arg(long, default_value = "default")]
        session_id: String,
    },
    /// Rate an assistant reply
    Feedback {
        session_id: String,
        #[arg(value_enum)]
        rating: Rating,
        #[arg(long, default_value = "anonymous")]
        user_id: String,
        /// Free-text comment
        #[arg(long)]
        comment: Option<String>,
        /// Reply being rated
        #[arg(long)]
        response_id: Option<String>,
    },
    /// Clear the assistant's memory of a chat session
    ResetChat {
        session_id: String,
        #[arg(long, default_value = "anonymous")]
        user_id: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Rating {
    Helpful,
    NotHelpful,
    Wrong,
}

impl From<Rating> for FeedbackKind {
    fn from(rating: Rating) -> Self {
        match rating {
            Rating::Helpful => FeedbackKind::Helpful,
            Rating::NotHelpful => FeedbackKind::NotHelpful,
            Rating::Wrong => FeedbackKind::Wrong,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();
    let config = dinewise_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?config, "loaded configuration");

    let settings = if cli.command.uses_assistant() {
        ClientSettings::assistant(&config)
    } else {
        ClientSettings::backend(&config)
    };
    let client = ApiClient::new(&settings).context("failed to build API client")?;

    run(&client, cli.command).await
}

impl Commands {
    fn uses_assistant(&self) -> bool {
        match self {
            Self::Endpoint { assistant, .. } | Self::Health { assistant } => *assistant,
            Self::Chat { .. }
            | Self::Conversation { .. }
            | Self::Suggest { .. }
            | Self::Feedback { .. }
            | Self::ResetChat { .. } => true,
            _ => false,
        }
    }
}

async fn run(client: &ApiClient, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Endpoint { strict, .. } => {
            let url = if strict {
                client.try_resolve().await?
            } else {
                client.resolve().await
            };
            let verified = client
                .active_endpoint()
                .await
                .is_some_and(|active| active.verified);
            print_json(&serde_json::json!({ "url": url, "verified": verified }))
        }
        Commands::Health { .. } => print_json(&client.health().await?),
        Commands::Locations { page: None, .. } => print_json(&client.list_locations().await?),
        Commands::Locations {
            page: Some(page),
            page_size,
        } => {
            let (locations, pagination) = client.list_locations_page(page, page_size).await?;
            print_json(&serde_json::json!({ "data": locations, "pagination": pagination }))
        }
        Commands::Events => print_json(&client.list_events().await?),
        Commands::Companies => print_json(&client.list_companies().await?),
        Commands::Hours { location_id, json } => {
            let schedule = client.location_schedule(location_id).await?;
            if json {
                print_json(&schedule)
            } else {
                print!("{}", format_schedule(&schedule));
                Ok(())
            }
        }
        Commands::Reservations { location_id } => {
            print_json(&client.location_reservations(location_id).await?)
        }
        Commands::UserReservations { user_id } => {
            print_json(&client.user_reservations(user_id).await?)
        }
        Commands::Chat {
            message,
            user_id,
            session_id,
        } => {
            let mut request = ChatRequest::new(message, user_id);
            if let Some(session_id) = session_id {
                request = request.with_session(session_id);
            }
            print_json(&client.chat(&request).await?)
        }
        Commands::Conversation {
            session_id,
            user_id,
        } => print_json(&client.conversation(&user_id, &session_id).await?),
        Commands::Suggest {
            partial_query,
            user_id,
            session_id,
        } => {
            let request = SuggestionsRequest {
                partial_query,
                user_id,
                session_id,
            };
            print_json(&client.suggestions(&request).await?)
        }
        Commands::Feedback {
            session_id,
            rating,
            user_id,
            comment,
            response_id,
        } => {
            let mut feedback = Feedback::new(user_id, session_id, rating.into());
            feedback.comment = comment;
            feedback.response_id = response_id;
            print_json(&client.send_feedback(&feedback).await?)
        }
        Commands::ResetChat {
            session_id,
            user_id,
        } => print_json(&client.reset_conversation(&user_id, &session_id).await?),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render JSON output")?;
    println!("{rendered}");
    Ok(())
}

/// One line per day, Monday first.
fn format_schedule(schedule: &WeeklySchedule) -> String {
    schedule
        .iter()
        .map(|(day, hours)| match hours {
            DayHours::Open { opens, closes } => format!("{day:<10} {opens}-{closes}\n"),
            DayHours::Closed => format!("{day:<10} closed\n"),
        })
        .collect()
}

#[cfg(test)]
mod tests;
