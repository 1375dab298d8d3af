//! Command-line front end for helix-client.
//!
//! Reads `TWITCH_CLIENT_ID` (and optionally `TWITCH_CLIENT_SECRET`) from the
//! environment or a `.env` file, runs one Helix call and prints the response
//! as JSON.

use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use helix_client::auth::ClientCredentials;
use helix_client::helix::{
    GetChannelInformationRequest, GetChatSettingsRequest, GetGlobalChatBadgesRequest,
    GetGlobalEmotesRequest, GetStreamsRequest, GetUsersRequest,
};
use helix_client::{CallContext, ClientOptions, HelixClient, RequestOptions};

#[derive(Debug, Parser)]
#[command(name = "helix")]
#[command(about = "Query the Twitch Helix API", long_about = None)]
struct Cli {
    /// User access token. Without one, an app token is fetched with
    /// TWITCH_CLIENT_SECRET when it is set.
    #[arg(long, env = "TWITCH_ACCESS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Abort the call after this many seconds.
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Look up users by ID or login.
    Users {
        #[arg(long = "id")]
        ids: Vec<String>,
        #[arg(long = "login")]
        logins: Vec<String>,
    },
    /// Show channel information.
    Channel {
        #[arg(long = "broadcaster-id", required = true)]
        broadcaster_ids: Vec<String>,
    },
    /// List live streams.
    Streams {
        #[arg(long = "login")]
        logins: Vec<String>,
        #[arg(long)]
        first: Option<u32>,
        #[arg(long)]
        after: Option<String>,
    },
    /// Show chat settings for a channel.
    ChatSettings {
        #[arg(long)]
        broadcaster_id: String,
    },
    /// List global emotes.
    GlobalEmotes,
    /// List global chat badges.
    GlobalBadges,
}

fn client(mut options: ClientOptions) -> anyhow::Result<HelixClient> {
    anyhow::ensure!(
        !options.client_id.is_empty(),
        "TWITCH_CLIENT_ID must be set"
    );

    match std::env::var("TWITCH_CLIENT_SECRET") {
        Ok(secret) if !secret.is_empty() => {
            let loader = ClientCredentials::new(options.client_id.clone(), secret);
            options = options.with_access_token_loader(loader);
        }
        _ => tracing::debug!("TWITCH_CLIENT_SECRET not set, app token fallback disabled"),
    }

    HelixClient::new(options).context("Failed to build Helix client")
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = client(ClientOptions::from_env())?;

    let ctx = match cli.timeout {
        Some(secs) => CallContext::background().with_timeout(Duration::from_secs(secs)),
        None => CallContext::background(),
    };
    let options = RequestOptions { token: cli.token };

    match cli.command {
        Command::Users { ids, logins } => {
            let resp = client
                .get_users(
                    &ctx,
                    &GetUsersRequest {
                        options,
                        ids,
                        logins,
                    },
                )
                .await?;
            print_json(&resp)
        }
        Command::Channel { broadcaster_ids } => {
            let resp = client
                .get_channel_information(
                    &ctx,
                    &GetChannelInformationRequest {
                        options,
                        broadcaster_ids,
                    },
                )
                .await?;
            print_json(&resp)
        }
        Command::Streams {
            logins,
            first,
            after,
        } => {
            let resp = client
                .get_streams(
                    &ctx,
                    &GetStreamsRequest {
                        options,
                        user_logins: logins,
                        first,
                        after,
                        ..GetStreamsRequest::default()
                    },
                )
                .await?;
            print_json(&resp)
        }
        Command::ChatSettings { broadcaster_id } => {
            let resp = client
                .get_chat_settings(
                    &ctx,
                    &GetChatSettingsRequest {
                        options,
                        broadcaster_id,
                        moderator_id: None,
                    },
                )
                .await?;
            print_json(&resp)
        }
        Command::GlobalEmotes => {
            let resp = client
                .get_global_emotes(&ctx, &GetGlobalEmotesRequest { options })
                .await?;
            print_json(&resp)
        }
        Command::GlobalBadges => {
            let resp = client
                .get_global_chat_badges(&ctx, &GetGlobalChatBadgesRequest { options })
                .await?;
            print_json(&resp)
        }
    }
}
