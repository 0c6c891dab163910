//! CLI command handlers.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::auth::SessionEvent;
use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::error::FeedError;
use crate::types::{FeedPatch, FeedRename, FeedUpdate, LogQuery, NewFeed};

use super::{AuthCommands, Cli, Commands, FeedCommands, LogsArgs, MagnetCommands};

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Build the effective configuration: CLI flags over env over defaults.
pub fn resolve_config(cli: &Cli) -> Result<ClientConfig, FeedError> {
    apply_flags(cli, ClientConfig::from_env()?)
}

/// Overlay the global CLI flags onto `config`.
fn apply_flags(cli: &Cli, mut config: ClientConfig) -> Result<ClientConfig, FeedError> {
    if let Some(url) = &cli.base_url {
        config = config.with_base_url(url.clone())?;
    }
    if let Some(dir) = &cli.session_dir {
        config = config.with_session_dir(dir.clone());
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    Ok(config)
}

/// Run a parsed command line.
pub async fn run(cli: Cli) -> CliResult {
    let config = resolve_config(&cli)?;
    let client = ApiClient::from_config(&config)?.with_event_sink(Arc::new(report_session_event));

    match cli.command {
        Commands::Auth(args) => match args.command {
            AuthCommands::Login(login) => {
                let response = client.login(&login.username, &login.password).await?;
                if response.token.is_some() {
                    println!("Logged in as {}", login.username);
                } else {
                    println!("Login accepted but no token was issued");
                }
            }
            AuthCommands::Status => match client.credential()? {
                Some(credential) => println!(
                    "Logged in (credential saved {})",
                    credential.saved_at.format("%Y-%m-%d %H:%M:%S UTC")
                ),
                None => println!("Not logged in"),
            },
            AuthCommands::Logout => {
                client.logout()?;
                println!("Logged out");
            }
        },
        Commands::Feeds(args) => run_feeds(&client, args.command).await?,
        Commands::Magnets(args) => match args.command {
            MagnetCommands::List { feed: Some(rss_id) } => {
                print_json(&client.magnets_for_feed(rss_id).await?)?
            }
            MagnetCommands::List { feed: None } => print_json(&client.list_magnets().await?)?,
            MagnetCommands::Delete { id } => print_json(&client.delete_magnet(id).await?)?,
            MagnetCommands::Retry { id } => print_json(&client.retry_magnet(id).await?)?,
        },
        Commands::Logs(args) => print_json(&client.fetch_logs(&log_query(&args)).await?)?,
        Commands::LoginLogs => print_json(&client.login_logs().await?)?,
        Commands::Route(args) => {
            let route = client.navigate(&args.path);
            println!("{} -> {} ({})", args.path, route.name(), route.path());
        }
    }
    Ok(())
}

async fn run_feeds(client: &ApiClient, command: FeedCommands) -> CliResult {
    match command {
        FeedCommands::List => print_json(&client.list_feeds().await?)?,
        FeedCommands::Show { id } => print_json(&client.get_feed(id).await?)?,
        FeedCommands::Add { name, url } => {
            print_json(&client.create_feed(&NewFeed::new(name, url)).await?)?
        }
        FeedCommands::Update {
            id,
            name,
            url,
            should_update,
        } => {
            let update = FeedUpdate {
                name,
                url,
                should_update,
            };
            print_json(&client.update_feed(id, &update).await?)?
        }
        FeedCommands::Patch {
            id,
            name,
            url,
            should_update,
        } => {
            let patch = FeedPatch {
                name,
                url,
                should_update,
            };
            print_json(&client.patch_feed(id, &patch).await?)?
        }
        FeedCommands::Rename {
            id,
            old_name,
            new_name,
        } => {
            let rename = FeedRename { old_name, new_name };
            print_json(&client.rename_feed(id, &rename).await?)?
        }
        FeedCommands::Delete { id } => print_json(&client.delete_feed(id).await?)?,
        FeedCommands::Refresh { ids } => {
            let outcomes = client.refresh_feeds(&ids).await;
            let mut failed = 0;
            for (id, outcome) in &outcomes {
                match outcome {
                    Ok(status) => println!(
                        "feed {id}: {}",
                        status.message.as_deref().unwrap_or("refreshed")
                    ),
                    Err(err) => {
                        failed += 1;
                        eprintln!("feed {id}: {err}");
                    }
                }
            }
            if failed > 0 {
                return Err(format!("{failed} of {} feed refreshes failed", outcomes.len()).into());
            }
        }
    }
    Ok(())
}

fn log_query(args: &LogsArgs) -> LogQuery {
    LogQuery::builder()
        .level(args.level)
        .maybe_start_date(args.start_date)
        .maybe_end_date(args.end_date)
        .include_details(!args.no_details)
        .page(args.page)
        .page_size(args.page_size)
        .build()
}

fn report_session_event(event: SessionEvent) {
    if let SessionEvent::Invalidated { redirect } = event {
        eprintln!("Session expired and could not be renewed; log in again (view: {redirect})");
    }
}

fn print_json<T: Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
