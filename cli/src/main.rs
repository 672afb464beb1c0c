use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use opc_publisher_models::{
    PublishStartRequestApiModel, PublishStopRequestApiModel, PublishedItemApiModel,
    PublishedItemListRequestApiModel, ServiceResultApiModel,
};
use opcpub::config::{default_config_path, Config};
use opcpub::{Client, PublisherClient};

/// Exit status when the service reported an application-level error in `errorInfo`.
const EXIT_ERROR_INFO: i32 = 2;

#[derive(Parser, Debug)]
#[command(name = "opcpub")]
#[command(about = "OPC Publisher command line client", long_about = None)]
struct Cli {
    /// Publisher service base URL
    #[arg(long, env = "OPCPUB_BASE_URL", global = true)]
    base_url: Option<String>,

    /// API key sent as x-api-key
    #[arg(long, env = "OPCPUB_API_KEY", global = true)]
    api_key: Option<String>,

    /// Bearer token sent in the authorization header
    #[arg(long, env = "OPCPUB_TOKEN", global = true)]
    token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Retries for throttled or failed idempotent requests
    #[arg(long, global = true)]
    retries: Option<u32>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start publishing a node
    Start {
        endpoint_id: String,
        node_id: String,
        /// Browse path segments, separated by '/'
        #[arg(long, value_delimiter = '/')]
        browse_path: Option<Vec<String>>,
        /// Publishing interval in milliseconds
        #[arg(long, allow_negative_numbers = true)]
        publishing_interval: Option<i32>,
        /// Sampling interval in milliseconds
        #[arg(long, allow_negative_numbers = true)]
        sampling_interval: Option<i32>,
    },
    /// Stop publishing a node
    Stop { endpoint_id: String, node_id: String },
    /// List published nodes
    List {
        endpoint_id: String,
        /// Follow continuation tokens and print every node
        #[arg(long)]
        all: bool,
    },
    /// Fetch the next page of published nodes
    Next {
        endpoint_id: String,
        continuation_token: String,
    },
    /// Register for samples of an endpoint
    Subscribe {
        endpoint_id: String,
        #[arg(long)]
        user_id: Option<String>,
    },
    /// Unregister from samples of an endpoint
    Unsubscribe { endpoint_id: String, user_id: String },
    /// Show or change the saved configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Save the global connection flags to the config file
    Set,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let file_config = Config::load(&config_path)?;
    let flags = Config {
        base_url: cli.base_url.clone(),
        api_key: cli.api_key.clone(),
        bearer_token: cli.token.clone(),
        timeout_secs: cli.timeout_secs,
        retries: cli.retries,
    };
    let config = file_config.merged(&flags);

    if let Command::Config { action } = &cli.command {
        match action {
            ConfigAction::Show => print_json(&config.redacted())?,
            ConfigAction::Set => {
                config.save(&config_path)?;
                println!("Saved {}", config_path.display());
            }
        }
        return Ok(());
    }

    let client = Client::new(
        config.base_url(),
        config.credential(),
        config.timeout(),
        config.retries(),
    )
    .context("Failed to create client")?;
    debug!("Using publisher service at {}", client.base_url());
    let publisher = PublisherClient::new(client);

    let error_info = match cli.command {
        Command::Start {
            endpoint_id,
            node_id,
            browse_path,
            publishing_interval,
            sampling_interval,
        } => {
            let request = PublishStartRequestApiModel::new(PublishedItemApiModel {
                node_id,
                browse_path,
                publishing_interval,
                sampling_interval,
            });
            let resp = publisher
                .start_publishing_values(&endpoint_id, &request)
                .await?;
            print_json(&resp)?;
            resp.error_info
        }
        Command::Stop {
            endpoint_id,
            node_id,
        } => {
            let resp = publisher
                .stop_publishing_values(&endpoint_id, &PublishStopRequestApiModel::new(node_id))
                .await?;
            print_json(&resp)?;
            resp.error_info
        }
        Command::List { endpoint_id, all } => {
            if all {
                let items = publisher.list_all_published_nodes(&endpoint_id).await?;
                print_json(&items)?;
            } else {
                let resp = publisher
                    .get_first_list_of_published_nodes(
                        &endpoint_id,
                        &PublishedItemListRequestApiModel::default(),
                    )
                    .await?;
                print_json(&resp)?;
            }
            None
        }
        Command::Next {
            endpoint_id,
            continuation_token,
        } => {
            let resp = publisher
                .get_next_list_of_published_nodes(&endpoint_id, &continuation_token)
                .await?;
            print_json(&resp)?;
            None
        }
        Command::Subscribe {
            endpoint_id,
            user_id,
        } => {
            let user_id = publisher
                .subscribe(&endpoint_id, user_id.as_deref())
                .await?;
            print_json(&serde_json::json!({ "userId": user_id }))?;
            None
        }
        Command::Unsubscribe {
            endpoint_id,
            user_id,
        } => {
            publisher.unsubscribe(&endpoint_id, &user_id).await?;
            println!("{}", r#"{"success":true}"#);
            None
        }
        Command::Config { .. } => None,
    };

    let code = exit_code(error_info.as_ref());
    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}

/// Any `errorInfo` in a response counts as an application-level failure.
fn exit_code(error_info: Option<&ServiceResultApiModel>) -> i32 {
    match error_info {
        Some(_) => EXIT_ERROR_INFO,
        None => 0,
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
