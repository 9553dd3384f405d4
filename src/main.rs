use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;

use content_approval::{
    init_telemetry, Action, ApprovalConfig, ContentStateApi, ContentStateClient, DecisionSink,
    TransitionEngine, WebhookNotifier,
};

#[derive(Parser)]
#[command(name = "content-approval")]
#[command(about = "Approval workflow for content-management pages")]
#[command(long_about = "Drives a page's publication lifecycle against the remote \
                       content-state store: approve advances one review stage, reject \
                       returns the page to draft, re-review puts it back into internal \
                       review. Every decision is also reported to the automation webhook.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Advance the page one approval stage (terminal once published)
    Approve {
        #[arg(long, help = "Content identifier of the page")]
        page_id: String,
        #[arg(long, help = "Key of the space that owns the page")]
        space_key: String,
    },
    /// Send the page back to draft
    Reject {
        #[arg(long, help = "Content identifier of the page")]
        page_id: String,
        #[arg(long, help = "Key of the space that owns the page")]
        space_key: String,
    },
    /// Put the page back into internal review
    ReReview {
        #[arg(long, help = "Content identifier of the page")]
        page_id: String,
        #[arg(long, help = "Key of the space that owns the page")]
        space_key: String,
    },
    /// Show the page's current workflow state
    Status {
        #[arg(long, help = "Content identifier of the page")]
        page_id: String,
    },
}

fn main() -> Result<()> {
    ApprovalConfig::load_env_file()?;
    let config = ApprovalConfig::load()?;
    init_telemetry(&config.observability.log_level)?;

    let cli = Cli::parse();

    tokio::runtime::Runtime::new()?.block_on(async {
        let remote: Arc<dyn ContentStateApi> = Arc::new(ContentStateClient::new(&config.remote)?);
        let notifier: Arc<dyn DecisionSink> = Arc::new(WebhookNotifier::new(&config.webhook)?);
        let engine = TransitionEngine::new(remote, notifier);

        match cli.command {
            Commands::Approve { page_id, space_key } => {
                run_action(&engine, &page_id, &space_key, Action::Approve).await
            }
            Commands::Reject { page_id, space_key } => {
                run_action(&engine, &page_id, &space_key, Action::Reject).await
            }
            Commands::ReReview { page_id, space_key } => {
                run_action(&engine, &page_id, &space_key, Action::RequestReReview).await
            }
            Commands::Status { page_id } => {
                match engine.current_state(&page_id).await? {
                    Some(state) => println!("{}", state.name()),
                    None => println!("(no workflow state)"),
                }
                Ok(())
            }
        }
    })
}

async fn run_action(
    engine: &TransitionEngine,
    page_id: &str,
    space_key: &str,
    action: Action,
) -> Result<()> {
    let result = engine.apply_action(page_id, space_key, action).await;
    println!("{}", serde_json::to_string_pretty(&result)?);
    if !result.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
