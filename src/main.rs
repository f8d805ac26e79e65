use clap::Parser;
use loot_ledger::commands::{self, BossParams, ItemParams};
use loot_ledger::pages::{chunk_message, page_text};
use loot_ledger::{
    CliArgs, Command, CommandReply, LoggingConfig, ServiceConfig, ServiceState, XlsxBackend,
    init_logging,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _guard = init_logging(LoggingConfig::from_env())?;

    let cli = CliArgs::parse();
    let config = ServiceConfig::from_args(&cli)?;
    config.validate()?;

    let backend = Arc::new(XlsxBackend::new(config.workbook_path.clone()));
    let state = Arc::new(ServiceState::new(Arc::new(config), backend));
    state.pager().clone().start_cleanup_task();

    let reply = match cli.command {
        Command::Item {
            item_name,
            difficulty,
            wide,
        } => {
            commands::item(
                state.clone(),
                ItemParams {
                    item_name,
                    difficulty,
                    wide,
                },
            )
            .await
        }
        Command::Boss {
            boss,
            difficulty,
            wide,
        } => {
            commands::boss(
                state.clone(),
                BossParams {
                    boss,
                    difficulty,
                    wide,
                },
            )
            .await
        }
        Command::Bosses => commands::list_bosses(state.clone()).await,
    };

    match reply {
        Ok(reply) => {
            print_reply(&state, &reply);
            Ok(())
        }
        Err(error) => {
            tracing::error!(category = error.category(), error = %error, "command failed");
            eprintln!("{}", error.user_message());
            std::process::exit(1);
        }
    }
}

fn print_reply(state: &ServiceState, reply: &CommandReply) {
    if let Some(content) = &reply.content {
        println!("{content}");
    }
    let max_chunk = state.config().max_chunk;
    for page in &reply.pages {
        for chunk in chunk_message(&page_text(page), max_chunk) {
            println!("{chunk}");
        }
    }
}
