//! Console front-end for the chat broker.
//!
//! Reads commands from stdin (see `chatbroker::console`), prints every
//! delivered message as a JSON line tagged with the receiving user, and
//! shuts the broker down on `/quit`, end of input or Ctrl-C.

use std::process::ExitCode;
use std::sync::Arc;

use chatbroker::broker::Broker;
use chatbroker::client::{Client, Inbox};
use chatbroker::config::{Settings, load_config};
use chatbroker::console::ConsoleCommand;
use chatbroker::utils::{logging, shutdown};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

const CONSOLE_USER: &str = "console";

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let settings = match load_config() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    logging::init(&settings.logging.level);

    match run(settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("chatbroker failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let (trigger, signal) = shutdown::channel();
    let broker = Arc::new(Broker::with_settings(signal, &settings.broker));
    let dispatcher = broker.start()?;

    join(&broker, CONSOLE_USER, settings.broker.outbox_capacity);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = &mut ctrl_c => {
                info!("Shutdown signal received. Exiting gracefully.");
                break;
            }
        };
        let Some(line) = line else { break };

        let command = match ConsoleCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                warn!("{}", e);
                continue;
            }
        };

        match command {
            ConsoleCommand::Quit => break,
            ConsoleCommand::Join(user) => join(&broker, &user, settings.broker.outbox_capacity),
            ConsoleCommand::Leave(user) => broker.unregister_user(&user),
            other => {
                if let Some(msg) = other.into_message(CONSOLE_USER) {
                    if let Err(e) = broker.send_message(msg).await {
                        warn!("message not accepted: {}", e);
                    }
                }
            }
        }
    }

    trigger.cancel();
    dispatcher.await?;
    Ok(())
}

/// Registers `user` and prints everything delivered to it until the inbox
/// closes.
fn join(broker: &Broker, user: &str, capacity: usize) {
    let (client, inbox) = Client::new(user, capacity);
    broker.register_client(client);
    info!("{} joined", user);
    tokio::spawn(print_inbox(user.to_string(), inbox));
}

async fn print_inbox(user: String, mut inbox: Inbox) {
    while let Some(msg) = inbox.recv().await {
        match serde_json::to_string(&msg) {
            Ok(json) => println!("[{user}] {json}"),
            Err(e) => error!("Failed to serialize message for {}: {}", user, e),
        }
    }
    info!("{} left", user);
}
