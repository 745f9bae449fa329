//! Interactive session of the demo peer.

use std::sync::Arc;

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

use crate::{
    agent::ClientSyncAgent,
    api::HttpRelayApi,
    command::{Command, parse_command},
    config::SyncConfig,
    domain::unseen_messages,
    error::ClientError,
    formatter::MessageFormatter,
    ui::redisplay_prompt,
};

/// Read lines on a blocking thread and forward them to `input_tx`
fn spawn_readline(player_id: i64, input_tx: mpsc::UnboundedSender<String>) {
    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let prompt = format!("Player {}> ", player_id);

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });
}

/// Register with the relay at `url` and run the interactive loop until
/// `/quit`, Ctrl+C or Ctrl+D.
pub async fn run_client(url: String, config: SyncConfig) -> Result<(), ClientError> {
    let api = Arc::new(HttpRelayApi::new(url));
    let agent = Arc::new(ClientSyncAgent::new(api, config)?);

    let player_id = match agent.enter().await {
        Ok(id) => id,
        Err(e) => {
            agent.exit().await;
            return Err(e);
        }
    };
    println!("{}", MessageFormatter::format_registered(player_id));

    // Print chat lines as new snapshots arrive
    let mut chat_rx = agent.subscribe_chat();
    let printer = tokio::spawn(async move {
        let mut seen_until: Option<f64> = None;
        while chat_rx.changed().await.is_ok() {
            let fresh = unseen_messages(&chat_rx.borrow_and_update(), seen_until);
            if let Some(last) = fresh.last() {
                seen_until = Some(last.timestamp);
                print!("\r");
                for message in &fresh {
                    println!("{}", MessageFormatter::format_chat_message(message));
                }
                redisplay_prompt(player_id);
            }
        }
    });

    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();
    spawn_readline(player_id, input_tx);

    while let Some(line) = input_rx.recv().await {
        match parse_command(&line) {
            Ok(Command::Move {
                x,
                y,
                map,
                direction,
            }) => {
                if !agent.update(x, y, map, false, direction) {
                    println!("Update dropped (queue full)");
                }
            }
            Ok(Command::Players) => {
                print!("{}", MessageFormatter::format_players(&agent.players()));
            }
            Ok(Command::Quit) => break,
            Ok(Command::Chat(text)) => {
                agent.send_chat(text);
            }
            Ok(Command::Empty) => {}
            Err(e) => println!("{}", e),
        }
    }

    printer.abort();
    agent.exit().await;
    Ok(())
}
