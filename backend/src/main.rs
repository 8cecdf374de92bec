//! Demo binary: wires the in-memory collaborators to a coordinator and
//! drives a full game (fool's mate) through the command protocol, with
//! two seated players and one observer. No network transport; inbound
//! commands are fed directly and outbound events are logged.

use backend::{GameStore, MemoryAuthStore, MemoryGameStore, SessionCoordinator};
use chess_core::{Color, Move, Position};
use shared::{ClientCommand, ServerEvent};
use std::sync::Arc;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let auth = Arc::new(MemoryAuthStore::new());
    let store = Arc::new(MemoryGameStore::new());
    let coordinator = SessionCoordinator::new(auth.clone(), store.clone());

    let game_id = store.create("fool's mate demo");
    store
        .set_seat(game_id, Color::White, Some("alice".to_string()))
        .await?;
    store
        .set_seat(game_id, Color::Black, Some("bob".to_string()))
        .await?;

    let alice = client("alice", &auth);
    let bob = client("bob", &auth);
    let watcher = client("carol", &auth);

    for c in [&alice, &bob, &watcher] {
        coordinator
            .handle(
                ClientCommand::Connect {
                    auth_token: c.token.clone(),
                    game_id,
                },
                &c.sink,
            )
            .await;
    }

    // f2-f3, e7-e5, g2-g4, Qd8-h4#
    let script = [
        (&alice, mv((2, 6), (3, 6))),
        (&bob, mv((7, 5), (5, 5))),
        (&alice, mv((2, 7), (4, 7))),
        (&bob, mv((8, 4), (4, 8))),
    ];
    for (player, mv) in script {
        coordinator
            .handle(
                ClientCommand::MakeMove {
                    auth_token: player.token.clone(),
                    game_id,
                    mv,
                },
                &player.sink,
            )
            .await;
    }

    // Let the event-logging tasks drain before exiting.
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    let record = store.get(game_id).await?;
    tracing::info!(game_over = record.game.is_over(), "demo finished");
    Ok(())
}

struct Client {
    token: String,
    sink: backend::EventSink,
}

/// Issue a token and spawn a task logging every event this identity
/// receives.
fn client(username: &'static str, auth: &MemoryAuthStore) -> Client {
    let token = auth.issue(username);
    let (sink, mut rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event {
                ServerEvent::LoadGame { game } => {
                    tracing::info!(username, turn = %game.turn(), "state snapshot")
                }
                ServerEvent::Notification { message } => {
                    tracing::info!(username, %message, "notification")
                }
                ServerEvent::Error { message } => {
                    tracing::warn!(username, %message, "error")
                }
            }
        }
    });
    Client { token, sink }
}

fn mv(from: (u8, u8), to: (u8, u8)) -> Move {
    Move::new(Position::new(from.0, from.1), Position::new(to.0, to.1))
}
