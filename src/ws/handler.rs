use crate::ws::{
    game_server::GameServer,
    messages::{ClientMessage, ServerMessage},
    rate_limit::RateLimiter,
};
use axum::{
    extract::{
        ws::{Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

#[derive(Deserialize)]
pub struct WsQuery {
    name: Option<String>,
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
    State(game_server): State<Arc<GameServer>>,
) -> Response {
    ws.max_message_size(8 * 1024) // 8KB max message size
        .on_upgrade(move |socket| handle_socket(socket, query.name, game_server))
}

async fn handle_socket(socket: WebSocket, name: Option<String>, game_server: Arc<GameServer>) {
    let (mut sender, mut receiver) = socket.split();

    // Joining before subscribing keeps our own arrival notice out of this
    // socket's stream; the direct reply below covers it.
    let (player_id, reply) = game_server.join(name).await;
    let mut broadcast_rx = game_server.subscribe();

    if let Ok(json) = serde_json::to_string(&reply) {
        let _ = sender.send(Message::Text(json)).await;
    }

    let mut rate_limiter = RateLimiter::new(10, Duration::from_secs(1));
    let mut ping_interval = tokio::time::interval(Duration::from_secs(30));
    let mut last_pong = tokio::time::Instant::now();

    loop {
        tokio::select! {
            // Player intents from the client
            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        if !rate_limiter.allow() {
                            tracing::debug!("Rate limited message from {}", player_id);
                            continue;
                        }

                        if let Ok(client_msg) = serde_json::from_str::<ClientMessage>(&text) {
                            match client_msg {
                                ClientMessage::Hit => game_server.hit(&player_id).await,
                                ClientMessage::Stick => game_server.stick(&player_id).await,
                                ClientMessage::GetTableState => {
                                    let game_state = game_server.snapshot().await;
                                    let reply = ServerMessage::TableState { game_state };
                                    if let Ok(json) = serde_json::to_string(&reply) {
                                        let _ = sender.send(Message::Text(json)).await;
                                    }
                                }
                                ClientMessage::Ping => {
                                    if let Ok(json) = serde_json::to_string(&ServerMessage::Pong) {
                                        let _ = sender.send(Message::Text(json)).await;
                                    }
                                }
                            }
                        }
                    }
                    Some(Ok(Message::Pong(_))) => {
                        last_pong = tokio::time::Instant::now();
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        game_server.leave(&player_id).await;
                        break;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::debug!("WebSocket error for {}: {}", player_id, e);
                        game_server.leave(&player_id).await;
                        break;
                    }
                }
            }

            // Table events for everyone at the table
            event = broadcast_rx.recv() => {
                match event {
                    Ok(message) => {
                        if let Ok(json) = serde_json::to_string(&message) {
                            if sender.send(Message::Text(json)).await.is_err() {
                                game_server.leave(&player_id).await;
                                break;
                            }
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(
                            "Socket for {} lagged, skipped {} events",
                            player_id,
                            skipped
                        );
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }

            // Server-side heartbeat
            _ = ping_interval.tick() => {
                if last_pong.elapsed() > Duration::from_secs(40) {
                    tracing::warn!("No pong from {} in 40s, closing connection", player_id);
                    game_server.leave(&player_id).await;
                    break;
                }
                let _ = sender.send(Message::Ping(Vec::new())).await;
            }
        }
    }
}
