pub mod protocol;
pub mod state_stream;

use crate::config::Config;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State as AxumState, WebSocketUpgrade,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use futures_util::{SinkExt, StreamExt};
use protocol::{ClientMessage, ServerMessage};
pub use state_stream::{GenerationSnapshot, SharedSnapshot, StateStream};
use tokio::time::{interval, Duration};
use tower_http::services::ServeDir;

#[derive(Clone)]
struct AppState {
    stream: StateStream,
    config: Config,
}

pub async fn run_server(
    config: Config,
    state: SharedSnapshot,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.server.address, config.server.port);
    let stream = StateStream::new(state);
    let static_dir = config.server.static_dir.clone();

    let app_state = AppState {
        stream,
        config: config.clone(),
    };

    let app = Router::new()
        .route("/ws", get(websocket_handler))
        .fallback_service(ServeDir::new(&static_dir))
        .with_state(app_state);

    log::info!("HTTP server with WebSocket listening on: {}", addr);
    log::info!("Static files served from: {}", static_dir);
    log::info!("WebSocket endpoint: ws://{}/ws", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn websocket_handler(
    ws: WebSocketUpgrade,
    AxumState(state): AxumState<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_websocket(socket, state))
}

async fn handle_websocket(socket: WebSocket, app_state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let mut update_interval = interval(Duration::from_millis(
        1000 / app_state.config.server.update_rate_hz.max(1),
    ));
    let mut last_sent: Option<u32> = None;

    loop {
        tokio::select! {
            _ = update_interval.tick() => {
                let latest = app_state.stream.latest_generation().await;
                if latest.is_none() || latest == last_sent {
                    continue;
                }

                let snapshot = app_state.stream.get_state().await;
                last_sent = snapshot.as_ref().map(|s| s.record.generation);
                let message = ServerMessage::from_snapshot(snapshot);

                if let Ok(json) = serde_json::to_string(&message) {
                    if sender.send(Message::Text(json)).await.is_err() {
                        log::info!("Client disconnected");
                        break;
                    }
                }
            }

            Some(msg) = receiver.next() => {
                match msg {
                    Ok(Message::Text(text)) => {
                        match serde_json::from_str::<ClientMessage>(&text) {
                            Ok(ClientMessage::GetReplay) => {
                                let snapshot = app_state.stream.get_state().await;
                                let message = ServerMessage::from_snapshot(snapshot);

                                if let Ok(json) = serde_json::to_string(&message) {
                                    let _ = sender.send(Message::Text(json)).await;
                                }
                            }
                            Err(e) => {
                                log::warn!("Ignoring client message {:?}: {}", text, e);
                            }
                        }
                    }
                    Ok(Message::Close(_)) => {
                        log::info!("Client requested close");
                        break;
                    }
                    Err(e) => {
                        log::error!("WebSocket error: {}", e);
                        break;
                    }
                    _ => {}
                }
            }
        }
    }

    log::info!("WebSocket connection closed");
}
