//! Runnable noughts server.
//!
//! Binds the WebSocket endpoint the browser client connects to and runs
//! until terminated. Log verbosity follows `RUST_LOG` (default `info`).

use noughts::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let server = NoughtsServerBuilder::new()
        .bind("0.0.0.0:3000")
        .build()
        .await?;

    tracing::info!(addr = %server.local_addr()?, "noughts server listening");

    server.run().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    //! A full game played the way real clients play it: each side keeps
    //! a local board, applies broadcasts, runs the shared evaluator
    //! after its own move, and reports the outcome — the server never
    //! computes the result itself.

    use std::time::Duration;

    use futures_util::{SinkExt, StreamExt};
    use noughts::prelude::*;
    use tokio_tungstenite::tungstenite::Message;

    type Ws = tokio_tungstenite::WebSocketStream<
        tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
    >;

    async fn start() -> String {
        let server = NoughtsServerBuilder::new()
            .bind("127.0.0.1:0")
            .build()
            .await
            .unwrap();
        let addr = server.local_addr().unwrap().to_string();
        tokio::spawn(async move {
            let _ = server.run().await;
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        addr
    }

    /// A minimal scripted player: socket plus a local board replica.
    struct Player {
        ws: Ws,
        board: Board,
    }

    impl Player {
        async fn connect(addr: &str) -> Self {
            let (ws, _) =
                tokio_tungstenite::connect_async(format!("ws://{addr}"))
                    .await
                    .unwrap();
            Self {
                ws,
                board: Board::new(),
            }
        }

        async fn send(&mut self, event: &ClientEvent) {
            let text = serde_json::to_string(event).unwrap();
            self.ws.send(Message::Text(text.into())).await.unwrap();
        }

        async fn recv(&mut self) -> ServerEvent {
            let msg = tokio::time::timeout(Duration::from_secs(5), self.ws.next())
                .await
                .expect("timed out")
                .unwrap()
                .unwrap();
            serde_json::from_str(msg.to_text().unwrap()).unwrap()
        }

        /// Receives an `updateBoard` broadcast and applies it locally,
        /// as the browser client does.
        async fn apply_update(&mut self) -> Mark {
            match self.recv().await {
                ServerEvent::UpdateBoard { board, next_player } => {
                    self.board = board;
                    next_player
                }
                other => panic!("expected updateBoard, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_full_game_with_client_side_result_reporting() {
        let addr = start().await;
        let room = "42";

        let mut alice = Player::connect(&addr).await;
        let mut bob = Player::connect(&addr).await;

        alice
            .send(&ClientEvent::Create {
                name: "Alice".into(),
                room: room.into(),
            })
            .await;
        assert!(matches!(alice.recv().await, ServerEvent::Message { .. }));

        bob.send(&ClientEvent::Join {
            name: "Bob".into(),
            room: room.into(),
        })
        .await;
        let start = ServerEvent::StartGame {
            current_player: Mark::X,
        };
        assert_eq!(alice.recv().await, start);
        assert_eq!(bob.recv().await, start);

        // Alternate moves until someone's local evaluator ends the game.
        // Columns 0 and 1: the opener takes 0, 3, 6 and wins.
        let script: &[(bool, usize)] =
            &[(true, 0), (false, 1), (true, 3), (false, 4), (true, 6)];

        let mut final_verdict = Verdict::InProgress;
        for &(alices_turn, index) in script {
            let mover = if alices_turn { &mut alice } else { &mut bob };
            mover
                .send(&ClientEvent::MakeMove {
                    room: room.into(),
                    index,
                })
                .await;

            // Both replicas apply the broadcast.
            alice.apply_update().await;
            bob.apply_update().await;

            // The mover evaluates its own copy and reports if decisive.
            let verdict = if alices_turn {
                alice.board.verdict()
            } else {
                bob.board.verdict()
            };
            if verdict.is_over() {
                final_verdict = verdict;
                let reporter = if alices_turn { &mut alice } else { &mut bob };
                reporter
                    .send(&ClientEvent::GameOver {
                        room: room.into(),
                        winner: verdict.winner(),
                    })
                    .await;
                break;
            }
        }

        // The opener's marks are stamped with the post-join turn (O).
        assert_eq!(final_verdict, Verdict::Win(Mark::O));

        let over = ServerEvent::GameOver {
            winner: Some(Mark::O),
        };
        assert_eq!(alice.recv().await, over);
        assert_eq!(bob.recv().await, over);

        // The room is gone; its name is reusable right away.
        let mut carol = Player::connect(&addr).await;
        carol
            .send(&ClientEvent::Create {
                name: "Carol".into(),
                room: room.into(),
            })
            .await;
        assert_eq!(
            carol.recv().await,
            ServerEvent::Message {
                text: "Room created: Waiting for the opponent...".into()
            }
        );
    }
}
