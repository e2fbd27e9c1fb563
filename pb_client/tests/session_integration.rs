//! Integration tests for the pb_client session driver.
//!
//! Each test runs a scripted match server in-process and points a real
//! client at it over a loopback WebSocket.

use futures_util::{SinkExt, StreamExt};
use pb_client::websocket_client::{SessionError, SessionReport, WebSocketClient};
use praetor_bot::{
    CallingStation, Dispatcher, LookupEvaluator, MatchIdentity, Policy, ProtocolError,
    SessionPhase, Signer,
};
use serde_json::{Value, json};
use std::{future::Future, sync::Arc, time::Duration};
use tokio::{
    net::{TcpListener, TcpStream},
    task::JoinHandle,
    time::timeout,
};
use tokio_tungstenite::{WebSocketStream, accept_async, tungstenite::Message};

const SECRET: &str = "integration-secret";
const MATCH_ID: u64 = 314;

type ServerStream = WebSocketStream<TcpStream>;

fn dispatcher(policy: Policy) -> Dispatcher {
    let identity = MatchIdentity {
        player_id: 0,
        match_id: MATCH_ID,
        username: "tester".to_string(),
    };
    Dispatcher::new(
        identity,
        Signer::new(SECRET).unwrap(),
        Arc::new(LookupEvaluator::new()),
        policy,
    )
}

/// Start a one-connection server running `script`, returning its URL.
async fn serve<F, Fut>(script: F) -> (String, JoinHandle<()>)
where
    F: FnOnce(ServerStream) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (tcp, _) = listener.accept().await.unwrap();
        let ws = accept_async(tcp).await.unwrap();
        script(ws).await;
    });
    (format!("ws://{addr}"), handle)
}

async fn play(url: String, dispatcher: &mut Dispatcher) -> Result<SessionReport, SessionError> {
    timeout(
        Duration::from_secs(10),
        WebSocketClient::new(url).connect_and_play(dispatcher),
    )
    .await
    .expect("session should finish")
}

async fn push(ws: &mut ServerStream, value: Value) {
    ws.send(Message::Text(value.to_string().into())).await.unwrap();
}

async fn recv_json(ws: &mut ServerStream) -> Value {
    loop {
        match ws.next().await {
            Some(Ok(Message::Text(text))) => return serde_json::from_str(text.as_str()).unwrap(),
            Some(Ok(Message::Ping(_) | Message::Pong(_))) => continue,
            other => panic!("expected a text frame, got {other:?}"),
        }
    }
}

/// Read the check-in and answer it with confirmation and starting state.
async fn open_match(ws: &mut ServerStream) -> Value {
    let check_in = recv_json(ws).await;
    push(ws, json!({ "message_type": "checkin_confirmation" })).await;
    push(
        ws,
        json!({
            "message_type": "initial_game_state",
            "blind_amounts": { "big": 20, "small": 10 },
            "starting_stack": 1000,
            "player_names": { "player_1": "tester", "player_2": "house" },
        }),
    )
    .await;
    check_in
}

async fn drain(ws: &mut ServerStream) {
    while let Some(Ok(message)) = ws.next().await {
        if message.is_close() {
            break;
        }
    }
}

#[tokio::test]
async fn test_check_in_is_signed_over_match_id() {
    let (url, server) = serve(|mut ws| async move {
        let check_in = open_match(&mut ws).await;
        assert_eq!(check_in["message_type"], "check_in");
        assert_eq!(check_in["player_id"], 0);
        assert_eq!(check_in["match_id"], MATCH_ID);
        let signature = check_in["signature"].as_str().unwrap();
        assert!(Signer::new(SECRET).unwrap().verify(&MATCH_ID.to_string(), signature));
        assert!(!check_in.to_string().contains(SECRET));

        push(&mut ws, json!({ "message_type": "end_match" })).await;
        drain(&mut ws).await;
    })
    .await;

    let mut d = dispatcher(Policy::default());
    let report = play(url, &mut d).await.unwrap();
    assert_eq!(report.final_phase, SessionPhase::MatchEnded);
    assert_eq!(report.hands_played, 0);
    assert!(report.ended_at >= report.started_at);
    server.await.unwrap();
}

#[tokio::test]
async fn test_pocket_aces_preflop_call() {
    let (url, server) = serve(|mut ws| async move {
        open_match(&mut ws).await;
        push(
            &mut ws,
            json!({ "message_type": "new_hand", "hole_cards": "Ah_Ad", "current_stage": "preflop" }),
        )
        .await;
        push(&mut ws, json!({ "message_type": "next_to_act" })).await;

        let reply = recv_json(&mut ws).await;
        let signer = Signer::new(SECRET).unwrap();
        assert_eq!(
            reply,
            json!({
                "message_type": "input_action",
                "player_id": 0,
                "match_id": MATCH_ID,
                "action": "call",
                "signature": signer.sign("call"),
            })
        );

        push(&mut ws, json!({ "message_type": "end_hand" })).await;
        push(&mut ws, json!({ "message_type": "end_match" })).await;
        drain(&mut ws).await;
    })
    .await;

    let mut d = dispatcher(Policy::default());
    let report = play(url, &mut d).await.unwrap();
    assert_eq!(report.hands_played, 1);
    assert_eq!(report.actions_sent, 1);
    server.await.unwrap();
}

#[tokio::test]
async fn test_replies_arrive_in_order_across_hands() {
    const HANDS: usize = 5;

    let (url, server) = serve(|mut ws| async move {
        open_match(&mut ws).await;
        for _ in 0..HANDS {
            push(
                &mut ws,
                json!({ "message_type": "new_hand", "hole_cards": "7c_2d", "current_stage": "preflop" }),
            )
            .await;
            push(&mut ws, json!({ "message_type": "next_to_act" })).await;
            assert_eq!(recv_json(&mut ws).await["action"], "call");

            push(
                &mut ws,
                json!({ "message_type": "stage", "board_update": "Ks_9h_4c", "current_stage": "flop" }),
            )
            .await;
            push(&mut ws, json!({ "message_type": "next_to_act", "current_round_bet": 0 })).await;
            push(&mut ws, json!({ "message_type": "effective_action", "pot_size": 60 })).await;
            push(&mut ws, json!({ "message_type": "next_to_act", "current_round_bet": 20 })).await;

            // Both flop replies, in the order they were requested.
            assert_eq!(recv_json(&mut ws).await["action"], "call");
            assert_eq!(recv_json(&mut ws).await["action"], "call");
            push(&mut ws, json!({ "message_type": "end_hand" })).await;
        }
        push(&mut ws, json!({ "message_type": "end_match" })).await;
        drain(&mut ws).await;
    })
    .await;

    let mut d = dispatcher(Policy::CallingStation(CallingStation));
    let report = play(url, &mut d).await.unwrap();
    assert_eq!(report.hands_played, HANDS as u64);
    assert_eq!(report.actions_sent, 3 * HANDS as u64);
    assert!(d.hand_state().is_at_rest());
    server.await.unwrap();
}

#[tokio::test]
async fn test_unknown_messages_are_ignored() {
    let (url, server) = serve(|mut ws| async move {
        push(&mut ws, json!({ "message_type": "motd", "text": "welcome" })).await;
        open_match(&mut ws).await;
        push(&mut ws, json!({ "message_type": "chat", "from": "house", "text": "gl" })).await;
        push(&mut ws, json!({ "message_type": "end_match" })).await;
        drain(&mut ws).await;
    })
    .await;

    let mut d = dispatcher(Policy::default());
    let report = play(url, &mut d).await.unwrap();
    assert_eq!(report.final_phase, SessionPhase::MatchEnded);
    assert_eq!(report.actions_sent, 0);
    server.await.unwrap();
}

#[tokio::test]
async fn test_malformed_frame_ends_session_with_error() {
    let (url, server) = serve(|mut ws| async move {
        open_match(&mut ws).await;
        ws.send(Message::Text("{\"message_type\": ".to_string().into()))
            .await
            .unwrap();
        drain(&mut ws).await;
    })
    .await;

    let mut d = dispatcher(Policy::default());
    match play(url, &mut d).await {
        Err(SessionError::Protocol(err)) => assert!(err.is_malformation()),
        other => panic!("expected a protocol error, got {other:?}"),
    }
    server.await.unwrap();
}

#[tokio::test]
async fn test_binary_frame_is_rejected() {
    let (url, server) = serve(|mut ws| async move {
        open_match(&mut ws).await;
        ws.send(Message::Binary(vec![1u8, 2, 3].into())).await.unwrap();
        drain(&mut ws).await;
    })
    .await;

    let mut d = dispatcher(Policy::default());
    assert!(matches!(
        play(url, &mut d).await,
        Err(SessionError::Protocol(ProtocolError::BinaryFrame))
    ));
    server.await.unwrap();
}

#[tokio::test]
async fn test_out_of_order_message_is_fatal() {
    let (url, server) = serve(|mut ws| async move {
        recv_json(&mut ws).await;
        push(&mut ws, json!({ "message_type": "next_to_act" })).await;
        drain(&mut ws).await;
    })
    .await;

    let mut d = dispatcher(Policy::default());
    assert!(matches!(
        play(url, &mut d).await,
        Err(SessionError::Protocol(ProtocolError::UnexpectedMessage { .. }))
    ));
    assert_eq!(d.actions_sent(), 0);
    server.await.unwrap();
}

#[tokio::test]
async fn test_server_close_ends_session_cleanly() {
    let (url, server) = serve(|mut ws| async move {
        open_match(&mut ws).await;
        ws.close(None).await.unwrap();
        drain(&mut ws).await;
    })
    .await;

    let mut d = dispatcher(Policy::default());
    let report = play(url, &mut d).await.unwrap();
    assert_eq!(report.final_phase, SessionPhase::IdleBetweenHands);
    server.await.unwrap();
}

#[tokio::test]
async fn test_dropped_connection_ends_session_cleanly() {
    let (url, server) = serve(|mut ws| async move {
        open_match(&mut ws).await;
        drop(ws);
    })
    .await;

    let mut d = dispatcher(Policy::default());
    let report = play(url, &mut d).await.unwrap();
    assert_ne!(report.final_phase, SessionPhase::MatchEnded);
    server.await.unwrap();
}

#[tokio::test]
async fn test_connection_refused() {
    // Grab a free port, then stop listening on it.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut d = dispatcher(Policy::default());
    assert!(matches!(
        play(format!("ws://{addr}"), &mut d).await,
        Err(SessionError::Connect(_))
    ));
}
