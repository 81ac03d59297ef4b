use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;

use crate::broker::{Broker, BrokerState, Message};
use crate::client::Client;
use crate::config::BrokerSettings;
use crate::utils::error::BrokerError;
use crate::utils::shutdown;

#[tokio::test]
async fn integration_chat_room_end_to_end() {
    crate::utils::logging::init("debug");

    let (trigger, signal) = shutdown::channel();
    let broker = Arc::new(Broker::new(signal));
    let dispatcher = broker.start().unwrap();

    let (alice, mut alice_inbox) = Client::new("alice", 16);
    let (bob, mut bob_inbox) = Client::new("bob", 16);
    broker.register_client(alice);
    broker.register_client(bob);

    broker
        .send_message(Message::broadcast("alice", "hi room"))
        .await
        .unwrap();
    broker
        .send_message(Message::direct("bob", "alice", "hi alice"))
        .await
        .unwrap();

    let wait = Duration::from_secs(2);
    let got = tokio::time::timeout(wait, alice_inbox.recv()).await.unwrap().unwrap();
    assert_eq!(got.content, "hi room");
    let got = tokio::time::timeout(wait, alice_inbox.recv()).await.unwrap().unwrap();
    assert_eq!(got.content, "hi alice");
    assert_eq!(got.sender, "bob");

    let got = tokio::time::timeout(wait, bob_inbox.recv()).await.unwrap().unwrap();
    assert_eq!(got.content, "hi room");

    trigger.cancel();
    tokio::time::timeout(wait, dispatcher).await.unwrap().unwrap();
    assert_eq!(broker.state(), BrokerState::Closed);

    let err = broker
        .send_message(Message::broadcast("alice", "anyone?"))
        .await
        .unwrap_err();
    assert_eq!(err, BrokerError::Closed);
}

#[tokio::test]
async fn integration_concurrent_producers_keep_per_producer_order() {
    let (_trigger, signal) = shutdown::channel();
    let broker = Arc::new(Broker::new(signal));
    broker.start().unwrap();

    let (reader, mut inbox) = Client::new("reader", 400);
    broker.register_client(reader);

    let producers = (0..4).map(|p| {
        let broker = Arc::clone(&broker);
        tokio::spawn(async move {
            for i in 0..50 {
                let msg = Message::direct(format!("p{p}"), "reader", i.to_string());
                broker.send_message(msg).await.unwrap();
            }
        })
    });
    for res in join_all(producers).await {
        res.unwrap();
    }

    let mut last_seen = [-1i64; 4];
    for _ in 0..200 {
        let msg = tokio::time::timeout(Duration::from_secs(2), inbox.recv())
            .await
            .unwrap()
            .unwrap();
        let p: usize = msg.sender[1..].parse().unwrap();
        let seq: i64 = msg.content.parse().unwrap();
        assert!(seq > last_seen[p], "{} arrived out of order", msg.sender);
        last_seen[p] = seq;
    }
    assert_eq!(last_seen, [49; 4]);
}

#[tokio::test]
async fn integration_busy_broker_recovers_after_draining() {
    let (_trigger, signal) = shutdown::channel();
    let settings = BrokerSettings {
        input_capacity: 2,
        submit_timeout_ms: 50,
        ..BrokerSettings::default()
    };
    let broker = Broker::with_settings(signal, &settings);

    for i in 0..2 {
        broker
            .send_message(Message::broadcast("a", i.to_string()))
            .await
            .unwrap();
    }
    assert_eq!(
        broker.send_message(Message::broadcast("a", "overflow")).await,
        Err(BrokerError::TooBusy)
    );

    // Starting the dispatcher drains the queue, so submits succeed again.
    broker.start().unwrap();
    broker
        .send_message(Message::broadcast("a", "accepted"))
        .await
        .unwrap();
}

#[tokio::test]
async fn integration_cancel_before_start_closes_immediately() {
    let (trigger, signal) = shutdown::channel();
    let broker = Broker::new(signal);
    trigger.cancel();

    assert_eq!(
        broker.send_message(Message::broadcast("a", "x")).await,
        Err(BrokerError::ShuttingDown)
    );

    broker.start().unwrap();
    tokio::time::timeout(Duration::from_secs(2), broker.closed())
        .await
        .unwrap();
    assert_eq!(broker.state(), BrokerState::Closed);
}
