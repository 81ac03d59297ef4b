use super::error::BrokerError;
use super::logging;
use super::shutdown;
use std::time::Duration;
use tracing::Level;

#[test]
fn test_parse_level_names() {
    assert_eq!(logging::parse_level("error"), Level::ERROR);
    assert_eq!(logging::parse_level("Warning"), Level::WARN);
    assert_eq!(logging::parse_level(" debug "), Level::DEBUG);
    assert_eq!(logging::parse_level("trace"), Level::TRACE);
    assert_eq!(logging::parse_level("nonsense"), Level::INFO);
}

#[test]
fn test_logging_init_is_repeatable() {
    // Should not panic
    logging::init("info");
    assert!(!logging::init("debug"));
}

#[test]
fn test_broker_error_display() {
    assert_eq!(BrokerError::ShuttingDown.to_string(), "broker shutting down");
    assert_eq!(BrokerError::Closed.to_string(), "broker closed");
    assert_eq!(BrokerError::TooBusy.to_string(), "broker too busy");
    assert!(BrokerError::Closed.is_shutdown());
    assert!(!BrokerError::TooBusy.is_shutdown());
}

#[test]
fn test_signal_starts_uncancelled() {
    let (trigger, signal) = shutdown::channel();
    assert!(!signal.is_cancelled());
    assert!(!trigger.is_cancelled());
}

#[tokio::test]
async fn test_cancel_is_seen_by_all_signals() {
    let (trigger, signal) = shutdown::channel();
    let other = trigger.signal();
    let cloned = signal.clone();

    trigger.cancel();

    assert!(signal.is_cancelled());
    assert!(other.is_cancelled());
    tokio::time::timeout(Duration::from_secs(1), cloned.cancelled())
        .await
        .expect("cancelled() should complete after cancel");
}

#[tokio::test]
async fn test_dropping_trigger_cancels() {
    let (trigger, signal) = shutdown::channel();
    let waiter = tokio::spawn({
        let signal = signal.clone();
        async move { signal.cancelled().await }
    });

    drop(trigger);

    assert!(signal.is_cancelled());
    tokio::time::timeout(Duration::from_secs(1), waiter)
        .await
        .expect("waiter should finish")
        .unwrap();
}

#[tokio::test]
async fn test_cancelled_pends_until_fired() {
    let (_trigger, signal) = shutdown::channel();
    let res = tokio::time::timeout(Duration::from_millis(50), signal.cancelled()).await;
    assert!(res.is_err());
}
