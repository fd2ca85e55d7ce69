//! End-to-end integration tests for the HBT wallet core.
//!
//! The handshake tests run two devices side by side, each with its own
//! state manager and ledger, and pass nothing between them but the QR
//! payload strings. The MRZ tests feed whole OCR captures through the
//! public entry points.

use std::sync::Arc;

use hbt_protocol::handshake::{
    HandshakeError, MemoryLedger, ScanOutcome, SessionError, TransactionState,
    TransactionStateManager, TransferDirection, WalletSession,
};
use hbt_protocol::mrz::{self, MrzError, MrzField, MrzLine};
use hbt_protocol::transaction::{
    CompleteTransaction, PendingTransaction, WireCodec, WireError,
};

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

const LINE1: &str = "PXABCDUMMY<<BOB<SMITH<<<<<<<<<<<<<<<<<<<<<<<";
const LINE2: &str = "A1234567<6ABC0102030X0405063<<<<<<<<<<<<<<<0";

struct Device {
    session: WalletSession,
    ledger: Arc<MemoryLedger>,
}

fn device(identity: &str) -> Device {
    let ledger = Arc::new(MemoryLedger::new());
    let manager = Arc::new(TransactionStateManager::with_ledger(ledger.clone()));
    let codec = WireCodec::new().expect("embedded schemas load");
    Device {
        session: WalletSession::new(identity, manager, codec),
        ledger,
    }
}

fn state(device: &Device) -> TransactionState {
    device.session.manager().current()
}

// ---------------------------------------------------------------------------
// Handshake
// ---------------------------------------------------------------------------

#[test]
fn full_qr_handshake_between_two_devices() {
    let receiver = device("alice");
    let sender = device("bob");

    let pending = receiver.session.request_payment(10.5).unwrap();
    sender.session.start_sending().unwrap();

    // Receiver shows, sender scans.
    let first = receiver.session.qr_payload().unwrap().expect("receiver shows a code");
    let outcome = sender.session.on_scan(&first).unwrap();
    let complete = pending.with_source("bob");
    assert_eq!(outcome, ScanOutcome::ShowingComplete(complete.clone()));

    // Receiver taps OK and starts scanning back.
    receiver.session.confirm_shown().unwrap();
    assert_eq!(
        state(&receiver),
        TransactionState::ReceiverRead { expected: pending }
    );

    // Sender shows, receiver scans.
    let second = sender.session.qr_payload().unwrap().expect("sender shows a code");
    let outcome = receiver.session.on_scan(&second).unwrap();
    assert_eq!(outcome, ScanOutcome::Received(complete.clone()));

    // Sender taps OK.
    sender.session.confirm_shown().unwrap();

    assert!(state(&receiver).is_idle());
    assert!(state(&sender).is_idle());

    let sent = sender.ledger.entries();
    let received = receiver.ledger.entries();
    assert_eq!(sent.len(), 1);
    assert_eq!(received.len(), 1);
    assert_eq!(sent[0].direction, TransferDirection::Sent);
    assert_eq!(received[0].direction, TransferDirection::Received);
    assert_eq!(sent[0].transaction, complete);
    assert_eq!(received[0].transaction, complete);
    assert_eq!(receiver.ledger.balance(), 10.5);
    assert_eq!(sender.ledger.balance(), -10.5);
}

#[test]
fn sender_only_flow_records_one_send() {
    let ledger = Arc::new(MemoryLedger::new());
    let manager = TransactionStateManager::with_ledger(ledger.clone());
    let tx = CompleteTransaction::new("src", "dest", 10.5, 100);

    manager.start_sending_transaction().unwrap();
    manager.show_complete_transaction(tx.clone()).unwrap();
    assert_eq!(manager.current(), TransactionState::SenderShow(tx.clone()));
    manager.complete_sending(&tx).unwrap();

    assert!(manager.current().is_idle());
    assert_eq!(ledger.entries().len(), 1);
}

#[test]
fn tampered_completion_is_refused() {
    let receiver = device("alice");
    let pending = receiver.session.request_payment(10.5).unwrap();
    receiver.session.confirm_shown().unwrap();

    let codec = WireCodec::new().unwrap();
    let mut forged = pending.with_source("mallory");
    forged.amount = 1.0;
    let payload = codec.encode(&forged).unwrap();

    let err = receiver.session.on_scan(&payload).unwrap_err();
    assert!(matches!(
        err,
        SessionError::Handshake(HandshakeError::InvalidTransition { .. })
    ));
    assert_eq!(
        state(&receiver),
        TransactionState::ReceiverRead { expected: pending }
    );
    assert!(receiver.ledger.entries().is_empty());
}

#[test]
fn schema_violations_do_not_consume_the_scan() {
    let sender = device("bob");
    sender.session.start_sending().unwrap();

    let negative_time = r#"{"datetime":-6,"destination":"alice","amount":12.5}"#;
    let err = sender.session.on_scan(negative_time).unwrap_err();
    assert!(matches!(err, SessionError::Wire(WireError::Validation { .. })));
    assert_eq!(state(&sender), TransactionState::SenderRead);

    // The next frame carries a good code.
    let good = r#"{"datetime":104320,"destination":"alice","amount":12.5}"#;
    assert!(matches!(
        sender.session.on_scan(good).unwrap(),
        ScanOutcome::ShowingComplete(_)
    ));
}

#[test]
fn cancel_from_every_state_has_no_side_effects() {
    let receiver = device("alice");
    let sender = device("bob");

    receiver.session.request_payment(1.0).unwrap();
    receiver.session.cancel();
    assert!(state(&receiver).is_idle());

    receiver.session.request_payment(1.0).unwrap();
    receiver.session.confirm_shown().unwrap();
    receiver.session.cancel();
    assert!(state(&receiver).is_idle());

    sender.session.start_sending().unwrap();
    sender.session.cancel();
    assert!(state(&sender).is_idle());

    sender.session.start_sending().unwrap();
    sender
        .session
        .on_scan(r#"{"datetime":1,"destination":"alice","amount":1.0}"#)
        .unwrap();
    sender.session.cancel();
    assert!(state(&sender).is_idle());

    assert!(receiver.ledger.entries().is_empty());
    assert!(sender.ledger.entries().is_empty());
}

#[test]
fn read_with_different_pending_fails_without_mutation() {
    let manager = TransactionStateManager::new();
    let shown = PendingTransaction::new("dest", 10.5, 100);
    manager.start_receiving_transaction(shown.clone()).unwrap();

    let result = manager.read_complete_transaction(PendingTransaction::new("dest", 10.5, 101));
    assert!(result.is_err());
    assert_eq!(manager.current(), TransactionState::ReceiverShow(shown));
}

#[tokio::test]
async fn observers_on_other_tasks_see_the_final_state() {
    let manager = Arc::new(TransactionStateManager::new());
    let mut rx = manager.subscribe();

    let observer = tokio::spawn(async move {
        let mut seen = Vec::new();
        while rx.changed().await.is_ok() {
            let state = rx.borrow_and_update().clone();
            let idle = state.is_idle();
            seen.push(state);
            if idle {
                break;
            }
        }
        seen
    });

    let tx = CompleteTransaction::new("src", "dest", 1.0, 1);
    manager.start_sending_transaction().unwrap();
    tokio::task::yield_now().await;
    manager.show_complete_transaction(tx.clone()).unwrap();
    tokio::task::yield_now().await;
    manager.complete_sending(&tx).unwrap();

    let seen = observer.await.unwrap();
    assert_eq!(seen.last(), Some(&TransactionState::None));
    assert!(!seen.is_empty() && seen.len() <= 3);
}

// ---------------------------------------------------------------------------
// MRZ
// ---------------------------------------------------------------------------

#[test]
fn reference_passport_from_raw_ocr() {
    // OCR output: spaces inside the zone and a guillemet for `<<`.
    let raw = format!(
        "P X ABC DUMMY«BOB<SMITH{}\n{}\n",
        "<".repeat(23),
        LINE2.replace("<<<<<<<<<<<<<<<", "«««««««<")
    );
    let text = mrz::normalize_ocr(&raw);
    assert_eq!(text, format!("{LINE1}{LINE2}"));

    let info = mrz::extract_full(&text).unwrap();
    assert_eq!(info.number(), "A1234567");
    assert_eq!(info.date_of_birth(), "010203");
    assert_eq!(info.expiration(), "040506");
    assert_eq!(info.country(), Some("ABC"));
    assert_eq!(info.surname(), Some("DUMMY"));
    assert_eq!(info.name(), Some("BOB SMITH"));
    assert_eq!(
        info.bac_data().mrz_information().as_deref(),
        Some("A1234567<601020300405063")
    );
}

#[test]
fn document_line_alone_is_enough_for_bac() {
    let info = mrz::extract(&format!("noise{LINE2}noise")).unwrap();
    assert_eq!(info.number(), "A1234567");
    assert!(info.surname().is_none());

    let err = mrz::extract_full(LINE2).unwrap_err();
    assert!(matches!(err, MrzError::NoMatch { line: MrzLine::Line1, .. }));
}

#[test]
fn partial_frame_is_a_retryable_no_match() {
    let err = mrz::extract(&LINE2[..30]).unwrap_err();
    assert!(matches!(err, MrzError::NoMatch { line: MrzLine::Line2, .. }));
}

#[test]
fn misread_digit_names_the_field() {
    // Birth date 010203 read as 010208.
    let corrupted = LINE2.replacen("0102030", "0102080", 1);
    match mrz::extract(&corrupted).unwrap_err() {
        MrzError::ChecksumMismatch { field, data, .. } => {
            assert_eq!(field, MrzField::DateOfBirth);
            assert_eq!(data, "010208");
        }
        other => panic!("unexpected error: {other}"),
    }
}
