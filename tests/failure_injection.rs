//! Failure injection tests for the write and escalation path.

use std::io::ErrorKind;
use std::time::Duration;

use trade_responder::config::{EscalationConfig, OverflowPolicy, ResponderConfig};
use trade_responder::msg::{Kind, Response, Status, WIRE_SIZE};
use trade_responder::ResponderError;

mod common;

const INTERVAL: Duration = Duration::from_millis(100);

#[tokio::test(start_paused = true)]
async fn write_error_escalates_tagged_copy() {
    let mut h = common::start();
    h.transport.fail_write(1, ErrorKind::TimedOut, WIRE_SIZE);
    let resp = Response::server_ack(5, 9);

    h.send(resp).await;
    h.send(Response::server_ack(5, 10)).await;
    h.send(Response::shutdown()).await;
    let (_, result) = (&mut h.task).await.unwrap();

    // The loop survived the failure and kept writing.
    result.unwrap();
    assert_eq!(h.transport.write_calls(), 2);
    assert_eq!(
        common::drain(&mut h.escalations),
        vec![resp.with_status(Status::WriteError)]
    );
}

#[tokio::test(start_paused = true)]
async fn failed_short_write_escalates_both_conditions() {
    let mut h = common::start();
    h.transport.fail_write(1, ErrorKind::Interrupted, 0);
    let resp = Response::matcher_response(Kind::Full, 1, 2);

    h.send(resp).await;
    h.send(Response::shutdown()).await;
    let (responder, result) = (&mut h.task).await.unwrap();

    result.unwrap();
    assert_eq!(
        common::drain(&mut h.escalations),
        vec![
            resp.with_status(Status::WriteError),
            resp.with_status(Status::ShortWriteError),
        ]
    );
    // Failure does not unregister; the resend cycle owns the retry.
    assert_eq!(responder.pending().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn short_write_escalates_once() {
    let mut h = common::start();
    h.transport.short_write(1, WIRE_SIZE - 8);
    let resp = Response::server_ack(5, 9);

    h.send(resp).await;
    h.send(Response::shutdown()).await;
    (&mut h.task).await.unwrap().1.unwrap();

    assert_eq!(
        common::drain(&mut h.escalations),
        vec![resp.with_status(Status::ShortWriteError)]
    );
}

#[tokio::test(start_paused = true)]
async fn fatal_error_ends_loop_without_closing() {
    let mut h = common::start();
    h.transport.fail_write(1, ErrorKind::BrokenPipe, 0);
    let resp = Response::matcher_response(Kind::Full, 1, 2);

    h.send(resp).await;
    let (responder, result) = (&mut h.task).await.unwrap();

    match result {
        Err(ResponderError::FatalTransport(e)) => assert!(e.is_fatal()),
        other => panic!("expected fatal transport error, got {:?}", other),
    }
    assert!(!responder.is_closed());
    assert_eq!(h.transport.close_calls(), 0);
    // Escalated before giving up; the short-write check never ran.
    assert_eq!(
        common::drain(&mut h.escalations),
        vec![resp.with_status(Status::WriteError)]
    );
}

#[tokio::test(start_paused = true)]
async fn fatal_error_during_resend_ends_loop() {
    let mut h = common::start();
    h.transport.fail_write(2, ErrorKind::ConnectionReset, 0);

    h.send(Response::matcher_response(Kind::Full, 1, 2)).await;
    let (_, result) = (&mut h.task).await.unwrap();

    assert!(matches!(result, Err(ResponderError::FatalTransport(_))));
    assert_eq!(h.transport.write_calls(), 2);
    assert_eq!(h.transport.close_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn non_network_error_is_recoverable() {
    let mut h = common::start();
    h.transport.fail_write(1, ErrorKind::PermissionDenied, 0);

    h.send(Response::server_ack(1, 1)).await;
    h.send(Response::shutdown()).await;
    let (_, result) = (&mut h.task).await.unwrap();

    result.unwrap();
    assert_eq!(h.transport.close_calls(), 1);
    assert_eq!(common::drain(&mut h.escalations).len(), 2);
}

#[tokio::test(start_paused = true)]
async fn persistent_failure_escalates_every_cycle() {
    let mut h = common::start();
    for nth in 1..=3 {
        h.transport.fail_write(nth, ErrorKind::TimedOut, WIRE_SIZE);
    }
    let resp = Response::matcher_response(Kind::Full, 1, 2);

    h.send(resp).await;
    common::elapse_cycles(2, INTERVAL).await;
    h.send(Response::shutdown()).await;
    let (responder, _) = (&mut h.task).await.unwrap();

    assert_eq!(
        common::drain(&mut h.escalations),
        vec![resp.with_status(Status::WriteError); 3]
    );
    assert_eq!(responder.pending().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn abnormal_matcher_response_is_registered_by_default() {
    let mut h = common::start();
    let resp = Response::matcher_response(Kind::Full, 1, 2).with_status(Status::InvalidMessage);

    h.send(resp).await;
    common::elapse_cycles(1, INTERVAL).await;
    h.send(Response::shutdown()).await;
    let (responder, _) = (&mut h.task).await.unwrap();

    assert_eq!(h.transport.responses(), vec![resp, resp]);
    assert_eq!(responder.pending().get(1, 2), Some(&resp));
    assert!(common::drain(&mut h.escalations).is_empty());
}

#[tokio::test(start_paused = true)]
async fn drop_newest_keeps_loop_running() {
    let escalation = EscalationConfig {
        capacity: 1,
        overflow: OverflowPolicy::DropNewest,
    };
    let mut h = common::start_with(ResponderConfig::default(), escalation);
    h.transport.fail_write(1, ErrorKind::TimedOut, WIRE_SIZE);
    h.transport.fail_write(2, ErrorKind::TimedOut, WIRE_SIZE);

    h.send(Response::server_ack(1, 1)).await;
    h.send(Response::server_ack(2, 2)).await;
    h.send(Response::server_ack(3, 3)).await;
    h.send(Response::shutdown()).await;
    let (_, result) = (&mut h.task).await.unwrap();

    result.unwrap();
    assert_eq!(h.transport.write_calls(), 3);
    let escalated = common::drain(&mut h.escalations);
    assert_eq!(escalated.len(), 1);
    assert_eq!(escalated[0].trader_id, 1);
}

#[tokio::test(start_paused = true)]
async fn blocked_escalation_stalls_the_loop() {
    let escalation = EscalationConfig {
        capacity: 1,
        overflow: OverflowPolicy::Block,
    };
    let mut h = common::start_with(ResponderConfig::default(), escalation);
    h.transport.fail_write(2, ErrorKind::TimedOut, WIRE_SIZE);
    h.transport.fail_write(3, ErrorKind::TimedOut, WIRE_SIZE);
    let matcher = Response::matcher_response(Kind::Full, 3, 3);

    h.send(matcher).await;
    h.send(Response::server_ack(1, 1)).await;
    h.send(Response::server_ack(2, 2)).await;

    // Second escalation has nowhere to go: the resend of the pending
    // matcher response waits with it.
    tokio::time::sleep(INTERVAL * 5).await;
    assert_eq!(h.transport.write_calls(), 3);

    // Inbound is empty once unblocked, so the overdue resend is the only
    // ready work.
    assert_eq!(h.escalations.recv().await.map(|r| r.trader_id), Some(1));
    tokio::time::sleep(Duration::from_millis(1)).await;
    assert_eq!(h.transport.write_calls(), 4);
    assert_eq!(h.transport.responses().last(), Some(&matcher));
    assert_eq!(h.escalations.recv().await.map(|r| r.trader_id), Some(2));

    h.stop().await.1.unwrap();
}
