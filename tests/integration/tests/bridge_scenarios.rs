//! Bridge scenarios with in-memory host and presence API
//!
//! Time is paused, so intervals advance instantly and check counts are exact.
//!
//! Run with: cargo test -p integration-tests --test bridge_scenarios

use std::sync::Arc;
use std::time::Duration;

use bridge_common::{AppError, PresenceSettings};
use bridge_core::{Host, HostEvent};
use bridge_runtime::{BridgeState, ControlCommand, PresenceBridge};
use integration_tests::{
    metadata_with_tokens, presence_settings, signed_in_metadata, unique_subject, FakeFactory,
    FakeHost, FakePresenceApi,
};
use serde_json::{json, Value};
use tokio::time::sleep;

const PERIOD: Duration = Duration::from_millis(5000);
const JUST_AFTER: Duration = Duration::from_millis(1);

struct Session {
    bridge: PresenceBridge,
    host: Arc<FakeHost>,
    api: Arc<FakePresenceApi>,
    factory: Arc<FakeFactory>,
}

fn session(metadata: Value, settings: PresenceSettings) -> Session {
    let api = Arc::new(FakePresenceApi::with_presence("Available", "Available"));
    let host = Arc::new(FakeHost::new(metadata));
    let factory = Arc::new(FakeFactory::new(api.clone()));
    let bridge = PresenceBridge::new(host.clone(), factory.clone(), settings);
    Session {
        bridge,
        host,
        api,
        factory,
    }
}

fn signed_in(subject: &str) -> Session {
    session(signed_in_metadata(subject), PresenceSettings::default())
}

fn busy() -> Value {
    json!({ "availability": "Busy", "activity": "Busy" })
}

fn available() -> Value {
    json!({ "availability": "Available", "activity": "Available" })
}

fn promotion(expiration: &str) -> Value {
    json!({
        "availability": "Available",
        "activity": "Available",
        "expirationDuration": expiration
    })
}

// ============================================================================
// Initialization
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_zero_access_tokens_disable_the_bridge() {
    let s = session(metadata_with_tokens(&[]), PresenceSettings::default());

    s.bridge.handle_event(HostEvent::Init).unwrap();
    assert_eq!(s.bridge.state(), BridgeState::Inactive);

    assert!(s.bridge.handle_event(HostEvent::ProximityMeetingJoined).unwrap().is_none());
    assert!(s.bridge.handle_event(HostEvent::ProximityMeetingLeft).unwrap().is_none());

    sleep(PERIOD * 6).await;
    assert_eq!(s.api.reads(), 0);
    assert!(s.api.writes().is_empty());
    assert!(s.host.commands().is_empty());
    assert!(s.factory.tokens().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_undecodable_token_disables_the_bridge() {
    let s = session(metadata_with_tokens(&["header.payload"]), PresenceSettings::default());

    let result = s.bridge.handle_event(HostEvent::Init);

    assert!(matches!(result, Err(AppError::InvalidToken(_))));
    assert_eq!(s.bridge.state(), BridgeState::Inactive);

    // Later events are inert and a second init changes nothing
    assert!(s.bridge.handle_event(HostEvent::ProximityMeetingLeft).unwrap().is_none());
    assert!(s.bridge.handle_event(HostEvent::Init).is_ok());
    assert_eq!(s.bridge.state(), BridgeState::Inactive);

    sleep(PERIOD * 2).await;
    assert_eq!(s.api.reads(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_only_the_first_token_is_used() {
    let first = integration_tests::mint_token("first-subject");
    let second = integration_tests::mint_token("second-subject");
    let s = session(
        metadata_with_tokens(&[first.as_str(), second.as_str()]),
        PresenceSettings::default(),
    );

    s.bridge.handle_event(HostEvent::Init).unwrap();
    s.bridge
        .handle_event(HostEvent::ProximityMeetingJoined)
        .unwrap()
        .unwrap()
        .await
        .unwrap();

    assert_eq!(s.factory.tokens(), vec![first]);
    assert_eq!(s.api.writes()[0].0, "first-subject");
}

// ============================================================================
// Polling
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_busy_readings_disable_proximity_meetings() {
    for availability in ["BeRightBack", "Busy", "DoNotDisturb"] {
        let s = signed_in(&unique_subject());
        s.api.set_presence(availability, "InACall");
        s.bridge.handle_event(HostEvent::Init).unwrap();

        sleep(PERIOD + JUST_AFTER).await;

        assert_eq!(
            s.host.commands(),
            vec![ControlCommand::DisablePlayerProximityMeeting]
        );
        assert!(s.api.writes().is_empty());
    }
}

#[tokio::test(start_paused = true)]
async fn test_available_readings_restore_proximity_meetings() {
    for availability in ["Available", "Away"] {
        let s = signed_in(&unique_subject());
        s.api.set_presence(availability, "Available");
        s.bridge.handle_event(HostEvent::Init).unwrap();

        sleep(PERIOD + JUST_AFTER).await;

        assert_eq!(
            s.host.commands(),
            vec![ControlCommand::RestorePlayerProximityMeeting]
        );
        assert!(s.api.writes().is_empty());
    }
}

#[tokio::test(start_paused = true)]
async fn test_offline_reading_is_promoted() {
    let subject = unique_subject();
    let s = signed_in(&subject);
    s.api.set_presence("Offline", "Offline");
    s.bridge.handle_event(HostEvent::Init).unwrap();

    sleep(PERIOD + JUST_AFTER).await;

    assert_eq!(
        s.host.commands(),
        vec![ControlCommand::RestorePlayerProximityMeeting]
    );
    assert_eq!(s.api.writes(), vec![(subject, promotion("PT2M"))]);

    // Repeated on every tick while the service keeps reporting Offline
    sleep(PERIOD).await;
    assert_eq!(s.api.written_bodies(), vec![promotion("PT2M"), promotion("PT2M")]);
}

#[tokio::test(start_paused = true)]
async fn test_promotion_expiration_is_configurable() {
    let settings = PresenceSettings {
        promotion_secs: 90,
        ..PresenceSettings::default()
    };
    let s = session(signed_in_metadata(&unique_subject()), settings);
    s.api.set_presence("Offline", "OffWork");
    s.bridge.handle_event(HostEvent::Init).unwrap();

    sleep(PERIOD + JUST_AFTER).await;

    assert_eq!(s.api.written_bodies(), vec![promotion("PT1M30S")]);
}

#[tokio::test(start_paused = true)]
async fn test_idle_readings_leave_the_host_alone() {
    for availability in ["AvailableIdle", "BusyIdle", "PresenceUnknown"] {
        let s = signed_in(&unique_subject());
        s.api.set_presence(availability, "Inactive");
        s.bridge.handle_event(HostEvent::Init).unwrap();

        sleep(PERIOD * 3 + JUST_AFTER).await;

        assert_eq!(s.api.reads(), 3);
        assert!(s.host.commands().is_empty());
        assert!(s.api.writes().is_empty());
    }
}

#[tokio::test(start_paused = true)]
async fn test_unusable_readings_are_skipped() {
    let s = signed_in(&unique_subject());
    s.api.set_body(json!({ "availability": "OnHoliday", "activity": "Available" }));
    s.bridge.handle_event(HostEvent::Init).unwrap();

    sleep(PERIOD + JUST_AFTER).await;
    assert_eq!(s.api.reads(), 1);
    assert!(s.host.commands().is_empty());

    s.api.set_reachable(false);
    sleep(PERIOD).await;
    assert_eq!(s.api.reads(), 2);
    assert!(s.host.commands().is_empty());

    // Polling carries on once the service answers again
    s.api.set_reachable(true);
    s.api.set_presence("Busy", "Busy");
    sleep(PERIOD).await;
    assert_eq!(
        s.host.commands(),
        vec![ControlCommand::DisablePlayerProximityMeeting]
    );
}

#[tokio::test(start_paused = true)]
async fn test_custom_poll_interval() {
    let s = session(signed_in_metadata(&unique_subject()), presence_settings(1000));
    s.bridge.handle_event(HostEvent::Init).unwrap();

    sleep(Duration::from_millis(3001)).await;
    assert_eq!(s.api.reads(), 3);
}

// ============================================================================
// Meetings
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_join_stops_polling_and_sets_busy() {
    let subject = unique_subject();
    let s = signed_in(&subject);
    s.bridge.handle_event(HostEvent::Init).unwrap();

    sleep(PERIOD + JUST_AFTER).await;
    assert_eq!(s.api.reads(), 1);

    let write = s.bridge.handle_event(HostEvent::ProximityMeetingJoined).unwrap();
    write.unwrap().await.unwrap();

    assert_eq!(s.api.writes(), vec![(subject, busy())]);

    sleep(PERIOD * 4).await;
    assert_eq!(s.api.reads(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_leave_sets_available_and_resumes_polling() {
    let subject = unique_subject();
    let s = signed_in(&subject);
    s.api.set_presence("DoNotDisturb", "Presenting");
    s.bridge.handle_event(HostEvent::Init).unwrap();

    s.bridge
        .handle_event(HostEvent::ProximityMeetingJoined)
        .unwrap()
        .unwrap()
        .await
        .unwrap();
    s.bridge
        .handle_event(HostEvent::ProximityMeetingLeft)
        .unwrap()
        .unwrap()
        .await
        .unwrap();

    assert_eq!(s.api.written_bodies(), vec![busy(), available()]);
    assert!(s.api.writes().iter().all(|(id, _)| *id == subject));

    sleep(PERIOD * 2 + JUST_AFTER).await;
    assert_eq!(s.api.reads(), 2);
    assert_eq!(
        s.host.count(ControlCommand::DisablePlayerProximityMeeting),
        2
    );
}

#[tokio::test(start_paused = true)]
async fn test_repeated_leave_does_not_multiply_checks() {
    let s = signed_in(&unique_subject());
    s.bridge.handle_event(HostEvent::Init).unwrap();

    for _ in 0..3 {
        s.bridge.handle_event(HostEvent::ProximityMeetingLeft).unwrap();
    }

    sleep(PERIOD + JUST_AFTER).await;
    assert_eq!(s.api.reads(), 1);

    sleep(PERIOD).await;
    assert_eq!(s.api.reads(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_join_does_not_cancel_a_dispatched_check() {
    let s = signed_in(&unique_subject());
    s.api.set_presence("DoNotDisturb", "Presenting");
    s.api.set_read_delay(Duration::from_secs(2));
    s.bridge.handle_event(HostEvent::Init).unwrap();

    // The first read is sent at 5s and answers at 7s, after the join stopped polling
    sleep(PERIOD + Duration::from_millis(500)).await;
    s.bridge
        .handle_event(HostEvent::ProximityMeetingJoined)
        .unwrap()
        .unwrap()
        .await
        .unwrap();
    assert!(s.host.commands().is_empty());

    sleep(Duration::from_secs(2)).await;
    assert_eq!(
        s.host.commands(),
        vec![ControlCommand::DisablePlayerProximityMeeting]
    );
    assert_eq!(s.api.written_bodies(), vec![busy()]);

    sleep(PERIOD * 2).await;
    assert_eq!(s.api.reads(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_failed_meeting_writes_are_only_logged() {
    let s = signed_in(&unique_subject());
    s.api.reject_writes(true);
    s.bridge.handle_event(HostEvent::Init).unwrap();

    let joined = s.bridge.handle_event(HostEvent::ProximityMeetingJoined).unwrap();
    assert!(joined.unwrap().await.is_ok());

    let left = s.bridge.handle_event(HostEvent::ProximityMeetingLeft).unwrap();
    assert!(left.unwrap().await.is_ok());

    assert_eq!(s.bridge.state(), BridgeState::Active);
    assert!(s.bridge.meeting_bridge().unwrap().poller().is_running());
}

// ============================================================================
// Event loop
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_run_drives_the_bridge_from_host_events() {
    let subject = unique_subject();
    let s = Arc::new(signed_in(&subject));
    let events = s.host.subscribe();

    let runner = {
        let s = Arc::clone(&s);
        tokio::spawn(async move { s.bridge.run(events).await })
    };

    s.host.emit(HostEvent::Init);
    sleep(JUST_AFTER).await;
    assert_eq!(s.bridge.state(), BridgeState::Active);

    s.host.emit(HostEvent::ProximityMeetingJoined);
    sleep(JUST_AFTER).await;
    assert_eq!(s.api.written_bodies(), vec![busy()]);

    s.host.emit(HostEvent::ProximityMeetingLeft);
    sleep(JUST_AFTER).await;
    assert_eq!(s.api.written_bodies(), vec![busy(), available()]);

    sleep(PERIOD + JUST_AFTER).await;
    assert_eq!(s.api.reads(), 1);

    s.bridge.shutdown();
    runner.abort();
}
