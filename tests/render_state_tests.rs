//! Integration tests for the render-update protocol: device reconciliation,
//! trail replacement, and the bridge-fed service loop.

use livemap::{
    bridge::{payload::PointEvent, ChannelBridge},
    Device, LatLng, MapConfig, MapService, RenderState, Trail,
};
use std::{sync::Arc, time::Duration};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn test_config() -> MapConfig {
    MapConfig {
        home_latitude: 37.70,
        home_longitude: -122.50,
        home_zoom: 12.0,
        max_zoom: 18.0,
        min_zoom: 3.0,
    }
}

fn test_state() -> RenderState {
    RenderState::with_config(
        test_config(),
        Arc::new(livemap::OpenStreetMapSource::new()),
    )
    .unwrap()
}

fn device(id: &str, lat: f64, lng: f64) -> Device {
    Device::new(id, lat, lng)
}

fn label_set(state: &RenderState) -> Vec<String> {
    let mut labels: Vec<String> = state
        .markers()
        .labels()
        .iter()
        .map(|l| l.to_string())
        .collect();
    labels.sort();
    labels
}

#[test]
fn repeated_identical_snapshots_are_idempotent() {
    init_logging();
    let mut state = test_state();
    let snapshot = [device("a", 1.0, 1.0), device("b", 2.0, 2.0)];

    state.update_device_positions(&snapshot);
    let first: Vec<_> = state
        .markers()
        .markers()
        .iter()
        .map(|m| (m.handle(), m.label().to_string(), m.position()))
        .collect();

    state.update_device_positions(&snapshot);
    let second: Vec<_> = state
        .markers()
        .markers()
        .iter()
        .map(|m| (m.handle(), m.label().to_string(), m.position()))
        .collect();

    assert_eq!(first, second);
}

#[test]
fn marker_labels_match_snapshot_ids_exactly() {
    init_logging();
    let mut state = test_state();

    for snapshot in [
        vec![device("a", 1.0, 1.0)],
        vec![device("a", 1.0, 1.0), device("b", 2.0, 2.0), device("c", 3.0, 3.0)],
        vec![device("c", 3.5, 3.5), device("d", 4.0, 4.0)],
        vec![],
        vec![device("e", 5.0, 5.0)],
    ] {
        state.update_device_positions(&snapshot);

        let mut expected: Vec<String> = snapshot.iter().map(|d| d.id.clone()).collect();
        expected.sort();
        expected.dedup();
        assert_eq!(label_set(&state), expected);
    }
}

#[test]
fn devices_absent_from_snapshot_lose_their_markers() {
    init_logging();
    let mut state = test_state();
    state.update_device_positions(&[
        device("a", 1.0, 1.0),
        device("b", 2.0, 2.0),
        device("c", 3.0, 3.0),
    ]);

    state.update_device_positions(&[device("b", 2.0, 2.0), device("c", 3.0, 3.0)]);
    assert_eq!(label_set(&state), vec!["b", "c"]);
    assert!(state.markers().get("a").is_none());
}

#[test]
fn position_update_moves_marker_instead_of_recreating() {
    init_logging();
    let mut state = test_state();
    state.update_device_positions(&[device("a", 1.0, 1.0)]);
    let handle = state.markers().get("a").unwrap().handle();

    state.update_device_positions(&[device("a", 2.0, 2.0)]);
    let marker = state.markers().get("a").unwrap();
    assert_eq!(marker.handle(), handle);
    assert_eq!(marker.position(), LatLng::new(2.0, 2.0));
    assert_eq!(state.markers().len(), 1);
}

#[test]
fn duplicate_id_in_one_batch_yields_one_marker_at_last_position() {
    init_logging();
    let mut state = test_state();
    state.update_device_positions(&[device("a", 1.0, 1.0), device("a", 5.0, 5.0)]);

    assert_eq!(state.markers().len(), 1);
    assert_eq!(
        state.markers().get("a").unwrap().position(),
        LatLng::new(5.0, 5.0)
    );
}

#[test]
fn trail_snapshots_fully_replace_the_layer() {
    init_logging();
    let mut state = test_state();

    state.update_trails(&[Trail::new(vec![(1.0, 1.0), (2.0, 2.0)])]);
    assert_eq!(state.trails().len(), 1);

    state.update_trails(&[]);
    assert_eq!(state.trails().len(), 0);

    state.update_trails(&[
        Trail::new(vec![(1.0, 1.0), (2.0, 2.0)]),
        Trail::new(vec![(3.0, 3.0), (4.0, 4.0), (5.0, 5.0)]),
    ]);
    assert_eq!(state.trails().len(), 2);
    assert_eq!(
        state.trails().polylines()[0].points(),
        &[LatLng::new(1.0, 1.0), LatLng::new(2.0, 2.0)]
    );
    assert_eq!(
        state.trails().polylines()[1].points(),
        &[
            LatLng::new(3.0, 3.0),
            LatLng::new(4.0, 4.0),
            LatLng::new(5.0, 5.0)
        ]
    );
}

#[test]
fn empty_device_snapshot_clears_all_markers() {
    init_logging();
    let mut state = test_state();
    state.update_device_positions(&[
        device("a", 1.0, 1.0),
        device("b", 2.0, 2.0),
        device("c", 3.0, 3.0),
    ]);

    state.update_device_positions(&[]);
    assert!(state.markers().is_empty());
}

#[test]
fn malformed_entries_are_dropped_without_aborting_the_cycle() {
    init_logging();
    let mut state = test_state();
    let summary = state.update_device_positions(&[
        device("a", 1.0, 1.0),
        device("bad", f64::NAN, 2.0),
        device("b", 2.0, 2.0),
    ]);

    assert_eq!(summary.dropped, 1);
    assert_eq!(label_set(&state), vec!["a", "b"]);
}

#[tokio::test]
async fn service_reconciles_snapshots_pushed_over_the_bridge() {
    init_logging();
    let (bridge, host) = ChannelBridge::new(test_config());
    let service = MapService::start(bridge).await.unwrap();

    host.push_devices(vec![device("a", 1.0, 1.0), device("b", 2.0, 2.0)])
        .await
        .unwrap();
    host.push_devices(vec![device("b", 2.5, 2.5)]).await.unwrap();
    host.push_trails(vec![Trail::new(vec![(1.0, 1.0), (2.0, 2.0)])])
        .await
        .unwrap();
    host.push_center(LatLng::new(40.0, -105.0)).await.unwrap();

    // Wait for the last pushed event to land, then check the whole state.
    for _ in 0..100 {
        if service.with_state(|s| s.view().center == LatLng::new(40.0, -105.0)) {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    service.with_state(|state| {
        assert_eq!(state.markers().labels(), vec!["b"]);
        assert_eq!(
            state.markers().get("b").unwrap().position(),
            LatLng::new(2.5, 2.5)
        );
        assert_eq!(state.trails().len(), 1);
        assert_eq!(state.view().center, LatLng::new(40.0, -105.0));
        assert_eq!(state.view().zoom, 12.0);
    });

    service.shutdown();
}

#[tokio::test]
async fn service_sweeps_expired_event_markers() {
    init_logging();
    let (mut bridge, host) = ChannelBridge::new(test_config());

    use livemap::HostBridge;
    let events = bridge.subscribe().unwrap();
    let state = RenderState::initialize(&mut bridge).await.unwrap();

    // Short tick so the sweep runs quickly under test.
    let service = MapService::spawn(state, events, Duration::from_millis(20));

    host.push_event(PointEvent {
        label: "touchdown".to_string(),
        latitude: 37.7,
        longitude: -122.5,
        ttl_ms: Some(50),
    })
    .await
    .unwrap();

    for _ in 0..100 {
        if service.with_state(|s| s.event_markers().len() == 1) {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    for _ in 0..100 {
        if service.with_state(|s| s.event_markers().is_empty()) {
            service.shutdown();
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("event marker was not swept after its TTL");
}

#[tokio::test]
async fn malformed_config_aborts_initialization() {
    init_logging();
    let bad = MapConfig {
        home_zoom: f64::NAN,
        ..test_config()
    };
    let (bridge, _host) = ChannelBridge::new(bad);
    assert!(MapService::start(bridge).await.is_err());
}
