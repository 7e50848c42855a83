use std::fs;

use zwave_replay::{read_capture, replay, snapshot, write_capture, CaptureFormat};
use zwave_state::{DispatcherConfig, Event, NodeEvent, NodeKey, NodeState};

const CAPTURE: &str = r#"
# two nodes on one controller
{"home_id": 3735928559, "node_id": 1, "notification_type": 6}
{"home_id": 3735928559, "node_id": 7, "notification_type": 6, "node_info": {"home_id": 3735928559, "node_id": 7, "manufacturer_name": "Fibaro", "product_name": "Wall Plug"}}
{"home_id": 3735928559, "node_id": 7, "notification_type": 0, "value_id": {"command_class_id": 37, "instance": 1, "index": 0, "value_type": 0, "id": 72057594162872320}, "value": {"type": "bool", "value": false}}
{"home_id": 3735928559, "node_id": 7, "notification_type": 0, "value_id": {"command_class_id": 50, "instance": 1, "index": 8, "value_type": 2}, "value": {"type": "decimal", "value": "0.0"}}
{"home_id": 3735928559, "node_id": 7, "notification_type": 21}
{"home_id": 3735928559, "node_id": 7, "notification_type": 2, "value_id": {"command_class_id": 37, "instance": 1, "index": 0}, "value": {"type": "bool", "value": true}}
{"home_id": 3735928559, "node_id": 7, "notification_type": 22}
{"home_id": 3735928559, "node_id": 7, "notification_type": 1, "value_id": {"command_class_id": 50, "instance": 1, "index": 8}}
{"home_id": 3735928559, "node_id": 7, "notification_type": 200}
{"home_id": 3735928559, "node_id": 1, "notification_type": 7}
"#;

const HOME: u32 = 0xdead_beef;

#[test]
fn replay_derives_lifecycle_events_and_values() {
    let notifications = read_capture(CAPTURE.as_bytes(), CaptureFormat::Json).expect("read");
    assert_eq!(notifications.len(), 10);

    let (registry, report) = replay(notifications, DispatcherConfig::default());

    let plug = NodeKey::new(HOME, 7);
    let controller = NodeKey::new(HOME, 1);
    assert_eq!(report.dispatched, 10);
    assert_eq!(report.rejected, 0);
    assert_eq!(report.lost, 0);
    assert_eq!(
        report.events,
        vec![
            Event::NodeAvailable(NodeEvent::new(plug)),
            Event::NodeChanged(NodeEvent::new(plug)),
            Event::NodeUnavailable(NodeEvent::new(controller)),
        ]
    );

    assert_eq!(registry.len(), 1);
    let node = registry.get(plug).expect("plug kept");
    assert_eq!(node.state(), NodeState::Ready);
    assert_eq!(node.product_description().manufacturer_name, "Fibaro");
    assert_eq!(node.values().len(), 1);
    assert!(node.values().class(50).is_none());

    let dump = serde_json::to_value(snapshot(&registry)).expect("dump");
    assert_eq!(dump[0]["state"], "ready");
    assert_eq!(dump[0]["values"][0]["payload"], serde_json::json!({"type": "bool", "value": true}));
}

#[test]
fn strict_replay_counts_rejections() {
    let mut notifications = read_capture(CAPTURE.as_bytes(), CaptureFormat::Json).expect("read");
    notifications.remove(0);
    let config = DispatcherConfig { auto_create_nodes: false, ..DispatcherConfig::default() };

    let (registry, report) = replay(notifications, config);

    assert_eq!(report.rejected, 1);
    assert_eq!(report.dispatched, 8);
    assert!(registry.get(NodeKey::new(HOME, 1)).is_err());
}

#[test]
fn converted_msgpack_capture_replays_identically() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("capture.msgpack");

    let notifications = read_capture(CAPTURE.as_bytes(), CaptureFormat::Json).expect("read");
    let file = fs::File::create(&path).expect("create");
    write_capture(file, CaptureFormat::from_path(&path), &notifications).expect("write");

    let file = fs::File::open(&path).expect("open");
    let reread = read_capture(file, CaptureFormat::Msgpack).expect("reread");
    assert_eq!(reread, notifications);

    let (_, from_json) = replay(notifications, DispatcherConfig::default());
    let (_, from_msgpack) = replay(reread, DispatcherConfig::default());
    assert_eq!(from_json, from_msgpack);
}

#[test]
fn small_event_buffer_still_drains_every_record() {
    let notifications = read_capture(CAPTURE.as_bytes(), CaptureFormat::Json).expect("read");
    let config = DispatcherConfig { event_capacity: 1, ..DispatcherConfig::default() };

    let (_, report) = replay(notifications, config);

    assert_eq!(report.lost, 0);
    assert_eq!(report.events.len(), 3);
}
