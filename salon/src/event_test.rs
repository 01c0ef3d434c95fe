#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

#[test]
fn unit_events_use_type_tag() {
    let raw = serde_json::to_value(Event::AdvanceLevel).unwrap();
    assert_eq!(raw, json!({ "type": "advance_level" }));
}

#[test]
fn payload_events_parse_from_json() {
    let event: Event = serde_json::from_value(json!({
        "type": "paint_nail", "nailId": "ring", "color": "#f06292"
    }))
    .unwrap();
    assert_eq!(event, Event::PaintNail { nail_id: NailName::Ring, color: "#f06292".into() });
}

#[test]
fn place_sticker_optional_fields_default_to_none() {
    let event: Event = serde_json::from_value(json!({
        "type": "place_sticker",
        "stickerId": "star",
        "position": { "nailId": "thumb", "x": 0.4, "y": 0.6 }
    }))
    .unwrap();
    let Event::PlaceSticker { position, .. } = event else {
        panic!("expected place_sticker");
    };
    assert_eq!(position.nail_id, Some(NailName::Thumb));
    assert_eq!(position.x, 0.4);
    assert!(position.rotation.is_none());
    assert!(position.scale.is_none());
}

#[test]
fn place_sticker_accepts_null_nail() {
    let event: Event = serde_json::from_value(json!({
        "type": "place_sticker",
        "stickerId": "star",
        "position": { "nailId": null, "x": 0.9, "y": 0.1 }
    }))
    .unwrap();
    assert!(matches!(event, Event::PlaceSticker { position: DropPoint { nail_id: None, .. }, .. }));
}

#[test]
fn record_stats_update_fields_are_optional() {
    let event: Event = serde_json::from_value(json!({
        "type": "record_stats", "taskId": "a", "update": { "timeMs": 12000, "completedAt": 7 }
    }))
    .unwrap();
    let update = StatsUpdate { time_ms: Some(12_000), completed_at: Some(7), ..StatsUpdate::default() };
    assert_eq!(event, Event::RecordStats { task_id: "a".into(), update });
}

#[test]
fn payload_fields_serialize_as_camel_case() {
    let event = Event::FinalizePlacement { sticker_id: "star".into(), task_id: "a".into() };
    let raw = serde_json::to_value(event).unwrap();
    assert_eq!(raw, json!({ "type": "finalize_placement", "stickerId": "star", "taskId": "a" }));
    let raw = serde_json::to_value(Event::Tick { delta_ms: 500 }).unwrap();
    assert_eq!(raw, json!({ "type": "tick", "deltaMs": 500 }));
}

#[test]
fn snake_case_payload_fields_are_rejected() {
    let raw = json!({ "type": "select_task", "task_id": "a" });
    assert!(serde_json::from_value::<Event>(raw).is_err());
}

#[test]
fn unknown_event_type_is_rejected() {
    assert!(serde_json::from_value::<Event>(json!({ "type": "fly_away" })).is_err());
}

#[test]
fn kind_matches_serde_tag() {
    let events = [
        Event::SelectTask { task_id: "a".into() },
        Event::Tick { delta_ms: 500 },
        Event::ToggleLockCorrect,
        Event::HideSolutionModal,
        Event::SetQueue { queue: vec!["a".into()] },
    ];
    for event in events {
        let raw = serde_json::to_value(&event).unwrap();
        assert_eq!(raw["type"], event.kind());
    }
}

#[test]
fn only_board_events_trigger_completion_checks() {
    assert!(Event::PaintNail { nail_id: NailName::Thumb, color: "#fff".into() }.affects_board());
    assert!(Event::ShowSolution.affects_board());
    assert!(!Event::Tick { delta_ms: 500 }.affects_board());
    assert!(!Event::ToggleHints.affects_board());
    assert!(!Event::RecordStats { task_id: "a".into(), update: StatsUpdate::default() }.affects_board());
}
