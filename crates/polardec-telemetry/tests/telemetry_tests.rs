//! Integration tests for polardec-telemetry.

use polardec_telemetry::bus::EventBus;
use polardec_telemetry::events::{DecompositionEvent, EventKind};
use polardec_telemetry::sinks::{EventSink, TracingSink, VecSink};

fn begin(index: u32) -> DecompositionEvent {
    DecompositionEvent::new(
        index,
        EventKind::DecompositionBegin {
            label: format!("m{index}"),
            m00: 1.0,
        },
    )
}

// ─── Bus Tests ────────────────────────────────────────────────

#[test]
fn emit_and_flush() {
    let mut bus = EventBus::new();
    let sink = VecSink::new();
    bus.add_sink(Box::new(sink.clone()));

    bus.emit(begin(0));
    bus.emit(DecompositionEvent::new(0, EventKind::Reconstruction { residual: 1e-15 }));
    assert!(sink.is_empty());

    assert_eq!(bus.flush(), 2);
    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], begin(0));
}

#[test]
fn disabled_bus_drops_events() {
    let mut bus = EventBus::new();
    let sink = VecSink::new();
    bus.add_sink(Box::new(sink.clone()));
    bus.set_enabled(false);
    assert!(!bus.is_enabled());

    bus.emit(begin(0));
    assert_eq!(bus.flush(), 0);
    assert!(sink.is_empty());
}

#[test]
fn multiple_sinks_receive_each_event() {
    let mut bus = EventBus::new();
    let a = VecSink::new();
    let b = VecSink::new();
    bus.add_sink(Box::new(a.clone()));
    bus.add_sink(Box::new(b.clone()));
    bus.add_sink(Box::new(TracingSink::new()));
    assert_eq!(bus.sink_count(), 3);

    for i in 0..4 {
        bus.emit(begin(i));
    }
    bus.finish();
    assert_eq!(a.len(), 4);
    assert_eq!(b.len(), 4);
}

#[test]
fn events_delivered_in_emission_order() {
    let mut bus = EventBus::new();
    let sink = VecSink::new();
    bus.add_sink(Box::new(sink.clone()));

    for i in [3, 1, 2] {
        bus.emit(begin(i));
    }
    bus.set_enabled(false);
    bus.emit(begin(9));
    bus.set_enabled(true);
    bus.finish();

    let order: Vec<u32> = sink.events().iter().map(|e| e.index).collect();
    assert_eq!(order, vec![3, 1, 2]);
}

#[test]
fn flush_without_sinks_drains_channel() {
    let mut bus = EventBus::default();
    bus.emit(begin(1));
    assert_eq!(bus.flush(), 1);
    assert_eq!(bus.flush(), 0);
}

// ─── Event Tests ──────────────────────────────────────────────

#[test]
fn event_serialization() {
    let event = DecompositionEvent::new(
        5,
        EventKind::DegenerateAxis {
            axis: [0.0, 0.0, 1.0],
            coefficient: 1e-12,
        },
    );
    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains("DegenerateAxis"));
    let recovered: DecompositionEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered.index, 5);
    assert_eq!(recovered, event);
}

#[test]
fn failure_detection() {
    let failed = DecompositionEvent::new(
        2,
        EventKind::Failed {
            reason: "diattenuation 1 is not below 1".into(),
        },
    );
    assert!(failed.is_failure());
    assert!(!begin(2).is_failure());

    let mut sink = TracingSink::new();
    sink.handle(&failed);
    sink.finalize();
    assert_eq!(sink.name(), "tracing_sink");
}
