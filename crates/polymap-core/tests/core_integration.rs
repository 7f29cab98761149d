use polymap_core::{
    format_price, AppEvent, Color, Coordinate, EventBus, EventCategory,
    EventFilter, PolygonDraft, PolygonRecord, StoreEvent, ValidationError, PRESET_COLORS,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn square() -> Vec<Coordinate> {
    vec![
        Coordinate::new(40.0, -74.0).unwrap(),
        Coordinate::new(40.0, -73.9).unwrap(),
        Coordinate::new(40.1, -73.9).unwrap(),
        Coordinate::new(40.1, -74.0).unwrap(),
    ]
}

#[test]
fn test_price_formatting() {
    assert_eq!(format_price(Some(1500.0)), "$1,500");
    assert_eq!(format_price(None), "$0");
    assert_eq!(format_price(Some(0.0)), "$0");
    assert_eq!(format_price(Some(999.5)), "$1,000");
    assert_eq!(format_price(Some(1234567.0)), "$1,234,567");
    assert_eq!(format_price(Some(-1500.0)), "-$1,500");
    assert_eq!(format_price(Some(f64::NAN)), "$0");
}

#[test]
fn test_draft_from_every_preset_color() {
    for preset in PRESET_COLORS {
        let draft = PolygonDraft {
            name: preset.name.to_string(),
            price: 1.0,
            color: Color::parse(preset.value).unwrap(),
            coordinates: square(),
        };
        let record = draft.validate().unwrap();
        assert_eq!(record.color.as_str(), preset.value);
    }
}

#[test]
fn test_draft_rejections_do_not_build_records() {
    let mut draft = PolygonDraft::for_coordinates(square());
    assert_eq!(draft.validate(), Err(ValidationError::EmptyName));

    draft.name = "Block".to_string();
    assert!(matches!(
        draft.validate(),
        Err(ValidationError::InvalidPrice { .. })
    ));

    draft.price = 10.0;
    draft.coordinates.push(Coordinate { lat: 120.0, lng: 0.0 });
    assert!(matches!(
        draft.validate(),
        Err(ValidationError::InvalidVertex { index: 4, .. })
    ));
}

#[test]
fn test_record_json_round_trip_preserves_order() {
    let records: Vec<PolygonRecord> = ["c", "a", "b"]
        .iter()
        .map(|name| PolygonRecord::new(*name, 5.0, square(), Color::default()))
        .collect();
    let json = serde_json::to_string(&records).unwrap();
    let back: Vec<PolygonRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, records);
}

#[test]
fn test_event_bus_filters_by_category() {
    let bus = EventBus::new();
    let mut receiver = bus.receiver();
    let store_events = Arc::new(AtomicUsize::new(0));
    let counter = store_events.clone();
    bus.subscribe(
        EventFilter::Categories(vec![EventCategory::Store]),
        move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        },
    );

    let reached = bus
        .publish(AppEvent::Store(StoreEvent::Cleared {
            revision: 1,
            removed: 0,
        }))
        .unwrap();
    assert_eq!(reached, 2);
    let reached = bus
        .publish(AppEvent::Drawing(polymap_core::DrawingEvent::Rearmed))
        .unwrap();
    assert_eq!(reached, 1);

    assert_eq!(store_events.load(Ordering::SeqCst), 1);
    assert!(matches!(receiver.try_recv(), Ok(AppEvent::Store(_))));
    assert!(matches!(receiver.try_recv(), Ok(AppEvent::Drawing(_))));
}
