use backdrop_core::device::{DeviceDetector, InputModality, StaticCapabilities};

#[test]
fn test_pointer_device() {
    let detector = DeviceDetector::new(StaticCapabilities::pointer());
    assert_eq!(detector.modality(), InputModality::Pointer);
    assert!(!detector.is_touch_primary());
}

#[test]
fn test_touch_events_or_points_mean_touch() {
    let events_only = StaticCapabilities {
        touch_events: true,
        touch_points: 0,
    };
    let points_only = StaticCapabilities {
        touch_events: false,
        touch_points: 2,
    };
    assert!(DeviceDetector::new(events_only).is_touch_primary());
    assert!(DeviceDetector::new(points_only).is_touch_primary());
    assert!(DeviceDetector::new(StaticCapabilities::touch()).is_touch_primary());
}

#[test]
fn test_refresh_reports_only_changes() {
    let mut detector = DeviceDetector::new(StaticCapabilities::pointer());
    assert_eq!(detector.refresh(), None);

    detector.provider_mut().touch_points = 1;
    assert_eq!(detector.refresh(), Some(InputModality::Touch));
    assert_eq!(detector.refresh(), None);

    *detector.provider_mut() = StaticCapabilities::pointer();
    assert_eq!(detector.refresh(), Some(InputModality::Pointer));
    assert_eq!(detector.provider(), &StaticCapabilities::pointer());
}
