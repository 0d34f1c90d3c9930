use chrono::{TimeZone, Utc};
use cloudyvents_codec::{decode, encode, extract_all, MarkerEncoder, UniqueClock};
use cloudyvents_core::{Event, Extra, ExtraValue};
use proptest::prelude::*;
use std::sync::Arc;

fn leaf() -> impl Strategy<Value = ExtraValue> {
    prop_oneof![
        "[^\n\r]{0,24}".prop_map(ExtraValue::from),
        any::<i64>().prop_map(ExtraValue::from),
        (-1.0e6f64..1.0e6).prop_filter_map("finite", ExtraValue::float),
    ]
}

fn extra_value() -> impl Strategy<Value = ExtraValue> {
    leaf().prop_recursive(3, 24, 4, |inner| {
        prop::collection::btree_map("[a-z0-9_]{1,8}", inner, 0..4).prop_map(ExtraValue::Mapping)
    })
}

fn event() -> impl Strategy<Value = Event> {
    (
        "[A-Za-z0-9_.:-][^\n\r]{0,15}",
        "[A-Za-z0-9_.:-][^\n\r]{0,15}",
        0i64..4_000_000_000,
        0u32..1_000_000,
        prop::option::of(prop::collection::btree_map("[^\n\r]{1,8}", extra_value(), 0..5)),
    )
        .prop_map(|(source, name, secs, micros, extra): (String, String, i64, u32, Option<Extra>)| {
            let ts = Utc.timestamp_opt(secs, micros * 1000).unwrap();
            Event::new(source, name, ts, extra).unwrap()
        })
}

proptest! {
    #[test]
    fn decode_inverts_encode(event in event()) {
        let marker = encode(&event).unwrap();
        prop_assert!(!marker.contains('\n'));
        prop_assert_eq!(decode(&marker).unwrap(), event);
    }

    #[test]
    fn cruft_around_marker_is_ignored(
        event in event(),
        before in "[^\n\r]{0,40}",
        after in "[^\n\r]{0,40}",
    ) {
        let marker = encode(&event).unwrap();
        let line = format!("{before}{marker}{after}");
        prop_assert_eq!(extract_all(&line), vec![event]);
    }
}

#[test]
fn original_cruft_examples() {
    let encoder = MarkerEncoder::new(Arc::new(UniqueClock::new()));
    for prefix in ["some cruft ", "cruft2 "] {
        let (event, marker) = encoder.stamp_and_encode("unittest", "TRIAL1", None).unwrap();
        let events = extract_all(&format!("{prefix}{marker}"));
        assert_eq!(events, vec![event]);
    }
}
