use super::*;
use serde_json::json;

fn sample_raw() -> RawRecord {
    RawRecord {
        adate: "20240101".into(),
        atime: "08_09".into(),
        t1eg1: Some("100".into()),
        t1eg2: Some("".into()),
        t1egsum1: Some("150".into()),
        ..Default::default()
    }
}

#[test]
fn parse_numeric_field_is_total() {
    assert_eq!(parse_numeric_field(None), 0);
    assert_eq!(parse_numeric_field(Some("")), 0);
    assert_eq!(parse_numeric_field(Some("  ")), 0);
    assert_eq!(parse_numeric_field(Some("abc")), 0);
    assert_eq!(parse_numeric_field(Some("42")), 42);
    assert_eq!(parse_numeric_field(Some("-3")), -3);
}
#[test]
fn parse_numeric_field_takes_leading_integer() {
    assert_eq!(parse_numeric_field(Some(" 17 ")), 17);
    assert_eq!(parse_numeric_field(Some("+5")), 5);
    assert_eq!(parse_numeric_field(Some("12abc")), 12);
    assert_eq!(parse_numeric_field(Some("3.7")), 3);
    assert_eq!(parse_numeric_field(Some("-")), 0);
    assert_eq!(parse_numeric_field(Some("99999999999999999999999")), std::i64::MAX);
    assert_eq!(parse_numeric_field(Some("-99999999999999999999999")), std::i64::MIN);
}
#[test]
fn normalize_example_record() {
    let n = normalize(&sample_raw());
    assert_eq!(n.date, "20240101");
    assert_eq!(n.time_slot, "08_09");
    assert_eq!(n.t1.entry, T1Entry { eg1: 100, eg2: 0, eg3: 0, eg4: 0, sum: 150 });
    assert_eq!(n.t1.departure, T1Departure::default());
    assert_eq!(n.t2.entry, T2Entry::default());
    assert_eq!(n.sum_for(Terminal::T1, Direction::Entry), 150);
    assert_eq!(CongestionLevel::from_count(n.t1.entry.sum), CongestionLevel::Low);
}
#[test]
fn sum_is_passed_through_not_recomputed() {
    let raw = RawRecord {
        t1eg1: Some("900".into()),
        t1eg2: Some("900".into()),
        t1egsum1: Some("7".into()),
        t2dg1: Some("1".into()),
        t2dgsum2: Some("abc".into()),
        ..Default::default()
    };
    let n = normalize(&raw);
    assert_eq!(n.t1.entry.sum, parse_numeric_field(raw.t1egsum1.as_ref().map(|x| x as &str)));
    assert_eq!(n.t1.entry.sum, 7);
    assert_eq!(n.t2.departure.sum, 0);
    assert_eq!(n.sum_for(Terminal::T2, Direction::Departure), 0);
}
#[test]
fn normalize_is_idempotent() {
    let once = normalize(&sample_raw());
    let twice = normalize(&RawRecord::from(&once));
    assert_eq!(once, twice);
    assert_eq!(normalize(&sample_raw()), once);
}
#[test]
fn normalized_serializes_in_nested_shape() {
    let v = serde_json::to_value(normalize(&sample_raw())).unwrap();
    assert_eq!(v["adate"], "20240101");
    assert_eq!(v["atime"], "08_09");
    assert_eq!(v["t1"]["entry"], json!({"eg1": 100, "eg2": 0, "eg3": 0, "eg4": 0, "sum": 150}));
    assert_eq!(v["t2"]["departure"], json!({"dg1": 0, "dg2": 0, "sum": 0}));
}
#[test]
fn raw_record_accepts_numbers_and_nulls() {
    let raw: RawRecord = serde_json::from_value(json!({
        "adate": "20240101",
        "atime": "23_24",
        "t1eg1": 12,
        "t1eg2": null,
        "t2dgsum2": " 800 "
    })).unwrap();
    assert_eq!(raw.t1eg1, Some("12".into()));
    assert_eq!(raw.t1eg2, None);
    let n = normalize(&raw);
    assert_eq!(n.t1.entry.eg1, 12);
    assert_eq!(n.t2.departure.sum, 800);
}
#[test]
fn envelope_items_list() {
    let env: Envelope = serde_json::from_value(json!({
        "response": {
            "header": {"resultCode": "00", "resultMsg": "NORMAL SERVICE."},
            "body": {
                "items": [{"adate": "20240101", "atime": "00_01"}, null, {"adate": "20240101", "atime": "01_02"}],
                "numOfRows": 999, "pageNo": 1, "totalCount": 2
            }
        }
    })).unwrap();
    assert!(env.is_ok());
    assert_eq!(env.result_msg(), "NORMAL SERVICE.");
    let recs = env.into_records();
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[1].atime, "01_02");
}
#[test]
fn envelope_single_item_becomes_list() {
    let env: Envelope = serde_json::from_value(json!({
        "response": {
            "header": {"resultCode": "00", "resultMsg": "NORMAL SERVICE."},
            "body": {"items": {"adate": "20240101", "atime": "08_09", "t1egsum1": "150"}, "totalCount": "1"}
        }
    })).unwrap();
    assert_eq!(env.response.body.as_ref().unwrap().total_count, Some(1));
    let recs = env.into_records();
    assert_eq!(recs.len(), 1);
    assert_eq!(normalize(&recs[0]).t1.entry.sum, 150);
}
#[test]
fn envelope_list_with_stray_scalars_keeps_records() {
    let env: Envelope = serde_json::from_value(json!({
        "response": {
            "header": {"resultCode": "00", "resultMsg": "NORMAL SERVICE."},
            "body": {"items": [{"adate": "20240101", "atime": "08_09", "t1egsum1": "150"}, 5, "x", [1, 2]]}
        }
    })).unwrap();
    let recs = env.into_records();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].adate, "20240101");
    assert_eq!(recs[0].atime, "08_09");
    assert_eq!(normalize(&recs[0]).t1.entry.sum, 150);
}
#[test]
fn envelope_empty_items() {
    let blank: Envelope = serde_json::from_value(json!({
        "response": {"header": {"resultCode": "00", "resultMsg": ""}, "body": {"items": ""}}
    })).unwrap();
    assert!(blank.into_records().is_empty());
    let missing: Envelope = serde_json::from_value(json!({
        "response": {"header": {"resultCode": "30", "resultMsg": "SERVICE KEY IS NOT REGISTERED ERROR."}}
    })).unwrap();
    assert!(!missing.is_ok());
    assert_eq!(missing.result_code(), RESULT_KEY_NOT_REGISTERED);
    assert!(missing.into_records().is_empty());
}
#[test]
fn congestion_boundaries() {
    assert_eq!(CongestionLevel::from_count(0), CongestionLevel::Low);
    assert_eq!(CongestionLevel::from_count(500), CongestionLevel::Low);
    assert_eq!(CongestionLevel::from_count(501), CongestionLevel::Medium);
    assert_eq!(CongestionLevel::from_count(1500), CongestionLevel::Medium);
    assert_eq!(CongestionLevel::from_count(1501), CongestionLevel::High);
    assert_eq!(serde_json::to_value(CongestionLevel::High).unwrap(), json!("high"));
}
#[test]
fn bar_fill_is_clamped() {
    assert_eq!(bar_fill(0), 0.0);
    assert_eq!(bar_fill(1000), 0.5);
    assert_eq!(bar_fill(5000), 1.0);
    assert_eq!(bar_fill(-10), 0.0);
}
#[test]
fn time_slot_formatting() {
    assert_eq!(format_time_slot("08_09"), "08:00-09:00");
    assert_eq!(format_time_slot("23_24"), "23:00-24:00");
    assert_eq!(format_time_slot("합계"), "합계");
    assert_eq!(format_time_slot("08_"), "08_");
}
#[test]
fn selectors_parse() {
    assert_eq!("T2".parse::<Terminal>(), Ok(Terminal::T2));
    assert_eq!("departure".parse::<Direction>(), Ok(Direction::Departure));
    assert_eq!("tomorrow".parse::<DateSelector>(), Ok(DateSelector::Tomorrow));
    assert_eq!(DateSelector::Tomorrow.as_param(), "1");
    assert!("T3".parse::<Terminal>().is_err());
}
#[test]
fn result_code_messages() {
    assert_eq!(result_code_message("30"), "The service key is not registered.");
    assert_eq!(result_code_message("11"), "The request parameters are invalid.");
    assert_eq!(result_code_message("99"), "Data is currently unavailable.");
}
