//! Tests for the batch clone engine -- clone counts, id assignment, title
//! prefixing, per-field shift application, and spec parsing.

use fieldclone::{
    clone_record, clone_records, CloneError, CloneOptions, FieldShiftSpec, IncrementConfig,
    IncrementUnit, Record, ValueRepr,
};

fn event(id: u64, date: &str) -> Record {
    let mut record = Record::new(id, "Orientation");
    record.set_field("event_date", date);
    record
}

fn weekly_shift() -> FieldShiftSpec {
    FieldShiftSpec::calendar(
        "event_date",
        IncrementConfig::new(1, IncrementUnit::Week).unwrap(),
    )
}

// ---------------------------------------------------------------------------
// Clone count and identity
// ---------------------------------------------------------------------------

#[test]
fn produces_the_requested_number_of_clones() {
    let original = event(1, "2024-09-02");
    let options = CloneOptions {
        count: 7,
        ..CloneOptions::new()
    };

    let clones = clone_record(&original, &options).unwrap();

    assert_eq!(clones.len(), 7);
    let ids: Vec<u64> = clones.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![2, 3, 4, 5, 6, 7, 8]);
    for clone in &clones {
        assert_eq!(clone.title, "Orientation");
        assert_eq!(clone.field("event_date").unwrap()[0].value, "2024-09-02");
    }
}

#[test]
fn zero_count_produces_no_clones() {
    let original = event(1, "2024-09-02");
    let options = CloneOptions {
        count: 0,
        ..CloneOptions::new()
    };

    assert!(clone_record(&original, &options).unwrap().is_empty());
}

#[test]
fn ids_start_past_the_highest_input_id() {
    let originals = vec![event(10, "2024-09-02"), event(3, "2024-10-01")];
    let options = CloneOptions {
        count: 2,
        ..CloneOptions::new()
    };

    let clones = clone_records(&originals, &options).unwrap();
    let ids: Vec<u64> = clones.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![11, 12, 13, 14]);
}

// ---------------------------------------------------------------------------
// Title prefixing
// ---------------------------------------------------------------------------

#[test]
fn prepend_title_prefixes_with_a_space() {
    let original = event(1, "2024-09-02");
    let options = CloneOptions {
        prepend_title: Some("foo bar".to_string()),
        ..CloneOptions::new()
    };

    let clones = clone_record(&original, &options).unwrap();
    assert_eq!(clones[0].title, "foo bar Orientation");
}

// ---------------------------------------------------------------------------
// Field shifts across the batch
// ---------------------------------------------------------------------------

#[test]
fn successive_clones_step_further_out() {
    let original = event(1, "2024-09-02");
    let options = CloneOptions {
        count: 3,
        shifts: vec![weekly_shift()],
        ..CloneOptions::new()
    };

    let clones = clone_record(&original, &options).unwrap();
    let dates: Vec<&str> = clones
        .iter()
        .map(|c| c.field("event_date").unwrap()[0].value.as_str())
        .collect();
    assert_eq!(dates, vec!["2024-09-09", "2024-09-16", "2024-09-23"]);
}

#[test]
fn originals_are_not_mutated() {
    let original = event(1, "2024-09-02");
    let options = CloneOptions {
        count: 2,
        shifts: vec![weekly_shift()],
        ..CloneOptions::new()
    };

    clone_record(&original, &options).unwrap();
    assert_eq!(original.field("event_date").unwrap()[0].value, "2024-09-02");
}

#[test]
fn each_original_gets_its_own_counter() {
    let originals = vec![event(1, "2024-09-02"), event(2, "2024-10-01")];
    let options = CloneOptions {
        count: 2,
        shifts: vec![weekly_shift()],
        ..CloneOptions::new()
    };

    let clones = clone_records(&originals, &options).unwrap();
    let dates: Vec<&str> = clones
        .iter()
        .map(|c| c.field("event_date").unwrap()[0].value.as_str())
        .collect();
    // First record's clones step from ITS date, second from its own.
    assert_eq!(
        dates,
        vec!["2024-09-09", "2024-09-16", "2024-10-08", "2024-10-15"]
    );
}

#[test]
fn multiple_shift_specs_apply_to_their_own_fields() {
    let mut original = event(1, "2024-09-02");
    original.set_field("signup_deadline", "2024-08-26");

    let options = CloneOptions {
        count: 1,
        shifts: vec![
            weekly_shift(),
            FieldShiftSpec::calendar(
                "signup_deadline",
                IncrementConfig::new(1, IncrementUnit::Week).unwrap(),
            ),
        ],
        ..CloneOptions::new()
    };

    let clones = clone_record(&original, &options).unwrap();
    assert_eq!(clones[0].field("event_date").unwrap()[0].value, "2024-09-09");
    assert_eq!(
        clones[0].field("signup_deadline").unwrap()[0].value,
        "2024-09-02"
    );
}

#[test]
fn shift_for_a_missing_field_is_skipped() {
    let original = event(1, "2024-09-02");
    let options = CloneOptions {
        count: 1,
        shifts: vec![FieldShiftSpec::calendar(
            "no_such_field",
            IncrementConfig::new(1, IncrementUnit::Week).unwrap(),
        )],
        ..CloneOptions::new()
    };

    let clones = clone_record(&original, &options).unwrap();
    assert_eq!(clones[0].field("event_date").unwrap()[0].value, "2024-09-02");
}

#[test]
fn epoch_shift_in_explicit_timezone() {
    let mut original = Record::new(1, "Webinar");
    original.set_field("start_ts", "1581789600");

    let options = CloneOptions {
        count: 1,
        shifts: vec![FieldShiftSpec::epoch(
            "start_ts",
            IncrementConfig::new(1, IncrementUnit::Month).unwrap(),
        )
        .in_timezone(chrono_tz::UTC)],
        ..CloneOptions::new()
    };

    let clones = clone_record(&original, &options).unwrap();
    assert_eq!(clones[0].field("start_ts").unwrap()[0].value, "1584295200");
}

#[test]
fn bad_field_value_fails_the_batch() {
    let original = event(1, "not a date at all");
    let options = CloneOptions {
        count: 2,
        shifts: vec![weekly_shift()],
        ..CloneOptions::new()
    };

    assert!(clone_record(&original, &options).is_err());
}

// ---------------------------------------------------------------------------
// FieldShiftSpec parsing
// ---------------------------------------------------------------------------

#[test]
fn parses_the_shift_grammar() {
    let spec: FieldShiftSpec = "event_date=2:week".parse().unwrap();
    assert_eq!(spec.field, "event_date");
    assert_eq!(spec.repr, ValueRepr::Calendar);
    assert_eq!(spec.config.increment, Some(2));
    assert_eq!(spec.config.unit, IncrementUnit::Week);
    assert!(spec.timezone.is_none());
}

#[test]
fn parses_with_surrounding_whitespace() {
    let spec: FieldShiftSpec = "event_date= 3 : day ".parse().unwrap();
    assert_eq!(spec.config.increment, Some(3));
    assert_eq!(spec.config.unit, IncrementUnit::Day);
}

#[test]
fn as_epoch_switches_the_representation() {
    let spec = "start_ts=3:hour".parse::<FieldShiftSpec>().unwrap().as_epoch();
    assert_eq!(spec.repr, ValueRepr::Epoch);
}

#[test]
fn spec_without_equals_is_rejected() {
    let err = "event_date:2:week".parse::<FieldShiftSpec>().unwrap_err();
    assert!(matches!(err, CloneError::InvalidShiftSpec(_)));
}

#[test]
fn spec_without_unit_separator_is_rejected() {
    let err = "event_date=2week".parse::<FieldShiftSpec>().unwrap_err();
    assert!(matches!(err, CloneError::InvalidShiftSpec(_)));
}

#[test]
fn spec_with_empty_field_is_rejected() {
    let err = "=2:week".parse::<FieldShiftSpec>().unwrap_err();
    assert!(matches!(err, CloneError::InvalidShiftSpec(_)));
}

#[test]
fn spec_with_unknown_unit_is_rejected() {
    let err = "event_date=2:fortnight".parse::<FieldShiftSpec>().unwrap_err();
    assert!(matches!(err, CloneError::InvalidUnit(_)));
}

#[test]
fn spec_amount_out_of_range_is_rejected() {
    let err = "event_date=13:week".parse::<FieldShiftSpec>().unwrap_err();
    assert!(matches!(err, CloneError::InvalidIncrement(13)));

    let err = "event_date=0:week".parse::<FieldShiftSpec>().unwrap_err();
    assert!(matches!(err, CloneError::InvalidIncrement(0)));
}
