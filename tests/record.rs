use buildwright::{BuildError, record};

#[record]
#[derive(Debug, Clone, PartialEq)]
struct Counter {
    count: Option<i32>,
}

#[record]
#[derive(Debug, Clone, PartialEq)]
struct Measurement {
    /// Sample identifier.
    id: u64,
    small: Option<i32>,
    large: Option<i64>,
    ratio: Option<f64>,
    label: Option<String>,
}

#[record(builder = Settings)]
#[derive(Debug, Clone, PartialEq)]
struct Config {
    #[record(default = Some(8080))]
    port: Option<i32>,
    #[record(default = "localhost".to_string())]
    host: String,
    timeout: Option<i64>,
    retries: Option<i32>,
}

#[record]
#[derive(Debug, Clone, PartialEq)]
struct Tagged<T> {
    tag: T,
    weight: Option<f64>,
}

#[test]
fn test_count_walkthrough() {
    let mut builder = Counter::builder();

    builder.set_count(7);
    assert_eq!(builder.count(), Some(7));

    builder.clear_count();
    assert_eq!(builder.count(), None);

    builder.set_optional_count(Some(4));
    assert_eq!(builder.count(), Some(4));

    builder.map_count(|x| x * 2);
    assert_eq!(builder.count(), Some(8));

    let value = builder.build().unwrap();
    assert_eq!(value.count(), Some(8));
    assert_eq!(value.to_builder().count(), Some(8));
}

#[test]
fn test_clear_is_idempotent() {
    let mut once = Counter::builder();
    once.set_count(3).clear_count();

    let mut twice = Counter::builder();
    twice.set_count(3).clear_count().clear_count();

    assert_eq!(once.count(), None);
    assert_eq!(twice.count(), once.count());
    assert_eq!(twice.build().unwrap(), once.build().unwrap());
}

#[test]
fn test_mapper_on_unset_is_not_called() {
    let mut builder = Counter::builder();
    let mut called = false;
    builder.map_count(|x| {
        called = true;
        x + 1
    });
    assert!(!called);
    assert_eq!(builder.count(), None);
}

#[test]
fn test_mapper_returning_none_clears() {
    let mut builder = Counter::builder();
    builder.set_count(5).map_count(|_| None::<i32>);
    assert_eq!(builder.count(), None);

    builder.set_count(5).map_count(|x| (x > 3).then_some(x - 3));
    assert_eq!(builder.count(), Some(2));
}

#[test]
fn test_set_optional_none_clears() {
    let mut builder = Counter::builder();
    builder.set_count(1).set_optional_count(None);
    assert_eq!(builder.count(), None);
}

#[test]
fn test_merge_is_additive() {
    let present = Counter::builder().set_count(5).build().unwrap();
    let absent = Counter::builder().build().unwrap();

    let mut target = Counter::builder();
    target.set_count(3).merge_from(&present);
    assert_eq!(target.count(), Some(5));

    let mut target = Counter::builder();
    target.set_count(3).merge_from(&absent);
    assert_eq!(target.count(), Some(3));

    let mut source = Counter::builder();
    source.set_count(9);
    let mut target = Counter::builder();
    target.set_count(3).merge_from_builder(&source);
    assert_eq!(target.count(), Some(9));

    let mut target = Counter::builder();
    target.set_count(3).merge_from_builder(&Counter::builder());
    assert_eq!(target.count(), Some(3));
}

#[test]
fn test_presence_round_trip_for_every_primitive() {
    for (small, large, ratio) in [
        (0, 0, 0.0),
        (i32::MIN, i64::MIN, f64::MIN),
        (i32::MAX, i64::MAX, f64::MAX),
        (-1, -1, -0.5),
    ] {
        let value = Measurement::builder()
            .set_id(1)
            .set_small(small)
            .set_large(large)
            .set_ratio(ratio)
            .build()
            .unwrap();
        assert_eq!(value.small(), Some(small));
        assert_eq!(value.large(), Some(large));
        assert_eq!(value.ratio(), Some(ratio));
    }

    let unset = Measurement::builder().set_id(1).build().unwrap();
    assert_eq!(unset.small(), None);
    assert_eq!(unset.large(), None);
    assert_eq!(unset.ratio(), None);
    assert_eq!(unset.label(), None);
}

#[test]
fn test_to_builder_round_trip() {
    let value = Measurement::builder()
        .set_id(42)
        .set_large(-7)
        .set_label("sample".to_string())
        .build()
        .unwrap();
    let rebuilt = value.to_builder().build().unwrap();
    assert_eq!(rebuilt, value);
    assert_eq!(rebuilt.small(), None);
    assert_eq!(rebuilt.label().map(String::as_str), Some("sample"));
    assert_eq!(*rebuilt.id(), 42);
}

#[test]
fn test_missing_fields_are_reported() {
    let err = Measurement::builder().set_small(1).build().unwrap_err();
    assert_eq!(err, BuildError::MissingFields(vec!["id"]));
    assert_eq!(err.to_string(), "not set: [id]");
}

#[test]
fn test_defaults_and_clear() {
    let mut builder = Config::builder();
    assert_eq!(builder.port(), Some(8080));
    assert_eq!(builder.host().map(String::as_str), Some("localhost"));
    assert_eq!(builder.timeout(), None);

    builder
        .set_port(9000)
        .set_host("example.org".to_string())
        .set_timeout(30)
        .set_retries(2);
    builder.clear();

    assert_eq!(builder.port(), Some(8080));
    assert_eq!(builder.host().map(String::as_str), Some("localhost"));
    assert_eq!(builder.timeout(), None);
    assert_eq!(builder.retries(), None);

    let config: Config = Settings::default().build().unwrap();
    assert_eq!(config.port(), Some(8080));
    assert_eq!(config.host(), "localhost");
}

#[test]
fn test_clear_without_defaults_unsets_everything() {
    let mut builder = Measurement::builder();
    builder.set_id(1).set_small(2).set_label("x".to_string());
    builder.clear();
    assert_eq!(builder.id(), None);
    assert_eq!(builder.small(), None);
    assert_eq!(builder.label(), None);
}

#[test]
fn test_generic_record() {
    let value = Tagged::<&str>::builder()
        .set_tag("heavy")
        .set_weight(1.5)
        .build()
        .unwrap();
    assert_eq!(*value.tag(), "heavy");
    assert_eq!(value.weight(), Some(1.5));

    let mut builder = value.to_builder();
    builder.map_tag(|_| "light").clear_weight();
    let light = builder.build().unwrap();
    assert_eq!(*light.tag(), "light");
    assert_eq!(light.weight(), None);
}
