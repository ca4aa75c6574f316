use buildwright::record;

#[record]
pub struct Reading {
    pub celsius: Option<f64>,
    pub sequence: Option<i64>,
    pub sensor: Option<i32>,
}

fn main() {
    let mut builder = Reading::builder();
    builder
        .set_celsius(21.5)
        .set_optional_sequence(Some(3))
        .map_sequence(|n| n + 1)
        .clear_sensor();
    let reading = builder.build().unwrap();
    assert_eq!(reading.celsius(), Some(21.5));
    assert_eq!(reading.sequence(), Some(4));
    assert_eq!(reading.sensor(), None);
}
