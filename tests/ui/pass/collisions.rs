#[derive(Debug, Clone, Copy, PartialEq)]
struct F(u8);

#[derive(Debug, Clone, PartialEq)]
struct R(String);

fn builder() -> u8 {
    7
}

#[buildwright::record]
#[derive(Debug, Clone, PartialEq)]
struct Holder {
    x: Option<F>,
    y: R,
    r#type: Option<i32>,
    r#match: Option<i64>,
    #[record(default = builder())]
    level: u8,
}

fn main() {
    let mut draft = Holder::builder();
    draft
        .set_x(F(1))
        .set_y(R("why".to_string()))
        .set_type(3)
        .map_x(|F(n)| Some(F(n + 1)))
        .map_y(|R(s)| R(s.to_uppercase()))
        .map_type(|t| t * 2)
        .set_optional_match(None);
    let holder = draft.build().unwrap();
    assert_eq!(holder.x(), Some(&F(2)));
    assert_eq!(holder.y(), &R("WHY".to_string()));
    assert_eq!(holder.r#type(), Some(6));
    assert_eq!(holder.r#match(), None);
    assert_eq!(*holder.level(), 7);

    let err = Holder::builder().build().unwrap_err();
    assert_eq!(err.missing_fields(), ["y"]);
}
