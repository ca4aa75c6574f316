mod runtime {
    pub use buildwright::BuildError;
}

#[buildwright::record(builder = "Draft", crate = crate::runtime)]
#[derive(Debug, Clone, PartialEq)]
struct Letter<'a> {
    to: &'a str,
    #[record(default = "Regards")]
    closing: &'a str,
    page_count: Option<i32>,
}

fn main() {
    let letter = Draft::new().set_to("Ada").build().unwrap();
    assert_eq!(*letter.closing(), "Regards");
    assert_eq!(letter.page_count(), None);
    let mut copy = letter.to_builder();
    copy.merge_from(&letter);
    assert_eq!(copy.build().unwrap(), letter);
}
