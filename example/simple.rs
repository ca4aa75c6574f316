use buildwright::record;

#[record]
#[derive(Debug, Clone, PartialEq)]
pub struct Shipment {
    /// Tracking number assigned by the carrier.
    pub tracking: String,
    /// Declared weight in grams.
    pub grams: Option<i64>,
    /// Insured value, if any.
    pub insured: Option<f64>,
    #[record(default = Some(1))]
    pub parcels: Option<i32>,
    pub note: Option<String>,
}

fn main() {
    let mut draft = Shipment::builder();
    draft
        .set_tracking("1Z999".to_string())
        .set_grams(1200)
        .map_grams(|grams| grams + 150)
        .set_optional_insured(None);

    match draft.build() {
        Ok(shipment) => {
            println!("{shipment:?}");
            println!("weight: {:?} g", shipment.grams());
            println!("parcels: {:?}", shipment.parcels());

            let mut revised = shipment.to_builder();
            revised.set_note("fragile".to_string()).clear();
            println!("after clear: {revised:?}");
        }
        Err(err) => eprintln!("cannot build shipment: {err}"),
    }

    if let Err(err) = Shipment::builder().build() {
        println!("empty builder: {err}");
    }
}
