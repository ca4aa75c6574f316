/// Why a builder could not produce a value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// Required fields that were never set, in declaration order.
    #[error("not set: [{}]", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

impl BuildError {
    /// Names of the fields that must be set before building.
    pub fn missing_fields(&self) -> &[&'static str] {
        match self {
            BuildError::MissingFields(fields) => fields,
        }
    }
}
