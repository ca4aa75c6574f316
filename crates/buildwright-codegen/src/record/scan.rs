use super::GenerateRecord;
use crate::attrs::{RecordInput, RecordOptions};
use crate::datatype::Datatype;
use crate::methods::{self, RESERVED_METHODS};
use crate::property::Property;

/// A validated record, ready for emission.
#[derive(Debug, Clone)]
pub(crate) struct Unit {
    pub datatype: Datatype,
    pub properties: Vec<Property>,
}

impl GenerateRecord {
    pub(crate) fn scan_input(
        &self,
        input: &syn::DeriveInput,
        options: &RecordOptions,
        record: RecordInput,
    ) -> darling::Result<Unit> {
        let fields = record
            .data
            .take_struct()
            .ok_or_else(|| darling::Error::unsupported_shape("enum").with_span(&record.ident))?;

        let mut errors = darling::Error::accumulator();
        let properties: Vec<Property> = fields
            .iter()
            .filter_map(|field| errors.handle(Property::from_field(field)))
            .collect();

        for property in &properties {
            let name = property.label();
            if RESERVED_METHODS.contains(&name.as_str()) {
                errors.push(
                    darling::Error::custom(format!(
                        "field `{name}` would shadow the generated `{name}` method"
                    ))
                    .with_span(&property.name),
                );
            }
            for other in &properties {
                if let Some(accessor) = accessors(other).into_iter().find(|a| *a == name) {
                    errors.push(
                        darling::Error::custom(format!(
                            "field `{name}` collides with `{accessor}`, generated for field `{}`",
                            other.label()
                        ))
                        .with_span(&property.name),
                    );
                }
            }
        }
        errors.finish()?;

        let datatype = Datatype::new(input, options, &properties);
        tracing::trace!(
            builder = %datatype.builder,
            fields = properties.len(),
            defaults = datatype.has_defaults(),
            "scanned record"
        );
        Ok(Unit {
            datatype,
            properties,
        })
    }
}

/// Builder methods generated for `property` besides its getter.
fn accessors(property: &Property) -> [syn::Ident; 4] {
    [
        methods::setter(property),
        methods::optional_setter(property),
        methods::mapper(property),
        methods::clear_method(property),
    ]
}
