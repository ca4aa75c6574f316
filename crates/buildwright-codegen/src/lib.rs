//! Code generation behind the `#[record]` attribute.
//!
//! A record is expanded one field at a time. [`strategy::create_code_generator`]
//! runs the recognizer chain to pick a [`strategy::PropertyCodeGenerator`]
//! for each field, and [`record::GenerateRecord`] drives every generator
//! through the same sequence of fragments. All generated temporaries are
//! requested from the [`scope::Scope`] carried by the [`source::SourceBuilder`].

pub mod attrs;
pub mod datatype;
pub mod declarations;
pub mod methods;
pub mod misc;
pub mod property;
pub mod record;
pub mod scope;
pub mod source;
pub mod strategy;

pub mod prelude {
    pub use crate::attrs::{DefaultValue, RecordField, RecordInput, RecordOptions};
    pub use crate::datatype::Datatype;
    pub use crate::property::Property;
    pub use crate::record::GenerateRecord;
    pub use crate::scope::{Element, Level, Scope, ScopeError};
    pub use crate::source::SourceBuilder;
    pub use crate::strategy::{
        CodeGenerator, Config, Initially, OptionalKind, PropertyCodeGenerator,
        create_code_generator,
    };
}
