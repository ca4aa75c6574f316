//! Immutable value types with generated builders.
//!
//! Annotating a struct with [`record`] keeps its fields as private storage,
//! adds a getter per field and generates a `<Name>Builder`:
//!
//! ```
//! use buildwright::record;
//!
//! #[record]
//! #[derive(Debug, PartialEq)]
//! pub struct Order {
//!     pub id: u64,
//!     pub count: Option<i32>,
//!     #[record(default = Some("web".to_string()))]
//!     pub channel: Option<String>,
//! }
//!
//! let mut builder = Order::builder();
//! builder.set_id(7).set_count(3).map_count(|count| count * 2);
//! let order = builder.build().unwrap();
//! assert_eq!(order.count(), Some(6));
//! assert_eq!(order.channel().map(String::as_str), Some("web"));
//!
//! let err = Order::builder().build().unwrap_err();
//! assert_eq!(err.missing_fields(), &["id"]);
//! ```
//!
//! Each field's accessors depend on its declared type:
//!
//! | Field type | Builder methods |
//! |---|---|
//! | `Option<i32>`, `Option<i64>`, `Option<f64>` | `set_x`, `set_optional_x`, `map_x`, `clear_x`, `x` |
//! | any other `Option<T>` | `set_x`, `set_optional_x`, `map_x`, `clear_x`, `x` |
//! | anything else (required) | `set_x`, `map_x`, `x` |
//!
//! Every builder also has `new`, `merge_from`, `merge_from_builder`,
//! `clear` and `build`, and every value has `builder` and `to_builder`.
//! Field types must implement `Clone` and `Debug`.
//!
//! Primitive optionals are stored unboxed next to a `<x>_valid` flag, so
//! no field may be named like the flag of another.
//!
//! Attribute options:
//!
//! - `#[record(builder = Name)]` renames the builder type.
//! - `#[record(crate = path)]` points the generated code at a re-export of
//!   this crate.
//! - `#[record(default)]` / `#[record(default = expr)]` on a field sets it
//!   in the builder's `new()`. `clear()` restores these defaults.

mod error;

pub use buildwright_derive::record;
pub use error::BuildError;
