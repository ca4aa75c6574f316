mod format;
mod rustfmt;
mod tokens;

pub use format::{format_fields, format_methods, format_statements};
pub use rustfmt::rustfmt;
pub use tokens::{compact, contains_tokens, parse_unit};
