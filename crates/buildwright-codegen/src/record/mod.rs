mod context;
mod emit;
mod scan;

pub use context::GenerateRecord;
