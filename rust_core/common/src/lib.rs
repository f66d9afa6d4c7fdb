pub mod errors;
pub mod types;

pub use errors::VariantError;
pub use types::{parse_date, DateRange, SmoothedRecord, VariantRecord, VariantSelection};
