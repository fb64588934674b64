pub mod cost;

pub use cost::{month_key, CostValidationError, NewCost};
