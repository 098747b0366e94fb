use serde::{Deserialize, Serialize};

mod parser;
pub mod units;

pub use self::parser::parse;
pub use self::units::Unit;

/// Structured form of one free-text ingredient line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedIngredient {
    /// Quantity as a decimal, `None` when the line has no leading number
    pub count: Option<f64>,
    /// Long-form unit name, empty when no unit was recognised
    pub unit: String,
    pub ingredient: String,
}
