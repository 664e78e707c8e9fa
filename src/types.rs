//! Shared primitive IDs and scalar aliases.

/// Caller-supplied team identifier.
pub type TeamId = u64;
/// Caller-supplied player identifier.
pub type PlayerId = u64;
/// Relative player skill; higher is better.
pub type SkillLevel = i32;
/// Calendar date without a time component.
pub type Date = chrono::NaiveDate;
/// Arbitrary-precision monetary amount.
pub type Salary = bigdecimal::BigDecimal;
