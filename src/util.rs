/// Numeric conversion helpers.
///
/// The language has a single `f64` number type, but indexes, loop counters
/// and repetition counts are integers. These helpers perform the truncating
/// conversions in one place and turn non-finite or out-of-range values into
/// runtime errors instead of silently saturating.
pub mod num;
/// Stack growth for deeply recursive evaluation.
pub mod stack;
