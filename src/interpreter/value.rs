/// Core value representation.
///
/// Defines the `Value` enum, the shared mutable list type, structural
/// equality with numeric tolerance, ordering, vector/matrix classification
/// and the printed form of every value.
pub mod core;
