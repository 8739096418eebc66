#![warn(clippy::missing_docs_in_private_items)]

/// Base constants.
pub mod constants;
/// Base deserializers.
pub mod deserializers;
/// Amount arithmetic.
pub mod math;
/// Base serializers.
pub mod serializers;
/// Base types.
pub mod types;
