//! Value object trait: equality by value, not identity.
//!
//! Filter criteria and page descriptors are value objects: a new value replaces
//! the old one wholesale, and two values with the same fields are the same
//! value.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: `FilterSpec { search: "dog", .. }` (no identity)
/// - **Entity**: `Product { id: 17, .. }` (identity survives reloads)
///
/// The trait requires `Clone`, `PartialEq` and `Debug` so values can be
/// copied into snapshots, compared in tests and logged.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
