//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity**: two instances with the same attribute
/// values are the same value.
///
/// - **Value Object**: `Money { amount: "10.00", currency_code: "USD" }`, a sort spec, a filter
/// - **Entity**: a product or collection, identified by its upstream id
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct Money {
///     amount: String,
///     currency_code: String,
/// }
///
/// impl ValueObject for Money {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
