//! Strongly-typed identifiers used across the storefront.
//!
//! Every identifier here is an opaque string minted by the upstream commerce
//! API; the storefront never generates them.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// URL handle of a collection (`/collections/{handle}`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionHandle(String);

/// Opaque pagination token marking the position of the next page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

/// Upstream product identifier (a global id such as `gid://shopify/Product/1`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

macro_rules! impl_string_newtype {
    ($t:ty) => {
        impl $t {
            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }
    };
}

impl_string_newtype!(CollectionHandle);
impl_string_newtype!(Cursor);
impl_string_newtype!(ProductId);

impl CollectionHandle {
    /// Validate and wrap a collection handle.
    ///
    /// Handles are path segments: non-empty, no whitespace, no `/`, `?` or `#`.
    pub fn parse(s: impl Into<String>) -> Result<Self, DomainError> {
        let s = s.into();
        if s.is_empty() {
            return Err(DomainError::invalid_id("CollectionHandle: empty"));
        }
        if let Some(bad) = s
            .chars()
            .find(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#'))
        {
            return Err(DomainError::invalid_id(format!(
                "CollectionHandle: unexpected character {bad:?} in {s:?}"
            )));
        }
        Ok(Self(s))
    }
}

impl FromStr for CollectionHandle {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Cursor {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Interpret a query-string value as a cursor; empty means "first page".
    pub fn from_param(value: &str) -> Option<Self> {
        if value.is_empty() {
            None
        } else {
            Some(Self(value.to_string()))
        }
    }
}

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}
