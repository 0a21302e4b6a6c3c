// ABOUTME: Abstraction over a paginated remote workout listing
// ABOUTME: The sync engine drives any WorkoutSource; the Hevy client is the production one
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::provider::ProviderResult;
use crate::normalizer::{aliases, coerce_int, pick};

/// One page of raw workout records plus the source's current page count
#[derive(Debug, Clone, Default)]
pub struct WorkoutPage {
    /// Raw workout records, unnormalized
    pub items: Vec<Value>,
    /// Total pages the source reports; never below one
    pub page_count: u32,
}

impl WorkoutPage {
    /// Read a listing envelope
    ///
    /// A missing or non-list `workouts` field yields an empty page. A missing,
    /// zero or non-numeric page count reads as one.
    #[must_use]
    pub fn from_body(body: &Value) -> Self {
        let items = pick(body, aliases::WORKOUTS)
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        let page_count = pick(body, aliases::PAGE_COUNT)
            .and_then(coerce_int)
            .and_then(|count| u32::try_from(count).ok())
            .filter(|count| *count > 0)
            .unwrap_or(1);
        Self { items, page_count }
    }
}

/// A paginated source of raw workout records
#[async_trait]
pub trait WorkoutSource: Send + Sync {
    /// Short provider name used in logs and errors
    fn name(&self) -> &'static str;

    /// Fetch one 1-based page
    ///
    /// # Errors
    ///
    /// Returns a [`crate::ProviderError`] on transport, status or parse failure
    async fn fetch_page(&self, page: u32, page_size: u32) -> ProviderResult<WorkoutPage>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_envelope() {
        let page = WorkoutPage::from_body(&json!({
            "page": 1,
            "page_count": 3,
            "workouts": [{"id": "a"}, {"id": "b"}]
        }));
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.page_count, 3);

        let camel = WorkoutPage::from_body(&json!({"pageCount": "2", "workouts": []}));
        assert_eq!(camel.page_count, 2);
    }

    #[test]
    fn test_degenerate_envelopes() {
        let empty = WorkoutPage::from_body(&json!({}));
        assert!(empty.items.is_empty());
        assert_eq!(empty.page_count, 1);

        let zero = WorkoutPage::from_body(&json!({"page_count": 0, "workouts": "nope"}));
        assert!(zero.items.is_empty());
        assert_eq!(zero.page_count, 1);
    }
}
