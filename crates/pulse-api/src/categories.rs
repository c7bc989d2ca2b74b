//! Category endpoints.

use pulse_core::models::{Category, NewCategory, Page};

use crate::client::ApiClient;
use crate::errors::ApiError;

impl ApiClient {
    /// One page of categories.
    pub async fn list_categories(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<Page<Category>, ApiError> {
        self.get_json(&format!("/categories?page={page}&page_size={page_size}"))
            .await
    }

    /// One category by id.
    pub async fn get_category(&self, id: u64) -> Result<Category, ApiError> {
        self.get_json(&format!("/categories/{id}")).await
    }

    /// Create a category (admin only).
    pub async fn create_category(&self, category: &NewCategory) -> Result<Category, ApiError> {
        self.post_json("/categories", category).await
    }

    /// Replace a category's fields (admin only).
    pub async fn update_category(
        &self,
        id: u64,
        category: &NewCategory,
    ) -> Result<Category, ApiError> {
        self.put_json(&format!("/categories/{id}"), category).await
    }

    /// Delete a category (admin only).
    pub async fn delete_category(&self, id: u64) -> Result<(), ApiError> {
        self.delete(&format!("/categories/{id}")).await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
