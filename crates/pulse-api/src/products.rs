//! Product endpoints.

use pulse_core::models::{NewProduct, Page, Product};

use crate::client::ApiClient;
use crate::errors::ApiError;

impl ApiClient {
    /// One page of products, optionally filtered by category.
    pub async fn list_products(
        &self,
        page: u32,
        page_size: u32,
        category_id: Option<u64>,
    ) -> Result<Page<Product>, ApiError> {
        let mut endpoint = format!("/products?page={page}&page_size={page_size}");
        if let Some(id) = category_id {
            endpoint.push_str(&format!("&category_id={id}"));
        }
        self.get_json(&endpoint).await
    }

    /// One product by id.
    pub async fn get_product(&self, id: u64) -> Result<Product, ApiError> {
        self.get_json(&format!("/products/{id}")).await
    }

    /// Create a product (admin only).
    pub async fn create_product(&self, product: &NewProduct) -> Result<Product, ApiError> {
        self.post_json("/products", product).await
    }

    /// Replace a product's fields (admin only).
    pub async fn update_product(
        &self,
        id: u64,
        product: &NewProduct,
    ) -> Result<Product, ApiError> {
        self.put_json(&format!("/products/{id}"), product).await
    }

    /// Set a product's stock quantity (admin only).
    pub async fn update_stock(&self, id: u64, quantity: i64) -> Result<Product, ApiError> {
        self.patch_json(
            &format!("/products/{id}/stock"),
            &serde_json::json!({ "quantity": quantity }),
        )
        .await
    }

    /// Delete a product (admin only).
    pub async fn delete_product(&self, id: u64) -> Result<(), ApiError> {
        self.delete(&format!("/products/{id}")).await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
