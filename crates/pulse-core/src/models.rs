//! REST DTOs matching the InventoryPulse API wire format.
//!
//! Field names are snake_case on the wire; timestamps are RFC 3339.
//! Response types mirror what the server sends, request types mirror what
//! it binds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Auth
// ─────────────────────────────────────────────────────────────────────────────

/// Access/refresh token pair returned by login and refresh.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived bearer token.
    pub access_token: String,
    /// Long-lived token used to obtain a new pair.
    pub refresh_token: String,
    /// Unix timestamp at which the access token expires.
    pub expires_at: i64,
    /// Always `"Bearer"`.
    pub token_type: String,
}

/// An authenticated user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned id.
    pub id: u64,
    /// Login email.
    pub email: String,
    /// Either `"admin"` or `"viewer"`.
    pub role: String,
}

impl User {
    /// Whether this user has the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// Login request body.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Registration request body.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Either `"admin"` or `"viewer"`.
    pub role: String,
}

/// Token refresh request body.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// The refresh token from the previous pair.
    pub refresh_token: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Catalog
// ─────────────────────────────────────────────────────────────────────────────

/// A product category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Server-assigned id.
    pub id: u64,
    /// Unique display name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// A stocked product.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Server-assigned id.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Unique stock-keeping unit code.
    pub sku: String,
    /// Units currently in stock.
    pub quantity: i64,
    /// Unit price.
    pub price: f64,
    /// Owning category id.
    pub category_id: u64,
    /// Owning category, when the server expands it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a product.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NewProduct {
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Unique stock-keeping unit code.
    pub sku: String,
    /// Initial stock quantity.
    pub quantity: i64,
    /// Unit price.
    pub price: f64,
    /// Owning category id.
    pub category_id: u64,
}

/// Request body for creating a category.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NewCategory {
    /// Unique display name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Pagination and errors
// ─────────────────────────────────────────────────────────────────────────────

/// One page of a paginated listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page.
    pub data: Vec<T>,
    /// 1-based page number.
    pub page: u32,
    /// Requested page size.
    pub page_size: u32,
    /// Total matching items across all pages.
    pub total_items: u64,
    /// Total page count.
    pub total_pages: u32,
}

/// The server's standard error body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Short machine-oriented error string.
    pub error: String,
    /// Optional human-readable detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
