//! Admin-managed storefront content
//!
//! Customer reviews and video reels, held in memory like the rest of the
//! dashboard's mock collections. Reviews start unapproved and only show on
//! the storefront once an admin approves them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CustomerReview {
    pub id: String,
    pub product_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub is_approved: bool,
}

impl CustomerReview {
    pub fn new(
        product_id: String,
        customer_name: String,
        customer_email: String,
        rating: u8,
        comment: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            product_id,
            customer_name,
            customer_email,
            rating: rating.min(5),
            comment,
            created_at: Utc::now(),
            is_approved: false,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VideoContent {
    pub id: String,
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub thumbnail_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram_post_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

impl VideoContent {
    pub fn new(
        title: String,
        description: String,
        video_url: String,
        thumbnail_url: String,
        instagram_post_url: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            description,
            video_url,
            thumbnail_url,
            instagram_post_url,
            created_at: Utc::now(),
            is_active: true,
        }
    }
}
