//! Catalog and content handlers

use crate::api::SessionQuery;
use crate::catalog::{self, ColorMood, Flower, Fruit, CATEGORY_ALL};
use crate::content::{CustomerReview, VideoContent};
use crate::domain::aggregates::product::{PriceRange, Product, ProductDraft};
use crate::domain::value_objects::Money;
use crate::error::{Result, StoreError};
use crate::notify;
use crate::state::SharedState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
    pub q: Option<String>,
    #[serde(default)]
    pub express: bool,
}

pub async fn list_products(
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Json<Vec<Product>> {
    let category = params.category.as_deref().unwrap_or(CATEGORY_ALL);
    let products = state
        .active_products(category, params.q.as_deref(), params.express)
        .await;
    Json(products)
}

/// Resolves by slug first (storefront URLs), falling back to id.
pub async fn get_product(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    match state.product_by_slug(&id).await {
        Ok(product) => Ok(Json(product)),
        Err(StoreError::ProductNotFound) => Ok(Json(state.product_by_id(&id).await?)),
        Err(e) => Err(e),
    }
}

pub async fn product_inquiry(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let product = state.product_by_slug(&id).await?;
    let link = notify::product_inquiry_link(&state.config.whatsapp_number, product.title());
    Ok(Json(serde_json::json!({ "whatsapp_link": link })))
}

#[derive(Debug, Deserialize, Validate)]
pub struct ProductRequest {
    pub session: String,
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub price: Decimal,
    pub price_min: Option<Decimal>,
    pub price_max: Option<Decimal>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[validate(length(min = 1))]
    pub category: String,
    #[serde(default)]
    pub is_express: bool,
}

impl ProductRequest {
    fn into_draft(self) -> ProductDraft {
        let price_range = match (self.price_min, self.price_max) {
            (Some(min), Some(max)) => {
                Some(PriceRange { min: Money::myr(min), max: Money::myr(max) })
            }
            _ => None,
        };
        ProductDraft {
            title: self.title,
            slug: self.slug,
            description: self.description,
            images: self.images,
            price: Money::myr(self.price),
            price_range,
            tags: self.tags,
            category: self.category,
            is_express: self.is_express,
        }
    }
}

pub async fn create_product(
    State(state): State<SharedState>,
    Json(req): Json<ProductRequest>,
) -> Result<(StatusCode, Json<Product>)> {
    req.validate()?;
    state.sessions.require_admin(&req.session).await?;
    let product = state.create_product(req.into_draft()).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(req): Json<ProductRequest>,
) -> Result<Json<Product>> {
    req.validate()?;
    state.sessions.require_admin(&req.session).await?;
    let product = state.replace_product(&id, req.into_draft()).await?;
    Ok(Json(product))
}

pub async fn delist_product(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<Product>> {
    state.sessions.require_admin(&query.session).await?;
    Ok(Json(state.delist_product(&id).await?))
}

pub async fn relist_product(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<Product>> {
    state.sessions.require_admin(&query.session).await?;
    Ok(Json(state.relist_product(&id).await?))
}

pub async fn list_color_moods() -> Json<&'static [ColorMood]> {
    Json(catalog::COLOR_MOODS)
}

pub async fn list_flowers() -> Json<&'static [Flower]> {
    Json(catalog::FLOWERS)
}

pub async fn list_fruits() -> Json<&'static [Fruit]> {
    Json(catalog::FRUITS)
}

pub async fn list_occasions() -> Json<&'static [&'static str]> {
    Json(catalog::OCCASIONS)
}

#[derive(Debug, Deserialize)]
pub struct ReviewListParams {
    /// Admins pass `all=true` to see unapproved reviews too.
    #[serde(default)]
    pub all: bool,
    #[serde(default)]
    pub session: String,
}

pub async fn list_reviews(
    State(state): State<SharedState>,
    Query(params): Query<ReviewListParams>,
) -> Result<Json<Vec<CustomerReview>>> {
    if params.all {
        state.sessions.require_admin(&params.session).await?;
    }
    Ok(Json(state.reviews(!params.all).await))
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReviewRequest {
    #[validate(length(min = 1))]
    pub product_id: String,
    #[validate(length(min = 1))]
    pub customer_name: String,
    #[validate(email)]
    pub customer_email: String,
    #[validate(range(min = 1, max = 5))]
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
}

pub async fn create_review(
    State(state): State<SharedState>,
    Json(req): Json<ReviewRequest>,
) -> Result<(StatusCode, Json<CustomerReview>)> {
    req.validate()?;
    // The product must exist, delisted or not.
    state.product_by_id(&req.product_id).await?;
    let review = CustomerReview::new(
        req.product_id,
        req.customer_name,
        req.customer_email,
        req.rating,
        req.comment,
    );
    Ok((StatusCode::CREATED, Json(state.add_review(review).await)))
}

pub async fn approve_review(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<CustomerReview>> {
    state.sessions.require_admin(&query.session).await?;
    Ok(Json(state.approve_review(&id).await?))
}

#[derive(Debug, Deserialize)]
pub struct VideoListParams {
    #[serde(default)]
    pub all: bool,
    #[serde(default)]
    pub session: String,
}

pub async fn list_videos(
    State(state): State<SharedState>,
    Query(params): Query<VideoListParams>,
) -> Result<Json<Vec<VideoContent>>> {
    if params.all {
        state.sessions.require_admin(&params.session).await?;
    }
    Ok(Json(state.videos(!params.all).await))
}

#[derive(Debug, Deserialize, Validate)]
pub struct VideoRequest {
    pub session: String,
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(url)]
    pub video_url: String,
    #[validate(url)]
    pub thumbnail_url: String,
    pub instagram_post_url: Option<String>,
}

pub async fn create_video(
    State(state): State<SharedState>,
    Json(req): Json<VideoRequest>,
) -> Result<(StatusCode, Json<VideoContent>)> {
    req.validate()?;
    state.sessions.require_admin(&req.session).await?;
    let video = VideoContent::new(
        req.title,
        req.description,
        req.video_url,
        req.thumbnail_url,
        req.instagram_post_url,
    );
    Ok((StatusCode::CREATED, Json(state.add_video(video).await)))
}
