//! Product Aggregate

use crate::domain::events::{DomainEvent, ProductEvent};
use crate::domain::value_objects::Money;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog product. Records are immutable after creation: admin edits
/// replace the whole record via [`Product::replace`], and removal is the
/// soft `delist` so products referenced by past orders keep resolving.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Product {
    id: String,
    title: String,
    slug: String,
    description: String,
    images: Vec<String>,
    price: Money,
    price_range: Option<PriceRange>,
    tags: Vec<String>,
    category: String,
    is_express: bool,
    is_delisted: bool,
    #[serde(skip)]
    events: Vec<DomainEvent>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Money,
    pub max: Money,
}

/// Everything an admin supplies when creating or editing a product.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProductDraft {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub images: Vec<String>,
    pub price: Money,
    pub price_range: Option<PriceRange>,
    pub tags: Vec<String>,
    pub category: String,
    pub is_express: bool,
}

impl Product {
    pub fn create(draft: ProductDraft) -> Result<Self, ProductError> {
        Self::with_id(Uuid::new_v4().to_string(), draft)
    }

    /// Seed products carry fixed ids so order history stays stable across
    /// restarts.
    pub fn with_id(id: impl Into<String>, draft: ProductDraft) -> Result<Self, ProductError> {
        if draft.title.trim().is_empty() {
            return Err(ProductError::MissingTitle);
        }
        if draft.slug.trim().is_empty() {
            return Err(ProductError::MissingSlug);
        }
        let id = id.into();
        let mut product = Self {
            id: id.clone(),
            title: draft.title,
            slug: draft.slug.clone(),
            description: draft.description,
            images: draft.images,
            price: draft.price,
            price_range: draft.price_range,
            tags: draft.tags,
            category: draft.category,
            is_express: draft.is_express,
            is_delisted: false,
            events: vec![],
        };
        product.raise_event(DomainEvent::Product(ProductEvent::Created {
            product_id: id,
            slug: draft.slug,
        }));
        Ok(product)
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn title(&self) -> &str { &self.title }
    pub fn slug(&self) -> &str { &self.slug }
    pub fn description(&self) -> &str { &self.description }
    pub fn images(&self) -> &[String] { &self.images }
    pub fn price(&self) -> &Money { &self.price }
    pub fn price_range(&self) -> Option<&PriceRange> { self.price_range.as_ref() }
    pub fn tags(&self) -> &[String] { &self.tags }
    pub fn category(&self) -> &str { &self.category }
    pub fn is_express(&self) -> bool { self.is_express }
    pub fn is_delisted(&self) -> bool { self.is_delisted }

    /// Wholesale replacement of the record; id and delist flag survive.
    pub fn replace(&mut self, draft: ProductDraft) -> Result<(), ProductError> {
        if draft.title.trim().is_empty() {
            return Err(ProductError::MissingTitle);
        }
        if draft.slug.trim().is_empty() {
            return Err(ProductError::MissingSlug);
        }
        self.title = draft.title;
        self.slug = draft.slug;
        self.description = draft.description;
        self.images = draft.images;
        self.price = draft.price;
        self.price_range = draft.price_range;
        self.tags = draft.tags;
        self.category = draft.category;
        self.is_express = draft.is_express;
        self.raise_event(DomainEvent::Product(ProductEvent::Replaced {
            product_id: self.id.clone(),
        }));
        Ok(())
    }

    pub fn delist(&mut self) {
        if self.is_delisted {
            return;
        }
        self.is_delisted = true;
        self.raise_event(DomainEvent::Product(ProductEvent::Delisted {
            product_id: self.id.clone(),
        }));
    }

    pub fn relist(&mut self) {
        if !self.is_delisted {
            return;
        }
        self.is_delisted = false;
        self.raise_event(DomainEvent::Product(ProductEvent::Relisted {
            product_id: self.id.clone(),
        }));
    }

    pub fn take_events(&mut self) -> Vec<DomainEvent> { std::mem::take(&mut self.events) }
    fn raise_event(&mut self, e: DomainEvent) { self.events.push(e); }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProductError {
    #[error("product title is required")]
    MissingTitle,
    #[error("product slug is required")]
    MissingSlug,
}
