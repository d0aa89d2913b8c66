//! Fruitbasket Storefront
//!
//! Backend for a Malaysian fruit-and-flower gift shop.
//!
//! ## Features
//! - Product catalog with categories, search and express filter
//! - Per-session carts with free delivery over RM150
//! - Multi-step checkout producing bank-transfer orders
//! - Custom arrangement wizard with live cost estimates
//! - Order lifecycle managed by an admin
//! - WhatsApp deep links for receipts and inquiries

pub mod api;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod content;
pub mod domain;
pub mod error;
pub mod notify;
pub mod repo;
pub mod session;
pub mod state;
pub mod storage;
pub mod wizard;
