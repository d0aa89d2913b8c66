//! Aggregates module
pub mod cart;
pub mod order;
pub mod product;

pub use cart::{Cart, CartError, CartLine, CartLinePatch, CartTotals, Customizations, FruitPick};
pub use order::{
    DeliveryAddress, Order, OrderDetails, OrderError, OrderStatus, PaymentMethod, PaymentStatus,
};
pub use product::{PriceRange, Product, ProductDraft, ProductError};
