//! Outbound WhatsApp deep links
//!
//! The shop coordinates payment receipts and product inquiries over
//! WhatsApp. The service only builds `wa.me` links; opening them is the
//! client's job.

use crate::domain::value_objects::OrderNumber;

pub fn whatsapp_link(number: &str, message: &str) -> String {
    format!("https://wa.me/{number}?text={}", urlencoding::encode(message))
}

/// Link the customer uses to send their bank-transfer receipt.
pub fn payment_receipt_link(number: &str, order_number: &OrderNumber) -> String {
    let message = format!(
        "Hi, I've made payment for order {order_number}. Here's my payment receipt:"
    );
    whatsapp_link(number, &message)
}

/// Link for asking about a catalog product.
pub fn product_inquiry_link(number: &str, product_title: &str) -> String {
    let message = format!("Hi! I'm interested in the {product_title}. Could you tell me more?");
    whatsapp_link(number, &message)
}
