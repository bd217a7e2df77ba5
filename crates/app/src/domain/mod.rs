//! Bookstore Domain Concerns

pub mod books;
pub mod carts;
mod entity;
pub mod orders;
pub mod pricing;

pub use entity::Entity;
