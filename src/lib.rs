//! Trolley
//!
//! Trolley models the state behind a storefront's shopping cart view: the lines in the cart,
//! the prices parsed from catalog display strings, and the gestures a shopper makes on the
//! cart (change a quantity, remove a line, continue shopping, check out).

pub mod cart;
pub mod catalog;
pub mod fixtures;
pub mod items;
pub mod prelude;
pub mod pricing;
pub mod receipt;
pub mod view;
