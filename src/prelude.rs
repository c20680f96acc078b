//! Trolley prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError},
    catalog::{Catalog, CatalogError, Product, ProductKey},
    fixtures::{Fixture, FixtureError},
    items::LineItem,
    pricing::{ParsePriceError, TotalPriceError, parse_cost, subtotal, total},
    receipt::{ReceiptError, write_cart},
    view::{
        CartLine, CartSummary, CartView, ContinueShopping, Gesture, GestureParseError,
        NoopNavigator, Outcome,
    },
};
