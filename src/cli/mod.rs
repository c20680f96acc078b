//! Trolley command line
//!
//! Replays a sequence of catalog additions and cart gestures against a fixture cart.

use std::{fmt, io, str::FromStr};

use tracing::{info, warn};
use trolley::{
    cart::Cart,
    catalog::Catalog,
    view::{CartView, Gesture, GestureParseError, Outcome},
};

pub mod config;
pub mod logging;

/// Notice printed when the shopper asks to check out.
pub const CHECKOUT_NOTICE: &str = "Checkout is not available yet.";

/// One step replayed against the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Add one unit of the catalog product with this key.
    Add(String),

    /// Apply a cart view gesture.
    Gesture(Gesture),
}

impl FromStr for Step {
    type Err = GestureParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((verb, key)) if verb.trim() == "add" => {
                let key = key.trim();

                if key.is_empty() {
                    return Err(GestureParseError::MissingName("add".to_string()));
                }

                Ok(Step::Add(key.to_string()))
            }
            _ => s.parse().map(Step::Gesture),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Add(key) => write!(f, "add:{key}"),
            Step::Gesture(gesture) => gesture.fmt(f),
        }
    }
}

/// Replay `steps` in order, writing shopper-facing notices to `out`.
///
/// Gestures naming a line that is not in the cart are logged and skipped.
///
/// # Errors
///
/// Returns an error if a product key is unknown, a quantity overflows, or `out` cannot be
/// written.
pub fn replay<'a>(
    catalog: &Catalog<'a>,
    cart: &mut Cart<'a>,
    steps: &[Step],
    mut out: impl io::Write,
) -> anyhow::Result<()> {
    for step in steps {
        match step {
            Step::Add(key) => {
                let quantity = catalog.add_to_cart(cart, key)?;

                info!(%step, %quantity, "added product to cart");
            }
            Step::Gesture(gesture) => {
                let outcome = CartView::with_navigator(&mut *cart, back_to_products)
                    .dispatch(gesture)?;

                match outcome {
                    Outcome::Updated { name, quantity } => {
                        info!(%step, %name, %quantity, "updated cart line");
                    }
                    Outcome::Removed { name } => info!(%step, %name, "removed cart line"),
                    Outcome::Unchanged => warn!(%step, "no cart line with that name"),
                    Outcome::Navigated => {}
                    Outcome::NotImplemented => writeln!(out, "{CHECKOUT_NOTICE}")?,
                }
            }
        }
    }

    Ok(())
}

fn back_to_products() {
    info!("returning to product listing");
}
