//! Receipt
//!
//! Plain-text rendering of a cart for terminal display.

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::Cart,
    pricing::TotalPriceError,
    view::{CartLine, CartSummary},
};

/// Notice shown in place of an empty cart table.
pub const EMPTY_CART_NOTICE: &str = "Your cart is empty.";

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Error calculating line subtotals or the cart total.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// Writes the cart's lines and total.
///
/// # Errors
///
/// Returns an error if the totals cannot be derived or the output cannot be written.
pub fn write_cart(out: impl io::Write, cart: &Cart<'_>) -> Result<(), ReceiptError> {
    write_summary(out, &CartSummary::from_cart(cart)?)
}

/// Writes an already derived cart summary.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_summary(mut out: impl io::Write, summary: &CartSummary<'_>) -> Result<(), ReceiptError> {
    if summary.is_empty() {
        return writeln!(out, "{EMPTY_CART_NOTICE}").map_err(|_err| ReceiptError::IO);
    }

    let mut builder = Builder::default();

    builder.push_record(["", "Item", "Price", "Qty", "Subtotal"]);

    for (idx, line) in summary.lines.iter().enumerate() {
        push_line(&mut builder, idx, line);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..5), Alignment::right());
    table.modify(Rows::first(), Alignment::center());

    writeln!(out, "{table}").map_err(|_err| ReceiptError::IO)?;

    let units_label = if summary.item_count == 1 { "item" } else { "items" };

    writeln!(
        out,
        "Total ({} {units_label}): {}",
        summary.item_count, summary.total
    )
    .map_err(|_err| ReceiptError::IO)
}

fn push_line(builder: &mut Builder, idx: usize, line: &CartLine<'_>) {
    builder.push_record([
        format!("#{:<3}", idx + 1),
        line.name.clone(),
        format!("{}", line.price),
        line.quantity.to_string(),
        format!("{}", line.subtotal),
    ]);
}
