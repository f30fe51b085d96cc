//! Line and document totals.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::DocumentError;
use crate::models::document::{DocumentTotals, LineItem, LineTotals, VatBreakdown};

fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Compute net, VAT and gross for one line. `index` is 1-based and only used
/// in error messages.
pub fn compute_line(index: usize, item: &LineItem) -> Result<LineTotals, DocumentError> {
    if item.quantity < Decimal::ZERO {
        return Err(DocumentError::InvalidQuantity {
            line: index,
            value: item.quantity.to_string(),
        });
    }
    if item.unit_price < Decimal::ZERO {
        return Err(DocumentError::InvalidPrice {
            line: index,
            value: item.unit_price.to_string(),
        });
    }

    let discount = item.discount_percent.unwrap_or(Decimal::ZERO);
    if discount < Decimal::ZERO || discount > Decimal::ONE_HUNDRED {
        return Err(DocumentError::InvalidDiscount {
            line: index,
            value: discount.to_string(),
        });
    }

    let overflow = || DocumentError::AmountOverflow { line: index };

    let remaining = (Decimal::ONE_HUNDRED - discount) / Decimal::ONE_HUNDRED;
    let net = item
        .quantity
        .checked_mul(item.unit_price)
        .and_then(|amount| amount.checked_mul(remaining))
        .map(round_cents)
        .ok_or_else(overflow)?;
    let vat = net
        .checked_mul(item.vat_rate.as_decimal())
        .map(round_cents)
        .ok_or_else(overflow)?;
    let gross = net.checked_add(vat).ok_or_else(overflow)?;

    Ok(LineTotals { net, vat, gross })
}

fn add_line_totals(into: &mut LineTotals, line: &LineTotals, index: usize) -> Result<(), DocumentError> {
    let overflow = || DocumentError::AmountOverflow { line: index };
    into.net = into.net.checked_add(line.net).ok_or_else(overflow)?;
    into.vat = into.vat.checked_add(line.vat).ok_or_else(overflow)?;
    into.gross = into.gross.checked_add(line.gross).ok_or_else(overflow)?;
    Ok(())
}

/// Compute document totals with a per-rate breakdown.
pub fn compute_totals(items: &[LineItem]) -> Result<DocumentTotals, DocumentError> {
    let mut sum = LineTotals::default();
    let mut vat_breakdown: Vec<VatBreakdown> = Vec::new();

    for (i, item) in items.iter().enumerate() {
        let index = i + 1;
        let line = compute_line(index, item)?;
        add_line_totals(&mut sum, &line, index)?;

        match vat_breakdown.iter_mut().find(|b| b.rate == item.vat_rate) {
            Some(bucket) => {
                let mut bucket_sum = LineTotals {
                    net: bucket.net,
                    vat: bucket.vat,
                    gross: bucket.gross,
                };
                add_line_totals(&mut bucket_sum, &line, index)?;
                bucket.net = bucket_sum.net;
                bucket.vat = bucket_sum.vat;
                bucket.gross = bucket_sum.gross;
            }
            None => vat_breakdown.push(VatBreakdown {
                rate: item.vat_rate,
                net: line.net,
                vat: line.vat,
                gross: line.gross,
            }),
        }
    }

    Ok(DocumentTotals {
        total_net: sum.net,
        total_vat: sum.vat,
        total_gross: sum.gross,
        vat_breakdown,
    })
}
