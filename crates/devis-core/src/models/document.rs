//! Quote and invoice document models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use super::client::Client;
use super::intent::DocumentType;
use crate::error::DocumentError;

/// French VAT rates (TVA).
///
/// Deserializes from a string or a number through [`FromStr`], so `20`,
/// `"20"` and `"20 %"` all give [`VatRate::Normal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VatRate {
    /// Normal rate: 20%
    #[serde(rename = "20")]
    Normal,

    /// Intermediate rate: 10%
    #[serde(rename = "10")]
    Intermediate,

    /// Reduced rate: 5.5%
    #[serde(rename = "5.5")]
    Reduced,

    /// Super-reduced rate: 2.1%
    #[serde(rename = "2.1")]
    SuperReduced,

    /// Zero rate (exports, auto-entrepreneur "TVA non applicable").
    #[serde(rename = "0")]
    Zero,

    /// Other/custom rate in percent.
    #[serde(untagged)]
    Other(Decimal),
}

impl VatRate {
    /// Rate in percent (e.g. 5.5).
    pub fn percent(&self) -> Decimal {
        match self {
            VatRate::Normal => Decimal::new(20, 0),
            VatRate::Intermediate => Decimal::new(10, 0),
            VatRate::Reduced => Decimal::new(55, 1),
            VatRate::SuperReduced => Decimal::new(21, 1),
            VatRate::Zero => Decimal::ZERO,
            VatRate::Other(rate) => *rate,
        }
    }

    /// Rate as a multiplier (e.g. 0.055 for 5.5%).
    pub fn as_decimal(&self) -> Decimal {
        self.percent() / Decimal::ONE_HUNDRED
    }

    /// French display, e.g. "5,5 %".
    pub fn display(&self) -> String {
        format!("{} %", self.percent().normalize().to_string().replace('.', ","))
    }
}

impl FromStr for VatRate {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned = s.trim().trim_end_matches('%').trim().replace(',', ".");
        let percent: Decimal = cleaned
            .parse()
            .map_err(|_| DocumentError::UnknownVatRate(s.to_string()))?;

        if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
            return Err(DocumentError::UnknownVatRate(s.to_string()));
        }

        let rate = [
            VatRate::Normal,
            VatRate::Intermediate,
            VatRate::Reduced,
            VatRate::SuperReduced,
            VatRate::Zero,
        ]
        .into_iter()
        .find(|r| r.percent() == percent)
        .unwrap_or(VatRate::Other(percent));

        Ok(rate)
    }
}

impl<'de> Deserialize<'de> for VatRate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct VatRateVisitor;

        impl Visitor<'_> for VatRateVisitor {
            type Value = VatRate;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a VAT rate in percent, as a string or a number")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<VatRate, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<VatRate, E> {
                self.visit_str(&v.to_string())
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<VatRate, E> {
                self.visit_str(&v.to_string())
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<VatRate, E> {
                self.visit_str(&v.to_string())
            }
        }

        deserializer.deserialize_any(VatRateVisitor)
    }
}

impl fmt::Display for VatRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// A single line on a quote or invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product/service description.
    pub description: String,

    /// Quantity.
    pub quantity: Decimal,

    /// Unit of measure (m², h, forfait...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Unit price excluding tax (HT).
    pub unit_price: Decimal,

    /// Applicable VAT rate.
    pub vat_rate: VatRate,

    /// Discount percentage if applicable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<Decimal>,
}

impl LineItem {
    pub fn new(
        description: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
        vat_rate: VatRate,
    ) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit: None,
            unit_price,
            vat_rate,
            discount_percent: None,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_discount(mut self, percent: Decimal) -> Self {
        self.discount_percent = Some(percent);
        self
    }
}

/// Computed amounts for one line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineTotals {
    /// Net amount after discount (HT).
    pub net: Decimal,
    /// VAT amount.
    pub vat: Decimal,
    /// Gross amount (TTC).
    pub gross: Decimal,
}

/// VAT breakdown by rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatBreakdown {
    pub rate: VatRate,
    pub net: Decimal,
    pub vat: Decimal,
    pub gross: Decimal,
}

/// Document totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTotals {
    /// Total excluding tax (HT).
    pub total_net: Decimal,

    /// Total VAT.
    pub total_vat: Decimal,

    /// Total including tax (TTC).
    pub total_gross: Decimal,

    /// Breakdown of VAT by rate, in order of first appearance.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vat_breakdown: Vec<VatBreakdown>,
}

/// A quote or invoice being prepared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentDraft {
    /// Quote or invoice.
    pub kind: DocumentType,

    /// Document number, e.g. "DEV-2024-007".
    pub number: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Snapshot of the client at drafting time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<Client>,

    pub issue_date: NaiveDate,

    /// Last day a quote can be accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<NaiveDate>,

    /// Payment due date for invoices.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    /// Currency code (default: EUR).
    pub currency: String,

    /// VAT rate used for lines added without an explicit rate.
    pub default_vat_rate: VatRate,

    pub line_items: Vec<LineItem>,

    pub totals: DocumentTotals,
}
