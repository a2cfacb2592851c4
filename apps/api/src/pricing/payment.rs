//! Payment Form: a stand-in checkout.
//!
//! Fields are formatted cosmetically and checked for presence only: no Luhn check, no
//! expiry-date arithmetic, no gateway. `SimulatedProcessor` waits a fixed delay and then
//! always succeeds.
//!
//! `AppState` holds an `Arc<dyn PaymentProcessor>` so a real gateway could be swapped in.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::pricing::catalog::CatalogItem;

const CARD_DIGITS: usize = 16;
const EXPIRY_DIGITS: usize = 4;
const CVV_DIGITS: usize = 4;

// ────────────────────────────────────────────────────────────────────────────
// Form fields and formatting
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PaymentDetails {
    pub card_number: String,
    pub expiry: String,
    pub cvv: String,
    pub name: String,
    pub email: String,
    pub billing_address: String,
    pub city: String,
    pub zip: String,
}

fn digits(input: &str, max: usize) -> String {
    input.chars().filter(char::is_ascii_digit).take(max).collect()
}

/// "4111111111111111" → "4111 1111 1111 1111". Non-digits are dropped, extra digits cut.
pub fn format_card_number(input: &str) -> String {
    let digits = digits(input, CARD_DIGITS);
    digits
        .as_bytes()
        .chunks(4)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// "1228" → "12/28". The slash appears as soon as two digits are present.
pub fn format_expiry(input: &str) -> String {
    let digits = digits(input, EXPIRY_DIGITS);
    if digits.len() >= 2 {
        format!("{}/{}", &digits[..2], &digits[2..])
    } else {
        digits
    }
}

pub fn format_cvv(input: &str) -> String {
    digits(input, CVV_DIGITS)
}

impl PaymentDetails {
    /// Applies the cosmetic formatting and trims the free-text fields.
    pub fn formatted(&self) -> Self {
        Self {
            card_number: format_card_number(&self.card_number),
            expiry: format_expiry(&self.expiry),
            cvv: format_cvv(&self.cvv),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            billing_address: self.billing_address.trim().to_string(),
            city: self.city.trim().to_string(),
            zip: self.zip.trim().to_string(),
        }
    }

    /// Every field is required; the first blank one is reported.
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("card number", &self.card_number),
            ("expiry date", &self.expiry),
            ("CVV", &self.cvv),
            ("cardholder name", &self.name),
            ("email", &self.email),
            ("billing address", &self.billing_address),
            ("city", &self.city),
            ("ZIP code", &self.zip),
        ];
        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((label, _)) => Err(format!("Please enter the {label}")),
            None => Ok(()),
        }
    }

    pub fn card_last4(&self) -> String {
        let digits: Vec<char> = self.card_number.chars().filter(char::is_ascii_digit).collect();
        digits[digits.len().saturating_sub(4)..].iter().collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Processor
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentReceipt {
    pub receipt_id: Uuid,
    pub item_id: String,
    pub amount_cents: u32,
    pub card_last4: String,
    pub processed_at: DateTime<Utc>,
}

#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    async fn process(
        &self,
        details: &PaymentDetails,
        item: CatalogItem,
    ) -> Result<PaymentReceipt, AppError>;
}

/// Sleeps for `delay`, then succeeds. There is no failure branch.
pub struct SimulatedProcessor {
    delay: Duration,
}

impl SimulatedProcessor {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl PaymentProcessor for SimulatedProcessor {
    async fn process(
        &self,
        details: &PaymentDetails,
        item: CatalogItem,
    ) -> Result<PaymentReceipt, AppError> {
        debug!("Simulating payment for {} ({:?} delay)", item.id(), self.delay);
        tokio::time::sleep(self.delay).await;

        let receipt = PaymentReceipt {
            receipt_id: Uuid::new_v4(),
            item_id: item.id().to_string(),
            amount_cents: item.price_cents(),
            card_last4: details.card_last4(),
            processed_at: Utc::now(),
        };
        info!(
            "Payment {} accepted for {} ({} cents)",
            receipt.receipt_id, receipt.item_id, receipt.amount_cents
        );
        Ok(receipt)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Form state
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Ready,
    Processing,
    Succeeded,
}

/// Per-session checkout state. While `Processing`, further submits are refused.
#[derive(Debug, Clone)]
pub struct PaymentForm {
    status: PaymentStatus,
    last_receipt: Option<PaymentReceipt>,
}

impl Default for PaymentForm {
    fn default() -> Self {
        Self {
            status: PaymentStatus::Ready,
            last_receipt: None,
        }
    }
}

impl PaymentForm {
    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    pub fn last_receipt(&self) -> Option<&PaymentReceipt> {
        self.last_receipt.as_ref()
    }

    /// Formats and validates the submission, then enters `Processing`.
    pub fn begin(&mut self, raw: &PaymentDetails) -> Result<PaymentDetails, AppError> {
        if self.status == PaymentStatus::Processing {
            return Err(AppError::Conflict(
                "A payment is already being processed".to_string(),
            ));
        }
        let details = raw.formatted();
        details.validate().map_err(AppError::Validation)?;
        self.status = PaymentStatus::Processing;
        Ok(details)
    }

    pub fn complete(&mut self, receipt: PaymentReceipt) {
        self.status = PaymentStatus::Succeeded;
        self.last_receipt = Some(receipt);
    }

    /// Re-enables the form after a processor error.
    pub fn abort(&mut self) {
        self.status = PaymentStatus::Ready;
    }
}
