use axum::{
    extract::{Path, State},
    Json,
};
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::pricing::catalog::{find_item, pricing_catalog, CatalogItem, PricingCatalog};
use crate::pricing::payment::{PaymentDetails, PaymentReceipt, PaymentStatus};
use crate::session::SessionHandle;
use crate::state::AppState;
use crate::store::Notifier;

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub item_id: String,
    pub payment: PaymentDetails,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub receipt: PaymentReceipt,
    pub unlocked: Vec<String>,
    pub is_premium: bool,
    pub status: PaymentStatus,
}

/// GET /api/v1/pricing
pub async fn handle_get_pricing() -> Json<PricingCatalog> {
    Json(pricing_catalog())
}

/// POST /api/v1/sessions/:sid/checkout
///
/// Validates and locks the session's payment form, then hands the payment to a detached
/// task that waits on the processor without holding the session lock and records the
/// unlock. The task runs to completion even if the client goes away mid-payment, so the
/// form never stays stuck in `Processing`. A second submit during the wait gets 409.
pub async fn handle_checkout(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
    Json(req): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, AppError> {
    let item = find_item(&req.item_id)
        .ok_or_else(|| AppError::NotFound(format!("Catalog item {} not found", req.item_id)))?;

    let handle = state.sessions.get(sid).await?;
    let details = {
        let mut session = handle.lock().await;
        match session.payment.begin(&req.payment) {
            Ok(details) => details,
            Err(AppError::Validation(message)) => {
                session.store.error(message.clone());
                return Err(AppError::Validation(message));
            }
            Err(e) => return Err(e),
        }
    };

    let processor = state.payment_processor.clone();
    let payment = tokio::spawn(async move {
        let result = processor.process(&details, item).await;
        settle_checkout(&handle, item, result).await
    });

    let response = payment.await.map_err(|e| {
        AppError::Internal(anyhow!("Checkout task for {} failed: {e}", item.id()))
    })??;
    Ok(Json(response))
}

/// Records the processor's verdict on the session.
async fn settle_checkout(
    handle: &SessionHandle,
    item: CatalogItem,
    result: Result<PaymentReceipt, AppError>,
) -> Result<CheckoutResponse, AppError> {
    let mut session = handle.lock().await;
    let receipt = match result {
        Ok(receipt) => receipt,
        Err(e) => {
            warn!("Payment for {} failed: {e}", item.id());
            session.payment.abort();
            session.store.error("Payment could not be completed");
            return Err(e);
        }
    };

    for id in item.unlocks() {
        session.unlocked.insert(id.to_string());
    }
    session.store.set_premium(true);
    session
        .store
        .success(format!("{} unlocked successfully", item.name()));
    session.payment.complete(receipt.clone());

    Ok(CheckoutResponse {
        receipt,
        unlocked: session.unlocked.iter().cloned().collect(),
        is_premium: session.store.resume_data().is_premium,
        status: session.payment.status(),
    })
}
