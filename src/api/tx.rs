use actix_web::{HttpResponse, Responder, get, post, web};
use log::warn;

use super::models::{
    AppState, NewTransactionRequest, PendingResponse, TransactionAcceptedResponse,
};
use crate::ledger::LedgerError;

/// Submit a transaction into the pending pool.
#[post("/transactions/")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTransactionRequest>,
) -> impl Responder {
    let body = body.into_inner();

    let (sender, receiver, amount) = match (body.sender, body.receiver, body.amount) {
        (Some(s), Some(r), Some(a)) => (s, r, a),
        (s, r, a) => {
            let mut missing = Vec::new();
            if s.is_none() {
                missing.push("sender");
            }
            if r.is_none() {
                missing.push("receiver");
            }
            if a.is_none() {
                missing.push("amount");
            }
            let err = LedgerError::MissingFields(missing.join(", "));
            warn!("POST /transactions/ - rejected: {err}");
            return HttpResponse::BadRequest().body(err.to_string());
        }
    };

    let mut ledger = state.ledger.lock().expect("mutex poisoned");
    if let Err(err) = ledger.submit_transaction(&sender, &receiver, amount) {
        warn!("POST /transactions/ - rejected: {err}");
        return HttpResponse::BadRequest().body(err.to_string());
    }

    HttpResponse::Created().json(TransactionAcceptedResponse {
        message: "Transaction added to the pending pool".into(),
        pending: ledger.pending().len(),
    })
}

/// Inspect the pending pool (transactions not yet sealed into a block).
#[get("/transactions/pending/")]
pub async fn get_pending(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(PendingResponse {
        size: ledger.pending().len(),
        transactions: ledger.pending(),
    })
}
