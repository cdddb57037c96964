use actix_web::{HttpResponse, Responder, post, web};
use log::warn;

use super::models::{AppState, ConnectRequest, ConnectResponse};
use crate::ledger::LedgerError;

/// Register peer nodes for chain replacement. Idempotent per address.
#[post("/nodes/")]
pub async fn connect_nodes(
    state: web::Data<AppState>,
    body: web::Json<ConnectRequest>,
) -> impl Responder {
    let Some(nodes) = body.into_inner().nodes else {
        let err = LedgerError::MissingFields("nodes".into());
        warn!("POST /nodes/ - rejected: {err}");
        return HttpResponse::BadRequest().body(err.to_string());
    };

    let mut ledger = state.ledger.lock().expect("mutex poisoned");
    for address in &nodes {
        if let Err(err) = ledger.add_peer(address) {
            warn!("POST /nodes/ - rejected: {err}");
            return HttpResponse::BadRequest().body(err.to_string());
        }
    }

    HttpResponse::Created().json(ConnectResponse {
        total_nodes: ledger.peers().len(),
    })
}
