use actix_web::{HttpResponse, Responder, get, post, web};
use log::info;

use super::models::{AppState, ChainResponse, MineRequest, ResolveResponse, ValidateResponse};
use crate::ledger::{LedgerError, is_valid_chain};

/// Full ledger state: the chain, its length and the known peers.
/// This is also the payload peers consume during chain replacement.
#[get("/chain/")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    let resp = ChainResponse {
        chain: &ledger.chain,
        length: ledger.len(),
        nodes: ledger.peers().iter().map(String::as_str).collect(),
    };
    HttpResponse::Ok().json(resp)
}

/// Validate the local chain's linkage and proofs.
#[get("/validate/")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    let resp = ValidateResponse {
        valid: is_valid_chain(&ledger.chain),
        length: ledger.len(),
    };
    HttpResponse::Ok().json(resp)
}

/// Seal a new block: run proof-of-work against the tip and drain the
/// pending pool into the block. The search is CPU-bound, so it runs on the
/// blocking pool; the ledger mutex is held for the whole seal, keeping it
/// mutually exclusive with chain replacement.
#[post("/mine/")]
pub async fn mine_block(
    state: web::Data<AppState>,
    body: web::Json<MineRequest>,
) -> actix_web::Result<impl Responder> {
    let Some(data) = body.into_inner().data else {
        return Ok(HttpResponse::BadRequest()
            .body(LedgerError::MissingFields("data".into()).to_string()));
    };

    let sealed = web::block(move || {
        let mut ledger = state.ledger.lock().expect("mutex poisoned");
        ledger.seal_block(data).clone()
    })
    .await?;

    info!(
        "MINER - sealed block #{} (proof={}, hash={})",
        sealed.index, sealed.proof, sealed.hash
    );
    Ok(HttpResponse::Ok().json(sealed))
}

/// Longest-chain consensus round: pull every peer's chain and adopt the
/// longest valid one that beats the local length.
#[get("/resolve/")]
pub async fn resolve_chain(state: web::Data<AppState>) -> actix_web::Result<impl Responder> {
    let peers = {
        let ledger = state.ledger.lock().expect("mutex poisoned");
        ledger.peers().clone()
    };

    if peers.is_empty() {
        return Ok(HttpResponse::Ok().json(ResolveResponse { replaced: false }));
    }

    let candidates = state.peer_client.fetch_chains(&peers).await;
    info!(
        "SYNC - {} of {} peers answered",
        candidates.len(),
        peers.len()
    );

    let replaced = web::block(move || {
        let mut ledger = state.ledger.lock().expect("mutex poisoned");
        ledger.adopt_longest(candidates)
    })
    .await?;

    Ok(HttpResponse::Ok().json(ResolveResponse { replaced }))
}
