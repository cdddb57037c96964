use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ledger::{Block, Ledger};
use crate::network::PeerClient;
use crate::transaction::Transaction;

/// Shared application state: the in-memory ledger behind a single mutex and
/// the HTTP client used for peer synchronization.
pub struct AppState {
    pub ledger: Mutex<Ledger>,
    pub peer_client: PeerClient,
}

impl AppState {
    pub fn new(peer_timeout: Duration) -> Self {
        Self {
            ledger: Mutex::new(Ledger::new()),
            peer_client: PeerClient::new(peer_timeout),
        }
    }
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ChainResponse<'a> {
    pub chain: &'a [Block],
    pub length: usize,
    pub nodes: Vec<&'a str>,
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
}

#[derive(Deserialize)]
pub struct MineRequest {
    pub data: Option<String>,
}

#[derive(Serialize)]
pub struct ResolveResponse {
    pub replaced: bool,
}

/* ---------- Transaction API Models ---------- */

#[derive(Deserialize)]
pub struct NewTransactionRequest {
    pub sender: Option<String>,
    pub receiver: Option<String>,
    pub amount: Option<f64>,
}

#[derive(Serialize)]
pub struct TransactionAcceptedResponse {
    pub message: String,
    pub pending: usize,
}

#[derive(Serialize)]
pub struct PendingResponse<'a> {
    pub size: usize,
    pub transactions: &'a [Transaction],
}

/* ---------- Node API Models ---------- */

#[derive(Deserialize)]
pub struct ConnectRequest {
    pub nodes: Option<Vec<String>>,
}

#[derive(Serialize)]
pub struct ConnectResponse {
    pub total_nodes: usize,
}
