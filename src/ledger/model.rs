use std::collections::BTreeSet;

use log::{debug, info, warn};
use sha2::{Digest, Sha256};

use super::{Block, DIFFICULTY_PREFIX, LedgerError};
use crate::transaction::Transaction;

/// Single-node proof-of-work ledger: the block chain, the pending
/// transaction pool and the set of known peers.
///
/// One instance per node process, guarded by a single mutex at the API
/// layer; sealing and chain replacement both mutate through `&mut self`
/// and are therefore mutually exclusive.
#[derive(Debug)]
pub struct Ledger {
    pub chain: Vec<Block>,
    pending: Vec<Transaction>,
    peers: BTreeSet<String>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Initialize a ledger with a genesis block.
    pub fn new() -> Self {
        Self {
            chain: vec![Block::genesis()],
            pending: Vec::new(),
            peers: BTreeSet::new(),
        }
    }

    /// The current chain tip.
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("chain always holds at least the genesis block")
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Submission-ordered view of the pending pool.
    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    pub fn peers(&self) -> &BTreeSet<String> {
        &self.peers
    }

    /// Append a transaction to the pending pool, stamped with the current
    /// time. No balance or duplicate checks; only field well-formedness.
    pub fn submit_transaction(
        &mut self,
        sender: &str,
        receiver: &str,
        amount: f64,
    ) -> Result<&Transaction, LedgerError> {
        let sender = sender.trim();
        let receiver = receiver.trim();
        if sender.is_empty() {
            return Err(LedgerError::InvalidInput("sender is empty".into()));
        }
        if receiver.is_empty() {
            return Err(LedgerError::InvalidInput("receiver is empty".into()));
        }
        if !amount.is_finite() {
            return Err(LedgerError::InvalidInput(format!(
                "amount is not a valid number: {amount}"
            )));
        }

        self.pending
            .push(Transaction::new(sender.to_string(), receiver.to_string(), amount));
        debug!(
            "POOL - accepted {sender} -> {receiver} ({amount}); pending size {}",
            self.pending.len()
        );
        Ok(self.pending.last().expect("just pushed"))
    }

    /// Run proof-of-work against the tip, drain the pending pool into a new
    /// block and append it. Sole mutator of the chain tail. CPU-bound and
    /// blocking; callers run it off any request-handling thread.
    pub fn seal_block(&mut self, data: String) -> &Block {
        let tip = self.last_block();
        let index = tip.index + 1;
        let prev_hash = tip.hash.clone();
        let proof = proof_of_work(tip.proof);

        let transactions = std::mem::take(&mut self.pending);
        info!(
            "SEAL - block #{index} (proof={proof}, txs={})",
            transactions.len()
        );

        self.chain
            .push(Block::new(index, proof, prev_hash, data, transactions));
        self.last_block()
    }

    /// Normalize an address to `host:port` and add it to the peer set.
    /// Idempotent.
    pub fn add_peer(&mut self, address: &str) -> Result<(), LedgerError> {
        let host = normalize_peer(address)
            .ok_or_else(|| LedgerError::InvalidInput(format!("bad peer address: {address:?}")))?;
        if self.peers.insert(host.clone()) {
            info!("PEERS - added {host} ({} total)", self.peers.len());
        }
        Ok(())
    }

    /// Longest-chain rule over fetched candidates: adopt the longest
    /// candidate that is strictly longer than the local chain and valid.
    /// Candidates arrive in lexicographic peer order, so equal lengths go to
    /// the first peer seen. Returns false (state untouched) if none qualify.
    ///
    /// The pending pool survives a replacement unchanged; transactions
    /// already sealed into discarded local blocks are lost.
    pub fn adopt_longest(&mut self, candidates: Vec<(String, Vec<Block>)>) -> bool {
        let mut best: Option<(String, Vec<Block>)> = None;
        let mut max_len = self.chain.len();

        for (peer, chain) in candidates {
            if chain.len() <= max_len {
                debug!(
                    "SYNC - peer {peer} chain not longer ({} <= {max_len}), skipping",
                    chain.len()
                );
                continue;
            }
            if !is_valid_chain(&chain) {
                warn!("SYNC - {}", LedgerError::InvalidChain(peer));
                continue;
            }
            max_len = chain.len();
            best = Some((peer, chain));
        }

        match best {
            Some((peer, chain)) => {
                info!(
                    "SYNC - replacing local chain ({} blocks) with peer {peer}'s ({} blocks)",
                    self.chain.len(),
                    chain.len()
                );
                self.chain = chain;
                true
            }
            None => false,
        }
    }
}

/// Search increasing candidates starting at 1 for the first proof that
/// satisfies the difficulty predicate. Deterministic; unbounded CPU loop.
pub fn proof_of_work(prev_proof: u64) -> u64 {
    let mut proof: u64 = 1;
    while !valid_proof(prev_proof, proof) {
        proof += 1;
    }
    proof
}

/// The difficulty predicate: SHA-256 of the decimal rendering of
/// `proof^2 - prev_proof^2` must start with four zero hex characters.
/// Squares are taken in u128, which is exact for every u64, and the
/// difference is rendered from its magnitude with a leading minus sign when
/// the candidate is below the previous proof. Proofs come in off the wire
/// during chain replacement, so the whole u64 range must evaluate without
/// overflow.
pub fn valid_proof(prev_proof: u64, proof: u64) -> bool {
    let new_sq = (proof as u128) * (proof as u128);
    let prev_sq = (prev_proof as u128) * (prev_proof as u128);
    let rendering = if new_sq >= prev_sq {
        (new_sq - prev_sq).to_string()
    } else {
        format!("-{}", prev_sq - new_sq)
    };

    let mut hasher = Sha256::new();
    hasher.update(rendering.as_bytes());
    let digest = hex::encode(hasher.finalize());
    digest.starts_with(DIFFICULTY_PREFIX)
}

/// Walk adjacent pairs and check hash linkage plus the proof predicate.
/// Pure; chains of length 0 or 1 are trivially valid.
pub fn is_valid_chain(chain: &[Block]) -> bool {
    chain
        .windows(2)
        .all(|pair| pair[1].prev_hash == pair[0].hash && valid_proof(pair[0].proof, pair[1].proof))
}

fn normalize_peer(address: &str) -> Option<String> {
    let trimmed = address.trim();
    let rest = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .unwrap_or(trimmed);
    let host = rest.split('/').next().unwrap_or_default();
    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}
