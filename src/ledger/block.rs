use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::{GENESIS_DATA, GENESIS_PREV_HASH, GENESIS_PROOF};
use crate::transaction::Transaction;

/// A sealed unit of the chain: an ordered list of transactions, a
/// proof-of-work value and a link to the previous block's hash.
/// Append-only; never mutated once pushed onto the chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub proof: u64,
    pub hash: String,
    pub prev_hash: String,
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    pub data: String,
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Create the genesis block (index 0, sentinel prev_hash).
    pub fn genesis() -> Self {
        Self::new(
            0,
            GENESIS_PROOF,
            GENESIS_PREV_HASH.to_string(),
            GENESIS_DATA.to_string(),
            Vec::new(),
        )
    }

    /// Seal a block: the content hash is computed here and cached.
    pub fn new(
        index: u64,
        proof: u64,
        prev_hash: String,
        data: String,
        transactions: Vec<Transaction>,
    ) -> Self {
        let hash = compute_hash(index, proof, &prev_hash, &data);
        Self {
            index,
            proof,
            hash,
            prev_hash,
            timestamp: Utc::now().naive_utc(),
            data,
            transactions,
        }
    }
}

/// SHA-256 over the concatenation of index, proof, prev_hash and data.
/// Transactions are deliberately NOT part of the preimage: two blocks with
/// the same header fields but different transaction lists hash identically.
/// Kept for wire compatibility with existing chains.
pub fn compute_hash(index: u64, proof: u64, prev_hash: &str, data: &str) -> String {
    let preimage = format!("{index}{proof}{prev_hash}{data}");
    let mut hasher = Sha256::new();
    hasher.update(preimage.as_bytes());
    hex::encode(hasher.finalize())
}

/// Wire format for block timestamps: `"2026-08-23 14:05:09.123456"`.
pub(crate) mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

    pub fn serialize<S>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&ts.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT).map_err(de::Error::custom)
    }
}
