pub mod block;
pub mod error;
pub mod model;

pub use block::Block;
pub use error::LedgerError;
pub use model::{Ledger, is_valid_chain, proof_of_work, valid_proof};

/// Required hex prefix on the proof digest (16 leading zero bits).
pub const DIFFICULTY_PREFIX: &str = "0000";

/// Sentinel `prev_hash` of the genesis block.
pub const GENESIS_PREV_HASH: &str = "0";

/// Proof carried by the genesis block (not mined).
pub const GENESIS_PROOF: u64 = 1;

/// Payload of the genesis block.
pub const GENESIS_DATA: &str = "Genesis Block";
