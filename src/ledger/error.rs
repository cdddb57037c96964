use thiserror::Error;

/// Failures the ledger core can report. None of these terminates the node;
/// every failed operation leaves the ledger in its last-known-good state.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Malformed transaction or peer fields (empty address, non-finite amount).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Incomplete request payload.
    #[error("missing fields: {0}")]
    MissingFields(String),

    /// A peer could not be reached or answered with a non-success status.
    /// Logged and skipped during chain replacement, never fatal.
    #[error("peer {peer} unreachable: {reason}")]
    PeerUnreachable { peer: String, reason: String },

    /// A fetched candidate chain failed validation and was excluded.
    #[error("chain from peer {0} failed validation")]
    InvalidChain(String),
}
