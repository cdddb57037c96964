use std::collections::BTreeSet;
use std::time::Duration;

use futures_util::future::join_all;
use log::{debug, warn};
use serde::Deserialize;

use crate::ledger::{Block, LedgerError};

/// The `/chain/` payload as served by a peer node.
#[derive(Debug, Deserialize)]
pub struct RemoteLedger {
    pub chain: Vec<Block>,
    pub length: usize,
}

/// HTTP client for pulling peer chains during longest-chain replacement.
/// Every request is bounded by the timeout given at construction, so a hung
/// peer cannot stall a replacement round.
#[derive(Clone)]
pub struct PeerClient {
    http: reqwest::Client,
}

impl PeerClient {
    pub fn new(timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("build http client");
        Self { http }
    }

    /// Fetch every peer's chain concurrently. Unreachable peers, non-success
    /// statuses, undecodable payloads and length mismatches are logged and
    /// skipped; partial failure is expected. Results come back in the peer
    /// set's lexicographic order.
    pub async fn fetch_chains(&self, peers: &BTreeSet<String>) -> Vec<(String, Vec<Block>)> {
        let fetches = peers.iter().map(|peer| {
            let peer = peer.clone();
            async move {
                match self.fetch_one(&peer).await {
                    Ok(chain) => Some((peer, chain)),
                    Err(err) => {
                        warn!("SYNC - {err}");
                        None
                    }
                }
            }
        });

        join_all(fetches).await.into_iter().flatten().collect()
    }

    async fn fetch_one(&self, peer: &str) -> Result<Vec<Block>, LedgerError> {
        let url = format!("http://{peer}/api/v1/chain/");
        let unreachable = |reason: String| LedgerError::PeerUnreachable {
            peer: peer.to_string(),
            reason,
        };

        let remote = self
            .http
            .get(&url)
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| unreachable(e.to_string()))?
            .json::<RemoteLedger>()
            .await
            .map_err(|e| unreachable(format!("bad chain payload: {e}")))?;

        if remote.length != remote.chain.len() {
            return Err(unreachable(format!(
                "reported length {} does not match chain of {} blocks",
                remote.length,
                remote.chain.len()
            )));
        }

        debug!("SYNC - fetched {} blocks from {peer}", remote.chain.len());
        Ok(remote.chain)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::time::Duration;

    use super::{PeerClient, RemoteLedger};

    #[test]
    fn decodes_a_peer_chain_payload() {
        let json = r#"{
            "chain": [{
                "index": 0,
                "proof": 1,
                "hash": "9e1b...",
                "prev_hash": "0",
                "timestamp": "2026-08-23 14:05:09.123456",
                "data": "Genesis Block",
                "transactions": []
            }],
            "length": 1,
            "nodes": ["127.0.0.1:5011"]
        }"#;

        let remote: RemoteLedger = serde_json::from_str(json).expect("decode payload");
        assert_eq!(remote.length, 1);
        assert_eq!(remote.chain.len(), 1);
        assert_eq!(remote.chain[0].data, "Genesis Block");
    }

    #[test]
    fn rejects_payload_without_chain() {
        assert!(serde_json::from_str::<RemoteLedger>(r#"{"length": 3}"#).is_err());
    }

    #[actix_web::test]
    async fn skips_unreachable_peers() {
        let client = PeerClient::new(Duration::from_millis(200));
        // Port 1 refuses connections; the fetch must skip the peer and
        // report no candidates rather than fail the round.
        let peers: BTreeSet<String> = ["127.0.0.1:1".to_string()].into();
        assert!(client.fetch_chains(&peers).await.is_empty());
    }
}
