use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A transfer of an amount from a sender to a receiver.
/// Immutable once created; lives in the pending pool until a block seals it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub receiver: String,
    pub amount: f64,
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
}

impl Transaction {
    /// Build a transaction stamped with the current UTC time.
    pub fn new(sender: String, receiver: String, amount: f64) -> Self {
        Self {
            sender,
            receiver,
            amount,
            timestamp: Utc::now().naive_utc(),
        }
    }
}

/// Wire format for transaction timestamps: `"23/08/2026, 14:05:09"`.
pub(crate) mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    const FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

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

#[cfg(test)]
mod tests {
    use super::Transaction;

    #[test]
    fn serializes_timestamp_as_day_first_string() {
        let tx = Transaction::new("alice".into(), "bob".into(), 10.0);
        let value = serde_json::to_value(&tx).expect("serialize tx");

        let ts = value["timestamp"].as_str().expect("timestamp is a string");
        // "dd/mm/YYYY, HH:MM:SS"
        assert_eq!(ts.len(), 20);
        assert_eq!(&ts[2..3], "/");
        assert_eq!(&ts[5..6], "/");
        assert_eq!(&ts[10..12], ", ");
    }

    #[test]
    fn round_trips_through_wire_form() {
        let tx = Transaction::new("alice".into(), "bob".into(), 2.5);
        let json = serde_json::to_string(&tx).expect("serialize tx");
        let back: Transaction = serde_json::from_str(&json).expect("deserialize tx");

        assert_eq!(back.sender, tx.sender);
        assert_eq!(back.receiver, tx.receiver);
        assert_eq!(back.amount, tx.amount);
    }

    #[test]
    fn rejects_missing_fields_on_decode() {
        let err = serde_json::from_str::<Transaction>(r#"{"sender": "alice", "amount": 1.0}"#);
        assert!(err.is_err());
    }
}
