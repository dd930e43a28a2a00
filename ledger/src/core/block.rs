use landreg_common::{
    contract::ContractEvent,
    crypto::{Address, Hash, Hasher},
    Value,
};
use serde::{Deserialize, Serialize};

/// Recorded outcome of one transaction
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub tx_id: Hash,
    pub sender: Address,
    pub nonce: u64,
    // Fully qualified contract id
    pub contract: String,
    pub function: String,
    pub result: Value,
    // Empty when the call returned (err ...)
    pub events: Vec<ContractEvent>,
}

impl Receipt {
    /// Whether the call's writes were kept
    pub fn is_committed(&self) -> bool {
        !matches!(self.result, Value::Response(Err(_)))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub height: u64,
    pub hash: Hash,
    pub parent: Hash,
    // Submission order
    pub receipts: Vec<Receipt>,
}

impl Block {
    pub fn new(height: u64, parent: Hash, receipts: Vec<Receipt>) -> Self {
        let hash = Self::compute_hash(height, &parent, &receipts);
        Self {
            height,
            hash,
            parent,
            receipts,
        }
    }

    pub fn compute_hash(height: u64, parent: &Hash, receipts: &[Receipt]) -> Hash {
        let mut hasher = Hasher::new();
        hasher.field(parent.as_bytes()).field(&height.to_le_bytes());
        for receipt in receipts {
            hasher.field(receipt.tx_id.as_bytes());
        }
        hasher.finalize()
    }

    pub fn is_empty(&self) -> bool {
        self.receipts.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
