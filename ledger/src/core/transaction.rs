use landreg_common::{
    crypto::{Address, Hash, Hasher},
    Value,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransactionPayload {
    ContractCall {
        // Bare name (resolved against deployed contracts) or `<issuer>.<name>`
        contract: String,
        function: String,
        args: Vec<Value>,
    },
}

/// A signed request; the chain assigns the nonce when it is included
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: Address,
    pub payload: TransactionPayload,
}

impl Transaction {
    pub fn contract_call(
        contract: impl Into<String>,
        function: impl Into<String>,
        args: Vec<Value>,
        sender: &Address,
    ) -> Self {
        Self {
            sender: *sender,
            payload: TransactionPayload::ContractCall {
                contract: contract.into(),
                function: function.into(),
                args,
            },
        }
    }

    pub fn hash(&self, nonce: u64) -> Hash {
        let mut hasher = Hasher::new();
        hasher
            .field(self.sender.to_string().as_bytes())
            .field(&nonce.to_le_bytes());

        match &self.payload {
            TransactionPayload::ContractCall {
                contract,
                function,
                args,
            } => {
                hasher
                    .field(b"contract_call")
                    .field(contract.as_bytes())
                    .field(function.as_bytes());
                for arg in args {
                    hasher.field(arg.to_string().as_bytes());
                }
            }
        }

        hasher.finalize()
    }
}
