/// Transaction types for pebblechain
use crate::crypto::{Address, KeyPair};
use crate::error::ChainError;
use chrono::Utc;
use serde_big_array::BigArray;
use sha2::{Digest, Sha256};

/// A transaction that can occur in a block
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub enum Transaction {
    Transfer(TransferTx),
    Reward(RewardTx),
}

impl Transaction {
    pub fn hash_str(&self) -> String {
        hex::encode(self.hash())
    }

    /// Calculate the content hash of this transaction.
    /// Signatures are excluded, so signing never changes the digest.
    pub fn hash(&self) -> [u8; 32] {
        match self {
            Transaction::Transfer(tx) => tx.hash(),
            Transaction::Reward(tx) => tx.hash(),
        }
    }

    /// The account debited by this transaction, if any.
    /// Rewards mint new value and have no sender.
    pub fn sender(&self) -> Option<&Address> {
        match self {
            Transaction::Transfer(tx) => Some(&tx.sender),
            Transaction::Reward(_) => None,
        }
    }

    /// The account credited by this transaction.
    pub fn recipient(&self) -> &Address {
        match self {
            Transaction::Transfer(tx) => &tx.recipient,
            Transaction::Reward(tx) => &tx.recipient,
        }
    }

    pub fn amount(&self) -> u64 {
        match self {
            Transaction::Transfer(tx) => tx.amount,
            Transaction::Reward(tx) => tx.amount,
        }
    }

    /// Signs the transaction in place with the given keypair.
    /// Rewards are minted by the chain itself and cannot be signed.
    pub fn sign(&mut self, keypair: &KeyPair) -> Result<(), ChainError> {
        match self {
            Transaction::Transfer(tx) => tx.sign(keypair),
            Transaction::Reward(_) => Err(ChainError::InvalidTransaction(
                "Reward transactions are minted by the chain and cannot be signed".to_string(),
            )),
        }
    }
}

/// Transfer transaction - moves value from a sender account to a recipient
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TransferTx {
    #[serde(with = "BigArray")]
    pub sender: Address,
    #[serde(with = "BigArray")]
    pub recipient: Address,
    pub amount: u64,
    /// Creation time in milliseconds since the Unix epoch
    pub created_at: u64,
    #[serde(default, with = "serde_bytes")]
    pub signature: Option<Vec<u8>>,
}

impl TransferTx {
    pub fn new(sender: Address, recipient: Address, amount: u64) -> Self {
        TransferTx {
            sender,
            recipient,
            amount,
            created_at: Utc::now().timestamp_millis() as u64,
            signature: None,
        }
    }

    /// Content digest over every field except the signature itself.
    pub fn hash(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update("transfer".as_bytes());
        hasher.update(self.sender);
        hasher.update(self.recipient);
        hasher.update(self.amount.to_le_bytes());
        hasher.update(self.created_at.to_le_bytes());
        hasher.finalize().into()
    }

    /// Signs the content hash with `keypair` and stores the compact signature.
    /// Fails without touching the transaction when the keypair does not
    /// control the sender account.
    pub fn sign(&mut self, keypair: &KeyPair) -> Result<(), ChainError> {
        if keypair.address() != self.sender {
            return Err(ChainError::IdentityMismatch {
                sender: hex::encode(self.sender),
                key: hex::encode(keypair.address()),
            });
        }

        let signature = keypair.sign(&self.hash())?;
        self.signature = Some(signature.to_vec());
        Ok(())
    }
}

/// Reward transaction: mints the mining payout out of thin air.
/// There is no sender account, so nothing signs it.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RewardTx {
    #[serde(with = "BigArray")]
    pub recipient: Address,
    pub amount: u64,
    /// Creation time in milliseconds since the Unix epoch
    pub created_at: u64,
}

impl RewardTx {
    pub fn new(recipient: Address, amount: u64) -> Self {
        RewardTx {
            recipient,
            amount,
            created_at: Utc::now().timestamp_millis() as u64,
        }
    }

    pub fn hash(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update("reward".as_bytes());
        hasher.update(self.recipient);
        hasher.update(self.amount.to_le_bytes());
        hasher.update(self.created_at.to_le_bytes());
        hasher.finalize().into()
    }
}
