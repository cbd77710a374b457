/// Validation logic for transactions separated from type definitions
use crate::error::ChainError;
use crate::transaction::types::{RewardTx, Transaction, TransferTx};

impl Transaction {
    /// Checks the signature rules for this transaction.
    pub fn verify(&self) -> Result<(), ChainError> {
        match self {
            Transaction::Transfer(tx) => tx.verify(),
            Transaction::Reward(tx) => tx.verify(),
        }
    }

    /// Boolean form of [`Transaction::verify`], for callers that only care
    /// whether the transaction holds up.
    pub fn is_valid(&self) -> bool {
        self.verify().is_ok()
    }
}

impl TransferTx {
    /// Verifies the stored signature against the sender's public key.
    /// A missing or empty signature is reported before any cryptography runs.
    pub fn verify(&self) -> Result<(), ChainError> {
        let signature = match &self.signature {
            Some(sig) if !sig.is_empty() => sig,
            _ => return Err(ChainError::MissingSignature),
        };

        crate::crypto::verify_signature(&self.sender, &self.hash(), signature)
    }
}

impl RewardTx {
    /// Rewards are issued by the chain itself and carry no signature to check.
    pub fn verify(&self) -> Result<(), ChainError> {
        Ok(())
    }
}
