//! Wallet management: key generation and JSON persistence

use crate::crypto::{address_from_hex, address_to_hex, Address, KeyPair};
use crate::error::ChainError;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A named keypair stored on disk. The JSON file holds the secret key in
/// hex, so a wallet file deserves the same care as the key itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    pub name: Option<String>,
    /// Hex-encoded account address (the compressed public key)
    pub address: String,
    pub secret_key_hex: String,
    /// RFC 3339 creation timestamp
    pub created: String,
}

impl Wallet {
    /// Generates a fresh keypair and wraps it in a wallet.
    pub fn new(name: Option<String>) -> Result<Self, ChainError> {
        let keypair = KeyPair::generate()?;

        Ok(Wallet {
            name,
            address: address_to_hex(&keypair.address()),
            secret_key_hex: hex::encode(keypair.secret_key.secret_bytes()),
            created: Utc::now().to_rfc3339(),
        })
    }

    /// The account address as raw bytes, ready to drop into a transaction.
    pub fn address_bytes(&self) -> Result<Address, ChainError> {
        address_from_hex(&self.address)
    }

    /// Rebuilds the signing keypair from the stored secret key.
    pub fn get_keypair(&self) -> Result<KeyPair, ChainError> {
        let secret_bytes = hex::decode(&self.secret_key_hex)
            .map_err(|e| ChainError::WalletError(format!("Invalid secret key hex: {}", e)))?;
        KeyPair::from_secret_bytes(&secret_bytes)
    }

    pub fn save(&self, path: &Path) -> Result<(), ChainError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, ChainError> {
        let json = fs::read_to_string(path)?;
        let wallet: Wallet = serde_json::from_str(&json)?;
        Ok(wallet)
    }
}
