//! pebblechain - A proof-of-work ledger of ECDSA-signed account transfers
//!
//! # Architecture
//!
//! The crate is organized into logical modules:
//!
//! ## Core Ledger
//! - [`blockchain`] - Block structure, chain management and validation
//! - [`transaction`] - Transaction types and signature checks
//! - [`mempool`] - Pool of transactions awaiting a mining pass
//!
//! ## Cryptography
//! - [`crypto`] - Keys, signatures and verification (secp256k1)
//! - [`wallet`] - Keypair storage on disk
//!
//! ## Configuration & Utilities
//! - [`config`] - Configuration management
//! - [`error`] - Error types

#![forbid(unsafe_code)]

// ============================================================================
// Core Ledger
// ============================================================================
pub mod blockchain;
pub mod mempool;
pub mod transaction;

// ============================================================================
// Cryptography & Wallets
// ============================================================================
pub mod crypto;
pub mod wallet;

// ============================================================================
// Configuration & Utilities
// ============================================================================
pub mod config;
pub mod error;
