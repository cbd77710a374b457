//! Integration tests that rewrite settled history and expect the chain
//! validation walk to catch every variant.

use pebblechain::blockchain::Blockchain;
use pebblechain::crypto::KeyPair;
use pebblechain::error::ChainError;
use pebblechain::transaction::{Transaction, TransferTx};

/// A chain with one signed transfer mined into block 1 and an empty
/// block 2 on top of it, so linkage checks have a successor to work with.
fn mined_chain() -> Result<Blockchain, Box<dyn std::error::Error>> {
    let alice = KeyPair::generate()?;
    let bob = KeyPair::generate()?;
    let miner = KeyPair::generate()?;

    let mut chain = Blockchain::new(1, 100)?;

    let mut tx = TransferTx::new(alice.address(), bob.address(), 60);
    tx.sign(&alice)?;
    chain.add_transaction(Transaction::Transfer(tx))?;

    chain.mine_pending_transactions(&miner.address())?;
    chain.mine_pending_transactions(&miner.address())?;

    assert!(chain.is_valid());
    Ok(chain)
}

#[test]
fn test_amount_rewrite_is_detected() -> Result<(), Box<dyn std::error::Error>> {
    let mut chain = mined_chain()?;

    if let Transaction::Transfer(tx) = &mut chain.blocks[1].transactions[0] {
        tx.amount = 10;
    }

    assert!(!chain.blocks[1].verify_hash()?);
    assert!(!chain.is_valid());

    Ok(())
}

#[test]
fn test_recompute_cannot_hide_a_reward_rewrite() -> Result<(), Box<dyn std::error::Error>> {
    let mut chain = mined_chain()?;

    // The reward has no signature to break, so only the hashes stand
    // between the attacker and a fatter payout
    let last = chain.blocks[1].transactions.len() - 1;
    if let Transaction::Reward(tx) = &mut chain.blocks[1].transactions[last] {
        tx.amount = 1_000_000;
    }
    assert!(!chain.blocks[1].verify_hash()?);

    // Recomputing repairs the block's own digest, but block 2 still pins
    // the original one
    chain.blocks[1].recompute_hash()?;
    assert!(chain.blocks[1].verify_hash()?);
    assert!(matches!(
        chain.validate(),
        Err(ChainError::InvalidBlock(_))
    ));

    Ok(())
}

#[test]
fn test_re_mining_one_block_cannot_rewrite_history() -> Result<(), Box<dyn std::error::Error>> {
    let mut chain = mined_chain()?;

    let last = chain.blocks[1].transactions.len() - 1;
    if let Transaction::Reward(tx) = &mut chain.blocks[1].transactions[last] {
        tx.amount = 1_000_000;
    }

    // Even a full re-mine of the tampered block leaves the successor's
    // previous_hash pointing at the original digest
    chain.blocks[1].recompute_hash()?;
    chain.blocks[1].mine(chain.difficulty)?;
    assert!(chain.blocks[1].verify_hash()?);

    assert!(!chain.is_valid());

    Ok(())
}

#[test]
fn test_spliced_previous_hash_is_detected() -> Result<(), Box<dyn std::error::Error>> {
    let mut chain = mined_chain()?;

    // Point block 2 at a different block's digest
    chain.blocks[2].previous_hash = chain.blocks[0].hash;
    assert!(!chain.is_valid());

    // Recomputing block 2's own hash only moves the failure to the
    // linkage check
    chain.blocks[2].recompute_hash()?;
    assert!(matches!(
        chain.validate(),
        Err(ChainError::InvalidBlock(_))
    ));

    Ok(())
}

#[test]
fn test_signature_strip_is_detected() -> Result<(), Box<dyn std::error::Error>> {
    let mut chain = mined_chain()?;

    if let Transaction::Transfer(tx) = &mut chain.blocks[1].transactions[0] {
        tx.signature = None;
    }

    // Transaction checks run before hash checks, so the missing
    // signature is what surfaces
    assert!(matches!(
        chain.validate(),
        Err(ChainError::MissingSignature)
    ));
    assert!(!chain.is_valid());

    Ok(())
}

#[test]
fn test_genesis_rewrite_breaks_the_first_link() -> Result<(), Box<dyn std::error::Error>> {
    let mut chain = mined_chain()?;

    // Genesis itself is exempt from the walk, but block 1 links against
    // its recomputed digest
    chain.blocks[0].timestamp += 1;
    assert!(matches!(
        chain.validate(),
        Err(ChainError::InvalidBlock(_))
    ));

    Ok(())
}

#[test]
fn test_untouched_chain_stays_valid() -> Result<(), Box<dyn std::error::Error>> {
    let chain = mined_chain()?;
    assert!(chain.validate().is_ok());
    Ok(())
}
