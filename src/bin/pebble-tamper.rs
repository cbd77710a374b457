#![forbid(unsafe_code)]
use pebblechain::blockchain::Blockchain;
use pebblechain::crypto::KeyPair;
use pebblechain::transaction::{Transaction, TransferTx};
use std::env;

/// Builds a small chain, then tampers with settled blocks in three ways
/// to show how each rewrite gets caught.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let difficulty: u32 = args.get(1).map(|s| s.parse()).transpose()?.unwrap_or(1);

    let alice = KeyPair::generate()?;
    let bob = KeyPair::generate()?;
    let miner = KeyPair::generate()?;

    let mut chain = Blockchain::new(difficulty, 100)?;

    let mut tx = TransferTx::new(alice.address(), bob.address(), 75);
    tx.sign(&alice)?;
    chain.add_transaction(Transaction::Transfer(tx))?;
    chain.mine_pending_transactions(&miner.address())?;
    chain.mine_pending_transactions(&miner.address())?;

    println!("Baseline");
    println!("  blocks: {}", chain.blocks.len());
    println!("  valid:  {}\n", chain.is_valid());

    // 1. Rewriting a signed transfer breaks its signature.
    println!("Tamper 1: change the settled transfer amount to 9999");
    let mut tampered = chain.clone();
    if let Transaction::Transfer(tx) = &mut tampered.blocks[1].transactions[0] {
        tx.amount = 9_999;
    }
    println!(
        "  block 1 hash still matches contents: {}",
        tampered.blocks[1].verify_hash()?
    );
    report(&tampered);

    // 2. Rewards carry no signature, but the next block still pins the
    //    original block digest, so recomputing the hash does not help.
    println!("Tamper 2: inflate the mining reward, then recompute the block hash");
    let mut tampered = chain.clone();
    let last = tampered.blocks[1].transactions.len() - 1;
    if let Transaction::Reward(tx) = &mut tampered.blocks[1].transactions[last] {
        tx.amount = 1_000_000;
    }
    println!(
        "  block 1 hash still matches contents: {}",
        tampered.blocks[1].verify_hash()?
    );
    tampered.blocks[1].recompute_hash()?;
    println!(
        "  after recompute_hash it matches again: {}",
        tampered.blocks[1].verify_hash()?
    );
    report(&tampered);

    // 3. Dropping a signature outright.
    println!("Tamper 3: strip the transfer signature");
    let mut tampered = chain.clone();
    if let Transaction::Transfer(tx) = &mut tampered.blocks[1].transactions[0] {
        tx.signature = None;
    }
    report(&tampered);

    Ok(())
}

fn report(chain: &Blockchain) {
    match chain.validate() {
        Ok(()) => println!("  chain unexpectedly still valid\n"),
        Err(err) => println!("  rejected: {}\n", err),
    }
}
