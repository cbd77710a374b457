#![forbid(unsafe_code)]
use clap::Parser;
use colored::*;
use pebblechain::blockchain::Blockchain;
use pebblechain::config::ChainConfig;
use pebblechain::transaction::{Transaction, TransferTx};
use pebblechain::wallet::Wallet;

/// Spins up a fresh chain, moves value between three throwaway wallets
/// across three mined blocks and prints the resulting balances.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, default_value = "pebblechain.toml")]
    config: String,

    /// Override the proof-of-work difficulty (leading zero hex digits)
    #[arg(long)]
    difficulty: Option<u32>,

    /// Override the per-block mining reward
    #[arg(long)]
    reward: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = ChainConfig::load(&cli.config)?;
    if let Some(difficulty) = cli.difficulty {
        config.difficulty = difficulty;
    }
    if let Some(reward) = cli.reward {
        config.mining_reward = reward;
    }
    config.validate()?;

    println!("{}", "pebblechain demo".bright_cyan().bold());
    println!("{}", "----------------".bright_cyan());
    println!(
        "difficulty {} / mining reward {}\n",
        config.difficulty, config.mining_reward
    );

    let alice = Wallet::new(Some("alice".to_string()))?;
    let bob = Wallet::new(Some("bob".to_string()))?;
    let miner = Wallet::new(Some("miner".to_string()))?;

    println!("alice: {}", alice.address.bright_yellow());
    println!("bob:   {}", bob.address.bright_yellow());
    println!("miner: {}\n", miner.address.bright_yellow());

    let alice_addr = alice.address_bytes()?;
    let bob_addr = bob.address_bytes()?;
    let miner_addr = miner.address_bytes()?;
    let alice_keys = alice.get_keypair()?;
    let bob_keys = bob.get_keypair()?;

    let mut chain = Blockchain::with_config(&config)?;

    println!("{} alice -> bob: 100", "tx".bright_white().bold());
    let mut tx = TransferTx::new(alice_addr, bob_addr, 100);
    tx.sign(&alice_keys)?;
    chain.add_transaction(Transaction::Transfer(tx))?;
    mine(&mut chain, &miner_addr, 1)?;

    println!("{} alice -> bob: 50", "tx".bright_white().bold());
    let mut tx = TransferTx::new(alice_addr, bob_addr, 50);
    tx.sign(&alice_keys)?;
    chain.add_transaction(Transaction::Transfer(tx))?;
    mine(&mut chain, &miner_addr, 2)?;

    println!("{} bob -> alice: 50", "tx".bright_white().bold());
    let mut tx = TransferTx::new(bob_addr, alice_addr, 50);
    tx.sign(&bob_keys)?;
    chain.add_transaction(Transaction::Transfer(tx))?;
    mine(&mut chain, &miner_addr, 3)?;

    println!("\n{}", "Balances".bright_green().underline());
    println!("  alice: {}", chain.balance_of(&alice_addr));
    println!("  bob:   {}", chain.balance_of(&bob_addr));
    println!("  miner: {}", chain.balance_of(&miner_addr));

    let verdict = if chain.is_valid() {
        "valid".bright_green()
    } else {
        "INVALID".bright_red()
    };
    println!("\nchain is {} ({} blocks)", verdict, chain.blocks.len());

    Ok(())
}

fn mine(
    chain: &mut Blockchain,
    miner_addr: &pebblechain::crypto::Address,
    number: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", format!("mining block {}...", number).bright_cyan());
    let block = chain.mine_pending_transactions(miner_addr)?;
    println!(
        "sealed {} (nonce {})\n",
        hex::encode(block.hash).bright_green(),
        block.nonce
    );
    Ok(())
}
