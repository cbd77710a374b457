use crate::crypto::{Address, EMPTY_ADDRESS};
use crate::error::ChainError;
use crate::mempool::Mempool;
use crate::transaction::{RewardTx, Transaction};
use log::{debug, info};
use sha2::{Digest, Sha256};

pub type Sha256Hash = [u8; 32];

/// Every genesis block points back at this all-zero hash.
pub const GENESIS_PREVIOUS_HASH: Sha256Hash = [0u8; 32];

pub const DEFAULT_DIFFICULTY: u32 = 2;
pub const DEFAULT_MINING_REWARD: u64 = 100;

/// A SHA-256 digest has 64 hex digits, so no hash can start with more
/// leading zero digits than that.
pub const MAX_DIFFICULTY: u32 = 64;

/// Largest amount a transaction or reward may carry. Balances replay
/// as signed i64, so admitted amounts must fit that range exactly.
pub const MAX_AMOUNT: u64 = i64::MAX as u64;

/// Returns true when `hash` starts with `difficulty` zero hex digits.
/// Difficulties above [`MAX_DIFFICULTY`] can never be met.
pub fn meets_difficulty(hash: &Sha256Hash, difficulty: u32) -> bool {
    if difficulty > MAX_DIFFICULTY {
        return false;
    }
    for i in 0..difficulty as usize {
        let byte = hash[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        if nibble != 0 {
            return false;
        }
    }
    true
}

/// Rejects difficulties no digest can ever meet.
fn check_difficulty(difficulty: u32) -> Result<(), ChainError> {
    if difficulty > MAX_DIFFICULTY {
        return Err(ChainError::ConfigError(format!(
            "Difficulty {} exceeds the {} hex digits of a SHA-256 digest",
            difficulty, MAX_DIFFICULTY
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Block {
    pub previous_hash: Sha256Hash,
    /// Creation time in milliseconds since the Unix epoch.
    /// Mining leaves it untouched; only the nonce moves.
    pub timestamp: u64,
    pub transactions: Vec<Transaction>,
    /// Proof-of-work counter. Wraps around on overflow and keeps
    /// searching, which at 2^64 attempts is a theoretical case only.
    pub nonce: u64,
    /// Cached digest of the block contents. Trustworthy only as long
    /// as it matches what [`Block::compute_hash`] returns.
    pub hash: Sha256Hash,
}

impl Block {
    pub fn new(
        previous_hash: Sha256Hash,
        transactions: Vec<Transaction>,
    ) -> Result<Self, ChainError> {
        let mut block = Block {
            previous_hash,
            timestamp: chrono::Utc::now().timestamp_millis() as u64,
            transactions,
            nonce: 0,
            hash: [0u8; 32],
        };
        block.recompute_hash()?;
        Ok(block)
    }

    /// Digest over previous hash, timestamp, serialized transactions and
    /// nonce. Signatures travel inside the serialized transactions, so
    /// stripping one changes the block digest as well.
    pub fn compute_hash(&self) -> Result<Sha256Hash, ChainError> {
        let tx_bytes = bincode::serialize(&self.transactions)?;

        let mut hasher = Sha256::new();
        hasher.update(self.previous_hash);
        hasher.update(self.timestamp.to_le_bytes());
        hasher.update(&tx_bytes);
        hasher.update(self.nonce.to_le_bytes());
        Ok(hasher.finalize().into())
    }

    /// Refreshes the cached `hash` field from the current contents.
    pub fn recompute_hash(&mut self) -> Result<(), ChainError> {
        self.hash = self.compute_hash()?;
        Ok(())
    }

    /// Checks the cached `hash` field against the current contents.
    pub fn verify_hash(&self) -> Result<bool, ChainError> {
        Ok(self.hash == self.compute_hash()?)
    }

    /// Grinds the nonce until the cached hash meets `difficulty`.
    /// Runs on the calling thread and returns once the block is sealed.
    pub fn mine(&mut self, difficulty: u32) -> Result<(), ChainError> {
        check_difficulty(difficulty)?;

        while !meets_difficulty(&self.hash, difficulty) {
            self.nonce = self.nonce.wrapping_add(1);
            self.recompute_hash()?;
            if self.nonce % 65_536 == 0 {
                debug!("Still mining, {} nonces tried", self.nonce);
            }
        }

        info!(
            "Block mined: {} (nonce {}, difficulty {})",
            hex::encode(self.hash),
            self.nonce,
            difficulty
        );
        Ok(())
    }

    /// Verifies every transaction in the block, stopping at the first
    /// one that fails.
    pub fn verify_transactions(&self) -> Result<(), ChainError> {
        for tx in &self.transactions {
            tx.verify()?;
        }
        Ok(())
    }
}

// Blockchain struct and implementation

#[derive(Debug, Clone)]
pub struct Blockchain {
    pub blocks: Vec<Block>,
    pub difficulty: u32,
    pub mempool: Mempool,
    pub mining_reward: u64,
}

impl Blockchain {
    /// Builds a chain holding only the genesis block. An unmeetable
    /// difficulty or a reward beyond [`MAX_AMOUNT`] is refused here,
    /// before any chain exists to corrupt.
    pub fn new(difficulty: u32, mining_reward: u64) -> Result<Self, ChainError> {
        check_difficulty(difficulty)?;
        if mining_reward > MAX_AMOUNT {
            return Err(ChainError::ConfigError(format!(
                "Mining reward {} exceeds the maximum amount of {}",
                mining_reward, MAX_AMOUNT
            )));
        }

        let genesis_block = Self::create_genesis_block()?;

        Ok(Blockchain {
            blocks: vec![genesis_block],
            difficulty,
            mempool: Mempool::new(),
            mining_reward,
        })
    }

    /// Builds a chain from a loaded configuration.
    pub fn with_config(config: &crate::config::ChainConfig) -> Result<Self, ChainError> {
        config.validate()?;
        Self::new(config.difficulty, config.mining_reward)
    }

    /// The genesis block carries no transactions and is never mined;
    /// validation walks start at the block after it.
    fn create_genesis_block() -> Result<Block, ChainError> {
        Block::new(GENESIS_PREVIOUS_HASH, Vec::new())
    }

    pub fn latest_block(&self) -> &Block {
        self.blocks
            .last()
            .expect("chain always holds at least the genesis block")
    }

    /// Admits a transfer into the pool after checking its shape, amount
    /// and signature. Rewards cannot be submitted from outside; the
    /// chain mints them itself during mining.
    pub fn add_transaction(&mut self, transaction: Transaction) -> Result<(), ChainError> {
        match &transaction {
            Transaction::Reward(_) => {
                return Err(ChainError::InvalidTransaction(
                    "Reward transactions are minted during mining and cannot be submitted"
                        .to_string(),
                ));
            }
            Transaction::Transfer(tx) => {
                if tx.sender == EMPTY_ADDRESS || tx.recipient == EMPTY_ADDRESS {
                    return Err(ChainError::InvalidTransaction(
                        "Transaction must include sender and recipient addresses".to_string(),
                    ));
                }
                if tx.amount > MAX_AMOUNT {
                    return Err(ChainError::InvalidTransaction(format!(
                        "Transaction amount {} exceeds the maximum of {}",
                        tx.amount, MAX_AMOUNT
                    )));
                }
            }
        }

        transaction.verify()?;
        self.mempool.add_transaction(transaction);
        Ok(())
    }

    /// Drains the pool into a new block together with a freshly minted
    /// reward for `reward_address`, mines the block at the chain
    /// difficulty and appends it. With an empty pool the block still
    /// carries the reward. The difficulty is checked before the pool is
    /// touched, so a refused mine leaves every pending transaction in
    /// place.
    pub fn mine_pending_transactions(
        &mut self,
        reward_address: &Address,
    ) -> Result<&Block, ChainError> {
        check_difficulty(self.difficulty)?;

        let reward = Transaction::Reward(RewardTx::new(*reward_address, self.mining_reward));
        self.mempool.add_transaction(reward);

        let previous_hash = self.latest_block().hash;
        let mut block = Block::new(previous_hash, self.mempool.take_all())?;
        block.mine(self.difficulty)?;

        self.blocks.push(block);
        Ok(self.latest_block())
    }
}
