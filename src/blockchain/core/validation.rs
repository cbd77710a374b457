use crate::error::ChainError;

use super::chain::Blockchain;

impl Blockchain {
    /// Walks the chain from the block after genesis and re-derives every
    /// digest. The cached `hash` field never vouches for a link: both
    /// the block's own digest and its predecessor's are recomputed from
    /// contents before comparison, so rewriting history only passes if
    /// every later block is re-linked and re-hashed too.
    pub fn validate(&self) -> Result<(), ChainError> {
        for index in 1..self.blocks.len() {
            let block = &self.blocks[index];
            let previous = &self.blocks[index - 1];

            block.verify_transactions()?;

            if block.hash != block.compute_hash()? {
                return Err(ChainError::InvalidBlock(format!(
                    "Block {} hash does not match its contents",
                    index
                )));
            }

            if block.previous_hash != previous.compute_hash()? {
                return Err(ChainError::InvalidBlock(format!(
                    "Block {} does not link to the recomputed hash of block {}",
                    index,
                    index - 1
                )));
            }
        }

        Ok(())
    }

    /// Boolean form of [`Blockchain::validate`].
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}
