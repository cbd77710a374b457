//! Pool of transactions waiting to be mined into a block

use crate::transaction::Transaction;

/// Holds accepted transactions in arrival order until a mining pass
/// drains them. Order matters: rewards are appended last and balances
/// replay transactions in pool order.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Mempool {
    transactions: Vec<Transaction>,
}

impl Mempool {
    pub fn new() -> Self {
        Mempool {
            transactions: Vec::new(),
        }
    }

    /// Appends a transaction to the back of the pool.
    /// Acceptance checks happen before this point; the pool itself
    /// never rejects.
    pub fn add_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    /// Moves every pooled transaction out, leaving the pool empty.
    pub fn take_all(&mut self) -> Vec<Transaction> {
        std::mem::take(&mut self.transactions)
    }

    /// Returns a snapshot of the pooled transactions.
    pub fn get_all_transactions(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::KeyPair;
    use crate::transaction::TransferTx;

    fn transfer(amount: u64) -> Transaction {
        let a = KeyPair::generate().unwrap();
        let b = KeyPair::generate().unwrap();
        Transaction::Transfer(TransferTx::new(a.address(), b.address(), amount))
    }

    #[test]
    fn test_pool_preserves_arrival_order() {
        let mut pool = Mempool::new();
        pool.add_transaction(transfer(1));
        pool.add_transaction(transfer(2));
        pool.add_transaction(transfer(3));

        let drained = pool.take_all();
        let amounts: Vec<u64> = drained.iter().map(|tx| tx.amount()).collect();
        assert_eq!(amounts, vec![1, 2, 3]);
    }

    #[test]
    fn test_take_all_empties_the_pool() {
        let mut pool = Mempool::new();
        pool.add_transaction(transfer(5));
        assert_eq!(pool.len(), 1);

        let drained = pool.take_all();
        assert_eq!(drained.len(), 1);
        assert!(pool.is_empty());
        assert!(pool.take_all().is_empty());
    }

    #[test]
    fn test_snapshot_leaves_pool_intact() {
        let mut pool = Mempool::new();
        pool.add_transaction(transfer(9));

        let snapshot = pool.get_all_transactions();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(pool.len(), 1);
    }
}
