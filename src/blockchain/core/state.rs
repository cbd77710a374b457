use crate::crypto::Address;
use crate::transaction::Transaction;
use std::collections::HashMap;

use super::chain::{Blockchain, MAX_AMOUNT};

/// Amounts above [`MAX_AMOUNT`] only occur in hand-tampered blocks;
/// they clamp instead of wrapping negative.
fn signed_amount(amount: u64) -> i64 {
    amount.min(MAX_AMOUNT) as i64
}

impl Blockchain {
    /// Net balance of `address`, derived by replaying every settled
    /// transaction from genesis. Nothing is cached; the chain itself is
    /// the ledger. Pooled transactions do not count until mined.
    ///
    /// The result is signed: nothing stops an account from spending more
    /// than it received, so balances can go negative. Accumulation
    /// saturates at the i64 limits instead of overflowing.
    pub fn balance_of(&self, address: &Address) -> i64 {
        let mut balance: i64 = 0;

        for block in &self.blocks {
            for tx in &block.transactions {
                match tx {
                    Transaction::Transfer(tx) => {
                        // A self-send debits and credits the same account
                        if &tx.sender == address {
                            balance = balance.saturating_sub(signed_amount(tx.amount));
                        }
                        if &tx.recipient == address {
                            balance = balance.saturating_add(signed_amount(tx.amount));
                        }
                    }
                    Transaction::Reward(tx) => {
                        if &tx.recipient == address {
                            balance = balance.saturating_add(signed_amount(tx.amount));
                        }
                    }
                }
            }
        }

        balance
    }

    /// Net balance of every address mentioned on the chain, in one walk.
    pub fn balances(&self) -> HashMap<Address, i64> {
        let mut balances: HashMap<Address, i64> = HashMap::new();

        for block in &self.blocks {
            for tx in &block.transactions {
                if let Transaction::Transfer(tx) = tx {
                    let debit = balances.entry(tx.sender).or_insert(0);
                    *debit = debit.saturating_sub(signed_amount(tx.amount));
                }
                let credit = balances.entry(*tx.recipient()).or_insert(0);
                *credit = credit.saturating_add(signed_amount(tx.amount()));
            }
        }

        balances
    }
}
