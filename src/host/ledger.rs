//! In-memory fungible-token ledger.

use std::collections::HashMap;

use tracing::trace;

use crate::domain::{AccountId, Amount, TokenAddress};
use crate::traits::{TokenTransfer, TransferError, TransferLeg};

/// Balances and allowances for any number of tokens, held in memory.
///
/// Tokens come into existence on first [`mint`](Self::mint).  Transfers
/// of an unknown token fail with [`TransferError::UnknownToken`].
/// [`settle`](TokenTransfer::settle) is atomic: legs are applied to a
/// scratch copy that replaces the ledger only if every leg succeeds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLedger {
    supply: HashMap<TokenAddress, Amount>,
    balances: HashMap<(TokenAddress, AccountId), Amount>,
    allowances: HashMap<(TokenAddress, AccountId, AccountId), Amount>,
}

impl MemoryLedger {
    /// An empty ledger that knows no tokens.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates `amount` of `token` in `account`.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::InsufficientBalance`] against the zero
    /// account if the token's total supply would exceed `u128::MAX`.
    pub fn mint(
        &mut self,
        token: TokenAddress,
        account: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        let supply = self.supply.entry(token).or_default();
        let Some(grown) = supply.checked_add(&amount) else {
            return Err(TransferError::InsufficientBalance {
                token,
                account: AccountId::zero(),
                needed: amount,
                available: Amount::new(Amount::MAX.get() - supply.get()),
            });
        };
        *supply = grown;
        self.credit(token, account, amount);
        Ok(())
    }

    /// Sets how much of `owner`'s `token` the `spender` may pull.
    pub fn approve(
        &mut self,
        token: TokenAddress,
        owner: AccountId,
        spender: AccountId,
        amount: Amount,
    ) {
        self.allowances.insert((token, owner, spender), amount);
    }

    /// Balance of `account` in `token`.
    pub fn balance_of(&self, token: TokenAddress, account: AccountId) -> Amount {
        self.balances
            .get(&(token, account))
            .copied()
            .unwrap_or_default()
    }

    /// Remaining allowance of `spender` over `owner`'s `token`.
    pub fn allowance(&self, token: TokenAddress, owner: AccountId, spender: AccountId) -> Amount {
        self.allowances
            .get(&(token, owner, spender))
            .copied()
            .unwrap_or_default()
    }

    /// Total minted supply of `token`.
    pub fn total_supply(&self, token: TokenAddress) -> Amount {
        self.supply.get(&token).copied().unwrap_or_default()
    }

    fn debit(
        &mut self,
        token: TokenAddress,
        account: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        let available = self.balance_of(token, account);
        let remaining = available
            .checked_sub(&amount)
            .ok_or(TransferError::InsufficientBalance {
                token,
                account,
                needed: amount,
                available,
            })?;
        if remaining.is_zero() {
            self.balances.remove(&(token, account));
        } else {
            self.balances.insert((token, account), remaining);
        }
        Ok(())
    }

    /// Balances never exceed the token supply, which `mint` keeps within
    /// `u128`, so the addition cannot overflow.
    fn credit(&mut self, token: TokenAddress, account: AccountId, amount: Amount) {
        if amount.is_zero() {
            return;
        }
        let balance = self.balances.entry((token, account)).or_default();
        *balance = Amount::new(balance.get().saturating_add(amount.get()));
    }

    fn known(&self, token: TokenAddress) -> Result<(), TransferError> {
        if self.supply.contains_key(&token) {
            Ok(())
        } else {
            Err(TransferError::UnknownToken(token))
        }
    }
}

impl TokenTransfer for MemoryLedger {
    fn pull(
        &mut self,
        token: TokenAddress,
        owner: AccountId,
        spender: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        self.known(token)?;
        let approved = self.allowance(token, owner, spender);
        let left = approved
            .checked_sub(&amount)
            .ok_or(TransferError::InsufficientAllowance {
                token,
                owner,
                needed: amount,
                approved,
            })?;
        self.debit(token, owner, amount)?;
        self.credit(token, spender, amount);
        self.allowances.insert((token, owner, spender), left);
        trace!(%token, %owner, %spender, %amount, "pull");
        Ok(())
    }

    fn push(
        &mut self,
        token: TokenAddress,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        self.known(token)?;
        self.debit(token, from, amount)?;
        self.credit(token, to, amount);
        trace!(%token, %from, %to, %amount, "push");
        Ok(())
    }

    fn refund(
        &mut self,
        token: TokenAddress,
        owner: AccountId,
        spender: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        self.known(token)?;
        self.debit(token, spender, amount)?;
        self.credit(token, owner, amount);
        let approved = self.allowance(token, owner, spender);
        self.allowances.insert(
            (token, owner, spender),
            Amount::new(approved.get().saturating_add(amount.get())),
        );
        trace!(%token, %owner, %spender, %amount, "refund");
        Ok(())
    }

    fn settle(&mut self, legs: &[TransferLeg]) -> Result<(), TransferError> {
        let mut scratch = self.clone();
        for leg in legs {
            scratch.execute(leg)?;
        }
        *self = scratch;
        Ok(())
    }
}
