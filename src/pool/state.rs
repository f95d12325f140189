//! Reserve and share bookkeeping.
//!
//! [`PoolState`] is the mutable half of a pool.  It is never edited field
//! by field: an operation computes a `Transition` from the current
//! state, the transition is checked against the pool invariants, and only
//! then is it applied in one step.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{AccountId, Amount, Shares};
use crate::error::AmmError;
use crate::math::{wide_product, CheckedArithmetic};

/// Reserves, outstanding shares and the per-provider share ledger.
///
/// # Invariants
///
/// - `reserve_a`, `reserve_b` and `total_shares` are either all zero or
///   all positive.
/// - `total_shares` equals the sum of the ledger.
/// - the ledger holds no zero balances.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PoolState {
    reserve_a: Amount,
    reserve_b: Amount,
    total_shares: Shares,
    ledger: BTreeMap<AccountId, Shares>,
}

/// What kind of operation produced a transition.  Swaps carry an extra
/// invariant: the reserve product may not shrink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TransitionKind {
    Deposit,
    Swap,
    Withdrawal,
}

/// A fully computed next state, not yet applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Transition {
    pub(crate) kind: TransitionKind,
    pub(crate) reserve_a: Amount,
    pub(crate) reserve_b: Amount,
    pub(crate) total_shares: Shares,
    /// New ledger balance of the one provider whose shares change.
    pub(crate) provider: Option<(AccountId, Shares)>,
}

impl PoolState {
    /// An empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Token A reserve.
    pub const fn reserve_a(&self) -> Amount {
        self.reserve_a
    }

    /// Token B reserve.
    pub const fn reserve_b(&self) -> Amount {
        self.reserve_b
    }

    /// Shares outstanding.
    #[must_use]
    pub const fn total_shares(&self) -> Shares {
        self.total_shares
    }

    /// Shares held by `account`, zero if it holds none.
    #[must_use]
    pub fn shares_of(&self, account: &AccountId) -> Shares {
        self.ledger.get(account).copied().unwrap_or_default()
    }

    /// Providers with a positive balance, in account order.
    pub fn providers(&self) -> impl Iterator<Item = (AccountId, Shares)> + '_ {
        self.ledger.iter().map(|(account, shares)| (*account, *shares))
    }

    /// Number of providers with a positive balance.
    #[must_use]
    pub fn provider_count(&self) -> usize {
        self.ledger.len()
    }

    /// `true` when the pool holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_shares.is_zero()
    }

    /// Walks the whole ledger and checks every invariant.
    ///
    /// Commits only run the constant-time checks in
    /// `Transition::validate`; this full pass is what tests use.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvariantViolation`] naming the broken rule.
    pub fn check_invariants(&self) -> Result<(), AmmError> {
        check_emptiness(self.reserve_a, self.reserve_b, self.total_shares)?;
        let mut sum = Shares::ZERO;
        for shares in self.ledger.values() {
            if shares.is_zero() {
                return Err(AmmError::InvariantViolation("zero balance kept in ledger"));
            }
            if *shares > self.total_shares {
                return Err(AmmError::InvariantViolation(
                    "provider balance exceeds total shares",
                ));
            }
            sum = sum
                .checked_add(shares)
                .ok_or(AmmError::InvariantViolation("ledger sum overflows"))?;
        }
        if sum != self.total_shares {
            return Err(AmmError::InvariantViolation(
                "total shares differ from ledger sum",
            ));
        }
        Ok(())
    }

    /// Starts a transition that leaves everything as it is.
    pub(crate) fn stage(&self, kind: TransitionKind) -> Transition {
        Transition {
            kind,
            reserve_a: self.reserve_a,
            reserve_b: self.reserve_b,
            total_shares: self.total_shares,
            provider: None,
        }
    }

    /// Applies a transition that has passed [`Transition::validate`].
    pub(crate) fn commit(&mut self, transition: Transition) {
        self.reserve_a = transition.reserve_a;
        self.reserve_b = transition.reserve_b;
        self.total_shares = transition.total_shares;
        if let Some((account, balance)) = transition.provider {
            if balance.is_zero() {
                self.ledger.remove(&account);
            } else {
                self.ledger.insert(account, balance);
            }
        }
    }
}

impl Transition {
    /// Checks that applying `self` to `before` keeps every invariant.
    ///
    /// Runs in constant time: the ledger sum is tracked through the one
    /// balance that changes.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvariantViolation`] naming the broken rule.
    pub(crate) fn validate(&self, before: &PoolState) -> Result<(), AmmError> {
        check_emptiness(self.reserve_a, self.reserve_b, self.total_shares)?;

        let expected_total = match self.provider {
            Some((account, balance)) => {
                if balance > self.total_shares {
                    return Err(AmmError::InvariantViolation(
                        "provider balance exceeds total shares",
                    ));
                }
                before
                    .total_shares
                    .safe_sub(&before.shares_of(&account))?
                    .safe_add(&balance)?
            }
            None => before.total_shares,
        };
        if expected_total != self.total_shares {
            return Err(AmmError::InvariantViolation(
                "total shares differ from ledger sum",
            ));
        }

        if self.kind == TransitionKind::Swap {
            let k_before = wide_product(before.reserve_a.get(), before.reserve_b.get());
            let k_after = wide_product(self.reserve_a.get(), self.reserve_b.get());
            if k_after < k_before {
                return Err(AmmError::InvariantViolation("reserve product decreased"));
            }
        }
        Ok(())
    }
}

fn check_emptiness(reserve_a: Amount, reserve_b: Amount, total: Shares) -> Result<(), AmmError> {
    let empty = [reserve_a.is_zero(), reserve_b.is_zero(), total.is_zero()];
    if empty.iter().all(|z| *z) || empty.iter().all(|z| !*z) {
        Ok(())
    } else {
        Err(AmmError::InvariantViolation(
            "reserves and shares must be all zero or all positive",
        ))
    }
}
