//! The settlement ledger as the pool sees it.
//!
//! The engine never moves tokens itself.  Each operation describes the
//! transfers it needs as a list of [`TransferLeg`]s and hands them to
//! [`TokenTransfer::settle`] before it commits any state.  If settlement
//! fails the operation fails and the pool is untouched.

use thiserror::Error;
use tracing::error;

use crate::domain::{AccountId, Amount, TokenAddress};

/// Why a ledger transfer was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// The sending account holds less than the transfer amount.
    #[error("insufficient balance of {token} in {account}: needed {needed}, held {available}")]
    InsufficientBalance {
        /// Token being moved.
        token: TokenAddress,
        /// Sending account.
        account: AccountId,
        /// Amount the transfer required.
        needed: Amount,
        /// Amount the account held.
        available: Amount,
    },

    /// The owner approved the spender for less than the transfer amount.
    #[error("insufficient allowance of {token} from {owner}: needed {needed}, approved {approved}")]
    InsufficientAllowance {
        /// Token being moved.
        token: TokenAddress,
        /// Account whose tokens are pulled.
        owner: AccountId,
        /// Amount the transfer required.
        needed: Amount,
        /// Amount currently approved.
        approved: Amount,
    },

    /// The ledger does not know this token.
    #[error("unknown token {0}")]
    UnknownToken(TokenAddress),

    /// A completed leg could not be reversed after a later leg failed.
    /// The ledger may be inconsistent with the pool.
    #[error("could not reverse settlement leg {leg}")]
    RollbackFailed {
        /// Index of the leg whose undo failed.
        leg: usize,
    },
}

/// One token movement required by a pool operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferLeg {
    /// Move `amount` from `owner` to `spender` using `owner`'s allowance
    /// for `spender`.
    Pull {
        /// Token to move.
        token: TokenAddress,
        /// Account paying.
        owner: AccountId,
        /// Account receiving, which must hold the allowance.
        spender: AccountId,
        /// Raw amount.
        amount: Amount,
    },
    /// Move `amount` from `from` to `to` on the authority of `from`.
    Push {
        /// Token to move.
        token: TokenAddress,
        /// Account paying.
        from: AccountId,
        /// Account receiving.
        to: AccountId,
        /// Raw amount.
        amount: Amount,
    },
}

/// A fungible-token ledger that the pool settles against.
pub trait TokenTransfer {
    /// Moves `amount` of `token` from `owner` to `spender`, consuming
    /// `owner`'s allowance for `spender`.
    ///
    /// # Errors
    ///
    /// Any [`TransferError`]; on error nothing must have moved.
    fn pull(
        &mut self,
        token: TokenAddress,
        owner: AccountId,
        spender: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError>;

    /// Moves `amount` of `token` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Any [`TransferError`]; on error nothing must have moved.
    fn push(
        &mut self,
        token: TokenAddress,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError>;

    /// Reverses an earlier [`pull`](Self::pull): moves `amount` of `token`
    /// from `spender` back to `owner` and gives `owner`'s allowance for
    /// `spender` back the same amount.
    ///
    /// # Errors
    ///
    /// Any [`TransferError`]; on error nothing must have moved.
    fn refund(
        &mut self,
        token: TokenAddress,
        owner: AccountId,
        spender: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError>;

    /// Executes a single leg.
    ///
    /// # Errors
    ///
    /// Whatever [`pull`](Self::pull) or [`push`](Self::push) returns.
    fn execute(&mut self, leg: &TransferLeg) -> Result<(), TransferError> {
        match *leg {
            TransferLeg::Pull {
                token,
                owner,
                spender,
                amount,
            } => self.pull(token, owner, spender, amount),
            TransferLeg::Push {
                token,
                from,
                to,
                amount,
            } => self.push(token, from, to, amount),
        }
    }

    /// Undoes a leg executed earlier.  A pull is refunded, allowance
    /// included; a push is pushed back.
    ///
    /// # Errors
    ///
    /// Whatever [`refund`](Self::refund) or [`push`](Self::push) returns.
    fn undo(&mut self, leg: &TransferLeg) -> Result<(), TransferError> {
        match *leg {
            TransferLeg::Pull {
                token,
                owner,
                spender,
                amount,
            } => self.refund(token, owner, spender, amount),
            TransferLeg::Push {
                token,
                from,
                to,
                amount,
            } => self.push(token, to, from, amount),
        }
    }

    /// Executes every leg or none of them.
    ///
    /// Legs run in order.  When one fails, the legs already executed are
    /// undone newest first and the original error is returned.  If an
    /// undo itself fails the result is
    /// [`TransferError::RollbackFailed`].  Ledgers that can apply a batch
    /// atomically should override this.
    ///
    /// # Errors
    ///
    /// The first leg's error, or `RollbackFailed`.
    fn settle(&mut self, legs: &[TransferLeg]) -> Result<(), TransferError> {
        for (index, leg) in legs.iter().enumerate() {
            if let Err(cause) = self.execute(leg) {
                for (done_index, done) in legs[..index].iter().enumerate().rev() {
                    if self.undo(done).is_err() {
                        error!(leg = done_index, %cause, "settlement rollback failed");
                        return Err(TransferError::RollbackFailed { leg: done_index });
                    }
                }
                return Err(cause);
            }
        }
        Ok(())
    }
}
