//! The constant-product pool engine.
//!
//! Every mutating operation follows the same sequence:
//!
//! 1. validate the inputs and compute the outcome from the current state;
//! 2. stage a `Transition` and check it against the pool invariants;
//! 3. settle the required token transfers with the host as one batch;
//! 4. commit the transition;
//! 5. emit one event.
//!
//! A failure in steps 1-3 returns an error with the pool untouched and no
//! event emitted.  Steps 4 and 5 cannot fail.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, warn};

use super::state::{PoolState, Transition, TransitionKind};
use crate::config::PoolConfig;
use crate::domain::{
    AccountId, Amount, Deposit, FeeTier, Shares, SwapResult, TokenAddress, TokenPair, Withdrawal,
};
use crate::error::{AmmError, Result};
use crate::events::PoolEvent;
use crate::math::{curve, CheckedArithmetic};
use crate::traits::{FromConfig, Host, TransferLeg};

/// A two-token constant-product pool with share accounting.
///
/// The pool owns its reserves and share ledger but holds no tokens
/// itself: tokens live in the host ledger under the configured custody
/// account, and the pool moves them only through the [`Host`] passed to
/// each operation.  All mutating methods take `&mut self`, so calls on one
/// pool are serialized and a host cannot re-enter the pool it is serving.
///
/// # Examples
///
/// ```
/// use twinpool::config::PoolConfig;
/// use twinpool::domain::{AccountId, Amount, Shares, Token, TokenAddress, TokenPair};
/// use twinpool::host::Sandbox;
/// use twinpool::pool::Pool;
///
/// let a = Token::with_max_precision(TokenAddress::from_bytes([1u8; 32]));
/// let b = Token::with_max_precision(TokenAddress::from_bytes([2u8; 32]));
/// let pair = TokenPair::new(a, b).expect("distinct tokens");
/// let custody = AccountId::from_bytes([0xcc; 32]);
/// let mut pool = Pool::new(PoolConfig::with_defaults(pair, custody).expect("valid"))
///     .expect("valid config");
///
/// let alice = AccountId::from_bytes([1u8; 32]);
/// let seed = Amount::new(a.to_raw_amount(100_000));
/// let mut host = Sandbox::new();
/// for token in [a, b] {
///     host.ledger.mint(token.address(), alice, seed).expect("mint");
///     host.ledger.approve(token.address(), alice, custody, seed);
/// }
///
/// let deposit = pool.add_liquidity(&mut host, alice, seed, seed).expect("first deposit");
/// assert_eq!(deposit.shares, Shares::from_whole(100));
/// assert_eq!(host.ledger.balance_of(a.address(), custody), pool.reserve_a());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool {
    config: PoolConfig,
    state: PoolState,
}

/// A serializable copy of a pool's configuration and state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolSnapshot {
    /// Token A and token B.
    pub token_pair: TokenPair,
    /// Custody account.
    pub account: AccountId,
    /// Swap fee.
    pub fee_tier: FeeTier,
    /// Token A reserve.
    pub reserve_a: Amount,
    /// Token B reserve.
    pub reserve_b: Amount,
    /// Shares outstanding.
    pub total_shares: Shares,
    /// Every provider's balance.
    pub providers: BTreeMap<AccountId, Shares>,
}

impl Pool {
    /// Creates an empty pool.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `config` fails
    /// validation.
    pub fn new(config: PoolConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: PoolState::new(),
        })
    }

    // -- queries --------------------------------------------------------------

    /// Token A reserve.
    pub const fn reserve_a(&self) -> Amount {
        self.state.reserve_a()
    }

    /// Token B reserve.
    pub const fn reserve_b(&self) -> Amount {
        self.state.reserve_b()
    }

    /// Shares outstanding.
    #[must_use]
    pub const fn total_shares(&self) -> Shares {
        self.state.total_shares()
    }

    /// Shares held by `account`.
    #[must_use]
    pub fn shares_of(&self, account: &AccountId) -> Shares {
        self.state.shares_of(account)
    }

    /// Providers with a positive balance, in account order.
    pub fn providers(&self) -> impl Iterator<Item = (AccountId, Shares)> + '_ {
        self.state.providers()
    }

    /// Token A and token B.
    #[must_use]
    pub const fn token_pair(&self) -> &TokenPair {
        self.config.token_pair()
    }

    /// Swap fee.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.config.fee_tier()
    }

    /// Custody account holding the reserves in the host ledger.
    #[must_use]
    pub const fn account(&self) -> AccountId {
        self.config.account()
    }

    /// The configuration the pool was built from.
    #[must_use]
    pub const fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Reserves and ledger.
    #[must_use]
    pub const fn state(&self) -> &PoolState {
        &self.state
    }

    /// `true` when the pool holds no reserves and no shares.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Price of one token A in token B, `reserve_b / reserve_a`, as an
    /// 18-decimal fixed-point value.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::EmptyPool`] on an empty pool.
    pub fn spot_price_a(&self) -> Result<Amount> {
        curve::spot_price(self.reserve_a(), self.reserve_b())
    }

    /// Price of one token B in token A, `reserve_a / reserve_b`, as an
    /// 18-decimal fixed-point value.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::EmptyPool`] on an empty pool.
    pub fn spot_price_b(&self) -> Result<Amount> {
        curve::spot_price(self.reserve_b(), self.reserve_a())
    }

    /// Copies configuration and state into a serializable value.
    #[must_use]
    pub fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            token_pair: *self.token_pair(),
            account: self.account(),
            fee_tier: self.fee_tier(),
            reserve_a: self.reserve_a(),
            reserve_b: self.reserve_b(),
            total_shares: self.total_shares(),
            providers: self.providers().collect(),
        }
    }

    // -- quotes ---------------------------------------------------------------

    /// Token B that must accompany `amount_a` of token A at the current
    /// ratio, truncated.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAmount`] if `amount_a` is zero.
    /// - [`AmmError::EmptyPool`] if the pool has no reserves.
    pub fn quote_deposit_b(&self, amount_a: Amount) -> Result<Amount> {
        curve::deposit_counterpart(amount_a, self.reserve_a(), self.reserve_b())
    }

    /// Token A that must accompany `amount_b` of token B at the current
    /// ratio, truncated.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAmount`] if `amount_b` is zero.
    /// - [`AmmError::EmptyPool`] if the pool has no reserves.
    pub fn quote_deposit_a(&self, amount_b: Amount) -> Result<Amount> {
        curve::deposit_counterpart(amount_b, self.reserve_b(), self.reserve_a())
    }

    /// What a swap of `amount_in` of `token_in` would pay out right now.
    ///
    /// Uses exactly the arithmetic of [`swap`](Self::swap) and changes
    /// nothing.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAmount`] if `amount_in` is zero or does not
    ///   cover the fee.
    /// - [`AmmError::EmptyPool`] if the pool has no reserves.
    /// - [`AmmError::InvalidToken`] if `token_in` is not in the pair.
    /// - [`AmmError::InsufficientOutput`] if the output rounds to zero.
    pub fn quote_swap(&self, token_in: TokenAddress, amount_in: Amount) -> Result<SwapResult> {
        if amount_in.is_zero() {
            return Err(AmmError::InvalidAmount("swap amount must be positive"));
        }
        if self.is_empty() {
            return Err(AmmError::EmptyPool);
        }
        let pair = self.token_pair();
        let token_out = pair.other(&token_in)?.address();
        let (reserve_in, reserve_out) = if pair.is_first(&token_in) {
            (self.reserve_a(), self.reserve_b())
        } else {
            (self.reserve_b(), self.reserve_a())
        };
        let (amount_out, fee) =
            curve::swap_output(reserve_in, reserve_out, amount_in, self.fee_tier())?;
        SwapResult::new(token_in, token_out, amount_in, amount_out, fee)
    }

    /// [`quote_swap`](Self::quote_swap) for token A in.
    ///
    /// # Errors
    ///
    /// As [`quote_swap`](Self::quote_swap).
    pub fn quote_swap_a(&self, amount_in: Amount) -> Result<SwapResult> {
        self.quote_swap(self.token_pair().first().address(), amount_in)
    }

    /// [`quote_swap`](Self::quote_swap) for token B in.
    ///
    /// # Errors
    ///
    /// As [`quote_swap`](Self::quote_swap).
    pub fn quote_swap_b(&self, amount_in: Amount) -> Result<SwapResult> {
        self.quote_swap(self.token_pair().second().address(), amount_in)
    }

    /// Token amounts that burning `shares` would pay out right now.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAmount`] if `shares` is zero.
    /// - [`AmmError::EmptyPool`] if the pool has no shares.
    /// - [`AmmError::InsufficientShares`] if `shares` exceeds the total.
    pub fn quote_withdrawal(&self, shares: Shares) -> Result<(Amount, Amount)> {
        if shares.is_zero() {
            return Err(AmmError::InvalidAmount("shares to burn must be positive"));
        }
        curve::withdrawal_amounts(
            self.reserve_a(),
            self.reserve_b(),
            self.total_shares(),
            shares,
        )
    }

    // -- operations -----------------------------------------------------------

    /// Deposits both tokens from `provider` and mints shares.
    ///
    /// Into an empty pool both amounts are taken as given and the shares
    /// minted are `amount_a` rescaled to 18 decimals and divided by the
    /// configured initial share divisor.  Into a funded pool the token B
    /// amount is re-derived from the current ratio; `amount_b` is only an
    /// upper bound on what may be pulled.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAmount`] on a zero amount, a ratio-derived
    ///   amount of zero, or a deposit too small to mint a share.
    /// - [`AmmError::RatioMismatch`] if `amount_b` is below the amount the
    ///   ratio requires.
    /// - [`AmmError::Transfer`] if the host refuses a transfer.
    pub fn add_liquidity<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        provider: AccountId,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<Deposit> {
        self.try_add_liquidity(host, provider, amount_a, amount_b)
            .map_err(|err| {
                warn!(%provider, %amount_a, %amount_b, error = %err, "add_liquidity rejected");
                err
            })
    }

    /// Swaps `amount_in` of `token_in` from `trader` for the other token.
    ///
    /// `min_amount_out` bounds the acceptable output; `None` accepts any
    /// positive output.
    ///
    /// # Errors
    ///
    /// - Everything [`quote_swap`](Self::quote_swap) returns.
    /// - [`AmmError::SlippageExceeded`] if the output is below
    ///   `min_amount_out`.
    /// - [`AmmError::Transfer`] if the host refuses a transfer.
    pub fn swap<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        trader: AccountId,
        token_in: TokenAddress,
        amount_in: Amount,
        min_amount_out: Option<Amount>,
    ) -> Result<SwapResult> {
        self.try_swap(host, trader, token_in, amount_in, min_amount_out)
            .map_err(|err| {
                warn!(%trader, %token_in, %amount_in, error = %err, "swap rejected");
                err
            })
    }

    /// Swaps token A for token B.
    ///
    /// # Errors
    ///
    /// As [`swap`](Self::swap).
    pub fn swap_token_a<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        trader: AccountId,
        amount_in: Amount,
        min_amount_out: Option<Amount>,
    ) -> Result<SwapResult> {
        let token_in = self.token_pair().first().address();
        self.swap(host, trader, token_in, amount_in, min_amount_out)
    }

    /// Swaps token B for token A.
    ///
    /// # Errors
    ///
    /// As [`swap`](Self::swap).
    pub fn swap_token_b<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        trader: AccountId,
        amount_in: Amount,
        min_amount_out: Option<Amount>,
    ) -> Result<SwapResult> {
        let token_in = self.token_pair().second().address();
        self.swap(host, trader, token_in, amount_in, min_amount_out)
    }

    /// Burns `shares` held by `provider` and pays out the proportional
    /// reserves.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAmount`] if `shares` is zero or redeems nothing.
    /// - [`AmmError::EmptyPool`] if the pool has no shares.
    /// - [`AmmError::InsufficientShares`] if `provider` holds fewer.
    /// - [`AmmError::Transfer`] if the host refuses a transfer.
    pub fn remove_liquidity<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        provider: AccountId,
        shares: Shares,
    ) -> Result<Withdrawal> {
        self.try_remove_liquidity(host, provider, shares)
            .map_err(|err| {
                warn!(%provider, %shares, error = %err, "remove_liquidity rejected");
                err
            })
    }

    // -- internals ------------------------------------------------------------

    fn try_add_liquidity<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        provider: AccountId,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<Deposit> {
        if amount_a.is_zero() || amount_b.is_zero() {
            return Err(AmmError::InvalidAmount("deposit amounts must be positive"));
        }

        let (pulled_b, minted) = if self.is_empty() {
            let minted = curve::initial_shares(
                amount_a,
                self.token_pair().first().decimals(),
                u128::from(self.config.initial_share_divisor()),
            )?;
            (amount_b, minted)
        } else {
            let required = self.quote_deposit_b(amount_a)?;
            if required.is_zero() {
                return Err(AmmError::InvalidAmount(
                    "deposit too small for the pool ratio",
                ));
            }
            if required > amount_b {
                return Err(AmmError::RatioMismatch {
                    required,
                    supplied: amount_b,
                });
            }
            let minted =
                curve::proportional_shares(self.total_shares(), amount_a, self.reserve_a())?;
            (required, minted)
        };

        let mut transition = self.state.stage(TransitionKind::Deposit);
        transition.reserve_a = self.reserve_a().safe_add(&amount_a)?;
        transition.reserve_b = self.reserve_b().safe_add(&pulled_b)?;
        transition.total_shares = self.total_shares().safe_add(&minted)?;
        let balance = self.shares_of(&provider).safe_add(&minted)?;
        transition.provider = Some((provider, balance));

        let custody = self.account();
        let legs = [
            TransferLeg::Pull {
                token: self.token_pair().first().address(),
                owner: provider,
                spender: custody,
                amount: amount_a,
            },
            TransferLeg::Pull {
                token: self.token_pair().second().address(),
                owner: provider,
                spender: custody,
                amount: pulled_b,
            },
        ];
        self.apply(host, transition, &legs)?;

        debug!(
            %provider,
            %amount_a,
            amount_b = %pulled_b,
            shares = %minted,
            reserve_a = %self.reserve_a(),
            reserve_b = %self.reserve_b(),
            "liquidity added"
        );
        let timestamp = host.now();
        host.emit(PoolEvent::LiquidityAdded {
            provider,
            amount_a,
            amount_b: pulled_b,
            shares: minted,
            reserve_a: self.reserve_a(),
            reserve_b: self.reserve_b(),
            timestamp,
        });
        Ok(Deposit {
            amount_a,
            amount_b: pulled_b,
            shares: minted,
        })
    }

    fn try_swap<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        trader: AccountId,
        token_in: TokenAddress,
        amount_in: Amount,
        min_amount_out: Option<Amount>,
    ) -> Result<SwapResult> {
        let quote = self.quote_swap(token_in, amount_in)?;
        let amount_out = quote.amount_out();
        if let Some(minimum) = min_amount_out {
            if amount_out < minimum {
                return Err(AmmError::SlippageExceeded {
                    minimum,
                    actual: amount_out,
                });
            }
        }

        let mut transition = self.state.stage(TransitionKind::Swap);
        if self.token_pair().is_first(&token_in) {
            transition.reserve_a = self.reserve_a().safe_add(&amount_in)?;
            transition.reserve_b = self.reserve_b().safe_sub(&amount_out)?;
        } else {
            transition.reserve_b = self.reserve_b().safe_add(&amount_in)?;
            transition.reserve_a = self.reserve_a().safe_sub(&amount_out)?;
        }

        let custody = self.account();
        let legs = [
            TransferLeg::Pull {
                token: token_in,
                owner: trader,
                spender: custody,
                amount: amount_in,
            },
            TransferLeg::Push {
                token: quote.token_out(),
                from: custody,
                to: trader,
                amount: amount_out,
            },
        ];
        self.apply(host, transition, &legs)?;

        debug!(
            %trader,
            %token_in,
            %amount_in,
            %amount_out,
            fee = %quote.fee(),
            reserve_a = %self.reserve_a(),
            reserve_b = %self.reserve_b(),
            "swap executed"
        );
        let timestamp = host.now();
        host.emit(PoolEvent::Swap {
            trader,
            token_in,
            amount_in,
            token_out: quote.token_out(),
            amount_out,
            reserve_a: self.reserve_a(),
            reserve_b: self.reserve_b(),
            timestamp,
        });
        Ok(quote)
    }

    fn try_remove_liquidity<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        provider: AccountId,
        shares: Shares,
    ) -> Result<Withdrawal> {
        if shares.is_zero() {
            return Err(AmmError::InvalidAmount("shares to burn must be positive"));
        }
        if self.is_empty() {
            return Err(AmmError::EmptyPool);
        }
        let held = self.shares_of(&provider);
        if shares > held {
            return Err(AmmError::InsufficientShares {
                requested: shares,
                available: held,
            });
        }
        let (amount_a, amount_b) = self.quote_withdrawal(shares)?;
        if amount_a.is_zero() && amount_b.is_zero() {
            return Err(AmmError::InvalidAmount("withdrawal too small to pay out"));
        }

        let mut transition = self.state.stage(TransitionKind::Withdrawal);
        transition.reserve_a = self.reserve_a().safe_sub(&amount_a)?;
        transition.reserve_b = self.reserve_b().safe_sub(&amount_b)?;
        transition.total_shares = self.total_shares().safe_sub(&shares)?;
        transition.provider = Some((provider, held.safe_sub(&shares)?));

        let custody = self.account();
        let legs: Vec<TransferLeg> = [
            (self.token_pair().first().address(), amount_a),
            (self.token_pair().second().address(), amount_b),
        ]
        .into_iter()
        .filter(|(_, amount)| !amount.is_zero())
        .map(|(token, amount)| TransferLeg::Push {
            token,
            from: custody,
            to: provider,
            amount,
        })
        .collect();
        self.apply(host, transition, &legs)?;

        debug!(
            %provider,
            %amount_a,
            %amount_b,
            %shares,
            reserve_a = %self.reserve_a(),
            reserve_b = %self.reserve_b(),
            "liquidity removed"
        );
        let timestamp = host.now();
        host.emit(PoolEvent::LiquidityRemoved {
            provider,
            amount_a,
            amount_b,
            shares,
            reserve_a: self.reserve_a(),
            reserve_b: self.reserve_b(),
            timestamp,
        });
        Ok(Withdrawal {
            amount_a,
            amount_b,
            shares,
        })
    }

    /// Validates, settles and commits.  Nothing is committed unless the
    /// transition is valid and every leg settled.
    fn apply<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        transition: Transition,
        legs: &[TransferLeg],
    ) -> Result<()> {
        transition.validate(&self.state)?;
        host.settle(legs)?;
        self.state.commit(transition);
        Ok(())
    }
}

impl FromConfig<PoolConfig> for Pool {
    fn from_config(config: &PoolConfig) -> Result<Self> {
        Self::new(config.clone())
    }
}
