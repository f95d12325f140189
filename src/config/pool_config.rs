//! Configuration of a constant-product pool.

use serde::{Deserialize, Serialize};

use crate::domain::{AccountId, FeeTier, TokenPair, BPS_DENOMINATOR};
use crate::error::AmmError;

/// Share divisor used when none is configured: 100 000 whole units of
/// token A seed a pool with 100 shares.
pub const DEFAULT_INITIAL_SHARE_DIVISOR: u64 = 1_000;

/// Immutable parameters of one pool.
///
/// # Validation
///
/// - The fee tier is strictly below 100 %, so every swap prices some input.
/// - `initial_share_divisor` is positive.
/// - The custody account is not the all-zero account.
///
/// The token pair is already validated by [`TokenPair`] itself.
/// Deserialization runs the same validation, and `fee_tier` and
/// `initial_share_divisor` may be omitted to take their defaults.
///
/// # Examples
///
/// ```
/// use twinpool::config::PoolConfig;
///
/// let text = format!(
///     r#"{{"account":"{acct}",
///         "token_pair":{{"token_a":{{"address":"{a}","decimals":18}},
///                        "token_b":{{"address":"{b}","decimals":18}}}}}}"#,
///     acct = "aa".repeat(32),
///     a = "01".repeat(32),
///     b = "02".repeat(32),
/// );
/// let config: PoolConfig = serde_json::from_str(&text).expect("valid config");
/// assert_eq!(config.initial_share_divisor(), 1_000);
/// assert!(config.fee_tier().is_zero());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PoolConfigRepr", into = "PoolConfigRepr")]
pub struct PoolConfig {
    token_pair: TokenPair,
    account: AccountId,
    fee_tier: FeeTier,
    initial_share_divisor: u64,
}

#[derive(Serialize, Deserialize)]
struct PoolConfigRepr {
    token_pair: TokenPair,
    account: AccountId,
    #[serde(default)]
    fee_tier: FeeTier,
    #[serde(default = "default_divisor")]
    initial_share_divisor: u64,
}

const fn default_divisor() -> u64 {
    DEFAULT_INITIAL_SHARE_DIVISOR
}

impl PoolConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if any rule above fails.
    pub fn new(
        token_pair: TokenPair,
        account: AccountId,
        fee_tier: FeeTier,
        initial_share_divisor: u64,
    ) -> Result<Self, AmmError> {
        let config = Self {
            token_pair,
            account,
            fee_tier,
            initial_share_divisor,
        };
        config.validate()?;
        Ok(config)
    }

    /// A fee-free configuration with the default share divisor.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `account` is the
    /// all-zero account.
    pub fn with_defaults(token_pair: TokenPair, account: AccountId) -> Result<Self, AmmError> {
        Self::new(
            token_pair,
            account,
            FeeTier::ZERO,
            DEFAULT_INITIAL_SHARE_DIVISOR,
        )
    }

    /// Checks every configuration rule.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] naming the first rule
    /// that fails.
    pub fn validate(&self) -> Result<(), AmmError> {
        if u32::from(self.fee_tier.basis_points().get()) >= BPS_DENOMINATOR {
            return Err(AmmError::InvalidConfiguration(
                "fee tier must be below 100%",
            ));
        }
        if self.initial_share_divisor == 0 {
            return Err(AmmError::InvalidConfiguration(
                "initial share divisor must be positive",
            ));
        }
        if self.account.is_zero() {
            return Err(AmmError::InvalidConfiguration(
                "custody account must not be the zero account",
            ));
        }
        Ok(())
    }

    /// The traded tokens, token A first.
    #[must_use]
    pub const fn token_pair(&self) -> &TokenPair {
        &self.token_pair
    }

    /// The custody account holding the pool's tokens.
    #[must_use]
    pub const fn account(&self) -> AccountId {
        self.account
    }

    /// The swap fee.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }

    /// Divisor applied to the normalized token A amount of a first deposit.
    #[must_use]
    pub const fn initial_share_divisor(&self) -> u64 {
        self.initial_share_divisor
    }
}

impl TryFrom<PoolConfigRepr> for PoolConfig {
    type Error = AmmError;

    fn try_from(repr: PoolConfigRepr) -> Result<Self, Self::Error> {
        Self::new(
            repr.token_pair,
            repr.account,
            repr.fee_tier,
            repr.initial_share_divisor,
        )
    }
}

impl From<PoolConfig> for PoolConfigRepr {
    fn from(config: PoolConfig) -> Self {
        Self {
            token_pair: config.token_pair,
            account: config.account,
            fee_tier: config.fee_tier,
            initial_share_divisor: config.initial_share_divisor,
        }
    }
}
