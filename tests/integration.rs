//! End-to-end flows through the public API: config to pool, the reference
//! liquidity scenario, swaps against a real ledger, and failure atomicity.

#![allow(clippy::panic)]

use twinpool::config::PoolConfig;
use twinpool::domain::{
    AccountId, Amount, Decimals, FeeTier, Shares, Timestamp, Token, TokenAddress, TokenPair,
};
use twinpool::error::AmmError;
use twinpool::events::PoolEvent;
use twinpool::host::{EventLog, ManualClock, MemoryLedger, Sandbox};
use twinpool::pool::Pool;
use twinpool::traits::{Clock, EventSink, FromConfig, TokenTransfer, TransferError};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const WHOLE: u128 = 1_000_000_000_000_000_000;

fn tok_a() -> Token {
    Token::with_max_precision(TokenAddress::from_bytes([1u8; 32]))
}

fn tok_b() -> Token {
    Token::with_max_precision(TokenAddress::from_bytes([2u8; 32]))
}

fn custody() -> AccountId {
    AccountId::from_bytes([0xcc; 32])
}

fn alice() -> AccountId {
    AccountId::from_bytes([0xa1; 32])
}

fn bob() -> AccountId {
    AccountId::from_bytes([0xb0; 32])
}

fn carol() -> AccountId {
    AccountId::from_bytes([0xc0; 32])
}

fn tokens(whole: u128) -> Amount {
    Amount::new(whole * WHOLE)
}

fn make_pool() -> Pool {
    let Ok(pair) = TokenPair::new(tok_a(), tok_b()) else {
        panic!("valid pair");
    };
    let Ok(cfg) = PoolConfig::with_defaults(pair, custody()) else {
        panic!("valid config");
    };
    let Ok(pool) = Pool::new(cfg) else {
        panic!("valid pool");
    };
    pool
}

fn fund(ledger: &mut MemoryLedger, account: AccountId, whole: u128) {
    for token in [tok_a(), tok_b()] {
        let Ok(()) = ledger.mint(token.address(), account, tokens(whole)) else {
            panic!("mint");
        };
        ledger.approve(token.address(), account, custody(), Amount::MAX);
    }
}

fn funded_host() -> Sandbox {
    let mut host = Sandbox::with_parts(
        MemoryLedger::new(),
        EventLog::new(),
        ManualClock::at(Timestamp::from_secs(1_700_000_000)),
    );
    fund(&mut host.ledger, alice(), 1_000_000);
    fund(&mut host.ledger, bob(), 1_000_000);
    fund(&mut host.ledger, carol(), 10);
    host
}

/// Alice seeds 100 000 / 100 000.
fn seeded() -> (Pool, Sandbox) {
    let mut pool = make_pool();
    let mut host = funded_host();
    let Ok(_) = pool.add_liquidity(&mut host, alice(), tokens(100_000), tokens(100_000)) else {
        panic!("seed deposit");
    };
    (pool, host)
}

fn custody_balances(host: &Sandbox) -> (Amount, Amount) {
    (
        host.ledger.balance_of(tok_a().address(), custody()),
        host.ledger.balance_of(tok_b().address(), custody()),
    )
}

// ---------------------------------------------------------------------------
// Reference scenario
// ---------------------------------------------------------------------------

#[test]
fn reference_scenario_shares() {
    let (mut pool, mut host) = seeded();
    assert_eq!(pool.shares_of(&alice()), Shares::from_whole(100));

    let Ok(deposit) = pool.add_liquidity(&mut host, bob(), tokens(50_000), tokens(60_000)) else {
        panic!("second deposit");
    };
    assert_eq!(deposit.amount_a, tokens(50_000));
    assert_eq!(deposit.amount_b, tokens(50_000));
    assert_eq!(deposit.shares, Shares::from_whole(50));

    assert_eq!(pool.shares_of(&bob()), Shares::from_whole(50));
    assert_eq!(pool.total_shares(), Shares::from_whole(150));
    assert_eq!(pool.state().provider_count(), 2);
    assert_eq!(custody_balances(&host), (pool.reserve_a(), pool.reserve_b()));
    assert_eq!(
        host.ledger.balance_of(tok_b().address(), bob()),
        tokens(950_000)
    );
    assert_eq!(pool.state().check_invariants(), Ok(()));
}

#[test]
fn one_token_swap_matches_quote_and_balances() {
    let (mut pool, mut host) = seeded();
    let Ok(quote) = pool.quote_swap_a(tokens(1)) else {
        panic!("quote");
    };
    let before = host.ledger.balance_of(tok_b().address(), bob());

    let Ok(result) = pool.swap_token_a(&mut host, bob(), tokens(1), None) else {
        panic!("swap");
    };
    assert_eq!(result, quote);
    // The exact output is 999_990_000_099_999_000.0099...  The kept reserve
    // is rounded up, so the trader gets the floor; rounding the kept
    // reserve down would pay ..._001 and shrink the product by one unit.
    assert_eq!(result.amount_out(), Amount::new(999_990_000_099_999_000));
    assert!(result.amount_out() < tokens(1));

    let after = host.ledger.balance_of(tok_b().address(), bob());
    assert_eq!(after.get() - before.get(), result.amount_out().get());
    assert_eq!(custody_balances(&host), (pool.reserve_a(), pool.reserve_b()));
}

#[test]
fn swap_emits_event_with_post_swap_reserves() {
    let (mut pool, mut host) = seeded();
    host.clock.advance(12);
    let Ok(result) = pool.swap_token_b(&mut host, bob(), tokens(10), None) else {
        panic!("swap");
    };
    let Some(event) = host.events.last() else {
        panic!("expected an event");
    };
    assert_eq!(
        *event,
        PoolEvent::Swap {
            trader: bob(),
            token_in: tok_b().address(),
            amount_in: tokens(10),
            token_out: tok_a().address(),
            amount_out: result.amount_out(),
            reserve_a: pool.reserve_a(),
            reserve_b: pool.reserve_b(),
            timestamp: Timestamp::from_secs(1_700_000_012),
        }
    );
    assert_eq!(host.events.len(), 2);
}

#[test]
fn fee_stays_in_the_pool() {
    let Ok(pair) = TokenPair::new(tok_a(), tok_b()) else {
        panic!("valid pair");
    };
    let Ok(cfg) = PoolConfig::new(pair, custody(), FeeTier::TIER_0_30_PERCENT, 1_000) else {
        panic!("valid config");
    };
    let Ok(mut pool) = Pool::new(cfg) else {
        panic!("valid pool");
    };
    let mut host = funded_host();
    let Ok(_) = pool.add_liquidity(&mut host, alice(), tokens(100_000), tokens(100_000)) else {
        panic!("seed deposit");
    };

    let Ok(result) = pool.swap_token_a(&mut host, bob(), tokens(1_000), None) else {
        panic!("swap");
    };
    assert_eq!(result.fee(), tokens(3));
    assert_eq!(pool.reserve_a(), tokens(101_000));

    // Alice alone owns the pool, so she redeems the fee too.
    let Ok(out) = pool.remove_liquidity(&mut host, alice(), Shares::from_whole(100)) else {
        panic!("withdrawal");
    };
    assert_eq!(out.amount_a, tokens(101_000));
    assert!(pool.is_empty());
    assert_eq!(custody_balances(&host), (Amount::ZERO, Amount::ZERO));
}

// ---------------------------------------------------------------------------
// Withdrawal
// ---------------------------------------------------------------------------

#[test]
fn deposit_and_full_withdrawal_round_trip() {
    let (mut pool, mut host) = seeded();
    let Ok(deposit) = pool.add_liquidity(&mut host, bob(), tokens(50_000), tokens(50_000)) else {
        panic!("deposit");
    };
    let Ok(out) = pool.remove_liquidity(&mut host, bob(), deposit.shares) else {
        panic!("withdrawal");
    };
    assert_eq!(out.amount_a, tokens(50_000));
    assert_eq!(out.amount_b, tokens(50_000));
    assert_eq!(pool.shares_of(&bob()), Shares::ZERO);
    assert_eq!(pool.state().provider_count(), 1);
    assert_eq!(
        host.ledger.balance_of(tok_a().address(), bob()),
        tokens(1_000_000)
    );
    let Some(PoolEvent::LiquidityRemoved { shares, .. }) = host.events.last().copied() else {
        panic!("expected LiquidityRemoved");
    };
    assert_eq!(shares, deposit.shares);
}

#[test]
fn withdrawing_more_than_held_is_rejected() {
    let (mut pool, mut host) = seeded();
    let before = pool.clone();
    let Err(e) = pool.remove_liquidity(&mut host, bob(), Shares::from_whole(1)) else {
        panic!("expected Err");
    };
    assert!(matches!(e, AmmError::InsufficientShares { .. }));
    assert_eq!(pool, before);
}

// ---------------------------------------------------------------------------
// Failure atomicity
// ---------------------------------------------------------------------------

#[test]
fn unfunded_trader_leaves_everything_untouched() {
    let (mut pool, mut host) = seeded();
    let pool_before = pool.clone();
    let ledger_before = host.ledger.clone();
    let events_before = host.events.len();

    let Err(e) = pool.swap_token_a(&mut host, carol(), tokens(11), None) else {
        panic!("expected Err");
    };
    assert!(matches!(
        e,
        AmmError::Transfer(TransferError::InsufficientBalance { .. })
    ));
    assert_eq!(pool, pool_before);
    assert_eq!(host.ledger, ledger_before);
    assert_eq!(host.events.len(), events_before);
}

#[test]
fn slippage_bound_is_enforced_before_settlement() {
    let (mut pool, mut host) = seeded();
    let Ok(quote) = pool.quote_swap_a(tokens(1)) else {
        panic!("quote");
    };
    let ledger_before = host.ledger.clone();
    let minimum = Amount::new(quote.amount_out().get() + 1);
    let Err(e) = pool.swap_token_a(&mut host, bob(), tokens(1), Some(minimum)) else {
        panic!("expected Err");
    };
    assert_eq!(
        e,
        AmmError::SlippageExceeded {
            minimum,
            actual: quote.amount_out(),
        }
    );
    assert_eq!(host.ledger, ledger_before);

    let Ok(result) = pool.swap_token_a(&mut host, bob(), tokens(1), Some(quote.amount_out()))
    else {
        panic!("swap at the quoted minimum");
    };
    assert_eq!(result.amount_out(), quote.amount_out());
}

#[test]
fn foreign_token_is_rejected() {
    let (mut pool, mut host) = seeded();
    let stranger = TokenAddress::from_bytes([9u8; 32]);
    let Err(e) = pool.swap(&mut host, bob(), stranger, tokens(1), None) else {
        panic!("expected Err");
    };
    assert!(matches!(e, AmmError::InvalidToken(_)));
    assert_eq!(pool.quote_swap(stranger, tokens(1)), Err(e));
}

/// A host that refuses every movement of one token and relies on the
/// default compensating `settle`.
struct FrozenToken {
    ledger: MemoryLedger,
    frozen: TokenAddress,
    events: Vec<PoolEvent>,
}

impl FrozenToken {
    fn over(ledger: MemoryLedger, frozen: TokenAddress) -> Self {
        Self {
            ledger,
            frozen,
            events: Vec::new(),
        }
    }

    fn check(&self, token: TokenAddress) -> Result<(), TransferError> {
        if token == self.frozen {
            Err(TransferError::UnknownToken(token))
        } else {
            Ok(())
        }
    }
}

impl TokenTransfer for FrozenToken {
    fn pull(
        &mut self,
        token: TokenAddress,
        owner: AccountId,
        spender: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        self.check(token)?;
        self.ledger.pull(token, owner, spender, amount)
    }

    fn push(
        &mut self,
        token: TokenAddress,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        self.check(token)?;
        self.ledger.push(token, from, to, amount)
    }

    fn refund(
        &mut self,
        token: TokenAddress,
        owner: AccountId,
        spender: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        self.check(token)?;
        self.ledger.refund(token, owner, spender, amount)
    }
}

impl EventSink for FrozenToken {
    fn emit(&mut self, event: PoolEvent) {
        self.events.push(event);
    }
}

impl Clock for FrozenToken {
    fn now(&self) -> Timestamp {
        Timestamp::EPOCH
    }
}

#[test]
fn failed_payout_restores_the_ledger_exactly() {
    let (mut pool, seed_host) = seeded();
    let mut host = FrozenToken::over(seed_host.ledger, tok_b().address());
    let pool_before = pool.clone();
    let ledger_before = host.ledger.clone();

    let Err(e) = pool.swap_token_a(&mut host, bob(), tokens(1), None) else {
        panic!("expected Err");
    };
    assert_eq!(
        e,
        AmmError::Transfer(TransferError::UnknownToken(tok_b().address()))
    );
    assert_eq!(pool, pool_before);
    assert_eq!(host.ledger, ledger_before);
    assert_eq!(
        host.ledger.allowance(tok_a().address(), bob(), custody()),
        Amount::MAX
    );
    assert!(host.events.is_empty());
}

#[test]
fn failed_second_pull_refunds_the_first_with_allowance() {
    let (mut pool, mut seed_host) = seeded();
    seed_host
        .ledger
        .approve(tok_a().address(), bob(), custody(), tokens(500));
    let mut host = FrozenToken::over(seed_host.ledger, tok_b().address());
    let pool_before = pool.clone();
    let ledger_before = host.ledger.clone();

    let Err(e) = pool.add_liquidity(&mut host, bob(), tokens(500), tokens(500)) else {
        panic!("expected Err");
    };
    assert!(matches!(e, AmmError::Transfer(_)));
    assert_eq!(pool, pool_before);
    assert_eq!(host.ledger, ledger_before);
    assert_eq!(
        host.ledger.allowance(tok_a().address(), bob(), custody()),
        tokens(500)
    );
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn pool_from_toml_config() {
    let text = format!(
        r#"
account = "{custody}"
fee_tier = 5
initial_share_divisor = 1000

[token_pair.token_a]
address = "{a}"
decimals = 18

[token_pair.token_b]
address = "{b}"
decimals = 6
"#,
        custody = "cc".repeat(32),
        a = "01".repeat(32),
        b = "02".repeat(32),
    );
    let Ok(cfg) = toml::from_str::<PoolConfig>(&text) else {
        panic!("expected valid TOML config");
    };
    let Ok(pool) = Pool::from_config(&cfg) else {
        panic!("pool from config");
    };
    assert_eq!(pool.fee_tier(), FeeTier::TIER_0_05_PERCENT);
    assert_eq!(pool.account(), custody());
    let Ok(six) = Decimals::new(6) else {
        panic!("valid decimals");
    };
    assert_eq!(pool.token_pair().second().decimals(), six);
    assert!(pool.is_empty());
}

#[test]
fn snapshot_serializes_reserves() {
    let (pool, _) = seeded();
    let Ok(json) = serde_json::to_string(&pool.snapshot()) else {
        panic!("serializable snapshot");
    };
    assert!(json.contains(&tokens(100_000).get().to_string()));
}
