//! Property-based tests for the pool engine.
//!
//! 1. **Ledger conservation**: total shares equal the ledger sum after any
//!    sequence of operations.
//! 2. **Product monotonicity**: every successful swap keeps or grows
//!    `reserve_a * reserve_b`.
//! 3. **Quote purity**: quotes never mutate and are repeatable.
//! 4. **No value leak**: deposit then full redemption returns at most what
//!    was deposited.
//! 5. **Bounded output**: any swap pays strictly less than the reserve.
//! 6. **Swap round trip**: A to B to A returns at most the original input.

use proptest::prelude::*;

use super::Pool;
use crate::config::PoolConfig;
use crate::domain::{AccountId, Amount, FeeTier, Shares, Token, TokenAddress, TokenPair};
use crate::host::Sandbox;
use crate::math::wide_product;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const FUNDING: u128 = 1_000_000_000_000_000_000_000_000_000_000;

fn tok_a() -> Token {
    Token::with_max_precision(TokenAddress::from_bytes([0xa0; 32]))
}

fn tok_b() -> Token {
    Token::with_max_precision(TokenAddress::from_bytes([0xb0; 32]))
}

fn custody() -> AccountId {
    AccountId::from_bytes([0xcc; 32])
}

fn account(index: u8) -> AccountId {
    AccountId::from_bytes([index + 1; 32])
}

fn make_pool(fee: FeeTier) -> Pool {
    let Ok(pair) = TokenPair::new(tok_a(), tok_b()) else {
        panic!("valid pair");
    };
    let Ok(cfg) = PoolConfig::new(pair, custody(), fee, 1_000) else {
        panic!("valid config");
    };
    let Ok(pool) = Pool::new(cfg) else {
        panic!("valid pool");
    };
    pool
}

/// Three accounts, each funded with and approving `FUNDING` of both tokens.
fn make_host() -> Sandbox {
    let mut host = Sandbox::new();
    for index in 0..3 {
        for token in [tok_a(), tok_b()] {
            let Ok(()) = host
                .ledger
                .mint(token.address(), account(index), Amount::new(FUNDING))
            else {
                panic!("mint");
            };
            host.ledger
                .approve(token.address(), account(index), custody(), Amount::MAX);
        }
    }
    host
}

fn seeded(fee: FeeTier, ra: u128, rb: u128) -> (Pool, Sandbox) {
    let mut pool = make_pool(fee);
    let mut host = make_host();
    let Ok(_) = pool.add_liquidity(&mut host, account(0), Amount::new(ra), Amount::new(rb)) else {
        panic!("seed deposit");
    };
    (pool, host)
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Op {
    Add { who: u8, amount_a: u128, amount_b: u128 },
    Swap { who: u8, a_in: bool, amount: u128 },
    Remove { who: u8, share_bps: u16 },
}

/// Reserves from a thousandth of a token up to ten million tokens.
fn reserve_strategy() -> impl Strategy<Value = u128> {
    1_000_000_000_000_000u128..=10_000_000_000_000_000_000_000_000u128
}

fn fee_strategy() -> impl Strategy<Value = FeeTier> {
    prop_oneof![
        Just(FeeTier::ZERO),
        Just(FeeTier::TIER_0_05_PERCENT),
        Just(FeeTier::TIER_0_30_PERCENT),
        Just(FeeTier::TIER_1_00_PERCENT),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..3, reserve_strategy(), reserve_strategy()).prop_map(|(who, amount_a, amount_b)| {
            Op::Add {
                who,
                amount_a,
                amount_b,
            }
        }),
        (0u8..3, any::<bool>(), 1u128..=FUNDING / 1_000)
            .prop_map(|(who, a_in, amount)| Op::Swap { who, a_in, amount }),
        (0u8..3, 1u16..=10_000).prop_map(|(who, share_bps)| Op::Remove { who, share_bps }),
    ]
}

fn run(pool: &mut Pool, host: &mut Sandbox, op: &Op) {
    // Individual operations may be rejected; only the state they leave matters.
    match *op {
        Op::Add {
            who,
            amount_a,
            amount_b,
        } => {
            let _ = pool.add_liquidity(
                host,
                account(who),
                Amount::new(amount_a),
                Amount::new(amount_b),
            );
        }
        Op::Swap { who, a_in, amount } => {
            let amount = Amount::new(amount);
            let _ = if a_in {
                pool.swap_token_a(host, account(who), amount, None)
            } else {
                pool.swap_token_b(host, account(who), amount, None)
            };
        }
        Op::Remove { who, share_bps } => {
            let held = pool.shares_of(&account(who)).get();
            let shares = held / 10_000 * u128::from(share_bps);
            let _ = pool.remove_liquidity(host, account(who), Shares::new(shares));
        }
    }
}

// ---------------------------------------------------------------------------
// Property 1: Ledger conservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_ledger_sum_matches_total(
        fee in fee_strategy(),
        ops in prop::collection::vec(op_strategy(), 1..40),
    ) {
        let mut pool = make_pool(fee);
        let mut host = make_host();
        for op in &ops {
            run(&mut pool, &mut host, op);
            prop_assert_eq!(pool.state().check_invariants(), Ok(()));
            prop_assert_eq!(
                host.ledger.balance_of(tok_a().address(), custody()),
                pool.reserve_a()
            );
            prop_assert_eq!(
                host.ledger.balance_of(tok_b().address(), custody()),
                pool.reserve_b()
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Property 2: Product monotonicity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_swap_never_shrinks_product(
        fee in fee_strategy(),
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        amount in 1u128..=FUNDING / 1_000,
        a_in in any::<bool>(),
    ) {
        let (mut pool, mut host) = seeded(fee, ra, rb);
        let k_before = wide_product(pool.reserve_a().get(), pool.reserve_b().get());
        let result = if a_in {
            pool.swap_token_a(&mut host, account(1), Amount::new(amount), None)
        } else {
            pool.swap_token_b(&mut host, account(1), Amount::new(amount), None)
        };
        if result.is_ok() {
            let k_after = wide_product(pool.reserve_a().get(), pool.reserve_b().get());
            prop_assert!(k_after >= k_before);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 3: Quote purity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_quotes_are_pure(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        amount in 1u128..=FUNDING,
    ) {
        let (pool, _) = seeded(FeeTier::TIER_0_30_PERCENT, ra, rb);
        let before = pool.clone();
        let amount = Amount::new(amount);
        prop_assert_eq!(pool.quote_swap_a(amount), pool.quote_swap_a(amount));
        prop_assert_eq!(pool.quote_swap_b(amount), pool.quote_swap_b(amount));
        prop_assert_eq!(pool.quote_deposit_b(amount), pool.quote_deposit_b(amount));
        prop_assert_eq!(pool.quote_deposit_a(amount), pool.quote_deposit_a(amount));
        prop_assert_eq!(pool, before);
    }

    #[test]
    fn prop_quote_matches_execution(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        amount in 1u128..=FUNDING / 1_000,
    ) {
        let (mut pool, mut host) = seeded(FeeTier::TIER_0_30_PERCENT, ra, rb);
        let quote = pool.quote_swap_a(Amount::new(amount));
        let executed = pool.swap_token_a(&mut host, account(1), Amount::new(amount), None);
        prop_assert_eq!(quote, executed);
    }
}

// ---------------------------------------------------------------------------
// Property 4: No value leak through a deposit round trip
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_deposit_then_redeem_returns_at_most_deposit(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        amount_a in reserve_strategy(),
    ) {
        let (mut pool, mut host) = seeded(FeeTier::ZERO, ra, rb);
        let Ok(deposit) = pool.add_liquidity(&mut host, account(1), Amount::new(amount_a), Amount::MAX)
        else {
            return Ok(());
        };
        let Ok(withdrawal) = pool.remove_liquidity(&mut host, account(1), deposit.shares) else {
            return Ok(());
        };
        prop_assert!(withdrawal.amount_a <= deposit.amount_a);
        prop_assert!(withdrawal.amount_b <= deposit.amount_b);
    }
}

// ---------------------------------------------------------------------------
// Property 5: Output strictly below the reserve
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_output_below_reserve(
        fee in fee_strategy(),
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        amount in 1u128..=u128::MAX / 2,
    ) {
        let (pool, _) = seeded(fee, ra, rb);
        if let Ok(quote) = pool.quote_swap_a(Amount::new(amount)) {
            prop_assert!(quote.amount_out() < pool.reserve_b());
            prop_assert!(!quote.amount_out().is_zero());
        }
    }
}

// ---------------------------------------------------------------------------
// Property 6: Swap round trip
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_swap_round_trip_loses_value(
        fee in fee_strategy(),
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        amount in 1u128..=FUNDING / 1_000,
    ) {
        let (mut pool, mut host) = seeded(fee, ra, rb);
        let Ok(forward) = pool.swap_token_a(&mut host, account(1), Amount::new(amount), None) else {
            return Ok(());
        };
        let Ok(back) = pool.swap_token_b(&mut host, account(1), forward.amount_out(), None) else {
            return Ok(());
        };
        prop_assert!(
            back.amount_out() <= Amount::new(amount),
            "round trip gained value: {} > {}",
            back.amount_out(),
            amount
        );
    }
}
