//! Reference pool walkthrough.
//!
//! Seeds a 100 000 / 100 000 pool, adds a second provider, trades in both
//! directions and withdraws, logging every pool event through `tracing`.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=twinpool=debug cargo run --example reference_pool
//! ```

use tracing_subscriber::EnvFilter;
use twinpool::config::PoolConfig;
use twinpool::domain::{AccountId, Amount, Decimals, FeeTier, Token, TokenAddress, TokenPair};
use twinpool::host::{MemoryLedger, Sandbox, SystemClock, TracingSink};
use twinpool::pool::Pool;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // ── 1. Tokens, accounts and a funded ledger ─────────────────────────
    let usdx = Token::new(TokenAddress::from_bytes([1u8; 32]), Decimals::new(18)?);
    let weth = Token::new(TokenAddress::from_bytes([2u8; 32]), Decimals::new(18)?);
    let custody = AccountId::from_bytes([0xcc; 32]);
    let alice = AccountId::from_bytes([0xa1; 32]);
    let bob = AccountId::from_bytes([0xb0; 32]);

    let mut ledger = MemoryLedger::new();
    for account in [alice, bob] {
        for token in [usdx, weth] {
            ledger.mint(
                token.address(),
                account,
                Amount::new(token.to_raw_amount(1_000_000)),
            )?;
            ledger.approve(token.address(), account, custody, Amount::MAX);
        }
    }
    let mut host = Sandbox::with_parts(ledger, TracingSink, SystemClock);

    // ── 2. Pool with a 0.30% fee ────────────────────────────────────────
    let pair = TokenPair::new(usdx, weth)?;
    let config = PoolConfig::new(pair, custody, FeeTier::TIER_0_30_PERCENT, 1_000)?;
    let mut pool = Pool::new(config)?;
    println!("Pool custody {custody}, fee {}", pool.fee_tier());

    // ── 3. Liquidity ────────────────────────────────────────────────────
    let seed = Amount::new(usdx.to_raw_amount(100_000));
    let first = pool.add_liquidity(&mut host, alice, seed, seed)?;
    println!("Alice: {first}");

    let half = Amount::new(usdx.to_raw_amount(50_000));
    let offered_b = Amount::new(weth.to_raw_amount(60_000));
    let second = pool.add_liquidity(&mut host, bob, half, offered_b)?;
    println!("Bob:   {second}");
    println!("Total shares: {}", pool.total_shares());

    // ── 4. Swaps ────────────────────────────────────────────────────────
    let one = Amount::new(usdx.to_raw_amount(1));
    let quote = pool.quote_swap_a(one)?;
    println!("\nQuote 1 USDX -> WETH: {quote}");
    let sold = pool.swap_token_a(&mut host, bob, one, Some(quote.amount_out()))?;
    println!("Executed:            {sold}");

    let back = pool.swap_token_b(&mut host, bob, sold.amount_out(), None)?;
    println!("Round trip:          {back}");
    println!("Spot price A in B:   {}", pool.spot_price_a()?);

    // ── 5. Withdraw ─────────────────────────────────────────────────────
    let withdrawal = pool.remove_liquidity(&mut host, bob, second.shares)?;
    println!("\nBob withdraws: {withdrawal}");
    println!(
        "Reserves {} / {}, custody holds {} / {}",
        pool.reserve_a(),
        pool.reserve_b(),
        host.ledger.balance_of(usdx.address(), custody),
        host.ledger.balance_of(weth.address(), custody),
    );

    pool.state().check_invariants()?;
    Ok(())
}
