// ============================================================================
// Economy Walkthrough Example
// ============================================================================

use chrono::{Duration, Utc};
use scaled_decimal::prelude::*;
use std::sync::Arc;

fn main() {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Scaled Decimal Economy ===\n");

    // Values past f32 range keep their precision in the mantissa
    println!("Number formatting:");
    for raw in ["950", "BN1.5K", "BN24.55MY", "BN3YY"] {
        match raw.parse::<ScaledDecimal>() {
            Ok(value) => println!("  {:>10} -> {}", raw, value),
            Err(err) => println!("  {:>10} -> error: {}", raw, err),
        }
    }

    // Authoring mistakes surface as recoverable format errors
    if let Err(err) = "BN12Q".parse::<ScaledDecimal>() {
        println!("  {:>10} -> {} (format error: {})", "BN12Q", err, err.is_format_error());
    }

    let config = EconomyConfig::default();
    let mut wallet = match Wallet::new(config.clone()) {
        Ok(wallet) => wallet,
        Err(err) => {
            eprintln!("bad config: {}", err);
            return;
        },
    };
    wallet.subscribe(Arc::new(LoggingBalanceObserver));

    // Offline income
    println!("\n=== Offline Earnings ===");
    let now = Utc::now();
    let earnings = compute_offline_earnings(&config, now - Duration::hours(2), now, 0.0);
    println!(
        "Away for {:.0} minutes (capped), {} spawns -> {}",
        earnings.credited_minutes(),
        earnings.spawns,
        earnings.amount
    );
    wallet.collect_offline(&earnings, true);
    println!("Balance after doubled collect: {}", wallet.balance());

    // Upgrades
    println!("\n=== Upgrades ===");
    let mut upgrade = match UpgradeTrack::new("BN500", 1.15, 25) {
        Ok(track) => track,
        Err(err) => {
            eprintln!("bad upgrade: {}", err);
            return;
        },
    };

    while upgrade.is_affordable(&wallet) {
        match upgrade.purchase(&mut wallet) {
            Ok(paid) => println!(
                "  Level {:>2}: paid {}, next {}",
                upgrade.level(),
                paid,
                upgrade.current_cost()
            ),
            Err(err) => {
                println!("  Stopped: {}", err);
                break;
            },
        }
    }
    println!("Balance: {}", wallet.balance());

    // Active play with double cash
    println!("\n=== Active Play ===");
    wallet.activate_double_cash();
    for _ in 0..60 {
        wallet.earn(&ScaledDecimal::new(25.0));
        wallet.tick(1.0 / 60.0);
    }
    println!("Balance after one second of kills: {}", wallet.balance());

    // Prestige
    println!("\n=== Prestige ===");
    let mut ledger = PrestigeLedger::new(&config);
    for stage in [10, 50, 150] {
        println!("  Stage {:>3} would award {} cubits", stage, ledger.preview(stage));
    }
    ledger.prestige(50);
    wallet.set_prestige_multiplier(ledger.cash_modifier());
    println!(
        "Cubits: {}, cash modifier {}, earning multiplier {}",
        ledger.cubits(),
        ledger.cash_modifier(),
        wallet.earning_multiplier()
    );
}
