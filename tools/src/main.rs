//! insights-runner: headless report runner for the PayPulse dataset.
//!
//! Usage:
//!   insights-runner --seed 12345 --db insights.db
//!   insights-runner --state Maharashtra --limit 5
//!   insights-runner --json growth_analysis
//!   insights-runner --db empty.db --skip-seed

use anyhow::{bail, Result};
use paypulse_core::format::{format_count, format_currency};
use paypulse_core::{
    AdvancedMetrics, FactStore, FixtureGenerator, MetricsCatalog, PincodeMetric,
};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let limit = parse_arg(&args, "--limit", 10i64);
    let db = args
        .windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| w[1].as_str())
        .unwrap_or(":memory:");
    let state = args
        .windows(2)
        .find(|w| w[0] == "--state")
        .map(|w| w[1].to_string());
    let json_op = args
        .windows(2)
        .find(|w| w[0] == "--json")
        .map(|w| w[1].to_string());
    let skip_seed = args.iter().any(|a| a == "--skip-seed");

    let store = FactStore::open(db)?;
    store.migrate()?;

    // Seed only when the database is empty, so a persistent --db file
    // keeps its dataset across runs.
    if !skip_seed && store.table_row_count("aggregated_transaction")? == 0 {
        log::info!("empty database, generating fixtures with seed {seed}");
        let set = FixtureGenerator::new(seed).generate();
        paypulse_core::load_fixtures(&store, &set)?;
    }

    let catalog = MetricsCatalog::new(&store);
    let advanced = AdvancedMetrics::new(&store);

    match json_op {
        Some(op) => emit_json(&catalog, &advanced, &op, state.as_deref(), limit)?,
        None => print_report(&catalog, state.as_deref(), limit)?,
    }

    store.close()?;
    Ok(())
}

fn print_report(catalog: &MetricsCatalog, state: Option<&str>, limit: i64) -> Result<()> {
    let overview = catalog.overview()?;
    println!("=== TRANSACTION OVERVIEW ===");
    println!("  rows:         {}", overview.total_rows);
    println!(
        "  transactions: {}",
        overview
            .total_transaction_count
            .map(format_count)
            .unwrap_or_else(|| "0".into())
    );
    println!(
        "  amount:       {}",
        format_currency(overview.total_transaction_amount.unwrap_or(0.0))
    );
    println!("  states:       {}", overview.unique_states);
    if let (Some(lo), Some(hi)) = (overview.earliest_year, overview.latest_year) {
        println!("  years:        {lo}-{hi}");
    }

    println!();
    println!("=== TOP STATES BY AMOUNT ===");
    for s in catalog.state_ranking(limit)? {
        println!(
            "  {:<24} {:>12} | {:>5.2}% of total",
            s.state,
            format_currency(s.total_amount),
            s.percentage_of_total.unwrap_or(0.0)
        );
    }

    println!();
    println!("=== TRANSACTION TYPES ===");
    for t in catalog.type_breakdown()? {
        println!(
            "  {:<28} {:>12} | amount share {:>5.2}% | count share {:>5.2}%",
            t.transaction_type,
            format_currency(t.total_amount),
            t.amount_share.unwrap_or(0.0),
            t.count_share.unwrap_or(0.0)
        );
    }

    println!();
    println!("=== YEAR-OVER-YEAR GROWTH ===");
    for g in catalog.growth_analysis()? {
        let growth = g
            .amount_growth_percent
            .map(|p| format!("{p:+.2}%"))
            .unwrap_or_else(|| "n/a".into());
        println!(
            "  {} | {} | growth {growth}",
            g.year,
            format_currency(g.total_amount)
        );
    }

    println!();
    println!("=== MARKET CONCENTRATION ===");
    for m in catalog.market_concentration()?.into_iter().take(limit as usize) {
        println!(
            "  #{:<3} {:<24} {:>12} | cum {:>6.2}% | {}",
            m.state_rank,
            m.state,
            format_currency(m.total_amount),
            m.cumulative_percentage.unwrap_or(0.0),
            m.market_segment
        );
    }

    println!();
    println!("=== ADVANCED KPIS ===");
    let kpis = catalog.advanced_kpis()?;
    println!(
        "  avg daily transactions: {:.1}",
        kpis.avg_daily_transactions.unwrap_or(0.0)
    );
    println!(
        "  avg daily amount:       {}",
        format_currency(kpis.avg_daily_amount.unwrap_or(0.0))
    );
    println!("  states covered:         {}", kpis.total_states);
    println!(
        "  avg user penetration:   {:.2}%",
        kpis.avg_user_penetration.unwrap_or(0.0)
    );
    println!(
        "  avg customer value:     {}",
        format_currency(kpis.avg_customer_lifetime_value.unwrap_or(0.0))
    );

    if let Some(s) = state {
        println!();
        println!("=== DISTRICT PERFORMANCE: {s} ===");
        for d in catalog.district_performance(s, limit)? {
            println!(
                "  {:<20} {:>12} | {:>5.2}% of state",
                d.district,
                format_currency(d.total_amount),
                d.state_share.unwrap_or(0.0)
            );
        }
    }

    Ok(())
}

fn emit_json(
    catalog: &MetricsCatalog,
    advanced: &AdvancedMetrics,
    op: &str,
    state: Option<&str>,
    limit: i64,
) -> Result<()> {
    let require_state = || -> Result<&str> {
        state.ok_or_else(|| anyhow::anyhow!("operation '{op}' requires --state"))
    };

    let json = match op {
        "overview" => serde_json::to_string_pretty(&catalog.overview()?)?,
        "state_ranking" => serde_json::to_string_pretty(&catalog.state_ranking(limit)?)?,
        "quarterly_trend" => serde_json::to_string_pretty(&catalog.quarterly_trend(None)?)?,
        "type_breakdown" => serde_json::to_string_pretty(&catalog.type_breakdown()?)?,
        "brand_breakdown" => serde_json::to_string_pretty(&catalog.brand_breakdown(limit)?)?,
        "insurance_breakdown" => serde_json::to_string_pretty(&catalog.insurance_breakdown()?)?,
        "district_performance" => {
            serde_json::to_string_pretty(&catalog.district_performance(require_state()?, limit)?)?
        }
        "user_engagement" => serde_json::to_string_pretty(&catalog.user_engagement(state)?)?,
        "top_pincodes_amount" => serde_json::to_string_pretty(
            &catalog.top_pincodes(PincodeMetric::TransactionAmount, limit)?,
        )?,
        "top_pincodes_users" => serde_json::to_string_pretty(
            &catalog.top_pincodes(PincodeMetric::RegisteredUsers, limit)?,
        )?,
        "growth_analysis" => serde_json::to_string_pretty(&catalog.growth_analysis()?)?,
        "seasonal_analysis" => serde_json::to_string_pretty(&catalog.seasonal_analysis()?)?,
        "market_concentration" => {
            serde_json::to_string_pretty(&catalog.market_concentration()?)?
        }
        "state_report" => {
            serde_json::to_string_pretty(&catalog.comprehensive_state_report(require_state()?)?)?
        }
        "correlation_dataset" => {
            serde_json::to_string_pretty(&catalog.correlation_dataset()?)?
        }
        "advanced_kpis" => serde_json::to_string_pretty(&catalog.advanced_kpis()?)?,
        "competitive_ranking" => {
            serde_json::to_string_pretty(&catalog.competitive_ranking()?)?
        }
        "fraud_risk" => serde_json::to_string_pretty(&catalog.fraud_risk_indicators()?)?,
        "time_series" => {
            serde_json::to_string_pretty(&advanced.time_series_prep(require_state()?)?)?
        }
        "cohort_analysis" => serde_json::to_string_pretty(&advanced.cohort_analysis()?)?,
        "anomaly_detection" => serde_json::to_string_pretty(&advanced.anomaly_detection()?)?,
        _ => bail!("unknown operation '{op}'"),
    };
    println!("{json}");
    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
