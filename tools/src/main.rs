//! profit-report: build and print the profitability and risk report.
//!
//! Usage:
//!   profit-report --seed 12345
//!   profit-report --db retail.db --generate --config data/analytics_config.json
//!   profit-report --db retail.db --top 10 --json

use anyhow::Result;
use profit_core::{
    aggregator::{ProfitabilityAggregator, ProfitabilityReport},
    config::AnalyticsConfig,
    generator::DatasetGenerator,
    store::ProfitStore,
};
use std::env;

#[derive(serde::Serialize)]
struct JsonReport<'a> {
    seed: u64,
    db: &'a str,
    report: &'a ProfitabilityReport,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let generate = args.iter().any(|a| a == "--generate");
    let json = args.iter().any(|a| a == "--json");
    let db = args
        .windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| w[1].as_str())
        .unwrap_or(":memory:");
    let config = match args.windows(2).find(|w| w[0] == "--config") {
        Some(w) => AnalyticsConfig::load(&w[1])?,
        None => AnalyticsConfig::default(),
    };
    let top_n = parse_arg(&args, "--top", config.report.top_n);

    let in_memory = db == ":memory:";
    let store = if in_memory {
        ProfitStore::in_memory()?
    } else {
        ProfitStore::open(db)?
    };
    store.migrate()?;

    if generate || in_memory {
        let dataset = DatasetGenerator::new(seed, config.generator.clone()).generate()?;
        store.load_dataset(&dataset)?;
        log::info!("profit-report: generated dataset seed={seed} db={db}");
    }
    store.verify_integrity()?;

    let report = ProfitabilityAggregator::new(&store, &config).report(top_n)?;

    if json {
        let envelope = JsonReport {
            seed,
            db,
            report: &report,
        };
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    } else {
        print_dashboard(&report, seed, db);
    }
    Ok(())
}

fn print_dashboard(report: &ProfitabilityReport, seed: u64, db: &str) {
    let k = &report.kpis;
    println!("=== PROFITABILITY DASHBOARD ===");
    println!("  seed:           {seed}");
    println!("  db:             {db}");
    println!("  customers:      {}", report.customer_count);
    println!("  orders:         {}", report.order_count);
    println!("  total revenue:  ${:.2}", k.total_revenue);
    println!("  total cost:     ${:.2}", k.total_cost);
    println!("  total profit:   ${:.2}", k.total_profit);
    println!("  profit margin:  {:.2}%", k.profit_margin);

    println!();
    println!("=== TABLES ===");
    for (table, count) in &report.table_counts {
        println!("  {table:<16} {count}");
    }

    println!();
    println!("=== TOP CUSTOMERS BY PROFIT ===");
    for r in &report.top_customers {
        let c = &r.row;
        println!(
            "  #{:<3} {:<32} orders: {:<3} | Revenue: ${:.2} | Profit: ${:.2}",
            r.rank, c.customer_name, c.order_count, c.total_revenue, c.total_profit
        );
    }

    println!();
    println!("=== MARGINS (top / bottom) ===");
    for m in report.top_margins.iter().chain(&report.bottom_margins) {
        println!(
            "  {:<32} Revenue: ${:.2} | Cost: ${:.2} | Profit: ${:.2}",
            m.customer_name, m.revenue, m.cost, m.profit
        );
    }

    println!();
    println!(
        "=== REVENUE CONCENTRATION ({} customers reach 80%) ===",
        report.pareto_80_customers
    );
    for p in &report.pareto {
        println!(
            "  {:<3} {:<32} ${:.2} | cumulative {:.2}%",
            p.position, p.customer_name, p.revenue, p.cumulative_percentage
        );
    }

    println!();
    println!("=== RISK ===");
    for s in &report.riskiest_customers {
        println!(
            "  {:<32} score: {:.2} | delay: {:.1}d | returns: {:.2} | tickets: {}{}",
            s.customer_name,
            s.risk_score,
            s.avg_payment_delay_days,
            s.return_ratio,
            s.support_ticket_count,
            if s.unprofitable { " | UNPROFITABLE" } else { "" }
        );
    }

    println!();
    println!("=== TRUE PROFIT BY ORDER ===");
    for o in &report.order_profits {
        println!(
            "  order {:<6} Net: ${:.2} | Support: ${:.2} | True profit: ${:.2}",
            o.order_id, o.net_revenue, o.allocated_support_cost, o.true_profit
        );
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
