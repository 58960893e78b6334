use std::env;
use std::process;
use std::time::Instant;

use chrono::Local;
use serde::Serialize;

use stockledger_engine::calculations::{profit_loss, profit_loss_percentage, profit_loss_status};
use stockledger_engine::components::product_list_filter::{ProductListFilter, StatusFilter};
use stockledger_engine::config::{Currency, EngineConfig};
use stockledger_engine::product_loader::{load_products_file, sort_newest_first};
use stockledger_engine::sales_history::sales_history;
use stockledger_engine::summary::SummaryPipeline;
use stockledger_engine::types::{Product, ProductSummary, SaleEntry};

// ---------------------------------------------------------------------------
// JSON output contract
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportJson<'a> {
    generated_at: String,
    source: &'a str,
    currency: Currency,
    summary: &'a ProductSummary,
    recent_sales: Vec<SaleEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    products: Option<Vec<Product>>,
}

// ---------------------------------------------------------------------------
// Human-readable output
// ---------------------------------------------------------------------------

/// Format an amount as `$1,234.56`, minus sign first for negatives.
fn format_currency(amount: f64, currency: Currency) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::new();
    for (i, ch) in whole.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let grouped: String = grouped.chars().rev().collect();
    format!("{}{}{}.{:02}", sign, currency.symbol(), grouped, frac)
}

fn format_margin(margin: f64) -> String {
    format!("{:.1}% margin", margin)
}

fn print_human(
    summary: &ProductSummary,
    listing: Option<&[Product]>,
    currency: Currency,
    load_ms: u128,
    summary_ms: u128,
) {
    let money = |amount: f64| format_currency(amount, currency);

    println!();
    println!("  \u{2554}{}\u{2557}", "\u{2550}".repeat(62));
    println!("  \u{2551}{:^62}\u{2551}", "STOCKLEDGER \u{2014} Business Summary");
    println!("  \u{255a}{}\u{255d}", "\u{2550}".repeat(62));
    println!();

    println!(
        "  {} products  \u{00b7}  {} sold  \u{00b7}  {} in stock",
        summary.total_products, summary.sold_products, summary.unsold_products
    );
    println!(
        "  Investment {}  \u{00b7}  Revenue {}  \u{00b7}  Avg price {}",
        money(summary.total_investment),
        money(summary.total_revenue),
        money(summary.average_price)
    );
    println!(
        "  {} {}  ({})",
        profit_loss_status(summary.total_profit),
        money(summary.total_profit.abs()),
        format_margin(summary.profit_margin)
    );
    println!();

    println!("  Monthly sales");
    println!("  {:\u{2500}<64}", "");
    for month in &summary.monthly_sales {
        println!(
            "  {:10} {:>16}  profit {:>16}",
            month.label,
            money(month.sales),
            money(month.profit)
        );
    }
    println!();

    println!("  Best sellers");
    println!("  {:\u{2500}<64}", "");
    if summary.best_sellers.is_empty() {
        println!("  No closed sales yet.");
    }
    for (i, p) in summary.best_sellers.iter().enumerate() {
        println!(
            "  {}. {:24} {:12} {:>14} ({:+.1}%)",
            i + 1,
            p.name,
            p.category,
            money(profit_loss(p)),
            profit_loss_percentage(p)
        );
    }
    println!();

    println!("  Low stock ({})", summary.low_stock_count);
    println!("  {:\u{2500}<64}", "");
    if summary.low_stock_items.is_empty() {
        println!("  All products above their stock threshold.");
    }
    for p in &summary.low_stock_items {
        println!("  {:28} {:12} {} left", p.name, p.category, p.quantity);
    }
    println!();

    println!("  Categories");
    println!("  {:\u{2500}<64}", "");
    for entry in summary.category_breakdown.iter() {
        println!("  {:16} {:>6}", entry.category, entry.count);
    }

    if let Some(listing) = listing {
        println!();
        println!("  Products ({})", listing.len());
        println!("  {:\u{2500}<64}", "");
        if listing.is_empty() {
            println!("  No products match.");
        }
        for p in listing {
            let status = match p.sold_price() {
                Some(price) => format!("sold {}", money(price)),
                None if p.is_sold() => "sold".to_string(),
                None => format!("{} in stock", p.quantity),
            };
            println!(
                "  {:28} {:12} {:>12} {}",
                p.name,
                p.category,
                money(p.original_price),
                status
            );
        }
    }

    println!();
    println!(
        "  \u{23f1}  Products loaded in {}ms \u{00b7} Summary built in {}ms",
        load_ms, summary_ms
    );
    println!();
}

/// A product listing is only printed when `--status` or `--search` is given.
fn listing_filter(status: Option<StatusFilter>, search: Option<&str>) -> Option<ProductListFilter> {
    if status.is_none() && search.is_none() {
        return None;
    }
    Some(ProductListFilter::new(
        status.unwrap_or_default(),
        search.unwrap_or(""),
    ))
}

fn usage() -> ! {
    eprintln!(
        "Usage: stockledger <products.json|products.csv> [--config config.json] \
         [--status all|sold|unsold] [--search TERM] [--json]"
    );
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config   JSON engine config (categories, thresholds, currency)");
    eprintln!("  --status   List products by sale status");
    eprintln!("  --search   List products whose name contains TERM (case-insensitive)");
    eprintln!("  --json     Output as JSON instead of formatted text");
    eprintln!();
    eprintln!("Without --config, settings come from STOCKLEDGER_* environment variables.");
    process::exit(1);
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        usage();
    }
    let products_path = &args[1];

    let mut config_path: Option<String> = None;
    let mut json_output = false;
    let mut status: Option<StatusFilter> = None;
    let mut search: Option<String> = None;
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                if i + 1 < args.len() {
                    config_path = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    eprintln!("Error: --config requires a file path");
                    process::exit(1);
                }
            }
            "--status" => {
                let Some(raw) = args.get(i + 1) else {
                    eprintln!("Error: --status requires all, sold or unsold");
                    process::exit(1);
                };
                match raw.parse::<StatusFilter>() {
                    Ok(s) => status = Some(s),
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        process::exit(1);
                    }
                }
                i += 2;
            }
            "--search" => {
                let Some(term) = args.get(i + 1) else {
                    eprintln!("Error: --search requires a term");
                    process::exit(1);
                };
                search = Some(term.clone());
                i += 2;
            }
            "--json" => {
                json_output = true;
                i += 1;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                usage();
            }
        }
    }

    let config = match config_path {
        Some(ref path) => match EngineConfig::from_json_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                process::exit(1);
            }
        },
        None => EngineConfig::from_env(),
    };
    log::debug!("engine config: {:?}", config);

    let load_start = Instant::now();
    let mut products = match load_products_file(products_path) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error loading products: {}", e);
            process::exit(1);
        }
    };
    sort_newest_first(&mut products);
    let load_ms = load_start.elapsed().as_millis();

    let summary_start = Instant::now();
    let now = Local::now();
    let summary = SummaryPipeline::new(&config).run(&products, &now);
    let summary_ms = summary_start.elapsed().as_millis();

    let listing = listing_filter(status, search.as_deref()).map(|filter| {
        let listed = filter.apply(&products);
        log::info!(
            "{} of {} products match status={}",
            listed.len(),
            products.len(),
            filter.status()
        );
        listed
    });

    if json_output {
        let report = ReportJson {
            generated_at: now.to_rfc3339(),
            source: products_path,
            currency: config.currency,
            summary: &summary,
            recent_sales: sales_history(&products).into_iter().take(10).collect(),
            products: listing,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing report: {}", e);
                process::exit(1);
            }
        }
    } else {
        print_human(
            &summary,
            listing.as_deref(),
            config.currency,
            load_ms,
            summary_ms,
        );
    }
}
