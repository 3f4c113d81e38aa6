use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

use std::path::{Path, PathBuf};

use stocktake::{
    clock::{Clock, DATE_FORMAT},
    diagram,
    mutate::{self, BuyOrder, SellOrder},
    price::Price,
    report, store,
    table::{self, Style},
};

const BOUGHT_CSV: &str = "boughtcsv.csv";
const SOLD_CSV: &str = "soldcsv.csv";
const CURRENT_DAY_FILE: &str = "current_day.txt";

/// Command-line inventory tracker.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Report on the inventory, or record a buy or sell
    Action {
        #[arg(value_enum)]
        action: Action,

        /// Table style for the products and count reports
        #[arg(long, value_enum, default_value = "grid")]
        format: Style,

        /// Restrict the products report to these names
        #[arg(long = "product_list", num_args = 1..)]
        product_list: Option<Vec<String>>,

        /// Restrict the sold report to this product
        #[arg(long = "sold_product")]
        sold_product: Option<String>,

        /// Price for buy/sell
        #[arg(long)]
        price: Option<Price>,

        /// Quantity for buy
        #[arg(long)]
        quantity: Option<u32>,

        /// Expiry date (YYYY-MM-DD); for `sold`, the reference date
        #[arg(long = "expiry_date")]
        expiry_date: Option<String>,

        /// Product name for buy/sell
        #[arg(long = "product_name")]
        product_name: Option<String>,

        /// Set the simulated current date (YYYY-MM-DD) once the action is done
        #[arg(long = "set_date")]
        set_date: Option<NaiveDate>,

        /// Path to the PlantUML jar used for the products class diagram
        #[arg(long = "plantuml_path", default_value = "plantuml.jar")]
        plantuml_path: PathBuf,
    },
    /// Advance the simulated date by a number of days (may be negative)
    AdvanceTime {
        #[arg(allow_negative_numbers = true)]
        days: i64,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Action {
    Products,
    Count,
    Details,
    Sold,
    Buy,
    Sell,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let mut purchases = store::load_purchases(BOUGHT_CSV)?;
    let mut sales = store::load_sales(SOLD_CSV)?;
    let clock = Clock::new(CURRENT_DAY_FILE);

    match cli.command {
        Command::Action {
            action,
            format,
            product_list,
            sold_product,
            price,
            quantity,
            expiry_date,
            product_name,
            set_date,
            plantuml_path,
        } => {
            let today = clock.current()?;
            match action {
                Action::Products => {
                    products_action(&purchases, product_list.as_deref(), format, &plantuml_path);
                }
                Action::Count => count_action(&purchases, format),
                Action::Details => details_action(&purchases),
                Action::Sold => {
                    let reference = match &expiry_date {
                        Some(s) => NaiveDate::parse_from_str(s, DATE_FORMAT)
                            .with_context(|| format!("invalid reference date {s:?}"))?,
                        None => today,
                    };
                    sold_action(&sales, reference, sold_product.as_deref())?;
                }
                Action::Buy => {
                    let order = BuyOrder {
                        product_name,
                        price,
                        quantity,
                        expiry_date,
                    };
                    buy_action(&mut purchases, order, today)?;
                }
                Action::Sell => {
                    let order = SellOrder {
                        product_name,
                        price,
                        expiry_date,
                    };
                    sell_action(&mut sales, order)?;
                }
            }
            // Setting the date is its own operation, applied after whichever
            // action ran.
            if let Some(date) = set_date {
                clock.set(date, 0)?;
                println!("Setting the current date to {date}.");
            }
        }
        Command::AdvanceTime { days } => {
            let today = clock.current()?;
            clock.set(today, days)?;
            println!("Advancing time by {days} day(s)...");
        }
    }
    Ok(())
}

fn products_action(
    purchases: &[store::Purchase],
    filter: Option<&[String]>,
    style: Style,
    plantuml_path: &Path,
) {
    let products = report::distinct_products(purchases, filter);
    let rows: Vec<Vec<String>> = products.into_iter().map(|p| vec![p]).collect();
    println!("Products offered by the supermarket:");
    print!("{}", table::render(style, &["Product"], &rows));
    diagram::render(
        diagram::PRODUCT_CLASS_DIAGRAM,
        "product_class_diagram",
        plantuml_path,
    );
}

fn count_action(purchases: &[store::Purchase], style: Style) {
    let counts = report::product_counts(purchases);
    let rows: Vec<Vec<String>> = counts
        .into_iter()
        .map(|(product, count)| vec![product, count.to_string()])
        .collect();
    println!("Current product counts:");
    print!("{}", table::render(style, &["Product", "Count"], &rows));
}

fn details_action(purchases: &[store::Purchase]) {
    let details = report::product_details(purchases);
    println!("Product details:");
    for (product, d) in &details {
        println!("Product: {product}");
        println!("Purchase Price: {}", d.purchase_price);
        println!("Expiry Date: {}", d.expiry_date);
    }
}

fn sold_action(sales: &[store::Sale], reference: NaiveDate, only: Option<&str>) -> Result<()> {
    let statuses = report::sale_status(sales, reference)?;
    println!("Product sale info:");
    for (product, status) in &statuses {
        if only.is_some_and(|name| name != product) {
            continue;
        }
        println!("Product: {product}");
        println!("Sale Price: {}", status.sale_price);
        if status.expired {
            println!("Status: Expired");
        } else {
            println!("Status: Not Expired");
        }
    }
    Ok(())
}

fn buy_action(
    purchases: &mut Vec<store::Purchase>,
    order: BuyOrder,
    today: NaiveDate,
) -> Result<()> {
    match mutate::buy(purchases, order, today) {
        Ok(receipt) => {
            store::save_purchases(BOUGHT_CSV, purchases)?;
            println!(
                "Bought {} {}(s) for ${} each.",
                receipt.quantity, receipt.purchase.product_name, receipt.purchase.purchase_price,
            );
        }
        // Validation failures are guidance, not process failures.
        Err(e) => println!("{e}"),
    }
    Ok(())
}

fn sell_action(sales: &mut Vec<store::Sale>, order: SellOrder) -> Result<()> {
    match mutate::sell(sales, order) {
        Ok(sale) => {
            store::save_sales(SOLD_CSV, sales)?;
            println!(
                "Sold {} for ${}. Expiry date: {}",
                sale.product_name, sale.sale_price, sale.expiry_date,
            );
        }
        Err(e) => println!("{e}"),
    }
    Ok(())
}
