use anyhow::{Context, Result};
use csv::{ReaderBuilder, Trim, Writer};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use std::path::Path;

use crate::price::Price;

/// One buy event for a product, as stored in the purchase CSV.
///
/// Dates are kept as text; parsing happens at the point of use. The `id` and
/// `buy_date` columns may be absent in hand-written store files.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Purchase {
    #[serde(default)]
    pub id: Option<u32>,
    pub product_name: String,
    #[serde(default)]
    pub buy_date: String,
    pub purchase_price: Price,
    pub expiry_date: String,
}

/// One sell event for a product, as stored in the sale CSV.
///
/// An empty `expiry_date` is valid and means the sale carries no expiry
/// information.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Sale {
    pub product_name: String,
    pub sale_price: Price,
    #[serde(default)]
    pub expiry_date: String,
}

/// Loads the purchase store at `path`.
///
/// Rows are returned in file order, with leading and trailing whitespace
/// trimmed from every field. Extra columns are ignored.
///
/// # Errors
///
/// Returns an error naming `path` if the file is absent or any row fails to
/// parse. A missing store file is not papered over with an empty store.
pub fn load_purchases(path: impl AsRef<Path>) -> Result<Vec<Purchase>> {
    let purchases = load(&path)?;
    log::debug!(
        "loaded {} purchase records from {}",
        purchases.len(),
        path.as_ref().display()
    );
    Ok(purchases)
}

/// Loads the sale store at `path`.
///
/// Same contract as [`load_purchases`].
pub fn load_sales(path: impl AsRef<Path>) -> Result<Vec<Sale>> {
    let sales = load(&path)?;
    log::debug!(
        "loaded {} sale records from {}",
        sales.len(),
        path.as_ref().display()
    );
    Ok(sales)
}

/// Rewrites the purchase store at `path` with canonical headers.
pub fn save_purchases(path: impl AsRef<Path>, purchases: &[Purchase]) -> Result<()> {
    save(path, purchases)
}

/// Rewrites the sale store at `path` with canonical headers.
pub fn save_sales(path: impl AsRef<Path>, sales: &[Sale]) -> Result<()> {
    save(path, sales)
}

fn load<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<T>> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .from_path(&path)
        .with_context(|| format!("reading {}", path.as_ref().display()))?;
    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let record = result.with_context(|| format!("{}", path.as_ref().display()))?;
        records.push(record);
    }
    Ok(records)
}

fn save<T: Serialize>(path: impl AsRef<Path>, records: &[T]) -> Result<()> {
    let mut wtr = Writer::from_path(&path)
        .with_context(|| format!("writing {}", path.as_ref().display()))?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}
