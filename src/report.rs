use anyhow::{Context, Result};
use chrono::NaiveDate;

use std::collections::{BTreeMap, BTreeSet};

use crate::{
    clock::DATE_FORMAT,
    price::Price,
    store::{Purchase, Sale},
};

/// Purchase price and expiry date reported for a product by
/// [`product_details`].
#[derive(Clone, Debug, PartialEq)]
pub struct Details {
    pub purchase_price: Price,
    pub expiry_date: String,
}

/// Sale price and expiry status reported for a product by [`sale_status`].
#[derive(Clone, Debug, PartialEq)]
pub struct SaleStatus {
    pub sale_price: Price,
    pub expired: bool,
}

/// Returns the unique product names in `purchases`, sorted.
///
/// When `filter` is given, the result is restricted to the names it lists.
/// Names in the filter that were never purchased simply don't appear.
#[must_use]
pub fn distinct_products(purchases: &[Purchase], filter: Option<&[String]>) -> BTreeSet<String> {
    let mut products: BTreeSet<String> = purchases
        .iter()
        .map(|p| p.product_name.clone())
        .collect();
    if let Some(names) = filter {
        products.retain(|p| names.iter().any(|n| n == p));
    }
    products
}

/// Returns how many times each product was bought.
///
/// This counts purchase events, not units; a `quantity` column in the store
/// is deliberately not summed.
#[must_use]
pub fn product_counts(purchases: &[Purchase]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for p in purchases {
        *counts.entry(p.product_name.clone()).or_insert(0) += 1;
    }
    counts
}

/// Returns the price and expiry date of each product's first purchase record.
///
/// First-wins: records after the first for a given product are ignored.
#[must_use]
pub fn product_details(purchases: &[Purchase]) -> BTreeMap<String, Details> {
    let mut details = BTreeMap::new();
    for p in purchases {
        details
            .entry(p.product_name.clone())
            .or_insert_with(|| Details {
                purchase_price: p.purchase_price,
                expiry_date: p.expiry_date.clone(),
            });
    }
    details
}

/// Returns, per sold product, its first-seen sale price and whether it has
/// expired relative to `reference`.
///
/// A product is expired if any of its sale records has an `expiry_date`
/// strictly earlier than `reference`. Records with an empty `expiry_date`
/// contribute no expiry signal.
///
/// # Errors
///
/// Returns an error if a non-empty `expiry_date` is not a valid `YYYY-MM-DD`
/// date, naming the product concerned.
pub fn sale_status(sales: &[Sale], reference: NaiveDate) -> Result<BTreeMap<String, SaleStatus>> {
    let mut statuses = BTreeMap::new();
    for sale in sales {
        let status = statuses
            .entry(sale.product_name.clone())
            .or_insert_with(|| SaleStatus {
                sale_price: sale.sale_price,
                expired: false,
            });
        if sale.expiry_date.is_empty() {
            continue;
        }
        let expiry =
            NaiveDate::parse_from_str(&sale.expiry_date, DATE_FORMAT).with_context(|| {
                format!(
                    "invalid expiry date {:?} in sale record for {}",
                    sale.expiry_date, sale.product_name
                )
            })?;
        if expiry < reference {
            status.expired = true;
        }
    }
    Ok(statuses)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::str::FromStr;

    fn purchase(name: &str, price: &str, expiry: &str) -> Purchase {
        Purchase {
            id: None,
            product_name: name.into(),
            buy_date: String::new(),
            purchase_price: Price::from_str(price).unwrap(),
            expiry_date: expiry.into(),
        }
    }

    fn sale(name: &str, price: &str, expiry: &str) -> Sale {
        Sale {
            product_name: name.into(),
            sale_price: Price::from_str(price).unwrap(),
            expiry_date: expiry.into(),
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn distinct_products_fn_dedupes_and_sorts() {
        let purchases = [
            purchase("banana", "1", ""),
            purchase("apple", "1", ""),
            purchase("banana", "1", ""),
        ];
        let products = distinct_products(&purchases, None);
        assert_eq!(
            products.into_iter().collect::<Vec<_>>(),
            vec!["apple", "banana"]
        );
    }

    #[test]
    fn distinct_products_fn_intersects_with_filter_list() {
        let purchases = [purchase("A", "1", ""), purchase("B", "1", "")];
        let filter = vec!["B".to_string(), "C".to_string()];
        let products = distinct_products(&purchases, Some(&filter));
        assert_eq!(products.into_iter().collect::<Vec<_>>(), vec!["B"]);
    }

    #[test]
    fn product_counts_fn_counts_purchase_events_per_product() {
        let purchases = [
            purchase("A", "1", ""),
            purchase("A", "1", ""),
            purchase("B", "1", ""),
        ];
        let counts = product_counts(&purchases);
        assert_eq!(counts["A"], 2);
        assert_eq!(counts["B"], 1);
    }

    #[test]
    fn product_details_fn_keeps_first_record_per_product() {
        let purchases = [
            purchase("A", "1.0", "2024-01-01"),
            purchase("A", "2.0", "2024-02-01"),
        ];
        let details = product_details(&purchases);
        assert_eq!(
            details["A"],
            Details {
                purchase_price: Price::from_str("1.0").unwrap(),
                expiry_date: "2024-01-01".into(),
            }
        );
    }

    #[test]
    fn sale_status_fn_marks_expired_when_any_record_is_past_expiry() {
        let sales = [sale("A", "1.50", "2024-01-01"), sale("A", "1.75", "")];
        let statuses = sale_status(&sales, date("2024-06-01")).unwrap();
        assert!(statuses["A"].expired);
        assert_eq!(statuses["A"].sale_price, Price::from_str("1.50").unwrap());
    }

    #[test]
    fn sale_status_fn_skips_empty_expiry_dates() {
        let sales = [sale("A", "1.50", "")];
        let statuses = sale_status(&sales, date("2024-06-01")).unwrap();
        assert!(!statuses["A"].expired);
    }

    #[test]
    fn sale_status_fn_treats_reference_day_expiry_as_not_expired() {
        // Only strictly earlier than the reference date counts as expired.
        let sales = [sale("A", "1.50", "2024-06-01")];
        let statuses = sale_status(&sales, date("2024-06-01")).unwrap();
        assert!(!statuses["A"].expired);
    }

    #[test]
    fn sale_status_fn_returns_error_for_unparseable_expiry() {
        let sales = [sale("A", "1.50", "soonish")];
        let err = sale_status(&sales, date("2024-06-01")).unwrap_err();
        assert!(format!("{err:#}").contains("soonish"));
    }
}
