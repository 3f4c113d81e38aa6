use chrono::NaiveDate;
use thiserror::Error;

use crate::{
    clock::DATE_FORMAT,
    price::Price,
    store::{Purchase, Sale},
};

/// A required field was missing from a buy or sell order.
///
/// The messages are user-facing guidance; the dispatcher prints them and
/// carries on rather than failing the process.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Please specify a product name using --product_name")]
    MissingProductName,
    #[error("Please specify a price using --price")]
    MissingPrice,
    #[error("Please specify a quantity using --quantity")]
    MissingQuantity,
    #[error("Please specify an expiry date using --expiry_date")]
    MissingExpiryDate,
}

/// Parameters for a buy, as they arrive from the command line.
#[derive(Clone, Debug, Default)]
pub struct BuyOrder {
    pub product_name: Option<String>,
    pub price: Option<Price>,
    pub quantity: Option<u32>,
    pub expiry_date: Option<String>,
}

/// Parameters for a sell, as they arrive from the command line.
#[derive(Clone, Debug, Default)]
pub struct SellOrder {
    pub product_name: Option<String>,
    pub price: Option<Price>,
    pub expiry_date: Option<String>,
}

/// The record appended by a successful buy, plus the quantity bought for the
/// confirmation echo (quantity is not part of the stored record).
#[derive(Clone, Debug, PartialEq)]
pub struct BuyReceipt {
    pub purchase: Purchase,
    pub quantity: u32,
}

/// Validates `order` and appends a new purchase record.
///
/// The new record gets a sequential id of `purchases.len() + 1` and a
/// `buy_date` of `today`.
///
/// # Errors
///
/// Returns a [`ValidationError`] for the first missing required field;
/// `purchases` is untouched in that case.
pub fn buy(
    purchases: &mut Vec<Purchase>,
    order: BuyOrder,
    today: NaiveDate,
) -> Result<BuyReceipt, ValidationError> {
    let product_name = order.product_name.ok_or(ValidationError::MissingProductName)?;
    let purchase_price = order.price.ok_or(ValidationError::MissingPrice)?;
    let quantity = order.quantity.ok_or(ValidationError::MissingQuantity)?;
    let expiry_date = order.expiry_date.ok_or(ValidationError::MissingExpiryDate)?;
    let purchase = Purchase {
        id: Some(purchases.len() as u32 + 1),
        product_name,
        buy_date: today.format(DATE_FORMAT).to_string(),
        purchase_price,
        expiry_date,
    };
    purchases.push(purchase.clone());
    Ok(BuyReceipt { purchase, quantity })
}

/// Validates `order` and appends a new sale record.
///
/// # Errors
///
/// Returns a [`ValidationError`] for the first missing required field;
/// `sales` is untouched in that case.
pub fn sell(sales: &mut Vec<Sale>, order: SellOrder) -> Result<Sale, ValidationError> {
    let product_name = order.product_name.ok_or(ValidationError::MissingProductName)?;
    let sale_price = order.price.ok_or(ValidationError::MissingPrice)?;
    let expiry_date = order.expiry_date.ok_or(ValidationError::MissingExpiryDate)?;
    let sale = Sale {
        product_name,
        sale_price,
        expiry_date,
    };
    sales.push(sale.clone());
    Ok(sale)
}
