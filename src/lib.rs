#![doc = include_str!("../README.md")]

pub mod clock;
pub mod diagram;
pub mod mutate;
pub mod price;
pub mod report;
pub mod store;
pub mod table;

pub use clock::Clock;
pub use price::Price;
pub use store::{Purchase, Sale};
