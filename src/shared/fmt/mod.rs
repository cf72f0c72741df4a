//! Display formatting for dashboard values (money, rates, coordinates, sizes).

pub mod num;

pub use num::{coordinate, file_size, money, order_label, rate_percent};
