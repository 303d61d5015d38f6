pub mod loader;
pub mod price;

pub use loader::{load_csv, parse_csv};
pub use price::{PriceError, PricePoint, PriceSeries};
