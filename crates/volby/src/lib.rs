pub mod config;
pub mod export;
mod parser;
pub mod scraper;
pub mod types;
pub mod utils;

pub use config::ScrapeConfig;
pub use parser::ParseError;
pub use scraper::ElectionScraper;
