pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cli::LocalStorage;
#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use core::{engine::PromoEngine, session::Session};
pub use domain::model::{Company, Details, Product, ProductList, PromotionModel, Socials, Style};
pub use utils::error::{ParseError, PromoError, Result};

/// Renders the promotion into a standalone HTML email.
pub fn render(model: &PromotionModel) -> String {
    core::html::render(model)
}

/// Serializes the promotion into the two-line CSV export.
pub fn encode_csv(model: &PromotionModel) -> String {
    core::csv_codec::encode(model)
}

/// Parses a CSV export; fails without touching any existing model.
pub fn decode_csv(text: &str) -> std::result::Result<PromotionModel, ParseError> {
    core::csv_codec::decode(text)
}
