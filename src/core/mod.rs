pub mod csv_codec;
pub mod engine;
pub mod escape;
pub mod html;
pub mod pricing;
pub mod session;

pub use crate::domain::model::{PromotionModel, Product, ProductList};
pub use crate::domain::ports::Storage;
pub use crate::utils::error::{ParseError, Result};
