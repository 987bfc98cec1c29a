use crate::core::{csv_codec, html};
use crate::domain::model::{Product, PromotionModel};
use crate::utils::error::ParseError;

/// In-memory editing session: the one place where the model is mutable.
#[derive(Debug, Clone)]
pub struct Session {
    model: PromotionModel,
    html: Option<String>,
}

impl Session {
    /// 以範例內容開始
    pub fn new() -> Self {
        Self::with_model(PromotionModel::sample())
    }

    pub fn with_model(model: PromotionModel) -> Self {
        Self { model, html: None }
    }

    pub fn model(&self) -> &PromotionModel {
        &self.model
    }

    /// Applies a field edit. The last generated HTML stays as-is until the
    /// next `generate`, like a preview that has not been refreshed.
    pub fn edit<F: FnOnce(&mut PromotionModel)>(&mut self, f: F) {
        f(&mut self.model);
    }

    pub fn add_product(&mut self) {
        self.model.products.push(Product::default());
    }

    /// Returns `false` when the removal was refused.
    pub fn remove_product(&mut self, index: usize) -> bool {
        self.model.products.remove(index).is_some()
    }

    pub fn generate(&mut self) -> &str {
        self.html.insert(html::render(&self.model))
    }

    pub fn html(&self) -> Option<&str> {
        self.html.as_deref()
    }

    pub fn export_csv(&self) -> String {
        csv_codec::encode(&self.model)
    }

    /// Replaces the whole model on success; on failure nothing changes.
    pub fn import_csv(&mut self, text: &str) -> Result<(), ParseError> {
        let model = csv_codec::decode(text)?;
        self.model = model;
        self.html = None;
        tracing::info!("Promotion data imported successfully");
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
