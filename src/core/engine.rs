use crate::config::document::DocumentFormat;
use crate::core::{csv_codec, html};
use crate::domain::model::PromotionModel;
use crate::domain::ports::Storage;
use crate::utils::error::{PromoError, Result};

/// File-backed import/export around the pure renderer and codec.
pub struct PromoEngine<S: Storage> {
    storage: S,
}

impl<S: Storage> PromoEngine<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    async fn read_text(&self, path: &str) -> Result<String> {
        let bytes = self.storage.read_file(path).await?;
        String::from_utf8(bytes).map_err(|e| {
            PromoError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("{} is not valid UTF-8: {}", path, e),
            ))
        })
    }

    /// Loads a model from a `.csv`, `.toml` or `.json` file.
    pub async fn load(&self, path: &str) -> Result<PromotionModel> {
        let format = DocumentFormat::from_path(path)?;
        tracing::debug!("Loading {:?} document from {}", format, path);

        let content = self.read_text(path).await?;
        let model = format.parse(&content)?;

        tracing::info!(
            "📥 Loaded '{}' with {} product(s)",
            model.details.title,
            model.products.len()
        );
        Ok(model)
    }

    pub async fn render_to(&self, model: &PromotionModel, path: &str) -> Result<()> {
        let document = html::render(model);
        self.storage.write_file(path, document.as_bytes()).await?;
        tracing::info!("📄 Email HTML written to {} ({} bytes)", path, document.len());
        Ok(())
    }

    pub async fn export_csv(&self, model: &PromotionModel, path: &str) -> Result<()> {
        let csv = csv_codec::encode(model);
        self.storage.write_file(path, csv.as_bytes()).await?;
        tracing::info!("📤 CSV exported to {}", path);
        Ok(())
    }

    /// Writes the model in whatever format the extension of `path` names.
    pub async fn save_document(&self, model: &PromotionModel, path: &str) -> Result<()> {
        let format = DocumentFormat::from_path(path)?;
        let content = format.serialize(model)?;
        self.storage.write_file(path, content.as_bytes()).await?;
        tracing::info!("💾 Saved {:?} document to {}", format, path);
        Ok(())
    }
}
