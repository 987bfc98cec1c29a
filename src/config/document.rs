use crate::core::csv_codec;
use crate::domain::model::PromotionModel;
use crate::utils::error::{PromoError, Result};
use regex::Regex;
use std::path::Path;

/// 促銷檔案格式，依副檔名判斷
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Csv,
    Toml,
    Json,
}

impl DocumentFormat {
    pub fn from_path(path: &str) -> Result<Self> {
        let extension = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            _ => Err(PromoError::UnsupportedFormat {
                path: path.to_string(),
            }),
        }
    }

    pub fn parse(self, content: &str) -> Result<PromotionModel> {
        match self {
            Self::Csv => Ok(csv_codec::decode(content)?),
            Self::Toml => from_toml_str(content),
            Self::Json => Ok(serde_json::from_str(content)?),
        }
    }

    pub fn serialize(self, model: &PromotionModel) -> Result<String> {
        match self {
            Self::Csv => Ok(csv_codec::encode(model)),
            Self::Toml => toml::to_string_pretty(model).map_err(|e| PromoError::TomlError {
                message: e.to_string(),
            }),
            Self::Json => Ok(serde_json::to_string_pretty(model)?),
        }
    }
}

/// 從 TOML 字串解析促銷內容，支援 `${VAR}` 環境變數替換
pub fn from_toml_str(content: &str) -> Result<PromotionModel> {
    let processed = substitute_env_vars(content);

    toml::from_str(&processed).map_err(|e| PromoError::TomlError {
        message: format!("TOML parsing error: {}", e),
    })
}

/// 替換環境變數；找不到的變數原樣保留
fn substitute_env_vars(content: &str) -> String {
    let Ok(re) = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}") else {
        return content.to_string();
    };

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .into_owned()
}
