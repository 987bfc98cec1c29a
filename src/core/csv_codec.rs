//! Single-record CSV export/import of a [`PromotionModel`].
//!
//! Layout: one header line, one data line, joined by `\n`. Every value is
//! double-quoted with `""` for embedded quotes, so the only unquoted newline is
//! the header/data separator. The product list travels as a JSON array in the
//! `products` column.

use crate::domain::model::{PromotionModel, ProductList, DEFAULT_ACCENT_COLOR};
use crate::utils::error::ParseError;
use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use std::collections::HashMap;

pub const EXPORT_FILE_NAME: &str = "email-promotion-data.csv";

/// Column order of an export.
pub const HEADERS: [&str; 14] = [
    "title",
    "description",
    "bannerImage",
    "name",
    "logoUrl",
    "websiteUrl",
    "emailAddress",
    "facebook",
    "instagram",
    "linkedin",
    "youtube",
    "accentColor",
    "darkMode",
    "products",
];

// 帶前綴的別名，避免 company.name 這類鍵在未來和其他欄位衝突
const ALIASES: [(&str, &str); 13] = [
    ("details.title", "title"),
    ("details.description", "description"),
    ("details.bannerImage", "bannerImage"),
    ("company.name", "name"),
    ("company.logoUrl", "logoUrl"),
    ("company.websiteUrl", "websiteUrl"),
    ("company.emailAddress", "emailAddress"),
    ("socials.facebook", "facebook"),
    ("socials.instagram", "instagram"),
    ("socials.linkedin", "linkedin"),
    ("socials.youtube", "youtube"),
    ("style.accentColor", "accentColor"),
    ("style.darkMode", "darkMode"),
];

fn canonical_key(header: &str) -> Option<&'static str> {
    let header = header.trim();
    HEADERS
        .iter()
        .copied()
        .find(|h| *h == header)
        .or_else(|| {
            ALIASES
                .iter()
                .find(|(alias, _)| *alias == header)
                .map(|(_, key)| *key)
        })
}

/// Serializes the model into the two-line CSV format.
pub fn encode(model: &PromotionModel) -> String {
    // Vec<Product> 的序列化不會失敗：全部欄位都是字串
    let products = serde_json::to_string(model.products.as_slice()).unwrap_or_else(|_| "[]".into());

    let values: [&str; 14] = [
        &model.details.title,
        &model.details.description,
        &model.details.banner_image,
        &model.company.name,
        &model.company.logo_url,
        &model.company.website_url,
        &model.company.email_address,
        &model.socials.facebook,
        &model.socials.instagram,
        &model.socials.linkedin,
        &model.socials.youtube,
        &model.style.accent_color,
        if model.style.dark_mode { "true" } else { "false" },
        &products,
    ];

    let mut out = HEADERS.join(",");
    out.push('\n');
    out.push_str(&quote_record(&values));

    tracing::debug!("Encoded promotion as CSV ({} bytes)", out.len());
    out
}

fn quote_record(values: &[&str]) -> String {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    // 寫入記憶體緩衝不會失敗；失敗時改用手動引號
    let written = writer
        .write_record(values)
        .ok()
        .and_then(|_| writer.into_inner().ok())
        .and_then(|bytes| String::from_utf8(bytes).ok());

    match written {
        Some(mut line) => {
            if line.ends_with('\n') {
                line.pop();
            }
            line
        }
        None => values
            .iter()
            .map(|v| format!("\"{}\"", v.replace('"', "\"\"")))
            .collect::<Vec<_>>()
            .join(","),
    }
}

/// Parses an export back into a model.
///
/// The tokenizer is quote-aware, so a quoted description may contain commas,
/// `""` and raw newlines. Missing columns fall back to defaults; structural
/// problems fail the whole import.
pub fn decode(text: &str) -> Result<PromotionModel, ParseError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let headers: StringRecord = match records.next() {
        Some(record) => record?,
        None => return Err(ParseError::MissingDataLine),
    };
    let values: StringRecord = match records.next() {
        Some(record) => record?,
        None => return Err(ParseError::MissingDataLine),
    };

    if headers.len() != values.len() {
        return Err(ParseError::FieldCountMismatch {
            headers: headers.len(),
            values: values.len(),
        });
    }

    let trailing = records.count();
    if trailing > 0 {
        tracing::warn!("Ignoring {} record(s) after the data line", trailing);
    }

    let mut fields: HashMap<&'static str, &str> = HashMap::new();
    for (header, value) in headers.iter().zip(values.iter()) {
        match canonical_key(header) {
            Some(key) => {
                fields.insert(key, value);
            }
            None => tracing::warn!("Ignoring unknown CSV column '{}'", header.trim()),
        }
    }

    let field = |key: &str| fields.get(key).copied().unwrap_or_default().to_string();

    let products = match fields.get("products") {
        Some(raw) => parse_products(raw)?,
        None => {
            tracing::warn!("CSV has no products column, starting with one blank product");
            ProductList::default()
        }
    };

    let mut model = PromotionModel {
        products,
        ..PromotionModel::default()
    };
    model.details.title = field("title");
    model.details.description = field("description");
    model.details.banner_image = field("bannerImage");
    model.company.name = field("name");
    model.company.logo_url = field("logoUrl");
    model.company.website_url = field("websiteUrl");
    model.company.email_address = field("emailAddress");
    model.socials.facebook = field("facebook");
    model.socials.instagram = field("instagram");
    model.socials.linkedin = field("linkedin");
    model.socials.youtube = field("youtube");

    let accent = field("accentColor");
    model.style.accent_color = if accent.is_empty() {
        DEFAULT_ACCENT_COLOR.to_string()
    } else {
        accent
    };
    model.style.dark_mode = field("darkMode") == "true";

    tracing::debug!(
        "Decoded CSV with {} column(s) and {} product(s)",
        headers.len(),
        model.products.len()
    );
    Ok(model)
}

fn parse_products(raw: &str) -> Result<ProductList, ParseError> {
    serde_json::from_str::<ProductList>(raw).map_err(|e| ParseError::MalformedProductList {
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Product;

    #[test]
    fn test_encode_shape() {
        let csv = encode(&PromotionModel::sample());
        let (header, data) = csv.split_once('\n').unwrap();
        assert_eq!(header, HEADERS.join(","));
        assert!(data.starts_with("\"🔥 Huge Summer Sale! 🔥\","));
        assert!(data.contains(",\"false\","));
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn test_encode_doubles_quotes() {
        let mut model = PromotionModel::default();
        model.details.title = r#"Say "hi""#.to_string();
        let csv = encode(&model);
        assert!(csv.contains(r#""Say ""hi""""#));
        // products JSON 內的引號也要加倍
        assert!(csv.contains(r#""[{""name"":"""#));
    }

    #[test]
    fn test_missing_data_line() {
        assert!(matches!(decode(""), Err(ParseError::MissingDataLine)));
        assert!(matches!(
            decode("title,description"),
            Err(ParseError::MissingDataLine)
        ));
        assert!(matches!(
            decode("title,description\n"),
            Err(ParseError::MissingDataLine)
        ));
    }

    #[test]
    fn test_field_count_mismatch() {
        let err = decode("title,description,name\n\"a\",\"b\"").unwrap_err();
        match err {
            ParseError::FieldCountMismatch { headers, values } => {
                assert_eq!(headers, 3);
                assert_eq!(values, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_products() {
        let err = decode("title,products\n\"x\",\"not json\"").unwrap_err();
        assert!(matches!(err, ParseError::MalformedProductList { .. }));

        let err = decode("title,products\n\"x\",\"[]\"").unwrap_err();
        assert!(matches!(err, ParseError::MalformedProductList { .. }));
    }

    #[test]
    fn test_lenient_defaults() {
        let model = decode("title\n\"Only a title\"").unwrap();
        assert_eq!(model.details.title, "Only a title");
        assert_eq!(model.company.name, "");
        assert_eq!(model.style.accent_color, DEFAULT_ACCENT_COLOR);
        assert!(!model.style.dark_mode);
        assert_eq!(model.products.len(), 1);
        assert_eq!(model.products.get(0), Some(&Product::default()));
    }

    #[test]
    fn test_unquoted_values_and_aliases() {
        let text = "details.title,company.name,style.darkMode,accentColor\nSale,Acme,true,";
        let model = decode(text).unwrap();
        assert_eq!(model.details.title, "Sale");
        assert_eq!(model.company.name, "Acme");
        assert!(model.style.dark_mode);
        assert_eq!(model.style.accent_color, DEFAULT_ACCENT_COLOR);
    }

    #[test]
    fn test_bom_and_crlf() {
        let text = "\u{feff}title,darkMode\r\n\"Hello\",\"TRUE\"\r\n";
        let model = decode(text).unwrap();
        assert_eq!(model.details.title, "Hello");
        assert!(!model.style.dark_mode);
    }

    #[test]
    fn test_description_with_newline_is_not_truncated() {
        let mut model = PromotionModel::sample();
        model.details.description = "line one\nline \"two\", with comma\n\nend".to_string();
        let decoded = decode(&encode(&model)).unwrap();
        assert_eq!(decoded, model);
    }
}
