use crate::core::pricing::parse_decimal;
use crate::domain::model::PromotionModel;
use crate::utils::error::{FieldIssue, PromoError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn issue(field: &str, value: &str, reason: impl Into<String>) -> FieldIssue {
    FieldIssue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_url(field_name: &str, url_str: &str) -> std::result::Result<(), FieldIssue> {
    if url_str.trim().is_empty() {
        return Err(issue(field_name, url_str, "URL cannot be empty"));
    }

    match Url::parse(url_str.trim()) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(issue(
                field_name,
                url_str,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(issue(field_name, url_str, format!("Invalid URL format: {}", e))),
    }
}

pub fn validate_email(field_name: &str, value: &str) -> std::result::Result<(), FieldIssue> {
    let value_trimmed = value.trim();
    match value_trimmed.split_once('@') {
        Some((local, domain))
            if !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value_trimmed.contains(char::is_whitespace) =>
        {
            Ok(())
        }
        _ => Err(issue(field_name, value, "Not a valid email address")),
    }
}

pub fn validate_hex_color(field_name: &str, value: &str) -> std::result::Result<(), FieldIssue> {
    let valid = value
        .strip_prefix('#')
        .map(|hex| matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()))
        .unwrap_or(false);

    if valid {
        Ok(())
    } else {
        Err(issue(field_name, value, "Expected a hex color like #6366f1"))
    }
}

pub fn validate_decimal(field_name: &str, value: &str) -> std::result::Result<f64, FieldIssue> {
    parse_decimal(value).ok_or_else(|| issue(field_name, value, "Not a decimal number"))
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> std::result::Result<(), FieldIssue> {
    if value < min || value > max {
        return Err(issue(
            field_name,
            &value.to_string(),
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

/// 折扣必須在 `0 <= d < 100`；100% 會讓原價公式除以零
pub fn validate_discount(field_name: &str, value: &str) -> std::result::Result<(), FieldIssue> {
    let d = validate_decimal(field_name, value)?;
    validate_range(field_name, d, 0.0, 100.0)?;
    if d >= 100.0 {
        return Err(issue(field_name, value, "Discount must be less than 100"));
    }
    Ok(())
}

/// 收集所有欄位問題；空白的選填欄位不算問題
pub fn collect_issues(model: &PromotionModel) -> Vec<FieldIssue> {
    let mut issues = Vec::new();
    let mut check = |result: std::result::Result<(), FieldIssue>| {
        if let Err(e) = result {
            issues.push(e);
        }
    };

    if model.details.title.trim().is_empty() {
        check(Err(issue("details.title", "", "Title cannot be empty")));
    }
    if !model.details.banner_image.trim().is_empty() {
        check(validate_url("details.bannerImage", &model.details.banner_image));
    }

    check(validate_url("company.logoUrl", &model.company.logo_url));
    check(validate_url("company.websiteUrl", &model.company.website_url));
    check(validate_email("company.emailAddress", &model.company.email_address));

    let socials = [
        ("socials.facebook", &model.socials.facebook),
        ("socials.instagram", &model.socials.instagram),
        ("socials.linkedin", &model.socials.linkedin),
        ("socials.youtube", &model.socials.youtube),
    ];
    for (field, url) in socials {
        if !url.trim().is_empty() {
            check(validate_url(field, url));
        }
    }

    for (i, product) in model.products.iter().enumerate() {
        let field = |name: &str| format!("products[{}].{}", i, name);

        if product.name.trim().is_empty() {
            check(Err(issue(&field("name"), "", "Product name cannot be empty")));
        }
        check(validate_decimal(&field("price"), &product.price).map(|_| ()));
        if !product.discount.trim().is_empty() {
            check(validate_discount(&field("discount"), &product.discount));
        }
        check(validate_url(&field("image"), &product.image));
        check(validate_url(&field("url"), &product.url));
    }

    check(validate_hex_color("style.accentColor", &model.style.accent_color));

    issues
}

impl Validate for PromotionModel {
    fn validate(&self) -> Result<()> {
        let issues = collect_issues(self);
        if issues.is_empty() {
            Ok(())
        } else {
            Err(PromoError::ValidationError { issues })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Product;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("company.websiteUrl", "https://example.com").is_ok());
        assert!(validate_url("company.websiteUrl", "http://example.com").is_ok());
        assert!(validate_url("company.websiteUrl", "").is_err());
        assert!(validate_url("company.websiteUrl", "invalid-url").is_err());
        assert!(validate_url("company.websiteUrl", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("e", "contact@example.com").is_ok());
        assert!(validate_email("e", "contact@localhost").is_err());
        assert!(validate_email("e", "@example.com").is_err());
        assert!(validate_email("e", "a b@example.com").is_err());
    }

    #[test]
    fn test_validate_hex_color() {
        assert!(validate_hex_color("c", "#6366f1").is_ok());
        assert!(validate_hex_color("c", "#fff").is_ok());
        assert!(validate_hex_color("c", "6366f1").is_err());
        assert!(validate_hex_color("c", "#ggg").is_err());
    }

    #[test]
    fn test_validate_discount() {
        assert!(validate_discount("d", "0").is_ok());
        assert!(validate_discount("d", "99.5").is_ok());
        assert!(validate_discount("d", "100").is_err());
        assert!(validate_discount("d", "-1").is_err());
        assert!(validate_discount("d", "half").is_err());
    }

    #[test]
    fn test_sample_is_valid() {
        assert!(PromotionModel::sample().validate().is_ok());
    }

    #[test]
    fn test_collects_every_issue() {
        let mut model = PromotionModel::sample();
        model.products.push(Product {
            name: "Broken".to_string(),
            price: "cheap".to_string(),
            discount: "120".to_string(),
            image: "https://example.com/a.png".to_string(),
            url: "https://example.com/a".to_string(),
        });
        model.products.push(Product {
            name: "Giveaway".to_string(),
            price: "9.99".to_string(),
            discount: "100".to_string(),
            image: "https://example.com/b.png".to_string(),
            url: "https://example.com/b".to_string(),
        });
        model.socials.youtube = "youtube".to_string();

        let fields: Vec<String> = collect_issues(&model).into_iter().map(|i| i.field).collect();
        assert_eq!(
            fields,
            vec![
                "socials.youtube",
                "products[1].price",
                "products[1].discount",
                "products[2].discount"
            ]
        );

        match model.validate() {
            Err(PromoError::ValidationError { issues }) => assert_eq!(issues.len(), 4),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
