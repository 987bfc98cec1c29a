use crate::domain::model::Product;

/// Parses a decimal field. Empty, non-numeric and non-finite input is `None`.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// A discount usable in `p / (1 - d/100)`: parses and lies in `0 <= d < 100`.
pub fn usable_discount(discount: &str) -> Option<f64> {
    parse_decimal(discount).filter(|d| (0.0..100.0).contains(d))
}

/// Pre-discount price `p / (1 - d/100)` with two decimals.
///
/// Only defined for `0 <= d < 100`; outside that range (including the
/// divide-by-zero at 100%) there is no original price to show.
pub fn original_price(price: &str, discount: &str) -> Option<String> {
    let p = parse_decimal(price)?;
    let d = usable_discount(discount)?;

    let original = p / (1.0 - d / 100.0);
    if !original.is_finite() {
        return None;
    }
    Some(format!("{:.2}", original))
}

/// 折扣顯示：`(d% off)` 標籤，以及價格可計算時的刪除線原價。
#[derive(Debug, Clone, PartialEq)]
pub struct Markdown {
    pub original_price: Option<String>,
    pub percent: String,
}

impl Markdown {
    /// `None` when the discount is empty, invalid or outside `0 <= d < 100`.
    /// An unparseable price only drops the struck-through original price.
    pub fn for_product(product: &Product) -> Option<Self> {
        usable_discount(&product.discount)?;
        Some(Self {
            original_price: original_price(&product.price, &product.discount),
            percent: product.discount.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: &str, discount: &str) -> Product {
        Product {
            price: price.to_string(),
            discount: discount.to_string(),
            ..Product::default()
        }
    }

    #[test]
    fn test_half_price() {
        assert_eq!(original_price("19.99", "50").as_deref(), Some("39.98"));
        assert_eq!(original_price("10", "20").as_deref(), Some("12.50"));
        assert_eq!(original_price(" 30 ", " 25 ").as_deref(), Some("40.00"));
    }

    #[test]
    fn test_out_of_range_discounts() {
        assert_eq!(original_price("19.99", "100"), None);
        assert_eq!(original_price("19.99", "150"), None);
        assert_eq!(original_price("19.99", "0").as_deref(), Some("19.99"));
        assert_eq!(original_price("19.99", "-10"), None);
        assert_eq!(original_price("19.99", ""), None);
    }

    #[test]
    fn test_invalid_numbers() {
        assert_eq!(original_price("free", "50"), None);
        assert_eq!(original_price("19.99", "half"), None);
        assert_eq!(original_price("inf", "50"), None);
        assert_eq!(original_price("NaN", "50"), None);
        assert_eq!(parse_decimal("1e2"), Some(100.0));
        assert_eq!(parse_decimal("   "), None);
    }

    #[test]
    fn test_overflow_is_dropped() {
        assert_eq!(original_price("1e308", "99.9999"), None);
    }

    #[test]
    fn test_markdown_for_product() {
        let markdown = Markdown::for_product(&product("19.99", " 50")).unwrap();
        assert_eq!(markdown.original_price.as_deref(), Some("39.98"));
        assert_eq!(markdown.percent, "50");
        assert!(Markdown::for_product(&product("19.99", "100")).is_none());
        assert!(Markdown::for_product(&product("19.99", "")).is_none());
    }

    #[test]
    fn test_zero_discount_keeps_label_and_price() {
        let markdown = Markdown::for_product(&product("19.99", "0")).unwrap();
        assert_eq!(markdown.original_price.as_deref(), Some("19.99"));
        assert_eq!(markdown.percent, "0");
    }

    #[test]
    fn test_invalid_price_keeps_discount_label() {
        let markdown = Markdown::for_product(&product("abc", "10")).unwrap();
        assert_eq!(markdown.original_price, None);
        assert_eq!(markdown.percent, "10");
    }
}
