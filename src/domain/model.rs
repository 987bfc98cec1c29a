use serde::{Deserialize, Serialize};

pub const DEFAULT_ACCENT_COLOR: &str = "#6366f1";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Details {
    pub title: String,
    pub description: String,
    /// 空字串時不輸出橫幅列
    pub banner_image: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    pub logo_url: String,
    pub website_url: String,
    pub email_address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Socials {
    pub facebook: String,
    pub instagram: String,
    pub linkedin: String,
    pub youtube: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub name: String,
    pub price: String,
    /// 折扣百分比，空字串代表沒有折扣
    pub discount: String,
    pub image: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Style {
    pub accent_color: String,
    pub dark_mode: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            accent_color: DEFAULT_ACCENT_COLOR.to_string(),
            dark_mode: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("product list must contain at least one product")]
pub struct EmptyProductList;

/// Ordered products; never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Product>", into = "Vec<Product>")]
pub struct ProductList {
    items: Vec<Product>,
}

impl ProductList {
    pub fn new(first: Product) -> Self {
        Self { items: vec![first] }
    }

    pub fn push(&mut self, product: Product) {
        self.items.push(product);
    }

    /// Removes the product at `index`. Refuses (returns `None`) when the index is
    /// out of range or when it would leave the list empty.
    pub fn remove(&mut self, index: usize) -> Option<Product> {
        if self.items.len() <= 1 || index >= self.items.len() {
            return None;
        }
        Some(self.items.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&Product> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Product> {
        self.items.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    // 清單至少一筆，永遠為 false
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn as_slice(&self) -> &[Product] {
        &self.items
    }
}

impl Default for ProductList {
    fn default() -> Self {
        Self::new(Product::default())
    }
}

impl TryFrom<Vec<Product>> for ProductList {
    type Error = EmptyProductList;

    fn try_from(items: Vec<Product>) -> Result<Self, Self::Error> {
        if items.is_empty() {
            return Err(EmptyProductList);
        }
        Ok(Self { items })
    }
}

impl From<ProductList> for Vec<Product> {
    fn from(list: ProductList) -> Self {
        list.items
    }
}

impl<'a> IntoIterator for &'a ProductList {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// 一封促銷郵件的完整內容。`Default` 是空白內容（匯入時缺欄位的預設值），
/// `sample()` 則是新工作階段的範例內容。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromotionModel {
    pub details: Details,
    pub company: Company,
    pub socials: Socials,
    pub products: ProductList,
    pub style: Style,
}

impl PromotionModel {
    pub fn sample() -> Self {
        Self {
            details: Details {
                title: "🔥 Huge Summer Sale! 🔥".to_string(),
                description: "Don't miss out on our biggest sale of the season. Get up to 50% off on selected items. Limited time only!".to_string(),
                banner_image: "https://placehold.co/600x300/6366f1/ffffff?text=Your+Banner+Here".to_string(),
            },
            company: Company {
                name: "Your Company".to_string(),
                logo_url: "https://placehold.co/150x50/cccccc/333333?text=Your+Logo".to_string(),
                website_url: "https://example.com".to_string(),
                email_address: "contact@example.com".to_string(),
            },
            socials: Socials {
                facebook: "https://facebook.com".to_string(),
                instagram: "https://instagram.com".to_string(),
                linkedin: "https://linkedin.com".to_string(),
                youtube: "https://youtube.com".to_string(),
            },
            products: ProductList::new(Product {
                name: "Product 1".to_string(),
                price: "19.99".to_string(),
                discount: "50".to_string(),
                image: "https://placehold.co/300x300/e0e0e0/555555?text=Product+1".to_string(),
                url: "https://example.com/product1".to_string(),
            }),
            style: Style::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> Product {
        Product {
            name: name.to_string(),
            ..Product::default()
        }
    }

    #[test]
    fn test_last_product_cannot_be_removed() {
        let mut list = ProductList::new(named("only"));
        assert!(list.remove(0).is_none());
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(0).unwrap().name, "only");
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut list = ProductList::new(named("a"));
        list.push(named("b"));
        list.push(named("c"));

        assert_eq!(list.remove(1).unwrap().name, "b");
        assert!(list.remove(5).is_none());
        let names: Vec<&str> = list.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn test_empty_vec_is_rejected() {
        assert_eq!(ProductList::try_from(Vec::<Product>::new()), Err(EmptyProductList));
        let err = serde_json::from_str::<ProductList>("[]").unwrap_err();
        assert!(err.to_string().contains("at least one product"));
    }

    #[test]
    fn test_product_missing_fields_default_to_empty() {
        let list: ProductList = serde_json::from_str(r#"[{"name":"Hat","price":"5"}]"#).unwrap();
        let hat = list.get(0).unwrap();
        assert_eq!(hat.price, "5");
        assert_eq!(hat.discount, "");
        assert_eq!(hat.url, "");
    }

    #[test]
    fn test_defaults() {
        let model = PromotionModel::default();
        assert_eq!(model.style.accent_color, DEFAULT_ACCENT_COLOR);
        assert!(!model.style.dark_mode);
        assert_eq!(model.products.len(), 1);
        assert_eq!(model.details.title, "");

        let sample = PromotionModel::sample();
        assert_eq!(sample.products.get(0).unwrap().discount, "50");
    }
}
