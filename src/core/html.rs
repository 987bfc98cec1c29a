//! Table-based HTML email renderer.
//!
//! The layout targets restrictive mail clients (Outlook/Word engine, webmail
//! sanitizers): nested presentation tables, inline styles, MSO conditional
//! comments and a single 600px media query. Rendering is total and
//! deterministic.

use crate::core::escape::{self, SafeHtml};
use crate::core::pricing::Markdown;
use crate::domain::model::{PromotionModel, Product, Socials, DEFAULT_ACCENT_COLOR};

const FONT_STACK: &str = "Arial, 'Helvetica Neue', Helvetica, sans-serif";

/// Colors derived from `style.dark_mode`. The accent color is not part of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub body_bg: &'static str,
    pub content_bg: &'static str,
    pub text: &'static str,
    pub muted_text: &'static str,
    pub border: &'static str,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        body_bg: "#f3f4f6",
        content_bg: "#ffffff",
        text: "#111827",
        muted_text: "#4b5563",
        border: "#e5e7eb",
    };

    pub const DARK: Palette = Palette {
        body_bg: "#121212",
        content_bg: "#1e1e1e",
        text: "#e5e7eb",
        muted_text: "#9ca3af",
        border: "#374151",
    };

    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Self::DARK
        } else {
            Self::LIGHT
        }
    }
}

struct SocialIcon {
    label: &'static str,
    icon: &'static str,
}

const FACEBOOK: SocialIcon = SocialIcon {
    label: "Facebook",
    icon: "https://i.ibb.co/L9X3wcn/facebook.png",
};
const INSTAGRAM: SocialIcon = SocialIcon {
    label: "Instagram",
    icon: "https://i.ibb.co/yVw0f2D/instagram.png",
};
const LINKEDIN: SocialIcon = SocialIcon {
    label: "LinkedIn",
    icon: "https://i.ibb.co/dKq2r3j/linkedin.png",
};
const YOUTUBE: SocialIcon = SocialIcon {
    label: "YouTube",
    icon: "https://i.ibb.co/31b1A0p/youtube.png",
};

fn social_links(socials: &Socials) -> [(&SocialIcon, &str); 4] {
    [
        (&FACEBOOK, socials.facebook.as_str()),
        (&INSTAGRAM, socials.instagram.as_str()),
        (&LINKEDIN, socials.linkedin.as_str()),
        (&YOUTUBE, socials.youtube.as_str()),
    ]
}

/// Shared per-render values, escaped once.
struct Ctx {
    palette: Palette,
    accent: SafeHtml,
}

/// Renders the promotion into a standalone HTML document.
pub fn render(model: &PromotionModel) -> String {
    let ctx = Ctx {
        palette: Palette::for_mode(model.style.dark_mode),
        accent: escape::css_color(&model.style.accent_color, DEFAULT_ACCENT_COLOR),
    };

    let mut out = String::with_capacity(8 * 1024);
    out.push_str(&head(model, &ctx));
    out.push_str(&body_open(&ctx));
    out.push_str(&banner(&model.details.banner_image));
    out.push_str(&header(model, &ctx));

    out.push_str("\n              <!-- Products Section -->");
    for product in &model.products {
        out.push_str(&product_block(product, &ctx));
    }

    out.push_str(&footer(model, &ctx));
    out.push_str(BODY_CLOSE);

    tracing::debug!(
        "Rendered email with {} product(s), {} bytes",
        model.products.len(),
        out.len()
    );
    out
}

fn head(model: &PromotionModel, ctx: &Ctx) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en" xmlns="http://www.w3.org/1999/xhtml" xmlns:v="urn:schemas-microsoft-com:vml" xmlns:o="urn:schemas-microsoft-com:office:office">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width">
  <meta http-equiv="X-UA-Compatible" content="IE=edge">
  <meta name="x-apple-disable-message-reformatting">
  <title>{title}</title>
  <!--[if mso]>
  <style>
    * {{
      font-family: sans-serif !important;
    }}
  </style>
  <![endif]-->
  <style>
    html, body {{
      margin: 0 auto !important;
      padding: 0 !important;
      height: 100% !important;
      width: 100% !important;
      background: {body_bg};
    }}
    * {{
      -ms-text-size-adjust: 100%;
      -webkit-text-size-adjust: 100%;
    }}
    .main-container {{
      width: 600px;
    }}
    @media screen and (max-width: 600px) {{
      .main-container {{
        width: 100% !important;
      }}
      .product-image-container {{
        width: 120px !important;
      }}
      .product-image {{
        width: 120px !important;
        height: auto !important;
      }}
    }}
  </style>
</head>
"#,
        title = escape::text(&model.details.title),
        body_bg = ctx.palette.body_bg,
    )
}

fn body_open(ctx: &Ctx) -> String {
    format!(
        r#"<body width="100%" style="margin: 0; padding: 0 !important; mso-line-height-rule: exactly; background-color: {body_bg};">
  <center style="width: 100%; background-color: {body_bg};">
    <!--[if mso | IE]>
    <table role="presentation" border="0" cellpadding="0" cellspacing="0" width="600" align="center" style="width:600px;">
    <tr>
    <td style="line-height:0px;font-size:0px;mso-line-height-rule:exactly;">
    <![endif]-->
    <div style="max-width: 600px; margin: 0 auto;" class="main-container">
      <table align="center" role="presentation" cellspacing="0" cellpadding="0" border="0" width="100%" style="margin: auto; background: {content_bg};">"#,
        body_bg = ctx.palette.body_bg,
        content_bg = ctx.palette.content_bg,
    )
}

fn banner(banner_image: &str) -> String {
    if banner_image.is_empty() {
        return String::new();
    }
    format!(
        r#"
        <tr>
          <td style="padding: 0;">
            <img src="{src}" width="600" alt="Promotional Banner" border="0" style="width: 100%; max-width: 600px; height: auto; display: block;">
          </td>
        </tr>"#,
        src = escape::url_attr(banner_image),
    )
}

fn header(model: &PromotionModel, ctx: &Ctx) -> String {
    format!(
        r#"
        <tr>
          <td style="padding: 20px 30px;">
            <table role="presentation" cellspacing="0" cellpadding="0" border="0" width="100%">
              <tr>
                <td align="center" style="padding-bottom: 20px;">
                  <img src="{logo}" width="150" alt="{company} Logo" border="0" style="max-width: 150px; height: auto; display: block;">
                </td>
              </tr>
              <tr>
                <td align="center" style="font-family: {font}; font-size: 28px; font-weight: bold; color: {accent}; padding-bottom: 16px;">
                  {title}
                </td>
              </tr>
              <tr>
                <td align="center" style="font-family: {font}; font-size: 16px; line-height: 1.5; color: {text}; padding-bottom: 24px;">
                  {description}
                </td>
              </tr>
"#,
        logo = escape::url_attr(&model.company.logo_url),
        company = escape::text(&model.company.name),
        font = FONT_STACK,
        accent = ctx.accent,
        title = escape::text(&model.details.title),
        text = ctx.palette.text,
        description = escape::text(&model.details.description),
    )
}

fn product_block(product: &Product, ctx: &Ctx) -> String {
    let markdown = Markdown::for_product(product);

    let struck = markdown
        .as_ref()
        .and_then(|m| m.original_price.as_deref())
        .map(|original| {
            format!(
                r#"<span style="font-size: 14px; text-decoration: line-through; color: {muted}; font-weight: normal; margin-left: 8px;">${original}</span>"#,
                muted = ctx.palette.muted_text,
                original = escape::text(original),
            )
        })
        .unwrap_or_default();

    let percent = markdown
        .as_ref()
        .map(|m| {
            format!(
                r#"<div style="font-size: 14px; color: {muted};">({percent}% off)</div>"#,
                muted = ctx.palette.muted_text,
                percent = escape::text(&m.percent),
            )
        })
        .unwrap_or_default();

    format!(
        r#"
                <tr>
                  <td style="padding-bottom: 24px;">
                    <table role="presentation" cellspacing="0" cellpadding="0" border="0" width="100%">
                      <tr>
                        <td width="150" valign="top" class="product-image-container">
                          <img src="{image}" width="150" height="150" alt="{name}" border="0" class="product-image" style="width: 150px; height: 150px; object-fit: cover; border-radius: 8px; display: block;">
                        </td>
                        <td valign="top" style="padding-left: 20px; font-family: {font};">
                          <div style="font-size: 18px; font-weight: bold; margin-bottom: 8px;">
                            <a href="{url}" target="_blank" style="color: {accent}; text-decoration: none;">{name}</a>
                          </div>
                          <div style="font-size: 20px; font-weight: bold; color: {accent}; margin-bottom: 4px;">
                            ${price}
                            {struck}
                          </div>
                          {percent}
                        </td>
                      </tr>
                    </table>
                  </td>
                </tr>
"#,
        image = escape::url_attr(&product.image),
        name = escape::text(&product.name),
        font = FONT_STACK,
        url = escape::url_attr(&product.url),
        accent = ctx.accent,
        price = escape::text(product.price.trim()),
        struck = struck,
        percent = percent,
    )
}

fn footer(model: &PromotionModel, ctx: &Ctx) -> String {
    let icons: String = social_links(&model.socials)
        .into_iter()
        .filter(|(_, url)| !url.is_empty())
        .map(|(social, url)| {
            format!(
                r#"
                    <a href="{href}" target="_blank" style="display: inline-block; padding: 0 8px;"><img src="{icon}" width="24" height="24" alt="{label}" border="0"></a>"#,
                href = escape::url_attr(url),
                icon = social.icon,
                label = social.label,
            )
        })
        .collect();

    format!(
        r#"
              <!-- Footer -->
              <tr>
                <td align="center" style="border-top: 1px solid {border}; padding-top: 24px; font-family: {font}; color: {muted}; font-size: 14px;">
                  <p style="margin: 0 0 16px 0;">Thanks for shopping with <strong>{company}</strong>!</p>
                  <p style="margin: 0 0 16px 0;">
                    <a href="{website}" target="_blank" style="color: {accent}; text-decoration: none;">Visit our website</a> &nbsp;|&nbsp; <a href="mailto:{email}" style="color: {accent}; text-decoration: none;">Contact Us</a>
                  </p>
                  <div style="padding-top: 8px;">{icons}
                  </div>
                </td>
              </tr>"#,
        border = ctx.palette.border,
        font = FONT_STACK,
        muted = ctx.palette.muted_text,
        company = escape::text(&model.company.name),
        website = escape::url_attr(&model.company.website_url),
        accent = ctx.accent,
        email = escape::url_attr(&model.company.email_address),
        icons = icons,
    )
}

const BODY_CLOSE: &str = r#"
            </table>
          </td>
        </tr>
      </table>
    </div>
    <!--[if mso | IE]>
    </td>
    </tr>
    </table>
    <![endif]-->
  </center>
</body>
</html>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palettes() {
        assert_eq!(Palette::for_mode(false), Palette::LIGHT);
        assert_eq!(Palette::for_mode(true).body_bg, "#121212");
    }

    #[test]
    fn test_dark_mode_colors() {
        let mut model = PromotionModel::sample();
        model.style.dark_mode = true;
        let html = render(&model);
        assert!(html.contains("background-color: #121212;"));
        assert!(html.contains("background: #1e1e1e;"));
        assert!(!html.contains("#f3f4f6"));
    }

    #[test]
    fn test_invalid_accent_falls_back() {
        let mut model = PromotionModel::sample();
        model.style.accent_color = "red;\" onload=\"x".to_string();
        let html = render(&model);
        assert!(html.contains("color: #6366f1;"));
        assert!(!html.contains("onload"));
    }

    #[test]
    fn test_invalid_price_is_shown_raw() {
        let mut model = PromotionModel::default();
        if let Some(p) = model.products.get_mut(0) {
            p.price = "call us".to_string();
            p.discount = "20".to_string();
        }
        let html = render(&model);
        assert!(html.contains("$call us"));
        assert!(!html.contains("line-through"));
        assert!(html.contains("(20% off)"));
    }

    #[test]
    fn test_mailto_link() {
        let html = render(&PromotionModel::sample());
        assert!(html.contains(r#"href="mailto:contact@example.com""#));
    }
}
