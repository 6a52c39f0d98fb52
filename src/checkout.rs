//! Checkout line items and the commerce collaborator.
//!
//! The store turns cart artworks into [`LineItem`]s; a [`CheckoutProvider`]
//! turns those into a hosted checkout URL.

use crate::constants::FRAME_SIZE_ATTRIBUTE;
use crate::types::Artwork;
use futures::future::BoxFuture;
use thiserror::Error;

/// Errors surfaced to the shopper during checkout.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckoutError {
    /// The cart produced no line items
    #[error("Your cart is empty. Add artworks before checking out.")]
    EmptyCart,
    /// No storefront is configured
    #[error("Checkout is not configured for this shop.")]
    NotConfigured,
    /// The commerce service rejected the request or could not be reached
    #[error("Checkout failed: {0}")]
    Provider(String),
}

/// A custom key/value attribute attached to a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name
    pub key: String,
    /// Attribute value
    pub value: String,
}

/// One purchasable line sent to the commerce service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    /// Variant (or, as a last resort, product) identifier
    pub variant_id: String,
    /// Quantity, at least one
    pub quantity: u32,
    /// Custom attributes such as the frame size
    pub custom_attributes: Vec<Attribute>,
}

/// A created checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    /// Where to send the shopper
    pub web_url: String,
}

/// The external commerce service.
pub trait CheckoutProvider {
    /// Creates a checkout for `lines`.
    fn create_checkout(&self, lines: Vec<LineItem>) -> BoxFuture<'static, Result<CheckoutSession, CheckoutError>>;
}

/// Canonical size notation used for variant matching: no whitespace,
/// uppercase, `×` written as `X`. `"50 x 70"` becomes `"50X70"`.
pub fn normalize_variant_size(size: &str) -> String {
    size.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == '×' { 'X' } else { c })
        .collect::<String>()
        .to_uppercase()
}

/// Picks the variant whose title contains the artwork's frame size.
///
/// Falls back to the first variant, then to the product id, when there is no
/// frame size or no variant matches. Returns `None` only for an artwork with
/// neither variants nor ids.
pub fn resolve_variant_id(artwork: &Artwork) -> Option<String> {
    let fallback = || {
        artwork
            .variants
            .first()
            .map(|v| v.id.clone())
            .or_else(|| artwork.shopify_product_id.clone())
            .or_else(|| (!artwork.id.is_empty()).then(|| artwork.id.clone()))
    };

    let Some(size) = artwork
        .frame_size
        .as_deref()
        .map(normalize_variant_size)
        .filter(|s| !s.is_empty())
    else {
        return fallback();
    };

    let matched = artwork
        .variants
        .iter()
        .find(|v| normalize_variant_size(&v.title).contains(&size));
    match matched {
        Some(variant) => Some(variant.id.clone()),
        None => {
            log::warn!(
                "no variant of {} matches frame size {size}, using first variant",
                artwork.id
            );
            fallback()
        }
    }
}

/// Builds the line for one cart artwork.
pub fn line_item(artwork: &Artwork, quantity: u32) -> Option<LineItem> {
    let variant_id = resolve_variant_id(artwork)?;
    let custom_attributes = artwork
        .frame_size
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(|size| Attribute {
            key: FRAME_SIZE_ATTRIBUTE.to_owned(),
            value: size.to_owned(),
        })
        .into_iter()
        .collect();
    Some(LineItem {
        variant_id,
        quantity: quantity.max(1),
        custom_attributes,
    })
}

/// Checkout through storefront cart permalinks:
/// `https://{shop}/cart/{variant}:{quantity},...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermalinkCheckout {
    shop_domain: Option<String>,
}

impl PermalinkCheckout {
    /// Creates a provider for `shop_domain`; `None` yields [`CheckoutError::NotConfigured`].
    pub fn new(shop_domain: Option<String>) -> Self {
        let shop_domain = shop_domain
            .map(|d| {
                d.trim()
                    .trim_start_matches("https://")
                    .trim_start_matches("http://")
                    .trim_end_matches('/')
                    .to_owned()
            })
            .filter(|d| !d.is_empty());
        Self { shop_domain }
    }

    /// Builds the permalink for `lines`.
    pub fn permalink(&self, lines: &[LineItem]) -> Result<String, CheckoutError> {
        let domain = self.shop_domain.as_deref().ok_or(CheckoutError::NotConfigured)?;
        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let mut items = Vec::with_capacity(lines.len());
        for line in lines {
            let id = numeric_id(&line.variant_id).ok_or_else(|| {
                CheckoutError::Provider(format!("invalid variant id {:?}", line.variant_id))
            })?;
            items.push(format!("{id}:{}", line.quantity));
        }
        let mut url = format!("https://{domain}/cart/{}", items.join(","));

        let attributes: Vec<String> = lines
            .iter()
            .enumerate()
            .flat_map(|(n, line)| {
                line.custom_attributes.iter().map(move |attr| {
                    let key = format!("{} {}", attr.key, n + 1);
                    format!(
                        "attributes[{}]={}",
                        urlencoding::encode(&key),
                        urlencoding::encode(&attr.value)
                    )
                })
            })
            .collect();
        if !attributes.is_empty() {
            url.push('?');
            url.push_str(&attributes.join("&"));
        }
        Ok(url)
    }
}

impl CheckoutProvider for PermalinkCheckout {
    fn create_checkout(&self, lines: Vec<LineItem>) -> BoxFuture<'static, Result<CheckoutSession, CheckoutError>> {
        let result = self.permalink(&lines).map(|web_url| CheckoutSession { web_url });
        Box::pin(async move { result })
    }
}

/// Extracts the trailing number of an id such as `gid://shopify/ProductVariant/123`.
fn numeric_id(id: &str) -> Option<&str> {
    let tail = id.rsplit('/').next()?;
    let tail = tail.split('?').next()?;
    (!tail.is_empty() && tail.chars().all(|c| c.is_ascii_digit())).then_some(tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Variant;

    fn artwork_with_variants(frame_size: Option<&str>) -> Artwork {
        Artwork {
            id: "art".into(),
            frame_size: frame_size.map(Into::into),
            variants: vec![
                Variant { id: "v1".into(), title: "40X50".into() },
                Variant { id: "v2".into(), title: "50X70".into() },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn size_normalization_unifies_notation() {
        assert_eq!(normalize_variant_size("50 x 70"), "50X70");
        assert_eq!(normalize_variant_size("50×70 cm"), "50X70CM");
    }

    #[test]
    fn variant_is_matched_by_frame_size() {
        let artwork = artwork_with_variants(Some("50 x 70"));
        assert_eq!(resolve_variant_id(&artwork).as_deref(), Some("v2"));
    }

    #[test]
    fn unmatched_or_missing_size_falls_back_to_first_variant() {
        assert_eq!(resolve_variant_id(&artwork_with_variants(Some("70x100"))).as_deref(), Some("v1"));
        assert_eq!(resolve_variant_id(&artwork_with_variants(None)).as_deref(), Some("v1"));
    }

    #[test]
    fn no_variants_falls_back_to_product_id() {
        let artwork = Artwork {
            id: "art".into(),
            shopify_product_id: Some("gid://shopify/Product/9".into()),
            ..Default::default()
        };
        assert_eq!(resolve_variant_id(&artwork).as_deref(), Some("gid://shopify/Product/9"));
    }

    #[test]
    fn line_item_carries_frame_size_attribute() {
        let line = line_item(&artwork_with_variants(Some("50 x 70")), 0).unwrap();
        assert_eq!(line.quantity, 1);
        assert_eq!(
            line.custom_attributes,
            vec![Attribute { key: FRAME_SIZE_ATTRIBUTE.into(), value: "50 x 70".into() }]
        );
        let bare = line_item(&artwork_with_variants(None), 2).unwrap();
        assert!(bare.custom_attributes.is_empty());
    }

    #[test]
    fn permalink_lists_numeric_variant_ids() {
        let provider = PermalinkCheckout::new(Some("https://shop.example.com/".into()));
        let lines = vec![
            LineItem {
                variant_id: "gid://shopify/ProductVariant/111".into(),
                quantity: 2,
                custom_attributes: vec![Attribute { key: "Frame size".into(), value: "50 x 70".into() }],
            },
            LineItem { variant_id: "222".into(), quantity: 1, custom_attributes: vec![] },
        ];
        let url = provider.permalink(&lines).unwrap();
        assert_eq!(
            url,
            "https://shop.example.com/cart/111:2,222:1?attributes[Frame%20size%201]=50%20x%2070"
        );
    }

    #[test]
    fn permalink_requires_configuration_and_valid_ids() {
        let line = LineItem { variant_id: "abc".into(), quantity: 1, custom_attributes: vec![] };
        assert_eq!(
            PermalinkCheckout::new(None).permalink(std::slice::from_ref(&line)),
            Err(CheckoutError::NotConfigured)
        );
        let provider = PermalinkCheckout::new(Some("shop.example.com".into()));
        assert!(matches!(provider.permalink(&[line]), Err(CheckoutError::Provider(_))));
        assert_eq!(provider.permalink(&[]), Err(CheckoutError::EmptyCart));
    }

    #[test]
    fn provider_future_resolves_to_session() {
        let provider = PermalinkCheckout::new(Some("shop.example.com".into()));
        let lines = vec![LineItem { variant_id: "5".into(), quantity: 3, custom_attributes: vec![] }];
        let session = futures::executor::block_on(provider.create_checkout(lines)).unwrap();
        assert_eq!(session.web_url, "https://shop.example.com/cart/5:3");
    }
}
