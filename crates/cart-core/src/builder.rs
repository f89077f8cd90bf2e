//! # Checkout Request Builder
//!
//! Turns an untrusted cart into a provider checkout request in two stages:
//!
//! 1. `resolve` re-fetches every product from the content store (all lookups
//!    in flight at once) and validates the stored price. Any missing product
//!    or bad price fails the whole cart.
//! 2. `build` is a pure mapping from priced products to a `CheckoutRequest`.
//!
//! Client-sent names and prices never reach stage 2.

use crate::cart::CartItem;
use crate::checkout::{
    AdjustableQuantity, BillingAddressCollection, CheckoutMode, CheckoutRequest, CheckoutSession,
    LineItem, PaymentMethodType, PriceData, ProductData, ShippingOption, SubmitType, CURRENCY,
};
use crate::error::{CheckoutError, CheckoutResult};
use crate::product::{AssetRef, PricedProduct};
use crate::provider::{CheckoutUrls, PaymentProvider};
use crate::store::ProductStore;
use futures::future::try_join_all;
use tracing::{debug, info, instrument, warn};

/// Image CDN used when no content-store project is configured
pub const DEFAULT_IMAGE_CDN_BASE: &str = "https://cdn.sanity.io/images/vfxfwnaw/production";

const ASSET_PREFIX: &str = "image-";

/// Server-side knobs for the assembled request
#[derive(Debug, Clone)]
pub struct CheckoutOptions {
    /// Provider shipping rate ID; shipping options are omitted when unset
    pub shipping_rate: Option<String>,
    /// Base URL that image asset IDs are resolved against
    pub image_cdn_base: String,
}

impl CheckoutOptions {
    pub fn new(image_cdn_base: impl Into<String>) -> Self {
        Self {
            shipping_rate: None,
            image_cdn_base: image_cdn_base.into(),
        }
    }

    /// Builder: set shipping rate. Blank values count as unset.
    pub fn with_shipping_rate(mut self, rate: Option<String>) -> Self {
        self.shipping_rate = rate.filter(|r| !r.trim().is_empty());
        self
    }
}

impl Default for CheckoutOptions {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_CDN_BASE)
    }
}

/// Map an image asset reference to its CDN URL.
///
/// `image-<id>-<ext>` becomes `<cdn_base>/<id>.<ext>`. Returns `None` for
/// references that do not follow that shape.
pub fn image_url(cdn_base: &str, asset: &AssetRef) -> Option<String> {
    let rest = asset.asset_ref.strip_prefix(ASSET_PREFIX)?;
    let (id, ext) = rest.rsplit_once('-')?;
    if id.is_empty() || ext.is_empty() {
        return None;
    }
    Some(format!("{}/{}.{}", cdn_base.trim_end_matches('/'), id, ext))
}

/// Builds provider checkout requests from carts.
#[derive(Debug, Clone, Default)]
pub struct CheckoutRequestBuilder {
    options: CheckoutOptions,
}

impl CheckoutRequestBuilder {
    pub fn new(options: CheckoutOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CheckoutOptions {
        &self.options
    }

    /// Stage 1: fetch and validate every cart product.
    ///
    /// Results keep the cart's order. The first failed lookup short-circuits
    /// the join.
    #[instrument(skip(self, store, items), fields(item_count = items.len(), store_name = store.store_name()))]
    pub async fn resolve(
        &self,
        store: &dyn ProductStore,
        items: &[CartItem],
    ) -> CheckoutResult<Vec<(PricedProduct, u32)>> {
        if items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let lookups = items.iter().map(|item| async move {
            let not_found = || CheckoutError::ProductNotFound {
                product_id: item.id.clone(),
            };
            match store.fetch_product(&item.id).await {
                Ok(Some(record)) => Ok(record),
                Ok(None) => {
                    warn!("No product for cart item {}", item.id);
                    Err(not_found())
                }
                Err(e) => {
                    warn!("Lookup for cart item {} failed: {}", item.id, e);
                    Err(not_found())
                }
            }
        });

        let records = try_join_all(lookups).await?;

        records
            .iter()
            .zip(items)
            .map(|(record, item)| record.validate().map(|product| (product, item.quantity)))
            .collect()
    }

    /// Price a single validated product
    pub fn line_item(&self, product: &PricedProduct, quantity: u32) -> LineItem {
        let images = product.image.as_ref().and_then(|asset| {
            let url = image_url(&self.options.image_cdn_base, asset);
            if url.is_none() {
                warn!(
                    "Ignoring malformed image reference {} on product {}",
                    asset.asset_ref, product.id
                );
            }
            url.map(|u| vec![u])
        });

        LineItem {
            price_data: PriceData {
                currency: CURRENCY.to_string(),
                product_data: ProductData {
                    name: product.name.clone(),
                    images,
                },
                unit_amount: product.unit_amount,
            },
            adjustable_quantity: AdjustableQuantity::default(),
            quantity,
        }
    }

    /// Stage 2: assemble the provider request. Pure.
    pub fn build(&self, products: &[(PricedProduct, u32)], urls: &CheckoutUrls) -> CheckoutRequest {
        let shipping_options = self.options.shipping_rate.as_ref().map(|rate| {
            vec![ShippingOption {
                shipping_rate: rate.clone(),
            }]
        });

        CheckoutRequest {
            submit_type: SubmitType::Pay,
            mode: CheckoutMode::Payment,
            payment_method_types: vec![PaymentMethodType::Card],
            billing_address_collection: BillingAddressCollection::Auto,
            shipping_options,
            line_items: products
                .iter()
                .map(|(product, quantity)| self.line_item(product, *quantity))
                .collect(),
            success_url: urls.success_url(),
            cancel_url: urls.cancel_url(),
        }
    }

    /// Resolve, build, and dispatch a checkout for `items`.
    #[instrument(skip_all, fields(item_count = items.len(), provider_name = provider.provider_name()))]
    pub async fn create_session(
        &self,
        store: &dyn ProductStore,
        provider: &dyn PaymentProvider,
        items: &[CartItem],
        urls: &CheckoutUrls,
    ) -> CheckoutResult<CheckoutSession> {
        let products = self.resolve(store, items).await?;
        let request = self.build(&products, urls);

        debug!(
            "Checkout request: {} line items, shipping={:?}",
            request.line_items.len(),
            request.shipping_options.is_some()
        );
        info!(
            "Creating checkout: {} units, total={} cents, success_url={}",
            request.item_count(),
            request.total(),
            request.success_url
        );

        let session = provider.create_checkout_session(&request).await?;

        info!(
            "Created checkout session: {}",
            session.id().unwrap_or("<no id>")
        );

        Ok(session)
    }
}
