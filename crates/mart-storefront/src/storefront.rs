//! Storefront state.
//!
//! [`Storefront`] owns the canonical state (criteria, products, cart) and
//! derives everything else from it on demand. All mutations are synchronous;
//! the only asynchronous step is running a [`LoadRequest`] against the
//! catalog source.
//!
//! Each load is tagged with a generation number. Starting a new load bumps
//! the generation, and [`Storefront::complete_load`] drops any outcome whose
//! generation is no longer current, so a slow response for old criteria can
//! never overwrite the products for newer ones.

use std::cell::OnceCell;
use std::fmt;
use std::sync::Arc;

use mart_commerce::cart::{Cart, CartSummary};
use mart_commerce::catalog::Product;
use mart_commerce::search::{
    brand_options, query_pairs, BrandFilter, CategoryFilter, FilterCriteria, FilterMode,
};
use mart_commerce::{CommerceError, Money, ProductId};

use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::source::{self, CatalogSource};

/// Progress of the most recent catalog load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A load is in flight.
    Loading,
    /// The last load succeeded.
    Ready,
    /// The last load failed; holds the message shown to the shopper.
    Failed(String),
}

/// A catalog load waiting to be run.
pub struct LoadRequest {
    generation: u64,
    criteria: FilterCriteria,
    source: Arc<dyn CatalogSource>,
}

impl LoadRequest {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Criteria snapshot taken when the load was started.
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Run the load against the source.
    pub async fn run(self) -> LoadOutcome {
        let result = self.source.load(&self.criteria).await;
        LoadOutcome {
            generation: self.generation,
            criteria: self.criteria,
            result,
        }
    }
}

impl fmt::Debug for LoadRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadRequest")
            .field("generation", &self.generation)
            .field("criteria", &self.criteria)
            .finish_non_exhaustive()
    }
}

/// Result of a finished load, tagged with the generation that started it.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub generation: u64,
    pub criteria: FilterCriteria,
    pub result: Result<Vec<Product>, CatalogError>,
}

/// What [`Storefront::complete_load`] did with an outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// The product collection was replaced.
    Replaced { count: usize },
    /// The load failed; the previous products were kept.
    Failed(CatalogError),
    /// A newer load was started since; the outcome was dropped.
    Stale,
}

/// Storefront state: filters, catalog and cart.
pub struct Storefront {
    source: Arc<dyn CatalogSource>,
    mode: FilterMode,
    criteria: FilterCriteria,
    products: Vec<Product>,
    cart: Cart,
    generation: u64,
    status: LoadStatus,
    // Indices into `products` matching `criteria`; local mode only.
    visible: OnceCell<Vec<usize>>,
}

impl Storefront {
    /// Create a storefront over a catalog source, with default filters, no
    /// products and an empty cart.
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            mode: source.filter_mode(),
            source,
            criteria: FilterCriteria::default(),
            products: Vec::new(),
            cart: Cart::new(),
            generation: 0,
            status: LoadStatus::Idle,
            visible: OnceCell::new(),
        }
    }

    /// Create a storefront for the configured catalog.
    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(source::from_config(config))
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    /// Inline error message from the last load, if it failed.
    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            LoadStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Generation of the most recently started load.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    // --- Catalog -----------------------------------------------------------

    /// The full product collection as last loaded.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Products to show.
    ///
    /// In local mode this is the filtered catalog, recomputed only after the
    /// catalog or the criteria change. In server mode the service already
    /// filtered, so the catalog is shown as loaded.
    pub fn visible_products(&self) -> Vec<&Product> {
        match self.mode {
            FilterMode::Server => self.products.iter().collect(),
            FilterMode::Local => self
                .visible
                .get_or_init(|| {
                    self.products
                        .iter()
                        .enumerate()
                        .filter(|(_, p)| self.criteria.matches(p))
                        .map(|(i, _)| i)
                        .collect()
                })
                .iter()
                .map(|&i| &self.products[i])
                .collect(),
        }
    }

    /// Brand selector options for the current catalog.
    pub fn brand_options(&self) -> Vec<String> {
        brand_options(&self.products)
    }

    /// Start a catalog load for the current criteria.
    ///
    /// Any load started earlier becomes stale.
    pub fn begin_load(&mut self) -> LoadRequest {
        self.generation += 1;
        self.status = LoadStatus::Loading;
        tracing::debug!(generation = self.generation, "catalog load started");

        LoadRequest {
            generation: self.generation,
            criteria: self.criteria.clone(),
            source: Arc::clone(&self.source),
        }
    }

    /// Apply a finished load if it is still current.
    ///
    /// On failure the previous products stay in place and the error message
    /// is kept for display.
    pub fn complete_load(&mut self, outcome: LoadOutcome) -> Applied {
        if outcome.generation != self.generation {
            tracing::debug!(
                generation = outcome.generation,
                current = self.generation,
                "discarding stale catalog response"
            );
            return Applied::Stale;
        }

        match outcome.result {
            Ok(products) => {
                let count = products.len();
                self.products = products;
                self.status = LoadStatus::Ready;
                self.visible = OnceCell::new();
                tracing::info!(count, generation = outcome.generation, "catalog loaded");
                Applied::Replaced { count }
            }
            Err(e) => {
                tracing::warn!(error = %e, generation = outcome.generation, "catalog load failed");
                self.status = LoadStatus::Failed(e.to_string());
                Applied::Failed(e)
            }
        }
    }

    /// Load and apply in one step.
    pub async fn refresh(&mut self) -> Applied {
        let outcome = self.begin_load().run().await;
        self.complete_load(outcome)
    }

    // --- Filters -----------------------------------------------------------
    //
    // Setters return a load request when the change has to go to the catalog
    // service (server mode, and the query parameters actually changed).

    pub fn set_category(&mut self, category: CategoryFilter) -> Option<LoadRequest> {
        self.update_criteria(|c| c.set_category(category))
    }

    /// Select a brand; it must be one of [`Storefront::brand_options`].
    pub fn set_brand(&mut self, brand: BrandFilter) -> Result<Option<LoadRequest>, CommerceError> {
        brand.validate(&self.brand_options())?;
        Ok(self.update_criteria(|c| c.set_brand(brand)))
    }

    /// Set the max price; values outside the slider range are clamped.
    pub fn set_max_price(&mut self, max_price: Money) -> Option<LoadRequest> {
        self.update_criteria(|c| c.set_max_price(max_price))
    }

    pub fn set_query(&mut self, query: impl Into<String>) -> Option<LoadRequest> {
        let query = query.into();
        self.update_criteria(|c| c.set_query(query))
    }

    /// Replace all four criteria at once.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) -> Option<LoadRequest> {
        self.update_criteria(|c| *c = criteria)
    }

    /// Return every filter to its default.
    pub fn reset_filters(&mut self) -> Option<LoadRequest> {
        self.set_criteria(FilterCriteria::default())
    }

    fn update_criteria(&mut self, update: impl FnOnce(&mut FilterCriteria)) -> Option<LoadRequest> {
        let before = self.criteria.clone();
        update(&mut self.criteria);
        if self.criteria == before {
            return None;
        }

        match self.mode {
            FilterMode::Local => {
                self.visible = OnceCell::new();
                None
            }
            FilterMode::Server => {
                if query_pairs(&self.criteria) == query_pairs(&before) {
                    return None;
                }
                Some(self.begin_load())
            }
        }
    }

    // --- Cart --------------------------------------------------------------

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn add_to_cart(&mut self, product: &Product) -> Result<u32, CommerceError> {
        self.cart.add(product)
    }

    /// Add a product from the current catalog by id.
    ///
    /// Returns `Ok(None)` if the catalog has no such product.
    pub fn add_to_cart_by_id(&mut self, id: &ProductId) -> Result<Option<u32>, CommerceError> {
        match self.products.iter().find(|p| &p.id == id) {
            Some(product) => self.cart.add(product).map(Some),
            None => Ok(None),
        }
    }

    pub fn increment(&mut self, id: &ProductId) -> Result<bool, CommerceError> {
        self.cart.increment(id)
    }

    pub fn decrement(&mut self, id: &ProductId) -> bool {
        self.cart.decrement(id)
    }

    pub fn remove_from_cart(&mut self, id: &ProductId) -> bool {
        self.cart.remove(id)
    }

    pub fn cart_total(&self) -> Result<Money, CommerceError> {
        self.cart.total()
    }

    /// Units in the cart, for the header badge.
    pub fn cart_count(&self) -> u64 {
        self.cart.item_count()
    }

    pub fn cart_summary(&self) -> Result<CartSummary, CommerceError> {
        self.cart.summary()
    }
}

impl fmt::Debug for Storefront {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storefront")
            .field("mode", &self.mode)
            .field("criteria", &self.criteria)
            .field("products", &self.products.len())
            .field("cart", &self.cart.line_count())
            .field("generation", &self.generation)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticCatalog;
    use async_trait::async_trait;
    use mart_commerce::catalog::Condition;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    fn phone(id: &str, brand: &str, condition: Condition, price: u64) -> Product {
        Product::new(id, format!("{} {}", brand, id), brand, condition, Money::new(price))
    }

    fn two_phones() -> Vec<Product> {
        vec![
            phone("p1", "Apple", Condition::New, 35_999),
            phone("p2", "Samsung", Condition::Used, 24_999),
        ]
    }

    /// Server-mode source answering with queued responses, in order.
    struct ScriptedCatalog {
        responses: Mutex<VecDeque<Result<Vec<Product>, CatalogError>>>,
    }

    impl ScriptedCatalog {
        fn new(responses: Vec<Result<Vec<Product>, CatalogError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
            })
        }
    }

    #[async_trait]
    impl CatalogSource for ScriptedCatalog {
        fn filter_mode(&self) -> FilterMode {
            FilterMode::Server
        }

        async fn load(&self, _criteria: &FilterCriteria) -> Result<Vec<Product>, CatalogError> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    fn local_store(products: Vec<Product>) -> Storefront {
        Storefront::new(Arc::new(StaticCatalog::new(products)))
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[tokio::test]
    async fn test_local_mode_filters_in_memory() {
        let mut store = local_store(two_phones());
        assert_eq!(store.refresh().await, Applied::Replaced { count: 2 });
        assert_eq!(store.visible_products().len(), 2);

        assert!(store
            .set_category(CategoryFilter::Only(Condition::New))
            .is_none());
        assert!(store.set_max_price(Money::new(60_000)).is_none());
        assert_eq!(ids(&store.visible_products()), vec!["p1"]);

        store.set_query("samsung");
        assert!(store.visible_products().is_empty());

        store.reset_filters();
        assert_eq!(store.visible_products().len(), 2);
    }

    #[tokio::test]
    async fn test_server_mode_shows_products_as_loaded() {
        let pricey = phone("p9", "Samsung", Condition::New, 89_999);
        let mut store = Storefront::new(ScriptedCatalog::new(vec![Ok(vec![pricey])]));

        let request = store.set_max_price(Money::new(50_000)).unwrap();
        store.complete_load(request.run().await);
        // Above the cap, but the service decided to return it.
        assert_eq!(ids(&store.visible_products()), vec!["p9"]);
    }

    #[test]
    fn test_server_mode_criteria_change_starts_load() {
        let mut store = Storefront::new(ScriptedCatalog::new(vec![]));

        let request = store
            .set_category(CategoryFilter::Only(Condition::Refurbished))
            .unwrap();
        assert_eq!(request.generation(), 1);
        assert_eq!(
            request.criteria().category,
            CategoryFilter::Only(Condition::Refurbished)
        );
        assert!(store.is_loading());

        // Same value again: nothing to fetch.
        assert!(store
            .set_category(CategoryFilter::Only(Condition::Refurbished))
            .is_none());

        // Whitespace does not change the query parameters.
        assert!(store.set_query("pixel").is_some());
        assert!(store.set_query("  pixel ").is_none());
        assert_eq!(store.generation(), 2);
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let older = vec![phone("old", "Apple", Condition::New, 10_000)];
        let newer = vec![phone("new", "Apple", Condition::New, 10_000)];
        let mut store = Storefront::new(ScriptedCatalog::new(vec![Ok(older), Ok(newer)]));

        let first = store.set_query("a").unwrap();
        let second = store.set_query("ab").unwrap();
        let (first_outcome, second_outcome) =
            futures::future::join(first.run(), second.run()).await;

        assert_eq!(store.complete_load(second_outcome), Applied::Replaced { count: 1 });
        assert_eq!(store.complete_load(first_outcome), Applied::Stale);
        assert_eq!(ids(&store.visible_products()), vec!["new"]);
        assert_eq!(store.status(), &LoadStatus::Ready);
    }

    #[tokio::test]
    async fn test_stale_arrival_keeps_loading_state() {
        let mut store = Storefront::new(ScriptedCatalog::new(vec![Ok(two_phones())]));

        let first = store.set_query("a").unwrap();
        let _second = store.set_query("b").unwrap();

        assert_eq!(store.complete_load(first.run().await), Applied::Stale);
        assert!(store.is_loading());
        assert!(store.products().is_empty());
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_products() {
        let mut store = Storefront::new(ScriptedCatalog::new(vec![
            Ok(two_phones()),
            Err(CatalogError::Status { status: 500 }),
        ]));

        store.refresh().await;
        let applied = store.refresh().await;

        assert_eq!(applied, Applied::Failed(CatalogError::Status { status: 500 }));
        assert_eq!(store.error_message(), Some("Failed to load products (500)"));
        assert!(!store.is_loading());
        assert_eq!(store.products().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_first_load_leaves_catalog_empty() {
        let mut store = Storefront::new(ScriptedCatalog::new(vec![Err(
            CatalogError::Unreachable("connection refused".to_string()),
        )]));

        store.refresh().await;
        assert!(store.products().is_empty());
        assert!(store.error_message().unwrap().contains("connection refused"));
        assert_eq!(store.brand_options(), vec!["All"]);
    }

    #[tokio::test]
    async fn test_success_clears_previous_error() {
        let mut store = Storefront::new(ScriptedCatalog::new(vec![
            Err(CatalogError::Status { status: 502 }),
            Ok(two_phones()),
        ]));

        store.refresh().await;
        assert!(store.error_message().is_some());
        store.refresh().await;
        assert_eq!(store.error_message(), None);
    }

    #[tokio::test]
    async fn test_brand_must_be_on_offer() {
        let mut store = local_store(vec![
            phone("p1", "Apple", Condition::New, 35_999),
            phone("p2", "Samsung", Condition::Used, 24_999),
            phone("p3", "Apple", Condition::Used, 19_999),
        ]);
        store.refresh().await;

        assert_eq!(store.brand_options(), vec!["All", "Apple", "Samsung"]);
        assert!(store.set_brand(BrandFilter::from_label("Apple")).is_ok());
        assert_eq!(ids(&store.visible_products()), vec!["p1", "p3"]);

        assert_eq!(
            store.set_brand(BrandFilter::from_label("Nokia")).unwrap_err(),
            CommerceError::UnknownBrand("Nokia".to_string())
        );
        assert_eq!(store.criteria().brand, BrandFilter::from_label("Apple"));
    }

    #[tokio::test]
    async fn test_cart_through_storefront() {
        let mut store = local_store(two_phones());
        store.refresh().await;

        let p1 = ProductId::new("p1");
        assert_eq!(store.add_to_cart_by_id(&p1).unwrap(), Some(1));
        assert_eq!(store.add_to_cart_by_id(&p1).unwrap(), Some(2));
        assert_eq!(store.add_to_cart_by_id(&ProductId::new("zz")).unwrap(), None);
        assert_eq!(store.cart_count(), 2);
        assert_eq!(store.cart_total().unwrap(), Money::new(71_998));

        assert!(store.decrement(&p1));
        assert_eq!(store.cart().quantity_of(&p1), 1);
        assert!(store.decrement(&p1));
        assert!(store.cart().is_empty());
        assert_eq!(store.cart_total().unwrap(), Money::zero());
    }

    #[tokio::test]
    async fn test_cart_survives_catalog_reload() {
        let mut store = Storefront::new(ScriptedCatalog::new(vec![Ok(two_phones()), Ok(vec![])]));
        store.refresh().await;
        store.add_to_cart_by_id(&ProductId::new("p2")).unwrap();

        store.refresh().await;
        assert!(store.products().is_empty());
        assert_eq!(store.cart_total().unwrap(), Money::new(24_999));
    }
}
