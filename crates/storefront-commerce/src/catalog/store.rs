//! Client-side product catalog.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use futures::future::{BoxFuture, FutureExt, Shared};

use crate::catalog::{CatalogSource, HttpCatalogSource, Product};
use crate::error::CommerceError;
use crate::ids::ProductId;

type FetchResult = Result<Arc<[Product]>, CommerceError>;
type SharedFetch = Shared<BoxFuture<'static, FetchResult>>;

struct CatalogState {
    source: Arc<dyn CatalogSource>,
    products: RwLock<Arc<[Product]>>,
    in_flight: Mutex<Option<SharedFetch>>,
}

impl CatalogState {
    fn products(&self) -> Arc<[Product]> {
        // Writers only swap the Arc, so a poisoned lock still holds a whole list.
        Arc::clone(&self.products.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn replace(&self, products: Arc<[Product]>) {
        *self.products.write().unwrap_or_else(PoisonError::into_inner) = products;
    }

    fn take_in_flight(&self) -> Option<SharedFetch> {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

/// The product list for the session.
///
/// Cloning is cheap and every clone sees the same list. The list is replaced
/// wholesale by each successful fetch; readers get either the old list or
/// the new one.
///
/// At most one fetch runs at a time: calling [`fetch_products`] while a fetch
/// is outstanding waits for that fetch and returns its result.
///
/// [`fetch_products`]: ProductCatalog::fetch_products
#[derive(Clone)]
pub struct ProductCatalog {
    state: Arc<CatalogState>,
}

impl ProductCatalog {
    /// Create an empty catalog backed by `source`.
    pub fn new(source: impl CatalogSource + 'static) -> Self {
        Self::with_source(Arc::new(source))
    }

    /// Create an empty catalog backed by a shared source.
    pub fn with_source(source: Arc<dyn CatalogSource>) -> Self {
        let empty: Arc<[Product]> = Arc::from(Vec::new());
        Self {
            state: Arc::new(CatalogState {
                source,
                products: RwLock::new(empty),
                in_flight: Mutex::new(None),
            }),
        }
    }

    /// Create an empty catalog reading from an HTTP endpoint.
    pub fn from_url(url: impl Into<String>) -> Self {
        Self::new(HttpCatalogSource::new(url))
    }

    /// Fetch the catalog and replace the held list with the result.
    ///
    /// On failure the held list is left as it was.
    pub async fn fetch_products(&self) -> FetchResult {
        let fetch = {
            let mut slot = self
                .state
                .in_flight
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            match slot.as_ref() {
                Some(fetch) => {
                    tracing::debug!("joining in-flight catalog fetch");
                    fetch.clone()
                }
                None => {
                    let fetch = self.start_fetch();
                    *slot = Some(fetch.clone());
                    fetch
                }
            }
        };
        fetch.await
    }

    fn start_fetch(&self) -> SharedFetch {
        let state = Arc::clone(&self.state);
        async move {
            tracing::debug!("fetching catalog");
            let outcome = match state.source.fetch_all().await {
                Ok(products) => {
                    let products: Arc<[Product]> = products.into();
                    tracing::debug!(count = products.len(), "catalog fetched");
                    state.replace(Arc::clone(&products));
                    Ok(products)
                }
                Err(error) => {
                    tracing::warn!(%error, "catalog fetch failed");
                    Err(error)
                }
            };
            state.take_in_flight();
            outcome
        }
        .boxed()
        .shared()
    }

    /// Return the held list, fetching it first if it is empty.
    ///
    /// This is what a listing view calls when it becomes active.
    pub async fn ensure_loaded(&self) -> FetchResult {
        let products = self.get_products();
        if !products.is_empty() {
            return Ok(products);
        }
        self.fetch_products().await
    }

    /// Current product list; empty before the first successful fetch.
    pub fn get_products(&self) -> Arc<[Product]> {
        self.state.products()
    }

    /// Replace the held list.
    pub fn assign_products(&self, products: Vec<Product>) {
        self.state.replace(products.into());
    }

    /// Whether any products are held.
    pub fn is_loaded(&self) -> bool {
        !self.get_products().is_empty()
    }

    /// Look up a held product.
    pub fn product(&self, id: ProductId) -> Option<Product> {
        self.get_products().iter().find(|p| p.id == id).cloned()
    }

    /// Look up a product for a detail view, loading the catalog if needed.
    pub async fn load_product(&self, id: ProductId) -> Result<Product, CommerceError> {
        let products = self.ensure_loaded().await?;
        products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(CommerceError::ProductNotFound(id))
    }
}

impl std::fmt::Debug for ProductCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductCatalog")
            .field("products", &self.get_products().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Source that replays scripted responses and counts calls.
    #[derive(Default)]
    struct ScriptedSource {
        responses: Mutex<VecDeque<Result<Vec<Product>, CommerceError>>>,
        calls: AtomicUsize,
        delay: Duration,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Result<Vec<Product>, CommerceError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                ..Self::default()
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CatalogSource for ScriptedSource {
        async fn fetch_all(&self) -> Result<Vec<Product>, CommerceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    fn product(id: u64, title: &str, cents: i64) -> Product {
        Product::new(ProductId::new(id), title, Money::new(cents))
    }

    fn failure() -> Result<Vec<Product>, CommerceError> {
        Err(CommerceError::RequestFailed("HTTP 500: boom".to_string()))
    }

    #[tokio::test]
    async fn test_empty_before_fetch() {
        let catalog = ProductCatalog::new(ScriptedSource::new(vec![]));
        assert!(catalog.get_products().is_empty());
        assert!(!catalog.is_loaded());
    }

    #[tokio::test]
    async fn test_fetch_replaces_without_merge() {
        let source = Arc::new(ScriptedSource::new(vec![
            Ok(vec![product(1, "A", 100), product(2, "B", 200)]),
            Ok(vec![product(3, "C", 300)]),
        ]));
        let catalog = ProductCatalog::with_source(source.clone());

        catalog.fetch_products().await.unwrap();
        let second = catalog.fetch_products().await.unwrap();

        assert_eq!(second.len(), 1);
        assert_eq!(&*catalog.get_products(), &[product(3, "C", 300)][..]);
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_list() {
        let source = Arc::new(ScriptedSource::new(vec![
            Ok(vec![product(1, "A", 100)]),
            failure(),
        ]));
        let catalog = ProductCatalog::with_source(source.clone());

        catalog.fetch_products().await.unwrap();
        let err = catalog.fetch_products().await.unwrap_err();

        assert!(matches!(err, CommerceError::RequestFailed(_)));
        assert_eq!(&*catalog.get_products(), &[product(1, "A", 100)][..]);
    }

    #[tokio::test]
    async fn test_failed_first_fetch_leaves_empty_list() {
        let catalog = ProductCatalog::new(ScriptedSource::new(vec![failure()]));
        assert!(catalog.fetch_products().await.is_err());
        assert!(catalog.get_products().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_fetches_share_one_request() {
        let source = Arc::new(
            ScriptedSource::new(vec![
                Ok(vec![product(1, "A", 100)]),
                Ok(vec![product(2, "B", 200)]),
            ])
            .with_delay(Duration::from_millis(50)),
        );
        let catalog = ProductCatalog::with_source(source.clone());

        let (a, b, c) = tokio::join!(
            catalog.fetch_products(),
            catalog.fetch_products(),
            catalog.fetch_products()
        );

        assert_eq!(source.calls(), 1);
        for result in [a, b, c] {
            assert_eq!(&*result.unwrap(), &[product(1, "A", 100)][..]);
        }

        // The slot is cleared once the fetch settles.
        catalog.fetch_products().await.unwrap();
        assert_eq!(source.calls(), 2);
        assert_eq!(&*catalog.get_products(), &[product(2, "B", 200)][..]);
    }

    #[tokio::test]
    async fn test_concurrent_failure_is_shared() {
        let source = Arc::new(
            ScriptedSource::new(vec![failure()]).with_delay(Duration::from_millis(20)),
        );
        let catalog = ProductCatalog::with_source(source.clone());

        let (a, b) = tokio::join!(catalog.fetch_products(), catalog.fetch_products());

        assert_eq!(source.calls(), 1);
        assert_eq!(a.unwrap_err(), b.unwrap_err());
    }

    #[tokio::test]
    async fn test_ensure_loaded_fetches_only_when_empty() {
        let source = Arc::new(ScriptedSource::new(vec![
            Ok(vec![product(1, "A", 100)]),
            Ok(vec![product(2, "B", 200)]),
        ]));
        let catalog = ProductCatalog::with_source(source.clone());

        catalog.ensure_loaded().await.unwrap();
        catalog.ensure_loaded().await.unwrap();

        assert_eq!(source.calls(), 1);
        assert_eq!(&*catalog.get_products(), &[product(1, "A", 100)][..]);
    }

    #[tokio::test]
    async fn test_assign_products_skips_fetch() {
        let source = Arc::new(ScriptedSource::new(vec![]));
        let catalog = ProductCatalog::with_source(source.clone());

        catalog.assign_products(vec![product(5, "E", 500)]);
        catalog.ensure_loaded().await.unwrap();

        assert_eq!(source.calls(), 0);
        assert!(catalog.is_loaded());
    }

    #[tokio::test]
    async fn test_product_lookup() {
        let catalog = ProductCatalog::new(ScriptedSource::new(vec![Ok(vec![
            product(1, "A", 100),
            product(2, "B", 200),
        ])]));

        assert!(catalog.product(ProductId::new(1)).is_none());

        let found = catalog.load_product(ProductId::new(2)).await.unwrap();
        assert_eq!(found.title, "B");
        assert_eq!(catalog.product(ProductId::new(1)).unwrap().title, "A");

        let missing = catalog.load_product(ProductId::new(9)).await.unwrap_err();
        assert_eq!(missing, CommerceError::ProductNotFound(ProductId::new(9)));
    }

    #[tokio::test]
    async fn test_load_product_propagates_fetch_error() {
        let catalog = ProductCatalog::new(ScriptedSource::new(vec![failure()]));
        let err = catalog.load_product(ProductId::new(1)).await.unwrap_err();
        assert!(matches!(err, CommerceError::RequestFailed(_)));
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let catalog = ProductCatalog::new(ScriptedSource::new(vec![Ok(vec![product(
            1, "A", 100,
        )])]));
        let view = catalog.clone();

        catalog.fetch_products().await.unwrap();
        assert_eq!(view.get_products().len(), 1);
    }
}
