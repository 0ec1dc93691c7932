//! Background catalog loads.
//!
//! [`CatalogLoader`] runs [`LoadRequest`]s on the tokio runtime and hands
//! their outcomes back in completion order, which need not match the order
//! the loads were started in. Feeding outcomes through
//! [`Storefront::complete_load`] keeps only the newest one.
//!
//! Every spawned load yields exactly one outcome. A load that panics or is
//! cancelled comes back as [`CatalogError::Interrupted`] for its generation.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::CatalogError;
use crate::storefront::{Applied, LoadOutcome, LoadRequest, Storefront};

/// Runs catalog loads concurrently and collects their outcomes.
#[derive(Debug)]
pub struct CatalogLoader {
    tx: mpsc::UnboundedSender<LoadOutcome>,
    rx: mpsc::UnboundedReceiver<LoadOutcome>,
    in_flight: usize,
}

impl Default for CatalogLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogLoader {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx, in_flight: 0 }
    }

    /// Loads started but not yet collected.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Run a load in the background.
    pub fn spawn(&mut self, request: LoadRequest) -> JoinHandle<()> {
        let tx = self.tx.clone();
        let generation = request.generation();
        let criteria = request.criteria().clone();
        self.in_flight += 1;

        tokio::spawn(async move {
            let outcome = match tokio::spawn(request.run()).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!(generation, error = %e, "catalog load task failed");
                    LoadOutcome {
                        generation,
                        criteria,
                        result: Err(CatalogError::Interrupted(e.to_string())),
                    }
                }
            };

            if tx.send(outcome).is_err() {
                tracing::debug!(generation, "loader gone, dropping catalog outcome");
            }
        })
    }

    /// Wait for the next load to finish.
    ///
    /// Returns `None` when nothing is in flight.
    pub async fn next_outcome(&mut self) -> Option<LoadOutcome> {
        if self.in_flight == 0 {
            return None;
        }
        let outcome = self.rx.recv().await?;
        self.in_flight -= 1;
        Some(outcome)
    }

    /// Take a finished outcome without waiting.
    pub fn try_next(&mut self) -> Option<LoadOutcome> {
        let outcome = self.rx.try_recv().ok()?;
        self.in_flight -= 1;
        Some(outcome)
    }

    /// Wait for the next load to finish and apply it to the storefront.
    pub async fn apply_next(&mut self, store: &mut Storefront) -> Option<Applied> {
        let outcome = self.next_outcome().await?;
        Some(store.complete_load(outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::CatalogSource;
    use async_trait::async_trait;
    use mart_commerce::catalog::{Condition, Product};
    use mart_commerce::search::{FilterCriteria, FilterMode};
    use mart_commerce::Money;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Notify;

    /// Answers "slow" queries only after the gate opens.
    struct GatedCatalog {
        gate: Arc<Notify>,
    }

    #[async_trait]
    impl CatalogSource for GatedCatalog {
        fn filter_mode(&self) -> FilterMode {
            FilterMode::Server
        }

        async fn load(&self, criteria: &FilterCriteria) -> Result<Vec<Product>, CatalogError> {
            let query = criteria.trimmed_query().to_string();
            if query == "slow" {
                self.gate.notified().await;
            }
            Ok(vec![Product::new(
                query.clone(),
                query,
                "Apple",
                Condition::New,
                Money::new(20_000),
            )])
        }
    }

    #[tokio::test]
    async fn test_late_response_for_old_criteria_is_dropped() {
        let gate = Arc::new(Notify::new());
        let mut store = Storefront::new(Arc::new(GatedCatalog { gate: gate.clone() }));
        let mut loader = CatalogLoader::new();

        loader.spawn(store.set_query("slow").unwrap());
        loader.spawn(store.set_query("fast").unwrap());
        assert_eq!(loader.in_flight(), 2);

        let applied = loader.apply_next(&mut store).await.unwrap();
        assert_eq!(applied, Applied::Replaced { count: 1 });
        assert_eq!(store.products()[0].id.as_str(), "fast");

        gate.notify_one();
        let applied = loader.apply_next(&mut store).await.unwrap();
        assert_eq!(applied, Applied::Stale);
        assert_eq!(store.products()[0].id.as_str(), "fast");
        assert!(!store.is_loading());

        assert_eq!(loader.in_flight(), 0);
        assert!(loader.next_outcome().await.is_none());
    }

    #[tokio::test]
    async fn test_try_next_does_not_wait() {
        let gate = Arc::new(Notify::new());
        let mut store = Storefront::new(Arc::new(GatedCatalog { gate: gate.clone() }));
        let mut loader = CatalogLoader::new();

        let handle = loader.spawn(store.set_query("slow").unwrap());
        assert!(loader.try_next().is_none());

        gate.notify_one();
        handle.await.unwrap();
        let outcome = loader.try_next().unwrap();
        assert_eq!(outcome.generation, store.generation());
        assert_eq!(loader.in_flight(), 0);
    }

    struct PanickingCatalog;

    #[async_trait]
    impl CatalogSource for PanickingCatalog {
        fn filter_mode(&self) -> FilterMode {
            FilterMode::Server
        }

        async fn load(&self, _criteria: &FilterCriteria) -> Result<Vec<Product>, CatalogError> {
            panic!("catalog source blew up");
        }
    }

    #[tokio::test]
    async fn test_panicked_load_fails_instead_of_hanging() {
        let mut store = Storefront::new(Arc::new(PanickingCatalog));
        let mut loader = CatalogLoader::new();

        loader.spawn(store.begin_load());
        let applied = tokio::time::timeout(Duration::from_secs(2), loader.apply_next(&mut store))
            .await
            .expect("panicked load must still report an outcome")
            .unwrap();

        assert!(matches!(applied, Applied::Failed(CatalogError::Interrupted(_))));
        assert!(!store.is_loading());
        assert!(store
            .error_message()
            .unwrap()
            .starts_with("Catalog load was interrupted"));
        assert_eq!(loader.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_panicked_stale_load_is_still_discarded() {
        let mut store = Storefront::new(Arc::new(PanickingCatalog));
        let mut loader = CatalogLoader::new();

        loader.spawn(store.begin_load());
        let _current = store.begin_load();

        let applied = tokio::time::timeout(Duration::from_secs(2), loader.apply_next(&mut store))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(applied, Applied::Stale);
        assert!(store.is_loading());
    }
}
