//! Discover tab: beer search.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::application::services::SearchHistory;
use crate::domain::entities::{BeerItem, IndexedBeer};
use crate::domain::errors::DataError;
use crate::domain::observable::{Observable, Subscription};
use crate::domain::ports::{AnalyticsPort, SearchIndexPort};
use crate::presentation::navigation::Navigation;
use crate::presentation::strings;

pub struct SearchScreen {
    index: Arc<dyn SearchIndexPort>,
    analytics: Arc<dyn AnalyticsPort>,
    history: Arc<SearchHistory>,
    results: Mutex<Vec<BeerItem>>,
    selected: Mutex<Option<BeerItem>>,
    /// Loading message while a search runs.
    loading: Observable<Option<&'static str>>,
}

impl SearchScreen {
    #[must_use]
    pub fn new(
        index: Arc<dyn SearchIndexPort>,
        analytics: Arc<dyn AnalyticsPort>,
        history: Arc<SearchHistory>,
    ) -> Self {
        Self {
            index,
            analytics,
            history,
            results: Mutex::new(Vec::new()),
            selected: Mutex::new(None),
            loading: Observable::default(),
        }
    }

    #[must_use]
    pub const fn title(&self) -> &'static str {
        strings::SEARCH_TITLE
    }

    /// Runs `query` and replaces the result list.
    ///
    /// # Errors
    /// Returns the index error; previous results are kept.
    pub async fn search(&self, query: &str) -> Result<Vec<BeerItem>, DataError> {
        debug!(query, "Searching beers");
        self.loading.set(Some(strings::SEARCHING));
        let result = self.index.search(query).await;
        self.loading.set(None);

        let documents = result.map_err(|e| {
            warn!(error = %e, query, "Search failed");
            e
        })?;
        let beers: Vec<BeerItem> = documents.into_iter().map(|d| self.to_item(d)).collect();
        debug!(count = beers.len(), "Search results ready");
        *self.results.lock() = beers.clone();
        Ok(beers)
    }

    fn to_item(&self, doc: IndexedBeer) -> BeerItem {
        let image_count = doc.images.as_ref().map_or(0, Vec::len);
        if image_count < BeerItem::IMAGE_SIZES {
            self.analytics.report(&format!(
                "beer {} has {image_count} of {} images",
                doc.id,
                BeerItem::IMAGE_SIZES
            ));
        }
        BeerItem::from(doc)
    }

    #[must_use]
    pub fn results(&self) -> Vec<BeerItem> {
        self.results.lock().clone()
    }

    /// Selects the result at `index` and records it in the history.
    /// Returns `None` for an index outside the results.
    pub fn select(&self, index: usize) -> Option<Navigation> {
        let beer = self.results.lock().get(index).cloned()?;
        self.history.record(beer.name.clone());
        *self.selected.lock() = Some(beer.clone());
        Some(Navigation::BeerDescription {
            beer,
            enable_check_in: true,
        })
    }

    #[must_use]
    pub fn selected(&self) -> Option<BeerItem> {
        self.selected.lock().clone()
    }

    /// Hands the selection to the description page and clears it.
    pub fn prepare_for_description(&self) -> Option<BeerItem> {
        self.selected.lock().take()
    }

    #[must_use]
    pub fn loading_message(&self) -> Option<&'static str> {
        self.loading.get()
    }

    #[must_use]
    pub fn subscribe_loading(&self) -> Subscription<Option<&'static str>> {
        self.loading.subscribe()
    }

    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.history.entries()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::{MockAnalyticsPort, MockSearchIndex};
    use tokio::sync::Notify;

    fn beer(id: &str, images: Option<Vec<&str>>) -> IndexedBeer {
        IndexedBeer {
            id: id.into(),
            name: format!("Beer {id}"),
            abv: Some(5.2),
            brewery_name: Some("Brewery".into()),
            images: images.map(|v| v.into_iter().map(String::from).collect()),
            ..IndexedBeer::default()
        }
    }

    fn screen(docs: Vec<IndexedBeer>, analytics: MockAnalyticsPort) -> SearchScreen {
        SearchScreen::new(
            Arc::new(MockSearchIndex::with_documents(docs)),
            Arc::new(analytics),
            Arc::new(SearchHistory::default()),
        )
    }

    #[tokio::test]
    async fn test_search_maps_results() {
        let screen = screen(
            vec![beer("1", Some(vec!["l", "m", "s"]))],
            MockAnalyticsPort::new(),
        );
        assert_eq!(screen.title(), "Discover");

        let results = screen.search("ipa").await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].brewery_db_id, "1");
        assert_eq!(results[0].image_small.as_deref(), Some("s"));
        assert!(screen.loading_message().is_none());
    }

    #[tokio::test]
    async fn test_short_image_list_is_reported_but_listed() {
        let mut analytics = MockAnalyticsPort::new();
        analytics.expect_report().times(2).return_const(());
        let screen = screen(
            vec![
                beer("1", Some(vec!["l"])),
                beer("2", None),
                beer("3", Some(vec!["l", "m", "s"])),
            ],
            analytics,
        );

        let results = screen.search("stout").await.unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].image_large.as_deref(), Some("l"));
        assert!(results[0].image_medium.is_none());
    }

    #[tokio::test]
    async fn test_select_navigates_and_records_history() {
        let docs = (1..=4).map(|i| beer(&i.to_string(), Some(vec!["l", "m", "s"]))).collect();
        let screen = screen(docs, MockAnalyticsPort::new());
        screen.search("lager").await.unwrap();

        for i in 0..4 {
            screen.select(i);
        }
        let nav = screen.select(0).unwrap();

        assert!(matches!(
            nav,
            Navigation::BeerDescription { enable_check_in: true, ref beer } if beer.name == "Beer 1"
        ));
        assert_eq!(screen.history(), vec!["Beer 3", "Beer 4", "Beer 1"]);
        assert!(screen.select(9).is_none());
    }

    #[tokio::test]
    async fn test_prepare_for_description_clears_selection() {
        let screen = screen(vec![beer("1", Some(vec!["l", "m", "s"]))], MockAnalyticsPort::new());
        screen.search("x").await.unwrap();
        screen.select(0);

        assert_eq!(screen.prepare_for_description().map(|b| b.name), Some("Beer 1".into()));
        assert!(screen.selected().is_none());
        assert!(screen.prepare_for_description().is_none());
    }

    struct GatedIndex {
        gate: Notify,
    }

    #[async_trait::async_trait]
    impl SearchIndexPort for GatedIndex {
        async fn search(&self, _query: &str) -> Result<Vec<IndexedBeer>, DataError> {
            self.gate.notified().await;
            Err(DataError::network("offline"))
        }
    }

    #[tokio::test]
    async fn test_loading_shown_during_search() {
        let index = Arc::new(GatedIndex { gate: Notify::new() });
        let screen = Arc::new(SearchScreen::new(
            index.clone(),
            Arc::new(MockAnalyticsPort::new()),
            Arc::new(SearchHistory::default()),
        ));
        let mut loading = screen.subscribe_loading();

        let task = tokio::spawn({
            let screen = screen.clone();
            async move { screen.search("porter").await }
        });

        assert_eq!(loading.changed().await, Some(Some(strings::SEARCHING)));
        index.gate.notify_one();
        assert!(task.await.unwrap().is_err());
        assert!(screen.loading_message().is_none());
        assert!(screen.results().is_empty());
    }
}
