//! Application Controller
//!
//! Single owner of the session: query, detail panel and watch-list.
//! Views read state through `with_state`, call the action methods, and
//! re-render when an observer fires. Network actions return a future for
//! the caller to spawn; a reply is applied only if its request is still
//! the live one.

use std::cell::RefCell;
use std::rc::Rc;

use futures::future::{self, FutureExt, LocalBoxFuture};
use tracing::{debug, error, info};

use crate::cancel::{run_cancellable, CancelHandle, RequestSlot};
use crate::catalog::{Catalog, CatalogError};
use crate::config::AppConfig;
use crate::detail::DetailState;
use crate::models::{MovieDetail, SearchResultItem, WatchedEntry};
use crate::query::{is_blank, QueryState, QueryStatus};
use crate::store::{KeyValueStore, PersistedList};
use crate::watchlist::{WatchList, WatchListError, WatchStats};

/// Everything a view renders from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub query: QueryState,
    pub detail: DetailState,
    pub watched: WatchList,
}

type Observer = Rc<dyn Fn()>;

struct Shared<C, S> {
    catalog: C,
    watched_store: PersistedList<WatchedEntry, S>,
    max_rating: u8,
    state: RefCell<SessionState>,
    search: RefCell<RequestSlot>,
    detail: RefCell<RequestSlot>,
    observers: RefCell<Vec<Observer>>,
}

pub struct AppController<C, S> {
    inner: Rc<Shared<C, S>>,
}

impl<C, S> Clone for AppController<C, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<C, S> AppController<C, S>
where
    C: Catalog + 'static,
    S: KeyValueStore + 'static,
{
    /// Build the controller and load the persisted watch-list
    pub fn new(catalog: C, store: S, config: &AppConfig) -> Self {
        let watched_store = PersistedList::new(store, config.storage_key.clone());
        let watched = WatchList::from_entries(watched_store.load());
        info!("Loaded {} watched movies from '{}'", watched.len(), config.storage_key);

        Self {
            inner: Rc::new(Shared {
                catalog,
                watched_store,
                max_rating: config.max_rating,
                state: RefCell::new(SessionState {
                    watched,
                    ..SessionState::default()
                }),
                search: RefCell::new(RequestSlot::default()),
                detail: RefCell::new(RequestSlot::default()),
                observers: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Called after every state change
    pub fn subscribe(&self, observer: impl Fn() + 'static) {
        self.inner.observers.borrow_mut().push(Rc::new(observer));
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&SessionState) -> R) -> R {
        f(&self.inner.state.borrow())
    }

    pub fn snapshot(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    pub fn stats(&self) -> WatchStats {
        self.with_state(|state| state.watched.stats())
    }

    pub fn max_rating(&self) -> u8 {
        self.inner.max_rating
    }

    pub fn store(&self) -> &S {
        self.inner.watched_store.store()
    }

    fn update(&self, f: impl FnOnce(&mut SessionState)) {
        f(&mut self.inner.state.borrow_mut());
        self.notify();
    }

    fn notify(&self) {
        let observers: Vec<Observer> = self.inner.observers.borrow().clone();
        for observer in observers {
            observer();
        }
    }

    // ========================
    // Search
    // ========================

    /// Replace the query. The returned future performs the search.
    pub fn set_query(&self, query: impl Into<String>) -> LocalBoxFuture<'static, ()> {
        let query = query.into();

        if is_blank(&query) {
            self.inner.search.borrow_mut().cancel();
            self.update(|state| {
                state.query = QueryState {
                    query,
                    status: QueryStatus::Idle,
                }
            });
            return future::ready(()).boxed_local();
        }

        let (handle, registration) = self.inner.search.borrow_mut().begin();
        let term = query.trim().to_string();
        self.update(|state| {
            state.query = QueryState {
                query,
                status: QueryStatus::Loading,
            }
        });

        let this = self.clone();
        async move {
            let result = run_cancellable(registration, this.inner.catalog.search(&term)).await;
            this.settle_search(&handle, &term, result);
        }
        .boxed_local()
    }

    fn settle_search(
        &self,
        handle: &CancelHandle,
        term: &str,
        result: Result<Vec<SearchResultItem>, CatalogError>,
    ) {
        {
            let mut slot = self.inner.search.borrow_mut();
            if !slot.is_current(handle) {
                debug!("Discarding stale search reply for '{}'", term);
                return;
            }
            slot.finish(handle);
        }

        let status = match result {
            Ok(items) => {
                debug!("Search '{}' returned {} results", term, items.len());
                QueryStatus::Loaded(items)
            }
            Err(e) if e.is_cancelled() => return,
            Err(e) => {
                debug!("Search '{}' failed: {:?}", term, e);
                QueryStatus::Failed(e.to_string())
            }
        };
        self.update(|state| state.query.status = status);
    }

    // ========================
    // Detail
    // ========================

    /// Toggle selection of `id`. The returned future fetches the detail.
    pub fn select(&self, id: impl Into<String>) -> LocalBoxFuture<'static, ()> {
        let id = id.into();

        let already_selected = self.with_state(|state| state.detail.selected_id() == Some(id.as_str()));
        if already_selected {
            self.close_detail();
            return future::ready(()).boxed_local();
        }

        let (handle, registration) = self.inner.detail.borrow_mut().begin();
        self.update(|state| state.detail = DetailState::Loading { id: id.clone() });

        let this = self.clone();
        async move {
            let result = run_cancellable(registration, this.inner.catalog.lookup(&id)).await;
            this.settle_detail(&handle, &id, result);
        }
        .boxed_local()
    }

    fn settle_detail(&self, handle: &CancelHandle, id: &str, result: Result<MovieDetail, CatalogError>) {
        {
            let mut slot = self.inner.detail.borrow_mut();
            let still_selected = self.with_state(|state| state.detail.selected_id() == Some(id));
            if !slot.is_current(handle) || !still_selected {
                debug!("Discarding stale detail reply for {}", id);
                return;
            }
            slot.finish(handle);
        }

        let detail = match result {
            Ok(movie) => DetailState::Shown {
                movie,
                draft: Default::default(),
            },
            Err(e) if e.is_cancelled() => return,
            Err(e) => {
                debug!("Lookup {} failed: {:?}", id, e);
                DetailState::Failed {
                    id: id.to_string(),
                    message: e.to_string(),
                }
            }
        };
        self.update(|state| state.detail = detail);
    }

    /// Back button, Escape, or re-selecting the open movie
    pub fn close_detail(&self) {
        self.inner.detail.borrow_mut().cancel();
        if self.with_state(|state| state.detail.is_open()) {
            self.update(|state| state.detail = DetailState::Closed);
        }
    }

    /// Set the rating for the shown movie
    pub fn rate(&self, rating: u8) -> Result<(), WatchListError> {
        if rating == 0 || rating > self.inner.max_rating {
            return Err(WatchListError::RatingOutOfRange(rating));
        }

        {
            let mut guard = self.inner.state.borrow_mut();
            let state = &mut *guard;
            match &mut state.detail {
                DetailState::Shown { movie, draft } => {
                    if state.watched.contains(&movie.id) {
                        return Err(WatchListError::AlreadyWatched(movie.id.clone()));
                    }
                    draft.set(rating);
                }
                _ => return Err(WatchListError::NothingSelected),
            }
        }
        self.notify();
        Ok(())
    }

    // ========================
    // Watch-list
    // ========================

    /// Add the shown movie with its rating, persist, and close the panel
    pub fn add_watched(&self) -> Result<WatchedEntry, WatchListError> {
        let entry = {
            let mut guard = self.inner.state.borrow_mut();
            let state = &mut *guard;
            let DetailState::Shown { movie, draft } = &state.detail else {
                return Err(WatchListError::NothingSelected);
            };
            let rating = draft.rating.ok_or(WatchListError::RatingMissing)?;
            let entry = WatchedEntry::from_detail(movie, rating, draft.revisions);
            state.watched.add(entry.clone())?;
            state.detail = DetailState::Closed;
            entry
        };
        self.inner.detail.borrow_mut().cancel();

        info!("Added {} ({}) rated {}", entry.title, entry.id, entry.user_rating);
        self.persist_watched();
        self.notify();
        Ok(entry)
    }

    /// Remove `id` from the watch-list; returns whether it was there
    pub fn delete_watched(&self, id: &str) -> bool {
        let removed = self.inner.state.borrow_mut().watched.delete(id);
        if removed {
            info!("Removed {} from the watch-list", id);
            self.persist_watched();
            self.notify();
        }
        removed
    }

    fn persist_watched(&self) {
        let entries = self.with_state(|state| state.watched.entries().to_vec());
        if let Err(e) = self.inner.watched_store.save(&entries) {
            error!("Failed to persist watch-list: {}", e);
        }
    }

    /// Abort every in-flight request (view teardown)
    pub fn shutdown(&self) {
        for (kind, slot) in [("search", &self.inner.search), ("detail", &self.inner.detail)] {
            let mut slot = slot.borrow_mut();
            if slot.in_flight() {
                debug!("Aborting in-flight {} request", kind);
            }
            slot.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{FocusPolicy, KeyBinding, KeyBindings, KeyPress};
    use crate::store::MemoryStore;
    use crate::testing::fixtures::{movie, search_item};
    use crate::testing::{Reply, ScriptedCatalog};
    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;

    type Controller = AppController<ScriptedCatalog, MemoryStore>;

    fn setup() -> (Controller, ScriptedCatalog) {
        setup_with_store(MemoryStore::new())
    }

    fn setup_with_store(store: MemoryStore) -> (Controller, ScriptedCatalog) {
        let catalog = ScriptedCatalog::new();
        let controller = AppController::new(catalog.clone(), store, &AppConfig::default());
        (controller, catalog)
    }

    fn slot(controller: &Controller) -> Option<String> {
        controller.store().get("watched")
    }

    /// Open the detail panel for `id` with a scripted lookup
    fn open(controller: &Controller, catalog: &ScriptedCatalog, id: &str, title: &str) {
        catalog.on_lookup(id, Reply::Ok(movie(id, title)));
        block_on(controller.select(id));
    }

    // ========================
    // Search
    // ========================

    #[test]
    fn test_empty_query_makes_no_call() {
        let (controller, catalog) = setup();

        block_on(controller.set_query(""));
        block_on(controller.set_query("   "));

        assert!(catalog.search_calls().is_empty());
        let query = controller.snapshot().query;
        assert_eq!(query.status, QueryStatus::Idle);
        assert!(query.results().is_empty());
        assert!(query.error_message().is_none());
    }

    #[tokio::test]
    async fn test_search_goes_through_loading_then_results() {
        let (controller, catalog) = setup();
        catalog.on_search("inception", Reply::Ok(vec![search_item("tt1375666", "Inception")]));

        let seen = Rc::new(RefCell::new(Vec::new()));
        let observer_seen = Rc::clone(&seen);
        let observed = controller.clone();
        controller.subscribe(move || {
            let query = observed.snapshot().query;
            observer_seen
                .borrow_mut()
                .push((query.is_loading(), query.error_message().is_some(), query.results().len()));
        });

        controller.set_query("inception").await;

        assert_eq!(*seen.borrow(), vec![(true, false, 0), (false, false, 1)]);
        assert_eq!(catalog.search_calls(), vec!["inception".to_string()]);
    }

    #[tokio::test]
    async fn test_not_found_scenario() {
        let (controller, catalog) = setup();
        catalog.on_search("zzzzxxxxnotreal", Reply::NotFound);

        controller.set_query("zzzzxxxxnotreal").await;

        let query = controller.snapshot().query;
        assert!(!query.is_loading());
        assert_eq!(query.error_message(), Some("Movie not found"));
        assert!(query.results().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_message() {
        let (controller, catalog) = setup();
        catalog.on_search("matrix", Reply::Transport(500));

        controller.set_query("matrix").await;

        assert_eq!(controller.snapshot().query.error_message(), Some("Something went wrong"));
    }

    #[tokio::test]
    async fn test_error_clears_on_next_successful_query() {
        let (controller, catalog) = setup();
        catalog.on_search("bad", Reply::Network("offline".to_string()));
        catalog.on_search("good", Reply::Ok(vec![search_item("tt1", "Good")]));

        controller.set_query("bad").await;
        assert!(controller.snapshot().query.error_message().is_some());

        controller.set_query("good").await;
        let query = controller.snapshot().query;
        assert!(query.error_message().is_none());
        assert_eq!(query.results().len(), 1);
    }

    #[test]
    fn test_query_is_trimmed_for_the_request() {
        let (controller, catalog) = setup();
        catalog.on_search("alien", Reply::Ok(vec![]));

        block_on(controller.set_query("  alien "));

        assert_eq!(catalog.search_calls(), vec!["alien".to_string()]);
        assert_eq!(controller.snapshot().query.query, "  alien ");
    }

    #[test]
    fn test_newer_query_wins_when_older_reply_arrives_last() {
        let (controller, catalog) = setup();
        let mut pool = LocalPool::new();
        let spawner = pool.spawner();

        spawner.spawn_local(controller.set_query("a")).unwrap();
        pool.run_until_stalled();
        spawner.spawn_local(controller.set_query("ab")).unwrap();
        pool.run_until_stalled();

        assert!(catalog.release_search("ab", Reply::Ok(vec![search_item("tt2", "AB")])));
        pool.run_until_stalled();
        // A's request was aborted, so nobody is waiting for its reply any more.
        catalog.release_search("a", Reply::Ok(vec![search_item("tt1", "A")]));
        pool.run_until_stalled();

        let query = controller.snapshot().query;
        assert_eq!(query.query, "ab");
        assert_eq!(query.results().len(), 1);
        assert_eq!(query.results()[0].title, "AB");
    }

    #[test]
    fn test_older_reply_arriving_first_is_discarded() {
        let (controller, catalog) = setup();
        let mut pool = LocalPool::new();
        let spawner = pool.spawner();

        spawner.spawn_local(controller.set_query("a")).unwrap();
        pool.run_until_stalled();
        spawner.spawn_local(controller.set_query("ab")).unwrap();
        pool.run_until_stalled();

        catalog.release_search("a", Reply::NotFound);
        pool.run_until_stalled();
        assert!(controller.snapshot().query.is_loading());

        catalog.release_search("ab", Reply::Ok(vec![search_item("tt2", "AB")]));
        pool.run_until_stalled();
        let query = controller.snapshot().query;
        assert!(query.error_message().is_none());
        assert_eq!(query.results()[0].title, "AB");
    }

    #[test]
    fn test_clearing_query_discards_in_flight_reply() {
        let (controller, catalog) = setup();
        let mut pool = LocalPool::new();
        let spawner = pool.spawner();

        spawner.spawn_local(controller.set_query("alien")).unwrap();
        pool.run_until_stalled();
        spawner.spawn_local(controller.set_query("")).unwrap();
        pool.run_until_stalled();

        catalog.release_search("alien", Reply::Ok(vec![search_item("tt1", "Alien")]));
        pool.run_until_stalled();

        assert_eq!(controller.snapshot().query.status, QueryStatus::Idle);
    }

    #[test]
    fn test_shutdown_cancellation_is_not_an_error() {
        let (controller, catalog) = setup();
        let mut pool = LocalPool::new();
        let spawner = pool.spawner();

        spawner.spawn_local(controller.set_query("alien")).unwrap();
        pool.run_until_stalled();
        controller.shutdown();
        catalog.release_search("alien", Reply::Transport(500));
        pool.run_until_stalled();

        assert!(controller.snapshot().query.error_message().is_none());
    }

    // ========================
    // Detail
    // ========================

    #[test]
    fn test_select_loads_then_shows() {
        let (controller, catalog) = setup();
        let mut pool = LocalPool::new();
        let spawner = pool.spawner();

        spawner.spawn_local(controller.select("tt1375666")).unwrap();
        pool.run_until_stalled();
        assert!(controller.snapshot().detail.is_loading());

        catalog.release_lookup("tt1375666", Reply::Ok(movie("tt1375666", "Inception")));
        pool.run_until_stalled();

        let detail = controller.snapshot().detail;
        assert_eq!(detail.movie().unwrap().title, "Inception");
        assert_eq!(detail.draft().unwrap().rating, None);
    }

    #[test]
    fn test_reselecting_same_id_closes() {
        let (controller, catalog) = setup();
        open(&controller, &catalog, "tt1", "One");
        assert!(controller.snapshot().detail.is_open());

        block_on(controller.select("tt1"));

        assert_eq!(controller.snapshot().detail, DetailState::Closed);
        assert_eq!(catalog.lookup_calls().len(), 1);
    }

    #[test]
    fn test_last_selected_id_wins() {
        let (controller, catalog) = setup();
        let mut pool = LocalPool::new();
        let spawner = pool.spawner();

        spawner.spawn_local(controller.select("tt1")).unwrap();
        pool.run_until_stalled();
        spawner.spawn_local(controller.select("tt2")).unwrap();
        pool.run_until_stalled();

        catalog.release_lookup("tt2", Reply::Ok(movie("tt2", "Two")));
        pool.run_until_stalled();
        catalog.release_lookup("tt1", Reply::Ok(movie("tt1", "One")));
        pool.run_until_stalled();

        assert_eq!(controller.snapshot().detail.movie().unwrap().title, "Two");
    }

    #[test]
    fn test_closing_while_loading_discards_reply() {
        let (controller, catalog) = setup();
        let mut pool = LocalPool::new();
        let spawner = pool.spawner();

        spawner.spawn_local(controller.select("tt1")).unwrap();
        pool.run_until_stalled();
        controller.close_detail();

        catalog.release_lookup("tt1", Reply::Ok(movie("tt1", "One")));
        pool.run_until_stalled();

        assert_eq!(controller.snapshot().detail, DetailState::Closed);
    }

    #[test]
    fn test_failed_lookup() {
        let (controller, catalog) = setup();
        catalog.on_lookup("bogus", Reply::NotFound);

        block_on(controller.select("bogus"));

        assert_eq!(
            controller.snapshot().detail,
            DetailState::Failed {
                id: "bogus".to_string(),
                message: "Movie not found".to_string(),
            }
        );
    }

    // ========================
    // Watch-list
    // ========================

    #[tokio::test]
    async fn test_inception_scenario() {
        let (controller, catalog) = setup();
        catalog.on_search("inception", Reply::Ok(vec![search_item("tt1375666", "Inception")]));
        catalog.on_lookup("tt1375666", Reply::Ok(movie("tt1375666", "Inception")));

        controller.set_query("inception").await;
        let first = controller.snapshot().query.results()[0].id.clone();
        controller.select(first).await;
        controller.rate(9).unwrap();
        controller.add_watched().unwrap();

        let state = controller.snapshot();
        assert_eq!(state.detail, DetailState::Closed);
        assert_eq!(state.watched.len(), 1);
        assert_eq!(state.watched.entries()[0].title, "Inception");
        assert_eq!(state.watched.entries()[0].user_rating, 9);

        let stored: serde_json::Value = serde_json::from_str(&slot(&controller).unwrap()).unwrap();
        let stored = stored.as_array().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0]["Title"], "Inception");
        assert_eq!(stored[0]["userRating"], 9);
    }

    #[test]
    fn test_rating_revisions_are_recorded() {
        let (controller, catalog) = setup();
        open(&controller, &catalog, "tt1", "One");

        controller.rate(4).unwrap();
        controller.rate(7).unwrap();
        controller.rate(7).unwrap();
        let entry = controller.add_watched().unwrap();

        assert_eq!(entry.user_rating, 7);
        assert_eq!(entry.rating_revision_count, 2);
    }

    #[test]
    fn test_add_then_delete_restores_list_and_storage() {
        let store = MemoryStore::new();
        let existing = WatchedEntry::from_detail(&movie("tt0", "Zero"), 6, 1);
        PersistedList::new(&store, "watched").save(&[existing]).unwrap();
        let before_slot = store.get("watched");

        let (controller, catalog) = setup_with_store(store);
        let before = controller.snapshot().watched;

        open(&controller, &catalog, "tt1", "One");
        controller.rate(8).unwrap();
        controller.add_watched().unwrap();
        assert_eq!(controller.snapshot().watched.len(), 2);

        assert!(controller.delete_watched("tt1"));
        assert_eq!(controller.snapshot().watched, before);
        assert_eq!(slot(&controller), before_slot);
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let (controller, _catalog) = setup();
        assert!(!controller.delete_watched("nope"));
        assert_eq!(slot(&controller), None);
    }

    #[test]
    fn test_duplicate_add_is_rejected() {
        let (controller, catalog) = setup();
        open(&controller, &catalog, "tt1", "One");
        controller.rate(8).unwrap();
        controller.add_watched().unwrap();

        open(&controller, &catalog, "tt1", "One");
        assert_eq!(
            controller.rate(3),
            Err(WatchListError::AlreadyWatched("tt1".to_string()))
        );
        assert_eq!(controller.add_watched(), Err(WatchListError::RatingMissing));
        assert_eq!(controller.snapshot().watched.len(), 1);
    }

    #[test]
    fn test_add_requires_rating_and_open_movie() {
        let (controller, catalog) = setup();
        assert_eq!(controller.add_watched(), Err(WatchListError::NothingSelected));

        open(&controller, &catalog, "tt1", "One");
        assert_eq!(controller.add_watched(), Err(WatchListError::RatingMissing));
        assert!(controller.snapshot().detail.is_open());
    }

    #[test]
    fn test_rating_range() {
        let (controller, catalog) = setup();
        open(&controller, &catalog, "tt1", "One");

        assert_eq!(controller.rate(0), Err(WatchListError::RatingOutOfRange(0)));
        assert_eq!(controller.rate(11), Err(WatchListError::RatingOutOfRange(11)));
        assert!(controller.rate(10).is_ok());
    }

    #[test]
    fn test_watch_list_loads_from_storage() {
        let store = MemoryStore::with_slot(
            "watched",
            r#"[{"imdbID":"tt1","Title":"One","Year":"2001","Poster":"","imdbRating":7.5,"Runtime":100,"userRating":8,"countRatingDecisions":1}]"#,
        );
        let (controller, _catalog) = setup_with_store(store);

        let stats = controller.stats();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.avg_user_rating, 8.0);
    }

    #[test]
    fn test_rows_with_null_numbers_survive_load_and_save() {
        let store = MemoryStore::with_slot(
            "watched",
            r#"[{"imdbID":"tt1","Title":"One","Year":"2001","Poster":"","imdbRating":7.5,"Runtime":100,"userRating":8,"countRatingDecisions":1},
                {"imdbID":"tt2","Title":"Two","Year":"2002","Poster":"N/A","imdbRating":null,"Runtime":null,"userRating":6,"countRatingDecisions":2}]"#,
        );
        let (controller, catalog) = setup_with_store(store);
        assert_eq!(controller.snapshot().watched.len(), 2);

        open(&controller, &catalog, "tt3", "Three");
        controller.rate(9).unwrap();
        controller.add_watched().unwrap();

        let stored: Vec<WatchedEntry> = serde_json::from_str(&slot(&controller).unwrap()).unwrap();
        let ids: Vec<&str> = stored.iter().map(|entry| entry.id.as_str()).collect();
        assert_eq!(ids, vec!["tt1", "tt2", "tt3"]);
        assert_eq!(stored[1].runtime_minutes, 0);
    }

    #[test]
    fn test_duplicate_stored_rows_load_once() {
        let row = r#"{"imdbID":"tt1","Title":"One","Year":"2001","Poster":"","imdbRating":7.5,"Runtime":100,"userRating":8,"countRatingDecisions":1}"#;
        let store = MemoryStore::with_slot("watched", &format!("[{},{}]", row, row));
        let (controller, _catalog) = setup_with_store(store);

        assert_eq!(controller.snapshot().watched.len(), 1);
    }

    #[test]
    fn test_corrupt_storage_starts_empty() {
        let (controller, _catalog) = setup_with_store(MemoryStore::with_slot("watched", "[{broken"));
        assert!(controller.snapshot().watched.is_empty());
        assert_eq!(controller.stats(), WatchStats::default());
    }

    // ========================
    // Keyboard
    // ========================

    #[test]
    fn test_escape_closes_detail_and_unbinds() {
        let (controller, catalog) = setup();
        let keys = KeyBindings::new();
        let binding: Rc<RefCell<Option<KeyBinding>>> = Rc::new(RefCell::new(None));

        // The panel owns its Escape binding and drops it when it closes.
        let observed = controller.clone();
        let panel_binding = Rc::clone(&binding);
        controller.subscribe(move || {
            if !observed.with_state(|state| state.detail.is_open()) {
                panel_binding.borrow_mut().take();
            }
        });

        open(&controller, &catalog, "tt1", "One");
        let closer = controller.clone();
        *binding.borrow_mut() = Some(keys.bind("Escape", FocusPolicy::Always, move || closer.close_detail()));

        assert_eq!(keys.dispatch(&KeyPress::new("Escape", false)), 1);
        assert_eq!(controller.snapshot().detail, DetailState::Closed);
        assert_eq!(keys.active_count(), 0);
        assert_eq!(keys.dispatch(&KeyPress::new("Escape", false)), 0);
    }
}
