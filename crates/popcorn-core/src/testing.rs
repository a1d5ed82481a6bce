//! Scripted catalog for controller tests.
//!
//! Replies are either scripted up front (returned immediately) or held
//! until the test releases them, which lets a test choose the order in
//! which concurrent requests complete.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;

use crate::catalog::{Catalog, CatalogError};
use crate::models::{MovieDetail, SearchResultItem};

/// Canned outcome of one catalog call
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    NotFound,
    Transport(u16),
    Network(String),
}

impl<T> Reply<T> {
    fn into_result(self) -> Result<T, CatalogError> {
        match self {
            Reply::Ok(value) => Ok(value),
            Reply::NotFound => Err(CatalogError::NotFound),
            Reply::Transport(status) => Err(CatalogError::Transport { status }),
            Reply::Network(message) => Err(CatalogError::Network(message)),
        }
    }
}

type Pending<T> = Vec<(String, oneshot::Sender<Result<T, CatalogError>>)>;

#[derive(Default)]
struct Script {
    search_replies: HashMap<String, Reply<Vec<SearchResultItem>>>,
    lookup_replies: HashMap<String, Reply<MovieDetail>>,
    pending_searches: Pending<Vec<SearchResultItem>>,
    pending_lookups: Pending<MovieDetail>,
    search_calls: Vec<String>,
    lookup_calls: Vec<String>,
}

#[derive(Clone, Default)]
pub struct ScriptedCatalog {
    script: Rc<RefCell<Script>>,
}

impl ScriptedCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_search(&self, query: &str, reply: Reply<Vec<SearchResultItem>>) {
        self.script.borrow_mut().search_replies.insert(query.to_string(), reply);
    }

    pub fn on_lookup(&self, id: &str, reply: Reply<MovieDetail>) {
        self.script.borrow_mut().lookup_replies.insert(id.to_string(), reply);
    }

    /// Complete a held search; false if nothing is waiting for `query`
    pub fn release_search(&self, query: &str, reply: Reply<Vec<SearchResultItem>>) -> bool {
        let sender = {
            let mut script = self.script.borrow_mut();
            let Some(pos) = script.pending_searches.iter().position(|(q, _)| q == query) else {
                return false;
            };
            script.pending_searches.remove(pos).1
        };
        let _ = sender.send(reply.into_result());
        true
    }

    pub fn release_lookup(&self, id: &str, reply: Reply<MovieDetail>) -> bool {
        let sender = {
            let mut script = self.script.borrow_mut();
            let Some(pos) = script.pending_lookups.iter().position(|(i, _)| i == id) else {
                return false;
            };
            script.pending_lookups.remove(pos).1
        };
        let _ = sender.send(reply.into_result());
        true
    }

    pub fn search_calls(&self) -> Vec<String> {
        self.script.borrow().search_calls.clone()
    }

    pub fn lookup_calls(&self) -> Vec<String> {
        self.script.borrow().lookup_calls.clone()
    }
}

#[async_trait(?Send)]
impl Catalog for ScriptedCatalog {
    async fn search(&self, query: &str) -> Result<Vec<SearchResultItem>, CatalogError> {
        let receiver = {
            let mut script = self.script.borrow_mut();
            script.search_calls.push(query.to_string());
            if let Some(reply) = script.search_replies.get(query) {
                return reply.clone().into_result();
            }
            let (sender, receiver) = oneshot::channel();
            script.pending_searches.push((query.to_string(), sender));
            receiver
        };
        receiver
            .await
            .unwrap_or_else(|_| Err(CatalogError::Network("reply dropped".to_string())))
    }

    async fn lookup(&self, id: &str) -> Result<MovieDetail, CatalogError> {
        let receiver = {
            let mut script = self.script.borrow_mut();
            script.lookup_calls.push(id.to_string());
            if let Some(reply) = script.lookup_replies.get(id) {
                return reply.clone().into_result();
            }
            let (sender, receiver) = oneshot::channel();
            script.pending_lookups.push((id.to_string(), sender));
            receiver
        };
        receiver
            .await
            .unwrap_or_else(|_| Err(CatalogError::Network("reply dropped".to_string())))
    }
}

pub mod fixtures {
    use crate::models::{MovieDetail, SearchResultItem};

    pub fn search_item(id: &str, title: &str) -> SearchResultItem {
        SearchResultItem {
            id: id.to_string(),
            title: title.to_string(),
            year: "2010".to_string(),
            poster_url: format!("https://example.com/{}.jpg", id),
        }
    }

    pub fn movie(id: &str, title: &str) -> MovieDetail {
        MovieDetail {
            id: id.to_string(),
            title: title.to_string(),
            year: "2010".to_string(),
            poster_url: format!("https://example.com/{}.jpg", id),
            runtime_minutes: Some(148),
            plot: "A thief who steals corporate secrets.".to_string(),
            release_date: "16 Jul 2010".to_string(),
            actors: "Leonardo DiCaprio".to_string(),
            director: "Christopher Nolan".to_string(),
            genre: "Action, Sci-Fi".to_string(),
            imdb_rating: Some(8.8),
        }
    }
}
