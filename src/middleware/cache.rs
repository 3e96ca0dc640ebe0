// src/middleware/cache.rs
use moka::future::Cache;
use std::future::Future;
use std::sync::Arc;

use crate::models::Locale;

/// Rendered HTML per `(locale, page id)`. Pages are a pure function of the
/// compiled-in tables, so entries never go stale and carry no TTL.
#[derive(Clone)]
pub struct PageCache {
    pages: Arc<Cache<(Locale, String), Arc<str>>>,
}

impl PageCache {
    pub fn new(max_capacity: u64) -> Self {
        Self {
            pages: Arc::new(Cache::builder().max_capacity(max_capacity).build()),
        }
    }

    pub async fn get(&self, locale: Locale, page_id: &str) -> Option<Arc<str>> {
        self.pages.get(&(locale, page_id.to_string())).await
    }

    /// Return the cached page or render and remember it. Render errors are
    /// passed through and nothing is cached.
    pub async fn get_or_render<F, Fut, E>(
        &self,
        locale: Locale,
        page_id: &str,
        render: F,
    ) -> Result<Arc<str>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, E>>,
    {
        if let Some(html) = self.get(locale, page_id).await {
            return Ok(html);
        }
        let html: Arc<str> = render().await?.into();
        self.pages.insert((locale, page_id.to_string()), html.clone()).await;
        Ok(html)
    }
}
