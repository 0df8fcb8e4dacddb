//! Caching layer for location lookups.
//!
//! Place names change rarely, and interactive clients repeat the same
//! search as the user types and edits. Lookups are cached by the
//! normalised search term and the restrictions. Failed lookups are not
//! cached.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::LocationInformationDelivery;
use crate::ojp::{OjpClient, OjpError, PlaceParam, Transport};

/// Cache key for place lookups: (normalised term, restrictions).
type PlaceKey = (String, PlaceParam);

/// Cached lookup result.
type PlaceEntry = Arc<LocationInformationDelivery>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 1000,
        }
    }
}

/// Terms differing only in case or surrounding whitespace share an entry.
fn normalise(term: &str) -> String {
    term.trim().to_lowercase()
}

/// OJP client with cached place lookups.
///
/// Trip searches are never cached; use [`client`](Self::client) for them.
pub struct CachedPlaceLookup<T> {
    client: OjpClient<T>,
    places: MokaCache<PlaceKey, PlaceEntry>,
}

impl<T: Transport> CachedPlaceLookup<T> {
    pub fn new(client: OjpClient<T>, config: &CacheConfig) -> Self {
        let places = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { client, places }
    }

    /// Look up places by name, using the cache if available.
    pub async fn request_place_results(
        &self,
        term: &str,
        restrictions: &PlaceParam,
    ) -> Result<PlaceEntry, OjpError> {
        let key = (normalise(term), restrictions.clone());

        if let Some(cached) = self.places.get(&key).await {
            trace!(term = %key.0, "place lookup cache hit");
            return Ok(cached);
        }

        let delivery = self
            .client
            .request_place_results(term.trim(), restrictions)
            .await?;
        let entry = Arc::new(delivery);
        self.places.insert(key, entry.clone()).await;

        Ok(entry)
    }

    /// Access the underlying client for operations that bypass the cache.
    pub fn client(&self) -> &OjpClient<T> {
        &self.client
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.places.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.places.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ojp::{MockTransport, OjpConfig, PlaceTypeRestriction};

    const EMPTY_LOOKUP: &str = r#"<OJP><OJPResponse><siri:ServiceDelivery>
        <siri:ResponseTimestamp>2024-03-01T09:00:00Z</siri:ResponseTimestamp>
        <OJPLocationInformationDelivery>
            <siri:ResponseTimestamp>2024-03-01T09:00:00Z</siri:ResponseTimestamp>
        </OJPLocationInformationDelivery>
    </siri:ServiceDelivery></OJPResponse></OJP>"#;

    fn lookup() -> CachedPlaceLookup<MockTransport> {
        CachedPlaceLookup::new(
            OjpClient::new(MockTransport::new(), OjpConfig::new("token")),
            &CacheConfig::default(),
        )
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(300));
        assert_eq!(config.max_capacity, 1000);
    }

    #[test]
    fn terms_are_normalised() {
        assert_eq!(normalise("  Bern "), "bern");
        assert_eq!(normalise("ZÜRICH"), "zürich");
    }

    #[tokio::test]
    async fn repeated_lookup_hits_the_cache() {
        let lookup = lookup();
        lookup.client().transport().push_xml(EMPTY_LOOKUP);

        let params = PlaceParam::default();
        let first = lookup.request_place_results("Bern", &params).await.unwrap();
        let second = lookup.request_place_results(" bern", &params).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(lookup.client().transport().request_count(), 1);
    }

    #[tokio::test]
    async fn restrictions_are_part_of_the_key() {
        let lookup = lookup();
        lookup
            .client()
            .transport()
            .push_xml(EMPTY_LOOKUP)
            .push_xml(EMPTY_LOOKUP);

        lookup
            .request_place_results("Bern", &PlaceParam::default())
            .await
            .unwrap();
        lookup
            .request_place_results("Bern", &PlaceParam::new([PlaceTypeRestriction::Address]))
            .await
            .unwrap();

        assert_eq!(lookup.client().transport().request_count(), 2);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let lookup = lookup();
        lookup
            .client()
            .transport()
            .push_response(502, "Bad Gateway")
            .push_xml(EMPTY_LOOKUP);

        let params = PlaceParam::default();
        assert!(lookup.request_place_results("Bern", &params).await.is_err());
        assert!(lookup.request_place_results("Bern", &params).await.is_ok());
        assert_eq!(lookup.client().transport().request_count(), 2);
    }
}
