//! Bitcoin price service with a short-lived in-memory cache

use std::sync::Arc;
use std::time::{Duration, Instant};

use shared::BitcoinData;
use tokio::sync::RwLock;

use crate::error::AppResult;
use crate::external::CoinGeckoClient;

#[derive(Clone)]
pub struct BitcoinService {
    client: CoinGeckoClient,
    ttl: Duration,
    cache: Arc<RwLock<Option<(Instant, BitcoinData)>>>,
}

impl BitcoinService {
    pub fn new(client: CoinGeckoClient, ttl: Duration) -> Self {
        Self {
            client,
            ttl,
            cache: Arc::new(RwLock::new(None)),
        }
    }

    /// Current price, served from cache while it is fresher than the TTL
    pub async fn current(&self) -> AppResult<BitcoinData> {
        if let Some((fetched_at, data)) = self.cache.read().await.as_ref() {
            if fetched_at.elapsed() < self.ttl {
                return Ok(data.clone());
            }
        }

        let data = self.client.fetch_bitcoin().await?;
        *self.cache.write().await = Some((Instant::now(), data.clone()));
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[tokio::test]
    async fn test_second_call_served_from_cache() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/simple/price")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"bitcoin":{"usd":50000.0}}"#)
            .expect(1)
            .create_async()
            .await;

        let config = crate::config::Config::for_tests(&server.url());
        let client = CoinGeckoClient::new(reqwest::Client::new(), &config.coingecko);
        let service = BitcoinService::new(client, Duration::from_secs(60));

        let first = service.current().await.unwrap();
        let second = service.current().await.unwrap();
        assert_eq!(first, second);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/simple/price")
            .match_query(Matcher::Any)
            .with_status(429)
            .expect(2)
            .create_async()
            .await;

        let config = crate::config::Config::for_tests(&server.url());
        let client = CoinGeckoClient::new(reqwest::Client::new(), &config.coingecko);
        let service = BitcoinService::new(client, Duration::from_secs(60));

        assert!(service.current().await.is_err());
        assert!(service.current().await.is_err());
        mock.assert_async().await;
    }
}
