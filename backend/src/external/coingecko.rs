//! CoinGecko API client for the Bitcoin price widget

use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use shared::BitcoinData;

use crate::config::CoinGeckoConfig;
use crate::error::{AppError, AppResult};

const PRICE_QUERY: &str = "ids=bitcoin&vs_currencies=usd&include_24hr_change=true\
&include_market_cap=true&include_24hr_vol=true";

/// CoinGecko `/simple/price` client
#[derive(Clone)]
pub struct CoinGeckoClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SimplePriceResponse {
    bitcoin: Option<CoinPrice>,
    status: Option<ApiStatus>,
}

/// Absent and `null` numbers both read as `None`
#[derive(Debug, Default, Deserialize)]
struct CoinPrice {
    #[serde(default)]
    usd: Option<f64>,
    #[serde(default)]
    usd_market_cap: Option<f64>,
    #[serde(default)]
    usd_24h_vol: Option<f64>,
    #[serde(default)]
    usd_24h_change: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ApiStatus {
    error_code: Option<i64>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl CoinGeckoClient {
    pub fn new(client: Client, config: &CoinGeckoConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
        }
    }

    /// Fetch the current Bitcoin price in USD
    pub async fn fetch_bitcoin(&self) -> AppResult<BitcoinData> {
        let url = format!("{}/simple/price?{}", self.base_url, PRICE_QUERY);

        let mut request = self.client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.header("x-cg-demo-api-key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("CoinGecko request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(AppError::RateLimited(
                "Rate limit exceeded. Please provide a CoinGecko API key for reliable access."
                    .to_string(),
            ));
        }

        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| "Failed to fetch Bitcoin data".to_string());
            return Err(AppError::ExternalService(message));
        }

        let body: SimplePriceResponse = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("Failed to parse CoinGecko response: {}", e))
        })?;

        if let Some(api_status) = body.status {
            if api_status.error_code.is_some() {
                return Err(AppError::ExternalService(
                    api_status
                        .error_message
                        .unwrap_or_else(|| "API returned an error".to_string()),
                ));
            }
        }

        let bitcoin = body
            .bitcoin
            .ok_or_else(|| AppError::ExternalService("Invalid API response format".to_string()))?;

        Ok(BitcoinData {
            price: bitcoin.usd.unwrap_or(0.0),
            change24h: bitcoin.usd_24h_change.unwrap_or(0.0),
            market_cap: bitcoin.usd_market_cap.unwrap_or(0.0),
            volume: bitcoin.usd_24h_vol.unwrap_or(0.0),
            last_updated: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client_for(server: &mockito::ServerGuard, api_key: Option<&str>) -> CoinGeckoClient {
        let mut config = crate::config::Config::for_tests(&server.url()).coingecko;
        config.api_key = api_key.map(str::to_string);
        CoinGeckoClient::new(Client::new(), &config)
    }

    #[tokio::test]
    async fn test_fetch_bitcoin_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/simple/price")
            .match_query(Matcher::UrlEncoded("ids".into(), "bitcoin".into()))
            .with_status(200)
            .with_body(
                r#"{"bitcoin":{"usd":67000.5,"usd_market_cap":1.3e12,"usd_24h_vol":2.5e10,"usd_24h_change":-1.25}}"#,
            )
            .create_async()
            .await;

        let data = client_for(&server, None).fetch_bitcoin().await.unwrap();
        assert_eq!(data.price, 67000.5);
        assert_eq!(data.change24h, -1.25);
        assert_eq!(data.market_cap, 1.3e12);
        assert_eq!(data.volume, 2.5e10);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_api_key_header_sent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/simple/price")
            .match_query(Matcher::Any)
            .match_header("x-cg-demo-api-key", "demo-key")
            .with_status(200)
            .with_body(r#"{"bitcoin":{"usd":1.0}}"#)
            .create_async()
            .await;

        let data = client_for(&server, Some("demo-key")).fetch_bitcoin().await.unwrap();
        assert_eq!(data.price, 1.0);
        assert_eq!(data.volume, 0.0);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_null_fields_default_to_zero() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/simple/price")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"bitcoin":{"usd":50000,"usd_24h_vol":null,"usd_24h_change":null}}"#)
            .create_async()
            .await;

        let data = client_for(&server, None).fetch_bitcoin().await.unwrap();
        assert_eq!(data.price, 50000.0);
        assert_eq!(data.volume, 0.0);
        assert_eq!(data.change24h, 0.0);
        assert_eq!(data.market_cap, 0.0);
    }

    #[tokio::test]
    async fn test_rate_limit() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/simple/price")
            .match_query(Matcher::Any)
            .with_status(429)
            .create_async()
            .await;

        let result = client_for(&server, None).fetch_bitcoin().await;
        assert!(matches!(result, Err(AppError::RateLimited(_))));
    }

    #[tokio::test]
    async fn test_error_status_in_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/simple/price")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"status":{"error_code":10002,"error_message":"Missing API key"}}"#)
            .create_async()
            .await;

        match client_for(&server, None).fetch_bitcoin().await {
            Err(AppError::ExternalService(msg)) => assert_eq!(msg, "Missing API key"),
            other => panic!("unexpected result: {:?}", other.map(|d| d.price)),
        }
    }

    #[tokio::test]
    async fn test_missing_bitcoin_key() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/simple/price")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        match client_for(&server, None).fetch_bitcoin().await {
            Err(AppError::ExternalService(msg)) => assert_eq!(msg, "Invalid API response format"),
            other => panic!("unexpected result: {:?}", other.map(|d| d.price)),
        }
    }

    #[tokio::test]
    async fn test_upstream_error_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/simple/price")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body(r#"{"message":"upstream exploded"}"#)
            .create_async()
            .await;

        match client_for(&server, None).fetch_bitcoin().await {
            Err(AppError::ExternalService(msg)) => assert_eq!(msg, "upstream exploded"),
            other => panic!("unexpected result: {:?}", other.map(|d| d.price)),
        }
    }
}
