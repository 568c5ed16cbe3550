//! External API integrations

pub mod coingecko;
pub mod glances;
pub mod probe;
pub mod rss;

pub use coingecko::CoinGeckoClient;
pub use glances::GlancesClient;
pub use probe::HttpProber;
pub use rss::RssClient;
