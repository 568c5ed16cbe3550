//! Business logic services for the Homelab Dashboard

pub mod bitcoin;
pub mod catalog;
pub mod category;
pub mod quick_link;
pub mod rss_feed;
pub mod settings;
pub mod status_check;
pub mod system_health;

pub use bitcoin::BitcoinService;
pub use catalog::CatalogService;
pub use category::CategoryService;
pub use quick_link::QuickLinkService;
pub use rss_feed::RssFeedService;
pub use settings::SettingsService;
pub use status_check::StatusCheckService;
pub use system_health::SystemHealthService;
