//! Domain models for the Homelab Dashboard

mod bitcoin;
mod category;
mod quick_link;
mod rss;
mod service;
mod settings;
mod system_health;

pub use bitcoin::*;
pub use category::*;
pub use quick_link::*;
pub use rss::*;
pub use service::*;
pub use settings::*;
pub use system_health::*;
