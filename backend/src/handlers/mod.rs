//! HTTP request handlers

pub mod bitcoin;
pub mod category;
pub mod health;
pub mod quick_link;
pub mod rss;
pub mod service;
pub mod system_health;

pub use bitcoin::*;
pub use category::*;
pub use health::*;
pub use quick_link::*;
pub use rss::*;
pub use service::*;
pub use system_health::*;
