//! Configuration module

mod site;

pub use site::ExternalLinkConfig;
pub use site::HighlightConfig;
pub use site::HomeConfig;
pub use site::SiteConfig;
pub use site::SitemapConfig;
