//! Configuration module

mod site;

pub use site::MenuItem;
pub use site::SiteConfig;
pub use site::SiteMetadata;
