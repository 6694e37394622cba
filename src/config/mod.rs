//! Configuration module

mod site;

pub use site::HighlightConfig;
pub use site::Project;
pub use site::ServerConfig;
pub use site::SiteConfig;
pub use site::SocialLink;
pub use site::WorkEntry;
