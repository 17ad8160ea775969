pub mod config;
pub mod release;
pub mod version;

pub use config::{DocConfig, ReleaseConfig, RemoteConfig, SiteConfig};
pub use release::{PushDecision, UploadTarget};
pub use version::Version;
