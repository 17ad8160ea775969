//! Verdict release automation
//!
//! Packages the command-line-interface bundle, uploads the release jars and
//! the bundle to the file-hosting service, and stamps the new version into
//! the documentation and website repositories.
//!
//! Every external side effect sits behind a small trait
//! ([`utils::Archiver`], [`utils::RemoteUploader`], [`utils::Repository`],
//! [`utils::VersionStore`]) so the pipeline in [`commands::release`] can run
//! against fakes.
//!
//! # Examples
//!
//! ## Computing the upload plan
//!
//! ```no_run
//! use verdict_release::{commands::plan::upload_plan, ReleaseConfig, Version};
//!
//! let config = ReleaseConfig::default();
//! for path in upload_plan(&config, &Version::new(1, 2, 3)) {
//!     println!("{}", path.display());
//! }
//! ```
//!
//! ## Patching a Sphinx `conf.py`
//!
//! ```
//! use verdict_release::{commands::update_doc::LinePatch, Version};
//!
//! let patch = LinePatch::for_version(&Version::new(1, 2, 3)).unwrap();
//! let (text, replaced) = patch.apply("version = u'1.0.0'\nproject = u'Verdict'\n");
//! assert_eq!(text, "version = u'1.2.3'\nproject = u'Verdict'\n");
//! assert_eq!(replaced, 1);
//! ```

pub mod commands;
pub mod error;
pub mod types;
pub mod utils;

pub use error::ReleaseError;
pub use types::{PushDecision, ReleaseConfig, Version};

pub type Result<T> = anyhow::Result<T>;
