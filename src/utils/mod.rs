pub mod archive;
pub mod fs;
pub mod git;
pub mod identity;
pub mod remote;
pub mod version_store;

pub use archive::{Archiver, ZipArchiver};
pub use fs::{copy_into, find_files_by_affix, remove_dir_if_exists};
pub use git::{get_git_root_path, CommitOutcome, GitRepository, Repository};
pub use identity::current_user;
pub use remote::{RemoteUploader, ScpUploader};
pub use version_store::{JsonVersionStore, VersionStore};
