use {
    anyhow::{anyhow, Context, Result},
    log::debug,
    std::{
        fs,
        path::{Path, PathBuf},
    },
    toml_edit::{DocumentMut, Item},
};

pub const DEFAULT_CONFIG_FILE: &str = "verdict-release.toml";

pub const DEFAULT_PACKAGE_FILES: [&str; 6] =
    ["README.md", "LICENSE", "bin", "jars", "jdbc_jars", "conf"];

/// Where the file-hosting account lives and how it is reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub user: String,
    pub host: String,
    pub base_dir: String,
    pub project: String,
    pub shell_host: String,
    pub create_remote_dir: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocConfig {
    pub repo: PathBuf,
    pub conf_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub repo: PathBuf,
    pub conf_file: PathBuf,
    pub url: String,
    pub download_base_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseConfig {
    pub version_file: PathBuf,
    pub jars_dir: PathBuf,
    pub package_files: Vec<String>,
    pub ci_user: String,
    pub remote: RemoteConfig,
    pub doc: DocConfig,
    pub site: SiteConfig,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            version_file: PathBuf::from("version.json"),
            jars_dir: PathBuf::from("jars"),
            package_files: DEFAULT_PACKAGE_FILES.iter().map(|s| s.to_string()).collect(),
            ci_user: "jenkins".to_string(),
            remote: RemoteConfig {
                user: "yongjoop".to_string(),
                host: "frs.sourceforge.net".to_string(),
                base_dir: "/home/frs/project/verdict".to_string(),
                project: "verdict".to_string(),
                shell_host: "shell.sourceforge.net".to_string(),
                create_remote_dir: false,
            },
            doc: DocConfig {
                repo: PathBuf::from("../verdict-doc"),
                conf_file: PathBuf::from("conf.py"),
            },
            site: SiteConfig {
                repo: PathBuf::from("../verdict-site"),
                conf_file: PathBuf::from("_config.yml"),
                url: "http://verdictdb.org/".to_string(),
                download_base_url: "https://sourceforge.net/projects/verdict/files".to_string(),
            },
        }
    }
}

impl ReleaseConfig {
    /// Loads the config file if it exists, otherwise returns the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("{} not found, using default configuration", path.display());
            return Ok(Self::default());
        }
        let content =
            fs::read_to_string(path).context(format!("failed to read {}", path.display()))?;
        Self::parse(&content).context(format!("failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let doc = content.parse::<DocumentMut>()?;
        let mut config = Self::default();

        if let Some(v) = get_str(&doc, None, "version_file")? {
            config.version_file = PathBuf::from(v);
        }
        if let Some(v) = get_str(&doc, None, "jars_dir")? {
            config.jars_dir = PathBuf::from(v);
        }
        if let Some(v) = get_str_array(&doc, None, "package_files")? {
            config.package_files = v;
        }
        if let Some(v) = get_str(&doc, None, "ci_user")? {
            config.ci_user = v;
        }

        let remote = &mut config.remote;
        if let Some(v) = get_str(&doc, Some("remote"), "user")? {
            remote.user = v;
        }
        if let Some(v) = get_str(&doc, Some("remote"), "host")? {
            remote.host = v;
        }
        if let Some(v) = get_str(&doc, Some("remote"), "base_dir")? {
            remote.base_dir = v.trim_end_matches('/').to_string();
        }
        if let Some(v) = get_str(&doc, Some("remote"), "project")? {
            remote.project = v;
        }
        if let Some(v) = get_str(&doc, Some("remote"), "shell_host")? {
            remote.shell_host = v;
        }
        if let Some(v) = get_bool(&doc, Some("remote"), "create_remote_dir")? {
            remote.create_remote_dir = v;
        }

        if let Some(v) = get_str(&doc, Some("doc"), "repo")? {
            config.doc.repo = PathBuf::from(v);
        }
        if let Some(v) = get_str(&doc, Some("doc"), "conf_file")? {
            config.doc.conf_file = PathBuf::from(v);
        }

        let site = &mut config.site;
        if let Some(v) = get_str(&doc, Some("site"), "repo")? {
            site.repo = PathBuf::from(v);
        }
        if let Some(v) = get_str(&doc, Some("site"), "conf_file")? {
            site.conf_file = PathBuf::from(v);
        }
        if let Some(v) = get_str(&doc, Some("site"), "url")? {
            site.url = v;
        }
        if let Some(v) = get_str(&doc, Some("site"), "download_base_url")? {
            site.download_base_url = v.trim_end_matches('/').to_string();
        }

        Ok(config)
    }
}

fn get_item<'a>(doc: &'a DocumentMut, table: Option<&str>, key: &str) -> Option<&'a Item> {
    match table {
        Some(table) => doc.get(table).and_then(|t| t.get(key)),
        None => doc.get(key),
    }
}

fn key_name(table: Option<&str>, key: &str) -> String {
    match table {
        Some(table) => format!("{table}.{key}"),
        None => key.to_string(),
    }
}

fn get_str(doc: &DocumentMut, table: Option<&str>, key: &str) -> Result<Option<String>> {
    let Some(item) = get_item(doc, table, key) else {
        return Ok(None);
    };
    item.as_str()
        .map(|s| Some(s.to_string()))
        .ok_or_else(|| anyhow!("`{}` must be a string", key_name(table, key)))
}

fn get_bool(doc: &DocumentMut, table: Option<&str>, key: &str) -> Result<Option<bool>> {
    let Some(item) = get_item(doc, table, key) else {
        return Ok(None);
    };
    item.as_bool()
        .map(Some)
        .ok_or_else(|| anyhow!("`{}` must be a boolean", key_name(table, key)))
}

fn get_str_array(doc: &DocumentMut, table: Option<&str>, key: &str) -> Result<Option<Vec<String>>> {
    let Some(item) = get_item(doc, table, key) else {
        return Ok(None);
    };
    let Some(array) = item.as_array() else {
        return Err(anyhow!("`{}` must be an array of strings", key_name(table, key)));
    };
    array
        .iter()
        .map(|v| {
            v.as_str()
                .map(|s| s.to_string())
                .ok_or_else(|| anyhow!("`{}` must be an array of strings", key_name(table, key)))
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}
