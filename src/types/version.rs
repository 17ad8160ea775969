use {
    crate::error::ReleaseError,
    anyhow::Result,
    serde::{Deserialize, Serialize},
    std::{fmt, str::FromStr},
};

/// The (major, minor, build) triple identifying a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub build: u64,
}

impl Version {
    pub fn new(major: u64, minor: u64, build: u64) -> Self {
        Self {
            major,
            minor,
            build,
        }
    }

    /// Remote folders are scoped per minor-version line, e.g. `1.2`.
    pub fn major_minor(&self) -> String {
        format!("{}.{}", self.major, self.minor)
    }

    pub fn cli_dir_name(&self) -> String {
        format!("verdict-cli-{self}")
    }

    pub fn cli_zip_name(&self) -> String {
        format!("verdict-cli-{self}.zip")
    }

    pub fn spark_jar_name(&self) -> String {
        format!("verdict-spark-lib-{self}.jar")
    }

    pub fn jdbc_jar_name(&self) -> String {
        format!("verdict-jdbc-{self}.jar")
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.build)
    }
}

impl FromStr for Version {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let parsed = semver::Version::parse(s.trim()).map_err(|e| ReleaseError::InvalidVersion {
            text: s.to_string(),
            reason: e.to_string(),
        })?;
        if !parsed.pre.is_empty() || !parsed.build.is_empty() {
            return Err(ReleaseError::InvalidVersion {
                text: s.to_string(),
                reason: "pre-release and build metadata are not supported".to_string(),
            }
            .into());
        }
        Ok(Self::new(parsed.major, parsed.minor, parsed.patch))
    }
}
