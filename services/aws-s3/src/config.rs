use crate::constants::*;
use ini::Ini;
use log::debug;
use reqsign::Env;
use s3presign_core::{Error, Result};
use std::path::PathBuf;
use url::Url;

/// Config for presigning against s3 or an s3-compatible endpoint.
///
/// Fields that are already set win over env and profile values, so the
/// usual way to build one is:
///
/// ```
/// use reqsign::OsEnv;
/// use s3presign_aws::Config;
///
/// # fn example() -> s3presign_core::Result<()> {
/// let config = Config::default()
///     .with_region("eu-west-1")
///     .from_env(&OsEnv)
///     .from_profile(&OsEnv)?;
/// assert_eq!(config.region(), "eu-west-1");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// `config_file` will be loaded from:
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_CONFIG_FILE`]
    /// - default to: `~/.aws/config`
    pub config_file: Option<String>,
    /// `profile` will be loaded from:
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_PROFILE`]
    /// - default to: `default`
    pub profile: Option<String>,
    /// `region` will be loaded from:
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_REGION`], then [`AWS_DEFAULT_REGION`]
    /// - profile config: `region`
    /// - default to: [`DEFAULT_REGION`]
    pub region: Option<String>,
    /// `endpoint` will be loaded from:
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_ENDPOINT_URL_S3`], then [`AWS_ENDPOINT_URL`]
    /// - default to: `https://s3.<region>.amazonaws.com`
    pub endpoint: Option<String>,
    /// Always address the bucket in the path instead of the host.
    pub force_path_style: bool,
}

impl Config {
    /// Set the region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set the endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the profile used to look up the region.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Set the path to the shared config file.
    pub fn with_config_file(mut self, path: impl Into<String>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Force path-style addressing.
    pub fn with_force_path_style(mut self, force_path_style: bool) -> Self {
        self.force_path_style = force_path_style;
        self
    }

    /// Load config from env.
    pub fn from_env(mut self, env: &impl Env) -> Self {
        let non_empty = |key: &str| env.var(key).filter(|v| !v.is_empty());

        if self.config_file.is_none() {
            self.config_file = non_empty(AWS_CONFIG_FILE);
        }
        if self.profile.is_none() {
            self.profile = non_empty(AWS_PROFILE);
        }
        if self.region.is_none() {
            self.region = non_empty(AWS_REGION).or_else(|| non_empty(AWS_DEFAULT_REGION));
        }
        if self.endpoint.is_none() {
            self.endpoint = non_empty(AWS_ENDPOINT_URL_S3).or_else(|| non_empty(AWS_ENDPOINT_URL));
        }
        self
    }

    /// Load the region from the active profile of the shared config file.
    ///
    /// A missing or unreadable file is skipped, as is a missing section. A
    /// file that can be read but not parsed is an error.
    pub fn from_profile(mut self, env: &impl Env) -> Result<Self> {
        if self.region.is_some() {
            return Ok(self);
        }

        let path = self.config_file.as_deref().unwrap_or("~/.aws/config");
        let Some(path) = expand_home_dir(env, path) else {
            debug!("failed to expand homedir for path: {path}");
            return Ok(self);
        };
        let content = match std::fs::read(&path) {
            Ok(content) => content,
            Err(err) => {
                debug!("failed to read config file {}: {err:?}", path.display());
                return Ok(self);
            }
        };

        let conf = Ini::load_from_str(&String::from_utf8_lossy(&content)).map_err(|e| {
            Error::config_invalid(format!("failed to parse config file {}", path.display()))
                .with_source(anyhow::Error::new(e))
        })?;

        let section = match self.profile() {
            "default" => "default".to_string(),
            x => format!("profile {x}"),
        };
        match conf.section(Some(section.as_str())) {
            Some(props) => self.region = props.get("region").map(|v| v.to_string()),
            None => debug!("section {section} not found in config file"),
        }

        Ok(self)
    }

    /// The profile in effect.
    pub fn profile(&self) -> &str {
        self.profile.as_deref().unwrap_or("default")
    }

    /// The region in effect.
    pub fn region(&self) -> &str {
        self.region.as_deref().unwrap_or(DEFAULT_REGION)
    }

    /// The endpoint in effect, parsed.
    pub fn endpoint_url(&self) -> Result<Url> {
        let endpoint = match &self.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => format!("https://s3.{}.amazonaws.com", self.region()),
        };

        let url = Url::parse(&endpoint).map_err(|e| {
            Error::config_invalid(format!("invalid endpoint {endpoint}"))
                .with_source(anyhow::Error::new(e))
        })?;
        if url.host_str().is_none() || url.cannot_be_a_base() {
            return Err(Error::config_invalid(format!(
                "endpoint {endpoint} has no host"
            )));
        }
        Ok(url)
    }
}

fn expand_home_dir(env: &impl Env, path: &str) -> Option<PathBuf> {
    match path.strip_prefix("~/") {
        Some(rest) => env.home_dir().map(|home| home.join(rest)),
        None => Some(PathBuf::from(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reqsign::StaticEnv;
    use std::collections::HashMap;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn static_env(envs: &[(&str, &str)]) -> StaticEnv {
        StaticEnv {
            home_dir: None,
            envs: envs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        }
    }

    #[test]
    fn test_config_defaults() -> anyhow::Result<()> {
        let config = Config::default().from_env(&static_env(&[]));

        assert_eq!(config.profile(), "default");
        assert_eq!(config.region(), "us-east-1");
        assert_eq!(
            config.endpoint_url()?.as_str(),
            "https://s3.us-east-1.amazonaws.com/"
        );
        Ok(())
    }

    #[test]
    fn test_config_from_env() {
        let env = static_env(&[
            (AWS_REGION, "eu-west-1"),
            (AWS_DEFAULT_REGION, "ap-south-1"),
            (AWS_ENDPOINT_URL, "http://localhost:9000"),
            (AWS_PROFILE, "dev"),
        ]);
        let config = Config::default().from_env(&env);

        assert_eq!(config.region(), "eu-west-1");
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:9000"));
        assert_eq!(config.profile(), "dev");
    }

    #[test]
    fn test_config_from_env_fallbacks() {
        let env = static_env(&[
            (AWS_REGION, ""),
            (AWS_DEFAULT_REGION, "ap-south-1"),
            (AWS_ENDPOINT_URL, "http://localhost:9000"),
            (AWS_ENDPOINT_URL_S3, "http://localhost:9100"),
        ]);
        let config = Config::default().from_env(&env);

        assert_eq!(config.region(), "ap-south-1");
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:9100"));
    }

    #[test]
    fn test_config_explicit_wins() {
        let env = static_env(&[(AWS_REGION, "eu-west-1"), (AWS_PROFILE, "dev")]);
        let config = Config::default()
            .with_region("us-west-2")
            .with_profile("prod")
            .from_env(&env);

        assert_eq!(config.region(), "us-west-2");
        assert_eq!(config.profile(), "prod");
    }

    #[test]
    fn test_config_from_profile() -> anyhow::Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();

        let tmp_dir = tempdir()?;
        let file_path = tmp_dir.path().join("config");
        let mut tmp_file = File::create(&file_path)?;
        writeln!(tmp_file, "[default]")?;
        writeln!(tmp_file, "region = us-west-1")?;
        writeln!(tmp_file)?;
        writeln!(tmp_file, "[profile profile1]")?;
        writeln!(tmp_file, "region = eu-central-1")?;

        let path = file_path.to_string_lossy().to_string();

        let env = static_env(&[(AWS_CONFIG_FILE, path.as_str())]);
        let config = Config::default().from_env(&env).from_profile(&env)?;
        assert_eq!(config.region(), "us-west-1");

        let env = static_env(&[(AWS_CONFIG_FILE, path.as_str()), (AWS_PROFILE, "profile1")]);
        let config = Config::default().from_env(&env).from_profile(&env)?;
        assert_eq!(config.region(), "eu-central-1");

        let env = static_env(&[(AWS_CONFIG_FILE, path.as_str()), (AWS_REGION, "sa-east-1")]);
        let config = Config::default().from_env(&env).from_profile(&env)?;
        assert_eq!(config.region(), "sa-east-1");

        Ok(())
    }

    #[test]
    fn test_config_from_profile_home_dir() -> anyhow::Result<()> {
        let tmp_dir = tempdir()?;
        std::fs::create_dir(tmp_dir.path().join(".aws"))?;
        let mut tmp_file = File::create(tmp_dir.path().join(".aws").join("config"))?;
        writeln!(tmp_file, "[profile other]")?;
        writeln!(tmp_file, "region = ca-central-1")?;

        let env = StaticEnv {
            home_dir: Some(tmp_dir.path().to_path_buf()),
            envs: HashMap::new(),
        };
        let config = Config::default()
            .with_profile("other")
            .from_env(&env)
            .from_profile(&env)?;
        assert_eq!(config.region(), "ca-central-1");
        Ok(())
    }

    #[test]
    fn test_config_from_profile_missing_file() -> anyhow::Result<()> {
        let env = static_env(&[(AWS_CONFIG_FILE, "/definitely/not/here/config")]);
        let config = Config::default().from_env(&env).from_profile(&env)?;
        assert_eq!(config.region(), "us-east-1");

        // No home dir means the default path can't be resolved.
        let env = static_env(&[]);
        let config = Config::default().from_env(&env).from_profile(&env)?;
        assert_eq!(config.region(), "us-east-1");
        Ok(())
    }

    #[test]
    fn test_config_from_profile_unreadable_file() -> anyhow::Result<()> {
        // A directory exists but can't be read as a file.
        let tmp_dir = tempdir()?;
        let path = tmp_dir.path().to_string_lossy().to_string();

        let env = static_env(&[(AWS_CONFIG_FILE, path.as_str())]);
        let config = Config::default().from_env(&env).from_profile(&env)?;
        assert_eq!(config.region(), "us-east-1");
        Ok(())
    }

    #[test]
    fn test_config_from_profile_malformed_file() -> anyhow::Result<()> {
        let tmp_dir = tempdir()?;
        let file_path = tmp_dir.path().join("config");
        let mut tmp_file = File::create(&file_path)?;
        writeln!(tmp_file, "[default")?;
        writeln!(tmp_file, "region = us-west-1")?;

        let path = file_path.to_string_lossy().to_string();
        let env = static_env(&[(AWS_CONFIG_FILE, path.as_str())]);
        let err = Config::default()
            .from_env(&env)
            .from_profile(&env)
            .expect_err("must fail");
        assert_eq!(err.kind(), s3presign_core::ErrorKind::ConfigInvalid);
        Ok(())
    }

    #[test]
    fn test_config_invalid_endpoint() {
        let config = Config::default().with_endpoint("not a url");
        let err = config.endpoint_url().expect_err("must fail");
        assert_eq!(err.kind(), s3presign_core::ErrorKind::ConfigInvalid);

        let config = Config::default().with_endpoint("mailto:someone@example.com");
        let err = config.endpoint_url().expect_err("must fail");
        assert_eq!(err.kind(), s3presign_core::ErrorKind::ConfigInvalid);
    }
}
