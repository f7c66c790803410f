use jiff::SignedDuration;
use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

const CONFIG_FILE: &str = "phantask";
const ENV_PREFIX: &str = "PHANTASK";

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// Base URL of the PhanTask REST API.
    pub backend_url: Url,
    /// Key used to sign session cookies.
    pub session_secret: SecretString,
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: u32,
    #[serde(default)]
    pub secure_cookies: bool,
}

fn default_session_ttl_hours() -> u32 {
    12
}

impl Config {
    /// Load `phantask.toml` (optional) overlaid with `PHANTASK_*` environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()
    }

    pub fn session_ttl(&self) -> SignedDuration {
        SignedDuration::from_hours(self.session_ttl_hours.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply() {
        let config: Config = config::Config::builder()
            .set_override("backend_url", "http://localhost:8080")
            .unwrap()
            .set_override("session_secret", "hunter2")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.backend_url.as_str(), "http://localhost:8080/");
        assert_eq!(config.session_ttl(), SignedDuration::from_hours(12));
        assert!(!config.secure_cookies);
    }

    #[test]
    fn missing_backend_is_an_error() {
        let result = config::Config::builder()
            .set_override("session_secret", "hunter2")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize::<Config>();

        assert!(result.is_err());
    }
}
