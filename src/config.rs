#[derive(Debug, Clone, Default)]
pub struct Config {
    inner: ConfigData,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigData {
    /// Region used when neither --region nor the props file give one
    pub default_region: Option<String>,
}

const AWS_REGION: &str = "AWS_REGION";
const AWS_DEFAULT_REGION: &str = "AWS_DEFAULT_REGION";

fn region_from_env() -> Option<String> {
    [AWS_REGION, AWS_DEFAULT_REGION]
        .iter()
        .filter_map(|k| std::env::var(k).ok())
        .find(|v| !v.is_empty())
}

impl Config {
    pub fn new(inner: ConfigData) -> Self {
        Self { inner }
    }

    /// Fill unset values from $AWS_REGION then $AWS_DEFAULT_REGION.
    pub fn from_env(mut inner: ConfigData) -> Self {
        if inner.default_region.is_none() {
            inner.default_region = region_from_env();
        }
        Self { inner }
    }

    /// Region for a step: `given` when non-empty, otherwise the configured default.
    pub fn resolve_region(&self, given: &str) -> Result<String, crate::error::Error> {
        if !given.is_empty() {
            return Ok(given.to_owned());
        }
        self.default_region.clone().ok_or_else(|| {
            crate::error::Error::ConfigError(
                "AWS region not specified; use --region, \"region\" in props, --default-region, or $AWS_REGION or $AWS_DEFAULT_REGION"
                    .to_string(),
            )
        })
    }
}

impl std::ops::Deref for Config {
    type Target = ConfigData;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_resolve_region_prefers_given() {
        let config = Config::new(ConfigData {
            default_region: Some("us-west-2".to_string()),
        });
        assert_eq!(config.resolve_region("eu-west-1").unwrap(), "eu-west-1");
        assert_eq!(config.resolve_region("").unwrap(), "us-west-2");
    }

    #[test]
    fn test_resolve_region_missing() {
        let config = Config::new(ConfigData::default());
        let e = config.resolve_region("").unwrap_err();
        assert!(matches!(e, crate::error::Error::ConfigError(_)));
    }

    #[test]
    fn test_from_env_keeps_explicit_default() {
        let config = Config::from_env(ConfigData {
            default_region: Some("sa-east-1".to_string()),
        });
        assert_eq!(config.default_region.as_deref(), Some("sa-east-1"));
    }

    #[test]
    fn test_from_env_region_order() {
        let saved: Vec<_> = [AWS_REGION, AWS_DEFAULT_REGION]
            .iter()
            .map(|k| (*k, std::env::var(k).ok()))
            .collect();

        std::env::set_var(AWS_REGION, "");
        std::env::set_var(AWS_DEFAULT_REGION, "eu-north-1");
        let config = Config::from_env(ConfigData::default());
        assert_eq!(config.resolve_region("").unwrap(), "eu-north-1");

        std::env::set_var(AWS_REGION, "us-east-2");
        let config = Config::from_env(ConfigData::default());
        assert_eq!(config.resolve_region("").unwrap(), "us-east-2");

        std::env::remove_var(AWS_REGION);
        std::env::remove_var(AWS_DEFAULT_REGION);
        let config = Config::from_env(ConfigData::default());
        assert!(config.resolve_region("").is_err());

        for (k, v) in saved {
            match v {
                Some(v) => std::env::set_var(k, v),
                None => std::env::remove_var(k),
            }
        }
    }
}
