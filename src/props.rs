//! Inputs for the configure-aws-credentials step

#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AwsCredentialsStepProps {
    pub role_to_assume: Option<String>,
    pub role_external_id: Option<String>,
    /// Defaults to true when unset.
    pub role_skip_session_tagging: Option<bool>,
    /// Role for GitHub Actions OIDC; the alternative to `access_key_id` and `secret_access_key`.
    #[serde(rename = "gitHubActionRoleArn")]
    pub github_action_role_arn: Option<String>,
    pub role_session_name: Option<String>,
    /// Whole seconds only; fractional or negative numbers fail to parse.
    pub role_duration_seconds: Option<u32>,
    /// `Some(false)` is passed to the action; `None` leaves the input out.
    pub mask_aws_account_id: Option<bool>,
    #[serde(default)]
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<secrecy::SecretString>,
    pub session_token: Option<secrecy::SecretString>,
}

/// Partial props given on the command line; every supplied field wins over a props file.
#[derive(Debug, Clone, Default)]
pub struct PropsOverrides {
    pub role_to_assume: Option<String>,
    pub role_external_id: Option<String>,
    pub role_skip_session_tagging: Option<bool>,
    pub github_action_role_arn: Option<String>,
    pub role_session_name: Option<String>,
    pub role_duration_seconds: Option<u32>,
    pub mask_aws_account_id: Option<bool>,
    pub region: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<secrecy::SecretString>,
    pub session_token: Option<secrecy::SecretString>,
}

impl AwsCredentialsStepProps {
    pub fn from_json_str(s: &str) -> Result<Self, crate::error::Error> {
        Ok(serde_json::from_str(s)?)
    }

    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self, crate::error::Error> {
        let json = tokio::fs::read(path.as_ref()).await?;
        Self::from_json_str(std::str::from_utf8(&json).map_err(|_| {
            crate::error::Error::ConfigError("props json is malformed (invalid utf8)".to_string())
        })?)
    }

    pub fn merge(mut self, overrides: PropsOverrides) -> Self {
        fn overlay<T>(base: &mut Option<T>, v: Option<T>) {
            if v.is_some() {
                *base = v;
            }
        }

        overlay(&mut self.role_to_assume, overrides.role_to_assume);
        overlay(&mut self.role_external_id, overrides.role_external_id);
        overlay(
            &mut self.role_skip_session_tagging,
            overrides.role_skip_session_tagging,
        );
        overlay(
            &mut self.github_action_role_arn,
            overrides.github_action_role_arn,
        );
        overlay(&mut self.role_session_name, overrides.role_session_name);
        overlay(
            &mut self.role_duration_seconds,
            overrides.role_duration_seconds,
        );
        overlay(&mut self.mask_aws_account_id, overrides.mask_aws_account_id);
        overlay(&mut self.access_key_id, overrides.access_key_id);
        overlay(&mut self.secret_access_key, overrides.secret_access_key);
        overlay(&mut self.session_token, overrides.session_token);
        if let Some(region) = overrides.region {
            self.region = region;
        }
        self
    }
}
