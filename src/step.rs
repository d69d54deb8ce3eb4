//! Workflow step for [aws-actions/configure-aws-credentials][action]
//!
//! [action]: https://github.com/aws-actions/configure-aws-credentials

/// Pinned action reference. Existing workflows depend on this exact tag.
pub const CONFIGURE_AWS_CREDENTIALS_ACTION: &str = "aws-actions/configure-aws-credentials@v1-node16";

/// 30 minutes
pub const DEFAULT_ROLE_DURATION_SECONDS: u32 = 30 * 60;

const AWS_REGION: &str = "aws-region";
const ROLE_DURATION_SECONDS: &str = "role-duration-seconds";
const ROLE_SKIP_SESSION_TAGGING: &str = "role-skip-session-tagging";
const AWS_ACCESS_KEY_ID: &str = "aws-access-key-id";
const AWS_SECRET_ACCESS_KEY: &str = "aws-secret-access-key";
const AWS_SESSION_TOKEN: &str = "aws-session-token";
const MASK_AWS_ACCOUNT_ID: &str = "mask-aws-account-id";
const ROLE_TO_ASSUME: &str = "role-to-assume";
const ROLE_EXTERNAL_ID: &str = "role-external-id";
const ROLE_SESSION_NAME: &str = "role-session-name";

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum InputValue {
    String(String),
    Number(u32),
    Boolean(bool),
}

impl From<String> for InputValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for InputValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<u32> for InputValue {
    fn from(v: u32) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for InputValue {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

type StepInputsInner = Vec<(&'static str, Option<InputValue>)>;

/// `with:` parameters of a step, kept in insertion order.
///
/// A key may be present with an absent value (`None`), which is distinct from the key being
/// omitted. Absent values serialize as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepInputs {
    inner: StepInputsInner,
}

impl StepInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing an existing value in place.
    pub fn insert(&mut self, key: &'static str, value: Option<InputValue>) {
        match self.inner.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.inner.push((key, value)),
        }
    }

    /// Outer `None` when the key is omitted; inner `None` when present without a value.
    pub fn get(&self, key: &str) -> Option<Option<&InputValue>> {
        self.inner
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_ref())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.iter().any(|(k, _)| *k == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.inner.iter().map(|(k, _)| *k)
    }

    pub fn into_inner(self) -> StepInputsInner {
        self.inner
    }
}

impl std::ops::Deref for StepInputs {
    type Target = StepInputsInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl serde::Serialize for StepInputs {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.inner.len()))?;
        for (k, v) in self.inner.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// A single `steps[]` entry of a GitHub Actions job
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct JobStep {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "if", skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    pub name: String,
    pub uses: String,
    pub with: StepInputs,
}

impl JobStep {
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

/// Build a step which configures AWS credentials for the rest of the job.
///
/// `aws-region`, `role-duration-seconds` and `role-skip-session-tagging` are always set.
/// `aws-access-key-id` and `aws-secret-access-key` are always written even when absent; every
/// other optional input is written only when given. No validation is done here: conflicting or
/// incomplete authentication inputs are left for the action to reject at run time.
pub fn aws_credential_step(
    step_name: &str,
    props: &crate::props::AwsCredentialsStepProps,
) -> JobStep {
    use secrecy::ExposeSecret;

    let mut params = StepInputs::new();

    params.insert(AWS_REGION, Some(props.region.clone().into()));

    let duration = match props.role_duration_seconds {
        Some(v) if v != 0 => v,
        _ => DEFAULT_ROLE_DURATION_SECONDS,
    };
    params.insert(ROLE_DURATION_SECONDS, Some(duration.into()));

    // Session tagging requires sts:TagSession, which CDK bootstrapped roles lack.
    params.insert(
        ROLE_SKIP_SESSION_TAGGING,
        Some(props.role_skip_session_tagging.unwrap_or(true).into()),
    );

    params.insert(
        AWS_ACCESS_KEY_ID,
        props.access_key_id.clone().map(InputValue::from),
    );
    params.insert(
        AWS_SECRET_ACCESS_KEY,
        props
            .secret_access_key
            .as_ref()
            .map(|v| v.expose_secret().as_str().into()),
    );
    if let Some(token) = props
        .session_token
        .as_ref()
        .map(|v| v.expose_secret())
        .filter(|v| !v.is_empty())
    {
        params.insert(AWS_SESSION_TOKEN, Some(token.as_str().into()));
    }

    // explicit false is kept
    if let Some(mask) = props.mask_aws_account_id {
        params.insert(MASK_AWS_ACCOUNT_ID, Some(mask.into()));
    }

    if let Some(v) = non_empty(&props.role_to_assume) {
        params.insert(ROLE_TO_ASSUME, Some(v.into()));
    }
    if let Some(v) = non_empty(&props.role_external_id) {
        params.insert(ROLE_EXTERNAL_ID, Some(v.into()));
    }
    if let Some(v) = non_empty(&props.role_session_name) {
        params.insert(ROLE_SESSION_NAME, Some(v.into()));
    }

    JobStep {
        id: None,
        condition: None,
        name: step_name.to_owned(),
        uses: CONFIGURE_AWS_CREDENTIALS_ACTION.to_owned(),
        with: params,
    }
}
