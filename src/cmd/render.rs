#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    /// Step name
    #[clap(long, default_value = "Configure AWS Credentials")]
    name: String,
    /// Step id; optional
    #[clap(long)]
    id: Option<String>,
    /// Step condition (`if:`); optional
    #[clap(long = "if")]
    condition: Option<String>,

    /// Path to a JSON file with step props (camelCase keys, e.g. `roleToAssume`)
    ///
    /// Options given on the command line take precedence over the file.
    #[clap(long)]
    props: Option<std::path::PathBuf>,

    /// AWS region; falls back to $AWS_REGION or $AWS_DEFAULT_REGION
    #[clap(long)]
    region: Option<String>,
    /// IAM Role ARN to assume
    #[clap(long)]
    role_to_assume: Option<String>,
    /// External ID for AssumeRole
    #[clap(long)]
    role_external_id: Option<String>,
    /// Session name for AssumeRole
    #[clap(long)]
    role_session_name: Option<String>,
    /// Session duration in seconds; default to 1800 (30 minutes)
    #[clap(long, value_parser)]
    role_duration_seconds: Option<u32>,
    /// Skip session tagging; default to true as it requires sts:TagSession
    #[clap(long, value_parser)]
    role_skip_session_tagging: Option<bool>,
    /// GitHub Actions OIDC role ARN
    #[clap(long)]
    github_action_role_arn: Option<String>,
    /// Mask AWS account ID in action logs; omitted from the step unless given
    #[clap(long, value_parser)]
    mask_aws_account_id: Option<bool>,
    /// Access key ID, usually a `${{ secrets.* }}` expression
    #[clap(long)]
    access_key_id: Option<String>,
    /// Secret access key, usually a `${{ secrets.* }}` expression
    #[clap(long, value_parser = parse_secret)]
    secret_access_key: Option<secrecy::SecretString>,
    /// Session token, usually a `${{ secrets.* }}` expression
    #[clap(long, value_parser = parse_secret)]
    session_token: Option<secrecy::SecretString>,

    /// Indent the JSON output
    #[clap(long, action = clap::ArgAction::SetTrue)]
    pretty: bool,
}

fn parse_secret(s: &str) -> Result<secrecy::SecretString, std::convert::Infallible> {
    Ok(secrecy::SecretString::new(s.to_owned()))
}

impl RenderArgs {
    fn overrides(&self) -> crate::props::PropsOverrides {
        crate::props::PropsOverrides {
            role_to_assume: self.role_to_assume.clone(),
            role_external_id: self.role_external_id.clone(),
            role_skip_session_tagging: self.role_skip_session_tagging,
            github_action_role_arn: self.github_action_role_arn.clone(),
            role_session_name: self.role_session_name.clone(),
            role_duration_seconds: self.role_duration_seconds,
            mask_aws_account_id: self.mask_aws_account_id,
            region: self.region.clone(),
            access_key_id: self.access_key_id.clone(),
            secret_access_key: self.secret_access_key.clone(),
            session_token: self.session_token.clone(),
        }
    }
}

pub async fn render(
    config: &crate::config::Config,
    args: &RenderArgs,
) -> Result<crate::step::JobStep, crate::error::Error> {
    let base = match args.props {
        Some(ref path) => {
            tracing::debug!(message = "Loading props", path = ?path);
            crate::props::AwsCredentialsStepProps::load(path).await?
        }
        None => crate::props::AwsCredentialsStepProps::default(),
    };
    let mut props = base.merge(args.overrides());
    props.region = config.resolve_region(&props.region)?;
    tracing::debug!(props = ?props);

    if props.github_action_role_arn.is_some() && props.access_key_id.is_some() {
        tracing::warn!(
            message = "Both an OIDC role and an access key are given; the action decides which one is used",
            github_action_role_arn = ?props.github_action_role_arn,
            access_key_id = ?props.access_key_id,
        );
    }

    let mut step = crate::step::aws_credential_step(&args.name, &props);
    if let Some(ref id) = args.id {
        step = step.with_id(id);
    }
    if let Some(ref condition) = args.condition {
        step = step.with_condition(condition);
    }
    Ok(step)
}

#[tokio::main]
pub async fn run(config: &crate::config::Config, args: &RenderArgs) -> Result<(), anyhow::Error> {
    let _span = tracing::info_span!("render").entered();

    let step = render(config, args).await?;
    tracing::info!(
        message = "Rendered a step",
        name = %step.name,
        uses = %step.uses,
        inputs = ?step.with.keys().collect::<Vec<_>>(),
    );

    {
        use std::io::Write;
        let mut stdout = std::io::stdout().lock();
        if args.pretty {
            serde_json::to_writer_pretty(&mut stdout, &step)?;
        } else {
            serde_json::to_writer(&mut stdout, &step)?;
        }
        stdout.write_all(b"\n")?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::Parser;

    #[derive(clap::Parser)]
    struct TestCli {
        #[clap(flatten)]
        args: RenderArgs,
    }

    fn parse(argv: &[&str]) -> RenderArgs {
        TestCli::try_parse_from(std::iter::once("awscredstep").chain(argv.iter().copied()))
            .unwrap()
            .args
    }

    fn config(default_region: Option<&str>) -> crate::config::Config {
        crate::config::Config::new(crate::config::ConfigData {
            default_region: default_region.map(|v| v.to_string()),
        })
    }

    #[tokio::test]
    async fn test_render_from_flags() {
        let args = parse(&[
            "--name",
            "Configure AWS",
            "--region",
            "eu-west-1",
            "--role-to-assume",
            "arn:aws:iam::123:role/X",
            "--role-duration-seconds",
            "3600",
            "--mask-aws-account-id",
            "false",
            "--id",
            "creds",
        ]);
        let step = render(&config(None), &args).await.unwrap();
        let v = serde_json::to_value(&step).unwrap();

        assert_eq!(
            v,
            serde_json::json!({
                "id": "creds",
                "name": "Configure AWS",
                "uses": "aws-actions/configure-aws-credentials@v1-node16",
                "with": {
                    "aws-region": "eu-west-1",
                    "role-duration-seconds": 3600,
                    "role-skip-session-tagging": true,
                    "aws-access-key-id": null,
                    "aws-secret-access-key": null,
                    "mask-aws-account-id": false,
                    "role-to-assume": "arn:aws:iam::123:role/X",
                },
            })
        );
    }

    #[tokio::test]
    async fn test_render_flags_override_props_file() {
        let t = crate::dev::TestProps::new(
            r#"{"region":"us-east-1","roleSessionName":"from-file","roleExternalId":"ext"}"#,
        );
        let path = t.path().to_str().unwrap().to_string();
        let args = parse(&["--props", &path, "--role-session-name", "from-flag"]);
        let step = render(&config(None), &args).await.unwrap();

        assert_eq!(step.name, "Configure AWS Credentials");
        assert_eq!(
            step.with.get("aws-region"),
            Some(Some(&crate::step::InputValue::from("us-east-1")))
        );
        assert_eq!(
            step.with.get("role-session-name"),
            Some(Some(&crate::step::InputValue::from("from-flag")))
        );
        assert_eq!(
            step.with.get("role-external-id"),
            Some(Some(&crate::step::InputValue::from("ext")))
        );
    }

    #[tokio::test]
    async fn test_render_region_from_config() {
        let args = parse(&[]);
        let step = render(&config(Some("ap-northeast-1")), &args).await.unwrap();
        assert_eq!(
            step.with.get("aws-region"),
            Some(Some(&crate::step::InputValue::from("ap-northeast-1")))
        );
    }

    #[tokio::test]
    async fn test_render_without_region() {
        let args = parse(&["--role-to-assume", "arn:aws:iam::123:role/X"]);
        let e = render(&config(None), &args).await.unwrap_err();
        assert!(matches!(e, crate::error::Error::ConfigError(_)));
    }

    #[test]
    fn test_debug_redacts_secret_flags() {
        let args = parse(&[
            "--secret-access-key",
            "verysecret",
            "--session-token",
            "verytoken",
        ]);
        let s = format!("{args:?}");
        assert!(!s.contains("verysecret"));
        assert!(!s.contains("verytoken"));

        use secrecy::ExposeSecret;
        let overrides = args.overrides();
        assert_eq!(
            overrides.secret_access_key.unwrap().expose_secret(),
            "verysecret"
        );
        assert_eq!(overrides.session_token.unwrap().expose_secret(), "verytoken");
    }

    #[test]
    fn test_rejects_non_boolean_flag() {
        let argv = ["awscredstep", "--mask-aws-account-id", "maybe"];
        assert!(TestCli::try_parse_from(argv).is_err());
    }
}
