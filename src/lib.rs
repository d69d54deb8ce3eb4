pub mod error;

pub mod config;
pub mod props;
pub mod step;

pub mod cmd;

#[cfg(test)]
pub(crate) mod dev;

pub use props::AwsCredentialsStepProps;
pub use step::{aws_credential_step, JobStep};
