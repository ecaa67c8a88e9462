use anyhow::{Context, Result};
use serde::Deserialize;

use super::AwsClient;
use super::exec;
use crate::model::AwsCredential;

/// AWS lookups through the `aws` command line.
///
/// Access keys are handed to the child process through its environment.
/// IRSA lookups use the ambient AWS configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct AwsCli;

#[derive(Debug, Deserialize)]
struct CallerIdentity {
    #[serde(rename = "Account")]
    account: String,
}

#[derive(Debug, Deserialize)]
struct RegionList {
    #[serde(rename = "Regions", default)]
    regions: Vec<Region>,
}

#[derive(Debug, Deserialize)]
struct Region {
    #[serde(rename = "RegionName")]
    name: String,
}

fn credential_env(credential: &AwsCredential) -> Vec<(&str, &str)> {
    match credential {
        AwsCredential::AccessKey {
            access_key_id,
            secret_access_key,
        } => vec![
            ("AWS_ACCESS_KEY_ID", access_key_id.as_str()),
            ("AWS_SECRET_ACCESS_KEY", secret_access_key.as_str()),
        ],
        AwsCredential::Irsa { .. } => Vec::new(),
    }
}

impl AwsClient for AwsCli {
    fn caller_identity(&self, region: &str, credential: &AwsCredential) -> Result<String> {
        let identity: CallerIdentity = exec::run_json(
            "aws",
            &[
                "sts",
                "get-caller-identity",
                "--region",
                region,
                "--output",
                "json",
            ],
            &credential_env(credential),
        )
        .context("get AWS caller identity")?;
        Ok(identity.account)
    }

    fn list_regions(&self, region: &str, credential: &AwsCredential) -> Result<Vec<String>> {
        let out = exec::run(
            "aws",
            &["ec2", "describe-regions", "--region", region, "--output", "json"],
            &credential_env(credential),
        )
        .context("list AWS regions")?;
        parse_regions(&out)
    }
}

pub(crate) fn parse_regions(json: &str) -> Result<Vec<String>> {
    let list: RegionList = serde_json::from_str(json).context("parse describe-regions output")?;
    let mut names = list.regions.into_iter().map(|r| r.name).collect::<Vec<_>>();
    names.sort();
    Ok(names)
}

#[cfg(test)]
#[path = "../tests/clients/aws_tests.rs"]
mod tests;
