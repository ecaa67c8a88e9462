use anyhow::{Context, Result};

use super::cloud::add_set_value;
use super::{InitError, Runner};
use crate::model::{AwsCredential, AwsCredentialKind, AwsProvider, InitOptions};
use crate::prompt::TextInputOptions;
use crate::validate::{account_from_role_arn, validate_aws_role_arn, validate_required};

/// Region used for account and region lookups before the user picks one.
pub(crate) const AWS_QUERY_REGION: &str = "us-east-1";

pub(crate) const SELECT_AWS_CREDENTIAL_KIND_PROMPT: &str =
    "Select a credential kind for the AWS provider";
pub(crate) const ENTER_AWS_ACCESS_KEY_ID_PROMPT: &str = "Enter the IAM access key id";
pub(crate) const ENTER_AWS_SECRET_ACCESS_KEY_PROMPT: &str = "Enter your IAM secret access key";
pub(crate) const ENTER_AWS_ROLE_ARN_PROMPT: &str = "Enter the role ARN";
pub(crate) const SELECT_AWS_REGION_PROMPT: &str =
    "Select the region you would like to deploy AWS resources to:";

pub(crate) const AWS_IRSA_SET_VALUE: &str = "global.aws.irsa.enabled=true";

const ACCESS_KEY_HELP: &str = "AWS IAM access keys are used to create AWS resources.\n\n\
     For example, you can create one using the following command:\n\
     aws iam create-access-key";

const IRSA_HELP: &str = "An IAM role trusted by the cluster's OIDC provider is required to use IRSA.";

impl Runner {
    pub(super) fn enter_aws_cloud_provider(&self, options: &mut InitOptions) -> Result<AwsProvider> {
        let kinds = AwsCredentialKind::ALL
            .iter()
            .map(|k| k.label().to_string())
            .collect::<Vec<_>>();
        let answer = self
            .prompter
            .list_input(&kinds, SELECT_AWS_CREDENTIAL_KIND_PROMPT)?;
        let kind = AwsCredentialKind::from_label(&answer)
            .ok_or(InitError::UnsupportedCredentialKind(answer))?;

        let (credential, account_id) = match kind {
            AwsCredentialKind::AccessKey => {
                let access_key_id = self.prompter.text_input(
                    ENTER_AWS_ACCESS_KEY_ID_PROMPT,
                    TextInputOptions::default()
                        .placeholder("Enter IAM access key id...")
                        .validated(validate_required)
                        .help(ACCESS_KEY_HELP),
                )?;
                let secret_access_key = self.prompter.text_input(
                    ENTER_AWS_SECRET_ACCESS_KEY_PROMPT,
                    TextInputOptions::default()
                        .placeholder("Enter IAM secret access key...")
                        .validated(validate_required)
                        .masked(),
                )?;
                let credential = AwsCredential::AccessKey {
                    access_key_id,
                    secret_access_key,
                };
                let account_id = self
                    .clients
                    .aws
                    .caller_identity(AWS_QUERY_REGION, &credential)
                    .context("failed to look up the AWS account for the access key")?;
                (credential, account_id)
            }
            AwsCredentialKind::Irsa => {
                let role_arn = self.prompter.text_input(
                    ENTER_AWS_ROLE_ARN_PROMPT,
                    TextInputOptions::default()
                        .placeholder("arn:aws:iam::<account>:role/<name>")
                        .validated(validate_aws_role_arn)
                        .help(IRSA_HELP),
                )?;
                let account_id = account_from_role_arn(&role_arn)
                    .map_err(anyhow::Error::msg)?
                    .to_string();
                add_set_value(options, AWS_IRSA_SET_VALUE);
                (AwsCredential::Irsa { role_arn }, account_id)
            }
        };

        let mut regions = self
            .clients
            .aws
            .list_regions(AWS_QUERY_REGION, &credential)
            .context("failed to list AWS regions")?;
        regions.sort();
        let region = self
            .prompter
            .list_input(&regions, SELECT_AWS_REGION_PROMPT)?;

        Ok(AwsProvider {
            region,
            account_id,
            credential,
        })
    }
}
