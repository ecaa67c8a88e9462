//! Input-format checks used by the interactive prompts.
//!
//! Each validator returns `Err(message)` with a short explanation that the
//! prompt shows before asking again.

use std::sync::LazyLock;

use regex::Regex;
use uuid::{Uuid, Version};

pub const MAX_NAME_LEN: usize = 63;

static RESOURCE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]([-A-Za-z0-9]*[A-Za-z0-9])?$").expect("resource name pattern")
});

static DNS_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").expect("dns label pattern"));

/// Environment, application and resource group names.
pub fn validate_resource_name(input: &str) -> Result<(), String> {
    if input.is_empty() {
        return Err("name cannot be empty".to_string());
    }
    if input.len() > MAX_NAME_LEN {
        return Err(format!("name must be at most {} characters", MAX_NAME_LEN));
    }
    if !RESOURCE_NAME.is_match(input) {
        return Err(
            "name must start with a letter, contain only letters, numbers and '-', and end with a letter or number"
                .to_string(),
        );
    }
    Ok(())
}

pub fn is_valid_resource_name(input: &str) -> bool {
    validate_resource_name(input).is_ok()
}

/// Kubernetes namespaces are DNS-1123 labels.
pub fn validate_namespace(input: &str) -> Result<(), String> {
    if input.is_empty() {
        return Err("namespace cannot be empty".to_string());
    }
    if input.len() > MAX_NAME_LEN {
        return Err(format!(
            "namespace must be at most {} characters",
            MAX_NAME_LEN
        ));
    }
    if !DNS_LABEL.is_match(input) {
        return Err(
            "namespace must consist of lowercase letters, numbers and '-', and start and end with a letter or number"
                .to_string(),
        );
    }
    Ok(())
}

pub fn validate_uuid_v4(input: &str) -> Result<(), String> {
    match Uuid::parse_str(input) {
        Ok(id) if id.get_version() == Some(Version::Random) => Ok(()),
        Ok(_) => Err(format!("{:?} is not a version 4 UUID", input)),
        Err(_) => Err(format!("{:?} is not a valid UUID", input)),
    }
}

pub fn validate_required(input: &str) -> Result<(), String> {
    if input.trim().is_empty() {
        return Err("a value is required".to_string());
    }
    Ok(())
}

static ROLE_ARN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^arn:aws[a-z-]*:iam::(\d{12}):role/[\w+=,.@/-]+$").expect("role arn pattern")
});

/// IAM role ARNs, `arn:aws:iam::<12-digit account>:role/<name>`.
pub fn validate_aws_role_arn(input: &str) -> Result<(), String> {
    account_from_role_arn(input).map(|_| ())
}

pub fn account_from_role_arn(input: &str) -> Result<&str, String> {
    ROLE_ARN
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| format!("{:?} is not an IAM role ARN", input))
}

#[cfg(test)]
#[path = "tests/validate_tests.rs"]
mod tests;
