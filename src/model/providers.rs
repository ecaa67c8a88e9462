use crate::init::InitError;

/// Azure scope and credentials for a new environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AzureProvider {
    pub subscription_id: String,
    pub resource_group: String,
    /// Location to create `resource_group` in when it does not exist yet.
    pub create_resource_group_in: Option<String>,
    pub credential: AzureCredential,
}

impl AzureProvider {
    pub fn scope(&self) -> String {
        format!(
            "/subscriptions/{}/resourceGroups/{}",
            self.subscription_id, self.resource_group
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum AzureCredential {
    ServicePrincipal {
        client_id: String,
        client_secret: String,
        tenant_id: String,
    },
    WorkloadIdentity {
        client_id: String,
        tenant_id: String,
    },
}

impl AzureCredential {
    pub fn kind(&self) -> AzureCredentialKind {
        match self {
            AzureCredential::ServicePrincipal { .. } => AzureCredentialKind::ServicePrincipal,
            AzureCredential::WorkloadIdentity { .. } => AzureCredentialKind::WorkloadIdentity,
        }
    }

    pub fn client_id(&self) -> &str {
        match self {
            AzureCredential::ServicePrincipal { client_id, .. }
            | AzureCredential::WorkloadIdentity { client_id, .. } => client_id,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AzureCredentialKind {
    ServicePrincipal,
    WorkloadIdentity,
}

impl AzureCredentialKind {
    pub const ALL: [AzureCredentialKind; 2] = [
        AzureCredentialKind::ServicePrincipal,
        AzureCredentialKind::WorkloadIdentity,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AzureCredentialKind::ServicePrincipal => "Service Principal",
            AzureCredentialKind::WorkloadIdentity => "Workload Identity",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.label() == label)
    }
}

/// AWS scope and credentials for a new environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AwsProvider {
    pub region: String,
    pub account_id: String,
    pub credential: AwsCredential,
}

impl AwsProvider {
    pub fn scope(&self) -> String {
        format!(
            "/planes/aws/aws/accounts/{}/regions/{}",
            self.account_id, self.region
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum AwsCredential {
    AccessKey {
        access_key_id: String,
        secret_access_key: String,
    },
    Irsa {
        role_arn: String,
    },
}

impl AwsCredential {
    pub fn kind(&self) -> AwsCredentialKind {
        match self {
            AwsCredential::AccessKey { .. } => AwsCredentialKind::AccessKey,
            AwsCredential::Irsa { .. } => AwsCredentialKind::Irsa,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AwsCredentialKind {
    AccessKey,
    Irsa,
}

impl AwsCredentialKind {
    pub const ALL: [AwsCredentialKind; 2] = [AwsCredentialKind::AccessKey, AwsCredentialKind::Irsa];

    pub fn label(self) -> &'static str {
        match self {
            AwsCredentialKind::AccessKey => "Access Key",
            AwsCredentialKind::Irsa => "IRSA",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.label() == label)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Azure,
    Aws,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 2] = [ProviderKind::Azure, ProviderKind::Aws];

    pub fn label(self) -> &'static str {
        match self {
            ProviderKind::Azure => "Azure",
            ProviderKind::Aws => "AWS",
        }
    }
}

/// Answer to "which cloud provider?", decoded once from the list prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloudProviderChoice {
    Provider(ProviderKind),
    Back,
}

impl CloudProviderChoice {
    pub const BACK_LABEL: &'static str = "[back]";

    pub fn labels() -> Vec<String> {
        ProviderKind::ALL
            .iter()
            .map(|k| k.label().to_string())
            .chain(std::iter::once(Self::BACK_LABEL.to_string()))
            .collect()
    }

    pub fn parse(label: &str) -> Result<Self, InitError> {
        if label == Self::BACK_LABEL {
            return Ok(CloudProviderChoice::Back);
        }
        ProviderKind::ALL
            .into_iter()
            .find(|k| k.label() == label)
            .map(CloudProviderChoice::Provider)
            .ok_or_else(|| InitError::UnsupportedProvider(label.to_string()))
    }
}
