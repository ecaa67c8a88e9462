    use super::*;

    #[test]
    fn service_principal_body() {
        let body = azure_credential_body(&AzureCredential::ServicePrincipal {
            client_id: "app".to_string(),
            client_secret: "secret".to_string(),
            tenant_id: "tenant".to_string(),
        });
        assert_eq!(
            body,
            json!({
                "location": "global",
                "type": "System.Azure/credentials",
                "properties": {
                    "kind": "ServicePrincipal",
                    "clientId": "app",
                    "clientSecret": "secret",
                    "tenantId": "tenant",
                    "storage": { "kind": "Internal" },
                },
            })
        );
    }

    #[test]
    fn workload_identity_body_has_no_secret() {
        let body = azure_credential_body(&AzureCredential::WorkloadIdentity {
            client_id: "app".to_string(),
            tenant_id: "tenant".to_string(),
        });
        assert_eq!(body["properties"]["kind"], "WorkloadIdentity");
        assert!(body["properties"].get("clientSecret").is_none());
    }

    #[test]
    fn aws_bodies() {
        let keys = aws_credential_body(&AwsCredential::AccessKey {
            access_key_id: "AKIA".to_string(),
            secret_access_key: "shh".to_string(),
        });
        assert_eq!(keys["type"], "System.AWS/credentials");
        assert_eq!(keys["properties"]["kind"], "AccessKey");
        assert_eq!(keys["properties"]["accessKeyId"], "AKIA");
        assert_eq!(keys["properties"]["secretAccessKey"], "shh");

        let irsa = aws_credential_body(&AwsCredential::Irsa {
            role_arn: "arn:aws:iam::123456789012:role/radius".to_string(),
        });
        assert_eq!(irsa["properties"]["kind"], "IRSA");
        assert_eq!(
            irsa["properties"]["roleARN"],
            "arn:aws:iam::123456789012:role/radius"
        );
    }

    #[test]
    fn urls_carry_api_version() -> Result<()> {
        let factory = HttpConnectionFactory::new("http://localhost:9000/apis/api.ucp.dev/v1alpha3/");
        let workspace = Workspace::for_context("kind-kind").with_environment("default");
        let api = factory.connect(&workspace)?;

        assert_eq!(
            api.url("/planes/radius/local/resourceGroups/default"),
            "http://localhost:9000/apis/api.ucp.dev/v1alpha3/planes/radius/local/resourceGroups/default?api-version=2023-10-01-preview"
        );
        assert_eq!(api.scope, "/planes/radius/local/resourceGroups/default");
        Ok(())
    }
