    use super::*;

    const KUBECONFIG: &str = r#"
apiVersion: v1
kind: Config
current-context: kind-kind
clusters:
  - name: kind-kind
    cluster:
      server: https://127.0.0.1:6443
contexts:
  - name: kind-kind
    context:
      cluster: kind-kind
      user: kind-kind
  - name: aks-prod
    context:
      cluster: aks-prod
      namespace: apps
users: []
"#;

    #[test]
    fn parses_current_and_all_contexts() -> Result<()> {
        let summary = parse_kubeconfig(KUBECONFIG)?;
        assert_eq!(summary.current, "kind-kind");
        assert_eq!(
            summary.contexts.keys().collect::<Vec<_>>(),
            vec!["aks-prod", "kind-kind"]
        );
        assert_eq!(summary.contexts["aks-prod"].namespace.as_deref(), Some("apps"));
        assert_eq!(summary.contexts["kind-kind"].cluster, "kind-kind");
        Ok(())
    }

    #[test]
    fn missing_current_context_is_empty() -> Result<()> {
        let summary = parse_kubeconfig("contexts: []\n")?;
        assert!(summary.current.is_empty());
        assert!(summary.contexts.is_empty());
        Ok(())
    }

    #[test]
    fn unreadable_file_names_the_path() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("missing");
        let err = KubeConfigFile::at(&path).contexts().unwrap_err();
        assert!(err.to_string().contains("read kubeconfig"));
        assert!(err.to_string().contains("missing"));
        Ok(())
    }

    #[test]
    fn reads_file_from_disk() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config");
        fs::write(&path, KUBECONFIG)?;
        let summary = KubeConfigFile::at(&path).contexts()?;
        assert_eq!(summary.contexts.len(), 2);
        Ok(())
    }
