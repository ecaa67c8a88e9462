    use super::*;
    use crate::model::{AwsProvider, ClusterOptions, EnvironmentOptions};

    fn fresh_options() -> InitOptions {
        let mut options = InitOptions {
            cluster: ClusterOptions {
                install: true,
                namespace: "radius-system".to_string(),
                context: "kind-kind".to_string(),
                version: "0.40.0".to_string(),
            },
            environment: EnvironmentOptions {
                create: true,
                name: "default".to_string(),
                namespace: "default".to_string(),
            },
            ..InitOptions::default()
        };
        options.recipes.dev_recipes = true;
        options.application.scaffold = true;
        options.application.name = "my-app".to_string();
        options
    }

    fn existing_options() -> InitOptions {
        let mut options = InitOptions::default();
        options.cluster.context = "kind-kind".to_string();
        options.cluster.version = "0.39.0".to_string();
        options.environment.name = "b".to_string();
        options
    }

    /// One entry per phase line: `Some(true)` complete, `Some(false)` spinner
    /// or waiting.
    fn phase_icons(view: &str) -> Vec<bool> {
        view.lines()
            .filter_map(|line| {
                if line.starts_with(STEP_COMPLETE_ICON) {
                    Some(true)
                } else if line.starts_with(STEP_WAITING_ICON)
                    || SPINNER_FRAMES.iter().any(|f| line.starts_with(f))
                {
                    Some(false)
                } else {
                    None
                }
            })
            .collect()
    }

    #[test]
    fn summary_lists_install_environment_and_scaffold() {
        let view = SummaryModel::new(fresh_options()).view();

        assert!(view.starts_with("You've selected the following:"));
        assert!(view.contains("🔧 Install Radius 0.40.0\n"));
        assert!(view.contains("   - Kubernetes cluster: kind-kind\n"));
        assert!(view.contains("   - Kubernetes namespace: radius-system\n"));
        assert!(view.contains("🌏 Create new environment default\n"));
        assert!(view.contains("   - Recipe pack: dev\n"));
        assert!(view.contains("🚧 Scaffold application my-app\n"));
        assert!(view.contains("   - Create app.bicep\n"));
        assert!(view.contains("   - Create .rad/rad.yaml\n"));
        assert!(view.contains("📋 Update local configuration\n"));
        assert!(view.ends_with("(press enter to confirm or esc to restart)\n"));
    }

    #[test]
    fn summary_for_existing_install_and_environment() {
        let view = SummaryModel::new(existing_options()).view();

        assert!(view.contains("Use existing Radius 0.39.0 install on kind-kind\n"));
        assert!(view.contains("Use existing environment b\n"));
        assert!(!view.contains("Scaffold application"));
        assert!(!view.contains("Recipe pack"));
    }

    #[test]
    fn summary_shows_provider_details() {
        let mut options = fresh_options();
        options.cloud_providers.aws = Some(AwsProvider {
            region: "us-west-2".to_string(),
            account_id: "123456789012".to_string(),
            credential: AwsCredential::Irsa {
                role_arn: "arn:aws:iam::123456789012:role/radius".to_string(),
            },
        });

        let view = SummaryModel::new(options).view();
        assert!(view.contains("   - AWS IAM role: arn:aws:iam::123456789012:role/radius\n"));
        assert!(view.contains("   - AWS: account 123456789012 and region us-west-2\n"));
    }

    #[test]
    fn summary_keys_decide_result() {
        let cases = [
            (Key::Enter, SummaryResult::Confirmed),
            (Key::Esc, SummaryResult::Canceled),
            (Key::CtrlC, SummaryResult::Quit),
        ];
        for (key, expected) in cases {
            let mut model = SummaryModel::new(fresh_options());
            assert_eq!(model.update(Msg::Key(Key::Char('x'))), Cmd::None);
            assert_eq!(model.result(), None);

            assert_eq!(model.update(Msg::Key(key)), Cmd::Quit);
            assert_eq!(model.result(), Some(expected));
            assert_eq!(model.view(), "");
        }
    }

    #[test]
    fn progress_starts_with_spinner_on_install() {
        let model = ProgressModel::new(fresh_options()).suppress_spinner();
        let view = model.view();

        assert!(view.starts_with("Initializing Radius...\n\n"));
        assert!(view.contains("🕐 Install Radius 0.40.0\n"));
        assert!(view.contains("⏳ Create new environment default\n"));
        assert!(view.contains("⏳ Scaffold application my-app\n"));
        assert!(view.contains("⏳ Update local configuration\n"));
        assert!(!view.contains("Initialization complete"));
        assert_eq!(model.tick_interval(), None);
    }

    #[test]
    fn progress_quits_once_everything_is_done() {
        let mut model = ProgressModel::new(fresh_options()).suppress_spinner();

        let partial = ProgressMsg {
            install_complete: true,
            environment_complete: true,
            ..ProgressMsg::default()
        };
        assert_eq!(model.update(Msg::Progress(partial)), Cmd::None);
        assert_eq!(model.progress(), partial);
        assert!(model.view().contains("✅ Create new environment default\n"));
        assert!(model.view().contains("🕐 Scaffold application my-app\n"));

        let done = ProgressMsg {
            install_complete: true,
            environment_complete: true,
            application_complete: true,
            config_complete: true,
        };
        assert_eq!(model.update(Msg::Progress(done)), Cmd::Quit);
        assert!(
            model
                .view()
                .ends_with("Initialization complete! Have a RAD time 😎\n\n")
        );
    }

    #[test]
    fn hidden_application_phase_still_gates_completion() {
        let mut options = fresh_options();
        options.application.scaffold = false;
        let mut model = ProgressModel::new(options).suppress_spinner();

        let msg = ProgressMsg {
            install_complete: true,
            environment_complete: true,
            application_complete: false,
            config_complete: true,
        };
        assert_eq!(model.update(Msg::Progress(msg)), Cmd::None);

        let view = model.view();
        assert!(!view.contains("Scaffold application"));
        assert_eq!(phase_icons(&view), vec![true, true, true]);
    }

    #[test]
    fn later_phase_never_shown_complete_before_earlier() {
        for bits in 0u8..16 {
            let msg = ProgressMsg {
                install_complete: bits & 1 != 0,
                environment_complete: bits & 2 != 0,
                application_complete: bits & 4 != 0,
                config_complete: bits & 8 != 0,
            };
            let mut model = ProgressModel::new(fresh_options()).suppress_spinner();
            model.update(Msg::Progress(msg));

            let icons = phase_icons(&model.view());
            assert_eq!(icons.len(), 4, "bits {bits:04b}");
            assert!(
                icons.windows(2).all(|w| w[0] || !w[1]),
                "bits {bits:04b} rendered {icons:?}"
            );
            let leading = msg.phases().iter().take_while(|done| **done).count();
            assert_eq!(icons.iter().filter(|done| **done).count(), leading);
        }
    }

    #[test]
    fn ticks_advance_the_spinner() {
        let mut model = ProgressModel::new(fresh_options());
        assert_eq!(model.tick_interval(), Some(Duration::from_millis(250)));
        assert!(model.view().contains(SPINNER_FRAMES[0]));

        assert_eq!(model.update(Msg::Tick), Cmd::None);
        assert!(model.view().contains(SPINNER_FRAMES[1]));

        for _ in 0..SPINNER_FRAMES.len() - 1 {
            model.update(Msg::Tick);
        }
        assert!(model.view().contains(SPINNER_FRAMES[0]));
    }

    #[test]
    fn suppressed_spinner_ignores_ticks() {
        let mut model = ProgressModel::new(fresh_options()).suppress_spinner();
        model.update(Msg::Tick);
        model.update(Msg::Tick);
        assert!(model.view().contains(SPINNER_FRAMES[0]));
        assert!(!model.view().contains(SPINNER_FRAMES[2]));
    }
