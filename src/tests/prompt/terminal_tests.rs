    use super::*;
    use crate::validate::validate_resource_name;

    fn press(k: KeyCode, modifiers: KeyModifiers) -> Key {
        key_from_event(KeyEvent::new(k, modifiers))
    }

    fn type_str(state: &mut TextInputState, options: &TextInputOptions, s: &str) {
        for c in s.chars() {
            assert_eq!(state.handle_key(Key::Char(c), options), TextOutcome::Pending);
        }
    }

    fn rendered(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn crossterm_keys_map_to_prompt_keys() {
        assert_eq!(press(KeyCode::Char('c'), KeyModifiers::CONTROL), Key::CtrlC);
        assert_eq!(press(KeyCode::Char('c'), KeyModifiers::NONE), Key::Char('c'));
        assert_eq!(press(KeyCode::Enter, KeyModifiers::NONE), Key::Enter);
        assert_eq!(press(KeyCode::Esc, KeyModifiers::NONE), Key::Esc);
        assert_eq!(press(KeyCode::Backspace, KeyModifiers::NONE), Key::Backspace);
        assert_eq!(press(KeyCode::Tab, KeyModifiers::NONE), Key::Other);
    }

    #[test]
    fn empty_text_submits_default() {
        let options = TextInputOptions::with_default("default");
        let mut state = TextInputState::default();
        assert_eq!(
            state.handle_key(Key::Enter, &options),
            TextOutcome::Submitted("default".to_string())
        );
    }

    #[test]
    fn typed_text_wins_over_default_and_backspace_edits() {
        let options = TextInputOptions::with_default("default");
        let mut state = TextInputState::default();
        type_str(&mut state, &options, "devx");
        state.handle_key(Key::Backspace, &options);
        assert_eq!(
            state.handle_key(Key::Enter, &options),
            TextOutcome::Submitted("dev".to_string())
        );
    }

    #[test]
    fn invalid_text_stays_pending_with_error() {
        let options = TextInputOptions::default().validated(validate_resource_name);
        let mut state = TextInputState::default();
        type_str(&mut state, &options, "in.valid");

        assert_eq!(state.handle_key(Key::Enter, &options), TextOutcome::Pending);
        let lines = rendered(&text_input_lines("Enter an application name", &options, &state));
        assert!(lines.iter().any(|l| l.starts_with("name must start with a letter")));

        // Editing clears the error.
        state.handle_key(Key::Backspace, &options);
        let lines = rendered(&text_input_lines("Enter an application name", &options, &state));
        assert!(!lines.iter().any(|l| l.starts_with("name must")));
    }

    #[test]
    fn escape_leaves_text_input() {
        let options = TextInputOptions::default();
        let mut state = TextInputState::default();
        assert_eq!(state.handle_key(Key::Esc, &options), TextOutcome::Exit);
        assert_eq!(state.handle_key(Key::CtrlC, &options), TextOutcome::Exit);
    }

    #[test]
    fn masked_input_hides_value_and_default() {
        let options = TextInputOptions::with_default("hunter2").masked();
        let mut state = TextInputState::default();
        type_str(&mut state, &options, "abc");

        let lines = rendered(&text_input_lines("Enter password", &options, &state));
        assert_eq!(lines[0], "Enter password");
        assert_eq!(lines[1], "> ***");
    }

    #[test]
    fn help_and_placeholder_are_rendered() {
        let options = TextInputOptions::default()
            .placeholder("Enter appId...")
            .help("line one\nline two");
        let state = TextInputState::default();

        let lines = rendered(&text_input_lines("Enter the appId", &options, &state));
        assert_eq!(
            lines,
            vec!["line one", "line two", "", "Enter the appId", "> Enter appId..."]
        );
    }

    #[test]
    fn list_moves_within_bounds() {
        let mut state = ListInputState::new(3);
        assert_eq!(state.handle_key(Key::Up), ListOutcome::Pending);
        assert_eq!(state.handle_key(Key::Enter), ListOutcome::Chosen(0));

        for _ in 0..5 {
            state.handle_key(Key::Down);
        }
        assert_eq!(state.handle_key(Key::Enter), ListOutcome::Chosen(2));

        state.handle_key(Key::Char('k'));
        assert_eq!(state.handle_key(Key::Enter), ListOutcome::Chosen(1));
        state.handle_key(Key::Char('j'));
        assert_eq!(state.handle_key(Key::Enter), ListOutcome::Chosen(2));
    }

    #[test]
    fn list_exit_keys() {
        let mut state = ListInputState::new(2);
        assert_eq!(state.handle_key(Key::Esc), ListOutcome::Exit);
        assert_eq!(state.handle_key(Key::CtrlC), ListOutcome::Exit);
        assert_eq!(state.handle_key(Key::Char('x')), ListOutcome::Pending);
    }

    #[test]
    fn list_marks_selected_choice() {
        let choices = vec!["Yes".to_string(), "No".to_string()];
        let mut state = ListInputState::new(choices.len());
        state.handle_key(Key::Down);

        let lines = rendered(&list_input_lines("Create a new resource group?", &choices, &state));
        assert_eq!(lines[0], "Create a new resource group?");
        assert_eq!(lines[2], "  Yes");
        assert_eq!(lines[3], "> No");
    }

    #[test]
    fn list_input_rejects_empty_choices() {
        let err = TerminalPrompter::new()
            .list_input(&[], "Select a resource group:")
            .unwrap_err();
        assert!(err.to_string().contains("no choices"));
    }

    struct Frame(&'static str);

    impl Program for Frame {
        fn update(&mut self, _msg: Msg) -> Cmd {
            Cmd::None
        }

        fn view(&self) -> String {
            self.0.to_string()
        }
    }

    #[test]
    fn closed_feed_keeps_the_last_frame() {
        let frame = Frame("✅ Install Radius 0.40.0\n🕐 Create new environment default\n");
        assert_eq!(
            leftover_frame(&frame, Ended::InboxClosed).as_deref(),
            Some("✅ Install Radius 0.40.0\n🕐 Create new environment default\n")
        );
        assert_eq!(leftover_frame(&frame, Ended::Quit), None);
        assert_eq!(leftover_frame(&Frame(""), Ended::InboxClosed), None);
    }
