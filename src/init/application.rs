use anyhow::Result;

use super::Runner;
use crate::model::InitOptions;
use crate::prompt::{TextInputOptions, yes_no};
use crate::validate::{is_valid_resource_name, validate_resource_name};

pub(crate) const CONFIRM_SETUP_APPLICATION_PROMPT: &str =
    "Setup application in the current directory?";
pub(crate) const ENTER_APPLICATION_NAME_PROMPT: &str = "Enter an application name";

impl Runner {
    pub(super) fn enter_application_options(&self, options: &mut InitOptions) -> Result<()> {
        options.application.scaffold =
            yes_no(self.prompter.as_ref(), CONFIRM_SETUP_APPLICATION_PROMPT)?;
        if !options.application.scaffold {
            return Ok(());
        }

        let suggested = self
            .working_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        options.application.name = if is_valid_resource_name(&suggested) {
            suggested
        } else {
            tracing::debug!(directory = %suggested, "directory name is not a valid application name");
            self.prompter.text_input(
                ENTER_APPLICATION_NAME_PROMPT,
                TextInputOptions::default()
                    .placeholder("Enter application name")
                    .validated(validate_resource_name),
            )?
        };
        Ok(())
    }
}
