use std::time::Duration;

use anyhow::Result;

use super::Runner;
use crate::clients::scaffold::{APP_BICEP, RAD_DIR, RAD_YAML};
use crate::model::{AwsCredential, AzureCredential, InitOptions, ProgressMsg};
use crate::prompt::{Cmd, ExitConsole, Key, Msg, Program};

const INDENT: &str = "   - ";
const SUMMARY_HEADING: &str = "You've selected the following:\n\n";
const SUMMARY_FOOTER: &str = "\n(press enter to confirm or esc to restart)\n";
const CLUSTER_ICON: &str = "🔧 ";
const ENVIRONMENT_ICON: &str = "🌏 ";
const APPLICATION_ICON: &str = "🚧 ";
const CONFIG_ICON: &str = "📋 ";
const CONFIG_HEADING: &str = "Update local configuration\n";
const PROGRESS_HEADING: &str = "Initializing Radius...\n\n";
const PROGRESS_COMPLETE_FOOTER: &str = "\nInitialization complete! Have a RAD time 😎\n\n";
pub(crate) const STEP_COMPLETE_ICON: &str = "✅ ";
pub(crate) const STEP_WAITING_ICON: &str = "⏳ ";

pub(crate) const SPINNER_FRAMES: [&str; 12] = [
    "🕐 ", "🕑 ", "🕒 ", "🕓 ", "🕔 ", "🕕 ", "🕖 ", "🕗 ", "🕘 ", "🕙 ", "🕚 ", "🕛 ",
];
const SPINNER_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SummaryResult {
    Confirmed,
    Canceled,
    Quit,
}

/// Confirmation screen: shows the selections and waits for enter (confirm),
/// esc (start over) or ctrl-c (quit).
#[derive(Clone, Debug)]
pub struct SummaryModel {
    options: InitOptions,
    result: Option<SummaryResult>,
}

impl SummaryModel {
    pub fn new(options: InitOptions) -> Self {
        Self {
            options,
            result: None,
        }
    }

    pub fn result(&self) -> Option<SummaryResult> {
        self.result
    }
}

impl Program for SummaryModel {
    fn update(&mut self, msg: Msg) -> Cmd {
        if self.result.is_some() {
            return Cmd::Quit;
        }
        let result = match msg {
            Msg::Key(Key::Enter) => SummaryResult::Confirmed,
            Msg::Key(Key::Esc) => SummaryResult::Canceled,
            Msg::Key(Key::CtrlC) => SummaryResult::Quit,
            _ => return Cmd::None,
        };
        self.result = Some(result);
        Cmd::Quit
    }

    fn view(&self) -> String {
        if self.result.is_some() {
            return String::new();
        }

        let options = &self.options;
        let mut out = String::from(SUMMARY_HEADING);

        out.push_str(CLUSTER_ICON);
        write_cluster_section(&mut out, options);

        out.push_str(ENVIRONMENT_ICON);
        write_environment_section(&mut out, options);

        if options.application.scaffold {
            out.push_str(APPLICATION_ICON);
            write_application_heading(&mut out, options);
            out.push_str(&format!("{}Create {}\n", INDENT, APP_BICEP));
            out.push_str(&format!("{}Create {}/{}\n", INDENT, RAD_DIR, RAD_YAML));
        }

        out.push_str(CONFIG_ICON);
        out.push_str(CONFIG_HEADING);

        out.push_str(SUMMARY_FOOTER);
        out
    }
}

/// Live view of the execution phases.
///
/// Phases are scanned in the order install, environment, application,
/// config. The first unfinished one gets the spinner and everything after it
/// the waiting icon, whatever its flag says.
#[derive(Clone, Debug)]
pub struct ProgressModel {
    options: InitOptions,
    progress: ProgressMsg,
    frame: usize,
    suppress_spinner: bool,
}

impl ProgressModel {
    pub fn new(options: InitOptions) -> Self {
        Self {
            options,
            progress: ProgressMsg::default(),
            frame: 0,
            suppress_spinner: false,
        }
    }

    /// Render the first spinner frame and never tick.
    pub fn suppress_spinner(mut self) -> Self {
        self.suppress_spinner = true;
        self
    }

    pub fn progress(&self) -> ProgressMsg {
        self.progress
    }

    fn icon(&self, done: bool, waiting: &mut bool) -> &'static str {
        if *waiting {
            return STEP_WAITING_ICON;
        }
        if done {
            return STEP_COMPLETE_ICON;
        }
        *waiting = true;
        if self.suppress_spinner {
            SPINNER_FRAMES[0]
        } else {
            SPINNER_FRAMES[self.frame % SPINNER_FRAMES.len()]
        }
    }
}

impl Program for ProgressModel {
    fn update(&mut self, msg: Msg) -> Cmd {
        match msg {
            Msg::Progress(progress) => {
                self.progress = progress;
                if progress.all_complete() {
                    return Cmd::Quit;
                }
                Cmd::None
            }
            Msg::Tick => {
                if !self.suppress_spinner {
                    self.frame = (self.frame + 1) % SPINNER_FRAMES.len();
                }
                Cmd::None
            }
            Msg::Key(_) => Cmd::None,
        }
    }

    fn view(&self) -> String {
        let options = &self.options;
        let mut out = String::from(PROGRESS_HEADING);
        let mut waiting = false;

        out.push_str(self.icon(self.progress.install_complete, &mut waiting));
        write_cluster_section(&mut out, options);

        out.push_str(self.icon(self.progress.environment_complete, &mut waiting));
        write_environment_section(&mut out, options);

        if options.application.scaffold {
            out.push_str(self.icon(self.progress.application_complete, &mut waiting));
            write_application_heading(&mut out, options);
        }

        out.push_str(self.icon(self.progress.config_complete, &mut waiting));
        out.push_str(CONFIG_HEADING);

        if !waiting {
            out.push_str(PROGRESS_COMPLETE_FOOTER);
        }
        out
    }

    fn tick_interval(&self) -> Option<Duration> {
        if self.suppress_spinner {
            None
        } else {
            Some(SPINNER_INTERVAL)
        }
    }
}

fn write_cluster_section(out: &mut String, options: &InitOptions) {
    let cluster = &options.cluster;
    if !cluster.install {
        out.push_str(&format!(
            "Use existing Radius {} install on {}\n",
            cluster.version, cluster.context
        ));
        return;
    }

    out.push_str(&format!(
        "Install Radius {}\n{}Kubernetes cluster: {}\n{}Kubernetes namespace: {}\n",
        cluster.version, INDENT, cluster.context, INDENT, cluster.namespace
    ));
    if let Some(aws) = &options.cloud_providers.aws {
        match &aws.credential {
            AwsCredential::AccessKey { access_key_id, .. } => {
                out.push_str(&format!("{}AWS IAM access key id: {}\n", INDENT, access_key_id));
            }
            AwsCredential::Irsa { role_arn } => {
                out.push_str(&format!("{}AWS IAM role: {}\n", INDENT, role_arn));
            }
        }
    }
    if let Some(azure) = &options.cloud_providers.azure {
        match &azure.credential {
            AzureCredential::ServicePrincipal { client_id, .. } => {
                out.push_str(&format!("{}Azure service principal: {}\n", INDENT, client_id));
            }
            AzureCredential::WorkloadIdentity { client_id, .. } => {
                out.push_str(&format!("{}Azure workload identity: {}\n", INDENT, client_id));
            }
        }
    }
}

fn write_environment_section(out: &mut String, options: &InitOptions) {
    let env = &options.environment;
    if !env.create {
        out.push_str(&format!("Use existing environment {}\n", env.name));
        return;
    }

    out.push_str(&format!(
        "Create new environment {}\n{}Kubernetes namespace: {}\n",
        env.name, INDENT, env.namespace
    ));
    if let Some(aws) = &options.cloud_providers.aws {
        out.push_str(&format!(
            "{}AWS: account {} and region {}\n",
            INDENT, aws.account_id, aws.region
        ));
    }
    if let Some(azure) = &options.cloud_providers.azure {
        out.push_str(&format!(
            "{}Azure: subscription {} and resource group {}\n",
            INDENT, azure.subscription_id, azure.resource_group
        ));
    }
    if options.recipes.dev_recipes {
        out.push_str(&format!("{}Recipe pack: dev\n", INDENT));
    }
}

fn write_application_heading(out: &mut String, options: &InitOptions) {
    out.push_str(&format!(
        "Scaffold application {}\n",
        options.application.name
    ));
}

impl Runner {
    /// Show the summary; `Ok(false)` means start over.
    pub(super) fn confirm_options(&self, options: &InitOptions) -> Result<bool> {
        let mut model = SummaryModel::new(options.clone());
        self.prompter.run_program(&mut model, None)?;

        match model.result() {
            Some(SummaryResult::Confirmed) => Ok(true),
            Some(SummaryResult::Canceled) => Ok(false),
            Some(SummaryResult::Quit) | None => Err(ExitConsole.into()),
        }
    }
}

#[cfg(test)]
#[path = "../tests/init/display_tests.rs"]
mod tests;
