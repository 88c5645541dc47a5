//! CLI commands and argument parsing
//!
//! This module defines the command-line interface structure using clap,
//! including all commands and their arguments.

use crate::config::{
    reveal_output_channel_on_from_str, ConfigurationAccessor, RlsConfiguration, SettingsScope,
    WorkspaceConfiguration, LOG_TO_FILE_KEY, RECOGNIZED_KEYS, REVEAL_OUTPUT_CHANNEL_ON_KEY,
    RLS_PATH_KEY, RLS_ROOT_KEY, SHOW_STDERR_KEY, SHOW_STDOUT_KEY,
};
use crate::error::{RlsConfigError, Result};
use crate::utils::format::{DisplayUtils, OutputFormat, SettingRow, TableFormatter};
use clap::{CommandFactory, Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use tracing::debug;

const NOT_SET: &str = "<not set>";

#[derive(Parser)]
#[command(name = "rlscfg")]
#[command(about = "Inspect the RLS client settings resolved for a workspace")]
#[command(version, author)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// User settings file (defaults to the editor's user settings.json)
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        env = "RLS_CONFIG_USER_SETTINGS"
    )]
    pub user_settings: Option<PathBuf>,

    /// Workspace folder whose .vscode/settings.json overrides user settings
    #[arg(long, global = true, value_name = "DIR")]
    pub workspace: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the resolved RLS client configuration
    Show,
    /// Print the raw resolved value of a settings key
    Get {
        /// Dotted settings key (e.g. rust-client.logToFile)
        key: String,
    },
    /// Show which reveal policy a setting value translates to
    Reveal {
        /// Raw value of rust-client.revealOutputChannelOn
        value: Option<String>,
    },
    /// Show settings file paths
    Path,
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Show version information
    Version,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match &self.command {
            Commands::Show => execute_show(&self).await,
            Commands::Get { key } => execute_get(&self, key).await,
            Commands::Reveal { value } => execute_reveal(&self, value.as_deref()),
            Commands::Path => execute_path(&self).await,
            Commands::Completions { shell } => execute_completions(*shell),
            Commands::Version => execute_version(),
        }
    }

    fn user_settings_path(&self) -> Result<PathBuf> {
        match &self.user_settings {
            Some(path) => Ok(path.clone()),
            None => WorkspaceConfiguration::default_user_settings_path(),
        }
    }

    fn workspace_folder(&self) -> Result<PathBuf> {
        match &self.workspace {
            Some(dir) => Ok(dir.clone()),
            None => Ok(std::env::current_dir()?),
        }
    }

    async fn load_workspace(&self) -> Result<WorkspaceConfiguration> {
        let workspace = self.workspace_folder()?;
        debug!("Loading settings for workspace {}", workspace.display());
        match &self.user_settings {
            Some(user_settings) => {
                WorkspaceConfiguration::load(Some(user_settings.as_path()), Some(workspace.as_path()))
                    .await
            }
            None => WorkspaceConfiguration::load_default(Some(workspace.as_path())).await,
        }
    }
}

/// Build the table rows for a snapshot, tagging each with where it came from
pub fn setting_rows(
    snapshot: &RlsConfiguration,
    workspace: &WorkspaceConfiguration,
) -> Vec<SettingRow> {
    RECOGNIZED_KEYS
        .iter()
        .map(|&key| {
            let value = match key {
                SHOW_STDOUT_KEY => snapshot.show_stdout_in_output_channel().to_string(),
                SHOW_STDERR_KEY => snapshot.show_stderr_in_output_channel().to_string(),
                LOG_TO_FILE_KEY => snapshot.log_to_file().to_string(),
                REVEAL_OUTPUT_CHANNEL_ON_KEY => snapshot.reveal_output_channel_on().to_string(),
                RLS_PATH_KEY => snapshot.rls_path().unwrap_or(NOT_SET).to_string(),
                RLS_ROOT_KEY => snapshot.rls_root().unwrap_or(NOT_SET).to_string(),
                _ => NOT_SET.to_string(),
            };
            let source = workspace
                .source_of(key)
                .map(|scope| scope.to_string())
                .unwrap_or_else(|| "default".to_string());
            SettingRow::new(key, value, source)
        })
        .collect()
}

async fn execute_show(cli: &Cli) -> Result<()> {
    let workspace = cli.load_workspace().await?;
    let snapshot = RlsConfiguration::load_from_workspace(&workspace);

    let formatter = TableFormatter::new(cli.format, cli.no_color);
    let rows = setting_rows(&snapshot, &workspace);
    println!("{}", formatter.render(&rows, &snapshot)?);

    Ok(())
}

async fn execute_get(cli: &Cli, key: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(RlsConfigError::invalid_argument("settings key cannot be empty"));
    }

    let workspace = cli.load_workspace().await?;
    let value = workspace.inspect(key);
    let source = workspace.source_of(key);

    let formatter = TableFormatter::new(cli.format, cli.no_color);
    let rows = vec![SettingRow::new(
        key,
        value
            .as_ref()
            .map(|v| v.to_string())
            .unwrap_or_else(|| NOT_SET.to_string()),
        source
            .map(|scope| scope.to_string())
            .unwrap_or_else(|| "default".to_string()),
    )];
    let structured = json!({
        "key": key,
        "value": value,
        "source": source.map(|scope| scope.to_string()),
    });
    println!("{}", formatter.render(&rows, &structured)?);

    Ok(())
}

fn execute_reveal(cli: &Cli, value: Option<&str>) -> Result<()> {
    let policy = reveal_output_channel_on_from_str(value);

    match cli.format {
        OutputFormat::Table => println!("{}", policy),
        OutputFormat::Json | OutputFormat::Yaml => {
            let formatter = TableFormatter::new(cli.format, cli.no_color);
            let structured = json!({
                "input": value,
                "policy": policy,
                "code": policy.as_u8(),
            });
            let rows: Vec<SettingRow> = Vec::new();
            println!("{}", formatter.render(&rows, &structured)?);
        }
    }

    Ok(())
}

async fn execute_path(cli: &Cli) -> Result<()> {
    let display = DisplayUtils::new(cli.no_color);
    let user_settings = cli.user_settings_path()?;
    let workspace_settings = WorkspaceConfiguration::workspace_settings_path(&cli.workspace_folder()?);

    let user_exists = tokio::fs::try_exists(&user_settings).await?;
    let workspace_exists = tokio::fs::try_exists(&workspace_settings).await?;

    let describe = |path: &PathBuf, exists: bool| {
        format!("{}{}", path.display(), if exists { "" } else { " (missing)" })
    };
    let user_label = SettingsScope::User.to_string();
    let user_line = describe(&user_settings, user_exists);
    let workspace_label = SettingsScope::Workspace.to_string();
    let workspace_line = describe(&workspace_settings, workspace_exists);

    display.print_header("Settings files");
    println!(
        "{}",
        display.format_key_value_pairs(&[
            (user_label.as_str(), user_line.as_str()),
            (workspace_label.as_str(), workspace_line.as_str()),
        ])
    );

    if !user_exists && !workspace_exists {
        display.print_warning("No settings files found; every setting uses its default");
    }

    Ok(())
}

fn execute_completions(shell: clap_complete::Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}

fn execute_version() -> Result<()> {
    println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    Ok(())
}
