//! CLI Tooling
//!
//! Command-line interface over an explorer session. Every invocation starts
//! from a freshly initialized session; `run` and `shell` apply a sequence of
//! commands to it.

use crate::advisor::{HttpLocationAdvisor, LocationAdvisor, SuggestionRequest};
use crate::config::{ConfigLoader, VdriveConfig};
use crate::error::ApiError;
use crate::session::ExplorerSession;
use crate::tooling::format::{
    format_folders_text, format_listing_json, format_listing_text, format_section_heading,
    format_tree_text,
};
use crate::tooling::shell::{self, ShellCommand, ShellOutcome};
use crate::views::{SortDirection, SortKey};
use clap::{Parser, Subcommand};
use dialoguer::Input;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// vdrive - in-memory virtual drive explorer
#[derive(Parser)]
#[command(name = "vdrive")]
#[command(about = "Browse and reorganize an in-memory virtual file tree")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Load configuration and fold the logging flags into it.
    ///
    /// `--log-file` stays separate; it is passed to `init_logging` so it
    /// outranks `VDRIVE_LOG_FILE`.
    pub fn load_config(&self) -> Result<VdriveConfig, ApiError> {
        let mut config = match &self.config {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.logging.output = output.clone();
        }
        Ok(config)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List a directory
    Ls {
        /// Directory to list (default: root)
        path: Option<String>,
        /// Case-insensitive name filter
        #[arg(long)]
        search: Option<String>,
        /// Sort key (name, modified, size)
        #[arg(long)]
        sort: Option<String>,
        /// Sort descending
        #[arg(long)]
        desc: bool,
        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the whole tree
    Tree,
    /// Print every folder path
    Folders,
    /// Apply a script of shell commands, then print the final listing
    Run {
        /// Script file, one command per line
        script: PathBuf,
        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Interactive shell
    Shell,
    /// Ask the configured advisor where a node belongs
    Suggest {
        /// Path of the node
        path: String,
        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

/// CLI context holding the session and configuration
pub struct CliContext {
    config: VdriveConfig,
    session: ExplorerSession,
}

impl CliContext {
    /// Create a new CLI context with an initialized session.
    pub fn new(config: VdriveConfig) -> Result<Self, ApiError> {
        let session = ExplorerSession::open(&config.explorer)?;
        Ok(Self { config, session })
    }

    pub fn session(&self) -> &ExplorerSession {
        &self.session
    }

    /// Execute a CLI command
    pub fn execute(&mut self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Ls {
                path,
                search,
                sort,
                desc,
                format,
            } => self.handle_ls(path.as_deref(), search.as_deref(), sort.as_deref(), *desc, format),
            Commands::Tree => Ok(format_tree_text(self.session.store())),
            Commands::Folders => Ok(format_folders_text(&self.session.folder_paths())),
            Commands::Run { script, format } => self.handle_run(script, format),
            Commands::Shell => self.handle_shell(),
            Commands::Suggest { path, format } => self.handle_suggest(path, format),
        }
    }

    fn handle_ls(
        &mut self,
        path: Option<&str>,
        search: Option<&str>,
        sort: Option<&str>,
        desc: bool,
        format: &str,
    ) -> Result<String, ApiError> {
        check_format(format)?;
        if let Some(path) = path {
            self.session.change_directory(path)?;
        }
        if let Some(term) = search {
            self.session.search(term);
        }
        let current = self.session.sort_config();
        let key = match sort {
            Some(key) => key.parse::<SortKey>().map_err(ApiError::InvalidCommand)?,
            None => current.key,
        };
        let direction = if desc {
            SortDirection::Descending
        } else if sort.is_some() {
            SortDirection::Ascending
        } else {
            current.direction
        };
        self.session.set_sort_config(key, direction);
        Ok(self.render_listing(format))
    }

    fn handle_run(&mut self, script: &Path, format: &str) -> Result<String, ApiError> {
        check_format(format)?;
        let text = std::fs::read_to_string(script)?;
        let messages = self.run_script(&text)?;
        let listing = self.render_listing(format);
        if format == "json" || messages.is_empty() {
            return Ok(listing);
        }
        Ok(format!("{}\n\n{}", messages.join("\n"), listing))
    }

    /// Apply each line of `script`, stopping at the first failure.
    ///
    /// Returns the messages the commands produced.
    pub fn run_script(&mut self, script: &str) -> Result<Vec<String>, ApiError> {
        let mut messages = Vec::new();
        for (index, line) in script.lines().enumerate() {
            let line_no = index + 1;
            let Some(command) = ShellCommand::parse(line).map_err(|e| at_line(line_no, e))? else {
                continue;
            };
            debug!(line = line_no, command = ?command, "Applying script command");
            match command.apply(&mut self.session).map_err(|e| at_line(line_no, e))? {
                ShellOutcome::Exit => break,
                ShellOutcome::Message(message) => messages.push(message),
                ShellOutcome::Listing => messages.push(self.render_listing("text")),
                ShellOutcome::Done => {}
            }
        }
        info!(nodes = self.session.store().len(), "Script applied");
        Ok(messages)
    }

    fn handle_shell(&mut self) -> Result<String, ApiError> {
        println!("{}", format_section_heading("vdrive shell"));
        println!("Type commands (ls, cd, mkdir, touch, rename, mv, rm, search, sort, select, clear, rm-selected, folders, exit)");
        loop {
            let prompt = format!("vdrive:{}", self.session.current_directory());
            let line: String = Input::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
                .map_err(|e| ApiError::ConfigError(format!("Failed to get user input: {}", e)))?;
            let command = match ShellCommand::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    eprintln!("{}", e);
                    continue;
                }
            };
            match command.apply(&mut self.session) {
                Ok(ShellOutcome::Exit) => break,
                Ok(ShellOutcome::Message(message)) => println!("{}", message),
                Ok(ShellOutcome::Listing) => println!("{}", self.render_listing("text")),
                Ok(ShellOutcome::Done) => {}
                Err(e) => eprintln!("{}", e),
            }
        }
        Ok(format!("{} node(s) at exit", self.session.store().len()))
    }

    fn handle_suggest(&mut self, target: &str, format: &str) -> Result<String, ApiError> {
        check_format(format)?;
        let advisor_config = self.config.advisor.as_ref().ok_or_else(|| {
            ApiError::ConfigError("No advisor configured (set [advisor] endpoint)".to_string())
        })?;
        let target = shell::resolve(&self.session, target);
        let node = self
            .session
            .store()
            .find_by_path(&target)
            .ok_or_else(|| ApiError::InvalidCommand(format!("no such node: {}", target)))?;
        let request = SuggestionRequest::for_node(node);
        let advisor = HttpLocationAdvisor::new(advisor_config)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let suggestion = runtime.block_on(advisor.suggest_location(&request))?;
        info!(path = %target, suggested = %suggestion.suggested_location, "Advisor suggestion received");

        let exists = suggestion.suggested_location == "/"
            || self
                .session
                .store()
                .find_by_path(&suggestion.suggested_location)
                .is_some_and(|n| n.is_folder());
        if format == "json" {
            let value = json!({
                "path": target,
                "suggestedLocation": suggestion.suggested_location,
                "reasoning": suggestion.reasoning,
                "folderExists": exists,
            });
            return Ok(serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string()));
        }
        let mut out = format!("{}\n", format_section_heading("Suggested location"));
        out.push_str(&format!("  Node: {}\n", target));
        out.push_str(&format!("  Location: {}\n", suggestion.suggested_location));
        if !exists {
            out.push_str("  (folder does not exist yet)\n");
        }
        out.push_str(&format!("  Reasoning: {}\n", suggestion.reasoning));
        Ok(out)
    }

    fn render_listing(&self, format: &str) -> String {
        let directory = self.session.current_directory();
        let listing = self.session.current_files();
        if format == "json" {
            format_listing_json(&directory, &listing, self.session.sort_config())
        } else {
            format_listing_text(
                &directory,
                &listing,
                self.session.sort_config(),
                self.session.search_term(),
            )
        }
    }
}

fn check_format(format: &str) -> Result<(), ApiError> {
    match format {
        "text" | "json" => Ok(()),
        other => Err(ApiError::InvalidCommand(format!(
            "Invalid format: {} (must be 'text' or 'json')",
            other
        ))),
    }
}

fn at_line(line: usize, error: ApiError) -> ApiError {
    ApiError::InvalidCommand(format!("line {}: {}", line, error))
}
