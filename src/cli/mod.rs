//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the jiralint binary.

use clap::{ArgAction, Parser, Subcommand};

use crate::error::Result;
use crate::pagination::DEFAULT_MAX_RESULTS;
use crate::validators::{AcceptanceCriteriaValidator, UserStoryValidator, ValidatorService};

/// Jira issue linter command-line interface.
#[derive(Parser, Debug)]
#[command(
    name = "jiralint",
    about = "Check Jira issues for user stories and acceptance criteria",
    version
)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Regular expression replacing the default user story grammar.
    #[arg(long, global = true, env = "JIRALINT_USER_STORY_PATTERN")]
    pub user_story_pattern: Option<String>,

    /// Regular expression replacing the default acceptance criteria heading.
    #[arg(long, global = true, env = "JIRALINT_ACCEPTANCE_CRITERIA_PATTERN")]
    pub acceptance_criteria_pattern: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all projects.
    Projects,

    /// Show one page of issues for a project.
    Issues {
        /// The project key, e.g. COV.
        project: String,

        /// Index of the first issue (0-based).
        #[arg(long, default_value_t = 0)]
        start_at: u64,

        /// Number of issues per page.
        #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
        max_results: u32,
    },

    /// Validate the issue descriptions of a project.
    Lint {
        /// The project key, e.g. COV.
        project: String,

        /// Evaluate every issue instead of the first page.
        #[arg(long)]
        all: bool,

        /// Number of issues per page; with --all, the size of each request.
        #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
        max_results: u32,
    },

    /// Validate a piece of text (reads stdin when omitted).
    Check {
        /// The text to validate.
        text: Option<String>,
    },
}

impl Cli {
    /// Build the validator registry, honouring pattern overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if an override pattern does not compile.
    pub fn validator_service(&self) -> Result<ValidatorService> {
        let user_story = match &self.user_story_pattern {
            Some(pattern) => UserStoryValidator::with_pattern(pattern)?,
            None => UserStoryValidator::new(),
        };
        let acceptance_criteria = match &self.acceptance_criteria_pattern {
            Some(pattern) => AcceptanceCriteriaValidator::with_pattern(pattern)?,
            None => AcceptanceCriteriaValidator::new(),
        };

        Ok(ValidatorService::builder()
            .register(user_story)
            .register(acceptance_criteria)
            .build())
    }

    /// Log level selected by the `-v` flags.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
