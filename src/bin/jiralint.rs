//! Jira issue linter CLI binary.
//!
//! A command-line interface for listing Jira projects and issues and
//! validating issue descriptions.

use std::io::Read;
use std::process::ExitCode;

use clap::Parser;
use jiralint::cli::{Cli, Command};
use jiralint::output::PrettyPrint;
use jiralint::report::{lint_project, LintScope};
use jiralint::{Issue, JiraClient, JiraService, Page, Project, SearchParams, ValidatorService};
use serde::Serialize;
use tabled::{Table, Tabled};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .init();

    let validators = match cli.validator_service() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(cli, &validators).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether everything that was validated passed.
async fn run(cli: Cli, validators: &ValidatorService) -> jiralint::Result<bool> {
    match cli.command {
        Command::Check { text } => handle_check(validators, text.as_deref(), cli.json),
        Command::Projects => {
            let projects = connect()?.projects().await?;
            output_rows(&projects, cli.json, |p| ProjectRow::from(p))?;
            Ok(true)
        }
        Command::Issues {
            project,
            start_at,
            max_results,
        } => {
            let params = SearchParams::starting_at(start_at, max_results);
            let page = connect()?.search_issues(&project, params).await?;
            output_page(&page, cli.json)?;
            Ok(true)
        }
        Command::Lint {
            project,
            all,
            max_results,
        } => {
            let scope = if all {
                LintScope::All {
                    page_size: max_results,
                }
            } else {
                LintScope::Page(SearchParams::starting_at(0, max_results))
            };
            let report = lint_project(&connect()?, validators, &project, scope).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.pretty_print());
            }
            Ok(report.is_valid())
        }
    }
}

fn connect() -> jiralint::Result<JiraService<JiraClient>> {
    let client = JiraClient::from_env().inspect_err(|_| {
        eprintln!("Hint: Set JIRA_BASE_URL and JIRA_EMAIL/JIRA_API_TOKEN (or JIRA_BEARER_TOKEN)");
    })?;
    Ok(JiraService::new(client))
}

fn handle_check(
    validators: &ValidatorService,
    text: Option<&str>,
    json: bool,
) -> jiralint::Result<bool> {
    let text = match text {
        Some(t) => t.to_string(),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let result = validators.validate(&text);
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.pretty_print());
    }
    Ok(result.is_valid)
}

fn output_rows<T, R, F>(items: &[T], json: bool, to_row: F) -> jiralint::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
    }
    Ok(())
}

fn output_page(page: &Page<Issue>, json: bool) -> jiralint::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(page)?);
    } else {
        output_rows(&page.data, false, |i| IssueRow::from(i))?;
        let last = page.next_start();
        if page.is_empty() {
            println!("\nNo issues at offset {} ({} total)", page.start_at, page.total);
        } else {
            println!("\nIssues {}-{} of {}", page.start_at + 1, last, page.total);
        }
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct ProjectRow {
    key: String,
    name: String,
    #[tabled(rename = "type")]
    project_type: String,
}

impl From<&Project> for ProjectRow {
    fn from(p: &Project) -> Self {
        Self {
            key: p.key.clone(),
            name: p.name.clone(),
            project_type: p.project_type_key.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct IssueRow {
    key: String,
    #[tabled(rename = "type")]
    issue_type: String,
    status: String,
    summary: String,
}

impl From<&Issue> for IssueRow {
    fn from(i: &Issue) -> Self {
        Self {
            key: i.key.clone(),
            issue_type: i.issue_type_name().unwrap_or_default().to_string(),
            status: i.status_name().unwrap_or_default().to_string(),
            summary: i.summary().to_string(),
        }
    }
}
