//! Jira API model types.

pub mod adf;
mod issue;
mod project;

pub use issue::*;
pub use project::*;
