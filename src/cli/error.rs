use miette::Diagnostic;
use thiserror::Error;

use crate::config::ConfigError;
use crate::sync::SyncError;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Sync(#[from] SyncError),
}

pub type CliResult<T> = Result<T, CliError>;
