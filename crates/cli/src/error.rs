use miette::Diagnostic;
use std::io;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum DashboardError {
    #[error("failed to bind {addr}")]
    #[diagnostic(help("pass a different port as the first argument, e.g. `ridership-dashboard 8051`"))]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("config error")]
    Config(#[from] ridership_core::Error),

    #[error("io error")]
    Io(#[from] io::Error),

    #[error("server error")]
    Server(#[from] ridership_server::Error),
}
