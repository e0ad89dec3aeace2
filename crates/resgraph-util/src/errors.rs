use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for building, loading and inspecting resolution graphs.
#[derive(Debug, Error, Diagnostic)]
pub enum ResGraphError {
    /// A resolution snapshot could not be parsed or is internally inconsistent.
    #[error("Snapshot error: {message}")]
    #[diagnostic(help("Every `selected` id must name a `[[component]]` entry of the snapshot"))]
    Snapshot { message: String },

    /// A node or edge handle does not belong to the graph it was used with.
    #[error("Graph error: {message}")]
    Graph { message: String },

    /// A component identifier or selector string is malformed.
    #[error("Invalid coordinate `{input}`: {message}")]
    #[diagnostic(help("Use `group:name:version`, or `project :path` for project components"))]
    Coordinate { input: String, message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type ResGraphResult<T> = miette::Result<T>;
