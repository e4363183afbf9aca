use thiserror::Error;

/// Failures surfaced by the activation sequence.
///
/// There is one conceptual failure class ("a bootstrap step failed"); the
/// variants only record which step. Nothing is retried or recovered — the
/// caller reports the error once and the page stays as the failure left it.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The sequence already ran (or is in flight). At-most-once guard.
    #[error("activation already ran")]
    AlreadyActivated,

    /// A required page element was not found by id.
    #[error("page element missing: #{0}")]
    MissingElement(String),

    /// A DOM operation outside element lookup failed.
    #[error("dom: {0}")]
    Dom(String),

    /// The embedded launch configuration could not be parsed.
    #[error("launch config: {0}")]
    Config(String),

    /// Creating or resuming the audio playback context failed.
    #[error("audio context: {0}")]
    Audio(String),

    /// Fetching, instantiating, or initialising the application module failed.
    #[error("module load: {0}")]
    ModuleLoad(String),

    /// The entry export was missing, or faulted when invoked.
    #[error("module entry: {0}")]
    Entry(String),
}
