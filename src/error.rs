use thiserror::Error;

/// Hosting-contract violations detected by the load hook.
///
/// Both are fatal: the exported entry point records the `Display` text as the
/// abort message and terminates the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The loader passed a null `JavaVM*`.
    #[error("vm == nullptr")]
    NullVm,
    /// The loader passed a null library handle.
    #[error("handle == nullptr")]
    NullHandle,
}
