/// Errors from the external bookmark-store and tag-suggester collaborators.
///
/// These are surfaced per item or per batch; the run continues with the
/// remaining work rather than aborting wholesale.
#[derive(Debug, thiserror::Error)]
pub enum CollaboratorError {
    #[error("network error: {reason}")]
    Network { reason: String },

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
}
