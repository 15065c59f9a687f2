use thiserror::Error;

/// Errors surfaced to the shell layer.
///
/// Expected edge cases (empty commits, undo/redo at the ends of history,
/// degenerate container sizes) are silent no-ops and never reach this type;
/// only genuinely exceptional conditions do.
#[derive(Debug, Error)]
pub enum EditorError {
    /// A pasted or dropped image could not be decoded. Editor state is left
    /// untouched when this is returned.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// A decoded image had a zero dimension.
    #[error("decoded image is empty ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    /// The decode task was dropped before producing a result.
    #[error("image decode task was cancelled")]
    DecodeCancelled,
}

/// Result type for editor operations that can fail.
pub type EditorResult<T> = Result<T, EditorError>;
