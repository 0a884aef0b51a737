#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Unsupported smoothing: 1/{octave_divider} octave (only 1/3 and 1/6 are supported)")]
    UnsupportedSmoothing { octave_divider: u32 },
}
