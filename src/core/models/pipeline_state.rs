use std::fmt;

/// Where the shell is within a capture run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineState {
    #[default]
    Idle,
    Selecting,
    Capturing,
    Processing,
    Recognizing,
    Displaying,
    Error,
}

impl PipelineState {
    pub fn is_busy(&self) -> bool {
        !matches!(self, PipelineState::Idle)
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineState::Idle => write!(f, "Idle"),
            PipelineState::Selecting => write!(f, "Selecting"),
            PipelineState::Capturing => write!(f, "Capturing"),
            PipelineState::Processing => write!(f, "Processing"),
            PipelineState::Recognizing => write!(f, "Recognizing"),
            PipelineState::Displaying => write!(f, "Displaying"),
            PipelineState::Error => write!(f, "Error"),
        }
    }
}
