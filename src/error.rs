use std::error::Error;
use std::fmt;

/// Errors surfaced by the reporting pipeline.
///
/// Only `EmptyResult` is produced by the core itself; it is fatal to the
/// current report cycle (aggregation must never run over zero rows) but not
/// to the program. The I/O variants wrap loader/writer failures at the
/// binary boundary. Undefined statistics are not errors at all: they travel
/// as `Option::None` sentinels.
#[derive(Debug)]
pub enum PipelineError {
    /// The filtered set has zero rows.
    EmptyResult,
    Csv(csv::Error),
    Io(std::io::Error),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::EmptyResult => {
                write!(f, "no records match the current filters")
            }
            PipelineError::Csv(e) => write!(f, "CSV error: {}", e),
            PipelineError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipelineError::EmptyResult => None,
            PipelineError::Csv(e) => Some(e),
            PipelineError::Io(e) => Some(e),
        }
    }
}

impl From<csv::Error> for PipelineError {
    fn from(err: csv::Error) -> Self {
        PipelineError::Csv(err)
    }
}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        PipelineError::Io(err)
    }
}
