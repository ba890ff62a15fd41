//! Error type shared by the model, the executors, and both schedulers.

/// Error type for trial scheduling.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimError {
    /// A parameter was rejected before any work was scheduled.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A unit of work failed; the whole run is aborted.
    #[error("worker execution fault: {0}")]
    WorkerFault(String),

    /// Per-trial means from two strategies disagree beyond tolerance.
    #[error("result mismatch between strategies: {0}")]
    Mismatch(String),

    /// Writing results failed.
    #[error("i/o error: {0}")]
    Io(String),
}

impl From<std::io::Error> for SimError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Reject a zero count with an `InvalidConfiguration` error naming `what`.
pub fn require_positive(value: u64, what: &str) -> Result<u64, SimError> {
    if value == 0 {
        return Err(SimError::InvalidConfiguration(format!(
            "{what} must be positive"
        )));
    }
    Ok(value)
}

/// Render a panic payload as a message.
#[must_use]
pub fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SimError::InvalidConfiguration("trial count must be positive".into());
        assert_eq!(
            err.to_string(),
            "invalid configuration: trial count must be positive"
        );

        let err = SimError::WorkerFault("boom".into());
        assert_eq!(err.to_string(), "worker execution fault: boom");
    }

    #[test]
    fn require_positive_rejects_zero() {
        assert!(matches!(
            require_positive(0, "worker count"),
            Err(SimError::InvalidConfiguration(msg)) if msg.contains("worker count")
        ));
        assert_eq!(require_positive(3, "worker count"), Ok(3));
    }

    #[test]
    fn panic_message_variants() {
        let s: Box<dyn std::any::Any + Send> = Box::new("static");
        assert_eq!(panic_message(s.as_ref()), "static");
        let s: Box<dyn std::any::Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(s.as_ref()), "owned");
        let s: Box<dyn std::any::Any + Send> = Box::new(42u32);
        assert_eq!(panic_message(s.as_ref()), "unknown panic");
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert!(matches!(SimError::from(io), SimError::Io(msg) if msg.contains("missing")));
    }
}
