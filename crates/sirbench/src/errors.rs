//! Error handling and exit codes.

use sirbench_core::constants::exit_codes;
use sirbench_core::SimError;

/// Map a simulation error to its exit code.
pub fn handle_error(err: &SimError) -> i32 {
    match err {
        SimError::InvalidConfiguration(_) => exit_codes::ERROR_CONFIG,
        SimError::Mismatch(_) => exit_codes::ERROR_MISMATCH,
        SimError::WorkerFault(_) | SimError::Io(_) => exit_codes::ERROR_GENERIC,
    }
}

/// Exit code for any application error.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<SimError>())
        .map_or(exit_codes::ERROR_GENERIC, handle_error)
}
