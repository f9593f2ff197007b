use std::error::Error;
use std::fmt;
use std::path::Path;

use tracing::{info, warn};

mod fault;
use fault::Fault;

mod logging;

mod manifest;
use manifest::ProjectManifest;

#[derive(Debug)]
struct DivisionByZeroError;

impl fmt::Display for DivisionByZeroError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("division by zero")
    }
}

impl Error for DivisionByZeroError {}

/// Integer division that surfaces division by zero as an error instead of a
/// panic, so it can flow through the fault wrapper.
fn divide(numerator: i64, denominator: i64) -> Result<i64, DivisionByZeroError> {
    numerator.checked_div(denominator).ok_or(DivisionByZeroError)
}

fn main() -> Result<(), Fault> {
    // Dual-sink logging (timestamped file + console); failure here is fatal
    // since no diagnostics exist yet to report it.
    let handle = logging::init_logging().map_err(|e| Fault::wrap(e))?;

    info!("Starting mlproject scaffold");
    info!("Log file created at: {:?}", handle.log_path());

    let requirements = Path::new("requirements.txt");
    if requirements.exists() {
        let project = ProjectManifest::load(requirements).map_err(|e| Fault::wrap(e))?;
        info!(
            "Loaded manifest for {} v{} with {} dependencies",
            project.name,
            project.version,
            project.requires.len()
        );
    } else {
        warn!("No requirements.txt found, skipping manifest load");
    }

    // Demonstrates how pipeline code should propagate faults: log a
    // diagnostic, then re-raise the wrapped error.
    match divide(1, 0) {
        Ok(quotient) => info!("Unexpected quotient: {}", quotient),
        Err(e) => {
            info!("Divide by Zero");
            return Err(Fault::wrap(e));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divide() {
        assert_eq!(divide(10, 2).unwrap(), 5);
        assert!(divide(1, 0).is_err());
    }
}
