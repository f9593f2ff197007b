use std::any::Any;
use std::error::Error;
use std::fmt;
use std::panic::Location;

/// Build the canonical one-line error description.
///
/// # Arguments
/// * `kind` - The error's type name (e.g. `DivisionByZeroError`)
/// * `file` - Source file where the error surfaced
/// * `line` - Line number within that file
/// * `message` - The original error's message text
///
/// # Returns
/// * `<ErrorKind> in <FilePath> (line <LineNumber>): <OriginalMessage>`
pub fn format_error(kind: &str, file: &str, line: u32, message: &str) -> String {
    format!("{} in {} (line {}): {}", kind, file, line, message)
}

/// Strip the module path from a fully qualified type name.
/// `core::num::error::ParseIntError` becomes `ParseIntError`.
fn short_type_name(full: &str) -> &str {
    full.rsplit("::").next().unwrap_or(full)
}

/// A re-raisable fault that carries a precomputed, human-readable description
/// of the error it wraps.
///
/// Downstream handlers see the formatted line through `Display` instead of
/// the original error's own representation. The wrapper never swallows or
/// retries; propagation stays the caller's responsibility.
#[derive(Debug, Clone)]
pub struct Fault {
    kind: &'static str,
    file: &'static str,
    line: u32,
    message: String,
    formatted: String,
}

impl Fault {
    /// Wrap a caught error, formatting its description immediately.
    ///
    /// The origin location is the call site of `wrap`, so call it at the
    /// catch site closest to where the error was raised. Every `Fault` has a
    /// location; there is no unlocated state to guard against.
    #[track_caller]
    pub fn wrap<E>(error: E) -> Fault
    where
        E: Error + Any,
    {
        // Wrapping a Fault again must not re-format its message.
        if let Some(fault) = (&error as &dyn Any).downcast_ref::<Fault>() {
            return fault.clone();
        }

        let location = Location::caller();
        let kind = short_type_name(std::any::type_name::<E>());
        let message = error.to_string();
        let formatted = format_error(kind, location.file(), location.line(), &message);

        Fault {
            kind,
            file: location.file(),
            line: location.line(),
            message,
            formatted,
        }
    }

    /// Type name of the original error.
    pub fn kind(&self) -> &str {
        self.kind
    }

    /// Source file where the error surfaced.
    pub fn file(&self) -> &str {
        self.file
    }

    /// Line number within `file()`.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// The original error's message text.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted)
    }
}

impl Error for Fault {}
