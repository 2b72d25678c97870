//! Application-level error carried up to `main`.
//!
//! Typed errors (`ValidationError`, `ArtifactError`) convert into `AppError`,
//! which keeps only what `main` needs: a message and a process exit code.

/// Bad CLI value, rejected form input, unusable config.
pub const EXIT_INPUT: u8 = 2;
/// Model or scaler artifact missing, corrupt or schema-mismatched.
pub const EXIT_ARTIFACT: u8 = 3;
/// Terminal, export or inference failure at runtime.
pub const EXIT_RUNTIME: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    /// True when the user can fix this by changing the input.
    pub fn is_input_error(&self) -> bool {
        self.exit_code == EXIT_INPUT
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
