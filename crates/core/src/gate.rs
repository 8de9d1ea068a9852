//! Two-step credential gate: password, then PIN.
//!
//! ```text
//! Login --(provider accepts)--> Pin --(PIN matches)--> Authenticated
//!   ^                            |
//!   +-------(back to login)------+
//! ```
//!
//! [`CredentialGate`] is a plain value; every transition consumes the gate
//! and returns the next one. Transitions that do not apply to the current
//! step return the gate unchanged. `Authenticated` is terminal.

use serde::{Deserialize, Serialize};

/// Shown when the PIN does not match.
pub const PIN_MISMATCH_MESSAGE: &str = "Mã PIN bảo mật không chính xác.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateStep {
    Login,
    Pin,
    Authenticated,
}

/// Categories of identity-provider failure surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginFailure {
    /// Wrong email/password or unknown user.
    InvalidCredentials,
    /// Provider is throttling sign-in attempts.
    TooManyRequests,
    /// Anything else, including an unreachable provider.
    Other,
}

impl LoginFailure {
    /// Localized inline message for this failure.
    pub fn message(self) -> &'static str {
        match self {
            LoginFailure::InvalidCredentials => "Email hoặc mật khẩu không chính xác.",
            LoginFailure::TooManyRequests => {
                "Đăng nhập thất bại quá nhiều lần. Vui lòng thử lại sau."
            }
            LoginFailure::Other => "Đã có lỗi xảy ra. Vui lòng thử lại.",
        }
    }
}

/// Exact, case-sensitive comparison of the entered PIN.
pub fn pin_matches(input: &str, expected: &str) -> bool {
    input == expected
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialGate {
    step: GateStep,
    pin_input: String,
    error: Option<String>,
    loading: bool,
}

impl Default for CredentialGate {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialGate {
    /// A gate waiting for email and password.
    pub fn new() -> Self {
        Self::at(GateStep::Login)
    }

    /// A gate resumed at `step` with no pending input or error.
    pub fn at(step: GateStep) -> Self {
        Self {
            step,
            pin_input: String::new(),
            error: None,
            loading: false,
        }
    }

    pub fn step(&self) -> GateStep {
        self.step
    }

    pub fn pin_input(&self) -> &str {
        &self.pin_input
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.step == GateStep::Authenticated
    }

    /// Credentials submitted; the provider call is in flight.
    pub fn begin_login(mut self) -> Self {
        if self.step == GateStep::Login && !self.loading {
            self.loading = true;
            self.error = None;
        }
        self
    }

    /// The provider call finished.
    pub fn login_settled(mut self, result: Result<(), LoginFailure>) -> Self {
        if self.step != GateStep::Login {
            return self;
        }
        self.loading = false;
        match result {
            Ok(()) => {
                self.step = GateStep::Pin;
                self.error = None;
                self.pin_input.clear();
            }
            Err(failure) => self.error = Some(failure.message().to_string()),
        }
        self
    }

    pub fn enter_pin(mut self, input: impl Into<String>) -> Self {
        if self.step == GateStep::Pin {
            self.pin_input = input.into();
        }
        self
    }

    /// Compare the entered PIN with `expected`.
    ///
    /// A mismatch clears the input and stays on the PIN step.
    pub fn submit_pin(mut self, expected: &str) -> Self {
        if self.step != GateStep::Pin {
            return self;
        }
        if pin_matches(&self.pin_input, expected) {
            self.step = GateStep::Authenticated;
            self.error = None;
        } else {
            self.error = Some(PIN_MISMATCH_MESSAGE.to_string());
            self.pin_input.clear();
        }
        self
    }

    pub fn back_to_login(mut self) -> Self {
        if self.step == GateStep::Pin {
            self.step = GateStep::Login;
            self.pin_input.clear();
        }
        self
    }
}
