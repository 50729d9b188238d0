//! Callback Validation
//!
//! State machine over the parameters the identity provider appended to the
//! redirect URI:
//!
//! `Start -> StateChecked -> ErrorChecked -> CodeChecked -> Validated`
//!
//! The CSRF state is checked before `error` and `code` are looked at, so a
//! forged error or code response cannot get past the state comparison.

use crate::error::{ConfigurationError, IdentityProviderError, OidcResult, RelyingPartyError};
use crate::types::{CallbackParameters, Checks};

/// Validation progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallbackState {
    Start,
    StateChecked,
    ErrorChecked,
    CodeChecked,
    Validated,
}

/// Validates one callback against the checks supplied for it.
#[derive(Debug)]
pub struct CallbackValidator<'a, 'c> {
    parameters: &'a CallbackParameters,
    checks: &'c Checks,
    state: CallbackState,
}

impl<'a, 'c> CallbackValidator<'a, 'c> {
    pub fn new(parameters: &'a CallbackParameters, checks: &'c Checks) -> Self {
        Self {
            parameters,
            checks,
            state: CallbackState::Start,
        }
    }

    /// Current state.
    pub fn state(&self) -> CallbackState {
        self.state
    }

    /// Advance by one transition. A failure leaves the state where the
    /// violation was detected.
    pub fn step(&mut self) -> OidcResult<CallbackState> {
        self.state = match self.state {
            CallbackState::Start => {
                self.check_state()?;
                CallbackState::StateChecked
            }
            CallbackState::StateChecked => {
                self.check_error()?;
                CallbackState::ErrorChecked
            }
            CallbackState::ErrorChecked => {
                self.check_code()?;
                CallbackState::CodeChecked
            }
            CallbackState::CodeChecked | CallbackState::Validated => CallbackState::Validated,
        };
        Ok(self.state)
    }

    /// Run every check and return the authorization code.
    pub fn validate(mut self) -> OidcResult<&'a str> {
        while self.step()? != CallbackState::Validated {}

        // check_code guarantees the key exists; it may carry no value.
        Ok(self.parameters.first("code").unwrap_or_default())
    }

    fn check_state(&self) -> OidcResult<()> {
        let received = self.parameters.contains_key("state");
        let expected = self.checks.state.as_deref();

        if received && expected.is_none() {
            return Err(ConfigurationError::MissingExpectedState.into());
        }

        if !received && expected.is_some() {
            tracing::warn!("Identity provider response is missing the state parameter");
            return Err(RelyingPartyError::StateMissing.into());
        }

        let actual = self.parameters.first("state");
        if actual != expected {
            tracing::warn!("State parameter mismatch in callback");
            return Err(RelyingPartyError::StateMismatch {
                expected: expected.map(str::to_string),
                actual: actual.map(str::to_string),
            }
            .into());
        }

        Ok(())
    }

    fn check_error(&self) -> OidcResult<()> {
        if !self.parameters.contains_key("error") {
            return Ok(());
        }

        let error = self.parameters.first("error").unwrap_or_default();
        tracing::debug!(error, "Identity provider returned an error");

        Err(IdentityProviderError::CallbackError {
            error: error.to_string(),
            error_description: self.parameters.first("error_description").map(str::to_string),
            parameters: self.parameters.clone(),
        }
        .into())
    }

    fn check_code(&self) -> OidcResult<()> {
        if self.parameters.contains_key("code") {
            return Ok(());
        }

        Err(IdentityProviderError::MissingCode {
            parameters: self.parameters.clone(),
        }
        .into())
    }
}

/// Validate `parameters` against `checks` and return the authorization code.
pub fn validate_callback<'a>(
    parameters: &'a CallbackParameters,
    checks: &Checks,
) -> OidcResult<&'a str> {
    CallbackValidator::new(parameters, checks).validate()
}
