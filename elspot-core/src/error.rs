use thiserror::Error;

/// Unified error type for the elspot workspace.
///
/// This covers boundary validation, provider-tagged fetch failures, an empty
/// candidate set after filtering, and the currency failure modes surfaced by
/// conversion and snapshot harmonization.
#[derive(Debug, Error)]
pub enum ElspotError {
    /// Invalid input argument (missing region, bad interval, builder misuse).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An individual provider failed to deliver usable data.
    #[error("{provider} failed: {msg}")]
    Provider {
        /// Provider name that failed.
        provider: String,
        /// Human-readable error message.
        msg: String,
    },

    /// No provider remained after capability and credential filtering.
    #[error("no valid price sources available for the given configuration")]
    NoProvidersAvailable,

    /// The requested currency code is absent from the resolved rate snapshot.
    #[error("currency rate for {code} not available")]
    RateUnavailable {
        /// Currency code that could not be resolved.
        code: String,
    },

    /// The rate snapshot cannot be rebased onto the pivot currency.
    #[error("rate snapshot missing EUR rate for base {base}")]
    MissingPivotRate {
        /// Declared base currency of the offending snapshot.
        base: String,
    },

    /// Conversion is required but no rate source was configured.
    #[error("currency conversion required but no currency rate provider is available")]
    NoRateProvider,
}

impl ElspotError {
    /// Helper: build an `InvalidInput` error from any message.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Helper: build a `Provider` error with the provider name and message.
    pub fn provider(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `RateUnavailable` error for a currency code.
    pub fn rate_unavailable(code: impl Into<String>) -> Self {
        Self::RateUnavailable { code: code.into() }
    }

    /// Helper: build a `MissingPivotRate` error for a declared base currency.
    pub fn missing_pivot_rate(base: impl Into<String>) -> Self {
        Self::MissingPivotRate { base: base.into() }
    }
}
