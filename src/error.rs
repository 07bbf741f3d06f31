//! Error types for tour operations.

use thiserror::Error;

/// Errors that can occur while rendering or navigating a tour.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A target or key-binding selector matched no element.
    #[error("no element matches selector `{0}`")]
    TargetNotFound(String),

    /// The panel region could not be measured (detached or without content).
    #[error("panel region cannot be measured before its content is in the document")]
    PanelNotMeasurable,

    /// The requested navigation is not valid in the current state.
    #[error("invalid state transition: {0}")]
    InvalidStateTransition(&'static str),

    /// A selector could not be parsed.
    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// A region handle no longer refers to a live region.
    #[error("region handle is no longer attached to the document")]
    StaleRegion,
}

pub type Result<T> = std::result::Result<T, Error>;
