use thiserror::Error;

pub type Result<T> = std::result::Result<T, MatcherError>;

/// Errors raised by a matcher before it can produce a [`crate::MatchResult`].
///
/// A mismatch is never an error. These variants describe misuse of a matcher:
/// the wrong kind of value, a value that has not been resolved yet, or a bad
/// registry call.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatcherError {
    #[error("expect {matcher}() value is null")]
    NullInput { matcher: &'static str },
    #[error("{subject} must be a resolved value, not a pending one, before it can be tested")]
    Pending { subject: &'static str },
    #[error("expect {matcher}() value should be {expected}")]
    WrongKind {
        matcher: &'static str,
        expected: &'static str,
    },
    #[error("{matcher} did not receive an event spy")]
    NotAnEventSpy { matcher: &'static str },
    #[error("event \"{0}\" was not received")]
    EventNotReceived(String),
    #[error("event at index {0} was not received")]
    EventIndexOutOfRange(usize),
    #[error("unknown matcher \"{0}\"")]
    UnknownMatcher(String),
    #[error("{matcher} expects argument {position} to be {expected}")]
    InvalidArgument {
        matcher: &'static str,
        position: usize,
        expected: &'static str,
    },
}

impl MatcherError {
    /// True for errors caused by the value under test rather than by the
    /// way the matcher was looked up or called.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(
            self,
            MatcherError::UnknownMatcher(_) | MatcherError::InvalidArgument { .. }
        )
    }
}
