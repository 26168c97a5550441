//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum shared by every client crate. Kinds line up
//! with the HTTP status families the quiz API answers with, so a server
//! response and a locally detected failure land in the same bucket.

use serde::Serialize;

/// Error classification
///
/// Each variant corresponds to an HTTP status (RFC 9110). Locally detected
/// failures pick the status a server would have used for the same problem,
/// e.g. a form validation failure is [`ErrorKind::BadRequest`].
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::from_status(404);
/// assert_eq!(kind, ErrorKind::NotFound);
/// assert_eq!(kind.as_str(), "Not Found");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// 400 - Bad Request: invalid input (also client-side validation)
    BadRequest,
    /// 401 - Unauthorized: missing or expired credentials
    Unauthorized,
    /// 403 - Forbidden
    Forbidden,
    /// 404 - Not Found
    NotFound,
    /// 408 - Request Timeout
    RequestTimeout,
    /// 409 - Conflict: e.g. attempt already submitted
    Conflict,
    /// 410 - Gone: e.g. attempt time is over
    Gone,
    /// 422 - Unprocessable Entity
    UnprocessableEntity,
    /// 429 - Too Many Requests
    TooManyRequests,
    /// 500 - Internal Server Error (also unexpected local failures)
    InternalServerError,
    /// 503 - Service Unavailable (also unreachable API)
    ServiceUnavailable,
}

impl ErrorKind {
    /// Map an HTTP status code to a kind
    ///
    /// Unknown 4xx codes fall back to [`ErrorKind::BadRequest`], gateway
    /// failures (502/504) to [`ErrorKind::ServiceUnavailable`], and anything
    /// else to [`ErrorKind::InternalServerError`].
    pub const fn from_status(status: u16) -> Self {
        match status {
            400 => ErrorKind::BadRequest,
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            408 => ErrorKind::RequestTimeout,
            409 => ErrorKind::Conflict,
            410 => ErrorKind::Gone,
            422 => ErrorKind::UnprocessableEntity,
            429 => ErrorKind::TooManyRequests,
            502..=504 => ErrorKind::ServiceUnavailable,
            400..=499 => ErrorKind::BadRequest,
            _ => ErrorKind::InternalServerError,
        }
    }

    /// HTTP status code for this kind
    #[inline]
    pub const fn status_code(&self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::Forbidden => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::RequestTimeout => 408,
            ErrorKind::Conflict => 409,
            ErrorKind::Gone => 410,
            ErrorKind::UnprocessableEntity => 422,
            ErrorKind::TooManyRequests => 429,
            ErrorKind::InternalServerError => 500,
            ErrorKind::ServiceUnavailable => 503,
        }
    }

    /// Standard reason phrase
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "Bad Request",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::RequestTimeout => "Request Timeout",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::Gone => "Gone",
            ErrorKind::UnprocessableEntity => "Unprocessable Entity",
            ErrorKind::TooManyRequests => "Too Many Requests",
            ErrorKind::InternalServerError => "Internal Server Error",
            ErrorKind::ServiceUnavailable => "Service Unavailable",
        }
    }

    /// Whether the failure is on the server (or transport) side.
    ///
    /// These are shown to the user as a generic notification and logged.
    #[inline]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// Whether the failure was caused by the request itself
    #[inline]
    pub const fn is_client_error(&self) -> bool {
        let code = self.status_code();
        code >= 400 && code < 500
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_known_codes() {
        assert_eq!(ErrorKind::from_status(400), ErrorKind::BadRequest);
        assert_eq!(ErrorKind::from_status(401), ErrorKind::Unauthorized);
        assert_eq!(ErrorKind::from_status(404), ErrorKind::NotFound);
        assert_eq!(ErrorKind::from_status(409), ErrorKind::Conflict);
        assert_eq!(ErrorKind::from_status(503), ErrorKind::ServiceUnavailable);
    }

    #[test]
    fn test_from_status_fallbacks() {
        assert_eq!(ErrorKind::from_status(418), ErrorKind::BadRequest);
        assert_eq!(ErrorKind::from_status(502), ErrorKind::ServiceUnavailable);
        assert_eq!(ErrorKind::from_status(504), ErrorKind::ServiceUnavailable);
        assert_eq!(ErrorKind::from_status(500), ErrorKind::InternalServerError);
        assert_eq!(ErrorKind::from_status(302), ErrorKind::InternalServerError);
    }

    #[test]
    fn test_status_code_roundtrips_through_from_status() {
        for kind in [
            ErrorKind::BadRequest,
            ErrorKind::Unauthorized,
            ErrorKind::Forbidden,
            ErrorKind::NotFound,
            ErrorKind::Gone,
            ErrorKind::TooManyRequests,
            ErrorKind::InternalServerError,
            ErrorKind::ServiceUnavailable,
        ] {
            assert_eq!(ErrorKind::from_status(kind.status_code()), kind);
        }
    }

    #[test]
    fn test_error_families() {
        assert!(ErrorKind::Unauthorized.is_client_error());
        assert!(!ErrorKind::Unauthorized.is_server_error());
        assert!(ErrorKind::ServiceUnavailable.is_server_error());
        assert!(!ErrorKind::ServiceUnavailable.is_client_error());
    }
}
