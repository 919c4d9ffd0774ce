use std::borrow::Cow;

use reqwest::StatusCode;

/// The status code reported by [`Error::status`] when a request could not
/// complete its round trip.
///
/// This value is a convention of this client: it is **never** a status code
/// returned by the server.
pub const TRANSPORT_FAILURE_STATUS: StatusCode = StatusCode::INTERNAL_SERVER_ERROR;

/// All possible error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A request could not be built, sent, or its body could not be read.
    Request,
    /// A response body is not valid `JSON` for the expected type.
    JsonResponse,
    /// A response body is not valid `XML` for the expected type.
    XmlResponse,
}

impl ErrorKind {
    pub(crate) const fn description(self) -> &'static str {
        match self {
            Self::Request => "Request",
            Self::JsonResponse => "Json response",
            Self::XmlResponse => "Xml response",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.description().fmt(f)
    }
}

/// A client error.
#[derive(PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    description: Cow<'static, str>,
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.error().fmt(f)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.error().fmt(f)
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Creates an [`Error`] from an [`ErrorKind`] and a description.
    pub fn new(kind: ErrorKind, description: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            description: description.into(),
        }
    }

    /// Returns the [`ErrorKind`].
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the sentinel status code of a request which received no
    /// response.
    ///
    /// Only an [`ErrorKind::Request`] error has a status, which is always
    /// [`TRANSPORT_FAILURE_STATUS`]. Decoding errors happen after a complete
    /// round trip, so they return [`None`].
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self.kind {
            ErrorKind::Request => Some(TRANSPORT_FAILURE_STATUS),
            ErrorKind::JsonResponse | ErrorKind::XmlResponse => None,
        }
    }

    fn error(&self) -> String {
        format!("{}: {}", self.kind, self.description)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::new(ErrorKind::Request, e.to_string())
    }
}

/// A specialized [`Result`](std::result::Result) type for [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
