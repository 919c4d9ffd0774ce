use reqwest::StatusCode;

use crate::device::MobileDevice;

/// The outcome of a restart request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartOutcome {
    /// The request completed its round trip with the given status code.
    Sent(StatusCode),
    /// The request could not be built or sent.
    Failed,
}

/// The report produced by a fire-and-report restart.
///
/// Its [`Display`](std::fmt::Display) implementation renders the
/// line historically sent to callers:
///
/// - `"{id} - {name} restart: true, status code: {code}"` when the request
///   completed its round trip, **whatever** the status code
/// - `"{id} - {name} restart: false"` otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestartReport {
    /// The device targeted by the restart request.
    pub device: MobileDevice,
    /// The request outcome.
    pub outcome: RestartOutcome,
}

impl std::fmt::Display for RestartReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} restart: {}", self.device, self.is_sent())?;
        if let RestartOutcome::Sent(status) = self.outcome {
            write!(f, ", status code: {}", status.as_u16())?;
        }
        Ok(())
    }
}

impl RestartReport {
    pub(crate) const fn new(device: MobileDevice, outcome: RestartOutcome) -> Self {
        Self { device, outcome }
    }

    /// Whether the request completed its round trip.
    ///
    /// A `4xx` or `5xx` response is still considered as sent.
    #[must_use]
    pub const fn is_sent(&self) -> bool {
        matches!(self.outcome, RestartOutcome::Sent(_))
    }

    /// Whether the server accepted the restart command with a `2xx` status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status().is_some_and(|status| status.is_success())
    }

    /// Returns the response status code, if any.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self.outcome {
            RestartOutcome::Sent(status) => Some(status),
            RestartOutcome::Failed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use crate::device::MobileDevice;

    use super::{RestartOutcome, RestartReport};

    #[test]
    fn sent_report() {
        let report = RestartReport::new(
            MobileDevice::new(1, "x"),
            RestartOutcome::Sent(StatusCode::CREATED),
        );

        assert_eq!(report.to_string(), "1 - x restart: true, status code: 201");
        assert!(report.is_sent());
        assert!(report.is_success());
        assert_eq!(report.status(), Some(StatusCode::CREATED));
    }

    #[test]
    fn rejected_report() {
        // A rejected command is still reported as sent.
        let report = RestartReport::new(
            MobileDevice::new(12, "Lab iPad"),
            RestartOutcome::Sent(StatusCode::NOT_FOUND),
        );

        assert_eq!(
            report.to_string(),
            "12 - Lab iPad restart: true, status code: 404"
        );
        assert!(report.is_sent());
        assert!(!report.is_success());
    }

    #[test]
    fn failed_report() {
        let report = RestartReport::new(MobileDevice::new(1, "x"), RestartOutcome::Failed);

        assert_eq!(report.to_string(), "1 - x restart: false");
        assert!(!report.is_sent());
        assert!(!report.is_success());
        assert_eq!(report.status(), None);
    }
}
