use reqwest::{Client as HttpClient, Method, Response, StatusCode};

use tokio::sync::mpsc::Sender;

use tracing::{debug, error, warn};

use crate::device::{MobileDevice, MobileDeviceGroup};
use crate::error::Result;
use crate::report::{RestartOutcome, RestartReport};
use crate::token::TokenResponse;

const TOKEN_PATH: &str = "uapi/auth/tokens";
const GROUP_PATH: &str = "JSSResource/mobiledevicegroups/id";
const RESTART_PATH: &str = "JSSResource/mobiledevicecommands/command/RestartDevice/id";

/// Basic authentication credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Creates [`Credentials`] from a username and a password.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }
}

/// A client for a Jamf Pro server.
///
/// Every request is authenticated with the same basic authentication
/// [`Credentials`]. Neither the base URL nor the credentials change after
/// construction, so a client can be cloned and shared across any number of
/// concurrent operations. Clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    credentials: Credentials,
    http: HttpClient,
}

impl Client {
    /// Creates a [`Client`] with a default `HTTP` transport.
    ///
    /// Neither the URL nor the credentials are validated.
    /// A trailing `/` is removed from the base URL.
    #[must_use]
    #[inline]
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self::with_http_client(
            base_url,
            Credentials::new(username, password),
            HttpClient::new(),
        )
    }

    /// Creates a [`Client`] which sends its requests through the given
    /// `HTTP` transport.
    ///
    /// This method is useful to configure timeouts, proxies, or `TLS`
    /// options on the transport.
    #[must_use]
    pub fn with_http_client(
        base_url: impl Into<String>,
        credentials: Credentials,
        http: HttpClient,
    ) -> Self {
        let mut base_url = base_url.into();
        base_url.truncate(base_url.trim_end_matches('/').len());

        Self {
            base_url,
            credentials,
            http,
        }
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the [`Credentials`].
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Retrieves an authentication token.
    ///
    /// The token is **not** stored in the client: callers which need it must
    /// keep it themselves.
    ///
    /// # Errors
    ///
    /// Network failures prevent the request from being sent.
    /// A response body which is not a valid token raises a `JSON` error,
    /// whatever its status code.
    pub async fn token(&self) -> Result<String> {
        self.token_response().await.map(|response| response.token)
    }

    /// Retrieves an authentication token along with its expiry.
    ///
    /// # Errors
    ///
    /// Network failures prevent the request from being sent.
    /// A response body which is not a valid token raises a `JSON` error,
    /// whatever its status code.
    pub async fn token_response(&self) -> Result<TokenResponse> {
        let response = self.send(Method::POST, TOKEN_PATH).await?;
        let status = response.status();
        let body = response.bytes().await?;

        TokenResponse::from_json(&body, status)
    }

    /// Retrieves the mobile device group with the given identifier.
    ///
    /// # Errors
    ///
    /// Network failures prevent the request from being sent.
    /// A response body which is not a valid group raises an `XML` error.
    pub async fn device_group(&self, group: &str) -> Result<MobileDeviceGroup> {
        let body = self.group_body(group).await?;
        MobileDeviceGroup::from_xml(&body)
    }

    /// Retrieves the devices of the mobile device group with the given
    /// identifier, in the order returned by the server.
    ///
    /// An empty group returns an empty list.
    ///
    /// # Errors
    ///
    /// Network failures prevent the request from being sent.
    /// A response body which is not a valid group raises an `XML` error.
    pub async fn devices_in_group(&self, group: &str) -> Result<Vec<MobileDevice>> {
        self.device_group(group)
            .await
            .map(MobileDeviceGroup::into_devices)
    }

    /// Retrieves the devices of the mobile device group with the given
    /// identifier, discarding any response body that is not a valid group.
    ///
    /// An invalid response body returns an empty list, so an empty group
    /// **cannot** be told apart from an invalid response.
    ///
    /// # Errors
    ///
    /// Network failures prevent the request from being sent.
    pub async fn devices_in_group_lenient(&self, group: &str) -> Result<Vec<MobileDevice>> {
        let body = self.group_body(group).await?;

        Ok(MobileDeviceGroup::from_xml(&body).map_or_else(
            |e| {
                warn!("Discard the response of group `{group}`: {e}");
                Vec::new()
            },
            MobileDeviceGroup::into_devices,
        ))
    }

    /// Sends a restart command to the device with the given identifier and
    /// returns the response status code.
    ///
    /// Any status code is returned as-is, including `4xx` and `5xx`.
    ///
    /// # Errors
    ///
    /// Network failures prevent the request from being sent. In that case,
    /// [`Error::status`](crate::error::Error::status) returns the
    /// [`TRANSPORT_FAILURE_STATUS`](crate::error::TRANSPORT_FAILURE_STATUS)
    /// sentinel, which is **not** a server response.
    pub async fn restart_device(&self, id: u64) -> Result<StatusCode> {
        let response = self
            .send(Method::POST, &format!("{RESTART_PATH}/{id}"))
            .await?;
        Ok(response.status())
    }

    /// Sends a restart command to a device and transmits exactly one
    /// [`RestartReport`] to the given [`Sender`].
    ///
    /// The caller owns the channel: it decides its capacity and must receive
    /// one report for each call. If the receiver has been dropped, the
    /// report is discarded.
    pub async fn restart_device_report(&self, device: MobileDevice, sender: Sender<RestartReport>) {
        let outcome = match self.restart_device(device.id).await {
            Ok(status) => RestartOutcome::Sent(status),
            Err(e) => {
                warn!("Impossible to restart device `{device}`: {e}");
                RestartOutcome::Failed
            }
        };

        if let Err(e) = sender.send(RestartReport::new(device, outcome)).await {
            error!("Discard the restart report of device `{}`: {e}", e.0.device);
        }
    }

    /// Returns a task which runs [`Self::restart_device_report`] on a clone
    /// of this client.
    ///
    /// The task owns all its data, so it can be passed to `tokio::spawn`.
    /// The client never spawns tasks on its own.
    pub fn restart_task(
        &self,
        device: MobileDevice,
        sender: Sender<RestartReport>,
    ) -> impl Future<Output = ()> + Send + use<> {
        let client = self.clone();
        async move { client.restart_device_report(device, sender).await }
    }

    async fn group_body(&self, group: &str) -> Result<String> {
        let response = self
            .send(Method::GET, &format!("{GROUP_PATH}/{group}"))
            .await?;
        Ok(response.text().await?)
    }

    async fn send(&self, method: Method, path: &str) -> Result<Response> {
        let url = format!("{}/{path}", self.base_url);
        debug!("Sending {method} request to {url}");

        let response = self
            .http
            .request(method, url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .send()
            .await?;

        debug!(
            "Received status {} from {}",
            response.status(),
            response.url()
        );

        Ok(response)
    }
}
