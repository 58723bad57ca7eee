// File: crates/slotify_gcal/src/auth.rs
use crate::error::GcalServiceError;
use google_calendar3::{
    hyper_rustls::{self, HttpsConnectorBuilder},
    hyper_util::client::legacy::connect::HttpConnector,
    hyper_util::client::legacy::Client,
    yup_oauth2::{authorized_user::AuthorizedUserSecret, AuthorizedUserAuthenticator},
    CalendarHub,
};
use slotify_common::services::CalendarCredentials;
use slotify_config::env_vars::SECRET_MARKER;
use slotify_config::GcalConfig;
use tracing::debug;

// Type aliases for clarity
type Connector = hyper_rustls::HttpsConnector<HttpConnector>;

pub type HubType = CalendarHub<Connector>;

/// How a request to Google gets its bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource<'a> {
    /// Mint access tokens from the organizer's refresh token.
    RefreshToken {
        client_id: &'a str,
        client_secret: &'a str,
        refresh_token: &'a str,
    },
    /// Use the stored access token as is.
    AccessToken(&'a str),
}

fn usable(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != SECRET_MARKER)
}

/// Pick the token source for an organizer.
///
/// A refresh token wins when the OAuth client is configured; otherwise the
/// stored access token is used until it expires.
pub fn token_source<'a>(
    credentials: &'a CalendarCredentials,
    config: &'a GcalConfig,
) -> Result<TokenSource<'a>, GcalServiceError> {
    let client = usable(config.client_id.as_deref()).zip(usable(config.client_secret.as_deref()));

    if let (Some((client_id, client_secret)), Some(refresh_token)) =
        (client, usable(credentials.refresh_token.as_deref()))
    {
        return Ok(TokenSource::RefreshToken {
            client_id,
            client_secret,
            refresh_token,
        });
    }

    match usable(credentials.access_token.as_deref()) {
        Some(token) => Ok(TokenSource::AccessToken(token)),
        None if credentials.refresh_token.is_some() => Err(GcalServiceError::MissingCredentials(
            "refresh token present but gcal.client_id/client_secret are not configured"
                .to_string(),
        )),
        None => Err(GcalServiceError::MissingCredentials(format!(
            "no access or refresh token for calendar '{}'",
            credentials.calendar_id
        ))),
    }
}

pub async fn create_calendar_hub(
    credentials: &CalendarCredentials,
    config: &GcalConfig,
) -> Result<HubType, GcalServiceError> {
    let source = token_source(credentials, config)?;

    let https = HttpsConnectorBuilder::new()
        .with_native_roots()?
        .https_or_http()
        .enable_http1()
        .build();

    // Create client without specifying body type
    let client = Client::builder(hyper_util::rt::TokioExecutor::new()).build(https);

    let hub = match source {
        TokenSource::RefreshToken {
            client_id,
            client_secret,
            refresh_token,
        } => {
            debug!("Authenticating calendar '{}' with refresh token", credentials.calendar_id);
            let secret = AuthorizedUserSecret {
                client_id: client_id.to_string(),
                client_secret: client_secret.to_string(),
                refresh_token: refresh_token.to_string(),
                key_type: "authorized_user".to_string(),
            };
            let auth = AuthorizedUserAuthenticator::builder(secret).build().await?;
            CalendarHub::new(client, auth)
        }
        TokenSource::AccessToken(token) => {
            debug!("Authenticating calendar '{}' with access token", credentials.calendar_id);
            CalendarHub::new(client, token.to_string())
        }
    };

    Ok(hub)
}
