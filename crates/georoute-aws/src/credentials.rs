//! Anonymous credentials from a Cognito identity pool.
//!
//! Unauthenticated identities need no signing: `GetId` yields an identity
//! id for the pool and `GetCredentialsForIdentity` exchanges it for
//! short-lived keys scoped to the pool's unauthenticated role.

use std::sync::Arc;
use std::time::SystemTime;

use aws_config::{Region, SdkConfig};
use aws_credential_types::provider::{self, error::CredentialsError, future, ProvideCredentials};
use aws_credential_types::Credentials;
use aws_sdk_cognitoidentity::Client;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use crate::error::AuthError;

const TOKEN_REFRESH_LEEWAY_SECS: i64 = 60;
const PROVIDER_NAME: &str = "CognitoIdentityPool";

/// Usable until `TOKEN_REFRESH_LEEWAY_SECS` before expiry.
pub(crate) fn is_fresh_at(credentials: &Credentials, now: DateTime<Utc>) -> bool {
    match credentials.expiry() {
        Some(expiry) => {
            DateTime::<Utc>::from(expiry) - Duration::seconds(TOKEN_REFRESH_LEEWAY_SECS) > now
        }
        None => true,
    }
}

/// Region prefix of an identity pool id (`<region>:<uuid>`).
pub fn region_from_pool_id(identity_pool_id: &str) -> Result<&str, AuthError> {
    let malformed = || AuthError::MalformedPoolId(identity_pool_id.to_string());
    let (region, id) = identity_pool_id.split_once(':').ok_or_else(malformed)?;
    let region_ok = !region.is_empty()
        && region
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !region_ok || id.trim().is_empty() {
        return Err(malformed());
    }
    Ok(region)
}

#[derive(Debug)]
struct Inner {
    client: Client,
    identity_pool_id: String,
    identity_id: RwLock<Option<String>>,
    cached: RwLock<Option<Credentials>>,
}

/// Resolves and caches credentials for one identity pool. Cheap to clone;
/// clones share the cache.
///
/// Also a [`ProvideCredentials`] so SDK clients can sign with it.
#[derive(Debug, Clone)]
pub struct CognitoCredentialsProvider {
    inner: Arc<Inner>,
}

impl CognitoCredentialsProvider {
    pub fn new(client: Client, identity_pool_id: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Inner {
                client,
                identity_pool_id: identity_pool_id.into(),
                identity_id: RwLock::new(None),
                cached: RwLock::new(None),
            }),
        }
    }

    /// Identity client in the pool's own region, optionally sent to
    /// `endpoint_url` instead of the regional service.
    pub fn from_shared_config(
        shared: &SdkConfig,
        identity_pool_id: impl Into<String>,
        endpoint_url: Option<&str>,
    ) -> Self {
        let identity_pool_id = identity_pool_id.into();
        let mut config = aws_sdk_cognitoidentity::config::Builder::from(shared);
        if let Ok(region) = region_from_pool_id(&identity_pool_id) {
            config = config.region(Region::new(region.to_string()));
        }
        if let Some(url) = endpoint_url {
            config = config.endpoint_url(url);
        }
        Self::new(Client::from_conf(config.build()), identity_pool_id)
    }

    pub fn identity_pool_id(&self) -> &str {
        &self.inner.identity_pool_id
    }

    /// Cached credentials while fresh, otherwise a new exchange.
    /// Failures are returned, never cached.
    pub async fn credentials(&self) -> Result<Credentials, AuthError> {
        if let Some(credentials) = self.cached_credentials().await {
            return Ok(credentials);
        }

        region_from_pool_id(&self.inner.identity_pool_id)?;
        let identity_id = self.identity_id().await?;
        let fresh = match self.fetch_credentials(&identity_id).await {
            Ok(fresh) => fresh,
            Err(e @ AuthError::Service { .. }) => {
                // The pool no longer accepts this identity; start over with GetId.
                self.inner.identity_id.write().await.take();
                tracing::warn!(identity_id = %identity_id, error = %e, "identity rejected");
                return Err(e);
            }
            Err(e) => return Err(e),
        };

        let mut guard = self.inner.cached.write().await;
        *guard = Some(fresh.clone());
        tracing::debug!(expiry = ?fresh.expiry(), "obtained identity pool credentials");
        Ok(fresh)
    }

    async fn cached_credentials(&self) -> Option<Credentials> {
        let guard = self.inner.cached.read().await;
        guard
            .as_ref()
            .filter(|credentials| is_fresh_at(credentials, Utc::now()))
            .cloned()
    }

    async fn identity_id(&self) -> Result<String, AuthError> {
        if let Some(id) = self.inner.identity_id.read().await.clone() {
            return Ok(id);
        }

        let output = self
            .inner
            .client
            .get_id()
            .identity_pool_id(&self.inner.identity_pool_id)
            .send()
            .await
            .map_err(AuthError::from_sdk)?;
        let id = output
            .identity_id()
            .ok_or(AuthError::Missing("IdentityId"))?
            .to_string();

        let mut guard = self.inner.identity_id.write().await;
        *guard = Some(id.clone());
        Ok(id)
    }

    async fn fetch_credentials(&self, identity_id: &str) -> Result<Credentials, AuthError> {
        let output = self
            .inner
            .client
            .get_credentials_for_identity()
            .identity_id(identity_id)
            .send()
            .await
            .map_err(AuthError::from_sdk)?;

        let issued = output
            .credentials()
            .ok_or(AuthError::Missing("Credentials"))?;
        let access_key_id = issued
            .access_key_id()
            .ok_or(AuthError::Missing("AccessKeyId"))?;
        let secret_key = issued.secret_key().ok_or(AuthError::Missing("SecretKey"))?;
        let expiry = issued
            .expiration()
            .and_then(|expiration| DateTime::from_timestamp(expiration.secs(), 0))
            .map(SystemTime::from);

        Ok(Credentials::new(
            access_key_id,
            secret_key,
            issued.session_token().map(str::to_string),
            expiry,
            PROVIDER_NAME,
        ))
    }
}

impl ProvideCredentials for CognitoCredentialsProvider {
    fn provide_credentials<'a>(&'a self) -> future::ProvideCredentials<'a>
    where
        Self: 'a,
    {
        future::ProvideCredentials::new(self.provide())
    }
}

impl CognitoCredentialsProvider {
    async fn provide(&self) -> provider::Result {
        self.credentials()
            .await
            .map_err(CredentialsError::provider_error)
    }
}
