//! Client layer: builds signed requests, runs the HTTP exchange and classifies replies.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use url::Url;

use crate::domain::{
    CreateCampaign, Endpoint, EndpointRequest, MethodName, ParamValue, PrivateKey, PublicKey,
    RequestParams, SendSms, SendSmsGroup, ValidationError,
};
use crate::transport::{ApiReply, control_sum, decode_json_response, encode_form};

const DEFAULT_API_ROOT: &str = "https://api.atompark.com/api/sms";

/// API version signed into every request and used in the default base URL.
pub const DEFAULT_API_VERSION: &str = "3.0";

const TEST_FIELD: &str = "test";
const SUM_FIELD: &str = "sum";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self.client.post(url).form(&params).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone)]
/// Account key pair.
///
/// The public key is sent with every request; the private key only signs.
pub struct Credentials {
    public_key: PublicKey,
    private_key: PrivateKey,
}

impl Credentials {
    /// Validate both keys (neither may be empty).
    pub fn new(
        public_key: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            public_key: PublicKey::new(public_key)?,
            private_key: PrivateKey::new(private_key)?,
        })
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }
}

#[derive(Debug, Clone)]
/// Settings applied to every call.
pub struct ClientConfig {
    /// Mark every request as test traffic (`test=1`).
    pub sandbox: bool,
    /// Signed as `version`.
    pub api_version: String,
    /// Merged into every call; call parameters win on collision.
    pub default_params: RequestParams,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            sandbox: false,
            api_version: DEFAULT_API_VERSION.to_owned(),
            default_params: RequestParams::new(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`EpochtaClient`].
///
/// Every call ends in exactly one of:
/// - HTTP-level failures (transport failure or non-2xx status),
/// - API-level failures (`error` field in the reply),
/// - unreadable replies,
/// - validation failures raised before anything is sent.
pub enum EpochtaError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the server. The body is not parsed.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// The API answered with an `error` field.
    #[error("API error {code}: {message}")]
    Api { message: String, code: i64 },

    /// Reply body is not JSON, or is JSON but not an object.
    #[error("malformed response: {source}")]
    MalformedResponse {
        body: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// A domain constructor or the endpoint table rejected the request.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
/// Builder for [`EpochtaClient`].
///
/// Use this for sandbox mode, default parameters, a different API version or base URL,
/// and HTTP timeout/user-agent settings.
pub struct EpochtaClientBuilder {
    credentials: Credentials,
    config: ClientConfig,
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl EpochtaClientBuilder {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            config: ClientConfig::default(),
            base_url: None,
            timeout: None,
            user_agent: None,
        }
    }

    /// Replace the whole [`ClientConfig`].
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Send every request as test traffic.
    pub fn sandbox(mut self, sandbox: bool) -> Self {
        self.config.sandbox = sandbox;
        self
    }

    /// Override the API version. Unless [`EpochtaClientBuilder::base_url`] is set, the base
    /// URL follows the version.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.config.api_version = version.into();
        self
    }

    /// Add a parameter merged into every call.
    pub fn default_param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.config.default_params.insert(name, value);
        self
    }

    /// Override the base URL that method names are appended to.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build an [`EpochtaClient`].
    pub fn build(self) -> Result<EpochtaClient, EpochtaError> {
        let raw_base = self
            .base_url
            .unwrap_or_else(|| format!("{DEFAULT_API_ROOT}/{}", self.config.api_version));
        let base_url = parse_base_url(&raw_base)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| EpochtaError::Transport(Box::new(err)))?;

        Ok(EpochtaClient {
            credentials: self.credentials,
            config: self.config,
            base_url,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ValidationError> {
    let invalid = || ValidationError::InvalidBaseUrl {
        url: raw.to_owned(),
    };
    let url = Url::parse(raw).map_err(|_| invalid())?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }
    Ok(url)
}

#[derive(Clone)]
/// High-level ePochta SMS client.
///
/// Every call is signed with the account's private key and POSTed as a form to
/// `<base URL>/<method>`, by default `https://api.atompark.com/api/sms/3.0/<method>`.
/// The client keeps no per-call state and can be shared between tasks.
pub struct EpochtaClient {
    credentials: Credentials,
    config: ClientConfig,
    base_url: Url,
    http: Arc<dyn HttpTransport>,
}

impl EpochtaClient {
    /// Create a client with the default configuration.
    ///
    /// For more customization, use [`EpochtaClient::builder`].
    pub fn new(credentials: Credentials) -> Result<Self, EpochtaError> {
        EpochtaClientBuilder::new(credentials).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> EpochtaClientBuilder {
        EpochtaClientBuilder::new(credentials)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Call a remote method with arbitrary parameters.
    ///
    /// The form body is the default params overlaid with `params`, plus `key`, `test` in
    /// sandbox mode, and `sum`. Null values are dropped.
    ///
    /// Errors:
    /// - [`EpochtaError::Validation`] for an invalid method name (nothing is sent),
    /// - [`EpochtaError::Transport`] when the HTTP exchange fails,
    /// - [`EpochtaError::HttpStatus`] for non-2xx HTTP responses,
    /// - [`EpochtaError::Api`] when the reply carries an `error` field,
    /// - [`EpochtaError::MalformedResponse`] when the reply is not a JSON object.
    pub async fn call(&self, method: &str, params: RequestParams) -> Result<Value, EpochtaError> {
        let method = MethodName::new(method)?;
        let url = self.endpoint_url(&method)?;
        let form = encode_form(&self.signed_params(&method, params));

        tracing::debug!(
            method = %method,
            fields = form.len(),
            sandbox = self.config.sandbox,
            "calling API method"
        );

        let response = self
            .http
            .post_form(url.as_str(), form)
            .await
            .map_err(EpochtaError::Transport)?;

        if !(200..=299).contains(&response.status) {
            tracing::debug!(method = %method, status = response.status, "non-success HTTP status");
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(EpochtaError::HttpStatus {
                status: response.status,
                body,
            });
        }

        match decode_json_response(&response.body) {
            Ok(ApiReply::Success(payload)) => Ok(payload),
            Ok(ApiReply::Failure { message, code }) => {
                tracing::debug!(method = %method, code, "API returned an error");
                Err(EpochtaError::Api { message, code })
            }
            Err(err) => Err(EpochtaError::MalformedResponse {
                body: response.body,
                source: Box::new(err),
            }),
        }
    }

    /// Call an endpoint from the [`Endpoint`] table after checking its parameters.
    ///
    /// Missing required or unexpected parameters fail with [`EpochtaError::Validation`]
    /// before anything is sent.
    pub async fn execute(&self, request: impl Into<EndpointRequest>) -> Result<Value, EpochtaError> {
        let (method, params) = request.into().into_parts()?;
        self.call(method, params).await
    }

    /// Account balance, optionally converted to `currency`.
    pub async fn get_user_balance(&self, currency: Option<&str>) -> Result<Value, EpochtaError> {
        self.execute(Endpoint::GetUserBalance.request().param("currency", currency))
            .await
    }

    /// Send one message to one recipient.
    pub async fn send_sms(&self, request: SendSms) -> Result<Value, EpochtaError> {
        self.execute(request).await
    }

    /// Send one message to many recipients.
    pub async fn send_sms_group(&self, request: SendSmsGroup) -> Result<Value, EpochtaError> {
        self.execute(request).await
    }

    /// Create a campaign over an address book.
    pub async fn create_campaign(&self, request: CreateCampaign) -> Result<Value, EpochtaError> {
        self.execute(request).await
    }

    fn signed_params(&self, method: &MethodName, params: RequestParams) -> RequestParams {
        let mut merged = self.config.default_params.clone();
        merged.merge(params);
        merged.insert(PublicKey::FIELD, self.credentials.public_key.as_str());
        if self.config.sandbox {
            merged.insert(TEST_FIELD, 1_i64);
        }

        let sum = control_sum(
            method.as_str(),
            &merged,
            &self.credentials.private_key,
            &self.config.api_version,
        );
        merged.insert(SUM_FIELD, sum);
        merged
    }

    /// `<base>/<method>`, rebuilt from the configured base on every call.
    fn endpoint_url(&self, method: &MethodName) -> Result<Url, ValidationError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ValidationError::InvalidBaseUrl {
                url: self.base_url.to_string(),
            })?
            .pop_if_empty()
            .push(method.as_str());
        Ok(url)
    }
}
