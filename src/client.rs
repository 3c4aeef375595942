use crate::config::Config;
use crate::error::ApiError;
use crate::model::{EmailReceipt, EmailRequest, Show, ShowId, StatusFilter};

use http::{Method, Request, StatusCode, Uri, header};
use http_body_util::BodyExt;
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use serde::de::DeserializeOwned;
use std::error::Error as _;
use std::sync::Arc;
use std::time::Duration;

type HttpsClient = Client<hyper_rustls::HttpsConnector<HttpConnector>, String>;

/// Thin wrapper over the shows API. Cheap to clone; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: HttpsClient,
    base_url: String,
    timeout: Option<Duration>,
}

impl ApiClient {
    pub fn new(base_url: &str, insecure: bool) -> Result<Self, ApiError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();

        let uri: Uri = base_url
            .parse()
            .map_err(|e: http::uri::InvalidUri| ApiError::InvalidUrl(format!("{base_url} ({e})")))?;
        if uri.authority().is_none() || !matches!(uri.scheme_str(), Some("http" | "https")) {
            return Err(ApiError::InvalidUrl(base_url));
        }

        let https_connector = if insecure {
            let tls_config = rustls::ClientConfig::builder()
                .dangerous()
                .with_custom_certificate_verifier(Arc::new(NoVerifier))
                .with_no_client_auth();

            HttpsConnectorBuilder::new()
                .with_tls_config(tls_config)
                .https_or_http()
                .enable_http1()
                .build()
        } else {
            let mut root_store = rustls::RootCertStore::empty();
            let result = rustls_native_certs::load_native_certs();
            root_store.add_parsable_certificates(result.certs);

            // Plain http still works without a trust store.
            if root_store.is_empty() && uri.scheme_str() == Some("https") {
                return Err(ApiError::Transport(
                    "No valid system certificates found.".to_string(),
                ));
            }

            let tls_config = rustls::ClientConfig::builder()
                .with_root_certificates(root_store)
                .with_no_client_auth();

            HttpsConnectorBuilder::new()
                .with_tls_config(tls_config)
                .https_or_http()
                .enable_http1()
                .build()
        };

        let http = Client::builder(TokioExecutor::new()).build(https_connector);
        Ok(Self {
            http,
            base_url,
            timeout: None,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Ok(Self::new(&config.api_url, config.allow_insecure_certs)?
            .with_timeout(config.request_timeout()))
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn shows_url(&self, filter: Option<&StatusFilter>) -> String {
        match filter.and_then(StatusFilter::query_value) {
            Some(status) => {
                let encoded: String = url::form_urlencoded::byte_serialize(status.as_bytes()).collect();
                format!("{}/shows?status={}", self.base_url, encoded)
            }
            None => format!("{}/shows", self.base_url),
        }
    }

    pub fn show_url(&self, id: ShowId) -> String {
        format!("{}/shows/{}", self.base_url, id)
    }

    pub fn send_email_url(&self) -> String {
        format!("{}/emails/send", self.base_url)
    }

    // --- READ OPERATIONS ---

    /// Shows in the order the backend returned them.
    pub async fn list_shows(&self, filter: Option<&StatusFilter>) -> Result<Vec<Show>, ApiError> {
        let url = self.shows_url(filter);
        match self.execute(Method::GET, &url, None).await? {
            Some(body) => Ok(serde_json::from_slice(&body)?),
            None => Ok(vec![]),
        }
    }

    /// `Ok(None)` when the backend answers successfully but with no show.
    pub async fn get_show(&self, id: ShowId) -> Result<Option<Show>, ApiError> {
        let url = self.show_url(id);
        match self.execute(Method::GET, &url, None).await? {
            Some(body) => decode_optional(&body),
            None => Ok(None),
        }
    }

    // --- WRITE OPERATIONS ---

    /// `Ok(None)` on 204 No Content.
    pub async fn send_email(&self, request: &EmailRequest) -> Result<Option<EmailReceipt>, ApiError> {
        let url = self.send_email_url();
        let payload = serde_json::to_string(request)?;
        match self.execute(Method::POST, &url, Some(payload)).await? {
            Some(body) => decode_optional(&body),
            None => Ok(None),
        }
    }

    // --- PLUMBING ---

    /// Sends one request and returns the body of a successful response
    /// (`None` for 204). Every non-2xx becomes `ApiError::Status`.
    async fn execute(
        &self,
        method: Method,
        url: &str,
        json: Option<String>,
    ) -> Result<Option<Vec<u8>>, ApiError> {
        log::debug!("{} {}", method, url);
        let exchange = self.exchange(method.clone(), url, json);
        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, exchange)
                .await
                .unwrap_or(Err(ApiError::Timeout(limit.as_secs()))),
            None => exchange.await,
        };
        if let Err(e) = &result {
            log::warn!("{} {} failed: {}", method, url, e);
        }
        result
    }

    async fn exchange(
        &self,
        method: Method,
        url: &str,
        json: Option<String>,
    ) -> Result<Option<Vec<u8>>, ApiError> {
        let mut builder = Request::builder()
            .method(method)
            .uri(url)
            .header(header::ACCEPT, "application/json");
        if json.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        let request = builder
            .body(json.unwrap_or_default())
            .map_err(|e| ApiError::InvalidUrl(format!("{url} ({e})")))?;

        let response = self
            .http
            .request(request)
            .await
            .map_err(|e| ApiError::Transport(describe_transport_error(&self.base_url, &e)))?;

        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?
            .to_bytes();

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body);
            return Err(ApiError::from_status(status.as_u16(), &text));
        }
        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        Ok(Some(body.to_vec()))
    }
}

fn decode_optional<T: DeserializeOwned>(body: &[u8]) -> Result<Option<T>, ApiError> {
    Ok(serde_json::from_slice::<Option<T>>(body)?)
}

// hyper's top-level message ("client error (Connect)") is useless on its own.
fn describe_transport_error(base_url: &str, err: &hyper_util::client::legacy::Error) -> String {
    let mut msg = format!("Could not reach {}: {}", base_url, err);
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}

#[derive(Debug)]
struct NoVerifier;
impl rustls::client::danger::ServerCertVerifier for NoVerifier {
    fn verify_server_cert(
        &self,
        _: &rustls::pki_types::CertificateDer<'_>,
        _: &[rustls::pki_types::CertificateDer<'_>],
        _: &rustls::pki_types::ServerName<'_>,
        _: &[u8],
        _: rustls::pki_types::UnixTime,
    ) -> Result<rustls::client::danger::ServerCertVerified, rustls::Error> {
        Ok(rustls::client::danger::ServerCertVerified::assertion())
    }
    fn verify_tls12_signature(
        &self,
        _: &[u8],
        _: &rustls::pki_types::CertificateDer<'_>,
        _: &rustls::DigitallySignedStruct,
    ) -> Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }
    fn verify_tls13_signature(
        &self,
        _: &[u8],
        _: &rustls::pki_types::CertificateDer<'_>,
        _: &rustls::DigitallySignedStruct,
    ) -> Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }
    fn supported_verify_schemes(&self) -> Vec<rustls::SignatureScheme> {
        use rustls::SignatureScheme::*;
        vec![
            RSA_PKCS1_SHA256,
            RSA_PKCS1_SHA384,
            RSA_PKCS1_SHA512,
            ECDSA_NISTP256_SHA256,
            RSA_PSS_SHA256,
            ED25519,
        ]
    }
}
