//! Executes one HTTP exchange against the remote API.
use async_trait::async_trait;
use log::*;
use reqwest::{
    Client,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use secrecy::{ExposeSecret, SecretString};

#[cfg(test)]
use mockall::automock;

use crate::{
    contents::{
        config::{ACCEPT_HEADER_VALUE, USER_AGENT},
        request::HttpRequest,
    },
    error::Result,
};

/// Status and full body text of a response, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// One request and the response it produced. Lives for a single call.
#[derive(Debug, Clone)]
pub struct HttpExchange {
    pub request: HttpRequest,
    pub response: HttpResponse,
}

/// Sends a request and waits for the complete response.
///
/// Implementations only fail on transport faults. Error statuses are
/// returned as ordinary responses.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// [`Transport`] backed by a reqwest client carrying the auth and accept
/// headers.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(token: &SecretString) -> Result<Self> {
        let mut headers = HeaderMap::new();

        let mut token_value =
            HeaderValue::from_str(&format!("token {}", token.expose_secret()))?;
        token_value.set_sensitive(true);

        headers.append(AUTHORIZATION, token_value);
        headers.append(ACCEPT, HeaderValue::from_static(ACCEPT_HEADER_VALUE));

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        debug!("{} {}", request.method, request.url);

        let mut builder = self.client.request(request.method, request.url);

        if let Some(body) = request.body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!("received status {status} ({} bytes)", body.len());

        Ok(HttpResponse { status, body })
    }
}
