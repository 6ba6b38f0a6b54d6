//! Request dispatch and error normalization.
//!
//! Every service method ends in [`Dispatcher::execute`]. It sends one
//! [`Call`], blocks until the response is complete and decodes the body. When
//! the server answers with an error status:
//!
//! - empty or unreadable body: the original `reqwest` status error is returned
//!   unchanged as [`Error::Http`]
//! - body that is not a structured error: same as above, never a decode error
//! - structured error body: [`Error::Api`] with the remote error and status
//!
//! Failures before a response exists (connect, TLS, timeout) pass through as
//! [`Error::Http`]. Nothing is retried.

use chatgpt_core::codec;
use chatgpt_core::{Error, ListEnvelope, RemoteErrorEnvelope, Result};
use reqwest::blocking::Response;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::endpoint::{BodyKind, Endpoint};
use crate::multipart::MultipartBody;
use crate::transport::Transport;

/// Request body ready to send.
#[derive(Debug, Clone)]
pub enum Body {
    Empty,
    Json(Vec<u8>),
    Multipart(MultipartBody),
}

/// A deferred single-result operation: endpoint, resolved URL and body.
#[derive(Debug, Clone)]
pub struct Call {
    endpoint: Endpoint,
    url: Url,
    body: Body,
}

impl Call {
    /// Call without a body. Fails if `params` does not fit the endpoint's template.
    pub fn new(endpoint: Endpoint, base: &Url, params: &[&str]) -> Result<Self> {
        Ok(Self {
            endpoint,
            url: endpoint.url(base, params)?,
            body: Body::Empty,
        })
    }

    /// Attach a JSON body encoded with the shared codec.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.expect_body(BodyKind::Json)?;
        self.body = Body::Json(codec::encode(body)?);
        Ok(self)
    }

    pub fn multipart(mut self, body: MultipartBody) -> Result<Self> {
        self.expect_body(BodyKind::Multipart)?;
        self.body = Body::Multipart(body);
        Ok(self)
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    fn expect_body(&self, kind: BodyKind) -> Result<()> {
        if self.endpoint.body() != kind {
            return Err(Error::InvalidInput(format!(
                "{} takes a {:?} body, not {:?}",
                self.endpoint.name(),
                self.endpoint.body(),
                kind
            )));
        }
        Ok(())
    }
}

/// Sends calls over a [`Transport`] and normalizes their failures.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    transport: Transport,
}

impl Dispatcher {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Send the call and decode the success body as `T`.
    pub fn execute<T: DeserializeOwned>(&self, call: Call) -> Result<T> {
        let bytes = self.send(call)?;
        codec::decode(&bytes)
    }

    /// Send a call whose response is a list envelope and return its items in
    /// server order.
    pub fn execute_list<T: DeserializeOwned>(&self, call: Call) -> Result<Vec<T>> {
        let envelope: ListEnvelope<T> = self.execute(call)?;
        Ok(envelope.into_data())
    }

    /// Send the call and discard the success body.
    pub fn execute_unit(&self, call: Call) -> Result<()> {
        self.send(call).map(|_| ())
    }

    fn send(&self, call: Call) -> Result<Vec<u8>> {
        let Call {
            endpoint,
            url,
            body,
        } = call;

        debug!(endpoint = endpoint.name(), method = %endpoint.verb(), %url, "Dispatching request");

        let builder = self.transport.request(endpoint.method(), url);
        let builder = match body {
            Body::Empty => builder,
            Body::Json(bytes) => builder.header(CONTENT_TYPE, "application/json").body(bytes),
            Body::Multipart(form) => builder.multipart(form.into_form()?),
        };

        let response = self.transport.execute(builder.build()?)?;
        let failure = response.error_for_status_ref().err();
        match failure {
            None => {
                let status = response.status().as_u16();
                let bytes = response.bytes()?;
                debug!(endpoint = endpoint.name(), status, size = bytes.len(), "Request completed");
                Ok(bytes.to_vec())
            }
            Some(http_error) => Err(unwrap_error(endpoint, http_error, response)),
        }
    }
}

/// Turn an error response into [`Error::Api`] when its body is a structured
/// error, otherwise return the transport error untouched.
fn unwrap_error(endpoint: Endpoint, http_error: reqwest::Error, response: Response) -> Error {
    let status = response.status().as_u16();

    let body = match response.bytes() {
        Ok(body) if !body.is_empty() => body,
        _ => {
            debug!(endpoint = endpoint.name(), status, "Error response has no body");
            return Error::Http(http_error);
        }
    };

    match codec::decode::<RemoteErrorEnvelope>(&body) {
        Ok(envelope) => {
            warn!(
                endpoint = endpoint.name(),
                status,
                error_type = %envelope.error.error_type,
                message = %envelope.error.message,
                "API returned an error"
            );
            Error::Api {
                status,
                error: envelope.error,
                source: http_error,
            }
        }
        Err(e) => {
            debug!(
                endpoint = endpoint.name(),
                status,
                error = %e,
                "Error body is not a structured error"
            );
            Error::Http(http_error)
        }
    }
}
