// API client module: a small blocking HTTP client for the tendering API.
// It owns the session header map that every request carries; the map
// gains a `Cookie` entry once login succeeds.

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE, COOKIE, SET_COOKIE,
};
use reqwest::StatusCode;
use tracing::debug;

use crate::error::ApiError;
use crate::models::{ReferenceCatalog, TenderDetails, TenderRequest};

/// `X-ApiKey`, the company account key sent with every request.
pub const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-apikey");

/// Client bound to one API host. Holds the reqwest blocking client, the
/// versioned base URL and the session headers.
pub struct TenderClient {
    client: Client,
    base_url: String,
    headers: HeaderMap,
}

impl TenderClient {
    /// Create a client for `base_host` (e.g. `https://lgp.example.com`)
    /// authenticating with the company's API key.
    pub fn new(base_host: &str, api_key: &str) -> Result<Self, ApiError> {
        let client = Client::builder().build()?;
        Self::with_client(client, base_host, api_key)
    }

    /// Same as [`TenderClient::new`] with a preconfigured reqwest client.
    pub fn with_client(client: Client, base_host: &str, api_key: &str) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut key = HeaderValue::from_str(api_key)?;
        key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key);

        Ok(TenderClient {
            client,
            base_url: format!("{}/api/v1/", base_host.trim_end_matches('/')),
            headers,
        })
    }

    /// Absolute URL for a path relative to `/api/v1/`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the session cookie (`name=value`) to all later requests.
    pub fn set_session_cookie(&mut self, cookie: &str) -> Result<(), ApiError> {
        let mut value = HeaderValue::from_str(cookie)?;
        value.set_sensitive(true);
        self.headers.insert(COOKIE, value);
        Ok(())
    }

    /// The cookie currently sent with requests, if logged in.
    pub fn session_cookie(&self) -> Option<&str> {
        self.headers.get(COOKIE).and_then(|v| v.to_str().ok())
    }

    /// `GET test/ping`. Needs only the API key.
    pub fn ping(&self) -> Result<(), ApiError> {
        let url = self.endpoint("test/ping");
        self.send(self.client.get(&url), &url)?;
        Ok(())
    }

    /// `POST account/login` with the credentials as query parameters and
    /// an empty body. Returns the raw `Set-Cookie` header, if any.
    pub fn login(&self, login: &str, password: &str) -> Result<Option<String>, ApiError> {
        let url = self.endpoint("account/login");
        let req = self
            .client
            .post(&url)
            .query(&[("login", login), ("password", password)]);
        let res = self.send(req, &url)?;
        let cookie = res
            .headers()
            .get(SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        Ok(cookie)
    }

    /// `GET tender/create`: reference data needed to fill a new tender.
    pub fn reference_catalog(&self) -> Result<ReferenceCatalog, ApiError> {
        let url = self.endpoint("tender/create");
        let body = self.send(self.client.get(&url), &url)?.text()?;
        Ok(serde_json::from_str(&body)?)
    }

    /// `POST tender/create`. Returns the id of the new tender.
    pub fn create_tender(&self, tender: &TenderRequest) -> Result<String, ApiError> {
        let url = self.endpoint("tender/create");
        let body = self.send(self.client.post(&url).json(tender), &url)?.text()?;
        Ok(unquote_id(&body).to_string())
    }

    /// `GET tender/{id}`: the full tender record.
    pub fn tender(&self, id: &str) -> Result<TenderDetails, ApiError> {
        let url = self.endpoint(&format!("tender/{}", id));
        let body = self.send(self.client.get(&url), &url)?.text()?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Send with the session headers; anything but 200 becomes
    /// `ApiError::Status` carrying the raw body.
    fn send(&self, req: RequestBuilder, url: &str) -> Result<Response, ApiError> {
        let res = req.headers(self.headers.clone()).send()?;
        let status = res.status();
        debug!(%url, status = status.as_u16(), "api response");
        if status != StatusCode::OK {
            let body = res.text().unwrap_or_else(|_| "".into());
            return Err(ApiError::Status { status, body });
        }
        Ok(res)
    }
}

/// First `;`-separated segment of a `Set-Cookie` value: the `name=value`
/// pair without attributes such as `Path` or `Expires`.
pub fn session_cookie_pair(set_cookie: &str) -> &str {
    set_cookie.split(';').next().unwrap_or_default().trim()
}

/// The create endpoint answers with a JSON string literal; strip the quotes.
pub fn unquote_id(body: &str) -> &str {
    body.trim().trim_matches('"')
}
