use gloo::net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::bookings::{decode_listing, PageRequest};
use shared::endpoints;
use shared::envelope::{decode_bare, decode_envelope};
use shared::{
    ApiError, ApiSuccess, AvailabilityCell, BookingId, BookingPage, Category, CategoryRequest,
    CheckSessionResponse, GridMutation, HttpMethod, LoginRequest, RegisterRequest,
    RequestDescriptor, SessionUser, TimeSlot, WeekWindow,
};
use web_sys::RequestCredentials;
use yew::Callback;

use super::config::AppConfig;

const CSRF_COOKIE: &str = "csrftoken";
const CSRF_HEADER: &str = "X-CSRFToken";

/// HTTP client for the booking backend.
///
/// Every request carries the session cookie; mutating verbs also carry the
/// CSRF header. A 401 from any endpoint is reported through
/// `on_unauthorized` before the error is returned to the caller.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    on_unauthorized: Option<Callback<()>>,
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url && self.on_unauthorized == other.on_unauthorized
    }
}

impl ApiClient {
    /// Create a new API client from the build configuration
    pub fn new() -> Self {
        Self::with_base_url(AppConfig::load().api_base_url)
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            on_unauthorized: None,
        }
    }

    /// Install the global 401 handler
    pub fn on_unauthorized(mut self, callback: Callback<()>) -> Self {
        self.on_unauthorized = Some(callback);
        self
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and hand back the raw status and body
    pub async fn execute(&self, descriptor: &RequestDescriptor) -> Result<(u16, String), ApiError> {
        if descriptor.method.is_mutating() && csrf_token().is_none() {
            self.prime_csrf().await;
        }

        let builder = self.builder(descriptor);
        let response = send(builder, descriptor.body.as_ref()).await.map_err(|e| {
            log::warn!("{} {} failed: {}", descriptor.method.as_str(), descriptor.path, e);
            e
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        if notify_unauthorized(status, self.on_unauthorized.as_ref()) {
            log::info!("{} returned 401", descriptor.path);
        }
        Ok((status, body))
    }

    fn builder(&self, descriptor: &RequestDescriptor) -> RequestBuilder {
        let url = self.url(&descriptor.path);
        let mut builder = match descriptor.method {
            HttpMethod::Get => Request::get(&url),
            HttpMethod::Post => Request::post(&url),
            HttpMethod::Put => Request::put(&url),
            HttpMethod::Delete => Request::delete(&url),
        }
        .credentials(RequestCredentials::Include);

        if !descriptor.params.is_empty() {
            builder = builder.query(
                descriptor
                    .params
                    .iter()
                    .map(|(key, value)| (key.as_str(), value.as_str())),
            );
        }
        if descriptor.method.is_mutating() {
            if let Some(token) = csrf_token() {
                builder = builder.header(CSRF_HEADER, &token);
            }
        }
        builder
    }

    /// Request that resolves only on a success envelope
    pub async fn envelope<T: DeserializeOwned>(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<ApiSuccess<T>, ApiError> {
        let (status, body) = self.execute(descriptor).await?;
        decode_envelope(status, &body)
    }

    async fn bare<T: DeserializeOwned>(&self, descriptor: &RequestDescriptor) -> Result<T, ApiError> {
        let (status, body) = self.execute(descriptor).await?;
        decode_bare(status, &body)
    }

    async fn prime_csrf(&self) {
        if let Err(e) = send(self.builder(&endpoints::csrf()), None).await {
            log::warn!("could not prime CSRF cookie: {}", e);
        }
    }

    pub async fn check_session(&self) -> Result<CheckSessionResponse, ApiError> {
        self.bare(&endpoints::check_session()).await
    }

    /// Log in, returning the signed-in user. Falls back to a session check
    /// when the login response does not describe the user.
    pub async fn login(&self, request: &LoginRequest) -> Result<SessionUser, ApiError> {
        let success = self.envelope::<Value>(&endpoints::login(request)?).await?;
        let user = success
            .data
            .and_then(|data| serde_json::from_value::<SessionUser>(data).ok())
            .filter(|user| !user.username.is_empty() || !user.name.is_empty());

        match user {
            Some(user) => Ok(user),
            None => self
                .check_session()
                .await?
                .user()
                .ok_or(ApiError::Logical(None)),
        }
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        self.envelope::<Value>(&endpoints::logout()).await.map(|_| ())
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<ApiSuccess<Value>, ApiError> {
        self.envelope(&endpoints::register(request)?).await
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.envelope(&endpoints::list_categories())
            .await
            .map(ApiSuccess::data_or_default)
    }

    pub async fn create_category(&self, request: &CategoryRequest) -> Result<ApiSuccess<Value>, ApiError> {
        self.envelope(&endpoints::create_category(request)?).await
    }

    pub async fn update_category(
        &self,
        id: i64,
        request: &CategoryRequest,
    ) -> Result<ApiSuccess<Value>, ApiError> {
        self.envelope(&endpoints::update_category(id, request)?).await
    }

    pub async fn list_time_slots(&self) -> Result<Vec<TimeSlot>, ApiError> {
        self.envelope(&endpoints::list_time_slots())
            .await
            .map(ApiSuccess::data_or_default)
    }

    pub async fn availability(&self, window: &WeekWindow) -> Result<Vec<AvailabilityCell>, ApiError> {
        self.envelope(&endpoints::availability_for(window))
            .await
            .map(ApiSuccess::data_or_default)
    }

    /// Submit a grid mutation; the returned message is what the toast shows
    pub async fn mutate(&self, mutation: &GridMutation) -> Result<String, ApiError> {
        let success = self.envelope::<Value>(&mutation.descriptor()?).await?;
        Ok(success
            .message
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| mutation.success_message().to_string()))
    }

    pub async fn my_bookings(&self) -> Result<BookingPage, ApiError> {
        let (status, body) = self.execute(&endpoints::my_bookings()).await?;
        decode_listing(status, &body)
    }

    pub async fn cancel_booking(&self, id: BookingId) -> Result<ApiSuccess<Value>, ApiError> {
        self.envelope(&endpoints::cancel_booking(id)).await
    }

    pub async fn booking_history(&self, page: PageRequest) -> Result<BookingPage, ApiError> {
        let descriptor = endpoints::booking_history(page.page, page.page_size);
        let (status, body) = self.execute(&descriptor).await?;
        decode_listing(status, &body)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

async fn send(
    builder: RequestBuilder,
    body: Option<&Value>,
) -> Result<gloo::net::http::Response, ApiError> {
    let request = match body {
        Some(body) => builder
            .json(body)
            .map_err(|e| ApiError::Encode(e.to_string()))?,
        None => builder.build().map_err(|e| ApiError::Encode(e.to_string()))?,
    };
    request
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))
}

/// Fires the global handler when `status` is a 401
fn notify_unauthorized(status: u16, handler: Option<&Callback<()>>) -> bool {
    if status != 401 {
        return false;
    }
    if let Some(handler) = handler {
        handler.emit(());
    }
    true
}

/// Current value of the readable CSRF cookie
fn csrf_token() -> Option<String> {
    use wasm_bindgen::JsCast;

    let document = gloo::utils::document().dyn_into::<web_sys::HtmlDocument>().ok()?;
    let cookies = document.cookie().ok()?;
    cookie_value(&cookies, CSRF_COOKIE)
}

fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}
