use serde::de::DeserializeOwned;
use shared::envelope::decode_envelope;
use shared::{ApiError, ApiSuccess, RequestDescriptor, RequestSlot};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;

/// Turns a raw `(status, body)` pair into the hook's response type
pub type Decoder<T> = fn(u16, &str) -> Result<T, ApiError>;

/// Envelope payload, defaulting when the server sent no `data`
pub fn envelope_data<T: DeserializeOwned + Default>(status: u16, body: &str) -> Result<T, ApiError> {
    decode_envelope::<T>(status, body).map(ApiSuccess::data_or_default)
}

/// Envelope message only, for mutations whose payload is not needed
pub fn envelope_message(status: u16, body: &str) -> Result<Option<String>, ApiError> {
    decode_envelope::<serde_json::Value>(status, body).map(|success| success.message)
}

pub struct UseRequestResult<T> {
    pub response: Option<T>,
    pub error: Option<ApiError>,
    pub loading: bool,
    pub execute: Callback<RequestDescriptor>,
}

/// The app-wide client, with the 401 handler installed
#[hook]
pub fn use_api_client() -> ApiClient {
    use_context::<ApiClient>().unwrap_or_default()
}

/// Generic request primitive exposing `{response, error, loading, execute}`.
///
/// Each `execute` supersedes the previous one: a response is applied only
/// when it belongs to the latest request issued by this hook instance.
#[hook]
pub fn use_request<T>(decoder: Decoder<T>) -> UseRequestResult<T>
where
    T: Clone + 'static,
{
    let api_client = use_api_client();
    let slot = use_mut_ref(RequestSlot::<T>::default);
    let rerender = use_force_update();

    let execute = {
        let slot = slot.clone();
        let rerender = rerender.clone();
        use_callback(api_client, move |descriptor: RequestDescriptor, api_client| {
            let token = slot.borrow_mut().begin();
            rerender.force_update();

            let api_client = api_client.clone();
            let slot = slot.clone();
            let rerender = rerender.clone();
            spawn_local(async move {
                let result = api_client
                    .execute(&descriptor)
                    .await
                    .and_then(|(status, body)| decoder(status, &body));
                if let Err(e) = &result {
                    log::debug!("{} {} -> {}", descriptor.method.as_str(), descriptor.path, e);
                }
                if slot.borrow_mut().complete(token, result) {
                    rerender.force_update();
                }
            });
        })
    };

    let slot = slot.borrow();
    UseRequestResult {
        response: slot.response.clone(),
        error: slot.error.clone(),
        loading: slot.loading,
        execute,
    }
}
