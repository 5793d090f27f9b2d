//! API Client

use async_trait::async_trait;
use jv_core::{ErrorBody, IntentApi, JvAgreement, PaymentIntentCreated, PaymentIntentRequest};

/// localStorage key the auth provider writes the signed-in user id to
const USER_ID_KEY: &str = "jv.user_id";

/// Base URL of the server; defaults to the page origin
fn api_base() -> String {
    option_env!("JV_API_BASE").map_or_else(
        || {
            web_sys::window()
                .and_then(|w| w.location().origin().ok())
                .unwrap_or_else(|| "http://localhost:3000".into())
        },
        |base| base.trim_end_matches('/').to_string(),
    )
}

/// Signed-in user, if the auth provider has stored one
pub fn current_user_id() -> Option<String> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(USER_ID_KEY).ok().flatten())
        .filter(|id| !id.is_empty())
}

async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    response
        .json::<ErrorBody>()
        .await
        .map_or_else(|_| format!("Request failed ({status})"), |body| body.error)
}

/// Load joint-venture agreements
pub async fn fetch_agreements() -> Result<Vec<JvAgreement>, String> {
    let response = reqwest::Client::new()
        .get(format!("{}/api/agreements", api_base()))
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.status().is_success() {
        response.json().await.map_err(|e| e.to_string())
    } else {
        Err(error_message(response).await)
    }
}

/// Intent endpoint client
pub struct HttpIntentApi;

#[async_trait(?Send)]
impl IntentApi for HttpIntentApi {
    async fn create_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntentCreated, String> {
        let mut builder = reqwest::Client::new()
            .post(format!("{}/create-payment-intent", api_base()))
            .json(request);

        if let Some(key) = option_env!("JV_DATASTORE_ANON_KEY") {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|e| e.to_string())?;

        if response.status().is_success() {
            response.json().await.map_err(|e| e.to_string())
        } else {
            Err(error_message(response).await)
        }
    }
}
