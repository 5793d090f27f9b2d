//! Stripe.js Bindings
//!
//! Just enough of Stripe.js v3 to mount a card element and confirm a card
//! payment. The script tag must be present on the page.

#![allow(unsafe_code)]

use async_trait::async_trait;
use js_sys::{Object, Promise, Reflect};
use jv_core::{CardConfirmer, ConfirmOutcome};
use serde::{Deserialize, Serialize};
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen]
extern "C" {
    /// `Stripe(publishableKey)` instance
    #[derive(Debug, Clone)]
    pub type JsStripe;

    #[derive(Debug, Clone)]
    pub type JsElements;

    #[derive(Debug, Clone)]
    pub type JsCardElement;

    #[wasm_bindgen(catch, js_name = Stripe, js_namespace = window)]
    fn new_stripe(publishable_key: &str) -> Result<JsStripe, JsValue>;

    #[wasm_bindgen(method, catch, js_name = elements)]
    fn elements(this: &JsStripe) -> Result<JsElements, JsValue>;

    #[wasm_bindgen(method, catch, js_name = create)]
    fn create(this: &JsElements, kind: &str, options: &JsValue) -> Result<JsCardElement, JsValue>;

    #[wasm_bindgen(method, catch, js_name = mount)]
    fn mount(this: &JsCardElement, selector: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = confirmCardPayment)]
    fn confirm_card_payment(
        this: &JsStripe,
        client_secret: &str,
        data: &JsValue,
    ) -> Result<Promise, JsValue>;
}

pub fn publishable_key() -> Option<&'static str> {
    option_env!("JV_STRIPE_PUBLISHABLE_KEY").filter(|key| key.starts_with("pk_"))
}

/// Options for `elements.create("card", ...)`
#[derive(Serialize, Debug)]
struct CardOptions {
    style: CardStyle,
}

#[derive(Serialize, Debug)]
struct CardStyle {
    base: StyleRule,
    invalid: StyleRule,
}

#[derive(Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct StyleRule {
    color: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    font_size: Option<&'static str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    icon_color: Option<&'static str>,
}

impl Default for CardOptions {
    fn default() -> Self {
        Self {
            style: CardStyle {
                base: StyleRule {
                    color: "#ffffff",
                    font_size: Some("16px"),
                    ..StyleRule::default()
                },
                invalid: StyleRule {
                    color: "#fa755a",
                    icon_color: Some("#fa755a"),
                    ..StyleRule::default()
                },
            },
        }
    }
}

/// `{ error }` or `{ paymentIntent }` resolved by `confirmCardPayment`
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct ConfirmResult {
    #[serde(default)]
    error: Option<StripeError>,

    #[serde(default)]
    payment_intent: Option<ConfirmedIntent>,
}

#[derive(Deserialize, Debug)]
struct StripeError {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ConfirmedIntent {
    id: String,
    status: String,
}

impl From<ConfirmResult> for ConfirmOutcome {
    fn from(result: ConfirmResult) -> Self {
        match result {
            ConfirmResult {
                error: Some(error), ..
            } => Self::Error(error.message),
            ConfirmResult {
                payment_intent: Some(intent),
                ..
            } => Self::Confirmed {
                intent_id: intent.id,
                status: intent.status,
            },
            _ => Self::Error(None),
        }
    }
}

/// Stripe instance plus the mounted card element
#[derive(Debug, Clone)]
pub struct StripeCard {
    stripe: JsStripe,
    card: JsCardElement,
}

impl StripeCard {
    /// Instantiate Stripe.js and mount a card element at `selector`
    pub fn mount(publishable_key: &str, selector: &str) -> Result<Self, String> {
        let options = to_value(&CardOptions::default()).map_err(|e| e.to_string())?;

        let stripe = new_stripe(publishable_key).map_err(js_message)?;
        let elements = stripe.elements().map_err(js_message)?;
        let card = elements.create("card", &options).map_err(js_message)?;
        card.mount(selector).map_err(js_message)?;
        Ok(Self { stripe, card })
    }

    /// `{ payment_method: { card } }` carrying the live element handle
    fn payment_data(&self) -> Result<JsValue, JsValue> {
        let payment_method = Object::new();
        Reflect::set(&payment_method, &"card".into(), self.card.as_ref())?;
        let data = Object::new();
        Reflect::set(&data, &"payment_method".into(), &payment_method)?;
        Ok(data.into())
    }
}

#[async_trait(?Send)]
impl CardConfirmer for StripeCard {
    async fn confirm_card_payment(&self, client_secret: &str) -> ConfirmOutcome {
        let promise = match self
            .payment_data()
            .and_then(|data| self.stripe.confirm_card_payment(client_secret, &data))
        {
            Ok(promise) => promise,
            Err(e) => return ConfirmOutcome::Error(Some(js_message(e))),
        };

        match JsFuture::from(promise).await {
            Ok(result) => from_value::<ConfirmResult>(result)
                .map_or(ConfirmOutcome::Error(None), ConfirmOutcome::from),
            Err(e) => ConfirmOutcome::Error(Some(js_message(e))),
        }
    }
}

/// `message` of a thrown JS error, or its string form
fn js_message(value: JsValue) -> String {
    Reflect::get(&value, &"message".into())
        .ok()
        .and_then(|message| message.as_string())
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"))
}
