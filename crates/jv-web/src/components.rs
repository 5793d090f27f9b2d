//! UI Components

use jv_core::{
    money::format_euros, CardConfirmer, CheckoutForm, FormEvent, IntentApi, JvAgreement,
    Readiness,
};
use leptos::prelude::*;

use crate::api::HttpIntentApi;
use crate::stripe::{publishable_key, StripeCard};

const CARD_ELEMENT_ID: &str = "card-element";

/// One agreement in the dashboard list
#[component]
pub fn AgreementCard(agreement: JvAgreement) -> impl IntoView {
    let status_class = format!("agreement-status {}", agreement.status.css_class());

    view! {
        <div class="agreement">
            <div class="agreement-header">
                <div>
                    <h3>{agreement.title.clone()}</h3>
                    <p class="partner">"Partner: " {agreement.partner_name.clone()}</p>
                </div>
                <span class=status_class>{agreement.status.to_string()}</span>
            </div>
            <dl class="agreement-details">
                <div><dt>"Type"</dt><dd>{agreement.agreement_type.clone()}</dd></div>
                <div><dt>"Value"</dt><dd>{format_euros(agreement.value)}</dd></div>
                <div><dt>"Start Date"</dt><dd>{agreement.start_date.format("%d %b %Y").to_string()}</dd></div>
                <div><dt>"End Date"</dt><dd>{agreement.end_date.format("%d %b %Y").to_string()}</dd></div>
            </dl>
            <div class="agreement-actions">
                <a class="btn btn-small" href=agreement.document_url.clone() target="_blank" rel="noopener">
                    "Download"
                </a>
            </div>
        </div>
    }
}

/// Card payment form.
///
/// Requests a client secret on mount, then confirms the card payment
/// directly with Stripe. `on_success` receives the intent id at most once.
#[component]
pub fn PaymentForm(
    amount: i64,
    user_id: String,
    #[prop(into)] on_success: Callback<String>,
    #[prop(into)] on_error: Callback<String>,
) -> impl IntoView {
    let form = RwSignal::new(CheckoutForm::new(amount, user_id));
    let (readiness, set_readiness) = signal(Readiness::default());
    let card = StoredValue::new_local(None::<StripeCard>);

    // Mount the card element once the placeholder div is in the DOM
    Effect::new(move |_| {
        if card.with_value(Option::is_some) {
            return;
        }
        let Some(key) = publishable_key() else {
            form.update(|f| f.card_unavailable("publishable key missing"));
            return;
        };
        match StripeCard::mount(key, &format!("#{CARD_ELEMENT_ID}")) {
            Ok(mounted) => {
                card.set_value(Some(mounted));
                set_readiness.set(Readiness::ready());
            }
            Err(e) => form.update(|f| f.card_unavailable(&e)),
        }
    });

    // Mint the client secret
    leptos::task::spawn_local(async move {
        let request = form.with_untracked(CheckoutForm::intent_request);
        let result = match request {
            Ok(request) => HttpIntentApi.create_intent(&request).await,
            Err(e) => Err(e.to_string()),
        };
        form.update(|f| f.secret_received(result));
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let Some(Ok(secret)) = form.try_update(|f| f.begin_submit(readiness.get_untracked()))
        else {
            return;
        };
        let Some(mounted) = card.get_value() else {
            return;
        };

        leptos::task::spawn_local(async move {
            let outcome = mounted.confirm_card_payment(&secret).await;
            match form.try_update(|f| f.finish_submit(outcome)).flatten() {
                Some(FormEvent::Succeeded(intent_id)) => on_success.run(intent_id),
                Some(FormEvent::Failed(message)) => on_error.run(message),
                None => {}
            }
        });
    };

    view! {
        <div class="payment-panel">
            <div class="payment-header">
                <h3>"Secure Payment"</h3>
                <span class="encrypted">"🔒 Encrypted"</span>
            </div>
            {move || form.with(CheckoutForm::is_succeeded).then(|| view! {
                <div class="payment-success">
                    <h3>"Payment Successful!"</h3>
                    <p>"Your payment was processed successfully."</p>
                </div>
            })}
            <form
                class="payment-form"
                class:hidden=move || form.with(CheckoutForm::is_succeeded)
                on:submit=on_submit
            >
                <div id=CARD_ELEMENT_ID class="card-element"></div>
                {move || form.with(|f| f.error().map(|e| view! {
                    <div class="payment-error">{e.to_string()}</div>
                }))}
                <button
                    type="submit"
                    class="btn btn-primary btn-block"
                    disabled=move || !form.with(|f| f.can_submit(readiness.get()))
                >
                    {move || form.with(CheckoutForm::button_label)}
                </button>
            </form>
        </div>
    }
}
