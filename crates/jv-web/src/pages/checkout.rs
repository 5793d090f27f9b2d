//! Standalone Checkout

use leptos::prelude::*;

use crate::api;
use crate::components::PaymentForm;

/// Fixed checkout amount in cents
const CHECKOUT_AMOUNT: i64 = 75_000;

#[component]
pub fn CheckoutPage() -> impl IntoView {
    let Some(user_id) = api::current_user_id() else {
        return view! {
            <div class="checkout signed-out">
                <p>"Sign in to complete your investment."</p>
            </div>
        }
        .into_any();
    };

    let (status, set_status) = signal(String::new());

    let on_success = Callback::new(move |_intent_id: String| {
        set_status.set("✅ Payment successful!".into());
    });
    let on_error = Callback::new(move |message: String| {
        set_status.set(format!("❌ {message}"));
    });

    view! {
        <div class="checkout">
            <PaymentForm
                amount=CHECKOUT_AMOUNT
                user_id=user_id
                on_success=on_success
                on_error=on_error
            />
            <p class="checkout-status">{move || status.get()}</p>
        </div>
    }
    .into_any()
}
