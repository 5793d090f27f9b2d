//! Investor Dashboard

use jv_core::{money::format_minor_units, JvAgreement};
use leptos::prelude::*;

use crate::api;
use crate::components::{AgreementCard, PaymentForm};

/// Default investment in cents
const DEFAULT_AMOUNT: i64 = 75_000;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let Some(user_id) = api::current_user_id() else {
        return view! {
            <div class="dashboard signed-out">
                <h1>"Investor Dashboard"</h1>
                <p>"Sign in to access your agreements."</p>
            </div>
        }
        .into_any();
    };

    let (agreements, set_agreements) = signal(None::<Result<Vec<JvAgreement>, String>>);
    let (show_payment, set_show_payment) = signal(false);
    let (amount, set_amount) = signal(DEFAULT_AMOUNT);
    let (notice, set_notice) = signal(None::<String>);

    leptos::task::spawn_local(async move {
        set_agreements.set(Some(api::fetch_agreements().await));
    });

    let on_success = Callback::new(move |intent_id: String| {
        set_show_payment.set(false);
        set_notice.set(Some(format!("Payment {intent_id} confirmed. Thank you for your investment.")));
    });
    let on_error = Callback::new(move |message: String| {
        leptos::logging::error!("payment failed: {message}");
    });

    let agreement_list = move || match agreements.get() {
        None => view! { <p class="loading">"Loading agreements..."</p> }.into_any(),
        Some(Err(e)) => view! { <p class="error">{e}</p> }.into_any(),
        Some(Ok(list)) if list.is_empty() => {
            view! { <p class="empty">"No agreements available"</p> }.into_any()
        }
        Some(Ok(list)) => list
            .into_iter()
            .map(|agreement| view! { <AgreementCard agreement=agreement /> })
            .collect_view()
            .into_any(),
    };

    view! {
        <div class="dashboard">
            <header class="dashboard-header">
                <h1>"Investor Dashboard"</h1>
            </header>

            {move || notice.get().map(|n| view! { <div class="notice">{n}</div> })}

            <section class="panels">
                <div class="panel">
                    <h2>"Portfolio Value"</h2>
                    <div class="value">"€0.00"</div>
                    <p class="muted">"No active investments"</p>
                </div>
                <div class="panel">
                    <h2>"Quick Actions"</h2>
                    <label class="field">
                        "Investment (EUR)"
                        <input
                            type="number"
                            min="1"
                            prop:value=move || (amount.get() / 100).to_string()
                            on:input=move |ev| {
                                if let Ok(euros) = event_target_value(&ev).parse::<i64>() {
                                    set_amount.set(euros.saturating_mul(100));
                                }
                            }
                        />
                    </label>
                    <button class="btn btn-primary" on:click=move |_| set_show_payment.set(true)>
                        {move || format!("€ Checkout {}", format_minor_units(amount.get()))}
                    </button>
                    <button class="btn btn-secondary" disabled=true title="Coming soon">
                        "₿ Pay with Crypto"
                    </button>
                </div>
            </section>

            <section class="panel agreements">
                <h2>"Joint Venture Agreements"</h2>
                {agreement_list}
            </section>

            <Show when=move || show_payment.get()>
                <div class="modal-backdrop">
                    <div class="modal">
                        <div class="modal-header">
                            <h2>"Complete Your Investment"</h2>
                            <button class="close" on:click=move |_| set_show_payment.set(false)>"×"</button>
                        </div>
                        <PaymentForm
                            amount=amount.get_untracked()
                            user_id=user_id.clone()
                            on_success=on_success
                            on_error=on_error
                        />
                    </div>
                </div>
            </Show>
        </div>
    }
    .into_any()
}
