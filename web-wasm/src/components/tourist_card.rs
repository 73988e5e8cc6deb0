//! 観光客情報と訪問記録フォーム

use leptos::prelude::*;
use tourist_admin_common::{KycStatus, WorkflowState};

#[component]
pub fn TouristCard<F>(
    state: ReadSignal<WorkflowState>,
    set_state: WriteSignal<WorkflowState>,
    on_submit: F,
) -> impl IntoView
where
    F: Fn(()) + 'static + Send,
{
    let tourist = Memo::new(move |_| state.with(|s| s.tourist.clone()));

    view! {
        <div class="tourist-card">
            {move || tourist.get().map(|t| {
                let verified = t.kyc_status() == KycStatus::Verified;
                view! {
                    <div class="tourist-info">
                        <h3>"Tourist Information"</h3>
                        <p><span class="label">"Wallet Address: "</span>{t.wallet_address.clone()}</p>
                        <p><span class="label">"Member Since: "</span>{t.member_since()}</p>
                        <Show when=move || verified>
                            <p><span class="label">"KYC Status: "</span>"Verified"</p>
                        </Show>
                    </div>
                }
            })}

            <div class="form-group">
                <label for="location">"Location *"</label>
                <input
                    type="text"
                    id="location"
                    placeholder="Enter visit location"
                    prop:value=move || state.with(|s| s.location.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        set_state.update(|s| s.set_location(value));
                    }
                />
            </div>

            <div class="form-group">
                <label for="notes">"Notes"</label>
                <textarea
                    id="notes"
                    rows="3"
                    placeholder="Additional notes about the visit"
                    prop:value=move || state.with(|s| s.notes.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        set_state.update(|s| s.set_notes(value));
                    }
                />
            </div>

            <button
                class="btn btn-primary btn-block"
                disabled=move || !state.with(|s| s.can_submit())
                on:click=move |_| on_submit(())
            >
                {move || state.with(|s| s.submit_label())}
            </button>
        </div>
    }
}
