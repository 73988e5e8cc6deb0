//! 訪問履歴リスト

use leptos::prelude::*;
use tourist_admin_common::{VisitHistory, VisitRecord};

#[component]
pub fn VisitList(history: ReadSignal<VisitHistory>) -> impl IntoView {
    view! {
        <div class="visit-panel">
            <h2>"Recent Visits"</h2>
            <Show
                when=move || history.with(|h| !h.is_empty())
                fallback=|| view! { <p class="text-muted text-center">"No visits recorded yet"</p> }
            >
                <div class="visit-list">
                    <For
                        each=move || history.with(|h| h.visits().to_vec())
                        key=|visit| visit.id.clone()
                        children=move |visit| view! { <VisitItem visit=visit /> }
                    />
                </div>
            </Show>
        </div>
    }
}

#[component]
fn VisitItem(visit: VisitRecord) -> impl IntoView {
    let notes = visit.has_notes().then(|| visit.notes.clone());

    view! {
        <div class="visit-item">
            <div class="visit-header">
                <div>
                    <p class="visit-location">{visit.location.clone()}</p>
                    <p class="visit-wallet">{visit.user.short_wallet()}</p>
                </div>
                <span class="visit-date">{visit.visited_on()}</span>
            </div>
            {notes.map(|n| view! { <p class="visit-notes">{n}</p> })}
        </div>
    }
}
