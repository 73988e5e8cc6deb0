//! エラー/成功バナー

use leptos::prelude::*;
use tourist_admin_common::WorkflowState;

/// パネルとは独立して、メッセージがあるときだけ表示
#[component]
pub fn StatusBanners(state: ReadSignal<WorkflowState>) -> impl IntoView {
    view! {
        <For
            each=move || state.with(|s| s.banners())
            key=|banner| (banner.css_class(), banner.message().to_string())
            children=move |banner| {
                view! {
                    <div class=banner.css_class()>
                        <span>{banner.message().to_string()}</span>
                    </div>
                }
            }
        />
    }
}
