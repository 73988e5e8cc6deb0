//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header<F>(on_logout: F) -> impl IntoView
where
    F: Fn(()) + 'static + Send,
{
    view! {
        <header class="header">
            <div>
                <h1>"Admin Dashboard"</h1>
                <p class="text-muted">"Region Administration Panel"</p>
            </div>
            <button class="btn btn-danger" on:click=move |_| on_logout(())>
                "Logout"
            </button>
        </header>
    }
}
