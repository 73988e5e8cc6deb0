//! QRスキャナパネル
//!
//! 表示中だけカメラを動かす。非表示になった時点で停止する。

use leptos::html::Video;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tourist_admin_common::CaptureSink;

use crate::scanner::{self, ScannerHandle};

#[component]
pub fn ScannerPanel<F>(sink: CaptureSink, on_stop: F) -> impl IntoView
where
    F: Fn(()) + 'static + Send,
{
    let video_ref = NodeRef::<Video>::new();
    let handle = StoredValue::new_local(None::<ScannerHandle>);

    Effect::new(move |_| {
        let Some(video) = video_ref.get() else {
            return;
        };
        let sink = sink.clone();
        spawn_local(async move {
            match scanner::start(video, sink).await {
                Ok(started) => {
                    let mut pending = Some(started);
                    handle.try_update_value(|slot| *slot = pending.take());
                    // パネルが先に閉じられていた場合はここで止まる（drop）
                    drop(pending);
                }
                Err(e) => gloo::console::error!(format!("QR Scanner error: {}", e)),
            }
        });
    });

    on_cleanup(move || {
        handle.try_update_value(|slot| {
            slot.take();
        });
    });

    view! {
        <div class="scanner-panel">
            <video node_ref=video_ref class="scanner-video" autoplay=true playsinline=true muted=true />
            <button class="btn btn-secondary btn-block" on:click=move |_| on_stop(())>
                "Stop Scanning"
            </button>
        </div>
    }
}
