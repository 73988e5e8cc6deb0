//! メインアプリケーションコンポーネント

use leptos::prelude::*;
use leptos::task::spawn_local;
use tourist_admin_common::session::{self, LOGIN_PATH, ROOT_PATH};
use tourist_admin_common::{
    capture_channel, workflow, AdminApi, AdminSession, CaptureSink, ClientConfig, MainPanel,
    VisitHistory, WorkflowState,
};

use crate::api::FetchAdminApi;
use crate::components::{
    header::Header,
    scanner_panel::ScannerPanel,
    status_banner::StatusBanners,
    tourist_card::TouristCard,
    visit_list::VisitList,
};
use crate::session_store::{redirect, LocalSessionStore};

/// ダッシュボードの状態一式
#[derive(Clone, Copy)]
struct Dashboard {
    state: RwSignal<WorkflowState>,
    history: RwSignal<VisitHistory>,
    sink: RwSignal<Option<CaptureSink>>,
    api: StoredValue<FetchAdminApi>,
}

impl Dashboard {
    fn new(api: FetchAdminApi) -> Self {
        Self {
            state: RwSignal::new(WorkflowState::new()),
            history: RwSignal::new(VisitHistory::new()),
            sink: RwSignal::new(None),
            api: StoredValue::new(api),
        }
    }

    /// 訪問履歴の読み込み（失敗はコンソールのみ）
    fn load_visits(self) {
        let api = self.api.get_value();
        spawn_local(async move {
            let result = api.fetch_visits().await;
            self.history.update(|h| {
                if let Some(e) = h.apply(result) {
                    gloo::console::error!(format!("Failed to fetch visits: {}", e));
                }
            });
        });
    }

    fn start_scanning(self) {
        // パネル切替より先に送信側を用意しておく
        let (sink, rx) = capture_channel();
        self.sink.set(Some(sink));

        let mut started = false;
        self.state.update(|s| started = s.start());
        if !started {
            self.sink.set(None);
            return;
        }

        spawn_local(async move {
            let payload = rx.await;
            self.sink.set(None);
            match payload {
                Some(payload) => {
                    let mut effect = None;
                    self.state.update(|s| effect = s.accept_payload(&payload));
                    self.run(effect);
                }
                None => {
                    self.state.update(|s| {
                        s.stop();
                    });
                }
            }
        });
    }

    /// 手動停止（受信側が None で完了し、状態が Idle に戻る）
    fn stop_scanning(self) {
        self.sink.with_untracked(|sink| {
            if let Some(sink) = sink {
                sink.stop();
            }
        });
    }

    fn submit(self) {
        let mut effect = None;
        self.state.update(|s| effect = s.submit());
        self.run(effect);
    }

    /// 状態遷移が返した処理を実行して結果を戻す
    fn run(self, effect: Option<workflow::Effect>) {
        let Some(effect) = effect else {
            return;
        };
        let api = self.api.get_value();
        spawn_local(async move {
            let mut next = Some(effect);
            while let Some(current) = next.take() {
                next = match current {
                    workflow::Effect::ResolveCode(code) => {
                        let result = api.resolve_code(&code).await;
                        self.state.update(|s| match result {
                            Ok(tourist) => s.lookup_succeeded(tourist),
                            Err(e) => s.lookup_failed(&e),
                        });
                        None
                    }
                    workflow::Effect::RecordVisit(request) => {
                        let result = api.record_visit(&request).await;
                        let mut follow_up = None;
                        self.state.update(|s| match result {
                            Ok(()) => follow_up = s.submit_succeeded(),
                            Err(e) => s.submit_failed(&e),
                        });
                        follow_up
                    }
                    workflow::Effect::ReloadVisits => {
                        self.load_visits();
                        None
                    }
                };
            }
        });
    }
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    // 初回表示時のみセッションを確認する
    let session = match AdminSession::validate(&LocalSessionStore) {
        Ok(session) => session,
        Err(e) => {
            gloo::console::warn!(format!("redirecting to login: {}", e));
            redirect(LOGIN_PATH);
            return view! { <p class="text-muted">"Redirecting..."</p> }.into_any();
        }
    };
    gloo::console::log!(format!("admin session: {}", session.admin_id));

    let dashboard = Dashboard::new(FetchAdminApi::new(ClientConfig::default()));
    dashboard.load_visits();

    let on_logout = move |_| {
        session::logout(&LocalSessionStore);
        redirect(ROOT_PATH);
    };

    let panel = Memo::new(move |_| dashboard.state.with(|s| s.panel()));
    let (state, set_state) = dashboard.state.split();

    view! {
        <main class="container">
            <Header on_logout=on_logout />

            <div class="dashboard-grid">
                <section class="scanner-section">
                    <h2>"QR Code Scanner"</h2>

                    {move || match panel.get() {
                        MainPanel::StartButton => view! {
                            <div class="text-center">
                                <button
                                    class="btn btn-primary"
                                    disabled=move || state.with(|s| s.pending_hint().is_some())
                                    on:click=move |_| dashboard.start_scanning()
                                >
                                    "Start Scanning"
                                </button>
                                <p class="text-muted">
                                    {move || state.with(|s| s.pending_hint().unwrap_or_default())}
                                </p>
                            </div>
                        }.into_any(),
                        MainPanel::Scanner => {
                            dashboard.sink.get_untracked().map(|sink| view! {
                                <ScannerPanel
                                    sink=sink
                                    on_stop=move |_| dashboard.stop_scanning()
                                />
                            }).into_any()
                        }
                        MainPanel::Review => view! {
                            <TouristCard
                                state=state
                                set_state=set_state
                                on_submit=move |_| dashboard.submit()
                            />
                        }.into_any(),
                    }}

                    <StatusBanners state=state />
                </section>

                <section class="visits-section">
                    <VisitList history=dashboard.history.read_only() />
                </section>
            </div>
        </main>
    }
    .into_any()
}
