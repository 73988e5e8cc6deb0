//! Tourist Admin Common Library
//!
//! CLIとWeb(WASM)で共有される型・セッション検証・スキャン→訪問記録ワークフロー

pub mod types;
pub mod api;
pub mod error;
pub mod config;
pub mod session;
pub mod history;
pub mod capture;
pub mod workflow;
pub mod view;
pub mod controller;

pub use types::{KycStatus, TouristRecord, VisitRecord};
pub use api::{
    decode_response, AdminApi, RecordVisitRequest, RecordVisitResponse, ScanQrRequest,
    ScanQrResponse, VisitsResponse, RECORD_VISIT_PATH, SCAN_QR_PATH, VISITS_PATH,
};
pub use error::{ApiError, AuthError, Error, Result};
pub use config::ClientConfig;
pub use session::{AdminSession, MemorySessionStore, SessionStore};
pub use history::VisitHistory;
pub use capture::{capture_channel, CaptureReceiver, CaptureSink, Offer, TOURIST_PREFIX};
pub use workflow::{Effect, Phase, WorkflowState};
pub use view::{Banner, MainPanel};
pub use controller::WorkflowController;
