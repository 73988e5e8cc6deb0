//! API連携

pub mod admin;

pub use admin::FetchAdminApi;
