//! ログ初期化

use crate::error::{Result, TouristAdminError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "tourist_admin=info,tourist_admin_common=info";
const VERBOSE_LOG_FILTER: &str = "tourist_admin=debug,tourist_admin_common=debug";

/// stderr への出力（RUST_LOG があればそれを優先）
pub fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_LOG_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose),
        )
        .with(filter)
        .try_init()
        .map_err(|e| TouristAdminError::Logging(e.to_string()))
}
