use clap::Parser;
use tourist_admin::{capture, cli, client, config, error, logging, render, review, session_file};
use cli::{Cli, Commands};
use client::HttpAdminApi;
use config::Config;
use error::{Result, TouristAdminError};
use review::{with_spinner, ReviewAction};
use session_file::FileSessionStore;
use tourist_admin_common::error::RECORD_MESSAGES;
use tourist_admin_common::workflow::{build_visit_request, VISIT_RECORDED};
use tourist_admin_common::{AdminApi, AdminSession, Offer, Phase, WorkflowController};

/// 完了後に表示する履歴件数
const RECENT_VISITS_SHOWN: usize = 5;

const VISITS_UNAVAILABLE: &str = "Failed to fetch visits";

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("✗ {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    logging::init_logging(cli.verbose)?;
    let config = Config::load()?;

    match cli.command {
        Commands::Login { admin_id } => {
            let session = FileSessionStore::open_default()?.sign_in(&admin_id)?;
            println!("✔ Signed in as admin {}", session.admin_id);
        }

        Commands::Logout => {
            FileSessionStore::open_default()?.sign_out()?;
            println!("✔ Signed out");
        }

        Commands::Visits => {
            require_session()?;
            let api = HttpAdminApi::new(config.client_config())?;
            let visits = with_spinner("Loading visits...", api.fetch_visits())
                .await
                .map_err(|e| {
                    tracing::debug!(error = %e, "fetch visits failed");
                    TouristAdminError::Failed(VISITS_UNAVAILABLE.to_string())
                })?;
            println!("Recent Visits\n{}", render::render_visits(&visits));
        }

        Commands::Scan { payload, continuous } => {
            let session = require_session()?;
            tracing::info!(admin_id = %session.admin_id, "scan session started");
            run_scan(&config, payload, continuous).await?;
        }

        Commands::Record { user_id, location, notes } => {
            require_session()?;
            let request = build_visit_request(&user_id, &location, &notes)
                .ok_or(TouristAdminError::MissingLocation)?;

            let api = HttpAdminApi::new(config.client_config())?;
            with_spinner("Recording...", api.record_visit(&request))
                .await
                .map_err(|e| {
                    tracing::debug!(error = %e, "record visit failed");
                    TouristAdminError::Failed(e.user_message(RECORD_MESSAGES))
                })?;
            println!("✔ {}", VISIT_RECORDED);
        }

        Commands::Config { set_base_url, set_timeout, show } => {
            let mut config = config;
            let changed = set_base_url.is_some() || set_timeout.is_some();

            if let Some(url) = set_base_url {
                config.set_base_url(url)?;
            }
            if let Some(seconds) = set_timeout {
                config.timeout_seconds = seconds;
            }
            if changed {
                config.save()?;
                println!("✔ Config saved: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("Config:");
                println!("  Base URL: {}", config.effective_base_url());
                match config.timeout_seconds {
                    0 => println!("  Timeout:  none (wait forever)"),
                    s => println!("  Timeout:  {}s", s),
                }
            }
        }
    }

    Ok(())
}

/// 管理者セッションの確認（未ログインならここで終了）
fn require_session() -> Result<AdminSession> {
    let store = FileSessionStore::open_default()?;
    Ok(AdminSession::validate(&store)?)
}

/// スキャン→確認→記録を繰り返す
async fn run_scan(config: &Config, payload: Option<String>, continuous: bool) -> Result<()> {
    let api = HttpAdminApi::new(config.client_config())?;
    let mut controller = WorkflowController::new(api);
    with_spinner("Loading visits...", controller.mount()).await;

    let mut payload = payload;
    let mut stdin = tokio::io::BufReader::new(tokio::io::stdin());
    loop {
        let Some((sink, rx)) = controller.start_capture() else {
            break;
        };

        let offer = match payload.take() {
            Some(p) => {
                let offer = sink.offer(Some(&p));
                if offer != Offer::Accepted {
                    println!("Not a tourist QR code: {}", p);
                    sink.stop();
                }
                offer
            }
            None => {
                println!("Scan a tourist QR code (Ctrl-D to stop)...");
                capture::feed_lines(&mut stdin, &sink).await?
            }
        };

        with_spinner("Looking up tourist...", controller.run_capture(rx)).await;
        for line in render::render_banners(controller.state()) {
            println!("{}", line);
        }
        if offer != Offer::Accepted {
            break;
        }

        let action = match controller.state().phase {
            Phase::Reviewing => review::run_review(&mut controller).await?,
            // 照会失敗
            _ if continuous => ReviewAction::Rescan,
            _ => ReviewAction::Quit,
        };

        if action == ReviewAction::Submit {
            println!(
                "\nRecent Visits\n{}\n",
                render::render_visits(
                    &controller.history().visits()[..controller.history().len().min(RECENT_VISITS_SHOWN)]
                )
            );
        }

        match action {
            ReviewAction::Quit => break,
            ReviewAction::Rescan => continue,
            _ if !continuous => break,
            _ => {}
        }
    }

    Ok(())
}
