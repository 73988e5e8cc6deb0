//! 対話式の訪問記録フォーム

use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::Duration;
use tourist_admin_common::{AdminApi, Phase, WorkflowController};

use crate::error::{Result, TouristAdminError};
use crate::render::{render_banners, render_tourist};

/// 確認画面での操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewAction {
    /// 入力内容で記録
    Submit,
    /// 場所・メモを入力し直す
    Edit,
    /// 破棄して次のスキャンへ
    Rescan,
    /// 破棄して終了
    Quit,
}

/// 操作入力の解釈
pub fn parse_review_action(input: &str) -> ReviewAction {
    match input.trim() {
        "" | "y" | "Y" => ReviewAction::Submit,
        "e" | "E" => ReviewAction::Edit,
        "r" | "R" => ReviewAction::Rescan,
        "q" | "Q" => ReviewAction::Quit,
        _ => ReviewAction::Edit,
    }
}

/// 通信中のスピナー
pub async fn with_spinner<F: Future>(message: &str, fut: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    let output = fut.await;
    spinner.finish_and_clear();
    output
}

fn prompt_text(prompt: &str, initial: &str) -> Result<String> {
    Input::<String>::new()
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| TouristAdminError::Prompt(e.to_string()))
}

/// 確認中の観光客について訪問を記録する
///
/// 送信失敗時は入力内容を残したまま再入力・再送できる
pub async fn run_review<A: AdminApi>(controller: &mut WorkflowController<A>) -> Result<ReviewAction> {
    let Some(tourist) = controller.state().tourist.clone() else {
        return Ok(ReviewAction::Rescan);
    };
    println!("\n{}\n", render_tourist(&tourist));

    let mut action = ReviewAction::Edit;
    while controller.state().phase == Phase::Reviewing {
        if action == ReviewAction::Edit {
            let location = prompt_text("Location *", &controller.state().location)?;
            controller.set_location(location);
            let notes = prompt_text("Notes", &controller.state().notes)?;
            controller.set_notes(notes);
        }

        let input = prompt_text("Record visit? [Enter/y] record  [e] edit  [r] rescan  [q] quit", "")?;
        action = parse_review_action(&input);
        match action {
            ReviewAction::Submit => {
                with_spinner("Recording...", controller.submit()).await;
                for line in render_banners(controller.state()) {
                    println!("{}", line);
                }
                // 失敗時はフォームを入力し直す
                action = ReviewAction::Edit;
            }
            ReviewAction::Edit => {}
            ReviewAction::Rescan | ReviewAction::Quit => {
                controller.cancel_review();
                return Ok(action);
            }
        }
    }

    Ok(ReviewAction::Submit)
}
