//! QRキャプチャのゲート
//!
//! カメラ（または stdin）から届くデコード結果を受け取り、
//! `"tourist:"` で始まる最初の1件だけをワークフローへ渡す。
//! 送信側は oneshot の Sender を共有スロットから取り出して送るため、
//! 同一セッションで2件目以降が処理されることは構造上ない。

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use futures::channel::oneshot;

/// 観光客QRコードの接頭辞
pub const TOURIST_PREFIX: &str = "tourist:";

/// 観光客QRコードかどうか
pub fn is_qualifying(payload: &str) -> bool {
    payload.starts_with(TOURIST_PREFIX)
}

/// デコード結果を渡した結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
    /// フレームにコードなし
    Empty,
    /// 観光客コードではない（エラー扱いしない）
    Ignored,
    /// 受理してセッション終了
    Accepted,
    /// 受理済みまたは停止済み
    Closed,
}

type Slot = Arc<Mutex<Option<oneshot::Sender<String>>>>;

/// デコード結果の送信側（デバイスのコールバックに渡す）
#[derive(Debug, Clone)]
pub struct CaptureSink {
    slot: Slot,
}

/// 受理されたペイロードの受信側
///
/// 受理されれば `Some(payload)`、手動停止なら `None` で完了する
#[derive(Debug)]
pub struct CaptureReceiver {
    rx: oneshot::Receiver<String>,
}

/// キャプチャセッションを1つ作る
pub fn capture_channel() -> (CaptureSink, CaptureReceiver) {
    let (tx, rx) = oneshot::channel();
    (
        CaptureSink { slot: Arc::new(Mutex::new(Some(tx))) },
        CaptureReceiver { rx },
    )
}

impl CaptureSink {
    fn take_sender(&self) -> Option<oneshot::Sender<String>> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner()).take()
    }

    /// デコード1回分の結果を渡す
    pub fn offer(&self, decoded: Option<&str>) -> Offer {
        let Some(payload) = decoded else {
            return Offer::Empty;
        };
        if !self.is_open() {
            return Offer::Closed;
        }
        if !is_qualifying(payload) {
            return Offer::Ignored;
        }

        match self.take_sender() {
            // 受信側が先に破棄されていても、セッションは閉じる
            Some(tx) => match tx.send(payload.to_string()) {
                Ok(()) => Offer::Accepted,
                Err(_) => Offer::Closed,
            },
            None => Offer::Closed,
        }
    }

    /// 手動停止
    pub fn stop(&self) {
        if self.take_sender().is_some() {
            tracing::debug!("capture stopped before a code was read");
        }
    }

    /// デバイスエラーはログのみ（画面にもワークフローにも渡さない）
    pub fn report_error(&self, message: &str) {
        tracing::warn!(error = message, "QR scanner error");
    }

    pub fn is_open(&self) -> bool {
        self.slot.lock().unwrap_or_else(|e| e.into_inner()).is_some()
    }
}

impl Future for CaptureReceiver {
    type Output = Option<String>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx).poll(cx).map(|r| r.ok())
    }
}
