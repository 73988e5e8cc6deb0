//! カメラQRスキャナ（JavaScript Bridge）
//!
//! getUserMedia + BarcodeDetector を js/qr-scanner.js 側で動かし、
//! デコード1回ごとに `CaptureSink::offer` へ渡す。

use wasm_bindgen::prelude::*;
use web_sys::HtmlVideoElement;

use tourist_admin_common::{CaptureSink, Offer};

/// デコード間隔（ミリ秒）
pub const SCAN_INTERVAL_MS: u32 = 300;

#[wasm_bindgen(module = "/js/qr-scanner.js")]
extern "C" {
    #[wasm_bindgen(js_name = "startScanner", catch)]
    async fn start_scanner_js(
        video: &HtmlVideoElement,
        interval_ms: u32,
        on_decode: &Closure<dyn FnMut(JsValue) -> bool>,
        on_error: &Closure<dyn FnMut(JsValue)>,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = "stopScanner")]
    fn stop_scanner_js(video: &HtmlVideoElement);
}

/// 起動中のスキャナ。停止するまでコールバックを保持する
pub struct ScannerHandle {
    video: HtmlVideoElement,
    _on_decode: Closure<dyn FnMut(JsValue) -> bool>,
    _on_error: Closure<dyn FnMut(JsValue)>,
}

impl ScannerHandle {
    pub fn stop(&self) {
        stop_scanner_js(&self.video);
    }
}

impl Drop for ScannerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// カメラを起動してデコードを開始
pub async fn start(video: HtmlVideoElement, sink: CaptureSink) -> Result<ScannerHandle, String> {
    let decode_sink = sink.clone();
    let on_decode = Closure::wrap(Box::new(move |value: JsValue| {
        // false を返すとJS側のループが止まる
        match decode_sink.offer(value.as_string().as_deref()) {
            Offer::Empty | Offer::Ignored => true,
            Offer::Accepted | Offer::Closed => false,
        }
    }) as Box<dyn FnMut(JsValue) -> bool>);

    let on_error = Closure::wrap(Box::new(move |err: JsValue| {
        let message = err
            .dyn_ref::<js_sys::Error>()
            .map(|e| String::from(e.message()))
            .or_else(|| err.as_string())
            .unwrap_or_else(|| format!("{:?}", err));
        gloo::console::error!(format!("QR Scanner error: {}", message));
        sink.report_error(&message);
    }) as Box<dyn FnMut(JsValue)>);

    start_scanner_js(&video, SCAN_INTERVAL_MS, &on_decode, &on_error)
        .await
        .map_err(|e| format!("camera start failed: {:?}", e))?;

    Ok(ScannerHandle {
        video,
        _on_decode: on_decode,
        _on_error: on_error,
    })
}
