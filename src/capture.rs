//! 入力行をQRデコード結果として扱うキャプチャ
//!
//! キーボード入力型のスキャナは1コードを1行として送ってくる。
//! 空行は「フレームにコードなし」、EOFは手動停止。

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tourist_admin_common::{CaptureSink, Offer};

/// 受理または入力終了まで行を渡し続ける
///
/// 読み残した行は `reader` に残るので、次のセッションで続きから読める
pub async fn feed_lines<R>(reader: &mut R, sink: &CaptureSink) -> std::io::Result<Offer>
where
    R: AsyncBufRead + Unpin + ?Sized,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let decoded = (!line.is_empty()).then_some(line);
        match sink.offer(decoded) {
            Offer::Ignored => tracing::debug!(payload = line, "not a tourist code, ignored"),
            Offer::Empty => {}
            done @ (Offer::Accepted | Offer::Closed) => return Ok(done),
        }
    }
    sink.stop();
    Ok(Offer::Closed)
}
