use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tourist-admin")]
#[command(about = "Scan tourist QR codes and record visits", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 管理者としてログイン状態を保存
    Login {
        /// 管理者ID
        #[arg(long, required = true)]
        admin_id: String,
    },

    /// ログイン状態を削除
    Logout,

    /// 最近の訪問履歴を表示
    Visits,

    /// QRコードをスキャンして訪問を記録
    Scan {
        /// デコード済みのQR文字列（省略時は標準入力から1行ずつ読む）
        payload: Option<String>,

        /// 記録後も続けてスキャンする
        #[arg(short, long)]
        continuous: bool,
    },

    /// 観光客IDを指定して直接記録
    Record {
        /// 観光客ID
        #[arg(long, required = true)]
        user_id: String,

        /// 訪問場所
        #[arg(short, long, required = true)]
        location: String,

        /// メモ
        #[arg(short, long, default_value = "")]
        notes: String,
    },

    /// 設定の表示・変更
    Config {
        /// APIのベースURLを設定
        #[arg(long)]
        set_base_url: Option<String>,

        /// リクエストタイムアウト秒（0で無期限）
        #[arg(long)]
        set_timeout: Option<u64>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scan_with_payload() {
        let cli = Cli::try_parse_from(["tourist-admin", "scan", "tourist:abc123"]).unwrap();
        match cli.command {
            Commands::Scan { payload, continuous } => {
                assert_eq!(payload.as_deref(), Some("tourist:abc123"));
                assert!(!continuous);
            }
            _ => panic!("expected scan"),
        }
    }

    #[test]
    fn test_parse_record_requires_location() {
        assert!(Cli::try_parse_from(["tourist-admin", "record", "--user-id", "abc"]).is_err());

        let cli = Cli::try_parse_from([
            "tourist-admin", "-v", "record", "--user-id", "abc", "-l", "Gate 3",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Record { ref notes, .. } if notes.is_empty()));
    }
}
