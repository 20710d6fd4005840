use crate::domain::port::{LogLevel, Logger};
use chrono::{DateTime, Utc};

/// ログエントリ
/// 構造化ログの基本構造を定義
/// アダプター層の実装詳細として配置
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub component: String,
    pub message: String,
}

impl LogEntry {
    /// 新しいログエントリを作成
    pub fn new(level: LogLevel, component: String, message: String) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            component,
            message,
        }
    }

    /// ログエントリを文字列として出力
    pub fn format(&self) -> String {
        format!(
            "[{}] [{}] [{}] {}",
            self.timestamp.format("%Y-%m-%dT%H:%M:%S%.3fZ"),
            self.level.as_str(),
            self.component,
            self.message
        )
    }
}

/// コンソールロガー
/// ログエントリを整形して標準出力に書き出す
#[derive(Debug, Clone, Default)]
pub struct ConsoleLogger;

impl ConsoleLogger {
    /// 新しいコンソールロガーを作成
    pub fn new() -> Self {
        Self
    }

    fn write(&self, level: LogLevel, component: &str, message: &str) {
        let entry = LogEntry::new(level, component.to_string(), message.to_string());
        println!("{}", entry.format());
    }
}

impl Logger for ConsoleLogger {
    fn info(&self, component: &str, message: &str) {
        self.write(LogLevel::Info, component, message);
    }

    fn warn(&self, component: &str, message: &str) {
        self.write(LogLevel::Warning, component, message);
    }

    fn error(&self, component: &str, message: &str) {
        self.write(LogLevel::Error, component, message);
    }
}
