//! 命令输出与终端输入

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::cli::GlobalFlags;

/// `--json` 时输出 JSON，否则交给文本渲染
pub fn output<T: Serialize + ?Sized>(value: &T, flags: &GlobalFlags, text: impl FnOnce(&T)) -> Result<()> {
    if flags.json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        text(value);
    }
    Ok(())
}

pub fn fmt_time(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// 按行读取标准输入
pub struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// 输入结束时返回 None
    pub async fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        print!("{}", prompt);
        std::io::stdout().flush().context("刷新标准输出失败")?;
        let line = self.lines.next_line().await.context("读取标准输入失败")?;
        Ok(line.map(|l| l.trim().to_string()))
    }

    pub async fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let answer = self.read_line(&format!("{} [y/N] ", prompt)).await?;
        Ok(matches!(answer.as_deref(), Some("y") | Some("Y") | Some("yes")))
    }

    /// 参数 → CAREERPATH_PASSWORD → 标准输入
    pub async fn password(&mut self, explicit: Option<&str>) -> Result<String> {
        if let Some(password) = explicit {
            return Ok(password.to_string());
        }
        if let Ok(password) = std::env::var("CAREERPATH_PASSWORD") {
            return Ok(password);
        }
        self.read_line("Password: ")
            .await?
            .context("没有读到密码")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn time_formats_or_dashes() {
        let t = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        assert_eq!(fmt_time(Some(t)), "2024-03-09 14:05");
        assert_eq!(fmt_time(None), "-");
    }
}
