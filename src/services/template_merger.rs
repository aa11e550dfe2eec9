//! 模板合并服务 - 业务能力层
//!
//! 纯函数：把 MES data 键值填入行式模板。
//!
//! 填充规则：
//! 1. 输出首行为当前时间戳（精确到百分之一秒）
//! 2. 模板行中第一个 "##" 之后的第一个 '=' 或 ':' 视为分隔符，
//!    两者之间去除空白后为键名
//! 3. 键存在于 data 时，保留分隔符（含）之前的内容并接上值
//! 4. 未被模板消费的键，逐行以 "##键=值" 形式补到末尾；
//!    模板最后一行恰为 "##" 时补在它之前，保持 "##" 为最终行
//!
//! 填充始终查不可变的 data 映射，同一个键出现在多个占位行时
//! 每行都会被填充；remaining_keys 只影响第 4 步的兜底补行。

use std::path::Path;

use chrono::{DateTime, Local, Timelike};
use serde_json::{Map, Value};
use tracing::warn;

use crate::models::value_to_display_string;

/// 读取模板文件并按行拆分
///
/// 模板文件不可用时视为空模板：最终输出退化为时间戳加全部键值。
pub async fn load_template_lines(template_path: &Path) -> Vec<String> {
    match tokio::fs::read_to_string(template_path).await {
        Ok(content) => content.lines().map(str::to_string).collect(),
        Err(e) => {
            warn!(
                "⚠️ 模板文件不可用 ({}): {}，按空模板处理",
                template_path.display(),
                e
            );
            Vec::new()
        }
    }
}

/// 将 data 键值合并进模板行
///
/// # 参数
/// - `template_lines`: 模板行（有无行尾换行符均可）
/// - `data`: MES data 键值映射（保持报文顺序）
///
/// # 返回
/// 返回最终输出行，每行以 \n 结尾
pub fn merge(template_lines: &[String], data: &Map<String, Value>) -> Vec<String> {
    let mut output = Vec::with_capacity(template_lines.len() + data.len() + 1);
    output.push(format!("{}\n", format_timestamp(&Local::now())));

    // 尚未被模板消费的键，决定兜底补行
    let mut remaining_keys: Vec<&String> = data.keys().collect();

    for line in template_lines {
        match try_fill_placeholder(line, data) {
            Some((filled, key)) => {
                remaining_keys.retain(|k| **k != key);
                output.push(filled);
            }
            None => output.push(format!("{}\n", trim_line_ending(line))),
        }
    }

    append_remaining(&mut output, &remaining_keys, data);
    output
}

/// 尝试按占位符规则填充一行
///
/// 取行内第一个 "##"，再取其后第一个 '=' 或 ':'（以先出现者为准，
/// 即使该分隔符属于行尾的自由文本）。键不在 data 中时按原样放行。
fn try_fill_placeholder(line: &str, data: &Map<String, Value>) -> Option<(String, String)> {
    let marker = line.find("##")?;
    let after_marker = marker + 2;
    let rest = &line[after_marker..];
    let sep_offset = rest.find(|c: char| c == '=' || c == ':')?;

    let key = rest[..sep_offset].trim().to_string();
    let value = data.get(&key)?;

    let sep_end = after_marker + sep_offset + 1;
    let filled = format!("{}{}\n", &line[..sep_end], value_to_display_string(value));
    Some((filled, key))
}

/// 把未被模板消费的键按 "##键=值" 补到输出末尾
///
/// 最后一行恰为 "##" 时先弹出，补完后再放回。
fn append_remaining(output: &mut Vec<String>, remaining_keys: &[&String], data: &Map<String, Value>) {
    if remaining_keys.is_empty() {
        return;
    }

    let trailing_marker = if output.last().map(|line| line.trim()) == Some("##") {
        output.pop()
    } else {
        None
    };

    for key in remaining_keys {
        if let Some(value) = data.get(*key) {
            output.push(format!("##{}={}\n", key, value_to_display_string(value)));
        }
    }

    if let Some(marker) = trailing_marker {
        output.push(marker);
    }
}

fn trim_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}

/// 报告首行时间戳，格式 YYYY-MM-DD HH:MM:SS.cc
fn format_timestamp(now: &DateTime<Local>) -> String {
    // chrono 没有两位小数秒的格式符，百分之一秒手动换算
    let centis = now.nanosecond() % 1_000_000_000 / 10_000_000;
    format!("{}.{:02}", now.format("%Y-%m-%d %H:%M:%S"), centis)
}
