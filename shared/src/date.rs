//! 时间展示模块
//!
//! 服务端返回的会议时间是 ISO 8601 字符串，可能带时区（RFC 3339），
//! 也可能是不带时区的本地时间。这里统一格式化为 `YYYY-MM-DD HH:MM`。

use chrono::{DateTime, NaiveDateTime};

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// 解析服务端时间字符串
///
/// 返回 None 如果两种格式都无法解析
pub fn parse_server_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    raw.parse::<NaiveDateTime>().ok()
}

/// 格式化用于展示
///
/// 无法解析时原样返回，缺失时返回 `-`。
pub fn display_time(raw: Option<&str>) -> String {
    match raw {
        None => "-".to_string(),
        Some(s) => parse_server_time(s)
            .map(|dt| dt.format(DISPLAY_FORMAT).to_string())
            .unwrap_or_else(|| s.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_naive_timestamp() {
        assert_eq!(
            display_time(Some("2021-03-01T10:30:00")),
            "2021-03-01 10:30"
        );
    }

    #[test]
    fn keeps_offset_wall_clock() {
        assert_eq!(
            display_time(Some("2021-03-01T10:30:00+02:00")),
            "2021-03-01 10:30"
        );
    }

    #[test]
    fn falls_back_to_raw_or_dash() {
        assert_eq!(display_time(Some("tomorrow")), "tomorrow");
        assert_eq!(display_time(None), "-");
    }
}
