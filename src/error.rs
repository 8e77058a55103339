//! 错误类型定义

use thiserror::Error;

/// 行政区划数据加载错误
///
/// 地址解析本身不会失败，只有加载参考数据时才可能返回错误。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// 数据加载失败
    #[error("Failed to load region data: {0}")]
    DataLoadError(String),

    /// 数据文件结构无效
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}

impl ParseError {
    pub(crate) fn at_line(line: usize, reason: impl AsRef<str>) -> Self {
        ParseError::DataLoadError(format!("line {}: {}", line, reason.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParseError::at_line(3, "unknown level '9'");
        assert_eq!(
            err.to_string(),
            "Failed to load region data: line 3: unknown level '9'"
        );
    }
}
