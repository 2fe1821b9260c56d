pub mod time;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 证券代码最大长度
pub const MAX_CODE_LEN: usize = 12;

/// # Summary
/// 证券代码，代表系统关注的特定股票或指数。
///
/// # Invariants
/// - 非空，长度不超过 `MAX_CODE_LEN`。
/// - 只包含 ASCII 字母、数字与 `.` (例如: 600519, 000001.SZ, AAPL)。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StockCode(String);

impl StockCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for StockCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if code.is_empty() {
            return Err("Stock code is empty".to_string());
        }
        if code.len() > MAX_CODE_LEN {
            return Err(format!("Stock code too long: {}", code));
        }
        if !code.chars().all(|c| c.is_ascii_alphanumeric() || c == '.') {
            return Err(format!("Invalid stock code: {}", code));
        }
        Ok(StockCode(code.to_ascii_uppercase()))
    }
}

impl TryFrom<String> for StockCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StockCode> for String {
    fn from(code: StockCode) -> Self {
        code.0
    }
}

impl std::fmt::Display for StockCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stock_code() {
        assert_eq!("600519".parse::<StockCode>().map(|c| c.to_string()), Ok("600519".to_string()));
        assert_eq!(
            " 000001.sz ".parse::<StockCode>().map(|c| c.to_string()),
            Ok("000001.SZ".to_string())
        );
        assert!("".parse::<StockCode>().is_err());
        assert!("60/0519".parse::<StockCode>().is_err());
        assert!("ABCDEFGHIJKLM".parse::<StockCode>().is_err());
    }
}
