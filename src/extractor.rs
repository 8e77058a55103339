//! 从收货信息中提取姓名、电话、身份证号、邮编，剩余部分作为地址

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 常见字段标签，按顺序替换为空格
const LABEL_KEYWORDS: [&str; 20] = [
    "收货地址",
    "详细地址",
    "地址",
    "收货人",
    "收件人",
    "收货",
    "所在地区",
    "邮编",
    "电话",
    "手机号码",
    "身份证号码",
    "身份证号",
    "身份证",
    "：",
    ":",
    "；",
    ";",
    "，",
    ",",
    "。",
];

// 边界只看 ASCII 字母数字：汉字与数字相邻也算边界，"电话13800138000北京" 照样能取出号码。

/// 身份证号：17 位数字加校验位，或 18 位数字
static ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^0-9A-Za-z_])([0-9]{17}[0-9Xx])|([0-9]{18})(?:$|[^0-9A-Za-z_])").unwrap()
});

/// 手机号或座机（含分机号）
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:^|[^0-9A-Za-z_])([0-9]{7,11}[-_][0-9]{2,6})|([0-9]{3,4}-[0-9]{6,8})|([0-9]{7,11})(?:$|[^0-9A-Za-z_])",
    )
    .unwrap()
});

/// 六位邮编
static POSTCODE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[^0-9A-Za-z_])([0-9]{6})(?:$|[^0-9A-Za-z_])").unwrap());

/// 提取结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UserInfo {
    /// 姓名
    pub name: String,
    /// 手机号或座机
    pub mobile: String,
    /// 身份证号（校验位大写）
    pub idn: String,
    /// 邮编
    pub postcode: String,
    /// 剩余的地址文本
    pub addr: String,
}

/// 合并连续空白并去掉首尾空白
fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 取第一处匹配的捕获内容，并从文本中删除它的所有出现
fn take_first(regex: &Regex, text: &mut String) -> Option<String> {
    let found = regex
        .captures(text.as_str())
        .and_then(|caps| caps.iter().skip(1).flatten().next())
        .map(|m| m.as_str().to_string())?;
    *text = text.replace(&found, "");
    Some(found)
}

/// 提取用户信息
///
/// 顺序固定：身份证号、电话、邮编，最后把剩下的最短词当作姓名。
/// 不校验号码本身是否合法。
///
/// ```rust
/// let info = cnaddr::extract_user_info("收货人：张三 电话：13800138000 北京市朝阳区建国路1号");
/// assert_eq!(info.name, "张三");
/// assert_eq!(info.mobile, "13800138000");
/// assert_eq!(info.addr, "北京市朝阳区建国路1号");
/// ```
pub fn extract_user_info(raw: &str) -> UserInfo {
    let mut cleaned = LABEL_KEYWORDS
        .iter()
        .fold(raw.to_string(), |acc, kw| acc.replace(kw, " "));
    cleaned = collapse_whitespace(&cleaned);

    let mut info = UserInfo::default();

    if let Some(idn) = take_first(&ID_REGEX, &mut cleaned) {
        info.idn = idn.to_uppercase();
    }
    if let Some(mobile) = take_first(&PHONE_REGEX, &mut cleaned) {
        info.mobile = mobile;
    }
    if let Some(postcode) = take_first(&POSTCODE_REGEX, &mut cleaned) {
        info.postcode = postcode;
    }

    cleaned = collapse_whitespace(&cleaned);

    let parts: Vec<&str> = cleaned.split(' ').collect();
    if parts.len() > 1 {
        let name = parts
            .iter()
            .copied()
            .reduce(|shortest, part| {
                if part.chars().count() < shortest.chars().count() {
                    part
                } else {
                    shortest
                }
            })
            .unwrap_or_default()
            .to_string();
        cleaned = cleaned.replace(&name, "").trim().to_string();
        info.name = name;
    }

    info.addr = cleaned;
    debug!(
        "extracted user info: name={:?} mobile={:?} idn={:?} postcode={:?}",
        info.name, info.mobile, info.idn, info.postcode
    );
    info
}
