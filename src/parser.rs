//! 地址解析器：串联信息提取、分词与省市区推断

use crate::data::AdministrativeTable;
use crate::extractor::extract_user_info;
use crate::region::ParsedAddress;
use crate::resolver::Resolver;
use crate::segmenter::segment;
use log::warn;
use once_cell::sync::Lazy;
use std::borrow::Cow;

/// 默认的未知值
pub const DEFAULT_UNKNOWN: &str = "未知";

/// 全局解析器实例
static GLOBAL_PARSER: Lazy<AddressParser> = Lazy::new(AddressParser::new);

/// 解析选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// 是否先提取姓名、电话、身份证号、邮编
    pub extract_user: bool,
    /// 无法确定时的填充值
    pub unknown: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            extract_user: true,
            unknown: DEFAULT_UNKNOWN.to_string(),
        }
    }
}

impl ParseOptions {
    /// 默认选项：提取用户信息，未知值为 "未知"
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置是否提取姓名、电话等信息
    pub fn extract_user(mut self, extract_user: bool) -> Self {
        self.extract_user = extract_user;
        self
    }

    /// 设置未知值
    pub fn unknown(mut self, unknown: impl Into<String>) -> Self {
        self.unknown = unknown.into();
        self
    }
}

/// 地址解析器
///
/// 持有一份行政区划表（默认使用内置数据）和解析选项，本身不可变，可在线程间共享。
pub struct AddressParser {
    table: Cow<'static, AdministrativeTable>,
    options: ParseOptions,
}

impl AddressParser {
    /// 使用内置数据创建解析器
    pub fn new() -> Self {
        Self {
            table: Cow::Borrowed(AdministrativeTable::builtin()),
            options: ParseOptions::default(),
        }
    }

    /// 使用自定义行政区划表
    ///
    /// 三级数据必须同时提供，任意一级为空时整体改用内置数据。
    pub fn with_table(table: AdministrativeTable) -> Self {
        let table = if table.is_empty() {
            warn!("custom division table has an empty level, falling back to builtin data");
            Cow::Borrowed(AdministrativeTable::builtin())
        } else {
            Cow::Owned(table)
        };
        Self {
            table,
            options: ParseOptions::default(),
        }
    }

    /// 替换解析选项
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// 获取全局解析器实例
    pub fn global() -> &'static AddressParser {
        &GLOBAL_PARSER
    }

    /// 当前使用的行政区划表
    pub fn table(&self) -> &AdministrativeTable {
        &self.table
    }

    /// 当前的解析选项
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// 解析地址字符串
    ///
    /// # 参数
    /// * `text` - 待解析的文本，可以混有姓名、电话等信息
    ///
    /// # 返回
    /// 解析结果；无法确定的省市区为未知值，不会失败
    ///
    /// # 示例
    /// ```rust
    /// use cnaddr::AddressParser;
    ///
    /// let parser = AddressParser::new();
    /// let result = parser.parse("广东省深圳市南山区科技园路1号");
    /// assert_eq!(result.province, "广东省");
    /// assert_eq!(result.city, "深圳市");
    /// assert_eq!(result.region, "南山区");
    /// assert_eq!(result.street, "科技园路1号");
    /// ```
    pub fn parse(&self, text: &str) -> ParsedAddress {
        let mut result = ParsedAddress::default();

        let addr = if self.options.extract_user {
            let info = extract_user_info(text);
            result.name = info.name;
            result.mobile = info.mobile;
            result.idn = info.idn;
            result.postcode = info.postcode;
            info.addr
        } else {
            text.to_string()
        };

        let tokens = segment(&addr);
        let resolved = Resolver::new(&self.table, &self.options.unknown)
            .resolve(&tokens.city_token, &tokens.region_token);

        result.street = strip_names(
            &tokens.street_remainder,
            [&resolved.region, &resolved.city, &resolved.province],
            &self.options.unknown,
        );
        result.province = resolved.province;
        result.city = resolved.city;
        result.region = resolved.region;
        result
    }

    /// 批量解析地址
    pub fn parse_batch(&self, texts: &[&str]) -> Vec<ParsedAddress> {
        texts.iter().map(|t| self.parse(t)).collect()
    }
}

impl Default for AddressParser {
    fn default() -> Self {
        Self::new()
    }
}

/// 从街道部分删去已解析出的区、市、省名称
///
/// 空值和未知值不是解析出的名称，原样保留在街道中。
fn strip_names(street: &str, names: [&String; 3], unknown: &str) -> String {
    names
        .iter()
        .filter(|name| !name.is_empty() && name.as_str() != unknown)
        .fold(street.to_string(), |acc, name| acc.replace(name.as_str(), ""))
        .trim()
        .to_string()
}
