//! # cnaddr - 中国收货地址智能解析
//!
//! 从自由格式的收货信息中提取姓名、电话、身份证号、邮编，并解析出省、市、区县和街道。
//!
//! ## 功能特性
//!
//! - 按 "市"、"区"、"县"、"旗"、"盟"、"州" 等关键字位置切分地址，不要求固定格式
//! - 用三级行政区划表做包含匹配，同名区县结合城市、省份消歧
//! - 匹配不到时确定性地回退到未知值或原始候选词，从不报错
//! - 内置行政区划数据，也可以传入自定义的三级数据
//!
//! ## 快速开始
//!
//! ```rust
//! use cnaddr::AddressParser;
//!
//! let parser = AddressParser::new();
//!
//! let result = parser.parse("张三 13800138000 北京市朝阳区建国路1号");
//! assert_eq!(result.name, "张三");
//! assert_eq!(result.mobile, "13800138000");
//! assert_eq!(result.province, "北京市");
//! assert_eq!(result.city, "北京市");
//! assert_eq!(result.region, "朝阳区");
//! assert_eq!(result.street, "建国路1号");
//!
//! // 同名区县按城市区分
//! let result = parser.parse("吉林省长春市朝阳区人民大街100号");
//! assert_eq!(result.province, "吉林省");
//! assert_eq!(result.city, "长春市");
//! ```

mod data;
mod error;
mod extractor;
mod parser;
mod region;
mod resolver;
mod segmenter;

pub use data::AdministrativeTable;
pub use error::ParseError;
pub use extractor::{extract_user_info, UserInfo};
pub use parser::{AddressParser, ParseOptions, DEFAULT_UNKNOWN};
pub use region::{AdministrativeUnit, Level, ParsedAddress, ResolvedRegion};
pub use resolver::Resolver;
pub use segmenter::{normalize, segment, CandidateTokens};

/// 便捷函数：使用全局解析器解析地址
///
/// ```rust
/// let result = cnaddr::parse("上海市浦东新区陆家嘴环路1000号");
/// assert_eq!(result.province, "上海市");
/// assert_eq!(result.region, "浦东新区");
/// ```
pub fn parse(text: &str) -> ParsedAddress {
    AddressParser::global().parse(text)
}

/// 便捷函数：使用内置数据和指定选项解析地址
///
/// ```rust
/// use cnaddr::ParseOptions;
///
/// let options = ParseOptions::new().extract_user(false).unknown("-");
/// let result = cnaddr::parse_with("某某路123号", &options);
/// assert_eq!(result.province, "-");
/// assert_eq!(result.street, "某某路123号");
/// ```
pub fn parse_with(text: &str, options: &ParseOptions) -> ParsedAddress {
    AddressParser::new().with_options(options.clone()).parse(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_parse() {
        let r = crate::parse("广东省深圳市南山区科技园路1号");
        assert_eq!(r.province, "广东省");
        assert_eq!(r.city, "深圳市");
        assert_eq!(r.region, "南山区");
    }

    #[test]
    fn test_parse_with_options() {
        let options = ParseOptions::new().unknown("N/A");
        let r = parse_with("", &options);
        assert_eq!(r.province, "N/A");
        assert_eq!(r.city, "N/A");
        assert_eq!(r.region, "N/A");
    }

    #[test]
    fn test_pipeline_pieces_agree() {
        let text = "广东省深圳市南山区科技园路1号";
        let tokens = segment(text);
        let resolved = Resolver::new(AdministrativeTable::builtin(), DEFAULT_UNKNOWN)
            .resolve(&tokens.city_token, &tokens.region_token);
        let parsed = parse(text);
        assert_eq!(resolved.province, parsed.province);
        assert_eq!(resolved.city, parsed.city);
        assert_eq!(resolved.region, parsed.region);
    }
}
