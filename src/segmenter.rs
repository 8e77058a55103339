//! 地址分词：从清洗后的地址中切出"市"级和"区县"级候选词
//!
//! 只依赖关键字位置，不查表。区县候选词与城市候选词各由一组有序规则产生，
//! 第一条命中的规则生效。

use log::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 归一化时按顺序执行的替换
const NORMALIZE_REPLACEMENTS: [(&str, &str); 6] = [
    (" ", ""),
    (",", ""),
    ("自治区", "省"),
    ("自治州", "州"),
    // 小区、校区中的"区"不是行政区划
    ("小区", ""),
    ("校区", ""),
];

/// 区县候选词规则（按优先级）
static REGION_RULES: [SegmentRule; 3] = [
    SegmentRule {
        marker: '旗',
        extract: banner_token,
    },
    SegmentRule {
        marker: '区',
        extract: district_token,
    },
    SegmentRule {
        marker: '县',
        extract: county_token,
    },
];

/// 城市候选词规则（按优先级）
static CITY_RULES: [SegmentRule; 3] = [
    SegmentRule {
        marker: '市',
        extract: city_token,
    },
    SegmentRule {
        marker: '盟',
        extract: city_token,
    },
    // 归一化后"自治州"已变为"州"，与"市"、"盟"同样取三个字
    SegmentRule {
        marker: '州',
        extract: city_token,
    },
];

/// 自治县名称前可能粘连的上级后缀
const COUNTY_PREFIX_SUFFIXES: [char; 3] = ['省', '市', '州'];

/// 分词结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CandidateTokens {
    /// 城市候选词
    pub city_token: String,
    /// 区县候选词
    pub region_token: String,
    /// 区县关键字之后的剩余地址
    pub street_remainder: String,
}

/// 一条分词规则：关键字存在时，用 `extract` 从关键字位置取出候选词
struct SegmentRule {
    marker: char,
    extract: fn(&Text, usize) -> String,
}

/// 按字符（而非字节）定位的文本
struct Text {
    chars: Vec<char>,
}

impl Text {
    fn new(s: &str) -> Self {
        Self {
            chars: s.chars().collect(),
        }
    }

    fn len(&self) -> usize {
        self.chars.len()
    }

    fn find(&self, marker: char) -> Option<usize> {
        self.chars.iter().position(|&c| c == marker)
    }

    fn rfind(&self, marker: char) -> Option<usize> {
        self.chars.iter().rposition(|&c| c == marker)
    }

    fn find_str(&self, needle: &str) -> Option<usize> {
        let needle: Vec<char> = needle.chars().collect();
        self.chars.windows(needle.len()).position(|w| w == needle.as_slice())
    }

    /// 以 `end` 结尾（含）、至多 `len` 个字符的片段，开头越界时截断
    fn window(&self, end: usize, len: usize) -> String {
        let start = (end + 1).saturating_sub(len);
        self.chars[start..=end].iter().collect()
    }

    fn range(&self, start: usize, end: usize) -> String {
        self.chars[start..=end].iter().collect()
    }

    /// `pos` 之后的全部字符
    fn tail(&self, pos: usize) -> String {
        self.chars[(pos + 1).min(self.len())..].iter().collect()
    }
}

/// 地址归一化：去空格逗号，自治区→省，自治州→州，去掉小区/校区
///
/// 每次替换都只会缩短字符串，反复执行直到不再变化，因此结果幂等。
///
/// ```rust
/// assert_eq!(cnaddr::normalize("广西壮族自治区 南宁市,青秀区"), "广西壮族省南宁市青秀区");
/// assert_eq!(cnaddr::normalize("幸福小区3栋"), "幸福3栋");
/// ```
pub fn normalize(address: &str) -> String {
    let mut current = address.to_string();
    loop {
        let next = NORMALIZE_REPLACEMENTS
            .iter()
            .fold(current.clone(), |acc, (from, to)| acc.replace(from, to));
        if next == current {
            return current;
        }
        current = next;
    }
}

/// 对地址进行分词
///
/// 位置在归一化后的文本上计算，剩余街道部分则按同一位置从原始文本截取。
pub fn segment(address: &str) -> CandidateTokens {
    let normalized = normalize(address);
    trace!("normalized address: {:?} -> {:?}", address, normalized);

    let text = Text::new(&normalized);
    let original = Text::new(address);

    let (region_token, street_remainder) = match region_rule_position(&text) {
        Some((rule, pos)) => ((rule.extract)(&text, pos), original.tail(pos)),
        None => match text.rfind('市').filter(|&pos| pos > 0) {
            Some(pos) => (text.window(pos, 3), original.tail(pos)),
            None => (String::new(), normalized.clone()),
        },
    };

    let city_token = CITY_RULES
        .iter()
        .find_map(|rule| {
            text.find(rule.marker)
                .filter(|&pos| pos > 0)
                .map(|pos| (rule.extract)(&text, pos))
        })
        .unwrap_or_default();

    debug!(
        "segmented {:?}: city={:?} region={:?} street={:?}",
        normalized, city_token, region_token, street_remainder
    );

    CandidateTokens {
        city_token,
        region_token,
        street_remainder,
    }
}

/// 区县关键字是否出现在前三分之二
///
/// 靠后的"区"、"县"更可能是街道或楼盘名的一部分。
fn has_region_marker(text: &Text) -> bool {
    let threshold = text.len() * 2 / 3;
    REGION_RULES
        .iter()
        .any(|rule| text.find(rule.marker).map_or(false, |pos| pos < threshold))
}

fn region_rule_position(text: &Text) -> Option<(&'static SegmentRule, usize)> {
    if !has_region_marker(text) {
        return None;
    }
    REGION_RULES
        .iter()
        .find_map(|rule| text.find(rule.marker).map(|pos| (rule, pos)))
}

/// 旗：前一个字加"旗"
fn banner_token(text: &Text, pos: usize) -> String {
    text.window(pos, 2)
}

/// "市"在关键字之前时，取"市"之后到关键字（含）
fn after_city(text: &Text, pos: usize) -> Option<String> {
    text.find('市')
        .filter(|&city_pos| city_pos < pos)
        .map(|city_pos| text.range(city_pos + 1, pos))
}

/// 区：优先取"市"之后的部分，否则取以"区"结尾的三个字
fn district_token(text: &Text, pos: usize) -> String {
    after_city(text, pos).unwrap_or_else(|| text.window(pos, 3))
}

/// 县：同"区"，另外自治县取七个字并去掉粘连的上级后缀
fn county_token(text: &Text, pos: usize) -> String {
    if let Some(token) = after_city(text, pos) {
        return token;
    }
    if text.find_str("自治县").is_some() {
        let token = text.window(pos, 7);
        return match token.strip_prefix(&COUNTY_PREFIX_SUFFIXES[..]) {
            Some(rest) => rest.to_string(),
            None => token,
        };
    }
    text.window(pos, 3)
}

fn city_token(text: &Text, pos: usize) -> String {
    text.window(pos, 3)
}
