//! 地区数据结构

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 行政区划级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Level {
    /// 一级：省、直辖市、自治区、特别行政区
    Province = 1,
    /// 二级：地级市、自治州、盟
    City = 2,
    /// 三级：区、县、县级市、旗
    Region = 3,
}

impl Level {
    /// 从数字级别（1/2/3）转换
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Level::Province),
            2 => Some(Level::City),
            3 => Some(Level::Region),
            _ => None,
        }
    }

    /// 数字级别
    pub fn number(self) -> u8 {
        self as u8
    }
}

/// 行政区划记录
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AdministrativeUnit {
    /// 区划代码，同级内唯一
    pub id: String,
    /// 名称（可能带 "省"、"市"、"区"、"县"、"州"、"盟"、"旗" 等后缀）
    pub name: String,
    /// 上级区划代码，省级为 `None`
    pub parent_id: Option<String>,
    /// 级别
    pub level: Level,
}

impl AdministrativeUnit {
    /// 创建新的行政区划记录
    ///
    /// `parent_id` 为空字符串或 `"0"` 时视为没有上级。
    pub fn new(
        level: Level,
        id: impl Into<String>,
        name: impl Into<String>,
        parent_id: impl Into<String>,
    ) -> Self {
        let parent_id = parent_id.into();
        let parent_id = match parent_id.trim() {
            "" | "0" => None,
            p => Some(p.to_string()),
        };
        Self {
            id: id.into(),
            name: name.into(),
            parent_id,
            level,
        }
    }

    /// 上级代码的前两位，即所属省级区划代码
    pub fn province_prefix(&self) -> Option<&str> {
        let pid = self.parent_id.as_deref()?;
        pid.char_indices().nth(2).map(|(i, _)| &pid[..i]).or(Some(pid))
    }
}

/// 省市区三元组解析结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResolvedRegion {
    /// 省份
    pub province: String,
    /// 城市
    pub city: String,
    /// 区县
    pub region: String,
}

impl ResolvedRegion {
    pub(crate) fn new(
        province: impl Into<String>,
        city: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            province: province.into(),
            city: city.into(),
            region: region.into(),
        }
    }

    /// 三个字段均为未知值
    pub(crate) fn unknown(unknown: &str) -> Self {
        Self::new(unknown, unknown, unknown)
    }
}

/// 解析结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParsedAddress {
    /// 姓名
    pub name: String,
    /// 手机号或座机
    pub mobile: String,
    /// 身份证号
    pub idn: String,
    /// 邮编
    pub postcode: String,
    /// 省份
    pub province: String,
    /// 城市
    pub city: String,
    /// 区县
    pub region: String,
    /// 剩余详细地址
    pub street: String,
}

impl ParsedAddress {
    /// 省市区是否都已解析（既非空，也不是未知值）
    pub fn is_resolved(&self, unknown: &str) -> bool {
        [&self.province, &self.city, &self.region]
            .iter()
            .all(|f| !f.is_empty() && f.as_str() != unknown)
    }

    /// 获取标准化的完整地址
    pub fn full_address(&self) -> String {
        let mut result = self.province.clone();
        // 避免直辖市重复
        if self.city != self.province {
            result.push_str(&self.city);
        }
        result.push_str(&self.region);
        result.push_str(&self.street);
        result
    }
}
