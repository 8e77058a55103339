//! 行政区划数据加载和索引构建

use crate::error::ParseError;
use crate::region::{AdministrativeUnit, Level};
use log::{debug, warn};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// 内嵌的行政区划数据（编译时包含）
const DIVISIONS_DATA: &str = include_str!("../data/divisions.csv");

/// CSV 表头
const CSV_HEADER: &str = "level,id,pid,name";

/// 全局默认数据
static BUILTIN_TABLE: Lazy<AdministrativeTable> =
    Lazy::new(|| match AdministrativeTable::from_csv(DIVISIONS_DATA) {
        Ok(table) => table,
        Err(e) => {
            warn!("builtin division data failed to load: {}", e);
            AdministrativeTable::new()
        }
    });

/// 单个级别的数据：保持插入顺序，同时按代码索引
#[derive(Debug, Clone, Default)]
struct LevelTable {
    units: Vec<AdministrativeUnit>,
    index: HashMap<String, usize>,
}

impl LevelTable {
    fn insert(&mut self, unit: AdministrativeUnit) {
        match self.index.get(&unit.id) {
            Some(&pos) => self.units[pos] = unit,
            None => {
                self.index.insert(unit.id.clone(), self.units.len());
                self.units.push(unit);
            }
        }
    }

    fn get(&self, id: &str) -> Option<&AdministrativeUnit> {
        self.index.get(id).map(|&pos| &self.units[pos])
    }
}

/// 三级行政区划参考表
///
/// 每一级既可按代码查找，也可按插入顺序遍历；解析时的"取第一个匹配"
/// 依赖这一顺序，因此结果是确定的。
#[derive(Debug, Clone, Default)]
pub struct AdministrativeTable {
    provinces: LevelTable,
    cities: LevelTable,
    regions: LevelTable,
}

impl AdministrativeTable {
    /// 创建空表
    pub fn new() -> Self {
        Self::default()
    }

    /// 内置的默认数据（首次调用时解析）
    pub fn builtin() -> &'static AdministrativeTable {
        &BUILTIN_TABLE
    }

    /// 插入一条记录；同级代码重复时原位替换
    pub fn insert(&mut self, unit: AdministrativeUnit) {
        self.level_mut(unit.level).insert(unit);
    }

    fn level(&self, level: Level) -> &LevelTable {
        match level {
            Level::Province => &self.provinces,
            Level::City => &self.cities,
            Level::Region => &self.regions,
        }
    }

    fn level_mut(&mut self, level: Level) -> &mut LevelTable {
        match level {
            Level::Province => &mut self.provinces,
            Level::City => &mut self.cities,
            Level::Region => &mut self.regions,
        }
    }

    /// 按代码查找省级区划
    pub fn province(&self, id: &str) -> Option<&AdministrativeUnit> {
        self.provinces.get(id)
    }

    /// 按代码查找地级区划
    pub fn city(&self, id: &str) -> Option<&AdministrativeUnit> {
        self.cities.get(id)
    }

    /// 按代码查找县级区划
    pub fn region(&self, id: &str) -> Option<&AdministrativeUnit> {
        self.regions.get(id)
    }

    /// 所有省级区划（表内顺序）
    pub fn provinces(&self) -> &[AdministrativeUnit] {
        &self.provinces.units
    }

    /// 所有地级区划（表内顺序）
    pub fn cities(&self) -> &[AdministrativeUnit] {
        &self.cities.units
    }

    /// 所有县级区划（表内顺序）
    pub fn regions(&self) -> &[AdministrativeUnit] {
        &self.regions.units
    }

    /// 某级别的记录数
    pub fn len(&self, level: Level) -> usize {
        self.level(level).units.len()
    }

    /// 任意一级为空即视为空表
    pub fn is_empty(&self) -> bool {
        self.provinces.units.is_empty()
            || self.cities.units.is_empty()
            || self.regions.units.is_empty()
    }

    /// 某省下的所有地级区划
    pub fn cities_of_province(&self, province_id: &str) -> Vec<&AdministrativeUnit> {
        Self::children(&self.cities, province_id)
    }

    /// 某市下的所有县级区划
    pub fn regions_of_city(&self, city_id: &str) -> Vec<&AdministrativeUnit> {
        Self::children(&self.regions, city_id)
    }

    fn children<'a>(level: &'a LevelTable, parent_id: &str) -> Vec<&'a AdministrativeUnit> {
        level
            .units
            .iter()
            .filter(|u| u.parent_id.as_deref() == Some(parent_id))
            .collect()
    }

    /// 从三组 `(代码, 名称, 上级代码)` 构建
    ///
    /// ```rust
    /// use cnaddr::AdministrativeTable;
    ///
    /// let table = AdministrativeTable::from_levels(
    ///     &[("11", "北京市", "0")],
    ///     &[("1101", "北京市", "11")],
    ///     &[("110105", "朝阳区", "1101")],
    /// );
    /// assert_eq!(table.region("110105").unwrap().name, "朝阳区");
    /// ```
    pub fn from_levels(
        level1: &[(&str, &str, &str)],
        level2: &[(&str, &str, &str)],
        level3: &[(&str, &str, &str)],
    ) -> Self {
        let mut table = Self::new();
        for (level, rows) in [
            (Level::Province, level1),
            (Level::City, level2),
            (Level::Region, level3),
        ] {
            for &(id, name, pid) in rows {
                table.insert(AdministrativeUnit::new(level, id, name, pid));
            }
        }
        table
    }

    /// 解析 CSV 数据
    ///
    /// 格式为 `level,id,pid,name`，首行可为表头，空行和 `#` 开头的行会被忽略，
    /// `pid` 为空或 `0` 表示没有上级。
    pub fn from_csv(data: &str) -> Result<Self, ParseError> {
        let mut table = Self::new();

        for (i, line) in data.lines().enumerate() {
            let line_no = i + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line == CSV_HEADER {
                continue;
            }

            let parts: Vec<&str> = line.split(',').map(str::trim).collect();
            if parts.len() != 4 {
                return Err(ParseError::at_line(
                    line_no,
                    format!("expected 4 fields, found {}", parts.len()),
                ));
            }

            let level = parts[0]
                .parse::<u8>()
                .ok()
                .and_then(Level::from_number)
                .ok_or_else(|| ParseError::at_line(line_no, format!("unknown level '{}'", parts[0])))?;
            let (id, pid, name) = (parts[1], parts[2], parts[3]);
            if id.is_empty() || name.is_empty() {
                return Err(ParseError::at_line(line_no, "empty id or name"));
            }

            table.insert(AdministrativeUnit::new(level, id, name, pid));
        }

        debug!(
            "loaded division table: {} provinces, {} cities, {} regions",
            table.provinces.units.len(),
            table.cities.units.len(),
            table.regions.units.len()
        );
        Ok(table)
    }

    /// 解析 JSON 数据
    ///
    /// 格式为 `{"level_1": {"11": {"name": "北京市", "pid": 0}}, "level_2": {..}, "level_3": {..}}`，
    /// 同级内按代码升序排列。
    #[cfg(feature = "serde")]
    pub fn from_json(data: &str) -> Result<Self, ParseError> {
        use serde::Deserialize;
        use serde_json::Value;
        use std::collections::BTreeMap;

        #[derive(Deserialize)]
        struct RawUnit {
            name: String,
            #[serde(default)]
            pid: Value,
        }

        #[derive(Deserialize)]
        struct RawLevels {
            level_1: BTreeMap<String, RawUnit>,
            level_2: BTreeMap<String, RawUnit>,
            level_3: BTreeMap<String, RawUnit>,
        }

        let raw: RawLevels =
            serde_json::from_str(data).map_err(|e| ParseError::InvalidFormat(e.to_string()))?;

        let mut table = Self::new();
        for (level, units) in [
            (Level::Province, raw.level_1),
            (Level::City, raw.level_2),
            (Level::Region, raw.level_3),
        ] {
            for (id, unit) in units {
                if unit.name.trim().is_empty() {
                    return Err(ParseError::DataLoadError(format!(
                        "level {} id {}: empty name",
                        level.number(),
                        id
                    )));
                }
                let pid = match unit.pid {
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    _ => String::new(),
                };
                table.insert(AdministrativeUnit::new(level, id, unit.name, pid));
            }
        }
        Ok(table)
    }
}
