//! 省市区推断：用区县、城市候选词查询三级行政区划表
//!
//! 所有查询都是名称包含匹配，匹配多个是常态而不是错误。查不到时逐级回退，
//! 最终落到未知值或原始候选词上。

use crate::data::AdministrativeTable;
use crate::region::{AdministrativeUnit, ResolvedRegion};
use log::debug;

/// 名称包含 `token` 的所有记录（保持表内顺序）
fn matching<'a>(units: &'a [AdministrativeUnit], token: &str) -> Vec<&'a AdministrativeUnit> {
    units.iter().filter(|u| u.name.contains(token)).collect()
}

/// 省市区推断器
///
/// 只读地借用参考表，不持有任何可变状态，可以跨线程共享。
///
/// ```rust
/// use cnaddr::{AdministrativeTable, Resolver};
///
/// let table = AdministrativeTable::from_levels(
///     &[("11", "北京市", "0")],
///     &[("1101", "北京市", "11")],
///     &[("110105", "朝阳区", "1101")],
/// );
/// let resolved = Resolver::new(&table, "未知").resolve("北京市", "朝阳");
/// assert_eq!(resolved.province, "北京市");
/// assert_eq!(resolved.city, "北京市");
/// assert_eq!(resolved.region, "朝阳区");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'t> {
    table: &'t AdministrativeTable,
    unknown: &'t str,
}

impl<'t> Resolver<'t> {
    /// `unknown` 为无法确定时的填充值
    pub fn new(table: &'t AdministrativeTable, unknown: &'t str) -> Self {
        Self { table, unknown }
    }

    /// 根据城市候选词和区县候选词推断省市区
    ///
    /// 区县候选词为空时直接返回三个未知值。
    pub fn resolve(&self, city_input: &str, region_input: &str) -> ResolvedRegion {
        if region_input.is_empty() {
            return ResolvedRegion::unknown(self.unknown);
        }

        let regions = matching(self.table.regions(), region_input);
        debug!(
            "region token {:?} matched {} region(s)",
            region_input,
            regions.len()
        );

        match regions.as_slice() {
            [] => self.resolve_by_city(city_input, region_input),
            [region] => self.resolve_single(region),
            _ => self.disambiguate(&regions, city_input, region_input),
        }
    }

    /// 城市所属省份名称
    fn province_of_city(&self, city: &AdministrativeUnit) -> String {
        city.parent_id
            .as_deref()
            .and_then(|pid| self.table.province(pid))
            .map_or_else(|| self.unknown.to_string(), |p| p.name.clone())
    }

    /// 区县唯一：沿上级代码找城市和省份
    ///
    /// 城市不在表中时，用上级代码前两位直接找省份，城市留空。
    fn resolve_single(&self, region: &AdministrativeUnit) -> ResolvedRegion {
        let city = region
            .parent_id
            .as_deref()
            .and_then(|pid| self.table.city(pid));

        match city {
            Some(city) => ResolvedRegion::new(self.province_of_city(city), &city.name, &region.name),
            None => {
                let province = region
                    .province_prefix()
                    .and_then(|prefix| self.table.province(prefix))
                    .map_or(self.unknown, |p| p.name.as_str());
                ResolvedRegion::new(province, "", &region.name)
            }
        }
    }

    /// 区县不唯一：先用城市候选词，再用省份缩小范围
    ///
    /// 按区县在表中的顺序、再按城市（省份）在表中的顺序，取第一组上下级吻合的结果。
    fn disambiguate(
        &self,
        regions: &[&AdministrativeUnit],
        city_input: &str,
        region_input: &str,
    ) -> ResolvedRegion {
        let cities = matching(self.table.cities(), city_input);
        if !cities.is_empty() {
            debug!("disambiguating by {} city match(es)", cities.len());
            for region in regions {
                let parent = region.parent_id.as_deref();
                if let Some(city) = cities.iter().find(|c| Some(c.id.as_str()) == parent) {
                    return ResolvedRegion::new(
                        self.province_of_city(city),
                        &city.name,
                        &region.name,
                    );
                }
            }
            return ResolvedRegion::unknown(self.unknown);
        }

        let provinces = matching(self.table.provinces(), city_input);
        if provinces.is_empty() {
            return ResolvedRegion::new(self.unknown, city_input, region_input);
        }

        debug!("disambiguating by {} province match(es)", provinces.len());
        for region in regions {
            let prefix = region.province_prefix();
            if let Some(province) = provinces.iter().find(|p| Some(p.id.as_str()) == prefix) {
                let city = region
                    .parent_id
                    .as_deref()
                    .and_then(|pid| self.table.city(pid))
                    .map_or("", |c| c.name.as_str());
                return ResolvedRegion::new(&province.name, city, &region.name);
            }
        }
        ResolvedRegion::unknown(self.unknown)
    }

    /// 区县查不到：只用城市候选词，区县保留原始候选词
    fn resolve_by_city(&self, city_input: &str, region_input: &str) -> ResolvedRegion {
        if let Some(city) = matching(self.table.cities(), city_input).first() {
            debug!("no region match, city token {:?} -> {}", city_input, city.name);
            return ResolvedRegion::new(self.province_of_city(city), &city.name, region_input);
        }

        if let Some(province) = matching(self.table.provinces(), city_input).first() {
            debug!("no region match, city token {:?} -> province {}", city_input, province.name);
            // 省下没有任何城市时城市留空，否则为未知值
            let city = if self.table.cities_of_province(&province.id).is_empty() {
                ""
            } else {
                self.unknown
            };
            return ResolvedRegion::new(&province.name, city, region_input);
        }

        ResolvedRegion::new(self.unknown, city_input, region_input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNKNOWN: &str = "未知";

    fn fixture() -> AdministrativeTable {
        AdministrativeTable::from_levels(
            &[
                ("11", "北京市", "0"),
                ("12", "天津市", "0"),
                ("21", "辽宁省", "0"),
                ("22", "吉林省", "0"),
                ("31", "上海市", "0"),
                ("81", "香港特别行政区", "0"),
            ],
            &[
                ("1101", "北京市", "11"),
                ("1201", "天津市", "12"),
                ("2101", "沈阳市", "21"),
                ("2201", "长春市", "22"),
                ("3101", "上海市", "31"),
            ],
            &[
                ("110105", "朝阳区", "1101"),
                ("120101", "和平区", "1201"),
                ("120116", "滨海新区", "1201"),
                ("210102", "和平区", "2101"),
                ("220104", "朝阳区", "2201"),
                ("310115", "浦东新区", "3101"),
            ],
        )
    }

    fn triple(province: &str, city: &str, region: &str) -> ResolvedRegion {
        ResolvedRegion::new(province, city, region)
    }

    #[test]
    fn test_empty_region_token_short_circuits() {
        let table = fixture();
        let r = Resolver::new(&table, UNKNOWN);
        assert_eq!(r.resolve("北京市", ""), triple(UNKNOWN, UNKNOWN, UNKNOWN));
        assert_eq!(r.resolve("", ""), triple(UNKNOWN, UNKNOWN, UNKNOWN));
    }

    #[test]
    fn test_single_region_match() {
        let table = AdministrativeTable::from_levels(
            &[("11", "北京市", "0")],
            &[("1101", "北京市", "11")],
            &[("110105", "朝阳区", "1101"), ("110108", "海淀区", "1101")],
        );
        let r = Resolver::new(&table, UNKNOWN);
        assert_eq!(r.resolve("", "朝阳"), triple("北京市", "北京市", "朝阳区"));
    }

    #[test]
    fn test_single_region_missing_city_uses_code_prefix() {
        let table = AdministrativeTable::from_levels(
            &[("44", "广东省", "0")],
            &[("4401", "广州市", "44")],
            &[("440305", "南山区", "4403")],
        );
        let r = Resolver::new(&table, UNKNOWN);
        assert_eq!(r.resolve("深圳市", "南山区"), triple("广东省", "", "南山区"));
    }

    #[test]
    fn test_single_region_dangling_parents() {
        let table = AdministrativeTable::from_levels(
            &[("11", "北京市", "0")],
            &[("9901", "某市", "99")],
            &[("990101", "某区", "9901"), ("880101", "另区", "8801")],
        );
        let r = Resolver::new(&table, UNKNOWN);
        assert_eq!(r.resolve("", "某区"), triple(UNKNOWN, "某市", "某区"));
        assert_eq!(r.resolve("", "另区"), triple(UNKNOWN, "", "另区"));
    }

    #[test]
    fn test_ambiguous_region_unique_city() {
        let table = fixture();
        let r = Resolver::new(&table, UNKNOWN);
        assert_eq!(
            r.resolve("上海市", "新区"),
            triple("上海市", "上海市", "浦东新区")
        );
        assert_eq!(
            r.resolve("天津市", "新区"),
            triple("天津市", "天津市", "滨海新区")
        );
        assert_eq!(
            r.resolve("长春市", "朝阳区"),
            triple("吉林省", "长春市", "朝阳区")
        );
    }

    #[test]
    fn test_ambiguous_region_several_cities() {
        // "市" 匹配全部城市，取第一个上下级吻合的区县
        let table = fixture();
        let r = Resolver::new(&table, UNKNOWN);
        assert_eq!(r.resolve("市", "和平区"), triple("天津市", "天津市", "和平区"));
    }

    #[test]
    fn test_ambiguous_region_city_without_child() {
        let table = fixture();
        let r = Resolver::new(&table, UNKNOWN);
        assert_eq!(
            r.resolve("北京市", "和平区"),
            triple(UNKNOWN, UNKNOWN, UNKNOWN)
        );
    }

    #[test]
    fn test_ambiguous_region_by_province() {
        let table = fixture();
        let r = Resolver::new(&table, UNKNOWN);
        assert_eq!(
            r.resolve("辽宁省", "和平区"),
            triple("辽宁省", "沈阳市", "和平区")
        );
        // 多个省份匹配时，按区县顺序取第一个代码前缀吻合的
        assert_eq!(
            r.resolve("省", "朝阳区"),
            triple("吉林省", "长春市", "朝阳区")
        );
    }

    #[test]
    fn test_ambiguous_region_by_province_missing_city() {
        let table = AdministrativeTable::from_levels(
            &[("21", "辽宁省", "0"), ("12", "天津市", "0")],
            &[("1201", "天津市", "12")],
            &[("120101", "和平区", "1201"), ("210102", "和平区", "2101")],
        );
        let r = Resolver::new(&table, UNKNOWN);
        assert_eq!(r.resolve("辽宁省", "和平区"), triple("辽宁省", "", "和平区"));
    }

    #[test]
    fn test_ambiguous_region_no_city_no_province() {
        let table = fixture();
        let r = Resolver::new(&table, UNKNOWN);
        assert_eq!(
            r.resolve("火星市", "朝阳区"),
            triple(UNKNOWN, "火星市", "朝阳区")
        );
    }

    #[test]
    fn test_no_region_match_by_city() {
        let table = fixture();
        let r = Resolver::new(&table, UNKNOWN);
        assert_eq!(
            r.resolve("沈阳市", "铁西区"),
            triple("辽宁省", "沈阳市", "铁西区")
        );
    }

    #[test]
    fn test_no_region_match_by_province() {
        let table = fixture();
        let r = Resolver::new(&table, UNKNOWN);
        // 省下有城市：城市为未知值
        assert_eq!(
            r.resolve("吉林省", "某某区"),
            triple("吉林省", UNKNOWN, "某某区")
        );
        // 省下没有城市：城市为空字符串（与其它分支不一致，属既定行为）
        assert_eq!(
            r.resolve("香港特别", "中西区"),
            triple("香港特别行政区", "", "中西区")
        );
    }

    #[test]
    fn test_no_match_keeps_raw_tokens() {
        let table = fixture();
        let r = Resolver::new(&table, UNKNOWN);
        assert_eq!(
            r.resolve("火星市", "某某区"),
            triple(UNKNOWN, "火星市", "某某区")
        );
    }

    #[test]
    fn test_custom_unknown_value() {
        let table = fixture();
        let r = Resolver::new(&table, "-");
        assert_eq!(r.resolve("上海市", ""), triple("-", "-", "-"));
        assert_eq!(r.resolve("火星市", "某某区"), triple("-", "火星市", "某某区"));
    }

    #[test]
    fn test_resolver_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Resolver<'static>>();
    }
}
