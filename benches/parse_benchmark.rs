use cnaddr::{segment, AddressParser, AdministrativeTable, ParseOptions};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn benchmark_parse(c: &mut Criterion) {
    let parser = AddressParser::new();

    c.bench_function("parse_with_user_info", |b| {
        b.iter(|| parser.parse(black_box("张三 13800138000 北京市朝阳区建国路1号")))
    });

    c.bench_function("parse_full_address", |b| {
        b.iter(|| parser.parse(black_box("广东省深圳市南山区科技园路1号")))
    });

    let address_only = AddressParser::new().with_options(ParseOptions::new().extract_user(false));
    c.bench_function("parse_address_only", |b| {
        b.iter(|| address_only.parse(black_box("吉林省长春市朝阳区人民大街100号")))
    });

    c.bench_function("segment", |b| {
        b.iter(|| segment(black_box("重庆石柱土家族自治县南宾镇城南路25号")))
    });
}

fn benchmark_batch(c: &mut Criterion) {
    let parser = AddressParser::new();
    let addresses: Vec<&str> = vec![
        "广东省深圳市南山区科技园路1号",
        "北京市朝阳区建国路88号",
        "上海市浦东新区陆家嘴环路1000号",
        "浙江省杭州市西湖区文三路90号",
        "江苏省南京市鼓楼区中山北路30号",
        "四川省成都市武侯区人民南路四段",
        "湖北省武汉市洪山区珞喻路1037号",
        "山东省青岛市市南区香港中路",
        "福建省厦门市思明区湖滨南路",
        "广东省广州市天河区天河路385号",
    ];

    c.bench_function("parse_batch_10", |b| {
        b.iter(|| parser.parse_batch(black_box(&addresses)))
    });
}

fn benchmark_load(c: &mut Criterion) {
    let data = include_str!("../data/divisions.csv");
    c.bench_function("table_from_csv", |b| {
        b.iter(|| AdministrativeTable::from_csv(black_box(data)))
    });
}

criterion_group!(benches, benchmark_parse, benchmark_batch, benchmark_load);
criterion_main!(benches);
