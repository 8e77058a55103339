use cnaddr::{AddressParser, ParseOptions};

fn main() {
    let parser = AddressParser::new();

    println!("=== 收货信息解析演示 ===\n");

    let test_cases = vec![
        // 混有个人信息
        "张三 13800138000 北京市朝阳区建国路1号",
        "收货人：李四；电话：0755-86013388；收货地址：广东省深圳市南山区科技园路1号；邮编：518057",
        "王五 44030519900101123X 13912345678 上海市浦东新区陆家嘴环路1000号",
        // 同名区县
        "吉林省长春市朝阳区人民大街100号",
        "辽宁省沈阳市和平区南京北街168号",
        // 旗、自治县、自治州
        "锡林郭勒盟太仆寺旗宝昌镇幸福路8号",
        "重庆石柱土家族自治县南宾镇城南路25号",
        "云南省大理白族自治州鹤庆县草海镇新华路12号",
        // 不设区的市
        "广东省东莞市长安镇振安路368号",
        // 无法识别
        "某某路123号",
        "",
    ];

    for text in test_cases {
        let r = parser.parse(text);
        println!("输入: \"{}\"", text);
        println!("  姓名: {:?}  电话: {:?}", r.name, r.mobile);
        println!("  身份证: {:?}  邮编: {:?}", r.idn, r.postcode);
        println!("  省份: {}  城市: {}  区县: {}", r.province, r.city, r.region);
        println!("  街道: \"{}\"", r.street);
        println!();
    }

    println!("=== 仅解析地址 ===\n");

    let address_only = AddressParser::new()
        .with_options(ParseOptions::new().extract_user(false).unknown("-"));
    for text in ["杭州市文三路电子大厦东区", "火星市奥林匹斯区一号坑东侧营地"] {
        let r = address_only.parse(text);
        println!("{} => {} / {} / {} / {}", text, r.province, r.city, r.region, r.street);
    }
}
