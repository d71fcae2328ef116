//! 工具函数集成测试：原料解析、年龄校验、设备分类

use chrono::NaiveDate;

use tikaram_api::utils::{
    calculate_age, classify_device, is_of_legal_age, parse_ingredient, DeviceClass,
};

#[test]
fn test_parse_ingredient_documented_examples() {
    // 来自内容仓库真实配方数据的样例
    let cases = [
        ("2oz Ponce Rum", Some(2.0), Some("oz"), "Ponce Rum"),
        ("0.75oz Lime Juice", Some(0.75), Some("oz"), "Lime Juice"),
        ("Dash Angostura", None, Some("dash"), "Angostura"),
        ("Fresh Mint", None, None, "Fresh Mint"),
        (
            "2 Dashes Angostura Bitters",
            Some(2.0),
            Some("dashes"),
            "Angostura Bitters",
        ),
        ("Splash of Cream", None, Some("splash"), "Cream"),
        ("Ginger Beer", None, None, "Ginger Beer"),
    ];

    for (raw, amount, unit, item) in cases {
        let parsed = parse_ingredient(raw);
        assert_eq!(parsed.amount, amount, "amount for {:?}", raw);
        assert_eq!(parsed.unit.as_deref(), unit, "unit for {:?}", raw);
        assert_eq!(parsed.item, item, "item for {:?}", raw);
    }
}

#[test]
fn test_parse_ingredient_serializes_to_expected_json() {
    let parsed = parse_ingredient("2oz Ponce Rum");
    let json = serde_json::to_value(&parsed).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "amount": 2.0, "unit": "oz", "item": "Ponce Rum" })
    );
}

#[test]
fn test_age_calculation_with_month_and_day_carry() {
    let today = NaiveDate::from_ymd_opt(2025, 8, 6).unwrap();

    let just_21 = NaiveDate::from_ymd_opt(2004, 8, 6).unwrap();
    assert_eq!(calculate_age(just_21, today), 21);
    assert!(is_of_legal_age(just_21, today));

    let almost_21 = NaiveDate::from_ymd_opt(2004, 8, 7).unwrap();
    assert_eq!(calculate_age(almost_21, today), 20);
    assert!(!is_of_legal_age(almost_21, today));
}

#[test]
fn test_device_classification_token_list() {
    let mobile_uas = [
        "Mozilla/5.0 (Linux; Android 14; Pixel 8)",
        "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)",
        "Mozilla/5.0 (iPad; CPU OS 16_0 like Mac OS X)",
        "Mozilla/5.0 (BlackBerry; U; BlackBerry 9900)",
        "Mozilla/5.0 (compatible; MSIE 10.0; Windows Phone 8.0; IEMobile/10.0)",
    ];
    for ua in mobile_uas {
        assert_eq!(classify_device(ua), DeviceClass::Mobile, "{}", ua);
    }

    let desktop_uas = [
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) Chrome/120.0",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) Firefox/121.0",
        "curl/8.4.0",
    ];
    for ua in desktop_uas {
        assert_eq!(classify_device(ua), DeviceClass::Desktop, "{}", ua);
    }
}
