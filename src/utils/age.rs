//! 年龄校验
//!
//! 烈酒品牌站点的法定年龄门槛。lead 表单的出生日期为可选字段，
//! 填了就必须满 21 岁。

use chrono::{Datelike, NaiveDate};

use crate::errors::{Result, TikaramError};

/// 美国法定饮酒年龄
pub const LEGAL_DRINKING_AGE: i32 = 21;

/// 按公历计算周岁，生日未到则减一
pub fn calculate_age(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();

    let month_diff = today.month() as i32 - birth_date.month() as i32;
    if month_diff < 0 || (month_diff == 0 && today.day() < birth_date.day()) {
        age -= 1;
    }

    age
}

/// 是否达到法定饮酒年龄
pub fn is_of_legal_age(birth_date: NaiveDate, today: NaiveDate) -> bool {
    calculate_age(birth_date, today) >= LEGAL_DRINKING_AGE
}

/// 解析表单里的出生日期（YYYY-MM-DD）
pub fn parse_date_of_birth(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        TikaramError::validation(format!(
            "Invalid date_of_birth format: {}. Use YYYY-MM-DD",
            raw
        ))
    })
}
