//! Display labels for analytics buckets and the catalog filter sentinel.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

const MONTHS_AR: [&str; 12] = [
    "يناير", "فبراير", "مارس", "أبريل", "مايو", "يونيو", "يوليو", "أغسطس", "سبتمبر",
    "أكتوبر", "نوفمبر", "ديسمبر",
];

const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Indexed 0 = Sunday.
const WEEKDAYS_AR: [&str; 7] = [
    "الأحد", "الاثنين", "الثلاثاء", "الأربعاء", "الخميس", "الجمعة", "السبت",
];

/// Indexed 0 = Sunday.
const WEEKDAYS_EN: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const ALL_CATEGORIES_AR: &str = "الكل";
const ALL_CATEGORIES_EN: &str = "all";

/// Language used for every label the server generates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ar,
    En,
}

impl Locale {
    /// Name of calendar month `month` (1 = January). `None` outside 1..=12.
    pub fn month_name(self, month: u32) -> Option<&'static str> {
        let idx = usize::try_from(month.checked_sub(1)?).ok()?;
        match self {
            Locale::Ar => MONTHS_AR.get(idx).copied(),
            Locale::En => MONTHS_EN.get(idx).copied(),
        }
    }

    /// Name of weekday `weekday` (0 = Sunday). `None` outside 0..=6.
    pub fn weekday_name(self, weekday: u32) -> Option<&'static str> {
        let idx = usize::try_from(weekday).ok()?;
        match self {
            Locale::Ar => WEEKDAYS_AR.get(idx).copied(),
            Locale::En => WEEKDAYS_EN.get(idx).copied(),
        }
    }

    /// Synthetic first entry of the category list.
    pub fn all_categories_label(self) -> &'static str {
        match self {
            Locale::Ar => ALL_CATEGORIES_AR,
            Locale::En => ALL_CATEGORIES_EN,
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ar" => Ok(Locale::Ar),
            "en" => Ok(Locale::En),
            other => Err(format!("Unsupported locale '{other}' (expected 'ar' or 'en')")),
        }
    }
}

/// True when `label` is the "all categories" sentinel in any supported locale.
pub fn is_all_categories(label: &str) -> bool {
    label == ALL_CATEGORIES_AR || label.eq_ignore_ascii_case(ALL_CATEGORIES_EN)
}
