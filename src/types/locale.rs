//! Site locales and the handful of display strings the calendar needs

use serde::{Deserialize, Serialize};

/// Locale used for link prefixes and labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Locale {
    #[default]
    Zh,
    En,
}

impl Locale {
    /// Parse a locale tag, falling back to the site default for anything unknown
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "zh" => Self::Zh,
            "en" => Self::En,
            other => {
                tracing::warn!(locale = other, "unsupported locale, using zh");
                Self::Zh
            }
        }
    }

    /// URL path segment
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Zh => "zh",
            Self::En => "en",
        }
    }

    pub fn labels(self) -> &'static Labels {
        match self {
            Self::Zh => &ZH_LABELS,
            Self::En => &EN_LABELS,
        }
    }
}

impl From<String> for Locale {
    fn from(tag: String) -> Self {
        Self::parse(&tag)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.as_str().to_string()
    }
}

/// Display strings for calendar overlays
#[derive(Debug)]
pub struct Labels {
    pub posts: &'static str,
    pub life_records: &'static str,
    pub records: &'static str,
    pub close: &'static str,
    pub loading: &'static str,
    pub less: &'static str,
    pub more: &'static str,
    /// Monday first
    pub weekdays: [&'static str; 7],
    pub months: [&'static str; 12],
}

static ZH_LABELS: Labels = Labels {
    posts: "博客",
    life_records: "生活记录",
    records: "条记录",
    close: "关闭",
    loading: "加载中...",
    less: "少",
    more: "多",
    weekdays: ["一", "二", "三", "四", "五", "六", "日"],
    months: [
        "1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月", "12月",
    ],
};

static EN_LABELS: Labels = Labels {
    posts: "Posts",
    life_records: "Life records",
    records: "records",
    close: "Close",
    loading: "Loading...",
    less: "Less",
    more: "More",
    weekdays: ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
    months: [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ],
};
