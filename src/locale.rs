use serde::{Deserialize, Serialize};

use crate::error::ContextError;

/// The language the fixed labels of the résumé (section headings, separators and so on) are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "zh-CN")]
    Chinese,
    #[serde(rename = "en-US")]
    English,
}

/// The set of fixed strings used when laying out a résumé in a given locale.
#[derive(Debug, Clone, Copy)]
pub struct Labels {
    /// Joins the parts of a meta line, such as location, email and phone.
    pub separator: &'static str,
    /// Closes a date range whose end is not provided.
    pub present: &'static str,
    /// Stands in for the name when it is not provided, so that the header is always emitted.
    pub missing_name: &'static str,
    pub links: &'static str,
    pub highlights: &'static str,
    pub experience: &'static str,
    pub projects: &'static str,
    pub skills: &'static str,
    pub education: &'static str,
    pub certifications: &'static str,
    pub context: &'static str,
    pub result: &'static str,
    pub evidence: &'static str,
    pub reflection: &'static str,
}

const CHINESE_LABELS: Labels = Labels {
    separator: "｜",
    present: "至今",
    missing_name: "（未填写姓名）",
    links: "链接",
    highlights: "核心亮点",
    experience: "经历",
    projects: "项目",
    skills: "技能",
    education: "教育 / 证书",
    certifications: "证书",
    context: "背景：",
    result: "结果：",
    evidence: "证据：",
    reflection: "复盘：",
};

const ENGLISH_LABELS: Labels = Labels {
    separator: " | ",
    present: "Present",
    missing_name: "(Name not provided)",
    links: "Links",
    highlights: "Highlights",
    experience: "Experience",
    projects: "Projects",
    skills: "Skills",
    education: "Education / Certifications",
    certifications: "Certifications",
    context: "Context: ",
    result: "Result: ",
    evidence: "Evidence:",
    reflection: "Reflection: ",
};

impl Locale {
    pub fn labels(self) -> &'static Labels {
        match self {
            Locale::Chinese => &CHINESE_LABELS,
            Locale::English => &ENGLISH_LABELS,
        }
    }

    /// The language tag of the locale, as it appears in the configuration file.
    pub fn tag(self) -> &'static str {
        match self {
            Locale::Chinese => "zh-CN",
            Locale::English => "en-US",
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.tag())
    }
}

impl std::str::FromStr for Locale {
    type Err = ContextError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "zh-cn" | "zh" => Ok(Locale::Chinese),
            "en-us" | "en" => Ok(Locale::English),
            _ => Err(ContextError::with_context(format!(
                "Unsupported locale {:?}, expected either \"zh-CN\" or \"en-US\"",
                tag
            ))),
        }
    }
}
