//! Translation-string lookup for user-facing CLI messages.
//!
//! English message keys double as the English text; [`tr`] returns the
//! translation for the configured language, falling back to the key when no
//! translation exists. Tracing/log output stays English regardless.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::error::{DocstitchError, Result};

/// Supported message languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    /// English (message keys are used as-is).
    #[default]
    En,
    /// Simplified Chinese.
    Zh,
}

impl std::str::FromStr for Lang {
    type Err = DocstitchError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "en" => Ok(Self::En),
            "zh" => Ok(Self::Zh),
            other => Err(DocstitchError::config(format!(
                "unsupported language '{other}': expected 'en' or 'zh'"
            ))),
        }
    }
}

/// Simplified Chinese translations, keyed by the English message.
static ZH: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("Merge complete!", "合并完成！"),
        ("Pages:", "页面数:"),
        ("Lines:", "行数:"),
        ("Output:", "输出:"),
        ("Config initialized at:", "配置文件已创建于:"),
    ])
});

/// Look up the translation of `key` for `lang`.
pub fn tr(lang: Lang, key: &str) -> &str {
    match lang {
        Lang::En => key,
        Lang::Zh => ZH.get(key).copied().unwrap_or(key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_is_identity() {
        assert_eq!(tr(Lang::En, "Merge complete!"), "Merge complete!");
    }

    #[test]
    fn chinese_translates_known_keys() {
        assert_eq!(tr(Lang::Zh, "Merge complete!"), "合并完成！");
    }

    #[test]
    fn chinese_falls_back_for_unknown_keys() {
        assert_eq!(tr(Lang::Zh, "No such key"), "No such key");
    }

    #[test]
    fn lang_parsing() {
        assert_eq!("en".parse::<Lang>().unwrap(), Lang::En);
        assert_eq!("zh".parse::<Lang>().unwrap(), Lang::Zh);
        assert!("fr".parse::<Lang>().is_err());
    }
}
