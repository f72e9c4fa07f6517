use regex::{Regex, RegexBuilder};

use super::types::Category;
use crate::config::ClassifyConfig;

const LINK_PATTERN: &str = r"target\s*link|url|website|enter\s+link";
const CONFIRM_PATTERN: &str = r"\(y/n\)|yes\s*or\s*no|do you want|confirm";

/// One (predicate, category) pair.
#[derive(Debug, Clone)]
pub struct PromptRule {
    pattern: Regex,
    category: Category,
}

impl PromptRule {
    pub fn new(pattern: &str, category: Category) -> Result<Self, regex::Error> {
        let pattern = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self { pattern, category })
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn matches(&self, line: &str) -> bool {
        self.pattern.is_match(line)
    }
}

/// Ordered rule list evaluated first-match-wins against every prompt line.
#[derive(Debug, Clone)]
pub struct RuleSet {
    keyword: String,
    rules: Vec<PromptRule>,
    fallback: Category,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            keyword: "input".to_string(),
            rules: builtin_rules(),
            fallback: Category::Confirm,
        }
    }
}

fn builtin_rules() -> Vec<PromptRule> {
    vec![
        PromptRule::new(LINK_PATTERN, Category::Link).expect("LINK_PATTERN is valid"),
        PromptRule::new(CONFIRM_PATTERN, Category::Confirm).expect("CONFIRM_PATTERN is valid"),
    ]
}

impl RuleSet {
    /// Built-in rules preceded by the user's rules from config.
    pub fn from_config(cfg: &ClassifyConfig) -> Result<Self, regex::Error> {
        let mut rules = Vec::with_capacity(cfg.rules.len() + 2);
        for rule in &cfg.rules {
            rules.push(PromptRule::new(&rule.pattern, rule.category)?);
        }
        rules.extend(builtin_rules());

        let keyword = match cfg.keyword.trim() {
            "" => "input".to_string(),
            k => k.to_lowercase(),
        };

        Ok(Self {
            keyword,
            rules,
            fallback: Category::Confirm,
        })
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn rules(&self) -> &[PromptRule] {
        &self.rules
    }

    /// `line` must already be lower-cased.
    pub fn is_prompt_line(&self, line: &str) -> bool {
        line.contains(&self.keyword)
    }

    pub fn classify_line(&self, line: &str) -> Category {
        self.rules
            .iter()
            .find(|rule| rule.matches(line))
            .map(PromptRule::category)
            .unwrap_or(self.fallback)
    }

    /// One category per prompt line, in file order.
    pub fn classify(&self, source: &str) -> Vec<Category> {
        let lowered = source.to_lowercase();
        script_lines(&lowered)
            .filter(|line| self.is_prompt_line(line))
            .map(|line| self.classify_line(line))
            .collect()
    }
}

/// Characters that end a line, including a bare `\r` and the Unicode
/// separators. A `\r\n` pair yields an empty piece between its halves,
/// which never contains the (non-empty) keyword.
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

fn script_lines(source: &str) -> impl Iterator<Item = &str> {
    source.split(&LINE_BREAKS[..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleConfig;
    use pretty_assertions::assert_eq;

    #[test]
    fn link_phrases_classify_as_link() {
        let rules = RuleSet::default();
        for line in [
            r#"link = input("Enter link: ")"#,
            r#"u = input("Paste the URL")"#,
            r#"site = input("Which website?")"#,
            r#"t = input("target link please")"#,
            r#"t = input("TargetLink")"#,
        ] {
            assert_eq!(rules.classify(line), vec![Category::Link], "{line}");
        }
    }

    #[test]
    fn confirm_phrases_classify_as_confirm() {
        let rules = RuleSet::default();
        for line in [
            r#"ok = input("Continue? (y/n) ")"#,
            r#"ok = input("yes or no")"#,
            r#"ok = input("Do you want to proceed?")"#,
            r#"ok = input("Please CONFIRM")"#,
        ] {
            assert_eq!(rules.classify(line), vec![Category::Confirm], "{line}");
        }
    }

    #[test]
    fn unmatched_prompt_defaults_to_confirm() {
        let rules = RuleSet::default();
        assert_eq!(
            rules.classify(r#"n = int(input("How many? "))"#),
            vec![Category::Confirm]
        );
    }

    #[test]
    fn link_rule_wins_over_confirm_rule() {
        let rules = RuleSet::default();
        assert_eq!(
            rules.classify(r#"x = input("Do you want to use this URL?")"#),
            vec![Category::Link]
        );
    }

    #[test]
    fn keeps_order_and_duplicates() {
        let source = r#"
import sys
a = input("Proceed? (y/n)")
# read the url from input
b = input("Enter link:")
print("done")
c = input("Proceed? (y/n)")
"#;
        assert_eq!(
            RuleSet::default().classify(source),
            vec![
                Category::Confirm,
                Category::Link,
                Category::Link,
                Category::Confirm
            ]
        );
    }

    #[test]
    fn bare_carriage_returns_separate_lines() {
        assert_eq!(
            RuleSet::default().classify("a = input('(y/n)')\rb = input('Enter link')\r"),
            vec![Category::Confirm, Category::Link]
        );
    }

    #[test]
    fn mixed_line_breaks_each_count_once() {
        let source = concat!(
            "a = input('url')\r\n",
            "b = input('ok?')\u{2028}",
            "c = input('(y/n)')\x0c",
            "d = input('site')",
        );
        assert_eq!(
            RuleSet::default().classify(source),
            vec![Category::Link, Category::Confirm, Category::Confirm, Category::Link]
        );
    }

    #[test]
    fn keyword_is_case_insensitive() {
        assert_eq!(
            RuleSet::default().classify("x = INPUT('website')"),
            vec![Category::Link]
        );
    }

    #[test]
    fn empty_source_has_no_prompts() {
        assert!(RuleSet::default().classify("").is_empty());
        assert!(RuleSet::default().classify("print('hi')\n").is_empty());
    }

    #[test]
    fn user_rules_run_before_builtins() {
        let cfg = ClassifyConfig {
            keyword: "read".to_string(),
            rules: vec![RuleConfig {
                pattern: "confirm".to_string(),
                category: Category::Link,
            }],
        };
        let rules = RuleSet::from_config(&cfg).unwrap();
        assert_eq!(rules.keyword(), "read");
        assert_eq!(rules.rules().len(), 3);
        assert_eq!(
            rules.classify("read -r v # confirm\nread -r w # url\ninput()"),
            vec![Category::Link, Category::Link]
        );
    }

    #[test]
    fn invalid_user_rule_is_rejected() {
        let cfg = ClassifyConfig {
            rules: vec![RuleConfig {
                pattern: "(unclosed".to_string(),
                category: Category::Link,
            }],
            ..ClassifyConfig::default()
        };
        assert!(RuleSet::from_config(&cfg).is_err());
    }

    #[test]
    fn blank_keyword_falls_back_to_input() {
        let cfg = ClassifyConfig {
            keyword: "  ".to_string(),
            rules: Vec::new(),
        };
        assert_eq!(RuleSet::from_config(&cfg).unwrap().keyword(), "input");
    }
}
