//! Turns a category sequence into the text written to a child's stdin.

use std::path::Path;

use crate::classify::{scan_script, Category, RuleSet};
use crate::error::ScanError;

/// Values substituted for each category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerConfig {
    pub link: String,
    pub confirm: String,
}

impl AnswerConfig {
    pub fn new(link: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            confirm: "y".to_string(),
        }
    }

    pub fn answer(&self, category: Category) -> &str {
        match category {
            Category::Link => &self.link,
            Category::Confirm => &self.confirm,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptPlan {
    pub categories: Vec<Category>,
    pub values: Vec<String>,
    pub input: String,
}

pub fn answers_for(categories: &[Category], answers: &AnswerConfig) -> Vec<String> {
    categories
        .iter()
        .map(|c| answers.answer(*c).to_string())
        .collect()
}

/// Newline-joined values plus a trailing newline; no values gives `"\n"`.
pub fn input_blob(values: &[String]) -> String {
    let mut blob = values.join("\n");
    blob.push('\n');
    blob
}

pub fn plan_source(source: &str, rules: &RuleSet, answers: &AnswerConfig) -> ScriptPlan {
    plan_categories(rules.classify(source), answers)
}

pub async fn plan_script(
    path: &Path,
    rules: &RuleSet,
    answers: &AnswerConfig,
) -> Result<ScriptPlan, ScanError> {
    let categories = scan_script(path, rules).await?;
    Ok(plan_categories(categories, answers))
}

fn plan_categories(categories: Vec<Category>, answers: &AnswerConfig) -> ScriptPlan {
    let values = answers_for(&categories, answers);
    let input = input_blob(&values);
    ScriptPlan {
        categories,
        values,
        input,
    }
}
