//! Prompt-line detection and classification.
//!
//! A script is scanned line by line; every line that mentions the input
//! keyword is a prompt line and gets one [`Category`]. The order of the
//! returned categories is the order in which answers are fed to the child.

mod rules;
mod scan;
mod types;

pub use rules::{PromptRule, RuleSet};
pub use scan::{read_script_text, scan_script};
pub use types::Category;
