use std::fmt;

use serde::{Deserialize, Serialize};

/// What a prompt line is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Link,
    Confirm,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Link => f.write_str("link"),
            Category::Confirm => f.write_str("confirm"),
        }
    }
}
