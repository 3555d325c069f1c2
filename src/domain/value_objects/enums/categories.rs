use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// Member segment. Governs validation rules and which offers can be picked.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Child,
    Woman,
    Adult,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Child, Category::Woman, Category::Adult];

    /// Value stored in the `category` columns.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Child => "Enfant",
            Category::Woman => "Femme",
            Category::Adult => "Adulte",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    /// Accepts the stored French names and the English API names.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "enfant" | "child" => Ok(Category::Child),
            "femme" | "woman" => Ok(Category::Woman),
            "adulte" | "adult" => Ok(Category::Adult),
            other => Err(format!("Unsupported category: {}", other)),
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
