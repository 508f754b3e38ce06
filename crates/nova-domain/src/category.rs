//! The fixed set of spending and income categories.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Categorises transactions for breakdown reporting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    Housing,
    Food,
    Transportation,
    Utilities,
    Insurance,
    Healthcare,
    Savings,
    Personal,
    Entertainment,
    Salary,
    Business,
    Shopping,
    Education,
}

impl Category {
    pub const ALL: [Category; 13] = [
        Category::Housing,
        Category::Food,
        Category::Transportation,
        Category::Utilities,
        Category::Insurance,
        Category::Healthcare,
        Category::Savings,
        Category::Personal,
        Category::Entertainment,
        Category::Salary,
        Category::Business,
        Category::Shopping,
        Category::Education,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Housing => "Housing",
            Category::Food => "Food",
            Category::Transportation => "Transportation",
            Category::Utilities => "Utilities",
            Category::Insurance => "Insurance",
            Category::Healthcare => "Healthcare",
            Category::Savings => "Savings",
            Category::Personal => "Personal",
            Category::Entertainment => "Entertainment",
            Category::Salary => "Salary",
            Category::Business => "Business",
            Category::Shopping => "Shopping",
            Category::Education => "Education",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ParseCategoryError(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCategoryError(pub String);

impl fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category `{}`", self.0)
    }
}

impl std::error::Error for ParseCategoryError {}
