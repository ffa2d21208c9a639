use crate::error::WasendError;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Sales-funnel tag applied to every contact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    Cartera,
    Top,
    Occasional,
    Recover,
    Project,
}

impl Category {
    pub fn all() -> &'static [Category] {
        &[
            Category::Cartera,
            Category::Top,
            Category::Occasional,
            Category::Recover,
            Category::Project,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Cartera => "cartera",
            Category::Top => "top",
            Category::Occasional => "occasional",
            Category::Recover => "recover",
            Category::Project => "project",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Cartera => "Portfolio clients",
            Category::Top => "Clients who buy the most",
            Category::Occasional => "Occasional buyers",
            Category::Recover => "Clients to win back",
            Category::Project => "Project clients",
        }
    }

    /// Only project contacts carry project notes.
    pub fn keeps_project_info(self) -> bool {
        self == Category::Project
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = WasendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cartera" => Ok(Category::Cartera),
            "top" => Ok(Category::Top),
            "occasional" => Ok(Category::Occasional),
            "recover" => Ok(Category::Recover),
            "project" => Ok(Category::Project),
            other => Err(WasendError::InvalidCategory(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// CategoryFilter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => c == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(c) => f.write_str(c.as_str()),
        }
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = WasendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(CategoryFilter::All),
            other => other.parse().map(CategoryFilter::Only),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
