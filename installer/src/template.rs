//! Default HomeHub configuration document
//!
//! The installer seeds every new deployment with this fixed document. The
//! access password is stored in plaintext; operators are told to change it
//! after the first login.

use serde::{Deserialize, Serialize};

use crate::error::InstallerResult;

const HEADER: &str = "# HomeHub configuration\n# Generated by homehub-install. Change the password after first login.\n";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeHubConfig {
    pub instance_name: String,
    pub password: String,
    pub features: Features,
    pub family_members: Vec<String>,
    pub reminder_categories: Vec<ReminderCategory>,
    pub theme: Theme,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Features {
    pub shopping_list: bool,
    pub media_tracker: bool,
    pub chores: bool,
    pub calendar: bool,
    pub reminders: bool,
    pub notice_board: bool,
    pub expense_tracker: bool,
    pub recipes: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderCategory {
    pub key: String,
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub background_color: String,
    pub text_color: String,
}

impl ReminderCategory {
    fn new(key: &str, label: &str, color: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            color: color.to_string(),
        }
    }
}

impl Default for HomeHubConfig {
    fn default() -> Self {
        Self {
            instance_name: "Our Home".to_string(),
            password: "homehub".to_string(),
            features: Features {
                shopping_list: true,
                media_tracker: true,
                chores: true,
                calendar: true,
                reminders: true,
                notice_board: true,
                expense_tracker: true,
                recipes: false,
            },
            family_members: ["Mom", "Dad", "Alex", "Emma"]
                .iter()
                .map(|name| name.to_string())
                .collect(),
            reminder_categories: vec![
                ReminderCategory::new("bills", "Bills", "#ef4444"),
                ReminderCategory::new("health", "Health", "#10b981"),
                ReminderCategory::new("school", "School", "#3b82f6"),
                ReminderCategory::new("household", "Household", "#f59e0b"),
                ReminderCategory::new("birthdays", "Birthdays", "#ec4899"),
            ],
            theme: Theme {
                primary_color: "#6366f1".to_string(),
                secondary_color: "#8b5cf6".to_string(),
                accent_color: "#f59e0b".to_string(),
                background_color: "#f9fafb".to_string(),
                text_color: "#111827".to_string(),
            },
        }
    }
}

impl HomeHubConfig {
    /// Render the document written to disk
    pub fn render(&self) -> InstallerResult<String> {
        let body = serde_yaml::to_string(self)?;
        Ok(format!("{HEADER}{body}"))
    }
}

/// The fixed configuration document every run writes
pub fn default_document() -> InstallerResult<String> {
    HomeHubConfig::default().render()
}
