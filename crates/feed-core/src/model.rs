//! Gateway data model.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// Categories a report can belong to, in display order.
pub const CATEGORIES: &[&str] = &[
    "Energy",
    "Defense",
    "Economy",
    "Politics",
    "Technology",
    "Security",
];

/// A feed reader profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub focus_categories: Vec<String>,
    #[serde(default)]
    pub focus_tags: Vec<String>,
}

impl User {
    /// Label used by user pickers: `name — role`.
    pub fn label(&self) -> String {
        format!("{} — {}", self.name, self.role)
    }
}

/// A published report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub published_at: String,
}

impl Report {
    /// Calendar date of publication.
    ///
    /// Accepts RFC 3339 timestamps as well as bare `YYYY-MM-DD` dates.
    pub fn published_date(&self) -> Option<NaiveDate> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(&self.published_at) {
            return Some(ts.date_naive());
        }
        NaiveDate::parse_from_str(&self.published_at, "%Y-%m-%d").ok()
    }
}

/// A ranked report as returned by the feed endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedItem {
    #[serde(flatten)]
    pub report: Report,
    pub score: f64,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why_it_matters: Option<String>,
    #[serde(default)]
    pub signals: BTreeMap<String, f64>,
}

impl FeedItem {
    pub fn id(&self) -> &str {
        &self.report.id
    }
}

/// Body of `GET /api/feed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedResponse {
    pub user_id: String,
    pub page: u32,
    pub page_size: u32,
    pub total: u32,
    pub items: Vec<FeedItem>,
}

/// The slice of a feed response the client caches per query key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedPage {
    pub items: Vec<FeedItem>,
    pub total: u32,
}

impl From<FeedResponse> for FeedPage {
    fn from(resp: FeedResponse) -> Self {
        Self {
            items: resp.items,
            total: resp.total,
        }
    }
}
