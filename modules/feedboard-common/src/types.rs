use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FeedboardError;

// --- Content ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    News,
    Recommendation,
    Social,
}

impl ContentType {
    pub const ALL: [ContentType; 3] = [
        ContentType::News,
        ContentType::Recommendation,
        ContentType::Social,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::News => "news",
            ContentType::Recommendation => "recommendation",
            ContentType::Social => "social",
        }
    }

    /// Rank used by the `popular` sort: social > news > recommendation.
    pub fn popularity(&self) -> u8 {
        match self {
            ContentType::Social => 3,
            ContentType::News => 2,
            ContentType::Recommendation => 1,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = FeedboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "news" => Ok(ContentType::News),
            "recommendation" => Ok(ContentType::Recommendation),
            "social" => Ok(ContentType::Social),
            other => Err(FeedboardError::UnknownContentType(other.to_string())),
        }
    }
}

/// A single piece of content from one of the mock providers.
///
/// Immutable once fetched. Favorite status lives in the dashboard's
/// favorites set, not on the item; `is_favorite` is only carried through
/// from the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub category: String,
    pub published_at: DateTime<Utc>,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
}

// --- Criteria ---

/// The `contentType` basic filter: everything, or a single type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeFilter {
    #[default]
    All,
    News,
    Recommendation,
    Social,
}

impl TypeFilter {
    pub fn content_type(&self) -> Option<ContentType> {
        match self {
            TypeFilter::All => None,
            TypeFilter::News => Some(ContentType::News),
            TypeFilter::Recommendation => Some(ContentType::Recommendation),
            TypeFilter::Social => Some(ContentType::Social),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self.content_type() {
            Some(ct) => ct.as_str(),
            None => "all",
        }
    }
}

impl From<ContentType> for TypeFilter {
    fn from(ct: ContentType) -> Self {
        match ct {
            ContentType::News => TypeFilter::News,
            ContentType::Recommendation => TypeFilter::Recommendation,
            ContentType::Social => TypeFilter::Social,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeFilter {
    type Err = FeedboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(TypeFilter::All),
            other => other.parse::<ContentType>().map(TypeFilter::from),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRange {
    #[default]
    All,
    Today,
    Week,
    Month,
    Year,
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateRange::All => write!(f, "all"),
            DateRange::Today => write!(f, "today"),
            DateRange::Week => write!(f, "week"),
            DateRange::Month => write!(f, "month"),
            DateRange::Year => write!(f, "year"),
        }
    }
}

impl FromStr for DateRange {
    type Err = FeedboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(DateRange::All),
            "today" => Ok(DateRange::Today),
            "week" => Ok(DateRange::Week),
            "month" => Ok(DateRange::Month),
            "year" => Ok(DateRange::Year),
            other => Err(FeedboardError::UnknownDateRange(other.to_string())),
        }
    }
}

/// Sort key for the materialized view.
///
/// Keys arrive as free strings from the UI; anything not recognised is kept
/// verbatim and sorts as a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    Relevance,
    Popular,
    Unrecognized(String),
}

impl SortKey {
    pub fn as_str(&self) -> &str {
        match self {
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::Relevance => "relevance",
            SortKey::Popular => "popular",
            SortKey::Unrecognized(raw) => raw,
        }
    }
}

impl From<&str> for SortKey {
    fn from(s: &str) -> Self {
        match s {
            "newest" => SortKey::Newest,
            "oldest" => SortKey::Oldest,
            "relevance" => SortKey::Relevance,
            "popular" => SortKey::Popular,
            other => SortKey::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for SortKey {
    fn from(s: String) -> Self {
        SortKey::from(s.as_str())
    }
}

impl From<SortKey> for String {
    fn from(key: SortKey) -> Self {
        key.as_str().to_string()
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicFilters {
    pub content_type: TypeFilter,
    /// OR semantics; empty means no category restriction.
    pub categories: BTreeSet<String>,
    pub date_range: DateRange,
}

/// A change to exactly one [`BasicFilters`] field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum FilterChange {
    ContentType(TypeFilter),
    Categories(BTreeSet<String>),
    DateRange(DateRange),
}

impl BasicFilters {
    pub fn apply(&mut self, change: FilterChange) {
        match change {
            FilterChange::ContentType(value) => self.content_type = value,
            FilterChange::Categories(value) => self.categories = value,
            FilterChange::DateRange(value) => self.date_range = value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdvancedSearchCriteria {
    pub query: String,
    pub exact_phrase: String,
    pub exclude_words: Vec<String>,
    pub content_types: BTreeSet<ContentType>,
    pub categories: BTreeSet<String>,
    pub sources: BTreeSet<String>,
    /// Raw date bound as entered; unparseable or blank means "no bound".
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub sort_by: SortKey,
}

/// Which search drives the view. Free text and advanced criteria are
/// mutually exclusive; switching one in replaces the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "criteria", rename_all = "snake_case")]
pub enum SearchMode {
    Basic(String),
    Advanced(AdvancedSearchCriteria),
}

impl Default for SearchMode {
    fn default() -> Self {
        SearchMode::Basic(String::new())
    }
}

impl SearchMode {
    /// Free-text query; empty while advanced search is active.
    pub fn search_query(&self) -> &str {
        match self {
            SearchMode::Basic(query) => query,
            SearchMode::Advanced(_) => "",
        }
    }

    pub fn advanced(&self) -> Option<&AdvancedSearchCriteria> {
        match self {
            SearchMode::Basic(_) => None,
            SearchMode::Advanced(criteria) => Some(criteria),
        }
    }

    pub fn is_advanced(&self) -> bool {
        matches!(self, SearchMode::Advanced(_))
    }
}

// --- Sources ---

/// The remote endpoints content is fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedSource {
    News,
    Recommendations,
    Social,
    Search,
}

impl FeedSource {
    /// The three paginated feed sources, in fetch order.
    pub const FEEDS: [FeedSource; 3] = [
        FeedSource::News,
        FeedSource::Recommendations,
        FeedSource::Social,
    ];

    /// The content type a feed source produces. Search results are mixed.
    pub fn content_type(&self) -> Option<ContentType> {
        match self {
            FeedSource::News => Some(ContentType::News),
            FeedSource::Recommendations => Some(ContentType::Recommendation),
            FeedSource::Social => Some(ContentType::Social),
            FeedSource::Search => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedSource::News => "news",
            FeedSource::Recommendations => "recommendations",
            FeedSource::Social => "social",
            FeedSource::Search => "search",
        }
    }
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Wire types ---

/// One page from a feed endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPage {
    pub items: Vec<ContentItem>,
    pub page: u32,
    pub has_more: bool,
    pub total: u64,
}

/// One page from the search endpoint; echoes the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub items: Vec<ContentItem>,
    pub page: u32,
    pub has_more: bool,
    pub total: u64,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
