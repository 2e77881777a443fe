//! Synthetic content pages.
//!
//! Every item in a batch gets an id unique within the batch, a placeholder
//! image, and a publish time stepping back from `now` by a fixed interval
//! per source, so batches come out newest first.

use chrono::{DateTime, TimeDelta, Utc};
use feedboard_common::{ContentItem, ContentPage, ContentType, SearchPage, TypeFilter};

use crate::error::{Result, SourceError};

/// Shape of the items one mock provider produces.
struct Template {
    id_prefix: &'static str,
    content_type: ContentType,
    step_secs: i64,
    source: &'static str,
    url_base: Option<&'static str>,
    image_query: &'static str,
    title: fn(&str, u64) -> String,
    description: fn(&str) -> String,
}

const NEWS: Template = Template {
    id_prefix: "news",
    content_type: ContentType::News,
    step_secs: 3600,
    source: "NewsAPI",
    url_base: Some("https://example.com/news"),
    image_query: "breaking news",
    title: |cat, n| format!("Breaking: {cat} news update {n}"),
    description: |cat| {
        format!(
            "Latest developments in {cat}. This comprehensive report covers all the important \
             details you need to know about recent events and their implications."
        )
    },
};

const RECOMMENDATIONS: Template = Template {
    id_prefix: "rec",
    content_type: ContentType::Recommendation,
    step_secs: 7200,
    source: "RecommendationEngine",
    url_base: Some("https://example.com/recommendations"),
    image_query: "personalized content",
    title: |cat, n| format!("Recommended: {cat} insights {n}"),
    description: |cat| {
        format!(
            "Personalized {cat} content curated just for you based on your reading history \
             and preferences. Discover new perspectives and trending topics."
        )
    },
};

const SOCIAL: Template = Template {
    id_prefix: "social",
    content_type: ContentType::Social,
    step_secs: 1800,
    source: "SocialMediaAPI",
    url_base: None,
    image_query: "viral social media",
    title: |tag, n| format!("#{tag} viral post {n}"),
    description: |tag| {
        format!(
            "Trending content about #{tag} that's gaining massive engagement across social \
             platforms. Join the conversation and see what everyone's talking about."
        )
    },
};

pub const NEWS_PER_CATEGORY: u64 = 50;
pub const RECOMMENDATIONS_PER_CATEGORY: u64 = 32;
pub const SOCIAL_PER_HASHTAG: u64 = 72;
pub const SEARCH_TOTAL: u64 = 60;

pub fn news_page(
    categories: &[String],
    page: u32,
    limit: u32,
    now: DateTime<Utc>,
) -> Result<ContentPage> {
    Ok(ContentPage {
        items: batch_for_topics(&NEWS, categories, page, limit, now)?,
        page,
        has_more: page < 5,
        total: categories.len() as u64 * NEWS_PER_CATEGORY,
    })
}

pub fn recommendations_page(
    categories: &[String],
    page: u32,
    limit: u32,
    now: DateTime<Utc>,
) -> Result<ContentPage> {
    Ok(ContentPage {
        items: batch_for_topics(&RECOMMENDATIONS, categories, page, limit, now)?,
        page,
        has_more: page < 4,
        total: categories.len() as u64 * RECOMMENDATIONS_PER_CATEGORY,
    })
}

/// Social posts carry the hashtag as their category.
pub fn social_page(
    hashtags: &[String],
    page: u32,
    limit: u32,
    now: DateTime<Utc>,
) -> Result<ContentPage> {
    Ok(ContentPage {
        items: batch_for_topics(&SOCIAL, hashtags, page, limit, now)?,
        page,
        has_more: page < 6,
        total: hashtags.len() as u64 * SOCIAL_PER_HASHTAG,
    })
}

/// Search results cycle news, recommendation, social when no type is
/// requested. The category is the query's first space-separated word.
pub fn search_page(
    query: &str,
    content_type: TypeFilter,
    page: u32,
    limit: u32,
    now: DateTime<Utc>,
) -> Result<SearchPage> {
    let category = query
        .split(' ')
        .next()
        .filter(|word| !word.is_empty())
        .unwrap_or("general");
    let base = u64::from(page) * u64::from(limit);

    let mut items = Vec::with_capacity(limit as usize);
    for i in 0..limit {
        let offset = base + u64::from(i);
        let ct = content_type
            .content_type()
            .unwrap_or(ContentType::ALL[i as usize % ContentType::ALL.len()]);
        items.push(ContentItem {
            id: format!("search-{query}-{page}-{i}"),
            content_type: ct,
            title: format!("{query} search result {}", offset + 1),
            description: format!(
                "Search result for \"{query}\". This content matches your search criteria and \
                 provides relevant information about the topic you're looking for."
            ),
            image_url: Some(placeholder_image(query, "search result")),
            url: None,
            category: category.to_string(),
            published_at: step_back(now, offset, 3600)?,
            source: "SearchAPI".to_string(),
            is_favorite: Some(false),
        });
    }

    Ok(SearchPage {
        items,
        page,
        has_more: page < 3,
        total: SEARCH_TOTAL,
        query: query.to_string(),
    })
}

fn batch_for_topics(
    template: &Template,
    topics: &[String],
    page: u32,
    limit: u32,
    now: DateTime<Utc>,
) -> Result<Vec<ContentItem>> {
    let base = u64::from(page) * u64::from(limit);
    let mut items = Vec::with_capacity(topics.len() * limit as usize);

    for topic in topics {
        for i in 0..limit {
            let offset = base + u64::from(i);
            items.push(ContentItem {
                id: format!("{}-{topic}-{page}-{i}", template.id_prefix),
                content_type: template.content_type,
                title: (template.title)(topic, offset + 1),
                description: (template.description)(topic),
                image_url: Some(placeholder_image(topic, template.image_query)),
                url: template.url_base.map(|b| format!("{b}/{topic}/{offset}")),
                category: topic.clone(),
                published_at: step_back(now, offset, template.step_secs)?,
                source: template.source.to_string(),
                is_favorite: Some(false),
            });
        }
    }

    Ok(items)
}

fn placeholder_image(topic: &str, query: &str) -> String {
    format!("/placeholder.svg?height=200&width=300&query={topic} {query}")
}

/// `now - offset * step_secs`, or an error once that leaves chrono's range.
fn step_back(now: DateTime<Utc>, offset: u64, step_secs: i64) -> Result<DateTime<Utc>> {
    i64::try_from(offset)
        .ok()
        .and_then(|o| o.checked_mul(step_secs))
        .and_then(TimeDelta::try_seconds)
        .and_then(|delta| now.checked_sub_signed(delta))
        .ok_or(SourceError::TimestampOutOfRange { offset })
}
