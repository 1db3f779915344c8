//! Other content sections served by the same API.
//!
//! Slides, blog teasers and "why choose us" features load through the same
//! [`Loader`](crate::Loader) contract as counters, each with its own
//! fallback.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tally_core::CounterId;

/// Hero carousel slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// Identifier
    pub id: CounterId,
    /// Headline
    pub title: String,
    /// Secondary line
    #[serde(default)]
    pub subtitle: Option<String>,
    /// Background image path or URL
    #[serde(default)]
    pub image: Option<String>,
    /// Call-to-action label
    #[serde(default)]
    pub button_text: Option<String>,
    /// Call-to-action target
    #[serde(default, alias = "link")]
    pub button_link: Option<String>,
    /// Display order
    #[serde(default)]
    pub order: i32,
}

/// Blog teaser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    /// Identifier
    pub id: CounterId,
    /// Title
    pub title: String,
    /// URL slug
    #[serde(default)]
    pub slug: Option<String>,
    /// Short summary
    #[serde(default, alias = "summary")]
    pub excerpt: Option<String>,
    /// Cover image
    #[serde(default, alias = "featured_image")]
    pub image: Option<String>,
    /// Author display name
    #[serde(default)]
    pub author: Option<String>,
    /// Publication timestamp as served
    #[serde(default, alias = "created_at")]
    pub published_at: Option<String>,
}

/// "Why choose us" feature tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Identifier
    pub id: CounterId,
    /// Heading
    pub title: String,
    /// Body text
    #[serde(default)]
    pub description: String,
    /// Icon class
    #[serde(default)]
    pub icon: Option<String>,
    /// Display order
    #[serde(default)]
    pub order: i32,
}

/// Default slides.
#[must_use]
pub fn default_slides() -> Arc<[Slide]> {
    [
        (
            1u64,
            "Compassionate care, every day",
            "Personal support for seniors at home and in residence",
            "/static/slides/care.jpg",
        ),
        (
            2,
            "A community that feels like family",
            "Activities, friendship and dignity",
            "/static/slides/community.jpg",
        ),
    ]
    .into_iter()
    .zip(0..)
    .map(|((id, title, subtitle, image), order)| Slide {
        id: CounterId::from(id),
        title: title.to_string(),
        subtitle: Some(subtitle.to_string()),
        image: Some(image.to_string()),
        button_text: Some("Contact us".to_string()),
        button_link: Some("/contact".to_string()),
        order,
    })
    .collect()
}

/// Default blog teasers.
#[must_use]
pub fn default_blogs() -> Arc<[BlogPost]> {
    [
        (
            1u64,
            "Staying active after seventy",
            "staying-active",
            "Simple routines that keep joints moving and spirits up.",
        ),
        (
            2,
            "Choosing the right care plan",
            "choosing-care",
            "Questions to ask before deciding between home and residential care.",
        ),
    ]
    .into_iter()
    .map(|(id, title, slug, excerpt)| BlogPost {
        id: CounterId::from(id),
        title: title.to_string(),
        slug: Some(slug.to_string()),
        excerpt: Some(excerpt.to_string()),
        image: None,
        author: None,
        published_at: None,
    })
    .collect()
}

/// Default feature tiles.
#[must_use]
pub fn default_features() -> Arc<[Feature]> {
    [
        (
            1u64,
            "Qualified staff",
            "Every caregiver is certified and background checked.",
            "fa fa-certificate",
        ),
        (
            2,
            "Around the clock",
            "Support is available 24 hours a day, 7 days a week.",
            "fa fa-clock",
        ),
        (
            3,
            "Tailored plans",
            "Care is planned with each family and reviewed monthly.",
            "fa fa-clipboard-list",
        ),
    ]
    .into_iter()
    .zip(0..)
    .map(|((id, title, description, icon), order)| Feature {
        id: CounterId::from(id),
        title: title.to_string(),
        description: description.to_string(),
        icon: Some(icon.to_string()),
        order,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_accepts_link_alias() {
        let slide: Slide = serde_json::from_str(
            r#"{"id": 3, "title": "Open day", "link": "/events", "extra": true}"#,
        )
        .unwrap();
        assert_eq!(slide.button_link.as_deref(), Some("/events"));
        assert_eq!(slide.order, 0);
    }

    #[test]
    fn test_blog_aliases() {
        let post: BlogPost = serde_json::from_str(
            r#"{"id": "p1", "title": "Hello", "summary": "Hi", "created_at": "2024-05-01"}"#,
        )
        .unwrap();
        assert_eq!(post.excerpt.as_deref(), Some("Hi"));
        assert_eq!(post.published_at.as_deref(), Some("2024-05-01"));
    }

    #[test]
    fn test_feature_requires_title() {
        assert!(serde_json::from_str::<Feature>(r#"{"id": 1}"#).is_err());
    }

    #[test]
    fn test_fallbacks_non_empty() {
        assert_eq!(default_slides().len(), 2);
        assert_eq!(default_blogs().len(), 2);
        assert_eq!(default_features().len(), 3);
        assert!(default_features().iter().all(|f| f.icon.is_some()));
    }
}
