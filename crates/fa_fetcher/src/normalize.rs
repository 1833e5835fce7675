use fa_core::{ArticleSource, NormalizedArticle};

use crate::client::ApiArticle;

/// Map one API result into the batch schema. The free tier truncates
/// `content`, so the body is whichever of content/description is longer.
pub fn normalize(article: ApiArticle) -> NormalizedArticle {
    NormalizedArticle {
        article_id: article.url,
        headline: article.title,
        article_body: longer(article.content, article.description),
        published_at: article.published_at,
        source: ArticleSource {
            name: article.source.name,
        },
    }
}

fn longer(a: Option<String>, b: Option<String>) -> Option<String> {
    match (a, b) {
        (Some(a), Some(b)) => {
            if b.chars().count() > a.chars().count() {
                Some(b)
            } else {
                Some(a)
            }
        }
        (Some(a), None) => Some(a),
        (None, b) => b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ApiSource;

    fn api_article(content: Option<&str>, description: Option<&str>) -> ApiArticle {
        ApiArticle {
            url: Some("https://example.com/a".to_string()),
            title: Some("Markets rally".to_string()),
            description: description.map(str::to_string),
            content: content.map(str::to_string),
            published_at: Some("2025-10-27T10:30:00Z".to_string()),
            source: ApiSource {
                name: Some("Example Wire".to_string()),
            },
        }
    }

    #[test]
    fn prefers_the_longer_body_field() {
        let normalized = normalize(api_article(Some("short"), Some("a longer description")));
        assert_eq!(normalized.article_body.as_deref(), Some("a longer description"));

        let normalized = normalize(api_article(Some("the full article body text"), Some("blurb")));
        assert_eq!(
            normalized.article_body.as_deref(),
            Some("the full article body text")
        );
    }

    #[test]
    fn falls_back_when_one_field_is_missing() {
        let normalized = normalize(api_article(None, Some("only a description")));
        assert_eq!(normalized.article_body.as_deref(), Some("only a description"));

        let normalized = normalize(api_article(Some("only content"), None));
        assert_eq!(normalized.article_body.as_deref(), Some("only content"));

        let normalized = normalize(api_article(None, None));
        assert!(normalized.article_body.is_none());
    }

    #[test]
    fn url_becomes_the_article_id() {
        let normalized = normalize(api_article(Some("body"), None));
        assert_eq!(
            normalized.article_id.as_deref(),
            Some("https://example.com/a")
        );
        assert_eq!(normalized.headline.as_deref(), Some("Markets rally"));
        assert_eq!(normalized.source.name.as_deref(), Some("Example Wire"));
    }
}
