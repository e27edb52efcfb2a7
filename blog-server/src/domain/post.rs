use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum PostStatus {
    Draft,
    Published,
}

impl PostStatus {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            other => Err(DomainError::Unexpected(format!("unknown post status: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Post {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) slug: String,
    pub(crate) author_id: i64,
    pub(crate) body: String,
    pub(crate) publish: DateTime<Utc>,
    pub(crate) created: DateTime<Utc>,
    pub(crate) updated: DateTime<Utc>,
    pub(crate) status: PostStatus,
}

impl Post {
    /// A post is visible to readers once it is published and its publish
    /// timestamp is not in the future.
    pub(crate) fn is_visible(&self, now: DateTime<Utc>) -> bool {
        self.status == PostStatus::Published && self.publish <= now
    }

    /// Calendar day (UTC) the post is filed under.
    pub(crate) fn publish_date(&self) -> NaiveDate {
        self.publish.date_naive()
    }

    /// Canonical detail path, `/blog/{year}/{month}/{day}/{slug}/`.
    pub(crate) fn absolute_path(&self) -> String {
        let date = self.publish_date();
        format!(
            "/blog/{}/{}/{}/{}/",
            date.year(),
            date.month(),
            date.day(),
            self.slug
        )
    }
}

/// Composite key used by the detail page: publish day plus slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PostDateSlug {
    pub(crate) date: NaiveDate,
    pub(crate) slug: String,
}

impl PostDateSlug {
    /// Returns `None` for impossible calendar dates (e.g. month 13).
    pub(crate) fn from_parts(year: i32, month: u32, day: u32, slug: impl Into<String>) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        Some(Self {
            date,
            slug: slug.into(),
        })
    }

    /// Half-open UTC range `[start, end)` covering the publish day.
    pub(crate) fn day_range(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let start = self.date.and_hms_opt(0, 0, 0)?.and_utc();
        let end = self
            .date
            .checked_add_days(Days::new(1))?
            .and_hms_opt(0, 0, 0)?
            .and_utc();
        Some((start, end))
    }

    pub(crate) fn matches(&self, post: &Post) -> bool {
        post.slug == self.slug && post.publish_date() == self.date
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::{Post, PostDateSlug, PostStatus};

    fn post_at(status: PostStatus, publish: chrono::DateTime<Utc>) -> Post {
        Post {
            id: 1,
            title: "Who was Django Reinhardt?".to_string(),
            slug: "who-was-django-reinhardt".to_string(),
            author_id: 1,
            body: "body".to_string(),
            publish,
            created: publish,
            updated: publish,
            status,
        }
    }

    #[test]
    fn draft_post_is_never_visible() {
        let now = Utc::now();
        let post = post_at(PostStatus::Draft, now - Duration::days(1));
        assert!(!post.is_visible(now));
    }

    #[test]
    fn future_published_post_is_not_visible_yet() {
        let now = Utc::now();
        let post = post_at(PostStatus::Published, now + Duration::minutes(5));
        assert!(!post.is_visible(now));
        assert!(post.is_visible(now + Duration::minutes(5)));
    }

    #[test]
    fn absolute_path_uses_unpadded_date_parts() {
        let publish = Utc.with_ymd_and_hms(2024, 1, 5, 13, 30, 0).unwrap();
        let post = post_at(PostStatus::Published, publish);
        assert_eq!(post.absolute_path(), "/blog/2024/1/5/who-was-django-reinhardt/");
    }

    #[test]
    fn date_slug_rejects_impossible_dates() {
        assert!(PostDateSlug::from_parts(2024, 13, 1, "x").is_none());
        assert!(PostDateSlug::from_parts(2023, 2, 29, "x").is_none());
        assert!(PostDateSlug::from_parts(2024, 2, 29, "x").is_some());
    }

    #[test]
    fn date_slug_day_range_spans_one_utc_day() {
        let key = PostDateSlug::from_parts(2024, 12, 31, "x").expect("valid date");
        let (start, end) = key.day_range().expect("range must exist");
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn date_slug_matches_only_same_day_and_slug() {
        let publish = Utc.with_ymd_and_hms(2024, 1, 5, 23, 59, 59).unwrap();
        let post = post_at(PostStatus::Published, publish);

        let same = PostDateSlug::from_parts(2024, 1, 5, "who-was-django-reinhardt").unwrap();
        let other_day = PostDateSlug::from_parts(2024, 1, 6, "who-was-django-reinhardt").unwrap();
        let other_slug = PostDateSlug::from_parts(2024, 1, 5, "another").unwrap();

        assert!(same.matches(&post));
        assert!(!other_day.matches(&post));
        assert!(!other_slug.matches(&post));
    }

    #[test]
    fn status_parses_known_values_only() {
        assert_eq!("published".parse::<PostStatus>().unwrap(), PostStatus::Published);
        assert_eq!("draft".parse::<PostStatus>().unwrap(), PostStatus::Draft);
        assert!("PB".parse::<PostStatus>().is_err());
    }
}
