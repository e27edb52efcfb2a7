use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::data::post_repository::PostRepository;
use crate::domain::error::DomainError;
use crate::domain::form::{EMAIL_POST_FORM, EmailPostForm, FieldErrors, FormState, RawForm};
use crate::domain::post::Post;
use crate::infrastructure::mailer::{EmailMessage, Mailer};

#[derive(Debug, Clone)]
pub(crate) struct ShareOutcome {
    pub(crate) post: Post,
    pub(crate) form: FormState,
    pub(crate) sent: bool,
}

pub(crate) struct ShareService<P: PostRepository> {
    posts: P,
    mailer: Arc<dyn Mailer>,
    site_url: String,
    mail_from: String,
}

impl<P: PostRepository> ShareService<P> {
    pub(crate) fn new(
        posts: P,
        mailer: Arc<dyn Mailer>,
        site_url: impl Into<String>,
        mail_from: impl Into<String>,
    ) -> Self {
        Self {
            posts,
            mailer,
            site_url: site_url.into(),
            mail_from: mail_from.into(),
        }
    }

    /// Empty share form for a visible post.
    pub(crate) async fn share_form(&self, post_id: i64) -> Result<ShareOutcome, DomainError> {
        let post = self.posts.get_published_by_id(Utc::now(), post_id).await?;
        Ok(ShareOutcome {
            post,
            form: FormState::unbound(EMAIL_POST_FORM),
            sent: false,
        })
    }

    /// Validates the submitted form and emails the post link.
    ///
    /// `sent` is true as soon as the form validates; a transport failure is
    /// only logged.
    pub(crate) async fn share_post(
        &self,
        post_id: i64,
        raw: RawForm,
    ) -> Result<ShareOutcome, DomainError> {
        let post = self.posts.get_published_by_id(Utc::now(), post_id).await?;

        let form = match EmailPostForm::validate(&raw) {
            Ok(form) => form,
            Err(errors) => {
                return Ok(ShareOutcome {
                    post,
                    form: FormState::bound(EMAIL_POST_FORM, &raw, errors),
                    sent: false,
                });
            }
        };

        let message = compose_share_email(&post, &form, &self.site_url, &self.mail_from);
        // Transport failures are logged only; the reader is told the message went out.
        match self.mailer.send(&message).await {
            Ok(()) => info!(post_id, to = %form.to, "share email dispatched"),
            Err(err) => warn!(post_id, to = %form.to, error = %err, "share email delivery failed"),
        }

        Ok(ShareOutcome {
            post,
            form: FormState::bound(EMAIL_POST_FORM, &raw, FieldErrors::new()),
            sent: true,
        })
    }
}

pub(crate) fn compose_share_email(
    post: &Post,
    form: &EmailPostForm,
    site_url: &str,
    mail_from: &str,
) -> EmailMessage {
    let post_url = format!("{}{}", site_url.trim_end_matches('/'), post.absolute_path());
    EmailMessage {
        subject: format!("{} recommends you read {}", form.name, post.title),
        body: format!(
            "Read {} at {}\n\n{}'s comments: {}",
            post.title, post_url, form.name, form.comments
        ),
        from: mail_from.to_string(),
        to: vec![form.to.clone()],
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, TimeZone, Utc};

    use super::{ShareService, compose_share_email};
    use crate::application::test_support::{
        FakeMailer, FakePostRepo, published_days_ago, sample_post,
    };
    use crate::domain::error::DomainError;
    use crate::domain::form::{EmailPostForm, INVALID_EMAIL_MESSAGE, RawForm};
    use crate::domain::post::PostStatus;

    const SITE_URL: &str = "https://blog.example.com";
    const MAIL_FROM: &str = "blog@example.com";

    fn service(posts: FakePostRepo, mailer: FakeMailer) -> ShareService<FakePostRepo> {
        ShareService::new(posts, Arc::new(mailer), SITE_URL, MAIL_FROM)
    }

    fn raw(pairs: &[(&str, &str)]) -> RawForm {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    fn valid_submission() -> RawForm {
        raw(&[
            ("name", "Ann"),
            ("email", "ann@example.com"),
            ("to", "bob@example.com"),
            ("comments", "You will like it"),
        ])
    }

    #[tokio::test]
    async fn share_form_is_unbound_and_not_sent() {
        let mailer = FakeMailer::default();
        let service = service(FakePostRepo::with_posts(vec![published_days_ago(1, 1)]), mailer.clone());

        let outcome = service.share_form(1).await.expect("form must load");

        assert!(!outcome.sent);
        assert!(!outcome.form.is_bound);
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn share_valid_submission_sends_exactly_one_email() {
        let mailer = FakeMailer::default();
        let service = service(FakePostRepo::with_posts(vec![published_days_ago(1, 1)]), mailer.clone());

        let outcome = service
            .share_post(1, valid_submission())
            .await
            .expect("share must succeed");

        assert!(outcome.sent);
        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].subject.contains("Ann"));
        assert!(sent[0].subject.contains(&outcome.post.title));
        assert_eq!(sent[0].to, vec!["bob@example.com".to_string()]);
        assert_eq!(sent[0].from, MAIL_FROM);
    }

    #[tokio::test]
    async fn share_invalid_recipient_sends_nothing() {
        let mailer = FakeMailer::default();
        let service = service(FakePostRepo::with_posts(vec![published_days_ago(1, 1)]), mailer.clone());

        let mut submission = valid_submission();
        submission.insert("to".to_string(), "bob-at-example".to_string());

        let outcome = service
            .share_post(1, submission)
            .await
            .expect("invalid form is not an error");

        assert!(!outcome.sent);
        assert_eq!(outcome.form.errors["to"], vec![INVALID_EMAIL_MESSAGE.to_string()]);
        assert_eq!(outcome.form.data["to"], "bob-at-example");
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn share_reports_sent_even_when_transport_fails() {
        let mailer = FakeMailer::failing();
        let service = service(FakePostRepo::with_posts(vec![published_days_ago(1, 1)]), mailer.clone());

        let outcome = service
            .share_post(1, valid_submission())
            .await
            .expect("transport failure must not surface");

        assert!(outcome.sent);
        assert_eq!(mailer.sent().len(), 1);
    }

    #[tokio::test]
    async fn share_unknown_or_draft_post_is_not_found() {
        let draft = sample_post(2, "draft", PostStatus::Draft, Utc::now() - Duration::days(1));
        let mailer = FakeMailer::default();
        let service = service(FakePostRepo::with_posts(vec![draft]), mailer.clone());

        for id in [2, 3] {
            let err = service
                .share_post(id, valid_submission())
                .await
                .expect_err("post must be missing");
            assert!(matches!(err, DomainError::NotFound(_)));
        }
        assert!(matches!(
            service.share_form(2).await,
            Err(DomainError::NotFound(_))
        ));
        assert!(mailer.sent().is_empty());
    }

    #[test]
    fn compose_share_email_uses_fixed_templates() {
        let publish = Utc.with_ymd_and_hms(2024, 1, 5, 10, 0, 0).unwrap();
        let mut post = sample_post(7, "rust-ownership", PostStatus::Published, publish);
        post.title = "Rust ownership".to_string();
        let form = EmailPostForm {
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            to: "bob@example.com".to_string(),
            comments: "Short and clear".to_string(),
        };

        let message = compose_share_email(&post, &form, "https://blog.example.com/", MAIL_FROM);

        assert_eq!(message.subject, "Ann recommends you read Rust ownership");
        assert_eq!(
            message.body,
            "Read Rust ownership at https://blog.example.com/blog/2024/1/5/rust-ownership/\n\nAnn's comments: Short and clear"
        );
    }
}
