//! Service-level integration tests
//!
//! Wire the feed and notification services to the same in-memory data and
//! walk through what a signed-in viewer sees.
//!
//! Run with: cargo test integration_tests

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Duration;

    use crate::adapters::EnglishRelativeTime;
    use crate::app::{FeedService, NotificationService};
    use crate::domain::entities::{AttachmentKind, NotificationType, Viewer};
    use crate::domain::ports::SessionVerifier;
    use crate::test_utils::{
        fixed_now, test_notification, test_post, test_post_by, test_profile, FixedClock,
        InMemoryFollowRepository, InMemoryNotificationRepository, InMemoryPostRepository,
        InMemoryProfileRepository, StaticSessionVerifier,
    };

    fn viewer() -> Viewer {
        Viewer {
            id: "me".into(),
            display_name: Some("Me".into()),
        }
    }

    /// Token resolves to a viewer, whose feed and notifications line up
    #[tokio::test]
    async fn signed_in_viewer_sees_feed_and_notifications() {
        let sessions = StaticSessionVerifier::new().with_session("token-1", viewer());
        let viewer = sessions.verify("token-1").await.unwrap().unwrap();

        let mut video_post = test_post("p-video", "jane");
        video_post.media_urls = vec!["https://cdn.test/clip.MOV?sig=1".into()];
        let mut own_post = test_post("p-own", "me");
        own_post.created_at = Some(fixed_now() - Duration::hours(2));

        let feed_service = FeedService::new(
            Arc::new(
                InMemoryPostRepository::new()
                    .with_post(test_post_by("stranger"))
                    .with_post(video_post)
                    .with_post(own_post),
            ),
            Arc::new(InMemoryProfileRepository::new().with_profile(test_profile("jane"))),
            Arc::new(
                InMemoryFollowRepository::new()
                    .with_edge("me", "jane")
                    .with_edge("jane", "me"),
            ),
        );

        let feed = feed_service.generate_feed(&viewer, None, 0).await.unwrap();

        // Own post is newest but jane is followed, so hers leads
        let ids: Vec<&str> = feed.posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids[0], "p-video");
        assert_eq!(ids[1], "p-own");
        assert_eq!(feed.posts[0].attachments[0].kind, AttachmentKind::Video);
        assert_eq!(feed.posts[0].user.followers_count, 1);
        assert_eq!(feed.posts[1].user.name, "Me");
        assert_eq!(feed.posts[1].user.following_count, 1);
        assert_eq!(feed.posts[2].user.name, "User");

        let mut follow = test_notification("n1", NotificationType::Follow, Some(test_profile("jane")));
        follow.recipient_id = viewer.id.clone();
        follow.created_at = Some(fixed_now() - Duration::minutes(5));

        let notification_service = NotificationService::new(
            Arc::new(InMemoryNotificationRepository::new().with_row(follow)),
            Arc::new(FixedClock::default()),
            Arc::new(EnglishRelativeTime),
        );

        let list = notification_service.list(&viewer, None).await.unwrap();

        assert_eq!(list.unread_count, 1);
        assert_eq!(list.notifications[0].message, "Jane started following you.");
        assert_eq!(list.notifications[0].time_ago, "5 minutes ago");

        notification_service.mark_all_read(&viewer).await.unwrap();
        assert_eq!(notification_service.unread_count(&viewer).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn unknown_token_is_rejected() {
        let sessions = StaticSessionVerifier::new().with_session("token-1", viewer());

        assert!(sessions.verify("nope").await.unwrap().is_none());
    }
}
