//! CacheInvalidator - Marks cached queries stale on remote changes.
//!
//! | Event | Invalidated keys |
//! |-------|------------------|
//! | `blog:created` | `blogs`, `trending-blogs` |
//! | `blog:updated` | `blog/{id}`, `blogs` |
//! | `blog:deleted` | `blog/{id}`, `blogs`, `trending-blogs` |
//! | `like:added` | `blog/{blogId}`, `blogs`, `trending-blogs` |
//! | `comment:added` | `blog/{blogId}`, `blog-comments/{blogId}` |
//! | `follow:added` | `follow-suggestions`, `profile/{userId}` |
//!
//! Everything except `follow:added` is gated behind `invalidate_blogs`.

use std::sync::Arc;

use crate::adapters::events::InMemoryEventBus;
use crate::domain::foundation::DomainError;
use crate::domain::realtime::payloads::{BlogChanged, BlogDeleted, CommentAdded, FollowAdded, LikeAdded};
use crate::domain::realtime::{EventType, RealtimeEvent};
use crate::ports::{EventHandler, QueryCache, QueryKey, Subscription};

pub const BLOGS: &str = "blogs";
pub const TRENDING_BLOGS: &str = "trending-blogs";
pub const BLOG: &str = "blog";
pub const BLOG_COMMENTS: &str = "blog-comments";
pub const FOLLOW_SUGGESTIONS: &str = "follow-suggestions";
pub const PROFILE: &str = "profile";

/// Event types this consumer reacts to.
pub const CACHE_EVENT_TYPES: &[EventType] = &[
    EventType::BlogCreated,
    EventType::BlogUpdated,
    EventType::BlogDeleted,
    EventType::LikeAdded,
    EventType::CommentAdded,
    EventType::FollowAdded,
];

/// Translates blog and social events into cache invalidations.
pub struct CacheInvalidator {
    cache: Arc<dyn QueryCache>,
    invalidate_blogs: bool,
}

impl CacheInvalidator {
    pub fn new(cache: Arc<dyn QueryCache>, invalidate_blogs: bool) -> Self {
        Self {
            cache,
            invalidate_blogs,
        }
    }

    /// Registers for every type in [`CACHE_EVENT_TYPES`].
    pub fn subscribe(self: Arc<Self>, bus: &InMemoryEventBus) -> Subscription {
        bus.on_all(CACHE_EVENT_TYPES, self)
    }

    fn keys_for(&self, event: &RealtimeEvent) -> Result<Vec<QueryKey>, DomainError> {
        if event.event_type == EventType::FollowAdded {
            let follow: FollowAdded = event.payload_as()?;
            return Ok(vec![
                QueryKey::family(FOLLOW_SUGGESTIONS),
                QueryKey::entry(PROFILE, follow.user_id),
            ]);
        }

        if !self.invalidate_blogs {
            return Ok(Vec::new());
        }

        let keys = match event.event_type {
            EventType::BlogCreated => vec![QueryKey::family(BLOGS), QueryKey::family(TRENDING_BLOGS)],
            EventType::BlogUpdated => {
                let blog: BlogChanged = event.payload_as()?;
                let mut keys = Vec::with_capacity(2);
                if let Some(id) = blog.id {
                    keys.push(QueryKey::entry(BLOG, id));
                }
                keys.push(QueryKey::family(BLOGS));
                keys
            }
            EventType::BlogDeleted => {
                let blog: BlogDeleted = event.payload_as()?;
                vec![
                    QueryKey::entry(BLOG, blog.id),
                    QueryKey::family(BLOGS),
                    QueryKey::family(TRENDING_BLOGS),
                ]
            }
            EventType::LikeAdded => {
                let like: LikeAdded = event.payload_as()?;
                vec![
                    QueryKey::entry(BLOG, like.blog_id),
                    QueryKey::family(BLOGS),
                    QueryKey::family(TRENDING_BLOGS),
                ]
            }
            EventType::CommentAdded => {
                let comment: CommentAdded = event.payload_as()?;
                vec![
                    QueryKey::entry(BLOG, &comment.blog_id),
                    QueryKey::entry(BLOG_COMMENTS, comment.blog_id),
                ]
            }
            _ => Vec::new(),
        };
        Ok(keys)
    }
}

impl EventHandler for CacheInvalidator {
    fn handle(&self, event: &RealtimeEvent) -> Result<(), DomainError> {
        for key in self.keys_for(event)? {
            tracing::debug!(event_type = %event.event_type, key = %key, "Invalidating cached query");
            self.cache.invalidate(&key);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "CacheInvalidator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::consumers::test_support::RecordingCache;
    use crate::domain::foundation::ErrorCode;
    use serde_json::json;

    fn invalidator(invalidate_blogs: bool) -> (Arc<RecordingCache>, CacheInvalidator) {
        let cache = Arc::new(RecordingCache::default());
        let invalidator = CacheInvalidator::new(cache.clone(), invalidate_blogs);
        (cache, invalidator)
    }

    #[test]
    fn blog_created_invalidates_lists() {
        let (cache, invalidator) = invalidator(true);
        invalidator
            .handle(&RealtimeEvent::new(
                EventType::BlogCreated,
                json!({"id": "b1", "title": "Hello", "author": {"name": "Ada"}}),
            ))
            .unwrap();

        assert_eq!(cache.rendered(), vec!["blogs", "trending-blogs"]);
    }

    #[test]
    fn blog_updated_invalidates_entry_and_list() {
        let (cache, invalidator) = invalidator(true);
        invalidator
            .handle(&RealtimeEvent::new(EventType::BlogUpdated, json!({"id": "b1"})))
            .unwrap();

        assert_eq!(cache.rendered(), vec!["blog/b1", "blogs"]);
    }

    #[test]
    fn blog_deleted_invalidates_everything_blog_related() {
        let (cache, invalidator) = invalidator(true);
        invalidator
            .handle(&RealtimeEvent::new(EventType::BlogDeleted, json!({"blogId": "b9"})))
            .unwrap();

        assert_eq!(cache.rendered(), vec!["blog/b9", "blogs", "trending-blogs"]);
    }

    #[test]
    fn like_and_comment_target_the_blog() {
        let (cache, invalidator) = invalidator(true);
        invalidator
            .handle(&RealtimeEvent::new(
                EventType::LikeAdded,
                json!({"blogId": "b2", "action": "unlike"}),
            ))
            .unwrap();
        invalidator
            .handle(&RealtimeEvent::new(EventType::CommentAdded, json!({"blogId": "b3"})))
            .unwrap();

        assert_eq!(
            cache.rendered(),
            vec!["blog/b2", "blogs", "trending-blogs", "blog/b3", "blog-comments/b3"]
        );
    }

    #[test]
    fn blog_invalidation_is_skipped_when_disabled() {
        let (cache, invalidator) = invalidator(false);
        for event_type in [EventType::BlogCreated, EventType::BlogUpdated, EventType::CommentAdded] {
            invalidator
                .handle(&RealtimeEvent::new(event_type, json!({"id": "b1", "blogId": "b1"})))
                .unwrap();
        }

        assert!(cache.rendered().is_empty());
    }

    #[test]
    fn follow_always_invalidates() {
        let (cache, invalidator) = invalidator(false);
        invalidator
            .handle(&RealtimeEvent::new(EventType::FollowAdded, json!({"userId": "u7"})))
            .unwrap();

        assert_eq!(cache.rendered(), vec!["follow-suggestions", "profile/u7"]);
    }

    #[test]
    fn malformed_payload_is_reported() {
        let (cache, invalidator) = invalidator(true);
        let err = invalidator
            .handle(&RealtimeEvent::new(EventType::LikeAdded, json!({"action": "like"})))
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidPayload);
        assert!(cache.rendered().is_empty());
    }

    #[test]
    fn subscribe_covers_all_cache_types() {
        let bus = InMemoryEventBus::new();
        let (_, invalidator) = invalidator(true);
        let sub = Arc::new(invalidator).subscribe(&bus);

        for event_type in CACHE_EVENT_TYPES {
            assert_eq!(bus.subscriber_count(*event_type), 1);
        }
        sub.unsubscribe();
        assert_eq!(bus.subscriber_count(EventType::FollowAdded), 0);
    }
}
