//! Integration tests for `SqliteStore` against an in-memory database.

use quill_core::{
  Error as CoreError,
  group::NewGroup,
  post::{NewComment, NewPost, PostUpdate},
  store::{ContentStore, FeedFilter},
  user::User,
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn user(s: &SqliteStore, name: &str) -> User {
  s.ensure_user(Uuid::new_v4(), name).await.unwrap()
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn ensure_user_and_resolve_by_name() {
  let s = store().await;

  let alice = user(&s, "alice").await;
  let found = s.get_user_by_name("alice").await.unwrap().unwrap();
  assert_eq!(found, alice);

  assert!(s.get_user_by_name("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn ensure_user_is_idempotent_and_tracks_renames() {
  let s = store().await;

  let id = Uuid::new_v4();
  s.ensure_user(id, "alice").await.unwrap();
  s.ensure_user(id, "alice").await.unwrap();
  let renamed = s.ensure_user(id, "alice-liddell").await.unwrap();

  assert_eq!(renamed.username, "alice-liddell");
  assert!(s.get_user_by_name("alice").await.unwrap().is_none());
  assert_eq!(s.get_user(id).await.unwrap().unwrap(), renamed);
}

#[tokio::test]
async fn delete_user_cascades_edges_in_both_directions() {
  let s = store().await;
  let alice = user(&s, "alice").await;
  let bob = user(&s, "bob").await;
  let carol = user(&s, "carol").await;

  s.insert_follow(alice.user_id, bob.user_id).await.unwrap();
  s.insert_follow(carol.user_id, alice.user_id).await.unwrap();

  assert!(s.delete_user(alice.user_id).await.unwrap());

  assert!(!s.is_following(alice.user_id, bob.user_id).await.unwrap());
  assert!(!s.is_following(carol.user_id, alice.user_id).await.unwrap());
  assert!(s.following_ids(carol.user_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_user_cascades_content() {
  let s = store().await;
  let alice = user(&s, "alice").await;
  let bob = user(&s, "bob").await;

  let post = s
    .add_post(NewPost::new(alice.user_id, "mine").unwrap())
    .await
    .unwrap();
  s.add_comment(NewComment::new(post.post_id, bob.user_id, "hi").unwrap())
    .await
    .unwrap()
    .unwrap();

  assert!(s.delete_user(alice.user_id).await.unwrap());

  assert!(s.get_post(post.post_id).await.unwrap().is_none());
  assert!(s.comments_for_post(post.post_id).await.unwrap().is_empty());
}

// ─── Groups ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_group_and_resolve_by_slug() {
  let s = store().await;

  let group = s
    .add_group(NewGroup::new("Cats", "cats", "Feline content").unwrap())
    .await
    .unwrap()
    .unwrap();

  let found = s.get_group_by_slug("cats").await.unwrap().unwrap();
  assert_eq!(found, group);
  assert!(s.get_group_by_slug("dogs").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_slug_is_rejected() {
  let s = store().await;

  s.add_group(NewGroup::new("Cats", "cats", "").unwrap())
    .await
    .unwrap()
    .unwrap();

  let second = s
    .add_group(NewGroup::new("More cats", "cats", "").unwrap())
    .await
    .unwrap();
  assert!(second.is_none());

  // The original group is untouched.
  let found = s.get_group_by_slug("cats").await.unwrap().unwrap();
  assert_eq!(found.title, "Cats");
}

#[test]
fn group_input_validation() {
  assert!(matches!(
    NewGroup::new("x".repeat(201), "ok-slug", ""),
    Err(CoreError::TitleTooLong { len: 201 })
  ));
  assert!(matches!(
    NewGroup::new("Cats", "Not URL Safe!", ""),
    Err(CoreError::InvalidSlug(_))
  ));
  assert!(matches!(NewGroup::new("Cats", "", ""), Err(CoreError::InvalidSlug(_))));
}

#[tokio::test]
async fn delete_group_keeps_posts_and_nulls_their_group() {
  let s = store().await;
  let alice = user(&s, "alice").await;
  let group = s
    .add_group(NewGroup::new("Cats", "cats", "").unwrap())
    .await
    .unwrap()
    .unwrap();

  let mut input = NewPost::new(alice.user_id, "a cat post").unwrap();
  input.group_id = Some(group.group_id);
  let post = s.add_post(input).await.unwrap();

  assert!(s.delete_group(group.group_id).await.unwrap());

  // The post survives; only its group reference is gone.
  let survivor = s.get_post(post.post_id).await.unwrap().unwrap();
  assert_eq!(survivor.group_id, None);
  assert_eq!(survivor.text, post.text);
  assert_eq!(survivor.author_id, post.author_id);
  assert_eq!(survivor.published_at, post.published_at);
}

#[tokio::test]
async fn delete_group_missing_returns_false() {
  let s = store().await;
  assert!(!s.delete_group(Uuid::new_v4()).await.unwrap());
}

// ─── Posts ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_post() {
  let s = store().await;
  let alice = user(&s, "alice").await;

  let post = s
    .add_post(NewPost::new(alice.user_id, "first!").unwrap())
    .await
    .unwrap();

  let fetched = s.get_post(post.post_id).await.unwrap().unwrap();
  assert_eq!(fetched, post);
  assert_eq!(fetched.group_id, None);
  assert_eq!(fetched.image, None);
}

#[test]
fn empty_post_text_is_rejected() {
  let author = Uuid::new_v4();
  assert!(matches!(NewPost::new(author, ""), Err(CoreError::EmptyText)));
  assert!(matches!(NewPost::new(author, "   \n"), Err(CoreError::EmptyText)));
  assert!(matches!(PostUpdate::new(""), Err(CoreError::EmptyText)));
}

#[tokio::test]
async fn update_post_replaces_editable_fields_only() {
  let s = store().await;
  let alice = user(&s, "alice").await;
  let group = s
    .add_group(NewGroup::new("Cats", "cats", "").unwrap())
    .await
    .unwrap()
    .unwrap();

  let mut input = NewPost::new(alice.user_id, "draft").unwrap();
  input.image = Some("posts/one.png".into());
  let post = s.add_post(input).await.unwrap();

  let mut update = PostUpdate::new("final").unwrap();
  update.group_id = Some(group.group_id);
  let edited = s
    .update_post(post.post_id, update)
    .await
    .unwrap()
    .unwrap();

  assert_eq!(edited.text, "final");
  assert_eq!(edited.group_id, Some(group.group_id));
  assert_eq!(edited.image, None);
  // Identity fields never move.
  assert_eq!(edited.author_id, post.author_id);
  assert_eq!(edited.published_at, post.published_at);
}

#[tokio::test]
async fn update_post_missing_returns_none() {
  let s = store().await;
  let result = s
    .update_post(Uuid::new_v4(), PostUpdate::new("text").unwrap())
    .await
    .unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn delete_post_cascades_comments() {
  let s = store().await;
  let alice = user(&s, "alice").await;
  let bob = user(&s, "bob").await;

  let post = s
    .add_post(NewPost::new(alice.user_id, "soon gone").unwrap())
    .await
    .unwrap();
  s.add_comment(NewComment::new(post.post_id, bob.user_id, "one").unwrap())
    .await
    .unwrap()
    .unwrap();
  s.add_comment(NewComment::new(post.post_id, alice.user_id, "two").unwrap())
    .await
    .unwrap()
    .unwrap();

  assert!(s.delete_post(post.post_id).await.unwrap());

  assert!(s.get_post(post.post_id).await.unwrap().is_none());
  assert!(s.comments_for_post(post.post_id).await.unwrap().is_empty());
}

// ─── Comments ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn comments_come_back_oldest_first() {
  let s = store().await;
  let alice = user(&s, "alice").await;

  let post = s
    .add_post(NewPost::new(alice.user_id, "discuss").unwrap())
    .await
    .unwrap();
  for text in ["first", "second", "third"] {
    s.add_comment(NewComment::new(post.post_id, alice.user_id, text).unwrap())
      .await
      .unwrap()
      .unwrap();
  }

  let comments = s.comments_for_post(post.post_id).await.unwrap();
  let texts: Vec<&str> = comments.iter().map(|c| c.text.as_str()).collect();
  assert_eq!(texts, ["first", "second", "third"]);
}

#[tokio::test]
async fn comment_on_unknown_post_returns_none() {
  let s = store().await;
  let alice = user(&s, "alice").await;

  let result = s
    .add_comment(NewComment::new(Uuid::new_v4(), alice.user_id, "hi").unwrap())
    .await
    .unwrap();
  assert!(result.is_none());
}

#[test]
fn empty_comment_text_is_rejected() {
  assert!(matches!(
    NewComment::new(Uuid::new_v4(), Uuid::new_v4(), "  "),
    Err(CoreError::EmptyText)
  ));
}

// ─── Follow edges ────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_follow_is_get_or_create() {
  let s = store().await;
  let alice = user(&s, "alice").await;
  let bob = user(&s, "bob").await;

  let first = s.insert_follow(alice.user_id, bob.user_id).await.unwrap();
  let second = s.insert_follow(alice.user_id, bob.user_id).await.unwrap();
  assert_eq!(first, second);

  // Exactly one stored edge.
  assert_eq!(s.following_ids(alice.user_id).await.unwrap(), [bob.user_id]);
}

#[tokio::test]
async fn remove_follow_reports_absence() {
  let s = store().await;
  let alice = user(&s, "alice").await;
  let bob = user(&s, "bob").await;

  assert!(!s.remove_follow(alice.user_id, bob.user_id).await.unwrap());

  s.insert_follow(alice.user_id, bob.user_id).await.unwrap();
  assert!(s.remove_follow(alice.user_id, bob.user_id).await.unwrap());
  assert!(!s.is_following(alice.user_id, bob.user_id).await.unwrap());
}

#[tokio::test]
async fn follow_edges_are_directed() {
  let s = store().await;
  let alice = user(&s, "alice").await;
  let bob = user(&s, "bob").await;

  s.insert_follow(alice.user_id, bob.user_id).await.unwrap();

  assert!(s.is_following(alice.user_id, bob.user_id).await.unwrap());
  assert!(!s.is_following(bob.user_id, alice.user_id).await.unwrap());
}

// ─── Feed queries ────────────────────────────────────────────────────────────

#[tokio::test]
async fn posts_page_orders_newest_first() {
  let s = store().await;
  let alice = user(&s, "alice").await;

  for i in 0..3 {
    s.add_post(NewPost::new(alice.user_id, format!("post {i}")).unwrap())
      .await
      .unwrap();
  }

  let page = s.posts_page(&FeedFilter::All, 10, 0).await.unwrap();
  let texts: Vec<&str> = page.iter().map(|p| p.text.as_str()).collect();
  assert_eq!(texts, ["post 2", "post 1", "post 0"]);
}

#[tokio::test]
async fn posts_page_slices_with_limit_and_offset() {
  let s = store().await;
  let alice = user(&s, "alice").await;

  for i in 0..14 {
    s.add_post(NewPost::new(alice.user_id, format!("post {i}")).unwrap())
      .await
      .unwrap();
  }

  assert_eq!(s.count_posts(&FeedFilter::All).await.unwrap(), 14);
  assert_eq!(s.posts_page(&FeedFilter::All, 10, 0).await.unwrap().len(), 10);
  assert_eq!(s.posts_page(&FeedFilter::All, 10, 10).await.unwrap().len(), 4);
  assert_eq!(s.posts_page(&FeedFilter::All, 10, 20).await.unwrap().len(), 0);
}

#[tokio::test]
async fn posts_page_filters_by_group_author_and_author_set() {
  let s = store().await;
  let alice = user(&s, "alice").await;
  let bob = user(&s, "bob").await;
  let carol = user(&s, "carol").await;
  let group = s
    .add_group(NewGroup::new("Cats", "cats", "").unwrap())
    .await
    .unwrap()
    .unwrap();

  let mut grouped = NewPost::new(alice.user_id, "in group").unwrap();
  grouped.group_id = Some(group.group_id);
  s.add_post(grouped).await.unwrap();
  s.add_post(NewPost::new(alice.user_id, "loose").unwrap())
    .await
    .unwrap();
  s.add_post(NewPost::new(bob.user_id, "bob's").unwrap())
    .await
    .unwrap();

  let in_group = s
    .posts_page(&FeedFilter::Group(group.group_id), 10, 0)
    .await
    .unwrap();
  assert_eq!(in_group.len(), 1);
  assert_eq!(in_group[0].text, "in group");

  let by_alice = s
    .posts_page(&FeedFilter::Author(alice.user_id), 10, 0)
    .await
    .unwrap();
  assert_eq!(by_alice.len(), 2);
  assert_eq!(
    s.count_posts(&FeedFilter::Author(alice.user_id)).await.unwrap(),
    2
  );

  let by_both = FeedFilter::Authors(vec![alice.user_id, bob.user_id]);
  assert_eq!(s.posts_page(&by_both, 10, 0).await.unwrap().len(), 3);
  assert_eq!(s.count_posts(&by_both).await.unwrap(), 3);

  let by_carol_only = FeedFilter::Authors(vec![carol.user_id]);
  assert!(s.posts_page(&by_carol_only, 10, 0).await.unwrap().is_empty());

  let by_nobody = FeedFilter::Authors(vec![]);
  assert!(s.posts_page(&by_nobody, 10, 0).await.unwrap().is_empty());
  assert_eq!(s.count_posts(&by_nobody).await.unwrap(), 0);
}
