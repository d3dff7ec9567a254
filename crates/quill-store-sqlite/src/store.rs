//! [`SqliteStore`] — the SQLite implementation of [`ContentStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use quill_core::{
  follow::Follow,
  group::{Group, NewGroup},
  post::{Comment, NewComment, NewPost, Post, PostUpdate},
  store::{ContentStore, FeedFilter},
  user::User,
};

use crate::{
  Result,
  encode::{
    RawComment, RawGroup, RawPost, RawUser, encode_dt, encode_uuid,
  },
  schema::SCHEMA,
};

const POST_COLUMNS: &str =
  "post_id, author_id, text, group_id, image, published_at";

fn post_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawPost> {
  Ok(RawPost {
    post_id:      row.get(0)?,
    author_id:    row.get(1)?,
    text:         row.get(2)?,
    group_id:     row.get(3)?,
    image:        row.get(4)?,
    published_at: row.get(5)?,
  })
}

/// WHERE clause and bound author/group ids for a [`FeedFilter`].
///
/// `FeedFilter::Authors` expands to one placeholder per id, so the parameter
/// list is dynamic. Placeholders start at `?1`.
fn filter_clause(filter: &FeedFilter) -> (String, Vec<String>) {
  match filter {
    FeedFilter::All => (String::new(), vec![]),
    FeedFilter::Group(id) => {
      ("WHERE group_id = ?1".into(), vec![encode_uuid(*id)])
    }
    FeedFilter::Author(id) => {
      ("WHERE author_id = ?1".into(), vec![encode_uuid(*id)])
    }
    FeedFilter::Authors(ids) => {
      let placeholders: Vec<String> =
        (1..=ids.len()).map(|i| format!("?{i}")).collect();
      (
        format!("WHERE author_id IN ({})", placeholders.join(", ")),
        ids.iter().copied().map(encode_uuid).collect(),
      )
    }
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Quill content store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// `DELETE` with an affected-row check; shared by the delete operations.
  async fn delete_by_id(
    &self,
    sql: &'static str,
    id: Uuid,
  ) -> Result<bool> {
    let id_str = encode_uuid(id);
    let deleted = self
      .conn
      .call(move |conn| Ok(conn.execute(sql, rusqlite::params![id_str])? > 0))
      .await?;
    Ok(deleted)
  }
}

// ─── ContentStore impl ───────────────────────────────────────────────────────

impl ContentStore for SqliteStore {
  type Error = crate::Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn ensure_user(&self, user_id: Uuid, username: &str) -> Result<User> {
    let user = User { user_id, username: username.to_owned() };

    let id_str = encode_uuid(user.user_id);
    let name = user.username.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (user_id, username) VALUES (?1, ?2)
           ON CONFLICT (user_id) DO UPDATE SET username = excluded.username",
          rusqlite::params![id_str, name],
        )?;
        Ok(())
      })
      .await?;

    Ok(user)
  }

  async fn get_user(&self, user_id: Uuid) -> Result<Option<User>> {
    let id_str = encode_uuid(user_id);

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT user_id, username FROM users WHERE user_id = ?1",
              rusqlite::params![id_str],
              |row| {
                Ok(RawUser { user_id: row.get(0)?, username: row.get(1)? })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn get_user_by_name(&self, username: &str) -> Result<Option<User>> {
    let name = username.to_owned();

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT user_id, username FROM users WHERE username = ?1",
              rusqlite::params![name],
              |row| {
                Ok(RawUser { user_id: row.get(0)?, username: row.get(1)? })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn delete_user(&self, user_id: Uuid) -> Result<bool> {
    // Posts, comments, and follow edges go with the account via ON DELETE
    // CASCADE.
    self
      .delete_by_id("DELETE FROM users WHERE user_id = ?1", user_id)
      .await
  }

  // ── Groups ────────────────────────────────────────────────────────────────

  async fn add_group(&self, input: NewGroup) -> Result<Option<Group>> {
    let group = Group {
      group_id:    Uuid::new_v4(),
      title:       input.title,
      slug:        input.slug,
      description: input.description,
    };

    let id_str = encode_uuid(group.group_id);
    let title = group.title.clone();
    let slug = group.slug.clone();
    let description = group.description.clone();

    let inserted = self
      .conn
      .call(move |conn| {
        // OR IGNORE makes the unique-slug collision a no-op we can detect
        // through the affected-row count.
        let n = conn.execute(
          "INSERT OR IGNORE INTO groups (group_id, title, slug, description)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, title, slug, description],
        )?;
        Ok(n > 0)
      })
      .await?;

    Ok(inserted.then_some(group))
  }

  async fn get_group(&self, group_id: Uuid) -> Result<Option<Group>> {
    let id_str = encode_uuid(group_id);

    let raw: Option<RawGroup> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT group_id, title, slug, description FROM groups
               WHERE group_id = ?1",
              rusqlite::params![id_str],
              |row| {
                Ok(RawGroup {
                  group_id:    row.get(0)?,
                  title:       row.get(1)?,
                  slug:        row.get(2)?,
                  description: row.get(3)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawGroup::into_group).transpose()
  }

  async fn get_group_by_slug(&self, slug: &str) -> Result<Option<Group>> {
    let slug = slug.to_owned();

    let raw: Option<RawGroup> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT group_id, title, slug, description FROM groups
               WHERE slug = ?1",
              rusqlite::params![slug],
              |row| {
                Ok(RawGroup {
                  group_id:    row.get(0)?,
                  title:       row.get(1)?,
                  slug:        row.get(2)?,
                  description: row.get(3)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawGroup::into_group).transpose()
  }

  async fn list_groups(&self) -> Result<Vec<Group>> {
    let raws: Vec<RawGroup> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT group_id, title, slug, description FROM groups
           ORDER BY title",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawGroup {
              group_id:    row.get(0)?,
              title:       row.get(1)?,
              slug:        row.get(2)?,
              description: row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawGroup::into_group).collect()
  }

  async fn delete_group(&self, group_id: Uuid) -> Result<bool> {
    // Referencing posts survive; their group_id is nulled via ON DELETE SET
    // NULL.
    self
      .delete_by_id("DELETE FROM groups WHERE group_id = ?1", group_id)
      .await
  }

  // ── Posts ─────────────────────────────────────────────────────────────────

  async fn add_post(&self, input: NewPost) -> Result<Post> {
    let post = Post {
      post_id:      Uuid::new_v4(),
      author_id:    input.author_id,
      text:         input.text,
      group_id:     input.group_id,
      image:        input.image,
      published_at: Utc::now(),
    };

    let id_str = encode_uuid(post.post_id);
    let author_str = encode_uuid(post.author_id);
    let text = post.text.clone();
    let group_str = post.group_id.map(encode_uuid);
    let image = post.image.clone();
    let at_str = encode_dt(post.published_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO posts (post_id, author_id, text, group_id, image, published_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![id_str, author_str, text, group_str, image, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(post)
  }

  async fn get_post(&self, post_id: Uuid) -> Result<Option<Post>> {
    let id_str = encode_uuid(post_id);

    let raw: Option<RawPost> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {POST_COLUMNS} FROM posts WHERE post_id = ?1"),
              rusqlite::params![id_str],
              post_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPost::into_post).transpose()
  }

  async fn update_post(
    &self,
    post_id: Uuid,
    update: PostUpdate,
  ) -> Result<Option<Post>> {
    let id_str = encode_uuid(post_id);
    let text = update.text;
    let group_str = update.group_id.map(encode_uuid);
    let image = update.image;

    let changed = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "UPDATE posts SET text = ?2, group_id = ?3, image = ?4
           WHERE post_id = ?1",
          rusqlite::params![id_str, text, group_str, image],
        )?;
        Ok(n > 0)
      })
      .await?;

    if !changed {
      return Ok(None);
    }
    self.get_post(post_id).await
  }

  async fn delete_post(&self, post_id: Uuid) -> Result<bool> {
    // Comments go with the post via ON DELETE CASCADE.
    self
      .delete_by_id("DELETE FROM posts WHERE post_id = ?1", post_id)
      .await
  }

  // ── Comments ──────────────────────────────────────────────────────────────

  async fn add_comment(&self, input: NewComment) -> Result<Option<Comment>> {
    let comment = Comment {
      comment_id:   Uuid::new_v4(),
      post_id:      input.post_id,
      author_id:    input.author_id,
      text:         input.text,
      published_at: Utc::now(),
    };

    let id_str = encode_uuid(comment.comment_id);
    let post_str = encode_uuid(comment.post_id);
    let author_str = encode_uuid(comment.author_id);
    let text = comment.text.clone();
    let at_str = encode_dt(comment.published_at);

    let inserted = self
      .conn
      .call(move |conn| {
        // Single connection: the existence check and the insert cannot race
        // with a concurrent post deletion.
        let exists: bool = conn
          .query_row(
            "SELECT 1 FROM posts WHERE post_id = ?1",
            rusqlite::params![post_str],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);

        if !exists {
          return Ok(false);
        }

        conn.execute(
          "INSERT INTO comments (comment_id, post_id, author_id, text, published_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, post_str, author_str, text, at_str],
        )?;
        Ok(true)
      })
      .await?;

    Ok(inserted.then_some(comment))
  }

  async fn comments_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>> {
    let id_str = encode_uuid(post_id);

    let raws: Vec<RawComment> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT comment_id, post_id, author_id, text, published_at
           FROM comments WHERE post_id = ?1
           ORDER BY published_at ASC, rowid ASC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], |row| {
            Ok(RawComment {
              comment_id:   row.get(0)?,
              post_id:      row.get(1)?,
              author_id:    row.get(2)?,
              text:         row.get(3)?,
              published_at: row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawComment::into_comment).collect()
  }

  // ── Follow edges ──────────────────────────────────────────────────────────

  async fn insert_follow(
    &self,
    follower_id: Uuid,
    followee_id: Uuid,
  ) -> Result<Follow> {
    let follower_str = encode_uuid(follower_id);
    let followee_str = encode_uuid(followee_id);

    self
      .conn
      .call(move |conn| {
        // The pair primary key plus DO NOTHING makes concurrent inserts of
        // the same edge resolve to a single row.
        conn.execute(
          "INSERT INTO follows (follower_id, followee_id) VALUES (?1, ?2)
           ON CONFLICT (follower_id, followee_id) DO NOTHING",
          rusqlite::params![follower_str, followee_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(Follow { follower_id, followee_id })
  }

  async fn remove_follow(
    &self,
    follower_id: Uuid,
    followee_id: Uuid,
  ) -> Result<bool> {
    let follower_str = encode_uuid(follower_id);
    let followee_str = encode_uuid(followee_id);

    let removed = self
      .conn
      .call(move |conn| {
        Ok(
          conn.execute(
            "DELETE FROM follows WHERE follower_id = ?1 AND followee_id = ?2",
            rusqlite::params![follower_str, followee_str],
          )? > 0,
        )
      })
      .await?;

    Ok(removed)
  }

  async fn is_following(
    &self,
    follower_id: Uuid,
    followee_id: Uuid,
  ) -> Result<bool> {
    let follower_str = encode_uuid(follower_id);
    let followee_str = encode_uuid(followee_id);

    let found = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM follows
               WHERE follower_id = ?1 AND followee_id = ?2",
              rusqlite::params![follower_str, followee_str],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;

    Ok(found)
  }

  async fn following_ids(&self, follower_id: Uuid) -> Result<Vec<Uuid>> {
    let follower_str = encode_uuid(follower_id);

    let id_strs: Vec<String> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT followee_id FROM follows WHERE follower_id = ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![follower_str], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    id_strs.iter().map(|s| crate::encode::decode_uuid(s)).collect()
  }

  // ── Feed queries ──────────────────────────────────────────────────────────

  async fn posts_page(
    &self,
    filter: &FeedFilter,
    limit: u32,
    offset: u64,
  ) -> Result<Vec<Post>> {
    if matches!(filter, FeedFilter::Authors(ids) if ids.is_empty()) {
      return Ok(Vec::new());
    }

    let (where_clause, bound) = filter_clause(filter);
    let limit = limit as i64;
    let offset = offset as i64;

    let raws: Vec<RawPost> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {POST_COLUMNS} FROM posts
           {where_clause}
           ORDER BY published_at DESC, rowid DESC
           LIMIT {limit} OFFSET {offset}"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(bound.iter()), post_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPost::into_post).collect()
  }

  async fn count_posts(&self, filter: &FeedFilter) -> Result<u64> {
    if matches!(filter, FeedFilter::Authors(ids) if ids.is_empty()) {
      return Ok(0);
    }

    let (where_clause, bound) = filter_clause(filter);

    let count: i64 = self
      .conn
      .call(move |conn| {
        let sql = format!("SELECT COUNT(*) FROM posts {where_clause}");
        Ok(conn.query_row(
          &sql,
          rusqlite::params_from_iter(bound.iter()),
          |row| row.get(0),
        )?)
      })
      .await?;

    Ok(count as u64)
  }
}
