//! SQL schema for the Quill SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.
//!
//! The referential-integrity rules of the data model live here, not in
//! application code: group deletion nulls its posts' group column, post
//! deletion cascades to comments, user deletion cascades to posts, comments,
//! and follow edges in both directions.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Mirror of externally-authenticated accounts; no credentials stored.
CREATE TABLE IF NOT EXISTS users (
    user_id   TEXT PRIMARY KEY,
    username  TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS groups (
    group_id    TEXT PRIMARY KEY,
    title       TEXT NOT NULL,
    slug        TEXT NOT NULL UNIQUE,
    description TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS posts (
    post_id      TEXT PRIMARY KEY,
    author_id    TEXT NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
    text         TEXT NOT NULL,
    group_id     TEXT REFERENCES groups(group_id) ON DELETE SET NULL,
    image        TEXT,            -- opaque blob-store key
    published_at TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

CREATE TABLE IF NOT EXISTS comments (
    comment_id   TEXT PRIMARY KEY,
    post_id      TEXT NOT NULL REFERENCES posts(post_id) ON DELETE CASCADE,
    author_id    TEXT NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
    text         TEXT NOT NULL,
    published_at TEXT NOT NULL
);

-- One row per (follower, followee) pair; the primary key makes the
-- get-or-create insert race-safe.
CREATE TABLE IF NOT EXISTS follows (
    follower_id TEXT NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
    followee_id TEXT NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
    PRIMARY KEY (follower_id, followee_id),
    CHECK  (follower_id != followee_id)
);

CREATE INDEX IF NOT EXISTS posts_author_idx    ON posts(author_id);
CREATE INDEX IF NOT EXISTS posts_group_idx     ON posts(group_id);
CREATE INDEX IF NOT EXISTS posts_published_idx ON posts(published_at);
CREATE INDEX IF NOT EXISTS comments_post_idx   ON comments(post_id);
CREATE INDEX IF NOT EXISTS follows_followee_idx ON follows(followee_id);

PRAGMA user_version = 1;
";
