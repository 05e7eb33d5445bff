use std::fmt::Write;

use chrono::{DateTime, Utc};
use entity::prelude::*;

use crate::state::{BoardState, Draft, Mode};

const EXCERPT_CHARS: usize = 200;

pub fn format_timestamp(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(timestamp);
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if hours < 1 {
        "Just now".to_string()
    } else if hours < 24 {
        format!("{hours}h ago")
    } else if days < 7 {
        format!("{days}d ago")
    } else {
        timestamp.format("%Y-%m-%d").to_string()
    }
}

/// First 200 characters of a description, with "..." when cut.
pub fn excerpt(description: &str) -> String {
    let mut chars = description.chars();
    let head: String = chars.by_ref().take(EXCERPT_CHARS).collect();

    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

pub fn render(state: &BoardState, now: DateTime<Utc>) -> String {
    let mut out = String::new();

    if let Some(error) = &state.error {
        let _ = writeln!(out, "[!] {error} (dismiss)\n");
    }

    match (&state.mode, state.selected_post()) {
        (Mode::List, _) => render_list(&mut out, state, now),
        (Mode::NewPost { draft }, _) => {
            render_form(&mut out, "Create New Post", draft);
            out.push('\n');
            render_list(&mut out, state, now);
        }
        (Mode::EditPost { draft, .. }, Some(post)) => {
            render_form(&mut out, "Edit Post", draft);
            out.push('\n');
            render_comments(&mut out, state, post, now);
        }
        (_, Some(post)) => render_detail(&mut out, state, post, now),
        (_, None) => render_list(&mut out, state, now),
    }

    out
}

fn render_list(out: &mut String, state: &BoardState, now: DateTime<Utc>) {
    let _ = writeln!(out, "Member Resources");
    if !state.query.trim().is_empty() {
        let _ = writeln!(out, "Search: {}", state.query);
    }
    out.push('\n');

    let posts = state.visible_posts();
    if posts.is_empty() {
        let empty = if state.query.trim().is_empty() {
            "No posts yet. Create the first one!"
        } else {
            "No posts match your search"
        };
        let _ = writeln!(out, "{empty}");
        return;
    }

    for post in posts {
        let _ = writeln!(out, "# {}", post.title);
        if !post.description.is_empty() {
            let _ = writeln!(out, "{}", excerpt(&post.description));
        }
        let _ = writeln!(
            out,
            "{} | {} comments\n",
            format_timestamp(post.timestamp, now),
            post.comments.len()
        );
    }
}

fn render_form(out: &mut String, heading: &str, draft: &Draft) {
    let _ = writeln!(out, "{heading}");
    let _ = writeln!(out, "Title: {}", draft.title);
    let _ = writeln!(out, "Description: {}", draft.description);
}

fn render_detail(
    out: &mut String,
    state: &BoardState,
    post: &PostEntity,
    now: DateTime<Utc>,
) {
    let _ = writeln!(out, "< Back to posts\n");
    let demo = if post.is_demo { " [demo]" } else { "" };
    let _ = writeln!(out, "# {}{demo}", post.title);
    if !post.description.is_empty() {
        let _ = writeln!(out, "{}", post.description);
    }
    let _ = writeln!(out, "{}\n", format_timestamp(post.timestamp, now));

    render_comments(out, state, post, now);
}

fn render_comments(
    out: &mut String,
    state: &BoardState,
    post: &PostEntity,
    now: DateTime<Utc>,
) {
    let _ = writeln!(out, "Comments ({})", post.comments.len());

    for comment in &post.comments {
        match &state.mode {
            Mode::EditComment {
                comment_id, text, ..
            } if *comment_id == comment.id => {
                let _ = writeln!(out, "- [editing] {text}");
            }
            _ => {
                let _ = writeln!(
                    out,
                    "- {} ({})",
                    comment.text,
                    format_timestamp(comment.timestamp, now)
                );
            }
        }
    }
}
