use entity::prelude::*;

use crate::search;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Draft {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub enum Mode {
    #[default]
    List,
    NewPost {
        draft: Draft,
    },
    Detail {
        post_id: i32,
    },
    EditPost {
        post_id: i32,
        draft: Draft,
    },
    EditComment {
        post_id: i32,
        comment_id: i32,
        text: String,
    },
}

impl Mode {
    /// The post on screen, if any.
    pub fn post_id(&self) -> Option<i32> {
        match self {
            Mode::List | Mode::NewPost { .. } => None,
            Mode::Detail { post_id }
            | Mode::EditPost { post_id, .. }
            | Mode::EditComment { post_id, .. } => Some(*post_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Loaded(Vec<PostEntity>),
    OpenNewPost,
    CancelNewPost,
    Select(i32),
    Back,
    StartEditPost,
    CancelEditPost,
    StartEditComment(i32),
    CancelEditComment,
    SetDraft(Draft),
    SetCommentText(String),
    SetNewComment(String),
    SetQuery(String),
    Failed(String),
    DismissError,
    PostCreated(PostEntity),
    PostUpdated(PostEntity),
    PostDeleted(i32),
    CommentAdded(CommentEntity),
    CommentUpdated(CommentEntity),
    CommentDeleted { post_id: i32, comment_id: i32 },
}

/// Snapshot of the view. Every change goes through [`BoardState::apply`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BoardState {
    pub posts: Vec<PostEntity>,
    pub query: String,
    pub mode: Mode,
    pub new_comment: String,
    pub error: Option<String>,
}

impl BoardState {
    pub fn visible_posts(&self) -> Vec<&PostEntity> {
        search::filter(&self.posts, &self.query)
    }

    pub fn post(&self, post_id: i32) -> Option<&PostEntity> {
        self.posts.iter().find(|p| p.id == post_id)
    }

    pub fn selected_post(&self) -> Option<&PostEntity> {
        self.mode.post_id().and_then(|id| self.post(id))
    }

    pub fn apply(mut self, action: Action) -> BoardState {
        match action {
            Action::Loaded(posts) => {
                // Leave a detail view whose post is gone.
                if let Some(post_id) = self.mode.post_id() {
                    if !posts.iter().any(|p| p.id == post_id) {
                        self.mode = Mode::List;
                    }
                }
                self.posts = posts;
            }
            Action::OpenNewPost => {
                if self.mode == Mode::List {
                    self.mode = Mode::NewPost {
                        draft: Draft::default(),
                    };
                }
            }
            Action::CancelNewPost => {
                if matches!(self.mode, Mode::NewPost { .. }) {
                    self.mode = Mode::List;
                }
            }
            Action::Select(post_id) => {
                let listing = matches!(self.mode, Mode::List | Mode::NewPost { .. });
                if listing && self.post(post_id).is_some() {
                    self.mode = Mode::Detail { post_id };
                    self.new_comment.clear();
                }
            }
            Action::Back => {
                self.mode = Mode::List;
                self.new_comment.clear();
            }
            Action::StartEditPost => {
                if let Mode::Detail { post_id } = self.mode {
                    let draft = self
                        .post(post_id)
                        .filter(|p| !p.is_demo)
                        .map(|p| Draft {
                            title: p.title.clone(),
                            description: p.description.clone(),
                        });
                    if let Some(draft) = draft {
                        self.mode = Mode::EditPost { post_id, draft };
                    }
                }
            }
            Action::CancelEditPost => {
                if let Mode::EditPost { post_id, .. } = self.mode {
                    self.mode = Mode::Detail { post_id };
                }
            }
            Action::StartEditComment(comment_id) => {
                if let Mode::Detail { post_id } = self.mode {
                    let text = self
                        .post(post_id)
                        .and_then(|p| p.comment(comment_id))
                        .map(|c| c.text.clone());
                    if let Some(text) = text {
                        self.mode = Mode::EditComment {
                            post_id,
                            comment_id,
                            text,
                        };
                    }
                }
            }
            Action::CancelEditComment => {
                if let Mode::EditComment { post_id, .. } = self.mode {
                    self.mode = Mode::Detail { post_id };
                }
            }
            Action::SetDraft(new_draft) => match &mut self.mode {
                Mode::NewPost { draft } | Mode::EditPost { draft, .. } => {
                    *draft = new_draft;
                }
                _ => {}
            },
            Action::SetCommentText(new_text) => {
                if let Mode::EditComment { text, .. } = &mut self.mode {
                    *text = new_text;
                }
            }
            Action::SetNewComment(text) => self.new_comment = text,
            Action::SetQuery(query) => self.query = query,
            Action::Failed(message) => self.error = Some(message),
            Action::DismissError => self.error = None,
            Action::PostCreated(post) => {
                self.posts.insert(0, post);
                self.mode = Mode::List;
                self.error = None;
            }
            Action::PostUpdated(post) => {
                let post_id = post.id;
                if let Some(slot) = self.posts.iter_mut().find(|p| p.id == post_id) {
                    *slot = post;
                }
                if matches!(self.mode, Mode::EditPost { post_id: editing, .. } if editing == post_id)
                {
                    self.mode = Mode::Detail { post_id };
                }
                self.error = None;
            }
            Action::PostDeleted(post_id) => {
                self.posts.retain(|p| p.id != post_id);
                if self.mode.post_id() == Some(post_id) {
                    self.mode = Mode::List;
                    self.new_comment.clear();
                }
                self.error = None;
            }
            Action::CommentAdded(comment) => {
                if let Some(post) =
                    self.posts.iter_mut().find(|p| p.id == comment.post_id)
                {
                    post.comments.push(comment);
                }
                self.new_comment.clear();
                self.error = None;
            }
            Action::CommentUpdated(comment) => {
                let comment_id = comment.id;
                if let Some(slot) = self
                    .posts
                    .iter_mut()
                    .flat_map(|p| p.comments.iter_mut())
                    .find(|c| c.id == comment_id)
                {
                    *slot = comment;
                }
                self.leave_comment_edit(comment_id);
                self.error = None;
            }
            Action::CommentDeleted {
                post_id,
                comment_id,
            } => {
                if let Some(post) = self.posts.iter_mut().find(|p| p.id == post_id) {
                    post.comments.retain(|c| c.id != comment_id);
                }
                self.leave_comment_edit(comment_id);
                self.error = None;
            }
        }

        self
    }

    fn leave_comment_edit(&mut self, comment_id: i32) {
        if let Mode::EditComment {
            post_id,
            comment_id: editing,
            ..
        } = self.mode
        {
            if editing == comment_id {
                self.mode = Mode::Detail { post_id };
            }
        }
    }
}
