use async_trait::async_trait;
use chrono::Utc;
use client::{Client, ClientError};
use entity::prelude::*;
use tracing::{error, info};

pub mod render;
pub mod search;
pub mod state;

pub use state::{Action, BoardState, Draft, Mode};

type ApiResult<T> = Result<T, ClientError>;

/// Backend calls the board needs. [`Client`] is the production implementation.
#[async_trait]
pub trait BoardApi: Send + Sync {
    async fn get_posts(&self) -> ApiResult<Vec<PostEntity>>;
    async fn create_post(&self, title: &str, description: &str) -> ApiResult<PostEntity>;
    async fn update_post(
        &self,
        id: i32,
        title: &str,
        description: &str,
    ) -> ApiResult<PostEntity>;
    async fn delete_post(&self, id: i32) -> ApiResult<String>;
    async fn add_comment(&self, post_id: i32, text: &str) -> ApiResult<CommentEntity>;
    async fn update_comment(&self, id: i32, text: &str) -> ApiResult<CommentEntity>;
    async fn delete_comment(&self, id: i32) -> ApiResult<String>;
}

#[async_trait]
impl BoardApi for Client {
    async fn get_posts(&self) -> ApiResult<Vec<PostEntity>> {
        Client::get_posts(self).await
    }

    async fn create_post(&self, title: &str, description: &str) -> ApiResult<PostEntity> {
        Client::create_post(self, title, description).await
    }

    async fn update_post(
        &self,
        id: i32,
        title: &str,
        description: &str,
    ) -> ApiResult<PostEntity> {
        Client::update_post(self, id, title, description).await
    }

    async fn delete_post(&self, id: i32) -> ApiResult<String> {
        Client::delete_post(self, id).await
    }

    async fn add_comment(&self, post_id: i32, text: &str) -> ApiResult<CommentEntity> {
        Client::add_comment(self, post_id, text).await
    }

    async fn update_comment(&self, id: i32, text: &str) -> ApiResult<CommentEntity> {
        Client::update_comment(self, id, text).await
    }

    async fn delete_comment(&self, id: i32) -> ApiResult<String> {
        Client::delete_comment(self, id).await
    }
}

/// Owns the view state and applies backend results to it. Local state only
/// changes after the backend confirms; failures become the error banner.
pub struct Board<A: BoardApi> {
    api: A,
    state: BoardState,
}

impl<A: BoardApi> Board<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: BoardState::default(),
        }
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn render(&self) -> String {
        render::render(&self.state, Utc::now())
    }

    /// Applies a local transition (navigation, drafts, search, dismiss).
    pub fn dispatch(&mut self, action: Action) {
        self.state = std::mem::take(&mut self.state).apply(action);
    }

    pub async fn load(&mut self) {
        let result = self.api.get_posts().await;
        self.settle("load posts", result, Action::Loaded);
    }

    pub async fn create_post(&mut self) {
        let Mode::NewPost { draft } = &self.state.mode else {
            return;
        };
        if draft.title.trim().is_empty() {
            return;
        }

        let result = self.api.create_post(&draft.title, &draft.description).await;
        self.settle("create post", result, Action::PostCreated);
    }

    pub async fn save_post(&mut self) {
        let Mode::EditPost { post_id, draft } = &self.state.mode else {
            return;
        };

        let result = self
            .api
            .update_post(*post_id, &draft.title, &draft.description)
            .await;
        self.settle("update post", result, Action::PostUpdated);
    }

    pub async fn delete_post(&mut self) {
        let Some(post_id) = self.state.mode.post_id() else {
            return;
        };

        let result = self.api.delete_post(post_id).await;
        self.settle("delete post", result, |_| Action::PostDeleted(post_id));
    }

    pub async fn add_comment(&mut self) {
        let Mode::Detail { post_id } = self.state.mode else {
            return;
        };
        if self.state.new_comment.trim().is_empty() {
            return;
        }

        let result = self.api.add_comment(post_id, &self.state.new_comment).await;
        self.settle("add comment", result, Action::CommentAdded);
    }

    pub async fn save_comment(&mut self) {
        let Mode::EditComment {
            comment_id, text, ..
        } = &self.state.mode
        else {
            return;
        };

        let result = self.api.update_comment(*comment_id, text).await;
        self.settle("update comment", result, Action::CommentUpdated);
    }

    pub async fn delete_comment(&mut self, comment_id: i32) {
        let Some(post_id) = self.state.mode.post_id() else {
            return;
        };

        let result = self.api.delete_comment(comment_id).await;
        self.settle("delete comment", result, |_| Action::CommentDeleted {
            post_id,
            comment_id,
        });
    }

    fn settle<T>(
        &mut self,
        task: &str,
        result: ApiResult<T>,
        on_success: impl FnOnce(T) -> Action,
    ) {
        let action = match result {
            Ok(value) => {
                info!(task = task, "confirmed");
                on_success(value)
            }
            Err(e) => {
                error!(task = task, error = e.to_string());
                Action::Failed(api_message(e))
            }
        };

        self.dispatch(action);
    }
}

fn api_message(e: ClientError) -> String {
    match e {
        ClientError::Api { message, .. } => message,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod test {
    use std::sync::Mutex;

    use client::StatusCode;

    use super::*;

    /// In-memory backend that records every call.
    #[derive(Default)]
    struct FakeApi {
        posts: Mutex<Vec<PostEntity>>,
        calls: Mutex<Vec<String>>,
        next_id: Mutex<i32>,
        fail_with: Option<String>,
    }

    impl FakeApi {
        fn seeded() -> Self {
            let api = Self::default();
            *api.next_id.lock().unwrap() = 100;
            api.posts.lock().unwrap().push(PostEntity {
                id: 1,
                title: "Welcome to Member Resources".to_string(),
                is_demo: true,
                timestamp: Utc::now(),
                ..Default::default()
            });
            api
        }

        fn failing(message: &str) -> Self {
            Self {
                fail_with: Some(message.to_string()),
                ..Self::seeded()
            }
        }

        fn record(&self, call: String) -> ApiResult<()> {
            self.calls.lock().unwrap().push(call);
            match &self.fail_with {
                Some(message) => Err(ClientError::Api {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: message.clone(),
                }),
                None => Ok(()),
            }
        }

        fn next_id(&self) -> i32 {
            let mut id = self.next_id.lock().unwrap();
            *id += 1;
            *id
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl BoardApi for FakeApi {
        async fn get_posts(&self) -> ApiResult<Vec<PostEntity>> {
            self.record("get_posts".to_string())?;
            Ok(self.posts.lock().unwrap().clone())
        }

        async fn create_post(&self, title: &str, description: &str) -> ApiResult<PostEntity> {
            self.record(format!("create_post {title}"))?;
            let post = PostEntity {
                id: self.next_id(),
                title: title.trim().to_string(),
                description: description.to_string(),
                timestamp: Utc::now(),
                ..Default::default()
            };
            self.posts.lock().unwrap().insert(0, post.clone());
            Ok(post)
        }

        async fn update_post(
            &self,
            id: i32,
            title: &str,
            description: &str,
        ) -> ApiResult<PostEntity> {
            self.record(format!("update_post {id}"))?;
            let mut posts = self.posts.lock().unwrap();
            let post = posts.iter_mut().find(|p| p.id == id).unwrap();
            post.title = title.to_string();
            post.description = description.to_string();
            Ok(post.clone())
        }

        async fn delete_post(&self, id: i32) -> ApiResult<String> {
            self.record(format!("delete_post {id}"))?;
            self.posts.lock().unwrap().retain(|p| p.id != id);
            Ok("Post deleted successfully".to_string())
        }

        async fn add_comment(&self, post_id: i32, text: &str) -> ApiResult<CommentEntity> {
            self.record(format!("add_comment {post_id}"))?;
            Ok(CommentEntity {
                id: self.next_id(),
                post_id,
                text: text.trim().to_string(),
                timestamp: Utc::now(),
            })
        }

        async fn update_comment(&self, id: i32, text: &str) -> ApiResult<CommentEntity> {
            self.record(format!("update_comment {id}"))?;
            Ok(CommentEntity {
                id,
                post_id: 1,
                text: text.to_string(),
                timestamp: Utc::now(),
            })
        }

        async fn delete_comment(&self, id: i32) -> ApiResult<String> {
            self.record(format!("delete_comment {id}"))?;
            Ok("Comment deleted successfully".to_string())
        }
    }

    fn draft(title: &str) -> Action {
        Action::SetDraft(Draft {
            title: title.to_string(),
            description: "details".to_string(),
        })
    }

    #[tokio::test]
    async fn test_create_post_after_confirmation() {
        // Arrange
        let mut board = Board::new(FakeApi::seeded());
        board.load().await;
        board.dispatch(Action::OpenNewPost);
        board.dispatch(draft("Interview prep"));

        // Act
        board.create_post().await;

        // Assert
        let state = board.state();
        assert_eq!(state.mode, Mode::List);
        assert_eq!(state.posts[0].title, "Interview prep");
        assert_eq!(state.posts.len(), 2);
        assert!(board.render().contains("# Interview prep"));
    }

    #[tokio::test]
    async fn test_blank_title_and_comment_send_nothing() {
        // Arrange
        let mut board = Board::new(FakeApi::seeded());
        board.load().await;

        // Act
        board.dispatch(Action::OpenNewPost);
        board.dispatch(draft("   "));
        board.create_post().await;
        board.dispatch(Action::CancelNewPost);
        board.dispatch(Action::Select(1));
        board.dispatch(Action::SetNewComment(" \n ".to_string()));
        board.add_comment().await;

        // Assert
        assert_eq!(board.api.calls(), vec!["get_posts"]);
        assert!(board.state().post(1).unwrap().comments.is_empty());
    }

    #[tokio::test]
    async fn test_failure_leaves_posts_and_sets_error() {
        // Arrange
        let mut board = Board::new(FakeApi::seeded());
        board.load().await;
        let before = board.state().posts.clone();
        board.api.fail_with = Some("Demo posts cannot be deleted".to_string());
        board.dispatch(Action::Select(1));

        // Act
        board.delete_post().await;

        // Assert
        assert_eq!(board.state().posts, before);
        assert_eq!(board.state().mode, Mode::Detail { post_id: 1 });
        assert_eq!(
            board.state().error.as_deref(),
            Some("Demo posts cannot be deleted")
        );

        board.dispatch(Action::DismissError);
        assert_eq!(board.state().error, None);
    }

    #[tokio::test]
    async fn test_load_failure_shows_error() {
        let mut board = Board::new(FakeApi::failing("Database not configured"));

        board.load().await;

        assert!(board.state().posts.is_empty());
        assert!(board.render().starts_with("[!] Database not configured"));
    }

    #[tokio::test]
    async fn test_comment_lifecycle() {
        // Arrange
        let mut board = Board::new(FakeApi::seeded());
        board.load().await;
        board.dispatch(Action::Select(1));

        // Act
        board.dispatch(Action::SetNewComment("thanks!".to_string()));
        board.add_comment().await;
        let comment_id = board.state().post(1).unwrap().comments[0].id;
        board.dispatch(Action::StartEditComment(comment_id));
        board.dispatch(Action::SetCommentText("thanks a lot!".to_string()));
        board.save_comment().await;
        let edited = board.state().post(1).unwrap().comments[0].text.clone();
        board.delete_comment(comment_id).await;

        // Assert
        assert_eq!(edited, "thanks a lot!");
        assert_eq!(board.state().mode, Mode::Detail { post_id: 1 });
        assert!(board.state().post(1).unwrap().comments.is_empty());
        assert_eq!(board.state().new_comment, "");
    }

    #[tokio::test]
    async fn test_edit_and_delete_own_post() {
        // Arrange
        let mut board = Board::new(FakeApi::seeded());
        board.load().await;
        board.dispatch(Action::OpenNewPost);
        board.dispatch(draft("Mine"));
        board.create_post().await;
        let id = board.state().posts[0].id;

        // Act
        board.dispatch(Action::Select(id));
        board.dispatch(Action::StartEditPost);
        board.dispatch(draft("Mine, edited"));
        board.save_post().await;
        let renamed = board.state().post(id).unwrap().title.clone();
        board.delete_post().await;

        // Assert
        assert_eq!(renamed, "Mine, edited");
        assert_eq!(board.state().mode, Mode::List);
        assert!(board.state().post(id).is_none());
        assert_eq!(
            board.api.calls(),
            vec![
                "get_posts".to_string(),
                "create_post Mine".to_string(),
                format!("update_post {id}"),
                format!("delete_post {id}"),
            ]
        );
    }
}
