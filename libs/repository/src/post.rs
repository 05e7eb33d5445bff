use std::collections::HashMap;

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::active_models::{prelude::*, *};
use crate::response::{IntoResponse, Response};
use crate::Outcome;
use entity::prelude::*;

#[derive(Clone, Debug)]
pub struct PostRepository {
    db: DatabaseConnection,
}

impl PostRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<post::Model> for PostEntity {
    fn from(value: post::Model) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            timestamp: value.timestamp.with_timezone(&Utc),
            is_demo: value.is_demo,
            comments: vec![],
        }
    }
}

impl PostRepository {
    /// Newest post first, each carrying its comments oldest first.
    pub async fn find_all(&self) -> Response<Vec<PostEntity>> {
        let posts = Post::find()
            .order_by_desc(post::Column::Timestamp)
            .order_by_desc(post::Column::Id)
            .all(&self.db)
            .await
            .into_response("in finding posts")?;

        let post_ids: Vec<_> = posts.iter().map(|x| x.id).collect();
        let mut comments: HashMap<i32, Vec<CommentEntity>> = HashMap::new();
        for comment in Comment::find()
            .filter(comment::Column::PostId.is_in(post_ids))
            .order_by_asc(comment::Column::Timestamp)
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await
            .into_response("in finding comments of posts")?
        {
            comments
                .entry(comment.post_id)
                .or_default()
                .push(comment.into());
        }

        Ok(posts
            .into_iter()
            .map(|post| {
                let comments = comments.remove(&post.id).unwrap_or_default();
                PostEntity {
                    comments,
                    ..post.into()
                }
            })
            .collect())
    }

    pub async fn find_by_id(&self, id: i32) -> Response<Option<PostEntity>> {
        let Some(post) = Post::find_by_id(id)
            .one(&self.db)
            .await
            .into_response("in finding a post")?
        else {
            return Ok(None);
        };

        let comments = Comment::find()
            .filter(comment::Column::PostId.eq(id))
            .order_by_asc(comment::Column::Timestamp)
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await
            .into_response("in finding comments of a post")?;

        Ok(Some(PostEntity {
            comments: comments.into_iter().map(CommentEntity::from).collect(),
            ..post.into()
        }))
    }

    /// Inserts a non-demo post. Callers pass an already trimmed title.
    pub async fn create(
        &self,
        title: String,
        description: String,
    ) -> Response<PostEntity> {
        let model = post::ActiveModel {
            id: ActiveValue::not_set(),
            title: ActiveValue::Set(title),
            description: ActiveValue::Set(description),
            timestamp: ActiveValue::Set(Utc::now().fixed_offset()),
            is_demo: ActiveValue::Set(false),
        }
        .insert(&self.db)
        .await
        .into_response("in inserting a post")?;

        Ok(model.into())
    }

    /// Replaces title and description in one conditional statement so a demo
    /// post is never written, then reads the post back with its comments.
    pub async fn replace(
        &self,
        id: i32,
        title: String,
        description: String,
    ) -> Response<Outcome<PostEntity>> {
        let result = Post::update_many()
            .col_expr(post::Column::Title, Expr::value(title))
            .col_expr(post::Column::Description, Expr::value(description))
            .filter(post::Column::Id.eq(id))
            .filter(post::Column::IsDemo.eq(false))
            .exec(&self.db)
            .await
            .into_response("in updating a post")?;

        if result.rows_affected == 0 {
            return self.refusal(id).await;
        }

        Ok(match self.find_by_id(id).await? {
            Some(post) => Outcome::Done(post),
            None => Outcome::NotFound,
        })
    }

    /// Deletes a non-demo post; its comments go with it through the
    /// foreign key's cascade.
    pub async fn delete(&self, id: i32) -> Response<Outcome<()>> {
        let result = Post::delete_many()
            .filter(post::Column::Id.eq(id))
            .filter(post::Column::IsDemo.eq(false))
            .exec(&self.db)
            .await
            .into_response("in deleting a post")?;

        if result.rows_affected == 0 {
            return self.refusal(id).await;
        }

        Ok(Outcome::Done(()))
    }

    // Explains why a conditional write touched no rows.
    async fn refusal<T>(&self, id: i32) -> Response<Outcome<T>> {
        let post = Post::find_by_id(id)
            .one(&self.db)
            .await
            .into_response("in finding a post")?;

        Ok(match post {
            Some(post) if post.is_demo => Outcome::Demo,
            _ => Outcome::NotFound,
        })
    }
}
