use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, SqlErr,
};

use crate::active_models::{prelude::*, *};
use crate::response::{IntoResponse, Response};
use crate::Outcome;
use entity::prelude::*;

#[derive(Clone, Debug)]
pub struct CommentRepository {
    db: DatabaseConnection,
}

impl CommentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<comment::Model> for CommentEntity {
    fn from(value: comment::Model) -> Self {
        Self {
            id: value.id,
            post_id: value.post_id,
            text: value.text,
            timestamp: value.timestamp.with_timezone(&Utc),
        }
    }
}

impl CommentRepository {
    pub async fn find_by_id(&self, id: i32) -> Response<Option<CommentEntity>> {
        let comment = Comment::find_by_id(id)
            .one(&self.db)
            .await
            .into_response("in finding a comment")?;

        Ok(comment.map(CommentEntity::from))
    }

    /// Inserts a comment under `post_id`. The foreign key decides whether the
    /// post exists, so there is no separate lookup to race with a delete.
    pub async fn create(
        &self,
        post_id: i32,
        text: String,
    ) -> Response<Outcome<CommentEntity>> {
        let result = comment::ActiveModel {
            id: ActiveValue::not_set(),
            post_id: ActiveValue::Set(post_id),
            text: ActiveValue::Set(text),
            timestamp: ActiveValue::Set(Utc::now().fixed_offset()),
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(model) => Ok(Outcome::Done(model.into())),
            Err(e) if is_foreign_key_violation(&e) => Ok(Outcome::NotFound),
            Err(e) => Err(e).into_response("in inserting a comment"),
        }
    }

    pub async fn replace(
        &self,
        id: i32,
        text: String,
    ) -> Response<Option<CommentEntity>> {
        let result = Comment::update_many()
            .col_expr(comment::Column::Text, Expr::value(text))
            .filter(comment::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .into_response("in updating a comment")?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    /// Returns false when there was nothing to delete.
    pub async fn delete(&self, id: i32) -> Response<bool> {
        let result = Comment::delete_by_id(id)
            .exec(&self.db)
            .await
            .into_response("in deleting a comment")?;

        Ok(result.rows_affected > 0)
    }
}

fn is_foreign_key_violation(e: &DbErr) -> bool {
    if let Some(SqlErr::ForeignKeyConstraintViolation(_)) = e.sql_err() {
        return true;
    }

    let message = e.to_string();
    message.contains("FOREIGN KEY constraint failed")
        || message.contains("violates foreign key constraint")
}
