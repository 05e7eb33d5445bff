use chrono::{Duration, Utc};
use sea_orm_migration::prelude::*;

use crate::{
    m20241002_091500_create_post_table::Post,
    m20241002_091510_create_comment_table::Comment,
};

pub const WELCOME_TITLE: &str = "Welcome to Member Resources";
const WELCOME_DESCRIPTION: &str = "An interactive thread for all members to \
post their resources. Share links, study guides, templates or anything else \
that helped you. All resources are welcome!";
const WELCOME_COMMENT: &str =
    "Reply to any post with a comment, or start your own thread.";

const TIPS_TITLE: &str = "Scholarship search tips";
const TIPS_DESCRIPTION: &str = "Start early, keep a spreadsheet of deadlines \
and reuse your strongest essay paragraphs across applications.";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let now = Utc::now().fixed_offset();

        let posts = Query::insert()
            .into_table(Post::Table)
            .columns([
                Post::Title,
                Post::Description,
                Post::Timestamp,
                Post::IsDemo,
            ])
            .values_panic([
                TIPS_TITLE.into(),
                TIPS_DESCRIPTION.into(),
                (now - Duration::minutes(1)).into(),
                true.into(),
            ])
            .values_panic([
                WELCOME_TITLE.into(),
                WELCOME_DESCRIPTION.into(),
                now.into(),
                true.into(),
            ])
            .to_owned();
        manager.exec_stmt(posts).await?;

        let welcome_post = Query::select()
            .column(Post::Id)
            .expr(Expr::val(WELCOME_COMMENT))
            .expr(Expr::val(now))
            .from(Post::Table)
            .and_where(Expr::col(Post::IsDemo).eq(true))
            .and_where(Expr::col(Post::Title).eq(WELCOME_TITLE))
            .to_owned();
        let comments = Query::insert()
            .into_table(Comment::Table)
            .columns([Comment::PostId, Comment::Text, Comment::Timestamp])
            .select_from(welcome_post)
            .map_err(|e| DbErr::Migration(e.to_string()))?
            .to_owned();
        manager.exec_stmt(comments).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(
                Query::delete()
                    .from_table(Post::Table)
                    .and_where(Expr::col(Post::IsDemo).eq(true))
                    .to_owned(),
            )
            .await
    }
}
