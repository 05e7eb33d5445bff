use sea_orm_migration::prelude::*;

use crate::{
    m20241002_091500_create_post_table::Post,
    m20241002_091510_create_comment_table::Comment,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(Post::Table)
                    .name("idx_post_timestamp")
                    .col(Post::Timestamp)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Comment::Table)
                    .name("idx_comment_post_id_timestamp")
                    .col(Comment::PostId)
                    .col(Comment::Timestamp)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .table(Comment::Table)
                    .name("idx_comment_post_id_timestamp")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .table(Post::Table)
                    .name("idx_post_timestamp")
                    .to_owned(),
            )
            .await
    }
}
