pub use sea_orm_migration::prelude::*;

mod m20241002_091500_create_post_table;
mod m20241002_091510_create_comment_table;
mod m20241002_091520_create_index_at_timestamp;
mod m20241002_091530_seed_demo_posts;

pub use m20241002_091530_seed_demo_posts::WELCOME_TITLE;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20241002_091500_create_post_table::Migration),
            Box::new(m20241002_091510_create_comment_table::Migration),
            Box::new(m20241002_091520_create_index_at_timestamp::Migration),
            Box::new(m20241002_091530_seed_demo_posts::Migration),
        ]
    }
}
