//! Schema migrations for the blog database.

pub use sea_orm_migration::prelude::*;

mod m20240405_000001_create_blog_post;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240405_000001_create_blog_post::Migration)]
    }
}
