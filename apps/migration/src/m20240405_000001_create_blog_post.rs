//! Create `blog_post` table.
//!
//! `AUTOINCREMENT` keeps ids from being reused after a delete.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BlogPost::Table)
                    .if_not_exists()
                    .col(pk_auto(BlogPost::Id))
                    .col(string_len(BlogPost::Title, 250).unique_key())
                    .col(string_len(BlogPost::Subtitle, 250))
                    .col(string_len(BlogPost::Date, 250))
                    .col(text(BlogPost::Body))
                    .col(string_len(BlogPost::Author, 250))
                    .col(string_len(BlogPost::ImgUrl, 250))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BlogPost::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum BlogPost {
    Table,
    Id,
    Title,
    Subtitle,
    Date,
    Body,
    Author,
    ImgUrl,
}
