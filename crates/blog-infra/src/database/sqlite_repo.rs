//! SQLite post repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseTransaction, DbConn, DbErr, EntityTrait, PaginatorTrait, QueryOrder,
    Set, SqlErr, TransactionTrait,
};

use blog_core::domain::{BlogPost, NewBlogPost, Page, PageRequest, PostDraft};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

use super::entity::blog_post::{self, Entity as PostEntity};

/// Post store backed by a SeaORM connection pool.
#[derive(Clone)]
pub struct SqlitePostRepository {
    pub(crate) db: DbConn,
}

impl SqlitePostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

fn map_db_err(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => return RepoError::Constraint(msg),
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => return RepoError::Constraint(msg),
        _ => {}
    }

    match err {
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        DbErr::RecordNotFound(_) => RepoError::NotFound,
        other => {
            let err_str = other.to_string();
            if err_str.to_lowercase().contains("unique") {
                RepoError::Constraint(err_str)
            } else {
                RepoError::Query(err_str)
            }
        }
    }
}

async fn rollback(txn: DatabaseTransaction) {
    if let Err(e) = txn.rollback().await {
        tracing::warn!(error = %e, "Transaction rollback failed");
    }
}

#[async_trait]
impl PostRepository for SqlitePostRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<BlogPost>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, post: NewBlogPost) -> Result<BlogPost, RepoError> {
        tracing::debug!(title = %post.draft.title, "Inserting blog post");

        let txn = self.db.begin().await.map_err(map_db_err)?;
        let active_model: blog_post::ActiveModel = post.into();

        match active_model.insert(&txn).await {
            Ok(model) => {
                txn.commit().await.map_err(map_db_err)?;
                Ok(model.into())
            }
            Err(e) => {
                rollback(txn).await;
                Err(map_db_err(e))
            }
        }
    }

    async fn update(&self, id: i32, draft: PostDraft) -> Result<BlogPost, RepoError> {
        tracing::debug!(post_id = id, "Updating blog post");

        let txn = self.db.begin().await.map_err(map_db_err)?;

        let existing = match PostEntity::find_by_id(id).one(&txn).await {
            Ok(Some(model)) => model,
            Ok(None) => {
                rollback(txn).await;
                return Err(RepoError::NotFound);
            }
            Err(e) => {
                rollback(txn).await;
                return Err(map_db_err(e));
            }
        };

        // date and id stay as they were
        let mut active_model: blog_post::ActiveModel = existing.into();
        active_model.title = Set(draft.title);
        active_model.subtitle = Set(draft.subtitle);
        active_model.author = Set(draft.author);
        active_model.img_url = Set(draft.img_url);
        active_model.body = Set(draft.body);

        match active_model.update(&txn).await {
            Ok(model) => {
                txn.commit().await.map_err(map_db_err)?;
                Ok(model.into())
            }
            Err(e) => {
                rollback(txn).await;
                Err(map_db_err(e))
            }
        }
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        tracing::debug!(post_id = id, "Deleted blog post");
        Ok(())
    }

    async fn list_page(&self, request: PageRequest) -> Result<Page<BlogPost>, RepoError> {
        let paginator = PostEntity::find()
            .order_by_desc(blog_post::Column::Date)
            .order_by_desc(blog_post::Column::Id)
            .paginate(&self.db, request.per_page);

        let total_items = paginator.num_items().await.map_err(map_db_err)?;

        // past the last page; also keeps the offset within what SQLite can bind
        if request.page > total_items.div_ceil(request.per_page) {
            return Ok(Page::new(Vec::new(), request, total_items));
        }

        let items = paginator
            .fetch_page(request.index())
            .await
            .map_err(map_db_err)?;

        Ok(Page::new(
            items.into_iter().map(Into::into).collect(),
            request,
            total_items,
        ))
    }

    async fn count(&self) -> Result<u64, RepoError> {
        PostEntity::find()
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }
}
