//! Article repository for database operations.
//!
//! Covers both editorial articles and per-patient diagnosis notes; a
//! diagnosis is an unpublished row with a subject account set.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::error;
use uuid::Uuid;

use crate::entities::articles;

/// Input for creating an article or diagnosis note.
#[derive(Debug, Clone)]
pub struct CreateArticleInput {
    /// Title, or the diagnosis text for clinical notes.
    pub title: String,
    /// Body, or the treatment text for clinical notes.
    pub content: String,
    /// Authoring administrator.
    pub author_id: Uuid,
    /// Patient the note is about; `None` for editorial articles.
    pub subject_account_id: Option<Uuid>,
    /// Visibility on the public education page.
    pub published: bool,
}

/// Article repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ArticleRepository {
    db: DatabaseConnection,
}

impl ArticleRepository {
    /// Creates a new article repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an article or diagnosis note.
    ///
    /// Returns `None` when the store rejects the write; the failure is
    /// logged and the caller surfaces a user-facing message.
    pub async fn create(&self, input: CreateArticleInput) -> Option<articles::Model> {
        let article = articles::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(input.title),
            content: Set(input.content),
            author_id: Set(input.author_id),
            subject_account_id: Set(input.subject_account_id),
            published: Set(input.published),
            created_at: Set(chrono::Utc::now().into()),
        };

        match article.insert(&self.db).await {
            Ok(model) => Some(model),
            Err(e) => {
                error!(error = %e, "failed to create article");
                None
            }
        }
    }

    /// Finds an article by id. Absent or unreachable is `None`.
    pub async fn find_by_id(&self, id: Uuid) -> Option<articles::Model> {
        articles::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, "article lookup failed");
                None
            })
    }

    /// Lists published articles, newest first.
    pub async fn list_published(&self) -> Vec<articles::Model> {
        articles::Entity::find()
            .filter(articles::Column::Published.eq(true))
            .order_by_desc(articles::Column::CreatedAt)
            .all(&self.db)
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, "published article listing failed");
                Vec::new()
            })
    }

    /// Lists all articles, newest first.
    pub async fn list_all(&self) -> Vec<articles::Model> {
        articles::Entity::find()
            .order_by_desc(articles::Column::CreatedAt)
            .all(&self.db)
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, "article listing failed");
                Vec::new()
            })
    }

    /// Lists the diagnosis notes for one patient, newest first.
    pub async fn list_for_subject(&self, account_id: Uuid) -> Vec<articles::Model> {
        articles::Entity::find()
            .filter(articles::Column::SubjectAccountId.eq(account_id))
            .order_by_desc(articles::Column::CreatedAt)
            .all(&self.db)
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, "diagnosis listing failed");
                Vec::new()
            })
    }
}
