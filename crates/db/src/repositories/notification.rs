//! Notification storage and the database-backed sink.

use fatura_core::notification::{Notification, NotificationSink};
use fatura_shared::types::{NotificationId, UserId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, sea_query::Expr,
};

use crate::entities::notifications;

/// Notification repository.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    db: DatabaseConnection,
}

impl NotificationRepository {
    /// Creates a new notification repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn insert(&self, notification: &Notification) -> Result<notifications::Model, DbErr> {
        notifications::ActiveModel {
            id: Set(NotificationId::new().into_inner()),
            user_id: Set(notification.user_id.into_inner()),
            title: Set(notification.title.clone()),
            message: Set(notification.message.clone()),
            level: Set(notification.level.into()),
            read_at: Set(None),
            created_at: Set(chrono::Utc::now()),
        }
        .insert(&self.db)
        .await
    }

    /// Most recent notifications of the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_recent(
        &self,
        user_id: UserId,
        limit: u64,
    ) -> Result<Vec<notifications::Model>, DbErr> {
        notifications::Entity::find()
            .filter(notifications::Column::UserId.eq(user_id.into_inner()))
            .order_by_desc(notifications::Column::CreatedAt)
            .order_by_desc(notifications::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
    }

    /// Number of unread notifications.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn unread_count(&self, user_id: UserId) -> Result<u64, DbErr> {
        notifications::Entity::find()
            .filter(notifications::Column::UserId.eq(user_id.into_inner()))
            .filter(notifications::Column::ReadAt.is_null())
            .count(&self.db)
            .await
    }

    /// Marks every unread notification of the user as read.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn mark_all_read(&self, user_id: UserId) -> Result<u64, DbErr> {
        let result = notifications::Entity::update_many()
            .col_expr(notifications::Column::ReadAt, Expr::value(chrono::Utc::now()))
            .filter(notifications::Column::UserId.eq(user_id.into_inner()))
            .filter(notifications::Column::ReadAt.is_null())
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }
}

/// Sink that stores notifications on a spawned task.
///
/// Failures are logged and never reach the caller.
#[derive(Debug, Clone)]
pub struct DbNotificationSink {
    repository: NotificationRepository,
}

impl DbNotificationSink {
    /// Creates a sink writing through `db`.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self {
            repository: NotificationRepository::new(db),
        }
    }
}

impl NotificationSink for DbNotificationSink {
    fn notify(&self, notification: Notification) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(title = %notification.title, "no runtime, notification dropped");
            return;
        };

        let repository = self.repository.clone();
        handle.spawn(async move {
            if let Err(error) = repository.insert(&notification).await {
                tracing::warn!(
                    user_id = %notification.user_id,
                    %error,
                    "failed to store notification"
                );
            }
        });
    }
}
