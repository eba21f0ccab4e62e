//! Bank and category catalog.
//!
//! Banks are global, categories belong to a user. Both are looked up by exact
//! name during imports.

use fatura_core::transaction::CategoryRef;
use fatura_shared::types::{BankId, CategoryId, UserId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::{banks, categories};

/// Error types for catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// A bank with this name already exists.
    #[error("Bank '{0}' already exists")]
    DuplicateBank(String),

    /// The user already has a category with this name.
    #[error("Category '{0}' already exists")]
    DuplicateCategory(String),

    /// Blank name.
    #[error("Name cannot be blank")]
    BlankName,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Bank and category repository.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    db: DatabaseConnection,
}

impl CatalogRepository {
    /// Creates a new catalog repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a bank.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or already taken.
    pub async fn create_bank(&self, name: &str) -> Result<banks::Model, CatalogError> {
        let name = non_blank(name)?;
        if self.find_bank_by_name(name).await?.is_some() {
            return Err(CatalogError::DuplicateBank(name.to_string()));
        }

        let bank = banks::ActiveModel {
            id: Set(BankId::new().into_inner()),
            name: Set(name.to_string()),
            created_at: Set(chrono::Utc::now()),
        };
        Ok(bank.insert(&self.db).await?)
    }

    /// Returns the bank with this name, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the database fails.
    pub async fn find_or_create_bank(&self, name: &str) -> Result<banks::Model, CatalogError> {
        let trimmed = non_blank(name)?;
        match self.find_bank_by_name(trimmed).await? {
            Some(bank) => Ok(bank),
            None => self.create_bank(trimmed).await,
        }
    }

    /// Finds a bank by exact name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_bank_by_name(&self, name: &str) -> Result<Option<banks::Model>, DbErr> {
        banks::Entity::find()
            .filter(banks::Column::Name.eq(name))
            .one(&self.db)
            .await
    }

    /// Lists every bank by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_banks(&self) -> Result<Vec<banks::Model>, DbErr> {
        banks::Entity::find()
            .order_by_asc(banks::Column::Name)
            .all(&self.db)
            .await
    }

    /// Creates a category for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the user already has it.
    pub async fn create_category(
        &self,
        user_id: UserId,
        name: &str,
    ) -> Result<CategoryRef, CatalogError> {
        let name = non_blank(name)?;
        if self.find_category_by_name(user_id, name).await?.is_some() {
            return Err(CatalogError::DuplicateCategory(name.to_string()));
        }

        let category = categories::ActiveModel {
            id: Set(CategoryId::new().into_inner()),
            user_id: Set(user_id.into_inner()),
            name: Set(name.to_string()),
            created_at: Set(chrono::Utc::now()),
        }
        .insert(&self.db)
        .await?;

        Ok(category_ref(category))
    }

    /// Finds one of the user's categories by exact name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_category_by_name(
        &self,
        user_id: UserId,
        name: &str,
    ) -> Result<Option<CategoryRef>, DbErr> {
        let category = categories::Entity::find()
            .filter(categories::Column::UserId.eq(user_id.into_inner()))
            .filter(categories::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(category.map(category_ref))
    }

    /// Lists the user's categories by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_categories(&self, user_id: UserId) -> Result<Vec<CategoryRef>, DbErr> {
        let rows = categories::Entity::find()
            .filter(categories::Column::UserId.eq(user_id.into_inner()))
            .order_by_asc(categories::Column::Name)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(category_ref).collect())
    }
}

fn category_ref(model: categories::Model) -> CategoryRef {
    CategoryRef {
        id: CategoryId::from_uuid(model.id),
        name: model.name,
    }
}

fn non_blank(name: &str) -> Result<&str, CatalogError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::BlankName);
    }
    Ok(trimmed)
}
