use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, SqlErr};

use crate::{
    entity,
    error::{UserError, UserResult},
    models::{NewUser, User},
    repository::UserRepository,
};

/// PostgreSQL implementation of UserRepository using SeaORM
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn map_insert_error(err: DbErr, email: &str) -> UserError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => UserError::DuplicateEmail(email.to_string()),
        _ => UserError::Internal(format!("Database error: {}", err)),
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, input: NewUser) -> UserResult<User> {
        let email = input.email.clone();
        let active_model: entity::ActiveModel = input.into();

        let model = entity::Entity::insert(active_model)
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| map_insert_error(e, &email))?;

        tracing::info!(user_id = model.id, role = %model.role, "Created user");
        Ok(model.into())
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| UserError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(Into::into))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use sea_orm::{DatabaseBackend, MockDatabase, RuntimeErr};

    fn ana_model(id: i64) -> entity::Model {
        entity::Model {
            id,
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "$argon2id$hash".to_string(),
            phone: "555-1234".to_string(),
            role: Role::User,
        }
    }

    fn ana_new() -> NewUser {
        NewUser {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "$argon2id$hash".to_string(),
            phone: "555-1234".to_string(),
            role: Role::User,
        }
    }

    #[tokio::test]
    async fn test_create_returns_row_with_assigned_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![ana_model(7)]])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let user = repo.create(ana_new()).await.unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.email, "ana@example.com");
        assert_eq!(user.role, Role::User);
    }

    #[tokio::test]
    async fn test_find_by_email_hit_and_miss() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![ana_model(3)], vec![]])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let found = repo.find_by_email("ana@example.com").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(3));

        let missing = repo.find_by_email("nobody@example.com").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_database_failure_is_internal() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Query(RuntimeErr::Internal(
                "connection reset".to_string(),
            ))])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let err = repo.find_by_email("ana@example.com").await.unwrap_err();
        assert!(matches!(err, UserError::Internal(_)));
    }

    #[test]
    fn test_non_constraint_insert_error_is_internal() {
        let err = map_insert_error(
            DbErr::Custom("pool closed".to_string()),
            "ana@example.com",
        );
        assert!(matches!(err, UserError::Internal(_)));
    }
}
