//! User data-access: login lookup, transactional registration, and the
//! list/detail/update/delete set used by the user management endpoints.

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, QueryFilter,
    QuerySelect, Set, TransactionTrait,
};
use serde::Serialize;
use uuid::Uuid;

use super::{unique_conflict, StoreError};
use crate::entities::{
    user,
    user::UserRole,
    user_profile,
    user_profile::Gender,
};

/// Fixed projection returned by list/detail: everything the management UI
/// needs and nothing sensitive.
#[derive(Debug, Clone, Serialize, FromQueryResult)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub is_staff: bool,
    pub is_active: bool,
    pub date_joined: chrono::DateTime<chrono::FixedOffset>,
    pub role: UserRole,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub address: String,
}

#[derive(Debug, Clone)]
pub struct UserChanges {
    pub email: String,
    pub is_staff: bool,
    pub is_active: bool,
    pub role: UserRole,
}

fn row_projection() -> sea_orm::Select<user::Entity> {
    user::Entity::find()
        .select_only()
        .column(user::Column::Id)
        .column(user::Column::Email)
        .column(user::Column::IsStaff)
        .column(user::Column::IsActive)
        .column(user::Column::DateJoined)
        .column(user::Column::Role)
}

/// Fetch the full user row for credential verification. Returns `Ok(None)`
/// when no account matches; the caller must respond identically for a missing
/// account and a wrong password.
pub async fn find_for_login<C: ConnectionTrait>(
    db: &C,
    email: &str,
) -> Result<Option<user::Model>, StoreError> {
    let found = user::Entity::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await?;
    Ok(found)
}

/// The profile row owned by a user, if one exists (login uses it for the
/// display name).
pub async fn profile_for<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
) -> Result<Option<user_profile::Model>, StoreError> {
    let found = user_profile::Entity::find()
        .filter(user_profile::Column::UserId.eq(user_id))
        .one(db)
        .await?;
    Ok(found)
}

/// Register a new account: email-existence check, then the User and
/// UserProfile inserts, all inside one transaction so a partial failure
/// leaves no orphaned row.
pub async fn register<C>(db: &C, new: NewUser) -> Result<Uuid, StoreError>
where
    C: ConnectionTrait + TransactionTrait,
{
    let user_id = db
        .transaction::<_, Uuid, StoreError>(|txn| {
            Box::pin(async move {
                let existing = user::Entity::find()
                    .filter(user::Column::Email.eq(&new.email))
                    .one(txn)
                    .await?;
                if existing.is_some() {
                    return Err(StoreError::EmailTaken);
                }

                let now = chrono::Utc::now().fixed_offset();
                let user_id = Uuid::new_v4();

                user::ActiveModel {
                    id: Set(user_id),
                    email: Set(new.email),
                    password_hash: Set(new.password_hash),
                    is_staff: Set(false),
                    is_active: Set(true),
                    is_superuser: Set(false),
                    date_joined: Set(now),
                    role: Set(new.role),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(txn)
                .await
                .map_err(|e| unique_conflict(e, StoreError::EmailTaken))?;

                user_profile::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    user_id: Set(user_id),
                    first_name: Set(Some(new.first_name)),
                    last_name: Set(Some(new.last_name)),
                    phone: Set(Some(new.phone)),
                    date_of_birth: Set(Some(new.date_of_birth)),
                    gender: Set(new.gender),
                    address: Set(Some(new.address)),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(txn)
                .await?;

                Ok(user_id)
            })
        })
        .await?;

    Ok(user_id)
}

/// All users except super admins. Unbounded, like the original admin listing.
pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<UserRow>, StoreError> {
    let rows = row_projection()
        .filter(user::Column::Role.ne(UserRole::SuperAdmin))
        .into_model::<UserRow>()
        .all(db)
        .await?;
    Ok(rows)
}

pub async fn detail<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<UserRow, StoreError> {
    let row = row_projection()
        .filter(user::Column::Id.eq(id))
        .into_model::<UserRow>()
        .one(db)
        .await?
        .ok_or(StoreError::NotFound)?;
    Ok(row)
}

/// Overwrite the managed fields and stamp the modification time. The caller's
/// validated payload carries the complete set of fields to assign. Assigning
/// an email another account holds is an `EmailTaken` conflict, not a raw
/// database failure.
pub async fn update<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    changes: UserChanges,
) -> Result<UserRow, StoreError> {
    let existing = user::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(StoreError::NotFound)?;

    let mut active: user::ActiveModel = existing.into();
    active.email = Set(changes.email);
    active.is_staff = Set(changes.is_staff);
    active.is_active = Set(changes.is_active);
    active.role = Set(changes.role);
    active.updated_at = Set(chrono::Utc::now().fixed_offset());
    let updated = active
        .update(db)
        .await
        .map_err(|e| unique_conflict(e, StoreError::EmailTaken))?;

    Ok(UserRow {
        id: updated.id,
        email: updated.email,
        is_staff: updated.is_staff,
        is_active: updated.is_active,
        date_joined: updated.date_joined,
        role: updated.role,
    })
}

/// Hard delete. `NotFound` when the id matched no row, never a false success.
pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<(), StoreError> {
    let result = user::Entity::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(StoreError::NotFound);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, MockDatabase, MockExecResult, QueryTrait};

    fn sample_new_user(email: &str) -> NewUser {
        NewUser {
            email: email.into(),
            password_hash: "$argon2id$stub".into(),
            role: UserRole::Artist,
            first_name: "Miles".into(),
            last_name: "Davis".into(),
            phone: "+9779812345678".into(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 26).unwrap(),
            gender: Gender::Male,
            address: "East St. Louis".into(),
        }
    }

    fn sample_user_model(email: &str) -> user::Model {
        let now = chrono::Utc::now().fixed_offset();
        user::Model {
            id: Uuid::new_v4(),
            email: email.into(),
            password_hash: "$argon2id$stub".into(),
            is_staff: false,
            is_active: true,
            is_superuser: false,
            date_joined: now,
            role: UserRole::Artist,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_list_excludes_super_admin() {
        let sql = row_projection()
            .filter(user::Column::Role.ne(UserRole::SuperAdmin))
            .build(DbBackend::Postgres)
            .to_string();
        assert!(sql.contains(r#""role" <> 'super_admin'"#), "{sql}");
    }

    #[test]
    fn test_projection_omits_password_hash() {
        let sql = row_projection().build(DbBackend::Postgres).to_string();
        assert!(!sql.contains("password_hash"), "{sql}");
        assert!(sql.contains(r#""email""#), "{sql}");
        assert!(sql.contains(r#""date_joined""#), "{sql}");
        assert!(sql.contains(r#""role""#), "{sql}");
    }

    #[test]
    fn test_detail_filters_by_id() {
        let id = Uuid::new_v4();
        let sql = row_projection()
            .filter(user::Column::Id.eq(id))
            .build(DbBackend::Postgres)
            .to_string();
        assert!(sql.contains(&id.to_string()), "{sql}");
    }

    #[tokio::test]
    async fn test_delete_missing_user_is_not_found() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let err = delete(&db, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_existing_user_succeeds() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        assert!(delete(&db, Uuid::new_v4()).await.is_ok());
    }

    #[tokio::test]
    async fn test_register_duplicate_email_inserts_nothing() {
        // The existence check finds a matching account, so the transaction
        // bails out before either insert runs.
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_query_results([vec![sample_user_model("taken@example.com")]])
            .into_connection();

        let err = register(&db, sample_new_user("taken@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::EmailTaken));

        let log = db.into_transaction_log();
        assert!(
            !log.iter().any(|stmt| format!("{stmt:?}").contains("INSERT")),
            "no insert may run after a duplicate email: {log:?}"
        );
    }

    #[test]
    fn test_user_row_serializes_role_as_variant() {
        let row = UserRow {
            id: Uuid::new_v4(),
            email: "a@b.com".into(),
            is_staff: false,
            is_active: true,
            date_joined: chrono::Utc::now().fixed_offset(),
            role: UserRole::Artist,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["email"], "a@b.com");
        assert!(json.get("password_hash").is_none());
    }
}
