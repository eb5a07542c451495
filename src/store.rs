use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::{
    entities::show,
    error::{AppError, AppResult},
    models::ShowFields,
};

#[derive(Clone)]
pub struct ShowStore {
    db: DatabaseConnection,
}

impl ShowStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn create(&self, owner_id: i32, fields: &ShowFields) -> AppResult<show::Model> {
        let model = show::ActiveModel {
            id: Default::default(),
            title: Set(fields.title.clone()),
            genre: Set(fields.genre.clone()),
            premiere_date: Set(fields.premiere_date.to_string()),
            review: Set(fields.review.as_code()),
            user_id: Set(owner_id),
        };
        Ok(model.insert(&self.db).await?)
    }

    pub async fn get(&self, id: i32) -> AppResult<Option<show::Model>> {
        Ok(show::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn list(&self) -> AppResult<Vec<show::Model>> {
        Ok(show::Entity::find().order_by_asc(show::Column::Id).all(&self.db).await?)
    }

    pub async fn list_by_owner(&self, user_id: i32) -> AppResult<Vec<show::Model>> {
        Ok(show::Entity::find()
            .filter(show::Column::UserId.eq(user_id))
            .order_by_asc(show::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Full replacement of the four content fields. Owner and id are
    /// never touched by an update.
    pub async fn update(&self, id: i32, fields: &ShowFields) -> AppResult<show::Model> {
        let existing = self.get(id).await?.ok_or(AppError::NotFound)?;
        let mut model: show::ActiveModel = existing.into();
        model.title = Set(fields.title.clone());
        model.genre = Set(fields.genre.clone());
        model.premiere_date = Set(fields.premiere_date.to_string());
        model.review = Set(fields.review.as_code());
        Ok(model.update(&self.db).await?)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = show::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use migration::MigratorTrait;
    use sea_orm::Database;

    use super::*;
    use crate::{entities::user, models::Rating, policy};

    async fn store_with_users() -> (ShowStore, user::Model, user::Model) {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        migration::Migrator::up(&db, None).await.unwrap();
        let alice = insert_user(&db, "alice").await;
        let bob = insert_user(&db, "bob").await;
        (ShowStore::new(db), alice, bob)
    }

    async fn insert_user(db: &DatabaseConnection, username: &str) -> user::Model {
        user::ActiveModel {
            id: Default::default(),
            username: Set(username.to_string()),
            password_hash: Set("unused".to_string()),
            created_at: Set(0),
        }
        .insert(db)
        .await
        .unwrap()
    }

    fn dune() -> ShowFields {
        ShowFields {
            title: "Dune".to_string(),
            genre: "SciFi".to_string(),
            premiere_date: jiff::civil::date(2021, 10, 21),
            review: Rating::LoveIt,
        }
    }

    #[tokio::test]
    async fn create_then_get_preserves_fields_and_owner() {
        let (store, alice, _) = store_with_users().await;

        let created = store.create(alice.id, &dune()).await.unwrap();
        let fetched = store.get(created.id).await.unwrap().unwrap();

        assert_eq!(fetched.title, "Dune");
        assert_eq!(fetched.genre, "SciFi");
        assert_eq!(fetched.premiere_date, "2021-10-21");
        assert_eq!(fetched.review, 2);
        assert_eq!(fetched.user_id, alice.id);
    }

    #[tokio::test]
    async fn update_replaces_content_but_keeps_id_and_owner() {
        let (store, alice, _) = store_with_users().await;
        let created = store.create(alice.id, &dune()).await.unwrap();

        let replacement = ShowFields {
            title: "Dune: Part Two".to_string(),
            genre: "Adventure".to_string(),
            premiere_date: jiff::civil::date(2024, 3, 1),
            review: Rating::GottaHaveIt,
        };
        let updated = store.update(created.id, &replacement).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.user_id, alice.id);
        assert_eq!(updated.title, "Dune: Part Two");
        assert_eq!(updated.genre, "Adventure");
        assert_eq!(updated.premiere_date, "2024-03-01");
        assert_eq!(updated.review, 3);
    }

    #[tokio::test]
    async fn update_missing_show_is_not_found() {
        let (store, _, _) = store_with_users().await;
        assert!(matches!(store.update(999, &dune()).await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn delete_missing_show_is_not_found() {
        let (store, _, _) = store_with_users().await;
        assert!(matches!(store.delete(999).await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn list_reflects_creates_minus_deletes() {
        let (store, alice, _) = store_with_users().await;

        let mut ids = Vec::new();
        for i in 0..5 {
            let mut fields = dune();
            fields.title = format!("Show {i}");
            ids.push(store.create(alice.id, &fields).await.unwrap().id);
        }
        store.delete(ids[0]).await.unwrap();
        store.delete(ids[3]).await.unwrap();

        let remaining = store.list().await.unwrap();
        assert_eq!(remaining.len(), 3);
    }

    #[tokio::test]
    async fn list_by_owner_excludes_other_users() {
        let (store, alice, bob) = store_with_users().await;

        store.create(alice.id, &dune()).await.unwrap();
        let mut bobs = dune();
        bobs.title = "The Wire".to_string();
        store.create(bob.id, &bobs).await.unwrap();

        let alices = store.list_by_owner(alice.id).await.unwrap();
        assert_eq!(alices.len(), 1);
        assert_eq!(alices[0].title, "Dune");

        let bobs = store.list_by_owner(bob.id).await.unwrap();
        assert_eq!(bobs.len(), 1);
        assert_eq!(bobs[0].title, "The Wire");
    }

    // The alice/bob ownership scenario: bob may not delete alice's
    // show, alice may.
    #[tokio::test]
    async fn only_the_owner_may_delete() {
        let (store, alice, bob) = store_with_users().await;
        let created = store.create(alice.id, &dune()).await.unwrap();

        assert!(!policy::can_mutate(Some(&bob), &created));
        assert!(store.get(created.id).await.unwrap().is_some());

        assert!(policy::can_mutate(Some(&alice), &created));
        store.delete(created.id).await.unwrap();
        assert!(store.get(created.id).await.unwrap().is_none());
    }
}
