use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::{
    entities::{session, user},
    error::AppResult,
};

pub const SESSION_COOKIE: &str = "session";
pub const MIN_PASSWORD_LENGTH: usize = 8;

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("password hashing failed: {e}"))?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok()
}

pub async fn find_user(db: &DatabaseConnection, username: &str) -> AppResult<Option<user::Model>> {
    Ok(user::Entity::find().filter(user::Column::Username.eq(username)).one(db).await?)
}

pub async fn create_user(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> AppResult<user::Model> {
    let model = user::ActiveModel {
        id: Default::default(),
        username: Set(username.to_string()),
        password_hash: Set(hash_password(password)?),
        created_at: Set(now_sec()),
    };
    Ok(model.insert(db).await?)
}

/// Credential check. `None` for an unknown username or a wrong
/// password, indistinguishable to the caller.
pub async fn authenticate(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> AppResult<Option<user::Model>> {
    let Some(user) = find_user(db, username).await? else {
        return Ok(None);
    };
    if !verify_password(password, &user.password_hash) {
        return Ok(None);
    }
    Ok(Some(user))
}

pub async fn create_session(
    db: &DatabaseConnection,
    user_id: i32,
    ttl_hours: i64,
) -> AppResult<session::Model> {
    let model = session::ActiveModel {
        token: Set(Uuid::new_v4().to_string()),
        user_id: Set(user_id),
        expires_at: Set(now_sec() + ttl_hours * 3600),
    };
    Ok(model.insert(db).await?)
}

pub async fn destroy_session(db: &DatabaseConnection, token: &str) -> AppResult<()> {
    session::Entity::delete_by_id(token.to_string()).exec(db).await?;
    Ok(())
}

/// Resolve a session token to its user. Expired sessions count as
/// absent and are deleted on sight.
pub async fn session_user(
    db: &DatabaseConnection,
    token: &str,
) -> AppResult<Option<user::Model>> {
    let Some(session) = session::Entity::find_by_id(token.to_string()).one(db).await? else {
        return Ok(None);
    };
    if session.expires_at <= now_sec() {
        destroy_session(db, token).await?;
        return Ok(None);
    }
    Ok(user::Entity::find_by_id(session.user_id).one(db).await?)
}

/// The session identity for this request, or `None` for anonymous
/// visitors. Passed explicitly into every handler decision.
pub async fn current_user(
    db: &DatabaseConnection,
    jar: &CookieJar,
) -> AppResult<Option<user::Model>> {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return Ok(None);
    };
    session_user(db, cookie.value()).await
}

pub fn session_cookie(token: String, ttl_hours: i64) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::hours(ttl_hours))
        .build()
}

pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::ZERO)
        .build()
}

fn now_sec() -> i64 {
    jiff::Timestamp::now().as_second()
}

#[cfg(test)]
mod tests {
    use migration::MigratorTrait;
    use sea_orm::Database;

    use super::*;

    async fn test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        migration::Migrator::up(&db, None).await.unwrap();
        db
    }

    #[test]
    fn password_round_trips() {
        let hash = hash_password("correct horse").unwrap();
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("wrong horse", &hash));
    }

    #[test]
    fn garbage_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[tokio::test]
    async fn authenticate_accepts_only_the_right_password() {
        let db = test_db().await;
        let alice = create_user(&db, "alice", "wonderland1").await.unwrap();

        let ok = authenticate(&db, "alice", "wonderland1").await.unwrap();
        assert_eq!(ok.map(|u| u.id), Some(alice.id));

        assert!(authenticate(&db, "alice", "queenofhearts").await.unwrap().is_none());
        assert!(authenticate(&db, "absent", "wonderland1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn session_resolves_until_destroyed() {
        let db = test_db().await;
        let alice = create_user(&db, "alice", "wonderland1").await.unwrap();
        let session = create_session(&db, alice.id, 24).await.unwrap();

        let resolved = session_user(&db, &session.token).await.unwrap();
        assert_eq!(resolved.map(|u| u.id), Some(alice.id));

        destroy_session(&db, &session.token).await.unwrap();
        assert!(session_user(&db, &session.token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn expired_session_counts_as_absent() {
        let db = test_db().await;
        let alice = create_user(&db, "alice", "wonderland1").await.unwrap();
        let session = create_session(&db, alice.id, -1).await.unwrap();

        assert!(session_user(&db, &session.token).await.unwrap().is_none());
        // Row is gone too, not merely ignored.
        assert!(
            session::Entity::find_by_id(session.token).one(&db).await.unwrap().is_none()
        );
    }

    #[tokio::test]
    async fn unknown_token_is_anonymous() {
        let db = test_db().await;
        assert!(session_user(&db, "no-such-token").await.unwrap().is_none());
    }
}
