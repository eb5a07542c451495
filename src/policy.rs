use crate::entities::{show, user};

/// Anyone with an authenticated identity may create shows.
pub fn can_create(identity: Option<&user::Model>) -> bool {
    identity.is_some()
}

/// Only the owning user may edit or delete a show.
pub fn can_mutate(identity: Option<&user::Model>, show: &show::Model) -> bool {
    match identity {
        Some(user) => show.user_id == user.id,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i32) -> user::Model {
        user::Model {
            id,
            username: format!("user{id}"),
            password_hash: String::new(),
            created_at: 0,
        }
    }

    fn show_owned_by(user_id: i32) -> show::Model {
        show::Model {
            id: 1,
            title: "Dune".to_string(),
            genre: "SciFi".to_string(),
            premiere_date: "2021-10-21".to_string(),
            review: 2,
            user_id,
        }
    }

    #[test]
    fn anonymous_cannot_create() {
        assert!(!can_create(None));
    }

    #[test]
    fn authenticated_can_create() {
        assert!(can_create(Some(&user(1))));
    }

    #[test]
    fn owner_can_mutate() {
        assert!(can_mutate(Some(&user(1)), &show_owned_by(1)));
    }

    #[test]
    fn non_owner_cannot_mutate() {
        assert!(!can_mutate(Some(&user(2)), &show_owned_by(1)));
    }

    #[test]
    fn anonymous_cannot_mutate() {
        assert!(!can_mutate(None, &show_owned_by(1)));
    }
}
