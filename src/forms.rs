use jiff::civil::Date;
use serde::Deserialize;

use crate::{
    entities::show,
    models::{Rating, ShowFields},
};

pub const TITLE_MAX: usize = 100;
pub const GENRE_MAX: usize = 50;
pub const USERNAME_MAX: usize = 150;

#[derive(Clone, Debug, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

/// Raw show form fields, kept as posted so a failed submission
/// re-renders with the user's input intact.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ShowForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub premiere_date: String,
    #[serde(default)]
    pub review: String,
}

impl ShowForm {
    /// Seed the form from a stored row, for rendering the edit view.
    pub fn from_model(model: &show::Model) -> Self {
        Self {
            title: model.title.clone(),
            genre: model.genre.clone(),
            premiere_date: model.premiere_date.clone(),
            review: model.review.to_string(),
        }
    }

    pub fn validate(&self) -> Result<ShowFields, Vec<FieldError>> {
        let mut errors = Vec::new();

        let title = self.title.trim();
        if title.is_empty() {
            errors.push(FieldError::new("title", "Title is required"));
        } else if title.chars().count() > TITLE_MAX {
            errors.push(FieldError::new(
                "title",
                format!("Title must be at most {TITLE_MAX} characters"),
            ));
        }

        let genre = self.genre.trim();
        if genre.is_empty() {
            errors.push(FieldError::new("genre", "Genre is required"));
        } else if genre.chars().count() > GENRE_MAX {
            errors.push(FieldError::new(
                "genre",
                format!("Genre must be at most {GENRE_MAX} characters"),
            ));
        }

        let premiere_date = match self.premiere_date.trim().parse::<Date>() {
            Ok(date) => Some(date),
            Err(_) => {
                errors.push(FieldError::new(
                    "premiere_date",
                    "Premiere date must be a valid date (YYYY-MM-DD)",
                ));
                None
            }
        };

        let review = match self.review.trim().parse::<i32>().ok().and_then(Rating::from_code) {
            Some(rating) => Some(rating),
            None => {
                errors.push(FieldError::new("review", "Pick one of the listed ratings"));
                None
            }
        };

        match (premiere_date, review) {
            (Some(premiere_date), Some(review)) if errors.is_empty() => Ok(ShowFields {
                title: title.to_string(),
                genre: genre.to_string(),
                premiere_date,
                review,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password_confirm: String,
}

impl SignupForm {
    /// Returns the trimmed username and the password to hash.
    pub fn validate(&self) -> Result<(String, String), Vec<FieldError>> {
        let mut errors = Vec::new();

        let username = self.username.trim();
        if username.is_empty() {
            errors.push(FieldError::new("username", "Username is required"));
        } else if username.chars().count() > USERNAME_MAX {
            errors.push(FieldError::new(
                "username",
                format!("Username must be at most {USERNAME_MAX} characters"),
            ));
        }

        if self.password.chars().count() < crate::auth::MIN_PASSWORD_LENGTH {
            errors.push(FieldError::new(
                "password",
                format!(
                    "Password must be at least {} characters",
                    crate::auth::MIN_PASSWORD_LENGTH
                ),
            ));
        } else if self.password != self.password_confirm {
            errors.push(FieldError::new("password_confirm", "Passwords do not match"));
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok((username.to_string(), self.password.clone()))
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_show_form() -> ShowForm {
        ShowForm {
            title: "Dune".to_string(),
            genre: "SciFi".to_string(),
            premiere_date: "2021-10-21".to_string(),
            review: "2".to_string(),
        }
    }

    #[test]
    fn valid_show_form_binds_all_fields() {
        let fields = valid_show_form().validate().unwrap();
        assert_eq!(fields.title, "Dune");
        assert_eq!(fields.genre, "SciFi");
        assert_eq!(fields.premiere_date, jiff::civil::date(2021, 10, 21));
        assert_eq!(fields.review, Rating::LoveIt);
    }

    #[test]
    fn show_form_trims_whitespace() {
        let mut form = valid_show_form();
        form.title = "  Dune  ".to_string();
        assert_eq!(form.validate().unwrap().title, "Dune");
    }

    #[test]
    fn empty_title_is_rejected() {
        let mut form = valid_show_form();
        form.title = "   ".to_string();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "title");
    }

    #[test]
    fn overlong_genre_is_rejected() {
        let mut form = valid_show_form();
        form.genre = "g".repeat(GENRE_MAX + 1);
        let errors = form.validate().unwrap_err();
        assert_eq!(errors[0].field, "genre");
    }

    #[test]
    fn title_at_max_length_passes() {
        let mut form = valid_show_form();
        form.title = "t".repeat(TITLE_MAX);
        assert!(form.validate().is_ok());
    }

    #[test]
    fn unparseable_date_is_rejected() {
        let mut form = valid_show_form();
        form.premiere_date = "21/10/2021".to_string();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors[0].field, "premiere_date");
    }

    #[test]
    fn review_outside_enum_is_rejected() {
        for bad in ["0", "4", "love", ""] {
            let mut form = valid_show_form();
            form.review = bad.to_string();
            let errors = form.validate().unwrap_err();
            assert_eq!(errors[0].field, "review", "review={bad:?}");
        }
    }

    #[test]
    fn all_errors_collected_in_one_pass() {
        let form = ShowForm::default();
        let errors = form.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, ["title", "genre", "premiere_date", "review"]);
    }

    #[test]
    fn edit_form_seeds_from_model() {
        let model = show::Model {
            id: 7,
            title: "Severance".to_string(),
            genre: "Thriller".to_string(),
            premiere_date: "2022-02-18".to_string(),
            review: 3,
            user_id: 1,
        };
        let form = ShowForm::from_model(&model);
        assert_eq!(form.title, "Severance");
        assert_eq!(form.review, "3");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn signup_password_mismatch_is_rejected() {
        let form = SignupForm {
            username: "alice".to_string(),
            password: "hunter2hunter2".to_string(),
            password_confirm: "hunter2hunter3".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors[0].field, "password_confirm");
    }

    #[test]
    fn signup_short_password_is_rejected() {
        let form = SignupForm {
            username: "alice".to_string(),
            password: "short".to_string(),
            password_confirm: "short".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors[0].field, "password");
    }

    #[test]
    fn signup_valid_returns_trimmed_username() {
        let form = SignupForm {
            username: " alice ".to_string(),
            password: "correct horse".to_string(),
            password_confirm: "correct horse".to_string(),
        };
        let (username, password) = form.validate().unwrap();
        assert_eq!(username, "alice");
        assert_eq!(password, "correct horse");
    }
}
