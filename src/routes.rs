use std::sync::Arc;

use axum::{
    extract::{Form, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;

use crate::{
    AppState, auth,
    error::{AppError, AppResult},
    forms::{FieldError, LoginForm, ShowForm, SignupForm},
    policy, templates,
};

pub async fn home(State(state): State<Arc<AppState>>, jar: CookieJar) -> AppResult<Html<String>> {
    let current = auth::current_user(state.store.db(), &jar).await?;
    Ok(Html(templates::home_page(current.as_ref())))
}

pub async fn shows(State(state): State<Arc<AppState>>, jar: CookieJar) -> AppResult<Html<String>> {
    let current = auth::current_user(state.store.db(), &jar).await?;
    let shows = state.store.list().await?;
    Ok(Html(templates::shows_page(&shows, current.as_ref())))
}

pub async fn show_add_form(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> AppResult<Response> {
    let current = auth::current_user(state.store.db(), &jar).await?;
    if !policy::can_create(current.as_ref()) {
        return Ok(Redirect::to("/login/").into_response());
    }

    let form = ShowForm::default();
    Ok(Html(templates::show_form_page(
        "Add new TV show",
        "/shows/add/",
        &form,
        &[],
        current.as_ref(),
    ))
    .into_response())
}

pub async fn show_add_submit(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<ShowForm>,
) -> AppResult<Response> {
    let current = auth::current_user(state.store.db(), &jar).await?;
    let Some(user) = current else {
        return Ok(Redirect::to("/login/").into_response());
    };

    match form.validate() {
        Ok(fields) => {
            let show = state.store.create(user.id, &fields).await?;
            tracing::debug!(show_id = show.id, user_id = user.id, "show created");
            Ok(Redirect::to("/profile/").into_response())
        }
        Err(errors) => Ok(Html(templates::show_form_page(
            "Add new TV show",
            "/shows/add/",
            &form,
            &errors,
            Some(&user),
        ))
        .into_response()),
    }
}

pub async fn show_edit_form(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    let current = auth::current_user(state.store.db(), &jar).await?;
    let Some(user) = current else {
        return Ok(Redirect::to("/login/").into_response());
    };

    let show = state.store.get(id).await?.ok_or(AppError::NotFound)?;
    if !policy::can_mutate(Some(&user), &show) {
        tracing::debug!(show_id = id, user_id = user.id, "edit denied");
        return Err(AppError::Unauthorized);
    }

    let form = ShowForm::from_model(&show);
    Ok(Html(templates::show_form_page(
        "Edit TV show",
        &format!("/shows/{id}/edit/"),
        &form,
        &[],
        Some(&user),
    ))
    .into_response())
}

pub async fn show_edit_submit(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path(id): Path<i32>,
    Form(form): Form<ShowForm>,
) -> AppResult<Response> {
    let current = auth::current_user(state.store.db(), &jar).await?;
    let Some(user) = current else {
        return Ok(Redirect::to("/login/").into_response());
    };

    let show = state.store.get(id).await?.ok_or(AppError::NotFound)?;
    if !policy::can_mutate(Some(&user), &show) {
        tracing::debug!(show_id = id, user_id = user.id, "edit denied");
        return Err(AppError::Unauthorized);
    }

    match form.validate() {
        Ok(fields) => {
            state.store.update(id, &fields).await?;
            tracing::debug!(show_id = id, user_id = user.id, "show updated");
            Ok(Redirect::to("/shows/").into_response())
        }
        Err(errors) => Ok(Html(templates::show_form_page(
            "Edit TV show",
            &format!("/shows/{id}/edit/"),
            &form,
            &errors,
            Some(&user),
        ))
        .into_response()),
    }
}

pub async fn show_delete(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path(id): Path<i32>,
) -> AppResult<Redirect> {
    let current = auth::current_user(state.store.db(), &jar).await?;
    let show = state.store.get(id).await?.ok_or(AppError::NotFound)?;

    if !policy::can_mutate(current.as_ref(), &show) {
        tracing::debug!(show_id = id, "delete denied");
        return Err(AppError::Unauthorized);
    }

    state.store.delete(id).await?;
    tracing::debug!(show_id = id, "show deleted");
    Ok(Redirect::to("/shows/"))
}

pub async fn login_form(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> AppResult<Html<String>> {
    let current = auth::current_user(state.store.db(), &jar).await?;
    Ok(Html(templates::login_page(&LoginForm::default(), None, current.as_ref())))
}

pub async fn login_submit(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let db = state.store.db();
    let username = form.username.trim();

    match auth::authenticate(db, username, &form.password).await? {
        Some(user) => {
            let session = auth::create_session(db, user.id, state.config.session_ttl_hours).await?;
            let jar = jar.add(auth::session_cookie(session.token, state.config.session_ttl_hours));
            tracing::debug!(user_id = user.id, "logged in");
            Ok((jar, Redirect::to("/profile/")).into_response())
        }
        None => {
            tracing::warn!(username, "login failed");
            Ok(Html(templates::login_page(
                &form,
                Some("Invalid username or password"),
                None,
            ))
            .into_response())
        }
    }
}

pub async fn signup_form(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> AppResult<Html<String>> {
    let current = auth::current_user(state.store.db(), &jar).await?;
    Ok(Html(templates::signup_page(&SignupForm::default(), &[], current.as_ref())))
}

pub async fn signup_submit(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<SignupForm>,
) -> AppResult<Response> {
    let db = state.store.db();

    let (username, password) = match form.validate() {
        Ok(valid) => valid,
        Err(errors) => {
            return Ok(Html(templates::signup_page(&form, &errors, None)).into_response());
        }
    };

    if auth::find_user(db, &username).await?.is_some() {
        let errors = vec![FieldError {
            field: "username",
            message: "That username is taken".to_string(),
        }];
        return Ok(Html(templates::signup_page(&form, &errors, None)).into_response());
    }

    let user = auth::create_user(db, &username, &password).await?;
    let session = auth::create_session(db, user.id, state.config.session_ttl_hours).await?;
    let jar = jar.add(auth::session_cookie(session.token, state.config.session_ttl_hours));
    tracing::debug!(user_id = user.id, "account created");

    Ok((jar, Redirect::to("/profile/")).into_response())
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Redirect)> {
    if let Some(cookie) = jar.get(auth::SESSION_COOKIE) {
        auth::destroy_session(state.store.db(), cookie.value()).await?;
    }
    let jar = jar.add(auth::clear_session_cookie());
    Ok((jar, Redirect::to("/shows/")))
}

pub async fn profile(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> AppResult<Response> {
    let current = auth::current_user(state.store.db(), &jar).await?;
    let Some(user) = current else {
        return Ok(Redirect::to("/login/").into_response());
    };

    let shows = state.store.list_by_owner(user.id).await?;
    Ok(Html(templates::profile_page(&user, &shows)).into_response())
}
