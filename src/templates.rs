use axum::http::StatusCode;
use maud::{DOCTYPE, Markup, html};

use crate::{
    entities::{show, user},
    forms::{FieldError, LoginForm, ShowForm, SignupForm},
    models::Rating,
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

pub fn home_page(current: Option<&user::Model>) -> String {
    page(
        "showboxd",
        current,
        html! {
            div class="max-w-2xl mx-auto px-6 py-16 text-center" {
                h1 class="text-5xl" { "(╯°□°）╯︵ ┻━┻" }
                p class="mt-6 text-gray-600" { "Track the TV shows you've watched." }
                a class="mt-8 inline-block rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" href="/shows/" { "Browse shows" }
            }
        },
    )
}

pub fn shows_page(shows: &[show::Model], current: Option<&user::Model>) -> String {
    page(
        "TV Shows",
        current,
        html! {
            div class="max-w-3xl mx-auto px-6 py-10" {
                div class="flex items-center justify-between" {
                    h1 class="text-3xl font-bold text-gray-900" { "TV Shows" }
                    @if current.is_some() {
                        a class="rounded-md bg-blue-600 px-4 py-2 text-sm font-semibold text-white hover:bg-blue-700" href="/shows/add/" { "Add show" }
                    }
                }

                @if shows.is_empty() {
                    div class="mt-10 bg-white shadow rounded-lg p-8" {
                        p class="text-gray-600" { "Nothing tracked yet." }
                    }
                } @else {
                    div class="mt-10 space-y-4" {
                        @for show in shows {
                            (show_card(show, current))
                        }
                    }
                }
            }
        },
    )
}

pub fn show_form_page(
    header: &str,
    action: &str,
    form: &ShowForm,
    errors: &[FieldError],
    current: Option<&user::Model>,
) -> String {
    page(
        header,
        current,
        html! {
            div class="max-w-xl mx-auto px-6 py-10" {
                div class="bg-white shadow rounded-lg p-8" {
                    h1 class="text-2xl font-bold text-gray-900" { (header) }

                    form class="mt-6 space-y-5" method="post" action=(action) {
                        div {
                            label class="block text-sm font-medium text-gray-700" for="title" { "Title" }
                            input class=(INPUT_CLASS) name="title" id="title" value=(form.title) maxlength="100";
                            (field_errors(errors, "title"))
                        }

                        div {
                            label class="block text-sm font-medium text-gray-700" for="genre" { "Genre" }
                            input class=(INPUT_CLASS) name="genre" id="genre" value=(form.genre) maxlength="50";
                            (field_errors(errors, "genre"))
                        }

                        div {
                            label class="block text-sm font-medium text-gray-700" for="premiere_date" { "Premiere date" }
                            input class=(INPUT_CLASS) type="date" name="premiere_date" id="premiere_date" value=(form.premiere_date);
                            (field_errors(errors, "premiere_date"))
                        }

                        div {
                            label class="block text-sm font-medium text-gray-700" for="review" { "Review" }
                            select class=(INPUT_CLASS) name="review" id="review" {
                                option value="" { "Pick a rating" }
                                @for rating in Rating::ALL {
                                    option value=(rating.as_code()) selected[form.review == rating.as_code().to_string()] { (rating.label()) }
                                }
                            }
                            (field_errors(errors, "review"))
                        }

                        button class="w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Save" }
                    }
                }
            }
        },
    )
}

pub fn login_page(form: &LoginForm, error: Option<&str>, current: Option<&user::Model>) -> String {
    page(
        "Log in",
        current,
        html! {
            div class="max-w-md mx-auto px-6 py-10" {
                div class="bg-white shadow rounded-lg p-8" {
                    h1 class="text-2xl font-bold text-gray-900" { "Log in" }

                    @if let Some(message) = error {
                        p class="mt-4 rounded-md bg-red-50 px-3 py-2 text-sm text-red-700" { (message) }
                    }

                    form class="mt-6 space-y-5" method="post" action="/login/" {
                        div {
                            label class="block text-sm font-medium text-gray-700" for="username" { "Username" }
                            input class=(INPUT_CLASS) name="username" id="username" value=(form.username);
                        }

                        div {
                            label class="block text-sm font-medium text-gray-700" for="password" { "Password" }
                            input class=(INPUT_CLASS) type="password" name="password" id="password";
                        }

                        button class="w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Log in" }
                    }

                    p class="mt-4 text-sm text-gray-600" {
                        "No account? "
                        a class="text-blue-600 hover:text-blue-800" href="/signup/" { "Sign up" }
                    }
                }
            }
        },
    )
}

pub fn signup_page(
    form: &SignupForm,
    errors: &[FieldError],
    current: Option<&user::Model>,
) -> String {
    page(
        "Sign up",
        current,
        html! {
            div class="max-w-md mx-auto px-6 py-10" {
                div class="bg-white shadow rounded-lg p-8" {
                    h1 class="text-2xl font-bold text-gray-900" { "Sign up" }

                    form class="mt-6 space-y-5" method="post" action="/signup/" {
                        div {
                            label class="block text-sm font-medium text-gray-700" for="username" { "Username" }
                            input class=(INPUT_CLASS) name="username" id="username" value=(form.username) maxlength="150";
                            (field_errors(errors, "username"))
                        }

                        div {
                            label class="block text-sm font-medium text-gray-700" for="password" { "Password" }
                            input class=(INPUT_CLASS) type="password" name="password" id="password";
                            (field_errors(errors, "password"))
                        }

                        div {
                            label class="block text-sm font-medium text-gray-700" for="password_confirm" { "Confirm password" }
                            input class=(INPUT_CLASS) type="password" name="password_confirm" id="password_confirm";
                            (field_errors(errors, "password_confirm"))
                        }

                        button class="w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Create account" }
                    }

                    p class="mt-4 text-sm text-gray-600" {
                        "Already registered? "
                        a class="text-blue-600 hover:text-blue-800" href="/login/" { "Log in" }
                    }
                }
            }
        },
    )
}

pub fn profile_page(current: &user::Model, shows: &[show::Model]) -> String {
    page(
        "Your shows",
        Some(current),
        html! {
            div class="max-w-3xl mx-auto px-6 py-10" {
                div class="flex items-center justify-between" {
                    div {
                        h1 class="text-3xl font-bold text-gray-900" { "Your shows" }
                        p class="mt-1 text-gray-600" { "@" (current.username) }
                    }
                    a class="rounded-md bg-blue-600 px-4 py-2 text-sm font-semibold text-white hover:bg-blue-700" href="/shows/add/" { "Add show" }
                }

                @if shows.is_empty() {
                    div class="mt-10 bg-white shadow rounded-lg p-8" {
                        p class="text-gray-600" { "You haven't tracked any shows yet." }
                    }
                } @else {
                    div class="mt-10 space-y-4" {
                        @for show in shows {
                            (show_card(show, Some(current)))
                        }
                    }
                }
            }
        },
    )
}

pub fn error_page(status: StatusCode, message: String) -> String {
    let title = match status {
        StatusCode::NOT_FOUND => "Not found",
        StatusCode::FORBIDDEN => "Not allowed",
        _ => "Error",
    };
    page(
        title,
        None,
        html! {
            div class="max-w-xl mx-auto px-6 py-16" {
                div class="bg-white shadow rounded-lg p-8" {
                    h1 class="text-2xl font-bold text-gray-900" { (title) }
                    p class="mt-4 text-gray-700" { (message) }
                    a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/shows/" { "Back to shows" }
                }
            }
        },
    )
}

const INPUT_CLASS: &str = "mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500";

fn page(title: &str, current: Option<&user::Model>, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " · showboxd" }
                script src=(TAILWIND_CDN) {}
            }
            body class="min-h-screen bg-gray-50" {
                (nav(current))
                (body)
            }
        }
    }
    .into_string()
}

fn nav(current: Option<&user::Model>) -> Markup {
    html! {
        nav class="bg-white shadow" {
            div class="max-w-3xl mx-auto px-6 py-4 flex items-center justify-between" {
                a class="font-bold text-gray-900" href="/" { "showboxd" }
                div class="flex items-center gap-4 text-sm" {
                    a class="text-gray-600 hover:text-gray-900" href="/shows/" { "Shows" }
                    @if let Some(user) = current {
                        a class="text-gray-600 hover:text-gray-900" href="/profile/" { "@" (user.username) }
                        a class="text-gray-600 hover:text-gray-900" href="/logout/" { "Log out" }
                    } @else {
                        a class="text-gray-600 hover:text-gray-900" href="/login/" { "Log in" }
                        a class="text-gray-600 hover:text-gray-900" href="/signup/" { "Sign up" }
                    }
                }
            }
        }
    }
}

fn show_card(show: &show::Model, current: Option<&user::Model>) -> Markup {
    let owned = current.is_some_and(|u| u.id == show.user_id);
    let rating = Rating::from_code(show.review).map(Rating::label).unwrap_or("—");

    html! {
        div class="bg-white shadow rounded-lg p-6" {
            div class="flex items-start justify-between gap-4" {
                div {
                    h2 class="text-xl font-semibold text-gray-900" { (show.title) }
                    p class="mt-1 text-sm text-gray-500" { (show.genre) " · premiered " (show.premiere_date) }
                    p class="mt-2 text-sm font-medium text-gray-700" { (rating) }
                }
                @if owned {
                    div class="flex items-center gap-3" {
                        a class="text-sm text-blue-600 hover:text-blue-800" href=(format!("/shows/{}/edit/", show.id)) { "Edit" }
                        form method="post" action=(format!("/shows/{}/delete/", show.id)) {
                            button class="text-sm text-red-600 hover:text-red-800" type="submit" { "Delete" }
                        }
                    }
                }
            }
        }
    }
}

fn field_errors(errors: &[FieldError], field: &str) -> Markup {
    html! {
        @for error in errors.iter().filter(|e| e.field == field) {
            p class="mt-2 text-sm text-red-600" { (error.message) }
        }
    }
}
