//! HTML views for the authentication pages

use axum::http::StatusCode;
use axum::response::Response;
use platform::html;

use crate::domain::value_object::role::Role;

pub fn login_page(role: Role, email: &str, errors: &[String]) -> Response {
    let title = format!("Login - {}", role.label());
    let fields = [
        html::text_input("E-mail", "email", email),
        html::password_input("Senha", "senha"),
    ]
    .concat();

    let mut body = html::error_list(errors);
    body.push_str(&html::form(role.login_path(), false, &fields, "Entrar"));
    if let Some(register) = role.register_path() {
        body.push_str(&format!(
            "<p>{} | {}</p>\n",
            html::link(register, "Criar conta"),
            html::link("/auth/reenviar_verificacao", "Reenviar e-mail de verificação"),
        ));
    }

    if errors.is_empty() {
        html::page(&title, &body)
    } else {
        html::page_with_status(StatusCode::BAD_REQUEST, &title, &body)
    }
}

pub fn resend_page() -> Response {
    let options: Vec<(&str, &str)> = [Role::Company, Role::Candidate]
        .iter()
        .map(|r| (r.code(), r.label()))
        .collect();
    let fields = [
        html::select("Tipo de conta", "tipo", &options, ""),
        html::text_input("E-mail", "email", ""),
    ]
    .concat();
    html::page(
        "Reenviar verificação",
        &html::form("/auth/reenviar_verificacao", false, &fields, "Reenviar"),
    )
}

/// Single-message page (verification results)
pub fn message_page(status: StatusCode, title: &str, message: &str) -> Response {
    html::page_with_status(status, title, &html::paragraph(message))
}

pub fn home_page() -> Response {
    let links: String = Role::ALL
        .iter()
        .map(|r| format!("<li>{}</li>", html::link(r.login_path(), r.label())))
        .collect();
    html::page(
        "Portal de Vagas",
        &format!("<p>Entrar como:</p>\n<ul>{links}</ul>\n"),
    )
}
