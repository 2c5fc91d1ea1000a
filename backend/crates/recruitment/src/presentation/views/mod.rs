//! HTML views for the recruitment pages

pub mod admin;
pub mod candidate;
pub mod company;
pub mod public;
pub mod registration;

use axum::http::StatusCode;
use axum::response::Response;
use platform::html;

use crate::domain::entity::job::JobListing;
use crate::domain::search::Page;
use crate::domain::value_object::address::AddressInput;

/// 200, or 400 when the page is a re-render with errors
fn respond(title: &str, body: &str, errors: &[String]) -> Response {
    if errors.is_empty() {
        html::page(title, body)
    } else {
        html::page_with_status(StatusCode::BAD_REQUEST, title, body)
    }
}

fn address_fields(address: &AddressInput) -> String {
    [
        html::text_input("CEP", "cep", &address.postal_code),
        html::text_input("Endereço", "endereco", &address.street),
        html::text_input("Número", "numero", &address.number),
        html::text_input("Complemento", "complemento", &address.complement),
        html::text_input("Bairro", "bairro", &address.district),
        html::text_input("Cidade", "cidade", &address.city),
        html::text_input("Estado (UF)", "estado", &address.state),
    ]
    .concat()
}

fn optional(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

/// Job table rows; `actions` renders the last column
fn job_rows(listings: &[JobListing], actions: impl Fn(&JobListing) -> String) -> Vec<Vec<String>> {
    listings
        .iter()
        .map(|listing| {
            let d = &listing.job.details;
            vec![
                html::escape(&d.title),
                html::escape(&listing.company_name),
                html::escape(&d.role),
                d.salary_band.label().to_string(),
                d.contract_type.label().to_string(),
                d.work_mode.label().to_string(),
                d.availability.label().to_string(),
                html::escape(&d.tags.join(", ")),
                listing.job.created_at.format("%d/%m/%Y").to_string(),
                actions(listing),
            ]
        })
        .collect()
}

const JOB_HEADERS: [&str; 10] = [
    "Título",
    "Empresa",
    "Cargo",
    "Salário",
    "Contrato",
    "Modalidade",
    "Disponibilidade",
    "Tags",
    "Publicada em",
    "",
];

/// "Página x de y" with previous/next links; `query` is the rest of the
/// query string, percent-encoded but not HTML-escaped, possibly empty
fn pager<T>(page: &Page<T>, path: &str, query: &str) -> String {
    let href = |n: u32| {
        if query.is_empty() {
            format!("{path}?pagina={n}")
        } else {
            format!("{path}?{query}&pagina={n}")
        }
    };

    let mut links = Vec::new();
    if page.has_previous() {
        links.push(html::link(&href(page.page - 1), "Anterior"));
    }
    links.push(format!(
        "Página {} de {} ({} vagas)",
        page.page, page.page_count, page.total
    ));
    if page.has_next() {
        links.push(html::link(&href(page.page + 1), "Próxima"));
    }
    format!("<p class=\"pager\">{}</p>\n", links.join(" | "))
}
