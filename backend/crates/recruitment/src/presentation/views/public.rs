//! Public company profile

use axum::response::Response;
use platform::html;

use crate::application::CompanyPage;
use crate::presentation::views::optional;

pub fn company_page(page: &CompanyPage) -> Response {
    let company = &page.company;
    let d = &company.details;
    let a = &d.address;

    let mut body = String::new();
    if let Some(logo) = &company.logo_path {
        body.push_str(&format!(
            "<p><img src=\"{}\" alt=\"Logo\" width=\"160\"></p>\n",
            html::escape(logo)
        ));
    }
    body.push_str(&format!(
        "<p><strong>{}</strong> ({})</p>\n",
        html::escape(&d.legal_name),
        html::escape(&d.cnpj.to_string()),
    ));
    body.push_str(&html::paragraph(optional(&company.profile.bio)));
    body.push_str(&format!(
        "<p>{}, {} - {} - {}/{} - CEP {}</p>\n",
        html::escape(&a.street),
        html::escape(&a.number),
        html::escape(&a.district),
        html::escape(&a.city),
        html::escape(&a.state),
        a.formatted_postal_code(),
    ));
    body.push_str(&format!(
        "<p>Telefone: {} | WhatsApp: {} | E-mail: {}</p>\n",
        html::escape(&d.phone),
        html::escape(&d.whatsapp),
        html::escape(d.email.as_str()),
    ));

    let links: Vec<String> = [
        ("Site", &company.profile.website),
        ("LinkedIn", &company.profile.linkedin),
        ("Instagram", &company.profile.instagram),
    ]
    .into_iter()
    .filter_map(|(label, href)| href.as_deref().map(|href| html::link(href, label)))
    .collect();
    if !links.is_empty() {
        body.push_str(&format!("<p>{}</p>\n", links.join(" | ")));
    }

    body.push_str(&format!(
        "<h2>Avaliações</h2>\n<p>Nota média: {} ({} avaliações)</p>\n",
        page.summary.display(),
        page.summary.count,
    ));
    if page.evaluations.is_empty() {
        body.push_str(&html::paragraph("Esta empresa ainda não foi avaliada."));
    } else {
        let rows: Vec<Vec<String>> = page
            .evaluations
            .iter()
            .map(|e| {
                vec![
                    e.rating.value().to_string(),
                    html::escape(optional(&e.comment)),
                    e.created_at.format("%d/%m/%Y").to_string(),
                ]
            })
            .collect();
        body.push_str(&html::table(&["Nota", "Comentário", "Data"], &rows));
    }

    html::page(company.display_name(), &body)
}
