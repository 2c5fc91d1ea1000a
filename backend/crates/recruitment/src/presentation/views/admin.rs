//! Administration pages

use axum::response::Response;
use platform::html;

use crate::domain::entity::{candidate::Candidate, company::Company, job::JobListing};
use crate::domain::repository::EntityCounts;

fn nav() -> String {
    format!(
        "<nav>{} | {} | {} | {}</nav>\n",
        html::link("/admin/dashboard", "Painel"),
        html::link("/admin/empresas", "Empresas"),
        html::link("/admin/candidatos", "Candidatos"),
        html::link("/admin/vagas", "Vagas"),
    )
}

fn delete_button(path: &str) -> String {
    html::post_button(path, &[], "Excluir")
}

pub fn dashboard(counts: &EntityCounts) -> Response {
    let rows = vec![
        vec!["Empresas".to_string(), counts.companies.to_string()],
        vec!["Candidatos".to_string(), counts.candidates.to_string()],
        vec!["Vagas".to_string(), counts.jobs.to_string()],
        vec!["Candidaturas".to_string(), counts.applications.to_string()],
    ];
    let mut body = nav();
    body.push_str(&html::table(&["Cadastro", "Total"], &rows));
    html::page("Administração", &body)
}

pub fn companies_page(companies: &[Company]) -> Response {
    let rows: Vec<Vec<String>> = companies
        .iter()
        .map(|c| {
            let id = c.company_id;
            vec![
                html::link(&format!("/empresas/{id}"), c.display_name()),
                html::escape(&c.details.legal_name),
                html::escape(&c.details.cnpj.to_string()),
                html::escape(c.details.email.as_str()),
                c.created_at.format("%d/%m/%Y").to_string(),
                delete_button(&format!("/admin/empresas/{id}/delete")),
            ]
        })
        .collect();

    let mut body = nav();
    body.push_str(&html::table(
        &["Nome Fantasia", "Razão Social", "CNPJ", "E-mail", "Cadastro", ""],
        &rows,
    ));
    html::page("Empresas", &body)
}

pub fn candidates_page(candidates: &[Candidate]) -> Response {
    let rows: Vec<Vec<String>> = candidates
        .iter()
        .map(|c| {
            vec![
                html::escape(&c.details.full_name),
                html::escape(c.details.cpf.as_str()),
                html::escape(c.details.email.as_str()),
                html::escape(&format!("{}/{}", c.details.address.city, c.details.address.state)),
                c.created_at.format("%d/%m/%Y").to_string(),
                delete_button(&format!("/admin/candidatos/{}/delete", c.candidate_id)),
            ]
        })
        .collect();

    let mut body = nav();
    body.push_str(&html::table(
        &["Nome", "CPF", "E-mail", "Cidade", "Cadastro", ""],
        &rows,
    ));
    html::page("Candidatos", &body)
}

pub fn jobs_page(jobs: &[JobListing]) -> Response {
    let rows: Vec<Vec<String>> = jobs
        .iter()
        .map(|listing| {
            let job = &listing.job;
            vec![
                html::escape(&job.details.title),
                html::link(&format!("/empresas/{}", job.company_id), &listing.company_name),
                job.details.contract_type.label().to_string(),
                job.created_at.format("%d/%m/%Y").to_string(),
                delete_button(&format!("/admin/vagas/{}/delete", job.job_id)),
            ]
        })
        .collect();

    let mut body = nav();
    body.push_str(&html::table(
        &["Título", "Empresa", "Contrato", "Publicada em", ""],
        &rows,
    ));
    html::page("Vagas", &body)
}
