//! Company area pages

use axum::response::Response;
use platform::html;

use crate::application::{CompanyEditInput, JobInput};
use crate::domain::entity::{
    application::{Applicant, SelectionStatus},
    company::Company,
    job::{Job, JobListing},
};
use crate::domain::search::Page;
use crate::domain::value_object::{
    catalog::{Availability, ContractType, SalaryBand, WorkMode},
    rating::RatingSummary,
};
use crate::presentation::views::{
    JOB_HEADERS, address_fields, job_rows, optional, pager, respond,
};

fn nav() -> String {
    format!(
        "<nav>{} | {} | {} | {}</nav>\n",
        html::link("/empresa/dashboard", "Painel"),
        html::link("/empresa/perfil", "Perfil"),
        html::link("/empresa/vagas", "Vagas"),
        html::link("/empresa/vagas/criar", "Nova vaga"),
    )
}

fn job_actions(listing: &JobListing) -> String {
    let id = listing.job.job_id;
    [
        html::link(&format!("/empresa/vagas/{id}/candidatos"), "Candidatos"),
        html::link(&format!("/empresa/vagas/{id}/editar"), "Editar"),
        html::post_button(&format!("/empresa/vagas/{id}/excluir"), &[], "Excluir"),
    ]
    .join(" ")
}

pub fn dashboard(company: &Company, jobs: &Page<JobListing>, summary: &RatingSummary) -> Response {
    let mut body = nav();
    body.push_str(&format!(
        "<h2>{}</h2>\n<p>Avaliação média: {} ({} avaliações) | {}</p>\n",
        html::escape(company.display_name()),
        summary.display(),
        summary.count,
        html::link(&format!("/empresas/{}", company.company_id), "Página pública"),
    ));
    body.push_str("<h2>Vagas recentes</h2>\n");
    body.push_str(&html::table(&JOB_HEADERS, &job_rows(&jobs.items, job_actions)));
    body.push_str(&pager(jobs, "/empresa/vagas", ""));
    html::page("Painel da Empresa", &body)
}

pub fn profile_page(company: &Company, input: &CompanyEditInput, errors: &[String]) -> Response {
    let d = &input.details;
    let fields = [
        html::text_input("Razão Social", "razaoSocial", &d.legal_name),
        html::text_input("Nome Fantasia", "nomeFantasia", &d.trade_name),
        html::text_input("CNPJ", "cnpj", &d.cnpj),
        html::text_input("Inscrição Estadual", "ie", &d.state_registration),
        address_fields(&d.address),
        html::text_input("Telefone", "telefone", &d.phone),
        html::text_input("WhatsApp", "whatsapp", &d.whatsapp),
        html::text_input("Responsável", "responsavel", &d.contact_person),
        html::text_input("E-mail", "email", &d.email),
        html::textarea("Sobre a empresa", "bio", &input.bio),
        html::text_input("Site", "site", &input.website),
        html::text_input("LinkedIn", "linkedin", &input.linkedin),
        html::text_input("Instagram", "instagram", &input.instagram),
    ]
    .concat();

    let mut body = nav();
    body.push_str(&html::error_list(errors));
    if let Some(logo) = &company.logo_path {
        body.push_str(&format!(
            "<p><img src=\"{}\" alt=\"Logo\" width=\"160\"></p>\n",
            html::escape(logo)
        ));
    }
    body.push_str(&html::form(
        "/empresa/logo",
        true,
        &html::file_input("Logo (JPEG ou PNG, até 2 MB)", "logo", ".jpg,.jpeg,.png"),
        "Enviar logo",
    ));
    body.push_str(&html::form("/empresa/editar", false, &fields, "Salvar"));
    respond("Perfil da Empresa", &body, errors)
}

pub fn jobs_page(jobs: &Page<JobListing>) -> Response {
    let mut body = nav();
    if jobs.items.is_empty() {
        body.push_str(&html::paragraph("Nenhuma vaga publicada."));
    } else {
        body.push_str(&html::table(&JOB_HEADERS, &job_rows(&jobs.items, job_actions)));
    }
    body.push_str(&pager(jobs, "/empresa/vagas", ""));
    html::page("Minhas Vagas", &body)
}

/// Create and edit share one form; `action` is where it posts
pub fn job_form_page(title: &str, action: &str, input: &JobInput, errors: &[String]) -> Response {
    let fields = [
        html::text_input("Título", "titulo", &input.title),
        html::text_input("Cargo", "cargo", &input.role),
        html::textarea("Descrição", "descricao", &input.description),
        html::text_input("Tags (separadas por vírgula)", "tags", &input.tags),
        html::select("Faixa salarial", "salario", &SalaryBand::options(), &input.salary_band),
        html::select("Contrato", "contrato", &ContractType::options(), &input.contract_type),
        html::select("Modalidade", "modalidade", &WorkMode::options(), &input.work_mode),
        html::text_input("Horário", "horario", &input.schedule),
        html::select(
            "Disponibilidade",
            "disponibilidade",
            &Availability::options(),
            &input.availability,
        ),
    ]
    .concat();

    let mut body = nav();
    body.push_str(&html::error_list(errors));
    body.push_str(&html::form(action, false, &fields, "Salvar"));
    respond(title, &body, errors)
}

pub fn applicants_page(job: &Job, applicants: &[Applicant], status: SelectionStatus) -> Response {
    let job_id = job.job_id;
    let filters: Vec<String> = SelectionStatus::ALL
        .iter()
        .map(|s| {
            let label = if *s == status {
                format!("<strong>{}</strong>", s.label())
            } else {
                s.label().to_string()
            };
            format!(
                "<a href=\"/empresa/vagas/{job_id}/candidatos?status={}\">{label}</a>",
                s.code()
            )
        })
        .collect();

    let mut body = nav();
    body.push_str(&format!("<h2>{}</h2>\n", html::escape(&job.details.title)));
    body.push_str(&format!("<p>{}</p>\n", filters.join(" | ")));

    if applicants.is_empty() {
        body.push_str(&html::paragraph("Nenhum candidato nesta lista."));
        return html::page("Candidatos", &body);
    }

    let rows: Vec<Vec<String>> = applicants
        .iter()
        .map(|a| {
            let c = &a.candidate;
            let pick = if a.application.selected {
                String::new()
            } else {
                format!(
                    "<input type=\"checkbox\" name=\"candidatura\" value=\"{}\">",
                    a.application.application_id
                )
            };
            let resume = c
                .resume_path
                .as_deref()
                .map(|path| html::link(path, "Currículo"))
                .unwrap_or_else(|| "-".to_string());
            vec![
                pick,
                html::escape(&c.details.full_name),
                html::escape(c.details.email.as_str()),
                html::escape(&c.details.phone),
                html::escape(&format!("{}/{}", c.details.address.city, c.details.address.state)),
                html::escape(optional(&c.goals.occupation)),
                resume,
                a.application.status_label().to_string(),
            ]
        })
        .collect();

    let table = html::table(
        &["", "Nome", "E-mail", "Telefone", "Cidade", "Ocupação", "Currículo", "Situação"],
        &rows,
    );
    body.push_str(&html::form(
        &format!("/empresa/vagas/{job_id}/selecionar"),
        false,
        &table,
        "Selecionar marcados",
    ));
    html::page("Candidatos", &body)
}
