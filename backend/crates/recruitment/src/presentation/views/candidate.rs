//! Candidate area pages

use axum::response::Response;
use platform::html;

use crate::application::{
    CandidateDetailsInput, CourseInput, ExperienceInput, GoalsInput, JobSearchInput,
};
use crate::domain::entity::{
    application::CandidateApplication,
    candidate::Candidate,
    history::{Course, Experience},
    job::JobListing,
};
use crate::domain::search::Page;
use crate::domain::value_object::catalog::{Availability, ContractType, SalaryBand};
use crate::domain::value_object::rating::{MAX_RATING, MIN_RATING};
use crate::presentation::views::{JOB_HEADERS, address_fields, job_rows, optional, pager, respond};

fn nav() -> String {
    format!(
        "<nav>{} | {} | {} | {} | {} | {}</nav>\n",
        html::link("/candidato/dashboard", "Painel"),
        html::link("/candidato/perfil", "Perfil"),
        html::link("/candidato/vagas", "Buscar vagas"),
        html::link("/candidato/candidaturas", "Candidaturas"),
        html::link("/candidato/cursos", "Cursos"),
        html::link("/candidato/experiencias", "Experiências"),
    )
}

fn apply_button(listing: &JobListing) -> String {
    html::post_button(
        "/candidato/candidatar",
        &[("vagaId", &listing.job.job_id.to_string())],
        "Candidatar-se",
    )
}

fn applications_table(applications: &[CandidateApplication]) -> String {
    if applications.is_empty() {
        return html::paragraph("Você ainda não se candidatou a nenhuma vaga.");
    }

    let rows: Vec<Vec<String>> = applications
        .iter()
        .map(|a| {
            let company_id = a.listing.job.company_id;
            let evaluate = if a.application.selected {
                evaluation_form(&company_id.to_string())
            } else {
                String::new()
            };
            vec![
                html::escape(&a.listing.job.details.title),
                html::link(&format!("/empresas/{company_id}"), &a.listing.company_name),
                a.application.created_at.format("%d/%m/%Y").to_string(),
                a.application.status_label().to_string(),
                evaluate,
            ]
        })
        .collect();
    html::table(&["Vaga", "Empresa", "Data", "Situação", "Avaliar empresa"], &rows)
}

fn evaluation_form(company_id: &str) -> String {
    let options: Vec<(String, String)> = (MIN_RATING..=MAX_RATING)
        .map(|n| (n.to_string(), n.to_string()))
        .collect();
    let options: Vec<(&str, &str)> = options
        .iter()
        .map(|(v, l)| (v.as_str(), l.as_str()))
        .collect();
    let fields = [
        html::hidden_input("empresaId", company_id),
        html::select("Nota", "nota", &options, ""),
        html::textarea("Comentário", "comentario", ""),
    ]
    .concat();
    html::form("/candidato/avaliar", false, &fields, "Avaliar")
}

pub fn dashboard(
    candidate: &Candidate,
    applications: &[CandidateApplication],
    jobs: &Page<JobListing>,
) -> Response {
    let mut body = nav();
    body.push_str(&format!(
        "<h2>Olá, {}</h2>\n",
        html::escape(&candidate.details.full_name)
    ));
    body.push_str("<h2>Minhas candidaturas</h2>\n");
    body.push_str(&applications_table(applications));
    body.push_str("<h2>Vagas disponíveis</h2>\n");
    body.push_str(&html::table(&JOB_HEADERS, &job_rows(&jobs.items, apply_button)));
    body.push_str(&pager(jobs, "/candidato/vagas", ""));
    html::page("Painel do Candidato", &body)
}

pub fn profile_page(
    candidate: &Candidate,
    details: &CandidateDetailsInput,
    goals: &GoalsInput,
    errors: &[String],
) -> Response {
    let personal = [
        html::text_input("Nome completo", "nomeCompleto", &details.full_name),
        html::text_input("CPF", "cpf", &details.cpf),
        html::text_input("Telefone", "telefone", &details.phone),
        html::text_input("E-mail", "email", &details.email),
        address_fields(&details.address),
    ]
    .concat();
    let goal_fields = [
        html::select(
            "Contrato desejado",
            "contratoDesejado",
            &ContractType::options(),
            &goals.desired_contract,
        ),
        html::text_input("Ocupação", "ocupacao", &goals.occupation),
        html::select(
            "Faixa salarial",
            "faixaSalarial",
            &SalaryBand::options(),
            &goals.salary_band,
        ),
        html::select(
            "Disponibilidade",
            "disponibilidade",
            &Availability::options(),
            &goals.availability,
        ),
        html::text_input("Idiomas (separados por vírgula)", "idiomas", &goals.languages),
        html::text_input("Formação (separada por vírgula)", "formacao", &goals.education),
    ]
    .concat();

    let resume = candidate
        .resume_path
        .as_deref()
        .map(|path| html::link(path, "Currículo atual"))
        .unwrap_or_else(|| "Nenhum currículo enviado.".to_string());

    let mut body = nav();
    body.push_str(&html::error_list(errors));
    body.push_str("<h2>Dados pessoais</h2>\n");
    body.push_str(&html::form("/candidato/editar", false, &personal, "Salvar"));
    body.push_str("<h2>Objetivos</h2>\n");
    body.push_str(&html::form("/candidato/metas", false, &goal_fields, "Salvar objetivos"));
    body.push_str(&format!("<h2>Currículo</h2>\n<p>{resume}</p>\n"));
    body.push_str(&html::form(
        "/candidato/curriculo",
        true,
        &html::file_input("Currículo (PDF ou DOCX, até 2 MB)", "curriculo", ".pdf,.docx"),
        "Enviar currículo",
    ));
    respond("Perfil do Candidato", &body, errors)
}

pub fn search_page(input: &JobSearchInput, jobs: Option<&Page<JobListing>>, errors: &[String]) -> Response {
    let fields = [
        html::text_input("Buscar", "q", &input.text),
        html::select("Faixa salarial", "salario", &SalaryBand::options(), &input.salary_band),
        html::select("Contrato", "contrato", &ContractType::options(), &input.contract_type),
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
    body.push_str(&format!(
        "<form method=\"get\" action=\"/candidato/vagas\">{fields}<button type=\"submit\">Buscar</button></form>\n"
    ));

    if let Some(jobs) = jobs {
        if jobs.items.is_empty() {
            body.push_str(&html::paragraph("Nenhuma vaga encontrada."));
        } else {
            body.push_str(&html::table(&JOB_HEADERS, &job_rows(&jobs.items, apply_button)));
        }
        let query = search_query(input);
        body.push_str(&pager(jobs, "/candidato/vagas", &query));
    }
    respond("Buscar Vagas", &body, errors)
}

/// Current filters as a raw query string for the pager links; `html::link`
/// escapes it when rendering
fn search_query(input: &JobSearchInput) -> String {
    [
        ("q", &input.text),
        ("salario", &input.salary_band),
        ("contrato", &input.contract_type),
        ("disponibilidade", &input.availability),
    ]
    .iter()
    .filter(|(_, value)| !value.trim().is_empty())
    .map(|(name, value)| format!("{name}={}", urlencoding::encode(value)))
    .collect::<Vec<_>>()
    .join("&")
}

pub fn applications_page(applications: &[CandidateApplication]) -> Response {
    let mut body = nav();
    body.push_str(&applications_table(applications));
    html::page("Minhas Candidaturas", &body)
}

pub fn courses_page(courses: &[Course], input: &CourseInput, errors: &[String]) -> Response {
    let mut body = nav();
    body.push_str(&html::error_list(errors));

    for course in courses {
        let id = course.course_id;
        let d = &course.details;
        let edit = course_fields(&CourseInput {
            name: d.name.clone(),
            institution: d.institution.clone(),
            started_on: d.period.started_on.to_string(),
            finished_on: d.period.finished_on.map(|f| f.to_string()).unwrap_or_default(),
        });
        body.push_str(&format!(
            "<h3>{} - {} ({})</h3>\n",
            html::escape(&d.name),
            html::escape(&d.institution),
            d.period.label()
        ));
        body.push_str(&html::form(&format!("/candidato/cursos/{id}/editar"), false, &edit, "Salvar"));
        body.push_str(&html::post_button(&format!("/candidato/cursos/{id}/excluir"), &[], "Excluir"));
    }

    body.push_str("<h2>Novo curso</h2>\n");
    body.push_str(&html::form("/candidato/cursos", false, &course_fields(input), "Adicionar"));
    respond("Cursos", &body, errors)
}

fn course_fields(input: &CourseInput) -> String {
    [
        html::text_input("Curso", "nome", &input.name),
        html::text_input("Instituição", "instituicao", &input.institution),
        html::input("date", "Início", "inicio", &input.started_on),
        html::input("date", "Término", "termino", &input.finished_on),
    ]
    .concat()
}

pub fn experiences_page(
    experiences: &[Experience],
    input: &ExperienceInput,
    errors: &[String],
) -> Response {
    let mut body = nav();
    body.push_str(&html::error_list(errors));

    for experience in experiences {
        let id = experience.experience_id;
        let d = &experience.details;
        let edit = experience_fields(&ExperienceInput {
            company_name: d.company_name.clone(),
            position: d.position.clone(),
            description: d.description.clone().unwrap_or_default(),
            started_on: d.period.started_on.to_string(),
            finished_on: d.period.finished_on.map(|f| f.to_string()).unwrap_or_default(),
        });
        body.push_str(&format!(
            "<h3>{} - {} ({})</h3>\n<p>{}</p>\n",
            html::escape(&d.position),
            html::escape(&d.company_name),
            d.period.label(),
            html::escape(optional(&d.description)),
        ));
        body.push_str(&html::form(
            &format!("/candidato/experiencias/{id}/editar"),
            false,
            &edit,
            "Salvar",
        ));
        body.push_str(&html::post_button(
            &format!("/candidato/experiencias/{id}/excluir"),
            &[],
            "Excluir",
        ));
    }

    body.push_str("<h2>Nova experiência</h2>\n");
    body.push_str(&html::form(
        "/candidato/experiencias",
        false,
        &experience_fields(input),
        "Adicionar",
    ));
    respond("Experiências", &body, errors)
}

fn experience_fields(input: &ExperienceInput) -> String {
    [
        html::text_input("Empresa", "empresa", &input.company_name),
        html::text_input("Cargo", "cargo", &input.position),
        html::textarea("Descrição", "descricao", &input.description),
        html::input("date", "Início", "inicio", &input.started_on),
        html::input("date", "Término", "termino", &input.finished_on),
    ]
    .concat()
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::search::Pagination;
    use crate::presentation::dto::JobSearchQuery;

    /// Decode the `href` of the "Próxima" link the way a browser does
    fn next_page_query(html: &str) -> JobSearchQuery {
        let anchor = html.rfind("\">Próxima</a>").unwrap();
        let start = html[..anchor].rfind("href=\"").unwrap() + "href=\"".len();
        let href = html[start..anchor].replace("&amp;", "&");
        let (_, query) = href.split_once('?').unwrap();
        serde_urlencoded::from_str(query).unwrap()
    }

    #[test]
    fn test_pager_keeps_every_filter() {
        let input = JobSearchInput {
            text: "dev rust".into(),
            contract_type: "pj".into(),
            availability: "imediata".into(),
            ..Default::default()
        };
        let page: Page<JobListing> = Page::new(Vec::new(), 25, Pagination::new(Some(1)));

        let rendered = pager(&page, "/candidato/vagas", &search_query(&input));
        assert!(!rendered.contains("&amp;amp;"));

        let next = next_page_query(&rendered);
        assert_eq!(next.q, "dev rust");
        assert_eq!(next.contract_type, "pj");
        assert_eq!(next.availability, "imediata");
        assert_eq!(next.salary_band, "");
        assert_eq!(next.page, Some(2));
    }

    #[test]
    fn test_search_query_encodes_reserved_characters() {
        let input = JobSearchInput {
            text: "c&a=ç".into(),
            ..Default::default()
        };
        assert_eq!(search_query(&input), "q=c%26a%3D%C3%A7");
    }
}
