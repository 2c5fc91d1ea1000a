//! Registration pages

use axum::response::Response;
use platform::html;

use crate::application::{CandidateDetailsInput, CompanyDetailsInput};
use crate::presentation::views::{address_fields, respond};

pub fn company_page(input: &CompanyDetailsInput, errors: &[String]) -> Response {
    let fields = [
        html::text_input("Razão Social", "razaoSocial", &input.legal_name),
        html::text_input("Nome Fantasia", "nomeFantasia", &input.trade_name),
        html::text_input("CNPJ", "cnpj", &input.cnpj),
        html::text_input("Inscrição Estadual", "ie", &input.state_registration),
        address_fields(&input.address),
        html::text_input("Telefone", "telefone", &input.phone),
        html::text_input("WhatsApp", "whatsapp", &input.whatsapp),
        html::text_input("Responsável", "responsavel", &input.contact_person),
        html::text_input("E-mail", "email", &input.email),
        html::password_input("Senha", "senha"),
    ]
    .concat();

    let mut body = html::error_list(errors);
    body.push_str(&html::form("/auth/register_empresa", false, &fields, "Cadastrar"));
    body.push_str(&format!(
        "<p>{}</p>\n",
        html::link("/auth/login_empresa", "Já tenho conta")
    ));
    respond("Cadastro de Empresa", &body, errors)
}

pub fn candidate_page(input: &CandidateDetailsInput, errors: &[String]) -> Response {
    let fields = [
        html::text_input("Nome completo", "nomeCompleto", &input.full_name),
        html::text_input("CPF", "cpf", &input.cpf),
        html::text_input("Telefone", "telefone", &input.phone),
        html::text_input("E-mail", "email", &input.email),
        html::password_input("Senha", "senha"),
        address_fields(&input.address),
        html::file_input("Currículo (PDF ou DOCX, até 2 MB)", "curriculo", ".pdf,.docx"),
    ]
    .concat();

    let mut body = html::error_list(errors);
    body.push_str(&html::form("/auth/register_candidato", true, &fields, "Cadastrar"));
    body.push_str(&format!(
        "<p>{}</p>\n",
        html::link("/auth/login_candidato", "Já tenho conta")
    ));
    respond("Cadastro de Candidato", &body, errors)
}

