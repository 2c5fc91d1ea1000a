//! Flow tests for the auth crate

#[cfg(test)]
mod support {
    use std::sync::Arc;

    use crate::application::config::AuthConfig;
    use crate::application::sign_up::{SignUpInput, SignUpUseCase};
    use crate::application::verify_email::VerifyEmailUseCase;
    use crate::domain::entity::account::Account;
    use crate::domain::value_object::role::Role;
    use crate::infra::memory::MemoryAccountRepository;

    pub const PASSWORD: &str = "segredo123";

    pub fn setup() -> (Arc<MemoryAccountRepository>, Arc<AuthConfig>) {
        (
            Arc::new(MemoryAccountRepository::default()),
            Arc::new(AuthConfig::development()),
        )
    }

    pub async fn sign_up(
        repo: &Arc<MemoryAccountRepository>,
        config: &Arc<AuthConfig>,
        role: Role,
        email: &str,
    ) -> Account {
        SignUpUseCase::new(repo.clone(), config.clone())
            .execute(SignUpInput {
                role,
                email: email.to_string(),
                password: PASSWORD.to_string(),
            })
            .await
            .unwrap()
    }

    pub async fn sign_up_verified(
        repo: &Arc<MemoryAccountRepository>,
        config: &Arc<AuthConfig>,
        role: Role,
        email: &str,
    ) -> Account {
        let account = sign_up(repo, config, role, email).await;
        let token = account.verification_token.clone().unwrap();
        VerifyEmailUseCase::new(repo.clone(), config.clone())
            .execute(&token)
            .await
            .unwrap();
        account
    }
}

#[cfg(test)]
mod sign_up_tests {
    use super::support::*;
    use crate::application::sign_up::{SignUpInput, SignUpUseCase};
    use crate::domain::value_object::role::Role;
    use crate::error::AuthError;

    #[tokio::test]
    async fn test_duplicate_email_same_role_is_rejected() {
        let (repo, config) = setup();
        sign_up(&repo, &config, Role::Company, "rh@acme.com.br").await;

        let err = SignUpUseCase::new(repo.clone(), config.clone())
            .execute(SignUpInput {
                role: Role::Company,
                email: "RH@Acme.com.br".to_string(),
                password: PASSWORD.to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::EmailTaken));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_same_email_other_role_is_allowed() {
        let (repo, config) = setup();
        sign_up(&repo, &config, Role::Company, "ana@example.com").await;
        sign_up(&repo, &config, Role::Candidate, "ana@example.com").await;
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn test_all_field_errors_reported_together() {
        let (repo, config) = setup();
        let err = SignUpUseCase::new(repo.clone(), config)
            .execute(SignUpInput {
                role: Role::Candidate,
                email: "sem-arroba".to_string(),
                password: "123".to_string(),
            })
            .await
            .unwrap_err();

        let errors = err.form_errors().unwrap();
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(&"A senha deve ter pelo menos 6 caracteres.".to_string()));
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn test_new_account_is_pending_with_token() {
        let (repo, config) = setup();
        let account = sign_up(&repo, &config, Role::Candidate, "joao@example.com").await;
        assert!(!account.email_verified);
        assert!(account.verification_token.is_some());
        assert_ne!(account.password.as_phc(), PASSWORD);
    }

    #[tokio::test]
    async fn test_ensure_admin_is_idempotent() {
        let (repo, config) = setup();
        let use_case = SignUpUseCase::new(repo.clone(), config);

        assert!(use_case.ensure_admin("admin@vagas.com", PASSWORD).await.unwrap());
        assert!(!use_case.ensure_admin("admin@vagas.com", PASSWORD).await.unwrap());
        assert_eq!(repo.len(), 1);
    }
}

#[cfg(test)]
mod sign_in_tests {
    use super::support::*;
    use crate::application::sign_in::{SignInInput, SignInUseCase};
    use crate::application::sign_up::SignUpUseCase;
    use crate::application::token::{self, TokenPurpose};
    use crate::domain::value_object::role::Role;
    use crate::error::AuthError;

    fn input(role: Role, email: &str, password: &str) -> SignInInput {
        SignInInput {
            role,
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_verified_login_issues_role_claim() {
        let (repo, config) = setup();
        let account = sign_up_verified(&repo, &config, Role::Company, "rh@acme.com.br").await;

        let output = SignInUseCase::new(repo.clone(), config.clone())
            .execute(input(Role::Company, "rh@acme.com.br", PASSWORD))
            .await
            .unwrap();

        let claims = token::decode(&config, &output.session_token, TokenPurpose::Session).unwrap();
        assert_eq!(claims.account_id(), account.account_id);
        assert_eq!(claims.role, Role::Company);
    }

    #[tokio::test]
    async fn test_unknown_email_and_wrong_password_look_alike() {
        let (repo, config) = setup();
        sign_up_verified(&repo, &config, Role::Candidate, "joao@example.com").await;
        let use_case = SignInUseCase::new(repo.clone(), config);

        let unknown = use_case
            .execute(input(Role::Candidate, "ninguem@example.com", PASSWORD))
            .await
            .unwrap_err();
        let wrong = use_case
            .execute(input(Role::Candidate, "joao@example.com", "errada123"))
            .await
            .unwrap_err();

        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert!(matches!(wrong, AuthError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn test_login_is_scoped_to_role() {
        let (repo, config) = setup();
        sign_up_verified(&repo, &config, Role::Candidate, "joao@example.com").await;

        let err = SignInUseCase::new(repo.clone(), config)
            .execute(input(Role::Company, "joao@example.com", PASSWORD))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_unverified_login_is_refused() {
        let (repo, config) = setup();
        sign_up(&repo, &config, Role::Candidate, "pendente@example.com").await;

        let err = SignInUseCase::new(repo.clone(), config)
            .execute(input(Role::Candidate, "pendente@example.com", PASSWORD))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_admin_can_log_in() {
        let (repo, config) = setup();
        SignUpUseCase::new(repo.clone(), config.clone())
            .ensure_admin("admin@vagas.com", PASSWORD)
            .await
            .unwrap();

        assert!(
            SignInUseCase::new(repo.clone(), config)
                .execute(input(Role::Admin, "admin@vagas.com", PASSWORD))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_blank_fields_are_validation_errors() {
        let (repo, config) = setup();
        let err = SignInUseCase::new(repo.clone(), config)
            .execute(input(Role::Company, "", ""))
            .await
            .unwrap_err();

        let errors = err.form_errors().unwrap();
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(&"A senha é obrigatória.".to_string()));
    }
}

#[cfg(test)]
mod verify_email_tests {
    use chrono::{Duration, Utc};

    use super::support::*;
    use crate::application::token::{self, TokenPurpose};
    use crate::application::verify_email::{VerifyEmailUseCase, VerifyOutcome};
    use crate::domain::repository::AccountRepository;
    use crate::domain::value_object::role::Role;
    use crate::error::AuthError;

    #[tokio::test]
    async fn test_link_verifies_once() {
        let (repo, config) = setup();
        let account = sign_up(&repo, &config, Role::Candidate, "joao@example.com").await;
        let token = account.verification_token.clone().unwrap();
        let use_case = VerifyEmailUseCase::new(repo.clone(), config);

        assert_eq!(use_case.execute(&token).await.unwrap(), VerifyOutcome::Verified);
        assert_eq!(
            use_case.execute(&token).await.unwrap(),
            VerifyOutcome::AlreadyVerified
        );

        let stored = repo.find_account_by_id(&account.account_id).await.unwrap().unwrap();
        assert!(stored.email_verified);
        assert!(stored.verification_token.is_none());
    }

    #[tokio::test]
    async fn test_tampered_link_is_invalid() {
        let (repo, config) = setup();
        let account = sign_up(&repo, &config, Role::Candidate, "joao@example.com").await;
        let mut token = account.verification_token.clone().unwrap();
        token.push('x');

        let err = VerifyEmailUseCase::new(repo.clone(), config)
            .execute(&token)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidVerificationLink));
    }

    #[tokio::test]
    async fn test_expired_link_is_refused() {
        let (repo, config) = setup();
        let mut account = sign_up(&repo, &config, Role::Company, "rh@acme.com.br").await;

        let stale = token::issue(
            &config,
            &account.account_id,
            Role::Company,
            TokenPurpose::VerifyEmail,
            Utc::now() - Duration::hours(25),
        )
        .unwrap();
        account.set_verification_token(stale.clone());
        repo.update_account(&account).await.unwrap();

        let err = VerifyEmailUseCase::new(repo.clone(), config)
            .execute(&stale)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::VerificationLinkExpired));
    }

    #[tokio::test]
    async fn test_reissue_supersedes_old_link() {
        let (repo, config) = setup();
        let account = sign_up(&repo, &config, Role::Candidate, "joao@example.com").await;
        let old = account.verification_token.clone().unwrap();
        let use_case = VerifyEmailUseCase::new(repo.clone(), config);

        // Tokens minted in the same second are identical; move the clock on
        tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
        let renewed = use_case
            .reissue(Role::Candidate, "joao@example.com")
            .await
            .unwrap()
            .unwrap();
        let new = renewed.verification_token.unwrap();
        assert_ne!(old, new);

        assert!(matches!(
            use_case.execute(&old).await.unwrap_err(),
            AuthError::InvalidVerificationLink
        ));
        assert_eq!(use_case.execute(&new).await.unwrap(), VerifyOutcome::Verified);
    }

    #[tokio::test]
    async fn test_reissue_ignores_unknown_and_verified() {
        let (repo, config) = setup();
        sign_up_verified(&repo, &config, Role::Candidate, "joao@example.com").await;
        let use_case = VerifyEmailUseCase::new(repo.clone(), config);

        assert!(use_case.reissue(Role::Candidate, "joao@example.com").await.unwrap().is_none());
        assert!(use_case.reissue(Role::Candidate, "x@example.com").await.unwrap().is_none());
        assert!(use_case.reissue(Role::Candidate, "invalido").await.unwrap().is_none());
    }
}

#[cfg(test)]
mod http_tests {
    use std::sync::Arc;

    use axum::Extension;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::routing::get;
    use chrono::Utc;
    use http_body_util::BodyExt;
    use kernel::id::AccountId;
    use platform::mail::Mailer;
    use tower::ServiceExt;

    use super::support::*;
    use crate::application::check_session::Identity;
    use crate::application::config::AuthConfig;
    use crate::application::token::{self, TokenPurpose};
    use crate::domain::value_object::role::Role;
    use crate::infra::memory::MemoryAccountRepository;
    use crate::presentation::middleware::{guarded, require_role};
    use crate::presentation::router::auth_router;

    fn app(repo: &Arc<MemoryAccountRepository>, config: &Arc<AuthConfig>) -> Router {
        let (mailer, _) = Mailer::memory();
        Router::new().nest("/auth", auth_router(repo.clone(), config.clone(), mailer))
    }

    fn form_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn location(response: &axum::response::Response) -> &str {
        response.headers()[header::LOCATION].to_str().unwrap()
    }

    #[tokio::test]
    async fn test_login_sets_cookie_and_redirects_home() {
        let (repo, config) = setup();
        sign_up_verified(&repo, &config, Role::Company, "rh@acme.com.br").await;

        let response = app(&repo, &config)
            .oneshot(form_post(
                "/auth/login_empresa",
                "email=rh%40acme.com.br&senha=segredo123",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/empresa/dashboard");
        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("token="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Max-Age=3600"));
    }

    #[tokio::test]
    async fn test_failed_login_rerenders_form() {
        let (repo, config) = setup();
        let response = app(&repo, &config)
            .oneshot(form_post(
                "/auth/login_candidato",
                "email=joao%40example.com&senha=errada123",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        let html = body_text(response).await;
        assert!(html.contains("E-mail ou senha incorretos."));
        assert!(html.contains("value=\"joao@example.com\""));
    }

    #[tokio::test]
    async fn test_logout_clears_cookie() {
        let (repo, config) = setup();
        let response = app(&repo, &config)
            .oneshot(Request::get("/auth/logout").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");
        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_verify_route_reports_outcome() {
        let (repo, config) = setup();
        let account = sign_up(&repo, &config, Role::Candidate, "joao@example.com").await;
        let token = account.verification_token.unwrap();
        let uri = format!("/auth/verificar?token={token}");

        let first = app(&repo, &config)
            .oneshot(Request::get(&uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        assert!(body_text(first).await.contains("E-mail verificado com sucesso."));

        let bogus = app(&repo, &config)
            .oneshot(Request::get("/auth/verificar?token=nada").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(bogus.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_resend_answer_is_neutral() {
        let (repo, config) = setup();
        sign_up(&repo, &config, Role::Candidate, "joao@example.com").await;

        let known = app(&repo, &config)
            .oneshot(form_post(
                "/auth/reenviar_verificacao",
                "tipo=candidato&email=joao%40example.com",
            ))
            .await
            .unwrap();
        let unknown = app(&repo, &config)
            .oneshot(form_post(
                "/auth/reenviar_verificacao",
                "tipo=candidato&email=outro%40example.com",
            ))
            .await
            .unwrap();

        assert_eq!(known.status(), StatusCode::OK);
        assert_eq!(unknown.status(), StatusCode::OK);
        assert_eq!(body_text(known).await, body_text(unknown).await);
    }

    // ── Role guard ──────────────────────────────────────────────────────────

    fn protected(config: &Arc<AuthConfig>, role: Role) -> Router {
        guarded(
            Router::new().route(
                "/area",
                get(|Extension(identity): Extension<Identity>| async move {
                    identity.account_id.to_string()
                }),
            ),
            require_role(config.clone(), role),
        )
    }

    fn with_cookie(token: &str) -> Request<Body> {
        Request::get("/area")
            .header(header::COOKIE, format!("token={token}"))
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_guard_redirects_without_session() {
        let (_, config) = setup();
        let response = protected(&config, Role::Company)
            .oneshot(Request::get("/area").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/auth/login_empresa");
    }

    #[tokio::test]
    async fn test_guard_redirects_wrong_role() {
        let (_, config) = setup();
        let id = AccountId::new();
        let token = token::issue(&config, &id, Role::Candidate, TokenPurpose::Session, Utc::now())
            .unwrap();

        let response = protected(&config, Role::Admin)
            .oneshot(with_cookie(&token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/auth/login_admin");
    }

    #[tokio::test]
    async fn test_guard_passes_identity() {
        let (_, config) = setup();
        let id = AccountId::new();
        let token =
            token::issue(&config, &id, Role::Company, TokenPurpose::Session, Utc::now()).unwrap();

        let response = protected(&config, Role::Company)
            .oneshot(with_cookie(&token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, id.to_string());
    }

    #[tokio::test]
    async fn test_guard_refuses_verification_token() {
        let (_, config) = setup();
        let token = token::issue(
            &config,
            &AccountId::new(),
            Role::Company,
            TokenPurpose::VerifyEmail,
            Utc::now(),
        )
        .unwrap();

        let response = protected(&config, Role::Company)
            .oneshot(with_cookie(&token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }
}
