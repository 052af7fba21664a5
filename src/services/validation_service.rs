//! Validation service
//!
//! Runs a named request end to end: authorization, rule evaluation and
//! message rendering.

use std::sync::Arc;

use futures::future::join_all;
use indexmap::IndexMap;
use serde::Serialize;

use crate::{
    authorization::require_capability,
    engine::ValidationResult,
    error::{AppError, AppResult, ValidationDetails},
    models::{Principal, Record, ValidationContext},
    requests::FormRequest,
    state::AppState,
};

/// Rendered verdict for one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    pub request: String,
    pub valid: bool,
    pub errors: IndexMap<String, Vec<String>>,
    pub codes: IndexMap<String, Vec<String>>,
}

/// Validation service for request-level workflows
pub struct ValidationService;

impl ValidationService {
    /// Validate and report, treating field failures as a normal outcome.
    ///
    /// Errors are reserved for unknown requests, denied principals and
    /// store outages.
    pub async fn check(
        state: &AppState,
        request_name: &str,
        principal: &Principal,
        record: &Record,
        context: &ValidationContext,
    ) -> AppResult<ValidationOutcome> {
        let (request, result) = Self::run(state, request_name, principal, record, context).await?;
        let details = Self::details(state, &request, &result, context);

        Ok(ValidationOutcome {
            request: request.name.clone(),
            valid: result.is_valid(),
            errors: details.errors,
            codes: details.codes,
        })
    }

    /// Validate a record, returning only its declared fields when it passes
    pub async fn validate_request(
        state: &AppState,
        request_name: &str,
        principal: &Principal,
        record: &Record,
        context: &ValidationContext,
    ) -> AppResult<Record> {
        let (request, result) = Self::run(state, request_name, principal, record, context).await?;

        if result.is_valid() {
            Ok(request.ruleset.extract_validated(record))
        } else {
            Err(AppError::ValidationFailed(Self::details(
                state, &request, &result, context,
            )))
        }
    }

    /// Validate many records concurrently; each gets its own context and verdict
    pub async fn validate_batch(
        state: &AppState,
        request_name: &str,
        principal: &Principal,
        entries: &[(Record, ValidationContext)],
    ) -> Vec<AppResult<Record>> {
        tracing::debug!(request = request_name, count = entries.len(), "Validating batch");

        join_all(entries.iter().map(|(record, context)| {
            Self::validate_request(state, request_name, principal, record, context)
        }))
        .await
    }

    async fn run(
        state: &AppState,
        request_name: &str,
        principal: &Principal,
        record: &Record,
        context: &ValidationContext,
    ) -> AppResult<(Arc<FormRequest>, ValidationResult)> {
        let request = state.catalog().get(request_name)?;

        if let Some(capability) = &request.capability {
            require_capability(state.permissions(), principal, capability).await?;
        }

        let result = state
            .engine()
            .validate(&request.ruleset, record, context)
            .await?;

        tracing::debug!(
            request = %request.name,
            principal = principal.id,
            valid = result.is_valid(),
            "Request validated"
        );

        Ok((request, result))
    }

    fn details(
        state: &AppState,
        request: &FormRequest,
        result: &ValidationResult,
        context: &ValidationContext,
    ) -> ValidationDetails {
        ValidationDetails {
            errors: state.resolver().resolve(
                result,
                &request.messages,
                &request.attributes,
                context.locale.as_deref(),
            ),
            codes: result.codes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        authorization::StaticPermissions,
        db::{InMemoryStore, MockUniquenessStore, UniquenessStore},
        engine::{Engine, EngineOptions},
        messages::MessageResolver,
        requests::RequestCatalog,
        rules::RuleRegistry,
    };
    use serde_json::{Value, json};

    fn state_with(store: Arc<dyn UniquenessStore>) -> AppState {
        AppState::new(
            Engine::new(store, EngineOptions::default()),
            RequestCatalog::builtin(&RuleRegistry::builtin()).unwrap(),
            Arc::new(StaticPermissions::seeded()),
            MessageResolver::default(),
        )
    }

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    fn supervisor() -> Principal {
        Principal::new(1, ["supervisor"])
    }

    fn new_user() -> Record {
        record(json!({
            "nama": "Budi",
            "email": "budi@ncs.com",
            "password": "rahasia123",
            "password_confirmation": "rahasia123",
            "role": "gudang",
            "aktif": true
        }))
    }

    #[tokio::test]
    async fn test_valid_request_returns_declared_fields() {
        let state = state_with(Arc::new(InMemoryStore::new()));
        let validated = ValidationService::validate_request(
            &state,
            "users.store",
            &supervisor(),
            &new_user(),
            &ValidationContext::new(),
        )
        .await
        .unwrap();

        assert_eq!(validated["email"], "budi@ncs.com");
        assert!(!validated.contains_key("password_confirmation"));
    }

    #[tokio::test]
    async fn test_invalid_request_carries_messages_and_codes() {
        let state = state_with(Arc::new(InMemoryStore::new()));
        let err = ValidationService::validate_request(
            &state,
            "users.store",
            &supervisor(),
            &record(json!({"email": "bukan-email", "role": "admin"})),
            &ValidationContext::new(),
        )
        .await
        .unwrap_err();

        let details = err.validation_details().unwrap();
        assert_eq!(details.errors["nama"], vec!["Nama harus diisi"]);
        assert_eq!(details.errors["email"], vec!["Format email tidak valid"]);
        assert_eq!(details.codes["role"], vec!["in"]);
        assert_eq!(details.codes["password"], vec!["required"]);
    }

    #[tokio::test]
    async fn test_unauthorized_principal_never_reaches_store() {
        let mut store = MockUniquenessStore::new();
        store.expect_exists().never();
        let state = state_with(Arc::new(store));

        let err = ValidationService::validate_request(
            &state,
            "users.store",
            &Principal::new(3, ["gudang"]),
            &new_user(),
            &ValidationContext::new(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::AuthorizationDenied(c) if c == "users.create"));
    }

    #[tokio::test]
    async fn test_unknown_request() {
        let state = state_with(Arc::new(InMemoryStore::new()));
        let err = ValidationService::check(
            &state,
            "kategori.store",
            &supervisor(),
            &Record::new(),
            &ValidationContext::new(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::UnknownRequest(_)));
    }

    #[tokio::test]
    async fn test_check_reports_invalid_outcome() {
        let state = state_with(Arc::new(InMemoryStore::new()));
        let outcome = ValidationService::check(
            &state,
            "gudang.store",
            &Principal::new(2, ["leader-paket"]),
            &record(json!({"nama_gudang": "Gudang A", "alamat": "Jl. Merdeka 1", "tinggi": 1000})),
            &ValidationContext::new(),
        )
        .await
        .unwrap();

        assert!(!outcome.valid);
        assert_eq!(outcome.errors["tinggi"], vec!["Tinggi gudang maksimal 999.99."]);
        assert_eq!(outcome.errors["panjang"], vec!["Panjang gudang wajib diisi."]);
    }

    #[tokio::test]
    async fn test_batch_outcomes_are_independent() {
        let store =
            InMemoryStore::new().with_row("users", json!({"id": 5, "email": "budi@ncs.com"}));
        let state = state_with(Arc::new(store));

        let mut fresh = new_user();
        fresh.insert("email".to_string(), json!("sari@ncs.com"));

        let results = ValidationService::validate_batch(
            &state,
            "users.store",
            &supervisor(),
            &[
                (new_user(), ValidationContext::new()),
                (fresh, ValidationContext::new()),
            ],
        )
        .await;

        let details = results[0].as_ref().unwrap_err().validation_details().unwrap();
        assert_eq!(details.errors["email"], vec!["Email sudah digunakan"]);
        assert!(results[1].is_ok());
    }

    #[tokio::test]
    async fn test_batch_updates_exclude_their_own_record() {
        let store = InMemoryStore::new()
            .with_row("users", json!({"id": 5, "email": "budi@ncs.com"}))
            .with_row("users", json!({"id": 6, "email": "sari@ncs.com"}));
        let state = state_with(Arc::new(store));

        let budi = record(json!({"email": "budi@ncs.com"}));
        let sari = record(json!({"email": "sari@ncs.com"}));

        let results = ValidationService::validate_batch(
            &state,
            "users.update",
            &supervisor(),
            &[
                (budi.clone(), ValidationContext::for_update(5)),
                (sari, ValidationContext::for_update(6)),
                (budi, ValidationContext::for_update(6)),
            ],
        )
        .await;

        assert!(results[0].is_ok());
        assert!(results[1].is_ok());
        let details = results[2].as_ref().unwrap_err().validation_details().unwrap();
        assert_eq!(details.codes["email"], vec!["unique"]);
    }
}
