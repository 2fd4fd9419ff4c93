//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};
use serde_json::{Map, json};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use zonegate_app::{
    auth::MockAuthService, context::AppContext, database::Db,
    domain::{credentials::MockCredentialsService, tokens::MockTokensService},
    provider::MockDnsProvider,
};
use zonegate_core::{
    actions::Action,
    dns::{Record, RecordId, RecordType, Zone, ZoneId},
    identity::{Identity, ScopedIdentity},
    ids::{PermissionId, TokenId},
    permissions::{Permission, ZoneScope},
};

use crate::{extensions::*, state::State};

/// Stores a fixed identity in the depot, standing in for the auth middleware.
#[derive(Debug, Clone)]
pub(crate) struct InjectIdentity(pub(crate) Identity);

#[salvo::handler]
impl InjectIdentity {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_identity(self.0.clone());
        ctrl.call_next(req, depot, res).await;
    }
}

/// A scoped identity from `(zone, actions, record types)` rows.
pub(crate) fn scoped(rows: &[(ZoneId, &[Action], &[&str])]) -> Identity {
    let token_id = TokenId::new(1);

    let permissions = rows
        .iter()
        .zip(1_i64..)
        .map(|((zone, actions, types), id)| Permission {
            id: PermissionId::new(id),
            token_id,
            zone: ZoneScope::from_raw(*zone),
            allowed_actions: actions.to_vec(),
            record_types: types.iter().map(|name| (*name).to_owned()).collect(),
        })
        .collect();

    Identity::Scoped(ScopedIdentity::new(token_id, "scoped", permissions))
}

pub(crate) fn make_record(id: RecordId, record_type: RecordType, name: &str) -> Record {
    Record {
        id,
        record_type,
        name: name.to_owned(),
        value: "192.0.2.1".to_owned(),
        extra: Map::new(),
    }
}

pub(crate) fn make_zone(id: ZoneId, domain: &str, records: Vec<Record>) -> Zone {
    let mut extra = Map::new();
    extra.insert("DnsSecEnabled".to_owned(), json!(false));

    Zone {
        id,
        domain: domain.to_owned(),
        records,
        extra,
    }
}

fn lazy_db() -> Db {
    Db::new(SqlitePoolOptions::new().connect_lazy_with(SqliteConnectOptions::new()))
}

pub(crate) fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate().never();
    auth.expect_bootstrap_state().never();

    auth
}

pub(crate) fn strict_tokens_mock() -> MockTokensService {
    let mut tokens = MockTokensService::new();

    tokens.expect_create_token().never();
    tokens.expect_validate_token().never();
    tokens.expect_list_tokens().never();
    tokens.expect_get_token().never();
    tokens.expect_delete_token().never();
    tokens.expect_add_permission().never();
    tokens.expect_delete_permission().never();
    tokens.expect_has_admin_token().never();

    tokens
}

pub(crate) fn strict_credentials_mock() -> MockCredentialsService {
    let mut credentials = MockCredentialsService::new();

    credentials.expect_set_master_credential().never();
    credentials.expect_get_master_credential().never();

    credentials
}

pub(crate) fn strict_provider_mock() -> MockDnsProvider {
    let mut provider = MockDnsProvider::new();

    provider.expect_list_zones().never();
    provider.expect_get_zone().never();
    provider.expect_create_zone().never();
    provider.expect_update_zone().never();
    provider.expect_delete_zone().never();
    provider.expect_check_availability().never();
    provider.expect_import_records().never();
    provider.expect_export_records().never();
    provider.expect_set_dnssec().never();
    provider.expect_issue_certificate().never();
    provider.expect_add_record().never();
    provider.expect_update_record().never();
    provider.expect_delete_record().never();

    provider
}

/// Mocks backing an [`AppContext`]; anything a test does not replace must not be called.
#[derive(Debug)]
pub(crate) struct Mocks {
    pub(crate) auth: MockAuthService,
    pub(crate) tokens: MockTokensService,
    pub(crate) credentials: MockCredentialsService,
    pub(crate) provider: MockDnsProvider,
}

impl Default for Mocks {
    fn default() -> Self {
        Self {
            auth: strict_auth_mock(),
            tokens: strict_tokens_mock(),
            credentials: strict_credentials_mock(),
            provider: strict_provider_mock(),
        }
    }
}

impl Mocks {
    pub(crate) fn with_provider(provider: MockDnsProvider) -> Self {
        Self {
            provider,
            ..Self::default()
        }
    }

    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            db: lazy_db(),
            tokens: Arc::new(self.tokens),
            credentials: Arc::new(self.credentials),
            auth: Arc::new(self.auth),
            provider: Arc::new(self.provider),
        })
    }
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    Mocks {
        auth,
        ..Mocks::default()
    }
    .into_state()
}

/// A service running `route` as `identity`, skipping authentication.
pub(crate) fn service_as(identity: Identity, mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(InjectIdentity(identity))
            .push(route),
    )
}
