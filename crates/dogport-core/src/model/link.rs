// ── Link domain types ──
//
// A link federates two dog deployments over a message broker connection.

use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: EntityId,
    pub name: String,
    pub address_handling: String,
    pub connection: Connection,
    pub connection_type: String,
    pub direction: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub api_port: i64,
    pub host: String,
    pub password: String,
    pub port: i64,
    pub ssl_options: SslOptions,
    pub user: String,
    pub virtual_host: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SslOptions {
    pub cacertfile: String,
    pub certfile: String,
    pub fail_if_no_peer_cert: bool,
    pub keyfile: String,
    pub server_name_indication: String,
    pub verify: String,
}
