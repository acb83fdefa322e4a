//! Application configuration loaded from environment variables.

use std::env;

use inkpost_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub graphql: GraphqlConfig,
}

/// GraphQL endpoint settings.
#[derive(Debug, Clone)]
pub struct GraphqlConfig {
    /// Serve the GraphiQL IDE on `GET /graphql`.
    pub graphiql_enabled: bool,
    /// Maximum query depth accepted by the schema.
    pub depth_limit: usize,
}

impl Default for GraphqlConfig {
    fn default() -> Self {
        Self {
            graphiql_enabled: true,
            depth_limit: 10,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parse_var("DB_MAX_CONNECTIONS").unwrap_or(100),
            min_connections: parse_var("DB_MIN_CONNECTIONS").unwrap_or(10),
        });

        let defaults = GraphqlConfig::default();
        let graphql = GraphqlConfig {
            graphiql_enabled: env::var("GRAPHIQL_ENABLED")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(defaults.graphiql_enabled),
            depth_limit: parse_var("GRAPHQL_DEPTH_LIMIT").unwrap_or(defaults.depth_limit),
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT").unwrap_or(8080),
            database,
            graphql,
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}
