use crate::settings::{env::EnvManager, error::SettingsError};
use connectors::sql::mysql::params::MySqlConnParams;
use std::fmt;

pub const ENV_DB_HOST: &str = "DB_HOST";
pub const ENV_DB_USER: &str = "DB_USER";
pub const ENV_DB_PASSWORD: &str = "DB_PASSWORD";
pub const ENV_DB_NAME: &str = "DB_NAME";
pub const ENV_DB_PORT: &str = "DB_PORT";

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_USER: &str = "root";
const DEFAULT_PASSWORD: &str = "";
const DEFAULT_DATABASE: &str = "auth";
const DEFAULT_PORT: &str = "3306";

/// Database connection parameters resolved from the environment.
///
/// Values are not validated beyond the port: an empty host or a wrong
/// password surfaces as a connection failure.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub port: u16,
}

impl ConnectionSettings {
    pub fn from_env(env: &EnvManager) -> Result<Self, SettingsError> {
        let port = env.get_or(ENV_DB_PORT, DEFAULT_PORT);
        let port = port
            .trim()
            .parse::<u16>()
            .map_err(|source| SettingsError::InvalidPort {
                value: port.clone(),
                source,
            })?;

        Ok(Self {
            host: env.get_or(ENV_DB_HOST, DEFAULT_HOST),
            user: env.get_or(ENV_DB_USER, DEFAULT_USER),
            password: env.get_or(ENV_DB_PASSWORD, DEFAULT_PASSWORD),
            database: env.get_or(ENV_DB_NAME, DEFAULT_DATABASE),
            port,
        })
    }

    pub fn mysql_params(&self) -> MySqlConnParams {
        MySqlConnParams {
            host: self.host.clone(),
            port: self.port,
            user: self.user.clone(),
            password: self.password.clone(),
            database: self.database.clone(),
        }
    }
}

impl fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"****")
            .field("database", &self.database)
            .field("port", &self.port)
            .finish()
    }
}
