use crate::settings::env::EnvManager;
use connectors::object_store::params::S3ConnParams;

pub const ENV_AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const ENV_AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const ENV_AWS_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";
pub const ENV_AWS_REGION: &str = "AWS_REGION";
pub const ENV_AWS_DEFAULT_REGION: &str = "AWS_DEFAULT_REGION";
pub const ENV_AWS_ENDPOINT_URL_S3: &str = "AWS_ENDPOINT_URL_S3";
pub const ENV_AWS_ENDPOINT_URL: &str = "AWS_ENDPOINT_URL";

/// Object store settings taken from the merged environment, so values that
/// only appear in the env file still reach the S3 client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageSettings {
    params: S3ConnParams,
}

impl StorageSettings {
    pub fn from_env(env: &EnvManager) -> Self {
        let first = |keys: &[&str]| {
            keys.iter()
                .filter_map(|key| env.get(key))
                .find(|value| !value.is_empty())
                .map(str::to_string)
        };

        Self {
            params: S3ConnParams {
                access_key_id: first(&[ENV_AWS_ACCESS_KEY_ID]),
                secret_access_key: first(&[ENV_AWS_SECRET_ACCESS_KEY]),
                session_token: first(&[ENV_AWS_SESSION_TOKEN]),
                region: first(&[ENV_AWS_REGION, ENV_AWS_DEFAULT_REGION]),
                endpoint_url: first(&[ENV_AWS_ENDPOINT_URL_S3, ENV_AWS_ENDPOINT_URL]),
            },
        }
    }

    pub fn s3_params(&self) -> &S3ConnParams {
        &self.params
    }
}
