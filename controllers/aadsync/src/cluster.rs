//! Kubernetes client construction.
//!
//! In-cluster service account credentials are used by default. For local
//! testing, copies of the service account token and CA files can be supplied
//! through environment variables together with the API server host and port.

use crate::error::ControllerError;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use tracing::{debug, info};

/// Service account token file (in-cluster: /var/run/secrets/kubernetes.io/serviceaccount/token)
pub const TOKEN_FILE_VAR: &str = "KUBERNETES_SERVICEACCOUNT_TOKENFILE";
/// Service account CA file (in-cluster: /var/run/secrets/kubernetes.io/serviceaccount/ca.crt)
pub const ROOT_CA_FILE_VAR: &str = "KUBERNETES_SERVICEACCOUNT_ROOTCAFILE";
/// API server host
pub const SERVICE_HOST_VAR: &str = "KUBERNETES_SERVICE_HOST";
/// API server port
pub const SERVICE_PORT_VAR: &str = "KUBERNETES_SERVICE_PORT";

/// Explicit service account credentials for talking to an API server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceAccountFiles {
    /// API server URL
    pub server: String,
    /// Path of the bearer token file
    pub token_file: String,
    /// Path of the PEM encoded cluster CA
    pub root_ca_file: String,
}

impl ServiceAccountFiles {
    /// Read the override from an arbitrary variable lookup
    ///
    /// Returns `Ok(None)` unless both the token and CA file variables are set.
    pub fn from_lookup<F>(lookup: F) -> Result<Option<Self>, ControllerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let (Some(token_file), Some(root_ca_file)) =
            (read(TOKEN_FILE_VAR), read(ROOT_CA_FILE_VAR))
        else {
            return Ok(None);
        };

        let (Some(host), Some(port)) = (read(SERVICE_HOST_VAR), read(SERVICE_PORT_VAR)) else {
            return Err(ControllerError::InvalidConfig(format!(
                "{SERVICE_HOST_VAR} and {SERVICE_PORT_VAR} must be set when using {TOKEN_FILE_VAR}"
            )));
        };

        // IPv6 hosts need brackets in the authority
        let server = if host.contains(':') {
            format!("https://[{host}]:{port}")
        } else {
            format!("https://{host}:{port}")
        };

        Ok(Some(Self {
            server,
            token_file,
            root_ca_file,
        }))
    }

    /// Render a single-context kubeconfig pointing at the files
    fn to_kubeconfig(&self) -> Result<Kubeconfig, ControllerError> {
        let document = serde_json::json!({
            "apiVersion": "v1",
            "kind": "Config",
            "clusters": [{
                "name": "service-account",
                "cluster": {
                    "server": self.server,
                    "certificate-authority": self.root_ca_file,
                }
            }],
            "users": [{
                "name": "service-account",
                "user": { "tokenFile": self.token_file }
            }],
            "contexts": [{
                "name": "service-account",
                "context": { "cluster": "service-account", "user": "service-account" }
            }],
            "current-context": "service-account"
        });

        Ok(Kubeconfig::from_yaml(&serde_yaml::to_string(&document)?)?)
    }
}

/// Create a Kubernetes client and verify the API server is reachable
pub async fn connect() -> Result<Client, ControllerError> {
    let client = match ServiceAccountFiles::from_lookup(|key| std::env::var(key).ok())? {
        Some(files) => {
            info!("Using service account files against {}", files.server);
            let config = Config::from_custom_kubeconfig(
                files.to_kubeconfig()?,
                &KubeConfigOptions::default(),
            )
            .await?;
            Client::try_from(config)?
        }
        None => Client::try_default().await?,
    };

    let version = client.apiserver_version().await?;
    info!("Created aad group sync client");
    debug!("Kubernetes API server version: {}", version.git_version);

    Ok(client)
}
