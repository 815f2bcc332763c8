use super::schema::Config;
use crate::error::{ConfigError, Result};
use figment::{
    providers::{Env, Format, Json, Toml, Yaml},
    Figment,
};
use std::path::Path;

/// Environment variable holding the upstream credential.
pub const API_KEY_ENV: &str = "RAPIDAPI_KEY";

const ENV_PREFIX: &str = "PARAPH_";

pub async fn load_from_env_or_file() -> Result<Config> {
    let config: Config = Figment::new()
        // Try to load from various config files
        .merge(Toml::file("paraph-proxy.toml"))
        .merge(Json::file("paraph-proxy.json"))
        .merge(Yaml::file("paraph-proxy.yaml"))
        .merge(Yaml::file("paraph-proxy.yml"))
        // Override with environment variables (PARAPH_SERVER__PORT, ...)
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(|e| ConfigError::Parse(e.to_string()))?;

    finalize(config)
}

pub async fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();

    let figment = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => Figment::new().merge(Toml::file(path)),
        Some("json") => Figment::new().merge(Json::file(path)),
        Some("yaml") | Some("yml") => Figment::new().merge(Yaml::file(path)),
        _ => {
            return Err(ConfigError::Parse(
                "Unsupported config file format. Use .toml, .json, .yaml, or .yml".into(),
            )
            .into())
        }
    };

    let config: Config = figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(|e| ConfigError::Parse(e.to_string()))?;

    finalize(config)
}

fn finalize(config: Config) -> Result<Config> {
    let mut config = apply_env_substitutions(config)?;
    config.upstream.api_key =
        resolve_api_key(config.upstream.api_key.take(), std::env::var(API_KEY_ENV).ok());
    validate(&config)?;
    Ok(config)
}

/// A configured key wins; otherwise the environment is consulted once, at
/// load time.
fn resolve_api_key(configured: Option<String>, from_env: Option<String>) -> Option<String> {
    configured
        .filter(|key| !key.is_empty())
        .or_else(|| from_env.filter(|key| !key.is_empty()))
}

pub fn validate(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        return Err(ConfigError::Validation("Server port must be greater than 0".into()).into());
    }

    let url = url::Url::parse(&config.upstream.url).map_err(|e| {
        ConfigError::Validation(format!(
            "Invalid upstream URL '{}': {}",
            config.upstream.url, e
        ))
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation(format!(
            "Upstream URL must use http or https, got '{}'",
            url.scheme()
        ))
        .into());
    }

    if config.upstream.host.trim().is_empty() {
        return Err(ConfigError::Validation("Upstream host must not be empty".into()).into());
    }

    if config.upstream.timeout_ms == Some(0) {
        return Err(
            ConfigError::Validation("Upstream timeout must be greater than 0".into()).into(),
        );
    }

    Ok(())
}

fn apply_env_substitutions(mut config: Config) -> Result<Config> {
    config.upstream.url = substitute_env_vars(&config.upstream.url)?;
    config.upstream.host = substitute_env_vars(&config.upstream.host)?;

    if let Some(api_key) = &mut config.upstream.api_key {
        *api_key = substitute_env_vars(api_key)?;
    }

    Ok(config)
}

fn substitute_env_vars(input: &str) -> Result<String> {
    let mut result = input.to_string();
    let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| ConfigError::Parse(e.to_string()))?;

    for cap in re.captures_iter(input) {
        let var_name = &cap[1];
        // ${VAR:-default} falls back to the default when VAR is unset
        let (name, default) = match var_name.split_once(":-") {
            Some((name, default)) => (name, Some(default)),
            None => (var_name, None),
        };
        match (std::env::var(name), default) {
            (Ok(value), _) => result = result.replace(&cap[0], &value),
            (Err(_), Some(default)) => result = result.replace(&cap[0], default),
            (Err(_), None) => {
                return Err(ConfigError::EnvVar(format!(
                    "Environment variable '{}' not found",
                    name
                ))
                .into())
            }
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProxyError;
    use std::io::Write;

    #[test]
    fn test_env_substitution() {
        std::env::set_var("PARAPHRASE_TEST_SUBST_VAR", "test_value");

        let result = substitute_env_vars("Hello ${PARAPHRASE_TEST_SUBST_VAR}!").unwrap();
        assert_eq!(result, "Hello test_value!");

        let result = substitute_env_vars("${PARAPHRASE_TEST_MISSING:-default}").unwrap();
        assert_eq!(result, "default");

        let err = substitute_env_vars("${PARAPHRASE_TEST_MISSING}").unwrap_err();
        assert!(matches!(err, ProxyError::Config(ConfigError::EnvVar(_))));

        std::env::remove_var("PARAPHRASE_TEST_SUBST_VAR");
    }

    #[test]
    fn test_resolve_api_key() {
        assert_eq!(
            resolve_api_key(Some("file".into()), Some("env".into())).as_deref(),
            Some("file")
        );
        assert_eq!(
            resolve_api_key(None, Some("env".into())).as_deref(),
            Some("env")
        );
        assert_eq!(
            resolve_api_key(Some(String::new()), Some("env".into())).as_deref(),
            Some("env")
        );
        assert_eq!(resolve_api_key(None, Some(String::new())), None);
        assert_eq!(resolve_api_key(None, None), None);
    }

    #[test]
    fn test_validate_rejects_bad_upstream_url() {
        let mut config = Config::default();
        config.upstream.url = "ftp://example.com/paraphrase".to_string();
        assert!(validate(&config).is_err());

        config.upstream.url = "not a url".to_string();
        assert!(validate(&config).is_err());

        config.upstream.url = "http://127.0.0.1:9000/paraphrase".to_string();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_port_and_timeout() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.upstream.timeout_ms = Some(0);
        assert!(validate(&config).is_err());
    }

    #[tokio::test]
    async fn test_load_from_toml_path() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
host = "127.0.0.1"
port = 8088

[upstream]
host = "example.p.rapidapi.com"
apiKey = "from-file"
timeoutMs = 2500
"#
        )
        .unwrap();

        let config = load_from_path(file.path()).await.unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.upstream.host, "example.p.rapidapi.com");
        assert_eq!(config.upstream.url, super::super::schema::DEFAULT_UPSTREAM_URL);
        assert_eq!(config.upstream.api_key(), Some("from-file"));
        assert_eq!(config.upstream.timeout_ms, Some(2500));
    }

    #[tokio::test]
    async fn test_load_from_yaml_path() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "server:\n  port: 9099\n  staticDir: ./yew-ui/dist\nupstream:\n  apiKey: yaml-key\n"
        )
        .unwrap();

        let config = load_from_path(file.path()).await.unwrap();
        assert_eq!(config.server.port, 9099);
        assert_eq!(
            config.server.static_dir.as_deref(),
            Some(std::path::Path::new("./yew-ui/dist"))
        );
        assert_eq!(config.upstream.api_key(), Some("yaml-key"));
    }

    #[tokio::test]
    async fn test_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        let err = load_from_path(file.path()).await.unwrap_err();
        assert!(matches!(err, ProxyError::Config(ConfigError::Parse(_))));
    }
}
