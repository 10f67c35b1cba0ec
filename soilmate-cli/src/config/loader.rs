use super::types::{RawIntegrationsConfig, RawServerConfig, RawSoilmateConfig, SoilmateConfig};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use soilmate_server::{
    DEFAULT_HOST, DEFAULT_PORT, EmailService, IntegrationsConfig, ServerConfig,
};
use std::path::{Path, PathBuf};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (user + project + environment)
    pub fn load() -> Result<SoilmateConfig> {
        Self::load_with(
            Self::user_config_path(),
            Self::project_config_path(),
            |name| std::env::var(name).ok(),
        )
    }

    /// Load configuration from explicit paths and an environment lookup
    pub fn load_with<F>(
        user_path: Option<PathBuf>,
        project_path: PathBuf,
        env: F,
    ) -> Result<SoilmateConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut raw = RawSoilmateConfig::default();

        // Layer 1: User config
        if let Some(user_path) = user_path
            && user_path.exists()
        {
            raw = Self::merge_raw(raw, Self::read_raw(&user_path)?);
        }

        // Layer 2: Project config
        if project_path.exists() {
            raw = Self::merge_raw(raw, Self::read_raw(&project_path)?);
        }

        // Layer 3: Environment
        raw = Self::merge_raw(raw, Self::from_env(env));

        Ok(Self::finalize(raw))
    }

    /// Get user config path (platform-specific)
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "soilmate").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Get project config path
    /// Can be overridden with SOILMATE_PROJECT_CONFIG_DIR env var
    pub fn project_config_path() -> PathBuf {
        if let Ok(dir) = std::env::var("SOILMATE_PROJECT_CONFIG_DIR") {
            PathBuf::from(dir).join("config.toml")
        } else {
            PathBuf::from(".soilmate/config.toml")
        }
    }

    fn read_raw(path: &Path) -> Result<RawSoilmateConfig> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
    }

    /// Integration settings supplied through environment variables
    fn from_env<F>(env: F) -> RawSoilmateConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| env(name).filter(|value| !value.trim().is_empty());

        RawSoilmateConfig {
            server: RawServerConfig::default(),
            integrations: RawIntegrationsConfig {
                brevo_api_key: var("BREVO_API_KEY"),
                sheets_webhook_url: var("GOOGLE_SHEETS_WEBHOOK_URL"),
                email_service: var("EMAIL_SERVICE"),
                resend_api_key: var("RESEND_API_KEY"),
                sendgrid_api_key: var("SENDGRID_API_KEY"),
                from_email: var("FROM_EMAIL"),
                ..RawIntegrationsConfig::default()
            },
        }
    }

    /// Merge two raw configs (overlay values override base only if explicitly set)
    fn merge_raw(base: RawSoilmateConfig, overlay: RawSoilmateConfig) -> RawSoilmateConfig {
        let (base_int, over_int) = (base.integrations, overlay.integrations);
        RawSoilmateConfig {
            server: RawServerConfig {
                host: overlay.server.host.or(base.server.host),
                port: overlay.server.port.or(base.server.port),
                secure_cookies: overlay.server.secure_cookies.or(base.server.secure_cookies),
            },
            integrations: RawIntegrationsConfig {
                brevo_api_key: over_int.brevo_api_key.or(base_int.brevo_api_key),
                brevo_base_url: over_int.brevo_base_url.or(base_int.brevo_base_url),
                brevo_list_ids: over_int.brevo_list_ids.or(base_int.brevo_list_ids),
                sheets_webhook_url: over_int.sheets_webhook_url.or(base_int.sheets_webhook_url),
                forms_url: over_int.forms_url.or(base_int.forms_url),
                forms_fields: over_int.forms_fields.or(base_int.forms_fields),
                email_service: over_int.email_service.or(base_int.email_service),
                resend_api_key: over_int.resend_api_key.or(base_int.resend_api_key),
                resend_base_url: over_int.resend_base_url.or(base_int.resend_base_url),
                sendgrid_api_key: over_int.sendgrid_api_key.or(base_int.sendgrid_api_key),
                sendgrid_base_url: over_int.sendgrid_base_url.or(base_int.sendgrid_base_url),
                from_email: over_int.from_email.or(base_int.from_email),
                request_timeout_secs: over_int
                    .request_timeout_secs
                    .or(base_int.request_timeout_secs),
            },
        }
    }

    /// Convert raw config to final config with defaults applied
    fn finalize(raw: RawSoilmateConfig) -> SoilmateConfig {
        let defaults = IntegrationsConfig::default();
        let integrations = raw.integrations;

        SoilmateConfig {
            server: ServerConfig {
                host: raw.server.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port: raw.server.port.unwrap_or(DEFAULT_PORT),
                secure_cookies: raw.server.secure_cookies.unwrap_or(false),
            },
            integrations: IntegrationsConfig {
                brevo_api_key: integrations.brevo_api_key,
                brevo_base_url: integrations.brevo_base_url.unwrap_or(defaults.brevo_base_url),
                brevo_list_ids: integrations.brevo_list_ids.unwrap_or(defaults.brevo_list_ids),
                sheets_webhook_url: integrations.sheets_webhook_url,
                forms_url: integrations.forms_url,
                forms_fields: integrations.forms_fields.unwrap_or(defaults.forms_fields),
                email_service: integrations
                    .email_service
                    .map(|name| EmailService::from_name(&name))
                    .unwrap_or_default(),
                resend_api_key: integrations.resend_api_key,
                resend_base_url: integrations.resend_base_url.unwrap_or(defaults.resend_base_url),
                sendgrid_api_key: integrations.sendgrid_api_key,
                sendgrid_base_url: integrations
                    .sendgrid_base_url
                    .unwrap_or(defaults.sendgrid_base_url),
                from_email: integrations.from_email,
                request_timeout_secs: integrations
                    .request_timeout_secs
                    .unwrap_or(defaults.request_timeout_secs),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soilmate_server::integrations::FormFields;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_files_give_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ConfigLoader::load_with(
            Some(dir.path().join("absent-user.toml")),
            dir.path().join("absent-project.toml"),
            no_env,
        )
        .unwrap();

        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.integrations.brevo_list_ids, vec![2]);
        assert_eq!(config.integrations.request_timeout_secs, 10);
    }

    #[test]
    fn project_overrides_user_only_where_set() {
        let dir = TempDir::new().unwrap();
        let user = write(
            &dir,
            "user.toml",
            "[server]\nhost = \"0.0.0.0\"\nport = 9000\n\n[integrations]\nforms_url = \"https://forms.example/a\"\n",
        );
        let project = write(&dir, "project.toml", "[server]\nport = 9100\n");

        let config = ConfigLoader::load_with(Some(user), project, no_env).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9100);
        assert_eq!(
            config.integrations.forms_url.as_deref(),
            Some("https://forms.example/a")
        );
    }

    #[test]
    fn environment_overrides_files() {
        let dir = TempDir::new().unwrap();
        let project = write(
            &dir,
            "project.toml",
            "[integrations]\nemail_service = \"resend\"\nresend_api_key = \"from-file\"\n",
        );
        let env: HashMap<&str, &str> = HashMap::from([
            ("RESEND_API_KEY", "from-env"),
            ("EMAIL_SERVICE", "sendgrid"),
            ("GOOGLE_SHEETS_WEBHOOK_URL", "https://hooks.example/s"),
            ("BREVO_API_KEY", "  "),
        ]);

        let config = ConfigLoader::load_with(None, project, |name| {
            env.get(name).map(|value| value.to_string())
        })
        .unwrap();

        assert_eq!(config.integrations.resend_api_key.as_deref(), Some("from-env"));
        assert_eq!(config.integrations.email_service, EmailService::SendGrid);
        assert_eq!(
            config.integrations.sheets_webhook_url.as_deref(),
            Some("https://hooks.example/s")
        );
        assert!(config.integrations.brevo_api_key.is_none());
    }

    #[test]
    fn unknown_email_service_disables_email() {
        let dir = TempDir::new().unwrap();
        let project = write(
            &dir,
            "project.toml",
            "[integrations]\nemail_service = \"nodemailer\"\n",
        );

        let config = ConfigLoader::load_with(None, project, no_env).unwrap();

        assert_eq!(config.integrations.email_service, EmailService::None);
    }

    #[test]
    fn unknown_email_service_from_env_disables_email() {
        let dir = TempDir::new().unwrap();
        let config = ConfigLoader::load_with(None, dir.path().join("absent.toml"), |name| {
            (name == "EMAIL_SERVICE").then(|| "mailgun".to_string())
        })
        .unwrap();

        assert_eq!(config.integrations.email_service, EmailService::None);
    }

    #[test]
    fn endpoints_and_form_fields_come_from_files() {
        let dir = TempDir::new().unwrap();
        let user = write(
            &dir,
            "user.toml",
            "[integrations]\nbrevo_base_url = \"http://127.0.0.1:9001\"\nresend_base_url = \"http://127.0.0.1:9002\"\n",
        );
        let project = write(
            &dir,
            "project.toml",
            "[integrations]\nsendgrid_base_url = \"http://127.0.0.1:9003\"\n\n[integrations.forms_fields]\nname = \"entry.1\"\nplant = \"entry.4\"\n",
        );

        let config = ConfigLoader::load_with(Some(user), project, no_env).unwrap();
        let integrations = &config.integrations;

        assert_eq!(integrations.brevo_base_url, "http://127.0.0.1:9001");
        assert_eq!(integrations.resend_base_url, "http://127.0.0.1:9002");
        assert_eq!(integrations.sendgrid_base_url, "http://127.0.0.1:9003");
        assert_eq!(integrations.forms_fields.name, "entry.1");
        assert_eq!(integrations.forms_fields.plant, "entry.4");
        assert_eq!(integrations.forms_fields.email, FormFields::default().email);
    }

    #[test]
    fn endpoints_default_when_unset() {
        let dir = TempDir::new().unwrap();
        let config =
            ConfigLoader::load_with(None, dir.path().join("absent.toml"), no_env).unwrap();
        let defaults = IntegrationsConfig::default();

        assert_eq!(config.integrations.brevo_base_url, defaults.brevo_base_url);
        assert_eq!(config.integrations.sendgrid_base_url, defaults.sendgrid_base_url);
        assert_eq!(config.integrations.forms_fields, FormFields::default());
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let project = write(&dir, "project.toml", "[server\nport = ");
        let error = ConfigLoader::load_with(None, project, no_env).unwrap_err();
        assert!(error.to_string().contains("parsing"));
    }

    #[test]
    fn merge_keeps_base_when_overlay_unset() {
        let base = RawSoilmateConfig {
            integrations: RawIntegrationsConfig {
                brevo_list_ids: Some(vec![3]),
                ..Default::default()
            },
            ..Default::default()
        };
        let merged = ConfigLoader::merge_raw(base, RawSoilmateConfig::default());
        assert_eq!(merged.integrations.brevo_list_ids, Some(vec![3]));
    }
}
