#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use tudu::libs::app_info;
    use tudu::libs::config::{Config, ServerConfig, DEFAULT_BIND, MEMORY_DATABASE};

    struct ConfigTestContext {
        temp_dir: TempDir,
    }

    impl ConfigTestContext {
        fn path(&self) -> PathBuf {
            self.temp_dir.path().join("config.json")
        }
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            ConfigTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
            }
        }
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_missing_file_gives_defaults(ctx: &mut ConfigTestContext) {
        let config = Config::read_from(&ctx.path()).unwrap();

        assert_eq!(config.server.bind, DEFAULT_BIND);
        assert_eq!(config.server.database, None);
        assert!(config.server.seed);
        assert_eq!(config.client.api_url, app_info::default_api_url());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_back(ctx: &mut ConfigTestContext) {
        let mut config = Config::default();
        config.server.bind = "0.0.0.0:8080".to_string();
        config.server.database = Some(MEMORY_DATABASE.to_string());
        config.server.seed = false;
        config.client.api_url = "http://tasks.local:8080".to_string();

        config.save_to(&ctx.path()).unwrap();
        let loaded = Config::read_from(&ctx.path()).unwrap();

        assert_eq!(loaded, config);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_partial_file_keeps_defaults(ctx: &mut ConfigTestContext) {
        fs::write(ctx.path(), r#"{ "server": { "bind": "127.0.0.1:9000" } }"#).unwrap();

        let config = Config::read_from(&ctx.path()).unwrap();

        assert_eq!(config.server.bind, "127.0.0.1:9000");
        assert!(config.server.seed);
        assert_eq!(config.client.api_url, app_info::default_api_url());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_invalid_file_is_an_error(ctx: &mut ConfigTestContext) {
        fs::write(ctx.path(), "{ server: ").unwrap();

        let err = Config::read_from(&ctx.path()).unwrap_err();
        assert!(err.to_string().contains("config.json"));
    }

    #[test]
    fn test_environment_overrides() {
        let config = Config::default().with_overrides(env(&[
            ("TUDU_BIND", "0.0.0.0:4000"),
            ("TUDU_DATABASE", "/tmp/tasks.db"),
            ("TUDU_SEED", "off"),
            ("TUDU_API_URL", "http://10.0.0.2:4000"),
        ]));

        assert_eq!(config.server.bind, "0.0.0.0:4000");
        assert_eq!(config.server.database.as_deref(), Some("/tmp/tasks.db"));
        assert!(!config.server.seed);
        assert_eq!(config.client.api_url, "http://10.0.0.2:4000");
    }

    #[test]
    fn test_blank_overrides_are_ignored() {
        let config = Config::default().with_overrides(env(&[("TUDU_BIND", "  "), ("TUDU_SEED", "")]));

        assert_eq!(config.server.bind, DEFAULT_BIND);
        assert!(config.server.seed);
    }

    #[test]
    fn test_explicit_database_location() {
        let server = ServerConfig {
            database: Some(MEMORY_DATABASE.to_string()),
            ..Default::default()
        };

        assert_eq!(server.database_location().unwrap(), MEMORY_DATABASE);
    }
}
