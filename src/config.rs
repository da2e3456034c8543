use anyhow::{Context, Result};

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_VISION_MODEL: &str = "gpt-4o-mini";
const DEFAULT_CAPTION_MODEL: &str = "gpt-4o-2024-08-06";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Process-wide configuration, read once at startup and handed to the
/// handlers through [`crate::api::AppState`].
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_base: String,
    pub vision_model: String,
    pub caption_model: String,
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_key = dotenvy::var("OPENAI_API_KEY").context("OPENAI_API_KEY is not set")?;

        let api_base = dotenvy::var("OPENAI_API_BASE")
            .unwrap_or_else(|_| DEFAULT_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();
        let vision_model = dotenvy::var("OPENAI_VISION_MODEL")
            .unwrap_or_else(|_| DEFAULT_VISION_MODEL.to_string());
        let caption_model = dotenvy::var("OPENAI_CAPTION_MODEL")
            .unwrap_or_else(|_| DEFAULT_CAPTION_MODEL.to_string());
        let bind_addr =
            dotenvy::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        Ok(Self {
            api_key,
            api_base,
            vision_model,
            caption_model,
            bind_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    // Env-var mutation is process-global, so everything lives in one test.
    #[test]
    fn from_env_requires_key_and_fills_defaults() {
        std::env::remove_var("OPENAI_API_KEY");
        assert!(Config::from_env().is_err());

        std::env::set_var("OPENAI_API_KEY", "sk-test");
        std::env::remove_var("OPENAI_API_BASE");
        std::env::remove_var("OPENAI_VISION_MODEL");
        std::env::remove_var("OPENAI_CAPTION_MODEL");
        std::env::remove_var("BIND_ADDR");

        let config = Config::from_env().unwrap();
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.api_base, "https://api.openai.com/v1");
        assert_eq!(config.vision_model, "gpt-4o-mini");
        assert_eq!(config.caption_model, "gpt-4o-2024-08-06");
        assert_eq!(config.bind_addr, "0.0.0.0:8000");

        std::env::set_var("OPENAI_API_BASE", "http://127.0.0.1:9999/v1/");
        let config = Config::from_env().unwrap();
        assert_eq!(config.api_base, "http://127.0.0.1:9999/v1");

        std::env::remove_var("OPENAI_API_BASE");
        std::env::remove_var("OPENAI_API_KEY");
    }
}
