// demos/storefront/src/config.rs

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub api_base_url: String,
  pub user_id: i64,
  pub auth_token: Option<String>,
  pub cart_path: PathBuf,
  /// Run against the in-memory mock backend instead of the remote API.
  pub mock_backend: bool,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenvy::dotenv().ok(); // Load .env file if present

    let api_base_url =
      env::var("DUKA_API_BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:8080/api/".to_string());

    let user_id = env::var("DUKA_USER_ID")
      .unwrap_or_else(|_| "1".to_string())
      .parse::<i64>()
      .context("invalid DUKA_USER_ID")?;

    let auth_token = env::var("DUKA_AUTH_TOKEN").ok().filter(|t| !t.is_empty());

    let cart_path = match env::var("DUKA_CART_PATH") {
      Ok(p) => PathBuf::from(p),
      Err(_) => default_cart_path()?,
    };

    let mock_backend = env::var("DUKA_MOCK_BACKEND")
      .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
      .unwrap_or(false);

    tracing::debug!(
      %api_base_url,
      user_id,
      cart_path = %cart_path.display(),
      mock_backend,
      "configuration loaded"
    );

    Ok(Self {
      api_base_url,
      user_id,
      auth_token,
      cart_path,
      mock_backend,
    })
  }
}

fn default_cart_path() -> Result<PathBuf> {
  let base = dirs::data_dir().context("no user data directory available, set DUKA_CART_PATH")?;
  Ok(base.join("duka").join("cart.json"))
}
