mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Directory, Search, Service, Store, Strategies};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.store.url.trim().is_empty() {
		return Err(Error::Validation { message: "store.url must be non-empty.".to_string() });
	}
	if cfg.store.index.trim().is_empty() {
		return Err(Error::Validation { message: "store.index must be non-empty.".to_string() });
	}
	if cfg.store.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "store.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.store.page_size == 0 {
		return Err(Error::Validation {
			message: "store.page_size must be greater than zero.".to_string(),
		});
	}

	if let Some(directory) = cfg.directory.as_ref() {
		if directory.api_base.trim().is_empty() {
			return Err(Error::Validation {
				message: "directory.api_base must be non-empty.".to_string(),
			});
		}
		if directory.timeout_ms == 0 {
			return Err(Error::Validation {
				message: "directory.timeout_ms must be greater than zero.".to_string(),
			});
		}
		if directory.cache_ttl_secs == 0 {
			return Err(Error::Validation {
				message: "directory.cache_ttl_secs must be greater than zero.".to_string(),
			});
		}
	}

	for (label, value) in [
		("search.context_before", cfg.search.context_before),
		("search.context_after", cfg.search.context_after),
		("search.min_context", cfg.search.min_context),
		("search.more_limit", cfg.search.more_limit),
		("search.max_concurrent_expansions", cfg.search.max_concurrent_expansions),
	] {
		if value == 0 {
			return Err(Error::Validation {
				message: format!("{label} must be greater than zero."),
			});
		}
	}

	if cfg.search.base_window_secs <= 0 {
		return Err(Error::Validation {
			message: "search.base_window_secs must be greater than zero.".to_string(),
		});
	}
	if cfg.search.more_limit as u32 >= cfg.store.page_size {
		return Err(Error::Validation {
			message: "search.more_limit must be less than store.page_size.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.store.username.as_deref().map(|name| name.trim().is_empty()).unwrap_or(false) {
		cfg.store.username = None;
	}
	if cfg.store.password.as_deref().map(|pass| pass.trim().is_empty()).unwrap_or(false) {
		cfg.store.password = None;
	}
	if let Some(directory) = cfg.directory.as_mut()
		&& directory.token.as_deref().map(|token| token.trim().is_empty()).unwrap_or(false)
	{
		directory.token = None;
	}
}
