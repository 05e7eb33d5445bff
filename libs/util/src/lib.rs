use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use toml::{map::Map, Value};

/// Overrides the directory `Config*.toml` and `Secrets*.toml` are read from.
pub const CONFIG_DIR_ENV: &str = "NOTICEBOARD_DIR";

pub fn workspace_dir() -> anyhow::Result<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }

    let output = std::process::Command::new(env!("CARGO"))
        .arg("locate-project")
        .arg("--workspace")
        .arg("--message-format=plain")
        .output()
        .context("failed to run cargo locate-project")?
        .stdout;
    let cargo_path = std::str::from_utf8(&output)
        .context("cargo locate-project printed invalid utf-8")?;
    let cargo_path = Path::new(cargo_path.trim());

    match cargo_path.parent() {
        Some(dir) => Ok(dir.to_path_buf()),
        None => bail!("failed to locate workspace dir"),
    }
}

pub fn load_config(config_name: &str) -> anyhow::Result<Map<String, Value>> {
    let config = std::fs::read_to_string(workspace_dir()?.join(config_name))
        .with_context(|| format!("failed to read {config_name}"))?;

    parse_config(&config).with_context(|| format!("failed to parse {config_name}"))
}

pub fn parse_config(text: &str) -> anyhow::Result<Map<String, Value>> {
    Ok(toml::from_str::<Map<String, Value>>(text)?)
}

/// Reads a secrets file from the workspace dir. A missing file yields an
/// empty map so that environment variables alone are enough.
pub fn load_env(secrets_name: &str) -> anyhow::Result<Map<String, Value>> {
    let path = workspace_dir()?.join(secrets_name);
    if !path.exists() {
        return Ok(Map::new());
    }

    let secrets = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {secrets_name}"))?;

    toml::from_str::<Map<String, Value>>(&secrets)
        .with_context(|| format!("failed to parse {secrets_name}"))
}

/// Environment variable first, then the secrets file. Blank values count as
/// unset.
pub fn secret(secrets: &Map<String, Value>, key: &str) -> Option<String> {
    let present = |value: &String| !value.trim().is_empty();

    std::env::var(key).ok().filter(present).or_else(|| {
        secrets
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
            .filter(present)
    })
}

pub fn table<'a>(
    config: &'a Map<String, Value>,
    key: &str,
) -> anyhow::Result<&'a Map<String, Value>> {
    config
        .get(key)
        .with_context(|| format!("failed to get {key} config"))?
        .as_table()
        .with_context(|| format!("failed to parse {key} config"))
}

pub fn integer(table: &Map<String, Value>, key: &str) -> anyhow::Result<i64> {
    table
        .get(key)
        .with_context(|| format!("failed to load {key} config"))?
        .as_integer()
        .with_context(|| format!("failed to parse {key} config"))
}

pub fn boolean(table: &Map<String, Value>, key: &str) -> anyhow::Result<bool> {
    table
        .get(key)
        .with_context(|| format!("failed to load {key} config"))?
        .as_bool()
        .with_context(|| format!("failed to parse {key} config"))
}

pub fn string(table: &Map<String, Value>, key: &str) -> anyhow::Result<String> {
    table
        .get(key)
        .with_context(|| format!("failed to load {key} config"))?
        .as_str()
        .map(str::to_string)
        .with_context(|| format!("failed to parse {key} config"))
}
