use anyhow::Context;
use serde::de::DeserializeOwned;

/// Read a single YAML manifest into a typed resource.
pub fn load_manifest<T: DeserializeOwned>(path: &str) -> anyhow::Result<T> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading manifest {}", path))?;
    parse_manifest(&content).with_context(|| format!("parsing manifest {}", path))
}

pub fn parse_manifest<T: DeserializeOwned>(content: &str) -> anyhow::Result<T> {
    Ok(serde_yaml::from_str(content)?)
}
