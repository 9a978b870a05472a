//! Configuration file upgrades: add keys introduced after the file was written.

use super::Config;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::io;
use std::path::Path;

/// Keys every config file should carry, with the documentation comment
/// injected after the key when it is added.
fn expected_keys() -> Vec<(&'static str, Value, Option<&'static str>)> {
    let defaults = Config::default();
    vec![
        (
            "database",
            Value::String(defaults.database),
            None,
        ),
        ("default_user", Value::Null, None),
        (
            "default_frequency",
            Value::String(defaults.default_frequency.to_db_str().to_string()),
            Some("# default_frequency options: daily | weekly | monthly"),
        ),
        (
            "streak_policy",
            Value::String(defaults.streak_policy.to_string()),
            Some(
                "# streak_policy options:\n\
                 #   watermark → longest streak never decreases\n\
                 #   recompute → longest streak follows the current completions",
            ),
        ),
    ]
}

/// Return the keys missing from the config file at `path`.
pub fn missing_fields(path: &Path) -> io::Result<Vec<String>> {
    let map = read_mapping(path)?;
    Ok(expected_keys()
        .into_iter()
        .filter(|(k, _, _)| !map.contains_key(Value::String(k.to_string())))
        .map(|(k, _, _)| k.to_string())
        .collect())
}

/// Add every missing key with its default value. Returns the keys added.
///
/// A file with no missing keys is not rewritten.
pub fn fill_missing_fields(path: &Path) -> io::Result<Vec<String>> {
    let mut map = read_mapping(path)?;
    let mut added = Vec::new();
    let mut comments: Vec<(&'static str, &'static str)> = Vec::new();

    for (key, default, comment) in expected_keys() {
        let k = Value::String(key.to_string());
        if !map.contains_key(&k) {
            map.insert(k, default);
            added.push(key.to_string());
            if let Some(c) = comment {
                comments.push((key, c));
            }
        }
    }

    if added.is_empty() {
        return Ok(added);
    }

    let serialized = serde_yaml::to_string(&Value::Mapping(map))
        .map_err(|e| io::Error::other(format!("serialize error: {}", e)))?;

    let mut new_content = String::new();
    for line in serialized.lines() {
        new_content.push_str(line);
        new_content.push('\n');

        for (key, comment) in &comments {
            if line.starts_with(&format!("{key}:")) {
                new_content.push_str(comment);
                new_content.push('\n');
            }
        }
    }

    fs::write(path, new_content)?;
    Ok(added)
}

fn read_mapping(path: &Path) -> io::Result<Mapping> {
    let content = fs::read_to_string(path)?;
    match serde_yaml::from_str::<Value>(&content) {
        Ok(Value::Mapping(m)) => Ok(m),
        Ok(Value::Null) => Ok(Mapping::new()),
        Ok(_) => Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{:?} is not a YAML mapping", path),
        )),
        Err(e) => Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("failed to parse {:?}: {}", path, e),
        )),
    }
}
