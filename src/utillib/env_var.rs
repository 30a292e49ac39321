use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};

/// Get the raw value of env variable `name`, `None` if it is not set.
fn get_env_string(name: &str) -> Result<Option<String>> {
    match std::env::var(name) {
        Ok(s) => Ok(Some(s)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(std::env::VarError::NotUnicode(_)) => bail!("non-utf8 string in env var {name:?}"),
    }
}

pub fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "yes" | "y" | "1" | "t" | "true" => Some(true),
        "no" | "n" | "0" | "f" | "false" => Some(false),
        _ => None,
    }
}

/// Get the boolean value from env variable `name`, `default` if it is
/// missing. Invalid values (anything but `yes|y|1|t|true` or
/// `no|n|0|f|false`) are errors, not silently false.
pub fn get_env_bool(name: &str, default: bool) -> Result<bool> {
    match get_env_string(name)? {
        Some(s) => parse_bool(&s).ok_or_else(|| {
            anyhow!("invalid value for env variable {name:?}: {s:?}, expecting yes or no")
        }),
        None => Ok(default),
    }
}

/// Get and parse env variable `name`, `default` if it is missing.
pub fn get_env_parsed<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get_env_string(name)? {
        Some(s) => s
            .trim()
            .parse()
            .with_context(|| anyhow!("parsing env variable {name:?} value {s:?}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_parse_bool() {
        assert_eq!(parse_bool("yes"), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("no"), Some(false));
        assert_eq!(parse_bool("f"), Some(false));
        assert_eq!(parse_bool("Yes"), None);
        assert_eq!(parse_bool(""), None);
    }

    #[test]
    fn t_missing_vars_give_defaults() -> Result<()> {
        let name = "JVM_BENCH_ANALYSIS_TEST_SURELY_UNSET_VARIABLE";
        assert_eq!(get_env_bool(name, true)?, true);
        assert_eq!(get_env_parsed::<f64>(name, 0.25)?, 0.25);
        Ok(())
    }
}
