use crate::cli::ValidatorArgs;
use armature_kernel::{Validator, ValidatorConfig};
use std::path::Path;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[cfg(feature = "json-schema")]
use armature_schema::{DEFAULT_SCHEMA_PATH, JsonSchemaEngine};

/// Logs go to stderr so report output on stdout stays clean.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn load_config_or_exit(path: Option<&str>) -> ValidatorConfig {
    let Some(path) = path else {
        return ValidatorConfig::default();
    };
    ValidatorConfig::load_toml(path).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    })
}

pub fn build_validator_or_exit(args: &ValidatorArgs) -> Validator {
    let config = load_config_or_exit(args.config.as_deref());
    let validator = Validator::new(config).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });
    if args.no_schema {
        return validator;
    }
    attach_schema_or_exit(validator, args.schema.as_deref())
}

#[cfg(feature = "json-schema")]
fn attach_schema_or_exit(validator: Validator, explicit: Option<&str>) -> Validator {
    let path = match explicit {
        Some(path) => path,
        None if Path::new(DEFAULT_SCHEMA_PATH).exists() => DEFAULT_SCHEMA_PATH,
        None => {
            warn!(
                path = DEFAULT_SCHEMA_PATH,
                "schema file not found; running without schema validation"
            );
            return validator;
        }
    };
    let engine = JsonSchemaEngine::load(path).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });
    validator.with_schema(Box::new(engine))
}

#[cfg(not(feature = "json-schema"))]
fn attach_schema_or_exit(validator: Validator, explicit: Option<&str>) -> Validator {
    if let Some(path) = explicit {
        eprintln!("error: --schema {path} requires the `json-schema` feature");
        std::process::exit(1);
    }
    warn!("built without the `json-schema` feature; running without schema validation");
    validator
}

pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// `1234567` → `1,234,567`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn print_json_or_exit<T: serde::Serialize>(payload: &T) {
    match serde_json::to_string_pretty(payload) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("error: failed to render json: {e}");
            std::process::exit(1);
        }
    }
}
