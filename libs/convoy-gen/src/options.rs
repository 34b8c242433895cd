use serde::Deserialize;

/// Generation knobs, deserializable from the CLI's TOML config.
#[derive(Debug, Clone, Deserialize)]
pub struct GenOptions {
    /// Name of the emitted entry point and of the call expressions scanned
    /// for at call sites.
    #[serde(default = "default_entry")]
    pub entry: String,

    /// Conventional name a function must carry to qualify as a candidate.
    #[serde(default = "default_convention")]
    pub convention: String,

    /// Emit branches only for pairs requested by at least one call site.
    /// Pruning is a size optimization; unresolvable call sites disable it
    /// so a used candidate is never dropped.
    #[serde(default = "default_prune_unused")]
    pub prune_unused: bool,

    /// Path prefix prepended to scanned type and function paths in the
    /// artifact.
    #[serde(default = "default_type_prefix")]
    pub type_prefix: String,

    /// Fully qualified error type the artifact returns.
    #[serde(default = "default_error_path")]
    pub error_path: String,
}

fn default_entry() -> String {
    "convert".into()
}

fn default_convention() -> String {
    "to_dto".into()
}

fn default_prune_unused() -> bool {
    true
}

fn default_type_prefix() -> String {
    "crate::".into()
}

fn default_error_path() -> String {
    "convoy_api::error::ConvertError".into()
}

impl Default for GenOptions {
    fn default() -> Self {
        Self {
            entry: default_entry(),
            convention: default_convention(),
            prune_unused: default_prune_unused(),
            type_prefix: default_type_prefix(),
            error_path: default_error_path(),
        }
    }
}
