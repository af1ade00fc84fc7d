use std::path::PathBuf;

/// Set (to anything) in the compile environment when a build script generates
/// the dispatchers; `#[callback]` then only validates and leaves emission to
/// the files under `OUT_DIR`.
pub const EXTERNAL_ENV: &str = "MMG_CALLBACKS_EXTERNAL";

/// Generator configuration shared by the macro and build-script paths.
#[derive(Debug, Clone)]
pub struct CodegenConfig {
    /// Path generated code uses to reach the runtime crate.
    pub runtime_crate: syn::Path,
    /// Output root for generated files; `OUT_DIR` when unset.
    pub out_dir: Option<PathBuf>,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            runtime_crate: syn::parse_quote!(::mmg_callbacks),
            out_dir: None,
        }
    }
}

impl CodegenConfig {
    pub fn with_out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(dir.into());
        self
    }

    /// Whether the macro path should skip emission.
    pub fn external() -> bool {
        std::env::var_os(EXTERNAL_ENV).is_some()
    }

    /// Configured output root, falling back to cargo's `OUT_DIR`.
    pub fn resolve_out_dir(&self) -> Option<PathBuf> {
        self.out_dir
            .clone()
            .or_else(|| std::env::var_os("OUT_DIR").map(PathBuf::from))
    }
}
