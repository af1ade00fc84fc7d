//! Extractor, emitter and round driver behind `mmg-callbacks`.
//!
//! The attribute macros in `callbacks-macros` call into this crate with a
//! [`TokenSink`]. Build scripts can use [`Generator`] instead, which parses
//! source files and writes one `<snake_case>_callback.rs` per annotated type
//! below `OUT_DIR`:
//!
//! ```ignore
//! // build.rs
//! fn main() -> anyhow::Result<()> {
//!     println!("cargo:rerun-if-changed=src/events.rs");
//!     println!("cargo:rustc-env={}=1", callbacks_codegen::config::EXTERNAL_ENV);
//!     callbacks_codegen::Generator::new(Default::default())
//!         .source("src/events.rs", "events")
//!         .run()?;
//!     Ok(())
//! }
//!
//! // src/events.rs
//! include!(concat!(env!("OUT_DIR"), "/events/moved_callback.rs"));
//! ```

pub mod codegen;
pub mod config;
pub mod error;
pub mod round;
pub mod sink;
pub mod validate;

pub use codegen::generate;
pub use config::CodegenConfig;
pub use error::CodegenError;
pub use round::{check_round, Report, Round};
pub use sink::{CompilationUnit, DirSink, Sink, TokenSink};
pub use validate::Candidate;

use anyhow::Context;
use std::path::PathBuf;
use syn::Item;

/// Walks `items` (descending into inline modules) and lifts every marked item.
pub fn collect_candidates(items: &[Item], module_path: &[String]) -> Vec<Candidate> {
    let mut out = Vec::new();
    for item in items {
        if let Item::Mod(m) = item {
            if let Some((_, inner)) = &m.content {
                let mut path = module_path.to_vec();
                path.push(m.ident.to_string());
                out.extend(collect_candidates(inner, &path));
            }
            continue;
        }
        out.extend(Candidate::from_item(module_path.to_vec(), item.clone()));
    }
    out
}

struct Source {
    path: PathBuf,
    module_path: Vec<String>,
}

/// Build-script driver: one round over every registered source file.
pub struct Generator {
    config: CodegenConfig,
    sources: Vec<Source>,
}

impl Generator {
    pub fn new(config: CodegenConfig) -> Self {
        Self {
            config,
            sources: Vec::new(),
        }
    }

    /// Registers a source file and the module path its items live under
    /// (`"events::input"`; a leading `crate` is ignored).
    pub fn source(mut self, path: impl Into<PathBuf>, module_path: &str) -> Self {
        let module_path = module_path
            .split("::")
            .map(str::trim)
            .filter(|s| !s.is_empty() && *s != "crate")
            .map(String::from)
            .collect();
        self.sources.push(Source {
            path: path.into(),
            module_path,
        });
        self
    }

    /// Parses and validates every source, then writes all units. Nothing is
    /// written when any source fails validation.
    pub fn run(&self) -> anyhow::Result<Report> {
        let out_dir = self.config.resolve_out_dir().ok_or(CodegenError::NoOutDir)?;
        let mut targets = Vec::new();
        for src in &self.sources {
            let text = std::fs::read_to_string(&src.path)
                .with_context(|| format!("reading {}", src.path.display()))?;
            let file = syn::parse_file(&text)
                .map_err(|e| CodegenError::diagnostic(&src.path, &e))
                .with_context(|| format!("parsing {}", src.path.display()))?;
            let candidates = collect_candidates(&file.items, &src.module_path);
            tracing::debug!(path = %src.path.display(), candidates = candidates.len(), "scanned source");
            targets.extend(check_round(&candidates).map_err(|e| CodegenError::diagnostic(&src.path, &e))?);
        }
        let mut round = Round::new(&self.config, DirSink::new(out_dir));
        Ok(round.emit(&targets))
    }
}
