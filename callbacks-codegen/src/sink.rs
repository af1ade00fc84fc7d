//! Output sinks for generated compilation units.

use heck::ToSnakeCase;
use proc_macro2::TokenStream;
use quote::{quote, ToTokens};
use std::fs;
use std::io;
use std::path::PathBuf;
use syn::Ident;

/// One complete generated unit: the dispatcher and its two traits.
#[derive(Clone)]
pub struct CompilationUnit {
    pub module_path: Vec<String>,
    pub dispatcher: Ident,
    pub header: String,
    pub file: syn::File,
}

impl CompilationUnit {
    pub fn qualified_name(&self) -> String {
        let mut parts = self.module_path.clone();
        parts.push(self.dispatcher.to_string());
        parts.join("::")
    }

    /// `<module path>/<snake_case dispatcher>.rs`
    pub fn relative_path(&self) -> PathBuf {
        let mut path: PathBuf = self.module_path.iter().collect();
        path.push(format!("{}.rs", self.dispatcher.to_string().to_snake_case()));
        path
    }

    pub fn to_source(&self) -> String {
        let mut out = self.header.clone();
        out.push_str(&prettyplease::unparse(&self.file));
        out
    }

    pub fn to_tokens(&self) -> TokenStream {
        let items = &self.file.items;
        quote! { #(#items)* }
    }
}

pub trait Sink {
    fn write(&mut self, unit: &CompilationUnit) -> io::Result<()>;
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn write(&mut self, unit: &CompilationUnit) -> io::Result<()> {
        (**self).write(unit)
    }
}

/// Collects units as tokens; used by the attribute macro.
#[derive(Default)]
pub struct TokenSink {
    tokens: TokenStream,
}

impl TokenSink {
    pub fn into_tokens(self) -> TokenStream {
        self.tokens
    }
}

impl Sink for TokenSink {
    fn write(&mut self, unit: &CompilationUnit) -> io::Result<()> {
        unit.file.items.iter().for_each(|i| i.to_tokens(&mut self.tokens));
        Ok(())
    }
}

/// Writes pretty-printed units below a root directory (usually `OUT_DIR`).
pub struct DirSink {
    root: PathBuf,
    written: Vec<PathBuf>,
}

impl DirSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            written: Vec::new(),
        }
    }

    /// Files written (or confirmed up to date) so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl Sink for DirSink {
    fn write(&mut self, unit: &CompilationUnit) -> io::Result<()> {
        let path = self.root.join(unit.relative_path());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let source = unit.to_source();
        // identical output is not rewritten; its mtime stays put
        let unchanged = fs::read_to_string(&path).is_ok_and(|old| old == source);
        if !unchanged {
            fs::write(&path, source)?;
        }
        tracing::debug!(path = %path.display(), unchanged, "wrote callback unit");
        self.written.push(path);
        Ok(())
    }
}
