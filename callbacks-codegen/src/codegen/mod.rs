pub mod analyze;
pub mod emit;
pub mod model;
pub(crate) mod msgs;
pub mod parse;

use crate::sink::CompilationUnit;

/// Extract + emit for an already validated type.
pub fn generate(t: &model::AnnotatedType, runtime: &syn::Path) -> CompilationUnit {
    let params = analyze::extract(t);
    let spec = emit::DispatcherSpec::new(t, params, runtime.clone());
    CompilationUnit {
        module_path: t.module_path.clone(),
        dispatcher: spec.dispatcher.clone(),
        header: emit::file_header(t),
        file: emit::emit(&spec),
    }
}
