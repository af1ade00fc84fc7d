//! Dispatcher emission.
//!
//! `DispatcherSpec` describes what to emit; `emit` turns it into a typed
//! `syn::File`. Printing is left to the sink (tokens for the macro path,
//! `prettyplease` for generated files).

use super::analyze::ResolvedParam;
use super::model::AnnotatedType;
use quote::format_ident;
use syn::{parse_quote, Generics, Ident, Item, Path, Type, Visibility};

pub const CALLBACK_SUFFIX: &str = "Callback";
pub const LISTENER_SUFFIX: &str = "CallbackListener";
pub const HANDLER_SUFFIX: &str = "CallbackHandler";

pub struct DispatcherSpec {
    pub source: Ident,
    pub dispatcher: Ident,
    pub listener: Ident,
    pub handler: Ident,
    pub object_ty: Type,
    pub generics: Generics,
    pub params: Vec<ResolvedParam>,
    pub cancel_field: String,
    pub runtime: Path,
    pub vis: Visibility,
}

impl DispatcherSpec {
    pub fn new(t: &AnnotatedType, params: Vec<ResolvedParam>, runtime: Path) -> Self {
        Self {
            source: t.ident.clone(),
            dispatcher: format_ident!("{}{}", t.ident, CALLBACK_SUFFIX),
            listener: format_ident!("{}{}", t.ident, LISTENER_SUFFIX),
            handler: format_ident!("{}{}", t.ident, HANDLER_SUFFIX),
            object_ty: t.object_ty.clone(),
            generics: t.generics.clone(),
            params,
            cancel_field: t.args.cancel_field.clone(),
            runtime: t.args.runtime_crate.clone().unwrap_or(runtime),
            vis: t.vis.clone(),
        }
    }

    fn type_params(&self) -> Vec<Ident> {
        self.generics.type_params().map(|t| t.ident.clone()).collect()
    }

    fn is_generic(&self) -> bool {
        self.generics.type_params().next().is_some()
    }

    /// Generics of the dispatcher impl: the source generics plus the bounds a
    /// process-wide singleton needs. Listener arguments are cloned out of the
    /// instance, hence `Clone`.
    fn dispatch_generics(&self) -> Generics {
        let mut g = self.generics.clone();
        let params = self.type_params();
        if !params.is_empty() {
            let wc = g.make_where_clause();
            for t in params {
                wc.predicates.push(parse_quote! {
                    #t: ::core::clone::Clone + ::core::marker::Send + ::core::marker::Sync + 'static
                });
            }
        }
        g
    }

    /// One `TypeToken<T>` witness per type parameter, as `(name, type)` pairs.
    fn witnesses(&self) -> Vec<(Ident, Type)> {
        let rt = &self.runtime;
        self.type_params()
            .into_iter()
            .map(|t| {
                let name = format_ident!("_{}", t.to_string().to_lowercase());
                let ty: Type = parse_quote!(#rt::TypeToken<#t>);
                (name, ty)
            })
            .collect()
    }
}

fn listener_trait(spec: &DispatcherSpec) -> Vec<Item> {
    let DispatcherSpec {
        listener,
        source,
        generics,
        params,
        vis,
        ..
    } = spec;
    let (_, ty_generics, where_clause) = generics.split_for_impl();
    let names: Vec<_> = params.iter().map(|p| &p.binding).collect();
    let tys: Vec<_> = params.iter().map(|p| &p.ty).collect();
    let doc = format!(
        "Fire-and-forget listener for [`{source}`], triggered with its constructor values."
    );

    let mut blanket = generics.clone();
    blanket.params.push(parse_quote!(__F));
    blanket.make_where_clause().predicates.push(parse_quote! {
        __F: ::core::ops::Fn(#(#tys),*) + ::core::marker::Send + ::core::marker::Sync + 'static
    });
    let (blanket_impl, _, blanket_where) = blanket.split_for_impl();

    vec![
        parse_quote! {
            #[doc = #doc]
            #vis trait #listener #generics: ::core::marker::Send + ::core::marker::Sync + 'static #where_clause {
                fn trigger(&self, #(#names: #tys),*);
            }
        },
        parse_quote! {
            impl #blanket_impl #listener #ty_generics for __F #blanket_where {
                fn trigger(&self, #(#names: #tys),*) {
                    (self)(#(#names),*)
                }
            }
        },
    ]
}

fn handler_trait(spec: &DispatcherSpec) -> Vec<Item> {
    let DispatcherSpec {
        handler,
        source,
        generics,
        object_ty,
        vis,
        ..
    } = spec;
    let (_, ty_generics, where_clause) = generics.split_for_impl();
    let doc = format!("Synchronous handler receiving the whole [`{source}`] instance.");

    let mut blanket = generics.clone();
    blanket.params.push(parse_quote!(__F));
    blanket.make_where_clause().predicates.push(parse_quote! {
        __F: ::core::ops::Fn(&#object_ty) + ::core::marker::Send + ::core::marker::Sync + 'static
    });
    let (blanket_impl, _, blanket_where) = blanket.split_for_impl();

    vec![
        parse_quote! {
            #[doc = #doc]
            #vis trait #handler #generics: ::core::marker::Send + ::core::marker::Sync + 'static #where_clause {
                fn handle(&self, callback: &#object_ty);
            }
        },
        parse_quote! {
            impl #blanket_impl #handler #ty_generics for __F #blanket_where {
                fn handle(&self, callback: &#object_ty) {
                    (self)(callback)
                }
            }
        },
    ]
}

fn dispatcher_struct(spec: &DispatcherSpec) -> Item {
    let DispatcherSpec {
        dispatcher,
        listener,
        handler,
        source,
        generics,
        runtime: rt,
        vis,
        ..
    } = spec;
    let (_, ty_generics, where_clause) = generics.split_for_impl();
    let doc = format!("Generated callback dispatcher for [`{source}`].");
    parse_quote! {
        #[doc = #doc]
        #vis struct #dispatcher #generics #where_clause {
            callback_handlers: #rt::Slots<dyn #handler #ty_generics>,
            callback_listeners: #rt::Slots<dyn #listener #ty_generics>,
        }
    }
}

fn dispatcher_impl(spec: &DispatcherSpec) -> Item {
    let DispatcherSpec {
        dispatcher,
        listener,
        handler,
        object_ty,
        params,
        cancel_field,
        runtime: rt,
        ..
    } = spec;
    let dispatch_generics = spec.dispatch_generics();
    let (impl_generics, _, where_clause) = dispatch_generics.split_for_impl();
    let (_, ty_generics, _) = spec.generics.split_for_impl();
    let (witness_names, witness_tys): (Vec<_>, Vec<_>) = spec.witnesses().into_iter().unzip();
    let dispatcher_name = dispatcher.to_string();

    let receiver = format_ident!("callback");
    let bindings: Vec<_> = params.iter().map(|p| format_ident!("__{}", p.binding)).collect();
    let accessors: Vec<_> = params.iter().map(|p| p.accessor.expr(&receiver)).collect();

    parse_quote! {
        impl #impl_generics #dispatcher #ty_generics #where_clause {
            /// Name of the cancellation flag declared on the source type.
            pub const CANCEL_FIELD: &'static str = #cancel_field;

            fn new() -> Self {
                Self {
                    callback_handlers: #rt::Slots::new(#dispatcher_name, "handler"),
                    callback_listeners: #rt::Slots::new(#dispatcher_name, "listener"),
                }
            }

            /// Process-wide dispatcher instance, created on first use.
            pub fn instance() -> &'static Self {
                #rt::registry::instance::<Self>(Self::new)
            }

            pub fn register_handler<__K, __H>(
                &self,
                key: __K,
                callback_handler: __H,
                #(#witness_names: #witness_tys),*
            ) where
                __K: #rt::CallbackKey,
                __H: #handler #ty_generics,
            {
                self.callback_handlers
                    .insert(key.to_key(), ::std::sync::Arc::new(callback_handler));
            }

            pub fn unregister_handlers<__I>(&self, keys: __I)
            where
                __I: ::core::iter::IntoIterator,
                __I::Item: #rt::CallbackKey,
            {
                self.callback_handlers.remove_all(keys);
            }

            pub fn register_listener<__K, __L>(
                &self,
                key: __K,
                callback_listener: __L,
                #(#witness_names: #witness_tys),*
            ) where
                __K: #rt::CallbackKey,
                __L: #listener #ty_generics,
            {
                self.callback_listeners
                    .insert(key.to_key(), ::std::sync::Arc::new(callback_listener));
            }

            pub fn unregister_listeners<__I>(&self, keys: __I)
            where
                __I: ::core::iter::IntoIterator,
                __I::Item: #rt::CallbackKey,
            {
                self.callback_listeners.remove_all(keys);
            }

            /// Runs every handler in place, schedules every listener, then hands
            /// the instance to `result`.
            pub fn invoke_with_result<__R>(&self, callback: &#object_ty, result: ::core::option::Option<__R>)
            where
                __R: ::core::ops::FnOnce(&#object_ty),
            {
                for handler in self.callback_handlers.snapshot() {
                    handler.handle(callback);
                }
                for listener in self.callback_listeners.snapshot() {
                    #( let #bindings = #accessors.to_owned(); )*
                    #rt::task::spawn_listener(move || listener.trigger(#(#bindings),*));
                }
                if let ::core::option::Option::Some(result) = result {
                    result(callback);
                }
            }

            pub fn invoke(&self, callback: &#object_ty) {
                self.invoke_with_result(callback, ::core::option::Option::None::<fn(&#object_ty)>);
            }

            #[deprecated(note = "use `invoke_with_result`")]
            pub fn handle_with_result<__R>(&self, callback: &#object_ty, result: ::core::option::Option<__R>)
            where
                __R: ::core::ops::FnOnce(&#object_ty),
            {
                self.invoke_with_result(callback, result);
            }

            #[deprecated(note = "use `invoke`")]
            pub fn handle(&self, callback: &#object_ty) {
                self.invoke(callback);
            }
        }
    }
}

fn declaration(spec: &DispatcherSpec) -> Item {
    let DispatcherSpec {
        source,
        dispatcher,
        cancel_field,
        runtime: rt,
        ..
    } = spec;
    let source_name = source.to_string();
    let dispatcher_name = dispatcher.to_string();
    let generic = spec.is_generic();
    parse_quote! {
        #[doc(hidden)]
        const _: () = {
            #rt::__private::inventory::submit! {
                #rt::registry::Declaration {
                    source_type: ::core::concat!(::core::module_path!(), "::", #source_name),
                    dispatcher: #dispatcher_name,
                    cancel_field: #cancel_field,
                    generic: #generic,
                }
            }
        };
    }
}

/// Builds the complete compilation unit for one dispatcher.
pub fn emit(spec: &DispatcherSpec) -> syn::File {
    let mut items = vec![dispatcher_struct(spec), dispatcher_impl(spec)];
    items.extend(handler_trait(spec));
    items.extend(listener_trait(spec));
    items.push(declaration(spec));
    syn::File {
        shebang: None,
        attrs: Vec::new(),
        items,
    }
}

/// Header prepended to generated files.
pub fn file_header(t: &AnnotatedType) -> String {
    format!(
        "// @generated by callbacks-codegen from `{}`; do not edit.\n\n",
        t.qualified_name()
    )
}
