//! Attribute macros for mmg-callbacks.
//!
//! * `#[callback]` on a struct (record form) or an inherent impl block (class
//!   form) appends a `<Name>Callback` dispatcher plus the `<Name>CallbackListener`
//!   and `<Name>CallbackHandler` traits next to the annotated item.
//! * `#[callback_field_getter(field = "..", getter = "..()")]` and the container
//!   `#[callback_field_getters(field_getter(..), ..)]` map a constructor parameter
//!   to the method that reads it back.
//!
//! ```ignore
//! pub struct Counter { count: u32 }
//!
//! #[mmg_callbacks::callback]
//! #[mmg_callbacks::callback_field_getter(field = "count", getter = "count()")]
//! impl Counter {
//!     pub fn new(count: u32) -> Self { Self { count } }
//!     pub fn count(&self) -> u32 { self.count }
//! }
//!
//! CounterCallback::instance().register_listener("log", |count: u32| println!("{count}"));
//! CounterCallback::instance().invoke(&Counter::new(3));
//! ```

use callbacks_codegen::codegen::parse::{is_callback_attr, item_attrs_mut};
use callbacks_codegen::{Candidate, CodegenConfig, Round, TokenSink};
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Attribute, Item};

#[proc_macro_attribute]
pub fn callback(args: TokenStream, input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as Item);
    let candidate = Candidate::with_callback(Vec::new(), item, args.into());
    expand(candidate)
}

#[proc_macro_attribute]
pub fn callback_field_getter(args: TokenStream, input: TokenStream) -> TokenStream {
    let args = proc_macro2::TokenStream::from(args);
    getter_marker(syn::parse_quote!(#[callback_field_getter(#args)]), input)
}

#[proc_macro_attribute]
pub fn callback_field_getters(args: TokenStream, input: TokenStream) -> TokenStream {
    let args = proc_macro2::TokenStream::from(args);
    getter_marker(syn::parse_quote!(#[callback_field_getters(#args)]), input)
}

// A getter marker written above #[callback] expands first. Move it behind the
// callback attribute so the callback expansion sees every mapping; on its own it
// only validates.
fn getter_marker(marker: Attribute, input: TokenStream) -> TokenStream {
    let mut item = parse_macro_input!(input as Item);
    let has_callback = item_attrs_mut(&mut item).is_some_and(|attrs| attrs.iter().any(is_callback_attr));
    if has_callback {
        if let Some(attrs) = item_attrs_mut(&mut item) {
            attrs.push(marker);
        }
        return quote!(#item).into();
    }
    expand(Candidate::with_getters(Vec::new(), item, vec![marker]))
}

fn expand(candidate: Candidate) -> TokenStream {
    let config = CodegenConfig::default();
    let mut round = Round::new(&config, TokenSink::default());
    let result = round.run(std::slice::from_ref(&candidate));
    let item = &candidate.item;
    match result {
        Ok(_) if CodegenConfig::external() => quote!(#item).into(),
        Ok(_) => {
            let generated = round.into_sink().into_tokens();
            quote! { #item #generated }.into()
        }
        Err(e) => {
            let err = e.to_compile_error();
            quote! { #item #err }.into()
        }
    }
}
