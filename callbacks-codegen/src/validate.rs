//! Marker placement and reference checks, run before anything is emitted.

use crate::codegen::model::{declared_constructors, record_params, AnnotatedType, Param};
use crate::codegen::msgs::{
    err_field_missing, err_getter_missing, ERR_CALLBACK_ABSTRACT, ERR_CALLBACK_LIFETIMES,
    ERR_CALLBACK_SELF_TY, ERR_CALLBACK_TARGET, ERR_CALLBACK_TRAIT_IMPL, ERR_GETTER_TARGET,
};
use crate::codegen::parse::{
    callback_args_of, field_getters_of, item_attrs_mut, parse_callback_args, take_markers,
    CallbackArgs, FieldGetter,
};
use proc_macro2::TokenStream;
use syn::{Attribute, Generics, Ident, Item, ItemImpl, Type};

/// An item carrying at least one marker, with the markers lifted off.
#[derive(Clone)]
pub struct Candidate {
    pub module_path: Vec<String>,
    pub item: Item,
    pub callback: Option<syn::Result<CallbackArgs>>,
    pub getters: Vec<Attribute>,
}

impl Candidate {
    /// Lifts the markers off `item`; `None` when it carries none.
    pub fn from_item(module_path: Vec<String>, mut item: Item) -> Option<Self> {
        let markers = take_markers(item_attrs_mut(&mut item)?);
        if markers.is_empty() {
            return None;
        }
        Some(Self {
            module_path,
            item,
            callback: markers.callback.as_ref().map(callback_args_of),
            getters: markers.getters,
        })
    }

    /// Attribute-macro entry: the `#[callback]` attribute itself has already been
    /// consumed by the compiler, only its arguments remain.
    pub fn with_callback(module_path: Vec<String>, mut item: Item, args: TokenStream) -> Self {
        let getters = item_attrs_mut(&mut item)
            .map(|attrs| take_markers(attrs).getters)
            .unwrap_or_default();
        Self {
            module_path,
            item,
            callback: Some(parse_callback_args(args)),
            getters,
        }
    }

    /// Attribute-macro entry for a standalone getter marker.
    pub fn with_getters(module_path: Vec<String>, mut item: Item, mut getters: Vec<Attribute>) -> Self {
        if let Some(attrs) = item_attrs_mut(&mut item) {
            getters.extend(take_markers(attrs).getters);
        }
        Self {
            module_path,
            item,
            callback: None,
            getters,
        }
    }
}

fn impl_self_ident(item: &ItemImpl) -> syn::Result<Ident> {
    match &*item.self_ty {
        Type::Path(tp) if tp.qself.is_none() => tp
            .path
            .segments
            .last()
            .map(|s| s.ident.clone())
            .ok_or_else(|| syn::Error::new_spanned(&item.self_ty, ERR_CALLBACK_SELF_TY)),
        Type::TraitObject(_) => Err(syn::Error::new_spanned(&item.self_ty, ERR_CALLBACK_ABSTRACT)),
        other => Err(syn::Error::new_spanned(other, ERR_CALLBACK_SELF_TY)),
    }
}

fn reject_lifetimes(generics: &Generics) -> syn::Result<()> {
    match generics.lifetimes().next() {
        Some(lt) => Err(syn::Error::new_spanned(lt, ERR_CALLBACK_LIFETIMES)),
        None => Ok(()),
    }
}

/// Checks every getter marker on the candidate and returns the parsed mappings.
///
/// The getter (with `()` stripped) must name a declared member and the field must
/// name a record field or a parameter of one of the declared constructors.
pub fn check_field_getters(c: &Candidate) -> syn::Result<Vec<FieldGetter>> {
    if c.getters.is_empty() {
        return Ok(Vec::new());
    }
    let (members, fields): (Vec<String>, Vec<String>) = match &c.item {
        Item::Struct(s) => {
            let fields: Vec<_> = record_params(&s.fields).iter().map(Param::name).collect();
            (fields.clone(), fields)
        }
        Item::Impl(i) if i.trait_.is_none() && !matches!(&*i.self_ty, Type::TraitObject(_)) => {
            let ident = impl_self_ident(i)?;
            let members = i
                .items
                .iter()
                .filter_map(|it| match it {
                    syn::ImplItem::Fn(f) => Some(f.sig.ident.to_string()),
                    _ => None,
                })
                .collect();
            let fields = declared_constructors(i, &ident)?
                .iter()
                .flat_map(|ctor| ctor.params.iter().map(Param::name))
                .collect();
            (members, fields)
        }
        _ => {
            let first = &c.getters[0];
            return Err(syn::Error::new_spanned(first, ERR_GETTER_TARGET));
        }
    };

    let mut out = Vec::new();
    for attr in &c.getters {
        for g in field_getters_of(attr)? {
            if !members.iter().any(|m| g.getter == m.as_str()) {
                return Err(syn::Error::new(g.span, err_getter_missing(&g.written)));
            }
            if !fields.iter().any(|f| *f == g.field) {
                return Err(syn::Error::new(g.field_span, err_field_missing(&g.field)));
            }
            out.push(g);
        }
    }
    Ok(out)
}

/// Checks `#[callback]` placement and builds the typed view of the target.
pub fn check_callback(c: &Candidate, getters: Vec<FieldGetter>) -> syn::Result<AnnotatedType> {
    let args = match &c.callback {
        Some(Ok(args)) => args.clone(),
        Some(Err(e)) => return Err(e.clone()),
        None => return Err(syn::Error::new_spanned(&c.item, ERR_CALLBACK_TARGET)),
    };
    match &c.item {
        Item::Struct(s) => {
            reject_lifetimes(&s.generics)?;
            Ok(AnnotatedType::from_struct(s, c.module_path.clone(), args, getters))
        }
        Item::Impl(i) => {
            if let Some((_, path, _)) = &i.trait_ {
                return Err(syn::Error::new_spanned(path, ERR_CALLBACK_TRAIT_IMPL));
            }
            let ident = impl_self_ident(i)?;
            reject_lifetimes(&i.generics)?;
            AnnotatedType::from_impl(i, ident, c.module_path.clone(), args, getters)
        }
        Item::Trait(t) => Err(syn::Error::new_spanned(&t.ident, ERR_CALLBACK_ABSTRACT)),
        other => Err(syn::Error::new_spanned(other, ERR_CALLBACK_TARGET)),
    }
}
