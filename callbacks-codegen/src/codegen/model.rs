//! Typed view of a callback-enabled type, built from its parsed item.
//!
//! This is the metadata the extractor queries by name: declared constructors
//! and the marker arguments. Nothing here is mutated after
//! construction.

use super::msgs::{ERR_CTOR_IMPL_TRAIT, ERR_CTOR_PATTERN};
use super::parse::{CallbackArgs, FieldGetter};
use quote::format_ident;
use syn::{
    Fields, FnArg, Generics, Ident, ImplItem, ItemImpl, ItemStruct, Member, Pat, Type, Visibility,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeKind {
    /// `#[callback]` on a struct: one canonical constructor made of its fields.
    Record,
    /// `#[callback]` on an inherent impl: constructors are the associated
    /// functions returning `Self`.
    Class,
}

#[derive(Clone, Debug)]
pub struct Param {
    pub member: Member,
    pub ty: Type,
}

impl Param {
    pub fn name(&self) -> String {
        match &self.member {
            Member::Named(i) => i.to_string(),
            Member::Unnamed(idx) => idx.index.to_string(),
        }
    }

    /// Identifier used for the listener argument and its local binding.
    pub fn binding(&self) -> Ident {
        match &self.member {
            Member::Named(i) => i.clone(),
            Member::Unnamed(idx) => format_ident!("field_{}", idx.index),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Constructor {
    /// `None` for the canonical record constructor.
    pub ident: Option<Ident>,
    pub vis: Visibility,
    pub params: Vec<Param>,
}

#[derive(Clone, Debug)]
pub struct AnnotatedType {
    pub ident: Ident,
    pub module_path: Vec<String>,
    pub object_ty: Type,
    /// Visibility given to the generated items: the struct's own for records,
    /// the selected constructor's for impl blocks.
    pub vis: Visibility,
    pub generics: Generics,
    pub kind: TypeKind,
    pub constructors: Vec<Constructor>,
    pub getters: Vec<FieldGetter>,
    pub args: CallbackArgs,
}

impl AnnotatedType {
    pub fn qualified_name(&self) -> String {
        let mut parts = self.module_path.clone();
        parts.push(self.ident.to_string());
        parts.join("::")
    }

    pub fn is_record(&self) -> bool {
        self.kind == TypeKind::Record
    }

    pub fn from_struct(
        item: &ItemStruct,
        module_path: Vec<String>,
        args: CallbackArgs,
        getters: Vec<FieldGetter>,
    ) -> Self {
        let ident = item.ident.clone();
        let (_, ty_generics, _) = item.generics.split_for_impl();
        let object_ty: Type = syn::parse_quote!(#ident #ty_generics);
        let params = record_params(&item.fields);
        Self {
            ident,
            module_path,
            object_ty,
            vis: item.vis.clone(),
            generics: item.generics.clone(),
            kind: TypeKind::Record,
            constructors: vec![Constructor {
                ident: None,
                vis: item.vis.clone(),
                params,
            }],
            getters,
            args,
        }
    }

    /// `ident` is the last segment of the impl's self type.
    pub fn from_impl(
        item: &ItemImpl,
        ident: Ident,
        module_path: Vec<String>,
        args: CallbackArgs,
        getters: Vec<FieldGetter>,
    ) -> syn::Result<Self> {
        let constructors = declared_constructors(item, &ident)?;
        // no selected constructor: keep the dispatcher crate-visible
        let vis = args
            .constructor
            .checked_sub(1)
            .and_then(|idx| constructors.get(idx))
            .map(|c| c.vis.clone())
            .unwrap_or_else(|| syn::parse_quote!(pub(crate)));
        Ok(Self {
            ident,
            module_path,
            object_ty: (*item.self_ty).clone(),
            vis,
            generics: item.generics.clone(),
            kind: TypeKind::Class,
            constructors,
            getters,
            args,
        })
    }
}

pub fn record_params(fields: &Fields) -> Vec<Param> {
    fields
        .iter()
        .enumerate()
        .map(|(idx, f)| Param {
            member: match &f.ident {
                Some(i) => Member::Named(i.clone()),
                None => Member::Unnamed(idx.into()),
            },
            ty: f.ty.clone(),
        })
        .collect()
}

fn returns_self(sig: &syn::Signature, ident: &Ident) -> bool {
    let syn::ReturnType::Type(_, ty) = &sig.output else {
        return false;
    };
    match &**ty {
        Type::Path(tp) if tp.qself.is_none() => tp
            .path
            .segments
            .last()
            .is_some_and(|s| s.ident == "Self" || s.ident == *ident),
        _ => false,
    }
}

/// Associated functions without a receiver returning `Self`, in declaration order.
pub fn declared_constructors(item: &ItemImpl, ident: &Ident) -> syn::Result<Vec<Constructor>> {
    let mut out = Vec::new();
    for it in &item.items {
        let ImplItem::Fn(f) = it else { continue };
        if f.sig.receiver().is_some() || !returns_self(&f.sig, ident) {
            continue;
        }
        let mut params = Vec::new();
        for arg in &f.sig.inputs {
            let FnArg::Typed(pt) = arg else { continue };
            let Pat::Ident(pi) = &*pt.pat else {
                return Err(syn::Error::new_spanned(&pt.pat, ERR_CTOR_PATTERN));
            };
            if matches!(&*pt.ty, Type::ImplTrait(_)) {
                return Err(syn::Error::new_spanned(&pt.ty, ERR_CTOR_IMPL_TRAIT));
            }
            params.push(Param {
                member: Member::Named(pi.ident.clone()),
                ty: (*pt.ty).clone(),
            });
        }
        out.push(Constructor {
            ident: Some(f.sig.ident.clone()),
            vis: f.vis.clone(),
            params,
        });
    }
    Ok(out)
}
