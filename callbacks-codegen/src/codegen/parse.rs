use super::msgs::{ERR_ARG_UNKNOWN, ERR_GETTERS_ENTRY, ERR_GETTER_ARGS, ERR_GETTER_SHAPE};
use proc_macro2::{Span, TokenStream};
use syn::meta::ParseNestedMeta;
use syn::parse::Parser;
use syn::{Attribute, Ident, Item, LitInt, LitStr, Meta, Path};

// Marker recognition and argument parsing. Markers are matched by the last path
// segment so both `#[callback]` and `#[mmg_callbacks::callback]` are accepted.

pub const CALLBACK: &str = "callback";
pub const FIELD_GETTER: &str = "callback_field_getter";
pub const FIELD_GETTERS: &str = "callback_field_getters";

pub const DEFAULT_CONSTRUCTOR: usize = 1;
pub const DEFAULT_CANCEL_FIELD: &str = "cancelled";

#[inline]
pub fn attr_name(a: &Attribute) -> String {
    a.path()
        .segments
        .last()
        .map(|s| s.ident.to_string())
        .unwrap_or_default()
}

#[inline]
pub fn is_callback_attr(a: &Attribute) -> bool {
    attr_name(a) == CALLBACK
}

#[inline]
pub fn is_getter_attr(a: &Attribute) -> bool {
    let name = attr_name(a);
    name == FIELD_GETTER || name == FIELD_GETTERS
}

/// Arguments of `#[callback(...)]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallbackArgs {
    /// 1-based ordinal of the constructor whose parameters feed the listener.
    pub constructor: usize,
    /// Name of the cancellation flag. Carried as metadata only.
    pub cancel_field: String,
    /// Path of the runtime crate; falls back to the codegen config when absent.
    pub runtime_crate: Option<Path>,
}

impl Default for CallbackArgs {
    fn default() -> Self {
        Self {
            constructor: DEFAULT_CONSTRUCTOR,
            cancel_field: DEFAULT_CANCEL_FIELD.to_string(),
            runtime_crate: None,
        }
    }
}

pub fn parse_callback_args(tokens: TokenStream) -> syn::Result<CallbackArgs> {
    let mut args = CallbackArgs::default();
    if tokens.is_empty() {
        return Ok(args);
    }
    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("constructor") {
            let lit: LitInt = meta.value()?.parse()?;
            args.constructor = lit.base10_parse()?;
            Ok(())
        } else if meta.path.is_ident("cancel_field") {
            let lit: LitStr = meta.value()?.parse()?;
            args.cancel_field = lit.value();
            Ok(())
        } else if meta.path.is_ident("crate") {
            let lit: LitStr = meta.value()?.parse()?;
            args.runtime_crate = Some(lit.parse()?);
            Ok(())
        } else {
            Err(meta.error(ERR_ARG_UNKNOWN))
        }
    });
    parser.parse2(tokens)?;
    Ok(args)
}

pub fn callback_args_of(attr: &Attribute) -> syn::Result<CallbackArgs> {
    match &attr.meta {
        Meta::Path(_) => Ok(CallbackArgs::default()),
        Meta::List(list) => parse_callback_args(list.tokens.clone()),
        Meta::NameValue(nv) => Err(syn::Error::new_spanned(nv, ERR_ARG_UNKNOWN)),
    }
}

/// One `field -> getter` pairing.
#[derive(Clone, Debug)]
pub struct FieldGetter {
    pub field: String,
    /// Method name with the `()` suffix stripped.
    pub getter: Ident,
    /// The getter as written by the user, for diagnostics.
    pub written: String,
    /// Span of the `getter` literal.
    pub span: Span,
    /// Span of the `field` literal.
    pub field_span: Span,
}

fn getter_entry(
    meta: &ParseNestedMeta,
    field: &mut Option<LitStr>,
    getter: &mut Option<LitStr>,
) -> syn::Result<()> {
    if meta.path.is_ident("field") {
        *field = Some(meta.value()?.parse()?);
        Ok(())
    } else if meta.path.is_ident("getter") {
        *getter = Some(meta.value()?.parse()?);
        Ok(())
    } else {
        Err(meta.error(ERR_GETTER_ARGS))
    }
}

fn build_getter(field: Option<LitStr>, getter: Option<LitStr>, span: Span) -> syn::Result<FieldGetter> {
    let (Some(field), Some(getter)) = (field, getter) else {
        return Err(syn::Error::new(span, ERR_GETTER_ARGS));
    };
    let written = getter.value();
    let name = written.strip_suffix("()").unwrap_or(&written).trim();
    let ident = syn::parse_str::<Ident>(name)
        .map(|mut i| {
            i.set_span(getter.span());
            i
        })
        .map_err(|_| syn::Error::new(getter.span(), ERR_GETTER_SHAPE))?;
    Ok(FieldGetter {
        field: field.value(),
        getter: ident,
        written,
        span: getter.span(),
        field_span: field.span(),
    })
}

/// Parses the body of a single `#[callback_field_getter(field = "..", getter = "..")]`.
pub fn parse_field_getter(tokens: TokenStream, span: Span) -> syn::Result<FieldGetter> {
    let mut field = None;
    let mut getter = None;
    syn::meta::parser(|meta| getter_entry(&meta, &mut field, &mut getter)).parse2(tokens)?;
    build_getter(field, getter, span)
}

/// Parses the body of the `#[callback_field_getters(field_getter(..), ..)]` container.
pub fn parse_field_getters(tokens: TokenStream) -> syn::Result<Vec<FieldGetter>> {
    let mut out = Vec::new();
    syn::meta::parser(|meta| {
        if !meta.path.is_ident("field_getter") {
            return Err(meta.error(ERR_GETTERS_ENTRY));
        }
        let mut field = None;
        let mut getter = None;
        meta.parse_nested_meta(|inner| getter_entry(&inner, &mut field, &mut getter))?;
        let span = meta
            .path
            .get_ident()
            .map(Ident::span)
            .unwrap_or_else(Span::call_site);
        out.push(build_getter(field, getter, span)?);
        Ok(())
    })
    .parse2(tokens)?;
    Ok(out)
}

/// Reads every mapping carried by a single getter-style attribute.
pub fn field_getters_of(attr: &Attribute) -> syn::Result<Vec<FieldGetter>> {
    let Meta::List(list) = &attr.meta else {
        return Err(syn::Error::new_spanned(attr, ERR_GETTER_ARGS));
    };
    if attr_name(attr) == FIELD_GETTERS {
        parse_field_getters(list.tokens.clone())
    } else {
        let span = list.delimiter.span().join();
        Ok(vec![parse_field_getter(list.tokens.clone(), span)?])
    }
}

/// Marker attributes lifted off an item.
#[derive(Default)]
pub struct Markers {
    pub callback: Option<Attribute>,
    pub getters: Vec<Attribute>,
}

impl Markers {
    pub fn is_empty(&self) -> bool {
        self.callback.is_none() && self.getters.is_empty()
    }
}

/// Removes the marker attributes from `attrs`, keeping every other attribute in place.
pub fn take_markers(attrs: &mut Vec<Attribute>) -> Markers {
    let mut markers = Markers::default();
    attrs.retain(|a| {
        if is_callback_attr(a) {
            if markers.callback.is_none() {
                markers.callback = Some(a.clone());
            }
            false
        } else if is_getter_attr(a) {
            markers.getters.push(a.clone());
            false
        } else {
            true
        }
    });
    markers
}

pub fn item_attrs_mut(item: &mut Item) -> Option<&mut Vec<Attribute>> {
    match item {
        Item::Struct(i) => Some(&mut i.attrs),
        Item::Impl(i) => Some(&mut i.attrs),
        Item::Trait(i) => Some(&mut i.attrs),
        Item::Enum(i) => Some(&mut i.attrs),
        Item::Union(i) => Some(&mut i.attrs),
        Item::Fn(i) => Some(&mut i.attrs),
        Item::Type(i) => Some(&mut i.attrs),
        Item::Const(i) => Some(&mut i.attrs),
        Item::Static(i) => Some(&mut i.attrs),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    #[test]
    fn callback_args_default_when_empty() {
        let args = parse_callback_args(TokenStream::new()).unwrap();
        assert_eq!(args, CallbackArgs::default());
        assert_eq!(args.constructor, 1);
        assert_eq!(args.cancel_field, "cancelled");
    }

    #[test]
    fn callback_args_all_keys() {
        let args = parse_callback_args(quote! {
            constructor = 2, cancel_field = "aborted", crate = "::my_rt"
        })
        .unwrap();
        assert_eq!(args.constructor, 2);
        assert_eq!(args.cancel_field, "aborted");
        let rt = args.runtime_crate.unwrap();
        assert_eq!(quote!(#rt).to_string(), quote!(::my_rt).to_string());
    }

    #[test]
    fn callback_args_reject_unknown_key() {
        let err = parse_callback_args(quote! { ctor = 2 }).unwrap_err();
        assert!(err.to_string().contains("unsupported #[callback] argument"));
    }

    #[test]
    fn single_getter_strips_call_suffix() {
        let g = parse_field_getter(quote! { field = "count", getter = "get_count()" }, Span::call_site())
            .unwrap();
        assert_eq!(g.field, "count");
        assert_eq!(g.getter, "get_count");
        assert_eq!(g.written, "get_count()");
    }

    #[test]
    fn getter_without_parens_is_a_method_name() {
        let g = parse_field_getter(quote! { getter = "count", field = "n" }, Span::call_site()).unwrap();
        assert_eq!(g.getter, "count");
        assert_eq!(g.field, "n");
    }

    #[test]
    fn getter_must_be_an_identifier() {
        let err = parse_field_getter(quote! { field = "n", getter = "a.b()" }, Span::call_site())
            .unwrap_err();
        assert!(err.to_string().contains("getter must name a method"));
    }

    #[test]
    fn getter_requires_both_keys() {
        assert!(parse_field_getter(quote! { field = "n" }, Span::call_site()).is_err());
    }

    #[test]
    fn container_collects_entries_in_order() {
        let gs = parse_field_getters(quote! {
            field_getter(field = "a", getter = "get_a()"),
            field_getter(field = "b", getter = "get_b()")
        })
        .unwrap();
        let fields: Vec<_> = gs.iter().map(|g| g.field.as_str()).collect();
        assert_eq!(fields, ["a", "b"]);
    }

    #[test]
    fn take_markers_keeps_other_attributes() {
        let mut item: syn::ItemStruct = syn::parse_quote! {
            #[derive(Clone)]
            #[mmg_callbacks::callback(constructor = 1)]
            #[callback_field_getter(field = "a", getter = "a()")]
            #[doc = "x"]
            struct S { a: u8 }
        };
        let markers = take_markers(&mut item.attrs);
        assert!(markers.callback.is_some());
        assert_eq!(markers.getters.len(), 1);
        assert_eq!(item.attrs.len(), 2);
    }
}
