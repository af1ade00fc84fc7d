use super::model::{AnnotatedType, Param};
use syn::{Ident, Member, Type};

/// How a listener argument is read back from an instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Accessor {
    /// Record accessor: plain field projection.
    Record(Member),
    /// Explicit `#[callback_field_getter]` mapping: a method call.
    Getter(Ident),
    /// No mapping: assume a visible field of the same name.
    Field(Member),
}

impl Accessor {
    pub fn expr(&self, receiver: &Ident) -> syn::Expr {
        match self {
            Accessor::Record(m) | Accessor::Field(m) => syn::parse_quote!(#receiver.#m),
            Accessor::Getter(g) => syn::parse_quote!(#receiver.#g()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ResolvedParam {
    pub binding: Ident,
    pub ty: Type,
    pub accessor: Accessor,
}

/// Parameters of the selected constructor. An ordinal past the declared
/// constructors selects nothing.
pub fn select_constructor(t: &AnnotatedType) -> &[Param] {
    t.args
        .constructor
        .checked_sub(1)
        .and_then(|idx| t.constructors.get(idx))
        .map(|c| c.params.as_slice())
        .unwrap_or(&[])
}

pub fn resolve_accessor(t: &AnnotatedType, param: &Param) -> Accessor {
    if t.is_record() {
        return Accessor::Record(param.member.clone());
    }
    let name = param.name();
    match t.getters.iter().find(|g| g.field == name) {
        Some(g) => Accessor::Getter(g.getter.clone()),
        None => Accessor::Field(param.member.clone()),
    }
}

/// Listener arguments cross a thread boundary, so borrowed constructor
/// parameters are delivered as their owned form.
pub fn listener_type(ty: &Type) -> Type {
    match ty {
        Type::Reference(r) => {
            let elem = &r.elem;
            syn::parse_quote!(<#elem as ::std::borrow::ToOwned>::Owned)
        }
        _ => ty.clone(),
    }
}

pub fn extract(t: &AnnotatedType) -> Vec<ResolvedParam> {
    let params = select_constructor(t);
    tracing::trace!(
        source = %t.qualified_name(),
        constructor = t.args.constructor,
        params = params.len(),
        "extracting callback parameters"
    );
    params
        .iter()
        .map(|p| ResolvedParam {
            binding: p.binding(),
            ty: listener_type(&p.ty),
            accessor: resolve_accessor(t, p),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::parse::{parse_field_getter, CallbackArgs};
    use proc_macro2::Span;
    use quote::quote;
    use syn::{parse_quote, ItemImpl, ItemStruct};

    fn describe(p: &ResolvedParam) -> String {
        let expr = p.accessor.expr(&quote::format_ident!("callback"));
        quote!(#expr).to_string()
    }

    fn class(item: ItemImpl, args: CallbackArgs, getters: Vec<&str>) -> AnnotatedType {
        let getters = getters
            .into_iter()
            .map(|g| parse_field_getter(g.parse().unwrap(), Span::call_site()).unwrap())
            .collect();
        AnnotatedType::from_impl(&item, quote::format_ident!("Counter"), vec![], args, getters)
            .unwrap()
    }

    fn counter_impl() -> ItemImpl {
        parse_quote! {
            impl Counter {
                pub fn new(count: u32) -> Self { Self { count, label: String::new() } }
                pub fn labelled(label: String, count: u32) -> Self { Self { count, label } }
                pub fn get_count(&self) -> u32 { self.count }
            }
        }
    }

    #[test]
    fn record_params_use_field_projection_in_order() {
        let item: ItemStruct = parse_quote! { struct Moved { a: i32, b: String } };
        let t = AnnotatedType::from_struct(&item, vec![], CallbackArgs::default(), vec![]);
        let ps = extract(&t);
        let described: Vec<_> = ps.iter().map(describe).collect();
        assert_eq!(described, ["callback . a", "callback . b"]);
        let tys: Vec<_> = ps.iter().map(|p| { let ty = &p.ty; quote!(#ty).to_string() }).collect();
        assert_eq!(tys, ["i32", "String"]);
    }

    #[test]
    fn explicit_getter_wins_over_field() {
        let t = class(
            counter_impl(),
            CallbackArgs::default(),
            vec![r#"field = "count", getter = "get_count()""#],
        );
        let ps = extract(&t);
        assert_eq!(ps.len(), 1);
        assert_eq!(ps[0].accessor, Accessor::Getter(quote::format_ident!("get_count")));
        assert_eq!(describe(&ps[0]), "callback . get_count ()");
    }

    #[test]
    fn unmapped_parameter_falls_back_to_field() {
        let t = class(counter_impl(), CallbackArgs::default(), vec![]);
        assert_eq!(describe(&extract(&t)[0]), "callback . count");
    }

    #[test]
    fn second_constructor_is_selected_by_ordinal() {
        let args = CallbackArgs {
            constructor: 2,
            ..CallbackArgs::default()
        };
        let t = class(counter_impl(), args, vec![]);
        let names: Vec<_> = extract(&t).iter().map(|p| p.binding.to_string()).collect();
        assert_eq!(names, ["label", "count"]);
    }

    #[test]
    fn missing_ordinal_yields_no_parameters() {
        for ordinal in [0, 3, 99] {
            let args = CallbackArgs {
                constructor: ordinal,
                ..CallbackArgs::default()
            };
            let t = class(counter_impl(), args, vec![]);
            assert!(extract(&t).is_empty(), "ordinal {ordinal}");
        }
    }

    #[test]
    fn borrowed_parameters_are_delivered_owned() {
        let item: ItemImpl = parse_quote! {
            impl Counter {
                pub fn named(name: &str, count: u32) -> Self { todo!() }
            }
        };
        let t = class(item, CallbackArgs::default(), vec![]);
        let tys: Vec<_> = extract(&t).iter().map(|p| { let ty = &p.ty; quote!(#ty).to_string() }).collect();
        assert_eq!(tys, ["< str as :: std :: borrow :: ToOwned > :: Owned", "u32"]);
    }

    #[test]
    fn records_ignore_getter_mappings() {
        let item: ItemStruct = parse_quote! { struct R { a: u8 } };
        let g = parse_field_getter(
            quote!(field = "a", getter = "other()"),
            Span::call_site(),
        )
        .unwrap();
        let t = AnnotatedType::from_struct(&item, vec![], CallbackArgs::default(), vec![g]);
        assert_eq!(describe(&extract(&t)[0]), "callback . a");
    }
}
