// Centralized diagnostic strings for the callback codegen layer.
// Messages that embed a name are built with `format!` at the call site.

pub(crate) const ERR_CALLBACK_TARGET: &str =
    "#[callback] must be used on a struct or an inherent impl block";
pub(crate) const ERR_CALLBACK_ABSTRACT: &str =
    "#[callback] cannot be used on abstract types (traits or `impl dyn Trait`)";
pub(crate) const ERR_CALLBACK_TRAIT_IMPL: &str =
    "#[callback] cannot be used on a trait impl; annotate the inherent impl instead";
pub(crate) const ERR_CALLBACK_LIFETIMES: &str =
    "#[callback] types cannot declare lifetime parameters; dispatchers live for the whole process";
pub(crate) const ERR_CALLBACK_SELF_TY: &str =
    "#[callback] impl block must be for a named type path";

pub(crate) const ERR_GETTER_TARGET: &str =
    "#[callback_field_getter] cannot be used outside structs or inherent impl blocks";
pub(crate) const ERR_GETTER_SHAPE: &str =
    "getter must name a method, optionally followed by `()`";
pub(crate) const ERR_GETTER_ARGS: &str =
    "#[callback_field_getter] requires both `field = \"..\"` and `getter = \"..\"`";
pub(crate) const ERR_GETTERS_ENTRY: &str =
    "#[callback_field_getters] only accepts `field_getter(field = \"..\", getter = \"..\")` entries";

pub(crate) const ERR_CTOR_PATTERN: &str =
    "constructor parameters must be plain identifiers to be exposed to listeners";
pub(crate) const ERR_CTOR_IMPL_TRAIT: &str =
    "constructor parameters of a #[callback] type cannot use `impl Trait`; listeners need a concrete type";

pub(crate) const ERR_ARG_UNKNOWN: &str =
    "unsupported #[callback] argument; expected `constructor`, `cancel_field` or `crate`";

pub(crate) fn err_getter_missing(getter: &str) -> String {
    format!("method `{getter}` does not exist")
}

pub(crate) fn err_field_missing(field: &str) -> String {
    format!("field `{field}` does not exist")
}
