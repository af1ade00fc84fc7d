use parking_lot::RwLock;
use std::{
    any::{Any, TypeId},
    collections::HashMap,
    sync::LazyLock,
};

type Instances = HashMap<TypeId, &'static (dyn Any + Send + Sync)>;

static INSTANCES: LazyLock<RwLock<Instances>> = LazyLock::new(|| RwLock::new(HashMap::new()));

/// Process-wide instance of `D`, keyed by type identity and created by `init`
/// on first use. Instances are never dropped.
///
/// `init` runs under the registry lock and must not call back into `instance`.
pub fn instance<D: Any + Send + Sync>(init: fn() -> D) -> &'static D {
    let id = TypeId::of::<D>();
    let found = INSTANCES.read().get(&id).copied();
    let entry = match found {
        Some(e) => e,
        None => *INSTANCES.write().entry(id).or_insert_with(|| {
            tracing::trace!(dispatcher = std::any::type_name::<D>(), "creating dispatcher instance");
            Box::leak(Box::new(init()))
        }),
    };
    match entry.downcast_ref::<D>() {
        Some(d) => d,
        None => unreachable!("registry entry keyed by TypeId of another type"),
    }
}

/// A callback-enabled type compiled into this binary, collected via inventory.
#[derive(Debug)]
pub struct Declaration {
    /// `module::path::Type` of the source type.
    pub source_type: &'static str,
    pub dispatcher: &'static str,
    pub cancel_field: &'static str,
    /// Generic dispatchers have one instance per monomorphization.
    pub generic: bool,
}

inventory::collect!(Declaration);

/// Iterate all declarations
pub fn declarations() -> Vec<&'static Declaration> {
    inventory::iter::<Declaration>.into_iter().collect()
}

/// Looks a declaration up by the full path of its source type.
pub fn find(source_type: &str) -> Option<&'static Declaration> {
    inventory::iter::<Declaration>
        .into_iter()
        .find(|d| d.source_type == source_type)
}
