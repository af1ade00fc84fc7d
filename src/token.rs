use std::fmt;
use std::marker::PhantomData;

/// Zero-sized type witness passed to `register_*` on generic dispatchers, one
/// per type parameter of the source type.
pub struct TypeToken<T: ?Sized>(PhantomData<fn() -> T>);

impl<T: ?Sized> TypeToken<T> {
    pub const fn new() -> Self {
        TypeToken(PhantomData)
    }

    pub fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

impl<T: ?Sized> Clone for TypeToken<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T: ?Sized> Copy for TypeToken<T> {}

impl<T: ?Sized> Default for TypeToken<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for TypeToken<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeToken<{}>", self.type_name())
    }
}

/// Shorthand for `TypeToken::<T>::new()`.
pub const fn token<T: ?Sized>() -> TypeToken<T> {
    TypeToken::new()
}
