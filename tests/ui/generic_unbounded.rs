use mmg_callbacks::callback;

#[callback]
pub struct Bare<T> { pub payload: T }

pub struct Boxed<T> { inner: Vec<T> }

#[callback]
impl<T> Boxed<T> {
    pub fn new(inner: Vec<T>) -> Self { Self { inner } }
}

fn main() {
    BareCallback::<u32>::instance().register_listener("bare", |payload: u32| {
        let _ = payload;
    }, mmg_callbacks::token());
    BareCallback::<u32>::instance().invoke(&Bare { payload: 1 });
    BoxedCallback::<String>::instance().register_listener("boxed", |inner: Vec<String>| {
        let _ = inner.len();
    }, mmg_callbacks::token());
    BoxedCallback::<String>::instance().invoke(&Boxed::new(vec!["a".to_string()]));
}
