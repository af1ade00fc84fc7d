mod events {
    pub mod input {
        use mmg_callbacks::callback;

        #[callback]
        pub struct Changed<T: Clone> { pub old: T, pub new: T }
    }
}

use events::input::{Changed, ChangedCallback};
use mmg_callbacks::token;

fn main() {
    ChangedCallback::<i64>::instance().register_listener("diff", |old: i64, new: i64| {
        let _ = new - old;
    }, token::<i64>());
    ChangedCallback::<i64>::instance().register_handler("h", |_c: &Changed<i64>| {}, token());
    ChangedCallback::<i64>::instance().invoke(&Changed { old: 1, new: 2 });
}
