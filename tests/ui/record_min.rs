use mmg_callbacks::prelude::*;

#[callback]
#[derive(Clone)]
pub struct Resized { pub width: u32, pub height: u32 }

#[callback(cancel_field = "dropped")]
struct Frame(u64, Vec<u8>);

fn main() {
    ResizedCallback::instance().register_handler(IdentifierKey::of("ui", "resize"), |_r: &Resized| {});
    ResizedCallback::instance().register_listener("ui:resize", |_w: u32, _h: u32| {});
    ResizedCallback::instance().invoke(&Resized { width: 1, height: 2 });
    ResizedCallback::instance().unregister_handlers([IdentifierKey::of("ui", "resize")]);
    ResizedCallback::instance().unregister_listeners(vec!["ui:resize".to_string()]);

    FrameCallback::instance().register_listener("f", |_seq: u64, _data: Vec<u8>| {});
    FrameCallback::instance().invoke(&Frame(1, vec![0]));
    let _: &str = FrameCallback::CANCEL_FIELD;
}
