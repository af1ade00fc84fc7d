#![allow(dead_code)]

pub struct Counter { count: u32 }

#[mmg_callbacks::callback]
#[mmg_callbacks::callback_field_getter(field = "count", getter = "total()")]
impl Counter {
    pub fn new(count: u32) -> Self { Self { count } }
}

fn main() {}
