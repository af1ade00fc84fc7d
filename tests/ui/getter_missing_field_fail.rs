#![allow(dead_code)]

pub struct Counter { count: u32 }

#[mmg_callbacks::callback_field_getter(field = "total", getter = "count()")]
#[mmg_callbacks::callback]
impl Counter {
    pub fn new(count: u32) -> Self { Self { count } }
    pub fn count(&self) -> u32 { self.count }
}

fn main() {}
