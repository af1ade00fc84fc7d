#![allow(dead_code)]

#[mmg_callbacks::callback]
trait Source { fn id(&self) -> u32; }

fn main() {}
