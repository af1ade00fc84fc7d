#![allow(dead_code)]

#[mmg_callbacks::callback]
enum Mode { Fast, Slow }

fn main() {}
