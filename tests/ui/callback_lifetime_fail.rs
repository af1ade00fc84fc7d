#![allow(dead_code)]

#[mmg_callbacks::callback]
pub struct Borrowed<'a> { pub name: &'a str }

fn main() {}
