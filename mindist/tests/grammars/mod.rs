#![allow(dead_code)]

pub mod ambiguous_sum;
pub mod arith;
pub mod parens;
