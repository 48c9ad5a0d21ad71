pub mod delete_nops;

pub use delete_nops::{delete_nops, DeleteNops};
