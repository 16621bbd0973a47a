pub mod create;
pub mod webhook;
