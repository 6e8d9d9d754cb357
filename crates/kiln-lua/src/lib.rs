//! Lua scripting bridge for the kiln engine.
//!
//! Registers the `engine` module and the `KEY_*` globals into a Lua 5.4 state
//! and runs a script's entry function against a shared [`kiln_engine::Engine`].
//!
//! Engine handles reach scripts as userdata ([`LuaResource`]); deleting one
//! takes the handle out, so every resource is released at most once.

mod api;
mod handle;
mod keys;
mod runner;

pub use api::{install, SharedEngine};
pub use handle::LuaResource;
pub use keys::install_key_globals;
pub use runner::{RunError, ScriptRunner};
