use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use kiln_engine::{Engine, EngineConfig};
use mlua::{Lua, Value};
use thiserror::Error;

use crate::api::{install, SharedEngine};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to read script {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to install the engine module: {0}")]
    Install(#[source] mlua::Error),

    #[error("failed to load {chunk}: {source}")]
    Load {
        chunk: String,
        #[source]
        source: mlua::Error,
    },

    #[error("entry `{0}` is not a function")]
    MissingEntry(String),

    #[error("entry `{entry}` failed: {source}")]
    Entry {
        entry: String,
        #[source]
        source: mlua::Error,
    },
}

/// A Lua state with the `engine` module installed over a fresh [`Engine`].
pub struct ScriptRunner {
    // Dropped before `engine` so no callback outlives its target.
    lua: Lua,
    engine: SharedEngine,
}

impl ScriptRunner {
    pub fn new(config: EngineConfig) -> Result<Self, RunError> {
        let lua = Lua::new();
        let engine = Rc::new(RefCell::new(Engine::new(config)));
        install(&lua, engine.clone()).map_err(RunError::Install)?;
        Ok(Self { lua, engine })
    }

    pub fn lua(&self) -> &Lua {
        &self.lua
    }

    pub fn engine(&self) -> &SharedEngine {
        &self.engine
    }

    /// Reads and executes a script file. Top-level code runs immediately.
    pub fn load_file(&self, path: &Path) -> Result<(), RunError> {
        let source = fs::read(path).map_err(|source| RunError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let chunk = format!("@{}", path.display());
        log::debug!("loading {}", path.display());
        self.lua
            .load(source.as_slice())
            .set_name(chunk.as_str())
            .exec()
            .map_err(|source| RunError::Load { chunk, source })
    }

    /// Executes `source` as a chunk named `chunk`.
    pub fn load_source(&self, source: &str, chunk: &str) -> Result<(), RunError> {
        self.lua
            .load(source)
            .set_name(chunk)
            .exec()
            .map_err(|source| RunError::Load {
                chunk: chunk.to_string(),
                source,
            })
    }

    /// Calls the global function `entry` with no arguments.
    pub fn call_entry(&self, entry: &str) -> Result<(), RunError> {
        let value = self.lua.globals().get::<Value>(entry).map_err(|source| RunError::Entry {
            entry: entry.to_string(),
            source,
        })?;
        let Value::Function(function) = value else {
            return Err(RunError::MissingEntry(entry.to_string()));
        };

        log::debug!("calling entry `{entry}`");
        function.call::<()>(()).map_err(|source| RunError::Entry {
            entry: entry.to_string(),
            source,
        })
    }

    pub fn run(&self, path: &Path, entry: &str) -> Result<(), RunError> {
        self.load_file(path)?;
        self.call_entry(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner() -> ScriptRunner {
        ScriptRunner::new(EngineConfig::default()).unwrap()
    }

    fn script(dir: &tempfile::TempDir, source: &str) -> PathBuf {
        let path = dir.path().join("script.lua");
        fs::write(&path, source).unwrap();
        path
    }

    #[test]
    fn runs_the_entry_function() {
        let dir = tempfile::tempdir().unwrap();
        let path = script(&dir, "ran = false\nfunction script() ran = true end\n");

        let runner = runner();
        runner.run(&path, "script").unwrap();
        assert!(runner.lua().globals().get::<bool>("ran").unwrap());
    }

    #[test]
    fn custom_entry_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = script(&dir, "function main() hits = (hits or 0) + 1 end\n");

        let runner = runner();
        runner.run(&path, "main").unwrap();
        assert_eq!(runner.lua().globals().get::<i64>("hits").unwrap(), 1);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = runner().run(&dir.path().join("nope.lua"), "script").unwrap_err();
        assert!(matches!(err, RunError::Read { .. }));
    }

    #[test]
    fn syntax_error_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = script(&dir, "function script(\n");

        let err = runner().run(&path, "script").unwrap_err();
        match err {
            RunError::Load { chunk, .. } => assert!(chunk.ends_with("script.lua"), "{chunk}"),
            other => panic!("unexpected {other}"),
        }
    }

    #[test]
    fn top_level_error_is_a_load_error() {
        let err = runner().load_source("error('boom')", "=inline").unwrap_err();
        assert!(matches!(err, RunError::Load { .. }));
    }

    #[test]
    fn non_function_entry_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = script(&dir, "script = 42\n");

        let err = runner().run(&path, "script").unwrap_err();
        assert!(matches!(err, RunError::MissingEntry(name) if name == "script"));
    }

    #[test]
    fn raising_entry_is_an_entry_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = script(&dir, "function script() error('bad frame') end\n");

        let err = runner().run(&path, "script").unwrap_err();
        assert!(matches!(err, RunError::Entry { .. }));
        assert!(err.to_string().contains("bad frame"), "{err}");
    }

    #[test]
    fn engine_module_is_available_to_scripts() {
        let dir = tempfile::tempdir().unwrap();
        let path = script(
            &dir,
            "local e = require('engine')\nfunction script() n = e.create_noise(5) e.delete_noise(n) end\n",
        );

        runner().run(&path, "script").unwrap();
    }
}
