use std::path::{Path, PathBuf};

use crate::model::Module;
use crate::naming::InstanceNamer;
use crate::parse::{self, ParseError, ParseOptions};

#[cfg(feature = "serialize")]
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum DesignError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("No sub-module at index {0}")]
    NoSuchInstance(usize),
}

/// 子模块: a parsed module placed in the design under an instance name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
pub struct SubModule {
    pub source: PathBuf,
    pub filename: String,
    pub module: Module,
    pub instance: String,
    /// Provided outside the generated system; its ports may stay unrouted.
    pub external: bool,
}

/// The sub-modules of a system, with their instance names kept unique.
#[derive(Debug, Default)]
pub struct Design {
    sub_modules: Vec<SubModule>,
    names: InstanceNamer,
}

impl Design {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sub_modules(&self) -> &[SubModule] {
        &self.sub_modules
    }

    pub fn get(&self, index: usize) -> Option<&SubModule> {
        self.sub_modules.get(index)
    }

    /// Mutable access to the module of a sub-module, for the consumer's own
    /// flags (`route_to_top`, …). The instance name and `external` only
    /// change through [`Design`].
    pub fn module_mut(&mut self, index: usize) -> Option<&mut Module> {
        self.sub_modules.get_mut(index).map(|sub| &mut sub.module)
    }

    pub fn len(&self) -> usize {
        self.sub_modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sub_modules.is_empty()
    }

    pub fn find(&self, instance: &str) -> Option<&SubModule> {
        self.sub_modules.iter().find(|s| s.instance == instance)
    }

    /// Instantiate every module of a source file once.
    ///
    /// Returns how many sub-modules were added. Files that are skipped by
    /// [`parse::load_file_with`] add nothing; rejected modules are logged
    /// and left out.
    pub fn add_file<P: AsRef<Path>>(&mut self, path: P, options: &ParseOptions) -> Result<usize, DesignError> {
        let path = path.as_ref();
        let verilog = parse::load_file_with(path, options)?;
        for e in &verilog.rejected {
            log::warn!("'{}': {}", path.display(), e);
        }
        let added = verilog.modules.len();
        for module in verilog.modules {
            self.add_module(module, path);
        }
        Ok(added)
    }

    /// Add one instance of `module`; returns its instance name.
    pub fn add_module<P: AsRef<Path>>(&mut self, module: Module, source: P) -> String {
        let source = source.as_ref();
        let instance = self.names.instantiate(&module.name);
        log::debug!("instantiating '{}' as '{}'", module.name, instance);
        self.sub_modules.push(SubModule {
            source: source.to_path_buf(),
            filename: source
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_default(),
            module,
            instance: instance.clone(),
            external: false,
        });
        instance
    }

    /// Append a deep copy of the sub-module at `index` under a fresh name.
    pub fn duplicate(&mut self, index: usize) -> Result<String, DesignError> {
        let original = self.sub_modules.get(index).ok_or(DesignError::NoSuchInstance(index))?;
        let instance = self.names.duplicate(&original.instance);
        log::debug!("duplicating '{}' as '{}'", original.instance, instance);
        let copy = SubModule {
            instance: instance.clone(),
            ..original.clone()
        };
        self.sub_modules.push(copy);
        Ok(instance)
    }

    /// Remove the sub-module at `index`; its instance name becomes free.
    pub fn remove(&mut self, index: usize) -> Result<SubModule, DesignError> {
        if index >= self.sub_modules.len() {
            return Err(DesignError::NoSuchInstance(index));
        }
        let removed = self.sub_modules.remove(index);
        self.names.release(&removed.instance);
        Ok(removed)
    }

    /// Mark a sub-module as external or not.
    ///
    /// An internal sub-module has all of its ports routed to the top level.
    pub fn set_external(&mut self, index: usize, external: bool) -> Result<(), DesignError> {
        let sub = self.sub_modules.get_mut(index).ok_or(DesignError::NoSuchInstance(index))?;
        sub.external = external;
        if !external {
            for port in &mut sub.module.ports {
                port.route_to_top = true;
            }
        }
        Ok(())
    }
}
