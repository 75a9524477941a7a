//! Expansion of extension chains and config classes.
//!
//! Both expansions are depth-first walks kept on an explicit stack. Each stack frame remembers how it was
//! reached, so a proposal that loops back onto its own path is reported as a cycle and a path longer than the
//! configured limit is reported as too deep.

use std::collections::{HashMap, HashSet};

use crate::config::{ConfigClass, ConfigClasses};
use crate::errors::{Error, Result};
use crate::extension::{ClassContext, ClassExtensionRef, ExtensionRef, ExtensionUnit, unit_key};

// ============================================================================
// Units
// ============================================================================

/// Every distinct extension that took part in a run, in the order it was first seen.
pub(super) struct Units {
    units: Vec<ClassExtensionRef>,
    seen: HashSet<*const ()>,
}

impl Units {
    pub(super) fn new(globals: &[ExtensionRef]) -> Self {
        let mut units = Self {
            units: Vec::new(),
            seen: HashSet::new(),
        };
        for ext in globals {
            units.register(&(ext.clone() as ClassExtensionRef));
        }
        units
    }

    pub(super) fn register(&mut self, ext: &ClassExtensionRef) {
        if self.seen.insert(unit_key(ext)) {
            self.units.push(ext.clone());
        }
    }

    pub(super) fn len(&self) -> usize {
        self.units.len()
    }

    /// Release every unit once. All units are released even when some fail; the first failure is returned.
    pub(super) fn release_all(&self) -> Result<()> {
        let mut first_error = None;
        for ext in &self.units {
            if let Err(err) = ext.release() {
                tracing::warn!(extension = ext.name(), error = %err, "failed to release extension");
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

// ============================================================================
// Class-extension chains
// ============================================================================

/// Build the extension chain of one config class.
///
/// The chain starts as the global extensions. Each global is then asked for proposals; every proposal is
/// appended and immediately asked for its own proposals before the next sibling is looked at.
pub(super) fn expand_chain(
    class: &str,
    config_classes: &ConfigClasses,
    globals: &[ExtensionRef],
    limit: usize,
    units: &mut Units,
) -> Result<Vec<ClassExtensionRef>> {
    let config_class = config_classes.get(class)?;
    let mut chain: Vec<ClassExtensionRef> = globals.iter().map(|ext| ext.clone() as ClassExtensionRef).collect();
    let roots = chain.clone();

    for root in roots {
        let mut path = vec![root.name().to_string()];
        let first = root.new_class_extensions(&ClassContext {
            class,
            config_class,
            config_classes,
            chain: &chain,
        })?;
        let mut stack = vec![first.into_iter()];

        while let Some(pending) = stack.last_mut() {
            let Some(unit) = pending.next() else {
                stack.pop();
                path.pop();
                continue;
            };
            let ext = match unit {
                ExtensionUnit::Class(ext) if ext.as_extension().is_none() => ext,
                ExtensionUnit::Class(ext) => return Err(invalid_proposal(class, &path, ext.name())),
                ExtensionUnit::Global(ext) => return Err(invalid_proposal(class, &path, ext.name())),
            };
            units.register(&ext);

            let name = ext.name().to_string();
            if path.contains(&name) {
                path.push(name);
                return Err(Error::ExpansionCycle {
                    class: class.to_string(),
                    path,
                });
            }
            if path.len() >= limit {
                path.push(name);
                return Err(Error::ExpansionDepth {
                    class: class.to_string(),
                    limit,
                    path,
                });
            }

            chain.push(ext.clone());
            let proposals = ext.new_class_extensions(&ClassContext {
                class,
                config_class,
                config_classes,
                chain: &chain,
            })?;
            path.push(name);
            stack.push(proposals.into_iter());
        }
    }

    tracing::trace!(class, chain = chain.len(), "expanded extension chain");
    Ok(chain)
}

fn invalid_proposal(class: &str, path: &[String], proposed: &str) -> Error {
    Error::InvalidProposal {
        class: class.to_string(),
        proposer: path.last().cloned().unwrap_or_default(),
        proposed: proposed.to_string(),
    }
}

// ============================================================================
// Config classes
// ============================================================================

/// Result of expanding the seeded config classes.
pub(super) struct Expanded {
    /// Seeded classes followed by proposed ones, in the order they were added.
    pub config_classes: ConfigClasses,
    pub chains: HashMap<String, Vec<ClassExtensionRef>>,
}

struct Frame {
    class: String,
    /// Classes whose proposals led here, oldest first.
    lineage: Vec<String>,
    chain: Vec<ClassExtensionRef>,
    next_extension: usize,
    proposer: String,
    pending: std::vec::IntoIter<(String, ConfigClass)>,
}

impl Frame {
    fn new(class: String, lineage: Vec<String>, chain: Vec<ClassExtensionRef>) -> Self {
        Self {
            class,
            lineage,
            chain,
            next_extension: 0,
            proposer: String::new(),
            pending: Vec::new().into_iter(),
        }
    }
}

/// Expand every seeded class: build its chain, then ask each extension in the chain for new config classes.
/// A proposed class is expanded in full before the next extension of its proposer is asked.
pub(super) fn expand(
    seed: ConfigClasses,
    globals: &[ExtensionRef],
    limit: usize,
    units: &mut Units,
) -> Result<Expanded> {
    let mut classes = seed;
    let mut chains = HashMap::new();
    let roots: Vec<String> = classes.names().map(str::to_string).collect();

    for root in roots {
        let chain = expand_chain(&root, &classes, globals, limit, units)?;
        let mut stack = vec![Frame::new(root, Vec::new(), chain)];

        while let Some(frame) = stack.last_mut() {
            if let Some((name, body)) = frame.pending.next() {
                let mut lineage = frame.lineage.clone();
                lineage.push(frame.class.clone());
                let proposer = frame.proposer.clone();
                check_proposal(&name, &lineage, &proposer, &classes, limit)?;

                tracing::debug!(class = %name, proposer = %proposer, "config class proposed");
                classes.insert(name.clone(), body);
                let chain = expand_chain(&name, &classes, globals, limit, units)?;
                stack.push(Frame::new(name, lineage, chain));
                continue;
            }

            if let Some(ext) = frame.chain.get(frame.next_extension).cloned() {
                frame.next_extension += 1;
                let proposed = ext.new_config_classes(&ClassContext {
                    class: &frame.class,
                    config_class: classes.get(&frame.class)?,
                    config_classes: &classes,
                    chain: &frame.chain,
                })?;
                frame.proposer = ext.name().to_string();
                frame.pending = proposed.into_iter();
                continue;
            }

            if let Some(done) = stack.pop() {
                chains.insert(done.class, done.chain);
            }
        }
    }

    Ok(Expanded {
        config_classes: classes,
        chains,
    })
}

fn check_proposal(
    name: &str,
    lineage: &[String],
    proposer: &str,
    classes: &ConfigClasses,
    limit: usize,
) -> Result<()> {
    let path = || {
        let mut path = lineage.to_vec();
        path.push(name.to_string());
        path
    };
    if lineage.iter().any(|ancestor| ancestor == name) {
        return Err(Error::ExpansionCycle {
            class: name.to_string(),
            path: path(),
        });
    }
    if classes.contains(name) {
        return Err(Error::DuplicateConfigClass {
            name: name.to_string(),
            proposer: proposer.to_string(),
        });
    }
    if lineage.len() >= limit {
        return Err(Error::ExpansionDepth {
            class: name.to_string(),
            limit,
            path: path(),
        });
    }
    Ok(())
}
