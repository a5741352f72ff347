//! Identification of the system shell by module base name.

use crate::config::DEFAULT_TARGET_PROCESS;

/// The process name the detector looks for.
///
/// A candidate matches when it has exactly the expected length and equals the
/// target under ASCII case folding. No other normalization is applied, so
/// `explorer.exe ` (trailing space) or a full path never match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellTarget {
    name: String,
    expected_len: usize,
}

impl ShellTarget {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let expected_len = name.chars().count();
        Self { name, expected_len }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Length in characters a module base name must have to be compared at all.
    pub fn expected_len(&self) -> usize {
        self.expected_len
    }

    /// Whether `module_base_name` names the system shell.
    pub fn matches(&self, module_base_name: &str) -> bool {
        module_base_name.chars().count() == self.expected_len
            && module_base_name.eq_ignore_ascii_case(&self.name)
    }
}

impl Default for ShellTarget {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_PROCESS)
    }
}
