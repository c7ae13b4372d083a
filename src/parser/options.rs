//! Grammar configuration
//!
//! The defaults reproduce the reference grammar exactly, quirks included.
//! Each switch opts into a corrected or extended rule.

/// Default limit on nested rules (parentheses, blocks, class bodies).
pub const DEFAULT_MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrammarOptions {
    /// Require `;` after every variable declaration, not only after one with
    /// an initializer.
    pub strict_semicolons: bool,
    /// Accept function declarations as class members.
    pub class_functions: bool,
    /// Nesting limit; deeper input fails with `NestingTooDeep`.
    pub max_depth: usize,
}

impl Default for GrammarOptions {
    fn default() -> Self {
        Self {
            strict_semicolons: false,
            class_functions: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl GrammarOptions {
    pub fn with_strict_semicolons(mut self, on: bool) -> Self {
        self.strict_semicolons = on;
        self
    }

    pub fn with_class_functions(mut self, on: bool) -> Self {
        self.class_functions = on;
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_reference_grammar() {
        let options = GrammarOptions::default();
        assert!(!options.strict_semicolons);
        assert!(!options.class_functions);
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_builder() {
        let options = GrammarOptions::default()
            .with_strict_semicolons(true)
            .with_class_functions(true)
            .with_max_depth(8);
        assert!(options.strict_semicolons);
        assert!(options.class_functions);
        assert_eq!(options.max_depth, 8);
    }
}
