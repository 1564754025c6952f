//! FreeIPA connector configuration.

/// Configuration for the FreeIPA command-line adapter.
#[derive(Debug, Clone)]
pub struct IpaConfig {
    /// The program to invoke, `ipa` by default. May be an absolute path.
    pub program: String,
}

impl Default for IpaConfig {
    fn default() -> Self {
        Self {
            program: "ipa".to_string(),
        }
    }
}

impl IpaConfig {
    /// Create a configuration with the default program name.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the program to invoke.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_program() {
        assert_eq!(IpaConfig::default().program, "ipa");
    }

    #[test]
    fn test_with_program() {
        let config = IpaConfig::new().with_program("/usr/local/bin/ipa");
        assert_eq!(config.program, "/usr/local/bin/ipa");
    }
}
