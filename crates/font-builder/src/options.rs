//! Options for font assembly

/// Options for [`crate::Assembler`]
#[derive(Debug, Clone, Default)]
pub struct AssembleOptions {
    /// Compile glyphs on the rayon thread pool
    pub parallel: bool,

    /// Log how long each assembly step took
    pub timing: bool,
}

impl AssembleOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn timing(mut self, timing: bool) -> Self {
        self.timing = timing;
        self
    }
}
