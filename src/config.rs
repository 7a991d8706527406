/// Per-machine behaviour switches, fixed when the cartridge is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Reproduce the JMP ($xxFF) hardware bug: the pointer's high byte is read from
    /// $xx00 instead of crossing into the next page.
    pub indirect_jmp_page_wrap: bool,
    /// Fail loading on mapper ids without an implementation instead of running
    /// them as NROM.
    pub strict_mapper: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            indirect_jmp_page_wrap: true,
            strict_mapper: false,
        }
    }
}
