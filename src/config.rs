/// Crate `config` provides the engine's configuration.
use std::path::PathBuf;

/// Configuration used by `instantiate`.
#[derive(Clone, Debug)]
pub struct Config {
    //
    //## I/O configuration
    //
    /// Level of progress report verbosity
    pub verbosity: usize,

    /// Writes a DRAT certificate if true
    pub use_certification: bool,

    /// Output directory
    pub io_odir: PathBuf,

    /// Cert. file in DRAT format
    pub io_pfile: PathBuf,

    //
    //## processor
    //
    /// Work budget of a subsumption pass
    pub sub_lim: i64,

    /// Work budget of a strengthening pass
    pub str_lim: i64,

    /// Allow rewriting implicit binary/ternary occurrences
    pub sub_implicit: bool,

    /// Seed for clause sampling
    pub rnd_seed: u64,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            verbosity: 0,
            use_certification: false,
            io_odir: PathBuf::from("."),
            io_pfile: PathBuf::from("proof.drat"),
            sub_lim: 2_000_000,
            str_lim: 2_000_000,
            sub_implicit: false,
            rnd_seed: 91_648_253,
        }
    }
}
