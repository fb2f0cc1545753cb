#[cfg(not(feature = "no_IO"))]
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use {crate::types::*, std::fmt};

/// Sink for DRAT certificate lines. A strengthened clause is recorded as
/// an addition of the shortened clause followed by a deletion of the
/// original; an unlinked clause is recorded as a deletion.
#[derive(Debug, Default)]
pub struct CertificateStore {
    #[cfg(not(feature = "no_IO"))]
    target: Option<PathBuf>,
    #[cfg(not(feature = "no_IO"))]
    buffer: Option<BufWriter<File>>,
}

impl Clone for CertificateStore {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl fmt::Display for CertificateStore {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        #[cfg(not(feature = "no_IO"))]
        match &self.target {
            Some(path) => write!(f, "Certificate({})", path.display()),
            None => write!(f, "Certificate(none)"),
        }
        #[cfg(feature = "no_IO")]
        write!(f, "Certificate(none)")
    }
}

impl Instantiate for CertificateStore {
    fn instantiate(config: &Config, _cnf: &CNFDescription) -> Self {
        #[cfg(not(feature = "no_IO"))]
        if config.use_certification {
            let cert: PathBuf = config.io_odir.join(&config.io_pfile);
            if let Ok(out) = File::create(&cert) {
                return CertificateStore {
                    buffer: Some(BufWriter::new(out)),
                    target: Some(cert),
                };
            }
        }
        CertificateStore::default()
    }
}

impl CertificateStore {
    /// return true while a certificate file is receiving lines.
    pub fn is_active(&self) -> bool {
        #[cfg(feature = "no_IO")]
        {
            false
        }
        #[cfg(not(feature = "no_IO"))]
        {
            self.buffer.is_some()
        }
    }
    #[cfg(feature = "no_IO")]
    pub fn push_add(&mut self, _vec: &[Lit]) {}
    #[cfg(not(feature = "no_IO"))]
    pub fn push_add(&mut self, vec: &[Lit]) {
        if self.write_clause_line("", vec).is_err() {
            self.disarm();
        }
    }
    #[cfg(feature = "no_IO")]
    pub fn push_delete(&mut self, _vec: &[Lit]) {}
    #[cfg(not(feature = "no_IO"))]
    pub fn push_delete(&mut self, vec: &[Lit]) {
        if self.write_clause_line("d ", vec).is_err() {
            self.disarm();
        }
    }
    #[cfg(feature = "no_IO")]
    pub fn close(&mut self) {}
    #[cfg(not(feature = "no_IO"))]
    pub fn close(&mut self) {
        if let Some(ref mut buf) = self.buffer {
            let _ = buf.flush();
            self.buffer = None;
            self.target = None;
        }
    }
    #[cfg(not(feature = "no_IO"))]
    fn write_clause_line(&mut self, prefix: &str, vec: &[Lit]) -> std::io::Result<()> {
        if let Some(ref mut buf) = self.buffer {
            buf.write_all(prefix.as_bytes())?;
            for l in vec {
                buf.write_all(format!("{} ", i32::from(*l)).as_bytes())?;
            }
            buf.write_all(b"0\n")?;
        }
        Ok(())
    }
    #[cfg(not(feature = "no_IO"))]
    fn disarm(&mut self) {
        self.buffer = None;
        self.target = None;
    }
}
