//! Where zone file text comes from.
//!
//! The loader never opens files itself. The text of the main zone file is
//! read from a [`Source`] handed to the parser, the sources for `$INCLUDE`
//! directives are provided by an [`Includer`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::{fs, io};

//------------ Source --------------------------------------------------------

/// A supplier of zone file text.
///
/// This is implemented for everything that implements [`io::Read`], which
/// includes byte slices and files.
pub trait Source {
    /// Reads the next chunk of text into `buf`.
    ///
    /// Returns the number of octets read. A return value of zero signals
    /// the end of the text.
    fn fill(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

impl<R: io::Read + ?Sized> Source for R {
    fn fill(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            match self.read(buf) {
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {
                    continue
                }
                res => return res,
            }
        }
    }
}

//------------ Includer ------------------------------------------------------

/// Resolves the path of an `$INCLUDE` directive into a source.
pub trait Includer {
    /// Opens `path` as given in an `$INCLUDE` of the file named `parent`.
    ///
    /// Returns the name of the included file along with its source. The
    /// name is used in error messages and is passed as `parent` for the
    /// includes of the included file.
    fn open(
        &mut self,
        path: &str,
        parent: &str,
    ) -> io::Result<(String, Box<dyn Source>)>;
}

//------------ FsIncluder ----------------------------------------------------

/// An includer opening files from the file system.
///
/// Relative paths are resolved against the directory of the including
/// file. For the main zone file, which was not opened by the includer, this
/// is the base directory given at creation.
#[derive(Clone, Debug)]
pub struct FsIncluder {
    base: PathBuf,

    /// The directory of each file opened so far, keyed by its name.
    dirs: HashMap<String, PathBuf>,
}

impl FsIncluder {
    /// Creates an includer resolving relative paths against `base`.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        FsIncluder {
            base: base.into(),
            dirs: HashMap::new(),
        }
    }

    /// Creates an includer for the directory containing `zone_file`.
    pub fn for_file(zone_file: impl AsRef<Path>) -> Self {
        Self::new(
            zone_file
                .as_ref()
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        )
    }
}

impl Includer for FsIncluder {
    fn open(
        &mut self,
        path: &str,
        parent: &str,
    ) -> io::Result<(String, Box<dyn Source>)> {
        let full = self.dirs.get(parent).unwrap_or(&self.base).join(path);
        let file = fs::File::open(&full)?;
        let name = full.display().to_string();
        let dir = full.parent().map(Path::to_path_buf).unwrap_or_default();
        self.dirs.insert(name.clone(), dir);
        let source: Box<dyn Source> = Box::new(io::BufReader::new(file));
        Ok((name, source))
    }
}

//============ Tests =========================================================
