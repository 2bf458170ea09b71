//! Turning the tokens of a zone file into records.
//!
//! A [`Parser`] reads a zone file and all the files it includes and yields
//! the records they contain one by one. Records can be pulled via
//! [`Parser::next_record`] or the `Iterator` impl, or pushed into a closure
//! via [`Parser::process`].
//!
//! ```
//! use zonescan::zonefile::{Options, Parser};
//!
//! let zone = "$ORIGIN example.com.\n\
//!             @ 3600 IN A 192.0.2.1\n\
//!             www A 192.0.2.2\n";
//! let parser = Parser::new("example.zone", zone.as_bytes(), Options::default())
//!     .unwrap();
//! let records = parser.collect::<Result<Vec<_>, _>>().unwrap();
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[1].to_string(), "www.example.com. 3600 IN A 192.0.2.2");
//! ```

use super::alloc::{Allocator, Global};
use super::config::{ErrorPolicy, Options};
use super::error::Error;
use super::index::Indexer;
use super::record::Record;
use super::scanner::{Scanner, Token, TokenKind};
use super::source::{FsIncluder, Includer, Source};
use crate::base::scan::Symbols;
use crate::base::{Class, Name, Rtype, Ttl};
use crate::rdata::codec::RdataDecoder;
use std::path::Path;
use std::sync::Arc;
use std::{fs, io, mem};
use tracing::{debug, warn};

//------------ Flow ----------------------------------------------------------

/// Whether to keep going after a record was processed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Flow {
    Continue,
    Abort,
}

//------------ Summary -------------------------------------------------------

/// The outcome of [`Parser::process`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Summary {
    /// The number of records passed to the closure.
    pub records: usize,

    /// The number of records skipped because of an error.
    pub errors: usize,

    /// The closure stopped processing.
    pub aborted: bool,
}

//------------ Parser --------------------------------------------------------

/// Reads records from a zone file.
pub struct Parser<'a> {
    options: Options,
    allocator: Arc<dyn Allocator>,
    includer: Option<Box<dyn Includer + 'a>>,

    /// The stack of open files with the innermost include last.
    files: Vec<FileContext<'a>>,

    /// The errors of skipped records.
    errors: Vec<Error>,
}

impl<'a> Parser<'a> {
    /// Creates a parser reading the zone file `name` from `source`.
    ///
    /// The name is only used in error messages.
    pub fn new(
        name: impl Into<String>,
        source: impl Source + 'a,
        options: Options,
    ) -> Result<Self, Error> {
        Self::with_allocator(name, source, options, Arc::new(Global))
    }

    /// Creates a parser taking its buffers from the given allocator.
    pub fn with_allocator(
        name: impl Into<String>,
        source: impl Source + 'a,
        options: Options,
        allocator: Arc<dyn Allocator>,
    ) -> Result<Self, Error> {
        options.validate()?;
        let name = name.into();
        let indexer = Indexer::new(
            Box::new(source),
            allocator.clone(),
            options.block_size,
        )
        .map_err(|err| err.at(&name, 0))?;
        let file = FileContext {
            name,
            scanner: Scanner::new(indexer),
            origin: options.origin.clone(),
            owner: None,
            class: options.default_class,
            default_ttl: options.default_ttl,
            depth: 0,
        };
        debug!(file = %file.name, "opened zone file");
        Ok(Parser {
            options,
            allocator,
            includer: None,
            files: vec![file],
            errors: Vec::new(),
        })
    }

    /// Sets the includer used to open files for `$INCLUDE` directives.
    ///
    /// Without an includer, `$INCLUDE` fails as not implemented.
    #[must_use]
    pub fn with_includer(mut self, includer: impl Includer + 'a) -> Self {
        self.includer = Some(Box::new(includer));
        self
    }

    /// Returns the options of the parser.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Returns the errors of the records skipped so far.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Takes the errors of the records skipped so far.
    pub fn take_errors(&mut self) -> Vec<Error> {
        mem::take(&mut self.errors)
    }

    /// Returns the next record.
    ///
    /// Returns `Ok(None)` once all files have been read. If an error is
    /// returned, the parser is finished and will only return `Ok(None)`
    /// from here on.
    pub fn next_record(&mut self) -> Result<Option<Record>, Error> {
        loop {
            let file = match self.files.last_mut() {
                Some(file) => file,
                None => return Ok(None),
            };
            let res = file
                .read_entry()
                .map_err(|err| err.at(&file.name, file.scanner.token_line()));
            match res {
                Ok(Entry::Record(record)) => return Ok(Some(record)),
                Ok(Entry::Directive) => {}
                Ok(Entry::Include { path, origin }) => {
                    if let Err(err) = self.include(path, origin) {
                        self.fail(err)?;
                    }
                }
                Ok(Entry::EndOfFile) => {
                    if let Some(file) = self.files.pop() {
                        debug!(
                            file = %file.name,
                            depth = file.depth,
                            "closed zone file"
                        );
                    }
                }
                Err(err) => self.fail(err)?,
            }
        }
    }

    /// Passes all records to a closure.
    ///
    /// Stops early if the closure returns [`Flow::Abort`].
    pub fn process<F>(&mut self, mut accept: F) -> Result<Summary, Error>
    where
        F: FnMut(Record) -> Flow,
    {
        let mut summary = Summary::default();
        while let Some(record) = self.next_record()? {
            summary.records += 1;
            if accept(record) == Flow::Abort {
                summary.aborted = true;
                break;
            }
        }
        summary.errors = self.errors.len();
        Ok(summary)
    }

    /// Opens an included file and puts it on top of the stack.
    fn include(
        &mut self,
        path: String,
        origin: Option<Name>,
    ) -> Result<(), Error> {
        let parent = match self.files.last() {
            Some(parent) => parent,
            None => return Ok(()),
        };
        let locate = |err: Error| {
            err.at(&parent.name, parent.scanner.token_line())
        };
        if self.files.len() > self.options.max_include_depth {
            return Err(locate(Error::semantic(format!(
                "includes nested deeper than {} levels",
                self.options.max_include_depth
            ))));
        }
        let includer = match self.includer.as_mut() {
            Some(includer) => includer,
            None => {
                return Err(locate(Error::not_implemented(
                    "$INCLUDE without an includer",
                )))
            }
        };
        let (name, source) = includer
            .open(&path, &parent.name)
            .map_err(|err| locate(err.into()))?;
        let indexer = Indexer::new(
            source,
            self.allocator.clone(),
            self.options.block_size,
        )
        .map_err(locate)?;
        let file = FileContext {
            name,
            scanner: Scanner::new(indexer),
            origin: origin.unwrap_or_else(|| parent.origin.clone()),
            owner: None,
            class: parent.class,
            default_ttl: parent.default_ttl,
            depth: parent.depth + 1,
        };
        debug!(
            file = %file.name,
            origin = %file.origin,
            depth = file.depth,
            "included file"
        );
        self.files.push(file);
        Ok(())
    }

    /// Deals with an error according to the error policy.
    ///
    /// Returns the error if loading has to stop.
    fn fail(&mut self, err: Error) -> Result<(), Error> {
        if self.options.error_policy == ErrorPolicy::Continue
            && err.code().is_recoverable()
        {
            warn!(%err, "skipping record");
            self.errors.push(err);
            if let Some(file) = self.files.last_mut() {
                if let Err(err) = file.resync() {
                    self.files.clear();
                    return Err(err);
                }
            }
            return Ok(());
        }
        self.files.clear();
        Err(err)
    }
}

impl Parser<'static> {
    /// Creates a parser for a zone file on disk.
    ///
    /// Included files are looked up relative to the directory of the file.
    pub fn open(
        path: impl AsRef<Path>,
        options: Options,
    ) -> Result<Self, Error> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let file = fs::File::open(path)
            .map_err(|err| Error::from(err).at(&name, 0))?;
        Ok(Parser::new(name, io::BufReader::new(file), options)?
            .with_includer(FsIncluder::for_file(path)))
    }
}

//--- Iterator

impl<'a> Iterator for Parser<'a> {
    type Item = Result<Record, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

//------------ FileContext ---------------------------------------------------

/// The state of one file on the include stack.
struct FileContext<'a> {
    name: String,
    scanner: Scanner<'a>,

    /// The origin for relative names.
    origin: Name,

    /// The owner of the previous record.
    owner: Option<Name>,

    /// The class of the previous record.
    class: Class,

    /// The TTL for records without one.
    default_ttl: Ttl,

    /// The number of includes leading to this file.
    depth: usize,
}

/// What a logical line turned out to be.
enum Entry {
    Record(Record),
    Directive,
    Include { path: String, origin: Option<Name> },
    EndOfFile,
}

impl<'a> FileContext<'a> {
    /// Reads the next logical line.
    fn read_entry(&mut self) -> Result<Entry, Error> {
        let mut header = Header::default();

        // Owner
        let token = self.scanner.next_token()?;
        match token.kind {
            TokenKind::EndOfFile => return Ok(Entry::EndOfFile),
            TokenKind::LineFeed => return Ok(Entry::Directive),
            _ => {}
        }
        let (owner, mut rtype) = if token.at_line_start {
            if token.kind == TokenKind::Contiguous
                && token.text.first() == Some(&b'$')
            {
                let directive = token.text.to_ascii_uppercase();
                return self.directive(&directive);
            }
            let owner = scan_name(&token, &self.origin, "owner")?;
            self.owner = Some(owner.clone());
            (owner, None)
        } else {
            let rtype = header.take(&token)?;
            let owner = self.owner.clone().ok_or_else(|| {
                Error::semantic("no owner given and no previous owner")
            })?;
            (owner, rtype)
        };

        // TTL, class, and type
        let rtype = loop {
            if let Some(rtype) = rtype {
                break rtype;
            }
            let token = self.scanner.next_token()?;
            if token.is_line_end() {
                return Err(Error::syntax("missing record type"));
            }
            rtype = header.take(&token)?;
        };

        // Record data
        let mut decoder = RdataDecoder::new(rtype, &self.origin);
        loop {
            let token = self.scanner.next_token()?;
            if token.is_line_end() {
                break;
            }
            decoder.push(&token)?;
        }
        let data = decoder.finish()?;

        let ttl = header.ttl.unwrap_or(self.default_ttl);
        let class = header.class.unwrap_or(self.class);
        self.class = class;
        Ok(Entry::Record(Record::new(owner, ttl, class, rtype, data)))
    }

    fn directive(&mut self, directive: &[u8]) -> Result<Entry, Error> {
        match directive {
            b"$ORIGIN" => {
                let token = argument(&mut self.scanner, "$ORIGIN")?;
                let origin = scan_name(&token, &self.origin, "origin")?;
                end_of_line(&mut self.scanner)?;
                debug!(file = %self.name, %origin, "$ORIGIN");
                self.origin = origin;
                Ok(Entry::Directive)
            }
            b"$TTL" => {
                let token = argument(&mut self.scanner, "$TTL")?;
                let ttl = Ttl::scan(token.text)?;
                end_of_line(&mut self.scanner)?;
                debug!(file = %self.name, %ttl, "$TTL");
                self.default_ttl = ttl;
                Ok(Entry::Directive)
            }
            b"$INCLUDE" => {
                let token = argument(&mut self.scanner, "$INCLUDE")?;
                let path = unescape(token.text)?;
                let token = self.scanner.next_token()?;
                let origin = if token.is_line_end() {
                    None
                } else {
                    let origin = scan_name(&token, &self.origin, "origin")?;
                    end_of_line(&mut self.scanner)?;
                    Some(origin)
                };
                debug!(file = %self.name, %path, "$INCLUDE");
                Ok(Entry::Include { path, origin })
            }
            _ => Err(Error::syntax(format!(
                "unknown directive {}",
                String::from_utf8_lossy(directive)
            ))),
        }
    }

    /// Skips to the start of the next logical line after an error.
    fn resync(&mut self) -> Result<(), Error> {
        loop {
            match self.scanner.skip_line() {
                Ok(()) => return Ok(()),
                Err(err) if err.code().is_recoverable() => {
                    debug!(file = %self.name, %err, "error while skipping");
                }
                Err(err) => {
                    return Err(err.at(&self.name, self.scanner.token_line()))
                }
            }
        }
    }
}

//------------ Header --------------------------------------------------------

/// The optional TTL and class of a record.
#[derive(Default)]
struct Header {
    ttl: Option<Ttl>,
    class: Option<Class>,
}

impl Header {
    /// Takes a token before the record type.
    ///
    /// A token starting with a digit is a TTL, a class mnemonic is a class,
    /// anything else is the record type which is returned.
    fn take(&mut self, token: &Token) -> Result<Option<Rtype>, Error> {
        if token.kind != TokenKind::Contiguous {
            return Err(Error::syntax(
                "quoted string instead of TTL, class, or type",
            ));
        }
        let text = token.text;
        if text.first().map_or(false, u8::is_ascii_digit) {
            if self.ttl.is_some() {
                return Err(Error::syntax("more than one TTL"));
            }
            self.ttl = Some(Ttl::scan(text)?);
            return Ok(None);
        }
        if let Some(class) = Class::from_bytes(text) {
            if self.class.is_some() {
                return Err(Error::syntax("more than one class"));
            }
            self.class = Some(class);
            return Ok(None);
        }
        match Rtype::from_bytes(text) {
            Some(rtype) => Ok(Some(rtype)),
            None => Err(Error::semantic(format!(
                "unknown record type '{}'",
                String::from_utf8_lossy(text)
            ))),
        }
    }
}

//------------ Helper Functions ----------------------------------------------

/// Returns the next token which must not end the line.
fn argument<'s>(
    scanner: &'s mut Scanner,
    directive: &str,
) -> Result<Token<'s>, Error> {
    let token = scanner.next_token()?;
    if token.is_line_end() {
        return Err(Error::syntax(format!("missing argument to {}", directive)));
    }
    Ok(token)
}

/// Reads a domain name, which must not be quoted.
fn scan_name(token: &Token, origin: &Name, what: &str) -> Result<Name, Error> {
    if token.kind != TokenKind::Contiguous {
        return Err(Error::syntax(format!("quoted string as {}", what)));
    }
    Ok(Name::scan(token.text, origin)?)
}

/// Checks that the logical line ends here.
fn end_of_line(scanner: &mut Scanner) -> Result<(), Error> {
    if scanner.next_token()?.is_line_end() {
        Ok(())
    } else {
        Err(Error::syntax("trailing data after directive"))
    }
}

/// Resolves escape sequences in a token into a string.
fn unescape(text: &[u8]) -> Result<String, Error> {
    let mut res = Vec::with_capacity(text.len());
    for sym in Symbols::new(text) {
        res.push(sym?.into_octet());
    }
    String::from_utf8(res).map_err(|_| Error::syntax("file name is not UTF-8"))
}

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::zonefile::alloc::Bounded;
    use crate::zonefile::error::Code;
    use core::str::FromStr;
    use std::collections::HashMap;

    fn options() -> Options {
        Options::default()
            .with_origin(Name::from_str("example.com.").unwrap())
            .with_block_size(64)
    }

    fn parse(zone: &str) -> Result<Vec<Record>, Error> {
        Parser::new("test.zone", zone.as_bytes(), options())?.collect()
    }

    fn parse_strings(zone: &str) -> Vec<String> {
        parse(zone)
            .unwrap()
            .into_iter()
            .map(|record| record.to_string())
            .collect()
    }

    #[test]
    fn owner_ttl_class() {
        assert_eq!(
            parse_strings(
                "@ IN 300 NS ns\n\
                 \x20 A 192.0.2.1\n\
                 www 60 A 192.0.2.2\n\
                 \x20 CH TXT \"x\"\n\
                 mail.example.net. MX 10 @\n"
            ),
            [
                "example.com. 300 IN NS ns.example.com.",
                "example.com. 3600 IN A 192.0.2.1",
                "www.example.com. 60 IN A 192.0.2.2",
                "www.example.com. 3600 CH TXT \"x\"",
                "mail.example.net. 3600 CH MX 10 example.com.",
            ]
        );
    }

    #[test]
    fn directives() {
        assert_eq!(
            parse_strings(
                "$TTL 1d\n\
                 $ORIGIN example.org.\n\
                 a A 192.0.2.1\n\
                 $origin sub\n\
                 b 5 A 192.0.2.2\n"
            ),
            [
                "a.example.org. 86400 IN A 192.0.2.1",
                "b.sub.example.org. 5 IN A 192.0.2.2",
            ]
        );
        let err = parse("$ORIGIN\n").unwrap_err();
        assert_eq!(err.code(), Code::SyntaxError);
        let err = parse("$TTL 1 2\n").unwrap_err();
        assert_eq!(err.code(), Code::SyntaxError);
        let err = parse("$FOO bar\n").unwrap_err();
        assert_eq!(err.code(), Code::SyntaxError);
    }

    #[test]
    fn header_errors() {
        let err = parse(" A 192.0.2.1\n").unwrap_err();
        assert_eq!(err.code(), Code::SemanticError);
        assert_eq!(err.line(), 1);
        assert_eq!(err.file(), Some("test.zone"));

        let err = parse("a 1 2 A 192.0.2.1\n").unwrap_err();
        assert_eq!(err.code(), Code::SyntaxError);
        let err = parse("a IN\n").unwrap_err();
        assert_eq!(err.code(), Code::SyntaxError);
        let err = parse("a\n\nb IN FOO 1\n").unwrap_err();
        assert_eq!(err.code(), Code::SyntaxError);
        assert_eq!(err.line(), 1);
        let err = parse("a A 192.0.2.1\nb IN FOO 1\n").unwrap_err();
        assert_eq!(err.code(), Code::SemanticError);
        assert_eq!(err.line(), 2);
        let err = parse("a 1x A 192.0.2.1\n").unwrap_err();
        assert_eq!(err.code(), Code::SyntaxError);
        let err = parse("a 4294967295 A 192.0.2.1\n").unwrap_err();
        assert_eq!(err.code(), Code::SemanticError);
    }

    #[test]
    fn quoted_names() {
        for zone in [
            "\"quoted owner\" A 192.0.2.1\n",
            "$ORIGIN \"example.org.\"\n",
            "a A \"192.0.2.1\"\n",
            "a MX \"10\" mail\n",
            "a MX 10 \"mail\"\n",
        ] {
            let err = parse(zone).unwrap_err();
            assert_eq!(err.code(), Code::SyntaxError, "{}", zone);
            assert_eq!(err.line(), 1);
        }
        let records = parse("a TXT \"quoted text\"\n").unwrap();
        assert_eq!(records[0].data().as_ref(), b"\x0bquoted text");
    }

    #[test]
    fn continue_after_errors() {
        let zone = "a A 192.0.2.1\n\
                    b A 192.0.2.256\n\
                    c ( A\n 192.0.2.3 ) \"x\"\n\
                    d A 192.0.2.4\n\
                    e LOC 1 2 3\n\
                    f A 192.0.2.6\n";
        let mut parser = Parser::new(
            "test.zone",
            zone.as_bytes(),
            options().with_error_policy(ErrorPolicy::Continue),
        )
        .unwrap();
        let mut owners = Vec::new();
        let summary = parser
            .process(|record| {
                owners.push(record.owner().to_string());
                Flow::Continue
            })
            .unwrap();
        assert_eq!(
            owners,
            ["a.example.com.", "d.example.com.", "f.example.com."]
        );
        assert_eq!(
            summary,
            Summary {
                records: 3,
                errors: 3,
                aborted: false
            }
        );
        let errors = parser.take_errors();
        assert_eq!(
            errors.iter().map(|err| (err.code(), err.line())).collect::<Vec<_>>(),
            [
                (Code::SyntaxError, 2),
                (Code::SyntaxError, 4),
                (Code::NotImplemented, 6),
            ]
        );
        assert!(parser.errors().is_empty());
    }

    #[test]
    fn stop_on_error() {
        let mut parser = Parser::new(
            "test.zone",
            "a A 1.2.3.4\nb A x\nc A 1.2.3.5\n".as_bytes(),
            options(),
        )
        .unwrap();
        assert!(parser.next().unwrap().is_ok());
        assert!(parser.next().unwrap().is_err());
        assert!(parser.next().is_none());
    }

    #[test]
    fn abort() {
        let mut parser = Parser::new(
            "test.zone",
            "a A 1.2.3.4\nb A 1.2.3.5\n".as_bytes(),
            options(),
        )
        .unwrap();
        let summary = parser.process(|_| Flow::Abort).unwrap();
        assert_eq!(summary.records, 1);
        assert!(summary.aborted);
        assert_eq!(
            parser.next_record().unwrap().unwrap().owner().to_string(),
            "b.example.com."
        );
    }

    #[test]
    fn bad_options() {
        let res = Parser::new("x", "".as_bytes(), options().with_block_size(65));
        assert_eq!(res.err().map(|err| err.code()), Some(Code::BadParameter));
    }

    #[test]
    fn out_of_memory() {
        let res = Parser::with_allocator(
            "x",
            "".as_bytes(),
            options().with_block_size(1024),
            Arc::new(Bounded::new(512)),
        );
        assert_eq!(res.err().map(|err| err.code()), Some(Code::OutOfMemory));
    }

    //--- Includes

    /// An includer serving files from memory.
    struct Files(HashMap<&'static str, &'static str>);

    impl Includer for Files {
        fn open(
            &mut self,
            path: &str,
            _parent: &str,
        ) -> io::Result<(String, Box<dyn Source>)> {
            let text = self.0.get(path).ok_or(io::ErrorKind::NotFound)?;
            let source: Box<dyn Source> = Box::new(text.as_bytes());
            Ok((path.into(), source))
        }
    }

    fn files(list: &[(&'static str, &'static str)]) -> Files {
        Files(list.iter().copied().collect())
    }

    #[test]
    fn include() {
        let parser = Parser::new(
            "main.zone",
            "$TTL 60\n\
             a A 192.0.2.1\n\
             $INCLUDE sub.zone sub\n\
             b A 192.0.2.2\n\
             \x20 A 192.0.2.3\n"
                .as_bytes(),
            options(),
        )
        .unwrap()
        .with_includer(files(&[(
            "sub.zone",
            "c A 192.0.2.4\n$ORIGIN other.\n@ CH A 192.0.2.5\n",
        )]));
        let records: Vec<_> = parser
            .map(|record| record.unwrap().to_string())
            .collect();
        assert_eq!(
            records,
            [
                "a.example.com. 60 IN A 192.0.2.1",
                "c.sub.example.com. 60 IN A 192.0.2.4",
                "other. 60 CH A 192.0.2.5",
                "b.example.com. 60 IN A 192.0.2.2",
                "b.example.com. 60 IN A 192.0.2.3",
            ]
        );
    }

    #[test]
    fn include_errors() {
        let err = parse("$INCLUDE sub.zone\n").unwrap_err();
        assert_eq!(err.code(), Code::NotImplemented);

        // Included files start without an owner.
        let mut parser = Parser::new(
            "main.zone",
            "a A 192.0.2.1\n$INCLUDE sub.zone\n".as_bytes(),
            options(),
        )
        .unwrap()
        .with_includer(files(&[("sub.zone", " A 192.0.2.2\n")]));
        assert!(parser.next().unwrap().is_ok());
        let err = parser.next().unwrap().unwrap_err();
        assert_eq!(err.code(), Code::SemanticError);
        assert_eq!(err.file(), Some("sub.zone"));

        let err = Parser::new(
            "main.zone",
            "$INCLUDE missing.zone\n".as_bytes(),
            options(),
        )
        .unwrap()
        .with_includer(files(&[]))
        .next()
        .unwrap()
        .unwrap_err();
        assert_eq!(err.code(), Code::ReadError);
        assert_eq!(err.file(), Some("main.zone"));

        let err = Parser::new(
            "main.zone",
            "$INCLUDE loop.zone\n".as_bytes(),
            options().with_max_include_depth(3),
        )
        .unwrap()
        .with_includer(files(&[("loop.zone", "$INCLUDE loop.zone\n")]))
        .next()
        .unwrap()
        .unwrap_err();
        assert_eq!(err.code(), Code::SemanticError);
        assert_eq!(err.file(), Some("loop.zone"));
    }
}
