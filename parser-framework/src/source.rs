use common_framework::{FatalError, Origin, ParseError, ParseResult, StreamUnit};
use std::io::{self, BufReader, Bytes, Read};
use std::sync::Arc;

/// A supplier of stream units, each tagged with the origin it starts at.
pub trait UnitSource<U> {
    /// Reads the next unit. `Ok(None)` signals end of input.
    fn next_unit(&mut self) -> ParseResult<Option<(U, Origin)>>;

    /// The position just past the last unit read so far.
    fn end_origin(&mut self) -> Origin;
}

/// A source over any in-memory iterator of units.
///
/// Line and column advance per unit; a newline starts a new line.
#[derive(Debug, Clone)]
pub struct IterSource<I> {
    units: I,
    origin: Origin,
}

impl<I> IterSource<I> {
    pub fn new(name: impl Into<Arc<str>>, units: I) -> Self {
        Self {
            units,
            origin: Origin::new(name),
        }
    }
}

impl<I, U> UnitSource<U> for IterSource<I>
where
    I: Iterator<Item = U>,
    U: StreamUnit,
{
    fn next_unit(&mut self) -> ParseResult<Option<(U, Origin)>> {
        Ok(self.units.next().map(|unit| {
            let origin = self.origin.clone();
            self.origin.advance(unit.is_newline());
            (unit, origin)
        }))
    }

    fn end_origin(&mut self) -> Origin {
        self.origin.clone()
    }
}

fn io_error(origin: &Origin, source: io::Error) -> ParseError {
    ParseError::fatal(FatalError::Io {
        origin: origin.clone(),
        source,
    })
}

/// A byte source over a reader.
pub struct ByteReaderSource<R: Read> {
    bytes: Bytes<BufReader<R>>,
    origin: Origin,
}

impl<R: Read> ByteReaderSource<R> {
    pub fn new(name: impl Into<Arc<str>>, reader: R) -> Self {
        Self {
            bytes: BufReader::new(reader).bytes(),
            origin: Origin::new(name),
        }
    }
}

impl<R: Read> UnitSource<u8> for ByteReaderSource<R> {
    fn next_unit(&mut self) -> ParseResult<Option<(u8, Origin)>> {
        match self.bytes.next() {
            None => Ok(None),
            Some(Err(err)) => Err(io_error(&self.origin, err)),
            Some(Ok(byte)) => {
                let origin = self.origin.clone();
                self.origin.advance(byte == b'\n');
                Ok(Some((byte, origin)))
            }
        }
    }

    fn end_origin(&mut self) -> Origin {
        self.origin.clone()
    }
}

/// A character source decoding UTF-8 from a reader.
pub struct CharReaderSource<R: Read> {
    bytes: Bytes<BufReader<R>>,
    origin: Origin,
}

impl<R: Read> CharReaderSource<R> {
    pub fn new(name: impl Into<Arc<str>>, reader: R) -> Self {
        Self {
            bytes: BufReader::new(reader).bytes(),
            origin: Origin::new(name),
        }
    }

    fn next_byte(&mut self) -> ParseResult<Option<u8>> {
        self.bytes
            .next()
            .transpose()
            .map_err(|err| io_error(&self.origin, err))
    }

    fn invalid(&self) -> ParseError {
        io_error(
            &self.origin,
            io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8"),
        )
    }
}

/// Length of the UTF-8 sequence introduced by `lead`.
fn utf8_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

impl<R: Read> UnitSource<char> for CharReaderSource<R> {
    fn next_unit(&mut self) -> ParseResult<Option<(char, Origin)>> {
        let lead = match self.next_byte()? {
            Some(lead) => lead,
            None => return Ok(None),
        };
        let width = utf8_width(lead).ok_or_else(|| self.invalid())?;
        let mut encoded = [lead, 0, 0, 0];
        for slot in encoded.iter_mut().take(width).skip(1) {
            *slot = self.next_byte()?.ok_or_else(|| self.invalid())?;
        }
        let ch = std::str::from_utf8(&encoded[..width])
            .ok()
            .and_then(|text| text.chars().next())
            .ok_or_else(|| self.invalid())?;

        let origin = self.origin.clone();
        self.origin.advance(ch == '\n');
        Ok(Some((ch, origin)))
    }

    fn end_origin(&mut self) -> Origin {
        self.origin.clone()
    }
}
