//! Bit-parallel classification of input blocks.
//!
//! Input is processed in blocks of [`BLOCK_SIZE`] octets. For each block,
//! [`Block::classify`] produces one 64 bit mask per property with bit `i`
//! describing octet `i` of the block. Everything that crosses a block
//! boundary is kept in a small [`State`], so a block never needs to look at
//! octets outside of itself.
//!
//! The rules are those of RFC 1035 section 5.1:
//!
//! * a backslash escapes the next octet,
//! * an unescaped `"` outside a comment opens or closes a quoted string,
//! * an unescaped `;` outside a quoted string starts a comment that runs
//!   until the next line feed,
//! * space, tab, carriage return, line feed, parentheses, quotes and
//!   semicolons delimit tokens unless escaped.
//!
//! A line feed always ends a comment, even if escaped.

//------------ Constants -----------------------------------------------------

/// The number of octets in a block.
pub const BLOCK_SIZE: usize = 64;

/// Every odd bit of a mask.
const ODD_BITS: u64 = 0xAAAA_AAAA_AAAA_AAAA;

//------------ State ---------------------------------------------------------

/// The classification state carried from one block to the next.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct State {
    /// The previous block ended inside a comment.
    pub in_comment: bool,

    /// The previous block ended inside a quoted string.
    pub in_quoted: bool,

    /// The first octet of the next block is escaped.
    pub is_escaped: bool,

    /// The last octet of the previous block was part of a contiguous token.
    pub follows_contiguous: bool,
}

//------------ Block ---------------------------------------------------------

/// The classification of a block.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Block {
    /// Octets escaped by a preceding backslash.
    pub escaped: u64,

    /// Octets inside a comment, including the semicolon.
    pub comment: u64,

    /// Octets inside a quoted string, including the opening quote.
    pub quoted: u64,

    /// Octets belonging to a contiguous, unquoted token.
    pub contiguous: u64,

    /// Quotes opening or closing a quoted string.
    pub quotes: u64,

    /// Line feeds that delimit tokens.
    pub line_feeds: u64,

    /// Opening parentheses.
    pub open: u64,

    /// Closing parentheses.
    pub close: u64,

    /// The first octet of each contiguous token.
    pub starts: u64,

    /// The first octet after each contiguous token.
    pub ends: u64,
}

impl Block {
    /// Classifies a block, updating the carried state.
    pub fn classify(input: &[u8; BLOCK_SIZE], state: &mut State) -> Self {
        let chars = Chars::scan(input);

        let escaped = find_escaped(chars.backslash, &mut state.is_escaped);
        let quote = chars.quote & !escaped;
        let semicolon = chars.semicolon & !escaped;

        let regions = if !state.in_comment && semicolon == 0 {
            // Without comments, quoted regions are a prefix sum.
            let mut quoted = prefix_xor(quote);
            if state.in_quoted {
                quoted = !quoted;
            }
            state.in_quoted = quoted >> 63 != 0;
            Regions {
                quoted,
                comment: 0,
                comment_ends: 0,
            }
        } else {
            Regions::walk(quote, semicolon, chars.newline, state)
        };

        let delimiters = ((chars.blank
            | chars.newline
            | chars.open
            | chars.close
            | chars.quote
            | chars.semicolon)
            & !escaped)
            | regions.comment_ends;
        let outside = !(regions.comment | regions.quoted);
        let contiguous = !delimiters & outside;

        let follows = contiguous << 1 | u64::from(state.follows_contiguous);
        state.follows_contiguous = contiguous >> 63 != 0;

        Block {
            escaped,
            comment: regions.comment,
            quoted: regions.quoted,
            contiguous,
            quotes: quote & !regions.comment,
            line_feeds: (chars.newline & !escaped & !regions.quoted)
                | regions.comment_ends,
            open: chars.open & !escaped & outside,
            close: chars.close & !escaped & outside,
            starts: contiguous & !follows,
            ends: !contiguous & follows,
        }
    }

    /// Returns the mask of all positions that need a tape entry.
    pub fn boundaries(&self) -> u64 {
        self.starts
            | self.ends
            | self.quotes
            | self.line_feeds
            | self.open
            | self.close
    }
}

//------------ Chars ---------------------------------------------------------

/// Masks of the octets significant for classification.
#[derive(Clone, Copy, Debug, Default)]
struct Chars {
    backslash: u64,
    quote: u64,
    semicolon: u64,
    newline: u64,
    blank: u64,
    open: u64,
    close: u64,
}

impl Chars {
    fn scan(input: &[u8; BLOCK_SIZE]) -> Self {
        let mut res = Chars::default();
        for (i, &ch) in input.iter().enumerate() {
            let bit = 1u64 << i;
            match ch {
                b'\\' => res.backslash |= bit,
                b'"' => res.quote |= bit,
                b';' => res.semicolon |= bit,
                b'\n' => res.newline |= bit,
                b' ' | b'\t' | b'\r' => res.blank |= bit,
                b'(' => res.open |= bit,
                b')' => res.close |= bit,
                _ => {}
            }
        }
        res
    }
}

//------------ Regions -------------------------------------------------------

/// The comment and quoted regions of a block.
#[derive(Clone, Copy, Debug, Default)]
struct Regions {
    quoted: u64,
    comment: u64,

    /// Line feeds that end a comment.
    comment_ends: u64,
}

impl Regions {
    /// Determines the regions by walking the events of the block.
    ///
    /// Only quotes, semicolons and, inside comments, line feeds are looked
    /// at, so the loop runs once per region boundary.
    fn walk(
        quote: u64,
        semicolon: u64,
        newline: u64,
        state: &mut State,
    ) -> Self {
        let mut res = Regions::default();
        let mut pos = 0;
        let mut start = 0;
        loop {
            if state.in_comment {
                let ends = newline & from(pos);
                if ends == 0 {
                    res.comment |= from(start);
                    break;
                }
                let end = ends.trailing_zeros();
                res.comment |= range(start, end);
                res.comment_ends |= 1 << end;
                state.in_comment = false;
                pos = end + 1;
            } else if state.in_quoted {
                let ends = quote & from(pos);
                if ends == 0 {
                    res.quoted |= from(start);
                    break;
                }
                let end = ends.trailing_zeros();
                res.quoted |= range(start, end);
                state.in_quoted = false;
                pos = end + 1;
            } else {
                let events = (quote | semicolon) & from(pos);
                if events == 0 {
                    break;
                }
                start = events.trailing_zeros();
                if quote & (1 << start) != 0 {
                    state.in_quoted = true;
                } else {
                    state.in_comment = true;
                }
                pos = start + 1;
            }
        }
        res
    }
}

//------------ Helper Functions ----------------------------------------------

/// Returns the mask of all bits from `pos` upwards.
fn from(pos: u32) -> u64 {
    if pos >= 64 {
        0
    } else {
        !0u64 << pos
    }
}

/// Returns the mask of bits from `start` up to but excluding `end`.
fn range(start: u32, end: u32) -> u64 {
    from(start) & !from(end)
}

/// Returns the mask of escaped octets.
///
/// A backslash escapes the next octet unless it is escaped itself. This
/// finds sequences of backslashes and their parity with a carry-propagating
/// subtraction rather than a loop.
fn find_escaped(backslash: u64, is_escaped: &mut bool) -> u64 {
    let carry = u64::from(*is_escaped);
    if backslash == 0 {
        *is_escaped = false;
        return carry;
    }
    let potential_escape = backslash & !carry;
    let maybe_escaped = potential_escape << 1;
    let escape_and_terminal = (maybe_escaped | ODD_BITS)
        .wrapping_sub(potential_escape)
        ^ ODD_BITS;
    let escaped = escape_and_terminal ^ (backslash | carry);
    let escape = escape_and_terminal & backslash;
    *is_escaped = escape >> 63 != 0;
    escaped
}

/// Returns the prefix XOR of a mask.
///
/// Bit `i` of the result is the XOR of bits `0..=i` of the input, so the
/// result marks the octets from each odd quote up to the next even one.
fn prefix_xor(mut mask: u64) -> u64 {
    mask ^= mask << 1;
    mask ^= mask << 2;
    mask ^= mask << 4;
    mask ^= mask << 8;
    mask ^= mask << 16;
    mask ^= mask << 32;
    mask
}

//============ Tests =========================================================
