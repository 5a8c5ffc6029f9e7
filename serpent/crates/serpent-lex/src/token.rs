//! Token definitions.
//!
//! The [`TokenKind`] vocabulary is closed and numbered. The discriminants are
//! the token-type numbers of the Python 2 grammar the parser is generated
//! from, so a grammar can map kinds one-to-one without a translation table.
//! Keywords get a tag each, as do operators.

use std::borrow::Cow;
use std::fmt;

use serpent_util::Span;

/// The kind of a lexical token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(i16)]
pub enum TokenKind {
    /// End of input
    Eof = -1,

    // ===== Structure =====
    /// Newline run ending a logical line
    Newline = 105,
    /// `@` decorator marker
    At = 106,

    // ===== Delimiters =====
    /// `(`
    LParen = 107,
    /// `)`
    RParen = 108,
    /// Identifier
    Name = 109,
    /// `.`
    Dot = 110,
    /// `:`
    Colon = 111,
    /// `,`
    Comma = 112,
    /// `*`
    Star = 113,
    /// `**`
    DoubleStar = 114,
    /// `=`
    Assign = 115,
    /// `;`
    Semi = 116,

    // ===== Augmented assignment =====
    /// `+=`
    PlusEqual = 117,
    /// `-=`
    MinusEqual = 118,
    /// `*=`
    StarEqual = 119,
    /// `/=`
    SlashEqual = 120,
    /// `%=`
    PercentEqual = 121,
    /// `&=`
    AmperEqual = 122,
    /// `|=`
    VbarEqual = 123,
    /// `^=`
    CircumflexEqual = 124,
    /// `<<=`
    LeftShiftEqual = 125,
    /// `>>=`
    RightShiftEqual = 126,
    /// `**=`
    DoubleStarEqual = 127,
    /// `//=`
    DoubleSlashEqual = 128,

    /// `>>`
    RightShift = 129,

    // ===== Boolean keywords =====
    /// `or`
    Or = 130,
    /// `and`
    And = 131,
    /// `not`
    Not = 132,

    // ===== Comparison and bitwise =====
    /// `<`
    Less = 133,
    /// `>`
    Greater = 134,
    /// `==`
    Equal = 135,
    /// `>=`
    GreaterEqual = 136,
    /// `<=`
    LessEqual = 137,
    /// `<>`
    AltNotEqual = 138,
    /// `!=`
    NotEqual = 139,
    /// `|`
    Vbar = 140,
    /// `^`
    Circumflex = 141,
    /// `&`
    Amper = 142,
    /// `<<`
    LeftShift = 143,

    // ===== Arithmetic =====
    /// `+`
    Plus = 144,
    /// `-`
    Minus = 145,
    /// `/`
    Slash = 146,
    /// `%`
    Percent = 147,
    /// `//`
    DoubleSlash = 148,
    /// `~`
    Tilde = 149,

    // ===== Brackets =====
    /// `[`
    LBrack = 150,
    /// `]`
    RBrack = 151,
    /// `{`
    LCurly = 152,
    /// `}`
    RCurly = 153,
    /// `` ` `` repr quote
    Backquote = 154,

    // ===== Literals =====
    /// Integer literal (`42`, `0x1f`, `017`)
    Int = 155,
    /// Integer literal with `l`/`L` suffix
    LongInt = 156,
    /// Floating-point literal
    Float = 157,
    /// Imaginary literal with `j`/`J` suffix
    Complex = 158,
    /// String literal in any quoting form
    String = 159,

    // ===== Hidden structure =====
    /// Backslash continuation plus the whitespace after it
    LineContinuation = 165,
    /// Intra-line whitespace
    Whitespace = 166,
    /// Indentation at the start of a line
    LeadingWhitespace = 167,
    /// `#` comment
    Comment = 168,

    // ===== Keywords =====
    /// `def`
    Def = 169,
    /// `print`
    Print = 170,
    /// `del`
    Del = 171,
    /// `pass`
    Pass = 172,
    /// `break`
    Break = 173,
    /// `continue`
    Continue = 174,
    /// `return`
    Return = 175,
    /// `raise`
    Raise = 176,
    /// `import`
    Import = 177,
    /// `from`
    From = 178,
    /// `as`
    As = 179,
    /// `global`
    Global = 180,
    /// `exec`
    Exec = 181,
    /// `in`
    In = 182,
    /// `assert`
    Assert = 183,
    /// `if`
    If = 184,
    /// `else`
    Else = 185,
    /// `elif`
    Elif = 186,
    /// `while`
    While = 187,
    /// `for`
    For = 188,
    /// `try`
    Try = 189,
    /// `finally`
    Finally = 190,
    /// `with`
    With = 191,
    /// `except`
    Except = 192,
    /// `is`
    Is = 193,
    /// `lambda`
    Lambda = 194,
    /// `class`
    Class = 195,
    /// `yield`
    Yield = 196,
}

impl TokenKind {
    /// Every kind, in ascending id order.
    pub const ALL: [TokenKind; 88] = {
        use TokenKind::*;
        [
            Eof, Newline, At, LParen, RParen, Name, Dot, Colon, Comma, Star, DoubleStar, Assign,
            Semi, PlusEqual, MinusEqual, StarEqual, SlashEqual, PercentEqual, AmperEqual,
            VbarEqual, CircumflexEqual, LeftShiftEqual, RightShiftEqual, DoubleStarEqual,
            DoubleSlashEqual, RightShift, Or, And, Not, Less, Greater, Equal, GreaterEqual,
            LessEqual, AltNotEqual, NotEqual, Vbar, Circumflex, Amper, LeftShift, Plus, Minus,
            Slash, Percent, DoubleSlash, Tilde, LBrack, RBrack, LCurly, RCurly, Backquote, Int,
            LongInt, Float, Complex, String, LineContinuation, Whitespace, LeadingWhitespace,
            Comment, Def, Print, Del, Pass, Break, Continue, Return, Raise, Import, From, As,
            Global, Exec, In, Assert, If, Else, Elif, While, For, Try, Finally, With, Except, Is,
            Lambda, Class, Yield,
        ]
    };

    /// The grammar's token-type number.
    ///
    /// # Example
    ///
    /// ```
    /// use serpent_lex::TokenKind;
    ///
    /// assert_eq!(TokenKind::Name.id(), 109);
    /// assert_eq!(TokenKind::Eof.id(), -1);
    /// ```
    #[inline]
    pub const fn id(self) -> i16 {
        self as i16
    }

    /// Looks a kind up by its token-type number.
    pub fn from_id(id: i16) -> Option<TokenKind> {
        Self::ALL
            .binary_search_by_key(&id, |kind| kind.id())
            .ok()
            .map(|index| Self::ALL[index])
    }

    /// The grammar's symbolic name for this kind, e.g. `"LEADING_WS"`.
    ///
    /// Keywords use their spelling in upper case.
    pub const fn name(self) -> &'static str {
        use TokenKind::*;
        match self {
            Eof => "EOF",
            Newline => "NEWLINE",
            At => "AT",
            LParen => "LPAREN",
            RParen => "RPAREN",
            Name => "NAME",
            Dot => "DOT",
            Colon => "COLON",
            Comma => "COMMA",
            Star => "STAR",
            DoubleStar => "DOUBLESTAR",
            Assign => "ASSIGN",
            Semi => "SEMI",
            PlusEqual => "PLUSEQUAL",
            MinusEqual => "MINUSEQUAL",
            StarEqual => "STAREQUAL",
            SlashEqual => "SLASHEQUAL",
            PercentEqual => "PERCENTEQUAL",
            AmperEqual => "AMPEREQUAL",
            VbarEqual => "VBAREQUAL",
            CircumflexEqual => "CIRCUMFLEXEQUAL",
            LeftShiftEqual => "LEFTSHIFTEQUAL",
            RightShiftEqual => "RIGHTSHIFTEQUAL",
            DoubleStarEqual => "DOUBLESTAREQUAL",
            DoubleSlashEqual => "DOUBLESLASHEQUAL",
            RightShift => "RIGHTSHIFT",
            Or => "OR",
            And => "AND",
            Not => "NOT",
            Less => "LESS",
            Greater => "GREATER",
            Equal => "EQUAL",
            GreaterEqual => "GREATEREQUAL",
            LessEqual => "LESSEQUAL",
            AltNotEqual => "ALT_NOTEQUAL",
            NotEqual => "NOTEQUAL",
            Vbar => "VBAR",
            Circumflex => "CIRCUMFLEX",
            Amper => "AMPER",
            LeftShift => "LEFTSHIFT",
            Plus => "PLUS",
            Minus => "MINUS",
            Slash => "SLASH",
            Percent => "PERCENT",
            DoubleSlash => "DOUBLESLASH",
            Tilde => "TILDE",
            LBrack => "LBRACK",
            RBrack => "RBRACK",
            LCurly => "LCURLY",
            RCurly => "RCURLY",
            Backquote => "BACKQUOTE",
            Int => "INT",
            LongInt => "LONGINT",
            Float => "FLOAT",
            Complex => "COMPLEX",
            String => "STRING",
            LineContinuation => "CONTINUED_LINE",
            Whitespace => "WS",
            LeadingWhitespace => "LEADING_WS",
            Comment => "COMMENT",
            Def => "DEF",
            Print => "PRINT",
            Del => "DEL",
            Pass => "PASS",
            Break => "BREAK",
            Continue => "CONTINUE",
            Return => "RETURN",
            Raise => "RAISE",
            Import => "IMPORT",
            From => "FROM",
            As => "AS",
            Global => "GLOBAL",
            Exec => "EXEC",
            In => "IN",
            Assert => "ASSERT",
            If => "IF",
            Else => "ELSE",
            Elif => "ELIF",
            While => "WHILE",
            For => "FOR",
            Try => "TRY",
            Finally => "FINALLY",
            With => "WITH",
            Except => "EXCEPT",
            Is => "IS",
            Lambda => "LAMBDA",
            Class => "CLASS",
            Yield => "YIELD",
        }
    }

    /// Returns true for reserved words, including `and`, `or` and `not`.
    pub const fn is_keyword(self) -> bool {
        matches!(self, TokenKind::Or | TokenKind::And | TokenKind::Not)
            || (self.id() >= TokenKind::Def.id() && self.id() <= TokenKind::Yield.id())
    }

    /// Returns true for number and string literals.
    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::Int
                | TokenKind::LongInt
                | TokenKind::Float
                | TokenKind::Complex
                | TokenKind::String
        )
    }

    /// Returns true for tokens that only describe layout: hidden whitespace,
    /// comments, continuations and newlines.
    pub const fn is_structural(self) -> bool {
        matches!(
            self,
            TokenKind::Newline
                | TokenKind::Comment
                | TokenKind::Whitespace
                | TokenKind::LeadingWhitespace
                | TokenKind::LineContinuation
        )
    }

    /// Returns true for operator and punctuation tokens.
    pub const fn is_operator(self) -> bool {
        !matches!(self, TokenKind::Eof | TokenKind::Name)
            && !self.is_keyword()
            && !self.is_literal()
            && !self.is_structural()
    }

    /// Returns true for `(`, `[` and `{`.
    pub const fn opens_bracket(self) -> bool {
        matches!(self, TokenKind::LParen | TokenKind::LBrack | TokenKind::LCurly)
    }

    /// Returns true for `)`, `]` and `}`.
    pub const fn closes_bracket(self) -> bool {
        matches!(self, TokenKind::RParen | TokenKind::RBrack | TokenKind::RCurly)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token with its text, location and visibility.
///
/// `span` always covers the exact source bytes the token consumed. `text` is
/// the same slice for every kind except [`TokenKind::LeadingWhitespace`],
/// whose text is re-materialized as one space per indentation column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// Token text.
    pub text: Cow<'a, str>,
    /// Source location of the consumed bytes.
    pub span: Span,
    /// False for tokens a parser must skip.
    pub visible: bool,
}

impl<'a> Token<'a> {
    /// Creates a token whose text is a slice of the source.
    pub fn new(kind: TokenKind, text: &'a str, span: Span, visible: bool) -> Self {
        Self {
            kind,
            text: Cow::Borrowed(text),
            span,
            visible,
        }
    }

    /// Creates a token whose text differs from the bytes its span covers.
    pub fn synthesized(kind: TokenKind, text: String, span: Span, visible: bool) -> Self {
        Self {
            kind,
            text: Cow::Owned(text),
            span,
            visible,
        }
    }

    /// The source bytes this token consumed.
    ///
    /// # Example
    ///
    /// ```
    /// use serpent_lex::{tokenize, TokenKind};
    ///
    /// let source = "if x:\n\ty";
    /// let tokens = tokenize(source).unwrap();
    /// let indent = tokens.iter().find(|t| t.kind == TokenKind::LeadingWhitespace).unwrap();
    /// assert_eq!(indent.text, "        ");
    /// assert_eq!(indent.source_text(source), "\t");
    /// ```
    pub fn source_text<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.span.range()).unwrap_or("")
    }

    /// Indentation width in columns, for leading whitespace tokens.
    pub fn indent_width(&self) -> Option<usize> {
        (self.kind == TokenKind::LeadingWhitespace).then(|| self.text.len())
    }

    /// Detaches the token from the source buffer.
    pub fn into_owned(self) -> Token<'static> {
        Token {
            kind: self.kind,
            text: Cow::Owned(self.text.into_owned()),
            span: self.span,
            visible: self.visible,
        }
    }

    /// Returns true for the end-of-input marker.
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.kind, self.text)
    }
}

/// Converts an identifier to a keyword kind if it is reserved.
///
/// Matching is exact and case-sensitive.
///
/// # Example
///
/// ```
/// use serpent_lex::{keyword_from_ident, TokenKind};
///
/// assert_eq!(keyword_from_ident("or"), Some(TokenKind::Or));
/// assert_eq!(keyword_from_ident("orange"), None);
/// assert_eq!(keyword_from_ident("None"), None);
/// ```
pub fn keyword_from_ident(ident: &str) -> Option<TokenKind> {
    let kind = match ident {
        "def" => TokenKind::Def,
        "print" => TokenKind::Print,
        "del" => TokenKind::Del,
        "pass" => TokenKind::Pass,
        "break" => TokenKind::Break,
        "continue" => TokenKind::Continue,
        "return" => TokenKind::Return,
        "raise" => TokenKind::Raise,
        "import" => TokenKind::Import,
        "from" => TokenKind::From,
        "as" => TokenKind::As,
        "global" => TokenKind::Global,
        "exec" => TokenKind::Exec,
        "in" => TokenKind::In,
        "assert" => TokenKind::Assert,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "elif" => TokenKind::Elif,
        "while" => TokenKind::While,
        "for" => TokenKind::For,
        "try" => TokenKind::Try,
        "finally" => TokenKind::Finally,
        "with" => TokenKind::With,
        "except" => TokenKind::Except,
        "is" => TokenKind::Is,
        "lambda" => TokenKind::Lambda,
        "class" => TokenKind::Class,
        "yield" => TokenKind::Yield,
        "and" => TokenKind::And,
        "or" => TokenKind::Or,
        "not" => TokenKind::Not,
        _ => return None,
    };
    Some(kind)
}
