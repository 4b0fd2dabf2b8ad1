use crate::position::Span;

/// A token produced by the lexer.
#[derive(Debug, Clone)]
pub(crate) struct Token {
	pub r#type: TokenType,
	pub span:   Span,
}

impl Token {
	pub fn new(r#type: TokenType, span: Span) -> Self { Self { r#type, span } }
}

/// The different kinds of token in the language.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenType {
	/// Empty character: ` `, `\r`, `\t`. Filtered out before parsing.
	EmptyChar,
	/// Newline `\n`. Kept: the parser accepts one as an input terminator.
	NewLine,
	/// Left parenthesis `(`.
	LeftParen,
	/// Right parenthesis `)`.
	RightParen,
	/// Comma `,`.
	Comma,
	/// Colon `:`, introduces a function body.
	Colon,
	/// Minus `-`.
	Minus,
	/// Plus `+`.
	Plus,
	/// Slash `/`.
	Slash,
	/// Asterisk `*`.
	Star,
	/// Caret `^`, exponentiation.
	Caret,
	/// Equal `=`, binding in `let`.
	Equal,
	/// Equal equal `==`.
	EqualEqual,
	/// Bang equal `!=`.
	BangEqual,
	/// Greater than `>`.
	Greater,
	/// Greater than or equal `>=`.
	GreaterEqual,
	/// Less than `<`.
	Less,
	/// Less than or equal `<=`.
	LessEqual,
	/// Identifier, e.g. a variable or function name.
	Identifier(String),
	/// Number literal; int and float lexemes both land here.
	Number(f64),
	/// Boolean literal `true`.
	True,
	/// Boolean literal `false`.
	False,
	/// Variable binding keyword.
	Let,
	/// Logical AND keyword.
	And,
	/// Logical OR keyword.
	Or,
	/// Logical NOT keyword.
	Not,
	/// Conditional keyword.
	If,
	/// Then-branch keyword.
	Then,
	/// Else-branch keyword.
	Else,
	/// Function definition keyword.
	Fun,
	/// End of input.
	Eof,
}

impl TokenType {
	pub fn is_ignored(&self) -> bool { matches!(self, TokenType::EmptyChar) }

	pub fn keyword_or_identifier(value: &str) -> Self {
		match value {
			"true" => TokenType::True,
			"false" => TokenType::False,
			"let" => TokenType::Let,
			"and" => TokenType::And,
			"or" => TokenType::Or,
			"not" => TokenType::Not,
			"if" => TokenType::If,
			"then" => TokenType::Then,
			"else" => TokenType::Else,
			"fun" => TokenType::Fun,
			_ => TokenType::Identifier(value.to_string()),
		}
	}
}

impl std::fmt::Display for TokenType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use TokenType::*;
		match self {
			EmptyChar => write!(f, " "),
			NewLine => write!(f, "\\n"),
			LeftParen => write!(f, "("),
			RightParen => write!(f, ")"),
			Comma => write!(f, ","),
			Colon => write!(f, ":"),
			Minus => write!(f, "-"),
			Plus => write!(f, "+"),
			Slash => write!(f, "/"),
			Star => write!(f, "*"),
			Caret => write!(f, "^"),
			Equal => write!(f, "="),
			EqualEqual => write!(f, "=="),
			BangEqual => write!(f, "!="),
			Greater => write!(f, ">"),
			GreaterEqual => write!(f, ">="),
			Less => write!(f, "<"),
			LessEqual => write!(f, "<="),
			Identifier(name) => write!(f, "{name}"),
			Number(n) => write!(f, "{n}"),
			True => write!(f, "true"),
			False => write!(f, "false"),
			Let => write!(f, "let"),
			And => write!(f, "and"),
			Or => write!(f, "or"),
			Not => write!(f, "not"),
			If => write!(f, "if"),
			Then => write!(f, "then"),
			Else => write!(f, "else"),
			Fun => write!(f, "fun"),
			Eof => write!(f, "<eof>"),
		}
	}
}
